// Copyright 2024 FastLabs Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::path::PathBuf;

use log::SetLoggerError;

/// An error setting up the global logger.
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error("failed to create log file '{}': {source}", .path.display())]
    OpenFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to set up logger: {0}")]
    SetLogger(SetLoggerError),
}

impl From<SetLoggerError> for InitError {
    fn from(value: SetLoggerError) -> Self {
        InitError::SetLogger(value)
    }
}
