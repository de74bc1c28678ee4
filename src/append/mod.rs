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

//! Sinks that write formatted log records to a destination.

use std::fmt;

pub use self::capture::Capture;
pub use self::console::Console;
pub use self::file::File;
pub use self::file::FileBuilder;

mod capture;
mod console;
mod file;

/// A sink for log records.
pub trait Append: fmt::Debug + Send + Sync + 'static {
    /// Write a log record.
    fn append(&self, record: &log::Record) -> anyhow::Result<()>;

    /// Flush any buffered records.
    fn flush(&self) {}
}

impl<T: Append> From<T> for Box<dyn Append> {
    fn from(value: T) -> Self {
        Box::new(value)
    }
}
