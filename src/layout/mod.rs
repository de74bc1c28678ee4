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

//! Layouts for formatting log records.

use std::fmt;

pub use pattern::DEFAULT_PATTERN;
pub use pattern::LevelColor;
pub use pattern::PatternLayout;

mod pattern;

/// A layout for formatting log records.
pub trait Layout: fmt::Debug + Send + Sync + 'static {
    /// Format a log record into one line, without the trailing newline.
    ///
    /// `ansi` reports whether the sink can render ANSI escapes; a layout must emit none when it is
    /// `false`.
    fn format(&self, record: &log::Record, ansi: bool) -> anyhow::Result<Vec<u8>>;
}

impl<T: Layout> From<T> for Box<dyn Layout> {
    fn from(value: T) -> Self {
        Box::new(value)
    }
}

/// The file name of the record's source, without its directory.
pub(crate) fn filename<'a>(record: &'a log::Record<'a>) -> &'a str {
    record
        .file()
        .map(|file| file.rsplit(['/', '\\']).next().unwrap_or(file))
        .unwrap_or_default()
}
