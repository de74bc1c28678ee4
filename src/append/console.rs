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

use std::io::IsTerminal;
use std::io::Write;

use crate::append::Append;
use crate::layout::Layout;
use crate::layout::PatternLayout;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stream {
    Stdout,
    Stderr,
}

/// An appender that prints log records to the console.
///
/// Levels and categories are colored when the stream is a terminal and `NO_COLOR` is not set.
///
/// # Examples
///
/// ```
/// use tt_logger::append::Console;
///
/// let stdout = Console::stdout();
/// let stderr = Console::stderr().no_color();
/// ```
#[derive(Debug)]
pub struct Console {
    stream: Stream,
    ansi: bool,
    layout: Box<dyn Layout>,
}

impl Default for Console {
    fn default() -> Self {
        Console::stdout()
    }
}

impl Console {
    /// A console appender writing to stdout.
    pub fn stdout() -> Self {
        Self::new(Stream::Stdout, std::io::stdout().is_terminal())
    }

    /// A console appender writing to stderr.
    pub fn stderr() -> Self {
        Self::new(Stream::Stderr, std::io::stderr().is_terminal())
    }

    fn new(stream: Stream, terminal: bool) -> Self {
        Self {
            stream,
            ansi: terminal && std::env::var_os("NO_COLOR").is_none(),
            layout: Box::new(PatternLayout::default()),
        }
    }

    /// Sets the layout for the [`Console`] appender.
    pub fn with_layout(mut self, layout: impl Into<Box<dyn Layout>>) -> Self {
        self.layout = layout.into();
        self
    }

    /// Never emit ANSI escapes.
    pub fn no_color(mut self) -> Self {
        self.ansi = false;
        self
    }
}

impl Append for Console {
    fn append(&self, record: &log::Record) -> anyhow::Result<()> {
        let mut bytes = self.layout.format(record, self.ansi)?;
        bytes.push(b'\n');
        match self.stream {
            Stream::Stdout => std::io::stdout().lock().write_all(&bytes)?,
            Stream::Stderr => std::io::stderr().lock().write_all(&bytes)?,
        }
        Ok(())
    }

    fn flush(&self) {
        let _ = match self.stream {
            Stream::Stdout => std::io::stdout().flush(),
            Stream::Stderr => std::io::stderr().flush(),
        };
    }
}
