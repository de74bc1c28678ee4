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

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::PoisonError;

use crate::append::Append;
use crate::layout::Layout;
use crate::layout::PatternLayout;

/// An appender that keeps formatted log lines in memory, for assertions in tests.
///
/// Clones share the same buffer: install one clone and inspect another.
///
/// # Examples
///
/// ```
/// use tt_logger::append::Capture;
/// use tt_logger::layout::PatternLayout;
///
/// let capture = Capture::default().with_layout(PatternLayout::new("%v"));
/// let installed = capture.clone();
/// assert!(capture.contents().is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct Capture {
    layout: Arc<dyn Layout>,
    lines: Arc<Mutex<Vec<String>>>,
}

impl Default for Capture {
    fn default() -> Self {
        Self {
            layout: Arc::new(PatternLayout::default()),
            lines: Arc::default(),
        }
    }
}

impl Capture {
    /// Sets the layout for the [`Capture`] appender.
    pub fn with_layout(mut self, layout: impl Layout) -> Self {
        self.layout = Arc::new(layout);
        self
    }

    /// All captured lines, joined with newlines.
    pub fn contents(&self) -> String {
        let lines = self.lines.lock().unwrap_or_else(PoisonError::into_inner);
        lines.iter().fold(String::new(), |mut out, line| {
            out.push_str(line);
            out.push('\n');
            out
        })
    }

    /// A copy of the captured lines.
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Drop every captured line.
    pub fn clear(&self) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl Append for Capture {
    fn append(&self, record: &log::Record) -> anyhow::Result<()> {
        let bytes = self.layout.format(record, false)?;
        let line = String::from_utf8_lossy(&bytes).into_owned();
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(line);
        Ok(())
    }
}
