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

use std::fs;
use std::fs::OpenOptions;
use std::io;
use std::io::LineWriter;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::PoisonError;

use crate::append::Append;
use crate::layout::Layout;
use crate::layout::PatternLayout;

/// A builder to configure and create a [`File`] appender.
#[derive(Debug)]
pub struct FileBuilder {
    path: PathBuf,
    truncate: bool,
    layout: Box<dyn Layout>,
}

impl FileBuilder {
    /// Create a new builder.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            truncate: true,
            layout: Box::new(PatternLayout::default()),
        }
    }

    /// Keep the existing content of the file and append to it.
    ///
    /// Default to `false`: the file is truncated when the appender is built.
    pub fn append(mut self, append: bool) -> Self {
        self.truncate = !append;
        self
    }

    /// Sets the layout for the logs.
    ///
    /// Default to [`PatternLayout`] with the default pattern.
    pub fn layout(mut self, layout: impl Into<Box<dyn Layout>>) -> Self {
        self.layout = layout.into();
        self
    }

    /// Build the [`File`] appender.
    ///
    /// # Errors
    ///
    /// Returns an error if the log directory or the log file cannot be created.
    pub fn build(self) -> io::Result<File> {
        let file = self.open()?;
        if self.truncate {
            file.set_len(0)?;
        }
        Ok(self.finish(file))
    }

    /// Build the [`File`] appender without truncating, together with a second handle to the
    /// same file that the caller uses to truncate it once the appender is in service.
    pub(crate) fn build_deferred(self) -> io::Result<(File, fs::File)> {
        let file = self.open()?;
        let handle = file.try_clone()?;
        Ok((self.finish(file), handle))
    }

    // Always opened in append mode, so writes land at the end even after a truncation
    // through another handle.
    fn open(&self) -> io::Result<fs::File> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }
        OpenOptions::new().create(true).append(true).open(&self.path)
    }

    fn finish(self, file: fs::File) -> File {
        File {
            path: self.path,
            layout: self.layout,
            writer: Mutex::new(LineWriter::new(file)),
        }
    }
}

/// An appender that writes log records to a file.
///
/// Every record reaches the file as soon as it is appended, so nothing is lost when the process
/// exits without flushing.
///
/// # Examples
///
/// ```no_run
/// use tt_logger::append::File;
///
/// let file = File::builder("logs/run.log").build().unwrap();
/// ```
#[derive(Debug)]
pub struct File {
    path: PathBuf,
    layout: Box<dyn Layout>,
    writer: Mutex<LineWriter<fs::File>>,
}

impl File {
    /// Create a builder for a file appender writing to `path`.
    pub fn builder(path: impl Into<PathBuf>) -> FileBuilder {
        FileBuilder::new(path)
    }

    /// The path of the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Append for File {
    fn append(&self, record: &log::Record) -> anyhow::Result<()> {
        let mut bytes = self.layout.format(record, false)?;
        bytes.push(b'\n');
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        writer.write_all(&bytes)?;
        Ok(())
    }

    fn flush(&self) {
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        let _ = writer.flush();
    }
}

#[cfg(test)]
mod tests {
    use rand::Rng;
    use rand::distr::Alphanumeric;
    use tempfile::TempDir;

    use super::*;
    use crate::Level;
    use crate::layout::PatternLayout;
    use crate::record::Location;
    use crate::record::with_record;

    static LOCATION: Location = ("tt_logger::append", "src/append/file.rs", 1);

    fn write_line(file: &File, message: &str) {
        with_record(Level::Info, "Device", format_args!("{message}"), &LOCATION, |r| {
            file.append(r).unwrap()
        });
    }

    #[test]
    fn test_file_truncates_by_default() {
        let dir = TempDir::new().expect("failed to create a temporary directory");
        let path = dir.path().join("run.log");
        fs::write(&path, "stale line\n").unwrap();

        let file = File::builder(&path)
            .layout(PatternLayout::new("%v"))
            .build()
            .unwrap();
        let message = generate_random_string();
        write_line(&file, &message);
        file.flush();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, format!("[Device] {message}\n"));
    }

    #[test]
    fn test_file_appends_when_asked() {
        let dir = TempDir::new().expect("failed to create a temporary directory");
        let path = dir.path().join("run.log");
        fs::write(&path, "kept\n").unwrap();

        let file = File::builder(&path)
            .append(true)
            .layout(PatternLayout::new("%l %v"))
            .build()
            .unwrap();
        write_line(&file, "added");
        file.flush();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "kept\ninfo [Device] added\n");
    }

    #[test]
    fn test_file_creates_parent_directories() {
        let dir = TempDir::new().expect("failed to create a temporary directory");
        let path = dir.path().join("nested").join("deeper").join("run.log");

        let file = File::builder(&path).build().unwrap();
        assert_eq!(file.path(), path.as_path());
        write_line(&file, "hello");
        file.flush();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.ends_with("[info] [Device] hello\n"), "{content}");
        assert!(!content.contains('\x1b'), "{content}");
    }

    #[test]
    fn test_records_reach_the_file_without_flush() {
        let dir = TempDir::new().expect("failed to create a temporary directory");
        let path = dir.path().join("run.log");

        let file = File::builder(&path)
            .layout(PatternLayout::new("%v"))
            .build()
            .unwrap();
        write_line(&file, "first line");

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "[Device] first line\n");
    }

    #[test]
    fn test_deferred_truncation_keeps_writing_at_the_start() {
        let dir = TempDir::new().expect("failed to create a temporary directory");
        let path = dir.path().join("run.log");
        fs::write(&path, "stale contents from an earlier run\n").unwrap();

        let (file, handle) = File::builder(&path)
            .layout(PatternLayout::new("%v"))
            .build_deferred()
            .unwrap();
        assert!(fs::read_to_string(&path).unwrap().starts_with("stale"));

        write_line(&file, "before");
        handle.set_len(0).unwrap();
        write_line(&file, "after");

        let content = fs::read(&path).unwrap();
        assert_eq!(content, b"[Device] after\n");
    }

    #[test]
    fn test_file_reports_unwritable_paths() {
        let dir = TempDir::new().expect("failed to create a temporary directory");
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();

        assert!(File::builder(blocker.join("run.log")).build().is_err());
    }

    fn generate_random_string() -> String {
        let mut rng = rand::rng();
        let len = rng.random_range(50..=100);
        let random_string: String = std::iter::repeat(())
            .map(|()| rng.sample(Alphanumeric))
            .map(char::from)
            .take(len)
            .collect();

        random_string
    }
}
