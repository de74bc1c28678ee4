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

use std::io::Write;

use log::Metadata;
use log::Record;

use crate::Level;
use crate::LevelFilter;
use crate::append::Append;
use crate::filter;

/// A logger facade that writes every accepted record to one sink.
///
/// This struct implements [`log::Log`], so records from plain `log` macros in other crates are
/// written too, under their module path and the default threshold.
#[derive(Debug)]
pub struct Logger {
    append: Box<dyn Append>,
    flush_on: LevelFilter,
}

impl Logger {
    /// Create a logger writing to `append`, flushing after records at `error` and above.
    pub fn new(append: impl Into<Box<dyn Append>>) -> Self {
        Self {
            append: append.into(),
            flush_on: LevelFilter::Error,
        }
    }

    /// Flush the sink after every record at or above `level`.
    pub fn flush_on(mut self, level: LevelFilter) -> Self {
        self.flush_on = level;
        self
    }

    /// Set up the global logger with this [`Logger`] instance.
    ///
    /// # Errors
    ///
    /// An error is returned if the global logger has already been set.
    pub fn apply(self) -> Result<(), log::SetLoggerError> {
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(filter::level_spec().most_verbose().to_log());
        Ok(())
    }
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        filter::target_enabled(metadata.target(), metadata.level().into())
    }

    fn log(&self, record: &Record) {
        let level = Level::of(record);
        if !filter::target_enabled(record.target(), level) {
            return;
        }

        if let Err(err) = self.append.append(record) {
            handle_error(record, err);
        }
        if self.flush_on.allows(level) {
            self.append.flush();
        }
    }

    fn flush(&self) {
        self.append.flush();
    }
}

fn handle_error(record: &Record, error: anyhow::Error) {
    let Err(fallback_error) = write!(
        std::io::stderr(),
        r###"
Error perform logging.
    Attempted to log: {args}
    Record: {record:?}
    Error: {error}
"###,
        args = record.args(),
        record = record,
        error = error,
    ) else {
        return;
    };

    panic!(
        r###"
Error performing stderr logging after error occurred during regular logging.
    Attempted to log: {args}
    Record: {record:?}
    Error: {error}
    Fallback error: {fallback_error}
"###,
        args = record.args(),
        record = record,
        error = error,
        fallback_error = fallback_error,
    );
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::AtomicUsize;
    use std::sync::atomic::Ordering;

    use log::Log;

    use super::*;
    use crate::record::Location;
    use crate::record::with_record;

    static LOCATION: Location = ("tt_logger::logger", "src/logger.rs", 1);

    #[derive(Debug, Default, Clone)]
    struct Counting {
        appended: Arc<AtomicUsize>,
        flushed: Arc<AtomicUsize>,
    }

    impl Append for Counting {
        fn append(&self, _: &Record) -> anyhow::Result<()> {
            self.appended.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn flush(&self) {
            self.flushed.fetch_add(1, Ordering::SeqCst);
        }
    }

    // Relies on the process-wide default threshold, `info`, which no unit test changes.
    #[test]
    fn test_flushes_at_flush_level() {
        let counting = Counting::default();
        let logger = Logger::new(counting.clone()).flush_on(LevelFilter::Warning);

        for level in [Level::Info, Level::Warning, Level::Critical, Level::Debug] {
            with_record(level, "Device", format_args!("m"), &LOCATION, |r| logger.log(r));
        }

        assert_eq!(counting.appended.load(Ordering::SeqCst), 3);
        assert_eq!(counting.flushed.load(Ordering::SeqCst), 2);

        logger.flush();
        assert_eq!(counting.flushed.load(Ordering::SeqCst), 3);
    }
}
