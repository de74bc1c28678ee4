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

//! Environment-driven setup of the global logger.

use std::borrow::Cow;
use std::path::Path;
use std::path::PathBuf;

use crate::Category;
use crate::CategoryMask;
use crate::InitError;
use crate::LevelFilter;
use crate::LevelSpec;
use crate::LogType;
use crate::append::Append;
use crate::append::Console;
use crate::append::File;
use crate::filter;
use crate::layout::Layout;
use crate::layout::PatternLayout;
use crate::logger::Logger;

/// The default environment variable naming the log file.
pub const DEFAULT_FILE_ENV: &str = "TT_LOGGER_FILE";

/// The default environment variable holding the level spec.
pub const DEFAULT_LEVEL_ENV: &str = "TT_LOGGER_LEVEL";

/// The default environment variable holding the category filter.
pub const DEFAULT_TYPES_ENV: &str = "TT_LOGGER_TYPES";

/// Set up the global logger from the default environment variables.
///
/// Equivalent to `Initializer::new().init()`.
///
/// # Errors
///
/// See [`Initializer::init`].
pub fn init() -> Result<(), InitError> {
    Initializer::new().init()
}

/// Flush the global logger.
pub fn flush() {
    log::logger().flush();
}

/// The settings read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// The log file; `None` logs to the console.
    pub file: Option<PathBuf>,
    /// The severity thresholds.
    pub levels: LevelSpec,
    /// Level directives that could not be parsed and were skipped.
    pub rejected: Vec<String>,
    /// The enabled categories.
    pub categories: CategoryMask,
}

/// A builder that reads the environment and installs the global logger.
///
/// Three variables are consulted, each of which may be renamed:
///
/// * the file variable, default `TT_LOGGER_FILE`. When set and non-empty, records go to that
///   file, truncated first. Otherwise they go to stdout, colored when it is a terminal.
/// * the level variable, default `TT_LOGGER_LEVEL`, parsed as a [`LevelSpec`] such as `debug` or
///   `info,Device=trace`. Unset means the default level, `info`.
/// * the types variable, default `TT_LOGGER_TYPES`, parsed by [`CategoryMask::from_spec`]. Unset
///   means every category.
///
/// # Examples
///
/// ```no_run
/// use tt_logger::Initializer;
/// use tt_logger::LevelFilter;
///
/// Initializer::new()
///     .file_env("TT_METAL_LOGGER_FILE")
///     .level_env("TT_METAL_LOGGER_LEVEL")
///     .pattern("[%Y-%m-%d %H:%M:%S.%e] [%l] [%s:%#] %v")
///     .default_level(LevelFilter::Warning)
///     .init()
///     .unwrap();
/// ```
#[must_use = "call `init` to set the global logger"]
#[derive(Debug)]
pub struct Initializer {
    file_env: Cow<'static, str>,
    level_env: Cow<'static, str>,
    types_env: Cow<'static, str>,
    categories: &'static [&'static str],
    layout: Option<Box<dyn Layout>>,
    sink: Option<Box<dyn Append>>,
    flush_on: LevelFilter,
    default_level: LevelFilter,
}

impl Default for Initializer {
    fn default() -> Self {
        Self::new()
    }
}

impl Initializer {
    /// Create an initializer with the default variable names and the [`LogType`] categories.
    pub fn new() -> Self {
        Self {
            file_env: Cow::Borrowed(DEFAULT_FILE_ENV),
            level_env: Cow::Borrowed(DEFAULT_LEVEL_ENV),
            types_env: Cow::Borrowed(DEFAULT_TYPES_ENV),
            categories: LogType::NAMES,
            layout: None,
            sink: None,
            flush_on: LevelFilter::Error,
            default_level: LevelFilter::Info,
        }
    }

    /// Read the log file path from `name`.
    pub fn file_env(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.file_env = name.into();
        self
    }

    /// Read the level spec from `name`.
    pub fn level_env(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.level_env = name.into();
        self
    }

    /// Read the category filter from `name`.
    pub fn types_env(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.types_env = name.into();
        self
    }

    /// Resolve category filters against the table `C` instead of [`LogType`].
    pub fn categories<C: Category>(mut self) -> Self {
        self.categories = C::NAMES;
        self
    }

    /// Format records with an spdlog-style pattern. See [`PatternLayout`].
    ///
    /// An empty pattern keeps the default one.
    pub fn pattern(self, pattern: &str) -> Self {
        if pattern.is_empty() {
            self
        } else {
            self.layout(PatternLayout::new(pattern))
        }
    }

    /// Format records with `layout`.
    pub fn layout(mut self, layout: impl Into<Box<dyn Layout>>) -> Self {
        self.layout = Some(layout.into());
        self
    }

    /// Write to `sink` instead of choosing between the console and a file.
    ///
    /// The sink keeps its own layout; [`Initializer::pattern`] does not apply to it.
    pub fn sink(mut self, sink: impl Into<Box<dyn Append>>) -> Self {
        self.sink = Some(sink.into());
        self
    }

    /// Flush the sink after every record at or above `level`. Default to `error`.
    pub fn flush_on(mut self, level: LevelFilter) -> Self {
        self.flush_on = level;
        self
    }

    /// The threshold used when the level variable is unset or sets no default. Default to `info`.
    pub fn default_level(mut self, level: LevelFilter) -> Self {
        self.default_level = level;
        self
    }

    /// Read the settings from the process environment.
    pub fn config(&self) -> Config {
        self.config_from(|name| std::env::var(name).ok())
    }

    /// Read the settings through `lookup`, which maps a variable name to its value.
    pub fn config_from(&self, lookup: impl Fn(&str) -> Option<String>) -> Config {
        let file = lookup(&self.file_env)
            .filter(|path| !path.is_empty())
            .map(PathBuf::from);

        let (levels, rejected) = match lookup(&self.level_env) {
            Some(spec) => LevelSpec::new(self.default_level).extend_lenient(&spec),
            None => (LevelSpec::new(self.default_level), vec![]),
        };

        let categories = match lookup(&self.types_env) {
            Some(value) => CategoryMask::from_spec(self.categories, &value),
            None => CategoryMask::all(),
        };

        Config {
            file,
            levels,
            rejected,
            categories,
        }
    }

    /// Read the environment and set up the global logger.
    ///
    /// # Errors
    ///
    /// Fails if the log file cannot be created, or if a global logger is already set.
    pub fn init(self) -> Result<(), InitError> {
        let config = self.config();
        self.init_with(config)
    }

    /// Set up the global logger with `config`.
    ///
    /// The thresholds and the category mask are published after the logger is installed, and
    /// every rejected level directive is reported as a warning.
    ///
    /// # Errors
    ///
    /// Fails if the log file cannot be created, or if a global logger is already set.
    pub fn init_with(self, config: Config) -> Result<(), InitError> {
        let Initializer {
            layout,
            sink,
            flush_on,
            level_env,
            ..
        } = self;

        // The file is truncated only once our logger is in place, so a failed second
        // initialization leaves the running logger's file alone.
        let mut truncate = None;
        let sink = match (sink, &config.file) {
            (Some(sink), _) => sink,
            (None, Some(path)) => {
                let mut builder = File::builder(path);
                if let Some(layout) = layout {
                    builder = builder.layout(layout);
                }
                let (file, handle) = builder
                    .build_deferred()
                    .map_err(|source| open_file_error(path, source))?;
                truncate = Some((path, handle));
                Box::new(file)
            }
            (None, None) => {
                let mut console = Console::stdout();
                if let Some(layout) = layout {
                    console = console.with_layout(layout);
                }
                Box::new(console)
            }
        };

        Logger::new(sink).flush_on(flush_on).apply()?;
        if let Some((path, handle)) = truncate {
            handle
                .set_len(0)
                .map_err(|source| open_file_error(path, source))?;
        }
        filter::set_level_spec(config.levels);
        filter::set_enabled_types(config.categories);

        for directive in &config.rejected {
            crate::log_warning!(
                "ignoring invalid level directive `{directive}` in {level_env}, expected one of \
                 trace, debug, info, warning, error, critical, off"
            );
        }
        Ok(())
    }
}

fn open_file_error(path: &Path, source: std::io::Error) -> InitError {
    InitError::OpenFile {
        path: path.to_path_buf(),
        source,
    }
}
