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

//! tt-logger is a thin categorized logging layer over the [`log`] facade.
//!
//! # Overview
//!
//! Every message carries a severity [`Level`], from `trace` to `critical`, and a [`Category`]
//! such as [`LogType::Device`], printed as `[Device]` in front of the message. Three
//! environment variables, read once by the [`Initializer`], choose the sink, the severity
//! thresholds and the enabled categories:
//!
//! | variable | meaning | default |
//! |----------|---------|---------|
//! | `TT_LOGGER_FILE` | log to this file instead of stdout | stdout |
//! | `TT_LOGGER_LEVEL` | thresholds, e.g. `debug` or `info,Device=trace` | `info` |
//! | `TT_LOGGER_TYPES` | enabled categories, e.g. `Device,Op` or `All` | all |
//!
//! Levels below the compile-time floor, selected with the `active-level-*` and
//! `release-active-level-*` cargo features, are compiled out entirely.
//!
//! # Examples
//!
//! ```
//! use tt_logger::LogType;
//! use tt_logger::log_info;
//! use tt_logger::log_warning;
//!
//! tt_logger::init().unwrap();
//!
//! log_info!(LogType::Device, "Device {} message", 123);
//! log_warning!("logged under the Always category");
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

#[macro_use]
mod macros;

pub mod append;
pub mod category;
pub mod layout;

mod error;
mod filter;
mod init;
mod level;
mod logger;
mod record;

pub use self::append::Append;
pub use self::category::Category;
pub use self::category::CategoryMask;
pub use self::category::LogType;
pub use self::error::InitError;
pub use self::filter::LevelSpec;
pub use self::filter::disable_type;
pub use self::filter::enable_type;
pub use self::filter::enabled_types;
pub use self::filter::is_type_enabled;
pub use self::filter::level;
pub use self::filter::level_spec;
pub use self::filter::set_enabled_types;
pub use self::filter::set_level;
pub use self::filter::set_level_spec;
pub use self::filter::should_log;
pub use self::init::Config;
pub use self::init::DEFAULT_FILE_ENV;
pub use self::init::DEFAULT_LEVEL_ENV;
pub use self::init::DEFAULT_TYPES_ENV;
pub use self::init::Initializer;
pub use self::init::flush;
pub use self::init::init;
pub use self::layout::Layout;
pub use self::level::Level;
pub use self::level::LevelFilter;
pub use self::level::ParseLevelError;
pub use self::logger::Logger;
pub use self::record::Location;

/// The compile-time severity floor.
///
/// Log calls below this level are removed by the compiler. It is `trace` unless one of the
/// `active-level-*` features is enabled, or, in builds without debug assertions, one of the
/// `release-active-level-*` features.
pub const STATIC_MIN_LEVEL: LevelFilter = if cfg!(debug_assertions) {
    DEBUG_MIN_LEVEL
} else {
    RELEASE_MIN_LEVEL
};

const DEBUG_MIN_LEVEL: LevelFilter = select_floor(
    [
        cfg!(feature = "active-level-off"),
        cfg!(feature = "active-level-critical"),
        cfg!(feature = "active-level-error"),
        cfg!(feature = "active-level-warning"),
        cfg!(feature = "active-level-info"),
        cfg!(feature = "active-level-debug"),
    ],
    LevelFilter::Trace,
);

const RELEASE_MIN_LEVEL: LevelFilter = select_floor(
    [
        cfg!(feature = "release-active-level-off"),
        cfg!(feature = "release-active-level-critical"),
        cfg!(feature = "release-active-level-error"),
        cfg!(feature = "release-active-level-warning"),
        cfg!(feature = "release-active-level-info"),
        cfg!(feature = "release-active-level-debug"),
    ],
    DEBUG_MIN_LEVEL,
);

/// Pick the strictest enabled floor. `enabled` is ordered `off, critical, error, warning, info,
/// debug`; when none is set the result is `fallback`.
const fn select_floor(enabled: [bool; 6], fallback: LevelFilter) -> LevelFilter {
    const FLOORS: [LevelFilter; 6] = [
        LevelFilter::Off,
        LevelFilter::Critical,
        LevelFilter::Error,
        LevelFilter::Warning,
        LevelFilter::Info,
        LevelFilter::Debug,
    ];

    let mut i = 0;
    while i < FLOORS.len() {
        if enabled[i] {
            return FLOORS[i];
        }
        i += 1;
    }
    fallback
}

/// Whether `level` survives the compile-time floor.
#[inline(always)]
pub const fn static_enabled(level: Level) -> bool {
    STATIC_MIN_LEVEL.allows(level)
}

// Not public API. Used by the logging macros.
#[doc(hidden)]
pub mod __private {
    use std::fmt;

    use crate::Category;
    use crate::Level;
    use crate::record::Location;

    #[inline]
    pub fn enabled(level: Level, category: impl Category) -> bool {
        crate::filter::should_log(level) && crate::filter::is_type_enabled(category)
    }

    pub fn log(
        level: Level,
        category: impl Category,
        args: fmt::Arguments<'_>,
        location: &'static Location,
    ) {
        crate::record::with_record(level, category.name(), args, location, |record| {
            log::logger().log(record)
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strictest_floor_wins() {
        let none = [false; 6];
        assert_eq!(select_floor(none, LevelFilter::Trace), LevelFilter::Trace);
        assert_eq!(select_floor(none, LevelFilter::Info), LevelFilter::Info);

        let error_and_info = [false, false, true, false, true, false];
        assert_eq!(
            select_floor(error_and_info, LevelFilter::Trace),
            LevelFilter::Error
        );

        let off = [true, false, false, false, false, true];
        assert_eq!(select_floor(off, LevelFilter::Trace), LevelFilter::Off);
        assert_eq!(
            select_floor([false, false, false, false, false, true], LevelFilter::Warning),
            LevelFilter::Debug
        );
    }

    #[cfg(not(any(
        feature = "active-level-off",
        feature = "active-level-critical",
        feature = "active-level-error",
        feature = "active-level-warning",
        feature = "active-level-info",
        feature = "active-level-debug",
        feature = "release-active-level-off",
        feature = "release-active-level-critical",
        feature = "release-active-level-error",
        feature = "release-active-level-warning",
        feature = "release-active-level-info",
        feature = "release-active-level-debug",
    )))]
    #[test]
    fn test_no_features_keep_every_level() {
        assert_eq!(STATIC_MIN_LEVEL, LevelFilter::Trace);
        for level in Level::ALL {
            assert!(static_enabled(level));
        }
    }

    #[cfg(feature = "active-level-warning")]
    #[cfg(debug_assertions)]
    #[test]
    fn test_active_level_feature_sets_the_floor() {
        assert!(STATIC_MIN_LEVEL >= LevelFilter::Warning);
        assert!(!static_enabled(Level::Info));
    }
}
