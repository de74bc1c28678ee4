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

//! Severity levels.

use std::fmt;
use std::str::FromStr;

use log::kv::Key;

/// The key-value key marking a record logged at [`Level::Critical`].
pub(crate) const CRITICAL_KEY: &str = "critical";

/// A severity level.
///
/// Levels are ordered by increasing importance, so `Level::Trace < Level::Critical`.
///
/// This is the reverse of the `log` crate's ordering, where more verbose levels compare greater.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    /// Very low priority, often extremely verbose, information.
    Trace = 0,
    /// Lower priority information.
    Debug = 1,
    /// Useful information.
    Info = 2,
    /// Hazardous situations.
    Warning = 3,
    /// Very serious errors.
    Error = 4,
    /// Errors the program cannot continue from.
    Critical = 5,
}

impl Level {
    /// All levels, from the least to the most important.
    pub const ALL: [Level; 6] = [
        Level::Trace,
        Level::Debug,
        Level::Info,
        Level::Warning,
        Level::Error,
        Level::Critical,
    ];

    /// Return the lowercase name of the level.
    ///
    /// This returns the same string as the `fmt::Display` implementation.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Level::Trace => "trace",
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warning => "warning",
            Level::Error => "error",
            Level::Critical => "critical",
        }
    }

    /// Return the single-letter name of the level.
    pub const fn short_name(&self) -> &'static str {
        match self {
            Level::Trace => "T",
            Level::Debug => "D",
            Level::Info => "I",
            Level::Warning => "W",
            Level::Error => "E",
            Level::Critical => "C",
        }
    }

    /// Map into the `log` crate's level.
    ///
    /// `Critical` has no counterpart and maps to `log::Level::Error`; the distinction travels
    /// as a key-value on the record. See [`Level::of`].
    pub const fn to_log(self) -> log::Level {
        match self {
            Level::Trace => log::Level::Trace,
            Level::Debug => log::Level::Debug,
            Level::Info => log::Level::Info,
            Level::Warning => log::Level::Warn,
            Level::Error | Level::Critical => log::Level::Error,
        }
    }

    /// Recover the level of a backend record.
    pub fn of(record: &log::Record) -> Level {
        let level = Level::from(record.level());
        if level == Level::Error && is_critical(record) {
            Level::Critical
        } else {
            level
        }
    }
}

fn is_critical(record: &log::Record) -> bool {
    record
        .key_values()
        .get(Key::from_str(CRITICAL_KEY))
        .and_then(|value| value.to_bool())
        .unwrap_or(false)
}

impl From<log::Level> for Level {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => Level::Error,
            log::Level::Warn => Level::Warning,
            log::Level::Info => Level::Info,
            log::Level::Debug => Level::Debug,
            log::Level::Trace => Level::Trace,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match LevelFilter::from_str(s)? {
            LevelFilter::Off => Err(ParseLevelError(s.to_owned())),
            filter => Ok(Level::ALL[filter as usize]),
        }
    }
}

/// A severity threshold.
///
/// A record passes when its level is at or above the threshold. `Off` is above every level and
/// rejects all records.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LevelFilter {
    /// Allow every level.
    Trace = 0,
    /// Allow `Debug` and above.
    Debug = 1,
    /// Allow `Info` and above.
    Info = 2,
    /// Allow `Warning` and above.
    Warning = 3,
    /// Allow `Error` and above.
    Error = 4,
    /// Allow only `Critical`.
    Critical = 5,
    /// Allow nothing.
    Off = 6,
}

impl LevelFilter {
    /// Return the lowercase name of the filter.
    pub const fn as_str(&self) -> &'static str {
        match self {
            LevelFilter::Trace => "trace",
            LevelFilter::Debug => "debug",
            LevelFilter::Info => "info",
            LevelFilter::Warning => "warning",
            LevelFilter::Error => "error",
            LevelFilter::Critical => "critical",
            LevelFilter::Off => "off",
        }
    }

    /// Whether a record at `level` passes this threshold.
    #[inline]
    pub const fn allows(self, level: Level) -> bool {
        level as u8 >= self as u8
    }

    pub(crate) const fn from_u8(value: u8) -> LevelFilter {
        match value {
            0 => LevelFilter::Trace,
            1 => LevelFilter::Debug,
            2 => LevelFilter::Info,
            3 => LevelFilter::Warning,
            4 => LevelFilter::Error,
            5 => LevelFilter::Critical,
            _ => LevelFilter::Off,
        }
    }

    /// Map into the `log` crate's filter, used for `log::set_max_level`.
    pub const fn to_log(self) -> log::LevelFilter {
        match self {
            LevelFilter::Trace => log::LevelFilter::Trace,
            LevelFilter::Debug => log::LevelFilter::Debug,
            LevelFilter::Info => log::LevelFilter::Info,
            LevelFilter::Warning => log::LevelFilter::Warn,
            LevelFilter::Error | LevelFilter::Critical => log::LevelFilter::Error,
            LevelFilter::Off => log::LevelFilter::Off,
        }
    }
}

impl From<Level> for LevelFilter {
    fn from(level: Level) -> Self {
        LevelFilter::from_u8(level as u8)
    }
}

impl fmt::Display for LevelFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for LevelFilter {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let filter = match s.trim().to_ascii_lowercase().as_str() {
            "trace" => LevelFilter::Trace,
            "debug" => LevelFilter::Debug,
            "info" => LevelFilter::Info,
            "warn" | "warning" => LevelFilter::Warning,
            "err" | "error" => LevelFilter::Error,
            "crit" | "critical" | "fatal" => LevelFilter::Critical,
            "off" => LevelFilter::Off,
            _ => return Err(ParseLevelError(s.to_owned())),
        };
        Ok(filter)
    }
}

/// The error returned when a string is not a level name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown log level `{0}`")]
pub struct ParseLevelError(String);
