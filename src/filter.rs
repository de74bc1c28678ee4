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

//! Severity thresholds and the category gate.
//!
//! Every log call is gated twice before its arguments are formatted:
//!
//! 1. at compile time against [`STATIC_MIN_LEVEL`](crate::STATIC_MIN_LEVEL);
//! 2. at run time against the most verbose threshold of the active [`LevelSpec`] and against
//!    the enabled [`CategoryMask`].
//!
//! The installed logger then applies the exact threshold for the record's target.

use std::fmt;
use std::str::FromStr;
use std::sync::PoisonError;
use std::sync::RwLock;
use std::sync::atomic::AtomicU8;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;

use crate::Category;
use crate::CategoryMask;
use crate::Level;
use crate::LevelFilter;
use crate::level::ParseLevelError;

/// A default threshold plus per-target overrides.
///
/// The textual form is a comma-separated list of directives. A bare level sets the default, and
/// `Name=level` sets the threshold for records whose target is `Name` or a module below it
/// (`Name::...`). Category names are record targets, so `info,Device=trace,Op=off` keeps
/// everything at `info`, opens `Device` fully and silences `Op`.
///
/// When several named directives match, the longest name wins. When the default appears more
/// than once, the last one wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelSpec {
    default: LevelFilter,
    // sorted by name length
    directives: Vec<Directive>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Directive {
    name: String,
    level: LevelFilter,
}

impl Default for LevelSpec {
    fn default() -> Self {
        LevelSpec::new(LevelFilter::Info)
    }
}

impl LevelSpec {
    /// A spec with only a default threshold.
    pub const fn new(default: LevelFilter) -> Self {
        LevelSpec {
            default,
            directives: Vec::new(),
        }
    }

    /// Set the threshold for `name`, replacing an earlier directive for the same name.
    #[must_use]
    pub fn with_directive(mut self, name: impl Into<String>, level: LevelFilter) -> Self {
        self.insert(name.into(), level);
        self
    }

    /// Set the threshold for a category.
    #[must_use]
    pub fn with_category(self, category: impl Category, level: LevelFilter) -> Self {
        self.with_directive(category.name(), level)
    }

    fn insert(&mut self, name: String, level: LevelFilter) {
        match self.directives.iter_mut().find(|d| d.name == name) {
            Some(directive) => directive.level = level,
            None => {
                self.directives.push(Directive { name, level });
                self.directives.sort_by_key(|d| d.name.len());
            }
        }
    }

    /// Parse `spec`, skipping directives that do not parse.
    ///
    /// Returns the spec together with the skipped directives, verbatim. An empty or
    /// whitespace-only `spec` yields the default spec.
    pub fn parse_lenient(spec: &str) -> (LevelSpec, Vec<String>) {
        LevelSpec::default().extend_lenient(spec)
    }

    /// Apply the directives of `spec` on top of this one, skipping those that do not parse.
    ///
    /// A bare level in `spec` replaces the default; otherwise the current default is kept.
    pub fn extend_lenient(mut self, spec: &str) -> (LevelSpec, Vec<String>) {
        let mut rejected = vec![];
        for item in spec.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            if self.apply(item).is_err() {
                rejected.push(item.to_owned());
            }
        }
        (self, rejected)
    }

    fn apply(&mut self, item: &str) -> Result<(), ParseLevelError> {
        match item.split_once('=') {
            None => {
                self.default = item.parse()?;
            }
            Some((name, level)) => {
                let name = name.trim();
                let level = level.parse()?;
                if name.is_empty() {
                    self.default = level;
                } else {
                    self.insert(name.to_owned(), level);
                }
            }
        }
        Ok(())
    }

    /// The threshold used when no directive matches.
    pub fn default_level(&self) -> LevelFilter {
        self.default
    }

    /// The threshold for records with `target`.
    pub fn level_for(&self, target: &str) -> LevelFilter {
        for directive in self.directives.iter().rev() {
            if matches_target(&directive.name, target) {
                return directive.level;
            }
        }
        self.default
    }

    /// Whether a record with `target` at `level` passes.
    pub fn enabled(&self, target: &str, level: Level) -> bool {
        self.level_for(target).allows(level)
    }

    /// The most verbose threshold over the default and every directive.
    pub fn most_verbose(&self) -> LevelFilter {
        self.directives
            .iter()
            .map(|d| d.level)
            .fold(self.default, LevelFilter::min)
    }
}

fn matches_target(name: &str, target: &str) -> bool {
    match target.strip_prefix(name) {
        Some(rest) => rest.is_empty() || rest.starts_with("::"),
        None => false,
    }
}

impl FromStr for LevelSpec {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut result = LevelSpec::default();
        for item in s.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            result.apply(item)?;
        }
        Ok(result)
    }
}

impl fmt::Display for LevelSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.default.as_str())?;
        for directive in &self.directives {
            write!(f, ",{}={}", directive.name, directive.level)?;
        }
        Ok(())
    }
}

static MOST_VERBOSE: AtomicU8 = AtomicU8::new(LevelFilter::Info as u8);
static LEVELS: RwLock<LevelSpec> = RwLock::new(LevelSpec::new(LevelFilter::Info));
static CATEGORIES: AtomicU64 = AtomicU64::new(u64::MAX);

/// Replace the active thresholds with a single threshold for every target.
pub fn set_level(level: LevelFilter) {
    set_level_spec(LevelSpec::new(level));
}

/// Replace the active thresholds.
pub fn set_level_spec(spec: LevelSpec) {
    let most_verbose = spec.most_verbose();
    *LEVELS.write().unwrap_or_else(PoisonError::into_inner) = spec;
    MOST_VERBOSE.store(most_verbose as u8, Ordering::Relaxed);
    log::set_max_level(most_verbose.to_log());
}

/// The default threshold of the active spec.
pub fn level() -> LevelFilter {
    LEVELS
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .default_level()
}

/// A copy of the active spec.
pub fn level_spec() -> LevelSpec {
    LEVELS.read().unwrap_or_else(PoisonError::into_inner).clone()
}

/// Whether any target may log at `level`.
///
/// This is the cheap global check done before formatting. It passes when at least one directive
/// would accept `level`, and also folds in the compile-time floor.
#[inline]
pub fn should_log(level: Level) -> bool {
    crate::static_enabled(level)
        && LevelFilter::from_u8(MOST_VERBOSE.load(Ordering::Relaxed)).allows(level)
}

pub(crate) fn target_enabled(target: &str, level: Level) -> bool {
    LEVELS
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .enabled(target, level)
}

/// Replace the set of enabled categories.
pub fn set_enabled_types(mask: CategoryMask) {
    CATEGORIES.store(mask.bits(), Ordering::Relaxed);
}

/// The set of enabled categories.
pub fn enabled_types() -> CategoryMask {
    CategoryMask::from_bits(CATEGORIES.load(Ordering::Relaxed))
}

/// Enable one category.
pub fn enable_type(category: impl Category) {
    if let Some(bit) = bit(category.index()) {
        CATEGORIES.fetch_or(bit, Ordering::Relaxed);
    }
}

/// Disable one category.
pub fn disable_type(category: impl Category) {
    if let Some(bit) = bit(category.index()) {
        CATEGORIES.fetch_and(!bit, Ordering::Relaxed);
    }
}

/// Whether a category is enabled.
#[inline]
pub fn is_type_enabled(category: impl Category) -> bool {
    enabled_types().contains(category.index())
}

fn bit(index: usize) -> Option<u64> {
    (index < crate::category::MAX_CATEGORIES).then(|| 1 << index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LogType;

    #[test]
    fn test_empty_spec_is_info() {
        let spec: LevelSpec = "".parse().unwrap();
        assert_eq!(spec, LevelSpec::default());
        assert_eq!(spec.default_level(), LevelFilter::Info);
    }

    #[test]
    fn test_bare_level() {
        let spec: LevelSpec = "debug".parse().unwrap();
        assert_eq!(spec.default_level(), LevelFilter::Debug);
        assert!(spec.enabled("Device", Level::Debug));
        assert!(!spec.enabled("Device", Level::Trace));
    }

    #[test]
    fn test_per_category_directives() {
        let spec: LevelSpec = "warning, Device=trace, Op=off".parse().unwrap();
        assert_eq!(spec.level_for("Device"), LevelFilter::Trace);
        assert_eq!(spec.level_for("Op"), LevelFilter::Off);
        assert_eq!(spec.level_for("Metal"), LevelFilter::Warning);
        assert!(!spec.enabled("Op", Level::Critical));
        assert_eq!(spec.most_verbose(), LevelFilter::Trace);
    }

    #[test]
    fn test_directive_names_match_whole_segments() {
        let spec = LevelSpec::new(LevelFilter::Error)
            .with_category(LogType::Metal, LevelFilter::Debug)
            .with_directive("my_crate", LevelFilter::Trace)
            .with_directive("my_crate::noisy", LevelFilter::Off);
        assert_eq!(spec.level_for("Metal"), LevelFilter::Debug);
        assert_eq!(spec.level_for("MetalTrace"), LevelFilter::Error);
        assert_eq!(spec.level_for("my_crate::io"), LevelFilter::Trace);
        assert_eq!(spec.level_for("my_crate::noisy::deep"), LevelFilter::Off);
        assert_eq!(spec.level_for("my_crate_other"), LevelFilter::Error);
    }

    #[test]
    fn test_later_directives_replace_earlier() {
        let spec: LevelSpec = "info,Device=trace,debug,Device=error".parse().unwrap();
        assert_eq!(spec.default_level(), LevelFilter::Debug);
        assert_eq!(spec.level_for("Device"), LevelFilter::Error);
        assert_eq!(spec.to_string(), "debug,Device=error");
    }

    #[test]
    fn test_strict_parse_rejects_bad_levels() {
        assert!("loud".parse::<LevelSpec>().is_err());
        assert!("info,Device=loud".parse::<LevelSpec>().is_err());
    }

    #[test]
    fn test_lenient_parse_reports_rejected() {
        let (spec, rejected) = LevelSpec::parse_lenient("loud, Device=debug, Op=???");
        assert_eq!(spec.default_level(), LevelFilter::Info);
        assert_eq!(spec.level_for("Device"), LevelFilter::Debug);
        assert_eq!(rejected, vec!["loud".to_owned(), "Op=???".to_owned()]);

        let (spec, rejected) = LevelSpec::new(LevelFilter::Error).extend_lenient("Op=trace");
        assert_eq!(spec.default_level(), LevelFilter::Error);
        assert_eq!(spec.level_for("Op"), LevelFilter::Trace);
        assert!(rejected.is_empty());
    }

    #[test]
    fn test_critical_threshold() {
        let spec: LevelSpec = "critical".parse().unwrap();
        assert!(spec.enabled("Device", Level::Critical));
        assert!(!spec.enabled("Device", Level::Error));
    }
}
