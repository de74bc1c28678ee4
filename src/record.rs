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

use std::fmt;

use log::kv::Error;
use log::kv::Key;
use log::kv::Source;
use log::kv::Value;
use log::kv::VisitSource;

use crate::Level;
use crate::level::CRITICAL_KEY;

/// The key-value key carrying the category name of a record.
pub(crate) const CATEGORY_KEY: &str = "category";

/// The (module path, file, line) of a log call site.
pub type Location = (&'static str, &'static str, u32);

/// Key-values attached to every categorized record.
struct Tags {
    category: &'static str,
    critical: bool,
}

impl Source for Tags {
    fn visit<'kvs>(&'kvs self, visitor: &mut dyn VisitSource<'kvs>) -> Result<(), Error> {
        visitor.visit_pair(Key::from_str(CATEGORY_KEY), Value::from(self.category))?;
        if self.critical {
            visitor.visit_pair(Key::from_str(CRITICAL_KEY), Value::from(true))?;
        }
        Ok(())
    }
}

/// Build the backend record for a categorized log call and hand it to `f`.
///
/// The record's target is the category name, so per-target level directives apply to categories.
pub(crate) fn with_record<R>(
    level: Level,
    category: &'static str,
    args: fmt::Arguments<'_>,
    &(module_path, file, line): &'static Location,
    f: impl FnOnce(&log::Record<'_>) -> R,
) -> R {
    let tags = Tags {
        category,
        critical: level == Level::Critical,
    };
    let record = log::Record::builder()
        .args(args)
        .level(level.to_log())
        .target(category)
        .module_path_static(Some(module_path))
        .file_static(Some(file))
        .line(Some(line))
        .key_values(&tags)
        .build();
    f(&record)
}

/// The category of a record, if it was logged through this crate's macros.
pub(crate) fn category_of<'a>(record: &'a log::Record<'_>) -> Option<&'a str> {
    record
        .key_values()
        .get(Key::from_str(CATEGORY_KEY))
        .map(|_| record.target())
}
