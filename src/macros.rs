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

/// Log a message at `level` under `category`.
///
/// The call is compiled out when `level` is below [`STATIC_MIN_LEVEL`](crate::STATIC_MIN_LEVEL),
/// and the arguments are not evaluated when the level or the category is disabled at run time.
///
/// ```
/// use tt_logger::Level;
/// use tt_logger::LogType;
///
/// tt_logger::log_at!(Level::Info, LogType::Device, "opened device {}", 0);
/// ```
#[macro_export]
macro_rules! log_at {
    ($level:expr, $category:expr, $($arg:tt)+) => {{
        let level: $crate::Level = $level;
        if $crate::static_enabled(level) {
            let category = $category;
            if $crate::__private::enabled(level, category) {
                $crate::__private::log(
                    level,
                    category,
                    ::core::format_args!($($arg)+),
                    &(::core::module_path!(), ::core::file!(), ::core::line!()),
                );
            }
        }
    }};
}

/// Log a message at the trace level.
///
/// ```
/// use tt_logger::LogType;
///
/// tt_logger::log_trace!(LogType::Dispatch, "queue depth {}", 3);
/// tt_logger::log_trace!("without a category");
/// ```
#[macro_export]
macro_rules! log_trace {
    ($fmt:literal $($arg:tt)*) => {
        $crate::log_at!($crate::Level::Trace, $crate::LogType::Always, $fmt $($arg)*)
    };
    ($category:expr, $($arg:tt)+) => {
        $crate::log_at!($crate::Level::Trace, $category, $($arg)+)
    };
}

/// Log a message at the debug level.
#[macro_export]
macro_rules! log_debug {
    ($fmt:literal $($arg:tt)*) => {
        $crate::log_at!($crate::Level::Debug, $crate::LogType::Always, $fmt $($arg)*)
    };
    ($category:expr, $($arg:tt)+) => {
        $crate::log_at!($crate::Level::Debug, $category, $($arg)+)
    };
}

/// Log a message at the info level.
///
/// ```
/// use tt_logger::LogType;
///
/// let devices = 4;
/// tt_logger::log_info!(LogType::Device, "found {devices} devices");
/// tt_logger::log_info!("logged under Always");
/// ```
#[macro_export]
macro_rules! log_info {
    ($fmt:literal $($arg:tt)*) => {
        $crate::log_at!($crate::Level::Info, $crate::LogType::Always, $fmt $($arg)*)
    };
    ($category:expr, $($arg:tt)+) => {
        $crate::log_at!($crate::Level::Info, $category, $($arg)+)
    };
}

/// Log a message at the warning level.
#[macro_export]
macro_rules! log_warning {
    ($fmt:literal $($arg:tt)*) => {
        $crate::log_at!($crate::Level::Warning, $crate::LogType::Always, $fmt $($arg)*)
    };
    ($category:expr, $($arg:tt)+) => {
        $crate::log_at!($crate::Level::Warning, $category, $($arg)+)
    };
}

/// Log a message at the error level.
#[macro_export]
macro_rules! log_error {
    ($fmt:literal $($arg:tt)*) => {
        $crate::log_at!($crate::Level::Error, $crate::LogType::Always, $fmt $($arg)*)
    };
    ($category:expr, $($arg:tt)+) => {
        $crate::log_at!($crate::Level::Error, $category, $($arg)+)
    };
}

/// Log a message at the critical level.
#[macro_export]
macro_rules! log_critical {
    ($fmt:literal $($arg:tt)*) => {
        $crate::log_at!($crate::Level::Critical, $crate::LogType::Always, $fmt $($arg)*)
    };
    ($category:expr, $($arg:tt)+) => {
        $crate::log_at!($crate::Level::Critical, $category, $($arg)+)
    };
}

/// Log a message at the critical level. Same as [`log_critical!`].
///
/// This does not abort the process.
#[macro_export]
macro_rules! log_fatal {
    ($($arg:tt)+) => {
        $crate::log_critical!($($arg)+)
    };
}
