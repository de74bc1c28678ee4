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

//! Run with `TT_METAL_LOGGER_LEVEL=debug cargo run --example initializer`.

use tt_logger::Initializer;
use tt_logger::LogType;
use tt_logger::log_critical;
use tt_logger::log_debug;
use tt_logger::log_error;
use tt_logger::log_info;
use tt_logger::log_trace;
use tt_logger::log_warning;

fn main() {
    Initializer::new()
        .file_env("TT_METAL_LOGGER_FILE")
        .level_env("TT_METAL_LOGGER_LEVEL")
        .pattern("[%Y-%m-%d %H:%M:%S.%e] [%l] [%s:%#] %v")
        .init()
        .unwrap();

    log_trace!(LogType::Always, "This is a trace message");
    log_debug!(LogType::Always, "This is a debug message");
    log_info!(LogType::Always, "This is an info message");
    log_warning!(LogType::Always, "This is a warning message");
    log_error!(LogType::Always, "This is an error message");
    log_critical!(LogType::Always, "This is a critical message");

    tt_logger::flush();
}
