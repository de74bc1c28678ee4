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

use std::cell::Cell;
use std::path::Path;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::OnceLock;

use tt_logger::Category;
use tt_logger::CategoryMask;
use tt_logger::Initializer;
use tt_logger::Level;
use tt_logger::LevelFilter;
use tt_logger::LevelSpec;
use tt_logger::LogType;
use tt_logger::append::Capture;
use tt_logger::layout::PatternLayout;
use tt_logger::log_at;
use tt_logger::log_critical;
use tt_logger::log_debug;
use tt_logger::log_error;
use tt_logger::log_fatal;
use tt_logger::log_info;
use tt_logger::log_trace;
use tt_logger::log_warning;

tt_logger::log_types! {
    enum ModelLog {
        Always,
        Model,
    }
}

// The global logger is installed once per test binary; tests take turns on it.
fn setup() -> (MutexGuard<'static, ()>, &'static Capture) {
    static LOCK: Mutex<()> = Mutex::new(());
    static CAPTURE: OnceLock<Capture> = OnceLock::new();

    let guard = LOCK.lock().unwrap_or_else(|err| err.into_inner());
    let capture = CAPTURE.get_or_init(|| {
        let capture = Capture::default().with_layout(PatternLayout::new("[%l] %v"));
        let config = Initializer::new().config_from(|_| None);
        Initializer::new()
            .sink(capture.clone())
            .init_with(config)
            .unwrap();
        capture
    });

    tt_logger::set_level(LevelFilter::Info);
    tt_logger::set_enabled_types(CategoryMask::all());
    capture.clear();
    (guard, capture)
}

fn assert_logged(capture: &Capture, expected: &str) {
    let output = capture.contents();
    assert!(
        output.contains(expected),
        "Expected log to contain: '{expected}'\nActual log output:\n{output}"
    );
    capture.clear();
}

#[test]
fn test_basic_logging() {
    let (_guard, capture) = setup();

    log_info!(LogType::Device, "Device message");
    assert_logged(capture, "[info] [Device] Device message");

    tt_logger::set_level(LevelFilter::Debug);
    log_debug!(ModelLog::Model, "Model debug message");
    assert_logged(capture, "[debug] [Model] Model debug message");

    log_warning!(LogType::LLRuntime, "Runtime warning");
    assert_logged(capture, "[warning] [LLRuntime] Runtime warning");

    log_error!(LogType::Device, "Device error");
    assert_logged(capture, "[error] [Device] Device error");

    log_critical!(ModelLog::Model, "Model critical error");
    assert_logged(capture, "[critical] [Model] Model critical error");

    log_fatal!(LogType::Op, "Op fatal error");
    assert_logged(capture, "[critical] [Op] Op fatal error");
}

#[test]
fn test_format_arguments() {
    let (_guard, capture) = setup();

    log_info!(LogType::Device, "Device {} message", 123);
    assert_logged(capture, "[Device] Device 123 message");

    log_info!(ModelLog::Model, "Model {} with {} parameters", "test", 42);
    assert_logged(capture, "[Model] Model test with 42 parameters");

    let path = Path::new("/usr/bin/hello");
    log_info!(ModelLog::Model, "Path: {}", path.display());
    assert_logged(capture, "[Model] Path: /usr/bin/hello");

    let count = 7;
    log_info!(LogType::Op, "inline {count} args",);
    assert_logged(capture, "[Op] inline 7 args");
}

#[test]
fn test_level_filtering() {
    let (_guard, capture) = setup();

    tt_logger::set_level(LevelFilter::Debug);
    log_trace!(LogType::Device, "Should not appear");
    log_debug!(LogType::Device, "Should appear");
    let output = capture.contents();
    assert!(!output.contains("Should not appear"), "{output}");
    assert!(output.contains("Should appear"), "{output}");
    capture.clear();

    tt_logger::set_level(LevelFilter::Info);
    log_debug!(LogType::Device, "Should not appear");
    log_info!(LogType::Device, "Should appear");
    let output = capture.contents();
    assert!(!output.contains("Should not appear"), "{output}");
    assert!(output.contains("Should appear"), "{output}");
}

#[test]
fn test_critical_threshold_drops_errors() {
    let (_guard, capture) = setup();

    tt_logger::set_level(LevelFilter::Critical);
    assert!(!tt_logger::should_log(Level::Error));
    assert!(tt_logger::should_log(Level::Critical));

    log_error!(LogType::Device, "plain error");
    log_critical!(LogType::Device, "critical error");
    assert_eq!(capture.lines(), vec!["[critical] [Device] critical error"]);

    tt_logger::set_level(LevelFilter::Off);
    log_critical!(LogType::Device, "silenced");
    assert_eq!(capture.lines().len(), 1);
}

#[test]
fn test_default_category_is_always() {
    let (_guard, capture) = setup();

    log_info!("Default type message");
    assert_logged(capture, "[Always] Default type message");

    log_error!("code {}", 3);
    assert_logged(capture, "[error] [Always] code 3");
}

struct Panics;

impl std::fmt::Display for Panics {
    fn fmt(&self, _: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        panic!("a disabled log call must not be formatted");
    }
}

#[test]
fn test_disabled_levels_skip_formatting() {
    let (_guard, capture) = setup();

    tt_logger::set_level(LevelFilter::Warning);
    let evaluated = Cell::new(false);
    let touch = || {
        evaluated.set(true);
        1
    };
    log_debug!(LogType::Device, "{} {}", Panics, touch());
    log_info!("{}", Panics);
    assert!(!evaluated.get());
    assert!(capture.lines().is_empty());

    log_warning!(LogType::Device, "{}", touch());
    assert!(evaluated.get());
    assert_eq!(capture.lines(), vec!["[warning] [Device] 1"]);
}

#[test]
fn test_disabled_categories_skip_formatting() {
    let (_guard, capture) = setup();

    tt_logger::set_enabled_types(CategoryMask::from_spec(LogType::NAMES, "Device"));
    assert!(!tt_logger::is_type_enabled(LogType::Op));

    log_info!(LogType::Op, "{}", Panics);
    log_info!(LogType::Device, "kept");
    log_info!("always kept");
    assert_eq!(
        capture.lines(),
        vec!["[info] [Device] kept", "[info] [Always] always kept"]
    );

    tt_logger::enable_type(LogType::Op);
    log_info!(LogType::Op, "back");
    assert_logged(capture, "[Op] back");

    tt_logger::disable_type(LogType::Device);
    log_info!(LogType::Device, "gone");
    assert!(capture.lines().is_empty());
}

#[test]
fn test_per_category_levels() {
    let (_guard, capture) = setup();

    let spec: LevelSpec = "warning,Device=trace,Op=off".parse().unwrap();
    tt_logger::set_level_spec(spec);
    assert_eq!(tt_logger::level(), LevelFilter::Warning);

    log_trace!(LogType::Device, "device trace");
    log_info!(LogType::Metal, "metal info");
    log_warning!(LogType::Metal, "metal warning");
    log_critical!(LogType::Op, "op critical");
    assert_eq!(
        capture.lines(),
        vec![
            "[trace] [Device] device trace",
            "[warning] [Metal] metal warning"
        ]
    );
}

#[test]
fn test_log_at_and_plain_log_records() {
    let (_guard, capture) = setup();

    log_at!(Level::Warning, LogType::Fabric, "link {} down", 2);
    assert_logged(capture, "[warning] [Fabric] link 2 down");

    log::info!(target: "some_crate::io", "from the log facade");
    assert_eq!(capture.lines(), vec!["[info] from the log facade"]);
}

#[test]
fn test_second_install_fails() {
    let (_guard, _capture) = setup();

    let err = Initializer::new()
        .sink(Capture::default())
        .init_with(Initializer::new().config_from(|_| None))
        .unwrap_err();
    assert!(matches!(err, tt_logger::InitError::SetLogger(_)));
}
