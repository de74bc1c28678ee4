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
use std::fmt::Write;
use std::sync::Once;

use colored::Color;
use colored::ColoredString;
use colored::Colorize;
use jiff::Zoned;
use jiff::tz::TimeZone;

use crate::Level;
use crate::layout::Layout;
use crate::layout::filename;
use crate::record::category_of;

/// The pattern used when none is configured.
pub const DEFAULT_PATTERN: &str = "[%Y-%m-%d %H:%M:%S.%e] [%^%l%$] %v";

/// The color of the category tag in front of every categorized message.
const CATEGORY_COLOR: Color = Color::TrueColor {
    r: 32,
    g: 178,
    b: 170,
};

/// A layout driven by an spdlog-style pattern string.
///
/// Output of the default pattern, `[%Y-%m-%d %H:%M:%S.%e] [%^%l%$] %v`:
///
/// ```text
/// [2025-03-04 10:12:45.403] [info] [Device] Opening device 0
/// [2025-03-04 10:12:45.404] [warning] [Op] Falling back to host execution
/// [2025-03-04 10:12:45.404] [critical] [Always] Out of memory
/// ```
///
/// Supported flags:
///
/// | flag | expands to |
/// |------|------------|
/// | `%Y` `%m` `%d` | year, month, day |
/// | `%H` `%M` `%S` | hour, minute, second |
/// | `%e` `%f` `%F` | milli-, micro- and nanoseconds of the second |
/// | `%z` | UTC offset, `+08:00` |
/// | `%T` `%D` | `%H:%M:%S` and `%m/%d/%y` |
/// | `%l` `%L` | level name, `warning`, and its letter, `W` |
/// | `%n` | category name, or the target of records logged without a category |
/// | `%v` | the message, prefixed with `[Category] ` when there is one |
/// | `%s` `%g` `%#` `%@` | file name, file path, line, `path:line` |
/// | `%!` | module path |
/// | `%t` `%P` | thread name (or id) and process id |
/// | `%^` `%$` | start and end of the level-colored range |
/// | `%%` | a literal `%` |
///
/// Unknown flags are copied to the output unchanged.
///
/// Colors, both the level-colored range and the category tag, are only emitted when the sink
/// reports that it can render ANSI escapes.
///
/// # Examples
///
/// ```
/// use tt_logger::layout::PatternLayout;
///
/// let layout = PatternLayout::new("[%H:%M:%S] [%L] %v");
/// ```
#[derive(Debug, Clone)]
pub struct PatternLayout {
    tokens: Vec<Token>,
    needs_time: bool,
    colors: LevelColor,
    tz: Option<TimeZone>,
}

/// Customize the color of each log level.
#[derive(Debug, Clone)]
pub struct LevelColor {
    pub trace: Color,
    pub debug: Color,
    pub info: Color,
    pub warning: Color,
    pub error: Color,
    pub critical: Color,
    pub critical_background: Color,
}

impl Default for LevelColor {
    fn default() -> Self {
        Self {
            trace: Color::BrightBlack,
            debug: Color::Cyan,
            info: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
            critical: Color::White,
            critical_background: Color::Red,
        }
    }
}

impl LevelColor {
    fn paint(&self, level: Level, text: &str) -> ColoredString {
        match level {
            Level::Trace => text.color(self.trace),
            Level::Debug => text.color(self.debug),
            Level::Info => text.color(self.info),
            Level::Warning => text.color(self.warning).bold(),
            Level::Error => text.color(self.error).bold(),
            Level::Critical => text
                .color(self.critical)
                .on_color(self.critical_background)
                .bold(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Literal(String),
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
    Millis,
    Micros,
    Nanos,
    Offset,
    Time,
    Date,
    Level,
    ShortLevel,
    Name,
    Payload,
    BaseFile,
    File,
    Line,
    Location,
    Module,
    Thread,
    Pid,
    ColorStart,
    ColorEnd,
}

impl Token {
    fn is_time(&self) -> bool {
        matches!(
            self,
            Token::Year
                | Token::Month
                | Token::Day
                | Token::Hour
                | Token::Minute
                | Token::Second
                | Token::Millis
                | Token::Micros
                | Token::Nanos
                | Token::Offset
                | Token::Time
                | Token::Date
        )
    }
}

fn compile(pattern: &str) -> Vec<Token> {
    let mut tokens = vec![];
    let mut literal = String::new();
    let mut chars = pattern.chars();

    while let Some(c) = chars.next() {
        if c != '%' {
            literal.push(c);
            continue;
        }

        let token = match chars.next() {
            Some('Y') => Token::Year,
            Some('m') => Token::Month,
            Some('d') => Token::Day,
            Some('H') => Token::Hour,
            Some('M') => Token::Minute,
            Some('S') => Token::Second,
            Some('e') => Token::Millis,
            Some('f') => Token::Micros,
            Some('F') => Token::Nanos,
            Some('z') => Token::Offset,
            Some('T') => Token::Time,
            Some('D') => Token::Date,
            Some('l') => Token::Level,
            Some('L') => Token::ShortLevel,
            Some('n') => Token::Name,
            Some('v') => Token::Payload,
            Some('s') => Token::BaseFile,
            Some('g') => Token::File,
            Some('#') => Token::Line,
            Some('@') => Token::Location,
            Some('!') => Token::Module,
            Some('t') => Token::Thread,
            Some('P') => Token::Pid,
            Some('^') => Token::ColorStart,
            Some('$') => Token::ColorEnd,
            Some('%') => {
                literal.push('%');
                continue;
            }
            Some(other) => {
                literal.push('%');
                literal.push(other);
                continue;
            }
            None => {
                literal.push('%');
                break;
            }
        };

        if !literal.is_empty() {
            tokens.push(Token::Literal(std::mem::take(&mut literal)));
        }
        tokens.push(token);
    }

    if !literal.is_empty() {
        tokens.push(Token::Literal(literal));
    }
    tokens
}

impl Default for PatternLayout {
    fn default() -> Self {
        PatternLayout::new(DEFAULT_PATTERN)
    }
}

impl PatternLayout {
    /// Compile a layout from `pattern`.
    pub fn new(pattern: &str) -> Self {
        let tokens = compile(pattern);
        let needs_time = tokens.iter().any(Token::is_time);
        Self {
            tokens,
            needs_time,
            colors: LevelColor::default(),
            tz: None,
        }
    }

    /// Customize the level colors.
    pub fn colors(mut self, colors: LevelColor) -> Self {
        self.colors = colors;
        self
    }

    /// Render timestamps in `tz` instead of the system time zone.
    pub fn timezone(mut self, tz: TimeZone) -> Self {
        self.tz = Some(tz);
        self
    }

    fn render(&self, out: &mut String, record: &log::Record, ansi: bool) -> fmt::Result {
        if ansi {
            force_colors();
        }
        let level = Level::of(record);
        let category = category_of(record);
        let now = if self.needs_time {
            Some(match self.tz.clone() {
                Some(tz) => Zoned::now().with_time_zone(tz),
                None => Zoned::now(),
            })
        } else {
            None
        };
        let mut colored_from = None;

        for token in &self.tokens {
            match token {
                Token::Literal(text) => out.push_str(text),
                Token::Level => out.push_str(level.as_str()),
                Token::ShortLevel => out.push_str(level.short_name()),
                Token::Name => out.push_str(category.unwrap_or(record.target())),
                Token::Payload => {
                    if let Some(category) = category {
                        if ansi {
                            write!(out, "[{}] ", category.color(CATEGORY_COLOR))?;
                        } else {
                            write!(out, "[{category}] ")?;
                        }
                    }
                    write!(out, "{}", record.args())?;
                }
                Token::BaseFile => out.push_str(filename(record)),
                Token::File => out.push_str(record.file().unwrap_or_default()),
                Token::Line => write!(out, "{}", record.line().unwrap_or_default())?,
                Token::Location => write!(
                    out,
                    "{}:{}",
                    record.file().unwrap_or_default(),
                    record.line().unwrap_or_default()
                )?,
                Token::Module => out.push_str(record.module_path().unwrap_or_default()),
                Token::Thread => {
                    let thread = std::thread::current();
                    match thread.name() {
                        Some(name) => out.push_str(name),
                        None => write!(out, "{:?}", thread.id())?,
                    }
                }
                Token::Pid => write!(out, "{}", std::process::id())?,
                Token::ColorStart => colored_from = Some(out.len()),
                Token::ColorEnd => {
                    if let Some(start) = colored_from.take() {
                        paint_range(out, start, level, &self.colors, ansi)?;
                    }
                }
                time => {
                    if let Some(now) = &now {
                        render_time(out, time, now)?;
                    }
                }
            }
        }

        if let Some(start) = colored_from {
            paint_range(out, start, level, &self.colors, ansi)?;
        }
        Ok(())
    }
}

// `colored` decides on its own whether to emit escapes, from stdout and `CLICOLOR`. The sink has
// already decided for its own stream, so that decision is overridden.
fn force_colors() {
    static FORCE: Once = Once::new();
    FORCE.call_once(|| colored::control::set_override(true));
}

fn paint_range(
    out: &mut String,
    start: usize,
    level: Level,
    colors: &LevelColor,
    ansi: bool,
) -> fmt::Result {
    if !ansi || start >= out.len() {
        return Ok(());
    }
    let segment = out.split_off(start);
    write!(out, "{}", colors.paint(level, &segment))
}

fn render_time(out: &mut String, token: &Token, now: &Zoned) -> fmt::Result {
    match token {
        Token::Year => write!(out, "{:04}", now.year()),
        Token::Month => write!(out, "{:02}", now.month()),
        Token::Day => write!(out, "{:02}", now.day()),
        Token::Hour => write!(out, "{:02}", now.hour()),
        Token::Minute => write!(out, "{:02}", now.minute()),
        Token::Second => write!(out, "{:02}", now.second()),
        Token::Millis => write!(out, "{:03}", now.subsec_nanosecond() / 1_000_000),
        Token::Micros => write!(out, "{:06}", now.subsec_nanosecond() / 1_000),
        Token::Nanos => write!(out, "{:09}", now.subsec_nanosecond()),
        Token::Offset => write!(out, "{}", now.strftime("%:z")),
        Token::Time => write!(
            out,
            "{:02}:{:02}:{:02}",
            now.hour(),
            now.minute(),
            now.second()
        ),
        Token::Date => write!(
            out,
            "{:02}/{:02}/{:02}",
            now.month(),
            now.day(),
            now.year() % 100
        ),
        _ => Ok(()),
    }
}

impl Layout for PatternLayout {
    fn format(&self, record: &log::Record, ansi: bool) -> anyhow::Result<Vec<u8>> {
        let mut out = String::new();
        self.render(&mut out, record, ansi)?;
        Ok(out.into_bytes())
    }
}
