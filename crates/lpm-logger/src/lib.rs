use crossterm::{ExecutableCommand, cursor, terminal};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::{Mutex, OnceLock};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
    Debug,
}

impl LogLevel {
    fn prefix(self) -> String {
        match self {
            Self::Info => "->".bright_cyan().bold().to_string(),
            Self::Success => "==>".bright_green().bold().to_string(),
            Self::Warning => "warning:".bright_yellow().bold().to_string(),
            Self::Error => "error:".bright_red().bold().to_string(),
            Self::Debug => "[dbg]".bright_black().to_string(),
        }
    }

    fn paint(self, message: &str) -> String {
        match self {
            Self::Info => message.white().to_string(),
            Self::Success => message.bright_green().to_string(),
            Self::Warning => message.bright_yellow().to_string(),
            Self::Error => message.bright_red().to_string(),
            Self::Debug => message.bright_black().to_string(),
        }
    }

    /// Errors are always shown, even when the logger is quiet.
    const fn always_shown(self) -> bool {
        matches!(self, Self::Error)
    }

    const fn to_stderr(self) -> bool {
        matches!(self, Self::Warning | Self::Error)
    }
}

/// Console output for one lpm invocation.
///
/// A status line (`status`/`update_line`) stays on screen until the next
/// message overwrites it, so long steps such as downloads show progress
/// without scrolling.
pub struct Logger {
    started: Instant,
    quiet: bool,
    status_line: Mutex<Option<String>>,
}

impl Logger {
    #[must_use]
    pub fn new(quiet: bool) -> Self {
        Self {
            started: Instant::now(),
            quiet,
            status_line: Mutex::new(None),
        }
    }

    fn take_status_line(&self) -> Option<String> {
        self.status_line.lock().ok().and_then(|mut line| line.take())
    }

    fn set_status_line(&self, message: &str) {
        if let Ok(mut line) = self.status_line.lock() {
            *line = Some(message.to_owned());
        }
    }

    fn clear_status_line(&self) {
        if self.take_status_line().is_none() {
            return;
        }

        let mut stdout = io::stdout();
        let _ = stdout.execute(cursor::MoveToColumn(0));
        let _ = stdout.execute(terminal::Clear(terminal::ClearType::CurrentLine));
        let _ = stdout.flush();
    }

    pub fn update_line(&self, message: &str) {
        if self.quiet {
            return;
        }

        self.clear_status_line();
        print!("{message}");
        let _ = io::stdout().flush();
        self.set_status_line(message);
    }

    pub fn finish_line(&self, message: &str) {
        if self.quiet {
            return;
        }

        self.clear_status_line();
        println!("{message}");
    }

    pub fn log(&self, level: LogLevel, message: &str) {
        if self.quiet && !level.always_shown() {
            return;
        }

        self.clear_status_line();
        let line = format!("{} {}", level.prefix(), level.paint(message));
        if level.to_stderr() {
            eprintln!("{line}");
        } else {
            println!("{line}");
        }
    }

    /// Final summary line with the time spent since the logger was created.
    pub fn finish(&self, message: &str) {
        let line = format!(
            "{} {} {}",
            "==>".bright_green().bold(),
            message.bright_green(),
            format!("[{}]", format_elapsed(self.started.elapsed())).bright_black()
        );
        self.finish_line(&line);
    }

    pub fn status(&self, message: &str) {
        self.update_line(&format!("{} {}", "::".bright_cyan(), message.bright_white()));
    }

    pub fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    pub fn success(&self, message: &str) {
        self.log(LogLevel::Success, message);
    }

    pub fn warn(&self, message: &str) {
        self.log(LogLevel::Warning, message);
    }

    pub fn error(&self, message: &str) {
        self.log(LogLevel::Error, message);
    }

    pub fn debug(&self, message: &str, debug_enabled: bool) {
        if debug_enabled {
            self.log(LogLevel::Debug, message);
        }
    }
}

fn format_elapsed(elapsed: Duration) -> String {
    if elapsed < Duration::from_secs(1) {
        format!("{}ms", elapsed.as_millis())
    } else {
        format!("{:.2}s", elapsed.as_secs_f64())
    }
}

static LOGGER: OnceLock<Logger> = OnceLock::new();

/// Installs the process-wide logger. Only the first call has an effect.
pub fn init_logger(quiet: bool) {
    let _ = LOGGER.set(Logger::new(quiet));
}

// Library callers and tests may log before the CLI initialized anything.
fn logger() -> &'static Logger {
    LOGGER.get_or_init(|| Logger::new(false))
}

pub fn update_line(message: &str) {
    logger().update_line(message);
}

pub fn status(message: &str) {
    logger().status(message);
}

pub fn info(message: &str) {
    logger().info(message);
}

pub fn success(message: &str) {
    logger().success(message);
}

pub fn warn(message: &str) {
    logger().warn(message);
}

pub fn error(message: &str) {
    logger().error(message);
}

pub fn debug(message: &str, debug_enabled: bool) {
    logger().debug(message, debug_enabled);
}

pub fn finish(message: &str) {
    logger().finish(message);
}

pub fn finish_line(message: &str) {
    logger().finish_line(message);
}
