//! External command execution utilities.
//!
//! Provides a Builder-based API for running font tools with captured output,
//! a bounded wait and Ctrl+C cancellation.
//!
//! # Examples
//!
//! ```ignore
//! use crate::utils::exec::Cmd;
//!
//! // Simple command
//! Cmd::new("ttf2eot").arg(&plan.ttf).run()?;
//!
//! // With a display name, output filter and timeout
//! Cmd::new(fontforge)
//!     .args(["-lang=ff", "-c", script])
//!     .label("FontForge")
//!     .filter(&FONTFORGE_FILTER)
//!     .timeout(Some(Duration::from_secs(60)))
//!     .run()?;
//! ```

use crate::error::{FontFaceError, Result};
use crate::log;
use regex::Regex;
use std::{
    ffi::{OsStr, OsString},
    io::Read,
    path::Path,
    process::{Child, Command, ExitStatus, Output, Stdio},
    sync::OnceLock,
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};

/// How often a running child is checked for exit, timeout and cancellation.
const POLL_INTERVAL: Duration = Duration::from_millis(10);

// ============================================================================
// Builder API
// ============================================================================

/// Command builder for external process execution.
#[derive(Default)]
pub struct Cmd {
    program: OsString,
    args: Vec<OsString>,
    label: Option<String>,
    timeout: Option<Duration>,
    filter: Option<&'static FilterRule>,
}

impl Cmd {
    /// Create a new command builder.
    pub fn new<S: AsRef<OsStr>>(program: S) -> Self {
        Self {
            program: program.as_ref().to_owned(),
            ..Default::default()
        }
    }

    /// Add a single argument.
    ///
    /// Empty values are passed through: tools read their arguments by position.
    pub fn arg<S: AsRef<OsStr>>(mut self, arg: S) -> Self {
        self.args.push(arg.as_ref().to_owned());
        self
    }

    /// Add multiple arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args.extend(args.into_iter().map(|arg| arg.as_ref().to_owned()));
        self
    }

    /// Set the name used in log prefixes and error messages.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Kill the process and fail once it runs longer than `timeout`.
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set output filter for logging.
    pub fn filter(mut self, filter: &'static FilterRule) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Execute the command and return its captured output.
    ///
    /// A non-zero exit status is an error carrying the command line,
    /// exit code and captured output.
    pub fn run(self) -> Result<Output> {
        let filter = self.filter.unwrap_or(&EMPTY_FILTER);
        let name = self.program_name();
        let command = self.command_line();

        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let mut child = cmd.spawn().map_err(|source| FontFaceError::Spawn {
            command: command.clone(),
            source,
        })?;

        // Drain pipes on separate threads so a chatty child never blocks on a full pipe
        let stdout = spawn_reader(child.stdout.take());
        let stderr = spawn_reader(child.stderr.take());

        let status = wait_bounded(&mut child, self.timeout, &command)?;

        let output = Output {
            status,
            stdout: join_reader(stdout),
            stderr: join_reader(stderr),
        };

        log_output(&name, &command, &output, filter)?;
        Ok(output)
    }

    /// Get the program name for log prefixes and error messages.
    fn program_name(&self) -> String {
        if let Some(label) = &self.label {
            return label.clone();
        }
        Path::new(&self.program)
            .file_name()
            .unwrap_or(&self.program)
            .to_string_lossy()
            .to_string()
    }

    /// Render the full command line the way a user would type it.
    fn command_line(&self) -> String {
        let mut line = self.program.to_string_lossy().to_string();
        for arg in &self.args {
            line.push(' ');
            line.push_str(&quote(&arg.to_string_lossy()));
        }
        line
    }
}

// ============================================================================
// Process Handling
// ============================================================================

/// Wait for the child, polling for exit, timeout and Ctrl+C.
fn wait_bounded(child: &mut Child, timeout: Option<Duration>, command: &str) -> Result<ExitStatus> {
    let started = Instant::now();
    loop {
        match child.try_wait() {
            Ok(Some(status)) => return Ok(status),
            Ok(None) => {}
            Err(source) => {
                kill(child);
                return Err(FontFaceError::Spawn {
                    command: command.to_string(),
                    source,
                });
            }
        }

        if crate::core::is_shutdown() {
            kill(child);
            return Err(FontFaceError::Cancelled {
                command: command.to_string(),
            });
        }

        if let Some(limit) = timeout
            && started.elapsed() >= limit
        {
            kill(child);
            return Err(FontFaceError::Timeout {
                command: command.to_string(),
                timeout: limit,
            });
        }

        thread::sleep(POLL_INTERVAL);
    }
}

/// Kill and reap a child process, ignoring failures (it may already be gone).
fn kill(child: &mut Child) {
    let _ = child.kill();
    let _ = child.wait();
}

fn spawn_reader<R: Read + Send + 'static>(pipe: Option<R>) -> Option<JoinHandle<Vec<u8>>> {
    pipe.map(|mut pipe| {
        thread::spawn(move || {
            let mut buf = Vec::new();
            let _ = pipe.read_to_end(&mut buf);
            buf
        })
    })
}

fn join_reader(handle: Option<JoinHandle<Vec<u8>>>) -> Vec<u8> {
    handle
        .and_then(|h| h.join().ok())
        .unwrap_or_default()
}

// ============================================================================
// Output Filtering
// ============================================================================

/// Filter rule for command output logging.
///
/// Used to reduce noise by skipping known banners or irrelevant messages.
pub struct FilterRule {
    /// Prefixes to skip when logging output.
    pub skip_prefixes: &'static [&'static str],
}

impl FilterRule {
    /// Create a new filter rule.
    pub const fn new(skip_prefixes: &'static [&'static str]) -> Self {
        Self { skip_prefixes }
    }

    /// Check if a line should be skipped.
    fn should_skip(&self, line: &str) -> bool {
        line.is_empty() || self.skip_prefixes.iter().any(|p| line.starts_with(p))
    }

    /// Lines of `output` that pass the filter.
    pub(crate) fn keep<'a>(&self, output: &'a str) -> Vec<&'a str> {
        output
            .lines()
            .filter(|line| {
                let plain = strip_ansi(line);
                let trimmed = plain.trim();
                !trimmed.is_empty() && !self.should_skip(trimmed)
            })
            .collect()
    }

    /// Log output lines that pass the filter.
    pub fn log(&self, name: &str, output: &str) {
        let lines = self.keep(output);
        if !lines.is_empty() {
            log!(name; "{}", lines.join("\n"));
        }
    }
}

/// Empty filter (no skipping).
pub const EMPTY_FILTER: FilterRule = FilterRule::new(&[]);

/// Silent filter (skip all output).
pub const SILENT_FILTER: FilterRule = FilterRule::new(&[""]);

// ============================================================================
// Helpers
// ============================================================================

/// Strip ANSI escape codes from string.
fn strip_ansi(s: &str) -> std::borrow::Cow<'_, str> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"\x1b\[[0-9;]*m").unwrap());
    re.replace_all(s, "")
}

/// Quote an argument for display if it contains anything beyond plain path characters.
fn quote(arg: &str) -> String {
    let plain = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '/' | '=' | ':'));
    if plain {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}

/// Log command output, returning error on failure.
fn log_output(name: &str, command: &str, output: &Output, filter: &'static FilterRule) -> Result<()> {
    if !output.status.success() {
        return Err(FontFaceError::Conversion {
            tool: name.to_string(),
            command: command.to_string(),
            code: output.status.code(),
            output: format_error(output, filter),
        });
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    filter.log(name, stderr.trim());
    Ok(())
}

/// Collect the useful part of a failed command's output.
fn format_error(output: &Output, filter: &'static FilterRule) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);

    let mut msg = filter.keep(&stderr).join("\n");

    let stdout_trimmed = stdout.trim();
    if !stdout_trimmed.is_empty() {
        if !msg.is_empty() {
            msg.push('\n');
        }
        msg.push_str(stdout_trimmed);
    }
    msg
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cmd_builder() {
        let cmd = Cmd::new("echo")
            .arg("hello")
            .args(["world", "!"]);

        assert_eq!(cmd.program, OsString::from("echo"));
        assert_eq!(cmd.args.len(), 3);
    }

    #[test]
    fn test_empty_args_kept_in_place() {
        let cmd = Cmd::new("batik-ttf2svg").arg("a.ttf").args(["-id", "", "-o"]).arg("a.svg");
        assert_eq!(cmd.args.len(), 5);
        assert_eq!(cmd.args[2], OsString::new());
        assert_eq!(cmd.command_line(), "batik-ttf2svg a.ttf -id '' -o a.svg");
    }

    #[cfg(unix)]
    #[test]
    fn test_empty_arg_reaches_process() {
        let output = Cmd::new("sh")
            .args(["-c", r#"echo "$#:$1:$2""#, "sh", "", "b"])
            .run()
            .unwrap();
        assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "2::b");
    }

    #[test]
    fn test_program_name() {
        assert_eq!(Cmd::new("/usr/local/bin/ttf2eot").program_name(), "ttf2eot");
        assert_eq!(
            Cmd::new("/usr/bin/fontforge").label("FontForge").program_name(),
            "FontForge"
        );
    }

    #[test]
    fn test_command_line_quoting() {
        let cmd = Cmd::new("fontforge")
            .args(["-lang=ff", "-c", "Open($1);Print($weight);"])
            .arg("fonts/My Font.ttf");
        assert_eq!(
            cmd.command_line(),
            "fontforge -lang=ff -c 'Open($1);Print($weight);' 'fonts/My Font.ttf'"
        );
    }

    #[test]
    fn test_filter_rule() {
        let filter = FilterRule::new(&["Copyright", "License"]);
        assert!(filter.should_skip("Copyright (c) 2000-2024"));
        assert!(filter.should_skip("License GPLv3+"));
        assert!(!filter.should_skip("Failed to open font"));
        assert!(filter.should_skip(""));
        assert_eq!(
            filter.keep("Copyright x\n\nFailed to open font\n"),
            vec!["Failed to open font"]
        );
    }

    #[test]
    fn test_strip_ansi() {
        assert_eq!(strip_ansi("\x1b[31mRed\x1b[0m"), "Red");
        assert_eq!(strip_ansi("Plain text"), "Plain text");
    }

    #[cfg(unix)]
    #[test]
    fn test_simple_command() {
        let output = Cmd::new("echo").arg("hello").run().unwrap();
        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("hello"));
    }

    #[cfg(unix)]
    #[test]
    fn test_failed_command_reports_code_and_output() {
        let err = Cmd::new("sh")
            .args(["-c", "echo broken font; exit 3"])
            .run()
            .unwrap_err();

        match err {
            FontFaceError::Conversion { code, output, command, .. } => {
                assert_eq!(code, Some(3));
                assert!(output.contains("broken font"));
                assert!(command.starts_with("sh -c"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_timeout_kills_process() {
        let started = Instant::now();
        let err = Cmd::new("sleep")
            .arg("5")
            .timeout(Some(Duration::from_millis(100)))
            .run()
            .unwrap_err();

        assert!(matches!(err, FontFaceError::Timeout { .. }));
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn test_missing_program() {
        let err = Cmd::new("definitely-not-a-font-tool-xyz").run().unwrap_err();
        assert!(matches!(err, FontFaceError::Spawn { .. }));
    }
}
