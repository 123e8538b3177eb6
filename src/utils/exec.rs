//! External command execution utilities.
//!
//! Provides a Builder-based API for running external tools with proper
//! output handling and stdin piping.
//!
//! # Examples
//!
//! ```ignore
//! use crate::utils::exec::Cmd;
//!
//! // Command array from config, source piped through stdin
//! let output = Cmd::from_slice(&["tailwindcss", "-i", "-"])
//!     .cwd(root)
//!     .stdin(css_source)
//!     .run()?;
//! ```

use crate::log;
use anyhow::{Context, Result};
use regex::Regex;
use std::{
    ffi::{OsStr, OsString},
    io::{self, Write},
    path::{Path, PathBuf},
    process::{Command, Output, Stdio},
    sync::OnceLock,
};

// ============================================================================
// Builder API
// ============================================================================

/// Command builder for external process execution.
#[derive(Default)]
pub struct Cmd {
    program: OsString,
    args: Vec<OsString>,
    cwd: Option<PathBuf>,
    envs: Vec<(String, String)>,
    stdin_data: Option<Vec<u8>>,
    filter: Option<&'static FilterRule>,
}

impl Cmd {
    /// Create from a command array (e.g., `["tailwindcss"]` or `["npx", "tailwindcss"]`).
    pub fn from_slice<S: AsRef<OsStr>>(cmd: &[S]) -> Self {
        let mut iter = cmd.iter();
        let program = iter
            .next()
            .map(|s| s.as_ref().to_owned())
            .unwrap_or_default();
        let args: Vec<_> = iter.map(|s| s.as_ref().to_owned()).collect();
        Self {
            program,
            args,
            ..Default::default()
        }
    }

    /// Set working directory.
    pub fn cwd<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.cwd = Some(dir.as_ref().to_owned());
        self
    }

    /// Set environment variables for the subprocess.
    pub fn envs<K, V, I>(mut self, vars: I) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
        I: IntoIterator<Item = (K, V)>,
    {
        for (k, v) in vars {
            self.envs.push((k.as_ref().to_owned(), v.as_ref().to_owned()));
        }
        self
    }

    /// Set stdin data to pipe to the process.
    pub fn stdin<D: AsRef<[u8]>>(mut self, data: D) -> Self {
        self.stdin_data = Some(data.as_ref().to_vec());
        self
    }

    /// Set output filter for logging.
    pub fn filter(mut self, filter: &'static FilterRule) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Execute the command and return output.
    ///
    /// Stdin is always piped; without data the child sees an empty stream.
    pub fn run(self) -> Result<Output> {
        let filter = self.filter.unwrap_or(&EMPTY_FILTER);
        self.run_with_stdin(filter)
    }

    /// Get the program name for error messages.
    fn program_name(&self) -> String {
        self.program.to_string_lossy().to_string()
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args).envs(self.envs.iter().cloned());
        if let Some(dir) = &self.cwd {
            cmd.current_dir(dir);
        }
        cmd
    }

    /// Execution with stdin piping.
    fn run_with_stdin(mut self, filter: &'static FilterRule) -> Result<Output> {
        let name = self.program_name();
        let stdin_data = self.stdin_data.take().unwrap_or_default();

        let mut child = self
            .command()
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("Failed to spawn `{name}`"))?;

        // Write from a separate thread so a large input can't deadlock against a full stdout pipe
        let writer = child.stdin.take().map(|mut stdin| {
            std::thread::spawn(move || stdin.write_all(&stdin_data))
        });

        let output = child
            .wait_with_output()
            .with_context(|| format!("Failed to wait for `{name}`"))?;

        if let Some(handle) = writer {
            let written = handle
                .join()
                .map_err(|_| anyhow::anyhow!("Failed to join stdin writer for `{name}`"))?;
            // A child may exit without reading its input; the exit status decides
            if let Err(err) = written
                && err.kind() != io::ErrorKind::BrokenPipe
            {
                return Err(err).with_context(|| format!("Failed to write stdin to `{name}`"));
            }
        }

        log_output(&name, &output, filter)?;
        Ok(output)
    }
}

// ============================================================================
// Output Filtering
// ============================================================================

/// Filter rule for command output logging.
///
/// Used to reduce noise by skipping known warnings or irrelevant messages.
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

    /// Log output lines that pass the filter.
    pub fn log(&self, name: &str, output: &str) {
        let lines: Vec<_> = output
            .lines()
            .filter(|line| {
                let plain = strip_ansi(line);
                let trimmed = plain.trim();
                !trimmed.is_empty() && !self.should_skip(trimmed)
            })
            .collect();

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
    let re = RE.get_or_init(|| Regex::new(r"\x1b\[[0-9;]*m").expect("valid ansi regex"));
    re.replace_all(s, "")
}

/// Log stderr of a finished command, returning error on failure.
fn log_output(name: &str, output: &Output, filter: &'static FilterRule) -> Result<()> {
    if !output.status.success() {
        anyhow::bail!(format_error(name, output, filter));
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    filter.log(name, stderr.trim());
    Ok(())
}

/// Format error message for failed command.
fn format_error(name: &str, output: &Output, filter: &'static FilterRule) -> String {
    let stderr = strip_ansi(&String::from_utf8_lossy(&output.stderr)).into_owned();

    let error_msg = filter
        .skip_prefixes
        .iter()
        .fold(stderr.trim(), |s, p| s.trim_start_matches(p).trim_start());

    let mut msg = format!("Command `{name}` failed with {}\n", output.status);
    if !error_msg.is_empty() {
        msg.push_str(error_msg);
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
        let cmd = Cmd::from_slice(&["echo", "hello"])
            .cwd("/tmp")
            .envs([("KILN_INPUT", "a.css")]);

        assert_eq!(cmd.program, OsString::from("echo"));
        assert_eq!(cmd.args, vec!["hello"]);
        assert_eq!(cmd.cwd, Some(PathBuf::from("/tmp")));
        assert_eq!(cmd.envs, vec![("KILN_INPUT".to_string(), "a.css".to_string())]);
    }

    #[test]
    fn test_from_slice() {
        let cmd = Cmd::from_slice(&["npx", "tailwindcss", "-i", "-"]);
        assert_eq!(cmd.program, OsString::from("npx"));
        assert_eq!(cmd.args, vec!["tailwindcss", "-i", "-"]);
    }

    #[test]
    fn test_empty_slice() {
        let cmd = Cmd::from_slice::<&str>(&[]);
        assert!(cmd.program.is_empty());
        assert!(cmd.args.is_empty());
    }

    #[test]
    fn test_filter_rule() {
        let filter = FilterRule::new(&["Browserslist:", "Rebuilding"]);
        assert!(filter.should_skip("Browserslist: caniuse-lite is outdated"));
        assert!(filter.should_skip("Rebuilding..."));
        assert!(!filter.should_skip("Error: something"));
        assert!(filter.should_skip(""));
    }

    #[test]
    fn test_strip_ansi() {
        assert_eq!(strip_ansi("\x1b[31mRed\x1b[0m"), "Red");
        assert_eq!(strip_ansi("Plain text"), "Plain text");
    }

    #[cfg(unix)]
    #[test]
    fn test_stdin_pipe() {
        let output = Cmd::from_slice(&["cat"]).stdin(b"test data").run().unwrap();
        assert!(output.status.success());
        assert_eq!(output.stdout, b"test data");
    }

    #[cfg(unix)]
    #[test]
    fn test_unread_stdin_is_not_an_error() {
        // `true` exits without reading, so writing the input hits a closed pipe
        let output = Cmd::from_slice(&["true"])
            .stdin(vec![b'x'; 1 << 20])
            .run()
            .unwrap();
        assert!(output.status.success());
    }

    #[cfg(unix)]
    #[test]
    fn test_unread_stdin_failure_keeps_exit_status() {
        let err = Cmd::from_slice(&["sh", "-c", "echo nope >&2; exit 2"])
            .stdin(vec![b'x'; 1 << 20])
            .run()
            .unwrap_err();
        assert!(err.to_string().contains("nope"));
    }

    #[cfg(unix)]
    #[test]
    fn test_failure_is_error() {
        let err = Cmd::from_slice(&["sh", "-c", "echo boom >&2; exit 3"])
            .run()
            .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("`sh` failed"));
        assert!(msg.contains("boom"));
    }
}
