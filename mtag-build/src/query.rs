// SPDX-FileCopyrightText: 2026 Contributors to the MTag project.
// SPDX-License-Identifier: Apache-2.0

//! Running the package-config tool as a subprocess.
//!
//! [`QueryRunner`] is the seam between flag discovery and the operating
//! system. [`CommandRunner`] is the real implementation; tests substitute
//! their own to exercise failure paths without a pkg-config installation.

use std::{
    ffi::OsString,
    io::Read,
    path::Path,
    process::{Child, Command, Stdio},
    sync::mpsc::{self, Receiver, RecvTimeoutError},
    thread,
    time::{Duration, Instant},
};

use tracing::debug;

use crate::{Error, Result};

/// Interval between exit-status checks while waiting on the child.
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Everything a finished query reported.
///
/// The exit status is kept apart from the output streams so that a failing
/// tool can be told apart from one that succeeded with empty output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryOutput {
    /// Exit code, or `None` if the process was terminated by a signal.
    pub code: Option<i32>,
    /// Whether the process exited successfully.
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl QueryOutput {
    /// A successful run that printed `stdout`.
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            code: Some(0),
            success: true,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// A run that exited with a non-zero `code` after printing `stderr`.
    pub fn failure(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            success: false,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }
}

/// Runs an external program and captures its result.
pub trait QueryRunner {
    /// Runs `program` with `args`, waiting at most `timeout` for it to exit.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ToolingUnavailable`] if the program cannot be started
    /// or does not finish in time. A program that starts and exits with a
    /// failure status is not an error at this level.
    fn run(&self, program: &Path, args: &[OsString], timeout: Duration) -> Result<QueryOutput>;
}

/// [`QueryRunner`] backed by [`std::process::Command`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandRunner;

impl QueryRunner for CommandRunner {
    fn run(&self, program: &Path, args: &[OsString], timeout: Duration) -> Result<QueryOutput> {
        let tool = program.display().to_string();
        debug!("Running {tool} {args:?}");

        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|error| Error::tooling_unavailable(&tool, error))?;

        // Drain both pipes concurrently so a chatty child cannot block on a
        // full pipe while we wait for it to exit.
        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());

        // A timeout too large to represent means no deadline.
        let deadline = Instant::now().checked_add(timeout);

        let status = match wait_until(&mut child, deadline) {
            Ok(Some(status)) => status,
            Ok(None) => {
                // Kill can only fail if the child already exited; reap it either way.
                // The pipe readers are detached: a grandchild may still hold the pipes.
                let _ = child.kill();
                let _ = child.wait();
                return Err(Error::tooling_unavailable(
                    tool,
                    format!("no response within {timeout:?}"),
                ));
            }
            Err(error) => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(Error::tooling_unavailable(tool, error));
            }
        };

        // The child has exited, but anything it left running in the
        // background can keep the pipes open past the deadline.
        let stdout = collect(&stdout, deadline);
        let stderr = collect(&stderr, deadline);
        let (Some(stdout), Some(stderr)) = (stdout, stderr) else {
            return Err(Error::tooling_unavailable(
                tool,
                format!("output still open after {timeout:?}"),
            ));
        };

        Ok(QueryOutput {
            code: status.code(),
            success: status.success(),
            stdout,
            stderr,
        })
    }
}

/// Polls `child` until it exits or `deadline` passes (`Ok(None)`).
fn wait_until(
    child: &mut Child,
    deadline: Option<Instant>,
) -> std::io::Result<Option<std::process::ExitStatus>> {
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }
        let pause = match deadline {
            Some(deadline) => {
                let now = Instant::now();
                if now >= deadline {
                    return Ok(None);
                }
                POLL_INTERVAL.min(deadline - now)
            }
            None => POLL_INTERVAL,
        };
        thread::sleep(pause);
    }
}

/// Reads `pipe` to EOF on a separate thread; the contents arrive on the
/// returned channel.
fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> Receiver<Vec<u8>> {
    let (sender, receiver) = mpsc::channel();
    match pipe {
        Some(mut pipe) => {
            thread::spawn(move || {
                let mut buffer = Vec::new();
                // A read error leaves whatever was read so far.
                let _ = pipe.read_to_end(&mut buffer);
                let _ = sender.send(buffer);
            });
        }
        None => {
            let _ = sender.send(Vec::new());
        }
    }
    receiver
}

/// Waits for a drained pipe until `deadline`; `None` if it is still open.
fn collect(reader: &Receiver<Vec<u8>>, deadline: Option<Instant>) -> Option<String> {
    let received = match deadline {
        Some(deadline) => {
            reader.recv_timeout(deadline.saturating_duration_since(Instant::now()))
        }
        None => reader.recv().map_err(RecvTimeoutError::from),
    };
    let bytes = match received {
        Ok(bytes) => bytes,
        Err(RecvTimeoutError::Timeout) => return None,
        // The reader thread only hangs up after sending, unless it panicked.
        Err(RecvTimeoutError::Disconnected) => Vec::new(),
    };
    Some(String::from_utf8_lossy(&bytes).into_owned())
}
