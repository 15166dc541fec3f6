//! Engine subprocess invocation.
//! Spawns the engine binary against a staged source and config file,
//! captures its combined output, and classifies the run by scanning for
//! the engine's success marker.

use std::io::Read;
use std::path::Path;
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use log::debug;

use crate::error::{Error, Result};

/// Literal substring the engine prints on a successful run.
pub const SUCCESS_MARKER: &str = "DONE";

/// Outcome of one engine invocation.
#[derive(Debug)]
pub struct EngineRun {
    /// Combined stdout and stderr of the engine process
    pub exit_log: String,
    /// True iff the spawn succeeded and the log carries the marker
    pub success: bool,
}

fn read_stream<R: Read>(stream: Option<R>) -> String {
    let mut buf = String::new();
    if let Some(mut stream) = stream {
        let _ = stream.read_to_string(&mut buf);
    }
    buf
}

/// Runs the engine as `<command> <source> -C <config>`.
///
/// Blocks until the process terminates and its output is fully
/// captured. With `timeout` set, a process still running at the
/// deadline is killed and reaped before `ProcessTimeoutError` is
/// returned, so the caller's cleanup still runs.
///
/// # Errors
/// * `Error::ProcessSpawnError` if the binary is missing or fails to start
/// * `Error::ProcessTimeoutError` if `timeout` elapses first
pub fn run_engine(
    command: &Path,
    source: &Path,
    config: &Path,
    timeout: Option<Duration>,
) -> Result<EngineRun> {
    debug!(
        "Invoking engine: {} {} -C {}",
        command.display(),
        source.display(),
        config.display()
    );

    let mut child = Command::new(command)
        .arg(source)
        .arg("-C")
        .arg(config)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| Error::ProcessSpawnError(format!("{}: {}", command.display(), e)))?;

    let stdout = child.stdout.take();
    let stderr = child.stderr.take();
    let stdout_reader = thread::spawn(move || read_stream(stdout));
    let stderr_reader = thread::spawn(move || read_stream(stderr));

    if let Some(timeout) = timeout {
        let deadline = Instant::now() + timeout;
        loop {
            match child.try_wait()? {
                Some(_) => break,
                None if Instant::now() >= deadline => {
                    let _ = child.kill();
                    let _ = child.wait();
                    debug!("Engine process killed after {:?}", timeout);
                    return Err(Error::ProcessTimeoutError { timeout });
                }
                None => thread::sleep(Duration::from_millis(10)),
            }
        }
    } else {
        child.wait()?;
    }

    let mut exit_log = stdout_reader.join().unwrap_or_default();
    exit_log.push_str(&stderr_reader.join().unwrap_or_default());

    let success = exit_log.contains(SUCCESS_MARKER);
    debug!("Engine run finished, success: {}", success);

    Ok(EngineRun { exit_log, success })
}
