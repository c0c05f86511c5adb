//! Child process execution with injected variables.
//!
//! The child inherits the current environment plus the given variables.
//! SIGINT and SIGTERM received while it runs are forwarded to it; the
//! caller exits with the child's code.

use std::process::{ExitStatus, Stdio};

use tokio::process::{Child, Command};
use tracing::debug;

use crate::error::{Error, Result};

/// Run `program` to completion.
///
/// # Returns
///
/// The child's exit code, or `128 + signal` if a signal killed it.
///
/// # Errors
///
/// Returns `Error::Other` if the program cannot be started.
pub fn run<'a>(
    program: &str,
    args: &[String],
    vars: impl IntoIterator<Item = (&'a str, &'a str)>,
) -> Result<i32> {
    let mut command = Command::new(program);
    command
        .args(args)
        .envs(vars)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(supervise(program, command))
}

async fn supervise(program: &str, mut command: Command) -> Result<i32> {
    let child = command
        .spawn()
        .map_err(|e| Error::Other(format!("failed to start {}: {}", program, e)))?;
    debug!(program, pid = ?child.id(), "child started");

    let status = wait_forwarding(child).await?;
    Ok(exit_code(status))
}

#[cfg(unix)]
async fn wait_forwarding(mut child: Child) -> Result<ExitStatus> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;
    loop {
        tokio::select! {
            status = child.wait() => return Ok(status?),
            _ = sigint.recv() => forward(&child, libc::SIGINT),
            _ = sigterm.recv() => forward(&child, libc::SIGTERM),
        }
    }
}

#[cfg(not(unix))]
async fn wait_forwarding(mut child: Child) -> Result<ExitStatus> {
    Ok(child.wait().await?)
}

#[cfg(unix)]
fn forward(child: &Child, signal: libc::c_int) {
    let Some(pid) = child.id() else {
        return;
    };
    debug!(pid, signal, "forwarding signal");
    let Ok(pid) = libc::pid_t::try_from(pid) else {
        return;
    };
    // SAFETY: pid is our own child, which has not been reaped yet.
    #[allow(unsafe_code)]
    unsafe {
        libc::kill(pid, signal);
    }
}

fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    1
}
