use std::io::Write;
use std::process::{Child, Command, ExitStatus, Stdio};

use tokio::task::JoinHandle;

use thiserror::Error;

use crate::catalog::System;

#[derive(Error, Debug)]
pub enum LaunchError {
    #[error("{0} is not available yet")]
    Unavailable(String),

    #[error("Failed to start {program}: {source}")]
    Spawn {
        program: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("No clipboard tool found")]
    NoClipboard,
}

impl LaunchError {
    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            LaunchError::Unavailable(name) => format!("{} is under development", name),
            LaunchError::Spawn { program, .. } => {
                format!("Could not open a browser ({} failed)", program)
            }
            LaunchError::NoClipboard => "Clipboard not available".to_string(),
        }
    }
}

#[cfg(target_os = "macos")]
fn opener(url: &str) -> (&'static str, Command) {
    let mut cmd = Command::new("open");
    cmd.arg(url);
    ("open", cmd)
}

#[cfg(target_os = "windows")]
fn opener(url: &str) -> (&'static str, Command) {
    let mut cmd = Command::new("cmd");
    cmd.args(["/C", "start", "", url]);
    ("cmd", cmd)
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn opener(url: &str) -> (&'static str, Command) {
    let mut cmd = Command::new("xdg-open");
    cmd.arg(url);
    ("xdg-open", cmd)
}

/// Hand the system's url to the platform browser.
pub fn open_system(system: &System) -> Result<&str, LaunchError> {
    let url = system
        .link()
        .ok_or_else(|| LaunchError::Unavailable(system.name.clone()))?;
    let (program, mut cmd) = opener(url);
    let child = cmd
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|source| LaunchError::Spawn { program, source })?;
    reap(child);
    tracing::info!(id = system.id, url, "opened system");
    Ok(url)
}

/// Wait for a detached child off the event loop so it does not linger as a
/// zombie. Outside a runtime the wait happens inline.
fn reap(mut child: Child) -> Option<JoinHandle<std::io::Result<ExitStatus>>> {
    match tokio::runtime::Handle::try_current() {
        Ok(handle) => Some(handle.spawn_blocking(move || child.wait())),
        Err(_) => {
            if let Err(e) = child.wait() {
                tracing::warn!(error = %e, "failed to wait for opener");
            }
            None
        }
    }
}

fn pipe_to(program: &str, args: &[&str], text: &str) -> bool {
    let Ok(mut child) = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
    else {
        return false;
    };
    let written = match child.stdin.take() {
        // stdin is closed when it drops so the tool sees EOF
        Some(mut stdin) => stdin.write_all(text.as_bytes()).is_ok(),
        None => true,
    };
    let status = child.wait();
    written && status.map(|s| s.success()).unwrap_or(false)
}

/// Copy text using wl-copy or xclip, whichever is installed.
pub fn copy_to_clipboard(text: &str) -> Result<(), LaunchError> {
    if pipe_to("wl-copy", &[], text) || pipe_to("xclip", &["-selection", "clipboard"], text) {
        Ok(())
    } else {
        Err(LaunchError::NoClipboard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;

    #[test]
    fn test_open_unavailable_system() {
        let systems = catalog::catalog();
        let hr = catalog::find(&systems, 4).unwrap();
        let err = open_system(hr).unwrap_err();
        assert!(matches!(err, LaunchError::Unavailable(_)));
        assert_eq!(err.user_message(), "HR Central is under development");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_reap_waits_for_child() {
        let child = Command::new("true").spawn().unwrap();
        let handle = reap(child).unwrap();
        let status = handle.await.unwrap().unwrap();
        assert!(status.success());
    }

    #[cfg(unix)]
    #[test]
    fn test_pipe_to_reader_that_exits_early() {
        // More than a pipe buffer, so the write fails once `true` exits
        let text = "x".repeat(1 << 20);
        assert!(!pipe_to("true", &[], &text));
        assert!(pipe_to("cat", &[], "link"));
        assert!(!pipe_to("false", &[], "link"));
    }

    #[test]
    fn test_spawn_error_message() {
        let err = LaunchError::Spawn {
            program: "xdg-open",
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert!(err.user_message().contains("xdg-open"));
        assert!(err.to_string().contains("missing"));
    }
}
