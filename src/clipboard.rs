use crate::error::ClipboardError;
use anyhow::Result;
use arboard::Clipboard;
#[cfg(target_os = "linux")]
use arboard::SetExtLinux;

pub const DAEMON_FLAG: &str = "__clipboard_daemon";

/// Destination for exported text.
pub trait ClipboardWriter {
    fn write_text(&mut self, text: &str) -> std::result::Result<(), ClipboardError>;
}

/// The host clipboard through `arboard`.
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl ClipboardWriter for SystemClipboard {
    fn write_text(&mut self, text: &str) -> std::result::Result<(), ClipboardError> {
        copy_text_to_clipboard(text)
    }
}

#[cfg(target_os = "linux")]
fn run_daemon_mode() -> Result<()> {
    let text = std::io::read_to_string(std::io::stdin())?;

    let mut clipboard = Clipboard::new()?;
    // Blocks until another program takes ownership of the selection.
    clipboard.set().wait().text(text)?;
    Ok(())
}

/// Checks if the DAEMON_FLAG is present in args. If so, runs in daemon mode.
/// Returns Ok(true) if daemon mode was run, Ok(false) otherwise.
pub fn check_and_run_daemon_if_requested() -> Result<bool> {
    if std::env::args().any(|a| a == DAEMON_FLAG) {
        #[cfg(target_os = "linux")]
        {
            run_daemon_mode()?;
            return Ok(true);
        }
        #[cfg(not(target_os = "linux"))]
        {
            eprintln!(
                "Warning: {} flag used on non-Linux system. Ignoring.",
                DAEMON_FLAG
            );
            return Ok(true);
        }
    }
    Ok(false)
}

pub fn copy_text_to_clipboard(text: &str) -> std::result::Result<(), ClipboardError> {
    #[cfg(not(target_os = "linux"))]
    {
        let mut clipboard = Clipboard::new()?;
        clipboard.set_text(text)?;
    }

    #[cfg(target_os = "linux")]
    {
        use std::io::Write;
        use std::process::{Command, Stdio};

        // X11/Wayland selections die with their owner, so a detached copy of
        // this binary holds the text. Probe first so a missing display is
        // reported here instead of being swallowed by the child.
        drop(Clipboard::new()?);

        let mut child = Command::new(std::env::current_exe()?)
            .arg(DAEMON_FLAG)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .current_dir("/")
            .spawn()?;

        match child.stdin.take() {
            Some(mut stdin) => {
                stdin.write_all(text.as_bytes())?;
                stdin.flush()?;
            }
            None => {
                return Err(ClipboardError::Helper(std::io::Error::other(
                    "failed to get stdin for clipboard daemon",
                )));
            }
        }
    }
    Ok(())
}
