//! Hand URLs to the platform's default handler
//!
//! The map link is never rendered in-app; it is passed to `xdg-open`, `open`
//! or `start`, and the handler is reaped on a background thread.

use std::process::{Child, Command, Stdio};
use std::thread::{self, JoinHandle};

use eyre::{Context, Result};
use tracing::{debug, info, warn};

/// Program and leading arguments that open a URL on this platform
pub fn opener_command() -> (&'static str, Vec<&'static str>) {
    #[cfg(target_os = "macos")]
    {
        ("open", vec![])
    }
    #[cfg(windows)]
    {
        ("cmd", vec!["/C", "start", ""])
    }
    #[cfg(not(any(target_os = "macos", windows)))]
    {
        ("xdg-open", vec![])
    }
}

/// Open a URL externally
///
/// A missing or blank URL is a no-op and returns `Ok(false)`.
pub fn open_url(url: Option<&str>) -> Result<bool> {
    debug!(?url, "open_url: called");
    let url = match url.map(str::trim) {
        Some(u) if !u.is_empty() => u,
        _ => {
            debug!("open_url: no URL, nothing to open");
            return Ok(false);
        }
    };

    let (program, args) = opener_command();
    let child = Command::new(program)
        .args(args)
        .arg(url)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .context(format!("Failed to launch {} for {}", program, url))?;
    reap(child);

    info!(%url, "Opened map link");
    Ok(true)
}

/// Wait for a detached child off the calling thread
fn reap(mut child: Child) -> JoinHandle<()> {
    thread::spawn(move || match child.wait() {
        Ok(status) => debug!(%status, "reap: opener exited"),
        Err(e) => warn!(error = %e, "reap: failed to wait on opener"),
    })
}
