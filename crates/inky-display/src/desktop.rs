//! Desktop preview: writes each frame as an indexed PNG and opens it in the
//! platform's image viewer.

use std::path::{Path, PathBuf};
use std::process::Command;

use inky_common::{InkyError, InkyResult};
use renderer::png::encode_frame;
use renderer::IndexedFrame;
use tracing::{debug, info, warn};

/// Environment variable overriding where previews are written.
pub const PREVIEW_PATH_ENV: &str = "DESKTOP_PREVIEW_PATH";

/// [`PanelDevice`](crate::PanelDevice) that previews frames on a
/// developer machine.
#[derive(Debug)]
pub struct DesktopPreview {
    path: Option<PathBuf>,
    open_viewer: bool,
    last_path: Option<PathBuf>,
}

impl DesktopPreview {
    /// Preview into `path`, or a fresh temporary file per frame when `None`.
    pub fn new(path: Option<PathBuf>) -> Self {
        Self {
            path,
            open_viewer: true,
            last_path: None,
        }
    }

    /// Honour `DESKTOP_PREVIEW_PATH` when set.
    pub fn from_env() -> Self {
        Self::new(std::env::var_os(PREVIEW_PATH_ENV).map(PathBuf::from))
    }

    /// Write files without launching a viewer.
    pub fn without_viewer(mut self) -> Self {
        self.open_viewer = false;
        self
    }

    /// File written by the most recent flush.
    pub fn last_path(&self) -> Option<&Path> {
        self.last_path.as_deref()
    }

    fn target_path(&self) -> InkyResult<PathBuf> {
        match &self.path {
            Some(path) => Ok(path.clone()),
            None => {
                let file = tempfile::Builder::new()
                    .prefix("inky-preview-")
                    .suffix(".png")
                    .tempfile()?;
                let (_, path) = file.keep().map_err(|e| InkyError::Io(e.to_string()))?;
                Ok(path)
            }
        }
    }
}

impl crate::PanelDevice for DesktopPreview {
    fn name(&self) -> &'static str {
        "desktop"
    }

    fn paints_border(&self) -> bool {
        true
    }

    fn show(&mut self, frame: &IndexedFrame) -> InkyResult<()> {
        let png = encode_frame(frame)?;
        let path = self.target_path()?;
        std::fs::write(&path, png)?;
        info!(path = %path.display(), "Preview written");

        if self.open_viewer {
            open_in_viewer(&path)?;
        }
        self.last_path = Some(path);
        Ok(())
    }
}

fn viewer_command(path: &Path) -> Command {
    if cfg!(target_os = "macos") {
        let mut cmd = Command::new("open");
        cmd.arg(path);
        cmd
    } else if cfg!(target_os = "windows") {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", "start", ""]).arg(path);
        cmd
    } else {
        let mut cmd = Command::new("xdg-open");
        cmd.arg(path);
        cmd
    }
}

/// Start `cmd` and leave it running. The viewer outlives this process, so
/// the child is never waited on. Returns its pid.
fn spawn_detached(cmd: &mut Command) -> std::io::Result<u32> {
    let child = cmd.spawn()?;
    let pid = child.id();
    drop(child);
    Ok(pid)
}

fn open_in_viewer(path: &Path) -> InkyResult<()> {
    let mut cmd = viewer_command(path);
    match spawn_detached(&mut cmd) {
        Ok(pid) => {
            debug!(pid = pid, path = %path.display(), "Image viewer launched");
            Ok(())
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Could not launch image viewer");
            Err(InkyError::Io(format!("failed to open viewer: {}", e)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewer_command_targets_path() {
        let cmd = viewer_command(Path::new("/tmp/frame.png"));
        let args: Vec<_> = cmd.get_args().collect();
        assert_eq!(args.last().and_then(|a| a.to_str()), Some("/tmp/frame.png"));
        if cfg!(target_os = "linux") {
            assert_eq!(cmd.get_program(), "xdg-open");
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_spawn_detached_reports_pid() {
        let pid = spawn_detached(&mut Command::new("true")).unwrap();
        assert!(pid > 0);
    }

    #[test]
    fn test_spawn_detached_missing_program() {
        assert!(spawn_detached(&mut Command::new("inky-no-such-viewer")).is_err());
    }
}
