//! Tracing subscriber setup.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Optional file receiving a JSON copy of every event.
pub const LOG_FILE_ENV: &str = "INKY_LOG_FILE";

/// Size at which the log file is rolled over to `<file>.1`.
pub const LOG_ROTATE_BYTES: u64 = 5 * 1024 * 1024;

/// Path the previous log is moved to when rolling over.
pub fn rotated_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".1");
    PathBuf::from(name)
}

/// Open `path` for appending, first moving it to `<path>.1` when it has
/// reached `max_bytes`. Only one old file is kept.
pub fn open_log_file(path: &Path, max_bytes: u64) -> std::io::Result<File> {
    match std::fs::metadata(path) {
        Ok(meta) if meta.len() >= max_bytes => std::fs::rename(path, rotated_path(path))?,
        Ok(_) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(e),
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Install the global subscriber.
///
/// `RUST_LOG` wins over `level`. Human-readable output goes to stderr
/// unless `json` is set, keeping stdout free for the terminal display.
pub fn init_logging(level: &str, json: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let log_file = match std::env::var_os(LOG_FILE_ENV).map(PathBuf::from) {
        Some(path) => Some(
            open_log_file(&path, LOG_ROTATE_BYTES)
                .with_context(|| format!("Failed to open log file {}", path.display()))?,
        ),
        None => None,
    };

    let text_layer = (!json).then(|| {
        fmt::layer()
            .with_target(true)
            .with_writer(std::io::stderr)
    });
    let json_layer = json.then(|| {
        fmt::layer()
            .json()
            .with_target(true)
            .with_writer(std::io::stderr)
    });
    let file_layer = log_file.map(|file| {
        fmt::layer()
            .json()
            .with_ansi(false)
            .with_writer(Mutex::new(file))
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(text_layer)
        .with(json_layer)
        .with(file_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use test_utils::temp_test_dir;

    #[test]
    fn test_small_log_is_appended() {
        let dir = temp_test_dir();
        let path = dir.path().join("inky.log");
        std::fs::write(&path, "old\n").unwrap();

        let mut file = open_log_file(&path, 1024).unwrap();
        file.write_all(b"new\n").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "old\nnew\n");
        assert!(!rotated_path(&path).exists());
    }

    #[test]
    fn test_full_log_rolls_over() {
        let dir = temp_test_dir();
        let path = dir.path().join("inky.log");
        std::fs::write(&path, vec![b'x'; 64]).unwrap();
        std::fs::write(rotated_path(&path), "older").unwrap();

        let mut file = open_log_file(&path, 64).unwrap();
        file.write_all(b"fresh\n").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "fresh\n");
        assert_eq!(std::fs::read(rotated_path(&path)).unwrap(), vec![b'x'; 64]);
    }

    #[test]
    fn test_missing_log_is_created() {
        let dir = temp_test_dir();
        let path = dir.path().join("inky.log");
        open_log_file(&path, LOG_ROTATE_BYTES).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_rotated_path() {
        assert_eq!(rotated_path(Path::new("/var/log/inky.log")), PathBuf::from("/var/log/inky.log.1"));
    }
}
