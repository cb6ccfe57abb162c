use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock, PoisonError};
use std::time::{SystemTime, UNIX_EPOCH};

use log::{LevelFilter, Log, Metadata, Record};

const LOG_FILE_NAME: &str = "launchpad.log";
const ARCHIVE_PREFIX: &str = "launchpad-";
const MAX_LOG_BYTES: u64 = 1_000_000;
const MAX_ARCHIVES: usize = 5;

static LOGGER: OnceLock<FileLogger> = OnceLock::new();
static PANIC_HOOK_INSTALLED: OnceLock<()> = OnceLock::new();

struct FileLogger {
    level: LevelFilter,
    file: Mutex<File>,
}

impl Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let mut file = self.file.lock().unwrap_or_else(PoisonError::into_inner);

        let line = format!(
            "[{}] [{}] {}: {}\n",
            now_secs(),
            record.level(),
            record.target(),
            record.args()
        );
        let _ = file.write_all(line.as_bytes());
    }

    fn flush(&self) {
        let mut file = self.file.lock().unwrap_or_else(PoisonError::into_inner);
        let _ = file.flush();
    }
}

pub fn logs_dir() -> PathBuf {
    crate::config::stable_app_data_dir().join("logs")
}

/// Installs the file logger as the global `log` backend. Calling it again
/// after a successful install is a no-op.
pub fn init(log_dir: &Path, level: LevelFilter) -> Result<(), std::io::Error> {
    if LOGGER.get().is_some() {
        return Ok(());
    }

    fs::create_dir_all(log_dir)?;
    let log_path = log_dir.join(LOG_FILE_NAME);
    rotate_if_needed(&log_path, log_dir)?;

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    let logger = LOGGER.get_or_init(|| FileLogger {
        level,
        file: Mutex::new(file),
    });
    if log::set_logger(logger).is_ok() {
        log::set_max_level(level);
    }

    install_panic_hook();
    Ok(())
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

fn rotate_if_needed(log_path: &Path, log_dir: &Path) -> Result<(), std::io::Error> {
    let meta = match fs::metadata(log_path) {
        Ok(meta) => meta,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(err) => return Err(err),
    };

    if meta.len() < MAX_LOG_BYTES {
        return Ok(());
    }

    let archived = log_dir.join(format!("{ARCHIVE_PREFIX}{}.log", now_secs()));
    fs::rename(log_path, archived)?;
    prune_old_archives(log_dir)?;
    Ok(())
}

fn prune_old_archives(log_dir: &Path) -> Result<(), std::io::Error> {
    let mut archives = fs::read_dir(log_dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .map(|n| n.starts_with(ARCHIVE_PREFIX) && n.ends_with(".log"))
                .unwrap_or(false)
        })
        .collect::<Vec<_>>();

    archives.sort();
    let excess = archives.len().saturating_sub(MAX_ARCHIVES);
    for oldest in archives.drain(..excess) {
        let _ = fs::remove_file(oldest);
    }
    Ok(())
}

fn install_panic_hook() {
    let _ = PANIC_HOOK_INSTALLED.get_or_init(|| {
        let prior = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let location = panic_info
                .location()
                .map(|l| format!("{}:{}", l.file(), l.line()))
                .unwrap_or_else(|| "unknown".to_string());
            let payload = panic_info
                .payload()
                .downcast_ref::<&str>()
                .map(|s| (*s).to_string())
                .or_else(|| panic_info.payload().downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "panic payload unavailable".to_string());
            log::error!("panic at {location}: {payload}");
            log::logger().flush();
            prior(panic_info);
        }));
    });
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use log::{Level, LevelFilter, Log, Record};

    use super::{logs_dir, prune_old_archives, rotate_if_needed, FileLogger, LOG_FILE_NAME};

    #[test]
    fn logs_dir_uses_stable_app_data_layout() {
        let dir = logs_dir();
        assert!(dir
            .to_string_lossy()
            .to_ascii_lowercase()
            .contains("launchpad"));
    }

    #[test]
    fn oversized_log_is_archived() {
        let dir = tempfile::tempdir().unwrap();
        let log_path = dir.path().join(LOG_FILE_NAME);
        std::fs::write(&log_path, vec![b'x'; 1_000_001]).unwrap();

        rotate_if_needed(&log_path, dir.path()).unwrap();

        assert!(!log_path.exists());
        let archived = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(archived, 1);
    }

    #[test]
    fn prune_keeps_newest_archives() {
        let dir = tempfile::tempdir().unwrap();
        for stamp in 100..108 {
            std::fs::write(dir.path().join(format!("launchpad-{stamp}.log")), b"x").unwrap();
        }
        std::fs::write(dir.path().join("unrelated.txt"), b"x").unwrap();

        prune_old_archives(dir.path()).unwrap();

        assert!(!dir.path().join("launchpad-100.log").exists());
        assert!(!dir.path().join("launchpad-102.log").exists());
        assert!(dir.path().join("launchpad-103.log").exists());
        assert!(dir.path().join("launchpad-107.log").exists());
        assert!(dir.path().join("unrelated.txt").exists());
    }

    #[test]
    fn logger_keeps_writing_after_a_panic_poisons_the_file_lock() {
        let dir = tempfile::tempdir().unwrap();
        let log_path = dir.path().join(LOG_FILE_NAME);
        let logger = FileLogger {
            level: LevelFilter::Info,
            file: Mutex::new(std::fs::File::create(&log_path).unwrap()),
        };

        std::thread::scope(|scope| {
            let poisoned = scope.spawn(|| {
                let _guard = logger.file.lock().unwrap();
                panic!("writer died holding the lock");
            });
            assert!(poisoned.join().is_err());
        });
        assert!(logger.file.is_poisoned());

        logger.log(
            &Record::builder()
                .level(Level::Warn)
                .target("launchpad")
                .args(format_args!("still logging"))
                .build(),
        );
        logger.flush();

        let written = std::fs::read_to_string(&log_path).unwrap();
        assert!(written.contains("[WARN] launchpad: still logging"));
    }
}
