//! Time-rotated log files with age-based retention
use crate::config::LogRotation;
use anyhow::{Context, Result};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant, SystemTime};
use tracing_appender::rolling::RollingFileAppender;

/// Writes to `<path>.<date>`, switching files on each rotation period, and
/// deletes rotated files older than the retention age. Without rotation the
/// file is `<path>` itself.
pub struct RollingFileWriter {
    appender: RollingFileAppender,
    directory: PathBuf,
    prefix: String,
    max_age: Duration,
    prune_period: Duration,
    last_prune: Instant,
}

impl RollingFileWriter {
    /// Creates the parent directories, opens the current file and runs a
    /// first retention pass.
    pub fn new(path: &Path, rotation: LogRotation, max_age: Duration) -> Result<Self> {
        let directory = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let prefix = path
            .file_name()
            .and_then(|name| name.to_str())
            .with_context(|| format!("log path {} has no file name", path.display()))?
            .to_owned();
        fs::create_dir_all(&directory)
            .with_context(|| format!("creating log directory {}", directory.display()))?;
        let appender = RollingFileAppender::builder()
            .rotation(rotation.into())
            .filename_prefix(prefix.clone())
            .build(&directory)
            .with_context(|| format!("opening log file {}", path.display()))?;
        let writer = Self {
            appender,
            directory,
            prefix,
            max_age,
            prune_period: rotation.period(),
            last_prune: Instant::now(),
        };
        writer
            .prune()
            .with_context(|| format!("pruning log files in {}", writer.directory.display()))?;
        Ok(writer)
    }

    /// Deletes the rotated files of this log last modified before the
    /// retention age. Returns the number of files removed.
    pub fn prune(&self) -> io::Result<usize> {
        if self.max_age.is_zero() {
            return Ok(0);
        }
        let Some(cutoff) = SystemTime::now().checked_sub(self.max_age) else {
            return Ok(0);
        };
        let rotated_prefix = format!("{}.", self.prefix);
        let mut removed = 0;
        for entry in fs::read_dir(&self.directory)? {
            let entry = entry?;
            let is_rotated = entry
                .file_name()
                .to_str()
                .is_some_and(|name| name.starts_with(&rotated_prefix));
            if !is_rotated || !entry.file_type()?.is_file() {
                continue;
            }
            if entry.metadata()?.modified()? < cutoff {
                fs::remove_file(entry.path())?;
                removed += 1;
            }
        }
        Ok(removed)
    }
}

impl Write for RollingFileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.last_prune.elapsed() >= self.prune_period {
            self.last_prune = Instant::now();
            if let Err(e) = self.prune() {
                eprintln!("error pruning log files: {e}");
            }
        }
        self.appender.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.appender.flush()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const DAY: Duration = Duration::from_secs(24 * 60 * 60);

    fn age(path: &Path, by: Duration) {
        fs::File::options()
            .write(true)
            .open(path)
            .unwrap()
            .set_modified(SystemTime::now() - by)
            .unwrap();
    }

    #[test]
    fn test_daily_file_and_retention() {
        let dir = tempfile::tempdir().unwrap();
        let logs = dir.path().join("logs");
        fs::create_dir_all(&logs).unwrap();
        let stale = logs.join("log_out.log.2020-01-01");
        let recent = logs.join("log_out.log.2020-01-02");
        let unrelated = logs.join("audit.log.2020-01-01");
        for path in [&stale, &recent, &unrelated] {
            fs::write(path, "{}\n").unwrap();
        }
        age(&stale, 30 * DAY);
        age(&recent, 2 * DAY);
        age(&unrelated, 30 * DAY);

        let mut writer =
            RollingFileWriter::new(&logs.join("log_out.log"), LogRotation::Daily, 7 * DAY).unwrap();
        writer.write_all(b"{\"msg\":\"\"}\n").unwrap();
        writer.flush().unwrap();

        assert!(!stale.exists());
        assert!(recent.exists());
        assert!(unrelated.exists());
        let current = logs.join(format!(
            "log_out.log.{}",
            chrono::Utc::now().format("%Y-%m-%d")
        ));
        assert_eq!(fs::read_to_string(current).unwrap(), "{\"msg\":\"\"}\n");
    }

    #[test]
    fn test_retention_runs_while_writing() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer =
            RollingFileWriter::new(&dir.path().join("svc.log"), LogRotation::Hourly, DAY).unwrap();
        let stale = dir.path().join("svc.log.2020-01-01-00");
        fs::write(&stale, "old\n").unwrap();
        age(&stale, 3 * DAY);

        writer.write_all(b"first\n").unwrap();
        assert!(stale.exists());

        writer.prune_period = Duration::ZERO;
        writer.write_all(b"second\n").unwrap();
        assert!(!stale.exists());
    }

    #[test]
    fn test_without_rotation_writes_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out.log");
        let mut writer = RollingFileWriter::new(&path, LogRotation::Never, Duration::ZERO).unwrap();
        writer.write_all(b"a\n").unwrap();
        writer.flush().unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "a\n");
        assert_eq!(fs::read_dir(path.parent().unwrap()).unwrap().count(), 1);
    }
}
