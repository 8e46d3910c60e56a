//! Tail-polling reader for the run log

use std::io::{self, SeekFrom};
use std::path::{Path, PathBuf};
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncSeekExt};

use crate::cancel::CancelFlag;

/// Remembers how far into the log it has read
///
/// Only complete lines are returned; a trailing partial line is left for
/// the next poll. If the file shrinks (truncated or replaced) reading starts
/// over from the beginning.
#[derive(Debug)]
pub struct LogTail {
    path: PathBuf,
    offset: u64,
}

impl LogTail {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            offset: 0,
        }
    }

    /// Start at the current end of the file, skipping existing history
    pub async fn from_end(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        let offset = match tokio::fs::metadata(&path).await {
            Ok(meta) => meta.len(),
            Err(e) if e.kind() == io::ErrorKind::NotFound => 0,
            Err(e) => return Err(e),
        };
        Ok(Self { path, offset })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// New complete lines since the last poll; none if the file is missing
    pub async fn poll(&mut self) -> io::Result<Vec<String>> {
        let mut file = match tokio::fs::File::open(&self.path).await {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e),
        };

        let len = file.metadata().await?.len();
        if len < self.offset {
            self.offset = 0;
        }
        if len == self.offset {
            return Ok(Vec::new());
        }

        file.seek(SeekFrom::Start(self.offset)).await?;
        let mut buf = Vec::with_capacity((len - self.offset) as usize);
        file.read_to_end(&mut buf).await?;

        let Some(last_newline) = buf.iter().rposition(|&b| b == b'\n') else {
            return Ok(Vec::new());
        };
        let complete = &buf[..=last_newline];
        self.offset += complete.len() as u64;

        Ok(String::from_utf8_lossy(complete)
            .lines()
            .map(str::to_string)
            .collect())
    }

    /// Poll every `interval`, handing each new line to `on_line`, until
    /// `cancel` is set
    pub async fn follow<F>(
        &mut self,
        interval: Duration,
        cancel: &CancelFlag,
        mut on_line: F,
    ) -> io::Result<()>
    where
        F: FnMut(&str),
    {
        loop {
            for line in self.poll().await? {
                on_line(&line);
            }
            if cancel.is_cancelled() {
                return Ok(());
            }
            tokio::time::sleep(interval).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn returns_only_complete_new_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log_file.log");
        let mut tail = LogTail::new(&path);

        assert!(tail.poll().await.unwrap().is_empty());

        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, "first\nsecond\npart").unwrap();
        file.flush().unwrap();
        assert_eq!(tail.poll().await.unwrap(), vec!["first", "second"]);

        write!(file, "ial\n").unwrap();
        file.flush().unwrap();
        assert_eq!(tail.poll().await.unwrap(), vec!["partial"]);
        assert!(tail.poll().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn restarts_after_truncation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log_file.log");
        std::fs::write(&path, "old line one\nold line two\n").unwrap();

        let mut tail = LogTail::from_end(&path).await.unwrap();
        assert!(tail.poll().await.unwrap().is_empty());

        std::fs::write(&path, "new\n").unwrap();
        assert_eq!(tail.poll().await.unwrap(), vec!["new"]);
    }

    #[tokio::test]
    async fn follow_stops_when_cancelled() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log_file.log");
        std::fs::write(&path, "a\nb\n").unwrap();

        let cancel = CancelFlag::new();
        cancel.cancel();
        let mut seen = Vec::new();
        LogTail::new(&path)
            .follow(Duration::from_millis(10), &cancel, |line| {
                seen.push(line.to_string())
            })
            .await
            .unwrap();
        assert_eq!(seen, vec!["a", "b"]);
    }
}
