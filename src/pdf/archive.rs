//! Local archive of downloaded PDFs
//!
//! Files are named `PDF_<%Y%m%d-%H%M%S>.pdf` after the local time of the
//! download. Bytes stream into a `<name>.pdf.part` sibling that is renamed
//! once the body is complete, so a failed download never leaves a file that
//! looks finished.

use std::path::{Path, PathBuf};

use chrono::Local;
use futures::StreamExt;
use reqwest::Client;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

use crate::error::TransportError;

const PART_SUFFIX: &str = ".part";

#[derive(Debug, Clone)]
pub struct PdfArchive {
    dir: PathBuf,
}

impl PdfArchive {
    /// The directory is created on the first download
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Fetch `url` into the archive and return the saved path
    pub async fn download(&self, client: &Client, url: &str) -> Result<PathBuf, TransportError> {
        let response = client
            .get(url)
            .send()
            .await
            .map_err(|e| TransportError::http(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        tokio::fs::create_dir_all(&self.dir).await?;
        let target = self.next_free_path();
        let part = part_path(&target);

        if let Err(e) = stream_to_file(response, url, &part).await {
            discard_part(&part).await;
            return Err(e);
        }
        commit_part(&part, &target).await?;

        debug!(url, path = %target.display(), "PDF archived");
        Ok(target)
    }

    /// Timestamped name, suffixed `_2`, `_3`, … when the second is taken
    fn next_free_path(&self) -> PathBuf {
        let stem = format!("PDF_{}", Local::now().format("%Y%m%d-%H%M%S"));
        let mut candidate = self.dir.join(format!("{stem}.pdf"));
        let mut n = 2;
        while candidate.exists() || part_path(&candidate).exists() {
            candidate = self.dir.join(format!("{stem}_{n}.pdf"));
            n += 1;
        }
        candidate
    }
}

fn part_path(target: &Path) -> PathBuf {
    let mut name = target.as_os_str().to_owned();
    name.push(PART_SUFFIX);
    PathBuf::from(name)
}

/// Move a complete `.part` file to its final name, removing it on failure
async fn commit_part(part: &Path, target: &Path) -> Result<(), TransportError> {
    if let Err(e) = tokio::fs::rename(part, target).await {
        discard_part(part).await;
        return Err(e.into());
    }
    Ok(())
}

async fn discard_part(part: &Path) {
    if let Err(e) = tokio::fs::remove_file(part).await
        && e.kind() != std::io::ErrorKind::NotFound
    {
        warn!("Failed to remove partial download {}: {}", part.display(), e);
    }
}

async fn stream_to_file(
    response: reqwest::Response,
    url: &str,
    path: &Path,
) -> Result<(), TransportError> {
    let mut file = tokio::fs::File::create(path).await?;
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| TransportError::http(url, e))?;
        file.write_all(&chunk).await?;
    }

    file.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colliding_names_get_a_suffix() {
        let dir = tempfile::tempdir().unwrap();
        let archive = PdfArchive::new(dir.path());

        let first = archive.next_free_path();
        std::fs::write(&first, b"%PDF").unwrap();
        let second = archive.next_free_path();

        assert_ne!(first, second);
        let name = second.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("PDF_") && name.ends_with(".pdf"));

        // Same second: the existing file's stem plus a counter
        let first_stem = first.file_stem().unwrap().to_string_lossy().into_owned();
        if name.starts_with(&first_stem) {
            assert_eq!(name, format!("{first_stem}_2.pdf"));
        }
    }

    #[tokio::test]
    async fn failed_rename_leaves_no_part_file() {
        let dir = tempfile::tempdir().unwrap();
        let part = dir.path().join("PDF_1.pdf.part");
        std::fs::write(&part, b"%PDF").unwrap();
        let target = dir.path().join("missing").join("PDF_1.pdf");

        let result = commit_part(&part, &target).await;

        assert!(matches!(result, Err(TransportError::Io(_))));
        assert!(!part.exists());
        assert!(std::fs::read_dir(dir.path()).unwrap().next().is_none());
    }

    #[test]
    fn part_file_sits_next_to_target() {
        let part = part_path(Path::new("/tmp/a/PDF_1.pdf"));
        assert_eq!(part, Path::new("/tmp/a/PDF_1.pdf.part"));
    }
}
