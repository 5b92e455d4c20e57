//! Output files: the per-run CSV and HTML artifacts.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;

/// Paths of the artifacts written for one run.
#[derive(Debug)]
pub struct OutputPaths {
    /// Delimited tabular file.
    pub csv: PathBuf,
    /// Self-contained HTML digest.
    pub html: PathBuf,
}

/// Writes the two date-stamped artifacts into the output directory.
pub struct OutputWriter {
    dir: PathBuf,
}

impl OutputWriter {
    /// Create a writer rooted at `dir`; the directory is created on write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The output directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write both artifacts for the given run date.
    pub fn write(&self, date: NaiveDate, csv: &str, html: &str) -> Result<OutputPaths> {
        std::fs::create_dir_all(&self.dir).with_context(|| {
            format!("failed to create output directory {}", self.dir.display())
        })?;

        let stem = format!("news_digest_{}", date.format("%Y-%m-%d"));
        let csv_path = self.dir.join(format!("{stem}.csv"));
        let html_path = self.dir.join(format!("{stem}.html"));

        std::fs::write(&csv_path, csv)
            .with_context(|| format!("failed to write {}", csv_path.display()))?;
        std::fs::write(&html_path, html)
            .with_context(|| format!("failed to write {}", html_path.display()))?;

        tracing::info!(
            csv = %csv_path.display(),
            html = %html_path.display(),
            "Wrote digest artifacts"
        );

        Ok(OutputPaths {
            csv: csv_path,
            html: html_path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 6).unwrap()
    }

    #[test]
    fn test_write_creates_directory_and_date_stamped_files() {
        let dir = tempfile::tempdir().unwrap();
        let writer = OutputWriter::new(dir.path().join("digests"));

        let paths = writer
            .write(run_date(), "title,url\n", "<html></html>")
            .unwrap();

        assert!(paths.csv.ends_with("news_digest_2026-08-06.csv"));
        assert!(paths.html.ends_with("news_digest_2026-08-06.html"));
        assert_eq!(std::fs::read_to_string(&paths.csv).unwrap(), "title,url\n");
        assert_eq!(
            std::fs::read_to_string(&paths.html).unwrap(),
            "<html></html>"
        );
    }

    #[test]
    fn test_write_overwrites_same_day_run() {
        let dir = tempfile::tempdir().unwrap();
        let writer = OutputWriter::new(dir.path());

        writer.write(run_date(), "first", "first").unwrap();
        let paths = writer.write(run_date(), "second", "second").unwrap();

        assert_eq!(std::fs::read_to_string(&paths.csv).unwrap(), "second");
    }
}
