//! Tab-separated output of sentence pairs.
//!
//! Each pair becomes one line, `en\tzh\n`. Tabs and line breaks inside a
//! field are flattened to a single space so every row keeps two columns.

use crate::models::SentencePair;
use std::path::Path;
use tokio::fs::File;
use tokio::io::{self, AsyncWrite, AsyncWriteExt, BufWriter};
use tracing::{debug, info, instrument};

/// Buffered TSV writer over any async sink.
pub struct TsvWriter<W> {
    inner: BufWriter<W>,
    rows: usize,
}

impl TsvWriter<File> {
    /// Create (or truncate) the output file at `path`.
    #[instrument(level = "info", skip_all, fields(path = %path.display()))]
    pub async fn create(path: &Path) -> io::Result<Self> {
        let file = File::create(path).await?;
        info!("Opened TSV output");
        Ok(Self::new(file))
    }
}

impl<W: AsyncWrite + Unpin> TsvWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner: BufWriter::new(inner),
            rows: 0,
        }
    }

    /// Append one row per pair. Returns the number of rows written.
    pub async fn write_pairs(&mut self, pairs: &[SentencePair]) -> io::Result<usize> {
        for pair in pairs {
            let line = format!("{}\t{}\n", sanitize_field(&pair.en), sanitize_field(&pair.zh));
            self.inner.write_all(line.as_bytes()).await?;
        }
        self.rows += pairs.len();
        Ok(pairs.len())
    }

    pub async fn flush(&mut self) -> io::Result<()> {
        self.inner.flush().await?;
        debug!(rows = self.rows, "Flushed TSV output");
        Ok(())
    }

    /// Rows written so far.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Flush and hand back the underlying sink.
    pub async fn into_inner(mut self) -> io::Result<W> {
        self.inner.flush().await?;
        Ok(self.inner.into_inner())
    }
}

fn sanitize_field(field: &str) -> String {
    field
        .split(['\t', '\r', '\n'])
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_field() {
        assert_eq!(sanitize_field("plain"), "plain");
        assert_eq!(sanitize_field("a\tb"), "a b");
        assert_eq!(sanitize_field("line one\r\nline two"), "line one line two");
        assert_eq!(sanitize_field(""), "");
    }

    #[tokio::test]
    async fn test_write_pairs_to_buffer() {
        let mut writer = TsvWriter::new(Vec::new());
        let written = writer
            .write_pairs(&[
                SentencePair::new("Hello.", "你好。"),
                SentencePair::new("Two\tcolumns", "两\n列"),
            ])
            .await
            .unwrap();
        assert_eq!(written, 2);
        assert_eq!(writer.rows(), 2);

        let bytes = writer.into_inner().await.unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "Hello.\t你好。\nTwo columns\t两 列\n"
        );
    }

    #[tokio::test]
    async fn test_create_truncates_existing_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("out.tsv");
        tokio::fs::write(&path, "stale\trow\n").await.unwrap();

        let mut writer = TsvWriter::create(&path).await.unwrap();
        writer
            .write_pairs(&[SentencePair::new("Fresh.", "新的。")])
            .await
            .unwrap();
        writer.flush().await.unwrap();

        let content = tokio::fs::read_to_string(&path).await.unwrap();
        assert_eq!(content, "Fresh.\t新的。\n");
    }
}
