//! CSV writer for the group export.

use crate::constants;
use crate::models::group::ExportRow;
use anyhow::{Context, Result};
use std::borrow::Cow;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes the fixed header on construction, then one line per row.
///
/// Every row is flushed as it is written so an interrupted run keeps the
/// rows completed so far.
pub struct CsvExporter<W: Write> {
    out: W,
    rows: usize,
}

impl CsvExporter<BufWriter<File>> {
    /// Create (or truncate) `path` and write the header.
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("create export file {}", path.display()))?;
        Self::new(BufWriter::new(file))
    }
}

impl<W: Write> CsvExporter<W> {
    pub fn new(out: W) -> Result<Self> {
        let mut exporter = Self { out, rows: 0 };
        exporter.write_record(&constants::CSV_HEADER)?;
        exporter.out.flush().context("flush export header")?;
        Ok(exporter)
    }

    pub fn write_row(&mut self, row: &ExportRow) -> Result<()> {
        self.write_record(&row.fields())?;
        self.out.flush().context("flush export row")?;
        self.rows += 1;
        Ok(())
    }

    /// Data rows written so far (the header is not counted).
    pub fn rows_written(&self) -> usize {
        self.rows
    }

    pub fn finish(mut self) -> Result<W> {
        self.out.flush().context("flush export")?;
        Ok(self.out)
    }

    fn write_record(&mut self, fields: &[&str]) -> Result<()> {
        let line = fields
            .iter()
            .map(|f| quote_field(f))
            .collect::<Vec<_>>()
            .join(",");
        self.out
            .write_all(line.as_bytes())
            .and_then(|_| self.out.write_all(b"\n"))
            .context("write export row")
    }
}

/// RFC 4180 quoting: wrap fields holding a delimiter, quote or line break.
fn quote_field(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\r', '\n']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn row(ns: &str, name: &str, policies: &str) -> ExportRow {
        ExportRow {
            namespace: ns.into(),
            group_name: name.into(),
            policies: policies.into(),
        }
    }

    fn render(rows: &[ExportRow]) -> String {
        let mut exporter = CsvExporter::new(Vec::new()).unwrap();
        for r in rows {
            exporter.write_row(r).unwrap();
        }
        String::from_utf8(exporter.finish().unwrap()).unwrap()
    }

    #[test]
    fn test_header_only() {
        assert_eq!(render(&[]), "namespace,AD group name,group policies\n");
    }

    #[test]
    fn test_plain_row() {
        let out = render(&[row("ns1", "Ops", "default")]);
        assert_eq!(out, "namespace,AD group name,group policies\nns1,Ops,default\n");
    }

    #[test]
    fn test_joined_policies_quoted() {
        let out = render(&[row("ns1", "Engineers", "admin, read")]);
        assert_eq!(
            out.lines().nth(1).unwrap(),
            r#"ns1,Engineers,"admin, read""#
        );
    }

    #[test]
    fn test_embedded_quotes_doubled() {
        assert_eq!(quote_field(r#"say "hi""#), r#""say ""hi""""#);
        assert_eq!(quote_field("plain"), "plain");
        assert_eq!(quote_field("two\nlines"), "\"two\nlines\"");
    }

    #[test]
    fn test_rows_keep_order() {
        let out = render(&[row("b", "g2", ""), row("a", "g1", "")]);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[1], "b,g2,");
        assert_eq!(lines[2], "a,g1,");
    }

    #[test]
    fn test_rows_written_counts_data_rows() {
        let mut exporter = CsvExporter::new(Vec::new()).unwrap();
        assert_eq!(exporter.rows_written(), 0);
        exporter.write_row(&row("ns1", "Ops", "")).unwrap();
        assert_eq!(exporter.rows_written(), 1);
    }

    #[test]
    fn test_create_writes_header_to_disk() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.csv");
        let mut exporter = CsvExporter::create(&path).unwrap();
        exporter.write_row(&row("ns1", "Ops", "read")).unwrap();
        // Rows are on disk before finish.
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "namespace,AD group name,group policies\nns1,Ops,read\n");
        exporter.finish().unwrap();
    }

    #[test]
    fn test_create_fails_in_missing_dir() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("out.csv");
        assert!(CsvExporter::create(&path).is_err());
    }
}
