//! The namespace → group → detail crawl feeding the CSV export.
//!
//! Failures are scoped: a failed group listing skips its namespace, a failed
//! detail read skips its group. Only an empty namespace set aborts the run,
//! and it does so before the output file is created.

use crate::core::client::GroupDirectory;
use crate::core::export::CsvExporter;
use crate::models::group::{ExportRow, ResolvedGroup};
use anyhow::{bail, Result};
use std::io::Write;
use std::path::Path;
use std::thread;
use std::time::Duration;
use tracing::{info, warn};

#[derive(Debug, Clone, Default)]
pub struct CrawlOptions {
    /// Pause after each namespace. Zero disables pacing.
    pub pause: Duration,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamespaceSummary {
    pub namespace: String,
    pub groups_listed: usize,
    pub rows_written: usize,
    pub failed_groups: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlSummary {
    pub namespaces: Vec<NamespaceSummary>,
}

impl CrawlSummary {
    pub fn total_rows(&self) -> usize {
        self.namespaces.iter().map(|n| n.rows_written).sum()
    }

    pub fn total_failed(&self) -> usize {
        self.namespaces.iter().map(|n| n.failed_groups).sum()
    }
}

/// List namespaces, logging and returning an empty set on failure.
pub fn enumerate_namespaces(dir: &dyn GroupDirectory) -> Vec<String> {
    match dir.list_namespaces() {
        Ok(namespaces) => namespaces,
        Err(e) => {
            warn!("Error fetching namespaces: {}", e);
            Vec::new()
        }
    }
}

/// List group ids in `namespace`, logging and returning an empty set on failure.
pub fn enumerate_groups(dir: &dyn GroupDirectory, namespace: &str) -> Vec<String> {
    match dir.list_groups(namespace) {
        Ok(groups) => groups,
        Err(e) => {
            warn!("Error fetching groups for namespace '{}': {}", namespace, e);
            Vec::new()
        }
    }
}

/// Read and resolve one group, or `None` (logged) if the read failed.
pub fn fetch_group(
    dir: &dyn GroupDirectory,
    namespace: &str,
    group_id: &str,
) -> Option<ResolvedGroup> {
    match dir.read_group(namespace, group_id) {
        Ok(record) => Some(record.resolve(group_id)),
        Err(e) => {
            warn!(
                "Error fetching details for group '{}' in namespace '{}': {}",
                group_id, namespace, e
            );
            None
        }
    }
}

/// Walk `namespaces` in order, writing one row per resolved group.
pub fn export_namespaces<W: Write>(
    dir: &dyn GroupDirectory,
    namespaces: &[String],
    exporter: &mut CsvExporter<W>,
    opts: &CrawlOptions,
) -> Result<CrawlSummary> {
    let mut summary = CrawlSummary::default();

    for namespace in namespaces {
        info!("Processing namespace: {}", namespace);
        let groups = enumerate_groups(dir, namespace);
        let mut ns_summary = NamespaceSummary {
            namespace: namespace.clone(),
            groups_listed: groups.len(),
            ..Default::default()
        };

        if groups.is_empty() {
            info!("No groups found in namespace '{}'", namespace);
        }

        for group_id in &groups {
            match fetch_group(dir, namespace, group_id) {
                Some(group) => {
                    exporter.write_row(&ExportRow::new(namespace, group))?;
                    ns_summary.rows_written += 1;
                }
                None => ns_summary.failed_groups += 1,
            }
        }

        summary.namespaces.push(ns_summary);
        pause(opts.pause);
    }

    Ok(summary)
}

/// Full run: enumerate namespaces, then create `output` and export.
pub fn run_export(
    dir: &dyn GroupDirectory,
    output: &Path,
    opts: &CrawlOptions,
) -> Result<CrawlSummary> {
    let namespaces = enumerate_namespaces(dir);
    if namespaces.is_empty() {
        bail!("no namespaces found; nothing to export");
    }
    info!("Found {} namespaces", namespaces.len());

    let mut exporter = CsvExporter::create(output)?;
    let summary = export_namespaces(dir, &namespaces, &mut exporter, opts)?;
    exporter.finish()?;
    Ok(summary)
}

fn pause(d: Duration) {
    if !d.is_zero() {
        thread::sleep(d);
    }
}
