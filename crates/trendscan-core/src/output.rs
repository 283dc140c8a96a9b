//! Report sinks: a pretty JSON document and a flat CSV table.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::OutputConfig;
use crate::domain::ResultRecord;
use crate::error::CoreError;
use crate::report::Snapshot;

/// Paths of the files produced by one write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenReport {
    pub json_path: PathBuf,
    pub table_path: PathBuf,
    pub rows: usize,
}

pub struct ReportWriter {
    config: OutputConfig,
}

impl ReportWriter {
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    /// Writes both representations, creating the output directory first.
    ///
    /// A failed snapshot still produces a table file with only the header.
    pub fn write(&self, snapshot: &Snapshot) -> Result<WrittenReport, CoreError> {
        fs::create_dir_all(&self.config.directory)?;

        let json_path = self.config.json_path();
        write_json(&json_path, snapshot)?;

        let table_path = self.config.table_path();
        write_table(&table_path, snapshot.results())?;

        info!(
            json = %json_path.display(),
            table = %table_path.display(),
            "saved report"
        );

        Ok(WrittenReport {
            json_path,
            table_path,
            rows: snapshot.results().len(),
        })
    }
}

pub fn render_json(snapshot: &Snapshot) -> Result<String, CoreError> {
    Ok(serde_json::to_string_pretty(snapshot)?)
}

/// CSV with a header row followed by one row per record.
pub fn render_table<W: Write>(writer: W, rows: &[ResultRecord]) -> Result<(), CoreError> {
    let mut csv = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    csv.write_record(ResultRecord::COLUMNS)?;
    for row in rows {
        csv.serialize(row)?;
    }
    csv.flush()?;
    Ok(())
}

fn write_json(path: &Path, snapshot: &Snapshot) -> Result<(), CoreError> {
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(render_json(snapshot)?.as_bytes())?;
    writer.flush()?;
    Ok(())
}

fn write_table(path: &Path, rows: &[ResultRecord]) -> Result<(), CoreError> {
    render_table(BufWriter::new(File::create(path)?), rows)
}
