//! Export of a run as CSV or JSON Lines.
//!
//! One record per sample: `iteration,x,y,inside,estimate,error`, iteration
//! being the same 0-based index the charts use.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::engine::EstimateRun;
use crate::error::{SimError, SimResult};

/// Export format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExportFormat {
    /// Comma separated values with a header row.
    Csv,
    /// JSON Lines (one JSON object per line).
    JsonLines,
}

impl ExportFormat {
    /// File extension for the format.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::JsonLines => "jsonl",
        }
    }

    /// Parse a command-line name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "csv" => Some(Self::Csv),
            "jsonl" | "json-lines" => Some(Self::JsonLines),
            _ => None,
        }
    }
}

/// One exported sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    /// 0-based iteration index.
    pub iteration: usize,
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
    /// Classification.
    pub inside: bool,
    /// Running estimate after this sample.
    pub estimate: f64,
    /// Running error after this sample.
    pub error: f64,
}

/// Per-sample records of a run, in iteration order.
fn records(run: &EstimateRun) -> impl Iterator<Item = RunRecord> + '_ {
    run.samples
        .iter()
        .zip(run.estimates.iter().zip(run.errors.iter()))
        .enumerate()
        .map(|(iteration, (sample, (&estimate, &error)))| RunRecord {
            iteration,
            x: sample.x,
            y: sample.y,
            inside: sample.inside,
            estimate,
            error,
        })
}

/// Writes runs to disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Exporter {
    format: ExportFormat,
}

impl Exporter {
    /// Create an exporter for `format`.
    #[must_use]
    pub const fn new(format: ExportFormat) -> Self {
        Self { format }
    }

    /// Configured format.
    #[must_use]
    pub const fn format(&self) -> ExportFormat {
        self.format
    }

    /// Export using the configured format.
    ///
    /// # Errors
    ///
    /// Returns error if file operations or serialization fail.
    pub fn export(&self, run: &EstimateRun, path: &Path) -> SimResult<()> {
        match self.format {
            ExportFormat::Csv => Self::to_csv(run, path),
            ExportFormat::JsonLines => Self::to_json_lines(run, path),
        }?;
        info!(path = %path.display(), records = run.len(), "run exported");
        Ok(())
    }

    /// Export to CSV.
    ///
    /// # Errors
    ///
    /// Returns error if file operations fail.
    pub fn to_csv(run: &EstimateRun, path: &Path) -> SimResult<()> {
        let file =
            File::create(path).map_err(|e| SimError::io(format!("Failed to create file: {e}")))?;
        let mut writer = BufWriter::new(file);

        writeln!(writer, "iteration,x,y,inside,estimate,error")
            .map_err(|e| SimError::io(format!("Write header failed: {e}")))?;
        for r in records(run) {
            writeln!(
                writer,
                "{},{},{},{},{},{}",
                r.iteration, r.x, r.y, r.inside, r.estimate, r.error
            )
            .map_err(|e| SimError::io(format!("Write data failed: {e}")))?;
        }

        writer
            .flush()
            .map_err(|e| SimError::io(format!("Flush failed: {e}")))
    }

    /// Export to JSON Lines.
    ///
    /// # Errors
    ///
    /// Returns error if file operations or serialization fail.
    pub fn to_json_lines(run: &EstimateRun, path: &Path) -> SimResult<()> {
        let file =
            File::create(path).map_err(|e| SimError::io(format!("Failed to create file: {e}")))?;
        let mut writer = BufWriter::new(file);

        for record in records(run) {
            let json = serde_json::to_string(&record)
                .map_err(|e| SimError::serialization(format!("JSON serialization failed: {e}")))?;
            writeln!(writer, "{json}").map_err(|e| SimError::io(format!("Write failed: {e}")))?;
        }

        writer
            .flush()
            .map_err(|e| SimError::io(format!("Flush failed: {e}")))
    }
}
