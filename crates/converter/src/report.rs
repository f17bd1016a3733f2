//! Conversion report and run summary.

use serde::Serialize;
use std::fmt::{self, Write as _};
use std::path::PathBuf;
use std::str::FromStr;
use ucd2harness_common::hash::short_digest;
use ucd2harness_common::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Service,
    Pipeline,
}

/// A document written to disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WrittenDocument {
    pub kind: DocumentKind,
    pub identifier: String,
    pub path: PathBuf,
    /// SHA-256 of the file contents.
    pub sha256: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    Converted,
    Skipped,
}

/// Outcome for one input file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub status: FileStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub applications: usize,
    pub services: usize,
    pub pipelines: usize,
}

impl FileReport {
    pub fn converted(path: PathBuf) -> Self {
        Self {
            path,
            status: FileStatus::Converted,
            reason: None,
            applications: 0,
            services: 0,
            pipelines: 0,
        }
    }

    pub fn skipped(path: PathBuf, reason: impl Into<String>) -> Self {
        Self {
            status: FileStatus::Skipped,
            reason: Some(reason.into()),
            ..Self::converted(path)
        }
    }

    pub fn is_skipped(&self) -> bool {
        self.status == FileStatus::Skipped
    }
}

/// How the run summary is printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportFormat::Text => write!(f, "text"),
            ReportFormat::Json => write!(f, "json"),
        }
    }
}

impl FromStr for ReportFormat {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            _ => Err(Error::Config(format!(
                "unknown summary format '{}' (expected text or json)",
                s
            ))),
        }
    }
}

/// Outcome of a whole run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConversionReport {
    pub out_dir: PathBuf,
    /// Where the template rules came from.
    pub registry: String,
    pub files: Vec<FileReport>,
    pub documents: Vec<WrittenDocument>,
}

impl ConversionReport {
    pub fn applications(&self) -> usize {
        self.files.iter().map(|f| f.applications).sum()
    }

    pub fn services(&self) -> usize {
        self.files.iter().map(|f| f.services).sum()
    }

    pub fn pipelines(&self) -> usize {
        self.files.iter().map(|f| f.pipelines).sum()
    }

    pub fn skipped(&self) -> usize {
        self.files.iter().filter(|f| f.is_skipped()).count()
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();
        // Writing to a String cannot fail
        let _ = self.write_text(&mut out);
        out
    }

    fn write_text(&self, out: &mut String) -> std::fmt::Result {
        writeln!(out, "=== UCD to Harness Conversion ===")?;
        writeln!(out)?;
        writeln!(out, "Output:   {}", self.out_dir.display())?;
        writeln!(out, "Registry: {}", self.registry)?;
        writeln!(out)?;

        writeln!(out, "{:-<80}", "")?;
        writeln!(
            out,
            "{:<40} {:>10} {:>8} {:>9} {:>9}",
            "File", "Status", "Apps", "Services", "Pipelines"
        )?;
        writeln!(out, "{:-<80}", "")?;
        for file in &self.files {
            let name = file.path.display().to_string();
            let status = if file.is_skipped() { "SKIPPED" } else { "OK" };
            writeln!(
                out,
                "{:<40} {:>10} {:>8} {:>9} {:>9}",
                truncate_left(&name, 40),
                status,
                file.applications,
                file.services,
                file.pipelines
            )?;
        }
        writeln!(out, "{:-<80}", "")?;

        let skipped: Vec<_> = self.files.iter().filter(|f| f.is_skipped()).collect();
        if !skipped.is_empty() {
            writeln!(out)?;
            writeln!(out, "Skipped:")?;
            for file in skipped {
                let reason = file.reason.as_deref().unwrap_or("unknown reason");
                writeln!(out, "  {}: {}", file.path.display(), reason)?;
            }
        }

        if !self.documents.is_empty() {
            writeln!(out)?;
            writeln!(out, "Documents:")?;
            for doc in &self.documents {
                writeln!(
                    out,
                    "  {}  {}",
                    short_digest(&doc.sha256),
                    doc.path.display()
                )?;
            }
        }

        writeln!(out)?;
        if self.applications() == 0 {
            writeln!(out, "No applications found in input.")?;
        }
        writeln!(
            out,
            "Converted {} application(s): {} service(s), {} pipeline(s) from {} file(s), {} skipped",
            self.applications(),
            self.services(),
            self.pipelines(),
            self.files.len(),
            self.skipped()
        )?;
        Ok(())
    }

    pub fn render_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(Error::from)
    }

    /// Summary in `format`, newline terminated.
    pub fn render(&self, format: ReportFormat) -> Result<String> {
        match format {
            ReportFormat::Text => Ok(self.render_text()),
            ReportFormat::Json => {
                let mut json = self.render_json()?;
                json.push('\n');
                Ok(json)
            }
        }
    }
}

/// Keep the tail of long paths, which is the informative part.
fn truncate_left(s: &str, width: usize) -> String {
    let count = s.chars().count();
    if count <= width {
        return s.to_string();
    }
    let tail: String = s.chars().skip(count - width + 3).collect();
    format!("...{}", tail)
}
