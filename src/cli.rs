//! Command-line front end: argument definitions and the single run path.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::config;
use crate::pipeline::extraction::{
    ExtractionError, LabReport, LabReportExtractor, LayoutReader, PageDumpReader,
};
use crate::pipeline_config::{ConfigError, LayoutConfig};
use crate::reference::{ReferenceDatabase, BUILTIN_TESTS};
use crate::summary::PatientSummary;

#[derive(Parser, Debug)]
#[command(
    name = "labsum",
    version,
    about = "Extract test results from a lab report and summarize them",
    long_about = "Extract test results from a laboratory report and summarize them.\n\n\
                  INPUT is a JSON page dump ({\"pages\": [{\"text\": .., \"words\": [..]}]})\n\
                  or, when built with the `pdfium` feature, a PDF with a text layer."
)]
pub struct Cli {
    /// Report to read (.json page dump or .pdf).
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Reference range table (CSV with testname, lowvalue, uppervalue[, unit]).
    /// Defaults to test_and_values.csv next to INPUT when present.
    #[arg(long, value_name = "CSV")]
    pub reference: Option<PathBuf>,

    /// Layout heuristics overrides (JSON).
    #[arg(long, value_name = "JSON")]
    pub layout: Option<PathBuf>,

    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Debug logging.
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Text,
}

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Cannot read {0}: {1}")]
    Input(String, std::io::Error),

    #[error("Cannot encode output: {0}")]
    Output(serde_json::Error),
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    report: &'a LabReport,
    summary: &'a PatientSummary,
}

/// Run extraction for the parsed arguments and render the output.
pub fn execute(cli: &Cli) -> Result<String, CliError> {
    let layout = match &cli.layout {
        Some(path) => LayoutConfig::load(path)?,
        None => LayoutConfig::default(),
    };

    let reference_path = cli
        .reference
        .clone()
        .or_else(|| Some(config::default_reference_path(&cli.input)).filter(|p| p.is_file()));
    let db = ReferenceDatabase::build(BUILTIN_TESTS, reference_path.as_deref());

    let reader = reader_for(&cli.input, &layout)?;
    let bytes = std::fs::read(&cli.input).map_err(|e| CliError::Input(cli.input.display().to_string(), e))?;

    info!(input = %cli.input.display(), "Reading report");
    let report = LabReportExtractor::new(reader, db, layout).extract(&bytes)?;
    let summary = PatientSummary::build(&report);

    match cli.format {
        OutputFormat::Json => serde_json::to_string_pretty(&JsonOutput {
            report: &report,
            summary: &summary,
        })
        .map_err(CliError::Output),
        OutputFormat::Text => Ok(render_text(&report, &summary)),
    }
}

fn reader_for(input: &Path, layout: &LayoutConfig) -> Result<Box<dyn LayoutReader + Send + Sync>, ExtractionError> {
    let is_pdf = input
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("pdf"));

    if !is_pdf {
        return Ok(Box::new(PageDumpReader::new(layout)));
    }

    #[cfg(feature = "pdfium")]
    {
        Ok(Box::new(crate::pipeline::extraction::pdfium::PdfiumLayoutReader::new()?))
    }
    #[cfg(not(feature = "pdfium"))]
    {
        Err(ExtractionError::UnsupportedFormat(
            "PDF input needs a build with the `pdfium` feature".into(),
        ))
    }
}

/// Plain-text report for the terminal.
pub fn render_text(report: &LabReport, summary: &PatientSummary) -> String {
    let mut out = String::new();
    let info = &report.info;
    let _ = writeln!(out, "Patient:   {}", info.patient_name);
    let _ = writeln!(out, "Age/Sex:   {}", info.age_gender);
    let _ = writeln!(out, "Doctor:    {}", info.doctor);
    let _ = writeln!(out, "ID:        {}", info.treatment_id);
    let _ = writeln!(out, "Date:      {}", summary.report_date);
    out.push('\n');

    if report.results.is_empty() {
        out.push_str("No tests recognized.\n");
    } else {
        let width = report.results.iter().map(|r| r.name.len()).max().unwrap_or(0);
        for r in &report.results {
            let _ = writeln!(
                out,
                "{:<width$}  {:>10}  {:<24}  {}",
                r.name,
                r.value,
                r.range.trim_end(),
                r.status,
            );
        }
    }
    out.push('\n');

    let s = &summary.snapshot;
    let _ = writeln!(out, "Health score: {}/10 ({})", s.score, s.risk);
    let _ = writeln!(
        out,
        "Normal: {}  Mild: {}  Critical: {}",
        s.count_normal, s.count_mild, s.count_critical
    );
    out.push('\n');
    for line in &summary.narrative {
        let _ = writeln!(out, "{line}");
    }
    let _ = writeln!(out, "Next steps: {}", summary.next_steps);
    out
}
