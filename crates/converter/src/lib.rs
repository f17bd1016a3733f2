//! ucd2harness converter - turn UrbanCode Deploy exports into Harness
//! service and pipeline documents.

pub mod builders;
pub mod classify;
pub mod config;
pub mod driver;
pub mod inputs;
pub mod matcher;
pub mod output;
pub mod registry;
pub mod report;

pub use config::{ConverterConfig, GroupingStrategy, MatchMode, OutputFormat};
pub use driver::Converter;
pub use inputs::{discover_inputs, InputSelection};
pub use report::{ConversionReport, FileReport, FileStatus, ReportFormat, WrittenDocument};

use tracing::info;
use ucd2harness_common::{Error, Result};

/// Discover inputs and convert them with a registry loaded from `config`.
pub fn convert(config: ConverterConfig, selection: &InputSelection) -> Result<ConversionReport> {
    let inputs = discover_inputs(selection);
    if inputs.is_empty() {
        return Err(Error::NoInputFiles);
    }
    info!("Converting {} input file(s)", inputs.len());

    Converter::new(config).run(&inputs)
}
