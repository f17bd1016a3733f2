//! Batch conversion of UCD exports.

use crate::builders::{
    build_pipeline, build_service, build_stage, build_step_group, service_identifier, Scope,
};
use crate::classify::classify_component;
use crate::config::{ConverterConfig, GroupingStrategy};
use crate::matcher::{MatchContext, TemplateMatcher};
use crate::output::{render_pipeline, render_service, DocumentWriter, OutputLayout};
use crate::registry::{load_registry, LoadedRegistry, RegistryOrigin};
use crate::report::{ConversionReport, DocumentKind, FileReport};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use ucd2harness_common::{Error, Result};
use ucd2harness_naming::{sanitize_identifier, TagSet, UniqueIdentifiers};
use ucd2harness_schema::{ApplicationEntry, ExportDocument};

/// Read and parse one export file.
pub fn read_export(path: &Path) -> Result<ExportDocument> {
    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| Error::InvalidExport {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Documents produced for one application.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct ApplicationOutcome {
    services: usize,
    pipelines: usize,
}

/// Converts export files into Harness documents.
#[derive(Debug)]
pub struct Converter {
    config: ConverterConfig,
    scope: Scope,
    matcher: TemplateMatcher,
    registry_origin: RegistryOrigin,
}

impl Converter {
    /// Build a converter, loading the registry the configuration points at.
    pub fn new(config: ConverterConfig) -> Self {
        let loaded = load_registry(config.registry_path.as_deref());
        Self::with_registry(config, loaded)
    }

    pub fn with_registry(config: ConverterConfig, loaded: LoadedRegistry) -> Self {
        let matcher = TemplateMatcher::new(&loaded.registry, config.match_mode);
        debug!(
            "{} usable template rule(s) from {}",
            matcher.len(),
            loaded.origin
        );
        Self {
            scope: Scope::new(&config.org_identifier, &config.project_identifier),
            config,
            matcher,
            registry_origin: loaded.origin,
        }
    }

    /// Convert every input file.
    ///
    /// Files that cannot be read or parsed are skipped and reported. Write
    /// failures abort the run.
    pub fn run(&self, inputs: &[PathBuf]) -> Result<ConversionReport> {
        if inputs.is_empty() {
            return Err(Error::NoInputFiles);
        }

        let mut writer = DocumentWriter::new();
        let mut files = Vec::with_capacity(inputs.len());

        for path in inputs {
            let file_report = match read_export(path) {
                Ok(export) => self.convert_export(path, &export, &mut writer)?,
                Err(e) => {
                    warn!("Skipping {}: {}", path.display(), e);
                    FileReport::skipped(path.clone(), e.to_string())
                }
            };
            files.push(file_report);
        }

        let report = ConversionReport {
            out_dir: self.config.out_dir.clone(),
            registry: self.registry_origin.to_string(),
            files,
            documents: writer.into_documents(),
        };

        if report.applications() == 0 {
            info!("No applications found in input");
        }
        Ok(report)
    }

    /// Convert one parsed export.
    pub fn convert_export(
        &self,
        source: &Path,
        export: &ExportDocument,
        writer: &mut DocumentWriter,
    ) -> Result<FileReport> {
        let mut report = FileReport::converted(source.to_path_buf());

        for entry in &export.applications {
            let layout = OutputLayout::new(&self.group_root(source, entry));
            let outcome = self.convert_application(entry, &layout, writer)?;
            report.applications += 1;
            report.services += outcome.services;
            report.pipelines += outcome.pipelines;
        }

        info!(
            "Converted {}: {} application(s), {} service(s), {} pipeline(s)",
            source.display(),
            report.applications,
            report.services,
            report.pipelines
        );
        Ok(report)
    }

    fn group_root(&self, source: &Path, entry: &ApplicationEntry) -> PathBuf {
        let out = &self.config.out_dir;
        match self.config.grouping {
            GroupingStrategy::None => out.clone(),
            GroupingStrategy::File => {
                let stem = source
                    .file_stem()
                    .map(|s| s.to_string_lossy().to_string())
                    .unwrap_or_default();
                out.join(sanitize_identifier(&stem))
            }
            GroupingStrategy::Application => {
                out.join(sanitize_identifier(entry.application.display_name()))
            }
        }
    }

    fn convert_application(
        &self,
        entry: &ApplicationEntry,
        layout: &OutputLayout,
        writer: &mut DocumentWriter,
    ) -> Result<ApplicationOutcome> {
        let format = self.config.format;
        let app_name = entry.application.display_name();
        let app_tags = TagSet::parse(entry.application.tag_texts());

        let mut service_ids = UniqueIdentifiers::new();
        let mut stage_ids = UniqueIdentifiers::new();
        let mut stages = Vec::with_capacity(entry.components.len());

        for component in &entry.components {
            let component_name = component.display_name();
            let component_tags = TagSet::parse(component.tag_texts());
            let combined = app_tags.merged(&component_tags);

            let deployment_type = classify_component(
                app_name,
                component_name,
                &combined,
                self.config.fallback_type,
            )
            .deployment_type;

            let service_id = service_ids.claim(&service_identifier(app_name, component_name));
            let service = build_service(
                &service_id,
                component_name,
                &self.scope,
                &component_tags,
                deployment_type,
            );
            let content = render_service(&service, format)?;
            writer.write(
                DocumentKind::Service,
                &service_id,
                layout.service_path(&service_id, format),
                &content,
            )?;

            let ctx = MatchContext::new(app_name, component_name, &combined);
            let step_groups = self
                .matcher
                .match_rules(&ctx)
                .into_iter()
                .filter_map(build_step_group)
                .collect();

            let stage_id = stage_ids.claim(&sanitize_identifier(component_name));
            stages.push(build_stage(
                &stage_id,
                component_name,
                &service_id,
                deployment_type,
                step_groups,
            ));
        }

        let services = stages.len();
        if stages.is_empty() {
            info!("Application '{}' has no components, no pipeline generated", app_name);
            return Ok(ApplicationOutcome::default());
        }

        let pipeline = build_pipeline(app_name, &self.scope, &app_tags, stages);
        let pipeline_id = pipeline.pipeline.identifier.clone();
        let content = render_pipeline(&pipeline, format)?;
        writer.write(
            DocumentKind::Pipeline,
            &pipeline_id,
            layout.pipeline_path(&pipeline_id, format),
            &content,
        )?;

        debug!(
            "Application '{}' -> {} service(s), pipeline {}",
            app_name, services, pipeline_id
        );
        Ok(ApplicationOutcome {
            services,
            pipelines: 1,
        })
    }
}
