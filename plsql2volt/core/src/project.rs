use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use itertools::Itertools;
use plsql2volt_catalog::memory::MemorySchemaCatalog;
use plsql2volt_translator::artifact::ProcedureArtifact;
use plsql2volt_translator::render::{ArtifactRendererRef, JavaRenderer};
use plsql2volt_translator::{EmitOptions, translate_procedure};
use plsql_parser::ast::{Comment, ProcedureDef};
use plsql_parser::parse_plsql;
use plsql_parser::span::Spanned;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{info, warn};

use crate::config::TranslatorConfig;
use crate::error::{Error, Result};
use crate::report::{FileReport, ProcedureOutcome, TranslationMetrics};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S %Z";

/// A translated procedure together with its rendered source text.
#[derive(Debug, Clone)]
pub struct TranslatedProcedure {
    pub artifact: ProcedureArtifact,
    pub rendered: String,
}

pub struct Project {
    schema: Arc<MemorySchemaCatalog>,
    config: TranslatorConfig,
    runtime: ThreadPool,
    renderer: ArtifactRendererRef,
}

impl Project {
    /// Loads the schema from the DDL script at `ddl_path`.
    pub fn open<P: AsRef<Path>>(ddl_path: P, config: TranslatorConfig) -> Result<Self> {
        let path = ddl_path.as_ref();
        let ddl = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_ddl(&ddl, config)
    }

    pub fn from_ddl(ddl: &str, config: TranslatorConfig) -> Result<Self> {
        let schema = plsql2volt_catalog::load(ddl).map_err(Error::Catalog)?;
        let runtime = ThreadPoolBuilder::new()
            .num_threads(config.num_threads)
            .build()?;
        Ok(Self {
            schema: Arc::new(schema),
            config,
            runtime,
            renderer: Arc::new(JavaRenderer),
        })
    }

    #[inline]
    pub fn config(&self) -> &TranslatorConfig {
        &self.config
    }

    /// Returns the directory generated files are written to.
    pub fn output_dir(&self) -> PathBuf {
        self.config.target_dir.join(&self.config.package)
    }

    /// Translates every procedure of `source` without writing any file.
    ///
    /// The outer error is a parse error of the whole source. Each procedure has its own result,
    /// in source order.
    #[tracing::instrument(level = "debug", skip(self, source))]
    pub fn translate_source(
        &self,
        name: &str,
        source: &str,
    ) -> Result<Vec<Result<TranslatedProcedure>>> {
        let file = parse_plsql(source)?;
        Ok(self.translate_procedures(source, &file.value().procedures, &file.value().comments))
    }

    /// Translates the source file at `path` and writes one file per translated procedure.
    ///
    /// Failures of single procedures, including failed writes, are recorded in the report.
    #[tracing::instrument(level = "debug", skip_all, fields(path = %path.as_ref().display()))]
    pub fn translate_file<P: AsRef<Path>>(&self, path: P) -> Result<FileReport> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;

        let start = Instant::now();
        let file = parse_plsql(&source)?;
        let parsing_time = start.elapsed();

        let start = Instant::now();
        let procedures = &file.value().procedures;
        let results = self.translate_procedures(&source, procedures, &file.value().comments);
        let translation_time = start.elapsed();

        let start = Instant::now();
        let outcomes = procedures
            .iter()
            .zip_eq(results)
            .map(|(procedure, result)| {
                let procedure = procedure.value().name.value().clone();
                match result.and_then(|translated| self.write(&translated)) {
                    Ok(path) => ProcedureOutcome::Written { procedure, path },
                    Err(error) => {
                        warn!(%procedure, %error, "failed to translate procedure");
                        ProcedureOutcome::Failed { procedure, error }
                    }
                }
            })
            .collect();
        let writing_time = start.elapsed();

        Ok(FileReport {
            file: path.to_path_buf(),
            procedures: outcomes,
            metrics: TranslationMetrics {
                parsing_time,
                translation_time,
                writing_time,
            },
        })
    }

    fn translate_procedures(
        &self,
        source: &str,
        procedures: &[Spanned<ProcedureDef>],
        comments: &[Spanned<Comment>],
    ) -> Vec<Result<TranslatedProcedure>> {
        let options = self.emit_options();
        let schema = self.schema.as_ref();
        self.runtime.install(|| {
            procedures
                .par_iter()
                .map(|procedure| {
                    let artifact =
                        translate_procedure(source, procedure, comments, schema, &options)
                            .map_err(|error| Error::Translate {
                                procedure: procedure.value().name.value().clone(),
                                source: error,
                            })?;
                    let rendered = self.renderer.render(&artifact);
                    Ok(TranslatedProcedure { artifact, rendered })
                })
                .collect()
        })
    }

    fn emit_options(&self) -> EmitOptions {
        EmitOptions {
            package: self.config.package.clone(),
            generated_at: chrono::Local::now().format(TIMESTAMP_FORMAT).to_string(),
            preserve_comments: self.config.preserve_comments,
        }
    }

    fn write(&self, translated: &TranslatedProcedure) -> Result<PathBuf> {
        let dir = self.output_dir();
        fs::create_dir_all(&dir).map_err(|e| Error::io(&dir, e))?;
        let path = dir.join(format!(
            "{}.{}",
            translated.artifact.header.class_name,
            self.renderer.file_extension()
        ));
        info!(path = %path.display(), "Writing file");
        fs::write(&path, &translated.rendered).map_err(|e| Error::io(&path, e))?;
        Ok(path)
    }
}
