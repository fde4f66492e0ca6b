use std::path::PathBuf;
use std::time::Duration;

use smol_str::SmolStr;

use crate::error::Error;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TranslationMetrics {
    pub(crate) parsing_time: Duration,
    pub(crate) translation_time: Duration,
    pub(crate) writing_time: Duration,
}

impl TranslationMetrics {
    /// Returns the time taken to parse the source file.
    #[inline]
    pub fn parsing_time(&self) -> Duration {
        self.parsing_time
    }

    /// Returns the time taken to translate and render all procedures of the file.
    #[inline]
    pub fn translation_time(&self) -> Duration {
        self.translation_time
    }

    /// Returns the time taken to write the generated files.
    #[inline]
    pub fn writing_time(&self) -> Duration {
        self.writing_time
    }

    #[inline]
    pub fn total_time(&self) -> Duration {
        self.parsing_time + self.translation_time + self.writing_time
    }
}

/// What happened to one procedure of a source file.
#[derive(Debug)]
pub enum ProcedureOutcome {
    Written { procedure: SmolStr, path: PathBuf },
    Failed { procedure: SmolStr, error: Error },
}

impl ProcedureOutcome {
    #[inline]
    pub fn procedure(&self) -> &SmolStr {
        match self {
            ProcedureOutcome::Written { procedure, .. }
            | ProcedureOutcome::Failed { procedure, .. } => procedure,
        }
    }

    #[inline]
    pub fn is_failure(&self) -> bool {
        matches!(self, ProcedureOutcome::Failed { .. })
    }
}

/// The result of translating one source file, with one outcome per procedure in source order.
#[derive(Debug)]
pub struct FileReport {
    pub(crate) file: PathBuf,
    pub(crate) procedures: Vec<ProcedureOutcome>,
    pub(crate) metrics: TranslationMetrics,
}

impl FileReport {
    #[inline]
    pub fn file(&self) -> &PathBuf {
        &self.file
    }

    #[inline]
    pub fn procedures(&self) -> &[ProcedureOutcome] {
        &self.procedures
    }

    #[inline]
    pub fn metrics(&self) -> &TranslationMetrics {
        &self.metrics
    }

    pub fn has_failures(&self) -> bool {
        self.procedures.iter().any(ProcedureOutcome::is_failure)
    }

    /// Returns the errors of failed procedures.
    pub fn failures(&self) -> impl Iterator<Item = &Error> {
        self.procedures.iter().filter_map(|outcome| match outcome {
            ProcedureOutcome::Failed { error, .. } => Some(error),
            ProcedureOutcome::Written { .. } => None,
        })
    }

    pub fn into_procedures(self) -> Vec<ProcedureOutcome> {
        self.procedures
    }
}
