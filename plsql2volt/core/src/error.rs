use std::path::PathBuf;

use miette::Diagnostic;
use plsql2volt_catalog::error::CatalogError;
use plsql2volt_translator::error::TranslateError;
use smol_str::SmolStr;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to load the schema")]
    #[diagnostic(code(plsql2volt::schema))]
    Catalog(
        #[source]
        #[diagnostic_source]
        CatalogError,
    ),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] plsql_parser::error::Error),

    #[error("failed to translate procedure {procedure}")]
    #[diagnostic(code(plsql2volt::translate))]
    Translate {
        procedure: SmolStr,
        #[source]
        #[diagnostic_source]
        source: TranslateError,
    },

    #[error("failed to access {}", path.display())]
    #[diagnostic(code(plsql2volt::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to build the thread pool")]
    #[diagnostic(code(plsql2volt::thread_pool))]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
