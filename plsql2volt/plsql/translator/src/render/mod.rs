//! Rendering of finalized artifacts into source files.

mod java;

use std::fmt::Debug;
use std::sync::Arc;

pub use java::JavaRenderer;

use crate::artifact::ProcedureArtifact;

pub type ArtifactRendererRef = Arc<dyn ArtifactRenderer>;

pub trait ArtifactRenderer: Debug + Send + Sync {
    /// Returns the extension of the files produced by this renderer, without the leading dot.
    fn file_extension(&self) -> &'static str;

    /// Renders `artifact` into the complete contents of one source file.
    fn render(&self, artifact: &ProcedureArtifact) -> String;
}
