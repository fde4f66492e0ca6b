//! Lowering of parsed PL/SQL procedures into VoltDB stored procedures.
//!
//! [`translate_procedure`] runs the whole pipeline for one procedure: the declarations pass fills
//! a [`scope::Scope`], the lowering pass builds an [`ir`] tree while registering every embedded
//! SQL statement, and the result is finalized into a [`artifact::ProcedureArtifact`] that a
//! [`render::ArtifactRenderer`] turns into source text.

pub mod analyzer;
pub mod artifact;
mod emitter;
pub mod error;
pub mod formatter;
pub mod ir;
pub mod registry;
pub mod render;
pub mod rewrite;
pub mod scope;
pub mod target;
pub mod types;

pub use emitter::{EmitOptions, translate_procedure};
