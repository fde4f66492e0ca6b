//! Translation of a parsed procedure into a [`ProcedureArtifact`].
//!
//! Translation runs in two passes. The declarations pass populates the global layer of a
//! [`Scope`] from the parameters and declarations. The lowering pass walks the body and builds
//! the IR bottom-up: every nested block is lowered completely before the statement owning it is
//! emitted into the enclosing block.

mod declare;
mod finalize;
mod lower;

use plsql2volt_catalog::provider::SchemaProvider;
use plsql_parser::ast::{Comment, ProcedureDef};
use plsql_parser::span::Spanned;
use smol_str::SmolStr;

use crate::analyzer::SqlAnalyzer;
use crate::artifact::ProcedureArtifact;
use crate::error::TranslateResult;
use crate::ir::{Block, IrStatement};
use crate::registry::StatementRegistry;
use crate::scope::Scope;
use crate::types::TypeTranslator;

#[derive(Debug, Clone)]
pub struct EmitOptions {
    /// The Java package of the generated class.
    pub package: String,
    /// Timestamp written into the banner of the generated file. The banner has no timestamp
    /// line when empty.
    pub generated_at: String,
    /// Whether comments in procedure bodies are carried over.
    pub preserve_comments: bool,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            package: "my_pkg".to_string(),
            generated_at: String::new(),
            preserve_comments: true,
        }
    }
}

/// Translates one procedure of `source`.
///
/// `comments` are the comments of the whole source file in source order. Those between the
/// statements of the procedure body are carried over into the generated code.
///
/// # Errors
/// Any error aborts the translation of this procedure only; no partial artifact is produced.
#[tracing::instrument(
    level = "debug",
    skip_all,
    fields(procedure = %procedure.value().name.value())
)]
pub fn translate_procedure(
    source: &str,
    procedure: &Spanned<ProcedureDef>,
    comments: &[Spanned<Comment>],
    schema: &dyn SchemaProvider,
    options: &EmitOptions,
) -> TranslateResult<ProcedureArtifact> {
    let emitter = Emitter::new(source, schema, comments, options);
    let procedure = procedure.value();
    let mut scope = Scope::new();
    let declarations = emitter.declare(procedure, &mut scope)?;
    let mut context = TranslationContext::new(scope, declarations.output.name.clone());
    let body = emitter.lower_body(&mut context, &procedure.body)?;
    emitter.finalize(procedure, declarations, context, body)
}

#[derive(Debug)]
struct Emitter<'a> {
    source: &'a str,
    comments: &'a [Spanned<Comment>],
    options: &'a EmitOptions,
    types: TypeTranslator<'a>,
    analyzer: SqlAnalyzer<'a>,
}

impl<'a> Emitter<'a> {
    fn new(
        source: &'a str,
        schema: &'a dyn SchemaProvider,
        comments: &'a [Spanned<Comment>],
        options: &'a EmitOptions,
    ) -> Self {
        Self {
            source,
            comments,
            options,
            types: TypeTranslator::new(schema),
            analyzer: SqlAnalyzer::new(source, schema, comments),
        }
    }
}

/// Mutable state of the lowering pass.
#[derive(Debug)]
struct TranslationContext {
    scope: Scope,
    /// Open blocks, innermost last. Lowered statements are emitted into the innermost one.
    blocks: Vec<Block>,
    registry: StatementRegistry,
    output: SmolStr,
}

impl TranslationContext {
    fn new(scope: Scope, output: SmolStr) -> Self {
        Self {
            scope,
            blocks: Vec::new(),
            registry: StatementRegistry::new(),
            output,
        }
    }

    fn open_block(&mut self) {
        self.blocks.push(Block::default());
    }

    fn close_block(&mut self) -> Block {
        self.blocks.pop().unwrap_or_default()
    }

    fn emit(&mut self, statement: IrStatement) {
        if let Some(block) = self.blocks.last_mut() {
            block.push(statement);
        }
    }
}
