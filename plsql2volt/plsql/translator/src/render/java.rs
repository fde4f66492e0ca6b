use itertools::Itertools;

use super::ArtifactRenderer;
use crate::artifact::{ArtifactHeader, ConstantField, ProcedureArtifact, RunMethod};
use crate::ir::{Block, FetchTarget, IrStatement};
use crate::registry::StatementRegistry;
use crate::target;

const INDENT: &str = "    ";

/// Renders artifacts as VoltDB stored procedure classes.
#[derive(Debug, Clone, Copy, Default)]
pub struct JavaRenderer;

impl ArtifactRenderer for JavaRenderer {
    fn file_extension(&self) -> &'static str {
        target::FILE_EXTENSION
    }

    fn render(&self, artifact: &ProcedureArtifact) -> String {
        let mut writer = SourceWriter::default();
        writer.header(&artifact.header);
        writer.line(format!(
            "public class {} extends VoltProcedure {{",
            artifact.header.class_name
        ));
        writer.indented(|writer| {
            writer.constants(&artifact.constants);
            writer.statements(&artifact.statements);
            writer.run_method(&artifact.method);
        });
        writer.line("}");
        writer.finish()
    }
}

#[derive(Debug, Default)]
struct SourceWriter {
    out: String,
    depth: usize,
}

impl SourceWriter {
    fn line(&mut self, text: impl AsRef<str>) {
        let text = text.as_ref();
        if !text.is_empty() {
            for _ in 0..self.depth {
                self.out.push_str(INDENT);
            }
            self.out.push_str(text);
        }
        self.out.push('\n');
    }

    fn blank(&mut self) {
        self.line("");
    }

    fn indented(&mut self, f: impl FnOnce(&mut Self)) {
        self.depth += 1;
        f(self);
        self.depth -= 1;
    }

    fn finish(self) -> String {
        self.out
    }

    fn header(&mut self, header: &ArtifactHeader) {
        self.line("/**");
        self.line(format!(" * {}", header.file_name));
        self.line(" *");
        self.line(" * Generated from PL/SQL code");
        self.line(" * by plsql2volt");
        if !header.generated_at.is_empty() {
            self.line(format!(" * on {}", header.generated_at));
        }
        self.line(" */");
        self.line(format!("package {};", header.package));
        self.blank();
        self.line("import org.voltdb.*;");
        self.blank();
    }

    fn constants(&mut self, constants: &[ConstantField]) {
        if constants.is_empty() {
            return;
        }
        self.blank();
        for constant in constants {
            let ty = target::type_name(constant.ty);
            match &constant.value {
                Some(value) => self.line(format!(
                    "public static final {ty} {} = {value};",
                    constant.name
                )),
                None => self.line(format!("public static final {ty} {};", constant.name)),
            }
        }
    }

    fn statements(&mut self, registry: &StatementRegistry) {
        for entry in registry.entries() {
            self.blank();
            self.line(format!("public final SQLStmt {} = new SQLStmt(", entry.name));
            self.indented(|writer| {
                let fragments = entry.literal_fragments();
                if fragments.is_empty() {
                    writer.line(format!("{});", target::string_literal("")));
                }
                let last = fragments.len().saturating_sub(1);
                for (index, fragment) in fragments.iter().enumerate() {
                    let lead = if index == 0 { "" } else { "+ " };
                    let tail = if index == last { ");" } else { "" };
                    writer.line(format!("{lead}{fragment}{tail}"));
                }
            });
        }
    }

    fn run_method(&mut self, method: &RunMethod) {
        let params = method
            .params
            .iter()
            .map(|param| format!("{} {}", target::type_name(param.ty), param.name))
            .join(", ");
        self.blank();
        self.line(format!(
            "public {} run({params}) {{",
            target::type_name(method.return_type)
        ));
        self.indented(|writer| {
            for statement in &method.prologue {
                writer.statement(statement);
            }
            writer.blank();
            writer.block_statements(&method.body);
        });
        self.line("}");
    }

    fn block_statements(&mut self, block: &Block) {
        for statement in block.statements() {
            self.statement(statement);
        }
    }

    fn nested(&mut self, opening: String, block: &Block) {
        self.line(opening);
        self.indented(|writer| writer.block_statements(block));
        self.line("}");
    }

    fn statement(&mut self, statement: &IrStatement) {
        match statement {
            IrStatement::VariableDecl { name, ty, init } => {
                let ty = target::type_name(*ty);
                match init {
                    Some(init) => self.line(format!("{ty} {name} = {init};")),
                    None => self.line(format!("{ty} {name};")),
                }
            }
            IrStatement::Assignment {
                target: variable,
                value,
            } => {
                self.line(format!("{variable} = {value};"));
            }
            IrStatement::Return { value } => self.line(format!("return {value};")),
            IrStatement::QueueStatement {
                statement,
                bindings,
            } => {
                let arguments = std::iter::once(statement).chain(bindings).join(", ");
                self.line(format!("{}({arguments});", target::QUEUE_SQL));
            }
            IrStatement::ExecuteAndFetch { target: fetch } => match fetch {
                None => self.line(format!("{};", target::EXECUTE_SQL)),
                Some(FetchTarget::Scalar(name)) => self.line(format!(
                    "{name} = {}[0].{};",
                    target::EXECUTE_SQL,
                    target::SCALAR_LONG
                )),
                Some(FetchTarget::Table(name)) => {
                    self.line(format!("{name} = {}[0];", target::EXECUTE_SQL));
                }
            },
            IrStatement::RowAdvance { table } => {
                self.line(format!("{table}.{};", target::ADVANCE_ROW));
            }
            IrStatement::FieldAssign {
                target: variable,
                table,
                column,
                ty,
            } => self.line(format!(
                "{variable} = {table}.{};",
                target::accessor(*ty, *column)
            )),
            IrStatement::IfThen {
                condition,
                then_block,
            } => self.nested(format!("if ({condition}) {{"), then_block),
            IrStatement::While { table, body } => {
                self.nested(format!("while ({table}.{}) {{", target::ADVANCE_ROW), body);
            }
            IrStatement::Comment { lines } => {
                for line in lines {
                    if line.is_empty() {
                        self.line(target::LINE_COMMENT);
                    } else {
                        self.line(format!("{} {line}", target::LINE_COMMENT));
                    }
                }
            }
            IrStatement::Block(block) => self.nested("{".to_string(), block),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::ValueType;

    fn render_statement(statement: &IrStatement) -> String {
        let mut writer = SourceWriter::default();
        writer.statement(statement);
        writer.finish()
    }

    #[test]
    fn test_fetch_statements() {
        let queue = IrStatement::QueueStatement {
            statement: "select0".into(),
            bindings: vec!["phone".into(), "contestant".into()],
        };
        assert_eq!(
            render_statement(&queue),
            "voltQueueSQL(select0, phone, contestant);\n"
        );
        let scalar = IrStatement::ExecuteAndFetch {
            target: Some(FetchTarget::Scalar("n".into())),
        };
        assert_eq!(
            render_statement(&scalar),
            "n = voltExecuteSQL()[0].asScalarLong();\n"
        );
        let discard = IrStatement::ExecuteAndFetch { target: None };
        assert_eq!(render_statement(&discard), "voltExecuteSQL();\n");
        let field = IrStatement::FieldAssign {
            target: "state".into(),
            table: "vt".into(),
            column: 1,
            ty: ValueType::String,
        };
        assert_eq!(render_statement(&field), "state = vt.getString(1);\n");
    }

    #[test]
    fn test_nested_blocks_are_indented() {
        let statement = IrStatement::While {
            table: "r".into(),
            body: Block::new(vec![
                IrStatement::Comment {
                    lines: vec!["count".into(), String::new()],
                },
                IrStatement::IfThen {
                    condition: "total > 1".into(),
                    then_block: Block::new(vec![IrStatement::Return {
                        value: "total".into(),
                    }]),
                },
            ]),
        };
        assert_eq!(
            render_statement(&statement),
            "while (r.advanceRow()) {\n    // count\n    //\n    if (total > 1) {\n        return total;\n    }\n}\n"
        );
    }
}
