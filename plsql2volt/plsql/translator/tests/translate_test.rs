use plsql2volt_catalog::memory::MemorySchemaCatalog;
use plsql2volt_translator::artifact::ProcedureArtifact;
use plsql2volt_translator::error::{AnalysisError, ScopeError, TranslateError, TranslateResult};
use plsql2volt_translator::ir::{FetchTarget, IrStatement};
use plsql2volt_translator::render::{ArtifactRenderer, JavaRenderer};
use plsql2volt_translator::{EmitOptions, translate_procedure};
use plsql_parser::parse_plsql;

const VOTER_DDL: &str = include_str!("../../resources/ddl/voter-ddl.sql");
const VOTE: &str = include_str!("../../resources/plsql/vote.pls");
const LEADERBOARD: &str = include_str!("../../resources/plsql/leaderboard.pls");

fn catalog() -> MemorySchemaCatalog {
    plsql2volt_catalog::load(VOTER_DDL).unwrap()
}

fn options() -> EmitOptions {
    EmitOptions {
        generated_at: "2024-01-01 00:00:00 UTC".to_string(),
        ..Default::default()
    }
}

fn translate_all(source: &str) -> Vec<TranslateResult<ProcedureArtifact>> {
    let file = parse_plsql(source).unwrap();
    let catalog = catalog();
    let options = options();
    file.value()
        .procedures
        .iter()
        .map(|procedure| {
            translate_procedure(
                source,
                procedure,
                &file.value().comments,
                &catalog,
                &options,
            )
        })
        .collect()
}

fn translate(source: &str) -> TranslateResult<ProcedureArtifact> {
    translate_all(source).into_iter().next().unwrap()
}

fn body_of(procedure: &str) -> String {
    format!("procedure p(r out integer) is\n  n integer;\n  s varchar2(10);\nbegin\n{procedure}\nend;")
}

#[test]
fn translate_vote() {
    let artifact = translate(VOTE).unwrap();
    assert_eq!(artifact.header.class_name, "vote");
    assert_eq!(artifact.header.file_name, "vote.java");

    let names: Vec<_> = artifact
        .statements
        .entries()
        .iter()
        .map(|entry| entry.name.as_str())
        .collect();
    assert_eq!(names, ["select0", "select1", "select2", "insert0"]);
    assert_eq!(
        artifact.statements.entries()[1].text,
        "SELECT COUNT(*) FROM votes WHERE phone_number = ?"
    );

    let body = artifact.method.body.statements();
    assert_eq!(body[0], IrStatement::QueueStatement {
        statement: "select0".into(),
        bindings: vec!["contestant".into()],
    });
    assert_eq!(body[1], IrStatement::ExecuteAndFetch {
        target: Some(FetchTarget::Scalar("num_contestants".into())),
    });
    assert!(artifact.method.body.ends_with_return());
}

#[test]
fn render_vote() {
    let artifact = translate(VOTE).unwrap();
    insta::assert_snapshot!(JavaRenderer.render(&artifact), @r#"
    /**
     * vote.java
     *
     * Generated from PL/SQL code
     * by plsql2volt
     * on 2024-01-01 00:00:00 UTC
     */
    package my_pkg;

    import org.voltdb.*;

    public class vote extends VoltProcedure {

        public static final long VOTE_SUCCESSFUL = 0;
        public static final long ERR_INVALID_CONTESTANT = 1;
        public static final long ERR_VOTER_OVER_VOTE_LIMIT = 2;

        public final SQLStmt select0 = new SQLStmt(
            "SELECT COUNT(*) "
            + "FROM contestants "
            + "WHERE contestant_number = ?");

        public final SQLStmt select1 = new SQLStmt(
            "SELECT COUNT(*) FROM votes WHERE phone_number = ?");

        public final SQLStmt select2 = new SQLStmt(
            "SELECT state FROM area_code_state WHERE area_code = ? / 10000000");

        public final SQLStmt insert0 = new SQLStmt(
            "INSERT INTO votes (phone_number, state, contestant_number) "
            + "VALUES (?, ?, ?)");

        public long run(long phone, long contestant, long max_votes) {
            long result;
            VoltTable vt;
            long num_contestants;
            long num_votes;
            String voter_state;

            voltQueueSQL(select0, contestant);
            num_contestants = voltExecuteSQL()[0].asScalarLong();
            if (num_contestants == 0) {
                result = ERR_INVALID_CONTESTANT;
                return result;
            }
            voltQueueSQL(select1, phone);
            num_votes = voltExecuteSQL()[0].asScalarLong();
            if (num_votes >= max_votes) {
                result = ERR_VOTER_OVER_VOTE_LIMIT;
                return result;
            }
            // Look up the state of the caller.
            voltQueueSQL(select2, phone);
            vt = voltExecuteSQL()[0];
            vt.advanceRow();
            voter_state = vt.getString(0);
            voltQueueSQL(insert0, phone, voter_state, contestant);
            voltExecuteSQL();
            result = VOTE_SUCCESSFUL;
            return result;
        }
    }
    "#);
}

#[test]
fn render_cursor_loops() {
    let rendered: Vec<_> = translate_all(LEADERBOARD)
        .into_iter()
        .map(|artifact| JavaRenderer.render(&artifact.unwrap()))
        .collect();
    assert_eq!(rendered.len(), 2);
    assert!(rendered[0].contains(
        "        while (r.advanceRow()) {\n            // Only votes from Massachusetts count twice.\n            if (r.getString(1) == \"MA\") {\n"
    ));
    assert!(rendered[0].contains("            if (r.getString(1) != \"MA\") {\n"));
    assert!(rendered[0].ends_with("        }\n        return total;\n    }\n}\n"));
    insta::assert_snapshot!(rendered[1], @r#"
    /**
     * contestant_name.java
     *
     * Generated from PL/SQL code
     * by plsql2volt
     * on 2024-01-01 00:00:00 UTC
     */
    package my_pkg;

    import org.voltdb.*;

    public class contestant_name extends VoltProcedure {

        public final SQLStmt select0 = new SQLStmt(
            "SELECT contestant_name FROM contestants WHERE contestant_number = ?");

        public String run(long contestant) {
            String name;
            VoltTable vt;

            VoltTable c;
            voltQueueSQL(select0, contestant);
            c = voltExecuteSQL()[0];
            while (c.advanceRow()) {
                name = c.getString(0);
            }
            return name;
        }
    }
    "#);
}

fn render(source: &str) -> String {
    JavaRenderer.render(&translate(source).unwrap())
}

#[test]
fn loop_rows_are_scoped_to_their_loop() {
    let source = body_of(
        &[
            "  for c in (select contestant_number, contestant_name from contestants) loop",
            "    for c in (select state from votes) loop",
            "      s := c.state;",
            "    end loop;",
            "    s := c.contestant_name;",
            "  end loop;",
            "  s := c.contestant_name;",
        ]
        .join("\n"),
    );
    let rendered = render(&source);
    assert!(rendered.contains("\n                s = c.getString(0);\n"));
    assert!(rendered.contains("\n            s = c.getString(1);\n"));
    assert!(rendered.contains("\n        s = c.contestant_name;\n"));

    let shadowed = body_of(
        &[
            "  for c in (select contestant_number, contestant_name from contestants) loop",
            "    for c in (select state from votes) loop",
            "      s := c.contestant_name;",
            "    end loop;",
            "  end loop;",
        ]
        .join("\n"),
    );
    assert!(matches!(
        translate(&shadowed),
        Err(TranslateError::UnknownField { row, field })
            if row == "c" && field == "contestant_name"
    ));
}

#[test]
fn select_into_several_variables() {
    let source = body_of(
        "  select contestant_name, contestant_number into s, n\n    \
         from contestants where contestant_number = 1;",
    );
    let artifact = translate(&source).unwrap();
    let body = artifact.method.body.statements();
    assert_eq!(body[1], IrStatement::ExecuteAndFetch {
        target: Some(FetchTarget::Table("vt".into())),
    });
    assert!(matches!(&body[2], IrStatement::RowAdvance { table } if table == "vt"));

    let rendered = JavaRenderer.render(&artifact);
    assert!(rendered.contains(
        "        voltQueueSQL(select0);\n        vt = voltExecuteSQL()[0];\n        \
         vt.advanceRow();\n        s = vt.getString(0);\n        n = vt.getLong(1);\n"
    ));
}

#[test]
fn nested_blocks() {
    let source = body_of(
        &[
            "  begin",
            "    -- inner",
            "    r := 1;",
            "  end;",
            "  begin",
            "    return;",
            "  end;",
        ]
        .join("\n"),
    );
    let artifact = translate(&source).unwrap();
    let body = artifact.method.body.statements();
    assert_eq!(body.len(), 2);
    assert!(body.iter().all(|statement| matches!(statement, IrStatement::Block(_))));
    assert!(artifact.method.body.ends_with_return());

    let rendered = JavaRenderer.render(&artifact);
    assert!(rendered.contains(
        "        {\n            // inner\n            r = 1;\n        }\n        {\n            return r;\n        }\n    }\n}\n"
    ));
}

#[test]
fn banner_without_timestamp() {
    let source = "procedure p(r out integer) is begin r := 1; end;";
    let file = parse_plsql(source).unwrap();
    let artifact = translate_procedure(
        source,
        &file.value().procedures[0],
        &file.value().comments,
        &catalog(),
        &EmitOptions::default(),
    )
    .unwrap();
    assert!(JavaRenderer.render(&artifact).starts_with(
        "/**\n * p.java\n *\n * Generated from PL/SQL code\n * by plsql2volt\n */\npackage my_pkg;\n"
    ));
}

#[test]
fn identical_statements_are_registered_twice() {
    let source = body_of(
        "  select count(*) into n from votes;\n  select count(*) into n from votes;\n  r := n;",
    );
    let artifact = translate(&source).unwrap();
    let entries = artifact.statements.entries();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].name, "select0");
    assert_eq!(entries[1].name, "select1");
    assert_eq!(entries[0].text, entries[1].text);
}

#[test]
fn comments_can_be_dropped() {
    let file = parse_plsql(VOTE).unwrap();
    let options = EmitOptions {
        preserve_comments: false,
        ..options()
    };
    let artifact = translate_procedure(
        VOTE,
        &file.value().procedures[0],
        &file.value().comments,
        &catalog(),
        &options,
    )
    .unwrap();
    assert!(
        !artifact
            .method
            .body
            .statements()
            .iter()
            .any(|statement| matches!(statement, IrStatement::Comment { .. }))
    );
}

#[test]
fn report_scope_errors() {
    assert!(matches!(
        translate("procedure p(a in integer) is begin null; end;"),
        Err(TranslateError::Scope(ScopeError::MissingOutputParam(name))) if name == "p"
    ));
    assert!(matches!(
        translate("procedure p(a in out integer) is begin null; end;"),
        Err(TranslateError::Scope(ScopeError::UnsupportedParam(name))) if name == "a"
    ));
    assert!(matches!(
        translate("procedure p(a out integer, b out integer) is begin null; end;"),
        Err(TranslateError::Scope(ScopeError::DuplicateOutputParam(name))) if name == "b"
    ));
    assert!(matches!(
        translate("procedure p(a out integer) is begin null; end q;"),
        Err(TranslateError::Scope(ScopeError::MismatchedEnd { .. }))
    ));
}

#[test]
fn report_analysis_errors() {
    assert!(matches!(
        translate(&body_of("  select count(*) from votes;")),
        Err(TranslateError::Analysis(AnalysisError::MissingInto { .. }))
    ));
    assert!(matches!(
        translate(&body_of("  select state, phone_number into s from votes;")),
        Err(TranslateError::Analysis(AnalysisError::BindingCount {
            bindings: 1,
            columns: 2,
            ..
        }))
    ));
    assert!(matches!(
        translate(&body_of("  select state into missing from votes;")),
        Err(TranslateError::Analysis(AnalysisError::UnknownTarget(name))) if name == "missing"
    ));
    assert!(matches!(
        translate(&body_of("  select nothing into n from votes;")),
        Err(TranslateError::Analysis(AnalysisError::Plan { .. }))
    ));
}

#[test]
fn report_unknown_row_field() {
    let source = body_of("  for x in (select state from votes) loop\n    s := x.city;\n  end loop;");
    assert!(matches!(
        translate(&source),
        Err(TranslateError::UnknownField { row, field }) if row == "x" && field == "city"
    ));
}

#[test]
fn report_unsupported_constructs() {
    let elsif = body_of("  if n = 1 then r := 1; elsif n = 2 then r := 2; end if;");
    assert!(matches!(
        translate(&elsif),
        Err(TranslateError::NotImplemented(_))
    ));
    let value = body_of("  return 1;");
    assert!(matches!(
        translate(&value),
        Err(TranslateError::NotImplemented(_))
    ));
}

#[test]
fn errors_are_isolated_per_procedure() {
    let source = "procedure bad(a in integer) is begin null; end;\n\
                  procedure good(r out integer) is begin r := 1; end;";
    let results = translate_all(source);
    assert!(results[0].is_err());
    let good = results[1].as_ref().unwrap();
    assert_eq!(good.header.class_name, "good");
    assert!(good.statements.is_empty());
}
