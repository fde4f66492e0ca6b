use plsql_parser::ast::{SourceFile, Statement, StatementBlock};
use plsql_parser::parse_plsql;
use plsql_parser::span::Spanned;
use pastey::paste;

/// Checks that every statement of `block` lies inside the block's span and that statements do
/// not overlap.
fn check_block(block: &Spanned<StatementBlock>) {
    let mut previous_end = block.span().start;
    for statement in &block.value().statements {
        let span = statement.span();
        assert!(span.start >= previous_end, "statements overlap at {span:?}");
        assert!(span.end <= block.span().end, "statement {span:?} escapes its block");
        previous_end = span.end;
        match statement.value() {
            Statement::If(if_statement) => check_block(&if_statement.then_block),
            Statement::Block(nested) => check_block(nested),
            Statement::CursorLoop(cursor_loop) => {
                assert!(cursor_loop.query.span().end <= cursor_loop.body.span().start);
                check_block(&cursor_loop.body);
            }
            _ => {}
        }
    }
}

fn procedure_names(source: &str, file: &Spanned<SourceFile>) -> Vec<String> {
    assert_eq!(file.span(), 0..source.len());
    let mut comment_end = 0;
    for comment in &file.value().comments {
        let text = comment.source_text(source);
        assert!(text.starts_with("--") || text.starts_with("/*"));
        assert!(comment.span().start >= comment_end);
        comment_end = comment.span().end;
    }
    file.value()
        .procedures
        .iter()
        .map(|procedure| {
            let definition = procedure.value();
            if let Some(end_name) = &definition.end_name {
                assert!(end_name.value().eq_ignore_ascii_case(definition.name.value()));
            }
            check_block(&definition.body);
            definition.name.value().to_string()
        })
        .collect()
}

macro_rules! add_parser_tests {
    ($($file:ident => [$($procedure:expr),*]),* $(,)?) => {
        paste! {
            $(
                #[test]
                fn [<parse_ $file>]() {
                    let source = include_str!(concat!("../../resources/plsql/", stringify!($file), ".pls"));
                    let file = parse_plsql(source).unwrap();
                    let expected: Vec<String> = vec![$($procedure.to_string()),*];
                    assert_eq!(procedure_names(source, &file), expected);
                }
            )*
        }
    };
}

add_parser_tests! {
    vote => ["vote"],
    leaderboard => ["count_votes", "contestant_name"],
}

#[test]
fn parse_vote_details() {
    let source = include_str!("../../resources/plsql/vote.pls");
    let file = parse_plsql(source).unwrap();
    let vote = file.value().procedures[0].value();
    assert_eq!(vote.parameters.len(), 4);
    assert_eq!(vote.declarations.len(), 6);

    let sql: Vec<_> = vote
        .body
        .value()
        .statements
        .iter()
        .filter_map(|statement| match statement.value() {
            Statement::Sql(_) => Some(statement.source_text(source)),
            _ => None,
        })
        .collect();
    assert_eq!(sql.len(), 4);
    assert!(sql[0].starts_with("SELECT COUNT(*) INTO num_contestants"));
    assert!(sql[3].ends_with("VALUES (phone, voter_state, contestant)"));

    assert_eq!(file.value().comments.len(), 2);
    assert_eq!(
        file.value().comments[1].value().text,
        "-- Look up the state of the caller."
    );
}

#[test]
fn report_syntax_error_position() {
    let error = parse_plsql("procedure p is\nbegin\n  x := ;\nend;").unwrap_err();
    assert_eq!(
        error.to_string(),
        "syntax error at or near line 3, column 8: unexpected \";\""
    );
}

#[test]
fn report_missing_condition_position() {
    let error =
        parse_plsql("procedure p is\nbegin\n  if then null; end if;\nend;").unwrap_err();
    assert_eq!(
        error.to_string(),
        "syntax error at or near line 3, column 6: unexpected \"then\""
    );
}

#[test]
fn report_unexpected_eof() {
    let error = parse_plsql("procedure p is begin x := 1;").unwrap_err();
    assert_eq!(error.to_string(), "syntax error: unexpected end of input");
}
