use plsql2volt_catalog::error::CatalogError;
use plsql2volt_catalog::provider::SchemaProvider;
use plsql2volt_common::data_type::EngineType;

const VOTER_DDL: &str = include_str!("../../plsql/resources/ddl/voter-ddl.sql");

#[test]
fn test_voter_schema() {
    let catalog = plsql2volt_catalog::load(VOTER_DDL).unwrap();
    assert_eq!(catalog.table_names(), [
        "area_code_state",
        "contestants",
        "votes"
    ]);
    assert_eq!(
        catalog.resolve_column_type("VOTES", "Phone_Number").unwrap(),
        EngineType::BigInt
    );
    assert!(matches!(
        catalog.resolve_column_type("v_votes_by_phone_number", "num_votes"),
        Err(CatalogError::TableNotFound(_))
    ));
}

#[test]
fn test_resolve_rewritten_statements() {
    let catalog = plsql2volt_catalog::load(VOTER_DDL).unwrap();
    let resolve = |sql: &str| catalog.resolve_statement(sql).unwrap().to_string();
    assert_eq!(
        resolve("SELECT COUNT(*) \n      FROM contestants\n     WHERE contestant_number = ?"),
        "(C1 BIGINT)"
    );
    assert_eq!(
        resolve("SELECT state FROM area_code_state WHERE area_code = ? / 10000000"),
        "(state VARCHAR)"
    );
    assert_eq!(
        resolve("SELECT contestant_number, state FROM votes WHERE contestant_number = ?"),
        "(contestant_number INTEGER, state VARCHAR)"
    );
    assert_eq!(
        resolve("INSERT INTO votes (phone_number, state, contestant_number) VALUES (?, ?, ?)"),
        "()"
    );
}
