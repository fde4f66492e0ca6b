use std::process::Command;

use insta_cmd::get_cargo_bin;

pub const VOTER_DDL: &str = include_str!("../../plsql2volt/plsql/resources/ddl/voter-ddl.sql");
pub const VOTE: &str = include_str!("../../plsql2volt/plsql/resources/plsql/vote.pls");

pub fn run_cli() -> Command {
    let mut command = Command::new(get_cargo_bin("plsql2volt"));
    command.env_remove("RUST_LOG");
    command
}
