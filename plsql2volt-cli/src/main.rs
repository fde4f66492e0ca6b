use clap::Parser;
use plsql2volt_cli::Cli;

fn main() -> miette::Result<()> {
    Cli::parse().run()
}
