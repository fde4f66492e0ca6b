use std::path::PathBuf;

use clap::{ArgAction, Parser};
use miette::{Report, Result, miette};
use plsql2volt::{ProcedureOutcome, Project, TranslatorConfig};
use tracing::debug;

use crate::logging;

/// Translates PL/SQL stored procedures into VoltDB Java stored procedures.
#[derive(Debug, Parser)]
#[command(name = "plsql2volt", version)]
pub struct Cli {
    /// DDL script defining the tables referenced by the procedures.
    #[arg(long, value_name = "FILE")]
    ddl: PathBuf,

    /// Java package of the generated classes.
    #[arg(short, long, value_name = "PKG", default_value = "my_pkg")]
    package: String,

    /// Directory in which the package directory is created.
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    dir: PathBuf,

    /// Number of procedures translated in parallel.
    #[arg(short, long, value_name = "N", default_value_t = 1)]
    jobs: usize,

    /// Do not carry comments over into the generated code.
    #[arg(long)]
    no_comments: bool,

    /// Increase logging verbosity.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// PL/SQL source files.
    #[arg(required = true, value_name = "FILES")]
    files: Vec<PathBuf>,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        logging::init(self.verbose);
        let config = TranslatorConfig {
            package: self.package,
            target_dir: self.dir,
            preserve_comments: !self.no_comments,
            num_threads: self.jobs,
        };
        let project = Project::open(&self.ddl, config)?;

        let mut failures = 0usize;
        for file in &self.files {
            let report = match project.translate_file(file) {
                Ok(report) => report,
                Err(e) => {
                    failures += 1;
                    eprintln!(
                        "{:?}",
                        Report::new(e).wrap_err(format!("cannot translate {}", file.display()))
                    );
                    continue;
                }
            };
            debug!(
                file = %file.display(),
                total_time = ?report.metrics().total_time(),
                "translated file"
            );
            for outcome in report.into_procedures() {
                if let ProcedureOutcome::Failed { error, .. } = outcome {
                    failures += 1;
                    eprintln!("{:?}", Report::new(error));
                }
            }
        }
        if failures > 0 {
            return Err(miette!("{failures} translation(s) failed"));
        }
        Ok(())
    }
}
