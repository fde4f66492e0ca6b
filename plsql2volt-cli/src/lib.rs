mod cli;
mod logging;

pub use cli::Cli;
