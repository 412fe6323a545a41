mod check;
mod completions;
mod generate;

use check::CheckCommand;
use clap::{Parser, Subcommand};
use completions::CompletionsCommand;
use eyre::Result;
use generate::GenCommand;

/// Extension trait for exiting on design file errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for crate::design::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser)]
#[command(name = "apidef")]
#[command(version)]
#[command(about = "Evaluate API designs and generate service code from them")]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Check(cmd) => cmd.run(),
            Commands::Gen(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a design file without generating code
    Check(CheckCommand),

    /// Generate Rust code from a design file
    Gen(GenCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_gen_flags() {
        let cli = Cli::try_parse_from([
            "apidef", "gen", "-d", "api.toml", "-o", "out", "--dry-run",
        ])
        .unwrap();
        let Commands::Gen(cmd) = cli.command else {
            panic!("expected gen");
        };
        assert_eq!(cmd.design, std::path::PathBuf::from("api.toml"));
        assert_eq!(cmd.output, std::path::PathBuf::from("out"));
        assert!(cmd.dry_run);
        assert!(!cmd.keep_existing);
    }
}
