use std::path::PathBuf;

use clap::Args;
use eyre::Result;

use super::UnwrapOrExit;
use crate::{
    design::DesignFile,
    ops::{self, GenerateOptions},
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct GenCommand {
    /// Path to the design file
    #[arg(short, long, default_value = "apidef.toml")]
    pub design: PathBuf,

    /// Output directory
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,

    /// Preview generated code without writing to disk
    #[arg(long)]
    pub dry_run: bool,

    /// Do not overwrite files that already exist
    #[arg(long)]
    pub keep_existing: bool,
}

impl GenCommand {
    pub fn run(&self) -> Result<()> {
        let file = DesignFile::open(&self.design).unwrap_or_exit();
        let mut out = TerminalOutput::new();

        let design = match ops::validate(&file) {
            Ok(design) => design,
            Err(failure) => {
                ops::check::failed(failure, &self.design).render(&mut out);
                std::process::exit(1);
            }
        };

        let report = ops::generate(
            &file,
            &design,
            GenerateOptions {
                output_dir: &self.output,
                dry_run: self.dry_run,
                keep_existing: self.keep_existing,
            },
        )?;
        report.render(&mut out);

        if !report.is_success() {
            std::process::exit(1);
        }
        Ok(())
    }
}
