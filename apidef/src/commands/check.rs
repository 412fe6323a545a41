use std::path::PathBuf;

use clap::Args;
use eyre::{Context, Result};

use super::UnwrapOrExit;
use crate::{
    design::DesignFile,
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CheckCommand {
    /// Path to the design file
    #[arg(short, long, default_value = "apidef.toml")]
    pub design: PathBuf,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

impl CheckCommand {
    pub fn run(&self) -> Result<()> {
        let file = DesignFile::open(&self.design).unwrap_or_exit();
        let report = ops::check(&file, &self.design);

        if self.json {
            let json = serde_json::to_string_pretty(&report).wrap_err("Failed to encode report")?;
            println!("{}", json);
        } else {
            report.render(&mut TerminalOutput::new());
        }

        if !report.is_valid() {
            std::process::exit(1);
        }
        Ok(())
    }
}
