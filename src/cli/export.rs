//! CLI commands for CSV output

use std::path::PathBuf;

use clap::Subcommand;

use crate::config::paths::TallyPaths;
use crate::config::settings::Settings;
use crate::error::TallyResult;
use crate::export::exporter_for;
use crate::wizard::WizardController;

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Print the CSV projection to stdout
    Csv,

    /// Deliver the CSV file (download or native save, detected at runtime)
    Export {
        /// Directory to write into instead of the detected one
        #[arg(long)]
        to: Option<PathBuf>,
    },
}

/// Handle export commands
pub fn handle_export_command(
    wizard: &WizardController,
    settings: &Settings,
    paths: &TallyPaths,
    cmd: ExportCommands,
) -> TallyResult<()> {
    let csv = wizard.csv()?;

    match cmd {
        ExportCommands::Csv => {
            print!("{}", csv);
        }
        ExportCommands::Export { to } => {
            let exporter = exporter_for(settings, paths, to);
            match exporter.export(&csv) {
                Ok(outcome) => {
                    println!(
                        "Exported {} entries to: {}",
                        wizard.entries().len(),
                        outcome.path.display()
                    );
                    if outcome.uri.starts_with("file://") {
                        println!("Open: {}", outcome.uri);
                    }
                }
                Err(e) => {
                    if exporter.alerts_on_failure() {
                        eprintln!();
                        eprintln!("!!! Export failed !!!");
                        eprintln!("{}", e);
                        eprintln!();
                    }
                    return Err(e);
                }
            }
        }
    }

    Ok(())
}
