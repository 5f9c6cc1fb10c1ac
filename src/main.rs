use std::fs::OpenOptions;

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::{Env, Target};
use log::{info, warn};

use fieldtally::cli::{
    handle_entry_command, handle_export_command, handle_wizard_command, EntryCommands,
    ExportCommands, WizardCommands,
};
use fieldtally::config::{paths::TallyPaths, settings::Settings};
use fieldtally::storage::{open_file_store, KeyValueStore};
use fieldtally::wizard::WizardController;

#[derive(Parser)]
#[command(
    name = "fieldtally",
    version,
    about = "Step-by-step tally wizard for market-research field observations",
    long_about = "fieldtally records visitor observations one entry at a time: \
                  pick an age bracket and a visitor type, tap the spend amounts \
                  you saw, confirm, and export everything as a CSV file."
)]
struct Cli {
    /// Keep state in memory only; nothing is read from or written to disk
    #[arg(long, global = true)]
    ephemeral: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the interactive TUI
    #[command(alias = "ui")]
    Tui,

    /// Write the default configuration file
    Init,

    /// Show current configuration and paths
    Config,

    #[command(flatten)]
    Wizard(WizardCommands),

    #[command(flatten)]
    Entries(EntryCommands),

    #[command(flatten)]
    Export(ExportCommands),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = TallyPaths::new()?;
    init_logging(&paths, matches!(cli.command, Some(Commands::Tui)));

    let settings = Settings::load_or_create(&paths)?;

    let store: Option<Box<dyn KeyValueStore>> = if cli.ephemeral {
        info!("Running without persistence");
        None
    } else {
        Some(Box::new(open_file_store(&paths)))
    };
    let mut wizard = WizardController::from_settings(&settings, store);

    match cli.command {
        Some(Commands::Tui) => {
            fieldtally::tui::run_tui(&mut wizard, &settings, &paths)?;
        }
        Some(Commands::Init) => {
            if paths.is_initialized() {
                println!(
                    "Already initialized; leaving {} unchanged.",
                    paths.settings_file().display()
                );
                return Ok(());
            }
            println!("Initializing fieldtally at: {}", paths.base_dir().display());
            paths.ensure_directories()?;
            settings.save(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Edit {} to change the option lists.", paths.settings_file().display());
            println!("Run 'fieldtally options' to see them.");
        }
        Some(Commands::Config) => {
            println!("fieldtally Configuration");
            println!("========================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Store directory:  {}", paths.store_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Log file:         {}", paths.log_file().display());
            println!();
            println!("Settings:");
            println!("  Layout:          {}", settings.layout);
            println!("  Export filename: {}", settings.export.filename);
            println!("  Export target:   {:?}", settings.export.target);
            println!("  Persistence:     {}", if wizard.is_persistent() { "on" } else { "off" });
        }
        Some(Commands::Wizard(cmd)) => {
            handle_wizard_command(&mut wizard, cmd)?;
        }
        Some(Commands::Entries(cmd)) => {
            handle_entry_command(&mut wizard, cmd)?;
        }
        Some(Commands::Export(cmd)) => {
            handle_export_command(&wizard, &settings, &paths, cmd)?;
        }
        None => {
            println!("fieldtally - market-research tally wizard");
            println!();
            println!("Run 'fieldtally --help' for usage information.");
            println!("Run 'fieldtally tui' to launch the interactive interface.");
        }
    }

    Ok(())
}

/// Configure env_logger; the TUI owns the terminal, so it logs to a file
fn init_logging(paths: &TallyPaths, tui: bool) {
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("warn"));

    if tui {
        let file = paths.ensure_directories().map_err(anyhow::Error::from).and_then(|_| {
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(paths.log_file())
                .map_err(anyhow::Error::from)
        });
        match file {
            Ok(file) => {
                builder.target(Target::Pipe(Box::new(file)));
            }
            Err(e) => {
                // Nothing useful can be shown once the alternate screen is up
                builder.filter_level(log::LevelFilter::Off);
                eprintln!("Logging disabled: {}", e);
            }
        }
    }

    if builder.try_init().is_err() {
        warn!("Logger already initialized");
    }
}
