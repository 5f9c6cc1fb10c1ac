//! CLI commands for committed entries

use clap::Subcommand;

use crate::display::format_entry_table;
use crate::error::{TallyError, TallyResult};
use crate::wizard::WizardController;

/// Entry subcommands
#[derive(Subcommand, Debug)]
pub enum EntryCommands {
    /// List committed entries
    #[command(alias = "list")]
    Entries,

    /// Delete a committed entry by its list number (no undo)
    Delete {
        /// Entry number as shown by 'fieldtally entries'
        position: usize,
    },
}

/// Handle entry commands
pub fn handle_entry_command(wizard: &mut WizardController, cmd: EntryCommands) -> TallyResult<()> {
    match cmd {
        EntryCommands::Entries => {
            println!(
                "{}",
                format_entry_table(wizard.entries(), wizard.vocabulary(), wizard.layout())
            );
        }
        EntryCommands::Delete { position } => {
            let removed = position
                .checked_sub(1)
                .and_then(|index| wizard.delete_entry(index))
                .ok_or_else(|| TallyError::entry_not_found(position))?;

            println!(
                "Deleted entry #{} ({} / {}). {} remaining.",
                position,
                removed.age,
                removed.kind,
                wizard.entries().len()
            );
        }
    }

    Ok(())
}
