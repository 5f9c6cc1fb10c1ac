//! CLI commands driving the wizard
//!
//! Each invocation applies one intent to the restored wizard and prints the
//! resulting status. Ignored intents are reported but are not errors.

use clap::Subcommand;

use crate::display::{format_options, format_status};
use crate::error::TallyResult;
use crate::models::OptionKind;
use crate::wizard::WizardController;

/// Wizard intent subcommands
#[derive(Subcommand, Debug)]
pub enum WizardCommands {
    /// Show the current step and draft
    Status,

    /// Leave the start screen
    Start,

    /// Choose the visitor age bracket (label or list number)
    Age {
        /// Age bracket
        label: String,
    },

    /// Choose the visitor type (label or list number)
    #[command(name = "type")]
    Kind {
        /// Visitor type
        label: String,
    },

    /// Switch the category amount taps apply to (breakdown layout)
    Category {
        /// Category
        label: String,
    },

    /// Tally an amount bucket
    Add {
        /// Amount bucket (label or list number)
        amount: String,

        /// Number of taps
        #[arg(short = 'n', long, default_value = "1")]
        times: u32,
    },

    /// Take one tap back from an amount bucket
    Remove {
        /// Amount bucket (label or list number)
        amount: String,
    },

    /// Review the draft before saving
    Next,

    /// Save the draft as a new entry
    Confirm,

    /// Go back one step, discarding that step's selections
    Back,

    /// Discard the draft and return to the start screen
    Reset,

    /// List the selectable options
    Options,
}

/// Handle wizard commands
pub fn handle_wizard_command(wizard: &mut WizardController, cmd: WizardCommands) -> TallyResult<()> {
    let vocab = wizard.vocabulary().clone();

    let applied = match cmd {
        WizardCommands::Status => {
            println!("{}", format_status(wizard));
            return Ok(());
        }
        WizardCommands::Options => {
            for kind in [
                OptionKind::Age,
                OptionKind::Type,
                OptionKind::Category,
                OptionKind::Amount,
            ] {
                println!("{}", format_options(wizard, kind));
            }
            println!("Layout: {}", wizard.layout());
            return Ok(());
        }
        WizardCommands::Start => wizard.start(),
        WizardCommands::Age { label } => {
            let label = vocab.resolve(OptionKind::Age, &label)?;
            wizard.select_age(&label)
        }
        WizardCommands::Kind { label } => {
            let label = vocab.resolve(OptionKind::Type, &label)?;
            wizard.select_type(&label)
        }
        WizardCommands::Category { label } => {
            let label = vocab.resolve(OptionKind::Category, &label)?;
            wizard.select_category(&label)
        }
        WizardCommands::Add { amount, times } => {
            let amount = vocab.resolve(OptionKind::Amount, &amount)?;
            wizard.increment_amount_by(&amount, times)
        }
        WizardCommands::Remove { amount } => {
            let amount = vocab.resolve(OptionKind::Amount, &amount)?;
            wizard.decrement_amount(&amount)
        }
        WizardCommands::Next => wizard.proceed_to_confirm(),
        WizardCommands::Confirm => {
            let applied = wizard.confirm();
            if applied {
                println!("Entry #{} saved.", wizard.entries().len());
            }
            applied
        }
        WizardCommands::Back => wizard.back(),
        WizardCommands::Reset => wizard.reset(),
    };

    if !applied {
        println!("Nothing to do at this step.");
    }
    println!();
    println!("{}", format_status(wizard));

    Ok(())
}
