//! Wizard status formatting
//!
//! Renders the current step and draft as plain text for the CLI.

use crate::models::{OptionKind, Step};
use crate::wizard::WizardController;

/// Format the option list of a step, numbered from 1
pub fn format_options(wizard: &WizardController, kind: OptionKind) -> String {
    let mut output = format!("{} options:\n", kind);
    for (i, label) in wizard.vocabulary().options(kind).iter().enumerate() {
        output.push_str(&format!("  {:>2}. {}\n", i + 1, label));
    }
    output
}

fn next_hint(wizard: &WizardController) -> &'static str {
    match wizard.step() {
        Step::Start => "Run 'fieldtally start' (or 'fieldtally age <label>') to begin.",
        Step::Age => "Run 'fieldtally age <label>' to choose an age bracket.",
        Step::Type => "Run 'fieldtally type <label>' to choose a visitor type.",
        Step::Amount if wizard.can_proceed() => {
            "Run 'fieldtally add <amount>' for more taps, or 'fieldtally next' to review."
        }
        Step::Amount => "Run 'fieldtally add <amount>' to tally a spend amount.",
        Step::Confirm => "Run 'fieldtally confirm' to save, or 'fieldtally back' to edit.",
    }
}

/// Format the full wizard status
pub fn format_status(wizard: &WizardController) -> String {
    let draft = wizard.draft();
    let step = wizard.step();
    let mut output = String::new();

    output.push_str(&format!(
        "Step {}/5: {}\n",
        step.index() + 1,
        step.title()
    ));
    output.push_str(&format!(
        "Age:   {}\n",
        draft.age.as_deref().unwrap_or("-")
    ));
    output.push_str(&format!(
        "Type:  {}\n",
        draft.kind.as_deref().unwrap_or("-")
    ));

    if matches!(step, Step::Amount | Step::Confirm) {
        let vocab = wizard.vocabulary();

        if wizard.layout().has_categories() {
            output.push_str(&format!(
                "Category: {}\n",
                draft.category.as_deref().unwrap_or("-")
            ));
        }

        let last = draft.active_last_selected();
        for amount in &vocab.amounts {
            let marker = if last == Some(amount) { "*" } else { " " };
            output.push_str(&format!(
                " {} {:<12} {}\n",
                marker,
                amount,
                draft.active_count(amount)
            ));
        }
        output.push_str(&format!("Total taps: {}\n", draft.total()));
    }

    if step == Step::Age {
        output.push('\n');
        output.push_str(&format_options(wizard, OptionKind::Age));
    } else if step == Step::Type {
        output.push('\n');
        output.push_str(&format_options(wizard, OptionKind::Type));
    }

    output.push_str(&format!(
        "\nEntries recorded: {}{}\n",
        wizard.entries().len(),
        if wizard.is_persistent() { "" } else { " (not saved)" }
    ));
    output.push_str(next_hint(wizard));
    output
}
