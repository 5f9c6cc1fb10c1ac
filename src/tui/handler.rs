//! Event handler for the TUI
//!
//! Routes keyboard events to wizard intents based on the active view and
//! the current wizard step.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

use super::app::{ActiveView, App};
use super::event::Event;
use crate::models::Step;

/// Handle an incoming event
pub fn handle_event(app: &mut App, event: Event) -> Result<()> {
    match event {
        Event::Key(key) => handle_key_event(app, key),
        Event::Tick | Event::Resize(_, _) => Ok(()),
    }
}

/// Handle a key event
fn handle_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    // An open alert swallows every key until acknowledged
    if app.has_dialog() {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
            app.close_dialog();
        }
        return Ok(());
    }

    app.clear_status();

    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => {
            app.quit();
            return Ok(());
        }
        KeyCode::Char('x') => {
            app.export();
            return Ok(());
        }
        KeyCode::Char('e') | KeyCode::Tab => {
            let view = match app.active_view {
                ActiveView::Wizard => ActiveView::Entries,
                ActiveView::Entries => ActiveView::Wizard,
            };
            app.switch_view(view);
            return Ok(());
        }
        _ => {}
    }

    match app.active_view {
        ActiveView::Wizard => handle_wizard_key(app, key),
        ActiveView::Entries => handle_entries_key(app, key),
    }

    app.sync_cursor();
    Ok(())
}

/// Handle keys in the wizard view
fn handle_wizard_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('k') | KeyCode::Up => {
            app.move_up();
            return;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.move_down();
            return;
        }
        KeyCode::Backspace | KeyCode::Char('b') => {
            app.wizard.back();
            return;
        }
        KeyCode::Char('r') => {
            if app.wizard.reset() {
                app.set_status("Draft discarded");
            }
            return;
        }
        _ => {}
    }

    match app.wizard.step() {
        Step::Start => {
            if matches!(key.code, KeyCode::Enter | KeyCode::Char('s')) {
                app.wizard.start();
            }
        }
        Step::Age => {
            if key.code == KeyCode::Enter {
                if let Some(label) = app.selected_option() {
                    app.wizard.select_age(&label);
                }
            }
        }
        Step::Type => {
            if key.code == KeyCode::Enter {
                if let Some(label) = app.selected_option() {
                    app.wizard.select_type(&label);
                }
            }
        }
        Step::Amount => handle_amount_key(app, key),
        Step::Confirm => {
            if matches!(key.code, KeyCode::Enter | KeyCode::Char('y')) && app.wizard.confirm() {
                let count = app.wizard.entries().len();
                app.set_status(format!("Entry #{} saved", count));
            }
        }
    }
}

/// Handle keys on the amount step
fn handle_amount_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter | KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Right | KeyCode::Char('l') => {
            if let Some(label) = app.selected_option() {
                app.wizard.increment_amount(&label);
            }
        }
        KeyCode::Char('-') | KeyCode::Left | KeyCode::Char('h') => {
            if let Some(label) = app.selected_option() {
                app.wizard.decrement_amount(&label);
            }
        }
        KeyCode::Char('c') => app.cycle_category(true),
        KeyCode::Char('C') => app.cycle_category(false),
        KeyCode::Char('n') => {
            if !app.wizard.proceed_to_confirm() {
                app.set_status("Tally at least one amount first");
            }
        }
        _ => {}
    }
}

/// Handle keys in the entries view
fn handle_entries_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('k') | KeyCode::Up => app.move_up(),
        KeyCode::Char('j') | KeyCode::Down => app.move_down(),
        KeyCode::Char('d') | KeyCode::Delete => app.delete_selected_entry(),
        KeyCode::Esc => app.switch_view(ActiveView::Wizard),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::TallyPaths;
    use crate::config::settings::Settings;
    use crate::models::{Layout, Vocabulary};
    use crate::wizard::WizardController;
    use crossterm::event::KeyModifiers;

    fn press(app: &mut App, code: KeyCode) {
        handle_event(app, Event::Key(KeyEvent::new(code, KeyModifiers::NONE))).unwrap();
    }

    #[test]
    fn test_keyboard_pass_commits_entry() {
        let mut wizard = WizardController::new(Vocabulary::default(), Layout::Flat);
        let settings = Settings::default();
        let paths = TallyPaths::with_base_dir(std::env::temp_dir());
        let mut app = App::new(&mut wizard, &settings, &paths);

        press(&mut app, KeyCode::Enter); // start
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter); // age 20-30
        press(&mut app, KeyCode::Enter); // type Asian
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char('+'));
        press(&mut app, KeyCode::Char('+'));
        press(&mut app, KeyCode::Char('n'));
        press(&mut app, KeyCode::Enter); // confirm

        assert_eq!(app.wizard.entries().len(), 1);
        assert_eq!(app.wizard.step(), Step::Start);
        assert_eq!(app.status_message.as_deref(), Some("Entry #1 saved"));
        assert_eq!(app.wizard.csv().unwrap().lines().nth(1), Some("20-30,Asian,0,2,0,0"));
    }

    #[test]
    fn test_backspace_goes_back() {
        let mut wizard = WizardController::new(Vocabulary::default(), Layout::Flat);
        wizard.select_age("0-10");
        let settings = Settings::default();
        let paths = TallyPaths::with_base_dir(std::env::temp_dir());
        let mut app = App::new(&mut wizard, &settings, &paths);

        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.wizard.step(), Step::Age);
        assert!(app.wizard.draft().age.is_none());
    }

    #[test]
    fn test_alert_swallows_keys() {
        let mut wizard = WizardController::new(Vocabulary::default(), Layout::Flat);
        let settings = Settings::default();
        let paths = TallyPaths::with_base_dir(std::env::temp_dir());
        let mut app = App::new(&mut wizard, &settings, &paths);

        app.alert("Save failed");
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.should_quit);
        press(&mut app, KeyCode::Enter);
        assert!(!app.has_dialog());
    }
}
