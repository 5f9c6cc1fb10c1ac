//! Application state for the TUI
//!
//! The App struct holds all state needed for rendering and handling events.
//! Wizard state itself lives in the controller; the App only adds cursors,
//! the active view, and transient messages.

use log::warn;

use crate::config::paths::TallyPaths;
use crate::config::settings::Settings;
use crate::export::exporter_for;
use crate::models::{OptionKind, Step};
use crate::wizard::WizardController;

/// Which view is currently active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    #[default]
    Wizard,
    Entries,
}

/// Currently active dialog (if any)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ActiveDialog {
    #[default]
    None,
    /// Blocking alert that must be acknowledged
    Alert(String),
}

/// Main application state
pub struct App<'a> {
    /// The wizard being driven
    pub wizard: &'a mut WizardController,

    /// Application settings
    pub settings: &'a Settings,

    /// Paths configuration
    pub paths: &'a TallyPaths,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Currently active view
    pub active_view: ActiveView,

    /// Currently active dialog
    pub active_dialog: ActiveDialog,

    /// Cursor in the option list of the current step
    pub selected_index: usize,

    /// Step the option cursor belongs to
    cursor_step: Step,

    /// Cursor in the entries view
    pub selected_entry_index: usize,

    /// Status message to display
    pub status_message: Option<String>,
}

impl<'a> App<'a> {
    /// Create a new App instance
    pub fn new(
        wizard: &'a mut WizardController,
        settings: &'a Settings,
        paths: &'a TallyPaths,
    ) -> Self {
        let cursor_step = wizard.step();
        Self {
            wizard,
            settings,
            paths,
            should_quit: false,
            active_view: ActiveView::default(),
            active_dialog: ActiveDialog::default(),
            selected_index: 0,
            cursor_step,
            selected_entry_index: 0,
            status_message: None,
        }
    }

    /// Request to quit the application
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Set a status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Clear the status message
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    /// Switch to a different view
    pub fn switch_view(&mut self, view: ActiveView) {
        self.active_view = view;
        if view == ActiveView::Entries {
            self.selected_entry_index = self
                .selected_entry_index
                .min(self.wizard.entries().len().saturating_sub(1));
        }
    }

    /// Show a blocking alert
    pub fn alert(&mut self, message: impl Into<String>) {
        self.active_dialog = ActiveDialog::Alert(message.into());
    }

    /// Close the current dialog
    pub fn close_dialog(&mut self) {
        self.active_dialog = ActiveDialog::None;
    }

    /// Check if a dialog is active
    pub fn has_dialog(&self) -> bool {
        !matches!(self.active_dialog, ActiveDialog::None)
    }

    /// Option list shown by the current step
    pub fn current_option_kind(&self) -> Option<OptionKind> {
        match self.wizard.step() {
            Step::Age => Some(OptionKind::Age),
            Step::Type => Some(OptionKind::Type),
            Step::Amount => Some(OptionKind::Amount),
            Step::Start | Step::Confirm => None,
        }
    }

    /// Number of options in the current step's list
    pub fn option_count(&self) -> usize {
        self.current_option_kind()
            .map(|kind| self.wizard.vocabulary().options(kind).len())
            .unwrap_or(0)
    }

    /// Label under the option cursor
    pub fn selected_option(&self) -> Option<String> {
        let kind = self.current_option_kind()?;
        self.wizard
            .vocabulary()
            .options(kind)
            .get(self.selected_index)
            .cloned()
    }

    /// Reset the option cursor when the wizard has moved to another step
    pub fn sync_cursor(&mut self) {
        let step = self.wizard.step();
        if step != self.cursor_step {
            self.cursor_step = step;
            self.selected_index = 0;
        }
        let count = self.option_count();
        if count > 0 && self.selected_index >= count {
            self.selected_index = count - 1;
        }
    }

    /// Move selection up in the current view
    pub fn move_up(&mut self) {
        match self.active_view {
            ActiveView::Wizard => {
                self.selected_index = self.selected_index.saturating_sub(1);
            }
            ActiveView::Entries => {
                self.selected_entry_index = self.selected_entry_index.saturating_sub(1);
            }
        }
    }

    /// Move selection down in the current view
    pub fn move_down(&mut self) {
        match self.active_view {
            ActiveView::Wizard => {
                if self.selected_index < self.option_count().saturating_sub(1) {
                    self.selected_index += 1;
                }
            }
            ActiveView::Entries => {
                if self.selected_entry_index < self.wizard.entries().len().saturating_sub(1) {
                    self.selected_entry_index += 1;
                }
            }
        }
    }

    /// Cycle the breakdown category forwards or backwards
    pub fn cycle_category(&mut self, forward: bool) {
        let categories = self.wizard.vocabulary().categories.clone();
        if categories.is_empty() || !self.wizard.layout().has_categories() {
            return;
        }

        let current = self
            .wizard
            .draft()
            .category
            .as_ref()
            .and_then(|c| categories.iter().position(|x| x == c))
            .unwrap_or(0);
        let next = if forward {
            (current + 1) % categories.len()
        } else {
            (current + categories.len() - 1) % categories.len()
        };
        self.wizard.select_category(&categories[next]);
    }

    /// Delete the entry under the cursor
    pub fn delete_selected_entry(&mut self) {
        let position = self.selected_entry_index + 1;
        if self.wizard.delete_entry(self.selected_entry_index).is_some() {
            self.set_status(format!("Deleted entry #{}", position));
            self.selected_entry_index = self
                .selected_entry_index
                .min(self.wizard.entries().len().saturating_sub(1));
        }
    }

    /// Export the committed entries
    ///
    /// Native save failures raise an alert; download failures only update
    /// the status line.
    pub fn export(&mut self) {
        let csv = match self.wizard.csv() {
            Ok(csv) => csv,
            Err(e) => {
                self.set_status(format!("Export failed: {}", e));
                return;
            }
        };

        let exporter = exporter_for(self.settings, self.paths, None);
        match exporter.export(&csv) {
            Ok(outcome) => {
                self.set_status(format!("Exported to {}", outcome.path.display()));
            }
            Err(e) => {
                warn!("Export failed: {}", e);
                if exporter.alerts_on_failure() {
                    self.alert(e.to_string());
                } else {
                    self.set_status(format!("Export failed: {}", e));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Layout, Vocabulary};
    use tempfile::TempDir;

    fn fixture(layout: Layout) -> (TempDir, WizardController, Settings, TallyPaths) {
        let temp_dir = TempDir::new().unwrap();
        let paths = TallyPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut settings = Settings::default();
        settings.layout = layout;
        let wizard = WizardController::new(Vocabulary::default(), layout);
        (temp_dir, wizard, settings, paths)
    }

    #[test]
    fn test_cursor_resets_on_step_change() {
        let (_dir, mut wizard, settings, paths) = fixture(Layout::Flat);
        wizard.start();
        let mut app = App::new(&mut wizard, &settings, &paths);

        app.move_down();
        app.move_down();
        assert_eq!(app.selected_option().as_deref(), Some("20-30"));

        let label = app.selected_option().unwrap();
        app.wizard.select_age(&label);
        app.sync_cursor();
        assert_eq!(app.selected_index, 0);
        assert_eq!(app.selected_option().as_deref(), Some("Asian"));
    }

    #[test]
    fn test_cycle_category_wraps() {
        let (_dir, mut wizard, settings, paths) = fixture(Layout::Breakdown);
        wizard.select_age("20-30");
        wizard.select_type("Local");
        let mut app = App::new(&mut wizard, &settings, &paths);

        app.cycle_category(false);
        assert_eq!(app.wizard.draft().category.as_deref(), Some("Other"));
        app.cycle_category(true);
        assert_eq!(app.wizard.draft().category.as_deref(), Some("Clothes"));
    }

    #[test]
    fn test_delete_selected_entry_clamps_cursor() {
        let (_dir, mut wizard, settings, paths) = fixture(Layout::Flat);
        for _ in 0..2 {
            wizard.select_age("20-30");
            wizard.select_type("Local");
            wizard.increment_amount("$20+");
            wizard.proceed_to_confirm();
            wizard.confirm();
        }
        let mut app = App::new(&mut wizard, &settings, &paths);
        app.switch_view(ActiveView::Entries);
        app.move_down();
        app.delete_selected_entry();

        assert_eq!(app.wizard.entries().len(), 1);
        assert_eq!(app.selected_entry_index, 0);
        assert_eq!(app.status_message.as_deref(), Some("Deleted entry #2"));
    }

    #[test]
    fn test_alert_blocks_until_closed() {
        let (_dir, mut wizard, settings, paths) = fixture(Layout::Flat);
        let mut app = App::new(&mut wizard, &settings, &paths);

        app.alert("Could not save market_research.csv");
        assert!(app.has_dialog());
        app.close_dialog();
        assert!(!app.has_dialog());
    }
}
