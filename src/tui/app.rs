//! The interactive menu: event loop, key dispatch and the confirm prompts.
//!
//! All state changes go through [`MenuController`]; this module only decides
//! which operation a key maps to and what to tell the user afterwards.

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::backend::CrosstermBackend;
use ratatui::{Frame, Terminal};
use tracing::{info, warn};

use crate::controller::{Activation, MenuController};
use crate::tui::configure::{self, ConfigureEvent, ConfigureState};
use crate::tui::input::{self, Action, Direction};
use crate::tui::render::{self, MenuRenderData, RenderRow, RowMarker};

const HINTS: &str =
    "[enter] open  [space] toggle  [a/n] all/none  [esc] back  [s] save  [r] reset  [?] help";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PendingConfirm {
    Reset,
    /// Quitting with unsaved changes: yes saves first, no discards.
    Quit,
}

impl PendingConfirm {
    fn question(self) -> &'static str {
        match self {
            Self::Reset => "Reset every selection and value to the defaults?",
            Self::Quit => "You have unsaved changes. Save before quitting?",
        }
    }
}

#[derive(Debug)]
struct AppState {
    controller: MenuController,
    show_help: bool,
    status_message: Option<String>,
    pending_confirm: Option<PendingConfirm>,
    configure: Option<ConfigureState>,
    list_rows: usize,
}

impl AppState {
    fn new(controller: MenuController, status_message: Option<String>) -> Self {
        Self {
            controller,
            show_help: false,
            status_message,
            pending_confirm: None,
            configure: None,
            list_rows: 1,
        }
    }

    fn draw(&mut self, frame: &mut Frame) {
        self.list_rows = render::list_rows(frame.area()).max(1);
        self.controller.ensure_visible(self.list_rows);

        let rows = self.rows();
        let breadcrumb = self.controller.breadcrumb_path();
        let description = self
            .controller
            .focused_item()
            .or_else(|| self.controller.current_menu())
            .map(|item| item.description.clone())
            .unwrap_or_default();
        let nav = self.controller.navigation();

        render::draw(
            frame,
            &MenuRenderData {
                breadcrumb: &breadcrumb,
                rows: &rows,
                cursor: nav.current_item,
                scroll: nav.scroll_offset,
                description: &description,
                selected_count: self.controller.store().len(),
                dirty: self.controller.is_dirty(),
                hints: HINTS,
                message: self.status_message.as_deref(),
                confirm: self.pending_confirm.map(PendingConfirm::question),
                show_help: self.show_help,
            },
        );

        if let Some(state) = &self.configure {
            configure::draw(frame, state);
        }
    }

    fn rows(&self) -> Vec<RenderRow> {
        self.controller
            .get_current_items()
            .into_iter()
            .map(|item| {
                let marker = if item.is_category {
                    let (selected, total) = self.controller.counts_of(&item.id);
                    RowMarker::Category {
                        status: self.controller.status_of(&item.id),
                        selected,
                        total,
                    }
                } else {
                    RowMarker::Leaf {
                        selected: self.controller.store().contains(&item.id),
                        value: item
                            .config
                            .as_ref()
                            .map(|config| config.spec.display(&config.value)),
                    }
                };
                RenderRow {
                    label: item.label.clone(),
                    marker,
                }
            })
            .collect()
    }

    /// Returns `true` when the app should exit.
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        if let Some(state) = &mut self.configure {
            match configure::handle_key(key, state) {
                ConfigureEvent::None => {}
                ConfigureEvent::Cancel => self.configure = None,
                ConfigureEvent::Commit(value) => {
                    let id = state.id.clone();
                    let label = state.label.clone();
                    self.configure = None;
                    let message = match self.controller.set_config_value(&id, value) {
                        Ok(()) => format!("{label} updated"),
                        Err(err) => format!("{label}: {err}"),
                    };
                    self.status_message = Some(message);
                }
            }
            return false;
        }

        if let Some(confirm) = self.pending_confirm {
            return self.handle_confirm_key(confirm, key);
        }

        if self.show_help {
            if matches!(
                key.code,
                KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q')
            ) {
                self.show_help = false;
            }
            return false;
        }

        self.status_message = None;
        match input::action_for_key(key) {
            Action::Move(Direction::Up) => self.controller.move_cursor(-1),
            Action::Move(Direction::Down) => self.controller.move_cursor(1),
            Action::Page(Direction::Up) => self.controller.move_cursor(-(self.list_rows as isize)),
            Action::Page(Direction::Down) => self.controller.move_cursor(self.list_rows as isize),
            Action::First => self.controller.move_cursor(isize::MIN),
            Action::Last => self.controller.move_cursor(isize::MAX),
            Action::Activate => self.activate(),
            Action::Toggle => self.toggle(),
            Action::SelectAll => {
                let changed = self.controller.select_all_here(true);
                self.status_message = Some(format!("selected {changed} item(s)"));
            }
            Action::DeselectAll => {
                let changed = self.controller.select_all_here(false);
                self.status_message = Some(format!("cleared {changed} item(s)"));
            }
            Action::Back => {
                if !self.controller.back() {
                    return self.request_quit();
                }
            }
            Action::Save => {
                self.save();
            }
            Action::Reset => self.pending_confirm = Some(PendingConfirm::Reset),
            Action::ToggleHelp => self.show_help = true,
            Action::Quit => return self.request_quit(),
            Action::Noop => {}
        }
        false
    }

    fn handle_confirm_key(&mut self, confirm: PendingConfirm, key: KeyEvent) -> bool {
        let answer = match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => Some(true),
            KeyCode::Char('n') | KeyCode::Char('N') => Some(false),
            KeyCode::Esc => None,
            _ => return false,
        };
        self.pending_confirm = None;
        match (confirm, answer) {
            (_, None) | (PendingConfirm::Reset, Some(false)) => false,
            (PendingConfirm::Reset, Some(true)) => {
                self.controller.reset();
                self.status_message = Some("reset to defaults (not saved yet)".to_string());
                false
            }
            (PendingConfirm::Quit, Some(true)) => self.save(),
            (PendingConfirm::Quit, Some(false)) => {
                info!("quit without saving");
                true
            }
        }
    }

    fn activate(&mut self) {
        let index = self.controller.navigation().current_item;
        match self.controller.enter_or_toggle(index) {
            Ok(Activation::Entered(_)) | Ok(Activation::Nothing) => {}
            Ok(Activation::Toggled { id, selected }) => self.report_toggle(&id, selected),
            Ok(Activation::Configure(id)) => {
                self.configure = self
                    .controller
                    .catalog()
                    .get(&id)
                    .and_then(ConfigureState::open);
            }
            Err(err) => self.status_message = Some(err.to_string()),
        }
    }

    fn toggle(&mut self) {
        let Some(id) = self.controller.focused_item().map(|item| item.id.clone()) else {
            return;
        };
        match self.controller.toggle_focused() {
            Some(selected) => self.report_toggle(&id, selected),
            None => self.status_message = Some("nothing to select here".to_string()),
        }
    }

    fn report_toggle(&mut self, id: &str, selected: bool) {
        let label = self
            .controller
            .catalog()
            .get(id)
            .map(|item| item.label.clone())
            .unwrap_or_else(|| id.to_string());
        let verb = if selected { "selected" } else { "cleared" };
        self.status_message = Some(format!("{verb} {label}"));
    }

    fn request_quit(&mut self) -> bool {
        if self.controller.is_dirty() {
            self.pending_confirm = Some(PendingConfirm::Quit);
            return false;
        }
        true
    }

    /// Save and report the outcome. Returns whether the save succeeded.
    fn save(&mut self) -> bool {
        match self.controller.save() {
            Ok(()) => {
                self.status_message = Some(format!(
                    "saved {}",
                    self.controller.profile_path().display()
                ));
                true
            }
            Err(err) => {
                warn!(%err, "save failed");
                self.status_message = Some(format!("save failed: {err}"));
                false
            }
        }
    }
}

/// Run the interactive menu until the user quits.
pub fn run(controller: MenuController, status_message: Option<String>) -> Result<()> {
    let mut app = AppState::new(controller, status_message);

    let mut stdout = io::stdout();
    enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen)?;
    let _guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    loop {
        terminal.draw(|f| app.draw(f))?;
        if !event::poll(Duration::from_millis(200))? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            if matches!(key.kind, KeyEventKind::Release | KeyEventKind::Repeat) {
                continue;
            }
            if app.handle_key(key) {
                break;
            }
        }
    }
    Ok(())
}

struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let mut stdout = io::stdout();
        let _ = execute!(stdout, LeaveAlternateScreen);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::catalog;
    use crate::menu::model::ROOT_ID;
    use crate::menu::seed::SeedEntry;
    use crate::menu::value::ConfigValue;
    use crossterm::event::KeyModifiers;
    use ratatui::backend::TestBackend;
    use tempfile::TempDir;

    const ENTRIES: &[SeedEntry] = &[
        SeedEntry::category("development", ROOT_ID, "Development", "Programming tools"),
        SeedEntry::item("python", "development", "Python", "").on(),
        SeedEntry::item("docker", "development", "Docker", "Containers"),
        SeedEntry::category("system", ROOT_ID, "System", ""),
        SeedEntry::item("swappiness", "system", "Swappiness", "").slider(0, 100, 5, 60, ""),
    ];

    fn app(dir: &TempDir) -> AppState {
        let controller = MenuController::with_defaults(
            catalog::build(ENTRIES).unwrap(),
            dir.path().join("profile.yml"),
        );
        AppState::new(controller, None)
    }

    fn press(app: &mut AppState, code: KeyCode) -> bool {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn screen(app: &mut AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(90, 28)).unwrap();
        terminal.draw(|f| app.draw(f)).unwrap();
        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn enter_opens_category_and_space_toggles() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.controller.navigation().current_menu, "development");
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char(' '));
        assert!(app.controller.store().contains("docker"));
        assert_eq!(app.status_message.as_deref(), Some("selected Docker"));
        press(&mut app, KeyCode::Esc);
        assert!(app.controller.navigation().at_root());
    }

    #[test]
    fn space_on_category_toggles_whole_branch() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        press(&mut app, KeyCode::Char(' '));
        assert!(app.controller.store().contains("docker"));
        press(&mut app, KeyCode::Char(' '));
        assert!(!app.controller.store().contains("python"));
    }

    #[test]
    fn quit_when_clean_exits_immediately() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        assert!(press(&mut app, KeyCode::Char('q')));
    }

    #[test]
    fn quit_with_changes_asks_first() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        press(&mut app, KeyCode::Char('a'));
        assert!(!press(&mut app, KeyCode::Char('q')));
        assert_eq!(app.pending_confirm, Some(PendingConfirm::Quit));
        assert!(!press(&mut app, KeyCode::Esc));
        assert!(app.pending_confirm.is_none());
        assert!(!press(&mut app, KeyCode::Backspace), "back at root asks too");
        assert!(press(&mut app, KeyCode::Char('n')));
        assert!(!dir.path().join("profile.yml").exists());
    }

    #[test]
    fn quit_confirm_yes_saves() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Char('q'));
        assert!(press(&mut app, KeyCode::Char('y')));
        assert!(dir.path().join("profile.yml").exists());
    }

    #[test]
    fn save_key_writes_profile_and_returns_to_root() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('s'));
        assert!(dir.path().join("profile.yml").exists());
        assert!(app.controller.navigation().at_root());
        assert!(!app.controller.is_dirty());
        assert!(app.status_message.as_deref().unwrap().starts_with("saved"));
    }

    #[test]
    fn reset_needs_confirmation() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Char('r'));
        press(&mut app, KeyCode::Char('n'));
        assert!(app.controller.store().contains("docker"));
        press(&mut app, KeyCode::Char('r'));
        press(&mut app, KeyCode::Char('y'));
        assert_eq!(
            app.controller.store().ordered_ids(app.controller.catalog()),
            vec!["python"]
        );
    }

    #[test]
    fn configure_dialog_commits_through_controller() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Enter);
        assert!(app.configure.is_some());
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Right);
        assert!(!press(&mut app, KeyCode::Char('q')), "q is swallowed by the dialog");
        press(&mut app, KeyCode::Enter);
        assert!(app.configure.is_none());
        let config = app
            .controller
            .catalog()
            .get("swappiness")
            .unwrap()
            .config
            .clone()
            .unwrap();
        assert_eq!(config.value, ConfigValue::Slider(70));
        assert!(app.controller.store().contains("swappiness"));
    }

    #[test]
    fn help_overlay_swallows_keys_until_closed() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        press(&mut app, KeyCode::Char('?'));
        press(&mut app, KeyCode::Char(' '));
        assert!(app.controller.store().contains("python"));
        assert!(!press(&mut app, KeyCode::Char('q')));
        assert!(!app.show_help);
    }

    #[test]
    fn draw_shows_status_counts_and_description() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        let out = screen(&mut app);
        assert!(out.contains("Main Menu"));
        assert!(out.contains("> ◐ Development  1/2 ›"));
        assert!(out.contains("○ System  0/1 ›"));
        assert!(out.contains("Programming tools"));
    }

    #[test]
    fn cursor_stays_visible_on_a_short_screen() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        let mut terminal = Terminal::new(TestBackend::new(60, 14)).unwrap();
        terminal.draw(|f| app.draw(f)).unwrap();
        press(&mut app, KeyCode::End);
        terminal.draw(|f| app.draw(f)).unwrap();
        let nav = app.controller.navigation();
        assert!(nav.current_item >= nav.scroll_offset);
        assert!(nav.current_item < nav.scroll_offset + app.list_rows);
    }
}
