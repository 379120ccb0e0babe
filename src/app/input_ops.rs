use std::time::Instant;

use crossterm::event::{KeyEvent, MouseButton, MouseEvent, MouseEventKind};

use crate::command::{ActionId, Command, CommandOutcome};
use crate::error::AppResult;
use crate::input::keymap::{KeymapPreset, map_key_to_command_with_preset};
use crate::widget::SearchBoxHit;

use super::core::App;
use super::state::Focus;

#[derive(Debug, Clone, Default)]
pub(crate) struct KeyEventOutcome {
    pub redraw: bool,
    pub quit_requested: bool,
}

impl App {
    pub(crate) fn handle_key_event(
        &mut self,
        key: KeyEvent,
        now: Instant,
    ) -> AppResult<KeyEventOutcome> {
        let preset = KeymapPreset::parse(&self.config.keymap.preset);
        if let Some(command) = map_key_to_command_with_preset(key, self.state.focus, preset) {
            let outcome = self.execute_command(command, now)?;
            return Ok(KeyEventOutcome {
                redraw: outcome == CommandOutcome::Applied,
                quit_requested: outcome == CommandOutcome::QuitRequested,
            });
        }

        if self.state.focus != Focus::Search {
            return Ok(KeyEventOutcome::default());
        }
        if let Some(effect) = self.search.search_box.handle_text_key(key) {
            self.apply_search_effect(effect, now);
        }
        Ok(KeyEventOutcome {
            redraw: true,
            quit_requested: false,
        })
    }

    pub(crate) fn execute_command(
        &mut self,
        command: Command,
        now: Instant,
    ) -> AppResult<CommandOutcome> {
        let engine_count = self.search.engines.list().len();
        let search_box = &mut self.search.search_box;
        tracing::trace!(command = command.action_id().as_str(), "executing command");

        match command {
            Command::HighlightNext => search_box.move_next(engine_count),
            Command::HighlightPrev => search_box.move_prev(engine_count),
            Command::Submit => {
                let Some(effect) = search_box.submit() else {
                    return Ok(CommandOutcome::Noop);
                };
                self.apply_search_effect(effect, now);
            }
            Command::Dismiss => search_box.escape(),
            Command::ToggleEngineDropdown => {
                search_box.toggle_dropdown(self.search.engines.preferred_index());
            }
            Command::ClearQuery => {
                let effect = search_box.clear();
                self.apply_search_effect(effect, now);
            }
            Command::FocusLinks => {
                search_box.begin_blur(now, self.search.blur_grace);
                self.state.focus = Focus::Links;
                self.state.links.visible = true;
            }
            Command::FocusSearch => {
                search_box.focus();
                self.state.focus = Focus::Search;
            }
            Command::NextLink => self.state.links.move_cursor(true),
            Command::PrevLink => self.state.links.move_cursor(false),
            Command::OpenLink => self.open_selected_link(),
            Command::ToggleLinks => {
                self.state.links.visible = !self.state.links.visible;
                if !self.state.links.visible {
                    search_box.focus();
                    self.state.focus = Focus::Search;
                }
            }
            Command::NextWallpaper => match self.state.wallpapers.advance() {
                Some(url) => self.state.set_status(
                    ActionId::NextWallpaper,
                    format!(
                        "wallpaper {}/{}: {url}",
                        self.state.wallpapers.index() + 1,
                        self.state.wallpapers.len()
                    ),
                ),
                None => return Ok(CommandOutcome::Noop),
            },
            Command::OpenWallpaper => {
                let Some(url) = self.state.wallpapers.current_url() else {
                    return Ok(CommandOutcome::Noop);
                };
                self.open_url(ActionId::OpenWallpaper, &url);
            }
            Command::Quit => return Ok(CommandOutcome::QuitRequested),
        }

        self.state.status.last_action_id = Some(command.action_id());
        Ok(CommandOutcome::Applied)
    }

    fn open_selected_link(&mut self) {
        let Some(entry) = self.state.links.selected() else {
            return;
        };
        match entry.resolve() {
            Ok(url) => self.open_url(ActionId::OpenLink, &url),
            Err(err) => {
                tracing::warn!(link = entry.label(), error = %err, "link cannot be resolved");
                self.state.set_status(
                    ActionId::OpenLink,
                    format!("cannot open {}: {err}", entry.label()),
                );
            }
        }
    }

    fn open_url(&mut self, action: ActionId, url: &str) {
        let message = match self.navigator_mut().open(url) {
            Ok(()) => format!("opened {url}"),
            Err(err) => {
                tracing::warn!(%url, error = %err, "navigation failed");
                format!("failed to open {url}: {err}")
            }
        };
        self.state.set_status(action, message);
    }

    /// Returns whether the frame needs redrawing.
    pub(crate) fn handle_mouse_event(&mut self, mouse: MouseEvent, now: Instant) -> bool {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.handle_pointer_down(mouse.column, mouse.row, now);
                true
            }
            MouseEventKind::Moved => match self.state.search_layout.hit(mouse.column, mouse.row) {
                Some(SearchBoxHit::Suggestion(row)) => self.search.search_box.hover(row),
                _ => false,
            },
            _ => false,
        }
    }

    fn handle_pointer_down(&mut self, column: u16, row: u16, now: Instant) {
        let Some(hit) = self.state.search_layout.hit(column, row) else {
            let search_box = &mut self.search.search_box;
            search_box.outside_press();
            search_box.begin_blur(now, self.search.blur_grace);
            return;
        };

        self.state.focus = Focus::Search;
        let search_box = &mut self.search.search_box;
        let effect = match hit {
            SearchBoxHit::Badge => {
                search_box.toggle_dropdown(self.search.engines.preferred_index());
                None
            }
            SearchBoxHit::Clear => Some(search_box.clear()),
            SearchBoxHit::Engine(index) => Some(search_box.select_engine(index)),
            SearchBoxHit::Suggestion(row) => search_box.press(row),
            SearchBoxHit::Input | SearchBoxHit::Frame => {
                search_box.focus();
                None
            }
        };
        if let Some(effect) = effect {
            self.apply_search_effect(effect, now);
        }
    }

    pub(crate) fn handle_focus_lost(&mut self, now: Instant) {
        self.search
            .search_box
            .begin_blur(now, self.search.blur_grace);
    }

    pub(crate) fn handle_focus_gained(&mut self) {
        if self.state.focus == Focus::Search {
            self.search.search_box.focus();
        }
    }
}
