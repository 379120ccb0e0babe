use std::time::Instant;

use crossterm::event::{Event, KeyEventKind};

use crate::app::{App, Focus};
use crate::error::AppResult;

#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct InputEventOutcome {
    pub(crate) quit_requested: bool,
    pub(crate) redraw: bool,
}

impl App {
    pub(crate) fn handle_input_event(
        &mut self,
        event: Event,
        now: Instant,
    ) -> AppResult<InputEventOutcome> {
        match event {
            Event::Key(key) if matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) => {
                let outcome = self.handle_key_event(key, now)?;
                Ok(InputEventOutcome {
                    quit_requested: outcome.quit_requested,
                    redraw: outcome.redraw,
                })
            }
            Event::Mouse(mouse) => Ok(InputEventOutcome {
                quit_requested: false,
                redraw: self.handle_mouse_event(mouse, now),
            }),
            Event::Paste(text) if self.state.focus == Focus::Search => {
                if let Some(effect) = self.search.search_box.insert_text(&text) {
                    self.apply_search_effect(effect, now);
                }
                Ok(InputEventOutcome {
                    quit_requested: false,
                    redraw: true,
                })
            }
            Event::FocusLost => {
                self.handle_focus_lost(now);
                Ok(InputEventOutcome::default())
            }
            Event::FocusGained => {
                self.handle_focus_gained();
                Ok(InputEventOutcome {
                    quit_requested: false,
                    redraw: true,
                })
            }
            Event::Resize(_, _) => Ok(InputEventOutcome {
                quit_requested: false,
                redraw: true,
            }),
            _ => Ok(InputEventOutcome::default()),
        }
    }
}
