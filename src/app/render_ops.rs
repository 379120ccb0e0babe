use crate::error::AppResult;
use crate::ui::draw_home;

use super::core::App;
use super::terminal_session::TerminalSurface;

impl App {
    /// Draws one frame and records where the search widget landed so the
    /// next pointer event can be hit-tested against it.
    pub(crate) fn render_frame(&mut self, session: &mut impl TerminalSurface) -> AppResult<()> {
        let engines = self.search.engines.list();
        let current = self.search.engines.preferred_index();
        let search_box = &self.search.search_box;
        let state = &self.state;

        let mut search_layout = None;
        session.draw(|frame| {
            search_layout = Some(draw_home(frame, state, search_box, engines, current));
        })?;

        if let Some(layout) = search_layout {
            self.search.search_box.set_row_capacity(layout.popup_room);
            self.state.search_layout = layout;
        }
        Ok(())
    }
}
