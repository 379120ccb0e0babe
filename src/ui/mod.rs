mod chrome;
mod layout;
mod links;
mod search_box;

use ratatui::Frame;

use crate::app::{AppState, Focus};
use crate::engine::SearchEngine;
use crate::widget::{SearchBox, SearchBoxLayout};

pub use chrome::{SUBTITLE, TITLE, draw_header, draw_quote, draw_status};
pub use layout::{UiLayout, split_layout};
pub use links::draw_links;
pub use search_box::draw_search_box;

/// Draws the whole page. The search widget goes last so its popups cover
/// the link panel.
pub fn draw_home(
    frame: &mut Frame<'_>,
    app: &AppState,
    search_box: &SearchBox,
    engines: &[SearchEngine],
    current_engine: usize,
) -> SearchBoxLayout {
    let layout = split_layout(frame.area());
    draw_header(frame, layout.header);
    draw_quote(frame, layout.quote, &app.quote);
    draw_links(frame, layout.links, &app.links, app.focus == Focus::Links);
    draw_status(frame, layout.status, app);
    draw_search_box(frame, layout.search, search_box, engines, current_engine)
}
