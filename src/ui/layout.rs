use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::widget::BOX_HEIGHT;

const COLUMN_WIDTH: u16 = 72;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiLayout {
    pub header: Rect,
    pub quote: Rect,
    /// The search box plus the rows its popups may cover.
    pub search: Rect,
    pub links: Rect,
    pub status: Rect,
}

pub fn split_layout(area: Rect) -> UiLayout {
    let column = centered_column(area, COLUMN_WIDTH);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),          // Title and subtitle
            Constraint::Length(3),          // Quote
            Constraint::Length(BOX_HEIGHT), // Search box
            Constraint::Min(0),             // Links
            Constraint::Length(2),          // Wallpaper and status
        ])
        .split(column);

    let search = Rect::new(
        chunks[2].x,
        chunks[2].y,
        chunks[2].width,
        chunks[2].height + chunks[3].height,
    );

    UiLayout {
        header: chunks[0],
        quote: chunks[1],
        search,
        links: chunks[3],
        status: chunks[4],
    }
}

pub(crate) fn centered_column(area: Rect, width: u16) -> Rect {
    let width = width.max(1).min(area.width);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    Rect::new(x, area.y, width, area.height)
}
