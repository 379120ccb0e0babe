use ratatui::layout::{Position, Rect};

pub const BOX_HEIGHT: u16 = 3;
const BADGE_WIDTH: u16 = 3;
const CLEAR_WIDTH: u16 = 3;
const DROPDOWN_WIDTH: u16 = 18;

/// Part of the search widget under a pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchBoxHit {
    Badge,
    Clear,
    Input,
    Engine(usize),
    Suggestion(usize),
    /// Inside the container but on no control (borders, padding).
    Frame,
}

/// Screen geometry of the search widget, shared by drawing and hit-testing.
///
/// `container` covers the box plus whichever popup rows are open.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchBoxLayout {
    pub container: Rect,
    pub frame: Rect,
    pub badge: Rect,
    pub input: Rect,
    pub clear: Rect,
    pub engine_rows: Vec<Rect>,
    pub suggestion_rows: Vec<Rect>,
    /// Popup rows that fit below the box, drawn or not.
    pub popup_room: usize,
}

impl SearchBoxLayout {
    /// Lays the box out at the top of `area`; popup rows hang below it and
    /// are clipped to `area`.
    pub fn compute(area: Rect, engine_rows: usize, suggestion_rows: usize) -> Self {
        let frame = Rect::new(area.x, area.y, area.width, BOX_HEIGHT.min(area.height));
        let inner_y = frame.y.saturating_add(1);
        let inner_x = frame.x.saturating_add(1);
        let inner_width = frame.width.saturating_sub(2);
        let row_height = u16::from(frame.height >= BOX_HEIGHT);

        let badge_width = BADGE_WIDTH.min(inner_width);
        let clear_width = CLEAR_WIDTH.min(inner_width.saturating_sub(badge_width));
        let badge = Rect::new(inner_x, inner_y, badge_width, row_height);
        let clear = Rect::new(
            inner_x + inner_width - clear_width,
            inner_y,
            clear_width,
            row_height,
        );
        let input = Rect::new(
            inner_x + badge_width,
            inner_y,
            inner_width.saturating_sub(badge_width + clear_width),
            row_height,
        );

        let popup_top = frame.y + frame.height;
        let popup_room = area.bottom().saturating_sub(popup_top);
        let engine_rows = popup_rows(
            frame.x,
            popup_top,
            DROPDOWN_WIDTH.min(frame.width),
            engine_rows,
            popup_room,
        );
        let suggestion_rows =
            popup_rows(frame.x, popup_top, frame.width, suggestion_rows, popup_room);

        let popup_height = engine_rows.len().max(suggestion_rows.len()) as u16;
        let container = Rect::new(frame.x, frame.y, frame.width, frame.height + popup_height);

        Self {
            container,
            frame,
            badge,
            input,
            clear,
            engine_rows,
            suggestion_rows,
            popup_room: popup_room as usize,
        }
    }

    /// `None` means the point is outside the widget.
    pub fn hit(&self, column: u16, row: u16) -> Option<SearchBoxHit> {
        let point = Position::new(column, row);
        if !self.container.contains(point) {
            return None;
        }
        if let Some(index) = self.engine_rows.iter().position(|rect| rect.contains(point)) {
            return Some(SearchBoxHit::Engine(index));
        }
        if let Some(index) = self
            .suggestion_rows
            .iter()
            .position(|rect| rect.contains(point))
        {
            return Some(SearchBoxHit::Suggestion(index));
        }
        if self.badge.contains(point) {
            return Some(SearchBoxHit::Badge);
        }
        if self.clear.contains(point) {
            return Some(SearchBoxHit::Clear);
        }
        if self.input.contains(point) {
            return Some(SearchBoxHit::Input);
        }
        Some(SearchBoxHit::Frame)
    }
}

fn popup_rows(x: u16, top: u16, width: u16, count: usize, room: u16) -> Vec<Rect> {
    (0..count.min(room as usize))
        .map(|offset| Rect::new(x, top + offset as u16, width, 1))
        .collect()
}

#[cfg(test)]
mod tests {
    use ratatui::layout::Rect;

    use super::{SearchBoxHit, SearchBoxLayout};

    #[test]
    fn closed_widget_is_just_the_box() {
        let layout = SearchBoxLayout::compute(Rect::new(10, 5, 40, 12), 0, 0);
        assert_eq!(layout.container, Rect::new(10, 5, 40, 3));
        assert_eq!(layout.hit(11, 6), Some(SearchBoxHit::Badge));
        assert_eq!(layout.hit(20, 6), Some(SearchBoxHit::Input));
        assert_eq!(layout.hit(47, 6), Some(SearchBoxHit::Clear));
        assert_eq!(layout.hit(10, 5), Some(SearchBoxHit::Frame));
        assert_eq!(layout.hit(20, 8), None);
        assert_eq!(layout.hit(9, 6), None);
    }

    #[test]
    fn open_dropdown_extends_container_under_the_badge() {
        let layout = SearchBoxLayout::compute(Rect::new(0, 0, 40, 12), 4, 0);
        assert_eq!(layout.engine_rows.len(), 4);
        assert_eq!(layout.container.height, 7);
        assert_eq!(layout.hit(2, 3), Some(SearchBoxHit::Engine(0)));
        assert_eq!(layout.hit(2, 6), Some(SearchBoxHit::Engine(3)));
        assert_eq!(layout.hit(30, 4), Some(SearchBoxHit::Frame));
        assert_eq!(layout.hit(2, 7), None);
    }

    #[test]
    fn suggestion_rows_span_the_box_width_and_clip_to_area() {
        let layout = SearchBoxLayout::compute(Rect::new(0, 0, 30, 6), 0, 8);
        assert_eq!(layout.suggestion_rows.len(), 3);
        assert_eq!(layout.hit(29, 4), Some(SearchBoxHit::Suggestion(1)));
        assert_eq!(layout.hit(29, 6), None);
    }

    #[test]
    fn tiny_areas_do_not_underflow() {
        let layout = SearchBoxLayout::compute(Rect::new(0, 0, 2, 1), 4, 8);
        assert!(layout.engine_rows.is_empty());
        assert!(layout.suggestion_rows.is_empty());
        assert_eq!(layout.input.width, 0);
    }
}
