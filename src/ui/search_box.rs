use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use unicode_width::UnicodeWidthChar;

use crate::engine::SearchEngine;
use crate::widget::{SearchBox, SearchBoxLayout};

const ROW_HIGHLIGHT: Color = Color::Rgb(45, 45, 50);

/// Draws the widget over `area` and returns the geometry it used.
pub fn draw_search_box(
    frame: &mut Frame<'_>,
    area: Rect,
    search_box: &SearchBox,
    engines: &[SearchEngine],
    current: usize,
) -> SearchBoxLayout {
    let engine_rows = if search_box.is_dropdown_open() {
        engines.len()
    } else {
        0
    };
    let suggestion_rows = if search_box.suggestions_visible() {
        search_box.suggestions().len()
    } else {
        0
    };
    let layout = SearchBoxLayout::compute(area, engine_rows, suggestion_rows);
    if layout.frame.width == 0 || layout.frame.height == 0 {
        return layout;
    }
    let Some(engine) = engines.get(current).or_else(|| engines.first()) else {
        return layout;
    };
    let accent = accent_color(&engine.accent_color);

    let border = if search_box.is_focused() {
        Style::default().fg(accent)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    frame.render_widget(
        Block::default().borders(Borders::ALL).border_style(border),
        layout.frame,
    );

    frame.render_widget(
        Paragraph::new(format!(" {} ", engine.badge))
            .style(Style::default().fg(Color::Black).bg(accent).bold()),
        layout.badge,
    );

    let input_line = if search_box.value().is_empty() && !search_box.is_focused() {
        Line::from(Span::styled(
            format!(" {}", engine.label),
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        build_input_line(
            search_box.value(),
            search_box.cursor(),
            layout.input.width as usize,
            search_box.is_focused(),
        )
    };
    frame.render_widget(Paragraph::new(input_line), layout.input);

    if !search_box.value().is_empty() {
        frame.render_widget(
            Paragraph::new(" × ").style(Style::default().fg(Color::DarkGray)),
            layout.clear,
        );
    }

    for (index, row) in layout.engine_rows.iter().enumerate() {
        let Some(option) = engines.get(index) else {
            break;
        };
        let mut style = Style::default().fg(accent_color(&option.accent_color));
        if index == current {
            style = style.add_modifier(Modifier::BOLD);
        }
        if index == search_box.dropdown_cursor() {
            style = style.bg(ROW_HIGHLIGHT);
        }
        frame.render_widget(Clear, *row);
        frame.render_widget(
            Paragraph::new(padded(
                &format!(" {} {}", option.badge, option.label),
                row.width,
            ))
            .style(style),
            *row,
        );
    }

    for (index, row) in layout.suggestion_rows.iter().enumerate() {
        let Some(text) = search_box.suggestions().get(index) else {
            break;
        };
        let highlighted = search_box.highlight() == Some(index);
        let line = if highlighted {
            Line::from(vec![
                Span::styled(" ┃ ", Style::default().fg(accent)),
                Span::raw(padded(text, row.width.saturating_sub(3))),
            ])
            .style(Style::default().bg(ROW_HIGHLIGHT))
        } else {
            Line::from(vec![
                Span::raw("   "),
                Span::raw(padded(text, row.width.saturating_sub(3))),
            ])
        };
        frame.render_widget(Clear, *row);
        frame.render_widget(Paragraph::new(line), *row);
    }

    layout
}

/// `#rrggbb` or a terminal color name; unknown values fall back to cyan.
pub(crate) fn accent_color(value: &str) -> Color {
    value.parse::<Color>().unwrap_or(Color::Cyan)
}

fn padded(text: &str, width: u16) -> String {
    let used: usize = text.chars().map(|ch| ch.width().unwrap_or(0)).sum();
    let mut line = text.to_string();
    line.push_str(&" ".repeat((width as usize).saturating_sub(used)));
    line
}

/// Renders the visible slice of `input` with a software caret, scrolled so
/// the caret cell stays on screen.
fn build_input_line(input: &str, cursor: usize, width: usize, caret: bool) -> Line<'static> {
    let chars: Vec<char> = input.chars().collect();
    let cursor = cursor.min(chars.len());
    let width = width.max(1);
    let cell = |ch: &char| ch.width().unwrap_or(0);

    let mut start = 0usize;
    while start < cursor && chars[start..cursor].iter().map(cell).sum::<usize>() + 1 > width {
        start += 1;
    }

    let mut spans = Vec::new();
    let mut used = 0usize;
    for (idx, ch) in chars.iter().enumerate().skip(start) {
        let ch_width = cell(ch);
        if used + ch_width > width {
            break;
        }
        used += ch_width;
        if caret && idx == cursor {
            spans.push(Span::styled(ch.to_string(), Style::default().reversed()));
        } else {
            spans.push(Span::raw(ch.to_string()));
        }
    }
    if caret && cursor == chars.len() && used < width {
        spans.push(Span::styled(" ".to_string(), Style::default().reversed()));
    }
    Line::from(spans)
}
