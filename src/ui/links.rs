use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::LinksState;
use crate::links::LinkEntry;

pub fn draw_links(frame: &mut Frame<'_>, area: Rect, links: &LinksState, focused: bool) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    let border = if focused { Color::White } else { Color::DarkGray };
    let hint = if links.visible { " m hide " } else { " m show " };
    let block = Block::default()
        .title(" links ")
        .title_bottom(hint)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if !links.visible || inner.height == 0 {
        return;
    }

    let max_items = inner.height as usize;
    let cursor = links.cursor.min(links.entries.len().saturating_sub(1));
    let start = if links.entries.len() <= max_items || cursor < max_items / 2 {
        0
    } else if cursor >= links.entries.len() - max_items / 2 {
        links.entries.len().saturating_sub(max_items)
    } else {
        cursor.saturating_sub(max_items / 2)
    };

    let lines: Vec<Line<'_>> = links
        .entries
        .iter()
        .enumerate()
        .skip(start)
        .take(max_items)
        .map(|(index, entry)| link_line(*entry, focused && index == cursor))
        .collect();
    frame.render_widget(Paragraph::new(lines), inner);
}

fn link_line(entry: LinkEntry, selected: bool) -> Line<'static> {
    let marker = if selected {
        Span::styled(" ┃ ", Style::default().fg(Color::White))
    } else {
        Span::raw("   ")
    };
    let (label, detail) = match entry {
        LinkEntry::Nav(link) => (link.text.to_string(), link.href.to_string()),
        LinkEntry::Social(link) => (format!("[{}] {}", link.icon, link.title), String::new()),
    };

    let mut spans = vec![marker, Span::raw(label)];
    if !detail.is_empty() {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(detail, Style::default().fg(Color::DarkGray)));
    }
    let style = if selected {
        Style::default()
            .bg(Color::Rgb(45, 45, 50))
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    Line::from(spans).style(style)
}
