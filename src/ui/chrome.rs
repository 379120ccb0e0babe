use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use crate::app::{AppState, Focus};
use crate::feeds::Quote;

pub const TITLE: &str = "magichear";
pub const SUBTITLE: &str = "且莫空山听雨去";

pub fn draw_header(frame: &mut Frame<'_>, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(TITLE, Style::default().add_modifier(Modifier::BOLD))),
        Line::from(Span::styled(SUBTITLE, Style::default().fg(Color::Gray))),
    ];
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

pub fn draw_quote(frame: &mut Frame<'_>, area: Rect, quote: &Quote) {
    let mut lines = vec![Line::from(quote.text.as_str())];
    if !quote.from.is_empty() {
        lines.push(Line::from(vec![
            Span::raw("-「"),
            Span::styled(
                quote.from.as_str(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("」"),
        ]));
    }
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray))
            .wrap(Wrap { trim: true }),
        area,
    );
}

pub fn draw_status(frame: &mut Frame<'_>, area: Rect, app: &AppState) {
    if area.height == 0 {
        return;
    }

    let wallpaper = match app.wallpapers.current_url() {
        Some(url) => format!(
            "wallpaper {}/{} | {url}",
            app.wallpapers.index() + 1,
            app.wallpapers.len()
        ),
        None => "wallpaper loading...".to_string(),
    };
    let top = Rect::new(area.x, area.y, area.width, 1);
    frame.render_widget(
        Paragraph::new(wallpaper).style(Style::default().fg(Color::DarkGray)),
        top,
    );

    if area.height < 2 {
        return;
    }
    let message = if app.status.message.is_empty() {
        match app.focus {
            Focus::Search => "enter search | tab engine | ctrl-l links | ctrl-c quit",
            Focus::Links => "j/k move | enter open | w wallpaper | / search | q quit",
        }
    } else {
        app.status.message.as_str()
    };
    let bottom = Rect::new(area.x, area.y + 1, area.width, 1);
    frame.render_widget(Paragraph::new(message), bottom);
}
