use crate::command::ActionId;
use crate::feeds::{Quote, WallpaperRotation};
use crate::links::{LinkEntry, all_links};
use crate::widget::SearchBoxLayout;

/// Which part of the page receives keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Search,
    Links,
}

#[derive(Debug, Clone, Default)]
pub struct StatusState {
    pub message: String,
    pub last_action_id: Option<ActionId>,
}

#[derive(Debug, Clone)]
pub struct LinksState {
    pub entries: Vec<LinkEntry>,
    pub visible: bool,
    /// Index into `entries`.
    pub cursor: usize,
}

impl Default for LinksState {
    fn default() -> Self {
        Self {
            entries: all_links(),
            visible: true,
            cursor: 0,
        }
    }
}

impl LinksState {
    pub fn selected(&self) -> Option<LinkEntry> {
        self.entries.get(self.cursor).copied()
    }

    pub fn move_cursor(&mut self, forward: bool) {
        let len = self.entries.len();
        if len == 0 {
            return;
        }
        self.cursor = if forward {
            (self.cursor + 1) % len
        } else {
            (self.cursor + len - 1) % len
        };
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub focus: Focus,
    pub status: StatusState,
    pub links: LinksState,
    pub quote: Quote,
    pub wallpapers: WallpaperRotation,
    /// Geometry of the search widget from the last drawn frame.
    pub search_layout: SearchBoxLayout,
}

impl AppState {
    pub fn new(wallpaper_host: &str) -> Self {
        Self {
            focus: Focus::Search,
            status: StatusState::default(),
            links: LinksState::default(),
            quote: Quote::default(),
            wallpapers: WallpaperRotation::new(wallpaper_host, Vec::new()),
            search_layout: SearchBoxLayout::default(),
        }
    }

    pub fn set_status(&mut self, action: ActionId, message: impl Into<String>) {
        self.status.last_action_id = Some(action);
        self.status.message = message.into();
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new("")
    }
}
