#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    HighlightNext,
    HighlightPrev,
    Submit,
    Dismiss,
    ToggleEngineDropdown,
    ClearQuery,
    FocusLinks,
    FocusSearch,
    NextLink,
    PrevLink,
    OpenLink,
    ToggleLinks,
    NextWallpaper,
    OpenWallpaper,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionId {
    HighlightNext,
    HighlightPrev,
    Submit,
    Dismiss,
    ToggleEngineDropdown,
    ClearQuery,
    FocusLinks,
    FocusSearch,
    NextLink,
    PrevLink,
    OpenLink,
    ToggleLinks,
    NextWallpaper,
    OpenWallpaper,
    Quit,
    SelectEngine,
    Navigate,
    Input,
    Feed,
}

impl ActionId {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::HighlightNext => "highlight-next",
            Self::HighlightPrev => "highlight-prev",
            Self::Submit => "submit",
            Self::Dismiss => "dismiss",
            Self::ToggleEngineDropdown => "toggle-engine-dropdown",
            Self::ClearQuery => "clear-query",
            Self::FocusLinks => "focus-links",
            Self::FocusSearch => "focus-search",
            Self::NextLink => "next-link",
            Self::PrevLink => "prev-link",
            Self::OpenLink => "open-link",
            Self::ToggleLinks => "toggle-links",
            Self::NextWallpaper => "next-wallpaper",
            Self::OpenWallpaper => "open-wallpaper",
            Self::Quit => "quit",
            Self::SelectEngine => "select-engine",
            Self::Navigate => "navigate",
            Self::Input => "input",
            Self::Feed => "feed",
        }
    }
}

impl Command {
    pub fn action_id(self) -> ActionId {
        match self {
            Self::HighlightNext => ActionId::HighlightNext,
            Self::HighlightPrev => ActionId::HighlightPrev,
            Self::Submit => ActionId::Submit,
            Self::Dismiss => ActionId::Dismiss,
            Self::ToggleEngineDropdown => ActionId::ToggleEngineDropdown,
            Self::ClearQuery => ActionId::ClearQuery,
            Self::FocusLinks => ActionId::FocusLinks,
            Self::FocusSearch => ActionId::FocusSearch,
            Self::NextLink => ActionId::NextLink,
            Self::PrevLink => ActionId::PrevLink,
            Self::OpenLink => ActionId::OpenLink,
            Self::ToggleLinks => ActionId::ToggleLinks,
            Self::NextWallpaper => ActionId::NextWallpaper,
            Self::OpenWallpaper => ActionId::OpenWallpaper,
            Self::Quit => ActionId::Quit,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Applied,
    Noop,
    QuitRequested,
}

#[cfg(test)]
mod tests {
    use super::{ActionId, Command};

    #[test]
    fn command_action_id_maps_search_and_link_variants() {
        assert_eq!(Command::Submit.action_id(), ActionId::Submit);
        assert_eq!(
            Command::ToggleEngineDropdown.action_id().as_str(),
            "toggle-engine-dropdown"
        );
        assert_eq!(Command::OpenLink.action_id(), ActionId::OpenLink);
        assert_eq!(ActionId::SelectEngine.as_str(), "select-engine");
    }
}
