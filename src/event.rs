use crossterm::event::Event;

use crate::feeds::Quote;
use crate::suggest::SuggestEvent;

#[derive(Debug)]
pub(crate) enum DomainEvent {
    Input(Event),
    InputError(String),
    QuoteLoaded(Quote),
    WallpapersLoaded(Vec<String>),
    Suggestions(SuggestEvent),
    RedrawTick,
    Wake,
}
