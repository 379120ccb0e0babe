mod core;
mod event_bus;
mod event_loop;
mod input_ops;
mod render_ops;
mod search_ops;
mod state;
pub(crate) mod terminal_session;

#[cfg(test)]
mod tests;

pub use core::{App, SearchSubsystem};
pub use state::{AppState, Focus, LinksState, StatusState};
