mod layout;
mod search_box;

pub use layout::{BOX_HEIGHT, SearchBoxHit, SearchBoxLayout};
pub use search_box::{SearchBox, SearchBoxEffect};
