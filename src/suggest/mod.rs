pub mod debounce;
pub mod provider;
pub mod transport;
pub mod worker;

pub use debounce::{DebounceController, IssuedQuery, QueryChange};
pub use provider::{ResponseShape, SuggestEndpoint, endpoint_for, parse_suggestions};
pub use transport::{HttpTransport, SuggestTransport};
pub use worker::{InFlightTable, SuggestEvent, SuggestWorker};
