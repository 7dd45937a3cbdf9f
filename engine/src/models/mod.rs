//! Domain types: recipient records, the watchlist store, and events.

pub mod event;
pub mod recipient;
pub mod watchlist;

pub use event::{Event, EventLog};
pub use recipient::RecipientRecord;
pub use watchlist::{Watchlist, WatchlistError};
