//! Game event logging
//!
//! Tick systems emit `GameEvent`s onto the `EventBus`. Headless runs can
//! write them to `.evlog` files in a compact text format.

mod bus;
mod format;
mod logger;
mod types;

pub use bus::{BusEvent, EventBus};
pub use format::{parse_event, serialize_event};
pub use logger::{EventLogConfig, EventLogger};
pub use types::{GameEvent, Side};
