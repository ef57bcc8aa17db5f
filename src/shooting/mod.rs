//! Shooting module - charge-and-kick state machine and close-control skills

mod charge;
mod skills;

pub use charge::*;
pub use skills::*;
