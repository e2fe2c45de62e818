//! Feasibility simulation and solution validation.
//!
//! - [`Truck`] — move-by-move capacity and route-limit simulator used by
//!   every constructor
//! - [`is_valid`] / [`find_violation`] — independent checker for finished
//!   solutions

mod truck;
mod validator;

pub use truck::{Truck, TruckState};
pub use validator::{find_violation, is_valid, Violation};
