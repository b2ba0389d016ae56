//! Simple to use cli/daemon for tracking your water intake throughout the day.
//! Drinks are logged from a terminal, rolling weekly and monthly statistics
//! are derived on demand, and a small daemon delivers periodic hydration
//! reminders.

pub mod cli;
pub mod daemon;
pub mod stats;
pub mod store;
pub mod utils;
