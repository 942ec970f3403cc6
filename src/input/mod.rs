//! Input adapters.
//!
//! Turn what the outside world hands us (command-line flags, JSON files) into
//! validated render requests.

pub mod cli;
