//! Core types shared by every layout stage
//!
//! Data model, configuration, errors, the strategy trait and logging setup.

mod config;
mod error;
mod graph;
mod layout;
pub mod logging;
mod types;

pub use config::*;
pub use error::*;
pub use graph::*;
pub use layout::*;
pub use logging::*;
pub use types::*;
