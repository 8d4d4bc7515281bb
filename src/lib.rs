mod config;
mod decoder;
mod errors;
mod event;
mod handler;
mod monitor;
mod source;

pub mod metrics;

pub use config::*;
pub use decoder::*;
pub use errors::*;
pub use event::*;
pub use handler::*;
pub use monitor::*;
pub use source::*;

//-----------------------------------------------------------
// Test utils

#[cfg(test)]
pub mod test_utils;
