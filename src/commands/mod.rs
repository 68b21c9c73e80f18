// Shieldy Commands
// Command layer shared by the HTTP server and tests

pub mod badge;
mod context;
pub mod favorites;
mod invoke;
pub mod system;

pub use context::*;
pub use invoke::*;
