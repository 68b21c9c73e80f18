// Shieldy - Backend Library
// Badge URL composition, favorites and export

pub mod commands;
pub mod models;
pub mod services;
