
pub mod archiver;
pub mod backend;
pub mod commands;
pub mod config;
pub mod error;
pub mod global;
pub mod rotation;
pub mod testing;
pub mod ui;
pub mod utils;
