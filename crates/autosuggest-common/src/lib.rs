pub mod config;
pub mod suggestion;
