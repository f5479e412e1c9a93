pub mod api;
pub mod booking;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod relay;
pub mod session;
pub mod ui;
