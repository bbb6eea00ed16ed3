pub mod app;
pub mod charts;
pub mod config;
pub mod data;
pub mod error;
pub mod state;
pub mod theme;
pub mod ui;
