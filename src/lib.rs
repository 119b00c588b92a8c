pub mod calendar;
pub mod campaign;
pub mod clock;
pub mod command;
pub mod config;
pub mod error;
pub mod moon;
pub mod notes;
pub mod quest;
pub mod render;
pub mod session;
