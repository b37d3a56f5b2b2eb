//! Periodically describes what is on the screen through a vision-language model, keeps the
//! descriptions in one plain text log per day, and turns a day's log into an hourly timeline
//! with productivity notes.
//!

pub mod app;
pub mod capture;
pub mod cli;
pub mod config;
pub mod model;
pub mod recorder;
pub mod storage;
pub mod utils;
