//! Project timeline with drag-to-reschedule task bars.

pub mod app;
pub mod config;
pub mod error;
pub mod io;
pub mod model;
pub mod reschedule;
pub mod ui;
