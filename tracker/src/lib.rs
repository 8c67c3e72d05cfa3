// Tracker library root: settings, CSV loading, the in-memory store and reports.

pub mod app;
pub mod config;
pub mod data;
pub mod error;
pub mod report;
