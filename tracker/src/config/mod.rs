// Tracker configuration module
pub mod settings;
