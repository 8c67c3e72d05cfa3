// Loading and holding household data
pub mod inventory_csv;
pub mod inventory_store;
