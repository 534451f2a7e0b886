//! Employee directory: an in-memory record store, a validating record editor, and the table
//! and data-access pieces around them.

pub mod client;
pub mod config;
pub mod db;
pub mod directory;
pub mod editor;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod store;
pub mod table;
pub mod utils;
