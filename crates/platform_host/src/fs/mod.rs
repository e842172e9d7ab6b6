//! Remote file-manager contracts, wire models and test adapters.

pub mod error;
pub mod memory;
pub mod path;
pub mod service;
pub mod types;
