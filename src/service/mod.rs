pub mod autofill_service;
pub mod command;
pub mod error;
