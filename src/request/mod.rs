pub mod blocklist;
pub mod caller;
pub mod inference;
pub mod parser;
pub mod request_model;
