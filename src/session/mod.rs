pub mod resume;
pub mod store;
