pub mod builder;
pub mod inline;
pub mod response_model;
