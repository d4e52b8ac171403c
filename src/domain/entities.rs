pub mod envelope;
pub mod project;
