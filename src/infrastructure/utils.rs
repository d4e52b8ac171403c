pub mod timeout;
pub mod valid_uuid;
