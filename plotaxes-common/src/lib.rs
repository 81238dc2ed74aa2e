pub mod bin;
pub mod error;
pub mod range;
pub mod time;
pub mod types;
