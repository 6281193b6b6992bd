pub mod embed;
pub mod error;
pub mod release;
pub mod types;
