pub mod data_uri;
pub mod error;
pub mod filename;
pub mod gateway;
