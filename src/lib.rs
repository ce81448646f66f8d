pub mod client;
pub mod cmd;
pub mod error;
pub mod store;
