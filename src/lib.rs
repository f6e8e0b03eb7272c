pub mod aggregate;
pub mod classify;
pub mod cli;
pub mod commits;
pub mod error;
pub mod export;
pub mod model;
pub mod pulls;
pub mod source;
pub mod store;
pub mod util;
