pub mod aws;
pub mod config;
pub mod logging;
