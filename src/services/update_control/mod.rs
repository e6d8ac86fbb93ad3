pub mod monitor;
pub mod service;
