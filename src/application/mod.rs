pub mod access;
pub mod builder;
pub mod dto;
pub mod errors;
pub mod ports;
pub mod session;
pub mod use_cases;
