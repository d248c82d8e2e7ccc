pub mod config;
pub mod connectivity;
pub mod http_backend;
