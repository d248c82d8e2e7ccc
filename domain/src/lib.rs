pub mod backend;
pub mod failure_policy;
pub mod models;
pub mod scroll;
pub mod session;
pub mod state;
