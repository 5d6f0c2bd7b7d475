pub mod app;
pub mod config;
pub mod conversation;
pub mod message;
pub mod session;
