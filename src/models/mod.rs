//! Data models

pub mod chat;

pub use chat::*;
