// src/services/mod.rs
pub mod chat_backend;
pub mod chatbot;
pub mod completion;
pub mod session_store;
pub mod widget;
