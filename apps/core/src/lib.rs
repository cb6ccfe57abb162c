pub mod action_executor;
pub mod clipboard_history;
pub mod clipboard_monitor;
pub mod config;
pub mod contract;
pub mod core_service;
pub mod discovery;
pub mod index_store;
pub mod logging;
pub mod model;
pub mod runtime;
pub mod search;
pub mod transport;
