pub mod app;
pub mod command;
pub mod config;
pub mod engine;
pub mod error;
pub(crate) mod event;
pub mod feeds;
pub mod input;
pub mod links;
pub mod logging;
pub mod navigate;
pub mod suggest;
pub mod ui;
pub mod widget;
