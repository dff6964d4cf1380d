//! Core of ReleaseRadar: release discovery, response parsing, local stores and
//! the view controller. Nothing in here touches the terminal.

pub mod config;
pub mod controller;
pub mod fetch;
pub mod gemini;
pub mod links;
pub mod parser;
pub mod platform;
pub mod settings;
pub mod song;
pub mod store;
