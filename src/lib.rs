//! termenu: terminal menus that edit bound variables in place.

pub mod cell;
pub mod config;
pub mod demo;
pub mod error;
pub mod label;
pub mod layout;
pub mod navigator;
pub mod prompt;
pub mod render;
pub mod report;
pub mod theme;
pub mod tui;
