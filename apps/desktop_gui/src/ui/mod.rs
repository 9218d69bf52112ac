//! UI layer for the desktop front end: app shell, panels and theme.

pub mod app;
pub mod panels;
pub mod theme;

pub use app::NegotiationDeskApp;
