//! A desktop shell core: an authoritative window registry, pointer gestures
//! for dragging, resizing and edge snapping, and a shell controller that
//! mediates the taskbar and its overlays. The terminal host in [`runner`]
//! draws it all with ratatui.

pub mod actions;
pub mod apps;
pub mod cli;
pub mod config;
pub mod constants;
pub mod drivers;
pub mod error;
pub mod event_loop;
pub mod geometry;
pub mod gesture;
pub mod help;
pub mod keybindings;
pub mod panel;
pub mod runner;
pub mod shell;
pub mod theme;
pub mod tracing_sub;
pub mod ui;
pub mod window;
