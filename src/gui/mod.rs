//! GUI module for robowrap
//!
//! Provides a cross-platform graphical front-end using winio.

pub mod app;
pub mod messages;

// Re-export main types
pub use app::RobowrapApp;
pub use messages::Message;
