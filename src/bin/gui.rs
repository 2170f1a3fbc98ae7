//! GUI frontend for robowrap using winio
//!
//! A form for picking paths and robocopy options, with buttons to generate
//! the command line or generate and run it.

use winio::prelude::*;

use robowrap::gui::RobowrapApp;

fn main() {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    // Run the winio application
    App::new("rs.robowrap.gui").run::<RobowrapApp>(());
}
