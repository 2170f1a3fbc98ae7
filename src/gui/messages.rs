//! Message types for GUI event handling

use crate::launcher::LaunchOutcome;

/// Which field a browse button fills, and with what kind of picker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowseTarget {
    /// Source field, picking a directory
    SourceFolder,
    /// Source field, picking a single file
    SourceFile,
    /// Destination field, always a directory
    Destination,
}

impl BrowseTarget {
    /// Dialog title
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::SourceFolder => "Select source directory",
            Self::SourceFile => "Select source file",
            Self::Destination => "Select destination directory",
        }
    }

    /// True when the dialog picks a file rather than a folder
    #[must_use]
    pub const fn picks_file(self) -> bool {
        matches!(self, Self::SourceFile)
    }

    /// True when the picked path goes into the source field
    #[must_use]
    pub const fn fills_source(self) -> bool {
        !matches!(self, Self::Destination)
    }
}

/// Messages handled by the main application component
#[derive(Debug)]
pub enum Message {
    /// No-op message (default for unhandled events)
    Noop,

    /// User requested to close the window
    WindowClose,

    /// Window was resized
    Resize,

    /// User clicked one of the browse buttons
    Browse(BrowseTarget),

    /// User clicked "Generate CLI code"
    Generate,

    /// User clicked "Generate CLI code and Execute"
    Execute,

    /// The launch worker reported back
    RunFinished(LaunchOutcome),
}
