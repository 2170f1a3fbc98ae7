//! Pre-flight checks on a copy request
//!
//! The only side effects are filesystem existence checks. A request that
//! passes comes back as a [`ValidatedRequest`] that remembers whether the
//! source was a file or a directory, so formatting never has to look at the
//! filesystem again.

use crate::error::ValidationError;
use crate::request::CopyRequest;
use std::path::{Path, PathBuf};
use tracing::debug;

/// What the source path turned out to be at validation time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    File,
    Directory,
}

/// A request that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRequest {
    request: CopyRequest,
    source_kind: SourceKind,
}

impl ValidatedRequest {
    #[must_use]
    pub const fn request(&self) -> &CopyRequest {
        &self.request
    }

    #[must_use]
    pub const fn source_kind(&self) -> SourceKind {
        self.source_kind
    }

    /// Build without touching the filesystem
    ///
    /// Used by tests and callers that already know the source kind.
    #[must_use]
    pub const fn assume(request: CopyRequest, source_kind: SourceKind) -> Self {
        Self {
            request,
            source_kind,
        }
    }
}

/// Validate a copy request
///
/// Checks, in order: the source exists as a file or directory, mirror is not
/// requested for a single file, and the destination's parent is a directory.
///
/// # Errors
///
/// Returns the first [`ValidationError`] that applies.
pub fn validate(request: &CopyRequest) -> Result<ValidatedRequest, ValidationError> {
    let source = &request.source;
    let source_kind = if source.is_dir() {
        SourceKind::Directory
    } else if source.is_file() {
        SourceKind::File
    } else {
        return Err(ValidationError::SourceNotFound(source.clone()));
    };

    if request.mirror {
        if source_kind == SourceKind::File {
            return Err(ValidationError::MirrorSingleFile(source.clone()));
        }
        if request.destination.is_file() {
            return Err(ValidationError::MirrorSingleFile(request.destination.clone()));
        }
    }

    let parent = destination_parent(&request.destination);
    if !parent.is_dir() {
        return Err(ValidationError::DestinationParent(parent));
    }

    debug!(
        "Validated {:?} copy: {} -> {}",
        source_kind,
        source.display(),
        request.destination.display()
    );

    Ok(ValidatedRequest {
        request: request.clone(),
        source_kind,
    })
}

/// Directory that must exist for the destination to be creatable
///
/// A root has no parent and is checked itself; a bare relative name lives in
/// the current directory.
fn destination_parent(destination: &Path) -> PathBuf {
    match destination.parent() {
        None => destination.to_path_buf(),
        Some(parent) if parent.as_os_str().is_empty() => PathBuf::from("."),
        Some(parent) => parent.to_path_buf(),
    }
}
