//! Error types for xcode-frameworks operations.
//!
//! This module defines the [`enum@Error`] enum covering the failure cases of
//! opening, parsing, editing and saving an Xcode project.
//!
//! A framework that cannot be found is not an error: operations report it in
//! their result so the caller can warn and carry on.
//!
//! # See Also
//!
//! - [`crate::Result`] - Convenience type alias using this error

use std::path::PathBuf;
use thiserror::Error;

/// Error type for xcode-frameworks operations.
///
/// # Examples
///
/// ```no_run
/// use xcode_frameworks::{Error, XcodeProject};
///
/// match XcodeProject::open("App.xcodeproj") {
///     Ok(project) => println!("{} targets", project.pbxproj().native_targets().len()),
///     Err(Error::InvalidProjectPath(path)) => eprintln!("not a project: {}", path.display()),
///     Err(e) => eprintln!("Other error: {e}"),
/// }
/// ```
#[derive(Debug, Error)]
pub enum Error {
    /// I/O operation failed.
    ///
    /// Occurs when reading or writing `project.pbxproj`.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The path does not exist or is not an `.xcodeproj` bundle.
    #[error("The specified path is not a valid .xcodeproj file: {}", .0.display())]
    InvalidProjectPath(PathBuf),

    /// `project.pbxproj` is not a well-formed property list.
    #[error("Failed to parse project file at {line}:{column}: {message}")]
    Parse {
        line: usize,
        column: usize,
        message: String,
    },

    /// An object id is referenced but absent from the `objects` table.
    #[error("Object not found: {0}")]
    MissingObject(String),

    /// The property list parsed but does not have the shape of a project.
    #[error("Malformed project: {0}")]
    Malformed(String),

    /// Unknown duplicate-fixing strategy.
    #[error("Invalid strategy: {0}. Choose either 'keep-first' or 'keep-last'.")]
    InvalidStrategy(String),
}
