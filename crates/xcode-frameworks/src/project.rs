//! `.xcodeproj` bundle handling
//!
//! An Xcode project is a directory whose `project.pbxproj` holds the object
//! graph. [`XcodeProject`] loads that file, hands out the parsed graph for
//! inspection or editing, and writes it back in place.

use crate::pbxproj::constants::{PBXPROJ_FILE_NAME, XCODEPROJ_EXTENSION};
use crate::pbxproj::PbxProj;
use crate::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A loaded Xcode project.
///
/// # Example
///
/// ```no_run
/// use xcode_frameworks::{frameworks, XcodeProject};
///
/// let project = XcodeProject::open("App.xcodeproj")?;
/// for info in frameworks::list_frameworks(project.pbxproj()) {
///     println!("{} ({}): {}", info.name, info.kind, info.status);
/// }
/// # Ok::<(), xcode_frameworks::Error>(())
/// ```
pub struct XcodeProject {
    /// Path of the `.xcodeproj` directory
    path: PathBuf,
    pbxproj: PbxProj,
}

impl XcodeProject {
    /// Open and parse a project bundle.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidProjectPath`] if `path` does not exist or does not
    ///   end in `.xcodeproj`
    /// - [`Error::Io`] if `project.pbxproj` cannot be read
    /// - [`Error::Parse`] or [`Error::Malformed`] if it is not a project file
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let has_extension = path.extension().and_then(|e| e.to_str()) == Some(XCODEPROJ_EXTENSION);
        if !has_extension || !path.exists() {
            return Err(Error::InvalidProjectPath(path.to_path_buf()));
        }

        let file = path.join(PBXPROJ_FILE_NAME);
        debug!("Reading {}", file.display());
        let text = fs::read_to_string(&file)?;

        let mut pbxproj = PbxProj::parse(&text)?;
        if let Some(name) = path.file_stem().and_then(|s| s.to_str()) {
            pbxproj = pbxproj.with_project_name(name);
        }
        debug!(
            "Loaded {} objects, {} native targets",
            pbxproj.object_count(),
            pbxproj.native_targets().len()
        );

        Ok(Self {
            path: path.to_path_buf(),
            pbxproj,
        })
    }

    /// Path of the `.xcodeproj` directory.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn pbxproj(&self) -> &PbxProj {
        &self.pbxproj
    }

    pub fn pbxproj_mut(&mut self) -> &mut PbxProj {
        &mut self.pbxproj
    }

    /// Write the project file back in place.
    pub fn save(&self) -> Result<()> {
        let file = self.path.join(PBXPROJ_FILE_NAME);
        debug!("Writing {}", file.display());
        fs::write(&file, self.pbxproj.serialize())?;
        Ok(())
    }
}
