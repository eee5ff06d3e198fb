//! Reading and writing `project.pbxproj`.
//!
//! This module provides:
//! - An OpenStep property list parser ([`parser`])
//! - A serializer matching Xcode's own output ([`writer`])
//! - [`PbxProj`], typed access to the object graph
//!
//! # Overview
//!
//! The project file is a single dictionary whose `objects` entry maps ids to
//! objects. Every object carries an `isa` naming its type; objects refer to
//! each other by id:
//!
//! | Object | References |
//! |--------|------------|
//! | `PBXProject` | `targets` |
//! | `PBXNativeTarget` | `buildPhases` |
//! | `PBXFrameworksBuildPhase`, `PBXCopyFilesBuildPhase` | `files` (build files) |
//! | `PBXBuildFile` | `fileRef` (file reference), `settings` |
//! | `PBXFileReference` | `path` on disk |
//!
//! # Examples
//!
//! ```
//! use xcode_frameworks::pbxproj::PbxProj;
//!
//! let text = "{ objects = { T = {isa = PBXNativeTarget; name = App; }; }; }";
//! let proj = PbxProj::parse(text)?;
//! let target = &proj.native_targets()[0];
//! assert_eq!(proj.target_name(target), Some("App"));
//! # Ok::<(), xcode_frameworks::Error>(())
//! ```

pub mod constants;
pub mod graph;
pub mod parser;
pub mod writer;

pub use graph::{new_object, ObjectId, PbxProj};
