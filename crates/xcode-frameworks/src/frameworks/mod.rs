//! Framework operations on a project's build phases.
//!
//! This module provides functionality to:
//! - List linked frameworks and their embedding status ([`list_frameworks`])
//! - Find frameworks linked more than once ([`find_duplicates`])
//! - Remove duplicate links ([`fix_duplicates`])
//! - Embed frameworks, with or without code signing ([`embed_frameworks`])
//!
//! # Embedding status
//!
//! | Status | Condition |
//! |--------|-----------|
//! | Do Not Embed | only in the Frameworks phase |
//! | Embed Without Signing | in the Embed Frameworks phase without `CodeSignOnCopy` |
//! | Embed & Sign | in the Embed Frameworks phase with `CodeSignOnCopy` |

pub mod duplicates;
pub mod embed;
pub mod list;

pub use duplicates::{find_duplicates, fix_duplicates, Duplicate, FixEntry, FixReport, Strategy};
pub use embed::{embed_frameworks, EmbedMode, EmbedReport};
pub use list::list_frameworks;

use crate::pbxproj::constants::{ATTR_CODE_SIGN_ON_COPY, XCFRAMEWORK_EXTENSION};
use std::fmt;

/// Framework name: the last component of its path.
pub fn framework_name(path: &str) -> &str {
    path.rsplit('/').find(|s| !s.is_empty()).unwrap_or(path)
}

/// Bundle type of a linked framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameworkKind {
    Framework,
    XcFramework,
}

impl FrameworkKind {
    /// Infer the kind from the file extension.
    pub fn from_path(path: &str) -> Self {
        if path.trim_end_matches('/').ends_with(XCFRAMEWORK_EXTENSION) {
            FrameworkKind::XcFramework
        } else {
            FrameworkKind::Framework
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FrameworkKind::Framework => "Framework",
            FrameworkKind::XcFramework => "XCFramework",
        }
    }
}

impl fmt::Display for FrameworkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a framework is copied into the product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbedStatus {
    DoNotEmbed,
    EmbedWithoutSigning,
    EmbedAndSign,
}

impl EmbedStatus {
    /// Status of a build file in an Embed Frameworks phase.
    pub fn from_attributes(attributes: &[String]) -> Self {
        if attributes.iter().any(|a| a == ATTR_CODE_SIGN_ON_COPY) {
            EmbedStatus::EmbedAndSign
        } else {
            EmbedStatus::EmbedWithoutSigning
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EmbedStatus::DoNotEmbed => "Do Not Embed",
            EmbedStatus::EmbedWithoutSigning => "Embed Without Signing",
            EmbedStatus::EmbedAndSign => "Embed & Sign",
        }
    }
}

impl fmt::Display for EmbedStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Summary of one linked framework.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameworkInfo {
    pub name: String,
    pub kind: FrameworkKind,
    pub status: EmbedStatus,
}

impl FrameworkInfo {
    /// Summarize the framework at `path`.
    pub fn new(path: &str, status: EmbedStatus) -> Self {
        Self {
            name: framework_name(path).to_string(),
            kind: FrameworkKind::from_path(path),
            status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_framework_name() {
        assert_eq!(framework_name("Frameworks/Foo.xcframework"), "Foo.xcframework");
        assert_eq!(framework_name("Bar.framework"), "Bar.framework");
        assert_eq!(framework_name("Vendor/Baz.framework/"), "Baz.framework");
    }

    #[test]
    fn test_kind_from_extension() {
        assert_eq!(FrameworkKind::from_path("A/Foo.xcframework"), FrameworkKind::XcFramework);
        assert_eq!(FrameworkKind::from_path("A/Foo.framework"), FrameworkKind::Framework);
        assert_eq!(FrameworkKind::from_path("libz.tbd"), FrameworkKind::Framework);
        assert_eq!(FrameworkKind::XcFramework.to_string(), "XCFramework");
    }

    #[test]
    fn test_status_from_attributes() {
        assert_eq!(EmbedStatus::from_attributes(&[]), EmbedStatus::EmbedWithoutSigning);
        assert_eq!(
            EmbedStatus::from_attributes(&["RemoveHeadersOnCopy".into()]),
            EmbedStatus::EmbedWithoutSigning
        );
        assert_eq!(
            EmbedStatus::from_attributes(&["RemoveHeadersOnCopy".into(), "CodeSignOnCopy".into()]),
            EmbedStatus::EmbedAndSign
        );
        assert_eq!(EmbedStatus::EmbedAndSign.to_string(), "Embed & Sign");
        assert_eq!(EmbedStatus::DoNotEmbed.to_string(), "Do Not Embed");
    }
}

#[cfg(test)]
pub(crate) mod fixture {
    use crate::pbxproj::PbxProj;

    /// Two targets: App links Foo, Bar, alamofire and a package product and
    /// embeds Foo signed; Widget links Foo and Baz and has no embed phase.
    pub const PROJECT: &str = r#"// !$*UTF8*$!
{
	archiveVersion = 1;
	classes = {
	};
	objectVersion = 56;
	objects = {
		BFOO1 = {isa = PBXBuildFile; fileRef = FFOO; };
		BFOO2 = {isa = PBXBuildFile; fileRef = FFOO; };
		BFOOE = {isa = PBXBuildFile; fileRef = FFOO; settings = {ATTRIBUTES = (CodeSignOnCopy, RemoveHeadersOnCopy, ); }; };
		BBAR = {isa = PBXBuildFile; fileRef = FBAR; };
		BBAZ = {isa = PBXBuildFile; fileRef = FBAZ; };
		BALA = {isa = PBXBuildFile; fileRef = FALA; };
		BPKG = {isa = PBXBuildFile; productRef = DPKG; };
		FFOO = {isa = PBXFileReference; lastKnownFileType = wrapper.xcframework; path = Frameworks/Foo.xcframework; sourceTree = "<group>"; };
		FBAR = {isa = PBXFileReference; lastKnownFileType = wrapper.framework; path = Bar.framework; sourceTree = "<group>"; };
		FBAZ = {isa = PBXFileReference; lastKnownFileType = wrapper.framework; path = Vendor/Baz.framework; sourceTree = "<group>"; };
		FALA = {isa = PBXFileReference; lastKnownFileType = wrapper.framework; path = Carthage/Build/alamofire.framework; sourceTree = "<group>"; };
		DPKG = {isa = XCSwiftPackageProductDependency; productName = Logging; };
		PAPP = {
			isa = PBXFrameworksBuildPhase;
			buildActionMask = 2147483647;
			files = (
				BFOO1,
				BBAR,
				BALA,
				BPKG,
			);
			runOnlyForDeploymentPostprocessing = 0;
		};
		EAPP = {
			isa = PBXCopyFilesBuildPhase;
			buildActionMask = 2147483647;
			dstPath = "";
			dstSubfolderSpec = 10;
			files = (
				BFOOE,
			);
			name = "Embed Frameworks";
			runOnlyForDeploymentPostprocessing = 0;
		};
		SAPP = {
			isa = PBXSourcesBuildPhase;
			buildActionMask = 2147483647;
			files = (
			);
			runOnlyForDeploymentPostprocessing = 0;
		};
		PWID = {
			isa = PBXFrameworksBuildPhase;
			buildActionMask = 2147483647;
			files = (
				BFOO2,
				BBAZ,
			);
			runOnlyForDeploymentPostprocessing = 0;
		};
		TAPP = {
			isa = PBXNativeTarget;
			buildPhases = (
				SAPP,
				PAPP,
				EAPP,
			);
			name = App;
		};
		TWID = {
			isa = PBXNativeTarget;
			buildPhases = (
				PWID,
			);
			name = Widget;
		};
		ROOT = {
			isa = PBXProject;
			targets = (
				TAPP,
				TWID,
			);
		};
	};
	rootObject = ROOT;
}
"#;

    pub fn project() -> PbxProj {
        PbxProj::parse(PROJECT).expect("fixture parses")
    }
}
