use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// App links Foo twice (once per target), Bar and alamofire, and embeds Foo
/// signed. Widget has no Embed Frameworks phase.
pub const PROJECT: &str = r#"// !$*UTF8*$!
{
	archiveVersion = 1;
	classes = {
	};
	objectVersion = 56;
	objects = {

/* Begin PBXBuildFile section */
		0A0000000000000000000001 /* Foo.xcframework in Frameworks */ = {isa = PBXBuildFile; fileRef = 0F0000000000000000000001 /* Foo.xcframework */; };
		0A0000000000000000000002 /* Foo.xcframework in Frameworks */ = {isa = PBXBuildFile; fileRef = 0F0000000000000000000001 /* Foo.xcframework */; };
		0A0000000000000000000003 /* Foo.xcframework in Embed Frameworks */ = {isa = PBXBuildFile; fileRef = 0F0000000000000000000001 /* Foo.xcframework */; settings = {ATTRIBUTES = (CodeSignOnCopy, RemoveHeadersOnCopy, ); }; };
		0A0000000000000000000004 /* Bar.framework in Frameworks */ = {isa = PBXBuildFile; fileRef = 0F0000000000000000000002 /* Bar.framework */; };
		0A0000000000000000000005 /* alamofire.framework in Frameworks */ = {isa = PBXBuildFile; fileRef = 0F0000000000000000000003 /* alamofire.framework */; };
/* End PBXBuildFile section */

/* Begin PBXCopyFilesBuildPhase section */
		0C0000000000000000000001 /* Embed Frameworks */ = {
			isa = PBXCopyFilesBuildPhase;
			buildActionMask = 2147483647;
			dstPath = "";
			dstSubfolderSpec = 10;
			files = (
				0A0000000000000000000003 /* Foo.xcframework in Embed Frameworks */,
			);
			name = "Embed Frameworks";
			runOnlyForDeploymentPostprocessing = 0;
		};
/* End PBXCopyFilesBuildPhase section */

/* Begin PBXFileReference section */
		0F0000000000000000000001 /* Foo.xcframework */ = {isa = PBXFileReference; lastKnownFileType = wrapper.xcframework; path = Frameworks/Foo.xcframework; sourceTree = "<group>"; };
		0F0000000000000000000002 /* Bar.framework */ = {isa = PBXFileReference; lastKnownFileType = wrapper.framework; path = Bar.framework; sourceTree = "<group>"; };
		0F0000000000000000000003 /* alamofire.framework */ = {isa = PBXFileReference; lastKnownFileType = wrapper.framework; path = Carthage/Build/alamofire.framework; sourceTree = "<group>"; };
/* End PBXFileReference section */

/* Begin PBXFrameworksBuildPhase section */
		0B0000000000000000000001 /* Frameworks */ = {
			isa = PBXFrameworksBuildPhase;
			buildActionMask = 2147483647;
			files = (
				0A0000000000000000000001 /* Foo.xcframework in Frameworks */,
				0A0000000000000000000004 /* Bar.framework in Frameworks */,
				0A0000000000000000000005 /* alamofire.framework in Frameworks */,
			);
			runOnlyForDeploymentPostprocessing = 0;
		};
		0B0000000000000000000002 /* Frameworks */ = {
			isa = PBXFrameworksBuildPhase;
			buildActionMask = 2147483647;
			files = (
				0A0000000000000000000002 /* Foo.xcframework in Frameworks */,
			);
			runOnlyForDeploymentPostprocessing = 0;
		};
/* End PBXFrameworksBuildPhase section */

/* Begin PBXNativeTarget section */
		0D0000000000000000000001 /* App */ = {
			isa = PBXNativeTarget;
			buildPhases = (
				0B0000000000000000000001 /* Frameworks */,
				0C0000000000000000000001 /* Embed Frameworks */,
			);
			name = App;
		};
		0D0000000000000000000002 /* Widget */ = {
			isa = PBXNativeTarget;
			buildPhases = (
				0B0000000000000000000002 /* Frameworks */,
			);
			name = Widget;
		};
/* End PBXNativeTarget section */

/* Begin PBXProject section */
		0E0000000000000000000001 /* Project object */ = {
			isa = PBXProject;
			targets = (
				0D0000000000000000000001 /* App */,
				0D0000000000000000000002 /* Widget */,
			);
		};
/* End PBXProject section */
	};
	rootObject = 0E0000000000000000000001 /* Project object */;
}
"#;

/// A temporary `App.xcodeproj` holding [`PROJECT`].
pub struct TestProject {
    tmp: TempDir,
    pub path: PathBuf,
}

impl TestProject {
    pub fn new() -> Self {
        Self::with_contents(PROJECT)
    }

    pub fn with_contents(contents: &str) -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let path = tmp.path().join("App.xcodeproj");
        fs::create_dir(&path).expect("create project bundle");
        fs::write(path.join("project.pbxproj"), contents).expect("write project file");
        Self { tmp, path }
    }

    pub fn pbxproj(&self) -> String {
        fs::read_to_string(self.path.join("project.pbxproj")).expect("read project file")
    }

    pub fn dir(&self) -> &Path {
        self.tmp.path()
    }
}

pub fn cmd() -> Command {
    let mut cmd = cargo_bin_cmd!("xcode-frameworks");
    cmd.env_remove("RUST_LOG");
    cmd
}
