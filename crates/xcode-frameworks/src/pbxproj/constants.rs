//! Object types, keys and attribute values used in `project.pbxproj`

// =============================================================================
// File header
// =============================================================================

/// First line of every project file written by Xcode
pub const UTF8_HEADER: &str = "// !$*UTF8*$!";

// =============================================================================
// Object types (isa)
// =============================================================================

pub const ISA_PROJECT: &str = "PBXProject";
pub const ISA_NATIVE_TARGET: &str = "PBXNativeTarget";
pub const ISA_AGGREGATE_TARGET: &str = "PBXAggregateTarget";
pub const ISA_LEGACY_TARGET: &str = "PBXLegacyTarget";
pub const ISA_BUILD_FILE: &str = "PBXBuildFile";
pub const ISA_FILE_REFERENCE: &str = "PBXFileReference";
pub const ISA_GROUP: &str = "PBXGroup";
pub const ISA_VARIANT_GROUP: &str = "PBXVariantGroup";
pub const ISA_VERSION_GROUP: &str = "XCVersionGroup";
pub const ISA_SYNCHRONIZED_ROOT_GROUP: &str = "PBXFileSystemSynchronizedRootGroup";
pub const ISA_SYNCHRONIZED_EXCEPTION_SET: &str = "PBXFileSystemSynchronizedBuildFileExceptionSet";
pub const ISA_REFERENCE_PROXY: &str = "PBXReferenceProxy";
pub const ISA_FRAMEWORKS_PHASE: &str = "PBXFrameworksBuildPhase";
pub const ISA_SOURCES_PHASE: &str = "PBXSourcesBuildPhase";
pub const ISA_RESOURCES_PHASE: &str = "PBXResourcesBuildPhase";
pub const ISA_HEADERS_PHASE: &str = "PBXHeadersBuildPhase";
pub const ISA_COPY_FILES_PHASE: &str = "PBXCopyFilesBuildPhase";
pub const ISA_SHELL_SCRIPT_PHASE: &str = "PBXShellScriptBuildPhase";
pub const ISA_BUILD_CONFIGURATION: &str = "XCBuildConfiguration";
pub const ISA_CONFIGURATION_LIST: &str = "XCConfigurationList";
pub const ISA_TARGET_DEPENDENCY: &str = "PBXTargetDependency";
pub const ISA_CONTAINER_ITEM_PROXY: &str = "PBXContainerItemProxy";
pub const ISA_PACKAGE_PRODUCT_DEPENDENCY: &str = "XCSwiftPackageProductDependency";
pub const ISA_REMOTE_PACKAGE_REFERENCE: &str = "XCRemoteSwiftPackageReference";
pub const ISA_LOCAL_PACKAGE_REFERENCE: &str = "XCLocalSwiftPackageReference";

/// Objects Xcode writes on a single line
pub const SINGLE_LINE_ISAS: &[&str] = &[ISA_BUILD_FILE, ISA_FILE_REFERENCE];

// =============================================================================
// Keys
// =============================================================================

pub const KEY_OBJECTS: &str = "objects";
pub const KEY_ROOT_OBJECT: &str = "rootObject";
pub const KEY_ISA: &str = "isa";
pub const KEY_NAME: &str = "name";
pub const KEY_PATH: &str = "path";
pub const KEY_TARGETS: &str = "targets";
pub const KEY_BUILD_PHASES: &str = "buildPhases";
pub const KEY_BUILD_CONFIGURATION_LIST: &str = "buildConfigurationList";
pub const KEY_FILES: &str = "files";
pub const KEY_FILE_REF: &str = "fileRef";
pub const KEY_PRODUCT_REF: &str = "productRef";
pub const KEY_PRODUCT_NAME: &str = "productName";
pub const KEY_REPOSITORY_URL: &str = "repositoryURL";
pub const KEY_RELATIVE_PATH: &str = "relativePath";
pub const KEY_EXCEPTIONS: &str = "exceptions";
pub const KEY_TARGET: &str = "target";
pub const KEY_SETTINGS: &str = "settings";
pub const KEY_ATTRIBUTES: &str = "ATTRIBUTES";
pub const KEY_DST_PATH: &str = "dstPath";
pub const KEY_DST_SUBFOLDER_SPEC: &str = "dstSubfolderSpec";
pub const KEY_BUILD_ACTION_MASK: &str = "buildActionMask";
pub const KEY_RUN_ONLY_FOR_DEPLOYMENT: &str = "runOnlyForDeploymentPostprocessing";

/// Keys whose object-id values Xcode leaves without a `/* comment */`
pub const UNCOMMENTED_REFERENCE_KEYS: &[&str] = &["remoteGlobalIDString", "TestTargetID"];

// =============================================================================
// Embed Frameworks phase
// =============================================================================

/// Display name of the copy-files phase that embeds frameworks
pub const EMBED_FRAMEWORKS_PHASE_NAME: &str = "Embed Frameworks";

/// `dstSubfolderSpec` value for the product's Frameworks folder
pub const DST_SUBFOLDER_FRAMEWORKS: &str = "10";

/// Default `buildActionMask` for new build phases
pub const DEFAULT_BUILD_ACTION_MASK: &str = "2147483647";

// =============================================================================
// Build file attributes
// =============================================================================

/// Re-sign the framework when it is copied into the product
pub const ATTR_CODE_SIGN_ON_COPY: &str = "CodeSignOnCopy";

/// Strip headers when the framework is copied into the product
pub const ATTR_REMOVE_HEADERS_ON_COPY: &str = "RemoveHeadersOnCopy";

// =============================================================================
// File extensions
// =============================================================================

pub const XCODEPROJ_EXTENSION: &str = "xcodeproj";
pub const XCFRAMEWORK_EXTENSION: &str = ".xcframework";
pub const PBXPROJ_FILE_NAME: &str = "project.pbxproj";
