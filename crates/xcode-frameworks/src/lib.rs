pub mod error;
pub mod frameworks;
pub mod pbxproj;
pub mod project;

pub use error::Error;
pub use frameworks::{
    embed_frameworks, find_duplicates, fix_duplicates, list_frameworks, Duplicate, EmbedMode, EmbedReport,
    EmbedStatus, FixReport, FrameworkInfo, FrameworkKind, Strategy,
};
pub use pbxproj::PbxProj;
pub use project::XcodeProject;

pub type Result<T> = std::result::Result<T, Error>;
