//! Listing linked frameworks and their embedding status

use super::{EmbedStatus, FrameworkInfo};
use crate::pbxproj::constants::ISA_FRAMEWORKS_PHASE;
use crate::pbxproj::PbxProj;
use tracing::debug;

/// Summarize every framework linked or embedded by a native target.
///
/// Walks each target's build phases in order. Frameworks-phase entries are
/// recorded as [`EmbedStatus::DoNotEmbed`] unless the name is already known;
/// Embed Frameworks entries replace any earlier record of the same name.
/// The result holds one record per name, sorted case-insensitively.
pub fn list_frameworks(proj: &PbxProj) -> Vec<FrameworkInfo> {
    let mut frameworks: Vec<FrameworkInfo> = Vec::new();

    for target in proj.native_targets() {
        debug!(
            "Processing target: {}",
            proj.target_name(&target).unwrap_or(target.as_str())
        );

        for phase in proj.build_phases(&target) {
            if proj.isa(&phase) == Some(ISA_FRAMEWORKS_PHASE) {
                for file in proj.phase_files(&phase) {
                    let Some(path) = proj.build_file_path(&file) else {
                        continue;
                    };
                    let info = FrameworkInfo::new(path, EmbedStatus::DoNotEmbed);
                    if !frameworks.iter().any(|f| f.name == info.name) {
                        frameworks.push(info);
                    }
                }
            } else if proj.is_embed_frameworks_phase(&phase) {
                debug!("Found an embed frameworks phase: {}", phase);
                for file in proj.phase_files(&phase) {
                    let Some(path) = proj.build_file_path(&file) else {
                        continue;
                    };
                    let status = EmbedStatus::from_attributes(&proj.attributes(&file));
                    let info = FrameworkInfo::new(path, status);
                    debug!("Found framework: {} - {} - {}", info.name, info.kind, info.status);

                    match frameworks.iter_mut().find(|f| f.name == info.name) {
                        Some(existing) => *existing = info,
                        None => frameworks.push(info),
                    }
                }
            }
        }
    }

    frameworks.sort_by_cached_key(|f| f.name.to_lowercase());
    frameworks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frameworks::fixture;
    use crate::frameworks::FrameworkKind;

    #[test]
    fn test_list_sorted_case_insensitive() {
        let names: Vec<_> = list_frameworks(&fixture::project())
            .into_iter()
            .map(|f| f.name)
            .collect();
        assert_eq!(
            names,
            vec!["alamofire.framework", "Bar.framework", "Baz.framework", "Foo.xcframework"]
        );
    }

    #[test]
    fn test_list_status_and_kind() {
        let frameworks = list_frameworks(&fixture::project());
        let foo = frameworks.iter().find(|f| f.name == "Foo.xcframework").unwrap();
        assert_eq!(foo.kind, FrameworkKind::XcFramework);
        assert_eq!(foo.status, EmbedStatus::EmbedAndSign);

        let bar = frameworks.iter().find(|f| f.name == "Bar.framework").unwrap();
        assert_eq!(bar.kind, FrameworkKind::Framework);
        assert_eq!(bar.status, EmbedStatus::DoNotEmbed);
    }

    #[test]
    fn test_embed_entry_wins_over_later_link() {
        // Widget links Foo after App embedded it; the embed status must stay
        let frameworks = list_frameworks(&fixture::project());
        let foo: Vec<_> = frameworks.iter().filter(|f| f.name == "Foo.xcframework").collect();
        assert_eq!(foo.len(), 1);
        assert_eq!(foo[0].status, EmbedStatus::EmbedAndSign);
    }

    #[test]
    fn test_embed_without_signing() {
        let text = fixture::PROJECT.replace("ATTRIBUTES = (CodeSignOnCopy, RemoveHeadersOnCopy, );", "ATTRIBUTES = (RemoveHeadersOnCopy, );");
        let proj = PbxProj::parse(&text).unwrap();
        let frameworks = list_frameworks(&proj);
        let foo = frameworks.iter().find(|f| f.name == "Foo.xcframework").unwrap();
        assert_eq!(foo.status, EmbedStatus::EmbedWithoutSigning);
    }

    #[test]
    fn test_list_empty_project() {
        let proj = PbxProj::parse("{ objects = { }; }").unwrap();
        assert!(list_frameworks(&proj).is_empty());
    }
}
