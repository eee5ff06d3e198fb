//! Embedding frameworks and setting their copy attributes
//!
//! A framework is embedded by listing a build file for it in the target's
//! Embed Frameworks phase (a `PBXCopyFilesBuildPhase` copying into the
//! product's Frameworks folder). The build file's `settings.ATTRIBUTES`
//! control what happens on copy.

use crate::pbxproj::constants::*;
use crate::pbxproj::{new_object, ObjectId, PbxProj};
use crate::{Error, Result};
use plist::Value;
use tracing::{debug, info};

/// Attributes applied to embedded frameworks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbedMode {
    /// Embed & Sign: `CodeSignOnCopy`
    Sign,
    /// `CodeSignOnCopy` and `RemoveHeadersOnCopy`
    EmbedWithoutSign,
}

impl EmbedMode {
    pub fn attributes(&self) -> &'static [&'static str] {
        match self {
            EmbedMode::Sign => &[ATTR_CODE_SIGN_ON_COPY],
            EmbedMode::EmbedWithoutSign => &[ATTR_CODE_SIGN_ON_COPY, ATTR_REMOVE_HEADERS_ON_COPY],
        }
    }
}

/// Result of [`embed_frameworks`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EmbedReport {
    /// Paths of the frameworks embedded, one per matching target
    pub updated: Vec<String>,
    /// Requested names that matched nothing
    pub missing: Vec<String>,
    /// Embed Frameworks phases created for targets lacking one
    pub created_phases: usize,
}

impl EmbedReport {
    /// True when the project was modified.
    pub fn is_changed(&self) -> bool {
        !self.updated.is_empty()
    }
}

/// Embed the frameworks whose path contains one of `names`.
///
/// For every native target, the first Frameworks-phase entry whose path
/// contains a name is embedded: the target gets an Embed Frameworks phase if
/// it has none, the phase gets a build file for the framework if it has
/// none, and `mode`'s attributes are merged into that build file.
///
/// Names matching no target, and empty names, are reported in
/// [`EmbedReport::missing`] and leave the project untouched.
pub fn embed_frameworks(proj: &mut PbxProj, names: &[String], mode: EmbedMode) -> Result<EmbedReport> {
    let mut report = EmbedReport::default();

    for name in names {
        // An empty name is a substring of every path
        if name.is_empty() {
            report.missing.push(name.clone());
            continue;
        }
        debug!("Searching for framework: {}", name);
        let mut found = false;

        for target in proj.native_targets() {
            let Some(phase) = proj.frameworks_build_phase(&target) else {
                continue;
            };
            let matched = proj.phase_files(&phase).into_iter().find_map(|file| {
                let path = proj.build_file_path(&file)?;
                path.contains(name.as_str()).then(|| (file, path.to_string()))
            });
            let Some((build_file, path)) = matched else {
                continue;
            };
            debug!("Found framework: {}", path);

            let created = embed_build_file(proj, &target, &build_file, mode)?;
            if created {
                report.created_phases += 1;
            }
            report.updated.push(path);
            found = true;
        }

        if !found {
            debug!("Framework {} not found in project", name);
            report.missing.push(name.clone());
        }
    }

    Ok(report)
}

/// Embed one linked build file. Returns whether a phase was created.
fn embed_build_file(proj: &mut PbxProj, target: &ObjectId, build_file: &ObjectId, mode: EmbedMode) -> Result<bool> {
    let file_ref = proj
        .file_ref(build_file)
        .ok_or_else(|| Error::Malformed(format!("build file {} has no fileRef", build_file)))?;

    let (phase, created) = match proj.embed_frameworks_phase(target) {
        Some(phase) => (phase, false),
        None => (create_embed_phase(proj, target)?, true),
    };

    let existing = proj
        .phase_files(&phase)
        .into_iter()
        .find(|f| proj.file_ref(f).as_ref() == Some(&file_ref));
    let embed_file = match existing {
        Some(file) => file,
        None => {
            let file = proj.add_object(new_object(
                ISA_BUILD_FILE,
                &[(KEY_FILE_REF, Value::String(file_ref.to_string()))],
            ));
            proj.add_phase_file(&phase, &file)?;
            debug!("Framework added to Embed Frameworks phase");
            file
        }
    };

    let mut attributes = proj.attributes(&embed_file);
    for attribute in mode.attributes() {
        if !attributes.iter().any(|a| a == attribute) {
            attributes.push(attribute.to_string());
        }
    }
    proj.set_attributes(&embed_file, &attributes)?;
    debug!("Set {} for {}", attributes.join(", "), embed_file);

    Ok(created)
}

fn create_embed_phase(proj: &mut PbxProj, target: &ObjectId) -> Result<ObjectId> {
    let text = |s: &str| Value::String(s.to_string());
    let phase = proj.add_object(new_object(
        ISA_COPY_FILES_PHASE,
        &[
            (KEY_BUILD_ACTION_MASK, text(DEFAULT_BUILD_ACTION_MASK)),
            (KEY_DST_PATH, text("")),
            (KEY_DST_SUBFOLDER_SPEC, text(DST_SUBFOLDER_FRAMEWORKS)),
            (KEY_FILES, Value::Array(Vec::new())),
            (KEY_NAME, text(EMBED_FRAMEWORKS_PHASE_NAME)),
            (KEY_RUN_ONLY_FOR_DEPLOYMENT, text("0")),
        ],
    ));
    proj.add_build_phase(target, &phase)?;
    info!(
        "Embed Frameworks phase was missing for {}, created {}",
        proj.target_name(target).unwrap_or(target.as_str()),
        phase
    );
    Ok(phase)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frameworks::{fixture, list_frameworks, EmbedStatus};

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn status_of(proj: &PbxProj, name: &str) -> EmbedStatus {
        list_frameworks(proj)
            .into_iter()
            .find(|f| f.name == name)
            .map(|f| f.status)
            .unwrap()
    }

    #[test]
    fn test_sign_creates_embed_phase_for_target_without_one() {
        let mut proj = fixture::project();
        let report = embed_frameworks(&mut proj, &names(&["Baz"]), EmbedMode::Sign).unwrap();

        assert_eq!(report.updated, vec!["Vendor/Baz.framework".to_string()]);
        assert_eq!(report.created_phases, 1);
        assert!(report.missing.is_empty());

        let widget = ObjectId::from("TWID");
        let phase = proj.embed_frameworks_phase(&widget).unwrap();
        assert_eq!(proj.build_phases(&widget).last(), Some(&phase));
        let object = proj.object(&phase).unwrap();
        assert_eq!(object.get(KEY_NAME).and_then(Value::as_string), Some("Embed Frameworks"));
        assert_eq!(object.get(KEY_DST_SUBFOLDER_SPEC).and_then(Value::as_string), Some("10"));
        assert_eq!(object.get(KEY_DST_PATH).and_then(Value::as_string), Some(""));

        let files = proj.phase_files(&phase);
        assert_eq!(files.len(), 1);
        assert_eq!(proj.file_ref(&files[0]), Some("FBAZ".into()));
        assert_eq!(proj.attributes(&files[0]), names(&["CodeSignOnCopy"]));
        assert_eq!(status_of(&proj, "Baz.framework"), EmbedStatus::EmbedAndSign);
    }

    #[test]
    fn test_embed_adds_both_attributes() {
        let mut proj = fixture::project();
        embed_frameworks(&mut proj, &names(&["Bar"]), EmbedMode::EmbedWithoutSign).unwrap();

        let app = ObjectId::from("TAPP");
        let phase = proj.embed_frameworks_phase(&app).unwrap();
        assert_eq!(phase, ObjectId::from("EAPP"));
        let files = proj.phase_files(&phase);
        assert_eq!(files.len(), 2);
        assert_eq!(proj.attributes(&files[1]), names(&["CodeSignOnCopy", "RemoveHeadersOnCopy"]));
    }

    #[test]
    fn test_existing_embed_entry_is_reused() {
        let mut proj = fixture::project();
        let before = proj.object_count();
        let report = embed_frameworks(&mut proj, &names(&["Foo"]), EmbedMode::Sign).unwrap();

        // App reuses its entry, Widget gets a phase and a build file
        assert_eq!(report.updated.len(), 2);
        assert_eq!(report.created_phases, 1);
        assert_eq!(proj.object_count(), before + 2);
        assert_eq!(proj.phase_files(&"EAPP".into()), vec![ObjectId::from("BFOOE")]);
        assert_eq!(
            proj.attributes(&"BFOOE".into()),
            names(&["CodeSignOnCopy", "RemoveHeadersOnCopy"])
        );
    }

    #[test]
    fn test_embed_twice_is_stable() {
        let mut proj = fixture::project();
        embed_frameworks(&mut proj, &names(&["Bar"]), EmbedMode::Sign).unwrap();
        let once = proj.clone();
        embed_frameworks(&mut proj, &names(&["Bar"]), EmbedMode::Sign).unwrap();
        assert_eq!(proj, once);
    }

    #[test]
    fn test_missing_framework_leaves_project_unchanged() {
        let mut proj = fixture::project();
        let original = proj.clone();
        let report = embed_frameworks(&mut proj, &names(&["Missing"]), EmbedMode::Sign).unwrap();

        assert!(!report.is_changed());
        assert_eq!(report.missing, names(&["Missing"]));
        assert_eq!(proj, original);
    }

    #[test]
    fn test_empty_name_matches_nothing() {
        let mut proj = fixture::project();
        let original = proj.clone();
        let report = embed_frameworks(&mut proj, &names(&[""]), EmbedMode::Sign).unwrap();

        assert!(!report.is_changed());
        assert_eq!(report.missing, names(&[""]));
        assert_eq!(proj, original);
    }

    #[test]
    fn test_mixed_found_and_missing() {
        let mut proj = fixture::project();
        let report = embed_frameworks(&mut proj, &names(&["Nope", "alamofire"]), EmbedMode::Sign).unwrap();
        assert_eq!(report.missing, names(&["Nope"]));
        assert_eq!(report.updated, names(&["Carthage/Build/alamofire.framework"]));
        assert!(report.is_changed());
    }
}
