//! Object graph of a parsed `project.pbxproj`
//!
//! Objects stay generic [`Dictionary`] values keyed by id, so anything this
//! crate does not understand survives a load/save cycle untouched. Typed
//! accessors cover the objects the framework operations walk:
//! targets, build phases, build files and file references.

use super::constants::*;
use super::{parser, writer};
use crate::{Error, Result};
use plist::{Dictionary, Value};
use std::fmt;
use uuid::Uuid;

/// Key of an entry in the `objects` table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(String);

impl ObjectId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ObjectId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A parsed project file.
///
/// # Example
///
/// ```
/// use xcode_frameworks::pbxproj::PbxProj;
///
/// let proj = PbxProj::parse("{ objects = { }; rootObject = R; }")?;
/// assert!(proj.native_targets().is_empty());
/// # Ok::<(), xcode_frameworks::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PbxProj {
    /// Top-level entries other than `objects`
    root: Dictionary,
    /// The `objects` table
    objects: Dictionary,
    /// Bundle name without extension, used in generated comments
    project_name: Option<String>,
}

impl PbxProj {
    /// Parse project file text.
    ///
    /// # Errors
    ///
    /// - [`Error::Parse`] if the text is not a property list
    /// - [`Error::Malformed`] if it has no `objects` dictionary
    pub fn parse(text: &str) -> Result<Self> {
        let mut root = parser::parse(text)?
            .into_dictionary()
            .ok_or_else(|| Error::Malformed("root is not a dictionary".into()))?;
        let objects = match root.remove(KEY_OBJECTS) {
            Some(Value::Dictionary(objects)) => objects,
            Some(_) => return Err(Error::Malformed("objects is not a dictionary".into())),
            None => return Err(Error::Malformed("missing objects table".into())),
        };
        Ok(Self {
            root,
            objects,
            project_name: None,
        })
    }

    /// Set the project name used in generated comments.
    pub fn with_project_name(mut self, name: impl Into<String>) -> Self {
        self.project_name = Some(name.into());
        self
    }

    /// Serialize in Xcode's layout.
    pub fn serialize(&self) -> String {
        writer::write_parts(&self.root, Some(&self.objects), self.project_name.as_deref())
    }

    /// Number of entries in the `objects` table.
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn object(&self, id: &ObjectId) -> Option<&Dictionary> {
        self.objects.get(id.as_str()).and_then(Value::as_dictionary)
    }

    pub fn object_mut(&mut self, id: &ObjectId) -> Option<&mut Dictionary> {
        self.objects.get_mut(id.as_str()).and_then(Value::as_dictionary_mut)
    }

    fn object_or_err(&mut self, id: &ObjectId) -> Result<&mut Dictionary> {
        self.object_mut(id)
            .ok_or_else(|| Error::MissingObject(id.to_string()))
    }

    pub fn isa(&self, id: &ObjectId) -> Option<&str> {
        self.string(id, KEY_ISA)
    }

    fn string(&self, id: &ObjectId, key: &str) -> Option<&str> {
        self.object(id)?.get(key).and_then(Value::as_string)
    }

    fn id_list(&self, id: &ObjectId, key: &str) -> Vec<ObjectId> {
        self.object(id)
            .and_then(|o| o.get(key))
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(Value::as_string).map(ObjectId::from).collect())
            .unwrap_or_default()
    }

    /// The `PBXProject` object.
    pub fn root_object(&self) -> Option<ObjectId> {
        self.root
            .get(KEY_ROOT_OBJECT)
            .and_then(Value::as_string)
            .map(ObjectId::from)
    }

    /// Native targets in project order.
    ///
    /// Falls back to every `PBXNativeTarget` sorted by id when the project
    /// object lists no targets.
    pub fn native_targets(&self) -> Vec<ObjectId> {
        let listed: Vec<ObjectId> = self
            .root_object()
            .map(|project| self.id_list(&project, KEY_TARGETS))
            .unwrap_or_default()
            .into_iter()
            .filter(|t| self.isa(t) == Some(ISA_NATIVE_TARGET))
            .collect();
        if !listed.is_empty() {
            return listed;
        }

        let mut all: Vec<ObjectId> = self
            .objects
            .iter()
            .filter(|(_, o)| {
                o.as_dictionary()
                    .and_then(|d| d.get(KEY_ISA))
                    .and_then(Value::as_string)
                    == Some(ISA_NATIVE_TARGET)
            })
            .map(|(id, _)| ObjectId::new(id.clone()))
            .collect();
        all.sort();
        all
    }

    pub fn target_name(&self, target: &ObjectId) -> Option<&str> {
        self.string(target, KEY_NAME)
    }

    pub fn build_phases(&self, target: &ObjectId) -> Vec<ObjectId> {
        self.id_list(target, KEY_BUILD_PHASES)
    }

    /// First `PBXFrameworksBuildPhase` of a target.
    pub fn frameworks_build_phase(&self, target: &ObjectId) -> Option<ObjectId> {
        self.build_phases(target)
            .into_iter()
            .find(|p| self.isa(p) == Some(ISA_FRAMEWORKS_PHASE))
    }

    /// Whether a phase copies files into the product's Frameworks folder.
    ///
    /// Matches copy-files phases named "Embed Frameworks", and unnamed ones
    /// targeting the Frameworks folder.
    pub fn is_embed_frameworks_phase(&self, phase: &ObjectId) -> bool {
        if self.isa(phase) != Some(ISA_COPY_FILES_PHASE) {
            return false;
        }
        match self.string(phase, KEY_NAME) {
            Some(name) => name == EMBED_FRAMEWORKS_PHASE_NAME,
            None => self.string(phase, KEY_DST_SUBFOLDER_SPEC) == Some(DST_SUBFOLDER_FRAMEWORKS),
        }
    }

    /// First Embed Frameworks phase of a target.
    pub fn embed_frameworks_phase(&self, target: &ObjectId) -> Option<ObjectId> {
        self.build_phases(target)
            .into_iter()
            .find(|p| self.is_embed_frameworks_phase(p))
    }

    pub fn phase_files(&self, phase: &ObjectId) -> Vec<ObjectId> {
        self.id_list(phase, KEY_FILES)
    }

    pub fn file_ref(&self, build_file: &ObjectId) -> Option<ObjectId> {
        self.string(build_file, KEY_FILE_REF).map(ObjectId::from)
    }

    /// Path of a file element, or its name when it has no path.
    pub fn file_path(&self, file_ref: &ObjectId) -> Option<&str> {
        self.string(file_ref, KEY_PATH)
            .or_else(|| self.string(file_ref, KEY_NAME))
    }

    /// Path of the file a build file refers to.
    ///
    /// `None` for build files without a file reference, such as Swift
    /// package products.
    pub fn build_file_path(&self, build_file: &ObjectId) -> Option<&str> {
        let file_ref = self.string(build_file, KEY_FILE_REF)?;
        self.file_path(&ObjectId::from(file_ref))
    }

    /// Entries of a build file's `settings.ATTRIBUTES` list.
    pub fn attributes(&self, build_file: &ObjectId) -> Vec<String> {
        self.object(build_file)
            .and_then(|o| o.get(KEY_SETTINGS))
            .and_then(Value::as_dictionary)
            .and_then(|s| s.get(KEY_ATTRIBUTES))
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(Value::as_string).map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// Replace a build file's `settings.ATTRIBUTES` list.
    ///
    /// Creates the settings dictionary when the build file has none.
    pub fn set_attributes(&mut self, build_file: &ObjectId, attributes: &[String]) -> Result<()> {
        let object = self.object_or_err(build_file)?;
        if !matches!(object.get(KEY_SETTINGS), Some(Value::Dictionary(_))) {
            object.insert(KEY_SETTINGS.to_string(), Value::Dictionary(Dictionary::new()));
        }
        if let Some(settings) = object.get_mut(KEY_SETTINGS).and_then(Value::as_dictionary_mut) {
            let list = attributes.iter().cloned().map(Value::String).collect();
            settings.insert(KEY_ATTRIBUTES.to_string(), Value::Array(list));
        }
        Ok(())
    }

    /// Fresh 24-digit hex id not present in the objects table.
    pub fn generate_id(&self) -> ObjectId {
        loop {
            let hex = Uuid::new_v4().simple().to_string().to_uppercase();
            let id = ObjectId::new(&hex[..24]);
            if !self.objects.contains_key(id.as_str()) {
                return id;
            }
        }
    }

    /// Insert an object under a new id.
    pub fn add_object(&mut self, object: Dictionary) -> ObjectId {
        let id = self.generate_id();
        self.objects.insert(id.to_string(), Value::Dictionary(object));
        id
    }

    pub fn remove_object(&mut self, id: &ObjectId) -> Option<Dictionary> {
        self.objects
            .remove(id.as_str())
            .and_then(Value::into_dictionary)
    }

    fn push_id(&mut self, owner: &ObjectId, key: &str, id: &ObjectId) -> Result<()> {
        let object = self.object_or_err(owner)?;
        if !matches!(object.get(key), Some(Value::Array(_))) {
            object.insert(key.to_string(), Value::Array(Vec::new()));
        }
        if let Some(items) = object.get_mut(key).and_then(Value::as_array_mut) {
            items.push(Value::String(id.to_string()));
        }
        Ok(())
    }

    /// Append a build phase to a target.
    pub fn add_build_phase(&mut self, target: &ObjectId, phase: &ObjectId) -> Result<()> {
        self.push_id(target, KEY_BUILD_PHASES, phase)
    }

    /// Append a build file to a build phase.
    pub fn add_phase_file(&mut self, phase: &ObjectId, build_file: &ObjectId) -> Result<()> {
        self.push_id(phase, KEY_FILES, build_file)
    }

    /// Remove every occurrence of a build file from a phase, returning how
    /// many were removed.
    pub fn remove_phase_file(&mut self, phase: &ObjectId, build_file: &ObjectId) -> usize {
        self.retain_phase_files(phase, |file| file != build_file)
    }

    /// Keep only the build files of a phase for which `keep` returns true,
    /// in order. Returns how many entries were dropped.
    pub fn retain_phase_files(&mut self, phase: &ObjectId, mut keep: impl FnMut(&ObjectId) -> bool) -> usize {
        let Some(items) = self
            .object_mut(phase)
            .and_then(|o| o.get_mut(KEY_FILES))
            .and_then(Value::as_array_mut)
        else {
            return 0;
        };
        let before = items.len();
        items.retain(|item| match item.as_string() {
            Some(id) => keep(&ObjectId::from(id)),
            None => true,
        });
        before - items.len()
    }

    /// Whether any build phase lists the build file.
    pub fn is_in_any_phase(&self, build_file: &ObjectId) -> bool {
        self.objects.iter().any(|(_, object)| {
            let Some(dict) = object.as_dictionary() else {
                return false;
            };
            let is_phase = dict
                .get(KEY_ISA)
                .and_then(Value::as_string)
                .is_some_and(|isa| isa.ends_with("BuildPhase"));
            is_phase
                && dict
                    .get(KEY_FILES)
                    .and_then(Value::as_array)
                    .is_some_and(|files| files.iter().any(|f| f.as_string() == Some(build_file.as_str())))
        })
    }
}

/// Build a dictionary object with the given isa and string fields.
pub fn new_object(isa: &str, fields: &[(&str, Value)]) -> Dictionary {
    let mut object = Dictionary::new();
    object.insert(KEY_ISA.to_string(), Value::String(isa.to_string()));
    for (key, value) in fields {
        object.insert(key.to_string(), value.clone());
    }
    object
}
