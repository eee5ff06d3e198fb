//! Serializer producing `project.pbxproj` text in Xcode's layout
//!
//! Xcode rewrites the whole file on every save, so matching its layout keeps
//! diffs limited to the objects that actually changed:
//!
//! - objects grouped in `/* Begin <isa> section */` blocks, sorted by isa and id
//! - `isa` first, remaining keys sorted
//! - `PBXBuildFile` and `PBXFileReference` written on a single line
//! - object references followed by a `/* display name */` comment

use super::constants::*;
use plist::{Dictionary, Value};
use std::collections::{BTreeMap, HashMap};

/// Serialize a project root dictionary.
///
/// `project_name` is used for the comment of the project's own build
/// configuration list; the project file does not store it.
pub fn write(root: &Dictionary, project_name: Option<&str>) -> String {
    let objects = root.get(KEY_OBJECTS).and_then(Value::as_dictionary);
    write_parts(root, objects, project_name)
}

/// Serialize a root dictionary whose `objects` table is held separately.
///
/// Any `objects` entry in `root` is ignored when `objects` is given.
pub fn write_parts(root: &Dictionary, objects: Option<&Dictionary>, project_name: Option<&str>) -> String {
    let comments = match objects {
        Some(objects) => object_comments(objects, project_name),
        None => HashMap::new(),
    };
    let mut writer = Writer {
        out: String::new(),
        comments,
    };
    writer.out.push_str(UTF8_HEADER);
    writer.out.push('\n');
    writer.write_root(root, objects);
    writer.out
}

struct Writer {
    out: String,
    comments: HashMap<String, String>,
}

impl Writer {
    fn write_root(&mut self, root: &Dictionary, objects: Option<&Dictionary>) {
        let mut keys: Vec<&str> = root
            .keys()
            .map(String::as_str)
            .filter(|key| objects.is_none() || *key != KEY_OBJECTS)
            .collect();
        if objects.is_some() {
            keys.push(KEY_OBJECTS);
        }
        keys.sort_unstable();

        self.out.push_str("{\n");
        for key in keys {
            match (key, objects) {
                (KEY_OBJECTS, Some(objects)) => self.write_objects(objects),
                _ => {
                    let Some(value) = root.get(key) else {
                        continue;
                    };
                    self.indent(1);
                    self.write_key(key);
                    self.out.push_str(" = ");
                    self.write_value(value, 1, key);
                    self.out.push_str(";\n");
                }
            }
        }
        self.out.push_str("}\n");
    }

    fn write_objects(&mut self, objects: &Dictionary) {
        let mut sections: BTreeMap<&str, Vec<(&String, &Value)>> = BTreeMap::new();
        for (id, object) in objects.iter() {
            let isa = object
                .as_dictionary()
                .and_then(|d| d.get(KEY_ISA))
                .and_then(Value::as_string)
                .unwrap_or_default();
            sections.entry(isa).or_default().push((id, object));
        }

        self.indent(1);
        self.out.push_str(KEY_OBJECTS);
        self.out.push_str(" = {\n");
        for (isa, mut entries) in sections {
            entries.sort_by(|a, b| a.0.cmp(b.0));
            self.out.push_str(&format!("\n/* Begin {} section */\n", isa));
            let single_line = SINGLE_LINE_ISAS.contains(&isa);
            for (id, object) in entries {
                self.indent(2);
                self.write_reference(id, KEY_OBJECTS);
                self.out.push_str(" = ");
                match object {
                    Value::Dictionary(dict) if single_line => self.write_inline_dictionary(dict, true),
                    Value::Dictionary(dict) => self.write_dictionary(dict, 2, true),
                    other => self.write_value(other, 2, KEY_OBJECTS),
                }
                self.out.push_str(";\n");
            }
            self.out.push_str(&format!("/* End {} section */\n", isa));
        }
        self.indent(1);
        self.out.push_str("};\n");
    }

    fn write_value(&mut self, value: &Value, depth: usize, key: &str) {
        match value {
            Value::Dictionary(dict) => self.write_dictionary(dict, depth, false),
            Value::Array(items) => {
                self.out.push_str("(\n");
                for item in items {
                    self.indent(depth + 1);
                    self.write_value(item, depth + 1, key);
                    self.out.push_str(",\n");
                }
                self.indent(depth);
                self.out.push(')');
            }
            other => self.write_scalar(other, key),
        }
    }

    fn write_dictionary(&mut self, dict: &Dictionary, depth: usize, isa_first: bool) {
        self.out.push_str("{\n");
        for (key, value) in sorted_entries(dict, isa_first) {
            self.indent(depth + 1);
            self.write_key(key);
            self.out.push_str(" = ");
            self.write_value(value, depth + 1, key);
            self.out.push_str(";\n");
        }
        self.indent(depth);
        self.out.push('}');
    }

    fn write_inline_value(&mut self, value: &Value, key: &str) {
        match value {
            Value::Dictionary(dict) => self.write_inline_dictionary(dict, false),
            Value::Array(items) => {
                self.out.push('(');
                for item in items {
                    self.write_inline_value(item, key);
                    self.out.push_str(", ");
                }
                self.out.push(')');
            }
            other => self.write_scalar(other, key),
        }
    }

    fn write_inline_dictionary(&mut self, dict: &Dictionary, isa_first: bool) {
        self.out.push('{');
        for (key, value) in sorted_entries(dict, isa_first) {
            self.write_key(key);
            self.out.push_str(" = ");
            self.write_inline_value(value, key);
            self.out.push_str("; ");
        }
        self.out.push('}');
    }

    fn write_scalar(&mut self, value: &Value, key: &str) {
        match value {
            Value::String(s) => self.write_reference(s, key),
            Value::Data(bytes) => {
                self.out.push('<');
                for byte in bytes {
                    self.out.push_str(&format!("{:02x}", byte));
                }
                self.out.push('>');
            }
            Value::Integer(i) => self.out.push_str(&i.to_string()),
            Value::Real(r) => self.out.push_str(&r.to_string()),
            Value::Boolean(b) => self.out.push_str(if *b { "YES" } else { "NO" }),
            _ => self.out.push_str("\"\""),
        }
    }

    /// Write a string, annotated when it names an object
    fn write_reference(&mut self, s: &str, key: &str) {
        self.out.push_str(&quote(s));
        if UNCOMMENTED_REFERENCE_KEYS.contains(&key) {
            return;
        }
        if let Some(comment) = self.comments.get(s) {
            self.out.push_str(" /* ");
            self.out.push_str(comment);
            self.out.push_str(" */");
        }
    }

    fn write_key(&mut self, key: &str) {
        self.out.push_str(&quote(key));
    }

    fn indent(&mut self, depth: usize) {
        for _ in 0..depth {
            self.out.push('\t');
        }
    }
}

fn sorted_entries(dict: &Dictionary, isa_first: bool) -> Vec<(&String, &Value)> {
    let mut entries: Vec<_> = dict.iter().collect();
    entries.sort_by(|a, b| {
        if isa_first {
            let a_isa = a.0 == KEY_ISA;
            let b_isa = b.0 == KEY_ISA;
            if a_isa != b_isa {
                return b_isa.cmp(&a_isa);
            }
        }
        a.0.cmp(b.0)
    });
    entries
}

/// Characters Xcode writes without quotes
fn is_plain_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '$' | '/' | ':' | '.' | '-')
}

/// Quote and escape a string when Xcode would
pub(crate) fn quote(s: &str) -> String {
    let plain = !s.is_empty() && s.chars().all(is_plain_char) && !s.contains("//") && !s.contains("___");
    if plain {
        return s.to_string();
    }
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c if c.is_control() => out.push_str(&format!("\\U{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

fn get_str<'a>(dict: &'a Dictionary, key: &str) -> Option<&'a str> {
    dict.get(key).and_then(Value::as_string)
}

fn last_component(path: &str) -> &str {
    path.rsplit('/').find(|s| !s.is_empty()).unwrap_or(path)
}

/// Display name Xcode writes next to each object id
fn object_comments(objects: &Dictionary, project_name: Option<&str>) -> HashMap<String, String> {
    let mut comments = HashMap::new();

    for (id, object) in objects.iter() {
        let Some(dict) = object.as_dictionary() else {
            continue;
        };
        let isa = get_str(dict, KEY_ISA).unwrap_or_default();
        let comment = match isa {
            ISA_PROJECT => Some("Project object".to_string()),
            ISA_FILE_REFERENCE
            | ISA_GROUP
            | ISA_VARIANT_GROUP
            | ISA_VERSION_GROUP
            | ISA_SYNCHRONIZED_ROOT_GROUP
            | ISA_REFERENCE_PROXY => get_str(dict, KEY_NAME)
                .or_else(|| get_str(dict, KEY_PATH).map(last_component))
                .map(str::to_string),
            ISA_FRAMEWORKS_PHASE => Some(get_str(dict, KEY_NAME).unwrap_or("Frameworks").to_string()),
            ISA_SOURCES_PHASE => Some(get_str(dict, KEY_NAME).unwrap_or("Sources").to_string()),
            ISA_RESOURCES_PHASE => Some(get_str(dict, KEY_NAME).unwrap_or("Resources").to_string()),
            ISA_HEADERS_PHASE => Some(get_str(dict, KEY_NAME).unwrap_or("Headers").to_string()),
            ISA_COPY_FILES_PHASE => Some(get_str(dict, KEY_NAME).unwrap_or("CopyFiles").to_string()),
            ISA_SHELL_SCRIPT_PHASE => Some(get_str(dict, KEY_NAME).unwrap_or("ShellScript").to_string()),
            ISA_NATIVE_TARGET | ISA_AGGREGATE_TARGET | ISA_LEGACY_TARGET | ISA_BUILD_CONFIGURATION => {
                get_str(dict, KEY_NAME).map(str::to_string)
            }
            ISA_TARGET_DEPENDENCY | ISA_CONTAINER_ITEM_PROXY => Some(isa.to_string()),
            ISA_PACKAGE_PRODUCT_DEPENDENCY => get_str(dict, KEY_PRODUCT_NAME).map(str::to_string),
            ISA_REMOTE_PACKAGE_REFERENCE => get_str(dict, KEY_REPOSITORY_URL).map(|url| {
                let repo = last_component(url);
                format!("{} \"{}\"", isa, repo.strip_suffix(".git").unwrap_or(repo))
            }),
            ISA_LOCAL_PACKAGE_REFERENCE => get_str(dict, KEY_RELATIVE_PATH).map(|path| format!("{} \"{}\"", isa, path)),
            _ => None,
        };
        if let Some(comment) = comment {
            comments.insert(id.clone(), comment);
        }
    }

    // Configuration lists are named after their owner
    for (_, object) in objects.iter() {
        let Some(dict) = object.as_dictionary() else {
            continue;
        };
        let Some(list_id) = get_str(dict, KEY_BUILD_CONFIGURATION_LIST) else {
            continue;
        };
        let isa = get_str(dict, KEY_ISA).unwrap_or_default();
        let owner = if isa == ISA_PROJECT {
            project_name.unwrap_or_default()
        } else {
            get_str(dict, KEY_NAME).unwrap_or_default()
        };
        comments.insert(
            list_id.to_string(),
            format!("Build configuration list for {} \"{}\"", isa, owner),
        );
    }

    // Exception sets are named after their folder and target
    let mut exception_comments = Vec::new();
    for (group_id, object) in objects.iter() {
        let Some(dict) = object.as_dictionary() else {
            continue;
        };
        if get_str(dict, KEY_ISA) != Some(ISA_SYNCHRONIZED_ROOT_GROUP) {
            continue;
        }
        let folder = comments.get(group_id).map(String::as_str).unwrap_or_default();
        for exception in dict.get(KEY_EXCEPTIONS).and_then(Value::as_array).into_iter().flatten() {
            let Some(exception_id) = exception.as_string() else {
                continue;
            };
            let Some(set) = objects.get(exception_id).and_then(Value::as_dictionary) else {
                continue;
            };
            if get_str(set, KEY_ISA) != Some(ISA_SYNCHRONIZED_EXCEPTION_SET) {
                continue;
            }
            let target = get_str(set, KEY_TARGET)
                .and_then(|t| objects.get(t))
                .and_then(Value::as_dictionary)
                .and_then(|t| get_str(t, KEY_NAME))
                .unwrap_or_default();
            exception_comments.push((
                exception_id.to_string(),
                format!("Exceptions for \"{}\" folder in \"{}\" target", folder, target),
            ));
        }
    }
    comments.extend(exception_comments);

    // Build files are named "<file> in <phase>"
    let mut build_file_comments = Vec::new();
    for (phase_id, object) in objects.iter() {
        let Some(dict) = object.as_dictionary() else {
            continue;
        };
        let is_phase = get_str(dict, KEY_ISA).is_some_and(|isa| isa.ends_with("BuildPhase"));
        if !is_phase {
            continue;
        }
        let phase_comment = comments.get(phase_id).cloned().unwrap_or_default();
        for file in dict.get(KEY_FILES).and_then(Value::as_array).into_iter().flatten() {
            let Some(build_file_id) = file.as_string() else {
                continue;
            };
            let Some(build_file) = objects.get(build_file_id).and_then(Value::as_dictionary) else {
                continue;
            };
            let file_comment = get_str(build_file, KEY_FILE_REF)
                .or_else(|| get_str(build_file, KEY_PRODUCT_REF))
                .and_then(|r| comments.get(r))
                .map(String::as_str)
                .unwrap_or("(null)");
            build_file_comments.push((build_file_id.to_string(), format!("{} in {}", file_comment, phase_comment)));
        }
    }
    comments.extend(build_file_comments);

    comments
}
