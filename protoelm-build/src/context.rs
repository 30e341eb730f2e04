//! Per-file generation context.

use std::collections::{HashMap, HashSet};

use crate::config::Config;
use crate::descriptor::{
    DescriptorProto, EnumDescriptorProto, FieldDescriptorProto, FileDescriptorProto,
};
use crate::Error;

/// The key and value fields of a synthetic map entry message.
#[derive(Debug, Clone, Copy)]
pub struct MapEntryInfo<'a> {
    pub key_field: &'a FieldDescriptorProto,
    pub value_field: &'a FieldDescriptorProto,
}

/// Read-only state shared by everything generated for one file.
pub struct GenerationContext<'a> {
    pub config: &'a Config,
    /// Map from fully-qualified map entry type name -> map entry info.
    map_entries: HashMap<String, MapEntryInfo<'a>>,
    /// `.pkg.Enum.VALUE` for every enum value dropped by `remove-deprecated`.
    removed_enum_values: HashSet<String>,
}

impl<'a> GenerationContext<'a> {
    pub fn new(config: &'a Config, file: &'a FileDescriptorProto) -> Result<Self, Error> {
        // Fully qualified names in the file start with `.` or `.package.`.
        let package_prefix = package_prefix(file);

        let mut map_entries = HashMap::new();
        for message in &file.message_type {
            register_map_entries(&mut map_entries, &package_prefix, message)?;
        }

        let mut ctx = Self {
            config,
            map_entries,
            removed_enum_values: HashSet::new(),
        };
        ctx.register_removed_values(file);
        Ok(ctx)
    }

    /// Also track the enum values removed from the other files of the
    /// request, so defaults referring to them can be resolved.
    pub fn with_request_files(mut self, files: &[FileDescriptorProto]) -> Self {
        for file in files {
            self.register_removed_values(file);
        }
        self
    }

    /// Whether `value` of the enum `enum_type` (fully qualified) is not
    /// generated.
    pub fn is_removed_enum_value(&self, enum_type: &str, value: &str) -> bool {
        self.removed_enum_values
            .contains(&format!("{}.{}", enum_type, value))
    }

    fn register_removed_values(&mut self, file: &FileDescriptorProto) {
        if !self.config.skips(true) {
            return;
        }
        let prefix = package_prefix(file);
        collect_removed_values(&mut self.removed_enum_values, &prefix, &file.enum_type);
        for message in &file.message_type {
            collect_nested_removed_values(&mut self.removed_enum_values, &prefix, message);
        }
    }

    /// Get map entry info if the type is a map entry.
    pub fn get_map_entry(&self, type_name: &str) -> Option<&MapEntryInfo<'a>> {
        self.map_entries.get(type_name)
    }

    /// Whether any message in the file declares a map field.
    pub fn has_map_entries(&self) -> bool {
        !self.map_entries.is_empty()
    }
}

/// `"."` or `".package."`, the start of every fully qualified name in the file.
fn package_prefix(file: &FileDescriptorProto) -> String {
    match file.package.as_deref() {
        Some(package) if !package.is_empty() => format!(".{}.", package),
        _ => ".".to_string(),
    }
}

fn collect_removed_values(
    removed: &mut HashSet<String>,
    prefix: &str,
    enums: &[EnumDescriptorProto],
) {
    for enum_type in enums {
        let Some(name) = &enum_type.name else {
            continue;
        };
        for value in enum_type.value.iter().filter(|v| v.is_deprecated()) {
            if let Some(value_name) = &value.name {
                removed.insert(format!("{}{}.{}", prefix, name, value_name));
            }
        }
    }
}

fn collect_nested_removed_values(
    removed: &mut HashSet<String>,
    prefix: &str,
    message: &DescriptorProto,
) {
    let Some(name) = &message.name else {
        return;
    };
    let nested_prefix = format!("{}{}.", prefix, name);
    collect_removed_values(removed, &nested_prefix, &message.enum_type);
    for nested in &message.nested_type {
        collect_nested_removed_values(removed, &nested_prefix, nested);
    }
}

fn register_map_entries<'a>(
    map_entries: &mut HashMap<String, MapEntryInfo<'a>>,
    prefix: &str,
    message: &'a DescriptorProto,
) -> Result<(), Error> {
    let Some(name) = &message.name else {
        return Ok(());
    };
    let full_name = format!("{}{}", prefix, name);

    if message.is_map_entry() {
        // protoc always emits the key first and the value second.
        let [key_field, value_field] = message.field.as_slice() else {
            return Err(Error::MalformedMapEntry {
                name: full_name,
                fields: message.field.len(),
            });
        };
        map_entries.insert(
            full_name.clone(),
            MapEntryInfo {
                key_field,
                value_field,
            },
        );
    }

    let nested_prefix = format!("{}.", full_name);
    for nested in &message.nested_type {
        register_map_entries(map_entries, &nested_prefix, nested)?;
    }
    Ok(())
}
