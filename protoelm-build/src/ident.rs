//! Elm identifiers derived from protobuf names.
//!
//! Every identifier the generator emits goes through one of the resolver
//! functions here. The newtypes can only be constructed inside this crate, so
//! a raw proto name can't end up in generated code by accident.

use std::fmt;

use heck::{ToLowerCamelCase, ToUpperCamelCase};

/// Separator between nesting path segments in flattened Elm names.
const SEPARATOR: &str = "_";

/// Elm keywords that can't be used as record fields or variables.
const RESERVED: [&str; 14] = [
    "module", "exposing", "import", "type", "let", "in", "if", "then", "else", "where", "case",
    "of", "port", "as",
];

macro_rules! identifier {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

identifier!(
    /// An upper-case Elm type: record alias or custom type.
    TypeName
);
identifier!(
    /// A JSON decoder, either a runtime helper or a generated `xxxPortDecoder`.
    DecoderName
);
identifier!(
    /// A JSON encoder, either a runtime helper or a generated `xxxPortEncoder`.
    EncoderName
);
identifier!(
    /// A custom type constructor.
    VariantName
);
identifier!(
    /// A record field accessor.
    FieldName
);
identifier!(
    /// A top-level constant, e.g. an enum's default variant.
    VariableName
);

impl DecoderName {
    /// A decoder provided by the runtime, e.g. `JD.float` or `timestampDecoder`.
    pub(crate) fn builtin(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl EncoderName {
    /// An encoder provided by the runtime, e.g. `JE.int` or `numericStringEncoder`.
    pub(crate) fn builtin(name: &str) -> Self {
        Self(name.to_string())
    }
}

/// Normalizes a single proto name to the segment form used in nesting paths.
pub fn path_segment(raw: &str) -> String {
    raw.to_upper_camel_case()
}

/// Resolves a possibly nested message, enum or oneof name to a type name.
///
/// `path` holds the outer-to-inner ancestor segments (see [`path_segment`]).
pub fn type_name(raw: &str, path: &[String]) -> TypeName {
    TypeName(upper_first(&join(path, path_segment(raw))))
}

/// Resolves an enum value or oneof member to a constructor name.
///
/// Enum values are conventionally `SCREAMING_SNAKE`, so the raw name is
/// lower-cased before camel casing: `COLOR_RED` becomes `ColorRed`.
pub fn variant_name(raw: &str, path: &[String]) -> VariantName {
    let segment = raw.to_lowercase().to_upper_camel_case();
    VariantName(upper_first(&join(path, segment)))
}

/// Resolves a fully qualified reference such as `.pkg.Outer.Inner` to the
/// type name its definition was given.
///
/// Package segments start lower-case and are dropped.
pub fn external_type(fqn: &str) -> TypeName {
    TypeName(external_path(fqn).join(SEPARATOR))
}

/// Type segments of a fully qualified reference, outer to inner.
pub fn external_path(fqn: &str) -> Vec<String> {
    fqn.split('.')
        .filter(|s| s.chars().next().is_some_and(|c| !c.is_lowercase()))
        .map(path_segment)
        .collect()
}

pub fn decoder_name(ty: &TypeName) -> DecoderName {
    DecoderName(lower_first(&format!("{}PortDecoder", ty)))
}

pub fn encoder_name(ty: &TypeName) -> EncoderName {
    EncoderName(lower_first(&format!("{}PortEncoder", ty)))
}

/// The constant holding an enum's first declared variant.
pub fn enum_default_name(ty: &TypeName) -> VariableName {
    VariableName(lower_first(&format!("{}Default", ty)))
}

/// The record constant holding a message's defaults.
pub fn default_record_name(ty: &TypeName) -> VariableName {
    VariableName(format!("default{}", ty))
}

/// The synthetic constructor a oneof decodes to when no member is set.
pub fn unspecified_variant(ty: &TypeName) -> VariantName {
    VariantName(format!("{}Unspecified", ty))
}

/// Resolves a field or oneof name to a record accessor, escaping Elm keywords
/// with a trailing underscore.
pub fn field_name(raw: &str) -> FieldName {
    let ident = raw.to_lower_camel_case();
    if RESERVED.contains(&ident.as_str()) {
        FieldName(format!("{}_", ident))
    } else {
        FieldName(ident)
    }
}

fn join(path: &[String], last: String) -> String {
    let mut segments = path.to_vec();
    segments.push(last);
    segments.join(SEPARATOR)
}

pub(crate) fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub(crate) fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn path(segments: &[&str]) -> Vec<String> {
        segments.iter().map(|s| path_segment(s)).collect()
    }

    #[test]
    fn test_type_name() {
        assert_eq!(type_name("Point", &[]).as_str(), "Point");
        assert_eq!(type_name("inner_msg", &path(&["Outer"])).as_str(), "Outer_InnerMsg");
        assert_eq!(
            type_name("Leaf", &path(&["Outer", "Middle"])).as_str(),
            "Outer_Middle_Leaf"
        );
    }

    #[test]
    fn test_variant_name() {
        assert_eq!(variant_name("COLOR_RED", &[]).as_str(), "ColorRed");
        assert_eq!(variant_name("RED", &path(&["Outer"])).as_str(), "Outer_Red");
        assert_eq!(variant_name("int_value", &path(&["Shape"])).as_str(), "Shape_IntValue");
    }

    #[test]
    fn test_external_type_matches_definition() {
        assert_eq!(external_type(".geo.Point").as_str(), "Point");
        assert_eq!(external_type(".geo.v1.Outer.Inner").as_str(), "Outer_Inner");
        assert_eq!(external_type("Bare").as_str(), "Bare");
        assert_eq!(
            external_type(".pkg.Outer.InnerMsg"),
            type_name("InnerMsg", &path(&["Outer"]))
        );
        assert_eq!(external_path(".pkg.Outer.Color"), ["Outer", "Color"]);
    }

    #[test]
    fn test_derived_names() {
        let ty = type_name("Inner", &path(&["Outer"]));
        assert_eq!(decoder_name(&ty).as_str(), "outer_InnerPortDecoder");
        assert_eq!(encoder_name(&ty).as_str(), "outer_InnerPortEncoder");
        assert_eq!(enum_default_name(&ty).as_str(), "outer_InnerDefault");
        assert_eq!(unspecified_variant(&ty).as_str(), "Outer_InnerUnspecified");
        assert_eq!(default_record_name(&ty).as_str(), "defaultOuter_Inner");
    }

    #[test]
    fn test_field_name() {
        assert_eq!(field_name("user_id").as_str(), "userId");
        assert_eq!(field_name("Name").as_str(), "name");
        assert_eq!(field_name("type").as_str(), "type_");
        assert_eq!(field_name("port").as_str(), "port_");
        assert_eq!(field_name("types").as_str(), "types");
    }

    #[test]
    fn test_case_helpers() {
        assert_eq!(upper_first("abc"), "Abc");
        assert_eq!(lower_first("Abc"), "abc");
        assert_eq!(upper_first(""), "");
    }

    proptest! {
        #[test]
        fn proptest_field_name_never_reserved(raw in "[a-z][a-z_]{0,12}") {
            let name = field_name(&raw);
            prop_assert!(!RESERVED.contains(&name.as_str()));
            prop_assert_eq!(name, field_name(&raw));
        }

        #[test]
        fn proptest_type_name_is_upper(raw in "[a-zA-Z][a-zA-Z0-9_]{0,12}", outer in "[A-Z][a-z]{0,6}") {
            let ty = type_name(&raw, &[path_segment(&outer)]);
            prop_assert!(ty.as_str().starts_with(|c: char| c.is_uppercase()));
            prop_assert!(decoder_name(&ty).as_str().starts_with(|c: char| c.is_lowercase()));
        }
    }
}
