//! Enum model generation.

use log::debug;

use crate::config::Config;
use crate::descriptor::EnumDescriptorProto;
use crate::ident::{decoder_name, encoder_name, enum_default_name, type_name, variant_name};
use crate::model::{EnumNode, EnumVariant};
use crate::Error;

/// Build the enums declared at one nesting level, dropping deprecated ones
/// when configured to.
pub fn generate_enums(
    config: &Config,
    path: &[String],
    enum_types: &[EnumDescriptorProto],
) -> Result<Vec<EnumNode>, Error> {
    let mut enums = Vec::with_capacity(enum_types.len());
    for enum_type in enum_types {
        if config.skips(enum_type.is_deprecated()) {
            debug!("Skipping deprecated enum {:?}", enum_type.name);
            continue;
        }
        enums.push(generate_enum(config, path, enum_type)?);
    }
    Ok(enums)
}

/// Build one enum. Variants keep declaration order; the first one is the
/// default, matching proto3's "first value is zero" rule.
pub fn generate_enum(
    config: &Config,
    path: &[String],
    enum_type: &EnumDescriptorProto,
) -> Result<EnumNode, Error> {
    let name = enum_type.name.as_deref().ok_or(Error::MissingName)?;
    let ty = type_name(name, path);

    let variants = enum_type
        .value
        .iter()
        .filter(|v| !config.skips(v.is_deprecated()))
        .map(|v| -> Result<EnumVariant, Error> {
            let value_name = v.name.as_deref().ok_or(Error::MissingName)?;
            let number = v
                .number
                .ok_or_else(|| Error::MissingFieldNumber(value_name.to_string()))?;
            Ok(EnumVariant {
                name: variant_name(value_name, path),
                number,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    if variants.is_empty() {
        return Err(Error::EmptyEnum(ty.to_string()));
    }

    Ok(EnumNode {
        decoder: decoder_name(&ty),
        encoder: encoder_name(&ty),
        default_name: enum_default_name(&ty),
        name: ty,
        variants,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{EnumOptions, EnumValueDescriptorProto, EnumValueOptions};

    fn value(name: &str, number: i32, deprecated: bool) -> EnumValueDescriptorProto {
        EnumValueDescriptorProto {
            name: Some(name.into()),
            number: Some(number),
            options: deprecated.then(|| EnumValueOptions {
                deprecated: Some(true),
            }),
        }
    }

    fn color() -> EnumDescriptorProto {
        EnumDescriptorProto {
            name: Some("Color".into()),
            value: vec![
                value("COLOR_UNSPECIFIED", 0, false),
                value("RED", 1, false),
                value("OLD_BLUE", 2, true),
            ],
            options: None,
        }
    }

    #[test]
    fn test_top_level_enum() {
        let node = generate_enum(&Config::new(), &[], &color()).unwrap();
        assert_eq!(node.name.as_str(), "Color");
        assert_eq!(node.decoder.as_str(), "colorPortDecoder");
        assert_eq!(node.encoder.as_str(), "colorPortEncoder");
        assert_eq!(node.default_name.as_str(), "colorDefault");
        let names: Vec<_> = node.variants.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, ["ColorUnspecified", "Red", "OldBlue"]);
        assert_eq!(node.default_variant().number, 0);
    }

    #[test]
    fn test_default_variant_is_first_kept_value() {
        let mut config = Config::new();
        config.remove_deprecated(true);
        let status = EnumDescriptorProto {
            name: Some("Status".into()),
            value: vec![value("LEGACY", 0, true), value("ACTIVE", 2, false)],
            options: None,
        };
        let node = generate_enum(&config, &[], &status).unwrap();
        assert_eq!(node.variants().len(), 1);
        assert_eq!(node.default_variant().name.as_str(), "Active");
        assert_eq!(node.default_variant().number, 2);
    }

    #[test]
    fn test_nested_enum_prefixes_variants() {
        let node = generate_enum(&Config::new(), &["Palette".into()], &color()).unwrap();
        assert_eq!(node.name.as_str(), "Palette_Color");
        assert_eq!(node.variants[1].name.as_str(), "Palette_Red");
    }

    #[test]
    fn test_remove_deprecated() {
        let mut config = Config::new();
        config.remove_deprecated(true);

        let node = generate_enum(&config, &[], &color()).unwrap();
        assert_eq!(node.variants.len(), 2);

        let mut deprecated = color();
        deprecated.options = Some(EnumOptions {
            deprecated: Some(true),
        });
        let enums = generate_enums(&config, &[], &[deprecated.clone(), color()]).unwrap();
        assert_eq!(enums.len(), 1);

        let enums = generate_enums(&Config::new(), &[], &[deprecated, color()]).unwrap();
        assert_eq!(enums.len(), 2);
    }

    #[test]
    fn test_empty_enum_is_fatal() {
        let mut config = Config::new();
        config.remove_deprecated(true);
        let legacy = EnumDescriptorProto {
            name: Some("Legacy".into()),
            value: vec![value("GONE", 0, true)],
            options: None,
        };
        let err = generate_enum(&config, &[], &legacy).unwrap_err();
        assert!(matches!(err, Error::EmptyEnum(ref name) if name == "Legacy"));
    }
}
