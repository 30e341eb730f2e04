//! Configuration for Elm code generation.

use std::collections::BTreeSet;

use crate::Error;

/// Files whose types are handled by the well-known type table rather than
/// generated.
pub const WELL_KNOWN_FILES: [&str; 3] = [
    "google/protobuf/timestamp.proto",
    "google/protobuf/wrappers.proto",
    "google/protobuf/descriptor.proto",
];

/// Configuration for Elm code generation.
///
/// Usually built from the protoc parameter string with
/// [`Config::from_parameter`], e.g. `--elm_out=remove-deprecated,module-prefix=Api:out`.
#[derive(Debug, Clone)]
pub struct Config {
    /// Drop deprecated messages, fields, enums and enum values.
    pub(crate) remove_deprecated: bool,

    /// Log the decoded request.
    pub(crate) debug: bool,

    /// Dotted namespace prepended to every generated module name.
    pub(crate) module_prefix: String,

    /// Proto files that are neither generated nor imported.
    pub(crate) excluded_files: BTreeSet<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            remove_deprecated: false,
            debug: false,
            module_prefix: String::new(),
            excluded_files: WELL_KNOWN_FILES.iter().map(|f| f.to_string()).collect(),
        }
    }
}

impl Config {
    /// Create a new Config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the comma separated `key` / `key=value` parameter protoc passes
    /// to the plugin.
    pub fn from_parameter(parameter: Option<&str>) -> Result<Self, Error> {
        let mut config = Self::new();
        let Some(parameter) = parameter else {
            return Ok(config);
        };

        for item in parameter.split(',').filter(|item| !item.is_empty()) {
            let (key, value) = match item.split_once('=') {
                Some((key, value)) => (key, Some(value)),
                None => (item, None),
            };
            let required = |value: Option<&str>| {
                value
                    .filter(|v| !v.is_empty())
                    .map(str::to_string)
                    .ok_or_else(|| Error::MissingParameterValue(key.to_string()))
            };

            match key {
                "remove-deprecated" => {
                    config.remove_deprecated(true);
                }
                "debug" => {
                    config.debug(true);
                }
                "module-prefix" => {
                    config.module_prefix(required(value)?);
                }
                "exclude" => {
                    config.exclude(required(value)?);
                }
                other => return Err(Error::UnknownParameter(other.to_string())),
            }
        }

        Ok(config)
    }

    /// Omit deprecated elements from the generated code.
    pub fn remove_deprecated(&mut self, enabled: bool) -> &mut Self {
        self.remove_deprecated = enabled;
        self
    }

    /// Log the decoded request while generating.
    pub fn debug(&mut self, enabled: bool) -> &mut Self {
        self.debug = enabled;
        self
    }

    /// Prepend a dotted namespace, e.g. `"Api.Proto"`, to every module name.
    pub fn module_prefix(&mut self, prefix: impl Into<String>) -> &mut Self {
        self.module_prefix = prefix.into();
        self
    }

    /// Skip a proto file entirely, both as an output and as an import.
    pub fn exclude(&mut self, path: impl Into<String>) -> &mut Self {
        self.excluded_files.insert(path.into());
        self
    }

    pub fn is_excluded(&self, path: &str) -> bool {
        self.excluded_files.contains(path)
    }

    /// Whether an element with the given deprecation marker is dropped.
    pub(crate) fn skips(&self, deprecated: bool) -> bool {
        deprecated && self.remove_deprecated
    }

    pub fn is_debug(&self) -> bool {
        self.debug
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_excludes_well_known_files() {
        let config = Config::new();
        assert!(config.is_excluded("google/protobuf/timestamp.proto"));
        assert!(config.is_excluded("google/protobuf/wrappers.proto"));
        assert!(!config.is_excluded("foo.proto"));
        assert!(!config.skips(true));
    }

    #[test]
    fn test_from_parameter() {
        let config = Config::from_parameter(Some(
            "remove-deprecated,module-prefix=Api.Proto,exclude=a.proto,exclude=b/c.proto,debug",
        ))
        .unwrap();
        assert!(config.remove_deprecated);
        assert!(config.is_debug());
        assert_eq!(config.module_prefix, "Api.Proto");
        assert!(config.is_excluded("a.proto"));
        assert!(config.is_excluded("b/c.proto"));
        assert!(config.is_excluded("google/protobuf/descriptor.proto"));
        assert!(config.skips(true));
        assert!(!config.skips(false));
    }

    #[test]
    fn test_from_parameter_empty() {
        let config = Config::from_parameter(None).unwrap();
        assert!(!config.remove_deprecated);
        assert!(config.module_prefix.is_empty());

        let config = Config::from_parameter(Some("")).unwrap();
        assert!(!config.remove_deprecated);
    }

    #[test]
    fn test_unknown_parameter() {
        let err = Config::from_parameter(Some("remove-deprecated,colour=blue")).unwrap_err();
        assert!(matches!(err, Error::UnknownParameter(ref key) if key == "colour"));
        assert_eq!(err.to_string(), "unknown parameter: \"colour\"");
    }

    #[test]
    fn test_missing_parameter_value() {
        let err = Config::from_parameter(Some("module-prefix")).unwrap_err();
        assert!(matches!(err, Error::MissingParameterValue(ref key) if key == "module-prefix"));

        let err = Config::from_parameter(Some("exclude=")).unwrap_err();
        assert!(matches!(err, Error::MissingParameterValue(ref key) if key == "exclude"));
    }

    #[test]
    fn test_exclusions_do_not_leak_between_configs() {
        let mut first = Config::new();
        first.exclude("only/first.proto");
        let second = Config::new();
        assert!(first.is_excluded("only/first.proto"));
        assert!(!second.is_excluded("only/first.proto"));
    }
}
