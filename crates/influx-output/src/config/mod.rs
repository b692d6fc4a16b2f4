pub mod cli;
pub mod settings;

use std::path::Path;

use error_stack::ResultExt;
use serde::Deserialize;

use crate::error::ConfigError;
use crate::error::ConfigResult;

pub use cli::*;
pub use settings::*;

/// Raw InfluxDB writer configuration, as found in the output writer section of a
/// query configuration file.
///
/// Every field is optional here; defaulting and validation happen in
/// [`Settings::resolve`]. Unknown keys (such as `@class`) are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InfluxDbOutputConfig {
    #[serde(default)]
    pub boolean_as_number: bool,

    #[serde(default)]
    pub debug: bool,

    pub url: Option<String>,

    pub username: Option<String>,

    pub password: Option<String>,

    pub database: Option<String>,

    pub write_consistency: Option<String>,

    pub retention_policy: Option<String>,

    /// `None` when the key is missing, which is not the same as an empty list
    pub result_tags: Option<Vec<String>>,
}

/// load the writer configuration from a JSON or YAML file
///
/// Files ending in `.yaml` or `.yml` are parsed as YAML, anything else as JSON.
pub fn load_config(path: &Path) -> ConfigResult<InfluxDbOutputConfig> {
    tracing::info!("Loading InfluxDB output configuration from {:?}", path);

    let content = std::fs::read_to_string(path)
        .change_context(ConfigError::InvalidConfiguration {
            message: "failed to read configuration file".into(),
        })
        .attach_printable_lazy(|| format!("path: {}", path.display()))?;

    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

    let config: ConfigResult<InfluxDbOutputConfig> = if is_yaml {
        serde_yaml::from_str(&content).change_context(ConfigError::InvalidConfiguration {
            message: "failed to parse YAML configuration".into(),
        })
    } else {
        serde_json::from_str(&content).change_context(ConfigError::InvalidConfiguration {
            message: "failed to parse JSON configuration".into(),
        })
    };

    config.attach_printable_lazy(|| format!("path: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use similar_asserts::assert_eq;
    use tempfile::Builder;

    use super::*;

    fn write_temp(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = Builder::new()
            .suffix(suffix)
            .tempfile()
            .expect("create temp file");
        file.write_all(content.as_bytes()).expect("write temp file");
        file
    }

    #[test]
    fn test_load_json_config() {
        let file = write_temp(
            ".json",
            r#"{
                "@class": "com.googlecode.jmxtrans.model.output.InfluxDbWriterFactory",
                "url": "http://localhost:8086",
                "username": "admin",
                "password": "secret",
                "database": "metrics",
                "writeConsistency": "QUORUM",
                "retentionPolicy": "two_weeks",
                "resultTags": ["host", "typeName"],
                "booleanAsNumber": true
            }"#,
        );

        let config = load_config(file.path()).expect("valid config");

        assert_eq!(config.url.as_deref(), Some("http://localhost:8086"));
        assert_eq!(config.username.as_deref(), Some("admin"));
        assert_eq!(config.database.as_deref(), Some("metrics"));
        assert_eq!(config.write_consistency.as_deref(), Some("QUORUM"));
        assert_eq!(config.retention_policy.as_deref(), Some("two_weeks"));
        assert_eq!(
            config.result_tags,
            Some(vec!["host".to_string(), "typeName".to_string()])
        );
        assert!(config.boolean_as_number);
        assert!(!config.debug);
    }

    #[test]
    fn test_load_yaml_config() {
        let file = write_temp(
            ".yml",
            "url: http://localhost:8086\ndatabase: metrics\nresultTags: []\ndebug: true\n",
        );

        let config = load_config(file.path()).expect("valid config");

        assert_eq!(config.database.as_deref(), Some("metrics"));
        assert_eq!(config.result_tags, Some(Vec::<String>::new()));
        assert!(config.debug);
        assert!(!config.boolean_as_number);
    }

    #[test]
    fn test_missing_and_null_result_tags_are_absent() {
        let missing: InfluxDbOutputConfig =
            serde_json::from_str(r#"{"database": "metrics"}"#).expect("valid json");
        let null: InfluxDbOutputConfig =
            serde_json::from_str(r#"{"database": "metrics", "resultTags": null}"#)
                .expect("valid json");
        let empty: InfluxDbOutputConfig =
            serde_json::from_str(r#"{"database": "metrics", "resultTags": []}"#)
                .expect("valid json");

        assert_eq!(missing.result_tags, None);
        assert_eq!(null.result_tags, None);
        assert_eq!(empty.result_tags, Some(Vec::<String>::new()));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_config(Path::new("/nonexistent/influx.json")).expect_err("no such file");
        assert!(matches!(
            err.current_context(),
            ConfigError::InvalidConfiguration { .. }
        ));
    }

    #[test]
    fn test_load_malformed_json() {
        let file = write_temp(".json", r#"{"database": "metrics","#);
        let err = load_config(file.path()).expect_err("truncated json");
        assert!(matches!(
            err.current_context(),
            ConfigError::InvalidConfiguration { .. }
        ));
    }
}
