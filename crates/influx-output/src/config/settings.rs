use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use error_stack::Report;
use error_stack::ResultExt;

use super::InfluxDbOutputConfig;
use crate::attributes::select_attributes;
use crate::attributes::AttributeKind;
use crate::error::ConfigError;
use crate::error::ConfigResult;

/// Retention policy used when none is configured
pub const DEFAULT_RETENTION_POLICY: &str = "default";

/// Acknowledgment level required from the cluster before a write succeeds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteConsistency {
    #[default]
    All,
    Any,
    One,
    Quorum,
}

impl WriteConsistency {
    /// Value of the `consistency` query parameter on the write endpoint.
    pub fn as_query_value(self) -> &'static str {
        match self {
            WriteConsistency::All => "all",
            WriteConsistency::Any => "any",
            WriteConsistency::One => "one",
            WriteConsistency::Quorum => "quorum",
        }
    }
}

impl fmt::Display for WriteConsistency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WriteConsistency::All => "ALL",
            WriteConsistency::Any => "ANY",
            WriteConsistency::One => "ONE",
            WriteConsistency::Quorum => "QUORUM",
        };
        f.write_str(name)
    }
}

impl FromStr for WriteConsistency {
    type Err = ConfigError;

    /// Case-sensitive, the configured value must be one of `ALL`, `ANY`, `ONE` or `QUORUM`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ALL" => Ok(WriteConsistency::All),
            "ANY" => Ok(WriteConsistency::Any),
            "ONE" => Ok(WriteConsistency::One),
            "QUORUM" => Ok(WriteConsistency::Quorum),
            other => Err(ConfigError::InvalidConfiguration {
                message: format!("unknown write consistency `{other}`"),
            }),
        }
    }
}

/// Resolved writer settings, immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub database: String,
    pub write_consistency: WriteConsistency,
    pub retention_policy: String,
    pub boolean_as_number: bool,
    pub tag_attributes: BTreeSet<AttributeKind>,
    pub debug: bool,
}

impl Settings {
    /// validate and default the raw configuration
    pub fn resolve(config: &InfluxDbOutputConfig) -> ConfigResult<Self> {
        let database = non_blank(config.database.as_deref())
            .ok_or_else(|| {
                Report::new(ConfigError::InvalidConfiguration {
                    message: "database is required".into(),
                })
            })?
            .to_string();

        let write_consistency = match non_blank(config.write_consistency.as_deref()) {
            Some(value) => value
                .parse::<WriteConsistency>()
                .map_err(Report::new)
                .attach_printable("expected one of: ALL, ANY, ONE, QUORUM")?,
            None => WriteConsistency::default(),
        };

        let retention_policy = non_blank(config.retention_policy.as_deref())
            .unwrap_or(DEFAULT_RETENTION_POLICY)
            .to_string();

        let tag_attributes = select_attributes(config.result_tags.as_deref())?;

        let settings = Self {
            database,
            write_consistency,
            retention_policy,
            boolean_as_number: config.boolean_as_number,
            tag_attributes,
            debug: config.debug,
        };
        tracing::debug!(settings = %settings, "Resolved InfluxDB writer settings");
        Ok(settings)
    }
}

impl fmt::Display for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tags: Vec<_> = self.tag_attributes.iter().map(|kind| kind.name()).collect();
        write!(
            f,
            "database={} retentionPolicy={} writeConsistency={} booleanAsNumber={} resultTags=[{}] debug={}",
            self.database,
            self.retention_policy,
            self.write_consistency,
            self.boolean_as_number,
            tags.join(","),
            self.debug,
        )
    }
}

/// Connection parameters handed to the client untouched
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ConnectionParams {
    pub url: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl From<&InfluxDbOutputConfig> for ConnectionParams {
    fn from(config: &InfluxDbOutputConfig) -> Self {
        Self {
            url: config.url.clone(),
            username: config.username.clone(),
            password: config.password.clone(),
        }
    }
}

impl fmt::Debug for ConnectionParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionParams")
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .finish()
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
