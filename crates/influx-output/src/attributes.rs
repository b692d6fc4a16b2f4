//! Result attributes that can be promoted to InfluxDB tags.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use api_types::QueryResult;
use error_stack::Report;

use crate::error::ConfigError;
use crate::error::ConfigResult;

/// Result metadata fields eligible to be written as tags.
///
/// Ordering follows declaration order, so sets of kinds iterate deterministically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AttributeKind {
    TypeName,
    ObjDomain,
    ClassName,
    AttributeName,
    Host,
}

impl AttributeKind {
    /// Every known kind, in declaration order.
    pub const ALL: [AttributeKind; 5] = [
        AttributeKind::TypeName,
        AttributeKind::ObjDomain,
        AttributeKind::ClassName,
        AttributeKind::AttributeName,
        AttributeKind::Host,
    ];

    /// Name used both in the `resultTags` configuration and as the tag key.
    pub fn name(self) -> &'static str {
        match self {
            AttributeKind::TypeName => "typeName",
            AttributeKind::ObjDomain => "objDomain",
            AttributeKind::ClassName => "className",
            AttributeKind::AttributeName => "attributeName",
            AttributeKind::Host => "host",
        }
    }

    /// Exact, case-sensitive lookup of a configured attribute name.
    pub fn from_attribute(name: &str) -> ConfigResult<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == name)
            .ok_or_else(|| {
                Report::new(ConfigError::UnknownAttribute {
                    name: name.to_string(),
                })
                .attach_printable(format!(
                    "expected one of: {}",
                    Self::ALL.map(AttributeKind::name).join(", ")
                ))
            })
    }

    /// The value of this attribute on `result`.
    pub fn value_of(self, result: &QueryResult) -> &str {
        match self {
            AttributeKind::TypeName => &result.type_name,
            AttributeKind::ObjDomain => &result.obj_domain,
            AttributeKind::ClassName => &result.class_name,
            AttributeKind::AttributeName => &result.attribute_name,
            AttributeKind::Host => &result.host,
        }
    }
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AttributeKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_attribute(s).map_err(|report| report.current_context().clone())
    }
}

/// Resolve the configured `resultTags` into the set of attributes written as tags.
///
/// `None` means the list was not configured at all and selects every attribute. An
/// explicit empty list selects none. Any unknown name fails the whole selection.
pub fn select_attributes(requested: Option<&[String]>) -> ConfigResult<BTreeSet<AttributeKind>> {
    let selected = match requested {
        None => AttributeKind::ALL.into_iter().collect(),
        Some(names) => names
            .iter()
            .map(|name| AttributeKind::from_attribute(name))
            .collect::<ConfigResult<BTreeSet<_>>>()?,
    };

    tracing::debug!(
        tags = ?selected.iter().map(|kind| kind.name()).collect::<Vec<_>>(),
        "Result tags to write set"
    );
    Ok(selected)
}
