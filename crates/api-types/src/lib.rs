//! Shared metric result types
//!
//! This crate contains the result schema exchanged between the JMX polling loop and
//! the output writers: one [`QueryResult`] per attribute read, carrying the MBean
//! metadata and the values read for it.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

/// A single value read from an MBean attribute.
///
/// Composite attributes produce one value per key, simple attributes a single one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResultValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl ResultValue {
    /// Numeric view of the value, `None` for booleans and non-numeric text.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ResultValue::Integer(i) => Some(*i as f64),
            ResultValue::Float(f) => Some(*f),
            ResultValue::Text(s) => s.trim().parse::<f64>().ok(),
            ResultValue::Bool(_) => None,
        }
    }
}

impl std::fmt::Display for ResultValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResultValue::Bool(b) => write!(f, "{b}"),
            ResultValue::Integer(i) => write!(f, "{i}"),
            ResultValue::Float(v) => write!(f, "{v}"),
            ResultValue::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<bool> for ResultValue {
    fn from(value: bool) -> Self {
        ResultValue::Bool(value)
    }
}

impl From<i64> for ResultValue {
    fn from(value: i64) -> Self {
        ResultValue::Integer(value)
    }
}

impl From<f64> for ResultValue {
    fn from(value: f64) -> Self {
        ResultValue::Float(value)
    }
}

impl From<&str> for ResultValue {
    fn from(value: &str) -> Self {
        ResultValue::Text(value.to_string())
    }
}

/// Result of one attribute query against one server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult {
    /// Host the MBean server runs on
    #[serde(default)]
    pub host: String,
    /// ObjectName key properties, e.g. `type=GarbageCollector,name=G1 Young Generation`
    #[serde(default)]
    pub type_name: String,
    /// ObjectName domain, e.g. `java.lang`
    #[serde(default)]
    pub obj_domain: String,
    /// MBean implementation class
    #[serde(default)]
    pub class_name: String,
    /// Queried attribute
    #[serde(default)]
    pub attribute_name: String,
    /// Optional measurement name override set on the query
    #[serde(default)]
    pub key_alias: Option<String>,
    /// Read time in milliseconds since the Unix epoch
    pub epoch: i64,
    /// Values keyed by attribute (or composite) key
    #[serde(default)]
    pub values: BTreeMap<String, ResultValue>,
}

impl QueryResult {
    /// create an empty result for the given attribute read at `epoch`
    pub fn new(attribute_name: impl Into<String>, epoch: i64) -> Self {
        Self {
            attribute_name: attribute_name.into(),
            epoch,
            ..Default::default()
        }
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_type_name(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = type_name.into();
        self
    }

    pub fn with_obj_domain(mut self, obj_domain: impl Into<String>) -> Self {
        self.obj_domain = obj_domain.into();
        self
    }

    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = class_name.into();
        self
    }

    pub fn with_key_alias(mut self, key_alias: impl Into<String>) -> Self {
        self.key_alias = Some(key_alias.into());
        self
    }

    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<ResultValue>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }
}
