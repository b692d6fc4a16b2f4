use std::sync::Arc;

use api_types::QueryResult;
use api_types::ResultValue;
use tracing::debug;
use tracing::info;
use tracing::trace;

use crate::client::InfluxClient;
use crate::client::WriteRequest;
use crate::config::Settings;
use crate::encoders::json::JsonEncoder;
use crate::encoders::FieldValue;
use crate::encoders::Point;
use crate::encoders::PointEncoder;
use crate::error::WriteResult;

/// Sink for the results of one polling cycle.
///
/// Writers hold no mutable state, so one instance can be shared by every dispatch
/// thread.
pub trait OutputWriter: Send + Sync {
    fn write(&self, results: &[QueryResult]) -> WriteResult<()>;
}

/// Writes every result as one InfluxDB point
pub struct InfluxDbWriter {
    settings: Settings,
    client: Arc<dyn InfluxClient>,
}

impl InfluxDbWriter {
    pub fn new(settings: Settings, client: Arc<dyn InfluxClient>) -> Self {
        Self { settings, client }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Build the point for `result`, `None` when it has no measurement name or carries no
    /// numeric value.
    ///
    /// An empty `keyAlias` counts as unset. Line breaks in tag values and field keys are
    /// replaced by spaces, and values with an empty key are dropped.
    pub fn to_point(&self, result: &QueryResult) -> Option<Point> {
        let measurement = result
            .key_alias
            .as_deref()
            .filter(|alias| !alias.is_empty())
            .unwrap_or(&result.attribute_name);
        if measurement.is_empty() {
            debug!(epoch = result.epoch, "Result has no measurement name, skipping");
            return None;
        }
        let measurement = single_line(measurement);
        let mut point = Point::new(measurement.as_str(), result.epoch);

        for kind in &self.settings.tag_attributes {
            let value = kind.value_of(result);
            // line protocol has no empty tag values
            if !value.is_empty() {
                point = point.tag(kind.name(), single_line(value));
            }
        }

        for (key, value) in &result.values {
            if key.is_empty() {
                debug!(measurement = %measurement, "Dropping value without a key");
                continue;
            }
            match numeric_field(value) {
                Some(field) => point = point.field(single_line(key), field),
                None => trace!(
                    measurement = %measurement,
                    key = %key,
                    value = %value,
                    "Dropping non-numeric value"
                ),
            }
        }

        if point.fields.is_empty() {
            debug!(measurement = %measurement, "No numeric values in result, skipping");
            return None;
        }
        Some(point)
    }
}

impl OutputWriter for InfluxDbWriter {
    fn write(&self, results: &[QueryResult]) -> WriteResult<()> {
        let points: Vec<Point> = results.iter().filter_map(|r| self.to_point(r)).collect();
        if points.is_empty() {
            debug!(results = results.len(), "Nothing to write");
            return Ok(());
        }

        if self.settings.debug {
            info!(
                database = %self.settings.database,
                "Writing points:\n{}",
                JsonEncoder::new().encode_to_string(&points)
            );
        }

        let request = WriteRequest {
            database: &self.settings.database,
            retention_policy: &self.settings.retention_policy,
            consistency: self.settings.write_consistency,
        };
        self.client.write(&request, &points)
    }
}

/// Only numbers become fields; text is kept when it parses as a number.
fn numeric_field(value: &ResultValue) -> Option<FieldValue> {
    match value {
        ResultValue::Integer(i) => Some(FieldValue::Integer(*i)),
        ResultValue::Float(f) if f.is_finite() => Some(FieldValue::Float(*f)),
        ResultValue::Text(_) => value
            .as_f64()
            .filter(|f| f.is_finite())
            .map(FieldValue::Float),
        ResultValue::Float(_) | ResultValue::Bool(_) => None,
    }
}

/// A line break would end the line protocol record early
fn single_line(value: &str) -> String {
    value.replace(['\n', '\r'], " ")
}
