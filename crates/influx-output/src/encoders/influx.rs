use influxdb_line_protocol::LineProtocolBuilder;

use super::FieldValue;
use super::Point;
use super::PointEncoder;

/// InfluxDB line protocol encoder
pub struct InfluxEncoder;

impl InfluxEncoder {
    pub fn new() -> Self {
        Self
    }
}

impl Default for InfluxEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl PointEncoder for InfluxEncoder {
    fn encode(&self, points: &[Point]) -> Vec<u8> {
        let mut builder = LineProtocolBuilder::new();

        for point in points {
            // Tags and fields are BTreeMaps, so lines come out in key order
            let mut fields = point.fields.iter();
            let Some((first_key, first_value)) = fields.next() else {
                tracing::debug!(
                    measurement = %point.measurement,
                    "Skipping point without fields"
                );
                continue;
            };

            let mut line = builder.measurement(&point.measurement);
            for (key, value) in &point.tags {
                line = line.tag(key, value);
            }

            // The first field moves the builder into its after-field state
            let mut after_first_field = match first_value {
                FieldValue::String(s) => line.field(first_key, s.as_str()),
                FieldValue::Integer(i) => line.field(first_key, *i),
                FieldValue::UnsignedInteger(u) => line.field(first_key, *u),
                FieldValue::Float(f) => line.field(first_key, *f),
                FieldValue::Boolean(b) => line.field(first_key, *b),
            };

            for (key, value) in fields {
                after_first_field = match value {
                    FieldValue::String(s) => after_first_field.field(key, s.as_str()),
                    FieldValue::Integer(i) => after_first_field.field(key, *i),
                    FieldValue::UnsignedInteger(u) => after_first_field.field(key, *u),
                    FieldValue::Float(f) => after_first_field.field(key, *f),
                    FieldValue::Boolean(b) => after_first_field.field(key, *b),
                };
            }

            builder = after_first_field.timestamp(point.timestamp).close_line();
        }

        builder.build()
    }
}
