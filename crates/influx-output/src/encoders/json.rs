use serde_json::json;

use super::Point;
use super::PointEncoder;

/// JSON lines encoder, used to log batches when debugging is enabled
pub struct JsonEncoder;

impl JsonEncoder {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl PointEncoder for JsonEncoder {
    fn encode(&self, points: &[Point]) -> Vec<u8> {
        let mut out = Vec::new();
        for point in points {
            let line = json!({
                "measure": point.measurement,
                "ts": point.timestamp,
                "tag": point.tags,
                "field": point.fields,
            });
            out.extend_from_slice(line.to_string().as_bytes());
            out.push(b'\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::*;

    #[test]
    fn test_encode_basic() {
        let point = Point::new("HeapMemoryUsage", 1609459200000)
            .tag("host", "server1")
            .field("used", 1024i64)
            .field("ratio", 0.25)
            .field("enabled", false);

        let encoded = JsonEncoder::new().encode_to_string(&[point]);
        let parsed: Value = serde_json::from_str(encoded.trim_end()).expect("Should be valid JSON");

        assert_eq!(parsed["measure"], "HeapMemoryUsage");
        assert_eq!(parsed["ts"], 1609459200000i64);
        assert_eq!(parsed["tag"]["host"], "server1");
        assert_eq!(parsed["field"]["used"], 1024);
        assert_eq!(parsed["field"]["ratio"], 0.25);
        assert_eq!(parsed["field"]["enabled"], false);
    }

    #[test]
    fn test_one_line_per_point() {
        let points = vec![
            Point::new("a", 1).field("v", 1i64),
            Point::new("b", 2).field("v", 2i64),
        ];

        let encoded = JsonEncoder::new().encode_to_string(&points);
        let lines: Vec<_> = encoded.lines().collect();

        assert_eq!(lines.len(), 2);
        for line in lines {
            serde_json::from_str::<Value>(line).expect("Each line should be valid JSON");
        }
    }
}
