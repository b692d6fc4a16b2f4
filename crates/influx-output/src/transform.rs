//! Result transformations applied in front of a writer.

use api_types::QueryResult;
use api_types::ResultValue;

use crate::error::WriteResult;
use crate::writer::OutputWriter;

/// `true` becomes `1`, `false` becomes `0`, anything else is returned as is.
pub fn boolean_to_number(value: ResultValue) -> ResultValue {
    match value {
        ResultValue::Bool(b) => ResultValue::Integer(i64::from(b)),
        other => other,
    }
}

/// Apply [`boolean_to_number`] to every value of the result.
pub fn booleans_as_numbers(mut result: QueryResult) -> QueryResult {
    result.values = std::mem::take(&mut result.values)
        .into_iter()
        .map(|(key, value)| (key, boolean_to_number(value)))
        .collect();
    result
}

/// Transforms every result of a batch before handing the batch to the wrapped writer.
pub struct ResultTransformerWriter<F, W> {
    transformer: F,
    target: W,
}

impl<F, W> ResultTransformerWriter<F, W>
where
    F: Fn(QueryResult) -> QueryResult + Send + Sync,
    W: OutputWriter,
{
    pub fn new(transformer: F, target: W) -> Self {
        Self {
            transformer,
            target,
        }
    }
}

impl<F, W> OutputWriter for ResultTransformerWriter<F, W>
where
    F: Fn(QueryResult) -> QueryResult + Send + Sync,
    W: OutputWriter,
{
    fn write(&self, results: &[QueryResult]) -> WriteResult<()> {
        let transformed: Vec<QueryResult> = results
            .iter()
            .cloned()
            .map(&self.transformer)
            .collect();
        self.target.write(&transformed)
    }
}

/// Wrap `writer` so booleans reach it as numbers, or return it untouched when disabled.
pub fn wrap_boolean_to_number<W>(enabled: bool, writer: W) -> Box<dyn OutputWriter>
where
    W: OutputWriter + 'static,
{
    if enabled {
        Box::new(ResultTransformerWriter::new(booleans_as_numbers, writer))
    } else {
        Box::new(writer)
    }
}
