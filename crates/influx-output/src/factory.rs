//! Writer assembly: settings + client handle -> ready-to-use writer.

use std::sync::Arc;

use error_stack::ResultExt;

use crate::client::HttpClient;
use crate::client::InfluxClient;
use crate::config::ConnectionParams;
use crate::config::InfluxDbOutputConfig;
use crate::config::Settings;
use crate::error::ConfigError;
use crate::error::ConfigResult;
use crate::transform::wrap_boolean_to_number;
use crate::writer::InfluxDbWriter;
use crate::writer::OutputWriter;

/// Compose the base writer with the boolean-to-number stage when it is enabled.
pub fn build(settings: Settings, client: Arc<dyn InfluxClient>) -> Box<dyn OutputWriter> {
    let boolean_as_number = settings.boolean_as_number;
    wrap_boolean_to_number(boolean_as_number, InfluxDbWriter::new(settings, client))
}

/// Resolved settings plus a client handle, able to hand out writers.
pub struct InfluxDbWriterFactory {
    settings: Settings,
    client: Arc<dyn InfluxClient>,
}

impl InfluxDbWriterFactory {
    pub fn new(settings: Settings, client: Arc<dyn InfluxClient>) -> Self {
        Self { settings, client }
    }

    /// Resolve `config` and connect the HTTP client it describes.
    pub fn from_config(config: &InfluxDbOutputConfig) -> ConfigResult<Self> {
        let settings = Settings::resolve(config)?;
        let params = ConnectionParams::from(config);

        tracing::debug!(
            url = ?params.url,
            username = ?params.username,
            "Connecting to InfluxDB"
        );
        let client = HttpClient::connect(&params)
            .attach_printable_lazy(|| format!("database: {}", settings.database))
            .change_context(ConfigError::InvalidConfiguration {
                message: "failed to create InfluxDB client".into(),
            })?;

        Ok(Self::new(settings, Arc::new(client)))
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Every writer created shares the factory's client.
    pub fn create(&self) -> Box<dyn OutputWriter> {
        build(self.settings.clone(), Arc::clone(&self.client))
    }
}
