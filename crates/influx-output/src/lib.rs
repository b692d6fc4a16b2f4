//! InfluxDB output writer for JMX query results.
//!
//! A writer is assembled once from configuration and then invoked by the polling loop
//! for every batch of results:
//!
//! ```no_run
//! use influx_output::{load_config, InfluxDbWriterFactory};
//!
//! let config = load_config(std::path::Path::new("/etc/jmx/influx.json")).expect("valid config");
//! let factory = InfluxDbWriterFactory::from_config(&config).expect("valid settings");
//! let writer = factory.create();
//! writer.write(&[]).expect("batch written");
//! ```

pub mod attributes;
pub mod client;
pub mod config;
pub mod encoders;
pub mod error;
pub mod factory;
pub mod transform;
pub mod writer;

pub use api_types::QueryResult;
pub use api_types::ResultValue;
pub use attributes::select_attributes;
pub use attributes::AttributeKind;
pub use client::HttpClient;
pub use client::InfluxClient;
pub use client::WriteRequest;
pub use config::load_config;
pub use config::ConnectionParams;
pub use config::InfluxDbOutputConfig;
pub use config::Settings;
pub use config::WriteConsistency;
pub use encoders::FieldValue;
pub use encoders::Point;
pub use error::ConfigError;
pub use error::ConfigResult;
pub use error::WriteError;
pub use error::WriteResult;
pub use factory::build;
pub use factory::InfluxDbWriterFactory;
pub use writer::InfluxDbWriter;
pub use writer::OutputWriter;
