//! Blocking HTTP binding for the InfluxDB 1.x `/write` endpoint.
//!
//! One call is one POST of line protocol. Nothing is buffered or retried here.

use error_stack::bail;
use error_stack::Report;
use error_stack::ResultExt;
use reqwest::blocking::Client as BlockingClient;
use reqwest::blocking::ClientBuilder;
use tracing::debug;
use tracing::info;
use url::Url;

use super::InfluxClient;
use super::WriteRequest;
use crate::config::ConnectionParams;
use crate::encoders::influx::InfluxEncoder;
use crate::encoders::Point;
use crate::encoders::PointEncoder;
use crate::error::ConfigError;
use crate::error::ConfigResult;
use crate::error::WriteError;
use crate::error::WriteResult;

/// Timestamps of encoded points are in milliseconds
const PRECISION: &str = "ms";

/// InfluxDB client over HTTP
pub struct HttpClient {
    http: BlockingClient,
    write_url: Url,
    username: Option<String>,
    password: Option<String>,
    encoder: InfluxEncoder,
}

impl HttpClient {
    /// create the client; no request is sent until the first write
    pub fn connect(params: &ConnectionParams) -> ConfigResult<Self> {
        Self::connect_with(params, BlockingClient::builder())
    }

    pub(crate) fn connect_with(params: &ConnectionParams, builder: ClientBuilder) -> ConfigResult<Self> {
        let raw_url = params
            .url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| {
                Report::new(ConfigError::InvalidConfiguration {
                    message: "url is required".into(),
                })
            })?;
        let write_url = write_endpoint(raw_url)?;

        let http = builder
            .build()
            .change_context(ConfigError::InvalidConfiguration {
                message: "Failed to create HTTP client for InfluxDB".into(),
            })?;

        info!(url = %write_url, username = ?params.username, "InfluxDB HTTP client created");

        Ok(Self {
            http,
            write_url,
            username: params.username.clone(),
            password: params.password.clone(),
            encoder: InfluxEncoder::new(),
        })
    }

    /// endpoint every batch is posted to
    pub fn write_url(&self) -> &Url {
        &self.write_url
    }
}

impl InfluxClient for HttpClient {
    fn write(&self, request: &WriteRequest<'_>, points: &[Point]) -> WriteResult<()> {
        let body = self.encoder.encode(points);

        let mut builder = self
            .http
            .post(self.write_url.clone())
            .query(&[
                ("db", request.database),
                ("rp", request.retention_policy),
                ("consistency", request.consistency.as_query_value()),
                ("precision", PRECISION),
            ])
            .body(body);
        if let Some(username) = &self.username {
            builder = builder.basic_auth(username, self.password.as_ref());
        }

        let response = builder.send().change_context(WriteError::Network {
            message: format!("Failed to send points to {}", self.write_url),
        })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().unwrap_or_default();
            bail!(WriteError::Rejected {
                status: status.as_u16(),
                message: message.trim().to_string(),
            });
        }

        debug!(
            points = points.len(),
            database = request.database,
            retention_policy = request.retention_policy,
            "Points written to InfluxDB"
        );
        Ok(())
    }
}

/// `<base>/write`, keeping any path prefix the base URL already has
fn write_endpoint(raw_url: &str) -> ConfigResult<Url> {
    let mut base = Url::parse(raw_url)
        .change_context(ConfigError::InvalidConfiguration {
            message: "Invalid InfluxDB url".into(),
        })
        .attach_printable_lazy(|| format!("url: {raw_url}"))?;

    if !matches!(base.scheme(), "http" | "https") {
        bail!(ConfigError::InvalidConfiguration {
            message: format!("unsupported url scheme `{}`", base.scheme()),
        });
    }

    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }

    base.join("write")
        .change_context(ConfigError::InvalidConfiguration {
            message: "Invalid InfluxDB url".into(),
        })
        .attach_printable_lazy(|| format!("url: {raw_url}"))
}

#[cfg(test)]
mod tests {
    use std::io::BufRead;
    use std::io::BufReader;
    use std::io::Read;
    use std::io::Write;
    use std::net::TcpListener;
    use std::thread;
    use std::thread::JoinHandle;

    use similar_asserts::assert_eq;
    use test_log::test;

    use super::*;
    use crate::config::WriteConsistency;

    fn params(url: &str) -> ConnectionParams {
        ConnectionParams {
            url: Some(url.to_string()),
            ..Default::default()
        }
    }

    fn local_client(params: &ConnectionParams) -> HttpClient {
        HttpClient::connect_with(params, BlockingClient::builder().no_proxy())
            .expect("should create client")
    }

    /// Accept a single request, answer it and hand back the raw request
    fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").expect("should bind");
        let addr = listener.local_addr().expect("should have address");

        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().expect("should accept");
            let mut reader = BufReader::new(stream.try_clone().expect("should clone stream"));

            let mut head = String::new();
            let mut content_length = 0;
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).expect("should read line");
                if line.is_empty() || line == "\r\n" {
                    break;
                }
                let lower = line.to_ascii_lowercase();
                if let Some(value) = lower.strip_prefix("content-length:") {
                    content_length = value.trim().parse().expect("numeric content length");
                }
                head.push_str(&lower);
            }

            let mut request_body = vec![0; content_length];
            reader
                .read_exact(&mut request_body)
                .expect("should read body");

            write!(
                stream,
                "{status_line}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            )
            .expect("should write response");

            head + "\r\n" + &String::from_utf8(request_body).expect("utf8 body")
        });

        (format!("http://{addr}"), handle)
    }

    fn request() -> WriteRequest<'static> {
        WriteRequest {
            database: "metrics",
            retention_policy: "default",
            consistency: WriteConsistency::Quorum,
        }
    }

    #[test]
    fn test_write_endpoint() {
        let client = local_client(&params("http://localhost:8086"));
        assert_eq!(client.write_url().as_str(), "http://localhost:8086/write");

        let client = local_client(&params("https://proxy.example.com:8443/influx"));
        assert_eq!(
            client.write_url().as_str(),
            "https://proxy.example.com:8443/influx/write"
        );
    }

    #[test]
    fn test_connect_requires_url() {
        for raw in [ConnectionParams::default(), params(""), params("  ")] {
            let err = HttpClient::connect(&raw).err().expect("url is required");
            assert!(matches!(
                err.current_context(),
                ConfigError::InvalidConfiguration { .. }
            ));
        }
    }

    #[test]
    fn test_connect_rejects_invalid_url() {
        for raw in ["not a url", "localhost:8086", "ftp://influx:21"] {
            assert!(
                HttpClient::connect(&params(raw)).is_err(),
                "{raw} should be rejected"
            );
        }
    }

    #[test]
    fn test_write_posts_line_protocol() {
        let (url, server) = serve_once("HTTP/1.1 204 No Content", "");
        let client = local_client(&ConnectionParams {
            url: Some(url),
            username: Some("admin".to_string()),
            password: Some("secret".to_string()),
        });

        let points = vec![Point::new("HeapMemoryUsage", 1700000000000)
            .tag("host", "app-1")
            .field("used", 1024i64)];
        client
            .write(&request(), &points)
            .expect("write should succeed");

        let raw = server.join().expect("server thread");
        let request_line = raw.lines().next().expect("request line");
        assert!(request_line.starts_with("post /write?"));
        assert!(request_line.contains("db=metrics"));
        assert!(request_line.contains("rp=default"));
        assert!(request_line.contains("consistency=quorum"));
        assert!(request_line.contains("precision=ms"));
        // admin:secret
        assert!(raw.contains("authorization: basic ywrtaw46c2vjcmv0"));
        assert!(raw.ends_with("HeapMemoryUsage,host=app-1 used=1024i 1700000000000\n"));
    }

    #[test]
    fn test_write_without_credentials_sends_no_auth() {
        let (url, server) = serve_once("HTTP/1.1 204 No Content", "");
        let client = local_client(&params(&url));

        client
            .write(&request(), &[Point::new("m", 1).field("v", 1.0)])
            .expect("write should succeed");

        let raw = server.join().expect("server thread");
        assert!(!raw.contains("authorization:"));
    }

    #[test]
    fn test_rejected_write() {
        let (url, server) = serve_once("HTTP/1.1 404 Not Found", "database not found: \"metrics\"");
        let client = local_client(&params(&url));

        let err = client
            .write(&request(), &[Point::new("m", 1).field("v", 1.0)])
            .expect_err("write should be rejected");
        server.join().expect("server thread");

        assert_eq!(
            err.current_context(),
            &WriteError::Rejected {
                status: 404,
                message: "database not found: \"metrics\"".to_string(),
            }
        );
    }

    #[test]
    fn test_unreachable_server() {
        let addr = TcpListener::bind("127.0.0.1:0")
            .expect("should bind")
            .local_addr()
            .expect("should have address");
        // listener is dropped, nothing accepts on this port anymore
        let client = local_client(&params(&format!("http://{addr}")));

        let err = client
            .write(&request(), &[Point::new("m", 1).field("v", 1.0)])
            .expect_err("nothing is listening");

        assert!(matches!(err.current_context(), WriteError::Network { .. }));
    }
}
