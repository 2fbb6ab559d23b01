// Transport: one authenticated HTTPS session against the appliance.
//
// Owns the `reqwest::Client`, the base URL (direct or through the local
// tunnel port), and the Digest state. Endpoint modules only ever hand it an
// appliance-relative path.

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, WWW_AUTHENTICATE};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::{Position, Url};

use crate::digest::{DigestAuth, DigestCredentials};
use crate::error::Error;

/// TLS verification mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TlsMode {
    /// Use the system certificate store.
    System,
    /// Accept any certificate (the appliance ships a self-signed one).
    DangerAcceptInvalid,
}

/// Shared transport configuration for building the HTTP client.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub tls: TlsMode,
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            tls: TlsMode::DangerAcceptInvalid,
            timeout: Duration::from_secs(30),
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this config.
    ///
    /// The cookie store keeps whatever session cookie the appliance hands
    /// out for the rest of the invocation.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        let mut builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("auer-cfg/", env!("CARGO_PKG_VERSION")))
            .cookie_store(true);

        if self.tls == TlsMode::DangerAcceptInvalid {
            builder = builder.danger_accept_invalid_certs(true);
        }

        builder
            .build()
            .map_err(|e| Error::Tls(format!("failed to build HTTP client: {e}")))
    }
}

/// Where requests are routed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PbxEndpoint {
    /// Straight to the appliance address.
    Direct { address: String },
    /// Through an SSH tunnel listening on `127.0.0.1:<local_port>`.
    Tunneled { local_port: u16 },
}

impl PbxEndpoint {
    /// The HTTPS root every appliance path is joined onto.
    pub fn base_url(&self) -> Result<Url, Error> {
        let raw = match self {
            Self::Direct { address } => format!("https://{address}"),
            Self::Tunneled { local_port } => format!("https://127.0.0.1:{local_port}"),
        };
        Ok(Url::parse(&raw)?)
    }
}

/// Authenticated request executor.
pub struct Transport {
    http: reqwest::Client,
    base_url: Url,
    digest: DigestAuth,
}

impl Transport {
    /// Create a transport for `endpoint` with a client built from `config`.
    pub fn new(
        endpoint: &PbxEndpoint,
        credentials: DigestCredentials,
        config: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = config.build_client()?;
        Ok(Self::with_client(http, endpoint.base_url()?, credentials))
    }

    /// Create a transport with a pre-built `reqwest::Client` and base URL.
    pub fn with_client(http: reqwest::Client, base_url: Url, credentials: DigestCredentials) -> Self {
        Self {
            http,
            base_url,
            digest: DigestAuth::new(credentials),
        }
    }

    /// Build the full URL for an appliance-relative path plus query pairs.
    pub fn url(&self, path: &str, query: &[(&str, &str)]) -> Result<Url, Error> {
        let mut url = self.base_url.join(path)?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    // ── Requests ─────────────────────────────────────────────────────

    /// `GET` an appliance path.
    pub async fn fetch(&self, path: &str) -> Result<reqwest::Response, Error> {
        let url = self.url(path, &[])?;
        self.execute(Method::GET, url, None).await
    }

    /// `GET` an appliance path and decode its JSON body.
    pub async fn fetch_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let resp = self.fetch(path).await?;
        let body = resp.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            let preview: String = body.chars().take(200).collect();
            Error::Deserialization {
                message: format!("{path}: {e} (body preview: {preview:?})"),
                body: body.clone(),
            }
        })
    }

    /// `POST` to an appliance path with query parameters and an optional
    /// form-encoded body.
    pub async fn send(
        &self,
        path: &str,
        query: &[(&str, &str)],
        form: Option<&[(&str, &str)]>,
    ) -> Result<reqwest::Response, Error> {
        let url = self.url(path, query)?;
        self.execute(Method::POST, url, form).await
    }

    /// Issue a request, answering at most one Digest challenge.
    async fn execute(
        &self,
        method: Method,
        url: Url,
        form: Option<&[(&str, &str)]>,
    ) -> Result<reqwest::Response, Error> {
        let uri = url[Position::BeforePath..].to_owned();
        let path = url.path().to_owned();
        let mut authorization = self.digest.authorization(&method, &uri)?;

        debug!("{method} {url}");

        for attempt in 0..2 {
            let mut builder = self.http.request(method.clone(), url.clone());
            if let Some(fields) = form {
                builder = builder.form(fields);
            }
            if let Some(ref header) = authorization {
                builder = builder.header(AUTHORIZATION, header);
            }

            let resp = builder.send().await?;
            if resp.status() != StatusCode::UNAUTHORIZED {
                return check_status(&path, resp).await;
            }
            if attempt > 0 {
                break;
            }

            let challenge = resp
                .headers()
                .get(WWW_AUTHENTICATE)
                .and_then(|v| v.to_str().ok())
                .ok_or_else(|| {
                    Error::DigestChallenge(format!("401 from {path} without a challenge"))
                })?
                .to_owned();
            trace!(path, "answering digest challenge");
            authorization = Some(self.digest.accept_challenge(&challenge, &method, &uri)?);
        }

        Err(Error::Authentication {
            message: format!(
                "appliance rejected credentials for user '{}'",
                self.digest.username()
            ),
        })
    }
}

async fn check_status(path: &str, resp: reqwest::Response) -> Result<reqwest::Response, Error> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(Error::Http {
        status: status.as_u16(),
        path: path.to_owned(),
        body: body.chars().take(200).collect(),
    })
}
