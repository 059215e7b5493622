//! Consul key-value store over its HTTP API.

use std::borrow::Cow;
use std::env;
use std::io::Read;

use super::KvStore;
use crate::BoxedError;

const ADDR_ENV: &str = "CONSUL_HTTP_ADDR";
const TOKEN_ENV: &str = "CONSUL_HTTP_TOKEN";
const SSL_ENV: &str = "CONSUL_HTTP_SSL";
const DEFAULT_ADDR: &str = "127.0.0.1:8500";

/// [`KvStore`] backed by a Consul agent.
///
/// Settings not given explicitly are read from `CONSUL_HTTP_ADDR`,
/// `CONSUL_HTTP_TOKEN` and `CONSUL_HTTP_SSL` on the first lookup, with the
/// agent defaulting to `127.0.0.1:8500`. A missing key (HTTP 404) is reported
/// as absent rather than as an error.
///
/// # Examples
///
/// ```no_run
/// use strata_config::source::{ConsulKv, KvSource};
///
/// let source = KvSource::new(ConsulKv::new().with_datacenter("dc1"), "/bar/foo");
/// # let _ = source;
/// ```
#[derive(Clone, Debug, Default)]
pub struct ConsulKv {
    address: Option<String>,
    token: Option<String>,
    datacenter: Option<String>,
    agent: Option<ureq::Agent>,
}

impl ConsulKv {
    /// Create a store configured from the environment.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            address: None,
            token: None,
            datacenter: None,
            agent: None,
        }
    }

    /// Override the agent address, with or without a scheme.
    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Send `token` as the ACL token.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Query a specific datacenter.
    #[must_use]
    pub fn with_datacenter(mut self, datacenter: impl Into<String>) -> Self {
        self.datacenter = Some(datacenter.into());
        self
    }

    /// Use a preconfigured HTTP agent, for example one with custom timeouts.
    #[must_use]
    pub fn with_agent(mut self, agent: ureq::Agent) -> Self {
        self.agent = Some(agent);
        self
    }

    fn agent(&mut self) -> &ureq::Agent {
        self.agent.get_or_insert_with(ureq::Agent::new)
    }

    fn base_url(&self) -> String {
        let address = self
            .address
            .clone()
            .or_else(|| env::var(ADDR_ENV).ok().filter(|a| !a.is_empty()))
            .unwrap_or_else(|| DEFAULT_ADDR.to_owned());
        if address.contains("://") {
            return address.trim_end_matches('/').to_owned();
        }
        let ssl = env::var(SSL_ENV).is_ok_and(|v| matches!(v.as_str(), "1" | "true"));
        let scheme = if ssl { "https" } else { "http" };
        format!("{scheme}://{}", address.trim_end_matches('/'))
    }

    fn token(&self) -> Option<String> {
        self.token
            .clone()
            .or_else(|| env::var(TOKEN_ENV).ok().filter(|t| !t.is_empty()))
    }
}

/// Build the raw-value lookup URL for `key`.
///
/// Each `/`-separated segment of the key and the datacenter are
/// percent-encoded; the separators are kept.
pub(crate) fn kv_url(base: &str, key: &str, datacenter: Option<&str>) -> String {
    let path = key
        .trim_start_matches('/')
        .split('/')
        .map(urlencoding::encode)
        .collect::<Vec<_>>()
        .join("/");
    match datacenter {
        Some(dc) => format!("{base}/v1/kv/{path}?raw&dc={}", urlencoding::encode(dc)),
        None => format!("{base}/v1/kv/{path}?raw"),
    }
}

impl KvStore for ConsulKv {
    fn get(&mut self, key: &str) -> Result<Option<Vec<u8>>, BoxedError> {
        let url = kv_url(&self.base_url(), key, self.datacenter.as_deref());
        let token = self.token();
        let mut request = self.agent().get(&url);
        if let Some(acl) = token {
            request = request.set("X-Consul-Token", &acl);
        }
        tracing::debug!(%url, "querying consul");
        match request.call() {
            Ok(response) => {
                let mut body = Vec::new();
                response.into_reader().read_to_end(&mut body)?;
                Ok(Some(body))
            }
            Err(ureq::Error::Status(404, _)) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn describe(&self) -> Cow<'_, str> {
        Cow::Borrowed("consul")
    }
}
