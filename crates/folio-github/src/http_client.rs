use std::{
    sync::{Arc, LazyLock, RwLock},
    time::Duration,
};

use ureq::{
    http::{self, HeaderMap, Uri},
    typestate::WithoutBody,
    Agent, Proxy, RequestBuilder,
};

#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub user_agent: Option<String>,
    pub headers: Option<HeaderMap>,
    pub proxy: Option<Proxy>,
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    /// Creates a default ClientConfig with a user agent of "folio" and no proxy,
    /// extra headers or timeout.
    ///
    /// The GitHub API rejects requests that carry no user agent, so one is
    /// always set unless explicitly cleared.
    ///
    /// # Examples
    ///
    /// ```
    /// use folio_github::http_client::ClientConfig;
    ///
    /// let cfg = ClientConfig::default();
    /// assert_eq!(cfg.user_agent.as_deref(), Some("folio"));
    /// assert!(cfg.proxy.is_none());
    /// assert!(cfg.timeout.is_none());
    /// ```
    fn default() -> Self {
        Self {
            user_agent: Some("folio".into()),
            proxy: None,
            headers: None,
            timeout: None,
        }
    }
}

impl ClientConfig {
    /// Builds an HTTP `Agent` from this config.
    ///
    /// Non-success statuses are returned as ordinary responses rather than
    /// errors so callers can report the status code themselves.
    pub fn build(&self) -> Agent {
        let mut config = ureq::Agent::config_builder()
            .proxy(self.proxy.clone())
            .timeout_global(self.timeout)
            .http_status_as_error(false);

        if let Some(user_agent) = &self.user_agent {
            config = config.user_agent(user_agent);
        }

        config.build().into()
    }
}

struct SharedClient {
    agent: Agent,
    config: ClientConfig,
}

static SHARED_CLIENT_STATE: LazyLock<Arc<RwLock<SharedClient>>> = LazyLock::new(|| {
    let config = ClientConfig::default();
    let agent = config.build();

    Arc::new(RwLock::new(SharedClient {
        agent,
        config,
    }))
});

#[derive(Clone, Default)]
pub struct SharedAgent;

impl SharedAgent {
    pub fn new() -> Self {
        Self
    }

    /// Create a GET request builder for the given URI using the shared agent.
    ///
    /// Any global headers configured in the shared client are applied to the
    /// request.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use folio_github::http_client::SHARED_AGENT;
    ///
    /// let response = SHARED_AGENT.get("https://api.github.com/users/octocat/repos").call();
    /// ```
    pub fn get<T>(&self, uri: T) -> RequestBuilder<WithoutBody>
    where
        Uri: TryFrom<T>,
        <Uri as TryFrom<T>>::Error: Into<http::Error>,
    {
        let state = SHARED_CLIENT_STATE.read().unwrap();
        let req = state.agent.get(uri);
        apply_headers(req, &state.config.headers)
    }
}

/// Apply headers from an optional `HeaderMap` to a `RequestBuilder`.
fn apply_headers<B>(mut req: RequestBuilder<B>, headers: &Option<HeaderMap>) -> RequestBuilder<B> {
    if let Some(headers) = headers {
        for (key, value) in headers.iter() {
            req = req.header(key, value);
        }
    }
    req
}

pub static SHARED_AGENT: LazyLock<SharedAgent> = LazyLock::new(SharedAgent::new);

/// Updates the global shared HTTP client configuration and rebuilds the shared
/// agent from it.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// use folio_github::http_client::configure_http_client;
///
/// configure_http_client(|cfg| {
///     cfg.timeout = Some(Duration::from_secs(30));
/// });
/// ```
pub fn configure_http_client<F>(updater: F)
where
    F: FnOnce(&mut ClientConfig),
{
    let mut state = SHARED_CLIENT_STATE.write().unwrap();
    let mut new_config = state.config.clone();
    updater(&mut new_config);
    let new_agent = new_config.build();
    state.agent = new_agent;
    state.config = new_config;
}

#[cfg(test)]
mod tests {
    use serial_test::serial;
    use ureq::http::HeaderValue;

    use super::*;
    use crate::test_utils::LoopbackServer;

    #[test]
    fn test_client_config_default() {
        let config = ClientConfig::default();
        assert_eq!(config.user_agent, Some("folio".to_string()));
        assert!(config.proxy.is_none());
        assert!(config.headers.is_none());
        assert!(config.timeout.is_none());
    }

    #[test]
    fn test_non_success_status_is_a_response() {
        let server = LoopbackServer::respond("503 Service Unavailable", "{}");
        let resp = ClientConfig::default()
            .build()
            .get(&format!("{}/users/someone/repos", server.base))
            .call()
            .unwrap();
        let head = server.request_head();

        assert_eq!(resp.status().as_u16(), 503);
        assert!(head.contains("user-agent: folio\r\n"));
    }

    #[test]
    fn test_apply_headers_none_adds_nothing() {
        let agent: Agent = ClientConfig::default().build();
        let req = apply_headers(agent.get("http://localhost/"), &None);
        assert!(req.headers_ref().unwrap().is_empty());
    }

    #[test]
    #[serial]
    fn test_configure_http_client() {
        configure_http_client(|cfg| {
            cfg.user_agent = Some("folio-test/1.0".to_string());
        });

        let state = SHARED_CLIENT_STATE.read().unwrap();
        assert_eq!(state.config.user_agent.as_deref(), Some("folio-test/1.0"));
    }

    #[test]
    #[serial]
    fn test_configured_headers_reach_request() {
        let mut headers = HeaderMap::new();
        headers.insert("x-folio-trace", HeaderValue::from_static("abc123"));
        configure_http_client(|cfg| cfg.headers = Some(headers));

        let server = LoopbackServer::respond("200 OK", "[]");
        SHARED_AGENT.get(&server.base).call().unwrap();
        let head = server.request_head();

        configure_http_client(|cfg| cfg.headers = None);
        assert!(head.contains("x-folio-trace: abc123\r\n"));
    }
}
