//! Blocking Vault API client for namespace and identity group reads.

use crate::constants;
use crate::core::error::FetchError;
use crate::models::group::{GroupRecord, GroupResponse};
use crate::models::listing::ListResponse;
use clap::ValueEnum;
use reqwest::blocking::{Client, Response};
use reqwest::header::HeaderValue;
use reqwest::{Method, Url};
use serde::de::DeserializeOwned;
use tracing::debug;
use zeroize::Zeroizing;

/// The three reads the export needs. Implemented over HTTP by [`VaultClient`]
/// and by in-memory fakes in tests.
pub trait GroupDirectory {
    /// Child namespaces of the root namespace, in service order.
    fn list_namespaces(&self) -> Result<Vec<String>, FetchError>;

    /// Identity group ids defined in `namespace`.
    fn list_groups(&self, namespace: &str) -> Result<Vec<String>, FetchError>;

    /// Detail record for one group.
    fn read_group(&self, namespace: &str, group_id: &str) -> Result<GroupRecord, FetchError>;
}

/// How listing calls are issued. Some deployments (proxies, older load
/// balancers) reject the `LIST` verb, so this is a configuration choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ListMethod {
    /// `LIST <path>`
    #[default]
    List,
    /// `GET <path>?list=true`
    Get,
}

impl ListMethod {
    fn http_method(self) -> Result<Method, FetchError> {
        match self {
            ListMethod::List => Method::from_bytes(constants::LIST_VERB.as_bytes())
                .map_err(|e| FetchError::Other(format!("invalid listing verb: {}", e))),
            ListMethod::Get => Ok(Method::GET),
        }
    }
}

pub struct VaultClient {
    http: Client,
    base: String,
    token: Zeroizing<String>,
    list_method: ListMethod,
    list_verb: Method,
}

impl VaultClient {
    /// `base` is scheme + host[:port] without a trailing slash.
    pub fn new(
        base: &str,
        token: Zeroizing<String>,
        list_method: ListMethod,
    ) -> Result<Self, FetchError> {
        let base = base.trim_end_matches('/').to_string();
        Url::parse(&base).map_err(|e| FetchError::InvalidUrl {
            url: base.clone(),
            reason: e.to_string(),
        })?;
        let http = Client::builder()
            .user_agent(concat!("vault-ad-groups/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|source| FetchError::Transport {
                url: base.clone(),
                source,
            })?;
        Ok(Self {
            http,
            base,
            token,
            list_method,
            list_verb: list_method.http_method()?,
        })
    }

    pub fn list_method(&self) -> ListMethod {
        self.list_method
    }

    fn endpoint(&self, path_and_query: &str) -> Result<Url, FetchError> {
        let raw = format!("{}{}", self.base, path_and_query);
        Url::parse(&raw).map_err(|e| FetchError::InvalidUrl {
            url: raw,
            reason: e.to_string(),
        })
    }

    fn namespaces_url(&self) -> Result<Url, FetchError> {
        match self.list_method {
            ListMethod::List => self.endpoint(constants::NAMESPACES_PATH),
            ListMethod::Get => self.endpoint(&format!(
                "{}?{}",
                constants::NAMESPACES_PATH,
                constants::LIST_QUERY
            )),
        }
    }

    fn groups_url(&self) -> Result<Url, FetchError> {
        self.endpoint(&format!("{}?{}", constants::GROUPS_PATH, constants::LIST_QUERY))
    }

    fn group_url(&self, group_id: &str) -> Result<Url, FetchError> {
        let mut url = self.endpoint(constants::GROUPS_PATH)?;
        url.path_segments_mut()
            .map_err(|_| FetchError::InvalidUrl {
                url: self.base.clone(),
                reason: "base URL cannot carry a path".into(),
            })?
            .push(group_id);
        Ok(url)
    }

    fn send(
        &self,
        method: Method,
        url: &Url,
        namespace: Option<&str>,
    ) -> Result<Response, FetchError> {
        debug!(%method, %url, namespace = namespace.unwrap_or("<root>"), "vault request");

        let mut token = HeaderValue::from_str(&self.token)
            .map_err(|e| FetchError::Other(format!("token is not a valid header value: {}", e)))?;
        token.set_sensitive(true);

        let mut req = self
            .http
            .request(method, url.clone())
            .header(constants::TOKEN_HEADER, token);
        if let Some(ns) = namespace {
            req = req.header(constants::NAMESPACE_HEADER, ns);
        }

        let resp = req.send().map_err(|source| FetchError::Transport {
            url: url.to_string(),
            source,
        })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
                body: truncate(body.trim(), constants::MAX_ERROR_BODY_CHARS),
            });
        }
        Ok(resp)
    }

    fn list(&self, url: Url, namespace: Option<&str>) -> Result<Vec<String>, FetchError> {
        match self.send(self.list_verb.clone(), &url, namespace) {
            Ok(resp) => Ok(decode::<ListResponse>(resp, &url)?.into_keys()),
            // Vault answers 404 for a listing with no keys.
            Err(e) if e.is_not_found() => {
                debug!(%url, "listing returned 404, treating as empty");
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }
}

impl GroupDirectory for VaultClient {
    fn list_namespaces(&self) -> Result<Vec<String>, FetchError> {
        let url = self.namespaces_url()?;
        self.list(url, None)
    }

    fn list_groups(&self, namespace: &str) -> Result<Vec<String>, FetchError> {
        let url = self.groups_url()?;
        self.list(url, Some(namespace))
    }

    fn read_group(&self, namespace: &str, group_id: &str) -> Result<GroupRecord, FetchError> {
        let url = self.group_url(group_id)?;
        let resp = self.send(Method::GET, &url, Some(namespace))?;
        let body: GroupResponse = decode(resp, &url)?;
        GroupRecord::from_response(body).ok_or_else(|| FetchError::EmptyRecord {
            url: url.to_string(),
        })
    }
}

fn decode<T: DeserializeOwned>(resp: Response, url: &Url) -> Result<T, FetchError> {
    let bytes = resp.bytes().map_err(|source| FetchError::Transport {
        url: url.to_string(),
        source,
    })?;
    serde_json::from_slice(&bytes).map_err(|source| FetchError::Decode {
        url: url.to_string(),
        source,
    })
}

fn truncate(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(method: ListMethod) -> VaultClient {
        VaultClient::new(
            "https://vault.example.com:8200/",
            Zeroizing::new("s.test".into()),
            method,
        )
        .unwrap()
    }

    #[test]
    fn test_namespaces_url_list_verb() {
        let url = client(ListMethod::List).namespaces_url().unwrap();
        assert_eq!(url.as_str(), "https://vault.example.com:8200/v1/sys/namespaces");
    }

    #[test]
    fn test_namespaces_url_get_adds_list_flag() {
        let url = client(ListMethod::Get).namespaces_url().unwrap();
        assert_eq!(
            url.as_str(),
            "https://vault.example.com:8200/v1/sys/namespaces?list=true"
        );
    }

    #[test]
    fn test_groups_url_always_has_list_flag() {
        for method in [ListMethod::List, ListMethod::Get] {
            let url = client(method).groups_url().unwrap();
            assert_eq!(
                url.as_str(),
                "https://vault.example.com:8200/v1/identity/group?list=true"
            );
        }
    }

    #[test]
    fn test_group_url_encodes_id_as_one_segment() {
        let c = client(ListMethod::List);
        let url = c.group_url("a1b2-c3").unwrap();
        assert_eq!(url.path(), "/v1/identity/group/a1b2-c3");
        let url = c.group_url("odd/id").unwrap();
        assert_eq!(url.path(), "/v1/identity/group/odd%2Fid");
    }

    #[test]
    fn test_list_verb() {
        assert_eq!(ListMethod::List.http_method().unwrap().as_str(), "LIST");
        assert_eq!(ListMethod::Get.http_method().unwrap(), Method::GET);
    }

    #[test]
    fn test_invalid_base_rejected() {
        let result = VaultClient::new("not a url", Zeroizing::new("t".into()), ListMethod::List);
        assert!(matches!(result, Err(FetchError::InvalidUrl { .. })));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdef", 3), "abc...");
    }
}
