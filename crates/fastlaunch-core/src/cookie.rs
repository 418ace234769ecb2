//! Cookie jar for one vendor account and the store it is persisted through.
//!
//! A jar is serialized as an opaque byte blob. The launcher never interprets
//! the blob beyond reading it back into a jar, and the only cookie it checks
//! by name is [`LOGIN_SECURE_ID`].

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Cookie whose presence marks an authenticated session.
pub const LOGIN_SECURE_ID: &str = "login_secure_id";

/// A single HTTP cookie.
///
/// `domain` follows the request-matching rule: a leading `.` (set from a
/// `Domain` attribute) matches that domain and every subdomain, while a bare
/// host matches only itself. A cookie without a domain is never sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cookie {
    pub name: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl Cookie {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            domain: None,
            path: None,
        }
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    fn same_slot(&self, other: &Cookie) -> bool {
        self.name == other.name && self.domain == other.domain && self.path == other.path
    }

    /// Whether this cookie belongs on a request to `host` at `path`.
    pub fn matches(&self, host: &str, path: &str) -> bool {
        let Some(domain) = self.domain.as_deref() else {
            return false;
        };
        domain_matches(domain, host) && path_matches(self.path.as_deref().unwrap_or("/"), path)
    }
}

fn domain_matches(domain: &str, host: &str) -> bool {
    let host = host.to_ascii_lowercase();
    let domain = domain.to_ascii_lowercase();
    match domain.strip_prefix('.') {
        Some(bare) => host == bare || host.ends_with(&domain),
        None => host == domain,
    }
}

fn path_matches(cookie_path: &str, request_path: &str) -> bool {
    if request_path == cookie_path {
        return true;
    }
    request_path.starts_with(cookie_path)
        && (cookie_path.ends_with('/') || request_path[cookie_path.len()..].starts_with('/'))
}

/// The set of cookies representing one account's identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CookieJar {
    cookies: Vec<Cookie>,
}

impl CookieJar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value of the first cookie with this name, on any domain.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.cookies
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.value.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Inserts a cookie, replacing one with the same name, domain and path.
    pub fn set(&mut self, cookie: Cookie) {
        match self.cookies.iter_mut().find(|c| c.same_slot(&cookie)) {
            Some(existing) => existing.value = cookie.value,
            None => self.cookies.push(cookie),
        }
    }

    pub fn clear(&mut self) {
        self.cookies.clear();
    }

    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cookie> {
        self.cookies.iter()
    }

    /// Renders the cookies scoped to `host` and `path` as a `Cookie` request
    /// header value.
    ///
    /// Returns `None` when no cookie matches.
    pub fn header_value(&self, host: &str, path: &str) -> Option<String> {
        let pairs: Vec<String> = self
            .cookies
            .iter()
            .filter(|c| c.matches(host, path))
            .map(|c| format!("{}={}", c.name, c.value))
            .collect();
        if pairs.is_empty() {
            None
        } else {
            Some(pairs.join("; "))
        }
    }

    /// Applies a `Set-Cookie` header received from `origin_host`.
    ///
    /// Only `Domain`, `Path` and `Max-Age` attributes are honored. Without
    /// `Domain` the cookie is bound to `origin_host` alone; a `Domain` the
    /// origin does not belong to is rejected. A missing `Path` means `/`. A
    /// non-positive `Max-Age` deletes the cookie. Headers without a
    /// `name=value` pair are ignored.
    pub fn merge_set_cookie(&mut self, header: &str, origin_host: &str) {
        let mut parts = header.split(';');
        let Some((name, value)) = parts.next().and_then(|pair| pair.split_once('=')) else {
            return;
        };
        let name = name.trim();
        if name.is_empty() {
            return;
        }

        let mut cookie = Cookie::new(name, value.trim());
        let mut domain = None;
        let mut expired = false;
        for attr in parts {
            let (key, val) = match attr.split_once('=') {
                Some((k, v)) => (k.trim(), v.trim()),
                None => (attr.trim(), ""),
            };
            if key.eq_ignore_ascii_case("domain") && !val.is_empty() {
                domain = Some(format!(".{}", val.trim_start_matches('.').to_ascii_lowercase()));
            } else if key.eq_ignore_ascii_case("path") && val.starts_with('/') {
                cookie.path = Some(val.to_string());
            } else if key.eq_ignore_ascii_case("max-age") {
                expired = val.parse::<i64>().map(|age| age <= 0).unwrap_or(false);
            }
        }

        match domain {
            Some(domain) if !domain_matches(&domain, origin_host) => return,
            Some(domain) => cookie.domain = Some(domain),
            None => cookie.domain = Some(origin_host.to_ascii_lowercase()),
        }
        if cookie.path.is_none() {
            cookie.path = Some("/".to_string());
        }

        if expired {
            self.cookies.retain(|c| !c.same_slot(&cookie));
        } else {
            self.set(cookie);
        }
    }

    /// Serializes the jar into its opaque blob form.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Reads a jar back from its blob form.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

/// Persists cookie jars.
///
/// Two kinds of location exist: per-account blobs addressed by path, and the
/// single "current" session the vendor client reads on startup and writes
/// on exit.
pub trait CookieStore: Send + Sync {
    /// Reads an account blob.
    fn read_bytes(&self, path: &Path) -> Result<CookieJar>;

    /// Replaces an account blob.
    fn write_bytes(&self, path: &Path, jar: &CookieJar) -> Result<()>;

    /// Reads the vendor client's active session.
    fn read_current(&self) -> Result<CookieJar>;

    /// Replaces the vendor client's active session.
    fn write_current(&self, jar: &CookieJar) -> Result<()>;
}
