//! OAuth 1.0a HMAC-SHA256 signer.
//!
//! # Responsibilities
//! - Build the signature base string for a method and URL
//! - Derive the signing key from consumer and token secrets
//! - Render the `Authorization` header including the trailing realm

use std::fmt;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use hmac::{digest::KeyInit, Hmac, Mac};
use rand::{distributions::Alphanumeric, Rng};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use sha2::Sha256;
use url::Url;

use crate::oauth::encoding::percent_encode;

type HmacSha256 = Hmac<Sha256>;

/// Value of `oauth_signature_method`.
pub const SIGNATURE_METHOD: &str = "HMAC-SHA256";

const OAUTH_VERSION: &str = "1.0";
const NONCE_LEN: usize = 32;

/// Token-based authentication credentials for the upstream account.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub token_key: String,
    pub token_secret: String,
    /// Account realm, appended to the header but never signed.
    pub realm: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &"<redacted>")
            .field("token_key", &self.token_key)
            .field("token_secret", &"<redacted>")
            .field("realm", &self.realm)
            .finish()
    }
}

/// Per-request protocol values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthParams {
    pub nonce: String,
    /// Seconds since the Unix epoch.
    pub timestamp: u64,
}

impl OAuthParams {
    /// Fresh random nonce and the current wall-clock time.
    pub fn generate() -> Self {
        let nonce = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(NONCE_LEN)
            .map(char::from)
            .collect();
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        Self { nonce, timestamp }
    }
}

/// Shareable signer bound to one credential set.
#[derive(Debug, Clone)]
pub struct Signer {
    credentials: Arc<Credentials>,
}

impl Signer {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials: Arc::new(credentials),
        }
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Sign a request with a fresh nonce and timestamp.
    pub fn sign(&self, method: &str, url: &Url) -> HeaderMap {
        sign(method, url, &self.credentials)
    }
}

/// Sign `method url` with freshly generated protocol values.
pub fn sign(method: &str, url: &Url, credentials: &Credentials) -> HeaderMap {
    sign_with(method, url, credentials, &OAuthParams::generate())
}

/// Sign `method url` with caller-supplied protocol values.
///
/// Returns a header map holding `Authorization`. The map is empty only when
/// the realm contains bytes that cannot appear in a header value.
pub fn sign_with(
    method: &str,
    url: &Url,
    credentials: &Credentials,
    params: &OAuthParams,
) -> HeaderMap {
    let value = authorization_value(method, url, credentials, params);

    let mut headers = HeaderMap::new();
    match HeaderValue::from_bytes(value.as_bytes()) {
        Ok(value) => {
            headers.insert(AUTHORIZATION, value);
        }
        Err(e) => {
            tracing::warn!(error = %e, "Authorization header rejected; sending unsigned request");
        }
    }
    headers
}

/// Render the full `Authorization` header value.
pub fn authorization_value(
    method: &str,
    url: &Url,
    credentials: &Credentials,
    params: &OAuthParams,
) -> String {
    let base_string = signature_base_string(method, url, credentials, params);
    let signature = compute_signature(
        &signing_key(&credentials.consumer_secret, &credentials.token_secret),
        &base_string,
    );

    let mut oauth = protocol_params(credentials, params);
    oauth.push(("oauth_signature", signature));
    oauth.sort();

    let rendered: Vec<String> = oauth
        .iter()
        .map(|(key, value)| format!("{}=\"{}\"", percent_encode(key), percent_encode(value)))
        .collect();

    format!("OAuth {}, realm=\"{}\"", rendered.join(", "), credentials.realm)
}

/// `UPPER(method)&pct(base_url)&pct(sorted params)`.
pub fn signature_base_string(
    method: &str,
    url: &Url,
    credentials: &Credentials,
    params: &OAuthParams,
) -> String {
    let mut pairs: Vec<(String, String)> = protocol_params(credentials, params)
        .into_iter()
        .map(|(key, value)| (percent_encode(key), percent_encode(&value)))
        .chain(
            url.query_pairs()
                .map(|(key, value)| (percent_encode(&key), percent_encode(&value))),
        )
        .collect();
    pairs.sort();

    let param_string = pairs
        .iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect::<Vec<_>>()
        .join("&");

    format!(
        "{}&{}&{}",
        method.to_ascii_uppercase(),
        percent_encode(&base_url(url)),
        percent_encode(&param_string)
    )
}

/// `pct(consumer_secret)&pct(token_secret)`.
pub fn signing_key(consumer_secret: &str, token_secret: &str) -> String {
    format!("{}&{}", percent_encode(consumer_secret), percent_encode(token_secret))
}

fn compute_signature(key: &str, base_string: &str) -> String {
    let mut mac = <HmacSha256 as KeyInit>::new_from_slice(key.as_bytes())
        .expect("HMAC accepts any key length");
    mac.update(base_string.as_bytes());
    STANDARD.encode(mac.finalize().into_bytes())
}

fn protocol_params(credentials: &Credentials, params: &OAuthParams) -> Vec<(&'static str, String)> {
    vec![
        ("oauth_consumer_key", credentials.consumer_key.clone()),
        ("oauth_nonce", params.nonce.clone()),
        ("oauth_signature_method", SIGNATURE_METHOD.to_string()),
        ("oauth_timestamp", params.timestamp.to_string()),
        ("oauth_token", credentials.token_key.clone()),
        ("oauth_version", OAUTH_VERSION.to_string()),
    ]
}

/// Scheme, authority and path; query and fragment dropped.
fn base_url(url: &Url) -> String {
    let mut base = format!("{}://{}", url.scheme(), url.host_str().unwrap_or_default());
    if let Some(port) = url.port() {
        base.push_str(&format!(":{}", port));
    }
    base.push_str(url.path());
    base
}
