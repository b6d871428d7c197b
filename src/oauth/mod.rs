//! OAuth 1.0a request signing subsystem.
//!
//! # Data Flow
//! ```text
//! (method, url, Credentials)
//!     → signer.rs (fresh nonce + timestamp → OAuthParams)
//!     → signer.rs (signature base string, signing key)
//!     → HMAC-SHA256 → base64 signature
//!     → Authorization header (oauth_* params, then realm)
//! ```
//!
//! # Design Decisions
//! - Signing is a pure function; nonce and timestamp are the only inputs
//!   that change between calls and can be injected for reproducible output
//! - Credentials are never validated here; bad credentials surface as an
//!   upstream authentication failure
//! - Realm is appended verbatim and excluded from the base string

pub mod encoding;
pub mod signer;

pub use encoding::percent_encode;
pub use signer::{
    sign, sign_with, signature_base_string, signing_key, Credentials, OAuthParams, Signer,
    SIGNATURE_METHOD,
};
