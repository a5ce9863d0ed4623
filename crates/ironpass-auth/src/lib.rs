//! # Ironpass Auth
//!
//! Authentication primitives for the Ironpass API.
//!
//! - [`jwt`]: the [`TokenCodec`] that signs and verifies session tokens
//! - [`claims`]: the claim set carried inside a token
//! - [`credentials`]: locating a raw token on an incoming request and
//!   building the `token` session cookie
//!
//! The codec is built once from [`ironpass_config::JwtConfig`] and shared
//! read-only; it never consults the process environment itself.
//!
//! # Example
//!
//! ```ignore
//! use ironpass_auth::{TokenCodec, extract_credential};
//!
//! let codec = TokenCodec::new(&config.jwt);
//! let token = codec.issue(user.id, user.role)?;
//!
//! if let Some(raw) = extract_credential(request.headers()) {
//!     let claims = codec.verify(&raw)?;
//! }
//! ```

pub mod claims;
pub mod credentials;
pub mod jwt;

pub use claims::Claims;
pub use credentials::{TOKEN_COOKIE, extract_credential, removal_cookie, session_cookie};
pub use jwt::{TokenCodec, TokenError};
