//! Credential wrappers backed by `secrecy`
//!
//! API tokens live in a [`SecretString`] for their whole lifetime: the
//! backing memory is zeroed on drop (`zeroize`), `Debug` prints a redaction
//! marker instead of the value, and reading the token requires an explicit
//! `expose_secret()` call at the use site.
//!
//! ```rust
//! use secrecy::ExposeSecret;
//! use sprintdeck::config::secret_string;
//!
//! let token = secret_string("api-token".to_string());
//! assert!(!format!("{token:?}").contains("api-token"));
//! assert_eq!(token.expose_secret().as_ref(), "api-token");
//! ```

use secrecy::{CloneableSecret, DebugSecret, Secret, SerializableSecret};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use zeroize::Zeroize;

/// A secret-holding `String` suitable for use inside [`Secret`]
///
/// The newtype exists because `secrecy` requires marker-trait opt-ins for
/// cloning and serialization, and those cannot be implemented for `String`
/// from this crate.
#[derive(Clone, Debug, Zeroize)]
#[zeroize(drop)]
pub struct SecretValue(String);

impl CloneableSecret for SecretValue {}
impl DebugSecret for SecretValue {}
impl SerializableSecret for SecretValue {}

impl From<String> for SecretValue {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for SecretValue {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// Basic-auth assembly formats the exposed value directly
impl std::fmt::Display for SecretValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for SecretValue {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl Serialize for SecretValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for SecretValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self)
    }
}

/// A string credential that is zeroized on drop and redacted in `Debug`
pub type SecretString = Secret<SecretValue>;

/// Wraps a plain string in a [`SecretString`]
pub fn secret_string(value: String) -> SecretString {
    Secret::new(SecretValue::from(value))
}

/// [`secret_string`] lifted over `Option`
pub fn secret_string_opt(value: Option<String>) -> Option<SecretString> {
    value.map(secret_string)
}
