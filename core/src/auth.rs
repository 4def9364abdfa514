//! Request signing for the gateway's key-pair authentication.
//!
//! Every request carries `ts`, `apikey` and `hash`, where `hash` is the
//! lowercase hex MD5 of `ts + private_key + public_key`.

use std::fmt;

use md5::{Digest, Md5};

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    public_key: String,
    private_key: String,
}

impl Credentials {
    pub fn new(public_key: impl Into<String>, private_key: impl Into<String>) -> Self {
        Self {
            public_key: public_key.into(),
            private_key: private_key.into(),
        }
    }

    pub fn public_key(&self) -> &str {
        &self.public_key
    }

    /// Hash proving knowledge of the private key for `timestamp`.
    pub fn hash(&self, timestamp: &str) -> String {
        let digest = Md5::digest(format!("{timestamp}{}{}", self.private_key, self.public_key));
        format!("{digest:x}")
    }

    /// Auth query parameters in wire order: `ts`, `apikey`, `hash`.
    pub fn sign(&self, timestamp: &str) -> Vec<(String, String)> {
        vec![
            ("ts".to_string(), timestamp.to_string()),
            ("apikey".to_string(), self.public_key.clone()),
            ("hash".to_string(), self.hash(timestamp)),
        ]
    }
}

// Keeps the private key out of logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("public_key", &self.public_key)
            .field("private_key", &"<redacted>")
            .finish()
    }
}
