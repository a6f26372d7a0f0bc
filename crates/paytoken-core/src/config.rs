//! Trust configuration for Google Pay decoding.
//!
//! Verification keys are published by the token issuer as JSON. This module
//! accepts every shape callers hand over in practice: the issuer's document
//! `{"keys": [...]}`, a bare array of entries, or a single entry.
//!
//! The configuration is read-only for the lifetime of a decode; callers that
//! rotate keys build a new [`DecryptionConfig`] rather than mutating one that
//! a decoder holds.

use serde::{Deserialize, Serialize};

use crate::error::TokenError;

/// One issuer verification key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationKeyEntry {
    /// Protocol revision this key signs (`ECv1`, `ECv2`)
    pub protocol_version: String,
    /// Base64 DER `SubjectPublicKeyInfo` of a P-256 key
    pub key_value: String,
    /// Expiry in epoch milliseconds as published by the issuer. Carried for
    /// callers; not enforced during verification.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_expiration: Option<String>,
}

impl VerificationKeyEntry {
    /// Entry without an expiry.
    pub fn new(protocol_version: impl Into<String>, key_value: impl Into<String>) -> Self {
        Self {
            protocol_version: protocol_version.into(),
            key_value: key_value.into(),
            key_expiration: None,
        }
    }
}

/// Ordered collection of verification keys.
///
/// Lookup is by exact protocol version; the first match wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "KeySetDocument")]
pub struct VerificationKeySet {
    keys: Vec<VerificationKeyEntry>,
}

/// Accepted JSON shapes for a key set.
#[derive(Deserialize)]
#[serde(untagged)]
enum KeySetDocument {
    Wrapped { keys: Vec<VerificationKeyEntry> },
    List(Vec<VerificationKeyEntry>),
    Single(VerificationKeyEntry),
}

impl From<KeySetDocument> for VerificationKeySet {
    fn from(document: KeySetDocument) -> Self {
        let keys = match document {
            KeySetDocument::Wrapped { keys } | KeySetDocument::List(keys) => keys,
            KeySetDocument::Single(entry) => vec![entry],
        };
        Self { keys }
    }
}

impl VerificationKeySet {
    /// Key set from entries, order preserved.
    pub fn new(keys: Vec<VerificationKeyEntry>) -> Self {
        Self { keys }
    }

    /// Parse a key set from JSON.
    ///
    /// # Errors
    ///
    /// - `Configuration`: document matches none of the accepted shapes
    pub fn from_json(json: &str) -> Result<Self, TokenError> {
        serde_json::from_str(json)
            .map_err(|e| TokenError::configuration(format!("invalid verification keys: {e}")))
    }

    /// First entry whose protocol version equals `protocol_version` exactly.
    pub fn find(&self, protocol_version: &str) -> Option<&VerificationKeyEntry> {
        self.keys.iter().find(|entry| entry.protocol_version == protocol_version)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether the set has no entries.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Entries in order.
    pub fn iter(&self) -> impl Iterator<Item = &VerificationKeyEntry> {
        self.keys.iter()
    }
}

impl From<VerificationKeyEntry> for VerificationKeySet {
    fn from(entry: VerificationKeyEntry) -> Self {
        Self { keys: vec![entry] }
    }
}

impl From<Vec<VerificationKeyEntry>> for VerificationKeySet {
    fn from(keys: Vec<VerificationKeyEntry>) -> Self {
        Self { keys }
    }
}

impl FromIterator<VerificationKeyEntry> for VerificationKeySet {
    fn from_iter<I: IntoIterator<Item = VerificationKeyEntry>>(iter: I) -> Self {
        Self { keys: iter.into_iter().collect() }
    }
}

/// Recipient identity and issuer keys needed to decode Google Pay tokens.
///
/// An empty recipient id or key set counts as absent and is rejected when a
/// Google Pay decoder is constructed. Android Pay tokens ignore this.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DecryptionConfig {
    /// Merchant or gateway id the token was issued to (e.g. `merchant:123`)
    pub recipient_id: String,
    /// Issuer keys, selected by protocol version
    pub verification_keys: VerificationKeySet,
}

impl DecryptionConfig {
    /// Configuration with both parts supplied.
    pub fn new(
        recipient_id: impl Into<String>,
        verification_keys: impl Into<VerificationKeySet>,
    ) -> Self {
        Self { recipient_id: recipient_id.into(), verification_keys: verification_keys.into() }
    }

    /// Replace the recipient id.
    #[must_use]
    pub fn with_recipient_id(mut self, recipient_id: impl Into<String>) -> Self {
        self.recipient_id = recipient_id.into();
        self
    }

    /// Replace the verification keys.
    #[must_use]
    pub fn with_verification_keys(mut self, keys: impl Into<VerificationKeySet>) -> Self {
        self.verification_keys = keys.into();
        self
    }
}
