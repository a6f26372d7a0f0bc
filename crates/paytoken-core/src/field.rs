//! Token attribute normalization.
//!
//! Callers hand over whatever mapping their wallet integration produced,
//! keyed by string names or by [`Field`] directly. [`TokenAttributes`]
//! reduces that to one canonical map over the recognized field names before
//! any validator or decoder sees it.

use std::{collections::BTreeMap, fmt};

use serde_json::Value;

use crate::error::TokenError;

/// Recognized token field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    /// Base64 ECDSA signature over the signed envelope (Google Pay)
    Signature,
    /// Protocol revision, `ECv1` or `ECv2` (Google Pay)
    ProtocolVersion,
    /// JSON text carrying the encrypted payload (Google Pay)
    SignedMessage,
    /// Base64 ciphertext
    EncryptedMessage,
    /// Base64 uncompressed P-256 point
    EphemeralPublicKey,
    /// Base64 authentication tag
    Tag,
}

impl Field {
    /// All recognized fields.
    pub const ALL: [Self; 6] = [
        Self::Signature,
        Self::ProtocolVersion,
        Self::SignedMessage,
        Self::EncryptedMessage,
        Self::EphemeralPublicKey,
        Self::Tag,
    ];

    /// Wire name of the field.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Signature => "signature",
            Self::ProtocolVersion => "protocolVersion",
            Self::SignedMessage => "signedMessage",
            Self::EncryptedMessage => "encryptedMessage",
            Self::EphemeralPublicKey => "ephemeralPublicKey",
            Self::Tag => "tag",
        }
    }

    /// Look up a field by its exact (case-sensitive) wire name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.as_str() == name)
    }
}

impl AsRef<str> for Field {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized, immutable token attributes.
///
/// Only recognized fields are kept. Validation of which fields are required
/// happens in the decoders, not here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenAttributes {
    values: BTreeMap<Field, String>,
}

impl TokenAttributes {
    /// Normalize `(key, value)` pairs.
    ///
    /// Keys may be `&str`, `String` or [`Field`]. Unrecognized keys are
    /// dropped; a later duplicate replaces an earlier one.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut values = BTreeMap::new();
        for (key, value) in pairs {
            let key = key.as_ref();
            match Field::from_name(key) {
                Some(field) => {
                    values.insert(field, value.into());
                },
                None => tracing::trace!(key, "ignoring unrecognized token attribute"),
            }
        }
        Self { values }
    }

    /// Normalize a raw token JSON object.
    ///
    /// # Errors
    ///
    /// - `Validation`: not valid JSON, not an object, or a recognized field
    ///   holds a non-string value
    pub fn from_json(json: &str) -> Result<Self, TokenError> {
        let document: Value = serde_json::from_str(json)
            .map_err(|e| TokenError::validation(format!("Invalid token JSON: {e}")))?;

        Self::from_value(&document)
    }

    /// Normalize an already-parsed token JSON value.
    pub fn from_value(document: &Value) -> Result<Self, TokenError> {
        let Value::Object(object) = document else {
            return Err(TokenError::validation("Token must be a JSON object"));
        };

        let mut values = BTreeMap::new();
        for (key, value) in object {
            let Some(field) = Field::from_name(key) else {
                continue;
            };
            let Value::String(text) = value else {
                return Err(TokenError::validation(format!("Field {field} must be a string")));
            };
            values.insert(field, text.clone());
        }
        Ok(Self { values })
    }

    /// Value of `field`, if present.
    pub fn get(&self, field: Field) -> Option<&str> {
        self.values.get(&field).map(String::as_str)
    }

    /// Value of a field the validator already required.
    pub(crate) fn require(&self, field: Field) -> Result<&str, TokenError> {
        self.get(field).ok_or_else(|| TokenError::missing_field(field))
    }

    /// Whether `field` is present.
    pub fn contains(&self, field: Field) -> bool {
        self.values.contains_key(&field)
    }

    /// Number of recognized fields present.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no recognized field is present.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over present fields in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.values.iter().map(|(field, value)| (*field, value.as_str()))
    }
}

impl<V: Into<String>> FromIterator<(Field, V)> for TokenAttributes {
    fn from_iter<I: IntoIterator<Item = (Field, V)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}
