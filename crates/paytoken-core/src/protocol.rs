//! Google Pay protocol revisions.

use std::fmt;

use crate::error::TokenError;

/// Supported Google Pay protocol revisions.
///
/// Both revisions share the same envelope, key derivation and cipher in this
/// crate; they differ only in which verification key signs them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProtocolVersion {
    /// `ECv1`
    EcV1,
    /// `ECv2`
    EcV2,
}

impl ProtocolVersion {
    /// Supported revisions in preference order.
    pub const SUPPORTED: [Self; 2] = [Self::EcV1, Self::EcV2];

    /// Wire name (`ECv1` / `ECv2`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::EcV1 => "ECv1",
            Self::EcV2 => "ECv2",
        }
    }

    /// Parse a wire name exactly.
    ///
    /// # Errors
    ///
    /// - `UnsupportedProtocol`: any string other than `ECv1` or `ECv2`
    pub fn parse(version: &str) -> Result<Self, TokenError> {
        Self::SUPPORTED
            .into_iter()
            .find(|supported| supported.as_str() == version)
            .ok_or_else(|| TokenError::UnsupportedProtocol { version: version.to_string() })
    }
}

impl fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
