//! Import node components.
//!
//! An import names content that lives somewhere else: a file, an
//! environment variable, a remote locator, or nothing at all (`missing`).
//! Fetching and digest verification are the resolver's job, not this
//! crate's; these types only carry what the resolver needs.

use strum::{EnumIter, FromRepr};
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How an import's fetched content is to be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, FromRepr)]
#[repr(u8)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ImportMode {
    /// Interpret the content as Tarn code.
    Code = 0,
    /// Take the content verbatim as a text literal.
    RawText = 1,
    /// Produce the import's own location metadata instead of fetching.
    Location = 2,
}

impl std::fmt::Display for ImportMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ImportMode::Code => "code",
            ImportMode::RawText => "raw text",
            ImportMode::Location => "location",
        };
        f.write_str(name)
    }
}

/// A digest slice whose length is not the fixed 32 bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("integrity digest must be exactly {expected} bytes, got {actual}", expected = Digest::LENGTH)]
pub struct DigestError {
    pub actual: usize,
}

/// A 256-bit content-integrity digest pinned to an import.
///
/// Present and absent are distinct states; an import without a digest is
/// simply unpinned. Verification against fetched bytes happens in the
/// resolver.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Digest([u8; 32]);

impl Digest {
    /// Digest length in bytes.
    pub const LENGTH: usize = 32;

    pub fn from_bytes(bytes: [u8; Self::LENGTH]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; Self::LENGTH] {
        &self.0
    }
}

impl TryFrom<&[u8]> for Digest {
    type Error = DigestError;

    fn try_from(slice: &[u8]) -> Result<Self, DigestError> {
        let bytes: [u8; Self::LENGTH] = slice.try_into().map_err(|_| DigestError {
            actual: slice.len(),
        })?;
        Ok(Self(bytes))
    }
}

impl std::fmt::Display for Digest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for Digest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Digest({self})")
    }
}

/// Scheme of a remote locator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, FromRepr)]
#[repr(u8)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Scheme {
    Http = 0,
    Https = 1,
}

impl std::fmt::Display for Scheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
        })
    }
}

/// A remote network locator, kept in the component form the wire uses:
/// scheme, authority, path segments, and an optional raw query string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RemoteUrl {
    pub scheme: Scheme,
    pub authority: String,
    pub path: Vec<String>,
    pub query: Option<String>,
}

impl std::fmt::Display for RemoteUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}://{}", self.scheme, self.authority)?;
        for segment in &self.path {
            write!(f, "/{segment}")?;
        }
        if let Some(query) = &self.query {
            write!(f, "?{query}")?;
        }
        Ok(())
    }
}
