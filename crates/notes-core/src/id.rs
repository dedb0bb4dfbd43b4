//! Note identifiers.
//!
//! A `NoteId` is a random 128-bit value. Clients only ever see its canonical
//! external form: 36 characters of lowercase, hyphenated hex.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Length of the canonical external form (`8-4-4-4-12` hex digits).
pub const EXTERNAL_LEN: usize = 36;

/// Unique identifier for a note.
///
/// Generated by the server exactly once, when the note is created. Ordering is
/// by the underlying 128-bit value, which is also the order backends page in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(Uuid);

impl NoteId {
    /// Creates a fresh identifier from the operating system's CSPRNG (UUID v4).
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a NoteId from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Returns the canonical external form.
    #[must_use]
    pub fn to_external(&self) -> String {
        self.0.hyphenated().to_string()
    }

    /// Parses the canonical external form.
    ///
    /// Hex digits may be upper or lower case; braces, URNs and the unhyphenated
    /// 32-digit form are rejected so that each identifier has one spelling.
    pub fn from_external(s: &str) -> Result<Self, IdParseError> {
        if s.len() != EXTERNAL_LEN {
            return Err(IdParseError::InvalidLength(s.len()));
        }
        Uuid::try_parse(s)
            .map(Self)
            .map_err(|e| IdParseError::Malformed(e.to_string()))
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for NoteId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_external(s)
    }
}

/// Error type for parsing a NoteId from its external form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdParseError {
    /// The string was not 36 characters long.
    InvalidLength(usize),
    /// The string had the right length but was not hyphenated hex.
    Malformed(String),
}

impl fmt::Display for IdParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLength(len) => write!(
                f,
                "invalid note id length: expected {} characters, got {}",
                EXTERNAL_LEN, len
            ),
            Self::Malformed(reason) => write!(f, "malformed note id: {}", reason),
        }
    }
}

impl std::error::Error for IdParseError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_external_round_trip() {
        for _ in 0..64 {
            let id = NoteId::generate();
            let external = id.to_external();
            assert_eq!(external.len(), EXTERNAL_LEN);
            assert_eq!(NoteId::from_external(&external).unwrap(), id);
        }
    }

    #[test]
    fn test_external_form_is_lowercase_hyphenated() {
        let id = NoteId::from_uuid(Uuid::from_u128(0xABCD_EF01_2345_6789_ABCD_EF01_2345_6789));
        assert_eq!(id.to_external(), "abcdef01-2345-6789-abcd-ef0123456789");
        assert_eq!(id.to_string(), id.to_external());
    }

    #[test]
    fn test_uppercase_parses_to_same_id() {
        let id = NoteId::generate();
        let upper = id.to_external().to_uppercase();
        assert_eq!(NoteId::from_external(&upper).unwrap(), id);
    }

    #[test]
    fn test_generate_is_not_repeated() {
        let ids: HashSet<NoteId> = (0..1000).map(|_| NoteId::generate()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn test_rejects_wrong_length() {
        assert_eq!(
            NoteId::from_external("not-a-valid-id"),
            Err(IdParseError::InvalidLength(14))
        );
        assert!(matches!(
            NoteId::from_external(""),
            Err(IdParseError::InvalidLength(0))
        ));
    }

    #[test]
    fn test_rejects_unhyphenated_and_braced_forms() {
        let id = NoteId::generate();
        let simple = id.as_uuid().simple().to_string();
        let braced = id.as_uuid().braced().to_string();
        assert!(matches!(
            NoteId::from_external(&simple),
            Err(IdParseError::InvalidLength(32))
        ));
        assert!(matches!(
            NoteId::from_external(&braced),
            Err(IdParseError::InvalidLength(38))
        ));
    }

    #[test]
    fn test_rejects_invalid_characters() {
        let bad = "zzzzzzzz-2345-6789-abcd-ef0123456789";
        assert!(matches!(
            NoteId::from_external(bad),
            Err(IdParseError::Malformed(_))
        ));
    }

    #[test]
    fn test_serde_uses_external_form() {
        let id = NoteId::generate();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id.to_external()));
        let back: NoteId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
