//! Storage encodings for note identifiers.
//!
//! Backends persist identifiers differently: some have a native 128-bit UUID
//! column type, others only store opaque byte strings. A `StorageCodec` is the
//! single place that knows which; repositories are generic over it and never
//! inspect the storage value themselves.

use std::fmt;
use uuid::Uuid;

use crate::id::{IdParseError, NoteId};

/// Mapping between a `NoteId` and the value a backend stores for it.
///
/// `from_storage(to_storage(id)) == id` for every identifier. Decoding can
/// still fail for values the codec did not write (a corrupt or foreign row).
pub trait StorageCodec: Send + Sync + 'static {
    /// The backend representation. Ordered so that backends page by it.
    type Value: Clone + Ord + fmt::Debug + Send + Sync + 'static;

    /// Short name reported by health checks and logs.
    const NAME: &'static str;

    /// Encode an identifier for storage.
    fn to_storage(id: NoteId) -> Self::Value;

    /// Decode a stored value back into an identifier.
    fn from_storage(value: Self::Value) -> Result<NoteId, CodecError>;
}

/// Native 128-bit column (PostgreSQL `UUID`). Identity mapping.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeCodec;

impl StorageCodec for NativeCodec {
    type Value = Uuid;

    const NAME: &'static str = "native";

    fn to_storage(id: NoteId) -> Uuid {
        *id.as_uuid()
    }

    fn from_storage(value: Uuid) -> Result<NoteId, CodecError> {
        Ok(NoteId::from_uuid(value))
    }
}

/// Opaque byte column (PostgreSQL `BYTEA`).
///
/// Stores the UTF-8 bytes of the canonical external form, so the stored value
/// is readable when inspecting the table by hand.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlobCodec;

impl StorageCodec for BlobCodec {
    type Value = Vec<u8>;

    const NAME: &'static str = "blob";

    fn to_storage(id: NoteId) -> Vec<u8> {
        id.to_external().into_bytes()
    }

    fn from_storage(value: Vec<u8>) -> Result<NoteId, CodecError> {
        let text = String::from_utf8(value).map_err(|_| CodecError::InvalidUtf8)?;
        NoteId::from_external(&text).map_err(CodecError::Parse)
    }
}

/// Error decoding a stored identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// A blob value was not valid UTF-8.
    InvalidUtf8,
    /// A blob value was text but not a canonical identifier.
    Parse(IdParseError),
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidUtf8 => write!(f, "stored note id is not valid UTF-8"),
            Self::Parse(e) => write!(f, "stored note id is not canonical: {}", e),
        }
    }
}

impl std::error::Error for CodecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidUtf8 => None,
            Self::Parse(e) => Some(e),
        }
    }
}
