//! notes-core: Core types for the notes service
//!
//! This crate provides:
//! - The `Note` entity and the client-supplied `NoteRequest`
//! - `NoteId`, the 128-bit note identifier and its canonical external form
//! - `StorageCodec`, the mapping between identifiers and backend storage values
//!
//! Nothing outside the codec implementations may assume how an identifier is
//! laid out in storage.

pub mod codec;
pub mod id;
pub mod types;

pub use codec::{BlobCodec, CodecError, NativeCodec, StorageCodec};
pub use id::{IdParseError, NoteId};
pub use types::{Note, NoteRequest};
