//! Notes and the rules for who may touch them.
//!
//! A note belongs to exactly one user. Listing, editing and deleting all go
//! through [`ensure_owner`]; the two mutations differ only in how a refusal is
//! surfaced. Edit reports it, delete ignores it.

pub mod errors;
mod store;
pub mod types;

pub use errors::NoteError;
pub use store::{NoteStore, ensure_owner};
pub use types::{NewNote, Note, NoteId};
