//! Limits shared by the validators and the storage schema.

/// Minimum display name length, in characters.
pub const NAME_MIN_LEN: usize = 3;

/// Maximum display name length, in characters.
pub const NAME_MAX_LEN: usize = 30;

/// Minimum password length, in characters.
pub const PASSWORD_MIN_LEN: usize = 8;

/// Maximum note length, in characters.
pub const NOTE_MAX_LEN: usize = 10_000;
