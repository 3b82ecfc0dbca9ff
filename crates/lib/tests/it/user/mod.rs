//! User module integration tests

mod authentication;
mod registration;
