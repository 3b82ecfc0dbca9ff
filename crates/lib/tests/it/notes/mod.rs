//! Note store integration tests

mod lifecycle;
mod ownership;
