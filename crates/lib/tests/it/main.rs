/*! Integration tests for Jotter.
 *
 * This test suite is organized as a single integration test binary
 * following the pattern described by matklad in
 * https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html
 *
 * The module structure mirrors the main library structure:
 * - user: account registration and authentication
 * - notes: note lifecycle and ownership enforcement
 * - backend: storage behavior shared by every backend, plus persistence
 * - scenario: a multi-user walk through the whole API
 */

use tracing_subscriber::EnvFilter;

#[ctor::ctor]
fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("jotter=info".parse().unwrap()),
        )
        .with_test_writer()
        .try_init();
}

mod helpers;
mod notes;
mod scenario;
mod user;
