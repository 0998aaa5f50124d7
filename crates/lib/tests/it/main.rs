/*! Integration tests for dotwiz.
 *
 * This test suite is organized as a single integration test binary
 * following the pattern described by matklad in
 * https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html
 *
 * The module structure mirrors the main library structure:
 * - record: attribute/item views, resolution at every insertion point, update
 * - options: construction flags that disable nested conversion
 * - json: JSON strings, files and JSON Lines
 * - sharing: using records behind external synchronization
 */

use tracing_subscriber::EnvFilter;

#[ctor::ctor]
fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("dotwiz=info".parse().unwrap()))
        .with_test_writer()
        .try_init();
}

mod helpers;
mod json;
mod options;
mod record;
mod sharing;
