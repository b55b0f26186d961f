pub mod cli;
pub mod config;
pub mod db;
pub mod models;
pub mod physicians;
pub mod validation;

pub use db::{DatabaseError, ErrorKind, Repository, SpecialtyProvider};
pub use models::{Physician, PhysicianDetails};
pub use physicians::{PhysicianRepository, SpecialtyList};

use tracing_subscriber::EnvFilter;

/// Initialize tracing to stderr, honoring `RUST_LOG`.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .with_writer(std::io::stderr)
        .try_init();
}
