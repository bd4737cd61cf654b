//! CLI subcommand implementations.

pub mod migrate;
pub mod seed;
pub mod user;

/// Resolve the database URL from the environment.
///
/// Checks `OCTOCAT_DATABASE_URL` first, then the conventional `DATABASE_URL`.
pub(crate) fn database_url() -> Option<String> {
    std::env::var("OCTOCAT_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .ok()
}
