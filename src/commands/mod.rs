//! Command implementations
//!
//! Each user-facing command lives in its own file under `porcelain` as an
//! `impl Repository` block, writing its output through the repository
//! writer. The dispatch layer in `main` only parses arguments and routes
//! here.

pub mod porcelain;
