//! Workspace tooling package.
//!
//! Hosts the pre-commit hook configuration; the library and CLI live under
//! `crates/`.
