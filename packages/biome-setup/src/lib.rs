//! Scaffold `@qodestack/biome-config` into a JavaScript project.
//!
//! The CLI is a thin layer over [`setup::run`]; everything it writes is
//! decided here so it can be tested against a temporary directory.

pub mod config;
pub mod format;
pub mod jsonc;
pub mod project;
pub mod scripts;
pub mod settings;
pub mod setup;
