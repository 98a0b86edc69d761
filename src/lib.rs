//! transcan - translation extraction for angular-translate projects
//!
//! transcan scans HTML templates and JS/TS sources for angular-translate
//! usages (`translate` directives and filters, `$translate(...)` calls) and
//! builds a single catalog of ids and default texts. Usages that cannot be
//! resolved statically, and ids used with two different default texts, are
//! reported as errors.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and parsing
//! - `core`: Extraction engine (parsers, scanners, registry, catalog)
//! - `issues`: Issue type definitions and reporting

pub mod cli;
pub mod config;
pub mod core;
pub mod issues;
