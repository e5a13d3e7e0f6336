#![warn(missing_docs)]
//! Core types for the products REST API.
//!
//! This crate holds everything that is independent of HTTP and storage: the
//! product models, the repository "ports" that a storage backend implements,
//! and the declarative field validation used to admit request inputs.

/// Domain models for products and the typed inputs that create or change them.
///
/// These are plain data structures. Storage backends convert their rows into
/// [`models::Product`], and the HTTP layer deserializes validated request bodies
/// into [`models::ProductDraft`] and [`models::ProductUpdate`].
pub mod models;

/// Interface traits for the products system.
///
/// These traits are the "ports" of a hexagonal architecture: they describe
/// what a product store must do without saying how, so that the HTTP layer
/// can be exercised against any backend.
pub mod ports;

/// Declarative validation of request fields.
///
/// Validators are static tables of predicate and message pairs. Running them
/// against a request never short-circuits across fields, only within one.
pub mod validation;
