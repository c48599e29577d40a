//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the storage contract commands depend on.
//! - Isolate SQLite query details from the command layer.
//!
//! # Invariants
//! - Repository writes must enforce `DomainBookmark::validate()` before
//!   persistence.
//! - Repository APIs return semantic errors (`NotFound`,
//!   `ConstraintViolation`) in addition to DB transport errors.

pub mod bookmark_repo;
