//! This crate defines the declarative description of datasets:
//! a [Schema][schema::Schema] lists the [Field][field::Field]s of a dataset
//! together with their type tags and metadata,
//! and is read from and written to JSON.
//!
//! Readers of raw data use the fields of a schema to decide
//! which [ColumnBuilder][paleo_core::ColumnBuilder] to feed for every column.

#![deny(
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts
)]
#![warn(
    missing_docs,
    unused_import_braces,
    unused_qualifications,
    unused_extern_crates,
    variant_size_differences,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap
)]

pub mod error;
pub mod field;
pub mod schema;

pub use field::Field;
pub use schema::{JsonStyle, Schema, SchemaBuilder};
