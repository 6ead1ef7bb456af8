//! This crate defines the in-memory data model of paleo:
//! immutable, typed columns that are identified by [ColumnId][column_id::ColumnId]s
//! and annotated with [MetaData][meta_data::MetaData].
//!
//! Columns are only ever created through a [ColumnBuilder][column::ColumnBuilder],
//! which accumulates values and metadata and hands out immutable snapshots.

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

pub mod bytesized;
pub mod column;
pub mod column_id;
pub mod error;
pub mod meta_data;

pub use column::{
    boolean::BooleanColumn,
    category::CategoryColumn,
    generic::{GenericColumn, StringColumn},
    primitive::{DoubleColumn, IntColumn, LongColumn, PrimitiveColumn},
    AnyColumn, Column, ColumnBuilder,
};
pub use column_id::{ColumnId, ColumnKey, ColumnType};
pub use meta_data::{MetaData, MetaDataBuilder};
