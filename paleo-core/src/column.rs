//! This module defines the traits [Column], [AnyColumn] and [ColumnBuilder],
//! as well as the different kinds of columns implementing them.
//!
//! Each kind of column chooses its own storage;
//! new kinds are added by implementing the traits, not by extending an enum.

pub mod boolean;
pub mod category;
pub mod generic;
pub mod primitive;

use std::{any::Any, fmt::Debug};

use crate::{
    bytesized::ByteSized,
    column_id::{ColumnId, ColumnKey, ColumnType},
    error::Error,
    meta_data::MetaData,
};

/// Object-safe view on a column of any type.
///
/// Allows columns of different types to be stored together
/// and to be recovered with [downcast][AnyColumn::downcast].
pub trait AnyColumn: Debug + Send + Sync + 'static {
    /// Returns the name of the column.
    fn name(&self) -> &str;

    /// Returns the name of the column type.
    fn type_name(&self) -> &'static str;

    /// Returns the untyped identifier of the column.
    fn key(&self) -> ColumnKey {
        ColumnKey::new(self.name(), self.type_name())
    }

    /// Returns the number of rows in the column.
    fn row_count(&self) -> usize;

    /// Returns true iff the column has no rows.
    fn is_empty(&self) -> bool {
        self.row_count() == 0
    }

    /// Returns the metadata attached to the column.
    fn meta_data(&self) -> &MetaData;

    /// Returns the column as [Any].
    fn as_any(&self) -> &dyn Any;
}

impl dyn AnyColumn {
    /// Returns the column as its concrete type `C`.
    ///
    /// Only the type of the column is checked, not its name.
    ///
    /// # Errors
    /// Returns [Error::TypeMismatch] if the column is not of type `C`.
    pub fn downcast<C: Column>(&self, id: &ColumnId<C>) -> Result<&C, Error> {
        self.as_any()
            .downcast_ref::<C>()
            .ok_or_else(|| Error::TypeMismatch {
                name: id.name().to_string(),
                expected: C::TYPE_NAME.to_string(),
                found: self.type_name().to_string(),
            })
    }
}

/// A trait representing an immutable column of data,
/// identified by a [ColumnId] of its own type.
pub trait Column: AnyColumn + ColumnType + Clone + ByteSized + Sized {
    /// Type of values returned by this column
    type Value<'a>
    where
        Self: 'a;

    /// Iterator over all values of this column
    type Iter<'a>: Iterator<Item = Self::Value<'a>>
    where
        Self: 'a;

    /// [ColumnBuilder] creating this kind of column
    type Builder: ColumnBuilder<Col = Self>;

    /// Returns a fresh builder for a column with the given id.
    fn builder(id: ColumnId<Self>) -> Self::Builder;

    /// Returns the id of the column.
    fn id(&self) -> &ColumnId<Self>;

    /// Returns the value at the given index.
    ///
    /// # Errors
    /// Returns [Error::IndexOutOfRange] if `index` is not smaller than [row_count][AnyColumn::row_count].
    fn value_at(&self, index: usize) -> Result<Self::Value<'_>, Error>;

    /// Returns an iterator over all values in order.
    ///
    /// Can be called any number of times; every iterator sees the same values.
    fn values(&self) -> Self::Iter<'_>;

    /// Creates a column containing a single value.
    fn of<V>(id: ColumnId<Self>, value: V) -> Self
    where
        V: Into<<Self::Builder as ColumnBuilder>::Value>,
    {
        Self::builder(id).add(value).build()
    }

    /// Creates a column containing all given values.
    fn of_all<I>(id: ColumnId<Self>, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<<Self::Builder as ColumnBuilder>::Value>,
    {
        Self::builder(id).add_all(values).build()
    }
}

/// Accumulates values and metadata for a column.
///
/// Calling [build][ColumnBuilder::build] takes a snapshot and leaves the builder untouched,
/// so values added afterwards only show up in columns built later.
pub trait ColumnBuilder: Debug {
    /// Type of values accepted by the builder
    type Value;

    /// Type of column that is being built
    type Col: Column;

    /// Append a value at the end of the column.
    fn add(&mut self, value: impl Into<Self::Value>) -> &mut Self;

    /// Append all given values in iteration order.
    fn add_all<I>(&mut self, values: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<Self::Value>,
    {
        for value in values {
            self.add(value);
        }

        self
    }

    /// Associate the metadata `value` with `key`, overwriting earlier values.
    fn put_meta_data(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self;

    /// Merge all given metadata entries into the builder.
    fn put_all_meta_data<K, V>(&mut self, entries: impl IntoIterator<Item = (K, V)>) -> &mut Self
    where
        K: Into<String>,
        V: Into<String>;

    /// Return the number of values added so far.
    fn count(&self) -> usize;

    /// Create a column from the values and metadata collected so far.
    fn build(&self) -> Self::Col;
}

/// Implements [AnyColumn] for a column type with fields `id`, `meta_data`
/// and a method `row_count_inner`.
macro_rules! any_column_impl {
    ($column:ty $(, $param:ident: $bound:path)?) => {
        impl$(<$param: $bound>)? $crate::column::AnyColumn for $column {
            fn name(&self) -> &str {
                self.id.name()
            }

            fn type_name(&self) -> &'static str {
                <Self as $crate::column_id::ColumnType>::TYPE_NAME
            }

            fn row_count(&self) -> usize {
                self.row_count_inner()
            }

            fn meta_data(&self) -> &$crate::meta_data::MetaData {
                &self.meta_data
            }

            fn as_any(&self) -> &dyn std::any::Any {
                self
            }
        }
    };
}

pub(crate) use any_column_impl;
