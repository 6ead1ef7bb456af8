//! This module defines [PrimitiveColumn], a column that stores
//! primitive values unboxed in a flat buffer,
//! and its builder [PrimitiveColumnBuilder].

use std::{fmt::Debug, iter::Copied, mem::size_of, ops::Index};

use crate::{
    bytesized::{size_inner_slice_flat, ByteSized},
    column_id::{ColumnId, ColumnType},
    error::Error,
    meta_data::{MetaData, MetaDataBuilder},
};

use super::{any_column_impl, Column, ColumnBuilder};

/// Primitive values that can be stored in a [PrimitiveColumn]
pub trait PrimitiveValue: Debug + Copy + PartialEq + Send + Sync + 'static {
    /// Name of the column type storing these values
    const TYPE_NAME: &'static str;
}

impl PrimitiveValue for f64 {
    const TYPE_NAME: &'static str = "double";
}

impl PrimitiveValue for i32 {
    const TYPE_NAME: &'static str = "int";
}

impl PrimitiveValue for i64 {
    const TYPE_NAME: &'static str = "long";
}

/// Column of double precision floating point numbers
pub type DoubleColumn = PrimitiveColumn<f64>;
/// Column of 32 bit integers
pub type IntColumn = PrimitiveColumn<i32>;
/// Column of 64 bit integers
pub type LongColumn = PrimitiveColumn<i64>;

/// Implementation of [Column] that keeps its values in one contiguous buffer.
///
/// Values are returned exactly as they were added;
/// for floating point numbers this includes NaN and infinite values.
#[derive(Debug, Clone, PartialEq)]
pub struct PrimitiveColumn<T: PrimitiveValue> {
    id: ColumnId<Self>,
    values: Box<[T]>,
    meta_data: MetaData,
}

impl<T: PrimitiveValue> PrimitiveColumn<T> {
    fn row_count_inner(&self) -> usize {
        self.values.len()
    }

    /// Returns all values as a slice.
    pub fn as_slice(&self) -> &[T] {
        &self.values
    }
}

impl<T: PrimitiveValue> ColumnType for PrimitiveColumn<T> {
    const TYPE_NAME: &'static str = T::TYPE_NAME;
}

any_column_impl!(PrimitiveColumn<T>, T: PrimitiveValue);

impl<T: PrimitiveValue> Column for PrimitiveColumn<T> {
    type Value<'a> = T;
    type Iter<'a> = Copied<std::slice::Iter<'a, T>>;
    type Builder = PrimitiveColumnBuilder<T>;

    fn builder(id: ColumnId<Self>) -> Self::Builder {
        PrimitiveColumnBuilder::new(id)
    }

    fn id(&self) -> &ColumnId<Self> {
        &self.id
    }

    fn value_at(&self, index: usize) -> Result<T, Error> {
        Error::check_index(index, self.values.len())?;
        Ok(self.values[index])
    }

    fn values(&self) -> Self::Iter<'_> {
        self.values.iter().copied()
    }
}

impl<T: PrimitiveValue> Index<usize> for PrimitiveColumn<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        &self.values[index]
    }
}

impl<T: PrimitiveValue> ByteSized for PrimitiveColumn<T> {
    fn size_bytes(&self) -> u64 {
        // We cast everything to u64 separately to avoid overflows
        size_of::<Self>() as u64
            + self.id.name().len() as u64
            + size_inner_slice_flat(&self.values)
            + self.meta_data.size_bytes()
    }
}

/// [ColumnBuilder] for a [PrimitiveColumn]
#[derive(Debug, Clone)]
pub struct PrimitiveColumnBuilder<T: PrimitiveValue> {
    id: ColumnId<PrimitiveColumn<T>>,
    values: Vec<T>,
    meta_data: MetaDataBuilder,
}

impl<T: PrimitiveValue> PrimitiveColumnBuilder<T> {
    /// Create a new, empty builder for the given id.
    pub fn new(id: ColumnId<PrimitiveColumn<T>>) -> Self {
        Self::with_capacity(id, 0)
    }

    /// Create a new, empty builder with room for `capacity` values.
    pub fn with_capacity(id: ColumnId<PrimitiveColumn<T>>, capacity: usize) -> Self {
        Self {
            id,
            values: Vec::with_capacity(capacity),
            meta_data: MetaDataBuilder::new(),
        }
    }

    /// Append all values of the given slice.
    pub fn add_slice(&mut self, values: &[T]) -> &mut Self {
        self.values.extend_from_slice(values);
        self
    }
}

impl<T: PrimitiveValue> ColumnBuilder for PrimitiveColumnBuilder<T> {
    type Value = T;
    type Col = PrimitiveColumn<T>;

    fn add(&mut self, value: impl Into<Self::Value>) -> &mut Self {
        self.values.push(value.into());
        self
    }

    fn put_meta_data(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.meta_data.put(key, value);
        self
    }

    fn put_all_meta_data<K, V>(&mut self, entries: impl IntoIterator<Item = (K, V)>) -> &mut Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.meta_data.put_all(entries);
        self
    }

    fn count(&self) -> usize {
        self.values.len()
    }

    fn build(&self) -> PrimitiveColumn<T> {
        log::trace!(
            "building {} column \"{}\" with {} rows",
            T::TYPE_NAME,
            self.id.name(),
            self.values.len()
        );

        PrimitiveColumn {
            id: self.id.clone(),
            values: self.values.as_slice().into(),
            meta_data: self.meta_data.build(),
        }
    }
}
