//! This module defines [BooleanColumn], which packs its values into a bit vector,
//! and its builder [BooleanColumnBuilder].

use std::{mem::size_of, ops::Range};

use bitvec::{slice::BitSlice, vec::BitVec};

use crate::{
    bytesized::ByteSized,
    column_id::{ColumnId, ColumnType},
    error::Error,
    meta_data::{MetaData, MetaDataBuilder},
};

use super::{any_column_impl, Column, ColumnBuilder};

/// Implementation of [Column] for boolean values, using one bit per row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BooleanColumn {
    id: ColumnId<Self>,
    values: BitVec,
    meta_data: MetaData,
}

impl BooleanColumn {
    fn row_count_inner(&self) -> usize {
        self.values.len()
    }

    /// Returns the number of rows that are `true`.
    pub fn count_true(&self) -> usize {
        self.values.count_ones()
    }
}

impl ColumnType for BooleanColumn {
    const TYPE_NAME: &'static str = "boolean";
}

any_column_impl!(BooleanColumn);

impl Column for BooleanColumn {
    type Value<'a> = bool;
    type Iter<'a> = BooleanValues<'a>;
    type Builder = BooleanColumnBuilder;

    fn builder(id: ColumnId<Self>) -> Self::Builder {
        BooleanColumnBuilder::new(id)
    }

    fn id(&self) -> &ColumnId<Self> {
        &self.id
    }

    fn value_at(&self, index: usize) -> Result<bool, Error> {
        self.values
            .get(index)
            .map(|bit| *bit)
            .ok_or(Error::IndexOutOfRange {
                index,
                row_count: self.values.len(),
            })
    }

    fn values(&self) -> Self::Iter<'_> {
        BooleanValues {
            bits: &self.values,
            interval: 0..self.values.len(),
        }
    }
}

impl ByteSized for BooleanColumn {
    fn size_bytes(&self) -> u64 {
        size_of::<Self>() as u64
            + self.id.name().len() as u64
            + self.values.as_raw_slice().len() as u64 * size_of::<usize>() as u64
            + self.meta_data.size_bytes()
    }
}

/// Iterator over the values of a [BooleanColumn]
#[derive(Debug, Clone)]
pub struct BooleanValues<'a> {
    bits: &'a BitSlice,
    interval: Range<usize>,
}

impl Iterator for BooleanValues<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        let pos = self.interval.next()?;
        Some(self.bits[pos])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.interval.size_hint()
    }
}

impl DoubleEndedIterator for BooleanValues<'_> {
    fn next_back(&mut self) -> Option<bool> {
        let pos = self.interval.next_back()?;
        Some(self.bits[pos])
    }
}

impl ExactSizeIterator for BooleanValues<'_> {}

/// [ColumnBuilder] for a [BooleanColumn]
#[derive(Debug, Clone)]
pub struct BooleanColumnBuilder {
    id: ColumnId<BooleanColumn>,
    values: BitVec,
    meta_data: MetaDataBuilder,
}

impl BooleanColumnBuilder {
    /// Create a new, empty builder for the given id.
    pub fn new(id: ColumnId<BooleanColumn>) -> Self {
        Self::with_capacity(id, 0)
    }

    /// Create a new, empty builder with room for `capacity` values.
    pub fn with_capacity(id: ColumnId<BooleanColumn>, capacity: usize) -> Self {
        Self {
            id,
            values: BitVec::with_capacity(capacity),
            meta_data: MetaDataBuilder::new(),
        }
    }

    /// Append all values of the given slice.
    pub fn add_slice(&mut self, values: &[bool]) -> &mut Self {
        self.values.extend(values.iter().copied());
        self
    }
}

impl ColumnBuilder for BooleanColumnBuilder {
    type Value = bool;
    type Col = BooleanColumn;

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

    fn build(&self) -> BooleanColumn {
        log::trace!(
            "building {} column \"{}\" with {} rows",
            BooleanColumn::TYPE_NAME,
            self.id.name(),
            self.values.len()
        );

        let mut values = self.values.clone();
        values.shrink_to_fit();

        BooleanColumn {
            id: self.id.clone(),
            values,
            meta_data: self.meta_data.build(),
        }
    }
}

#[cfg(test)]
mod test {
    use quickcheck_macros::quickcheck;

    use super::BooleanColumn;
    use crate::{
        column::{AnyColumn, Column, ColumnBuilder},
        column_id::ColumnId,
        error::Error,
    };
    use test_log::test;

    fn flag_id() -> ColumnId<BooleanColumn> {
        ColumnId::new("flag")
    }

    #[test]
    fn build_boolean_column() {
        let column = BooleanColumn::builder(flag_id())
            .add(true)
            .add_slice(&[false, false, true])
            .put_meta_data("meaning", "present")
            .build();

        assert_eq!(column.row_count(), 4);
        assert_eq!(column.value_at(0), Ok(true));
        assert_eq!(column.value_at(1), Ok(false));
        assert_eq!(column.count_true(), 2);
        assert_eq!(
            column.values().collect::<Vec<_>>(),
            vec![true, false, false, true]
        );
        assert_eq!(column.values().len(), 4);
        assert_eq!(column.values().next_back(), Some(true));
        assert_eq!(column.meta_data().get("meaning"), Some("present"));
    }

    #[test]
    fn access_out_of_range() {
        let column = BooleanColumn::builder(flag_id()).build();

        assert!(column.is_empty());
        assert_eq!(
            column.value_at(0),
            Err(Error::IndexOutOfRange {
                index: 0,
                row_count: 0
            })
        );
    }

    #[quickcheck]
    fn added_booleans_are_returned(values: Vec<bool>) -> bool {
        let column = BooleanColumn::of_all(flag_id(), values.clone());

        column.values().collect::<Vec<_>>() == values
            && column.value_at(values.len()).is_err()
    }
}
