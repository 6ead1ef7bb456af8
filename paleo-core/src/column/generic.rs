//! This module defines [GenericColumn], a column that stores its values boxed in a vector,
//! and its builder [GenericColumnBuilder].

use std::{fmt::Debug, mem::size_of, ops::Index};

use crate::{
    bytesized::ByteSized,
    column_id::{ColumnId, ColumnType},
    error::Error,
    meta_data::{MetaData, MetaDataBuilder},
};

use super::{any_column_impl, Column, ColumnBuilder};

/// Values that can be stored in a [GenericColumn]
pub trait GenericValue: Debug + Clone + PartialEq + Send + Sync + ByteSized + 'static {
    /// Name of the column type storing these values
    const TYPE_NAME: &'static str;
}

impl GenericValue for String {
    const TYPE_NAME: &'static str = "string";
}

/// Column of strings
pub type StringColumn = GenericColumn<String>;

/// Implementation of [Column] that stores each value as an owned object.
#[derive(Debug, Clone, PartialEq)]
pub struct GenericColumn<T: GenericValue> {
    id: ColumnId<Self>,
    values: Box<[T]>,
    meta_data: MetaData,
}

impl<T: GenericValue> GenericColumn<T> {
    fn row_count_inner(&self) -> usize {
        self.values.len()
    }

    /// Returns all values as a slice.
    pub fn as_slice(&self) -> &[T] {
        &self.values
    }
}

impl<T: GenericValue> ColumnType for GenericColumn<T> {
    const TYPE_NAME: &'static str = T::TYPE_NAME;
}

any_column_impl!(GenericColumn<T>, T: GenericValue);

impl<T: GenericValue> Column for GenericColumn<T> {
    type Value<'a> = &'a T;
    type Iter<'a> = std::slice::Iter<'a, T>;
    type Builder = GenericColumnBuilder<T>;

    fn builder(id: ColumnId<Self>) -> Self::Builder {
        GenericColumnBuilder::new(id)
    }

    fn id(&self) -> &ColumnId<Self> {
        &self.id
    }

    fn value_at(&self, index: usize) -> Result<&T, Error> {
        self.values.get(index).ok_or(Error::IndexOutOfRange {
            index,
            row_count: self.values.len(),
        })
    }

    fn values(&self) -> Self::Iter<'_> {
        self.values.iter()
    }
}

impl<T: GenericValue> Index<usize> for GenericColumn<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        &self.values[index]
    }
}

impl<T: GenericValue> ByteSized for GenericColumn<T> {
    fn size_bytes(&self) -> u64 {
        size_of::<Self>() as u64
            + self.id.name().len() as u64
            + self.values.iter().map(ByteSized::size_bytes).sum::<u64>()
            + self.meta_data.size_bytes()
    }
}

/// [ColumnBuilder] for a [GenericColumn]
#[derive(Debug, Clone)]
pub struct GenericColumnBuilder<T: GenericValue> {
    id: ColumnId<GenericColumn<T>>,
    values: Vec<T>,
    meta_data: MetaDataBuilder,
}

impl<T: GenericValue> GenericColumnBuilder<T> {
    /// Create a new, empty builder for the given id.
    pub fn new(id: ColumnId<GenericColumn<T>>) -> Self {
        Self::with_capacity(id, 0)
    }

    /// Create a new, empty builder with room for `capacity` values.
    pub fn with_capacity(id: ColumnId<GenericColumn<T>>, capacity: usize) -> Self {
        Self {
            id,
            values: Vec::with_capacity(capacity),
            meta_data: MetaDataBuilder::new(),
        }
    }
}

impl<T: GenericValue> ColumnBuilder for GenericColumnBuilder<T> {
    type Value = T;
    type Col = GenericColumn<T>;

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

    fn build(&self) -> GenericColumn<T> {
        log::trace!(
            "building {} column \"{}\" with {} rows",
            T::TYPE_NAME,
            self.id.name(),
            self.values.len()
        );

        GenericColumn {
            id: self.id.clone(),
            values: self.values.as_slice().into(),
            meta_data: self.meta_data.build(),
        }
    }
}

#[cfg(test)]
mod test {
    use quickcheck_macros::quickcheck;

    use super::StringColumn;
    use crate::{
        column::{AnyColumn, Column, ColumnBuilder},
        column_id::ColumnId,
        error::Error,
        meta_data::MetaData,
    };
    use test_log::test;

    fn name_id() -> ColumnId<StringColumn> {
        ColumnId::new("name")
    }

    #[test]
    fn values_keep_insertion_order() {
        let column = StringColumn::builder(name_id())
            .add("Ada")
            .add(String::from("Grace"))
            .add_all(["Barbara", "Frances"])
            .build();

        assert_eq!(column.row_count(), 4);
        assert_eq!(column.value_at(0).unwrap(), "Ada");
        assert_eq!(column.value_at(1).unwrap(), "Grace");
        assert_eq!(column.value_at(3).unwrap(), "Frances");
        assert_eq!(&column[2], "Barbara");
        assert_eq!(column.id(), &name_id());
    }

    #[test]
    fn access_out_of_range() {
        let column = StringColumn::of_all(name_id(), ["a", "b"]);

        assert_eq!(
            column.value_at(2),
            Err(Error::IndexOutOfRange {
                index: 2,
                row_count: 2
            })
        );
        assert!(column.value_at(usize::MAX).is_err());
    }

    #[test]
    fn empty_column() {
        let column = StringColumn::builder(name_id()).build();

        assert!(column.is_empty());
        assert_eq!(column.values().count(), 0);
        assert!(column.value_at(0).is_err());
        assert!(column.meta_data().is_empty());
    }

    #[test]
    fn single_value_column() {
        let column = StringColumn::of(name_id(), "only");

        assert_eq!(column.as_slice(), &["only".to_string()]);
    }

    #[test]
    fn iteration_can_be_repeated() {
        let column = StringColumn::of_all(name_id(), ["x", "y", "z"]);

        let first = column.values().cloned().collect::<Vec<_>>();
        let second = column.values().cloned().collect::<Vec<_>>();
        assert_eq!(first, vec!["x", "y", "z"]);
        assert_eq!(first, second);
    }

    #[test]
    fn meta_data_is_attached() {
        let defaults: MetaData = [("source", "survey"), ("lang", "en")].into_iter().collect();
        let column = StringColumn::builder(name_id())
            .put_all_meta_data(defaults.iter())
            .put_meta_data("lang", "de")
            .add("a")
            .build();

        assert_eq!(column.meta_data().len(), 2);
        assert_eq!(column.meta_data().get("source"), Some("survey"));
        assert_eq!(column.meta_data().get("lang"), Some("de"));
    }

    #[test]
    fn built_column_does_not_see_later_values() {
        let mut builder = StringColumn::builder(name_id());
        builder.add("a");
        let column = builder.build();
        builder.add("b");

        assert_eq!(column.row_count(), 1);
        assert_eq!(builder.count(), 2);
        assert_eq!(builder.build().row_count(), 2);
    }

    #[quickcheck]
    fn added_values_are_returned(values: Vec<String>) -> bool {
        let column = StringColumn::of_all(name_id(), values.clone());

        column.row_count() == values.len()
            && values
                .iter()
                .enumerate()
                .all(|(index, value)| column.value_at(index) == Ok(value))
            && column.value_at(values.len()).is_err()
    }
}
