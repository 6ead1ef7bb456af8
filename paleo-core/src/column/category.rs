//! This module defines [CategoryColumn], a dictionary-encoded column of strings,
//! and its builder [CategoryColumnBuilder].
//!
//! Every distinct string is stored once; rows only hold the code of their category.

use std::mem::size_of;

use hashbrown::HashMap;

use crate::{
    bytesized::{size_inner_slice_flat, ByteSized},
    column_id::{ColumnId, ColumnType},
    error::Error,
    meta_data::{MetaData, MetaDataBuilder},
};

use super::{any_column_impl, Column, ColumnBuilder};

/// Implementation of [Column] for strings drawn from a small set of categories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryColumn {
    id: ColumnId<Self>,
    categories: Box<[String]>,
    codes: Box<[u32]>,
    meta_data: MetaData,
}

impl CategoryColumn {
    fn row_count_inner(&self) -> usize {
        self.codes.len()
    }

    /// Returns the distinct categories in the order of their first occurrence.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Returns the category code of the given row,
    /// i.e. the position of its value in [categories][Self::categories].
    ///
    /// # Errors
    /// Returns [Error::IndexOutOfRange] if `index` is not a valid row.
    pub fn code_at(&self, index: usize) -> Result<u32, Error> {
        Error::check_index(index, self.codes.len())?;
        Ok(self.codes[index])
    }

    fn category(&self, code: u32) -> &str {
        &self.categories[code as usize]
    }
}

impl ColumnType for CategoryColumn {
    const TYPE_NAME: &'static str = "category";
}

any_column_impl!(CategoryColumn);

impl Column for CategoryColumn {
    type Value<'a> = &'a str;
    type Iter<'a> = CategoryValues<'a>;
    type Builder = CategoryColumnBuilder;

    fn builder(id: ColumnId<Self>) -> Self::Builder {
        CategoryColumnBuilder::new(id)
    }

    fn id(&self) -> &ColumnId<Self> {
        &self.id
    }

    fn value_at(&self, index: usize) -> Result<&str, Error> {
        let code = self.code_at(index)?;
        Ok(self.category(code))
    }

    fn values(&self) -> Self::Iter<'_> {
        CategoryValues {
            column: self,
            codes: self.codes.iter(),
        }
    }
}

impl ByteSized for CategoryColumn {
    fn size_bytes(&self) -> u64 {
        size_of::<Self>() as u64
            + self.id.name().len() as u64
            + self.categories.iter().map(ByteSized::size_bytes).sum::<u64>()
            + size_inner_slice_flat(&self.codes)
            + self.meta_data.size_bytes()
    }
}

/// Iterator over the values of a [CategoryColumn]
#[derive(Debug, Clone)]
pub struct CategoryValues<'a> {
    column: &'a CategoryColumn,
    codes: std::slice::Iter<'a, u32>,
}

impl<'a> Iterator for CategoryValues<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let code = *self.codes.next()?;
        Some(self.column.category(code))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.codes.size_hint()
    }
}

impl ExactSizeIterator for CategoryValues<'_> {}

/// [ColumnBuilder] for a [CategoryColumn]
#[derive(Debug, Clone)]
pub struct CategoryColumnBuilder {
    id: ColumnId<CategoryColumn>,
    categories: Vec<String>,
    lookup: HashMap<String, u32>,
    codes: Vec<u32>,
    meta_data: MetaDataBuilder,
}

impl CategoryColumnBuilder {
    /// Create a new, empty builder for the given id.
    pub fn new(id: ColumnId<CategoryColumn>) -> Self {
        Self::with_capacity(id, 0)
    }

    /// Create a new, empty builder with room for `capacity` rows.
    pub fn with_capacity(id: ColumnId<CategoryColumn>, capacity: usize) -> Self {
        Self {
            id,
            categories: Vec::new(),
            lookup: HashMap::new(),
            codes: Vec::with_capacity(capacity),
            meta_data: MetaDataBuilder::new(),
        }
    }

    /// Return the number of distinct categories seen so far.
    pub fn category_count(&self) -> usize {
        self.categories.len()
    }
}

impl ColumnBuilder for CategoryColumnBuilder {
    type Value = String;
    type Col = CategoryColumn;

    /// Append a value at the end of the column.
    ///
    /// # Panics
    /// Panics if the number of distinct categories exceeds [u32::MAX].
    fn add(&mut self, value: impl Into<Self::Value>) -> &mut Self {
        let value = value.into();

        let code = match self.lookup.get(&value) {
            Some(code) => *code,
            None => {
                let code = u32::try_from(self.categories.len())
                    .expect("number of categories is limited to u32::MAX");
                self.categories.push(value.clone());
                self.lookup.insert(value, code);
                code
            }
        };

        self.codes.push(code);
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
        self.codes.len()
    }

    fn build(&self) -> CategoryColumn {
        log::trace!(
            "building {} column \"{}\" with {} rows and {} categories",
            CategoryColumn::TYPE_NAME,
            self.id.name(),
            self.codes.len(),
            self.categories.len()
        );

        CategoryColumn {
            id: self.id.clone(),
            categories: self.categories.as_slice().into(),
            codes: self.codes.as_slice().into(),
            meta_data: self.meta_data.build(),
        }
    }
}
