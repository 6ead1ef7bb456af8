//! This module defines [ColumnId], the typed identifier of a column,
//! and its untyped counterpart [ColumnKey].

use std::{
    fmt::{Debug, Display},
    hash::{Hash, Hasher},
    marker::PhantomData,
};

use crate::error::Error;

/// Trait implemented by every kind of column.
///
/// The type name is the textual tag under which the column kind
/// appears in schemas and in [ColumnKey]s.
pub trait ColumnType: 'static {
    /// Name of this kind of column
    const TYPE_NAME: &'static str;
}

/// Identifier of a column of type `C`.
///
/// The column type is only part of the static type of the identifier,
/// so an id can never be used to build or retrieve a column of another type:
///
/// ```compile_fail
/// use paleo_core::{Column, ColumnBuilder, ColumnId, DoubleColumn, StringColumn};
///
/// let id: ColumnId<DoubleColumn> = ColumnId::new("height");
/// let column = StringColumn::builder(id).add("tall").build();
/// ```
///
/// ```compile_fail
/// use paleo_core::{Column, ColumnBuilder, ColumnId, DoubleColumn};
///
/// let mut builder = DoubleColumn::builder(ColumnId::new("height"));
/// builder.add(String::from("1.85"));
/// ```
pub struct ColumnId<C> {
    name: String,
    column_type: PhantomData<fn() -> C>,
}

impl<C: ColumnType> ColumnId<C> {
    /// Create a new [ColumnId] with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            column_type: PhantomData,
        }
    }

    /// Return the name of the column.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Return the name of the column type.
    pub fn type_name(&self) -> &'static str {
        C::TYPE_NAME
    }

    /// Return the untyped [ColumnKey] of this id.
    pub fn key(&self) -> ColumnKey {
        ColumnKey::new(self.name.clone(), C::TYPE_NAME)
    }

    /// Recover a typed [ColumnId] from a [ColumnKey].
    ///
    /// # Errors
    /// Returns [Error::TypeMismatch] if the key does not denote a column of type `C`.
    pub fn try_from_key(key: &ColumnKey) -> Result<Self, Error> {
        if key.type_name() != C::TYPE_NAME {
            return Err(Error::TypeMismatch {
                name: key.name().to_string(),
                expected: C::TYPE_NAME.to_string(),
                found: key.type_name().to_string(),
            });
        }

        Ok(Self::new(key.name()))
    }
}

impl<C> Clone for ColumnId<C> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            column_type: PhantomData,
        }
    }
}

impl<C: ColumnType> Debug for ColumnId<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColumnId")
            .field("name", &self.name)
            .field("type", &C::TYPE_NAME)
            .finish()
    }
}

impl<C: ColumnType> Display for ColumnId<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, C::TYPE_NAME)
    }
}

impl<C> PartialEq for ColumnId<C> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl<C> Eq for ColumnId<C> {}

impl<C: ColumnType> Hash for ColumnId<C> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        C::TYPE_NAME.hash(state);
    }
}

/// Untyped identifier of a column, consisting of its name and the name of its type.
///
/// Used by containers that hold columns of different types side by side.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColumnKey {
    name: String,
    type_name: String,
}

impl ColumnKey {
    /// Create a new [ColumnKey].
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
        }
    }

    /// Return the name of the column.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Return the name of the column type.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }
}

impl Display for ColumnKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.type_name)
    }
}

impl<C: ColumnType> From<&ColumnId<C>> for ColumnKey {
    fn from(id: &ColumnId<C>) -> Self {
        id.key()
    }
}
