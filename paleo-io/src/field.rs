//! This module defines [Field], the description of a single column in a [Schema][crate::Schema].

use paleo_core::{ColumnId, ColumnKey, ColumnType, MetaData};
use serde::{Deserialize, Deserializer, Serialize};

use crate::{
    error::Error,
    schema::{deserialize_object, null_as_default},
};

/// Describes one column of a dataset: its name, the tag of its column type and its metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    name: String,
    #[serde(rename = "type")]
    type_name: String,
    meta_data: MetaData,
}

/// Properties of a [Field] as they appear in JSON
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FieldProperties {
    name: String,
    #[serde(rename = "type")]
    type_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    meta_data: MetaData,
}

impl<'de> Deserialize<'de> for Field {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let properties: FieldProperties = deserialize_object(deserializer, "a field object")?;

        Ok(Self {
            name: properties.name,
            type_name: properties.type_name,
            meta_data: properties.meta_data,
        })
    }
}

impl Field {
    /// Create a new [Field] without metadata.
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            meta_data: MetaData::empty(),
        }
    }

    /// Replace the metadata of this field.
    pub fn with_meta_data(mut self, meta_data: MetaData) -> Self {
        self.meta_data = meta_data;
        self
    }

    /// Return the name of the field.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Return the type tag of the field.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Return the metadata of the field.
    pub fn meta_data(&self) -> &MetaData {
        &self.meta_data
    }

    /// Return the untyped key of the column described by this field.
    ///
    /// The type tag is lowercased, like the [ColumnType::TYPE_NAME]s it is matched against,
    /// so the key equals the key of the id returned by [column_id][Self::column_id].
    pub fn key(&self) -> ColumnKey {
        ColumnKey::new(self.name.clone(), self.type_name.to_ascii_lowercase())
    }

    /// Return the typed id of the column described by this field.
    ///
    /// Type tags are compared to [ColumnType::TYPE_NAME] ignoring ASCII case.
    ///
    /// # Errors
    /// Returns a type mismatch if the field does not describe a column of type `C`.
    pub fn column_id<C: ColumnType>(&self) -> Result<ColumnId<C>, Error> {
        if !self.type_name.eq_ignore_ascii_case(C::TYPE_NAME) {
            return Err(paleo_core::error::Error::TypeMismatch {
                name: self.name.clone(),
                expected: C::TYPE_NAME.to_string(),
                found: self.type_name.clone(),
            }
            .into());
        }

        Ok(ColumnId::new(self.name.clone()))
    }
}
