//! This module defines [Schema], the description of a dataset,
//! its JSON representation and the [SchemaBuilder].

use std::{
    fmt,
    io::{Read, Write},
    marker::PhantomData,
};

use serde::{
    de::{value::MapAccessDeserializer, MapAccess, Visitor},
    Deserialize, Deserializer, Serialize,
};

use crate::{error::Error, field::Field};

/// Deserializes a JSON `null` like a missing value.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Deserializes `T` from a map only.
///
/// Derived implementations also accept structs encoded as sequences,
/// which is not a valid representation of schemas and fields.
pub(crate) fn deserialize_object<'de, D, T>(
    deserializer: D,
    expecting: &'static str,
) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    struct ObjectVisitor<T> {
        expecting: &'static str,
        target: PhantomData<T>,
    }

    impl<'de, T: Deserialize<'de>> Visitor<'de> for ObjectVisitor<T> {
        type Value = T;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            formatter.write_str(self.expecting)
        }

        fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<T, A::Error> {
            T::deserialize(MapAccessDeserializer::new(map))
        }
    }

    deserializer.deserialize_map(ObjectVisitor {
        expecting,
        target: PhantomData,
    })
}

/// Layout of written JSON
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum JsonStyle {
    /// Everything on a single line
    #[default]
    Compact,
    /// Indented, one property per line
    Pretty,
}

/// Description of a dataset: a title, the name of the file holding the data,
/// and the ordered list of its [Field]s.
///
/// A schema holds no column values.
/// In JSON, it is represented as
/// ```json
/// {
///   "title": "Iris",
///   "dataFileName": "iris.tsv",
///   "fields": [
///     { "name": "sepalLength", "type": "double", "metaData": { "unit": "cm" } }
///   ]
/// }
/// ```
/// where every property is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    title: String,
    data_file_name: String,
    fields: Vec<Field>,
}

/// Properties of a [Schema] as they appear in JSON
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SchemaProperties {
    #[serde(default, deserialize_with = "null_as_default")]
    title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    data_file_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    fields: Vec<Field>,
}

impl<'de> Deserialize<'de> for Schema {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let properties: SchemaProperties = deserialize_object(deserializer, "a schema object")?;

        Ok(Self {
            title: properties.title,
            data_file_name: properties.data_file_name,
            fields: properties.fields,
        })
    }
}

impl Schema {
    /// Return a fresh [SchemaBuilder].
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::new()
    }

    /// Return the title of the dataset.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Return the name of the file containing the data.
    pub fn data_file_name(&self) -> &str {
        &self.data_file_name
    }

    /// Return all fields in order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Return the field at position `index`, if any.
    pub fn field(&self, index: usize) -> Option<&Field> {
        self.fields.get(index)
    }

    /// Return the position of the first field called `name`, if any.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.name() == name)
    }

    /// Return the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Return true iff the schema has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Read a schema from a JSON document.
    ///
    /// Missing or `null` values for `title` and `dataFileName` become empty strings,
    /// and missing or `null` `fields` become an empty list.
    /// Properties that are not part of the schema are ignored.
    ///
    /// # Errors
    /// Returns a parse error if the source can not be read,
    /// is not well-formed JSON or does not have the shape of a schema.
    pub fn parse_json<R: Read>(reader: R) -> Result<Self, Error> {
        let schema: Schema = serde_json::from_reader(reader).map_err(Error::Parse)?;
        schema.log_parsed();
        Ok(schema)
    }

    /// Read a schema from a string containing a JSON document.
    ///
    /// See [parse_json][Self::parse_json] for details.
    pub fn from_json_str(source: &str) -> Result<Self, Error> {
        let schema: Schema = serde_json::from_str(source).map_err(Error::Parse)?;
        schema.log_parsed();
        Ok(schema)
    }

    fn log_parsed(&self) {
        log::debug!(
            "parsed schema \"{}\" with {} fields",
            self.title,
            self.fields.len()
        );
    }

    /// Write this schema as JSON.
    ///
    /// # Errors
    /// Returns an error if writing fails.
    pub fn to_json<W: Write>(&self, writer: W, style: JsonStyle) -> Result<(), Error> {
        log::debug!(
            "writing schema \"{}\" with {} fields",
            self.title,
            self.fields.len()
        );

        match style {
            JsonStyle::Compact => serde_json::to_writer(writer, self),
            JsonStyle::Pretty => serde_json::to_writer_pretty(writer, self),
        }
        .map_err(Error::Write)
    }

    /// Return this schema as a JSON string.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_json_string(&self, style: JsonStyle) -> Result<String, Error> {
        match style {
            JsonStyle::Compact => serde_json::to_string(self),
            JsonStyle::Pretty => serde_json::to_string_pretty(self),
        }
        .map_err(Error::Write)
    }
}

/// Assembles a [Schema] programmatically.
#[derive(Debug, Clone, Default)]
pub struct SchemaBuilder {
    title: String,
    data_file_name: String,
    fields: Vec<Field>,
}

impl SchemaBuilder {
    /// Create a new [SchemaBuilder] for a schema without title, data file or fields.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title.
    pub fn title(&mut self, title: impl Into<String>) -> &mut Self {
        self.title = title.into();
        self
    }

    /// Set the name of the data file.
    pub fn data_file_name(&mut self, data_file_name: impl Into<String>) -> &mut Self {
        self.data_file_name = data_file_name.into();
        self
    }

    /// Append a field.
    pub fn add_field(&mut self, field: Field) -> &mut Self {
        self.fields.push(field);
        self
    }

    /// Create a [Schema] from the current state of the builder.
    pub fn build(&self) -> Schema {
        Schema {
            title: self.title.clone(),
            data_file_name: self.data_file_name.clone(),
            fields: self.fields.clone(),
        }
    }
}

#[cfg(test)]
mod test {
    use paleo_core::MetaData;
    use quickcheck_macros::quickcheck;

    use super::{JsonStyle, Schema};
    use crate::{error::Error, field::Field};
    use test_log::test;

    #[test]
    fn empty_object_gives_defaults() {
        let schema = Schema::from_json_str("{}").unwrap();

        assert_eq!(schema.title(), "");
        assert_eq!(schema.data_file_name(), "");
        assert!(schema.fields().is_empty());
        assert_eq!(schema, Schema::default());
    }

    #[test]
    fn missing_data_file_name() {
        let schema =
            Schema::from_json_str(r#"{"title":"T","fields":[{"name":"x","type":"double"}]}"#)
                .unwrap();

        assert_eq!(schema.title(), "T");
        assert_eq!(schema.data_file_name(), "");
        assert_eq!(schema.len(), 1);
        assert_eq!(schema.fields()[0].name(), "x");
        assert_eq!(schema.fields()[0].type_name(), "double");
        assert!(schema.fields()[0].meta_data().is_empty());
    }

    #[test]
    fn nulls_give_defaults() {
        let schema = Schema::from_json_str(
            r#"{"title":null,"dataFileName":null,"fields":null}"#,
        )
        .unwrap();
        assert_eq!(schema, Schema::default());

        let schema =
            Schema::from_json_str(r#"{"fields":[{"name":"x","type":"int","metaData":null}]}"#)
                .unwrap();
        assert!(schema.fields()[0].meta_data().is_empty());
    }

    #[test]
    fn unknown_properties_are_ignored() {
        let schema = Schema::from_json_str(r#"{"bogus":1}"#).unwrap();
        assert_eq!(schema, Schema::default());

        let schema = Schema::from_json_str(
            r#"{"fields":[{"name":"x","type":"string","width":12}],"version":[1,2]}"#,
        )
        .unwrap();
        assert_eq!(schema.fields(), &[Field::new("x", "string")]);
    }

    #[test]
    fn field_order_and_meta_data_are_preserved() {
        let source = r#"{
            "title": "Iris",
            "dataFileName": "iris.tsv",
            "fields": [
                {"name": "sepalLength", "type": "double", "metaData": {"unit": "cm", "precision": "1"}},
                {"name": "species", "type": "category"},
                {"name": "alive", "type": "boolean"}
            ]
        }"#;
        let schema = Schema::parse_json(source.as_bytes()).unwrap();

        let names = schema.fields().iter().map(Field::name).collect::<Vec<_>>();
        assert_eq!(names, vec!["sepalLength", "species", "alive"]);
        assert_eq!(schema.data_file_name(), "iris.tsv");

        let keys = schema.fields()[0].meta_data().keys().collect::<Vec<_>>();
        assert_eq!(keys, vec!["unit", "precision"]);
        assert_eq!(schema.index_of("alive"), Some(2));
        assert_eq!(schema.index_of("petalLength"), None);
        assert_eq!(schema.field(1).map(Field::type_name), Some("category"));
        assert!(schema.field(3).is_none());
    }

    #[test]
    fn malformed_input_fails() {
        for source in [
            "",
            "{",
            r#"{"title": "T""#,
            "[]",
            "42",
            r#""schema""#,
            r#"{"title": 7}"#,
            r#"{"fields": {}}"#,
            r#"{"fields": [["x", "double"]]}"#,
            r#"{"fields": [{"type": "double"}]}"#,
            r#"{"fields": [{"name": "x", "type": "double", "metaData": {"a": 1}}]}"#,
        ] {
            let result = Schema::from_json_str(source);
            assert!(
                matches!(&result, Err(error) if error.is_parse_error()),
                "expected a parse error for {source:?}, got {result:?}"
            );
        }
    }

    #[test]
    fn arrays_are_not_schemas() {
        assert!(matches!(
            Schema::from_json_str(r#"["T", "data.csv", []]"#),
            Err(Error::Parse(_))
        ));
        assert!(serde_json::from_str::<Schema>(r#"["T", "", []]"#).is_err());
        assert!(serde_json::from_str::<Schema>(r#"{"fields": [["x", "double"]]}"#).is_err());
    }

    #[test]
    fn parse_errors_carry_position() {
        let source = "{\n  \"title\": \"T\",\n  \"dataFileName\": 7\n}";

        let Err(Error::Parse(error)) = Schema::from_json_str(source) else {
            panic!("expected a parse error");
        };
        assert_eq!(error.line(), 3);
        assert!(error.column() > 0);

        let Err(Error::Parse(error)) = Schema::parse_json(source.as_bytes()) else {
            panic!("expected a parse error");
        };
        assert_eq!(error.line(), 3);
    }

    #[test]
    fn unreadable_source_fails() {
        struct Broken;

        impl std::io::Read for Broken {
            fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
                Err(std::io::Error::other("disk on fire"))
            }
        }

        assert!(matches!(Schema::parse_json(Broken), Err(Error::Parse(_))));
    }

    #[test]
    fn written_json_has_expected_shape() {
        let meta_data: MetaData = [("unit", "cm")].into_iter().collect();
        let schema = Schema::builder()
            .title("Iris")
            .add_field(Field::new("sepalLength", "double").with_meta_data(meta_data))
            .build();

        assert_eq!(
            schema.to_json_string(JsonStyle::Compact).unwrap(),
            r#"{"title":"Iris","dataFileName":"","fields":[{"name":"sepalLength","type":"double","metaData":{"unit":"cm"}}]}"#
        );

        let mut buffer = Vec::new();
        schema.to_json(&mut buffer, JsonStyle::Pretty).unwrap();
        let pretty = String::from_utf8(buffer).unwrap();
        assert!(pretty.contains("\n  \"dataFileName\": \"\""));
        assert_eq!(Schema::from_json_str(&pretty).unwrap(), schema);
    }

    #[test]
    fn builder_is_reusable() {
        let mut builder = Schema::builder();
        builder.title("first").add_field(Field::new("a", "int"));
        let first = builder.build();

        builder.data_file_name("b.csv").add_field(Field::new("b", "long"));
        let second = builder.build();

        assert_eq!(first.len(), 1);
        assert_eq!(first.data_file_name(), "");
        assert_eq!(second.len(), 2);
        assert_eq!(second.data_file_name(), "b.csv");
    }

    #[quickcheck]
    fn written_schemas_are_read_back(title: String, names: Vec<String>) -> bool {
        let mut builder = Schema::builder();
        builder.title(title);
        for name in names {
            builder.add_field(Field::new(name, "string"));
        }
        let schema = builder.build();

        let json = schema.to_json_string(JsonStyle::Compact).unwrap();
        Schema::from_json_str(&json).unwrap() == schema
    }
}
