use std::{fmt, str::FromStr};

use strum::EnumString;

use crate::id::Id;

/// A listing type ("Negocio Local", "Evento", ...).
///
/// Each type carries an ordered schema of dynamic field
/// descriptors that listings of this type must satisfy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingType {
    pub id: Id,
    pub name: String,
    pub slug: String,
    pub fields: Vec<FieldDescriptor>,
}

impl ListingType {
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().filter(|f| f.required)
    }
}

/// Schema descriptor of a single dynamic field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: String,
    pub label: String,
    pub field_type: FieldType,
    pub required: bool,
    /// Allowed values for [`FieldType::Select`] fields, empty otherwise.
    pub options: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, strum::IntoStaticStr)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum FieldType {
    Text,
    Integer,
    Date,
    Time,
    Boolean,
    Select,
}

impl FieldType {
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("invalid field type")]
pub struct InvalidFieldType;

impl FieldType {
    pub fn parse(s: &str) -> Result<Self, InvalidFieldType> {
        Self::from_str(s).map_err(|_| InvalidFieldType)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_field_type_from_str() {
        assert_eq!(FieldType::parse("select").unwrap(), FieldType::Select);
        assert_eq!(FieldType::parse("Integer").unwrap(), FieldType::Integer);
        assert!(FieldType::parse("json").is_err());
    }

    #[test]
    fn lookup_schema_fields() {
        let lt = ListingType {
            id: Id::new(),
            name: "Evento".into(),
            slug: "evento".into(),
            fields: vec![
                FieldDescriptor {
                    name: "event_date".into(),
                    label: "Fecha".into(),
                    field_type: FieldType::Date,
                    required: true,
                    options: vec![],
                },
                FieldDescriptor {
                    name: "is_free".into(),
                    label: "Gratis".into(),
                    field_type: FieldType::Boolean,
                    required: false,
                    options: vec![],
                },
            ],
        };
        assert!(lt.field("event_date").is_some());
        assert!(lt.field("price").is_none());
        assert_eq!(1, lt.required_fields().count());
    }
}
