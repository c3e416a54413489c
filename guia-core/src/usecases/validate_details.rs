use super::prelude::*;
use serde_json::{Map, Value};

/// Accepts the raw `dynamic_details` value of the write forms,
/// either a JSON object or a string containing one.
pub fn parse_dynamic_details(value: Option<Value>) -> Result<Map<String, Value>> {
    match value {
        None => Ok(Map::new()),
        Some(Value::Object(map)) => Ok(map),
        Some(Value::String(s)) => {
            if s.trim().is_empty() {
                return Ok(Map::new());
            }
            match serde_json::from_str::<Value>(&s) {
                Ok(Value::Object(map)) => Ok(map),
                _ => Err(Error::InvalidDynamicDetails),
            }
        }
        Some(_) => Err(Error::InvalidDynamicDetails),
    }
}

// Empty string, null, missing, and empty array all count as absent.
fn is_absent(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(Value::Array(items)) => items.is_empty(),
        _ => false,
    }
}

/// Checks the values against every `required` descriptor of the
/// schema and itemizes the missing fields by label.
pub fn validate_dynamic_fields(
    schema: &[FieldDescriptor],
    values: &Map<String, Value>,
) -> Result<()> {
    let missing: Vec<_> = schema
        .iter()
        .filter(|f| f.required && is_absent(values.get(&f.name)))
        .map(|f| f.label.clone())
        .collect();
    if !missing.is_empty() {
        return Err(Error::MissingDynamicFields(missing));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use guia_entities::builders::*;
    use serde_json::json;

    fn event_schema() -> Vec<FieldDescriptor> {
        ListingType::build()
            .name("Evento")
            .slug("evento")
            .field("event_date", FieldType::Date, true)
            .field("event_time", FieldType::Time, false)
            .field("contact", FieldType::Text, true)
            .finish()
            .fields
    }

    #[test]
    fn parse_object_and_string_forms() {
        let from_obj = parse_dynamic_details(Some(json!({"a": 1}))).unwrap();
        let from_str = parse_dynamic_details(Some(json!(r#"{"a": 1}"#))).unwrap();
        assert_eq!(from_obj, from_str);
        assert!(parse_dynamic_details(None).unwrap().is_empty());
        assert!(parse_dynamic_details(Some(json!(""))).unwrap().is_empty());
        assert!(parse_dynamic_details(Some(json!("not json"))).is_err());
        assert!(parse_dynamic_details(Some(json!("[1,2]"))).is_err());
        assert!(parse_dynamic_details(Some(json!(42))).is_err());
    }

    #[test]
    fn missing_required_fields_are_itemized() {
        let schema = event_schema();
        let values = json!({"event_time": "20:00"});
        let Value::Object(values) = values else {
            unreachable!()
        };
        match validate_dynamic_fields(&schema, &values) {
            Err(Error::MissingDynamicFields(missing)) => {
                assert_eq!(vec!["event_date".to_string(), "contact".to_string()], missing);
            }
            _ => panic!("expected missing fields"),
        }
    }

    #[test]
    fn blank_values_count_as_absent() {
        let schema = event_schema();
        let values = json!({"event_date": "  ", "contact": null});
        let Value::Object(values) = values else {
            unreachable!()
        };
        assert!(validate_dynamic_fields(&schema, &values).is_err());
        let values = json!({"event_date": "2026-03-01", "contact": "011-4000"});
        let Value::Object(values) = values else {
            unreachable!()
        };
        assert!(validate_dynamic_fields(&schema, &values).is_ok());
    }

    #[test]
    fn empty_schema_accepts_anything() {
        let values = serde_json::Map::new();
        assert!(validate_dynamic_fields(&[], &values).is_ok());
    }
}
