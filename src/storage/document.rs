//! The on-disk document: a flat JSON object of title to content.
//!
//! Key order is not preserved. `serde_json::Map` is sorted by key, so a
//! document always decodes in title order regardless of how it was written.

use serde_json::{Map, Value};

/// Why a document failed to decode. Turned into `Error::CorruptData` by the
/// caller, which knows the file path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeError(pub String);

pub fn parse_document(content: &str) -> Result<Vec<(String, String)>, ShapeError> {
    let value: Value =
        serde_json::from_str(content).map_err(|e| ShapeError(format!("invalid JSON: {e}")))?;

    let map = match value {
        Value::Object(map) => map,
        other => {
            return Err(ShapeError(format!(
                "expected an object of title to content, found {}",
                describe(&other)
            )));
        }
    };

    map.into_iter()
        .map(|(title, value)| match value {
            Value::String(content) => Ok((title, content)),
            other => Err(ShapeError(format!(
                "value for '{title}' must be a string, found {}",
                describe(&other)
            ))),
        })
        .collect()
}

pub fn serialize_document<'a, I>(records: I) -> serde_json::Result<String>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let map: Map<String, Value> = records
        .into_iter()
        .map(|(title, content)| (title.to_string(), Value::String(content.to_string())))
        .collect();

    serde_json::to_string_pretty(&Value::Object(map))
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_flat_mapping() {
        let parsed = parse_document(r#"{"todo": "buy milk", "empty": ""}"#).unwrap();
        assert_eq!(
            parsed,
            vec![
                ("empty".to_string(), String::new()),
                ("todo".to_string(), "buy milk".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_empty_object() {
        assert!(parse_document("{}").unwrap().is_empty());
    }

    #[test]
    fn test_parse_rejects_non_json() {
        let err = parse_document("not json at all").unwrap_err();
        assert!(err.0.starts_with("invalid JSON"));
    }

    #[test]
    fn test_parse_rejects_wrong_shapes() {
        for doc in ["42", "null", "\"text\"", "[\"a\", \"b\"]", "true"] {
            assert!(parse_document(doc).is_err(), "accepted {doc}");
        }
    }

    #[test]
    fn test_parse_rejects_non_string_values() {
        let err = parse_document(r#"{"a": "ok", "b": {"nested": "x"}}"#).unwrap_err();
        assert!(err.0.contains("'b'"));
        assert!(err.0.contains("an object"));

        assert!(parse_document(r#"{"n": 3}"#).is_err());
        assert!(parse_document(r#"{"n": null}"#).is_err());
    }

    #[test]
    fn test_serialize_escapes_content() {
        let doc = serialize_document([("quote", "say \"hi\"\nbye")]).unwrap();
        let parsed = parse_document(&doc).unwrap();
        assert_eq!(
            parsed,
            vec![("quote".to_string(), "say \"hi\"\nbye".to_string())]
        );
    }

    #[test]
    fn test_serialize_empty() {
        let doc = serialize_document(std::iter::empty()).unwrap();
        assert_eq!(doc.trim(), "{}");
    }
}
