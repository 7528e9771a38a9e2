use serde_json::{Map, Value};

/// Fields that usually wrap the sales array, in priority order
const KNOWN_ARRAY_FIELDS: [&str; 3] = ["data", "orders", "sales"];

/// Find the record objects inside a response of unknown shape.
///
/// Resolution order: root array, then `data` / `orders` / `sales`, then the
/// first array-valued field of the root object. When no array exists a root
/// object is taken as the single record. Non-object elements are dropped.
pub fn locate(document: &Value) -> Vec<&Map<String, Value>> {
    match find_array(document) {
        Some(items) => items.iter().filter_map(Value::as_object).collect(),
        None => match document {
            Value::Object(root) => {
                tracing::info!(
                    "Could not find an array of sales/orders in returned JSON. \
                     Parsing the root object as one record."
                );
                vec![root]
            }
            _ => {
                tracing::warn!("Returned JSON is neither an array nor an object");
                Vec::new()
            }
        },
    }
}

fn find_array(document: &Value) -> Option<&Vec<Value>> {
    let root = match document {
        Value::Array(items) => return Some(items),
        Value::Object(root) => root,
        _ => return None,
    };

    for field in KNOWN_ARRAY_FIELDS {
        if let Some(Value::Array(items)) = root.get(field) {
            tracing::debug!("Using array field '{}'", field);
            return Some(items);
        }
    }

    root.iter().find_map(|(name, value)| match value {
        Value::Array(items) => {
            tracing::debug!("Using first array field '{}'", name);
            Some(items)
        }
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn receipts(found: &[&Map<String, Value>]) -> Vec<String> {
        found
            .iter()
            .map(|o| o.get("r").map(|v| v.to_string()).unwrap_or_default())
            .collect()
    }

    #[test]
    fn test_root_array_keeps_order() {
        let doc = json!([{"r": 3}, {"r": 1}, {"r": 2}]);
        assert_eq!(receipts(&locate(&doc)), vec!["3", "1", "2"]);
    }

    #[test]
    fn test_known_fields_priority() {
        let doc = json!({
            "sales": [{"r": "s"}],
            "orders": [{"r": "o"}],
            "data": [{"r": "d"}],
        });
        assert_eq!(receipts(&locate(&doc)), vec!["\"d\""]);

        let doc = json!({"sales": [{"r": "s"}], "orders": [{"r": "o"}]});
        assert_eq!(receipts(&locate(&doc)), vec!["\"o\""]);
    }

    #[test]
    fn test_known_field_must_be_array() {
        let doc = json!({"data": {"r": "x"}, "sales": [{"r": "s"}]});
        assert_eq!(receipts(&locate(&doc)), vec!["\"s\""]);
    }

    #[test]
    fn test_first_array_field_in_document_order() {
        let doc: Value = serde_json::from_str(
            r#"{"success": "1", "zeta": [{"r": "z"}], "alpha": [{"r": "a"}]}"#,
        )
        .unwrap();
        assert_eq!(receipts(&locate(&doc)), vec!["\"z\""]);
    }

    #[test]
    fn test_object_without_array_is_single_record() {
        let doc = json!({"r": "only", "Net sale": 10});
        let found = locate(&doc);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0], doc.as_object().unwrap());
    }

    #[test]
    fn test_non_objects_are_skipped() {
        let doc = json!({"data": [1, "x", null, {"r": 1}, [2], {"r": 2}]});
        assert_eq!(receipts(&locate(&doc)), vec!["1", "2"]);
    }

    #[test]
    fn test_scalar_root_yields_nothing() {
        assert!(locate(&json!("text")).is_empty());
        assert!(locate(&json!(42)).is_empty());
        assert!(locate(&Value::Null).is_empty());
    }

    #[test]
    fn test_empty_array_is_used_as_is() {
        let doc = json!({"data": [], "orders": [{"r": 1}]});
        assert!(locate(&doc).is_empty());
    }
}
