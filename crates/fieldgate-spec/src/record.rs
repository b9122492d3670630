use serde_json::{Map, Value};

/// Read access to a fully resolved record (display time).
pub trait Record {
    /// Resolves a dotted path, returning `Value::Null` when any segment is missing.
    fn lookup(&self, path: &str) -> Value;

    /// Reads a single top-level attribute without path traversal.
    fn attribute(&self, name: &str) -> Value;
}

/// Read access to submitted form data (write time).
pub trait RequestData {
    fn has(&self, key: &str) -> bool;

    /// Submitted value for `key`, `Value::Null` when absent.
    fn input(&self, key: &str) -> Value;
}

impl Record for Value {
    fn lookup(&self, path: &str) -> Value {
        fetch_nested(self, path).cloned().unwrap_or(Value::Null)
    }

    fn attribute(&self, name: &str) -> Value {
        self.as_object()
            .and_then(|map| map.get(name))
            .cloned()
            .unwrap_or(Value::Null)
    }
}

impl Record for Map<String, Value> {
    fn lookup(&self, path: &str) -> Value {
        let mut segments = path.split('.').filter(|segment| !segment.is_empty());
        let Some(first) = segments.next() else {
            return Value::Null;
        };
        let rest = segments.collect::<Vec<_>>().join(".");
        match self.get(first) {
            Some(value) if rest.is_empty() => value.clone(),
            Some(value) => value.lookup(&rest),
            None => Value::Null,
        }
    }

    fn attribute(&self, name: &str) -> Value {
        self.get(name).cloned().unwrap_or(Value::Null)
    }
}

impl RequestData for Value {
    fn has(&self, key: &str) -> bool {
        self.as_object().is_some_and(|map| map.contains_key(key))
    }

    fn input(&self, key: &str) -> Value {
        self.as_object()
            .and_then(|map| map.get(key))
            .cloned()
            .unwrap_or(Value::Null)
    }
}

impl RequestData for Map<String, Value> {
    fn has(&self, key: &str) -> bool {
        self.contains_key(key)
    }

    fn input(&self, key: &str) -> Value {
        self.get(key).cloned().unwrap_or(Value::Null)
    }
}

fn fetch_nested<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = value;
    let mut visited = false;
    for segment in path.split('.') {
        if segment.is_empty() {
            continue;
        }
        visited = true;
        current = match current {
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            Value::Object(map) => map.get(segment)?,
            _ => return None,
        };
    }
    visited.then_some(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn dotted_lookup_walks_objects_and_arrays() {
        let record = json!({ "owner": { "roles": ["admin", "editor"] } });
        assert_eq!(record.lookup("owner.roles.1"), json!("editor"));
        assert_eq!(record.lookup("owner.missing"), Value::Null);
        assert_eq!(record.lookup(""), Value::Null);
    }

    #[test]
    fn attribute_does_not_traverse() {
        let record = json!({ "a.b": 1, "a": { "b": 2 } });
        assert_eq!(record.attribute("a.b"), json!(1));
        assert_eq!(record.lookup("a.b"), json!(2));
    }

    #[test]
    fn map_record_matches_value_record() {
        let value = json!({ "meta": { "status": "draft" } });
        let map = value.as_object().cloned().unwrap_or_default();
        assert_eq!(map.lookup("meta.status"), value.lookup("meta.status"));
    }

    #[test]
    fn request_presence_includes_null_values() {
        let request = json!({ "email": null });
        assert!(request.has("email"));
        assert!(!request.has("name"));
        assert_eq!(request.input("name"), Value::Null);
    }
}
