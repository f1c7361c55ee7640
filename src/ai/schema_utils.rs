use schemars::{schema_for, JsonSchema};
use serde_json::{json, Map, Value};

const MAX_DEPTH: usize = 16;

/// JSON Schema for `T` with every `$ref` inlined, ready to ship to the
/// extraction service (which does not follow `definitions`).
pub fn extraction_schema<T: JsonSchema>() -> serde_json::Result<Value> {
    let mut root = serde_json::to_value(schema_for!(T))?;

    let definitions = root
        .get("definitions")
        .or_else(|| root.get("$defs"))
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default();

    inline_node(&mut root, &definitions, 0);

    if let Value::Object(map) = &mut root {
        map.remove("$schema");
        map.remove("title");
        map.remove("definitions");
        map.remove("$defs");
    }

    Ok(root)
}

fn inline_node(node: &mut Value, definitions: &Map<String, Value>, depth: usize) {
    if depth > MAX_DEPTH {
        *node = json!({ "type": "object" });
        return;
    }

    // Resolve before borrowing the map so `*node` can be replaced.
    let mut hops = 0;
    while let Some(target) = node.get("$ref").and_then(Value::as_str).map(str::to_owned) {
        hops += 1;
        let name = target.rsplit('/').next().unwrap_or_default();
        match definitions.get(name) {
            Some(def) if hops <= MAX_DEPTH => *node = def.clone(),
            _ => {
                *node = json!({ "type": "object", "description": "Unresolvable reference" });
                break;
            }
        }
    }

    match node {
        Value::Object(map) => {
            map.remove("title");

            if let Some(Value::Object(props)) = map.get_mut("properties") {
                for child in props.values_mut() {
                    inline_node(child, definitions, depth + 1);
                }
            }

            if let Some(items) = map.get_mut("items") {
                inline_node(items, definitions, depth + 1);
            }

            for key in ["allOf", "anyOf", "oneOf"] {
                if let Some(Value::Array(variants)) = map.get_mut(key) {
                    for variant in variants.iter_mut() {
                        inline_node(variant, definitions, depth + 1);
                    }
                }
            }
        }
        Value::Array(arr) => {
            for item in arr.iter_mut() {
                inline_node(item, definitions, depth + 1);
            }
        }
        _ => {}
    }
}
