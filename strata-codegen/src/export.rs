//! JSON handoff of a validated schema.

use serde::Serialize;
use strata_ir::Schema;

/// Serialize the validated schema for an external provisioning step.
pub fn schema_to_json(schema: &Schema) -> serde_json::Result<String> {
    to_json(schema)
}

/// Pretty-print any exported value (schema or client shape) as JSON.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(value)
}

#[cfg(test)]
mod tests {
    use serde_json::Value;
    use strata_manifest::{a, model, schema};

    use super::*;
    use crate::{project, validate};

    fn sample() -> Schema {
        validate(
            schema()
                .model(
                    model("Todo")
                        .field("content", a::string())
                        .authorization(|allow| vec![allow.public_api_key()]),
                )
                .unwrap()
                .build(),
        )
        .unwrap()
    }

    #[test]
    fn test_schema_json_shape() {
        let json: Value = serde_json::from_str(&schema_to_json(&sample()).unwrap()).unwrap();

        let todo = &json["models"][0];
        assert_eq!(todo["name"], "Todo");
        assert_eq!(todo["identifier"][0], "id");
        assert_eq!(todo["fields"][0]["implicit"], true);
        assert_eq!(todo["access"]["read"][0], "public-api-key");
        assert_eq!(json["authorization"]["default_mode"], "api-key");
    }

    #[test]
    fn test_client_shape_json() {
        let json: Value = serde_json::from_str(&to_json(&project(&sample())).unwrap()).unwrap();
        let content = &json["models"][0]["fields"][1];
        assert_eq!(content["name"], "content");
        assert_eq!(content["optional"], true);
    }
}
