use std::any::{type_name, TypeId};

use serde_json::Value;

use crate::{
    error::{PlannerError, Result},
    schemas::{validate_structured_payload, CompletionSchema, SchemaHandle},
};

/// Turn a recovered JSON value into `T`, reporting the failing path.
pub fn deserialize_structured_response<T>(payload: &Value, schema: &SchemaHandle) -> Result<T>
where
    T: CompletionSchema,
{
    ensure_schema_matches::<T>(schema)?;

    let value = serde_path_to_error::deserialize(payload).map_err(|err| {
        let path = err.path().to_string();
        let location = if path.is_empty() || path == "." {
            "<root>".to_string()
        } else {
            path
        };
        PlannerError::Validation(format!(
            "failed to deserialize `{}` at {}: {}",
            schema.schema_name(),
            location,
            err.inner()
        ))
    })?;

    Ok(value)
}

/// Schema-check `payload` and then deserialize it into `T`.
pub fn parse_structured<T>(payload: &Value) -> Result<T>
where
    T: CompletionSchema,
{
    let schema = T::schema();
    validate_structured_payload(schema, payload)?;
    deserialize_structured_response(payload, schema)
}

fn ensure_schema_matches<T: 'static>(schema: &SchemaHandle) -> Result<()> {
    if schema.type_id() != TypeId::of::<T>() {
        return Err(PlannerError::Validation(format!(
            "schema `{}` does not match target type `{}`",
            schema.schema_name(),
            type_name::<T>(),
        )));
    }
    Ok(())
}
