use serde::Serialize;
use tera::{Context, Value};

use crate::error::{Result, VelvetError};

/// Turn render data into a Tera context. `null` (e.g. `()` or `None`) gives
/// an empty context; anything else must serialize to a map.
pub fn build_context<T: Serialize + ?Sized>(data: &T) -> Result<Context> {
    let value = serde_json::to_value(data).map_err(|e| VelvetError::InvalidData {
        source: tera::Error::msg(e.to_string()),
    })?;

    match value {
        Value::Null => Ok(Context::new()),
        value => Context::from_serialize(value).map_err(|e| VelvetError::InvalidData { source: e }),
    }
}
