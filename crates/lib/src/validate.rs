use serde::Serialize;
use serde_json::Value;

use crate::constants::VALIDATION_PENDING_MESSAGE;

/// The outcome of an entity validation request.
///
/// Only the pending outcome exists today: the submitted entity is echoed back
/// untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum EntityValidation {
    NotImplemented { received: Value },
}

impl EntityValidation {
    pub fn validate(entity: Value) -> Self {
        Self::NotImplemented { received: entity }
    }
}

#[derive(Serialize)]
struct EchoBody<'a> {
    message: &'static str,
    received: &'a Value,
}

impl Serialize for EntityValidation {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::NotImplemented { received } => EchoBody {
                message: VALIDATION_PENDING_MESSAGE,
                received,
            }
            .serialize(serializer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn echoes_the_request_body() {
        let body = json!({"type": "Person", "properties": {"name": ["Ann", 1, null]}});
        let value = serde_json::to_value(EntityValidation::validate(body.clone())).unwrap();
        assert_eq!(value["message"], "Validation logic coming soon");
        assert_eq!(value["received"], body);
    }
}
