//! # Issue Prioritizer
//!
//! Turns gaps between an entity and its Rich Results requirements into
//! severity-ranked actions.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::entities::has_value;
use crate::requirements::Requirement;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Recommended,
    Optional,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    AddSchema,
    AddField,
    FixType,
    FixFormat,
    /// Graph problems: duplicate or dangling `@id`s, unlinked entities.
    FixStructure,
}

/// A single suggested change to a page's structured data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub severity: Severity,
    pub action_kind: ActionKind,
    pub target_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub reason: String,
}

impl Action {
    pub fn new(
        severity: Severity,
        action_kind: ActionKind,
        target_type: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            action_kind,
            target_type: target_type.into(),
            field: None,
            reason: reason.into(),
        }
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }
}

/// Reports the required and recommended fields an entity lacks.
///
/// Missing required fields come first as `critical`, then missing recommended
/// fields as `recommended`, each in the order the requirement declares them.
pub fn prioritize(entity: &Map<String, Value>, requirement: &Requirement) -> Vec<Action> {
    let schema_type = requirement.schema_type;
    let unlocks = requirement
        .rich_result
        .map(|r| format!(" (needed for {r})"))
        .unwrap_or_default();

    let required = requirement
        .required
        .iter()
        .filter(|field| !has_value(entity, field))
        .map(|field| {
            Action::new(
                Severity::Critical,
                ActionKind::AddField,
                schema_type,
                format!("Required property '{field}' is missing from {schema_type}{unlocks}"),
            )
            .with_field(*field)
        });

    let recommended = requirement
        .recommended
        .iter()
        .filter(|field| !has_value(entity, field))
        .map(|field| {
            Action::new(
                Severity::Recommended,
                ActionKind::AddField,
                schema_type,
                format!("Recommended property '{field}' is missing from {schema_type}"),
            )
            .with_field(*field)
        });

    required.chain(recommended).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::requirements::requirement_for;
    use serde_json::json;

    #[test]
    fn missing_fields_follow_declaration_order() {
        let entity = json!({"@type": "Article", "headline": "Hi", "author": "Ann"});
        let requirement = requirement_for("Article").unwrap();
        let actions = prioritize(entity.as_object().unwrap(), requirement);

        let critical: Vec<_> = actions
            .iter()
            .filter(|a| a.severity == Severity::Critical)
            .filter_map(|a| a.field.as_deref())
            .collect();
        assert_eq!(critical, vec!["image", "datePublished"]);

        let recommended: Vec<_> = actions
            .iter()
            .filter(|a| a.severity == Severity::Recommended)
            .filter_map(|a| a.field.as_deref())
            .collect();
        assert_eq!(
            recommended,
            vec!["dateModified", "publisher", "description", "mainEntityOfPage"]
        );
        assert!(actions.iter().all(|a| a.action_kind == ActionKind::AddField));
    }

    #[test]
    fn complete_entity_has_no_actions() {
        let entity = json!({
            "@type": "BreadcrumbList",
            "itemListElement": [{"@type": "ListItem", "position": 1}]
        });
        let requirement = requirement_for("BreadcrumbList").unwrap();
        assert!(prioritize(entity.as_object().unwrap(), requirement).is_empty());
    }

    #[test]
    fn action_serializes_lowercase_severity() {
        let action = Action::new(Severity::Critical, ActionKind::FixType, "Unknown", "no type");
        let value = serde_json::to_value(&action).unwrap();
        assert_eq!(value["severity"], "critical");
        assert_eq!(value["action_kind"], "fix_type");
        assert!(value.get("field").is_none());
    }
}
