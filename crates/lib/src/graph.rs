//! # Entity Graph Checks
//!
//! Looks at how the entities of a page relate through `@id`: definitions that
//! collide, references that point nowhere, identity entities nothing links to,
//! and sibling organizations or site names that disagree.

use serde_json::{Map, Value};

use crate::constants::{LINK_FIELDS, REFERENCE_FIELDS};
use crate::entities::{entity_types, has_value};
use crate::page_type::satisfies;
use crate::prioritize::{Action, ActionKind, Severity};

const IDENTITY_TYPES: [&str; 4] = ["Organization", "LocalBusiness", "Person", "WebSite"];
const ID_KEYS: [&str; 3] = ["@id", "@context", "@type"];

fn entity_id(entity: &Map<String, Value>) -> Option<&str> {
    entity
        .get("@id")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|id| !id.is_empty())
}

fn reference_id(value: &Value) -> Option<&str> {
    value.get("@id").and_then(Value::as_str).map(str::trim)
}

/// The `@id`s referenced by a field value, either one object or a list of them.
fn references(value: &Value) -> Vec<&str> {
    match value {
        Value::Array(items) => items.iter().filter_map(reference_id).collect(),
        other => reference_id(other).into_iter().collect(),
    }
}

fn label(entity: &Map<String, Value>) -> String {
    entity_types(entity)
        .into_iter()
        .next()
        .unwrap_or_else(|| "Thing".to_string())
}

/// True when the entity carries content beyond its identity keys.
fn is_definition(entity: &Map<String, Value>) -> bool {
    entity
        .keys()
        .any(|k| !k.starts_with('_') && !ID_KEYS.contains(&k.as_str()))
}

fn is_organization(entity: &Map<String, Value>) -> bool {
    entity_types(entity)
        .iter()
        .any(|t| satisfies("Organization", t))
}

/// Runs every graph check over the entities of a page.
///
/// Actions come out in check order: duplicate definitions, dangling
/// references, unlinked identity entities, organizations without a hierarchy,
/// then an Organization/WebSite name mismatch.
pub fn check_graph(entities: &[Map<String, Value>]) -> Vec<Action> {
    let mut actions = Vec::new();
    duplicate_ids(entities, &mut actions);
    broken_references(entities, &mut actions);
    orphaned_entities(entities, &mut actions);
    organizations_without_hierarchy(entities, &mut actions);
    name_mismatch(entities, &mut actions);
    actions
}

fn duplicate_ids(entities: &[Map<String, Value>], actions: &mut Vec<Action>) {
    let mut definitions: Vec<(&str, Vec<&Map<String, Value>>)> = Vec::new();
    for entity in entities.iter().filter(|e| is_definition(e)) {
        let Some(id) = entity_id(entity) else {
            continue;
        };
        match definitions.iter_mut().find(|(seen, _)| *seen == id) {
            Some((_, found)) => found.push(entity),
            None => definitions.push((id, vec![entity])),
        }
    }

    for (id, found) in definitions.into_iter().filter(|(_, f)| f.len() > 1) {
        actions.push(
            Action::new(
                Severity::Recommended,
                ActionKind::FixStructure,
                label(found[0]),
                format!(
                    "@id '{id}' is defined {} times; merge them or use distinct ids",
                    found.len()
                ),
            )
            .with_field("@id"),
        );
    }
}

fn broken_references(entities: &[Map<String, Value>], actions: &mut Vec<Action>) {
    let known: Vec<&str> = entities.iter().filter_map(entity_id).collect();

    for entity in entities {
        for field in REFERENCE_FIELDS {
            let Some(value) = entity.get(field) else {
                continue;
            };
            // Absolute ids may live on another page.
            let dangling = references(value)
                .into_iter()
                .find(|id| !id.is_empty() && !id.starts_with("http") && !known.contains(id));
            if let Some(target) = dangling {
                actions.push(
                    Action::new(
                        Severity::Recommended,
                        ActionKind::FixStructure,
                        label(entity),
                        format!("'{field}' points to @id '{target}', which no entity defines"),
                    )
                    .with_field(field),
                );
            }
        }
    }
}

fn orphaned_entities(entities: &[Map<String, Value>], actions: &mut Vec<Action>) {
    let mut linked: Vec<&str> = Vec::new();
    for entity in entities {
        for field in LINK_FIELDS {
            match entity.get(field) {
                Some(Value::String(s)) if s.starts_with('#') => linked.push(s.as_str()),
                Some(value) => linked.extend(references(value)),
                None => {}
            }
        }
    }

    for entity in entities {
        let Some(id) = entity_id(entity) else {
            continue;
        };
        let types = entity_types(entity);
        let Some(identity) = IDENTITY_TYPES
            .iter()
            .find(|expected| types.iter().any(|t| satisfies(expected, t)))
        else {
            continue;
        };
        let links_out = LINK_FIELDS.iter().any(|f| has_value(entity, f));
        if linked.contains(&id) || links_out {
            continue;
        }
        actions.push(Action::new(
            Severity::Recommended,
            ActionKind::FixStructure,
            *identity,
            format!("{identity} '{id}' is not linked to any other entity on the page"),
        ));
    }
}

fn organizations_without_hierarchy(entities: &[Map<String, Value>], actions: &mut Vec<Action>) {
    let organizations: Vec<_> = entities.iter().filter(|e| is_organization(e)).collect();
    if organizations.len() < 2 {
        return;
    }
    let related = organizations
        .iter()
        .any(|org| has_value(org, "parentOrganization") || has_value(org, "subOrganization"));
    if !related {
        actions.push(
            Action::new(
                Severity::Recommended,
                ActionKind::FixStructure,
                "Organization",
                format!(
                    "{} organizations are declared without parentOrganization/subOrganization",
                    organizations.len()
                ),
            )
            .with_field("parentOrganization"),
        );
    }
}

fn name_mismatch(entities: &[Map<String, Value>], actions: &mut Vec<Action>) {
    let name = |entity: &Map<String, Value>| {
        entity
            .get("name")
            .and_then(Value::as_str)
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
    };
    let organization = entities.iter().find(|e| is_organization(e)).and_then(name);
    let website = entities
        .iter()
        .find(|e| entity_types(e).iter().any(|t| t == "WebSite"))
        .and_then(name);

    if let (Some(org), Some(site)) = (organization, website) {
        if org.to_lowercase() != site.to_lowercase() {
            actions.push(
                Action::new(
                    Severity::Optional,
                    ActionKind::FixStructure,
                    "WebSite",
                    format!("Organization name '{org}' differs from WebSite name '{site}'"),
                )
                .with_field("name"),
            );
        }
    }
}
