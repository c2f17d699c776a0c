//! # Structured Data Analysis
//!
//! Evaluates the entities found on a page against the Rich Results
//! requirement table and the expectations of its page type. Rules run in a
//! fixed order and every bucket keeps the order in which actions were raised.

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::OnceLock;
use tracing::debug;

use crate::constants::{DATE_FIELDS, NESTED_REQUIREMENTS, PRICE_SYMBOLS, URL_FIELDS};
use crate::entities::{collect_types, entity_types, has_value, page_entities};
use crate::graph::check_graph;
use crate::page_type::{detect_page_type, indicator, satisfies, HOMEPAGE_PAGE_TYPE};
use crate::prioritize::{prioritize, Action, ActionKind, Severity};
use crate::requirements::{requirement_for, rich_result_for};
use crate::rules::TypeRules;
use crate::suggest::build_schema_draft;
use crate::types::ExtractedMetadata;

const UNTYPED: &str = "Thing";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub page_type: String,
    pub suggested_type: String,
    pub entities_found: usize,
    /// Recognized types declared on the page, in document order.
    pub schemas_found: Vec<String>,
    pub critical_issues: usize,
    pub recommended_issues: usize,
    pub optional_issues: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Actions {
    pub critical: Vec<Action>,
    pub recommended: Vec<Action>,
    pub optional: Vec<Action>,
}

impl Actions {
    fn push(&mut self, action: Action) {
        match action.severity {
            Severity::Critical => self.critical.push(action),
            Severity::Recommended => self.recommended.push(action),
            Severity::Optional => self.optional.push(action),
        }
    }

    fn iter(&self) -> impl Iterator<Item = &Action> {
        self.critical
            .iter()
            .chain(&self.recommended)
            .chain(&self.optional)
    }

    fn suggests_schema(&self, schema_type: &str) -> bool {
        self.iter()
            .any(|a| a.action_kind == ActionKind::AddSchema && a.target_type == schema_type)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RichResults {
    /// Rich results the page already qualifies for.
    pub eligible: Vec<String>,
    /// Rich results reachable once the reported issues are fixed.
    pub potential: Vec<String>,
}

/// The `/analyze` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub url: String,
    pub summary: Summary,
    pub actions: Actions,
    pub rich_results: RichResults,
}

/// Analyzes the structured data of an extracted page.
pub fn analyze_page(metadata: &ExtractedMetadata, rules: &TypeRules) -> Analysis {
    let entities = page_entities(metadata);
    let types_found = collect_types(&entities);
    let draft = build_schema_draft(metadata, rules);
    let suggested_type = draft.used_type().to_string();
    let page_type = detect_page_type(&metadata.url, &types_found);
    let declares = |expected: &str| types_found.iter().any(|t| satisfies(expected, t));
    debug!(
        "[analyze_page] {} entities, types {:?}, page type '{page_type}'",
        entities.len(),
        types_found
    );

    let mut actions = Actions::default();

    if entities.is_empty() {
        actions.push(Action::new(
            Severity::Critical,
            ActionKind::AddSchema,
            suggested_type.as_str(),
            format!("No structured data found; add a {suggested_type} schema"),
        ));
        if let Some(requirement) = requirement_for(&suggested_type) {
            prioritize(draft.fields(), requirement)
                .into_iter()
                .for_each(|a| actions.push(a));
        }
    }

    for entity in entities.iter().filter(|e| entity_types(e).is_empty()) {
        let name = entity
            .get("name")
            .and_then(Value::as_str)
            .map(|n| format!(" '{n}'"))
            .unwrap_or_default();
        actions.push(Action::new(
            Severity::Critical,
            ActionKind::FixType,
            UNTYPED,
            format!("Entity{name} has no recognizable @type"),
        ));
    }

    for entity in &entities {
        for schema_type in entity_types(entity) {
            if let Some(requirement) = requirement_for(&schema_type) {
                prioritize(entity, requirement)
                    .into_iter()
                    .for_each(|a| actions.push(a));
            }
        }
    }

    for entity in &entities {
        check_nested_objects(entity, &mut actions);
    }
    for entity in &entities {
        check_dates(entity, &mut actions);
    }
    for entity in &entities {
        check_urls(entity, &mut actions);
    }
    for entity in &entities {
        check_prices(entity, &mut actions);
    }
    check_graph(&entities)
        .into_iter()
        .for_each(|a| actions.push(a));

    let page = indicator(page_type);
    if let Some(page) = page {
        for expected in page.expected_schemas {
            if !declares(*expected) && !actions.suggests_schema(expected) {
                actions.push(Action::new(
                    Severity::Recommended,
                    ActionKind::AddSchema,
                    *expected,
                    format!("Pages of type '{page_type}' are expected to declare {expected}"),
                ));
            }
        }
    }

    check_enhancements(page_type, &types_found, &entities, &mut actions);

    let og_video = metadata
        .og("type")
        .is_some_and(|t| t.to_ascii_lowercase().starts_with("video"))
        || metadata.og("video").is_some();
    if og_video && !declares("VideoObject") && !actions.suggests_schema("VideoObject") {
        actions.push(Action::new(
            Severity::Recommended,
            ActionKind::AddSchema,
            "VideoObject",
            "OpenGraph describes a video but the page has no VideoObject",
        ));
    }

    let rich_results = rich_results(&types_found, &actions);
    let summary = Summary {
        page_type: page_type.to_string(),
        suggested_type,
        entities_found: entities.len(),
        schemas_found: types_found,
        critical_issues: actions.critical.len(),
        recommended_issues: actions.recommended.len(),
        optional_issues: actions.optional.len(),
    };

    Analysis {
        url: metadata.url.clone(),
        summary,
        actions,
        rich_results,
    }
}

fn primary_type(entity: &Map<String, Value>) -> String {
    entity_types(entity)
        .into_iter()
        .next()
        .unwrap_or_else(|| UNTYPED.to_string())
}

fn iso_date() -> Option<&'static Regex> {
    static ISO_DATE: OnceLock<Option<Regex>> = OnceLock::new();
    ISO_DATE
        .get_or_init(|| {
            Regex::new(r"^\d{4}-\d{2}-\d{2}(T\d{2}:\d{2}(:\d{2}(\.\d+)?)?(Z|[+-]\d{2}:?\d{2})?)?$")
                .ok()
        })
        .as_ref()
}

/// True for ISO-8601 dates such as `2024-01-31` or `2024-01-31T10:00:00+02:00`.
pub fn is_iso_date(value: &str) -> bool {
    iso_date().is_some_and(|re| re.is_match(value.trim()))
}

/// True for absolute http(s) URLs and root-relative paths.
pub fn is_acceptable_url(value: &str) -> bool {
    let value = value.trim();
    value.starts_with("http://") || value.starts_with("https://") || value.starts_with('/')
}

/// Objects of a one-or-many field, ignoring bare `{"@id": ...}` references.
fn nested_objects<'a>(entity: &'a Map<String, Value>, field: &str) -> Vec<&'a Map<String, Value>> {
    let items: Vec<&Value> = match entity.get(field) {
        Some(Value::Array(items)) => items.iter().collect(),
        Some(value) => vec![value],
        None => Vec::new(),
    };
    items
        .into_iter()
        .filter_map(Value::as_object)
        .filter(|o| o.keys().any(|k| k != "@id"))
        .collect()
}

fn check_nested_objects(entity: &Map<String, Value>, actions: &mut Actions) {
    let types = entity_types(entity);
    for (expected, field, subfields) in NESTED_REQUIREMENTS {
        let Some(schema_type) = types.iter().find(|t| satisfies(expected, t)) else {
            continue;
        };
        let nested = nested_objects(entity, field);
        for subfield in subfields.iter() {
            if nested.iter().any(|o| !has_value(o, subfield)) {
                actions.push(
                    Action::new(
                        Severity::Critical,
                        ActionKind::AddField,
                        schema_type.as_str(),
                        format!("'{field}' is present but lacks '{subfield}'"),
                    )
                    .with_field(format!("{field}.{subfield}")),
                );
            }
        }
    }
}

/// True for numbers and numeric strings, allowing currency symbols and
/// thousands separators.
pub fn is_valid_price(value: &Value) -> bool {
    match value {
        Value::Number(_) => true,
        Value::String(s) => {
            let cleaned: String = s.chars().filter(|c| !PRICE_SYMBOLS.contains(c)).collect();
            cleaned.trim().parse::<f64>().is_ok_and(f64::is_finite)
        }
        _ => false,
    }
}

/// True for three-letter ISO 4217 style codes such as `EUR`.
pub fn is_currency_code(value: &str) -> bool {
    let value = value.trim();
    value.len() == 3 && value.chars().all(|c| c.is_ascii_alphabetic())
}

fn check_prices(entity: &Map<String, Value>, actions: &mut Actions) {
    let offers = if has_value(entity, "offers") {
        nested_objects(entity, "offers")
    } else if entity_types(entity).iter().any(|t| t.ends_with("Offer")) {
        vec![entity]
    } else {
        return;
    };
    let target = primary_type(entity);

    if let Some(price) = offers
        .iter()
        .filter_map(|o| o.get("price"))
        .find(|p| !p.is_null() && !is_valid_price(p))
    {
        actions.push(
            Action::new(
                Severity::Recommended,
                ActionKind::FixFormat,
                target.as_str(),
                format!("'price' value {price} is not a number; put the currency in priceCurrency"),
            )
            .with_field("price"),
        );
    }

    if let Some(currency) = offers
        .iter()
        .filter_map(|o| o.get("priceCurrency").and_then(Value::as_str))
        .find(|c| !c.trim().is_empty() && !is_currency_code(c))
    {
        actions.push(
            Action::new(
                Severity::Recommended,
                ActionKind::FixFormat,
                target.as_str(),
                format!("'priceCurrency' value '{currency}' is not a three-letter ISO 4217 code"),
            )
            .with_field("priceCurrency"),
        );
    }
}

fn check_dates(entity: &Map<String, Value>, actions: &mut Actions) {
    for field in DATE_FIELDS {
        let Some(value) = entity.get(field).and_then(Value::as_str) else {
            continue;
        };
        if value.trim().is_empty() || is_iso_date(value) {
            continue;
        }
        actions.push(
            Action::new(
                Severity::Critical,
                ActionKind::FixFormat,
                primary_type(entity),
                format!("'{field}' value '{value}' is not an ISO-8601 date"),
            )
            .with_field(field),
        );
    }
}

fn check_urls(entity: &Map<String, Value>, actions: &mut Actions) {
    for field in URL_FIELDS {
        let values: Vec<&str> = match entity.get(field) {
            Some(Value::String(s)) => vec![s.as_str()],
            Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).collect(),
            _ => continue,
        };
        let invalid = values
            .into_iter()
            .find(|v| !v.trim().is_empty() && !is_acceptable_url(v));
        if let Some(value) = invalid {
            actions.push(
                Action::new(
                    Severity::Recommended,
                    ActionKind::FixFormat,
                    primary_type(entity),
                    format!("'{field}' value '{value}' is not an absolute URL"),
                )
                .with_field(field),
            );
        }
    }
}

fn check_enhancements(
    page_type: &str,
    types_found: &[String],
    entities: &[Map<String, Value>],
    actions: &mut Actions,
) {
    let declares = |expected: &str| types_found.iter().any(|t| satisfies(expected, t));

    if page_type != HOMEPAGE_PAGE_TYPE
        && !declares("BreadcrumbList")
        && !actions.suggests_schema("BreadcrumbList")
    {
        actions.push(Action::new(
            Severity::Optional,
            ActionKind::AddSchema,
            "BreadcrumbList",
            "Breadcrumbs help search engines show the page's position in the site",
        ));
    }

    if let Some(page) = indicator(page_type) {
        for optional in page.optional_schemas {
            let Some(rich_result) = rich_result_for(optional) else {
                continue;
            };
            if !declares(*optional) && !actions.suggests_schema(optional) {
                actions.push(Action::new(
                    Severity::Optional,
                    ActionKind::AddSchema,
                    *optional,
                    format!("Adding {optional} could unlock {rich_result}"),
                ));
            }
        }
    }

    for entity in entities {
        let types = entity_types(entity);
        let is = |t: &str| types.iter().any(|found| found == t);

        if is("WebSite") && !has_value(entity, "potentialAction") {
            actions.push(
                Action::new(
                    Severity::Optional,
                    ActionKind::AddField,
                    "WebSite",
                    "A SearchAction enables the Sitelinks Search Box",
                )
                .with_field("potentialAction"),
            );
        }

        if is("Product") && !has_value(entity, "aggregateRating") && !has_value(entity, "review") {
            actions.push(
                Action::new(
                    Severity::Optional,
                    ActionKind::AddField,
                    "Product",
                    "Ratings or reviews show star ratings in search results",
                )
                .with_field("aggregateRating"),
            );
        }

        if let Some(org) = types.iter().find(|t| satisfies("Organization", t)) {
            if !links_to_wikidata(entity) {
                actions.push(
                    Action::new(
                        Severity::Optional,
                        ActionKind::AddField,
                        org.as_str(),
                        "Linking a Wikidata entry in sameAs strengthens entity authority (E-E-A-T)",
                    )
                    .with_field("sameAs"),
                );
            }
        }
    }
}

fn links_to_wikidata(entity: &Map<String, Value>) -> bool {
    let links: Vec<&str> = match entity.get("sameAs") {
        Some(Value::String(s)) => vec![s.as_str()],
        Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).collect(),
        _ => Vec::new(),
    };
    links.iter().any(|l| l.contains("wikidata.org"))
}

fn rich_results(types_found: &[String], actions: &Actions) -> RichResults {
    fn add(list: &mut Vec<String>, name: &str) {
        if !list.iter().any(|n| n == name) {
            list.push(name.to_string());
        }
    }

    let mut results = RichResults::default();

    for schema_type in types_found {
        let Some(rich_result) = rich_result_for(schema_type) else {
            continue;
        };
        let blocked = actions
            .critical
            .iter()
            .any(|a| &a.target_type == schema_type);
        if blocked {
            add(&mut results.potential, rich_result);
        } else {
            add(&mut results.eligible, rich_result);
        }
    }

    for action in actions.iter().filter(|a| a.action_kind == ActionKind::AddSchema) {
        if let Some(rich_result) = rich_result_for(&action.target_type) {
            add(&mut results.potential, rich_result);
        }
    }
    results
}
