//! # Shared Constants
//!
//! Values shared by the suggestion builder, the analysis rules and the plugin
//! crates of the workspace.

/// The `@context` written into every proposed JSON-LD object.
pub const SCHEMA_CONTEXT: &str = "https://schema.org";

/// The type proposed when neither existing markup nor any rule applies.
pub const DEFAULT_SCHEMA_TYPE: &str = "WebPage";

/// Types whose draft also carries a `headline`.
pub const ARTICLE_TYPES: [&str; 4] = ["Article", "NewsArticle", "BlogPosting", "TechArticle"];

/// Fields expected to hold ISO-8601 dates.
pub const DATE_FIELDS: [&str; 7] = [
    "datePublished",
    "dateModified",
    "startDate",
    "endDate",
    "uploadDate",
    "datePosted",
    "validThrough",
];

/// Fields expected to hold absolute or root-relative URLs.
pub const URL_FIELDS: [&str; 8] = [
    "url",
    "image",
    "logo",
    "sameAs",
    "mainEntityOfPage",
    "contentUrl",
    "embedUrl",
    "thumbnailUrl",
];

/// Nested objects that must carry content when present: `(type, field, subfields)`.
pub const NESTED_REQUIREMENTS: [(&str, &str, &[&str]); 8] = [
    ("Product", "offers", &["price", "priceCurrency"]),
    ("Article", "author", &["name"]),
    ("Article", "publisher", &["name"]),
    ("LocalBusiness", "address", &["streetAddress", "addressLocality"]),
    ("LocalBusiness", "geo", &["latitude", "longitude"]),
    ("Event", "location", &["name", "address"]),
    ("FAQPage", "mainEntity", &["name", "acceptedAnswer"]),
    ("Review", "reviewRating", &["ratingValue"]),
];

/// Fields whose `{"@id": ...}` value must resolve to an entity on the page.
pub const REFERENCE_FIELDS: [&str; 13] = [
    "isPartOf",
    "publisher",
    "author",
    "about",
    "mainEntity",
    "provider",
    "organizer",
    "performer",
    "itemReviewed",
    "parentOrganization",
    "subOrganization",
    "memberOf",
    "mainEntityOfPage",
];

/// Fields that link an entity into the page graph.
pub const LINK_FIELDS: [&str; 8] = [
    "isPartOf",
    "publisher",
    "author",
    "about",
    "mainEntity",
    "provider",
    "organizer",
    "performer",
];

/// Symbols tolerated, and ignored, in a textual `price`.
pub const PRICE_SYMBOLS: [char; 4] = ['$', '€', '₪', ','];

/// Elements whose presence is recorded as a page signal.
pub const SIGNAL_TAGS: [&str; 8] = [
    "article", "video", "audio", "form", "address", "time", "nav", "main",
];

/// The message returned by the entity validation endpoint until real
/// validation exists.
pub const VALIDATION_PENDING_MESSAGE: &str = "Validation logic coming soon";
