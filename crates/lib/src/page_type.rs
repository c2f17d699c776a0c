//! # Page Type Detection
//!
//! Classifies a page by its URL (and, failing that, by the types it already
//! declares) so the analysis knows which schemas such a page is expected to
//! carry.

use regex::Regex;
use std::sync::OnceLock;

/// What a page of a given kind should declare.
#[derive(Debug)]
pub struct PageTypeIndicator {
    pub name: &'static str,
    url_patterns: &'static [&'static str],
    /// Schemas a page of this kind is expected to carry.
    pub expected_schemas: &'static [&'static str],
    /// Schemas worth adding when they unlock a rich result.
    pub optional_schemas: &'static [&'static str],
}

pub const GENERIC_PAGE_TYPE: &str = "generic";
pub const HOMEPAGE_PAGE_TYPE: &str = "homepage";

const INDICATORS: &[PageTypeIndicator] = &[
    PageTypeIndicator {
        name: HOMEPAGE_PAGE_TYPE,
        url_patterns: &[r"^https?://[^/]+/?(index\.html?)?$"],
        expected_schemas: &["Organization", "WebSite", "WebPage"],
        optional_schemas: &["LocalBusiness", "ItemList"],
    },
    PageTypeIndicator {
        name: "about",
        url_patterns: &[r"/about", r"/who-we-are", r"/our-story", r"/company"],
        expected_schemas: &["Organization", "WebPage", "BreadcrumbList"],
        optional_schemas: &["Person", "LocalBusiness"],
    },
    PageTypeIndicator {
        name: "contact",
        url_patterns: &[r"/contact", r"/get-in-touch", r"/reach-us"],
        expected_schemas: &["Organization", "ContactPage", "BreadcrumbList"],
        optional_schemas: &["LocalBusiness"],
    },
    PageTypeIndicator {
        name: "service",
        url_patterns: &[r"/service/", r"/services/", r"/our-services", r"/what-we-do"],
        expected_schemas: &["Service", "BreadcrumbList", "Organization"],
        optional_schemas: &["FAQPage", "HowTo", "Offer"],
    },
    PageTypeIndicator {
        name: "pricing",
        url_patterns: &[r"/pricing", r"/prices", r"/plans", r"/packages"],
        expected_schemas: &["WebPage", "BreadcrumbList"],
        optional_schemas: &["Offer", "Product", "Service", "FAQPage"],
    },
    PageTypeIndicator {
        name: "product",
        url_patterns: &[r"/product/", r"/products/.+", r"/p/", r"/item/", r"/shop/.+/"],
        expected_schemas: &["Product", "BreadcrumbList"],
        optional_schemas: &["AggregateRating", "Review", "FAQPage", "Offer"],
    },
    PageTypeIndicator {
        name: "category",
        url_patterns: &[r"/category/", r"/c/", r"/collection/", r"/collections/"],
        expected_schemas: &["ItemList", "BreadcrumbList", "CollectionPage"],
        optional_schemas: &["FAQPage", "Product"],
    },
    PageTypeIndicator {
        name: "blog_home",
        url_patterns: &[r"/blog/?$", r"/articles/?$", r"/news/?$"],
        expected_schemas: &["Blog", "BreadcrumbList", "ItemList"],
        optional_schemas: &["Organization"],
    },
    PageTypeIndicator {
        name: "article",
        url_patterns: &[r"/blog/", r"/article/", r"/articles/", r"/post/", r"/news/"],
        expected_schemas: &["Article", "BreadcrumbList", "WebPage"],
        optional_schemas: &["Person", "FAQPage", "HowTo", "VideoObject"],
    },
    PageTypeIndicator {
        name: "faq",
        url_patterns: &[r"/faq", r"/help/", r"/support/", r"/questions/"],
        expected_schemas: &["FAQPage", "BreadcrumbList"],
        optional_schemas: &["HowTo", "Article"],
    },
    PageTypeIndicator {
        name: "howto",
        url_patterns: &[r"/how-to/", r"/guide/", r"/tutorial/"],
        expected_schemas: &["HowTo", "BreadcrumbList"],
        optional_schemas: &["Article", "VideoObject", "FAQPage"],
    },
    PageTypeIndicator {
        name: "recipe",
        url_patterns: &[r"/recipe/", r"/recipes/"],
        expected_schemas: &["Recipe", "BreadcrumbList"],
        optional_schemas: &["VideoObject", "AggregateRating"],
    },
    PageTypeIndicator {
        name: "event",
        url_patterns: &[r"/event/", r"/events/", r"/webinar/", r"/conference/"],
        expected_schemas: &["Event", "BreadcrumbList"],
        optional_schemas: &["Organization", "Offer"],
    },
    PageTypeIndicator {
        name: "job",
        url_patterns: &[r"/job/", r"/jobs/", r"/career/", r"/careers/", r"/position/"],
        expected_schemas: &["JobPosting", "BreadcrumbList"],
        optional_schemas: &["Organization"],
    },
    PageTypeIndicator {
        name: "course",
        url_patterns: &[r"/course/", r"/courses/", r"/training/"],
        expected_schemas: &["Course", "BreadcrumbList"],
        optional_schemas: &["Organization", "VideoObject", "FAQPage"],
    },
    PageTypeIndicator {
        name: "video",
        url_patterns: &[r"/video/", r"/videos/", r"/watch/"],
        expected_schemas: &["VideoObject", "BreadcrumbList"],
        optional_schemas: &["Article", "HowTo", "Course"],
    },
    PageTypeIndicator {
        name: "podcast",
        url_patterns: &[r"/podcast/", r"/episode/"],
        expected_schemas: &["PodcastEpisode", "BreadcrumbList"],
        optional_schemas: &["PodcastSeries", "Person", "Organization"],
    },
    PageTypeIndicator {
        name: "person",
        url_patterns: &[r"/author/", r"/team/", r"/staff/", r"/profile/"],
        expected_schemas: &["Person", "WebPage", "BreadcrumbList"],
        optional_schemas: &["Organization", "Article"],
    },
    PageTypeIndicator {
        name: "local_business",
        url_patterns: &[r"/location/", r"/store/", r"/branch/"],
        expected_schemas: &["LocalBusiness", "Organization", "BreadcrumbList"],
        optional_schemas: &["FAQPage", "AggregateRating", "Review"],
    },
    PageTypeIndicator {
        name: "restaurant",
        url_patterns: &[r"/restaurant/", r"/dining/", r"/menu/"],
        expected_schemas: &["Restaurant", "BreadcrumbList"],
        optional_schemas: &["FAQPage", "AggregateRating", "Review"],
    },
    PageTypeIndicator {
        name: "hotel",
        url_patterns: &[r"/hotel/", r"/resort/", r"/accommodation/"],
        expected_schemas: &["Hotel", "BreadcrumbList"],
        optional_schemas: &["FAQPage", "AggregateRating", "Review", "Offer"],
    },
];

/// Types that, when already declared, decide the page type if the URL did not.
const TYPE_FALLBACKS: &[(&[&str], &str)] = &[
    (&["Product"], "product"),
    (&["Article", "NewsArticle", "BlogPosting"], "article"),
    (&["Recipe"], "recipe"),
    (&["LocalBusiness"], "local_business"),
    (&["Event"], "event"),
    (&["JobPosting"], "job"),
    (&["FAQPage"], "faq"),
    (&["VideoObject"], "video"),
];

fn compiled() -> &'static [(usize, Regex)] {
    static COMPILED: OnceLock<Vec<(usize, Regex)>> = OnceLock::new();
    COMPILED.get_or_init(|| {
        INDICATORS
            .iter()
            .enumerate()
            .flat_map(|(i, indicator)| {
                indicator
                    .url_patterns
                    .iter()
                    .filter_map(move |p| Regex::new(p).ok().map(|re| (i, re)))
            })
            .collect()
    })
}

/// Looks up the indicator of a page type by name.
pub fn indicator(name: &str) -> Option<&'static PageTypeIndicator> {
    INDICATORS.iter().find(|i| i.name == name)
}

/// Detects the page type of a URL, consulting the declared types when no URL
/// pattern matches. Returns `"generic"` when nothing applies.
pub fn detect_page_type(url: &str, types_found: &[String]) -> &'static str {
    let lower = url.to_lowercase();
    if let Some((i, _)) = compiled().iter().find(|(_, re)| re.is_match(&lower)) {
        return INDICATORS[*i].name;
    }

    let declares = |t: &str| types_found.iter().any(|found| found == t);
    for (types, page_type) in TYPE_FALLBACKS {
        if types.iter().any(|t| declares(t)) {
            return page_type;
        }
    }
    if types_found.iter().any(|t| t.ends_with("Business")) {
        return "local_business";
    }
    GENERIC_PAGE_TYPE
}

/// True when `present` fulfils an expectation for `expected`.
///
/// Any `*Organization` or `*Business` type stands in for `Organization`, and
/// the article subtypes stand in for `Article`.
pub fn satisfies(expected: &str, present: &str) -> bool {
    if expected == present {
        return true;
    }
    match expected {
        "Organization" => present.ends_with("Organization") || present.ends_with("Business"),
        "Article" => matches!(present, "NewsArticle" | "BlogPosting" | "TechArticle"),
        "LocalBusiness" => {
            present.ends_with("Business") || present == "Restaurant" || present == "Hotel"
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_pattern_compiles() {
        let total: usize = INDICATORS.iter().map(|i| i.url_patterns.len()).sum();
        assert_eq!(compiled().len(), total);
    }

    #[test]
    fn detects_from_url() {
        assert_eq!(detect_page_type("https://example.com/", &[]), "homepage");
        assert_eq!(detect_page_type("https://example.com", &[]), "homepage");
        assert_eq!(detect_page_type("https://example.com/blog", &[]), "blog_home");
        assert_eq!(detect_page_type("https://example.com/blog/hello", &[]), "article");
        assert_eq!(detect_page_type("https://example.com/About-Us", &[]), "about");
    }

    #[test]
    fn falls_back_to_declared_types() {
        let types = vec!["BlogPosting".to_string()];
        assert_eq!(detect_page_type("https://example.com/x/y", &types), "article");
        let types = vec!["DaySpaBusiness".to_string()];
        assert_eq!(detect_page_type("https://example.com/x/y", &types), "local_business");
        assert_eq!(detect_page_type("https://example.com/x/y", &[]), "generic");
    }

    #[test]
    fn organization_is_satisfied_by_subtypes() {
        assert!(satisfies("Organization", "NGOOrganization"));
        assert!(satisfies("Organization", "LocalBusiness"));
        assert!(satisfies("Article", "BlogPosting"));
        assert!(!satisfies("Article", "WebPage"));
    }
}
