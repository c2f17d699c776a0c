//! # Rich Results Requirements
//!
//! Required and recommended properties per Schema.org type, following Google's
//! Rich Results documentation. Field order within each list is significant: it
//! is the order in which missing fields are reported.

/// The requirement set of a single Schema.org type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Requirement {
    pub schema_type: &'static str,
    pub required: &'static [&'static str],
    pub recommended: &'static [&'static str],
    /// The search feature unlocked by a valid instance, if any.
    pub rich_result: Option<&'static str>,
}

const fn req(
    schema_type: &'static str,
    required: &'static [&'static str],
    recommended: &'static [&'static str],
    rich_result: Option<&'static str>,
) -> Requirement {
    Requirement {
        schema_type,
        required,
        recommended,
        rich_result,
    }
}

const LOCAL_BUSINESS_RECOMMENDED: &[&str] = &[
    "telephone",
    "openingHoursSpecification",
    "image",
    "priceRange",
    "geo",
    "url",
    "aggregateRating",
];

pub const REQUIREMENTS: &[Requirement] = &[
    req(
        "Product",
        &["name"],
        &["image", "description", "brand", "sku", "gtin", "mpn", "offers"],
        Some("Product Snippets / Merchant Listings"),
    ),
    req(
        "Article",
        &["headline", "image", "datePublished", "author"],
        &["dateModified", "publisher", "description", "mainEntityOfPage"],
        Some("Article Rich Results"),
    ),
    req(
        "NewsArticle",
        &["headline", "image", "datePublished", "author"],
        &["dateModified", "publisher", "description", "isAccessibleForFree"],
        Some("Top Stories / News Rich Results"),
    ),
    req(
        "BlogPosting",
        &["headline", "image", "datePublished", "author"],
        &["dateModified", "publisher", "description", "wordCount"],
        Some("Article Rich Results"),
    ),
    req(
        "LocalBusiness",
        &["name", "address"],
        LOCAL_BUSINESS_RECOMMENDED,
        Some("Local Business Panel / Maps"),
    ),
    req(
        "Organization",
        &["name"],
        &["logo", "url", "sameAs", "contactPoint", "address", "description"],
        Some("Knowledge Panel"),
    ),
    req(
        "FAQPage",
        &["mainEntity"],
        &[],
        Some("FAQ Rich Results"),
    ),
    req(
        "HowTo",
        &["name", "step"],
        &["image", "totalTime", "estimatedCost", "supply", "tool"],
        Some("How-To Rich Results"),
    ),
    req(
        "Recipe",
        &["name", "image"],
        &[
            "author",
            "datePublished",
            "description",
            "prepTime",
            "cookTime",
            "totalTime",
            "recipeYield",
            "recipeIngredient",
            "recipeInstructions",
            "nutrition",
            "aggregateRating",
            "video",
        ],
        Some("Recipe Rich Results"),
    ),
    req(
        "Event",
        &["name", "startDate", "location"],
        &[
            "endDate",
            "image",
            "description",
            "offers",
            "performer",
            "organizer",
            "eventStatus",
            "eventAttendanceMode",
        ],
        Some("Event Rich Results"),
    ),
    req(
        "VideoObject",
        &["name", "description", "thumbnailUrl", "uploadDate"],
        &["duration", "contentUrl", "embedUrl", "interactionStatistic", "expires"],
        Some("Video Rich Results / Video Carousel"),
    ),
    req(
        "WebSite",
        &["name", "url"],
        &["potentialAction", "publisher", "inLanguage"],
        Some("Sitelinks Search Box"),
    ),
    req(
        "WebPage",
        &[],
        &[
            "name",
            "description",
            "datePublished",
            "dateModified",
            "isPartOf",
            "primaryImageOfPage",
        ],
        None,
    ),
    req(
        "AboutPage",
        &[],
        &["name", "description", "mainEntity", "isPartOf"],
        None,
    ),
    req(
        "ContactPage",
        &[],
        &["name", "description", "mainEntity", "isPartOf"],
        None,
    ),
    req(
        "BreadcrumbList",
        &["itemListElement"],
        &[],
        Some("Breadcrumb Trail"),
    ),
    req(
        "JobPosting",
        &[
            "title",
            "description",
            "datePosted",
            "hiringOrganization",
            "jobLocation",
        ],
        &[
            "validThrough",
            "employmentType",
            "baseSalary",
            "identifier",
            "applicantLocationRequirements",
        ],
        Some("Job Posting Rich Results"),
    ),
    req(
        "Review",
        &["itemReviewed", "author"],
        &["reviewRating", "datePublished", "reviewBody"],
        Some("Review Snippet"),
    ),
    req(
        "AggregateRating",
        &["ratingValue", "ratingCount"],
        &["bestRating", "worstRating", "reviewCount"],
        Some("Star Ratings"),
    ),
    req(
        "Course",
        &["name", "description", "provider"],
        &[
            "offers",
            "hasCourseInstance",
            "coursePrerequisites",
            "educationalLevel",
        ],
        Some("Course Rich Results"),
    ),
    req(
        "SoftwareApplication",
        &["name", "offers"],
        &[
            "operatingSystem",
            "applicationCategory",
            "aggregateRating",
            "screenshot",
        ],
        Some("Software App Rich Results"),
    ),
    req(
        "Person",
        &["name"],
        &["image", "url", "sameAs", "jobTitle", "worksFor", "description"],
        Some("Knowledge Panel (notable persons)"),
    ),
    req(
        "Book",
        &["name", "author"],
        &[
            "isbn",
            "bookFormat",
            "numberOfPages",
            "publisher",
            "datePublished",
            "aggregateRating",
        ],
        Some("Book Rich Results"),
    ),
    req(
        "Movie",
        &["name"],
        &[
            "image",
            "dateCreated",
            "director",
            "actor",
            "aggregateRating",
            "review",
            "duration",
        ],
        Some("Movie Carousel"),
    ),
    req(
        "ItemList",
        &["itemListElement"],
        &["numberOfItems", "name"],
        Some("Carousel Rich Results"),
    ),
    req(
        "Service",
        &["name", "provider"],
        &[
            "description",
            "serviceType",
            "areaServed",
            "offers",
            "aggregateRating",
            "hasOfferCatalog",
        ],
        Some("Service Rich Results"),
    ),
    req(
        "Offer",
        &["price", "priceCurrency"],
        &["availability", "url", "priceValidUntil", "itemCondition", "seller"],
        None,
    ),
    req(
        "Restaurant",
        &["name", "address"],
        &[
            "servesCuisine",
            "menu",
            "telephone",
            "openingHoursSpecification",
            "image",
            "priceRange",
            "aggregateRating",
            "review",
            "acceptsReservations",
            "geo",
        ],
        Some("Restaurant Rich Results / Local Pack"),
    ),
    req(
        "Hotel",
        &["name", "address"],
        &[
            "telephone",
            "checkinTime",
            "checkoutTime",
            "image",
            "priceRange",
            "aggregateRating",
            "review",
            "amenityFeature",
            "starRating",
            "numberOfRooms",
            "petsAllowed",
        ],
        Some("Hotel Rich Results"),
    ),
    req(
        "MedicalBusiness",
        &["name", "address"],
        &[
            "telephone",
            "openingHoursSpecification",
            "image",
            "medicalSpecialty",
            "aggregateRating",
            "review",
            "geo",
        ],
        Some("Medical Business Panel"),
    ),
    req(
        "ProfessionalService",
        &["name", "address"],
        &[
            "telephone",
            "image",
            "aggregateRating",
            "review",
            "areaServed",
            "hasOfferCatalog",
            "knowsAbout",
        ],
        Some("Local Business Panel"),
    ),
    req(
        "PodcastEpisode",
        &["name", "url"],
        &[
            "description",
            "datePublished",
            "duration",
            "associatedMedia",
            "partOfSeries",
            "episodeNumber",
        ],
        Some("Podcast Episode Rich Results"),
    ),
    req(
        "PodcastSeries",
        &["name", "url"],
        &["description", "image", "author", "publisher", "webFeed"],
        Some("Podcast Series Rich Results"),
    ),
    req(
        "MusicRecording",
        &["name"],
        &["byArtist", "inAlbum", "duration", "isrcCode", "datePublished"],
        Some("Music Rich Results"),
    ),
    req(
        "MusicAlbum",
        &["name", "byArtist"],
        &["image", "datePublished", "numTracks", "track", "genre"],
        Some("Music Album Rich Results"),
    ),
    req(
        "EducationalOrganization",
        &["name", "address"],
        &["telephone", "image", "url", "sameAs", "aggregateRating", "review"],
        Some("Educational Organization Panel"),
    ),
    req(
        "CreativeWork",
        &["name"],
        &["author", "datePublished", "description", "image"],
        None,
    ),
];

/// Looks up the requirement set of a type.
pub fn requirement_for(schema_type: &str) -> Option<&'static Requirement> {
    REQUIREMENTS.iter().find(|r| r.schema_type == schema_type)
}

/// The rich result unlocked by a type, if the type is known to unlock one.
pub fn rich_result_for(schema_type: &str) -> Option<&'static str> {
    requirement_for(schema_type).and_then(|r| r.rich_result)
}
