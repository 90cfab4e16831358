//! Static lookup tables for the detector layers.
//!
//! Immutable configuration data: per-site selector sequences for
//! high-traffic job boards, generic selector conventions, and the keyword
//! lists the text-analysis layer matches against. Owned by the detector
//! module; nothing here is mutable at runtime.

/// Ordered selector candidates for one known job site.
///
/// `host` is matched as a hostname substring. Selector lists are tried in
/// order; the first one yielding non-empty visible text wins for its field.
pub struct SiteSelectors {
    pub host: &'static str,
    pub company: &'static [&'static str],
    pub title: &'static [&'static str],
    pub location: &'static [&'static str],
    pub description: &'static [&'static str],
}

/// Known high-traffic job sites, in match-priority order.
pub static SITE_SELECTORS: &[SiteSelectors] = &[
    SiteSelectors {
        host: "linkedin.com",
        company: &[
            ".topcard__org-name-link",
            ".top-card-layout__company-url",
            ".topcard__flavor a",
        ],
        title: &[
            ".topcard__title",
            ".top-card-layout__title",
            "h1.t-24",
        ],
        location: &[
            ".topcard__flavor--bullet",
            ".top-card-layout__second-subline .topcard__flavor",
        ],
        description: &[
            ".show-more-less-html__markup",
            ".description__text",
        ],
    },
    SiteSelectors {
        host: "indeed.com",
        company: &[
            "[data-testid=\"inlineHeader-companyName\"]",
            "[data-company-name=\"true\"]",
            ".jobsearch-CompanyInfoContainer a",
        ],
        title: &[
            "h1[data-testid=\"jobsearch-JobInfoHeader-title\"]",
            ".jobsearch-JobInfoHeader-title",
        ],
        location: &[
            "[data-testid=\"job-location\"]",
            "[data-testid=\"inlineHeader-companyLocation\"]",
        ],
        description: &["#jobDescriptionText"],
    },
    SiteSelectors {
        host: "glassdoor.com",
        company: &[
            "[data-test=\"employer-name\"]",
            ".EmployerProfile_employerName__Xemli",
        ],
        title: &["[data-test=\"job-title\"]", ".JobDetails_jobTitle__Rw_gn"],
        location: &["[data-test=\"location\"]", ".JobDetails_location__mSg5h"],
        description: &[
            "[data-test=\"jobDescriptionContent\"]",
            ".JobDetails_jobDescription__uW_fK",
        ],
    },
    SiteSelectors {
        host: "ziprecruiter.com",
        company: &["a.company_name", ".hiring_company_text", "[data-testid=\"company-name\"]"],
        title: &["h1.job_title", ".job_title", "[data-testid=\"job-title\"]"],
        location: &[".hiring_location", ".location_text", "[data-testid=\"job-location\"]"],
        description: &[".job_description", "[data-testid=\"job-description\"]"],
    },
    SiteSelectors {
        host: "greenhouse.io",
        company: &[".company-name", "#header .company-name"],
        title: &["h1.app-title", ".app-title", ".job__title h1"],
        location: &[".location", ".job__location"],
        description: &["#content", ".job__description"],
    },
    SiteSelectors {
        host: "lever.co",
        company: &[".main-header-text", ".posting-header .company-name"],
        title: &[".posting-headline h2", ".posting-header h2"],
        location: &[
            ".posting-categories .location",
            ".posting-category.location",
            ".sort-by-time.posting-category",
        ],
        description: &["[data-qa=\"job-description\"]", ".posting-page .section-wrapper"],
    },
];

/// Generic attribute/class conventions, tried site-independently.
pub static GENERIC_COMPANY_SELECTORS: &[&str] = &[
    "[itemprop=\"hiringOrganization\"]",
    "[data-company]",
    ".company-name",
    ".employer-name",
    "[class*=\"company-name\"]",
    "[class*=\"companyName\"]",
    "[class*=\"employer\"]",
];

pub static GENERIC_TITLE_SELECTORS: &[&str] = &[
    "[itemprop=\"title\"]",
    "[data-job-title]",
    ".job-title",
    ".jobTitle",
    "[class*=\"job-title\"]",
    "[class*=\"jobTitle\"]",
    "h1[class*=\"title\"]",
];

pub static GENERIC_LOCATION_SELECTORS: &[&str] = &[
    "[itemprop=\"jobLocation\"]",
    "[data-location]",
    ".job-location",
    "[class*=\"job-location\"]",
    "[class*=\"jobLocation\"]",
    ".location",
];

pub static GENERIC_DESCRIPTION_SELECTORS: &[&str] = &[
    "[itemprop=\"description\"]",
    ".job-description",
    ".jobDescription",
    "#job-description",
    "[class*=\"job-description\"]",
    "[class*=\"jobDescription\"]",
];

/// Role keywords that mark a heading as a job title.
pub static JOB_TITLE_KEYWORDS: &[&str] = &[
    "engineer",
    "developer",
    "designer",
    "manager",
    "analyst",
    "specialist",
    "director",
    "coordinator",
    "consultant",
    "architect",
    "lead",
    "senior",
    "junior",
    "intern",
    "associate",
    "administrator",
    "technician",
    "officer",
];

/// Legal-entity suffixes that mark a capitalized span as a company name.
pub static LEGAL_SUFFIXES: &[&str] = &["Inc", "LLC", "Ltd", "Corp", "Corporation", "Company"];

/// Stopwords whose presence marks heading text as prose, not a name.
pub static SENTENCE_STOPWORDS: &[&str] = &["the", "a", "an", "is", "are", "was", "were"];

/// Common U.S. states matched as a last-resort location signal, in priority
/// order.
pub static US_STATES: &[&str] = &[
    "California",
    "Texas",
    "New York",
    "Florida",
    "Washington",
    "Illinois",
    "Pennsylvania",
    "Ohio",
    "Georgia",
    "Michigan",
    "North Carolina",
    "Massachusetts",
];

/// Subdomain labels stripped before deriving a company from the hostname.
pub static HOSTNAME_NOISE_LABELS: &[&str] =
    &["www", "jobs", "careers", "apply", "hiring", "work", "talent"];

/// Phrases that resolve a location to "Remote".
pub static REMOTE_PHRASES: &[&str] = &["remote", "work from home", "wfh"];
