use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! slug_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };
}

slug_newtype!(ServiceSlug);
slug_newtype!(DocumentSlug);
slug_newtype!(ExpertSlug);

/// URL-safe identifier: lowercase ASCII letters, digits and single inner dashes.
pub fn is_valid_slug(value: &str) -> bool {
    !value.is_empty()
        && !value.starts_with('-')
        && !value.ends_with('-')
        && !value.contains("--")
        && value
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

pub const DEFAULT_COUNTRY_CODE: &str = "+970";

/// Dialling codes offered by the contact form, `(code, flag, country)`.
pub const DIAL_CODES: &[(&str, &str, &str)] = &[
    ("+970", "🇵🇸", "Palestine"),
    ("+1", "🇺🇸", "USA"),
    ("+44", "🇬🇧", "UK"),
    ("+971", "🇦🇪", "UAE"),
    ("+966", "🇸🇦", "Saudi Arabia"),
    ("+20", "🇪🇬", "Egypt"),
    ("+962", "🇯🇴", "Jordan"),
    ("+961", "🇱🇧", "Lebanon"),
    ("+963", "🇸🇾", "Syria"),
    ("+964", "🇮🇶", "Iraq"),
    ("+965", "🇰🇼", "Kuwait"),
    ("+968", "🇴🇲", "Oman"),
    ("+974", "🇶🇦", "Qatar"),
    ("+973", "🇧🇭", "Bahrain"),
    ("+212", "🇲🇦", "Morocco"),
    ("+213", "🇩🇿", "Algeria"),
    ("+216", "🇹🇳", "Tunisia"),
];

/// Structural arrangement used to render a service page.
///
/// Deserialisation never fails: `offsec` and `endpoint` are accepted as the
/// legacy names of `feature-list` and `comparison`, and any other tag falls
/// back to [`LayoutKind::FeatureList`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", from = "String")]
pub enum LayoutKind {
    #[default]
    FeatureList,
    Comparison,
    Accordion,
}

impl LayoutKind {
    pub const ALL: [LayoutKind; 3] = [
        LayoutKind::FeatureList,
        LayoutKind::Comparison,
        LayoutKind::Accordion,
    ];

    pub fn from_tag(tag: &str) -> Self {
        Self::parse_known(tag).unwrap_or_default()
    }

    pub fn is_known_tag(tag: &str) -> bool {
        Self::parse_known(tag).is_some()
    }

    pub fn as_tag(self) -> &'static str {
        match self {
            LayoutKind::FeatureList => "feature-list",
            LayoutKind::Comparison => "comparison",
            LayoutKind::Accordion => "accordion",
        }
    }

    fn parse_known(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "feature-list" | "offsec" => Some(LayoutKind::FeatureList),
            "comparison" | "endpoint" => Some(LayoutKind::Comparison),
            "accordion" => Some(LayoutKind::Accordion),
            _ => None,
        }
    }
}

impl From<String> for LayoutKind {
    fn from(value: String) -> Self {
        Self::from_tag(&value)
    }
}

impl fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IconToken {
    #[default]
    Shield,
    Smartphone,
    FileCheck,
    Server,
    Lock,
    GraduationCap,
    TrendingUp,
    Users,
    Award,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AccentToken {
    #[default]
    PurplePink,
    BlueCyan,
    GreenEmerald,
    OrangeRed,
    IndigoPurple,
    TealGreen,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavLink {
    pub label: String,
    pub href: String,
}

impl NavLink {
    pub fn new(label: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            href: href.into(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FooterLinks {
    #[serde(default)]
    pub quick_links: Vec<NavLink>,
    #[serde(default)]
    pub resources: Vec<NavLink>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostalAddress {
    pub street: String,
    pub city: String,
    pub country: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactDetails {
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub phone_secondary: Option<String>,
    pub address: PostalAddress,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SocialLinks {
    #[serde(default)]
    pub facebook: Option<String>,
    #[serde(default)]
    pub linkedin: Option<String>,
    #[serde(default)]
    pub instagram: Option<String>,
    #[serde(default)]
    pub github: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteInfo {
    pub name: String,
    pub tagline: String,
    pub description: String,
    pub url: String,
    pub og_image: String,
    pub contact: ContactDetails,
    #[serde(default)]
    pub social: SocialLinks,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallToAction {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_cta_button")]
    pub button_text: String,
    #[serde(default = "default_cta_link")]
    pub button_link: String,
}

fn default_cta_button() -> String {
    "Contact Us".to_string()
}

fn default_cta_link() -> String {
    "/contact".to_string()
}

impl Default for CallToAction {
    fn default() -> Self {
        Self {
            title: "Provide Services".to_string(),
            description: String::new(),
            button_text: default_cta_button(),
            button_link: default_cta_link(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccordionEntry {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkCard {
    pub title: String,
    pub description: String,
    pub button_text: String,
    #[serde(default)]
    pub button_link: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DynamicSection {
    Carousel {
        #[serde(default)]
        badge: Option<String>,
        title: String,
        #[serde(default)]
        subtitle: Option<String>,
        cards: Vec<LinkCard>,
    },
    Grid {
        title: String,
        #[serde(default)]
        subtitle: Option<String>,
        cards: Vec<LinkCard>,
    },
    Highlighted {
        title: String,
        content: String,
        button_text: String,
        button_link: String,
    },
}

impl DynamicSection {
    pub fn cards(&self) -> &[LinkCard] {
        match self {
            DynamicSection::Carousel { cards, .. } | DynamicSection::Grid { cards, .. } => cards,
            DynamicSection::Highlighted { .. } => &[],
        }
    }
}

/// A service offering. Identity is the slug.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: String,
    pub slug: ServiceSlug,
    pub title: String,
    pub short_title: String,
    pub description: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub benefits: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub layout: LayoutKind,
    #[serde(default)]
    pub icon: IconToken,
    #[serde(default)]
    pub accent: AccentToken,
    pub hero_image: String,
    pub cta_image: String,
    #[serde(default)]
    pub cta: CallToAction,
    #[serde(default)]
    pub intro: Option<String>,
    #[serde(default)]
    pub accordion: Vec<AccordionEntry>,
    #[serde(default)]
    pub sections: Vec<DynamicSection>,
}

impl ContentItem {
    pub fn href(&self) -> String {
        format!("/services/{}", self.slug)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub slug: DocumentSlug,
    pub title: String,
    pub filename: String,
    pub description: String,
    #[serde(default = "default_document_back_link")]
    pub back_link: NavLink,
}

fn default_document_back_link() -> NavLink {
    NavLink::new("Back to Services", "/services")
}

impl DocumentRecord {
    pub fn href(&self) -> String {
        format!("/documents/{}", self.slug)
    }

    pub fn file_url(&self) -> String {
        format!("/assets/documents/{}", self.filename)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expert {
    pub slug: ExpertSlug,
    pub name: String,
    pub role: String,
    pub headline: String,
    pub image: String,
    #[serde(default)]
    pub bio: Vec<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub certifications: Vec<String>,
    #[serde(default)]
    pub social: SocialLinks,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartnerLogo {
    pub name: String,
    pub image: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stat {
    pub value: String,
    pub label: String,
    #[serde(default)]
    pub icon: IconToken,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Tagged {
        layout: LayoutKind,
    }

    #[test]
    fn layout_tags_and_aliases_resolve() {
        assert_eq!(LayoutKind::from_tag("accordion"), LayoutKind::Accordion);
        assert_eq!(LayoutKind::from_tag("Comparison"), LayoutKind::Comparison);
        assert_eq!(LayoutKind::from_tag("endpoint"), LayoutKind::Comparison);
        assert_eq!(LayoutKind::from_tag("offsec"), LayoutKind::FeatureList);
        assert!(LayoutKind::is_known_tag(" feature-list "));
    }

    #[test]
    fn unknown_layout_tag_falls_back_to_feature_list() {
        assert_eq!(LayoutKind::from_tag("carousel-grid"), LayoutKind::FeatureList);
        assert!(!LayoutKind::is_known_tag("carousel-grid"));

        let parsed: Tagged = toml::from_str("layout = \"timeline\"").expect("toml");
        assert_eq!(parsed.layout, LayoutKind::FeatureList);
    }

    #[test]
    fn layout_serialises_as_canonical_tag() {
        for kind in LayoutKind::ALL {
            let json = serde_json::to_string(&kind).expect("json");
            assert_eq!(json, format!("\"{}\"", kind.as_tag()));
        }
    }

    #[test]
    fn slug_shape_is_checked() {
        assert!(is_valid_slug("threatdown-vs-sophos"));
        assert!(is_valid_slug("mssp"));
        assert!(!is_valid_slug(""));
        assert!(!is_valid_slug("Bad-Slug"));
        assert!(!is_valid_slug("-leading"));
        assert!(!is_valid_slug("double--dash"));
        assert!(!is_valid_slug("with space"));
    }

    #[test]
    fn document_urls_are_derived_from_slug_and_filename() {
        let doc = DocumentRecord {
            slug: DocumentSlug::new("threatdown-vs-sophos"),
            title: "ThreatDown vs Sophos Comparison".into(),
            filename: "Battlecard-Sophos.pdf".into(),
            description: String::new(),
            back_link: default_document_back_link(),
        };
        assert_eq!(doc.href(), "/documents/threatdown-vs-sophos");
        assert_eq!(doc.file_url(), "/assets/documents/Battlecard-Sophos.pdf");
    }
}
