//! Static content registry: services, documents, experts and page copy.
//!
//! The registry is built once at startup from TOML (the embedded
//! `content/site.toml` or an override file), validated, and then shared
//! read-only by every request.

use std::{
    collections::{HashMap, HashSet},
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use shared::{
    domain::{
        is_valid_slug, ContentItem, DocumentRecord, DynamicSection, Expert, FooterLinks,
        LayoutKind, NavLink, PartnerLogo, SiteInfo, Stat,
    },
    error::{ContentKind, SiteError},
};
use thiserror::Error;
use tracing::{debug, info, warn};

const BUILTIN_SOURCE: &str = include_str!("../content/site.toml");

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("failed to read content file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse content: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid {kind} slug '{slug}'")]
    InvalidSlug { kind: ContentKind, slug: String },
    #[error("duplicate {kind} slug '{slug}'")]
    DuplicateSlug { kind: ContentKind, slug: String },
    #[error("'{source_slug}' links to missing page '{href}'")]
    BrokenLink { source_slug: String, href: String },
    #[error("content defines no services")]
    NoServices,
}

impl From<ContentError> for SiteError {
    fn from(value: ContentError) -> Self {
        SiteError::Content(value.to_string())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressMetric {
    pub label: String,
    pub percentage: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapabilityCard {
    pub title: String,
    pub text: String,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HomeCopy {
    pub hero_background: String,
    pub hero_lead: String,
    pub hero_phrases: Vec<String>,
    pub hero_text: String,
    pub about_title: String,
    pub about_text: String,
    pub about_image: String,
    #[serde(default)]
    pub about_highlights: Vec<String>,
    pub newsletter_title: String,
    pub newsletter_subtitle: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AboutCopy {
    pub hero_image: String,
    #[serde(default)]
    pub founders_message: Vec<String>,
    #[serde(default)]
    pub about_us: Vec<String>,
    pub why_title: String,
    #[serde(default)]
    pub why_metrics: Vec<ProgressMetric>,
    #[serde(default)]
    pub why_cards: Vec<CapabilityCard>,
}

#[derive(Debug, Deserialize)]
struct ContentFile {
    site: SiteInfo,
    #[serde(default)]
    navigation: Vec<NavLink>,
    #[serde(default)]
    footer: FooterLinks,
    home: HomeCopy,
    about: AboutCopy,
    #[serde(default)]
    services: Vec<ContentItem>,
    #[serde(default)]
    documents: Vec<DocumentRecord>,
    #[serde(default)]
    experts: Vec<Expert>,
    #[serde(default)]
    partners: Vec<PartnerLogo>,
    #[serde(default)]
    stats: Vec<Stat>,
}

/// Raw layout tags, read alongside [`ContentFile`] so unknown ones can be
/// reported before [`LayoutKind`] folds them into the default.
#[derive(Debug, Deserialize)]
struct LayoutTags {
    #[serde(default)]
    services: Vec<ServiceTag>,
}

#[derive(Debug, Deserialize)]
struct ServiceTag {
    slug: String,
    #[serde(default)]
    layout: Option<String>,
}

/// `(slug, tag)` for every service whose layout tag is not recognised.
fn unknown_layout_tags(raw: &str) -> Result<Vec<(String, String)>, ContentError> {
    let tags: LayoutTags = toml::from_str(raw)?;
    Ok(tags
        .services
        .into_iter()
        .filter_map(|service| match service.layout {
            Some(tag) if !LayoutKind::is_known_tag(&tag) => Some((service.slug, tag)),
            _ => None,
        })
        .collect())
}

#[derive(Debug, Clone)]
pub struct ContentRegistry {
    site: SiteInfo,
    navigation: Vec<NavLink>,
    footer: FooterLinks,
    home: HomeCopy,
    about: AboutCopy,
    services: Vec<ContentItem>,
    service_index: HashMap<String, usize>,
    documents: Vec<DocumentRecord>,
    document_index: HashMap<String, usize>,
    experts: Vec<Expert>,
    partners: Vec<PartnerLogo>,
    stats: Vec<Stat>,
}

impl ContentRegistry {
    /// Registry built from the content compiled into the binary.
    pub fn builtin() -> Result<Self, ContentError> {
        Self::from_toml_str(BUILTIN_SOURCE)
    }

    pub fn builtin_source() -> &'static str {
        BUILTIN_SOURCE
    }

    pub fn load(path: &Path) -> Result<Self, ContentError> {
        let raw = fs::read_to_string(path).map_err(|source| ContentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let registry = Self::from_toml_str(&raw)?;
        info!(
            path = %path.display(),
            services = registry.services.len(),
            documents = registry.documents.len(),
            "loaded content file"
        );
        Ok(registry)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, ContentError> {
        let file: ContentFile = toml::from_str(raw)?;
        for (slug, tag) in unknown_layout_tags(raw)? {
            warn!(service = %slug, layout = %tag, "unknown layout tag, using feature-list");
        }
        Self::from_file(file)
    }

    fn from_file(file: ContentFile) -> Result<Self, ContentError> {
        if file.services.is_empty() {
            return Err(ContentError::NoServices);
        }

        let service_index = index_slugs(
            ContentKind::Service,
            file.services.iter().map(|s| s.slug.as_str()),
        )?;
        let document_index = index_slugs(
            ContentKind::Document,
            file.documents.iter().map(|d| d.slug.as_str()),
        )?;
        index_slugs(
            ContentKind::Expert,
            file.experts.iter().map(|e| e.slug.as_str()),
        )?;

        let registry = Self {
            site: file.site,
            navigation: file.navigation,
            footer: file.footer,
            home: file.home,
            about: file.about,
            services: file.services,
            service_index,
            documents: file.documents,
            document_index,
            experts: file.experts,
            partners: file.partners,
            stats: file.stats,
        };
        registry.check_links()?;
        debug!(
            services = registry.services.len(),
            documents = registry.documents.len(),
            experts = registry.experts.len(),
            "content registry ready"
        );
        Ok(registry)
    }

    /// Every internal `/services/..` or `/documents/..` link must resolve.
    fn check_links(&self) -> Result<(), ContentError> {
        for service in &self.services {
            let mut hrefs: Vec<&str> = vec![service.cta.button_link.as_str()];
            for section in &service.sections {
                if let DynamicSection::Highlighted { button_link, .. } = section {
                    hrefs.push(button_link);
                }
                hrefs.extend(
                    section
                        .cards()
                        .iter()
                        .filter_map(|card| card.button_link.as_deref()),
                );
            }
            for href in hrefs {
                if !self.resolves(href) {
                    return Err(ContentError::BrokenLink {
                        source_slug: service.slug.to_string(),
                        href: href.to_string(),
                    });
                }
            }
        }

        for document in &self.documents {
            if !self.resolves(&document.back_link.href) {
                return Err(ContentError::BrokenLink {
                    source_slug: document.slug.to_string(),
                    href: document.back_link.href.clone(),
                });
            }
        }
        Ok(())
    }

    fn resolves(&self, href: &str) -> bool {
        if let Some(slug) = href.strip_prefix("/services/") {
            return self.service(slug).is_some();
        }
        if let Some(slug) = href.strip_prefix("/documents/") {
            return self.document(slug).is_some();
        }
        true
    }

    pub fn site(&self) -> &SiteInfo {
        &self.site
    }

    pub fn navigation(&self) -> &[NavLink] {
        &self.navigation
    }

    pub fn footer(&self) -> &FooterLinks {
        &self.footer
    }

    pub fn home(&self) -> &HomeCopy {
        &self.home
    }

    pub fn about(&self) -> &AboutCopy {
        &self.about
    }

    pub fn services(&self) -> &[ContentItem] {
        &self.services
    }

    pub fn documents(&self) -> &[DocumentRecord] {
        &self.documents
    }

    pub fn experts(&self) -> &[Expert] {
        &self.experts
    }

    pub fn partners(&self) -> &[PartnerLogo] {
        &self.partners
    }

    pub fn stats(&self) -> &[Stat] {
        &self.stats
    }

    pub fn service(&self, slug: &str) -> Option<&ContentItem> {
        self.service_index
            .get(slug)
            .and_then(|&idx| self.services.get(idx))
    }

    pub fn require_service(&self, slug: &str) -> Result<&ContentItem, SiteError> {
        self.service(slug)
            .ok_or_else(|| SiteError::not_found(ContentKind::Service, slug))
    }

    pub fn document(&self, slug: &str) -> Option<&DocumentRecord> {
        self.document_index
            .get(slug)
            .and_then(|&idx| self.documents.get(idx))
    }

    pub fn require_document(&self, slug: &str) -> Result<&DocumentRecord, SiteError> {
        self.document(slug)
            .ok_or_else(|| SiteError::not_found(ContentKind::Document, slug))
    }

    pub fn expert_position(&self, slug: &str) -> Option<usize> {
        self.experts.iter().position(|e| e.slug.as_str() == slug)
    }

    /// Distinct documents referenced by a service's cards, in first-seen order.
    pub fn documents_linked_from(&self, item: &ContentItem) -> Vec<&DocumentRecord> {
        let mut seen = HashSet::new();
        item.sections
            .iter()
            .flat_map(|section| section.cards())
            .filter_map(|card| card.button_link.as_deref())
            .filter_map(|href| href.strip_prefix("/documents/"))
            .filter(|slug| seen.insert(*slug))
            .filter_map(|slug| self.document(slug))
            .collect()
    }
}

fn index_slugs<'a>(
    kind: ContentKind,
    slugs: impl Iterator<Item = &'a str>,
) -> Result<HashMap<String, usize>, ContentError> {
    let mut index = HashMap::new();
    for (position, slug) in slugs.enumerate() {
        if !is_valid_slug(slug) {
            return Err(ContentError::InvalidSlug {
                kind,
                slug: slug.to_string(),
            });
        }
        if index.insert(slug.to_string(), position).is_some() {
            return Err(ContentError::DuplicateSlug {
                kind,
                slug: slug.to_string(),
            });
        }
    }
    Ok(index)
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
