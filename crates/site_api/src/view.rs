//! Serializable view models handed to templates.

use std::collections::BTreeMap;

use serde::Serialize;
use shared::domain::{ContentItem, NavLink, SocialLinks, Stat};

use crate::{
    document::ViewerView,
    layout::{SectionView, ServiceLayout},
    style::{accent_class, accent_gradient, icon_svg},
};

#[derive(Debug, Clone, Serialize)]
pub struct NavItem {
    pub label: String,
    pub href: String,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct FooterView {
    pub description: String,
    pub quick_links: Vec<NavLink>,
    pub resources: Vec<NavLink>,
    pub services: Vec<NavLink>,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub social: SocialLinks,
    pub year: i32,
}

/// Everything the shared page shell needs.
#[derive(Debug, Clone, Serialize)]
pub struct Chrome {
    pub site_name: String,
    pub tagline: String,
    pub page_title: String,
    pub description: String,
    pub canonical_url: String,
    pub og_image: String,
    pub navigation: Vec<NavItem>,
    pub footer: FooterView,
    pub autoplay_ms: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Crumb {
    pub label: String,
    pub href: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HeroView {
    pub title: String,
    pub background: String,
    pub breadcrumbs: Vec<Crumb>,
}

impl HeroView {
    pub fn new(title: &str, background: &str, trail: &[(&str, Option<&str>)]) -> Self {
        Self {
            title: title.to_string(),
            background: background.to_string(),
            breadcrumbs: trail
                .iter()
                .map(|(label, href)| Crumb {
                    label: (*label).to_string(),
                    href: href.map(str::to_string),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ServiceCardView {
    pub title: String,
    pub short_title: String,
    pub description: String,
    pub href: String,
    pub icon_svg: String,
    pub accent_class: &'static str,
    pub accent_gradient: &'static str,
    pub tags: Vec<String>,
}

impl From<&ContentItem> for ServiceCardView {
    fn from(item: &ContentItem) -> Self {
        Self {
            title: item.title.clone(),
            short_title: item.short_title.clone(),
            description: item.description.clone(),
            href: item.href(),
            icon_svg: icon_svg(item.icon),
            accent_class: accent_class(item.accent),
            accent_gradient: accent_gradient(item.accent),
            tags: item.tags.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StatView {
    pub value: String,
    pub label: String,
    pub icon_svg: String,
}

impl From<&Stat> for StatView {
    fn from(stat: &Stat) -> Self {
        Self {
            value: stat.value.clone(),
            label: stat.label.clone(),
            icon_svg: icon_svg(stat.icon),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LogoSlot {
    pub name: String,
    pub image: String,
    pub css_class: &'static str,
    pub visible: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct LogoCarouselView {
    pub slots: Vec<LogoSlot>,
    pub current: usize,
    pub prev_href: String,
    pub next_href: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewsletterView {
    pub title: String,
    pub subtitle: String,
    pub email: String,
    pub error: Option<String>,
    pub subscribed: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct HomeHeroView {
    pub background: String,
    pub lead: String,
    pub phrases: Vec<String>,
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AboutPreviewView {
    pub title: String,
    pub text: String,
    pub image: String,
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HomeView {
    pub hero: HomeHeroView,
    pub partners: Option<LogoCarouselView>,
    pub about: AboutPreviewView,
    pub services: Vec<ServiceCardView>,
    pub stats: Vec<StatView>,
    pub newsletter: NewsletterView,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServicesView {
    pub hero: HeroView,
    pub services: Vec<ServiceCardView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CtaView {
    pub title: String,
    pub description: String,
    pub button_text: String,
    pub button_link: String,
    pub image: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServiceView {
    pub hero: HeroView,
    pub title: String,
    pub accent_class: &'static str,
    pub layout: ServiceLayout,
    pub cta: CtaView,
    pub sections: Vec<SectionView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MetricView {
    pub label: String,
    pub percentage: u8,
}

#[derive(Debug, Clone, Serialize)]
pub struct CapabilityView {
    pub title: String,
    pub text: String,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExpertView {
    pub name: String,
    pub role: String,
    pub headline: String,
    pub image: String,
    pub bio: Vec<String>,
    pub skills: Vec<String>,
    pub certifications: Vec<String>,
    pub social: SocialLinks,
    pub position: usize,
    pub total: usize,
    pub prev_href: Option<String>,
    pub next_href: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AboutView {
    pub hero: HeroView,
    pub founders_message: Vec<String>,
    pub about_us: Vec<String>,
    pub why_title: String,
    pub why_metrics: Vec<MetricView>,
    pub why_cards: Vec<CapabilityView>,
    pub expert: Option<ExpertView>,
    pub stats: Vec<StatView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DialOption {
    pub code: &'static str,
    pub flag: &'static str,
    pub country: &'static str,
    pub selected: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContactFormView {
    pub values: BTreeMap<String, String>,
    pub errors: BTreeMap<String, String>,
    pub dial_codes: Vec<DialOption>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContactInfoView {
    pub email: String,
    pub phone: String,
    pub phone_secondary: Option<String>,
    pub address: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContactView {
    pub hero: HeroView,
    pub info: ContactInfoView,
    pub form: ContactFormView,
    pub sent: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct DocumentView {
    pub title: String,
    pub description: String,
    pub back_link: NavLink,
    pub viewer: ViewerView,
}

#[derive(Debug, Clone, Serialize)]
pub struct NotFoundView {
    pub path: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum PageBody {
    Home(HomeView),
    Services(ServicesView),
    Service(ServiceView),
    About(AboutView),
    Contact(ContactView),
    Document(DocumentView),
    NotFound(NotFoundView),
}

impl PageBody {
    pub fn template(&self) -> &'static str {
        match self {
            PageBody::Home(_) => "home",
            PageBody::Services(_) => "services",
            PageBody::Service(_) => "service",
            PageBody::About(_) => "about",
            PageBody::Contact(_) => "contact",
            PageBody::Document(_) => "document",
            PageBody::NotFound(_) => "not_found",
        }
    }
}

/// A fully assembled page, ready for the renderer.
#[derive(Debug, Clone, Serialize)]
pub struct Page {
    pub chrome: Chrome,
    pub body: PageBody,
}

impl Page {
    pub fn is_not_found(&self) -> bool {
        matches!(self.body, PageBody::NotFound(_))
    }

    pub fn template(&self) -> &'static str {
        self.body.template()
    }
}
