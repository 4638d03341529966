//! Page assembly: content + request options + component state → [`Page`].

use std::time::Duration;

use chrono::{Datelike, Utc};
use content::ContentRegistry;
use shared::{
    domain::{DocumentRecord, NavLink, DIAL_CODES},
    error::SiteError,
};
use tracing::debug;
use ui_state::{CarouselState, FormState, DEFAULT_AUTOPLAY_INTERVAL};

use crate::{
    document::{viewer_for, ViewerView},
    layout::{dispatch, section_views},
    query::ViewOptions,
    route::Route,
    view::{
        AboutPreviewView, AboutView, CapabilityView, Chrome, ContactFormView, ContactInfoView,
        ContactView, CtaView, DialOption, DocumentView, ExpertView, FooterView, HeroView,
        HomeHeroView, HomeView, LogoCarouselView, LogoSlot, MetricView, NavItem, NewsletterView,
        NotFoundView, Page, PageBody, ServiceCardView, ServiceView, ServicesView, StatView,
    },
};

/// Builds pages against one content registry.
#[derive(Debug, Clone, Copy)]
pub struct PageBuilder<'a> {
    registry: &'a ContentRegistry,
    public_url: Option<&'a str>,
    autoplay: Duration,
}

/// Carousel starting at `requested`, or at the first item when the request is
/// missing or out of range.
fn carousel_at(len: usize, requested: Option<usize>) -> CarouselState {
    match requested.map(|index| CarouselState::starting_at(len, index)) {
        Some(Ok(state)) => state,
        Some(Err(err)) => {
            debug!(%err, "ignoring carousel position");
            CarouselState::new(len)
        }
        None => CarouselState::new(len),
    }
}

impl<'a> PageBuilder<'a> {
    pub fn new(registry: &'a ContentRegistry) -> Self {
        Self {
            registry,
            public_url: None,
            autoplay: DEFAULT_AUTOPLAY_INTERVAL,
        }
    }

    /// Base URL for canonical links; defaults to the site URL in content.
    pub fn with_public_url(mut self, public_url: &'a str) -> Self {
        self.public_url = Some(public_url);
        self
    }

    pub fn with_autoplay(mut self, interval: Duration) -> Self {
        self.autoplay = interval;
        self
    }

    pub fn registry(&self) -> &'a ContentRegistry {
        self.registry
    }

    fn chrome(&self, title: Option<&str>, description: Option<&str>, path: &str) -> Chrome {
        let site = self.registry.site();
        let base = self.public_url.unwrap_or(site.url.as_str()).trim_end_matches('/');
        let address = &site.contact.address;

        Chrome {
            site_name: site.name.clone(),
            tagline: site.tagline.clone(),
            page_title: match title {
                Some(title) => format!("{title} | {}", site.name),
                None => format!("{} | {}", site.name, site.tagline),
            },
            description: description.unwrap_or(site.description.as_str()).to_string(),
            canonical_url: format!("{base}{path}"),
            og_image: site.og_image.clone(),
            navigation: self
                .registry
                .navigation()
                .iter()
                .map(|link| NavItem {
                    label: link.label.clone(),
                    href: link.href.clone(),
                    active: is_active(&link.href, path),
                })
                .collect(),
            footer: FooterView {
                description: site.description.clone(),
                quick_links: self.registry.footer().quick_links.clone(),
                resources: self.registry.footer().resources.clone(),
                services: self
                    .registry
                    .services()
                    .iter()
                    .map(|item| NavLink::new(item.title.clone(), item.href()))
                    .collect(),
                email: site.contact.email.clone(),
                phone: site.contact.phone.clone(),
                address: format!("{}, {}, {}", address.street, address.city, address.country),
                social: site.social.clone(),
                year: Utc::now().year(),
            },
            autoplay_ms: u64::try_from(self.autoplay.as_millis()).unwrap_or(u64::MAX),
        }
    }

    fn stats(&self) -> Vec<StatView> {
        self.registry.stats().iter().map(StatView::from).collect()
    }

    fn service_cards(&self) -> Vec<ServiceCardView> {
        self.registry
            .services()
            .iter()
            .map(ServiceCardView::from)
            .collect()
    }

    /// Partner logos around the requested slide; `None` when there are no
    /// partners, so no carousel or autoplay root is rendered.
    fn partner_carousel(&self, slide: Option<usize>) -> Option<LogoCarouselView> {
        let partners = self.registry.partners();
        let carousel = carousel_at(partners.len(), slide);
        if carousel.is_empty() {
            return None;
        }

        let mut prev = carousel.clone();
        prev.retreat();
        let mut next = carousel.clone();
        next.advance();

        let slots = partners
            .iter()
            .enumerate()
            .filter_map(|(index, partner)| {
                carousel.position_of(index).map(|position| LogoSlot {
                    name: partner.name.clone(),
                    image: partner.image.clone(),
                    css_class: position.css_class(),
                    visible: position.is_visible(),
                })
            })
            .collect();

        Some(LogoCarouselView {
            slots,
            current: carousel.current_index(),
            prev_href: format!("/?slide={}", prev.current_index()),
            next_href: format!("/?slide={}", next.current_index()),
        })
    }

    pub fn home(&self, options: &ViewOptions, newsletter: &FormState) -> Page {
        let home = self.registry.home();
        let partners = self.partner_carousel(options.slide);

        Page {
            chrome: self.chrome(None, None, "/"),
            body: PageBody::Home(HomeView {
                hero: HomeHeroView {
                    background: home.hero_background.clone(),
                    lead: home.hero_lead.clone(),
                    phrases: home.hero_phrases.clone(),
                    text: home.hero_text.clone(),
                },
                partners,
                about: AboutPreviewView {
                    title: home.about_title.clone(),
                    text: home.about_text.clone(),
                    image: home.about_image.clone(),
                    highlights: home.about_highlights.clone(),
                },
                services: self.service_cards(),
                stats: self.stats(),
                newsletter: NewsletterView {
                    title: home.newsletter_title.clone(),
                    subtitle: home.newsletter_subtitle.clone(),
                    email: newsletter.value("email").unwrap_or_default().to_string(),
                    error: newsletter.error("email").map(str::to_string),
                    subscribed: options.subscribed,
                },
            }),
        }
    }

    pub fn services(&self) -> Page {
        Page {
            chrome: self.chrome(Some("Services"), None, "/services"),
            body: PageBody::Services(ServicesView {
                hero: HeroView::new(
                    "Our Services",
                    &self.registry.home().hero_background,
                    &[("Home", Some("/")), ("Services", None)],
                ),
                services: self.service_cards(),
            }),
        }
    }

    pub fn service(&self, slug: &str, options: &ViewOptions) -> Result<Page, SiteError> {
        let item = self.registry.require_service(slug)?;
        let layout = dispatch(item, self.registry, options);
        debug!(service = slug, layout = %layout.kind(), "dispatched service layout");

        Ok(Page {
            chrome: self.chrome(Some(&item.title), Some(&item.description), &item.href()),
            body: PageBody::Service(ServiceView {
                hero: HeroView::new(
                    &item.title,
                    &item.hero_image,
                    &[
                        ("Home", Some("/")),
                        ("Services", Some("/services")),
                        (item.short_title.as_str(), None),
                    ],
                ),
                title: item.title.clone(),
                accent_class: crate::style::accent_class(item.accent),
                layout,
                cta: CtaView {
                    title: item.cta.title.clone(),
                    description: item.cta.description.clone(),
                    button_text: item.cta.button_text.clone(),
                    button_link: item.cta.button_link.clone(),
                    image: item.cta_image.clone(),
                },
                sections: section_views(item, options),
            }),
        })
    }

    pub fn about(&self, options: &ViewOptions) -> Page {
        let about = self.registry.about();
        let experts = self.registry.experts();
        let carousel = carousel_at(experts.len(), options.expert);

        let expert = carousel.current().and_then(|index| {
            let expert = experts.get(index)?;
            let mut prev = carousel.clone();
            prev.retreat();
            let mut next = carousel.clone();
            next.advance();
            let many = experts.len() > 1;
            Some(ExpertView {
                name: expert.name.clone(),
                role: expert.role.clone(),
                headline: expert.headline.clone(),
                image: expert.image.clone(),
                bio: expert.bio.clone(),
                skills: expert.skills.clone(),
                certifications: expert.certifications.clone(),
                social: expert.social.clone(),
                position: index + 1,
                total: experts.len(),
                prev_href: many.then(|| format!("/about?expert={}", prev.current_index())),
                next_href: many.then(|| format!("/about?expert={}", next.current_index())),
            })
        });

        Page {
            chrome: self.chrome(Some("About Us"), None, "/about"),
            body: PageBody::About(AboutView {
                hero: HeroView::new(
                    "About Us",
                    &about.hero_image,
                    &[("Home", Some("/")), ("About Us", None)],
                ),
                founders_message: about.founders_message.clone(),
                about_us: about.about_us.clone(),
                why_title: about.why_title.clone(),
                why_metrics: about
                    .why_metrics
                    .iter()
                    .map(|metric| MetricView {
                        label: metric.label.clone(),
                        percentage: metric.percentage.min(100),
                    })
                    .collect(),
                why_cards: about
                    .why_cards
                    .iter()
                    .map(|card| CapabilityView {
                        title: card.title.clone(),
                        text: card.text.clone(),
                        image: card.image.clone(),
                    })
                    .collect(),
                expert,
                stats: self.stats(),
            }),
        }
    }

    pub fn contact(&self, form: &FormState, sent: bool) -> Page {
        let contact = &self.registry.site().contact;
        let selected = form.value("country_code").unwrap_or_default();

        Page {
            chrome: self.chrome(Some("Contact Us"), None, "/contact"),
            body: PageBody::Contact(ContactView {
                hero: HeroView::new(
                    "Contact Us",
                    &self.registry.home().hero_background,
                    &[("Home", Some("/")), ("Contact Us", None)],
                ),
                info: ContactInfoView {
                    email: contact.email.clone(),
                    phone: contact.phone.clone(),
                    phone_secondary: contact.phone_secondary.clone(),
                    address: format!(
                        "{}, {}, {}",
                        contact.address.street, contact.address.city, contact.address.country
                    ),
                },
                form: ContactFormView {
                    values: form.snapshot(),
                    errors: form.errors().clone(),
                    dial_codes: DIAL_CODES
                        .iter()
                        .map(|&(code, flag, country)| DialOption {
                            code,
                            flag,
                            country,
                            selected: code == selected,
                        })
                        .collect(),
                },
                sent,
            }),
        }
    }

    /// `load` is the outcome of reading the PDF: its page count or why it
    /// could not be read.
    pub fn document(
        &self,
        slug: &str,
        options: &ViewOptions,
        load: impl FnOnce(&DocumentRecord) -> Result<u32, SiteError>,
    ) -> Result<Page, SiteError> {
        let record = self.registry.require_document(slug)?;
        let viewer = viewer_for(record, options, load(record));

        Ok(Page {
            chrome: self.chrome(Some(&record.title), Some(&record.description), &record.href()),
            body: PageBody::Document(DocumentView {
                title: record.title.clone(),
                description: record.description.clone(),
                back_link: record.back_link.clone(),
                viewer: ViewerView::new(&record.href(), &viewer),
            }),
        })
    }

    pub fn not_found(&self, path: &str) -> Page {
        Page {
            chrome: self.chrome(Some("Page Not Found"), None, path),
            body: PageBody::NotFound(NotFoundView {
                path: path.to_string(),
                message: "The page you are looking for does not exist or has been moved."
                    .to_string(),
            }),
        }
    }

    /// Builds the page for a GET of `route` with fresh form state.
    pub fn for_route(
        &self,
        route: &Route,
        options: &ViewOptions,
        load_document: impl FnOnce(&DocumentRecord) -> Result<u32, SiteError>,
    ) -> Result<Page, SiteError> {
        match route.clone().require(self.registry)? {
            Route::Home => Ok(self.home(options, &FormState::newsletter())),
            Route::Services => Ok(self.services()),
            Route::Service(slug) => self.service(slug.as_str(), options),
            Route::About => Ok(self.about(options)),
            Route::Contact => Ok(self.contact(&FormState::contact(), options.sent)),
            Route::Document(slug) => self.document(slug.as_str(), options, load_document),
            Route::NotFound(path) => Ok(self.not_found(&path)),
        }
    }
}

fn is_active(href: &str, path: &str) -> bool {
    if href == "/" {
        path == "/"
    } else {
        path == href || path.starts_with(&format!("{href}/"))
    }
}

#[cfg(test)]
#[path = "tests/page_tests.rs"]
mod tests;
