//! Service page layout dispatch.
//!
//! A service's [`LayoutKind`] selects exactly one [`ServiceLayout`] variant;
//! adding a layout kind is a compile error here until it is handled.

use content::ContentRegistry;
use serde::Serialize;
use shared::domain::{ContentItem, DynamicSection, LayoutKind, LinkCard};
use tracing::debug;
use ui_state::{AccordionState, Pagination};

use crate::query::ViewOptions;

/// Cards shown per page in a card carousel.
pub const CARDS_PER_PAGE: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TextBlock {
    Paragraph { text: String },
    List { items: Vec<String> },
}

/// Splits accordion copy into paragraphs on blank lines; `•` lines become
/// list items.
pub fn parse_rich_text(content: &str) -> Vec<TextBlock> {
    let mut blocks = Vec::new();
    let mut paragraph: Vec<&str> = Vec::new();
    let mut items: Vec<String> = Vec::new();

    fn flush_paragraph(paragraph: &mut Vec<&str>, blocks: &mut Vec<TextBlock>) {
        if !paragraph.is_empty() {
            blocks.push(TextBlock::Paragraph {
                text: paragraph.join(" "),
            });
            paragraph.clear();
        }
    }

    fn flush_items(items: &mut Vec<String>, blocks: &mut Vec<TextBlock>) {
        if !items.is_empty() {
            blocks.push(TextBlock::List {
                items: std::mem::take(items),
            });
        }
    }

    for line in content.lines().map(str::trim) {
        if line.is_empty() {
            flush_paragraph(&mut paragraph, &mut blocks);
            flush_items(&mut items, &mut blocks);
        } else if let Some(item) = line.strip_prefix('•') {
            flush_paragraph(&mut paragraph, &mut blocks);
            let item = item.trim();
            if !item.is_empty() {
                items.push(item.to_string());
            }
        } else {
            flush_items(&mut items, &mut blocks);
            paragraph.push(line);
        }
    }
    flush_paragraph(&mut paragraph, &mut blocks);
    flush_items(&mut items, &mut blocks);
    blocks
}

#[derive(Debug, Clone, Serialize)]
pub struct CardView {
    pub title: String,
    pub description: String,
    pub button_text: String,
    pub href: Option<String>,
}

impl From<&LinkCard> for CardView {
    fn from(card: &LinkCard) -> Self {
        Self {
            title: card.title.clone(),
            description: card.description.clone(),
            button_text: card.button_text.clone(),
            href: card.button_link.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PageDot {
    pub number: usize,
    pub href: String,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct CardCarouselView {
    pub badge: Option<String>,
    pub title: String,
    pub subtitle: Option<String>,
    pub cards: Vec<CardView>,
    pub page: usize,
    pub page_count: usize,
    pub prev_href: String,
    pub next_href: String,
    pub dots: Vec<PageDot>,
}

/// `base?a&b`, leaving out absent parameters.
fn href_with(base: &str, params: &[Option<String>]) -> String {
    let query: Vec<&str> = params.iter().flatten().map(String::as_str).collect();
    if query.is_empty() {
        base.to_string()
    } else {
        format!("{base}?{}", query.join("&"))
    }
}

fn open_param(open: impl IntoIterator<Item = usize>) -> Option<String> {
    let open: Vec<String> = open.into_iter().map(|index| index.to_string()).collect();
    (!open.is_empty()).then(|| format!("open={}", open.join(",")))
}

fn slide_param(slide: Option<usize>) -> Option<String> {
    slide.map(|slide| format!("slide={slide}"))
}

/// Page of cards selected by `?slide=`; an out-of-range slide shows page one.
/// Page links keep the accordion toggles of `options`.
pub fn card_carousel(
    base_href: &str,
    badge: Option<&str>,
    title: &str,
    subtitle: Option<&str>,
    cards: &[LinkCard],
    options: &ViewOptions,
) -> CardCarouselView {
    let open = open_param(options.open.iter().copied());
    let slide_href = |page: usize| href_with(base_href, &[slide_param(Some(page)), open.clone()]);

    let mut pages = Pagination::new(cards.len(), CARDS_PER_PAGE);
    if let Some(slide) = options.slide {
        if let Err(err) = pages.go_to(slide) {
            debug!(%err, "ignoring carousel slide");
        }
    }

    let mut prev = pages.clone();
    prev.prev();
    let mut next = pages.clone();
    next.next();

    CardCarouselView {
        badge: badge.map(str::to_string),
        title: title.to_string(),
        subtitle: subtitle.map(str::to_string),
        cards: cards[pages.visible_range()]
            .iter()
            .map(CardView::from)
            .collect(),
        page: pages.page() + 1,
        page_count: pages.page_count(),
        prev_href: slide_href(prev.page()),
        next_href: slide_href(next.page()),
        dots: (0..pages.page_count())
            .map(|page| PageDot {
                number: page + 1,
                href: slide_href(page),
                active: page == pages.page(),
            })
            .collect(),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AccordionSectionView {
    pub index: usize,
    pub title: String,
    pub open: bool,
    pub blocks: Vec<TextBlock>,
    /// Link that flips this section and keeps the others as they are.
    pub toggle_href: String,
}

fn accordion_sections(item: &ContentItem, options: &ViewOptions) -> Vec<AccordionSectionView> {
    let mut state = AccordionState::new(item.accordion.len());
    state.apply_toggles(options.open.iter().copied());
    let base = item.href();

    item.accordion
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let mut toggled = state.clone();
            toggled.toggle(index);
            let toggle_href = href_with(
                &base,
                &[open_param(toggled.open_indices()), slide_param(options.slide)],
            );
            AccordionSectionView {
                index,
                title: entry.title.clone(),
                open: state.is_open(index),
                blocks: parse_rich_text(&entry.content),
                toggle_href,
            }
        })
        .collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct DocumentLinkView {
    pub title: String,
    pub href: String,
    pub download_url: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ServiceLayout {
    FeatureList {
        heading: String,
        description: String,
        features: Vec<String>,
        benefits: Vec<String>,
    },
    Comparison {
        heading: String,
        description: String,
        features: Vec<String>,
        comparisons: Vec<CardCarouselView>,
        documents: Vec<DocumentLinkView>,
    },
    Accordion {
        intro: Option<String>,
        sections: Vec<AccordionSectionView>,
    },
}

impl ServiceLayout {
    pub fn kind(&self) -> LayoutKind {
        match self {
            ServiceLayout::FeatureList { .. } => LayoutKind::FeatureList,
            ServiceLayout::Comparison { .. } => LayoutKind::Comparison,
            ServiceLayout::Accordion { .. } => LayoutKind::Accordion,
        }
    }

    /// Template that renders this layout.
    pub fn template(&self) -> &'static str {
        match self {
            ServiceLayout::FeatureList { .. } => "layout_feature_list",
            ServiceLayout::Comparison { .. } => "layout_comparison",
            ServiceLayout::Accordion { .. } => "layout_accordion",
        }
    }
}

pub fn dispatch(
    item: &ContentItem,
    registry: &ContentRegistry,
    options: &ViewOptions,
) -> ServiceLayout {
    match item.layout {
        LayoutKind::FeatureList => ServiceLayout::FeatureList {
            heading: item.short_title.clone(),
            description: item.description.clone(),
            features: item.features.clone(),
            benefits: item.benefits.clone(),
        },
        LayoutKind::Comparison => ServiceLayout::Comparison {
            heading: item.short_title.clone(),
            description: item.description.clone(),
            features: item.features.clone(),
            comparisons: item
                .sections
                .iter()
                .filter_map(|section| match section {
                    DynamicSection::Carousel {
                        badge,
                        title,
                        subtitle,
                        cards,
                    } => Some(card_carousel(
                        &item.href(),
                        badge.as_deref(),
                        title,
                        subtitle.as_deref(),
                        cards,
                        options,
                    )),
                    _ => None,
                })
                .collect(),
            documents: registry
                .documents_linked_from(item)
                .into_iter()
                .map(|doc| DocumentLinkView {
                    title: doc.title.clone(),
                    href: doc.href(),
                    download_url: doc.file_url(),
                })
                .collect(),
        },
        LayoutKind::Accordion => ServiceLayout::Accordion {
            intro: item.intro.clone(),
            sections: accordion_sections(item, options),
        },
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SectionView {
    Carousel(CardCarouselView),
    Grid {
        title: String,
        subtitle: Option<String>,
        cards: Vec<CardView>,
    },
    Highlighted {
        title: String,
        content: String,
        button_text: String,
        button_link: String,
    },
}

/// Dynamic sections shown after the layout. Carousels already consumed by
/// the comparison layout are skipped.
pub fn section_views(item: &ContentItem, options: &ViewOptions) -> Vec<SectionView> {
    item.sections
        .iter()
        .filter_map(|section| match section {
            DynamicSection::Carousel { .. } if item.layout == LayoutKind::Comparison => None,
            DynamicSection::Carousel {
                badge,
                title,
                subtitle,
                cards,
            } => Some(SectionView::Carousel(card_carousel(
                &item.href(),
                badge.as_deref(),
                title,
                subtitle.as_deref(),
                cards,
                options,
            ))),
            DynamicSection::Grid {
                title,
                subtitle,
                cards,
            } => Some(SectionView::Grid {
                title: title.clone(),
                subtitle: subtitle.clone(),
                cards: cards.iter().map(CardView::from).collect(),
            }),
            DynamicSection::Highlighted {
                title,
                content,
                button_text,
                button_link,
            } => Some(SectionView::Highlighted {
                title: title.clone(),
                content: content.clone(),
                button_text: button_text.clone(),
                button_link: button_link.clone(),
            }),
        })
        .collect()
}

#[cfg(test)]
#[path = "tests/layout_tests.rs"]
mod tests;
