use super::*;

fn registry() -> ContentRegistry {
    ContentRegistry::builtin().expect("builtin content")
}

#[test]
fn each_layout_tag_dispatches_to_its_variant() {
    let registry = registry();
    let options = ViewOptions::default();
    for (slug, kind) in [
        ("offsec-pen-testing", LayoutKind::FeatureList),
        ("endpoint-mobile-security", LayoutKind::Comparison),
        ("consulting-compliance", LayoutKind::Accordion),
    ] {
        let item = registry.service(slug).expect("service");
        let layout = dispatch(item, &registry, &options);
        assert_eq!(layout.kind(), kind, "{slug}");
    }
}

#[test]
fn accordion_sections_start_collapsed() {
    let registry = registry();
    let item = registry.service("mssp").expect("mssp");
    let ServiceLayout::Accordion { intro, sections } =
        dispatch(item, &registry, &ViewOptions::default())
    else {
        panic!("mssp uses the accordion layout");
    };

    assert!(intro.is_some());
    assert_eq!(sections.len(), item.accordion.len());
    assert!(sections.iter().all(|section| !section.open));
    assert_eq!(sections[1].toggle_href, "/services/mssp?open=1");
}

#[test]
fn open_query_toggles_only_listed_sections() {
    let registry = registry();
    let item = registry.service("training-awareness").expect("service");
    let options = ViewOptions {
        open: vec![0, 2, 2, 5, 99],
        ..ViewOptions::default()
    };
    let ServiceLayout::Accordion { sections, .. } = dispatch(item, &registry, &options) else {
        panic!("accordion layout expected");
    };

    let open: Vec<usize> = sections
        .iter()
        .filter(|section| section.open)
        .map(|section| section.index)
        .collect();
    assert_eq!(open, vec![0, 5]);
    assert_eq!(sections[0].toggle_href, "/services/training-awareness?open=5");
    assert_eq!(sections[3].toggle_href, "/services/training-awareness?open=0,3,5");
}

#[test]
fn comparison_layout_pages_cards_and_lists_documents() {
    let registry = registry();
    let item = registry.service("endpoint-mobile-security").expect("endpoint");
    let options = ViewOptions {
        slide: Some(3),
        ..ViewOptions::default()
    };
    let ServiceLayout::Comparison {
        comparisons,
        documents,
        ..
    } = dispatch(item, &registry, &options)
    else {
        panic!("comparison layout expected");
    };

    let carousel = &comparisons[0];
    assert_eq!(carousel.page_count, 4);
    assert_eq!(carousel.page, 4);
    assert_eq!(carousel.cards.len(), 1);
    assert_eq!(carousel.next_href, "/services/endpoint-mobile-security?slide=0");
    assert_eq!(carousel.prev_href, "/services/endpoint-mobile-security?slide=2");
    assert_eq!(documents.len(), 5);
    assert_eq!(documents[0].href, "/documents/threatdown-vs-crowdstrike");

    assert!(section_views(item, &options).is_empty());
}

#[test]
fn out_of_range_slide_shows_first_page() {
    let cards = vec![
        LinkCard {
            title: "A".into(),
            description: String::new(),
            button_text: "Open".into(),
            button_link: None,
        };
        4
    ];
    let options = ViewOptions {
        slide: Some(9),
        ..ViewOptions::default()
    };
    let view = card_carousel("/x", None, "T", None, &cards, &options);
    assert_eq!(view.page, 1);
    assert_eq!(view.cards.len(), CARDS_PER_PAGE);
    assert!(view.dots[0].active);
}

#[test]
fn carousel_and_accordion_links_keep_each_others_state() {
    let cards = vec![
        LinkCard {
            title: "A".into(),
            description: String::new(),
            button_text: "Open".into(),
            button_link: None,
        };
        4
    ];
    let options = ViewOptions {
        slide: Some(1),
        open: vec![2],
        ..ViewOptions::default()
    };
    let view = card_carousel("/x", None, "T", None, &cards, &options);
    assert_eq!(view.prev_href, "/x?slide=0&open=2");
    assert_eq!(view.dots[1].href, "/x?slide=1&open=2");

    let registry = registry();
    let item = registry.service("mssp").expect("mssp");
    let ServiceLayout::Accordion { sections, .. } = dispatch(item, &registry, &options) else {
        panic!("accordion layout expected");
    };
    assert_eq!(sections[0].toggle_href, "/services/mssp?open=0,2&slide=1");
    assert_eq!(sections[2].toggle_href, "/services/mssp?slide=1");
}

#[test]
fn highlighted_sections_render_after_accordion() {
    let registry = registry();
    let item = registry.service("mssp").expect("mssp");
    let sections = section_views(item, &ViewOptions::default());
    assert!(matches!(
        sections.as_slice(),
        [SectionView::Highlighted { button_link, .. }] if button_link == "/services/endpoint-mobile-security"
    ));
}

#[test]
fn rich_text_splits_paragraphs_and_bullets() {
    let blocks = parse_rich_text(
        "\nFirst line\ncontinues here.\n\nKey components include:\n\n•One.\n• Two.\n•\nTail",
    );
    assert_eq!(
        blocks,
        vec![
            TextBlock::Paragraph {
                text: "First line continues here.".into()
            },
            TextBlock::Paragraph {
                text: "Key components include:".into()
            },
            TextBlock::List {
                items: vec!["One.".into(), "Two.".into()]
            },
            TextBlock::Paragraph {
                text: "Tail".into()
            },
        ]
    );
    assert!(parse_rich_text("").is_empty());
}
