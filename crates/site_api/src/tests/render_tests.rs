use super::*;
use content::ContentRegistry;
use shared::domain::DocumentRecord;
use ui_state::FormState;

use crate::{page::PageBuilder, query::ViewOptions, route::Route};

fn registry() -> ContentRegistry {
    ContentRegistry::builtin().expect("builtin content")
}

fn one_page(_: &DocumentRecord) -> Result<u32, SiteError> {
    Ok(1)
}

#[test]
fn templates_compile() {
    Renderer::new().expect("templates compile");
}

#[test]
fn accordion_layout_renders_collapsed_details() {
    let registry = registry();
    let renderer = Renderer::new().expect("renderer");
    let page = PageBuilder::new(&registry)
        .service("mssp", &ViewOptions::default())
        .expect("service page");

    let html = renderer.render(&page).expect("render");
    let sections = registry.service("mssp").expect("mssp").accordion.len();
    assert_eq!(html.matches("<details class=\"accordion\"").count(), sections);
    assert!(!html.contains(" open>"));
    assert!(html.contains("href=\"/services/mssp?open=0#section-0\""));
    assert!(!html.contains("&#x3D;"));
    assert!(html.contains("data-layout=\"accordion\""));
}

#[test]
fn opened_section_renders_open_attribute() {
    let registry = registry();
    let renderer = Renderer::new().expect("renderer");
    let options = ViewOptions {
        open: vec![1],
        ..ViewOptions::default()
    };
    let page = PageBuilder::new(&registry)
        .service("mssp", &options)
        .expect("service page");

    let html = renderer.render(&page).expect("render");
    assert_eq!(html.matches(" open>").count(), 1);
    assert!(html.contains("<a href=\"/services/mssp#section-1\">2. "));
}

#[test]
fn every_route_renders_inside_the_shell() {
    let registry = registry();
    let renderer = Renderer::new().expect("renderer");
    let builder = PageBuilder::new(&registry);
    for route in Route::all(&registry) {
        let page = builder
            .for_route(&route, &ViewOptions::default(), one_page)
            .expect("page");
        let html = renderer.render(&page).expect("render");
        assert!(html.starts_with("<!DOCTYPE html>"), "{}", route.path());
        let title = format!("<title>{}</title>", escape_html(&page.chrome.page_title));
        assert!(html.contains(&title), "{}", route.path());
        assert!(html.contains("</html>"), "{}", route.path());
    }
}

#[test]
fn not_found_page_shows_requested_path() {
    let registry = registry();
    let renderer = Renderer::new().expect("renderer");
    let page = PageBuilder::new(&registry).not_found("/pricing");
    let html = renderer.render(&page).expect("render");
    assert!(html.contains("<h1>404</h1>"));
    assert!(html.contains("<code>/pricing</code>"));
}

#[test]
fn user_input_is_escaped() {
    let registry = registry();
    let renderer = Renderer::new().expect("renderer");
    let mut form = FormState::contact();
    form.fill([("name", "<script>alert(1)</script>"), ("email", "x")]);
    form.validate();

    let page = PageBuilder::new(&registry).contact(&form, false);
    let html = renderer.render(&page).expect("render");
    assert!(!html.contains("<script>alert(1)</script>"));
    assert!(html.contains("&lt;script&gt;"));
    assert!(html.contains("class=\"field-error\">invalid format<"));
}

#[test]
fn home_exposes_autoplay_interval_to_the_carousel() {
    let registry = registry();
    let renderer = Renderer::new().expect("renderer");
    let page = PageBuilder::new(&registry)
        .with_autoplay(std::time::Duration::from_millis(4000))
        .home(&ViewOptions::default(), &FormState::newsletter());
    let html = renderer.render(&page).expect("render");
    assert!(html.contains("data-autoplay-ms=\"4000\""));
    assert_eq!(html.matches("logo-slot is-center").count(), 1);
}

#[test]
fn hero_renders_every_phrase_with_only_the_first_shown() {
    let registry = registry();
    let page = PageBuilder::new(&registry).home(&ViewOptions::default(), &FormState::newsletter());
    let html = Renderer::new().expect("renderer").render(&page).expect("render");

    let phrases = &registry.home().hero_phrases;
    assert!(phrases.len() > 1);
    for phrase in phrases {
        assert!(html.contains(&escape_html(phrase)), "{phrase}");
    }
    assert_eq!(html.matches("<span data-phrase>").count(), 1);
    assert_eq!(html.matches("<span data-phrase hidden>").count(), phrases.len() - 1);
}

#[test]
fn failed_document_renders_download_link() {
    let registry = registry();
    let renderer = Renderer::new().expect("renderer");
    let page = PageBuilder::new(&registry)
        .document("threatdown-vs-sophos", &ViewOptions::default(), |record| {
            Err(SiteError::DocumentUnavailable {
                url: record.file_url(),
            })
        })
        .expect("document page");
    let html = renderer.render(&page).expect("render");
    assert!(html.contains("Failed to load PDF document."));
    assert!(!html.contains("<iframe"));
}
