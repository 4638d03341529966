//! Page assembly and rendering for the Titan Shield site.
//!
//! Requests resolve to a [`Route`], query strings to [`ViewOptions`], and a
//! [`PageBuilder`] turns both into a serializable [`Page`] that the
//! [`Renderer`] writes out as HTML.

pub mod document;
pub mod layout;
pub mod page;
pub mod query;
pub mod render;
pub mod route;
pub mod style;
pub mod view;

pub use document::{
    count_pdf_pages, document_path, page_count_from, read_page_count, viewer_for, ViewerView,
};
pub use layout::{dispatch, section_views, ServiceLayout};
pub use page::PageBuilder;
pub use query::ViewOptions;
pub use render::{RenderError, Renderer};
pub use route::Route;
pub use view::{Page, PageBody};
