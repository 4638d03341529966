//! State behind the PDF battlecard viewer.

use serde::Serialize;

/// Zoom level kept as a count of quarter steps so repeated in/out never drifts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Zoom(u8);

impl Zoom {
    pub const MIN: Zoom = Zoom(2);
    pub const MAX: Zoom = Zoom(12);
    pub const DEFAULT: Zoom = Zoom(4);

    fn clamped(quarters: i32) -> Self {
        Zoom(quarters.clamp(Self::MIN.0 as i32, Self::MAX.0 as i32) as u8)
    }

    pub fn from_scale(scale: f32) -> Self {
        if !scale.is_finite() {
            return Self::DEFAULT;
        }
        Self::clamped((scale * 4.0).round() as i32)
    }

    /// `150` → 1.5x. Values between steps round to the nearest quarter.
    pub fn from_percent(percent: u32) -> Self {
        let quarters = (percent.min(10_000) + 12) / 25;
        Self::clamped(quarters as i32)
    }

    pub fn scale(self) -> f32 {
        f32::from(self.0) / 4.0
    }

    pub fn percent(self) -> u32 {
        u32::from(self.0) * 25
    }

    pub fn zoom_in(self) -> Self {
        Self::clamped(i32::from(self.0) + 1)
    }

    pub fn zoom_out(self) -> Self {
        Self::clamped(i32::from(self.0) - 1)
    }
}

impl Default for Zoom {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LoadStatus {
    Loading,
    Loaded { pages: u32 },
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentFallback {
    pub message: &'static str,
    pub download_url: String,
}

pub const LOAD_FAILED_MESSAGE: &str = "Failed to load PDF document.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentViewer {
    file_url: String,
    page: u32,
    zoom: Zoom,
    status: LoadStatus,
}

impl DocumentViewer {
    pub fn new(file_url: impl Into<String>) -> Self {
        Self {
            file_url: file_url.into(),
            page: 1,
            zoom: Zoom::DEFAULT,
            status: LoadStatus::Loading,
        }
    }

    pub fn file_url(&self) -> &str {
        &self.file_url
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn zoom(&self) -> Zoom {
        self.zoom
    }

    pub fn zoom_percent(&self) -> u32 {
        self.zoom.percent()
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn page_count(&self) -> Option<u32> {
        match self.status {
            LoadStatus::Loaded { pages } => Some(pages),
            _ => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.status, LoadStatus::Failed { .. })
    }

    /// A document with no pages is treated as a failed load. A page requested
    /// while loading is kept if it exists, otherwise the viewer starts at 1.
    pub fn on_load_success(&mut self, pages: u32) {
        if pages == 0 {
            self.on_load_failure("document has no pages");
            return;
        }
        self.status = LoadStatus::Loaded { pages };
        if self.page > pages {
            self.page = 1;
        }
    }

    pub fn on_load_failure(&mut self, reason: impl Into<String>) {
        self.status = LoadStatus::Failed {
            reason: reason.into(),
        };
    }

    /// Before load the page is recorded as requested; after load it clamps.
    pub fn go_to(&mut self, page: u32) {
        self.page = match self.page_count() {
            Some(pages) => page.clamp(1, pages),
            None => page.max(1),
        };
    }

    pub fn next_page(&mut self) {
        if let Some(target) = self.next_target() {
            self.page = target;
        }
    }

    pub fn prev_page(&mut self) {
        if let Some(target) = self.prev_target() {
            self.page = target;
        }
    }

    /// Page the "next" control leads to, if any.
    pub fn next_target(&self) -> Option<u32> {
        self.page_count()
            .filter(|&pages| self.page < pages)
            .map(|_| self.page + 1)
    }

    pub fn prev_target(&self) -> Option<u32> {
        self.page_count()
            .filter(|_| self.page > 1)
            .map(|_| self.page - 1)
    }

    pub fn zoom_in(&mut self) {
        self.zoom = self.zoom.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.zoom = self.zoom.zoom_out();
    }

    pub fn set_zoom(&mut self, zoom: Zoom) {
        self.zoom = zoom;
    }

    pub fn fallback(&self) -> Option<DocumentFallback> {
        self.is_failed().then(|| DocumentFallback {
            message: LOAD_FAILED_MESSAGE,
            download_url: self.file_url.clone(),
        })
    }

    /// PDF open parameters for the embedded renderer.
    pub fn fragment(&self) -> String {
        format!("#page={}&zoom={}", self.page, self.zoom.percent())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zoom_steps_by_quarters_and_clamps() {
        let mut viewer = DocumentViewer::new("/assets/documents/a.pdf");
        assert_eq!(viewer.zoom_percent(), 100);

        viewer.zoom_in();
        assert_eq!(viewer.zoom().scale(), 1.25);

        for _ in 0..20 {
            viewer.zoom_in();
        }
        assert_eq!(viewer.zoom_percent(), 300);

        for _ in 0..20 {
            viewer.zoom_out();
        }
        assert_eq!(viewer.zoom_percent(), 50);
        assert_eq!(viewer.zoom(), Zoom::MIN);
    }

    #[test]
    fn zoom_parses_from_percent_and_scale() {
        assert_eq!(Zoom::from_percent(150).scale(), 1.5);
        assert_eq!(Zoom::from_percent(160).percent(), 150);
        assert_eq!(Zoom::from_percent(0), Zoom::MIN);
        assert_eq!(Zoom::from_percent(u32::MAX), Zoom::MAX);
        assert_eq!(Zoom::from_scale(2.0).percent(), 200);
        assert_eq!(Zoom::from_scale(f32::NAN), Zoom::DEFAULT);
    }

    #[test]
    fn navigation_is_inert_until_loaded() {
        let mut viewer = DocumentViewer::new("/assets/documents/a.pdf");
        viewer.next_page();
        viewer.prev_page();
        assert_eq!(viewer.page(), 1);
        assert_eq!(viewer.next_target(), None);

        viewer.go_to(3);
        viewer.on_load_success(5);
        assert_eq!(viewer.page(), 3);
        assert_eq!(viewer.fragment(), "#page=3&zoom=100");
    }

    #[test]
    fn page_navigation_clamps_without_wrapping() {
        let mut viewer = DocumentViewer::new("/assets/documents/a.pdf");
        viewer.on_load_success(2);
        assert_eq!(viewer.prev_target(), None);

        viewer.next_page();
        viewer.next_page();
        assert_eq!(viewer.page(), 2);
        assert_eq!(viewer.next_target(), None);
        assert_eq!(viewer.prev_target(), Some(1));

        viewer.go_to(0);
        assert_eq!(viewer.page(), 1);
        viewer.go_to(99);
        assert_eq!(viewer.page(), 2);
    }

    #[test]
    fn requested_page_past_the_end_restarts_at_one() {
        let mut viewer = DocumentViewer::new("/assets/documents/a.pdf");
        viewer.go_to(9);
        viewer.on_load_success(4);
        assert_eq!(viewer.page(), 1);
    }

    #[test]
    fn failed_load_offers_download() {
        let mut viewer = DocumentViewer::new("/assets/documents/Battlecard-Sophos.pdf");
        assert!(viewer.fallback().is_none());

        viewer.on_load_failure("file missing");
        let fallback = viewer.fallback().expect("fallback");
        assert_eq!(fallback.message, "Failed to load PDF document.");
        assert_eq!(fallback.download_url, "/assets/documents/Battlecard-Sophos.pdf");

        let mut empty = DocumentViewer::new("/x.pdf");
        empty.on_load_success(0);
        assert!(empty.is_failed());
    }
}
