use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::Serialize;
use shared::{domain::DocumentRecord, error::SiteError};
use tracing::warn;
use ui_state::{DocumentFallback, DocumentViewer, LoadStatus, Zoom};

use crate::query::ViewOptions;

/// Counts leaf `/Type /Page` objects. When every leaf sits in a compressed
/// object stream, the largest `/Count` of a `/Type /Pages` node is used.
pub fn count_pdf_pages(bytes: &[u8]) -> u32 {
    let leaves = type_entries(bytes, b"/Page").len();
    if leaves > 0 {
        return u32::try_from(leaves).unwrap_or(u32::MAX);
    }

    type_entries(bytes, b"/Pages")
        .into_iter()
        .filter_map(|at| {
            let start = rfind(&bytes[..at], b"obj").unwrap_or(0);
            let end = find(&bytes[at..], b"endobj").map_or(bytes.len(), |len| at + len);
            tree_count(&bytes[start..end])
        })
        .max()
        .unwrap_or(0)
}

/// Offsets of `/Type <name>` entries whose name matches exactly.
fn type_entries(bytes: &[u8], name: &[u8]) -> Vec<usize> {
    const MARKER: &[u8] = b"/Type";

    let mut entries = Vec::new();
    let mut cursor = 0;
    while let Some(found) = find(&bytes[cursor..], MARKER) {
        let start = cursor + found;
        let mut next = start + MARKER.len();
        while bytes.get(next).is_some_and(u8::is_ascii_whitespace) {
            next += 1;
        }
        let rest = &bytes[next..];
        if rest.starts_with(name)
            && !rest
                .get(name.len())
                .is_some_and(u8::is_ascii_alphanumeric)
        {
            entries.push(start);
        }
        cursor = next;
    }
    entries
}

fn tree_count(object: &[u8]) -> Option<u32> {
    const COUNT: &[u8] = b"/Count";
    let at = find(object, COUNT)? + COUNT.len();
    let digits: String = object[at..]
        .iter()
        .skip_while(|byte| byte.is_ascii_whitespace())
        .take_while(|byte| byte.is_ascii_digit())
        .map(|&byte| char::from(byte))
        .collect();
    digits.parse().ok()
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

fn rfind(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .rposition(|window| window == needle)
}

/// Where a document's PDF lives under the static directory.
pub fn document_path(static_dir: &Path, record: &DocumentRecord) -> PathBuf {
    static_dir.join("documents").join(&record.filename)
}

/// Page count from the result of reading a document's PDF. A read error or a
/// file with no pages makes the document unavailable.
pub fn page_count_from(
    record: &DocumentRecord,
    read: io::Result<Vec<u8>>,
) -> Result<u32, SiteError> {
    let unavailable = || SiteError::DocumentUnavailable {
        url: record.file_url(),
    };
    let bytes = read.map_err(|err| {
        warn!(document = %record.slug, error = %err, "document unreadable");
        unavailable()
    })?;
    match count_pdf_pages(&bytes) {
        0 => {
            warn!(document = %record.slug, "document has no pages");
            Err(unavailable())
        }
        pages => Ok(pages),
    }
}

/// Blocking read and count, for callers outside an async runtime.
pub fn read_page_count(static_dir: &Path, record: &DocumentRecord) -> Result<u32, SiteError> {
    page_count_from(record, fs::read(document_path(static_dir, record)))
}

/// Viewer state for one request: the load result (page count or failure)
/// plus the `?page=` / `?zoom=` the visitor asked for.
pub fn viewer_for(
    record: &DocumentRecord,
    options: &ViewOptions,
    load: Result<u32, SiteError>,
) -> DocumentViewer {
    let mut viewer = DocumentViewer::new(record.file_url());
    if let Some(page) = options.page {
        viewer.go_to(page);
    }
    if let Some(percent) = options.zoom {
        viewer.set_zoom(Zoom::from_percent(percent));
    }
    match load {
        Ok(pages) => viewer.on_load_success(pages),
        Err(err) => {
            warn!(document = %record.slug, error = %err, "document failed to load");
            viewer.on_load_failure(err.to_string());
        }
    }
    viewer
}

#[derive(Debug, Clone, Serialize)]
pub struct ViewerView {
    pub status: LoadStatus,
    pub page: u32,
    pub page_count: Option<u32>,
    pub zoom_percent: u32,
    pub embed_url: String,
    pub download_url: String,
    pub prev_href: Option<String>,
    pub next_href: Option<String>,
    pub zoom_in_href: Option<String>,
    pub zoom_out_href: Option<String>,
    pub fallback: Option<DocumentFallback>,
}

impl ViewerView {
    pub fn new(base_href: &str, viewer: &DocumentViewer) -> Self {
        let zoom = viewer.zoom();
        let link = |page: u32, zoom: Zoom| format!("{base_href}?page={page}&zoom={}", zoom.percent());
        let loaded = viewer.page_count().is_some();

        Self {
            status: viewer.status().clone(),
            page: viewer.page(),
            page_count: viewer.page_count(),
            zoom_percent: zoom.percent(),
            embed_url: format!("{}{}", viewer.file_url(), viewer.fragment()),
            download_url: viewer.file_url().to_string(),
            prev_href: viewer.prev_target().map(|page| link(page, zoom)),
            next_href: viewer.next_target().map(|page| link(page, zoom)),
            zoom_in_href: (loaded && zoom < Zoom::MAX).then(|| link(viewer.page(), zoom.zoom_in())),
            zoom_out_href: (loaded && zoom > Zoom::MIN)
                .then(|| link(viewer.page(), zoom.zoom_out())),
            fallback: viewer.fallback(),
        }
    }
}
