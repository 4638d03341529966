use content::ContentRegistry;
use shared::{
    domain::{is_valid_slug, DocumentSlug, ServiceSlug},
    error::{ContentKind, SiteError},
};

/// Every page the site can render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Services,
    Service(ServiceSlug),
    About,
    Contact,
    Document(DocumentSlug),
    NotFound(String),
}

impl Route {
    /// Maps a request path (query string allowed) to a route. Slugs are only
    /// checked for shape here; [`Route::require`] checks them against content.
    pub fn resolve(path: &str) -> Route {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_matches('/');
        let segments: Vec<&str> = if trimmed.is_empty() {
            Vec::new()
        } else {
            trimmed.split('/').collect()
        };

        match segments.as_slice() {
            [] => Route::Home,
            ["services"] => Route::Services,
            ["services", slug] if is_valid_slug(slug) => Route::Service(ServiceSlug::from(*slug)),
            ["about"] | ["about-us"] => Route::About,
            ["contact"] => Route::Contact,
            ["documents", slug] if is_valid_slug(slug) => {
                Route::Document(DocumentSlug::from(*slug))
            }
            _ => Route::NotFound(format!("/{trimmed}")),
        }
    }

    /// Fails with `NotFound` when the route names content that does not exist.
    pub fn require(self, registry: &ContentRegistry) -> Result<Route, SiteError> {
        match &self {
            Route::Service(slug) => {
                registry.require_service(slug.as_str())?;
            }
            Route::Document(slug) => {
                registry.require_document(slug.as_str())?;
            }
            Route::NotFound(path) => return Err(SiteError::not_found(ContentKind::Page, path)),
            Route::Home | Route::Services | Route::About | Route::Contact => {}
        }
        Ok(self)
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Services => "/services".to_string(),
            Route::Service(slug) => format!("/services/{slug}"),
            Route::About => "/about".to_string(),
            Route::Contact => "/contact".to_string(),
            Route::Document(slug) => format!("/documents/{slug}"),
            Route::NotFound(path) => path.clone(),
        }
    }

    /// Every renderable page, in navigation order.
    pub fn all(registry: &ContentRegistry) -> Vec<Route> {
        let mut routes = vec![Route::Home, Route::Services];
        routes.extend(
            registry
                .services()
                .iter()
                .map(|item| Route::Service(item.slug.clone())),
        );
        routes.push(Route::About);
        routes.push(Route::Contact);
        routes.extend(
            registry
                .documents()
                .iter()
                .map(|doc| Route::Document(doc.slug.clone())),
        );
        routes
    }
}
