use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use content::ContentRegistry;
use shared::{domain::DocumentRecord, error::SiteError};
use site_api::{read_page_count, PageBuilder, Renderer, Route, ViewOptions};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(about = "Content and rendering tools for the Titan Shield site")]
struct Cli {
    /// Content file to use instead of the built-in one.
    #[arg(long, global = true)]
    content: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load the content and render every page once.
    Check,
    ListServices,
    ListDocuments,
    /// Print the HTML for one path, query string included.
    Render { path: String },
    /// Write every page as `index.html` under `out`.
    Export {
        #[arg(long)]
        out: PathBuf,
        /// Directory holding `documents/*.pdf`, used for viewer page counts.
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();

    let cli = Cli::parse();
    let registry = match &cli.content {
        Some(path) => ContentRegistry::load(path)
            .with_context(|| format!("failed to load content from '{}'", path.display()))?,
        None => ContentRegistry::builtin().context("built-in content is invalid")?,
    };
    let renderer = Renderer::new().context("failed to compile templates")?;

    match cli.command {
        Command::Check => {
            let pages = export_pages(&registry, &renderer, None)?;
            println!(
                "ok: {} services, {} documents, {} pages rendered",
                registry.services().len(),
                registry.documents().len(),
                pages.len()
            );
        }
        Command::ListServices => {
            for item in registry.services() {
                println!("{}\t{}\t{}", item.slug, item.layout.as_tag(), item.title);
            }
        }
        Command::ListDocuments => {
            for record in registry.documents() {
                println!("{}\t{}\t{}", record.slug, record.file_url(), record.title);
            }
        }
        Command::Render { path } => {
            print!("{}", render_path(&registry, &renderer, &path)?);
        }
        Command::Export { out, static_dir } => {
            let pages = export_pages(&registry, &renderer, static_dir.as_deref())?;
            for (route_path, html) in &pages {
                let file = output_file(&out, route_path);
                if let Some(parent) = file.parent() {
                    fs::create_dir_all(parent)
                        .with_context(|| format!("failed to create '{}'", parent.display()))?;
                }
                fs::write(&file, html)
                    .with_context(|| format!("failed to write '{}'", file.display()))?;
            }
            let not_found = renderer.render(&PageBuilder::new(&registry).not_found("/404"))?;
            fs::write(out.join("404.html"), not_found).context("failed to write 404.html")?;
            info!(pages = pages.len(), out = %out.display(), "export finished");
            println!("exported {} pages to {}", pages.len() + 1, out.display());
        }
    }

    Ok(())
}

fn render_path(registry: &ContentRegistry, renderer: &Renderer, path: &str) -> Result<String> {
    let route = Route::resolve(path);
    let options = ViewOptions::from_path(path);
    let page = match PageBuilder::new(registry).for_route(&route, &options, |_| Ok(1)) {
        Ok(page) => page,
        Err(err) if err.is_not_found() => bail!("no page at '{path}': {err}"),
        Err(err) => return Err(err.into()),
    };
    Ok(renderer.render(&page)?)
}

/// Renders every known route; documents read their PDF from `static_dir`
/// when given, otherwise they are assumed to have one page.
fn export_pages(
    registry: &ContentRegistry,
    renderer: &Renderer,
    static_dir: Option<&Path>,
) -> Result<Vec<(String, String)>> {
    let builder = PageBuilder::new(registry);
    Route::all(registry)
        .into_iter()
        .map(|route| -> Result<(String, String)> {
            let path = route.path();
            let page = builder
                .for_route(&route, &ViewOptions::default(), |record| {
                    document_pages(static_dir, record)
                })
                .with_context(|| format!("failed to build '{path}'"))?;
            let html = renderer
                .render(&page)
                .with_context(|| format!("failed to render '{path}'"))?;
            Ok((path, html))
        })
        .collect()
}

fn document_pages(static_dir: Option<&Path>, record: &DocumentRecord) -> Result<u32, SiteError> {
    match static_dir {
        Some(dir) => read_page_count(dir, record),
        None => Ok(1),
    }
}

fn output_file(out: &Path, route_path: &str) -> PathBuf {
    let trimmed = route_path.trim_matches('/');
    if trimmed.is_empty() {
        out.join("index.html")
    } else {
        out.join(trimmed).join("index.html")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (ContentRegistry, Renderer) {
        (
            ContentRegistry::builtin().expect("builtin content"),
            Renderer::new().expect("renderer"),
        )
    }

    #[test]
    fn maps_routes_to_index_files() {
        let out = Path::new("/tmp/site");
        assert_eq!(output_file(out, "/"), out.join("index.html"));
        assert_eq!(
            output_file(out, "/services/mssp"),
            out.join("services").join("mssp").join("index.html")
        );
    }

    #[test]
    fn renders_known_path_and_rejects_unknown() {
        let (registry, renderer) = setup();
        let html = render_path(&registry, &renderer, "/services/mssp?open=0").expect("render");
        assert_eq!(html.matches(" open>").count(), 1);

        let err = render_path(&registry, &renderer, "/nope").expect_err("unknown path");
        assert!(err.to_string().contains("/nope"));
    }

    #[test]
    fn export_covers_every_route() {
        let (registry, renderer) = setup();
        let pages = export_pages(&registry, &renderer, None).expect("export");
        assert_eq!(pages.len(), Route::all(&registry).len());
        assert!(pages.iter().any(|(path, _)| path == "/about"));
    }

    #[test]
    fn missing_static_dir_documents_fall_back() {
        let (registry, renderer) = setup();
        let dir = tempfile::tempdir().expect("tempdir");
        let pages = export_pages(&registry, &renderer, Some(dir.path())).expect("export");
        let (_, html) = pages
            .iter()
            .find(|(path, _)| path.starts_with("/documents/"))
            .expect("a document page");
        assert!(html.contains("Failed to load PDF document."));
    }
}
