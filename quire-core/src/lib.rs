pub mod builder;
pub mod config;
pub mod contents;
pub mod element;
pub mod markup;
pub mod page;
pub mod prototype;
pub mod scanner;
pub mod template;

// Re-export main types
pub use builder::{BuildError, BuildReport, Site, SiteBuilder};
pub use contents::{PageMetadata, TableOfContents};
pub use element::{Element, ImageElement, Node};
pub use markup::{MarkupError, scan_section};
pub use page::{RenderedPage, render_page};
pub use template::{TemplateError, TemplateMaker};

/// Build a whole site from its layout.
pub fn build_site(config: &config::SiteConfig) -> Result<BuildReport, BuildError> {
    SiteBuilder::from_config(config).build()?.render_all()
}
