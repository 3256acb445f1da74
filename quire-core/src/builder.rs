use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::config::SiteConfig;
use crate::contents::TableOfContents;
use crate::markup::MarkupError;
use crate::page::{RenderedPage, render_page};
use crate::prototype::{CopyError, copy_prototype, prepare_directory};
use crate::scanner::{PageScanner, ScanError, SourcePage};
use crate::template::{TemplateError, TemplateMaker};

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Prototype directory not specified")]
    MissingPrototypeDir,
    #[error("Markup error in {}: {source}", .path.display())]
    Markup {
        path: PathBuf,
        #[source]
        source: MarkupError,
    },
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),
    #[error("Template error: {0}")]
    Template(#[from] TemplateError),
    #[error("Copy error: {0}")]
    Copy(#[from] CopyError),
}

/// What a build produced.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BuildReport {
    pub pages: usize,
    pub contents_entries: usize,
    pub copied_entries: usize,
    pub filled_files: usize,
}

pub struct SiteBuilder {
    prototype_dir: Option<PathBuf>,
    output_dir: PathBuf,
    reserved: String,
    pages: PathBuf,
    templates: PathBuf,
    table_of_contents: String,
    extension: String,
}

impl Default for SiteBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SiteBuilder {
    pub fn new() -> Self {
        let defaults = SiteConfig::default();
        Self {
            prototype_dir: None,
            output_dir: defaults.output,
            reserved: defaults.reserved,
            pages: defaults.pages,
            templates: defaults.templates,
            table_of_contents: defaults.table_of_contents,
            extension: defaults.extension,
        }
    }

    pub fn from_config(config: &SiteConfig) -> Self {
        Self {
            prototype_dir: Some(config.prototype.clone()),
            output_dir: config.output.clone(),
            reserved: config.reserved.clone(),
            pages: config.pages.clone(),
            templates: config.templates.clone(),
            table_of_contents: config.table_of_contents.clone(),
            extension: config.extension.clone(),
        }
    }

    // Required configuration
    pub fn prototype_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.prototype_dir = Some(path.as_ref().to_path_buf());
        self
    }

    // Optional layout
    pub fn output_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.output_dir = path.as_ref().to_path_buf();
        self
    }

    pub fn reserved<S: Into<String>>(mut self, name: S) -> Self {
        self.reserved = name.into();
        self
    }

    pub fn pages_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.pages = path.as_ref().to_path_buf();
        self
    }

    pub fn templates_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.templates = path.as_ref().to_path_buf();
        self
    }

    pub fn table_of_contents<S: Into<String>>(mut self, file_name: S) -> Self {
        self.table_of_contents = file_name.into();
        self
    }

    pub fn extension<S: Into<String>>(mut self, extension: S) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn build(self) -> Result<Site, BuildError> {
        let prototype = self.prototype_dir.ok_or(BuildError::MissingPrototypeDir)?;

        Ok(Site {
            config: SiteConfig {
                prototype,
                output: self.output_dir,
                reserved: self.reserved,
                pages: self.pages,
                templates: self.templates,
                table_of_contents: self.table_of_contents,
                extension: self.extension,
            },
        })
    }
}

pub struct Site {
    config: SiteConfig,
}

impl Site {
    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Convert one page and write it into the output root. The page is
    /// recorded in `contents` only once it has been written.
    pub fn build_page(
        &self,
        page: &SourcePage,
        contents: &mut TableOfContents,
    ) -> Result<PathBuf, BuildError> {
        let RenderedPage {
            html,
            header,
            output,
            path,
        } =
            render_page(&page.content, &page.path, &self.config.extension).map_err(|source| {
                BuildError::Markup {
                    path: page.path.clone(),
                    source,
                }
            })?;

        let output_path = self.config.output.join(&output);
        std::fs::write(&output_path, html).map_err(|source| BuildError::Io {
            path: output_path.clone(),
            source,
        })?;

        info!("Built {} -> {}", page.path.display(), output_path.display());
        contents.record_page(&header, &path);

        Ok(output_path)
    }

    pub fn build_pages(&self, contents: &mut TableOfContents) -> Result<usize, BuildError> {
        let pages = PageScanner::new(self.config.pages_dir()).scan()?;
        for page in &pages {
            self.build_page(page, contents)?;
        }

        Ok(pages.len())
    }

    /// Write the table of contents where the template pass will pick it up.
    pub fn write_table_of_contents(&self, contents: &TableOfContents) -> Result<PathBuf, BuildError> {
        let path = self.config.table_of_contents_path();
        std::fs::write(&path, contents.render().serialize()).map_err(|source| BuildError::Io {
            path: path.clone(),
            source,
        })?;

        info!("Wrote table of contents with {} entries", contents.len());
        Ok(path)
    }

    /// Run the whole pipeline: clear the output, build pages, write the table
    /// of contents, copy the prototype, then fill templates.
    pub fn render_all(&self) -> Result<BuildReport, BuildError> {
        prepare_directory(&self.config.output)?;

        let mut contents = TableOfContents::new();
        let pages = self.build_pages(&mut contents)?;
        self.write_table_of_contents(&contents)?;

        let copied_entries = copy_prototype(
            &self.config.prototype,
            &self.config.output,
            &[self.config.reserved.as_str()],
        )?;

        let templates = TemplateMaker::load(self.config.templates_dir())?;
        let filled_files = templates.fill_path(&self.config.output)?;

        Ok(BuildReport {
            pages,
            contents_entries: contents.len(),
            copied_entries,
            filled_files,
        })
    }
}
