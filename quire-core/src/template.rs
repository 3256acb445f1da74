use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};
use walkdir::WalkDir;

const TEMPLATE_EXTENSION: &str = "html";

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

impl TemplateError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        TemplateError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Named snippets substituted into pages wherever `$name` appears.
///
/// Substitution is plain text replacement, applied one template at a time in
/// the order the templates were loaded. A name that prefixes another
/// (`head`, `header`) is replaced first if it was loaded first.
#[derive(Debug, Default, Clone)]
pub struct TemplateMaker {
    templates: Vec<(String, String)>,
}

impl TemplateMaker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every file under `templates_path`, keyed by file name without
    /// `.html`. Files are visited in sorted order.
    pub fn load<P: AsRef<Path>>(templates_path: P) -> Result<Self, TemplateError> {
        let mut maker = Self::new();

        for entry in WalkDir::new(templates_path).sort_by_file_name() {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }

            let body = std::fs::read_to_string(entry.path())
                .map_err(|e| TemplateError::io(entry.path(), e))?;
            let name = entry
                .file_name()
                .to_string_lossy()
                .replace(".html", "");

            debug!("Loaded template: {}", name);
            maker.insert(name, body);
        }

        Ok(maker)
    }

    /// Add a template, replacing the body of an existing one with the same name.
    pub fn insert<N: Into<String>, B: Into<String>>(&mut self, name: N, body: B) {
        let name = name.into();
        let body = body.into();
        match self.templates.iter_mut().find(|(n, _)| *n == name) {
            Some(existing) => existing.1 = body,
            None => self.templates.push((name, body)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.templates
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, body)| body.as_str())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.templates.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// The token replaced by a template's body.
    pub fn keyword(name: &str) -> String {
        format!("${}", name)
    }

    pub fn fill(&self, content: &str) -> String {
        let mut filled = content.to_string();
        for (name, body) in &self.templates {
            filled = filled.replace(&Self::keyword(name), body);
        }
        filled
    }

    /// Fill templates in a single file, rewriting it in place.
    pub fn fill_file<P: AsRef<Path>>(&self, file_path: P) -> Result<(), TemplateError> {
        let file_path = file_path.as_ref();
        let content =
            std::fs::read_to_string(file_path).map_err(|e| TemplateError::io(file_path, e))?;

        std::fs::write(file_path, self.fill(&content))
            .map_err(|e| TemplateError::io(file_path, e))?;

        Ok(())
    }

    /// Fill templates in every `.html` file under `path`. Returns how many
    /// files were rewritten.
    pub fn fill_path<P: AsRef<Path>>(&self, path: P) -> Result<usize, TemplateError> {
        let mut filled = 0;

        for entry in WalkDir::new(path).sort_by_file_name() {
            let entry = entry?;
            let is_page = entry.file_type().is_file()
                && entry
                    .path()
                    .extension()
                    .map(|ext| ext == TEMPLATE_EXTENSION)
                    .unwrap_or(false);
            if !is_page {
                continue;
            }

            self.fill_file(entry.path())?;
            filled += 1;
        }

        info!("Filled templates in {} files", filled);
        Ok(filled)
    }
}
