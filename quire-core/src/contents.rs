use thiserror::Error;
use tracing::warn;

use crate::element::Element;
use crate::page::PageHeader;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("page {path} has no `{field}` in its header")]
pub struct MissingMetadata {
    pub path: String,
    pub field: &'static str,
}

/// One table-of-contents entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageMetadata {
    pub category: String,
    pub category_id: String,
    pub title: String,
    pub path: String,
}

impl PageMetadata {
    pub fn from_header(header: &PageHeader, path: &str) -> Result<Self, MissingMetadata> {
        let require = |value: &Option<String>, field: &'static str| {
            value.clone().ok_or_else(|| MissingMetadata {
                path: path.to_string(),
                field,
            })
        };

        Ok(Self {
            category: require(&header.category, "category")?,
            category_id: require(&header.category_id, "category_id")?,
            title: require(&header.title, "title")?,
            path: path.to_string(),
        })
    }
}

/// Pages recorded during a build, in the order they were built.
#[derive(Debug, Default, Clone)]
pub struct TableOfContents {
    entries: Vec<PageMetadata>,
}

struct Category<'a> {
    name: &'a str,
    id: &'a str,
    pages: Vec<&'a PageMetadata>,
}

impl TableOfContents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, entry: PageMetadata) {
        self.entries.push(entry);
    }

    /// Record a page from its header. Pages with incomplete headers are left
    /// out with a warning; returns whether the page was recorded.
    pub fn record_page(&mut self, header: &PageHeader, path: &str) -> bool {
        match PageMetadata::from_header(header, path) {
            Ok(entry) => {
                self.record(entry);
                true
            }
            Err(e) => {
                warn!("Leaving page out of the table of contents: {}", e);
                false
            }
        }
    }

    /// Append another registry's entries after this one's.
    pub fn merge(&mut self, other: TableOfContents) {
        self.entries.extend(other.entries);
    }

    pub fn entries(&self) -> &[PageMetadata] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // Categories in first-seen order. The id shown is the last one seen.
    fn categories(&self) -> Vec<Category<'_>> {
        let mut categories: Vec<Category> = Vec::new();

        for entry in &self.entries {
            match categories.iter_mut().find(|c| c.name == entry.category) {
                Some(category) => {
                    category.id = &entry.category_id;
                    category.pages.push(entry);
                }
                None => categories.push(Category {
                    name: &entry.category,
                    id: &entry.category_id,
                    pages: vec![entry],
                }),
            }
        }

        categories
    }

    pub fn render(&self) -> Element {
        let mut list = Element::new("ul").with_class("table-of-contents");

        for category in self.categories() {
            let header = Element::new("span")
                .with_attribute("id", category.id)
                .with_class("list-header")
                .with_child(category.name);

            let mut pages = Element::new("ul");
            for page in category.pages {
                let link = Element::new("a")
                    .with_attribute("href", page.path.as_str())
                    .with_child(page.title.as_str());
                pages.append(Element::new("li").with_child(link));
            }

            list.append(Element::new("li").with_child(header).with_child(pages));
        }

        Element::new("section").with_child(list)
    }
}
