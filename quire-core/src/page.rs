use std::path::{Path, PathBuf};

use crate::element::Element;
use crate::markup::{MarkupError, scan_section, value_after_key};

pub const SECTION_SEPARATOR: &str = "---";
pub const DOCTYPE: &str = "<!DOCTYPE html>";
pub const HEAD_PLACEHOLDER: &str = "$head";
pub const MENU_PLACEHOLDER: &str = "$menu";

const CATEGORY_KEY: &str = "category:";
const CATEGORY_ID_KEY: &str = "category_id:";
const TITLE_KEY: &str = "title:";

/// Metadata found in the first segment of a page.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PageHeader {
    pub category: Option<String>,
    pub category_id: Option<String>,
    pub title: Option<String>,
}

impl PageHeader {
    /// Mine `category:`, `category_id:` and `title:` from a header segment.
    /// The first line carrying a key wins.
    pub fn parse(header: &str) -> Self {
        let mut parsed = PageHeader::default();

        for line in header.split('\n') {
            let fields = [
                (CATEGORY_KEY, &mut parsed.category),
                (CATEGORY_ID_KEY, &mut parsed.category_id),
                (TITLE_KEY, &mut parsed.title),
            ];
            for (key, field) in fields {
                if field.is_some() {
                    continue;
                }
                if let Some(value) = value_after_key(line, key) {
                    *field = Some(value.trim().to_string());
                }
            }
        }

        parsed
    }
}

#[derive(Debug)]
pub struct SplitPage<'a> {
    pub header: PageHeader,
    /// Every segment, the header segment first.
    pub sections: Vec<&'a str>,
}

/// Split a page on every `---`, wherever it appears.
pub fn split_page(content: &str) -> SplitPage<'_> {
    let sections: Vec<&str> = content.split(SECTION_SEPARATOR).collect();
    let header = PageHeader::parse(sections[0]);

    SplitPage { header, sections }
}

/// A page converted to a full HTML document.
#[derive(Debug)]
pub struct RenderedPage {
    pub html: String,
    pub header: PageHeader,
    /// Output file name, e.g. `intro.html` for `pages/intro.txt`.
    pub output: PathBuf,
    /// `output` as a link target for the table of contents.
    pub path: String,
}

/// Convert a page's text into an HTML document.
///
/// `source` only feeds the output file name; nothing is read from disk.
pub fn render_page(content: &str, source: &Path, extension: &str) -> Result<RenderedPage, MarkupError> {
    let split = split_page(content);

    let sections = split
        .sections
        .iter()
        .enumerate()
        .map(|(i, text)| scan_section(text, i == 0))
        .collect::<Result<Vec<_>, _>>()?;

    let title = split.header.title.as_deref().unwrap_or_default();
    let html = assemble_document(title, sections);

    let output = output_file_name(source, extension);
    Ok(RenderedPage {
        html,
        path: output.to_string_lossy().into_owned(),
        output,
        header: split.header,
    })
}

/// Wrap rendered sections in the page skeleton. Template placeholders for the
/// head and the menu are left in for the template pass.
pub fn assemble_document(title: &str, sections: Vec<Element>) -> String {
    let head = Element::new("head")
        .with_child(HEAD_PLACEHOLDER)
        .with_child(Element::new("title").with_child(title));

    let mut container = Element::new("div").with_class("container");
    container.append_all(sections);

    let body = Element::new("body")
        .with_child(MENU_PLACEHOLDER)
        .with_child(container);

    let html = Element::new("html").with_child(head).with_child(body);

    format!("{}\n{}", DOCTYPE, html)
}

/// File name of `source` with its extension swapped.
pub fn output_file_name(source: &Path, extension: &str) -> PathBuf {
    source
        .file_name()
        .map(Path::new)
        .unwrap_or(source)
        .with_extension(extension)
}
