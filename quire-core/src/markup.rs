use thiserror::Error;
use tracing::debug;

use crate::element::{Element, ImageElement, Node};

pub const CODE_FENCE: &str = "```";
const SECTION_TITLE_MARKER: char = '#';
const NOTE_MARKER: char = '|';
const CODE_SPAN_MARKER: char = '`';
const NOTE_BREAK: &str = "<br>";

const TITLE_KEY: &str = "title:";
// Header-only metadata, never rendered.
const SUPPRESSED_KEYS: [&str; 2] = ["category:", "category_id:"];

const IMAGE_DIRECTIVE: &str = "img";
const LINK_DIRECTIVE: &str = "href";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MarkupError {
    #[error("malformed image directive, expected img(SRC): {line}")]
    MalformedImage { line: String },
    #[error("malformed link directive, expected href(TEXT)[URL]: {line}")]
    MalformedLink { line: String },
}

/// Scanner state carried from one line to the next within a section.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScanState {
    pub code_open: bool,
    pub code_buffer: String,
    pub note_buffer: String,
}

impl ScanState {
    /// Note lines that were never followed by a blank line. They are dropped.
    pub fn has_pending_note(&self) -> bool {
        !self.note_buffer.is_empty()
    }

    /// A fence that was opened but never closed. Its content is dropped.
    pub fn has_open_code(&self) -> bool {
        self.code_open
    }
}

#[derive(Debug)]
pub struct ScannedSection {
    pub section: Element,
    /// State left after the last line.
    pub state: ScanState,
}

/// Convert one section of a page into a `section` element.
pub fn scan_section(text: &str, header: bool) -> Result<Element, MarkupError> {
    Ok(scan_section_with_state(text, header)?.section)
}

/// Like [`scan_section`], but also hands back the terminal scanner state so
/// callers can see what was left unflushed.
pub fn scan_section_with_state(text: &str, header: bool) -> Result<ScannedSection, MarkupError> {
    let mut section = Element::new("section");
    if header {
        section.push_class("header");
    }

    let state = text
        .split('\n')
        .try_fold(ScanState::default(), |state, line| {
            scan_line(state, line, &mut section)
        })?;

    if state.has_pending_note() {
        debug!("Dropping unflushed note at end of section: {:?}", state.note_buffer);
    }
    if state.has_open_code() {
        debug!("Dropping unclosed code block at end of section");
    }

    Ok(ScannedSection { section, state })
}

fn scan_line(mut state: ScanState, line: &str, section: &mut Element) -> Result<ScanState, MarkupError> {
    if state.code_open && line != CODE_FENCE {
        state.code_buffer.push_str(line);
        state.code_buffer.push('\n');
        // A fence anywhere in the line ends the block, the line included.
        if line.contains(CODE_FENCE) {
            close_code_block(&mut state, section);
        }
        return Ok(state);
    }

    if SUPPRESSED_KEYS.iter().any(|key| line.contains(key)) {
        return Ok(state);
    }

    if line.is_empty() {
        if state.has_pending_note() {
            let note = std::mem::take(&mut state.note_buffer);
            section.append(Element::new("div").with_class("note").with_child(note));
        }
    } else if let Some(title) = value_after_key(line, TITLE_KEY) {
        section.append(Element::new("h2").with_class("title").with_child(title));
    } else if let Some(rest) = line.strip_prefix(SECTION_TITLE_MARKER) {
        section.append(Element::new("h6").with_class("section-title").with_child(rest));
    } else if let Some(rest) = line.strip_prefix(NOTE_MARKER) {
        state.note_buffer.push_str(rest);
        state.note_buffer.push_str(NOTE_BREAK);
    } else if line.contains(CODE_FENCE) {
        if state.code_buffer.is_empty() {
            state.code_open = true;
        } else {
            close_code_block(&mut state, section);
        }
    } else if line.starts_with(IMAGE_DIRECTIVE) {
        let src = parse_image(line)?;
        section.append(
            Element::new("div")
                .with_class("img-wrapper")
                .with_child(ImageElement::new(src)),
        );
    } else if line.starts_with(LINK_DIRECTIVE) {
        let (text, url) = parse_link(line)?;
        section.append(Element::new("a").with_attribute("href", url).with_child(text));
    } else {
        section.append_all(inline_nodes(line));
    }

    Ok(state)
}

fn close_code_block(state: &mut ScanState, section: &mut Element) {
    let code = std::mem::take(&mut state.code_buffer);
    let body = Element::new("code")
        .with_class("code-example-body")
        .with_class("cpp")
        .with_child(code);
    section.append(Element::new("pre").with_class("code-example").with_child(body));
    state.code_open = false;
}

/// Text following the first `key` on the line, up to a second `key` if there
/// is one. `None` when the key is absent.
pub(crate) fn value_after_key<'a>(line: &'a str, key: &str) -> Option<&'a str> {
    line.split(key).nth(1)
}

/// `img(SRC)`: SRC runs to the last closing parenthesis; anything after it is
/// ignored.
pub fn parse_image(line: &str) -> Result<&str, MarkupError> {
    line.strip_prefix("img(")
        .and_then(|rest| rest.rfind(')').map(|end| &rest[..end]))
        .ok_or_else(|| MarkupError::MalformedImage {
            line: line.to_string(),
        })
}

/// `href(TEXT)[URL]`, returning `(TEXT, URL)`.
///
/// Both captures are greedy: URL ends at the last `]` and TEXT at the last
/// `)[` before it.
pub fn parse_link(line: &str) -> Result<(&str, &str), MarkupError> {
    let parsed = line.strip_prefix("href(").and_then(|rest| {
        let end = rest.rfind(']')?;
        let split = rest[..end].rfind(")[")?;
        Some((&rest[..split], &rest[split + 2..end]))
    });

    parsed.ok_or_else(|| MarkupError::MalformedLink {
        line: line.to_string(),
    })
}

/// Plain line content. The first backtick pair becomes a `code` element;
/// anything after it, more backticks included, is left as text.
fn inline_nodes(line: &str) -> Vec<Node> {
    let span = line.find(CODE_SPAN_MARKER).and_then(|open| {
        let close = line[open + 1..].find(CODE_SPAN_MARKER)? + open + 1;
        Some((open, close))
    });

    match span {
        Some((open, close)) => vec![
            Node::from(&line[..open]),
            Node::from(Element::new("code").with_child(&line[open + 1..close])),
            Node::from(&line[close + 1..]),
        ],
        None => vec![Node::from(line)],
    }
}
