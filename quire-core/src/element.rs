use std::fmt;

/// A child of an [`Element`]: raw text, an image, or another element.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
    Image(ImageElement),
}

impl From<Element> for Node {
    fn from(value: Element) -> Self {
        Node::Element(value)
    }
}

impl From<ImageElement> for Node {
    fn from(value: ImageElement) -> Self {
        Node::Image(value)
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Node::Text(value)
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Node::Text(value.to_string())
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Element(e) => write!(f, "{}", e),
            Node::Text(t) => f.write_str(t),
            Node::Image(i) => write!(f, "{}", i),
        }
    }
}

/// An HTML-like node that owns its children.
///
/// Attribute values are written exactly as given. Nothing is quoted or
/// escaped, so callers hand in whatever the output needs.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    class_list: Vec<String>,
    children: Vec<Node>,
}

impl Element {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            class_list: Vec::new(),
            children: Vec::new(),
        }
    }

    // Builder helpers
    pub fn with_class<S: Into<String>>(mut self, class: S) -> Self {
        self.push_class(class);
        self
    }

    pub fn with_attribute<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.set_attribute(key, value);
        self
    }

    pub fn with_child<N: Into<Node>>(mut self, child: N) -> Self {
        self.append(child);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Set an attribute, replacing the value if the key is already present.
    pub fn set_attribute<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
        let key = key.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| *k == key) {
            Some(existing) => existing.1 = value,
            None => self.attributes.push((key, value)),
        }
    }

    pub fn class_list(&self) -> &[String] {
        &self.class_list
    }

    pub fn push_class<S: Into<String>>(&mut self, class: S) {
        self.class_list.push(class.into());
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn append<N: Into<Node>>(&mut self, child: N) {
        self.children.push(child.into());
    }

    pub fn append_all<I, N>(&mut self, children: I)
    where
        I: IntoIterator<Item = N>,
        N: Into<Node>,
    {
        self.children.extend(children.into_iter().map(Into::into));
    }

    /// Concatenated text of every text descendant, without markup.
    pub fn text(&self) -> String {
        let mut text = String::new();
        for child in &self.children {
            match child {
                Node::Text(t) => text.push_str(t),
                Node::Element(e) => text.push_str(&e.text()),
                Node::Image(_) => {}
            }
        }
        text
    }

    pub fn serialize(&self) -> String {
        self.to_string()
    }

    fn write_open_tag(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.name)?;
        for (key, value) in &self.attributes {
            write!(f, " {}={}", key, value)?;
        }
        f.write_str(" class = ' ")?;
        for class in &self.class_list {
            write!(f, "{} ", class)?;
        }
        f.write_str("'>")
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_open_tag(f)?;
        for child in &self.children {
            write!(f, "{} ", child)?;
        }
        write!(f, "</{}>", self.name)
    }
}

/// Leaf image reference. No class list, no children.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageElement {
    pub src: String,
}

impl ImageElement {
    pub fn new<S: Into<String>>(src: S) -> Self {
        Self { src: src.into() }
    }
}

impl fmt::Display for ImageElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<img src={}/>", self.src)
    }
}
