//! Minimal markup parser.
//!
//! A single left-to-right scan that produces a generic element tree. It has no schema
//! knowledge: comments, processing instructions and `<!...>` declarations are skipped, entity
//! references are kept verbatim, and CDATA sections become plain text runs.

use crate::{Error, Result};
use indexmap::IndexMap;

/// Attribute map; keys are case-sensitive and keep document order.
pub type Attributes = IndexMap<String, String>;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Node {
    pub name: String,
    pub attributes: Attributes,
    pub children: Vec<Item>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Text(String),
    Element(Node),
}

/// The top-level elements of a parsed document.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    pub nodes: Vec<Node>,
}

impl Node {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Child elements, skipping text runs.
    pub fn elements(&self) -> impl Iterator<Item = &Node> {
        self.children.iter().filter_map(|item| match item {
            Item::Element(node) => Some(node),
            Item::Text(_) => None,
        })
    }

    /// Folds the `style` attribute into plain attributes and removes it.
    pub fn expand_style(&mut self) {
        expand_style(&mut self.attributes);
    }

    /// A shallow copy of the attributes with `style` folded in.
    pub fn expanded_attributes(&self) -> Attributes {
        let mut attrs = self.attributes.clone();
        expand_style(&mut attrs);
        attrs
    }
}

/// Folds `style="name: value; ..."` declarations into `attrs`, overriding existing entries.
///
/// Declaration names are lowercased and a trailing `!important` is dropped.
pub fn expand_style(attrs: &mut Attributes) {
    let Some(style) = attrs.shift_remove("style") else {
        return;
    };
    for decl in style.split(';') {
        let Some((name, value)) = decl.split_once(':') else {
            continue;
        };
        let name = name.trim().to_ascii_lowercase();
        if name.is_empty() {
            continue;
        }
        let mut value = value.trim();
        if let Some(idx) = value.to_ascii_lowercase().rfind("!important") {
            if value[idx..].trim().eq_ignore_ascii_case("!important") {
                value = value[..idx].trim_end();
            }
        }
        attrs.insert(name, value.to_string());
    }
}

pub fn parse_markup(src: &str) -> Result<Document> {
    Scanner::new(src).document()
}

struct Scanner<'a> {
    src: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'-' | b'.' | b':' | b'_')
}

impl<'a> Scanner<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            bytes: src.as_bytes(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn starts_with(&self, s: &str) -> bool {
        self.src[self.pos..].starts_with(s)
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    /// Moves past the next `delim`, failing when it never occurs.
    fn skip_past(&mut self, delim: &str, what: &str) -> Result<()> {
        let start = self.pos;
        match self.src[self.pos..].find(delim) {
            Some(idx) => {
                self.pos += idx + delim.len();
                Ok(())
            }
            None => Err(Error::malformed(start, format!("unterminated {what}"))),
        }
    }

    fn document(mut self) -> Result<Document> {
        let mut doc = Document::default();
        loop {
            self.skip_ws();
            let Some(b) = self.peek() else {
                break;
            };
            if b != b'<' {
                // Stray top-level text carries no meaning.
                match self.src[self.pos..].find('<') {
                    Some(idx) => self.pos += idx,
                    None => break,
                }
                continue;
            }
            if self.starts_with("</") {
                return Err(Error::malformed(self.pos, "closing tag without open element"));
            }
            if self.skip_declaration()?.is_some() {
                continue;
            }
            doc.nodes.push(self.element()?);
        }
        Ok(doc)
    }

    /// Skips a comment, processing instruction or declaration at the cursor.
    ///
    /// Returns `Some(text)` for a CDATA section (whose content is text), `Some("")` for other
    /// skipped constructs, and `None` when the cursor is at an ordinary tag.
    fn skip_declaration(&mut self) -> Result<Option<&'a str>> {
        if self.starts_with("<!--") {
            self.pos += 4;
            self.skip_past("-->", "comment")?;
            return Ok(Some(""));
        }
        if self.starts_with("<![CDATA[") {
            self.pos += 9;
            let start = self.pos;
            self.skip_past("]]>", "CDATA section")?;
            return Ok(Some(&self.src[start..self.pos - 3]));
        }
        if self.starts_with("<?") {
            self.pos += 2;
            self.skip_past("?>", "processing instruction")?;
            return Ok(Some(""));
        }
        if self.starts_with("<!") {
            self.pos += 2;
            self.skip_past(">", "declaration")?;
            return Ok(Some(""));
        }
        Ok(None)
    }

    fn name(&mut self) -> &'a str {
        let start = self.pos;
        while self.peek().is_some_and(is_name_byte) {
            self.pos += 1;
        }
        &self.src[start..self.pos]
    }

    fn element(&mut self) -> Result<Node> {
        let open_at = self.pos;
        self.pos += 1;
        let name = self.name();
        if name.is_empty() {
            return Err(Error::malformed(open_at, "expected element name after '<'"));
        }
        let mut node = Node::new(name);
        node.attributes = self.attributes()?;

        let self_closing = self.peek() == Some(b'/');
        if self_closing {
            self.pos += 1;
        }
        if self.peek() != Some(b'>') {
            return Err(Error::malformed(
                self.pos,
                format!("expected '>' to end <{name}>"),
            ));
        }
        self.pos += 1;
        if self_closing {
            return Ok(node);
        }

        loop {
            self.skip_ws();
            let Some(b) = self.peek() else {
                return Err(Error::malformed(open_at, format!("unclosed element <{name}>")));
            };
            if self.starts_with("</") {
                let close_at = self.pos;
                self.pos += 2;
                let close = self.name();
                if close != name {
                    return Err(Error::malformed(
                        close_at,
                        format!("expected </{name}>, found </{close}>"),
                    ));
                }
                self.skip_ws();
                if self.peek() != Some(b'>') {
                    return Err(Error::malformed(
                        self.pos,
                        format!("expected '>' to end </{name}>"),
                    ));
                }
                self.pos += 1;
                break;
            }
            if b == b'<' {
                match self.skip_declaration()? {
                    Some("") => {}
                    Some(text) => node.children.push(Item::Text(text.to_string())),
                    None => node.children.push(Item::Element(self.element()?)),
                }
                continue;
            }
            let start = self.pos;
            let end = self.src[start..]
                .find('<')
                .map_or(self.bytes.len(), |idx| start + idx);
            self.pos = end;
            node.children.push(Item::Text(self.src[start..end].to_string()));
        }
        Ok(node)
    }

    fn attributes(&mut self) -> Result<Attributes> {
        let mut attrs = Attributes::new();
        loop {
            self.skip_ws();
            match self.peek() {
                None => return Err(Error::malformed(self.pos, "unexpected end of input in tag")),
                Some(b'/' | b'>') => break,
                Some(_) => {}
            }
            let name_at = self.pos;
            let name = self.name();
            if name.is_empty() {
                return Err(Error::malformed(name_at, "unexpected character in tag"));
            }
            self.skip_ws();
            if self.peek() != Some(b'=') {
                attrs.insert(name.to_string(), String::new());
                continue;
            }
            self.pos += 1;
            self.skip_ws();
            let quote = match self.peek() {
                Some(q @ (b'"' | b'\'')) => q,
                _ => {
                    return Err(Error::malformed(
                        self.pos,
                        format!("expected quoted value for attribute '{name}'"),
                    ));
                }
            };
            self.pos += 1;
            let start = self.pos;
            let Some(len) = self.bytes[start..].iter().position(|&b| b == quote) else {
                return Err(Error::malformed(
                    start,
                    format!("unterminated value for attribute '{name}'"),
                ));
            };
            attrs.insert(name.to_string(), self.src[start..start + len].to_string());
            self.pos = start + len + 1;
        }
        Ok(attrs)
    }
}
