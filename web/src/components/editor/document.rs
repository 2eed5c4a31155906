//! Editable post document.
//!
//! The structured form is an ops list: every op inserts a text run or an
//! image embed, optionally with formatting attributes. Internally the
//! document is a flat list of units (one per character or embed) so edits
//! are simple splices. The last unit is always a newline, which makes the
//! empty document one unit long.

use std::sync::OnceLock;

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use similar::{capture_diff_slices, Algorithm, DiffOp};

pub type Attributes = Map<String, Value>;

/// Placeholder an embed occupies in the plain-text projection.
pub const EMBED_CHAR: char = '\u{FFFC}';

// ── Structured (ops) form ────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Embed {
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Insert {
    Text(String),
    Embed(Embed),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Op {
    pub insert: Insert,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Attributes>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Delta {
    pub ops: Vec<Op>,
}

// ── Document ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
enum Content {
    Char(char),
    Image(String),
}

#[derive(Debug, Clone, PartialEq)]
struct Unit {
    content: Content,
    attributes: Option<Attributes>,
}

impl Unit {
    fn char(c: char) -> Self {
        Self {
            content: Content::Char(c),
            attributes: None,
        }
    }

    fn newline(attributes: Option<Attributes>) -> Self {
        Self {
            content: Content::Char('\n'),
            attributes,
        }
    }

    fn is_newline(&self) -> bool {
        self.content == Content::Char('\n')
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    units: Vec<Unit>,
}

/// Serializes as its ops form.
impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_delta().serialize(serializer)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            units: vec![Unit::newline(None)],
        }
    }

    /// Initialize from a saved payload: the structured ops form when it
    /// parses, raw markup otherwise. Never fails.
    pub fn load(initial: &str) -> Self {
        if initial.trim().is_empty() {
            return Self::new();
        }

        match serde_json::from_str::<Value>(initial) {
            Ok(value) if value.get("ops").is_some() => match serde_json::from_value::<Delta>(value) {
                Ok(delta) => Self::from_delta(&delta),
                Err(e) => {
                    dioxus_logger::tracing::warn!(
                        "Error parsing structured content, applying as markup: {}",
                        e
                    );
                    Self::from_markup(initial)
                }
            },
            Ok(_) => Self::from_markup(initial),
            Err(e) => {
                dioxus_logger::tracing::debug!("Content is not structured ({}), applying as markup", e);
                Self::from_markup(initial)
            }
        }
    }

    pub fn from_delta(delta: &Delta) -> Self {
        let mut units = Vec::new();
        for op in &delta.ops {
            match &op.insert {
                Insert::Text(text) => {
                    units.extend(text.chars().map(|c| Unit {
                        content: Content::Char(c),
                        attributes: op.attributes.clone(),
                    }));
                }
                Insert::Embed(embed) => units.push(Unit {
                    content: Content::Image(embed.image.clone()),
                    attributes: op.attributes.clone(),
                }),
            }
        }
        let mut document = Self { units };
        document.ensure_trailing_newline();
        document
    }

    pub fn from_markup(html: &str) -> Self {
        let mut builder = MarkupBuilder::default();
        for caps in token_regex().captures_iter(html) {
            if caps.name("comment").is_some() {
                continue;
            }
            if let Some(name) = caps.name("tag") {
                let closing = caps.name("close").is_some();
                let attrs = caps.name("attrs").map(|m| m.as_str()).unwrap_or_default();
                builder.tag(&name.as_str().to_ascii_lowercase(), closing, attrs);
            } else if let Some(text) = caps.name("text") {
                builder.text(&decode_entities(text.as_str()));
            } else {
                builder.text("<");
            }
        }
        let mut document = Self {
            units: builder.finish(),
        };
        document.ensure_trailing_newline();
        document
    }

    fn ensure_trailing_newline(&mut self) {
        if !self.units.last().is_some_and(Unit::is_newline) {
            self.units.push(Unit::newline(None));
        }
    }

    /// Characters plus one per embed, trailing newline included.
    pub fn length(&self) -> usize {
        self.units.len()
    }

    pub fn is_blank(&self) -> bool {
        self.length() <= 1
    }

    pub fn image_urls(&self) -> Vec<&str> {
        self.units
            .iter()
            .filter_map(|unit| match &unit.content {
                Content::Image(url) => Some(url.as_str()),
                Content::Char(_) => None,
            })
            .collect()
    }

    /// Text shown in the editing surface: embeds as U+FFFC, without the
    /// trailing newline.
    pub fn plain_text(&self) -> String {
        self.units[..self.units.len() - 1]
            .iter()
            .map(|unit| match unit.content {
                Content::Char(c) => c,
                Content::Image(_) => EMBED_CHAR,
            })
            .collect()
    }

    // ── Mutations ────────────────────────────────────────────────────────────

    /// Largest index content can be inserted at (before the trailing newline).
    fn clamp_index(&self, index: usize) -> usize {
        index.min(self.units.len() - 1)
    }

    pub fn insert_text(&mut self, index: usize, text: &str) {
        let index = self.clamp_index(index);
        let units: Vec<Unit> = text.chars().map(Unit::char).collect();
        self.units.splice(index..index, units);
    }

    pub fn insert_image(&mut self, index: usize, url: &str) {
        let index = self.clamp_index(index);
        self.units.insert(
            index,
            Unit {
                content: Content::Image(url.to_string()),
                attributes: None,
            },
        );
    }

    /// Delete `len` units from `index`; the trailing newline is never removed.
    pub fn delete(&mut self, index: usize, len: usize) {
        let start = self.clamp_index(index);
        let end = self.clamp_index(index.saturating_add(len));
        self.units.drain(start..end);
    }

    /// Reconcile the document with an edited plain-text projection by
    /// touching only the changed spans, so untouched runs keep their
    /// formatting and embeds.
    /// Returns whether anything changed.
    pub fn apply_text_edit(&mut self, edited: &str) -> bool {
        let current: Vec<char> = self.plain_text().chars().collect();
        let edited: Vec<char> = edited.chars().collect();
        if current == edited {
            return false;
        }

        // Back to front so earlier indices stay valid.
        let ops = capture_diff_slices(Algorithm::Myers, &current, &edited);
        for op in ops.iter().rev() {
            match *op {
                DiffOp::Equal { .. } => {}
                DiffOp::Delete {
                    old_index, old_len, ..
                } => self.delete(old_index, old_len),
                DiffOp::Insert {
                    old_index,
                    new_index,
                    new_len,
                } => {
                    let text: String = edited[new_index..new_index + new_len].iter().collect();
                    self.insert_text(old_index, &text);
                }
                DiffOp::Replace {
                    old_index,
                    old_len,
                    new_index,
                    new_len,
                } => {
                    let text: String = edited[new_index..new_index + new_len].iter().collect();
                    self.delete(old_index, old_len);
                    self.insert_text(old_index, &text);
                }
            }
        }
        true
    }

    /// Toggle an inline attribute over `[index, index + len)`: cleared when
    /// every character already carries it, set otherwise. Newlines and
    /// embeds are skipped.
    pub fn toggle_inline(&mut self, index: usize, len: usize, key: &str) -> bool {
        let start = self.clamp_index(index);
        let end = self.clamp_index(index.saturating_add(len));
        let is_text = |unit: &Unit| matches!(unit.content, Content::Char(c) if c != '\n');

        let mut targets = self.units[start..end].iter().filter(|u| is_text(u)).peekable();
        if targets.peek().is_none() {
            return false;
        }
        let all_set = targets.all(|unit| {
            unit.attributes
                .as_ref()
                .and_then(|a| a.get(key))
                .is_some_and(|v| v == &Value::Bool(true))
        });

        for unit in self.units[start..end].iter_mut().filter(|u| is_text(u)) {
            let attrs = unit.attributes.get_or_insert_with(Attributes::new);
            if all_set {
                attrs.remove(key);
            } else {
                attrs.insert(key.to_string(), Value::Bool(true));
            }
            if attrs.is_empty() {
                unit.attributes = None;
            }
        }
        true
    }

    /// Set (or clear with `None`) the header level of the line containing
    /// `index`.
    pub fn set_line_header(&mut self, index: usize, level: Option<u8>) {
        let start = self.clamp_index(index);
        let Some(offset) = self.units[start..].iter().position(Unit::is_newline) else {
            return;
        };
        let newline = &mut self.units[start + offset];
        let mut attrs = newline.attributes.take().unwrap_or_default();
        match level {
            Some(level) => {
                attrs.insert("header".to_string(), Value::from(level));
            }
            None => {
                attrs.remove("header");
            }
        }
        newline.attributes = Some(attrs).filter(|a| !a.is_empty());
    }

    // ── Serialization ────────────────────────────────────────────────────────

    pub fn to_delta(&self) -> Delta {
        let mut ops: Vec<Op> = Vec::new();
        for unit in &self.units {
            match &unit.content {
                Content::Image(url) => ops.push(Op {
                    insert: Insert::Embed(Embed { image: url.clone() }),
                    attributes: unit.attributes.clone(),
                }),
                Content::Char(c) => {
                    if let Some(Op {
                        insert: Insert::Text(text),
                        attributes,
                    }) = ops.last_mut()
                    {
                        if *attributes == unit.attributes {
                            text.push(*c);
                            continue;
                        }
                    }
                    ops.push(Op {
                        insert: Insert::Text(c.to_string()),
                        attributes: unit.attributes.clone(),
                    });
                }
            }
        }
        Delta { ops }
    }

    /// Structured content as stored in temporary drafts.
    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.to_delta()).unwrap_or_else(|_| r#"{"ops":[]}"#.to_string())
    }

    /// Rendered markup, one block element per line.
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        let mut line = String::new();
        let mut run = String::new();
        let mut run_attrs: Option<&Attributes> = None;

        for unit in &self.units {
            match &unit.content {
                Content::Char('\n') => {
                    flush_run(&mut line, &mut run, run_attrs);
                    let tag = block_tag(unit.attributes.as_ref());
                    if line.is_empty() {
                        line.push_str("<br>");
                    }
                    html.push_str(&format!("<{tag}>{line}</{tag}>"));
                    line.clear();
                }
                Content::Char(c) => {
                    if run_attrs != unit.attributes.as_ref() {
                        flush_run(&mut line, &mut run, run_attrs);
                        run_attrs = unit.attributes.as_ref();
                    }
                    run.push(*c);
                }
                Content::Image(url) => {
                    flush_run(&mut line, &mut run, run_attrs);
                    line.push_str(&format!("<img src=\"{}\">", escape_html(url)));
                }
            }
        }
        html
    }
}

fn flush_run(line: &mut String, run: &mut String, attrs: Option<&Attributes>) {
    if run.is_empty() {
        return;
    }
    line.push_str(&wrap_inline(&escape_html(run), attrs));
    run.clear();
}

fn block_tag(attrs: Option<&Attributes>) -> &'static str {
    match attrs.and_then(|a| a.get("header")).and_then(Value::as_u64) {
        Some(1) | Some(2) => "h2",
        Some(_) => "h3",
        None => "p",
    }
}

fn wrap_inline(text: &str, attrs: Option<&Attributes>) -> String {
    let Some(attrs) = attrs else {
        return text.to_string();
    };
    let enabled = |key: &str| attrs.get(key).and_then(Value::as_bool).unwrap_or(false);

    let mut out = text.to_string();
    if enabled("strike") {
        out = format!("<s>{out}</s>");
    }
    if enabled("underline") {
        out = format!("<u>{out}</u>");
    }
    if enabled("italic") {
        out = format!("<em>{out}</em>");
    }
    if enabled("bold") {
        out = format!("<strong>{out}</strong>");
    }
    if let Some(href) = attrs.get("link").and_then(Value::as_str) {
        out = format!("<a href=\"{}\">{out}</a>", escape_html(href));
    }
    out
}

// ── Markup parsing ───────────────────────────────────────────────────────────

fn token_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?s)(?P<comment><!--.*?-->)|<(?P<close>/)?(?P<tag>[a-zA-Z][a-zA-Z0-9]*)(?P<attrs>[^>]*)>|(?P<text>[^<]+)|<",
        )
        .expect("markup token pattern is valid")
    })
}

fn attr_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?i)\b(?P<name>[a-z-]+)\s*=\s*(?:"(?P<dq>[^"]*)"|'(?P<sq>[^']*)'|(?P<bare>[^\s>]+))"#)
            .expect("attribute pattern is valid")
    })
}

fn entity_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"&(#[xX][0-9a-fA-F]+|#[0-9]+|[a-zA-Z]+);").expect("entity pattern is valid")
    })
}

fn whitespace_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("whitespace pattern is valid"))
}

fn attr_value(attrs: &str, name: &str) -> Option<String> {
    attr_regex().captures_iter(attrs).find_map(|caps| {
        if !caps["name"].eq_ignore_ascii_case(name) {
            return None;
        }
        caps.name("dq")
            .or_else(|| caps.name("sq"))
            .or_else(|| caps.name("bare"))
            .map(|m| decode_entities(m.as_str()))
    })
}

fn decode_entities(text: &str) -> String {
    entity_regex()
        .replace_all(text, |caps: &Captures| {
            let entity = &caps[1];
            let decoded = match entity {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                "nbsp" => Some('\u{a0}'),
                _ if entity.starts_with("#x") || entity.starts_with("#X") => {
                    u32::from_str_radix(&entity[2..], 16).ok().and_then(char::from_u32)
                }
                _ if entity.starts_with('#') => entity[1..].parse().ok().and_then(char::from_u32),
                _ => None,
            };
            decoded
                .map(String::from)
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Escape HTML special characters
pub fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

#[derive(Default)]
struct MarkupBuilder {
    units: Vec<Unit>,
    line_has_content: bool,
    header: Option<u64>,
    inline: Vec<(String, &'static str, Value)>,
}

impl MarkupBuilder {
    fn current_attributes(&self) -> Option<Attributes> {
        if self.inline.is_empty() {
            return None;
        }
        let mut attrs = Attributes::new();
        for (_, key, value) in &self.inline {
            attrs.insert((*key).to_string(), value.clone());
        }
        Some(attrs)
    }

    fn end_line(&mut self) {
        let attrs = self.header.map(|level| {
            let mut attrs = Attributes::new();
            attrs.insert("header".to_string(), Value::from(level));
            attrs
        });
        self.units.push(Unit::newline(attrs));
        self.line_has_content = false;
    }

    fn tag(&mut self, name: &str, closing: bool, attrs: &str) {
        match name {
            "p" | "div" | "li" | "blockquote" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                if closing {
                    self.end_line();
                    self.header = None;
                } else {
                    if self.line_has_content {
                        self.end_line();
                    }
                    self.header = match name {
                        "h1" | "h2" => Some(2),
                        "h3" | "h4" | "h5" | "h6" => Some(3),
                        _ => None,
                    };
                }
            }
            "br" => {
                if self.line_has_content {
                    self.end_line();
                }
            }
            "img" => {
                if let Some(src) = attr_value(attrs, "src") {
                    self.units.push(Unit {
                        content: Content::Image(src),
                        attributes: None,
                    });
                    self.line_has_content = true;
                }
            }
            _ => self.inline_tag(name, closing, attrs),
        }
    }

    fn inline_tag(&mut self, name: &str, closing: bool, attrs: &str) {
        let format: Option<(&'static str, Value)> = match name {
            "strong" | "b" => Some(("bold", Value::Bool(true))),
            "em" | "i" => Some(("italic", Value::Bool(true))),
            "u" => Some(("underline", Value::Bool(true))),
            "s" | "strike" | "del" => Some(("strike", Value::Bool(true))),
            "a" if !closing => attr_value(attrs, "href").map(|href| ("link", Value::String(href))),
            "a" => Some(("link", Value::Null)),
            _ => None,
        };
        let Some((key, value)) = format else {
            return;
        };

        if closing {
            if let Some(pos) = self.inline.iter().rposition(|(tag, _, _)| tag == name) {
                self.inline.remove(pos);
            }
        } else {
            self.inline.push((name.to_string(), key, value));
        }
    }

    fn text(&mut self, raw: &str) {
        let collapsed = whitespace_regex().replace_all(raw, " ");
        let text = if self.line_has_content {
            collapsed.as_ref()
        } else {
            collapsed.trim_start()
        };
        if text.is_empty() {
            return;
        }
        let attributes = self.current_attributes();
        self.units.extend(text.chars().map(|c| Unit {
            content: Content::Char(c),
            attributes: attributes.clone(),
        }));
        self.line_has_content = true;
    }

    fn finish(mut self) -> Vec<Unit> {
        if self.line_has_content {
            self.end_line();
        }
        self.units
    }
}

// ── Cursor mapping ───────────────────────────────────────────────────────────

/// Textarea selection offsets count UTF-16 code units; the document counts
/// characters.
pub fn char_index_from_utf16(text: &str, utf16_offset: usize) -> usize {
    let mut units = 0;
    for (index, c) in text.chars().enumerate() {
        if units >= utf16_offset {
            return index;
        }
        units += c.len_utf16();
    }
    text.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_document_has_length_one() {
        let doc = Document::new();
        assert_eq!(doc.length(), 1);
        assert!(doc.is_blank());
        assert_eq!(doc.plain_text(), "");
        assert_eq!(doc.to_html(), "<p><br></p>");
    }

    #[test]
    fn load_structured_content() {
        let payload = json!({
            "ops": [
                { "insert": "Title" },
                { "insert": "\n", "attributes": { "header": 2 } },
                { "insert": "hello " },
                { "insert": "world", "attributes": { "bold": true } },
                { "insert": "\n" }
            ]
        })
        .to_string();

        let doc = Document::load(&payload);
        assert_eq!(doc.plain_text(), "Title\nhello world");
        assert_eq!(
            doc.to_html(),
            "<h2>Title</h2><p>hello <strong>world</strong></p>"
        );
    }

    #[test]
    fn malformed_structured_content_falls_back_to_markup() {
        let doc = Document::load(r#"{"ops": [{"retain": 3}]"#);
        assert!(doc.plain_text().contains("retain"));

        let doc = Document::load(r#"{"ops": [{"retain": 3}]}"#);
        assert!(!doc.is_blank());
    }

    #[test]
    fn json_without_ops_is_markup() {
        let doc = Document::load(r#"{"title":"x"}"#);
        assert_eq!(doc.plain_text(), r#"{"title":"x"}"#);
    }

    #[test]
    fn load_markup() {
        let doc = Document::load(
            "<h2>Day</h2>\n<p>a &amp; <em>b</em><br>c</p><p><br></p><p><img src=\"https://s/i.png\"></p>",
        );
        assert_eq!(doc.plain_text(), format!("Day\na & b\nc\n\n{EMBED_CHAR}"));
        assert_eq!(doc.image_urls(), vec!["https://s/i.png"]);
        assert_eq!(
            doc.to_html(),
            "<h2>Day</h2><p>a &amp; <em>b</em></p><p>c</p><p><br></p><p><img src=\"https://s/i.png\"></p>"
        );
    }

    #[test]
    fn plain_text_input_becomes_one_paragraph() {
        let doc = Document::load("just words");
        assert_eq!(doc.to_html(), "<p>just words</p>");
        assert_eq!(doc.length(), "just words".len() + 1);
    }

    #[test]
    fn links_survive_markup_round_trip() {
        let doc = Document::from_markup(r#"<p>see <a href="https://x.dev/?a=1&amp;b=2">here</a></p>"#);
        assert_eq!(
            doc.to_html(),
            r#"<p>see <a href="https://x.dev/?a=1&amp;b=2">here</a></p>"#
        );
    }

    #[test]
    fn structured_round_trip_keeps_ops() {
        let mut doc = Document::new();
        doc.insert_text(0, "ab");
        doc.insert_image(1, "https://s/x.png");

        let reloaded = Document::load(&doc.to_json());
        assert_eq!(reloaded, doc);
        assert_eq!(reloaded.length(), 4);
    }

    #[test]
    fn text_edit_preserves_untouched_formatting() {
        let mut doc = Document::load(r#"{"ops":[{"insert":"bold","attributes":{"bold":true}},{"insert":" tail\n"}]}"#);
        assert!(doc.apply_text_edit("bold new tail"));
        assert_eq!(doc.to_html(), "<p><strong>bold</strong> new tail</p>");
        assert!(!doc.apply_text_edit("bold new tail"));
    }

    #[test]
    fn serializes_as_ops() {
        let mut doc = Document::new();
        doc.insert_text(0, "hi");
        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value, serde_json::to_value(doc.to_delta()).unwrap());
        assert_eq!(value["ops"][0]["insert"], "hi\n");
    }

    #[test]
    fn edits_on_both_sides_keep_middle_formatting() {
        let mut doc = Document::load(
            r#"{"ops":[{"insert":"a"},{"insert":"B","attributes":{"bold":true}},{"insert":"c\n"}]}"#,
        );
        assert!(doc.apply_text_edit("xaBcy"));
        assert_eq!(doc.to_html(), "<p>xa<strong>B</strong>cy</p>");
    }

    #[test]
    fn deleting_embed_placeholder_removes_image() {
        let mut doc = Document::new();
        doc.insert_text(0, "ab");
        doc.insert_image(1, "https://s/x.png");
        assert_eq!(doc.plain_text(), format!("a{EMBED_CHAR}b"));

        doc.apply_text_edit("ab");
        assert!(doc.image_urls().is_empty());
    }

    #[test]
    fn trailing_newline_cannot_be_deleted() {
        let mut doc = Document::new();
        doc.insert_text(0, "abc");
        doc.delete(0, 100);
        assert_eq!(doc.length(), 1);

        doc.insert_image(99, "https://s/y.png");
        assert_eq!(doc.length(), 2);
        assert_eq!(doc.plain_text(), EMBED_CHAR.to_string());
    }

    #[test]
    fn toggling_bold_sets_then_clears() {
        let mut doc = Document::new();
        doc.insert_text(0, "one two");
        assert!(doc.toggle_inline(4, 3, "bold"));
        assert_eq!(doc.to_html(), "<p>one <strong>two</strong></p>");

        assert!(doc.toggle_inline(4, 3, "bold"));
        assert_eq!(doc.to_html(), "<p>one two</p>");
        assert!(!doc.toggle_inline(7, 5, "bold"));
    }

    #[test]
    fn header_applies_to_caret_line() {
        let mut doc = Document::new();
        doc.insert_text(0, "Title\nbody");
        doc.set_line_header(2, Some(2));
        assert_eq!(doc.to_html(), "<h2>Title</h2><p>body</p>");

        doc.set_line_header(0, None);
        assert_eq!(doc.to_html(), "<p>Title</p><p>body</p>");
    }

    #[test]
    fn text_is_escaped_in_html() {
        let mut doc = Document::new();
        doc.insert_text(0, "<script>");
        assert_eq!(doc.to_html(), "<p>&lt;script&gt;</p>");
    }

    #[test]
    fn utf16_offsets_map_to_char_indices() {
        let text = "a😀b";
        assert_eq!(char_index_from_utf16(text, 0), 0);
        assert_eq!(char_index_from_utf16(text, 1), 1);
        assert_eq!(char_index_from_utf16(text, 3), 2);
        assert_eq!(char_index_from_utf16(text, 10), 3);
    }
}
