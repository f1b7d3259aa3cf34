//! Poetry lines, line groups, line breaks and paragraphs.

use crate::attributes::Attributes;
use crate::context::RenderContext;
use crate::handler::OsisTagHandler;
use crate::osis::{self, attr, element};
use crate::writer::{BR, BREAKLINE, NBSP};

/// `<l>`: one line of poetry.
///
/// Lines come either as containers or as `sID`/`eID` milestone pairs. Every end milestone breaks
/// the line; indents are written at the start of the line.
#[derive(Debug, Default)]
pub struct LineHandler {
    /// Whether each open element owes a `<br />` when it ends.
    break_on_end: Vec<bool>,
}

impl LineHandler {
    pub fn new() -> Self {
        Self::default()
    }

    fn indent(cx: &mut RenderContext<'_>, levels: u32) {
        let count = (levels as usize).saturating_mul(cx.params.indent_depth);
        cx.writer.write(&NBSP.repeat(count));
    }
}

impl OsisTagHandler for LineHandler {
    fn tag_name(&self) -> &'static str {
        element::L
    }

    fn start(&mut self, attrs: &Attributes, cx: &mut RenderContext<'_>) {
        let level = osis::level(attrs);
        let mut break_on_end = false;
        if attrs.is_set(attr::EID) {
            cx.writer.write(BR);
        } else if attrs.contains(attr::TYPE, "indent") {
            Self::indent(cx, level);
        } else if attrs.contains(attr::TYPE, "br") {
            cx.writer.write(BR);
        } else if attrs.is_set(attr::SID) {
            Self::indent(cx, level.saturating_sub(1));
        } else {
            Self::indent(cx, level.saturating_sub(1));
            break_on_end = true;
        }
        self.break_on_end.push(break_on_end);
    }

    fn end(&mut self, cx: &mut RenderContext<'_>) {
        if self.break_on_end.pop().unwrap_or_default() {
            cx.writer.write(BR);
        }
    }
}

/// `<lg>`: a stanza. A container stanza ends with a break; milestone stanzas write nothing.
#[derive(Debug, Default)]
pub struct LineGroupHandler {
    break_on_end: Vec<bool>,
}

impl LineGroupHandler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl OsisTagHandler for LineGroupHandler {
    fn tag_name(&self) -> &'static str {
        element::LG
    }

    fn start(&mut self, attrs: &Attributes, _cx: &mut RenderContext<'_>) {
        self.break_on_end.push(!osis::is_milestone(attrs));
    }

    fn end(&mut self, cx: &mut RenderContext<'_>) {
        if self.break_on_end.pop().unwrap_or_default() {
            cx.writer.write(BR);
        }
    }
}

/// `<lb/>`
#[derive(Debug, Default)]
pub struct LineBreakHandler;

impl LineBreakHandler {
    pub fn new() -> Self {
        Self
    }
}

impl OsisTagHandler for LineBreakHandler {
    fn tag_name(&self) -> &'static str {
        element::LB
    }

    fn start(&mut self, _attrs: &Attributes, cx: &mut RenderContext<'_>) {
        if cx.passage.is_any_text_written {
            cx.writer.write(BR);
        }
    }

    fn end(&mut self, _cx: &mut RenderContext<'_>) {}
}

/// `<p>`: breaks after the paragraph, or at its end milestone.
#[derive(Debug, Default)]
pub struct ParagraphHandler {
    break_on_end: Vec<bool>,
}

impl ParagraphHandler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl OsisTagHandler for ParagraphHandler {
    fn tag_name(&self) -> &'static str {
        element::P
    }

    fn start(&mut self, attrs: &Attributes, _cx: &mut RenderContext<'_>) {
        self.break_on_end.push(!attrs.is_set(attr::SID));
    }

    fn end(&mut self, cx: &mut RenderContext<'_>) {
        if self.break_on_end.pop().unwrap_or_default() && cx.passage.is_any_text_written {
            cx.writer.write(BREAKLINE);
        }
    }
}
