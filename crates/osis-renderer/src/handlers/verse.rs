//! `<verse>`: wraps each verse in a span that carries its number and decorations.
//!
//! A verse that turns out to have no text is removed again when it closes, including its verse
//! number and any verse-per-line `<div>` it opened.

use smol_str::SmolStr;
use std::fmt::Write as _;

use super::markers::{BookmarkMarker, MyNoteMarker, VerseDecoration};
use crate::attributes::Attributes;
use crate::context::RenderContext;
use crate::handler::OsisTagHandler;
use crate::osis::{attr, element, osis_id_to_trailing_num};
use crate::params::RenderParameters;
use crate::writer::{NBSP, ZERO_WIDTH_SPACE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VerseElement {
    /// `<verse osisID=..>text</verse>`
    Container,
    /// `<verse sID=../>`; the verse stays open after the element ends.
    StartMilestone,
    /// `<verse eID=../>`; closes the open verse as soon as it starts.
    EndMilestone,
}

#[derive(Debug, Clone, Copy)]
struct OpenVerse {
    rollback_position: usize,
    line_was_open: bool,
}

#[derive(Debug)]
pub struct VerseHandler {
    decorations: Vec<Box<dyn VerseDecoration>>,
    elements: Vec<VerseElement>,
    open: Option<OpenVerse>,
}

impl VerseHandler {
    pub fn new(params: &RenderParameters) -> Self {
        Self {
            decorations: vec![
                Box::new(BookmarkMarker::new(params)),
                Box::new(MyNoteMarker::new(params)),
            ],
            elements: Vec::new(),
            open: None,
        }
    }

    fn open_verse(&mut self, attrs: &Attributes, cx: &mut RenderContext<'_>) {
        if self.open.is_some() {
            tracing::debug!("verse opened before the previous one closed");
            self.close_verse(cx);
        }

        let rollback_position = cx.writer.position();
        let line_was_open = cx.passage.is_verse_line_open;

        let osis_id = attrs.get(attr::OSIS_ID).filter(|id| !id.is_empty());
        let verse_no = osis_id
            .and_then(osis_id_to_trailing_num)
            .unwrap_or(cx.verse.current_verse_no.saturating_add(1));
        cx.verse.current_verse_no = verse_no;
        cx.verse.osis_id = osis_id.map(SmolStr::new);

        if cx.params.verse_per_line {
            if cx.passage.is_verse_line_open {
                cx.writer.write("</div>");
            }
            cx.writer.write("<div>");
            cx.passage.is_verse_line_open = true;
        }

        cx.verse.position_to_insert_before_verse = cx.writer.position();

        let mut classes = String::from("verse");
        for class in self.decorations.iter().flat_map(|d| d.classes(&cx.verse)) {
            classes.push(' ');
            classes.push_str(&class);
        }
        let _ = write!(cx.writer, "<span class='{classes}' id='{verse_no}'>");
        if cx.params.show_verse_numbers && verse_no != 0 {
            let _ = write!(cx.writer, "<span class='verseNo'>{verse_no}</span>{NBSP}");
        } else {
            // keeps decorations anchored even without a visible number
            let _ = write!(
                cx.writer,
                "<span class='verseNo position-marker'>{ZERO_WIDTH_SPACE}</span>"
            );
        }

        cx.verse.is_text_since_verse = false;
        self.open = Some(OpenVerse {
            rollback_position,
            line_was_open,
        });
    }

    fn close_verse(&mut self, cx: &mut RenderContext<'_>) {
        let Some(open) = self.open.take() else {
            tracing::debug!("verse end without an open verse");
            return;
        };

        // a pre-verse start milestone without its end milestone would otherwise swallow the verse
        cx.writer.abort_any_unterminated_insertion();

        if cx.verse.is_text_since_verse {
            cx.writer.write("</span>");
        } else {
            cx.writer.remove_after(open.rollback_position);
            cx.passage.is_verse_line_open = open.line_was_open;
        }
    }
}

impl OsisTagHandler for VerseHandler {
    fn tag_name(&self) -> &'static str {
        element::VERSE
    }

    fn start(&mut self, attrs: &Attributes, cx: &mut RenderContext<'_>) {
        let kind = if attrs.is_set(attr::EID) {
            VerseElement::EndMilestone
        } else if attrs.is_set(attr::SID) {
            VerseElement::StartMilestone
        } else {
            VerseElement::Container
        };
        self.elements.push(kind);

        match kind {
            VerseElement::EndMilestone => self.close_verse(cx),
            VerseElement::StartMilestone | VerseElement::Container => self.open_verse(attrs, cx),
        }
    }

    fn end(&mut self, cx: &mut RenderContext<'_>) {
        match self.elements.pop() {
            Some(VerseElement::Container) => self.close_verse(cx),
            Some(_) => {}
            None => tracing::warn!("verse end without a matching start"),
        }
    }
}
