//! State shared by every handler during one render pass.
//!
//! Handlers communicate through these fields instead of a document tree. Who touches what:
//!
//! | field                                   | written by                  | read by                       |
//! |-----------------------------------------|-----------------------------|-------------------------------|
//! | `verse.current_verse_no`, `verse.osis_id` | verse handler               | markers, notes                |
//! | `verse.position_to_insert_before_verse` | verse handler, chapter divider | div, milestone, title, divider |
//! | `verse.is_text_since_verse`             | verse handler, dispatcher   | verse, milestone, title       |
//! | `passage.is_any_text_written`           | dispatcher, references      | div, milestone, line breaks   |
//! | `passage.is_verse_line_open`            | verse handler               | verse handler, dispatcher     |
//! | `open_note_ref`                         | note handler                | reference handler             |

use smol_str::SmolStr;

use crate::handlers::note::Note;
use crate::params::RenderParameters;
use crate::writer::HtmlTextWriter;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerseInfo {
    pub current_verse_no: u32,
    pub osis_id: Option<SmolStr>,
    /// Offset just before the current verse's opening span. Only meaningful while that verse is
    /// current; later insertions can shift the content it pointed at.
    pub position_to_insert_before_verse: usize,
    pub is_text_since_verse: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassageInfo {
    pub is_any_text_written: bool,
    /// A verse-per-line `<div>` is open and must be closed before the next line or at the end.
    pub is_verse_line_open: bool,
}

#[derive(Debug)]
pub struct RenderContext<'p> {
    pub params: &'p RenderParameters,
    pub writer: HtmlTextWriter,
    pub verse: VerseInfo,
    pub passage: PassageInfo,
    pub notes: Vec<Note>,
    /// Reference of the `<note>` being captured, if any.
    pub open_note_ref: Option<SmolStr>,
}

impl<'p> RenderContext<'p> {
    pub fn new(params: &'p RenderParameters) -> Self {
        Self {
            params,
            writer: HtmlTextWriter::new(),
            verse: VerseInfo::default(),
            passage: PassageInfo::default(),
            notes: Vec::new(),
            open_note_ref: None,
        }
    }

    /// See [`HtmlTextWriter::write_optionally_before_verse`].
    pub fn write_optionally_before_verse(&mut self, text: &str) -> bool {
        self.writer.write_optionally_before_verse(text, &self.verse)
    }
}
