use serde::Serialize;
use smol_str::{SmolStr, format_smolstr};

use crate::attributes::Attributes;
use crate::context::RenderContext;
use crate::handler::OsisTagHandler;
use crate::osis::{attr, element};

/// Link scheme of note anchors in the verse text.
pub const NOTE_PROTOCOL: &str = "note";

/// Bodies made only of these characters are leftovers of stripped references.
const PUNCTUATION_ONLY: &str = "[];()., ";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum NoteKind {
    #[default]
    General,
    CrossReference,
}

impl NoteKind {
    fn from_type(note_type: Option<&str>) -> Self {
        match note_type {
            Some("crossReference") => NoteKind::CrossReference,
            _ => NoteKind::General,
        }
    }
}

/// A footnote lifted out of the verse text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub verse_no: u32,
    pub note_ref: SmolStr,
    pub text: String,
    pub kind: NoteKind,
    /// Target of a cross-reference lifted from a `<reference>` inside the note.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub osis_ref: Option<SmolStr>,
}

/// `<note>`: leaves a reference anchor in the text and moves the body into
/// [`RenderContext::notes`].
#[derive(Debug, Default)]
pub struct NoteHandler {
    kind: NoteKind,
    note_count: u32,
    counted_verse: Option<u32>,
}

impl NoteHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// `a`, `b`, ... within a verse, prefixed by the verse number.
    fn next_note_ref(&mut self, verse_no: u32) -> SmolStr {
        if self.counted_verse != Some(verse_no) {
            self.note_count = 0;
            self.counted_verse = Some(verse_no);
        }
        let letter = char::from(b'a' + (self.note_count % 26) as u8);
        self.note_count += 1;
        format_smolstr!("{verse_no}{letter}")
    }
}

impl OsisTagHandler for NoteHandler {
    fn tag_name(&self) -> &'static str {
        element::NOTE
    }

    fn start(&mut self, attrs: &Attributes, cx: &mut RenderContext<'_>) {
        let note_ref = match attrs.get(attr::N) {
            Some(n) if !n.is_empty() => SmolStr::new(n),
            _ => self.next_note_ref(cx.verse.current_verse_no),
        };

        if cx.params.show_notes {
            let target = match &cx.verse.osis_id {
                Some(osis_id) => osis_id.clone(),
                None => format_smolstr!("{}", cx.verse.current_verse_no),
            };
            cx.writer.write(&format!(
                "<a href='{NOTE_PROTOCOL}:{target}/{note_ref}' class='noteRef'>{note_ref}</a> "
            ));
        }

        self.kind = NoteKind::from_type(attrs.get(attr::TYPE));
        cx.open_note_ref = Some(note_ref);
        cx.writer.write_to_temp_store();
    }

    fn end(&mut self, cx: &mut RenderContext<'_>) {
        let text = cx.writer.temp_store_string();
        let has_content = !text.chars().all(|c| PUNCTUATION_ONLY.contains(c));
        if let Some(note_ref) = cx.open_note_ref.take() {
            if has_content {
                cx.notes.push(Note {
                    verse_no: cx.verse.current_verse_no,
                    note_ref,
                    text: text.to_string(),
                    kind: self.kind,
                    osis_ref: None,
                });
            }
        }
        cx.writer.clear_temp_store();
        cx.writer.finish_writing_to_temp_store();
    }
}
