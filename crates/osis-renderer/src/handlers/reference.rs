use smol_str::SmolStr;

use crate::attributes::Attributes;
use crate::context::RenderContext;
use crate::handler::OsisTagHandler;
use crate::handlers::note::{Note, NoteKind};
use crate::osis::{attr, element};

/// Link scheme of passage links in the verse text.
pub const BIBLE_PROTOCOL: &str = "bible";

/// `<reference>`: a link to another passage.
///
/// The content is captured through the temp store. Inside a `<note>` each reference becomes a
/// cross-reference note of its own and the separators written before it are dropped; elsewhere
/// it is written back as `<a href='bible:{osisRef}'>`, or as plain text without an `osisRef`.
#[derive(Debug, Default)]
pub struct ReferenceHandler {
    targets: Vec<Option<SmolStr>>,
}

impl ReferenceHandler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl OsisTagHandler for ReferenceHandler {
    fn tag_name(&self) -> &'static str {
        element::REFERENCE
    }

    fn start(&mut self, attrs: &Attributes, cx: &mut RenderContext<'_>) {
        cx.writer.clear_temp_store();
        cx.writer.write_to_temp_store();
        self.targets
            .push(attrs.get(attr::OSIS_REF).filter(|r| !r.is_empty()).map(SmolStr::new));
    }

    fn end(&mut self, cx: &mut RenderContext<'_>) {
        let Some(target) = self.targets.pop() else {
            tracing::warn!("</reference> without a matching start");
            return;
        };
        cx.writer.finish_writing_to_temp_store();
        let text = cx.writer.temp_store_string().to_string();
        cx.writer.clear_temp_store();

        if let Some(note_ref) = cx.open_note_ref.clone() {
            cx.notes.push(Note {
                verse_no: cx.verse.current_verse_no,
                note_ref,
                text,
                kind: NoteKind::CrossReference,
                osis_ref: target,
            });
            return;
        }

        let written = match &target {
            Some(target) => cx
                .writer
                .write(&format!("<a href='{BIBLE_PROTOCOL}:{target}'>{text}</a>")),
            None => cx.writer.write(&text),
        };
        if written && !text.trim().is_empty() {
            cx.verse.is_text_since_verse = true;
            cx.passage.is_any_text_written = true;
        }
    }
}
