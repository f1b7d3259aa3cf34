//! `<div>`: paragraph breaks and pre-verse sections.
//!
//! A pre-verse div arrives after the verse it belongs in front of, so its content is inserted at
//! the position recorded by the verse handler. The milestone form splits the insertion across two
//! empty elements; the container form begins and finishes it around the div's own content.

use crate::attributes::Attributes;
use crate::context::RenderContext;
use crate::handler::OsisTagHandler;
use crate::osis::{attr, element};
use crate::writer::BREAKLINE;

const PARAGRAPH_TYPES: [&str; 3] = ["paragraph", "x-p", "x-end-paragraph"];
const PREVERSE: &str = "preverse";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DivKind {
    Paragraph,
    Preverse,
    PreverseStartMilestone,
    PreverseEndMilestone,
    Ignore,
}

impl DivKind {
    pub fn classify(attrs: &Attributes) -> Self {
        let is_paragraph = attrs
            .get(attr::TYPE)
            .is_some_and(|ty| PARAGRAPH_TYPES.contains(&ty));
        if is_paragraph {
            // the break belongs to the end milestone, or to the end of a container paragraph
            return if attrs.is_set(attr::SID) {
                DivKind::Ignore
            } else {
                DivKind::Paragraph
            };
        }

        if attrs.contains(attr::SUBTYPE, PREVERSE) {
            if attrs.is_set(attr::SID) {
                DivKind::PreverseStartMilestone
            } else if attrs.is_set(attr::EID) {
                DivKind::PreverseEndMilestone
            } else {
                DivKind::Preverse
            }
        } else {
            DivKind::Ignore
        }
    }
}

#[derive(Debug, Default)]
pub struct DivHandler {
    stack: Vec<DivKind>,
}

impl DivHandler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl OsisTagHandler for DivHandler {
    fn tag_name(&self) -> &'static str {
        element::DIV
    }

    fn start(&mut self, attrs: &Attributes, cx: &mut RenderContext<'_>) {
        let kind = DivKind::classify(attrs);
        match kind {
            DivKind::Preverse | DivKind::PreverseStartMilestone => {
                cx.writer
                    .begin_insert_at(cx.verse.position_to_insert_before_verse);
            }
            DivKind::PreverseEndMilestone => cx.writer.finish_inserting(),
            DivKind::Paragraph | DivKind::Ignore => {}
        }
        self.stack.push(kind);
    }

    fn end(&mut self, cx: &mut RenderContext<'_>) {
        let Some(kind) = self.stack.pop() else {
            tracing::warn!("div end without a matching start");
            return;
        };
        match kind {
            DivKind::Paragraph => {
                if cx.passage.is_any_text_written {
                    cx.writer.write(BREAKLINE);
                }
            }
            DivKind::Preverse => cx.writer.finish_inserting(),
            DivKind::PreverseStartMilestone | DivKind::PreverseEndMilestone | DivKind::Ignore => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::RenderParameters;

    fn attrs(pairs: &[(&str, &str)]) -> Attributes {
        pairs.iter().copied().collect()
    }

    #[test]
    fn paragraph_sid_and_eid() {
        let params = RenderParameters::default();
        let mut cx = RenderContext::new(&params);
        let mut div = DivHandler::new();

        div.start(&attrs(&[("sID", "x7681"), ("type", "paragraph")]), &mut cx);
        div.end(&mut cx);
        cx.writer.write("Some text");
        cx.passage.is_any_text_written = true;
        div.start(&attrs(&[("eID", "x7681"), ("type", "paragraph")]), &mut cx);
        div.end(&mut cx);

        assert_eq!(cx.writer.html(), "Some text<div class='breakline'></div>");
    }

    #[test]
    fn container_paragraph() {
        let params = RenderParameters::default();
        let mut cx = RenderContext::new(&params);
        let mut div = DivHandler::new();

        div.start(&attrs(&[("type", "paragraph")]), &mut cx);
        cx.writer.write("Some text");
        cx.passage.is_any_text_written = true;
        div.end(&mut cx);

        assert_eq!(cx.writer.html(), "Some text<div class='breakline'></div>");
    }

    #[test]
    fn x_p_milestone_paragraphs() {
        let params = RenderParameters::default();
        let mut cx = RenderContext::new(&params);
        let mut div = DivHandler::new();

        div.start(&attrs(&[("sID", "x7681"), ("type", "x-p")]), &mut cx);
        div.end(&mut cx);
        cx.writer.write("Some text");
        cx.passage.is_any_text_written = true;
        div.start(&attrs(&[("eID", "x7681"), ("type", "x-p")]), &mut cx);
        div.end(&mut cx);

        assert_eq!(cx.writer.html(), "Some text<div class='breakline'></div>");
    }

    #[test]
    fn no_break_before_any_text() {
        let params = RenderParameters::default();
        let mut cx = RenderContext::new(&params);
        let mut div = DivHandler::new();

        div.start(&attrs(&[("type", "x-end-paragraph")]), &mut cx);
        div.end(&mut cx);

        assert_eq!(cx.writer.html(), "");
    }

    #[test]
    fn title_in_preverse_milestone_pair() {
        let params = RenderParameters::default();
        let mut cx = RenderContext::new(&params);
        let mut div = DivHandler::new();

        cx.writer.write("v1");
        cx.verse.current_verse_no = 1;
        cx.verse.position_to_insert_before_verse = 0;
        cx.verse.is_text_since_verse = false;

        div.start(&attrs(&[("subType", "x-preverse"), ("sID", "pv2905")]), &mut cx);
        div.end(&mut cx);
        cx.writer.write("Preverse text");
        cx.passage.is_any_text_written = true;
        div.start(&attrs(&[("subType", "x-preverse"), ("eID", "pv2905")]), &mut cx);
        div.end(&mut cx);
        cx.writer.write("Verse content");

        assert_eq!(cx.writer.html(), "Preverse textv1Verse content");
    }

    #[test]
    fn preverse_container() {
        let params = RenderParameters::default();
        let mut cx = RenderContext::new(&params);
        let mut div = DivHandler::new();

        cx.writer.write("v1");
        div.start(&attrs(&[("subType", "x-preverse")]), &mut cx);
        cx.writer.write("Heading");
        div.end(&mut cx);
        cx.writer.write(" text");

        assert_eq!(cx.writer.html(), "Headingv1 text");
    }

    #[test]
    fn unmatched_final_preverse_start() {
        let params = RenderParameters::default();
        let mut cx = RenderContext::new(&params);
        let mut div = DivHandler::new();

        cx.writer.write("v1");
        cx.verse.current_verse_no = 1;
        cx.verse.position_to_insert_before_verse = 0;
        cx.writer.write("Verse content");
        cx.verse.is_text_since_verse = true;

        div.start(
            &attrs(&[("type", "x-milestone"), ("subType", "x-preverse"), ("sID", "pv2905")]),
            &mut cx,
        );
        div.end(&mut cx);
        cx.writer.abort_any_unterminated_insertion();

        assert_eq!(cx.writer.html(), "v1Verse content");
    }

    #[test]
    fn unbalanced_end_is_ignored() {
        let params = RenderParameters::default();
        let mut cx = RenderContext::new(&params);
        let mut div = DivHandler::new();
        cx.passage.is_any_text_written = true;
        div.end(&mut cx);
        assert_eq!(cx.writer.html(), "");
    }

    #[test]
    fn classification() {
        assert_eq!(
            DivKind::classify(&attrs(&[("type", "x-p"), ("sID", "a")])),
            DivKind::Ignore
        );
        assert_eq!(
            DivKind::classify(&attrs(&[("type", "section")])),
            DivKind::Ignore
        );
        assert_eq!(
            DivKind::classify(&attrs(&[("type", "x-milestone"), ("subType", "x-preverse"), ("eID", "a")])),
            DivKind::PreverseEndMilestone
        );
    }
}
