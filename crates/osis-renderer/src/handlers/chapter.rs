use crate::attributes::Attributes;
use crate::context::RenderContext;
use crate::handler::OsisTagHandler;
use crate::osis::{attr, osis_id_to_trailing_num};

/// Synthetic tag name; no OSIS element maps to the divider directly.
pub const CHAPTER_DIVIDER: &str = "x-chapter-divider";

/// Heading and jump anchor at the start of each chapter.
///
/// Invoked by the dispatcher at document start and for every `<chapter>` start element. The
/// chapter comes from the element's `osisID`, or from [`RenderParameters::chapter`] when there is
/// no element to read it from.
///
/// [`RenderParameters::chapter`]: crate::params::RenderParameters::chapter
#[derive(Debug, Default)]
pub struct ChapterDivider {
    last_divided: Option<u32>,
}

impl ChapterDivider {
    pub fn new() -> Self {
        Self::default()
    }

    fn divider_html(chapter: u32, show_verse_numbers: bool) -> String {
        let mut html = String::new();
        if chapter > 1 {
            if show_verse_numbers {
                html.push_str(&format!(
                    "<div class='chapterNo'>&#8212; {chapter} &#8212;</div>"
                ));
            } else {
                html.push_str("<div class='chapterNo'>&nbsp;</div>");
            }
        }
        html.push_str(&format!("<div id='{chapter}'></div>"));
        html
    }
}

impl OsisTagHandler for ChapterDivider {
    fn tag_name(&self) -> &'static str {
        CHAPTER_DIVIDER
    }

    fn start(&mut self, attrs: &Attributes, cx: &mut RenderContext<'_>) {
        if attrs.is_set(attr::EID) {
            return;
        }
        let chapter = attrs
            .get(attr::OSIS_ID)
            .and_then(osis_id_to_trailing_num)
            .or(cx.params.chapter);
        let Some(chapter) = chapter else {
            tracing::debug!("no chapter number available for divider");
            return;
        };
        if self.last_divided == Some(chapter) {
            return;
        }
        self.last_divided = Some(chapter);

        if !cx.params.show_chapter_divider {
            return;
        }

        let html = Self::divider_html(chapter, cx.params.show_verse_numbers);
        let verse_open_without_text = cx.verse.osis_id.is_some() && !cx.verse.is_text_since_verse;
        if verse_open_without_text {
            let insert_at = cx.verse.position_to_insert_before_verse;
            cx.write_optionally_before_verse(&html);
            cx.verse.position_to_insert_before_verse = insert_at + html.len();
        } else {
            cx.writer.write(&html);
            cx.verse.position_to_insert_before_verse = cx.writer.position();
        }
    }

    fn end(&mut self, _cx: &mut RenderContext<'_>) {}
}
