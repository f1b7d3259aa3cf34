use crate::attributes::Attributes;
use crate::context::RenderContext;
use crate::handler::OsisTagHandler;
use crate::osis::{attr, element};
use crate::writer::{BR, QUOTE};

/// `<milestone>`: line breaks and continuation quotes.
///
/// `<milestone type="x-p"/>` and `<milestone type="line"/>` become a line break, placed before the
/// verse number when the verse has no text yet. `<milestone type="cQuote" marker="“"/>` writes the
/// quotation mark that continues a quote into a new paragraph.
#[derive(Debug, Default)]
pub struct MilestoneHandler;

impl MilestoneHandler {
    pub fn new() -> Self {
        Self
    }
}

impl OsisTagHandler for MilestoneHandler {
    fn tag_name(&self) -> &'static str {
        element::MILESTONE
    }

    fn start(&mut self, attrs: &Attributes, cx: &mut RenderContext<'_>) {
        match attrs.get(attr::TYPE).unwrap_or_default() {
            "x-p" | "line" => {
                if cx.passage.is_any_text_written {
                    cx.write_optionally_before_verse(BR);
                }
            }
            "cQuote" => {
                let marker = attrs.get(attr::MARKER).unwrap_or(QUOTE);
                cx.writer.write(marker);
            }
            other => tracing::debug!(milestone_type = other, "ignoring milestone"),
        }
    }

    fn end(&mut self, _cx: &mut RenderContext<'_>) {}
}
