use smol_str::SmolStr;

use crate::attributes::Attributes;
use crate::context::RenderContext;
use crate::handler::OsisTagHandler;
use crate::osis::{attr, element};
use crate::writer::QUOTE;

const WORDS_OF_JESUS: &str = "Jesus";
const RED_LETTER_OPEN: &str = "<span class='redLetter'>";

#[derive(Debug, Clone, PartialEq, Eq)]
enum QuoteElement {
    Container { marker: SmolStr, red_letter: bool },
    Milestone,
}

/// `<q>`: quotation marks, and red letter for the words of Jesus.
///
/// The quotation mark is the `marker` attribute; an empty marker means the module prints no mark
/// at all. Without the attribute a plain double quote is used.
#[derive(Debug, Default)]
pub struct QuoteHandler {
    stack: Vec<QuoteElement>,
    /// A red-letter span opened by a start milestone, closed by the end milestone.
    milestone_red_letter: bool,
}

impl QuoteHandler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl OsisTagHandler for QuoteHandler {
    fn tag_name(&self) -> &'static str {
        element::Q
    }

    fn start(&mut self, attrs: &Attributes, cx: &mut RenderContext<'_>) {
        let marker = attrs.get(attr::MARKER).unwrap_or(QUOTE);
        let red_letter = cx.params.red_letter && attrs.get(attr::WHO) == Some(WORDS_OF_JESUS);

        if attrs.is_set(attr::EID) {
            if self.milestone_red_letter {
                cx.writer.write("</span>");
                self.milestone_red_letter = false;
            }
            cx.writer.write(marker);
            self.stack.push(QuoteElement::Milestone);
            return;
        }

        cx.writer.write(marker);
        if red_letter {
            cx.writer.write(RED_LETTER_OPEN);
        }
        if attrs.is_set(attr::SID) {
            self.milestone_red_letter |= red_letter;
            self.stack.push(QuoteElement::Milestone);
        } else {
            self.stack.push(QuoteElement::Container {
                marker: SmolStr::new(marker),
                red_letter,
            });
        }
    }

    fn end(&mut self, cx: &mut RenderContext<'_>) {
        match self.stack.pop() {
            Some(QuoteElement::Container { marker, red_letter }) => {
                if red_letter {
                    cx.writer.write("</span>");
                }
                cx.writer.write(&marker);
            }
            Some(QuoteElement::Milestone) => {}
            None => tracing::warn!("q end without a matching start"),
        }
    }
}
