use crate::attributes::Attributes;
use crate::context::RenderContext;
use crate::handler::OsisTagHandler;
use crate::osis::{self, attr, element};

/// Titles the module generates itself rather than carrying in the text.
const GENERATED_TITLE_TYPES: [&str; 2] = ["chapter", "x-gen"];
const PREVERSE: &str = "preverse";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TitleState {
    Hidden,
    Shown { before_verse: bool },
}

/// `<title>`: section headings.
///
/// A heading that arrives right after a verse opened belongs above the verse number, so it is
/// inserted there. Consecutive headings keep their order because the insert position moves past
/// each one.
#[derive(Debug, Default)]
pub struct TitleHandler {
    stack: Vec<TitleState>,
}

impl TitleHandler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl OsisTagHandler for TitleHandler {
    fn tag_name(&self) -> &'static str {
        element::TITLE
    }

    fn start(&mut self, attrs: &Attributes, cx: &mut RenderContext<'_>) {
        let generated = attrs
            .get(attr::TYPE)
            .is_some_and(|ty| GENERATED_TITLE_TYPES.contains(&ty));
        if !cx.params.show_titles || generated {
            cx.writer.set_dont_write(true);
            self.stack.push(TitleState::Hidden);
            return;
        }

        let before_verse = attrs.contains(attr::SUBTYPE, PREVERSE)
            || (!cx.verse.is_text_since_verse && cx.verse.current_verse_no > 0);
        if before_verse {
            cx.writer
                .begin_insert_at(cx.verse.position_to_insert_before_verse);
        }

        let canonical = if attrs.get(attr::CANONICAL) == Some("true") {
            " canonical"
        } else {
            ""
        };
        let level = osis::level(attrs);
        cx.writer
            .write(&format!("<h1 class='heading{level}{canonical}'>"));
        self.stack.push(TitleState::Shown { before_verse });
    }

    fn end(&mut self, cx: &mut RenderContext<'_>) {
        match self.stack.pop() {
            Some(TitleState::Hidden) => cx.writer.set_dont_write(false),
            Some(TitleState::Shown { before_verse }) => {
                cx.writer.write("</h1>");
                if before_verse {
                    cx.verse.position_to_insert_before_verse = cx.writer.position();
                    cx.writer.finish_inserting();
                }
            }
            None => tracing::warn!("title end without a matching start"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::RenderParameters;

    fn title(handler: &mut TitleHandler, cx: &mut RenderContext<'_>, attrs: Attributes, text: &str) {
        handler.start(&attrs, cx);
        cx.writer.write(text);
        handler.end(cx);
    }

    #[test]
    fn heading_in_place_outside_verses() {
        let params = RenderParameters::default();
        let mut cx = RenderContext::new(&params);
        let mut handler = TitleHandler::new();

        title(&mut handler, &mut cx, Attributes::new(), "The Creation");
        title(
            &mut handler,
            &mut cx,
            Attributes::new()
                .with(attr::LEVEL, "2")
                .with(attr::CANONICAL, "true"),
            "Of David.",
        );

        assert_eq!(
            cx.writer.html(),
            "<h1 class='heading1'>The Creation</h1><h1 class='heading2 canonical'>Of David.</h1>"
        );
    }

    #[test]
    fn headings_move_before_empty_verse_in_order() {
        let params = RenderParameters::default();
        let mut cx = RenderContext::new(&params);
        let mut handler = TitleHandler::new();

        cx.writer.write("prev ");
        cx.verse.current_verse_no = 1;
        cx.verse.position_to_insert_before_verse = cx.writer.position();
        cx.writer.write("v1");

        title(&mut handler, &mut cx, Attributes::new(), "Teach Me Your Paths");
        title(
            &mut handler,
            &mut cx,
            Attributes::new().with(attr::SUBTYPE, "x-preverse"),
            "Of David.",
        );
        cx.writer.write(" text");

        insta::assert_snapshot!(cx.writer.html(), @"prev <h1 class='heading1'>Teach Me Your Paths</h1><h1 class='heading1'>Of David.</h1>v1 text");
    }

    #[test]
    fn generated_and_disabled_titles_are_hidden() {
        let params = RenderParameters::default();
        let mut cx = RenderContext::new(&params);
        let mut handler = TitleHandler::new();
        title(
            &mut handler,
            &mut cx,
            Attributes::new().with(attr::TYPE, "x-gen"),
            "Genesis 1",
        );
        cx.writer.write("kept");
        assert_eq!(cx.writer.html(), "kept");

        let params = RenderParameters {
            show_titles: false,
            ..Default::default()
        };
        let mut cx = RenderContext::new(&params);
        title(&mut handler, &mut cx, Attributes::new(), "Hidden");
        assert_eq!(cx.writer.html(), "");
    }
}
