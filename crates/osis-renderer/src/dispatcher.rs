//! Routes parser callbacks to the element handlers.

use std::borrow::Cow;
use std::collections::HashMap;
use std::collections::hash_map::Entry;

use smol_str::SmolStr;

use crate::RenderedPassage;
use crate::attributes::Attributes;
use crate::context::RenderContext;
use crate::error::RenderError;
use crate::handler::OsisTagHandler;
use crate::handlers::{
    ChapterDivider, DivHandler, FigureHandler, HiHandler, LineBreakHandler, LineGroupHandler,
    LineHandler, MilestoneHandler, NoteHandler, ParagraphHandler, QuoteHandler, ReferenceHandler,
    SimpleTagHandler, StrongsHandler, TitleHandler, VerseHandler,
};
use crate::osis::element;
use crate::params::RenderParameters;
use crate::preprocess::{self, TextPreprocessor};

/// Structural elements with no rendering of their own. Their content is still written.
const IGNORED_ELEMENTS: &[&str] = &[
    "osis",
    "osisText",
    "header",
    "work",
    "revisionDesc",
    "book",
    "catchWord",
    "rdg",
    "seg",
    "foreign",
    "abbr",
    "name",
    "speaker",
    "speech",
    "inscription",
    "index",
];

/// One render pass: feed it a document's events in order, then take the output.
///
/// ```
/// use osis_renderer::{Attributes, OsisToHtml, RenderParameters};
///
/// let params = RenderParameters::default();
/// let mut renderer = OsisToHtml::new(&params);
/// renderer.start_document();
/// renderer.start_element("verse", &Attributes::new().with("osisID", "Gen.1.1"));
/// renderer.characters("In the beginning");
/// renderer.end_element("verse");
/// renderer.end_document();
/// let passage = renderer.into_output();
/// assert!(passage.html.ends_with("In the beginning</span>"));
/// ```
#[derive(Debug)]
pub struct OsisToHtml<'p> {
    cx: RenderContext<'p>,
    handlers: HashMap<&'static str, Box<dyn OsisTagHandler>>,
    chapter_divider: ChapterDivider,
    preprocessor: Option<Box<dyn TextPreprocessor>>,
}

impl<'p> OsisToHtml<'p> {
    pub fn new(params: &'p RenderParameters) -> Self {
        let builtin: Vec<Box<dyn OsisTagHandler>> = vec![
            Box::new(VerseHandler::new(params)),
            Box::new(DivHandler::new()),
            Box::new(MilestoneHandler::new()),
            Box::new(TitleHandler::new()),
            Box::new(NoteHandler::new()),
            Box::new(ReferenceHandler::new()),
            Box::new(LineHandler::new()),
            Box::new(LineGroupHandler::new()),
            Box::new(LineBreakHandler::new()),
            Box::new(ParagraphHandler::new()),
            Box::new(QuoteHandler::new()),
            Box::new(HiHandler::new()),
            Box::new(StrongsHandler::new()),
            Box::new(FigureHandler::new()),
            Box::new(SimpleTagHandler::table()),
            Box::new(SimpleTagHandler::row()),
            Box::new(SimpleTagHandler::cell()),
            Box::new(SimpleTagHandler::list()),
            Box::new(SimpleTagHandler::item()),
            Box::new(SimpleTagHandler::divine_name()),
            Box::new(SimpleTagHandler::trans_change()),
        ];
        let handlers = builtin
            .into_iter()
            .map(|handler| (handler.tag_name(), handler))
            .collect();

        Self {
            cx: RenderContext::new(params),
            handlers,
            chapter_divider: ChapterDivider::new(),
            preprocessor: preprocess::for_language(&params.language_code),
        }
    }

    /// Adds a handler for an element the built-in set does not cover.
    pub fn register(&mut self, handler: Box<dyn OsisTagHandler>) -> Result<(), RenderError> {
        match self.handlers.entry(handler.tag_name()) {
            Entry::Occupied(entry) => Err(RenderError::DuplicateHandler(SmolStr::new_static(
                *entry.key(),
            ))),
            Entry::Vacant(entry) => {
                entry.insert(handler);
                Ok(())
            }
        }
    }

    /// Replaces the text preprocessor chosen from the module language.
    pub fn set_preprocessor(&mut self, preprocessor: Option<Box<dyn TextPreprocessor>>) {
        self.preprocessor = preprocessor;
    }

    pub fn context(&self) -> &RenderContext<'p> {
        &self.cx
    }

    pub fn start_document(&mut self) {
        let params = self.cx.params;
        if !params.as_fragment {
            let mut head = format!(
                "<!DOCTYPE html><html lang='{}' dir='{}'><head>",
                params.language_code,
                params.direction()
            );
            for stylesheet in &params.css_stylesheets {
                head.push_str(stylesheet);
            }
            head.push_str("<meta charset='utf-8'/></head><body>");
            self.cx.writer.write(&head);
            if !params.left_to_right {
                self.cx.writer.write("<span dir='rtl'>");
            }
        }
        self.chapter_divider.start(&Attributes::new(), &mut self.cx);
    }

    pub fn start_element(&mut self, name: &str, attrs: &Attributes) {
        if name == element::CHAPTER {
            self.chapter_divider.start(attrs, &mut self.cx);
            return;
        }
        match self.handlers.get_mut(name) {
            Some(handler) => handler.start(attrs, &mut self.cx),
            None if IGNORED_ELEMENTS.contains(&name) => {}
            None => tracing::info!(element = name, "unsupported OSIS element"),
        }
    }

    pub fn end_element(&mut self, name: &str) {
        if name == element::CHAPTER {
            self.chapter_divider.end(&mut self.cx);
            return;
        }
        if let Some(handler) = self.handlers.get_mut(name) {
            handler.end(&mut self.cx);
        }
    }

    pub fn characters(&mut self, text: &str) {
        let text = match &self.preprocessor {
            Some(preprocessor) => preprocessor.process(text),
            None => Cow::Borrowed(text),
        };
        let written = self.cx.writer.write(&text);
        // lone whitespace between elements is not verse text
        if written && (text.len() > 2 || !text.trim().is_empty()) {
            self.cx.verse.is_text_since_verse = true;
        }
        if self.cx.verse.is_text_since_verse {
            self.cx.passage.is_any_text_written = true;
        }
    }

    pub fn end_document(&mut self) {
        let params = self.cx.params;
        self.cx.writer.abort_any_unterminated_insertion();
        if self.cx.passage.is_verse_line_open {
            self.cx.writer.write("</div>");
            self.cx.passage.is_verse_line_open = false;
        }
        if let Some(footer) = &params.extra_footer {
            self.cx.writer.write(footer);
        }
        if !params.as_fragment {
            if !params.left_to_right {
                self.cx.writer.write("</span>");
            }
            self.cx.writer.write("</body></html>");
        }
    }

    pub fn into_output(self) -> RenderedPassage {
        let html = if self.cx.passage.is_any_text_written {
            self.cx.writer.into_html()
        } else {
            tracing::debug!("no text in passage");
            String::new()
        };
        RenderedPassage {
            html,
            notes: self.cx.notes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verse(renderer: &mut OsisToHtml<'_>, osis_id: &str, text: &str) {
        renderer.start_element("verse", &Attributes::new().with("osisID", osis_id));
        renderer.characters(text);
        renderer.end_element("verse");
    }

    #[test]
    fn duplicate_registration_fails() {
        let params = RenderParameters::default();
        let mut renderer = OsisToHtml::new(&params);
        let err = renderer
            .register(Box::new(SimpleTagHandler::table()))
            .unwrap_err();
        assert!(matches!(err, RenderError::DuplicateHandler(ref name) if name == "table"));

        renderer
            .register(Box::new(SimpleTagHandler::new("caption", "<caption>", "</caption>")))
            .unwrap();
        renderer.start_element("caption", &Attributes::new());
        renderer.characters("Kings of Judah");
        renderer.end_element("caption");
        assert_eq!(
            renderer.into_output().html,
            "<caption>Kings of Judah</caption>"
        );
    }

    #[test]
    fn unknown_elements_are_transparent() {
        let params = RenderParameters::default();
        let mut renderer = OsisToHtml::new(&params);
        renderer.start_element("x-custom", &Attributes::new());
        renderer.start_element("seg", &Attributes::new());
        renderer.characters("kept");
        renderer.end_element("seg");
        renderer.end_element("x-custom");
        assert_eq!(renderer.into_output().html, "kept");
    }

    #[test]
    fn whitespace_is_not_verse_text() {
        let params = RenderParameters::default();
        let mut renderer = OsisToHtml::new(&params);
        renderer.start_element("verse", &Attributes::new().with("osisID", "Gen.1.1"));
        renderer.characters(" ");
        renderer.end_element("verse");
        assert!(!renderer.context().passage.is_any_text_written);
        renderer.end_document();
        assert_eq!(renderer.into_output().html, "");
    }

    #[test]
    fn full_document_frame() {
        let params = RenderParameters {
            as_fragment: false,
            language_code: "he".into(),
            left_to_right: false,
            css_stylesheets: vec!["<link href='bible.css' rel='stylesheet'/>".into()],
            extra_footer: Some("<footer/>".into()),
            ..Default::default()
        };
        let mut renderer = OsisToHtml::new(&params);
        renderer.start_document();
        verse(&mut renderer, "Gen.1.1", "\u{05D1}\u{05B0}");
        renderer.end_document();

        insta::assert_snapshot!(renderer.into_output().html, @"<!DOCTYPE html><html lang='he' dir='rtl'><head><link href='bible.css' rel='stylesheet'/><meta charset='utf-8'/></head><body><span dir='rtl'><span class='verse' id='1'><span class='verseNo position-marker'>&#x200b;</span>ב</span><footer/></span></body></html>");
    }

    #[test]
    fn chapter_elements_drive_the_divider() {
        let params = RenderParameters {
            show_chapter_divider: true,
            show_verse_numbers: true,
            chapter: Some(1),
            ..Default::default()
        };
        let mut renderer = OsisToHtml::new(&params);
        renderer.start_document();
        verse(&mut renderer, "Gen.1.31", "very good.");
        renderer.start_element("chapter", &Attributes::new().with("osisID", "Gen.2"));
        verse(&mut renderer, "Gen.2.1", "Thus the heavens");
        renderer.end_element("chapter");
        renderer.end_document();

        insta::assert_snapshot!(renderer.into_output().html, @"<div id='1'></div><span class='verse' id='31'><span class='verseNo'>31</span>&#160;very good.</span><div class='chapterNo'>&#8212; 2 &#8212;</div><div id='2'></div><span class='verse' id='1'><span class='verseNo'>1</span>&#160;Thus the heavens</span>");
    }
}
