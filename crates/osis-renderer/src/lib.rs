//! OSIS renderer
//!
//! Turns the element and text events of an OSIS Bible text into display HTML in a single pass.
//! OSIS is only partly tree-shaped: paragraphs, lines, quotes and pre-verse sections are often
//! written as `sID`/`eID` milestone pairs, and some content has to appear in the output before
//! the point where it arrives. The [`writer::HtmlTextWriter`] makes that possible with rollback and
//! retroactive insertion; the handlers in [`handlers`] cooperate through a shared
//! [`context::RenderContext`].
//!
//! With the `xml` feature, [`render_osis`] parses and renders a document in one call.

use serde::Serialize;

pub mod attributes;
pub mod context;
pub mod dispatcher;
pub mod error;
pub mod handler;
pub mod handlers;
pub mod osis;
pub mod params;
pub mod preprocess;
pub mod writer;
#[cfg(feature = "xml")]
pub mod xml;

pub use attributes::Attributes;
pub use dispatcher::OsisToHtml;
pub use error::{RenderError, XmlError};
pub use handler::OsisTagHandler;
pub use handlers::{Note, NoteKind};
pub use params::{BookmarkStyle, RenderParameters};
#[cfg(feature = "xml")]
pub use xml::{render_named_osis, render_osis, stream_osis};

/// Output of one render pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RenderedPassage {
    pub html: String,
    /// Footnotes lifted out of the text, in document order.
    pub notes: Vec<Note>,
}

/// A parser callback, for producers that collect events before rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OsisEvent {
    Start { name: String, attrs: Attributes },
    End { name: String },
    Text(String),
}

/// Renders a complete document from a sequence of events.
pub fn render_events(
    params: &RenderParameters,
    events: impl IntoIterator<Item = OsisEvent>,
) -> RenderedPassage {
    let mut renderer = OsisToHtml::new(params);
    renderer.start_document();
    for event in events {
        match event {
            OsisEvent::Start { name, attrs } => renderer.start_element(&name, &attrs),
            OsisEvent::End { name } => renderer.end_element(&name),
            OsisEvent::Text(text) => renderer.characters(&text),
        }
    }
    renderer.end_document();
    renderer.into_output()
}
