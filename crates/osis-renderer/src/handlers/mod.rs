//! One handler per OSIS element, plus the verse decorations.

pub mod chapter;
pub mod div;
pub mod figure;
pub mod leaf;
pub mod line;
pub mod markers;
pub mod milestone;
pub mod note;
pub mod quote;
pub mod reference;
pub mod strongs;
pub mod title;
pub mod verse;

pub use chapter::{CHAPTER_DIVIDER, ChapterDivider};
pub use div::{DivHandler, DivKind};
pub use figure::FigureHandler;
pub use leaf::{HiHandler, SimpleTagHandler};
pub use line::{LineBreakHandler, LineGroupHandler, LineHandler, ParagraphHandler};
pub use markers::{BookmarkMarker, MyNoteMarker, VerseDecoration};
pub use milestone::MilestoneHandler;
pub use note::{Note, NoteHandler, NoteKind};
pub use quote::QuoteHandler;
pub use reference::{BIBLE_PROTOCOL, ReferenceHandler};
pub use strongs::StrongsHandler;
pub use title::TitleHandler;
pub use verse::VerseHandler;
