//! Decorations attached to a verse span for user bookmarks and notes.
//!
//! Both markers index the precomputed verse sets once, at construction, and are then pure lookups
//! against the verse currently open.

use smol_str::SmolStr;
use std::collections::{BTreeSet, HashMap, HashSet};

use crate::context::VerseInfo;
use crate::params::{BookmarkStyle, RenderParameters};

pub const MY_NOTE_CLASS: &str = "myNote";

pub trait VerseDecoration: std::fmt::Debug {
    /// CSS classes to add to the span of the verse currently open.
    fn classes(&self, verse: &VerseInfo) -> Vec<SmolStr>;
}

#[derive(Debug, Default)]
pub struct BookmarkMarker {
    styles_by_verse: HashMap<u32, BTreeSet<BookmarkStyle>>,
    default_style: BookmarkStyle,
}

impl BookmarkMarker {
    pub fn new(params: &RenderParameters) -> Self {
        let styles_by_verse = if params.show_bookmarks {
            params.bookmark_styles_by_verse.clone()
        } else {
            HashMap::new()
        };
        Self {
            styles_by_verse,
            default_style: params.default_bookmark_style,
        }
    }
}

impl VerseDecoration for BookmarkMarker {
    fn classes(&self, verse: &VerseInfo) -> Vec<SmolStr> {
        match self.styles_by_verse.get(&verse.current_verse_no) {
            // bookmarked without an explicit style
            Some(styles) if styles.is_empty() => {
                vec![SmolStr::new_static(self.default_style.css_class())]
            }
            Some(styles) => styles
                .iter()
                .map(|style| SmolStr::new_static(style.css_class()))
                .collect(),
            None => Vec::new(),
        }
    }
}

#[derive(Debug, Default)]
pub struct MyNoteMarker {
    verses_with_notes: HashSet<u32>,
}

impl MyNoteMarker {
    pub fn new(params: &RenderParameters) -> Self {
        let verses_with_notes = if params.show_my_notes {
            params.verses_with_notes.iter().copied().collect()
        } else {
            HashSet::new()
        };
        Self { verses_with_notes }
    }
}

impl VerseDecoration for MyNoteMarker {
    fn classes(&self, verse: &VerseInfo) -> Vec<SmolStr> {
        if self.verses_with_notes.contains(&verse.current_verse_no) {
            vec![SmolStr::new_static(MY_NOTE_CLASS)]
        } else {
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verse(no: u32) -> VerseInfo {
        VerseInfo {
            current_verse_no: no,
            ..Default::default()
        }
    }

    fn bookmarked_params() -> RenderParameters {
        let mut params = RenderParameters {
            show_bookmarks: true,
            default_bookmark_style: BookmarkStyle::GreenHighlight,
            ..Default::default()
        };
        params.bookmark_styles_by_verse.insert(
            3,
            BTreeSet::from([BookmarkStyle::BlueHighlight, BookmarkStyle::YellowStar]),
        );
        params.bookmark_styles_by_verse.insert(5, BTreeSet::new());
        params
    }

    #[test]
    fn bookmark_classes_follow_style_order() {
        let marker = BookmarkMarker::new(&bookmarked_params());
        assert_eq!(marker.classes(&verse(3)), vec!["YELLOW_STAR", "BLUE_HIGHLIGHT"]);
        assert!(marker.classes(&verse(4)).is_empty());
    }

    #[test]
    fn unstyled_bookmark_uses_default_style() {
        let marker = BookmarkMarker::new(&bookmarked_params());
        assert_eq!(marker.classes(&verse(5)), vec!["GREEN_HIGHLIGHT"]);
    }

    #[test]
    fn bookmarks_hidden_when_disabled() {
        let params = RenderParameters {
            show_bookmarks: false,
            ..bookmarked_params()
        };
        let marker = BookmarkMarker::new(&params);
        assert!(marker.classes(&verse(3)).is_empty());
    }

    #[test]
    fn my_note_marker() {
        let params = RenderParameters {
            show_my_notes: true,
            verses_with_notes: vec![2, 7],
            ..Default::default()
        };
        let marker = MyNoteMarker::new(&params);
        assert_eq!(marker.classes(&verse(7)), vec![MY_NOTE_CLASS]);
        assert!(marker.classes(&verse(3)).is_empty());

        let hidden = MyNoteMarker::new(&RenderParameters {
            show_my_notes: false,
            ..params
        });
        assert!(hidden.classes(&verse(7)).is_empty());
    }
}
