use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::collections::{BTreeSet, HashMap};
use url::Url;

/// Visual style of a bookmark. The CSS class of a bookmarked verse is the style's name.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookmarkStyle {
    #[default]
    YellowStar,
    RedHighlight,
    YellowHighlight,
    GreenHighlight,
    BlueHighlight,
}

impl BookmarkStyle {
    pub fn css_class(self) -> &'static str {
        match self {
            BookmarkStyle::YellowStar => "YELLOW_STAR",
            BookmarkStyle::RedHighlight => "RED_HIGHLIGHT",
            BookmarkStyle::YellowHighlight => "YELLOW_HIGHLIGHT",
            BookmarkStyle::GreenHighlight => "GREEN_HIGHLIGHT",
            BookmarkStyle::BlueHighlight => "BLUE_HIGHLIGHT",
        }
    }
}

/// Options for one render pass. Never mutated by the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderParameters {
    pub show_verse_numbers: bool,
    pub show_chapter_divider: bool,
    pub verse_per_line: bool,
    pub show_titles: bool,
    pub show_notes: bool,
    pub show_bookmarks: bool,
    pub show_my_notes: bool,
    pub show_strongs: bool,
    pub show_morphology: bool,
    pub red_letter: bool,
    /// Chapter being rendered, if the passage lies within a single chapter.
    pub chapter: Option<u32>,
    pub default_bookmark_style: BookmarkStyle,
    /// Base for relative figure paths.
    pub module_base_path: Option<Url>,
    /// Non-breaking spaces per poetry indent level.
    pub indent_depth: usize,

    /// Emit only the passage, without the surrounding document.
    pub as_fragment: bool,
    pub language_code: SmolStr,
    pub left_to_right: bool,
    /// Raw tags placed in the document head, e.g. `<link rel='stylesheet' ...>`.
    pub css_stylesheets: Vec<String>,
    pub extra_footer: Option<String>,

    pub bookmark_styles_by_verse: HashMap<u32, BTreeSet<BookmarkStyle>>,
    pub verses_with_notes: Vec<u32>,
}

impl Default for RenderParameters {
    fn default() -> Self {
        Self {
            show_verse_numbers: false,
            show_chapter_divider: false,
            verse_per_line: false,
            show_titles: true,
            show_notes: false,
            show_bookmarks: false,
            show_my_notes: false,
            show_strongs: false,
            show_morphology: false,
            red_letter: false,
            chapter: None,
            default_bookmark_style: BookmarkStyle::default(),
            module_base_path: None,
            indent_depth: 2,
            as_fragment: true,
            language_code: SmolStr::new_static("en"),
            left_to_right: true,
            css_stylesheets: Vec::new(),
            extra_footer: None,
            bookmark_styles_by_verse: HashMap::new(),
            verses_with_notes: Vec::new(),
        }
    }
}

impl RenderParameters {
    pub fn direction(&self) -> &'static str {
        if self.left_to_right { "ltr" } else { "rtl" }
    }
}
