//! One-to-one element mappings that need nothing but the writer.

use crate::attributes::Attributes;
use crate::context::RenderContext;
use crate::handler::OsisTagHandler;
use crate::osis::{attr, element};

/// Writes a fixed opening tag on start and its closing tag on end.
#[derive(Debug, Clone, Copy)]
pub struct SimpleTagHandler {
    tag_name: &'static str,
    open: &'static str,
    close: &'static str,
}

impl SimpleTagHandler {
    pub const fn new(tag_name: &'static str, open: &'static str, close: &'static str) -> Self {
        Self {
            tag_name,
            open,
            close,
        }
    }

    pub const fn table() -> Self {
        Self::new(element::TABLE, "<table>", "</table>")
    }

    pub const fn row() -> Self {
        Self::new(element::ROW, "<tr>", "</tr>")
    }

    pub const fn cell() -> Self {
        Self::new(element::CELL, "<td>", "</td>")
    }

    pub const fn list() -> Self {
        Self::new(element::LIST, "<ul>", "</ul>")
    }

    pub const fn item() -> Self {
        Self::new(element::ITEM, "<li>", "</li>")
    }

    pub const fn divine_name() -> Self {
        Self::new(element::DIVINE_NAME, "<span class='divineName'>", "</span>")
    }

    pub const fn trans_change() -> Self {
        Self::new(element::TRANS_CHANGE, "<span class='transChange'>", "</span>")
    }
}

impl OsisTagHandler for SimpleTagHandler {
    fn tag_name(&self) -> &'static str {
        self.tag_name
    }

    fn start(&mut self, _attrs: &Attributes, cx: &mut RenderContext<'_>) {
        cx.writer.write(self.open);
    }

    fn end(&mut self, cx: &mut RenderContext<'_>) {
        cx.writer.write(self.close);
    }
}

const HI_TYPES: [&str; 11] = [
    "acrostic",
    "bold",
    "emphasis",
    "illuminated",
    "italic",
    "line-through",
    "normal",
    "small-caps",
    "sub",
    "super",
    "underline",
];
const DEFAULT_HI_TYPE: &str = "bold";

/// `<hi type="italic">` becomes `<span class='hi_italic'>`. Unknown types render bold.
#[derive(Debug, Default)]
pub struct HiHandler;

impl HiHandler {
    pub fn new() -> Self {
        Self
    }
}

impl OsisTagHandler for HiHandler {
    fn tag_name(&self) -> &'static str {
        element::HI
    }

    fn start(&mut self, attrs: &Attributes, cx: &mut RenderContext<'_>) {
        let hi_type = attrs
            .get(attr::TYPE)
            .filter(|ty| HI_TYPES.contains(ty))
            .unwrap_or(DEFAULT_HI_TYPE);
        cx.writer.write(&format!("<span class='hi_{hi_type}'>"));
    }

    fn end(&mut self, cx: &mut RenderContext<'_>) {
        cx.writer.write("</span>");
    }
}
