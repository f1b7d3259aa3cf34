use crate::attributes::Attributes;
use crate::context::RenderContext;

/// Converts one OSIS element into HTML.
///
/// A handler sees its element's start and end events only, in document order. Anything it needs
/// to know about the surrounding text comes through the [`RenderContext`], and any state it keeps
/// between `start` and `end` must cope with nesting (`<div>` inside `<div>`) and with milestones,
/// where start and end are separate empty elements.
pub trait OsisTagHandler: std::fmt::Debug {
    /// Element name this handler is registered under.
    fn tag_name(&self) -> &'static str;

    fn start(&mut self, attrs: &Attributes, cx: &mut RenderContext<'_>);

    fn end(&mut self, cx: &mut RenderContext<'_>);
}
