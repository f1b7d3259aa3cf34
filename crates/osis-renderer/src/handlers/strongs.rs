//! `<w>`: Strong's numbers and morphology codes shown after the word they tag.
//!
//! ```xml
//! <w lemma="strong:H0853 strong:H01254" morph="strongMorph:TH8804">created</w>
//! <w lemma="strong:G652" morph="robinson:N-NSM">an apostle</w>
//! ```

use crate::attributes::Attributes;
use crate::context::RenderContext;
use crate::handler::OsisTagHandler;
use crate::osis::{LEMMA_STRONGS, MORPH_ROBINSONS, attr, element};

pub const HEBREW_DEF_PROTOCOL: &str = "hdef";
pub const GREEK_DEF_PROTOCOL: &str = "gdef";

#[derive(Debug, Default)]
pub struct StrongsHandler {
    /// Links waiting for each open `<w>` to end.
    pending: Vec<Vec<String>>,
}

impl StrongsHandler {
    pub fn new() -> Self {
        Self::default()
    }
}

/// `strong:H01254` becomes a link to `hdef:01254` labelled `1254`.
fn strongs_link(lemma: &str) -> Option<String> {
    let reference = lemma.strip_prefix(LEMMA_STRONGS)?;
    if reference.len() <= 2 {
        return None;
    }
    let mut chars = reference.chars();
    let protocol = match chars.next()? {
        'H' => HEBREW_DEF_PROTOCOL,
        'G' => GREEK_DEF_PROTOCOL,
        _ => return None,
    };
    let number = chars.as_str();
    let label = number.trim_start_matches('0');
    Some(format!(
        "<a href='{protocol}:{number}' class='strongs'>{label}</a>"
    ))
}

/// Only Robinson codes are linked; other morphology schemes are dropped.
fn morphology_link(morph: &str) -> Option<String> {
    let code = morph.strip_prefix(MORPH_ROBINSONS)?;
    if code.len() <= 2 {
        return None;
    }
    Some(format!("<a href='{morph}' class='morphology'>{code}</a>"))
}

/// Pairs the n-th Strong's link with the n-th morphology link. The list comes out reversed, which
/// puts generic particles after the main lemma.
fn merged_links(strongs: Vec<String>, morphology: Vec<String>) -> Vec<String> {
    let len = strongs.len().max(morphology.len());
    let mut strongs = strongs.into_iter();
    let mut morphology = morphology.into_iter();
    let mut merged: Vec<String> = (0..len)
        .map(|_| {
            let mut link = strongs.next().unwrap_or_default();
            link.push_str(&morphology.next().unwrap_or_default());
            link
        })
        .collect();
    merged.reverse();
    merged
}

impl OsisTagHandler for StrongsHandler {
    fn tag_name(&self) -> &'static str {
        element::W
    }

    fn start(&mut self, attrs: &Attributes, cx: &mut RenderContext<'_>) {
        let strongs: Vec<String> = match attrs.get(attr::LEMMA) {
            Some(lemma) if cx.params.show_strongs => {
                lemma.split_whitespace().filter_map(strongs_link).collect()
            }
            _ => Vec::new(),
        };
        let morphology: Vec<String> = match attrs.get(attr::MORPH) {
            Some(morph) if cx.params.show_morphology => {
                morph.split_whitespace().filter_map(morphology_link).collect()
            }
            _ => Vec::new(),
        };
        self.pending.push(merged_links(strongs, morphology));
    }

    fn end(&mut self, cx: &mut RenderContext<'_>) {
        let Some(links) = self.pending.pop() else {
            tracing::warn!("w end without a matching start");
            return;
        };
        if links.is_empty() {
            return;
        }
        for link in &links {
            cx.writer.write(" ");
            cx.writer.write(link);
        }
        cx.writer.write(" ");
    }
}
