//! OSIS element and attribute names, plus the small parsing helpers handlers share.

use crate::attributes::Attributes;

pub mod element {
    pub const VERSE: &str = "verse";
    pub const CHAPTER: &str = "chapter";
    pub const DIV: &str = "div";
    pub const MILESTONE: &str = "milestone";
    pub const TITLE: &str = "title";
    pub const NOTE: &str = "note";
    pub const REFERENCE: &str = "reference";
    pub const L: &str = "l";
    pub const LG: &str = "lg";
    pub const LB: &str = "lb";
    pub const P: &str = "p";
    pub const Q: &str = "q";
    pub const HI: &str = "hi";
    pub const W: &str = "w";
    pub const TRANS_CHANGE: &str = "transChange";
    pub const DIVINE_NAME: &str = "divineName";
    pub const FIGURE: &str = "figure";
    pub const TABLE: &str = "table";
    pub const ROW: &str = "row";
    pub const CELL: &str = "cell";
    pub const LIST: &str = "list";
    pub const ITEM: &str = "item";
}

pub mod attr {
    pub const OSIS_ID: &str = "osisID";
    pub const OSIS_REF: &str = "osisRef";
    pub const SID: &str = "sID";
    pub const EID: &str = "eID";
    pub const TYPE: &str = "type";
    pub const SUBTYPE: &str = "subType";
    pub const MARKER: &str = "marker";
    pub const LEVEL: &str = "level";
    pub const N: &str = "n";
    pub const WHO: &str = "who";
    pub const CANONICAL: &str = "canonical";
    pub const LEMMA: &str = "lemma";
    pub const MORPH: &str = "morph";
    pub const SRC: &str = "src";
}

pub const LEMMA_STRONGS: &str = "strong:";
pub const MORPH_ROBINSONS: &str = "robinson:";

/// Extracts the trailing number of an osisID such as `Gen.1.31` (verse) or `Gen.3` (chapter).
///
/// Multi-reference ids (`Gen.1.1 Gen.1.2`) use the first reference. Ids without a book prefix,
/// with a non-numeric last component, or with a number that does not fit a `u32` yield `None`.
pub fn osis_id_to_trailing_num(osis_id: &str) -> Option<u32> {
    let first = osis_id.split_whitespace().next()?;
    let (_, last) = first.rsplit_once('.')?;
    last.parse().ok()
}

/// Deepest nesting level honoured; deeper levels render as this one.
pub const MAX_LEVEL: u32 = 8;

/// The OSIS `level` attribute, defaulting to 1 when missing or malformed and capped at
/// [`MAX_LEVEL`].
pub fn level(attrs: &Attributes) -> u32 {
    attrs
        .get(attr::LEVEL)
        .and_then(|level| level.trim().parse::<u64>().ok())
        .map_or(1, |level| level.min(u64::from(MAX_LEVEL)) as u32)
}

/// Start or end milestone (`sID` / `eID`) rather than a container element.
pub fn is_milestone(attrs: &Attributes) -> bool {
    attrs.is_set(attr::SID) || attrs.is_set(attr::EID)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verse_numbers_from_osis_ids() {
        assert_eq!(osis_id_to_trailing_num("Gen.1.31"), Some(31));
        assert_eq!(osis_id_to_trailing_num("Ps.117.0"), Some(0));
        assert_eq!(osis_id_to_trailing_num("Gen.1.1 Gen.1.2"), Some(1));
        assert_eq!(osis_id_to_trailing_num("Gen.3"), Some(3));
        assert_eq!(osis_id_to_trailing_num("7"), None);
        assert_eq!(osis_id_to_trailing_num("Gen.1.x"), None);
        assert_eq!(osis_id_to_trailing_num("Gen.1.99999999999"), None);
        assert_eq!(osis_id_to_trailing_num(""), None);
    }

    #[test]
    fn level_defaults_to_one() {
        assert_eq!(level(&Attributes::new()), 1);
        assert_eq!(level(&Attributes::new().with(attr::LEVEL, "3")), 3);
        assert_eq!(level(&Attributes::new().with(attr::LEVEL, "deep")), 1);
        assert_eq!(
            level(&Attributes::new().with(attr::LEVEL, "4000000000")),
            MAX_LEVEL
        );
        assert_eq!(
            level(&Attributes::new().with(attr::LEVEL, "99999999999")),
            MAX_LEVEL
        );
    }
}
