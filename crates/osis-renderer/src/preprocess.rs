use std::borrow::Cow;

/// Rewrites character data before it reaches the writer.
pub trait TextPreprocessor: std::fmt::Debug {
    fn process<'a>(&self, text: &'a str) -> Cow<'a, str>;
}

/// Sof pasuq, the Hebrew end-of-verse mark.
const SOF_PASUQ: char = '\u{05C3}';

/// Strips vowel points and cantillation marks from Hebrew text, which most fonts render poorly,
/// and keeps sof pasuq right-to-left inside otherwise left-to-right markup.
#[derive(Debug, Default, Clone, Copy)]
pub struct HebrewCharacterPreprocessor;

impl HebrewCharacterPreprocessor {
    fn is_removed(c: char) -> bool {
        matches!(
            c,
            // points
            '\u{05B0}'..='\u{05BD}' | '\u{05BF}' | '\u{05C1}' | '\u{05C2}'
            // accents
            | '\u{0591}'..='\u{05AF}'
        )
    }
}

impl TextPreprocessor for HebrewCharacterPreprocessor {
    fn process<'a>(&self, text: &'a str) -> Cow<'a, str> {
        if !text.chars().any(|c| Self::is_removed(c) || c == SOF_PASUQ) {
            return Cow::Borrowed(text);
        }
        let mut out = String::with_capacity(text.len());
        for c in text.chars() {
            if c == SOF_PASUQ {
                out.push_str("<span dir='rtl'>");
                out.push(c);
                out.push_str("</span> ");
            } else if !Self::is_removed(c) {
                out.push(c);
            }
        }
        Cow::Owned(out)
    }
}

/// Preprocessor for a module language, if it needs one.
pub fn for_language(language_code: &str) -> Option<Box<dyn TextPreprocessor>> {
    match language_code {
        "he" => Some(Box::new(HebrewCharacterPreprocessor)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removes_points_and_accents() {
        // bereshit with vowel points and a tipcha accent
        let pointed = "\u{05D1}\u{05BC}\u{05B0}\u{05E8}\u{05B5}\u{05D0}\u{05E9}\u{05B4}\u{0596}\u{05D9}\u{05EA}";
        let plain = HebrewCharacterPreprocessor.process(pointed);
        assert_eq!(plain, "\u{05D1}\u{05E8}\u{05D0}\u{05E9}\u{05D9}\u{05EA}");
    }

    #[test]
    fn wraps_sof_pasuq() {
        let text = "\u{05D0}\u{05E8}\u{05E5}\u{05C3}";
        assert_eq!(
            HebrewCharacterPreprocessor.process(text),
            "\u{05D0}\u{05E8}\u{05E5}<span dir='rtl'>\u{05C3}</span> "
        );
    }

    #[test]
    fn unpointed_text_is_borrowed() {
        assert!(matches!(
            HebrewCharacterPreprocessor.process("plain"),
            Cow::Borrowed("plain")
        ));
        assert!(for_language("en").is_none());
        assert!(for_language("he").is_some());
    }
}
