//! Accent- and case-insensitive text folding used for layout detection.
//!
//! Reports arrive with or without diacritics depending on the PDF text layer
//! (`Hémogramme`, `Hemogramme`, `HÉMOGRAMME`), so signature needles and the
//! report are folded the same way before comparison.

/// Map a lowercase French diacritic to its ASCII base letters.
fn fold_char(ch: char) -> Option<&'static str> {
    let folded = match ch {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => "a",
        'ç' => "c",
        'è' | 'é' | 'ê' | 'ë' => "e",
        'ì' | 'í' | 'î' | 'ï' => "i",
        'ñ' => "n",
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' => "o",
        'ù' | 'ú' | 'û' | 'ü' => "u",
        'ý' | 'ÿ' => "y",
        'œ' => "oe",
        'æ' => "ae",
        _ => return None,
    };
    Some(folded)
}

/// Lowercase, strip diacritics, drop remaining non-ASCII and collapse
/// whitespace runs to a single space.
pub fn fold_for_matching(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;

    for ch in text.chars().flat_map(char::to_lowercase) {
        if ch.is_whitespace() {
            pending_space = !out.is_empty();
            continue;
        }
        let folded = match fold_char(ch) {
            Some(s) => s,
            None if ch.is_ascii() => {
                if pending_space {
                    out.push(' ');
                    pending_space = false;
                }
                out.push(ch);
                continue;
            }
            None => continue,
        };
        if pending_space {
            out.push(' ');
            pending_space = false;
        }
        out.push_str(folded);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_accents_and_case() {
        assert_eq!(fold_for_matching("Carnet santé"), "carnet sante");
        assert_eq!(fold_for_matching("HÉMOGRAMME"), "hemogramme");
        assert_eq!(fold_for_matching("Éosinophiles"), "eosinophiles");
        assert_eq!(fold_for_matching("Cœur"), "coeur");
    }

    #[test]
    fn collapses_whitespace() {
        assert_eq!(fold_for_matching("  PATIENT \t EXTERNE\n"), "patient externe");
        assert_eq!(fold_for_matching("a\r\n\r\nb"), "a b");
    }

    #[test]
    fn drops_unmapped_non_ascii() {
        assert_eq!(fold_for_matching("10⁹/L"), "10/l");
        assert_eq!(fold_for_matching("µ"), "");
    }

    #[test]
    fn ascii_is_only_lowercased() {
        assert_eq!(fold_for_matching("GB WBC 5.87"), "gb wbc 5.87");
        assert_eq!(fold_for_matching(""), "");
    }
}
