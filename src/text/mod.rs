//! Text canonicalization for the loosely-labeled survey base
//!
//! Survey exports carry accented headers, ligature artifacts from PDF-sourced
//! question text and occasional mojibake from latin1 round-trips. Everything
//! that compares strings in this crate goes through [`normalize`] first.

use unicode_normalization::UnicodeNormalization;

/// Canonicalize a string for comparison
///
/// Repairs known ligature artifacts, applies Unicode compatibility
/// decomposition, drops everything outside ASCII (which removes the combining
/// marks left behind by the decomposition), collapses whitespace runs to
/// single spaces, trims and lowercases.
///
/// Total and idempotent: every input produces a string, and
/// `normalize(normalize(s)) == normalize(s)`.
#[must_use]
pub fn normalize(text: &str) -> String {
    let repaired = text
        .replace('\u{fb01}', "fi")
        .replace('\u{fb02}', "fl")
        .replace('\u{fffd}', " ");

    let mut out = String::with_capacity(repaired.len());
    let mut pending_space = false;
    for c in repaired.nfkd() {
        if !c.is_ascii() {
            continue;
        }
        if c.is_ascii_whitespace() {
            pending_space = !out.is_empty();
            continue;
        }
        if pending_space {
            out.push(' ');
            pending_space = false;
        }
        out.push(c.to_ascii_lowercase());
    }
    out
}

/// Split a multi-select free-text cell into its individual selections
///
/// Selections are comma-separated; parts are trimmed and empties dropped.
/// Null cells are handled by callers (an absent value is an empty list).
#[must_use]
pub fn split_multi_select(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

/// Repair a string that was decoded as latin1 but originally held UTF-8
///
/// If every char fits in one byte and the resulting byte sequence is valid
/// UTF-8, the re-decoded text is returned; otherwise the input is returned
/// unchanged. Plain ASCII passes through untouched.
#[must_use]
pub fn repair_mojibake(text: &str) -> String {
    let mut bytes = Vec::with_capacity(text.len());
    for c in text.chars() {
        let code = u32::from(c);
        if code > 0xFF {
            return text.to_string();
        }
        bytes.push(code as u8);
    }
    match String::from_utf8(bytes) {
        Ok(repaired) => repaired,
        Err(_) => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_accents_and_case() {
        assert_eq!(normalize("Pontão de Cultura"), "pontao de cultura");
        assert_eq!(normalize("SÃO PAULO"), "sao paulo");
    }

    #[test]
    fn normalize_collapses_whitespace() {
        assert_eq!(normalize("  Receita \t anual \n "), "receita anual");
    }

    #[test]
    fn normalize_is_idempotent_and_ascii() {
        for s in [
            "Política Nacional",
            "ﬁltro ﬂuido",
            "a  b   c",
            "",
            "Gênero e Diversidade",
            "Cultura e Saúde\t(Sim)",
        ] {
            let once = normalize(s);
            assert_eq!(normalize(&once), once);
            assert!(once.is_ascii());
            assert!(!once.contains("  "));
            assert_eq!(once.trim(), once);
        }
    }

    #[test]
    fn split_drops_empty_parts() {
        assert_eq!(
            split_multi_select("Música, , Teatro ,Dança"),
            vec!["Música", "Teatro", "Dança"]
        );
        assert!(split_multi_select("  ").is_empty());
    }

    #[test]
    fn mojibake_roundtrip_repaired() {
        // "Pontão" encoded as UTF-8 and mis-decoded as latin1
        let garbled = "PontÃ£o";
        assert_eq!(repair_mojibake(garbled), "Pontão");
        assert_eq!(repair_mojibake("plain"), "plain");
        assert_eq!(repair_mojibake("já • ok"), "já • ok");
    }
}
