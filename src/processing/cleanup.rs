use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Label spelling variants forced to one canonical rendering.
    static ref MATRICULE_LABEL: Regex = Regex::new(r"(?i)Matricule\s*[:;]\s*").unwrap();
    static ref NAME_LABEL: Regex = Regex::new(r"(?i)Nom\s*\(s\)\s*[:;]\s*").unwrap();
    // The recognizer reads the "(e)" of "Né(e)" as "fe)" often enough to
    // warrant its own rule.
    static ref BIRTH_MARKER: Regex = Regex::new(r"(?i)Néfe?\)").unwrap();
    static ref WHITESPACE_RUNS: Regex = Regex::new(r"\s+").unwrap();
    static ref BLANK_LINES: Regex = Regex::new(r"\n\s*\n").unwrap();
    // Matricules print as 4 digits, a letter, 3 digits; the letter is an
    // 'i' the engine misreads as a digit. Word boundaries keep this off
    // longer digit runs.
    static ref MATRICULE_DIGIT_RUN: Regex = Regex::new(r"\b(\d{4})(\d)(\d{3})\b").unwrap();
}

/// TextNormalizer repairs the systematic recognition errors seen on card
/// scans. The corrections run unconditionally, in a fixed order, in a
/// single pass.
pub struct TextNormalizer;

impl TextNormalizer {
    pub fn clean(raw_text: &str) -> String {
        let text = MATRICULE_LABEL.replace_all(raw_text, "Matricule: ");
        let text = NAME_LABEL.replace_all(&text, "Nom(s): ");
        let text = BIRTH_MARKER.replace_all(&text, "Né(e)");
        let text = WHITESPACE_RUNS.replace_all(&text, " ");
        let text = BLANK_LINES.replace_all(&text, "\n");

        let text = MATRICULE_DIGIT_RUN.replace_all(&text, |caps: &regex::Captures| {
            log::debug!("matricule digit correction: {} -> {}i{}", &caps[0], &caps[1], &caps[3]);
            format!("{}i{}", &caps[1], &caps[3])
        });

        text.trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matricule_label_variants_are_canonicalized() {
        assert_eq!(TextNormalizer::clean("MATRICULE; 2223i278"), "Matricule: 2223i278");
        assert_eq!(TextNormalizer::clean("matricule :2223i278"), "Matricule: 2223i278");
    }

    #[test]
    fn name_label_variants_are_canonicalized() {
        assert_eq!(TextNormalizer::clean("Nom (s) ; DUPONT"), "Nom(s): DUPONT");
        assert_eq!(TextNormalizer::clean("NOM(S): DUPONT"), "Nom(s): DUPONT");
    }

    #[test]
    fn birth_marker_misread_is_repaired() {
        assert_eq!(TextNormalizer::clean("DUPONT Néfe) le"), "DUPONT Né(e) le");
        assert_eq!(TextNormalizer::clean("DUPONT Néf) le"), "DUPONT Né(e) le");
    }

    #[test]
    fn whitespace_runs_collapse_to_single_spaces() {
        assert_eq!(
            TextNormalizer::clean("INSTITUT   SAINT\n\n  JEAN\tCARTE"),
            "INSTITUT SAINT JEAN CARTE"
        );
    }

    #[test]
    fn eight_digit_run_gets_letter_i_in_fifth_position() {
        assert_eq!(TextNormalizer::clean("Matricule: 22231278"), "Matricule: 2223i278");
    }

    #[test]
    fn digit_correction_leaves_surrounding_text_alone() {
        assert_eq!(
            TextNormalizer::clean("tel 22231278 suite"),
            "tel 2223i278 suite"
        );
    }

    #[test]
    fn digit_correction_only_fires_on_exactly_eight_digits() {
        // 7, 9 digits, or digit runs glued to a word must pass through
        assert_eq!(TextNormalizer::clean("2223127"), "2223127");
        assert_eq!(TextNormalizer::clean("222312789"), "222312789");
        assert_eq!(TextNormalizer::clean("X22231278"), "X22231278");
    }

    #[test]
    fn clean_is_idempotent_on_canonical_text() {
        let canonical =
            TextNormalizer::clean("Matricule; 22231278 Nom (s): IGRE URBAIN  Néfe) le 2 avril 2005");
        assert_eq!(TextNormalizer::clean(&canonical), canonical);
    }
}
