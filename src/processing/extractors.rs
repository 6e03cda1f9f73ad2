use lazy_static::lazy_static;
use regex::Regex;

use crate::models::CardData;

// Uppercase letters as they appear on the cards, accents included.
const UPPERCASE: &str = "A-ZÀÁÂÃÄÅÆÇÈÉÊËÌÍÎÏÐÑÒÓÔÕÖ";

// Words that show up in every card's boilerplate and can never be the
// holder's name.
const BOILERPLATE_WORDS: [&str; 3] = ["INSTITUT", "CARTE", "ETUDIANT"];

lazy_static! {
    // Matricule: 4 digits, 1 letter, 3 digits, optionally preceded by its label.
    static ref MATRICULE: Regex =
        Regex::new(r"(?i)(?:Matricule\s*:?\s*)?(\d{4}[a-zA-Z]\d{3})").unwrap();
    static ref LABELED_NAME: Regex = Regex::new(&format!(
        r"(?i)Nom\s*\(s\)\s*:?\s*([{0}\s]+?)(?:\s+Né\(e\)|$)",
        UPPERCASE
    ))
    .unwrap();
    static ref MARKER_ANCHORED_NAME: Regex =
        Regex::new(&format!(r"(?i)([{0}\s]{{3,}}?)\s+NÉ\(E\)", UPPERCASE)).unwrap();
    // Deliberately case-sensitive: the heuristic looks for runs that are
    // actually printed in capitals.
    static ref CAPITALIZED_RUN: Regex = Regex::new(&format!(
        r"([{0}]{{2,}}\s+[{0}]{{2,}}(?:\s+[{0}]{{2,}})*)",
        UPPERCASE
    ))
    .unwrap();
}

type NameStrategy = fn(&str, Option<&str>) -> Option<String>;

/// FieldExtractor pulls the matricule and holder name out of canonical
/// card text. Extraction never fails; fields that cannot be recovered are
/// simply absent.
pub struct FieldExtractor;

impl FieldExtractor {
    pub fn extract(text: &str) -> CardData {
        let matricule = Self::extract_matricule(text);
        let name = Self::extract_name(text, matricule.as_deref());
        if name.is_none() {
            log::warn!("no holder name found in card text");
        }
        CardData { matricule, name }
    }

    pub fn extract_matricule(text: &str) -> Option<String> {
        MATRICULE
            .captures(text)
            .map(|caps| caps[1].to_lowercase())
    }

    /// Name strategies in decreasing order of confidence; the first that
    /// produces anything wins.
    pub fn extract_name(text: &str, matricule: Option<&str>) -> Option<String> {
        const STRATEGIES: [NameStrategy; 4] = [
            FieldExtractor::labeled_name,
            FieldExtractor::marker_anchored_name,
            FieldExtractor::matricule_anchored_name,
            FieldExtractor::fallback_name,
        ];
        STRATEGIES
            .into_iter()
            .find_map(|strategy| strategy(text, matricule))
    }

    // Text after the "Nom(s):" label, up to the birth marker or end.
    fn labeled_name(text: &str, _matricule: Option<&str>) -> Option<String> {
        LABELED_NAME
            .captures(text)
            .map(|caps| caps[1].trim().to_uppercase())
    }

    // A run of capitals sitting right before "Né(e)", for cards where the
    // name label itself was lost.
    fn marker_anchored_name(text: &str, _matricule: Option<&str>) -> Option<String> {
        MARKER_ANCHORED_NAME
            .captures(text)
            .map(|caps| caps[1].trim().to_uppercase())
    }

    // Text between the matricule we already found and the birth marker.
    fn matricule_anchored_name(text: &str, matricule: Option<&str>) -> Option<String> {
        let matricule = matricule?;
        let pattern = format!(
            r"(?i){}\s+([{}\s]+?)\s+NÉ\(E\)",
            regex::escape(matricule),
            UPPERCASE
        );
        let regex = Regex::new(&pattern).ok()?;
        regex
            .captures(text)
            .map(|caps| caps[1].trim().to_uppercase())
    }

    // Last resort: the first run of two or more capitalized words, as long
    // as it is not institution boilerplate.
    fn fallback_name(text: &str, _matricule: Option<&str>) -> Option<String> {
        let caps = CAPITALIZED_RUN.captures(text)?;
        let candidate = caps[1].trim().to_string();
        if BOILERPLATE_WORDS.iter().any(|word| candidate.contains(word)) {
            return None;
        }
        Some(candidate.to_uppercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matricule_is_extracted_and_lowercased() {
        assert_eq!(
            FieldExtractor::extract_matricule("Matricule: 2223I278"),
            Some("2223i278".to_string())
        );
        assert_eq!(
            FieldExtractor::extract_matricule("id 2223i278 suite"),
            Some("2223i278".to_string())
        );
        assert_eq!(FieldExtractor::extract_matricule("rien ici"), None);
    }

    #[test]
    fn every_valid_matricule_shape_matches() {
        for letter in ['a', 'z', 'I', 'X'] {
            let matricule = format!("1234{}567", letter);
            assert_eq!(
                FieldExtractor::extract_matricule(&matricule),
                Some(matricule.to_lowercase())
            );
        }
    }

    #[test]
    fn labeled_name_stops_at_the_birth_marker() {
        let text = "Nom(s): IGRE URBAIN LEPONTIFE Né(e) le 2 avril 2005";
        assert_eq!(
            FieldExtractor::extract_name(text, None),
            Some("IGRE URBAIN LEPONTIFE".to_string())
        );
    }

    #[test]
    fn labeled_name_reaches_end_of_text_without_marker() {
        let text = "Nom(s): KOUAM PIERRE";
        assert_eq!(
            FieldExtractor::extract_name(text, None),
            Some("KOUAM PIERRE".to_string())
        );
    }

    #[test]
    fn marker_anchored_name_works_without_a_label() {
        let text = "2223i278 IGRE URBAIN LEPONTIFE NÉ(E) LE 2 avril 2005";
        // The marker-anchored strategy fires before the matricule-anchored
        // one and absorbs everything in capitals before NÉ(E).
        let name = FieldExtractor::extract_name(text, None).unwrap();
        assert!(name.ends_with("IGRE URBAIN LEPONTIFE"));
    }

    #[test]
    fn matricule_anchored_name_needs_the_matricule() {
        assert_eq!(
            FieldExtractor::matricule_anchored_name("2223i278 IGRE URBAIN Né(e) le", None),
            None
        );
        assert_eq!(
            FieldExtractor::matricule_anchored_name(
                "2223i278 IGRE URBAIN Né(e) le",
                Some("2223i278")
            ),
            Some("IGRE URBAIN".to_string())
        );
    }

    #[test]
    fn fallback_takes_the_first_capitalized_run() {
        assert_eq!(
            FieldExtractor::extract_name("photo KOUAM PIERRE classe B2", None),
            Some("KOUAM PIERRE".to_string())
        );
    }

    #[test]
    fn fallback_rejects_institution_boilerplate() {
        assert_eq!(
            FieldExtractor::extract_name("INSTITUT SAINT JEAN", None),
            None
        );
        assert_eq!(
            FieldExtractor::extract_name("CARTE DETUDIANT", None),
            None
        );
    }

    #[test]
    fn fallback_needs_at_least_two_words_of_two_letters() {
        assert_eq!(FieldExtractor::extract_name("DUPONT", None), None);
        assert_eq!(FieldExtractor::extract_name("A DUPONT", None), None);
    }

    #[test]
    fn extraction_fields_are_independent() {
        let data = FieldExtractor::extract("Matricule: 2223i278 quelconque bas de casse");
        assert_eq!(data.matricule, Some("2223i278".to_string()));
        assert_eq!(data.name, None);

        let data = FieldExtractor::extract("Nom(s): KOUAM PIERRE");
        assert_eq!(data.matricule, None);
        assert_eq!(data.name, Some("KOUAM PIERRE".to_string()));
    }
}
