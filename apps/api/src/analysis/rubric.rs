//! The scoring rubric — a fixed, ordered table of criteria.
//!
//! Compiled once on first use and shared read-only across requests; nothing
//! here mutates after initialization. Patterns are matched against the
//! lower-cased resume text, so they are written in lowercase.

use once_cell::sync::Lazy;
use regex::Regex;

/// One rubric entry: a resume aspect, the patterns that detect it, the
/// points it is worth, and the suggestion shown when it is under-satisfied.
pub struct Criterion {
    pub name: &'static str,
    pub patterns: Vec<Regex>,
    pub weight: u32,
    pub suggestion: &'static str,
}

/// Share of a criterion's weight it must earn before its suggestion is withheld.
pub const SUGGESTION_THRESHOLD: f64 = 0.6;

/// The single suggestion emitted when there is no text to evaluate.
pub const NO_TEXT_SUGGESTION: &str = "Could not extract any readable text from the resume";

static RUBRIC: Lazy<Vec<Criterion>> = Lazy::new(|| {
    vec![
        Criterion {
            name: "contact_info",
            patterns: vec![
                re(r"email|@"),
                re(r"phone|tel|\d{3}[-.]?\d{3}[-.]?\d{4}"),
                re(r"linkedin|github"),
            ],
            weight: 15,
            suggestion: "Include complete contact information (email, phone, LinkedIn)",
        },
        Criterion {
            name: "experience",
            patterns: vec![
                re(r"experience|work|job|position|role"),
                re(r"company|organization|corp"),
            ],
            weight: 25,
            suggestion: "Add more detailed work experience with specific roles and companies",
        },
        Criterion {
            name: "education",
            patterns: vec![
                re(r"education|degree|university|college|school"),
                re(r"bachelor|master|phd|diploma"),
            ],
            weight: 20,
            suggestion: "Include educational background with degrees and institutions",
        },
        Criterion {
            name: "skills",
            patterns: vec![
                re(r"skills|technical|programming|software"),
                re(r"python|java|javascript|html|css"),
            ],
            weight: 20,
            suggestion: "List relevant technical and soft skills",
        },
        Criterion {
            name: "achievements",
            patterns: vec![
                re(r"achievement|award|project|accomplishment"),
                re(r"led|managed|developed|created"),
            ],
            weight: 10,
            suggestion: "Highlight key achievements and projects",
        },
        Criterion {
            name: "keywords",
            patterns: vec![re(
                r"responsible|managed|developed|implemented|designed|created",
            )],
            weight: 10,
            suggestion: "Use more action verbs and industry-specific keywords",
        },
    ]
});

/// The full rubric in evaluation order.
pub fn rubric() -> &'static [Criterion] {
    &RUBRIC
}

fn re(pattern: &str) -> Regex {
    Regex::new(pattern).expect("rubric pattern must compile")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rubric_has_six_criteria_in_order() {
        let names: Vec<&str> = rubric().iter().map(|c| c.name).collect();
        assert_eq!(
            names,
            vec![
                "contact_info",
                "experience",
                "education",
                "skills",
                "achievements",
                "keywords"
            ]
        );
    }

    #[test]
    fn test_weights_sum_to_one_hundred() {
        let total: u32 = rubric().iter().map(|c| c.weight).sum();
        assert_eq!(total, 100);
    }

    #[test]
    fn test_every_criterion_has_patterns() {
        for criterion in rubric() {
            assert!(!criterion.patterns.is_empty(), "{}", criterion.name);
        }
    }

    #[test]
    fn test_phone_shape_pattern_matches() {
        let phone = &rubric()[0].patterns[1];
        assert!(phone.is_match("555-867-5309"));
        assert!(phone.is_match("555.867.5309"));
        assert!(phone.is_match("5558675309"));
        assert!(phone.is_match("call tel. 12345"));
        assert!(!phone.is_match("no digits here"));
    }

    #[test]
    fn test_at_sign_counts_as_email_evidence() {
        let email = &rubric()[0].patterns[0];
        assert!(email.is_match("jane@example.com"));
        assert!(email.is_match("email me"));
        assert!(!email.is_match("no contact details"));
    }
}
