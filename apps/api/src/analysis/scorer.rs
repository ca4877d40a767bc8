//! Resume scoring — pluggable, trait-based scorer over the fixed rubric.
//!
//! Two models exist: `WeightedRubricScorer` (partial credit per criterion,
//! the canonical deployment) and `FlatBonusScorer` (base score plus binary
//! keyword-group bonuses). One is chosen at startup via `SCORING_MODEL`;
//! their semantics are never blended inside a process.
//!
//! `AppState` holds an `Arc<dyn ResumeScorer>`. Scoring is pure and
//! synchronous: it reads only its input string and the read-only rubric, so
//! it runs concurrently across requests without locking.

use serde::Serialize;

use crate::analysis::rubric::{rubric, NO_TEXT_SUGGESTION, SUGGESTION_THRESHOLD};

/// Output of one scoring pass. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    /// Integer score in [0, 100].
    pub score: u32,
    /// At most one suggestion per criterion, in rubric order.
    pub suggestions: Vec<String>,
}

pub trait ResumeScorer: Send + Sync {
    /// Scores extracted resume text. Deterministic: same text in, same
    /// result out; the input is never mutated and nothing else is read.
    fn score(&self, text: &str) -> AnalysisResult;

    /// Stable label for logs and diagnostics.
    fn name(&self) -> &'static str;
}

// ────────────────────────────────────────────────────────────────────────────
// WeightedRubricScorer — canonical model
// ────────────────────────────────────────────────────────────────────────────

/// Weighted partial-credit scorer.
///
/// Per criterion: `weight × matched_patterns / total_patterns`, clamped to
/// the criterion weight, accumulated into the total. A criterion earning
/// less than 60% of its weight contributes its suggestion. Texts longer
/// than 500 characters earn +5, longer than 1000 a further +5. The final
/// score is capped at 100 and truncated to an integer.
pub struct WeightedRubricScorer;

impl ResumeScorer for WeightedRubricScorer {
    fn score(&self, text: &str) -> AnalysisResult {
        if text.trim().is_empty() {
            return empty_text_result();
        }

        let lower = text.to_lowercase();
        let mut total = 0.0_f64;
        let mut suggestions = Vec::new();

        for criterion in rubric() {
            let matched = criterion
                .patterns
                .iter()
                .filter(|p| p.is_match(&lower))
                .count();
            let weight = f64::from(criterion.weight);
            let criterion_score = weight * matched as f64 / criterion.patterns.len() as f64;

            total += criterion_score.min(weight);

            if criterion_score < weight * SUGGESTION_THRESHOLD {
                suggestions.push(criterion.suggestion.to_string());
            }
        }

        let chars = text.chars().count();
        if chars > 500 {
            total += 5.0;
        }
        if chars > 1000 {
            total += 5.0;
        }

        AnalysisResult {
            score: total.min(100.0) as u32,
            suggestions,
        }
    }

    fn name(&self) -> &'static str {
        "weighted"
    }
}

// ────────────────────────────────────────────────────────────────────────────
// FlatBonusScorer — configuration variant
// ────────────────────────────────────────────────────────────────────────────

struct KeywordGroup {
    keywords: &'static [&'static str],
    bonus: u32,
    suggestion: &'static str,
}

const FLAT_BASE_SCORE: u32 = 50;

/// Binary keyword groups, in rubric order. A group with any keyword present
/// earns its bonus; a group with every keyword absent emits its suggestion.
const FLAT_GROUPS: &[KeywordGroup] = &[
    KeywordGroup {
        keywords: &["email", "@", "phone", "linkedin", "github"],
        bonus: 10,
        suggestion: "Include complete contact information (email, phone, LinkedIn)",
    },
    KeywordGroup {
        keywords: &["experience", "work", "job", "position", "role"],
        bonus: 10,
        suggestion: "Add more detailed work experience with specific roles and companies",
    },
    KeywordGroup {
        keywords: &["education", "degree", "university", "college", "bachelor", "master"],
        bonus: 15,
        suggestion: "Include educational background with degrees and institutions",
    },
    KeywordGroup {
        keywords: &["skills", "python", "java", "javascript", "html", "css"],
        bonus: 10,
        suggestion: "List relevant technical and soft skills",
    },
    KeywordGroup {
        keywords: &["achievement", "award", "project", "led"],
        bonus: 10,
        suggestion: "Highlight key achievements and projects",
    },
    KeywordGroup {
        keywords: &["responsible", "managed", "developed", "implemented", "designed", "created"],
        bonus: 5,
        suggestion: "Use more action verbs and industry-specific keywords",
    },
];

/// Flat-bonus scorer: base score 50, binary group checks, no partial credit.
pub struct FlatBonusScorer;

impl ResumeScorer for FlatBonusScorer {
    fn score(&self, text: &str) -> AnalysisResult {
        if text.trim().is_empty() {
            return empty_text_result();
        }

        let lower = text.to_lowercase();
        let mut score = FLAT_BASE_SCORE;
        let mut suggestions = Vec::new();

        for group in FLAT_GROUPS {
            if group.keywords.iter().any(|kw| lower.contains(kw)) {
                score += group.bonus;
            } else {
                suggestions.push(group.suggestion.to_string());
            }
        }

        AnalysisResult {
            score: score.min(100),
            suggestions,
        }
    }

    fn name(&self) -> &'static str {
        "flat"
    }
}

/// Shared short-circuit for text that is empty or whitespace-only. The
/// rubric is never evaluated against such input.
fn empty_text_result() -> AnalysisResult {
    AnalysisResult {
        score: 0,
        suggestions: vec![NO_TEXT_SUGGESTION.to_string()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Hits: contact 1/3, experience 2/2, education 2/2, skills 2/2,
    // achievements 1/2 ("project" without any leadership verb), keywords 0/1.
    const PARTIAL_RESUME: &str = "email: a@b.com. experience: software engineer at acme corp. \
         education: bachelor of science. skills: python and java. contributed to a project.";

    const FULL_RESUME: &str = "Email jane@example.com, phone 555-867-5309, linkedin and github. \
         Experience: work at a company organization corp. Education: degree from a university, \
         bachelor and master. Skills: technical programming in python and java. \
         Achievement: award-winning project led, managed, developed and created. \
         Responsible for implemented and designed systems.";

    #[test]
    fn test_weighted_partial_credit_sums_to_75() {
        let result = WeightedRubricScorer.score(PARTIAL_RESUME);
        assert_eq!(result.score, 75);
    }

    #[test]
    fn test_weighted_partial_credit_suggestions_in_rubric_order() {
        let result = WeightedRubricScorer.score(PARTIAL_RESUME);
        assert_eq!(
            result.suggestions,
            vec![
                "Include complete contact information (email, phone, LinkedIn)",
                "Highlight key achievements and projects",
                "Use more action verbs and industry-specific keywords",
            ]
        );
    }

    #[test]
    fn test_weighted_full_resume_scores_100_with_no_suggestions() {
        let result = WeightedRubricScorer.score(FULL_RESUME);
        assert_eq!(result.score, 100);
        assert!(result.suggestions.is_empty());
    }

    #[test]
    fn test_weighted_score_never_exceeds_100() {
        // All criteria satisfied plus both length bonuses would reach 110.
        let stuffed = format!("{FULL_RESUME} {}", "z".repeat(1200));
        let result = WeightedRubricScorer.score(&stuffed);
        assert_eq!(result.score, 100);
    }

    #[test]
    fn test_weighted_fractional_credit_truncates() {
        // experience alone: 25 × 1/2 = 12.5, truncated to 12 at the end.
        let result = WeightedRubricScorer.score("experience");
        assert_eq!(result.score, 12);
        // every criterion is under 60% of its weight here
        assert_eq!(result.suggestions.len(), rubric().len());
    }

    #[test]
    fn test_weighted_criterion_at_or_above_threshold_withholds_suggestion() {
        // contact_info 2/3 = 10 points ≥ 60% of 15, so no contact suggestion.
        let result = WeightedRubricScorer.score("email phone");
        assert_eq!(result.score, 10);
        assert!(!result
            .suggestions
            .iter()
            .any(|s| s.contains("contact information")));
    }

    #[test]
    fn test_weighted_empty_text_short_circuits() {
        for text in ["", "   ", "\n\t "] {
            let result = WeightedRubricScorer.score(text);
            assert_eq!(result.score, 0);
            assert_eq!(result.suggestions, vec![NO_TEXT_SUGGESTION.to_string()]);
        }
    }

    #[test]
    fn test_weighted_is_idempotent() {
        let first = WeightedRubricScorer.score(PARTIAL_RESUME);
        let second = WeightedRubricScorer.score(PARTIAL_RESUME);
        assert_eq!(first, second);
    }

    #[test]
    fn test_weighted_adding_keyword_is_monotone_per_criterion() {
        let base = WeightedRubricScorer.score("email");
        let more = WeightedRubricScorer.score("email linkedin");
        assert!(more.score > base.score);
        assert_eq!(base.score, 5);
        assert_eq!(more.score, 10);
    }

    #[test]
    fn test_weighted_length_bonus_tiers() {
        // 'z' matches no rubric pattern, so only the length bonus moves.
        let short = WeightedRubricScorer.score(&"z".repeat(500));
        let medium = WeightedRubricScorer.score(&"z".repeat(501));
        let long = WeightedRubricScorer.score(&"z".repeat(1001));
        assert_eq!(short.score, 0);
        assert_eq!(medium.score, 5);
        assert_eq!(long.score, 10);
    }

    #[test]
    fn test_weighted_length_bonus_adds_ten_over_truncated_text() {
        let content = "skills python";
        let padded = format!("{content} {}", "z".repeat(1100));
        let short = WeightedRubricScorer.score(content);
        let long = WeightedRubricScorer.score(&padded);
        assert_eq!(long.score, short.score + 10);
        assert_eq!(long.suggestions, short.suggestions);
    }

    #[test]
    fn test_weighted_scoring_ignores_case() {
        let lower = WeightedRubricScorer.score("experience at acme corp");
        let upper = WeightedRubricScorer.score("EXPERIENCE AT ACME CORP");
        assert_eq!(lower, upper);
    }

    #[test]
    fn test_flat_no_keywords_scores_exactly_base() {
        let result = FlatBonusScorer.score("zzzz zzz zz");
        assert_eq!(result.score, FLAT_BASE_SCORE);
        let expected: Vec<String> = FLAT_GROUPS
            .iter()
            .map(|g| g.suggestion.to_string())
            .collect();
        assert_eq!(result.suggestions, expected);
    }

    #[test]
    fn test_flat_all_groups_present_clamps_at_100() {
        // 50 + 10 + 10 + 15 + 10 + 10 + 5 = 110 before the clamp.
        let result = FlatBonusScorer.score("email experience education skills award managed");
        assert_eq!(result.score, 100);
        assert!(result.suggestions.is_empty());
    }

    #[test]
    fn test_flat_groups_are_binary_not_proportional() {
        // one keyword or five from the same group earns the same bonus
        let one = FlatBonusScorer.score("email");
        let many = FlatBonusScorer.score("email @ phone linkedin github");
        assert_eq!(one.score, many.score);
        assert_eq!(one.score, 60);
    }

    #[test]
    fn test_flat_partial_groups() {
        let result = FlatBonusScorer.score("email experience");
        assert_eq!(result.score, 70);
        assert_eq!(result.suggestions.len(), 4);
    }

    #[test]
    fn test_flat_empty_text_short_circuits_to_zero() {
        let result = FlatBonusScorer.score("   ");
        assert_eq!(result.score, 0);
        assert_eq!(result.suggestions, vec![NO_TEXT_SUGGESTION.to_string()]);
    }

    #[test]
    fn test_scorer_labels() {
        assert_eq!(WeightedRubricScorer.name(), "weighted");
        assert_eq!(FlatBonusScorer.name(), "flat");
    }

    #[test]
    fn test_both_models_bound_scores_for_arbitrary_inputs() {
        let repeated = "experience corp ".repeat(400);
        let inputs = [
            "",
            "a",
            FULL_RESUME,
            PARTIAL_RESUME,
            "πλήρης βιογραφία με unicode 📄",
            repeated.as_str(),
        ];
        for text in inputs {
            for scorer in [&WeightedRubricScorer as &dyn ResumeScorer, &FlatBonusScorer] {
                let result = scorer.score(text);
                assert!(result.score <= 100, "{} on {:?}", scorer.name(), text);
                assert!(result.suggestions.len() <= rubric().len());
            }
        }
    }
}
