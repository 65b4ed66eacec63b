// src/rubric.rs
use crate::errors::{GradeError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The audience/strictness framing applied to grading.
///
/// Chosen once per grading operation; one level applies to a whole batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EvaluationLevel {
    #[serde(rename = "High School")]
    HighSchool,
    #[serde(rename = "College")]
    College,
    #[serde(rename = "Professional")]
    Professional,
}

impl EvaluationLevel {
    /// All levels, in the order the UI presents them.
    pub const ALL: [EvaluationLevel; 3] = [
        EvaluationLevel::HighSchool,
        EvaluationLevel::College,
        EvaluationLevel::Professional,
    ];

    fn instruction(&self) -> &'static str {
        match self {
            EvaluationLevel::HighSchool => {
                "Evaluate as a high school teacher focusing on basic structure, clarity, and grammar."
            }
            EvaluationLevel::College => {
                "Evaluate as a college professor emphasizing argument strength, evidence, and academic tone."
            }
            EvaluationLevel::Professional => {
                "Evaluate as a professional editor, emphasizing critical thinking, precision, and polish."
            }
        }
    }
}

impl fmt::Display for EvaluationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvaluationLevel::HighSchool => write!(f, "High School"),
            EvaluationLevel::College => write!(f, "College"),
            EvaluationLevel::Professional => write!(f, "Professional"),
        }
    }
}

impl FromStr for EvaluationLevel {
    type Err = GradeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "High School" => Ok(EvaluationLevel::HighSchool),
            "College" => Ok(EvaluationLevel::College),
            "Professional" => Ok(EvaluationLevel::Professional),
            other => Err(GradeError::Config(format!(
                "Unknown evaluation level '{}'. Expected one of: High School, College, Professional.",
                other
            ))),
        }
    }
}

/// Builds the system prompt encoding the grading rubric for a level.
///
/// Pure and deterministic: the same level always yields a byte-identical
/// prompt string.
pub fn build_prompt(level: EvaluationLevel) -> String {
    format!(
        r#"You are an expert writing instructor grading a student essay. {}
Use the rubric below to assign a detailed score out of 100 and provide constructive feedback.

Rubric Criteria (each scored out of 20 points):
1. Thesis Clarity (20 points):
   - 17-20: Clear, specific, and consistently supported thesis.
   - 13-16: Clear thesis but may lack depth or consistent support.
   - 9-12: Weak or vague thesis.
   - 0-8: Unclear or missing thesis.

2. Evidence and Examples (20 points):
   - 17-20: Strong, relevant, and persuasive evidence throughout.
   - 13-16: Adequate evidence, but may lack specificity or depth.
   - 9-12: Weak or minimal evidence.
   - 0-8: Lacks supporting evidence.

3. Organization and Flow (20 points):
   - 17-20: Clear structure and excellent flow between paragraphs.
   - 13-16: Generally logical structure with minor issues.
   - 9-12: Some disorganization or weak transitions.
   - 0-8: Poor or confusing structure.

4. Grammar and Style (20 points):
   - 17-20: Virtually no errors, strong and effective style.
   - 13-16: Some grammar/style issues that don't significantly distract.
   - 9-12: Noticeable issues that detract from clarity.
   - 0-8: Frequent grammar/style issues.

5. Critical Thinking and Insight (20 points):
   - 17-20: Deep analysis and original insight.
   - 13-16: Reasonable insight with some depth.
   - 9-12: Basic analysis, lacks depth.
   - 0-8: Superficial or absent analysis.

Instructions:
- Provide a score for each category (out of 20).
- Sum the scores to calculate the final grade out of 100.
- Provide the corresponding letter grade using this scale:
   A = 93-100, A- = 90-92, B+ = 87-89, B = 83-86, B- = 80-82,
   C+ = 77-79, C = 73-76, C- = 70-72, D = 60-69, F = below 60
- Give overall feedback and suggestions for improvement.
- Highlight specific sentences that need revision and explain why.
- If grammar issues are present, suggest how to rewrite the sentences."#,
        level.instruction()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_is_deterministic_for_every_level() {
        for level in EvaluationLevel::ALL {
            assert_eq!(build_prompt(level), build_prompt(level));
        }
    }

    #[test]
    fn prompt_contains_all_rubric_criteria() {
        let criteria = [
            "Thesis Clarity",
            "Evidence and Examples",
            "Organization and Flow",
            "Grammar and Style",
            "Critical Thinking and Insight",
        ];
        for level in EvaluationLevel::ALL {
            let prompt = build_prompt(level);
            for criterion in criteria {
                assert!(
                    prompt.contains(criterion),
                    "prompt for {} is missing criterion '{}'",
                    level,
                    criterion
                );
            }
        }
    }

    #[test]
    fn prompt_contains_full_letter_grade_scale() {
        // Every band of the 0-100 scale must be present, with no gaps.
        let bands = [
            "A = 93-100",
            "A- = 90-92",
            "B+ = 87-89",
            "B = 83-86",
            "B- = 80-82",
            "C+ = 77-79",
            "C = 73-76",
            "C- = 70-72",
            "D = 60-69",
            "F = below 60",
        ];
        let prompt = build_prompt(EvaluationLevel::College);
        for band in bands {
            assert!(prompt.contains(band), "missing grade band '{}'", band);
        }
    }

    #[test]
    fn prompts_differ_between_levels() {
        assert_ne!(
            build_prompt(EvaluationLevel::HighSchool),
            build_prompt(EvaluationLevel::College)
        );
        assert_ne!(
            build_prompt(EvaluationLevel::College),
            build_prompt(EvaluationLevel::Professional)
        );
    }

    #[test]
    fn level_labels_round_trip() {
        for level in EvaluationLevel::ALL {
            let parsed: EvaluationLevel = level.to_string().parse().unwrap();
            assert_eq!(parsed, level);
        }
    }

    #[test]
    fn unknown_level_label_is_rejected() {
        let err = "Middle School".parse::<EvaluationLevel>().unwrap_err();
        assert!(matches!(err, GradeError::Config(_)));
    }
}
