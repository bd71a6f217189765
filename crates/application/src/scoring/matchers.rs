//! Ground-truth matchers.
//!
//! These compare the answer against the item's ground truth (the reference,
//! falling back to the expected answer). Items with no ground truth are not
//! scored.

use super::metric::{Metric, Score};
use super::text::char_len;
use llm_quality_domain::{EvaluationItem, ItemField, MetricError};
use tracing::debug;

const GROUND_TRUTH_FIELDS: &[ItemField] =
    &[ItemField::Output, ItemField::Reference, ItemField::ExpectedAnswer];

const NO_GROUND_TRUTH: &str = "no reference or expected answer";

fn normalize(text: &str, case_sensitive: bool) -> String {
    if case_sensitive {
        text.to_string()
    } else {
        text.to_lowercase()
    }
}

fn binary(matched: bool) -> f64 {
    if matched {
        1.0
    } else {
        0.0
    }
}

/// 1.0 when the ground truth appears anywhere in the answer.
#[derive(Debug, Clone)]
pub struct Contains {
    name: String,
    case_sensitive: bool,
}

impl Contains {
    pub const DEFAULT_NAME: &'static str = "contains";

    pub fn new() -> Self {
        Self {
            name: Self::DEFAULT_NAME.to_string(),
            case_sensitive: false,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }
}

impl Default for Contains {
    fn default() -> Self {
        Self::new()
    }
}

impl Metric for Contains {
    fn name(&self) -> &str {
        &self.name
    }

    fn score(&self, item: &EvaluationItem) -> Result<Score, MetricError> {
        let Some(truth) = item.ground_truth() else {
            return Ok(Score::not_applicable(NO_GROUND_TRUTH));
        };

        let contains = normalize(&item.output, self.case_sensitive)
            .contains(normalize(truth, self.case_sensitive).as_str());

        debug!(metric = %self.name, contains, "Contains evaluation");

        Ok(Score::value(binary(contains)))
    }

    fn reads(&self) -> &'static [ItemField] {
        GROUND_TRUTH_FIELDS
    }

    fn description(&self) -> &'static str {
        "1.0 if the reference (or expected answer) appears in the answer"
    }
}

/// 1.0 when the answer equals the ground truth exactly (whitespace included).
#[derive(Debug, Clone)]
pub struct Equals {
    name: String,
    case_sensitive: bool,
}

impl Equals {
    pub const DEFAULT_NAME: &'static str = "exact_match";

    pub fn new() -> Self {
        Self {
            name: Self::DEFAULT_NAME.to_string(),
            case_sensitive: false,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }
}

impl Default for Equals {
    fn default() -> Self {
        Self::new()
    }
}

impl Metric for Equals {
    fn name(&self) -> &str {
        &self.name
    }

    fn score(&self, item: &EvaluationItem) -> Result<Score, MetricError> {
        let Some(truth) = item.ground_truth() else {
            return Ok(Score::not_applicable(NO_GROUND_TRUTH));
        };

        let matches = normalize(&item.output, self.case_sensitive)
            == normalize(truth, self.case_sensitive);

        debug!(metric = %self.name, matches, "Exact match evaluation");

        Ok(Score::value(binary(matches)))
    }

    fn reads(&self) -> &'static [ItemField] {
        GROUND_TRUTH_FIELDS
    }

    fn description(&self) -> &'static str {
        "1.0 if the answer equals the reference (or expected answer)"
    }
}

/// Indel similarity between answer and ground truth, in [0, 1].
#[derive(Debug, Clone)]
pub struct LevenshteinRatio {
    name: String,
    case_sensitive: bool,
}

impl LevenshteinRatio {
    pub const DEFAULT_NAME: &'static str = "similarity";

    pub fn new() -> Self {
        Self {
            name: Self::DEFAULT_NAME.to_string(),
            case_sensitive: false,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    /// `(len_a + len_b - indel_distance) / (len_a + len_b)`, counted in
    /// chars. Two empty strings are identical.
    pub fn ratio(a: &str, b: &str) -> f64 {
        let total = char_len(a) + char_len(b);
        if total == 0 {
            return 1.0;
        }

        (total - indel_distance(a, b)) as f64 / total as f64
    }
}

impl Default for LevenshteinRatio {
    fn default() -> Self {
        Self::new()
    }
}

impl Metric for LevenshteinRatio {
    fn name(&self) -> &str {
        &self.name
    }

    fn score(&self, item: &EvaluationItem) -> Result<Score, MetricError> {
        let Some(truth) = item.ground_truth() else {
            return Ok(Score::not_applicable(NO_GROUND_TRUTH));
        };

        let actual = normalize(&item.output, self.case_sensitive);
        let expected = normalize(truth, self.case_sensitive);
        let similarity = Self::ratio(&actual, &expected);

        debug!(metric = %self.name, similarity, "Levenshtein evaluation");

        Ok(Score::value(similarity))
    }

    fn reads(&self) -> &'static [ItemField] {
        GROUND_TRUTH_FIELDS
    }

    fn description(&self) -> &'static str {
        "Indel similarity to the reference (or expected answer)"
    }
}

/// Insertions plus deletions turning `s1` into `s2`, counted in chars.
///
/// Substitutions are not allowed, so the distance is
/// `len_a + len_b - 2 * lcs(a, b)`.
pub fn indel_distance(s1: &str, s2: &str) -> usize {
    let s1_chars: Vec<char> = s1.chars().collect();
    let s2_chars: Vec<char> = s2.chars().collect();

    s1_chars.len() + s2_chars.len() - 2 * longest_common_subsequence(&s1_chars, &s2_chars)
}

/// Two-row LCS table
fn longest_common_subsequence(a: &[char], b: &[char]) -> usize {
    let mut previous = vec![0usize; b.len() + 1];
    let mut current = vec![0usize; b.len() + 1];

    for x in a {
        for (j, y) in b.iter().enumerate() {
            current[j + 1] = if x == y {
                previous[j] + 1
            } else {
                previous[j + 1].max(current[j])
            };
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b.len()]
}
