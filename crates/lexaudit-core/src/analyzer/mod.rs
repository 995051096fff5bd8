use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod catalogue;
pub mod default_analyzer;
pub mod segmenter;

/// Thresholds that map the weighted issue score into a qualitative grade.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradeThresholds {
    pub medium: u32,
    pub high: u32,
}

impl Default for GradeThresholds {
    fn default() -> Self {
        Self { medium: 4, high: 8 }
    }
}

/// Classification buckets for overall letter risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskGrade {
    Low,
    Medium,
    High,
}

impl RiskGrade {
    /// Map a total score into a grade using the default thresholds.
    pub fn from_score(score: u32) -> Self {
        Self::from_score_with_thresholds(score, &GradeThresholds::default())
    }

    /// Map a total score using caller-provided thresholds.
    pub fn from_score_with_thresholds(score: u32, thresholds: &GradeThresholds) -> Self {
        if score >= thresholds.high {
            Self::High
        } else if score >= thresholds.medium {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

impl fmt::Display for RiskGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        };
        f.write_str(label)
    }
}

/// Issue severity. Closed set so an undefined severity cannot be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Minor,
    Major,
    Critical,
}

impl Severity {
    /// Integer contribution of this severity toward the total score.
    pub fn weight(self) -> u32 {
        match self {
            Self::Minor => 1,
            Self::Major => 2,
            Self::Critical => 3,
        }
    }
}

/// Risk categories reported by the built-in catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Termination,
    #[serde(rename = "Payment Demand")]
    PaymentDemand,
    #[serde(rename = "Defamation Risk")]
    DefamationRisk,
    Privacy,
    #[serde(rename = "Contract Scope")]
    ContractScope,
    Disclaimer,
    Clarity,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Termination => "Termination",
            Self::PaymentDemand => "Payment Demand",
            Self::DefamationRisk => "Defamation Risk",
            Self::Privacy => "Privacy",
            Self::ContractScope => "Contract Scope",
            Self::Disclaimer => "Disclaimer",
            Self::Clarity => "Clarity",
        };
        f.write_str(label)
    }
}

/// Text a rule inspects: one sentence at a time, or the whole letter once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    Sentence,
    Document,
}

/// Suppression guard attached to a keyword trigger. When the guard matches
/// the same text as the trigger, the rule stays silent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Guard {
    Keywords(Vec<String>),
    Pattern(String),
}

/// How a rule decides to fire. Keyword matching is case-insensitive
/// substring matching; pattern rules emit one finding per distinct match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trigger {
    Keywords {
        any: Vec<String>,
        unless: Option<Guard>,
    },
    Pattern {
        regex: String,
    },
}

/// Definition of a single detection rule in the catalogue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    /// Unique identifier (namespaced, e.g. `TERM_NO_CLAUSE`).
    pub id: String,
    pub category: Category,
    pub severity: Severity,
    /// Descriptive risk-class label shown in reports.
    #[serde(rename = "type")]
    pub kind: String,
    /// Message template; `{match}` expands to the matched token for
    /// pattern rules.
    pub message: String,
    pub scope: Scope,
    pub trigger: Trigger,
}

impl Rule {
    /// Validate invariants for a rule definition.
    pub fn validate(&self) -> Result<(), RuleValidationError> {
        if self.id.trim().is_empty() {
            return Err(RuleValidationError::EmptyId);
        }
        if self.message.trim().is_empty() {
            return Err(RuleValidationError::EmptyMessage {
                rule_id: self.id.clone(),
            });
        }
        match &self.trigger {
            Trigger::Keywords { any, unless } => {
                if any.is_empty() || any.iter().any(|word| word.trim().is_empty()) {
                    return Err(RuleValidationError::EmptyKeywords {
                        rule_id: self.id.clone(),
                    });
                }
                match unless {
                    Some(Guard::Keywords(words))
                        if words.is_empty()
                            || words.iter().any(|word| word.trim().is_empty()) =>
                    {
                        return Err(RuleValidationError::EmptyKeywords {
                            rule_id: self.id.clone(),
                        });
                    }
                    Some(Guard::Pattern(pattern)) if pattern.is_empty() => {
                        return Err(RuleValidationError::EmptyPattern {
                            rule_id: self.id.clone(),
                        });
                    }
                    _ => {}
                }
            }
            Trigger::Pattern { regex } => {
                if regex.is_empty() {
                    return Err(RuleValidationError::EmptyPattern {
                        rule_id: self.id.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

/// Errors emitted while validating rule definitions.
#[derive(Debug, Error, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RuleValidationError {
    #[error("rule id must not be blank")]
    EmptyId,
    #[error("rule `{rule_id}` message must not be blank")]
    EmptyMessage { rule_id: String },
    #[error("rule `{rule_id}` keyword list must not be empty or contain blanks")]
    EmptyKeywords { rule_id: String },
    #[error("rule `{rule_id}` pattern must not be empty")]
    EmptyPattern { rule_id: String },
}

/// One detected issue. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    pub category: Category,
    pub message: String,
    pub severity: Severity,
    /// Descriptive risk-class label inherited from the rule.
    #[serde(rename = "type")]
    pub kind: String,
    /// Sentence (or text fragment) that triggered the rule.
    pub source: String,
}

/// End-to-end report produced by the analysis pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskReport {
    pub grade: RiskGrade,
    pub total_score: u32,
    pub issue_count: usize,
    pub stats: BTreeMap<Category, usize>,
    /// Distinct triggering sentences, in first-appearance order.
    pub unsafe_sentences: Vec<String>,
    pub issues: Vec<Finding>,
}

impl RiskReport {
    /// Fold a finding list into score, stats and grade using the default
    /// thresholds.
    pub fn from_findings(issues: Vec<Finding>) -> Self {
        Self::from_findings_with_thresholds(issues, &GradeThresholds::default())
    }

    pub fn from_findings_with_thresholds(
        issues: Vec<Finding>,
        thresholds: &GradeThresholds,
    ) -> Self {
        let mut total_score = 0;
        let mut stats: BTreeMap<Category, usize> = BTreeMap::new();
        let mut unsafe_sentences: Vec<String> = Vec::new();
        for finding in &issues {
            total_score += finding.severity.weight();
            *stats.entry(finding.category).or_insert(0) += 1;
            if !unsafe_sentences.contains(&finding.source) {
                unsafe_sentences.push(finding.source.clone());
            }
        }
        Self {
            grade: RiskGrade::from_score_with_thresholds(total_score, thresholds),
            total_score,
            issue_count: issues.len(),
            stats,
            unsafe_sentences,
            issues,
        }
    }
}

/// Primary analysis interface transforming raw letter text into a report.
pub trait Analyzer {
    /// Run the full rule catalogue against the provided UTF-8 text. Total
    /// for every input; malformed or empty text simply yields no findings.
    fn analyze(&self, input: &str) -> RiskReport;
}
