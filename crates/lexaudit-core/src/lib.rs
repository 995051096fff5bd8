pub mod analyzer;
pub mod report;

pub use analyzer::{
    catalogue, default_analyzer::DefaultAnalyzer, segmenter::split_sentences, Analyzer, Category,
    Finding, GradeThresholds, Guard, RiskGrade, RiskReport, Rule, RuleValidationError, Scope,
    Severity, Trigger,
};
