use std::collections::HashSet;

use aho_corasick::AhoCorasick;
use anyhow::{Context, Result};
use regex::Regex;
use tracing::{debug, instrument, trace};

use super::segmenter::split_sentences;
use super::{
    catalogue, Analyzer, Finding, GradeThresholds, Guard, RiskReport, Rule, Scope, Trigger,
};

/// Analyzer backed by a compiled rule table. Rules compile once at
/// construction; `analyze` itself is total and never fails.
#[derive(Debug)]
pub struct DefaultAnalyzer {
    rules: Vec<CompiledRule>,
    thresholds: GradeThresholds,
}

#[derive(Debug)]
struct CompiledRule {
    rule: Rule,
    matcher: Matcher,
}

#[derive(Debug)]
enum Matcher {
    Keywords {
        automaton: AhoCorasick,
        unless: Option<CompiledGuard>,
    },
    Pattern(Regex),
}

#[derive(Debug)]
enum CompiledGuard {
    Keywords(AhoCorasick),
    Pattern(Regex),
}

impl DefaultAnalyzer {
    /// Build an analyzer over the built-in catalogue with default
    /// grade thresholds.
    pub fn new() -> Result<Self> {
        Self::with_rules(catalogue::builtin().to_vec())
    }

    pub fn with_rules(rules: Vec<Rule>) -> Result<Self> {
        Self::with_config(rules, GradeThresholds::default())
    }

    pub fn with_config(rules: Vec<Rule>, thresholds: GradeThresholds) -> Result<Self> {
        let mut compiled = Vec::with_capacity(rules.len());
        for rule in rules {
            rule.validate()
                .with_context(|| format!("invalid rule definition `{}`", rule.id))?;
            let matcher = compile_matcher(&rule)?;
            compiled.push(CompiledRule { rule, matcher });
        }
        Ok(Self {
            rules: compiled,
            thresholds,
        })
    }
}

fn compile_matcher(rule: &Rule) -> Result<Matcher> {
    match &rule.trigger {
        Trigger::Keywords { any, unless } => {
            let automaton = keyword_automaton(any).with_context(|| {
                format!("failed to build keyword automaton for rule `{}`", rule.id)
            })?;
            let unless = match unless {
                Some(Guard::Keywords(words)) => {
                    Some(CompiledGuard::Keywords(keyword_automaton(words).with_context(
                        || format!("failed to build guard automaton for rule `{}`", rule.id),
                    )?))
                }
                Some(Guard::Pattern(pattern)) => Some(CompiledGuard::Pattern(
                    Regex::new(pattern)
                        .with_context(|| format!("invalid guard pattern for rule `{}`", rule.id))?,
                )),
                None => None,
            };
            Ok(Matcher::Keywords { automaton, unless })
        }
        Trigger::Pattern { regex } => {
            let regex = Regex::new(regex)
                .with_context(|| format!("invalid regex pattern for rule `{}`", rule.id))?;
            Ok(Matcher::Pattern(regex))
        }
    }
}

fn keyword_automaton(words: &[String]) -> Result<AhoCorasick, aho_corasick::BuildError> {
    AhoCorasick::builder()
        .ascii_case_insensitive(true)
        .build(words)
}

impl CompiledRule {
    /// Run the matcher over `haystack`, attributing findings to `source`.
    /// `seen` carries normalized pattern matches already reported for this
    /// rule, so repeated identifiers yield a single finding.
    fn evaluate(
        &self,
        haystack: &str,
        source: &str,
        seen: &mut HashSet<String>,
        out: &mut Vec<Finding>,
    ) {
        match &self.matcher {
            Matcher::Keywords { automaton, unless } => {
                if !automaton.is_match(haystack) {
                    return;
                }
                let suppressed = match unless {
                    Some(CompiledGuard::Keywords(guard)) => guard.is_match(haystack),
                    Some(CompiledGuard::Pattern(guard)) => guard.is_match(haystack),
                    None => false,
                };
                if suppressed {
                    trace!(rule_id = %self.rule.id, "trigger suppressed by guard");
                    return;
                }
                out.push(self.finding(self.rule.message.clone(), source));
            }
            Matcher::Pattern(regex) => {
                for matched in regex.find_iter(haystack) {
                    let normalized = matched.as_str().to_lowercase();
                    if !seen.insert(normalized) {
                        trace!(rule_id = %self.rule.id, "duplicate match skipped");
                        continue;
                    }
                    let message = self.rule.message.replace("{match}", matched.as_str());
                    out.push(self.finding(message, source));
                }
            }
        }
    }

    /// First sentence the trigger hits, used as the source of a
    /// document-scoped finding.
    fn document_source<'a>(&self, sentences: &[&'a str]) -> Option<&'a str> {
        match &self.matcher {
            Matcher::Keywords { automaton, .. } => sentences
                .iter()
                .find(|sentence| automaton.is_match(**sentence))
                .copied(),
            Matcher::Pattern(regex) => sentences
                .iter()
                .find(|sentence| regex.is_match(**sentence))
                .copied(),
        }
    }

    fn finding(&self, message: String, source: &str) -> Finding {
        Finding {
            category: self.rule.category,
            message,
            severity: self.rule.severity,
            kind: self.rule.kind.clone(),
            source: source.to_string(),
        }
    }
}

impl Analyzer for DefaultAnalyzer {
    #[instrument(name = "analyze_letter", skip(self, input), fields(input_len = input.len()))]
    fn analyze(&self, input: &str) -> RiskReport {
        let sentences = split_sentences(input);
        trace!(sentences = sentences.len(), "segmented input");

        let mut findings = Vec::new();
        let mut seen: Vec<HashSet<String>> = vec![HashSet::new(); self.rules.len()];

        for sentence in &sentences {
            for (idx, compiled) in self.rules.iter().enumerate() {
                if compiled.rule.scope != Scope::Sentence {
                    continue;
                }
                compiled.evaluate(sentence, sentence, &mut seen[idx], &mut findings);
            }
        }

        let document = input.trim();
        for (idx, compiled) in self.rules.iter().enumerate() {
            if compiled.rule.scope != Scope::Document {
                continue;
            }
            let source = compiled.document_source(&sentences).unwrap_or(document);
            compiled.evaluate(document, source, &mut seen[idx], &mut findings);
        }

        let report = RiskReport::from_findings_with_thresholds(findings, &self.thresholds);
        debug!(
            issues = report.issue_count,
            score = report.total_score,
            grade = %report.grade,
            "analysis completed"
        );
        report
    }
}
