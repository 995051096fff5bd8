use once_cell::sync::Lazy;

use super::{Category, Guard, Rule, Scope, Severity, Trigger};

/// Numeric quantity followed by a day/week/month unit, e.g. "14 days".
/// Shared guard for the notice-period and payment-deadline rules.
pub const DURATION_PATTERN: &str = r"(?i)\d+\s*(day|week|month)";

static RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    vec![
        keyword_rule(
            "TERM_NO_CLAUSE",
            Category::Termination,
            Severity::Major,
            "missing legal grounding",
            "Termination mentioned without reference to a clause or section; the notice may be invalid.",
            Scope::Sentence,
            &["terminate", "termination"],
            Some(Guard::Keywords(words(&["clause", "section", "pursuant"]))),
        ),
        keyword_rule(
            "TERM_IMMEDIATE",
            Category::Termination,
            Severity::Critical,
            "no notice period",
            "Immediate termination without a notice period may breach the contract.",
            Scope::Sentence,
            &["immediate"],
            Some(Guard::Pattern(DURATION_PATTERN.into())),
        ),
        keyword_rule(
            "PAY_NO_DEADLINE",
            Category::PaymentDemand,
            Severity::Major,
            "no deadline",
            "No clear payment deadline (e.g. 'within 14 days') specified.",
            Scope::Sentence,
            &["pay", "repay", "settle", "outstanding"],
            Some(Guard::Pattern(DURATION_PATTERN.into())),
        ),
        keyword_rule(
            "DEFAME_TERMS",
            Category::DefamationRisk,
            Severity::Critical,
            "defamatory language",
            "Potentially defamatory language detected; consider rephrasing.",
            Scope::Sentence,
            &["dishonest", "fraud", "bad faith", "cheat", "scam"],
            None,
        ),
        pattern_rule(
            "PRIV_EMAIL",
            Category::Privacy,
            Severity::Major,
            "email exposure",
            "Email address detected ({match}); redact or anonymise if needed.",
            r"\b\S+@\S+\.\S+\b",
        ),
        pattern_rule(
            "PRIV_NRIC",
            Category::Privacy,
            Severity::Critical,
            "national id exposure",
            "NRIC detected ({match}); possible PDPA breach.",
            r"(?i)\b[STFGM]\d{7}[A-Z]\b",
        ),
        pattern_rule(
            "PRIV_PHONE",
            Category::Privacy,
            Severity::Minor,
            "phone number exposure",
            "Phone number detected ({match}); consider redaction.",
            r"\+?\d{8,}",
        ),
        keyword_rule(
            "SCOPE_OVERBROAD",
            Category::ContractScope,
            Severity::Major,
            "overbroad clause",
            "Overbroad confidentiality language detected; may be unenforceable.",
            Scope::Sentence,
            &["forever", "under any circumstances", "at all times"],
            None,
        ),
        keyword_rule(
            "DISC_NOT_LEGAL_ADVICE",
            Category::Disclaimer,
            Severity::Minor,
            "missing disclaimer",
            "Disclaimer wording lacks the phrase 'legal advice'; the letter could be construed as legal advice.",
            Scope::Document,
            &["disclaimer", "advice"],
            Some(Guard::Keywords(words(&["legal advice"]))),
        ),
        keyword_rule(
            "CLARITY_VAGUE",
            Category::Clarity,
            Severity::Major,
            "vague obligation",
            "Vague obligation language detected; may create disputes.",
            Scope::Sentence,
            &[
                "appropriate arrangements",
                "reasonable time",
                "as soon as possible",
            ],
            None,
        ),
    ]
});

/// The fixed built-in rule table, in evaluation order.
pub fn builtin() -> &'static [Rule] {
    &RULES
}

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|word| word.to_string()).collect()
}

#[allow(clippy::too_many_arguments)]
fn keyword_rule(
    id: &str,
    category: Category,
    severity: Severity,
    kind: &str,
    message: &str,
    scope: Scope,
    any: &[&str],
    unless: Option<Guard>,
) -> Rule {
    Rule {
        id: id.into(),
        category,
        severity,
        kind: kind.into(),
        message: message.into(),
        scope,
        trigger: Trigger::Keywords {
            any: words(any),
            unless,
        },
    }
}

fn pattern_rule(
    id: &str,
    category: Category,
    severity: Severity,
    kind: &str,
    message: &str,
    regex: &str,
) -> Rule {
    Rule {
        id: id.into(),
        category,
        severity,
        kind: kind.into(),
        message: message.into(),
        scope: Scope::Sentence,
        trigger: Trigger::Pattern {
            regex: regex.into(),
        },
    }
}
