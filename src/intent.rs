//! Question classification.
//!
//! Intent detection is a closed decision list: [`TRIGGERS`] is scanned in
//! order against the lowercased question and the first trigger found decides
//! the intent. Triggers are never combined: "cash and liabilities" is a
//! liabilities question because `liabilit` precedes `cash`.

use std::fmt;

use clap::ValueEnum;
use serde::Serialize;

/// A family of statement line items a question can ask about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    Revenue,
    Income,
    Assets,
    Liabilities,
    Cash,
}

impl Topic {
    /// Substring used to find the topic's column.
    pub fn keyword(self) -> &'static str {
        match self {
            Topic::Revenue => "revenue",
            Topic::Income => "income",
            Topic::Assets => "asset",
            Topic::Liabilities => "liabilit",
            Topic::Cash => "cash",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Topic::Revenue => "Revenue",
            Topic::Income => "Income",
            Topic::Assets => "Assets",
            Topic::Liabilities => "Liabilities",
            Topic::Cash => "Cash",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum RatioKind {
    /// Total Liabilities / Total Equity
    DebtToEquity,
    /// Total Current Assets / Total Current Liabilities
    CurrentRatio,
}

impl RatioKind {
    pub fn numerator(self) -> &'static str {
        match self {
            RatioKind::DebtToEquity => "Total Liabilities",
            RatioKind::CurrentRatio => "Total Current Assets",
        }
    }

    pub fn denominator(self) -> &'static str {
        match self {
            RatioKind::DebtToEquity => "Total Equity",
            RatioKind::CurrentRatio => "Total Current Liabilities",
        }
    }

    pub fn required_columns(self) -> [&'static str; 2] {
        [self.numerator(), self.denominator()]
    }

    /// Name of the derived column appended to the table.
    pub fn column_name(self) -> &'static str {
        match self {
            RatioKind::DebtToEquity => "Debt_to_Equity",
            RatioKind::CurrentRatio => "Current_Ratio",
        }
    }
}

impl fmt::Display for RatioKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RatioKind::DebtToEquity => write!(f, "Debt-to-Equity"),
            RatioKind::CurrentRatio => write!(f, "Current Ratio"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryIntent {
    MetricSeries(Topic),
    GrowthSeries(Topic),
    DerivedRatio(RatioKind),
    Unrecognized,
}

/// One rung of the decision list: if `needle` occurs in the lowercased
/// question, `intent` builds the answer's intent from that question.
#[derive(Clone, Copy)]
pub struct Trigger {
    pub needle: &'static str,
    pub intent: fn(&str) -> QueryIntent,
}

impl fmt::Debug for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Trigger").field("needle", &self.needle).finish()
    }
}

pub const GROWTH_MODIFIER: &str = "growth";

fn revenue(question: &str) -> QueryIntent {
    if question.contains(GROWTH_MODIFIER) {
        QueryIntent::GrowthSeries(Topic::Revenue)
    } else {
        QueryIntent::MetricSeries(Topic::Revenue)
    }
}

fn income(_: &str) -> QueryIntent {
    QueryIntent::MetricSeries(Topic::Income)
}

fn assets(_: &str) -> QueryIntent {
    QueryIntent::MetricSeries(Topic::Assets)
}

fn liabilities(_: &str) -> QueryIntent {
    QueryIntent::MetricSeries(Topic::Liabilities)
}

fn cash(_: &str) -> QueryIntent {
    QueryIntent::MetricSeries(Topic::Cash)
}

pub const TRIGGERS: &[Trigger] = &[
    Trigger {
        needle: "revenue",
        intent: revenue,
    },
    Trigger {
        needle: "income",
        intent: income,
    },
    Trigger {
        needle: "asset",
        intent: assets,
    },
    Trigger {
        needle: "liabilit",
        intent: liabilities,
    },
    Trigger {
        needle: "cash",
        intent: cash,
    },
];

pub fn classify(question: &str) -> QueryIntent {
    let lowered = question.to_lowercase();
    TRIGGERS
        .iter()
        .find(|trigger| lowered.contains(trigger.needle))
        .map(|trigger| (trigger.intent)(&lowered))
        .unwrap_or(QueryIntent::Unrecognized)
}
