use serde::Serialize;

use crate::factors::{Factor, FACTORS, MAX_SCORE};

pub const METHODOLOGY: &str =
    "Mathematical formula based on RBI guidelines and Indian banking standards";

/// Human-readable form of the scoring table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Formula {
    pub formula: Vec<String>,
    pub total: String,
    pub methodology: &'static str,
}

pub fn formula() -> Formula {
    Formula {
        formula: FACTORS.into_iter().map(Factor::formula_line).collect(),
        total: format!("Risk Score out of {MAX_SCORE}"),
        methodology: METHODOLOGY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_line_per_factor() {
        let out = formula();
        assert_eq!(out.formula.len(), FACTORS.len());
        assert!(out.formula[1].starts_with("Income: up to 25 points"));
        assert!(out.formula[9].contains("8 if >15"));
        assert_eq!(out.total, "Risk Score out of 100");
    }
}
