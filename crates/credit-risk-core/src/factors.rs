use serde::Serialize;

use crate::ladder::{Ladder, Rung, Threshold};
use crate::profile::{CreditRating, FinancialProfile, UNLISTED_RATING_WEIGHT};

pub const MAX_SCORE: u8 = 100;

static AGE: Ladder = Ladder::new(
    &[
        Rung {
            when: Threshold::Outside(25.0, 60.0),
            points: 10,
        },
        Rung {
            when: Threshold::Outside(30.0, 55.0),
            points: 5,
        },
    ],
    0,
);

static INCOME: Ladder = Ladder::new(
    &[
        Rung {
            when: Threshold::Below(150_000.0),
            points: 25,
        },
        Rung {
            when: Threshold::Below(300_000.0),
            points: 15,
        },
        Rung {
            when: Threshold::Below(500_000.0),
            points: 8,
        },
        Rung {
            when: Threshold::Below(1_000_000.0),
            points: 3,
        },
    ],
    0,
);

static DEBT_TO_INCOME: Ladder = Ladder::new(
    &[
        Rung {
            when: Threshold::Above(0.70),
            points: 25,
        },
        Rung {
            when: Threshold::Above(0.50),
            points: 20,
        },
        Rung {
            when: Threshold::Above(0.35),
            points: 10,
        },
        Rung {
            when: Threshold::Above(0.20),
            points: 3,
        },
    ],
    0,
);

static EMPLOYMENT: Ladder = Ladder::new(
    &[
        Rung {
            when: Threshold::Below(1.0),
            points: 15,
        },
        Rung {
            when: Threshold::Below(2.0),
            points: 10,
        },
        Rung {
            when: Threshold::Below(5.0),
            points: 5,
        },
    ],
    0,
);

static LATE_PAYMENTS: Ladder = Ladder::new(
    &[
        Rung {
            when: Threshold::Equal(0.0),
            points: 0,
        },
        Rung {
            when: Threshold::AtMost(2.0),
            points: 10,
        },
        Rung {
            when: Threshold::AtMost(5.0),
            points: 20,
        },
    ],
    35,
);

static ACTIVE_ACCOUNTS: Ladder = Ladder::new(
    &[
        Rung {
            when: Threshold::Above(10.0),
            points: 12,
        },
        Rung {
            when: Threshold::Above(7.0),
            points: 8,
        },
        Rung {
            when: Threshold::Above(4.0),
            points: 3,
        },
    ],
    0,
);

static SAVINGS_BUFFER: Ladder = Ladder::new(
    &[
        Rung {
            when: Threshold::Below(1.0),
            points: 10,
        },
        Rung {
            when: Threshold::Below(3.0),
            points: 5,
        },
        Rung {
            when: Threshold::Below(6.0),
            points: 2,
        },
    ],
    0,
);

static LOAN_TO_INCOME: Ladder = Ladder::new(
    &[
        Rung {
            when: Threshold::Above(500.0),
            points: 20,
        },
        Rung {
            when: Threshold::Above(350.0),
            points: 15,
        },
        Rung {
            when: Threshold::Above(200.0),
            points: 8,
        },
        Rung {
            when: Threshold::Above(100.0),
            points: 3,
        },
    ],
    0,
);

static INTEREST_RATE: Ladder = Ladder::new(
    &[
        Rung {
            when: Threshold::Above(15.0),
            points: 8,
        },
        Rung {
            when: Threshold::Above(12.0),
            points: 4,
        },
        Rung {
            when: Threshold::Above(9.0),
            points: 1,
        },
    ],
    0,
);

/// How a factor turns its input into points.
#[derive(Debug, Clone, Copy)]
pub enum Rule {
    Ladder(&'static Ladder),
    RatingLookup,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Factor {
    Age,
    Income,
    CreditRating,
    DebtToIncome,
    Employment,
    LatePayments,
    ActiveAccounts,
    SavingsBuffer,
    LoanToIncome,
    InterestRate,
}

/// Every factor in evaluation order. Both the scorer and the published
/// formula walk this table.
pub const FACTORS: [Factor; 10] = [
    Factor::Age,
    Factor::Income,
    Factor::CreditRating,
    Factor::DebtToIncome,
    Factor::Employment,
    Factor::LatePayments,
    Factor::ActiveAccounts,
    Factor::SavingsBuffer,
    Factor::LoanToIncome,
    Factor::InterestRate,
];

impl Factor {
    pub fn label(self) -> &'static str {
        match self {
            Self::Age => "Age Factor",
            Self::Income => "Income",
            Self::CreditRating => "Credit Rating",
            Self::DebtToIncome => "Debt-to-Income",
            Self::Employment => "Employment",
            Self::LatePayments => "Payment History",
            Self::ActiveAccounts => "Active Accounts",
            Self::SavingsBuffer => "Savings Buffer",
            Self::LoanToIncome => "Loan-to-Value",
            Self::InterestRate => "Interest Rate",
        }
    }

    /// What the ladder is measured on, for the published formula.
    pub fn measure_unit(self) -> &'static str {
        match self {
            Self::Age => "age in years",
            Self::Income => "annual income",
            Self::CreditRating => "CIBIL rating",
            Self::DebtToIncome => "debt-to-income ratio",
            Self::Employment => "years at current employer",
            Self::LatePayments => "late payment count",
            Self::ActiveAccounts => "active credit accounts",
            Self::SavingsBuffer => "months of income in savings",
            Self::LoanToIncome => "loan as % of annual income",
            Self::InterestRate => "interest rate %",
        }
    }

    pub fn rule(self) -> Rule {
        match self {
            Self::Age => Rule::Ladder(&AGE),
            Self::Income => Rule::Ladder(&INCOME),
            Self::CreditRating => Rule::RatingLookup,
            Self::DebtToIncome => Rule::Ladder(&DEBT_TO_INCOME),
            Self::Employment => Rule::Ladder(&EMPLOYMENT),
            Self::LatePayments => Rule::Ladder(&LATE_PAYMENTS),
            Self::ActiveAccounts => Rule::Ladder(&ACTIVE_ACCOUNTS),
            Self::SavingsBuffer => Rule::Ladder(&SAVINGS_BUFFER),
            Self::LoanToIncome => Rule::Ladder(&LOAN_TO_INCOME),
            Self::InterestRate => Rule::Ladder(&INTEREST_RATE),
        }
    }

    /// Raw value the factor's ladder is evaluated on. The rating lookup has
    /// no numeric measure.
    pub fn measure(self, profile: &FinancialProfile) -> Option<f64> {
        match self {
            Self::Age => Some(profile.age),
            Self::Income => Some(profile.income),
            Self::CreditRating => None,
            Self::DebtToIncome => Some(profile.debt_to_income_ratio),
            Self::Employment => Some(profile.employment_length),
            Self::LatePayments => Some(profile.late_payments),
            Self::ActiveAccounts => Some(profile.num_accounts),
            Self::SavingsBuffer => Some(profile.months_of_savings()),
            Self::LoanToIncome => Some(profile.loan_to_income_pct()),
            Self::InterestRate => Some(profile.interest_rate),
        }
    }

    pub fn points(self, profile: &FinancialProfile) -> u8 {
        match (self.rule(), self.measure(profile)) {
            (Rule::Ladder(ladder), Some(value)) => ladder.points(value),
            (Rule::Ladder(_), None) => 0,
            (Rule::RatingLookup, _) => profile.rating_weight(),
        }
    }

    pub fn max_points(self) -> u8 {
        match self.rule() {
            Rule::Ladder(ladder) => ladder.max_points(),
            Rule::RatingLookup => CreditRating::ALL
                .into_iter()
                .map(CreditRating::weight)
                .fold(UNLISTED_RATING_WEIGHT, u8::max),
        }
    }

    /// One human-readable line of the published formula.
    pub fn formula_line(self) -> String {
        let detail = match self.rule() {
            Rule::Ladder(ladder) => ladder.describe(),
            Rule::RatingLookup => {
                let mut parts = CreditRating::ALL
                    .into_iter()
                    .map(|rating| format!("{} {}", rating.display_label(), rating.weight()))
                    .collect::<Vec<_>>();
                parts.push(format!("unlisted {UNLISTED_RATING_WEIGHT}"));
                parts.join("; ")
            }
        };
        format!(
            "{}: up to {} points by {} ({detail})",
            self.label(),
            self.max_points(),
            self.measure_unit()
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Contribution {
    pub factor: Factor,
    pub label: &'static str,
    pub points: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreBreakdown {
    pub contributions: Vec<Contribution>,
}

impl ScoreBreakdown {
    pub fn raw_total(&self) -> u32 {
        self.contributions
            .iter()
            .map(|c| u32::from(c.points))
            .sum()
    }

    pub fn score(&self) -> u8 {
        u8::try_from(self.raw_total().min(u32::from(MAX_SCORE))).unwrap_or(MAX_SCORE)
    }

    pub fn points_for(&self, factor: Factor) -> Option<u8> {
        self.contributions
            .iter()
            .find(|c| c.factor == factor)
            .map(|c| c.points)
    }
}

pub fn breakdown(profile: &FinancialProfile) -> ScoreBreakdown {
    let contributions = FACTORS
        .into_iter()
        .map(|factor| Contribution {
            factor,
            label: factor.label(),
            points: factor.points(profile),
        })
        .collect();
    ScoreBreakdown { contributions }
}

/// Risk score in `0..=100`; higher means riskier.
pub fn score(profile: &FinancialProfile) -> u8 {
    breakdown(profile).score()
}
