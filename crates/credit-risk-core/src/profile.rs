/// Weight applied when the submitted rating is missing from the table.
pub const UNLISTED_RATING_WEIGHT: u8 = 15;

/// Bureau-style credit rating supplied by the applicant.
///
/// Distinct from [`crate::RiskBand`], which is the rating the scorer hands
/// back. The two share labels but not meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CreditRating {
    Excellent,
    Good,
    Average,
    Fair,
    Poor,
    NoHistory,
}

impl CreditRating {
    pub const ALL: [Self; 6] = [
        Self::Excellent,
        Self::Good,
        Self::Average,
        Self::Fair,
        Self::Poor,
        Self::NoHistory,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Average => "Average",
            Self::Fair => "Fair",
            Self::Poor => "Poor",
            Self::NoHistory => "No History",
        }
    }

    /// CIBIL score range the rating stands for; first-time borrowers have none.
    pub fn cibil_range(self) -> Option<&'static str> {
        match self {
            Self::Excellent => Some("750-900"),
            Self::Good => Some("700-749"),
            Self::Average => Some("650-699"),
            Self::Fair => Some("600-649"),
            Self::Poor => Some("Below 600"),
            Self::NoHistory => None,
        }
    }

    pub fn display_label(self) -> String {
        match self.cibil_range() {
            Some(range) => format!("{} ({range})", self.name()),
            None => self.name().to_string(),
        }
    }

    pub fn weight(self) -> u8 {
        match self {
            Self::Excellent => 0,
            Self::Good => 5,
            Self::Average => 15,
            Self::Fair => 25,
            Self::Poor => 40,
            Self::NoHistory => 30,
        }
    }

    /// Exact, case-sensitive match on the canonical name. Anything else,
    /// including the form label ("Good (700-749)"), is unlisted.
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|rating| rating.name() == raw)
    }
}

/// Applicant inputs for one assessment. Missing wire fields arrive as zero
/// and the rating as `Average`; `credit_rating: None` marks a value that was
/// supplied but is not in the table.
#[derive(Debug, Clone, PartialEq)]
pub struct FinancialProfile {
    pub age: f64,
    pub income: f64,
    pub credit_rating: Option<CreditRating>,
    pub debt_to_income_ratio: f64,
    pub employment_length: f64,
    pub num_accounts: f64,
    pub late_payments: f64,
    pub loan_amount: f64,
    pub interest_rate: f64,
    pub savings_balance: f64,
}

impl Default for FinancialProfile {
    fn default() -> Self {
        Self {
            age: 0.0,
            income: 0.0,
            credit_rating: Some(CreditRating::Average),
            debt_to_income_ratio: 0.0,
            employment_length: 0.0,
            num_accounts: 0.0,
            late_payments: 0.0,
            loan_amount: 0.0,
            interest_rate: 0.0,
            savings_balance: 0.0,
        }
    }
}

impl FinancialProfile {
    pub fn rating_weight(&self) -> u8 {
        self.credit_rating
            .map_or(UNLISTED_RATING_WEIGHT, CreditRating::weight)
    }

    /// Months of income held in savings. Zero when there is no income.
    pub fn months_of_savings(&self) -> f64 {
        if self.income > 0.0 {
            self.savings_balance / (self.income / 12.0)
        } else {
            0.0
        }
    }

    /// Loan principal as a percentage of annual income. Zero when there is
    /// no income.
    pub fn loan_to_income_pct(&self) -> f64 {
        if self.income > 0.0 {
            self.loan_amount / self.income * 100.0
        } else {
            0.0
        }
    }
}
