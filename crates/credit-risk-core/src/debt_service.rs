use serde::Serialize;

use crate::profile::FinancialProfile;

/// Monthly affordability figures shown next to the assessment form.
///
/// The loan is spread evenly over twelve months; no amortization or interest
/// is applied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DebtService {
    pub monthly_income: f64,
    pub monthly_loan_payment: f64,
    pub debt_to_income: f64,
}

impl DebtService {
    pub fn estimate(income: f64, loan_amount: f64) -> Self {
        let monthly_income = income / 12.0;
        let monthly_loan_payment = loan_amount / 12.0;
        let debt_to_income = if monthly_income > 0.0 {
            monthly_loan_payment / monthly_income
        } else {
            0.0
        };
        Self {
            monthly_income,
            monthly_loan_payment,
            debt_to_income,
        }
    }

    pub fn from_profile(profile: &FinancialProfile) -> Self {
        Self::estimate(profile.income, profile.loan_amount)
    }
}
