use credit_risk_core::{
    breakdown, classify, Contribution, CreditRating, DebtService, FinancialProfile, RiskAssessment,
};
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

pub const FIELD_AGE: &str = "age";
pub const FIELD_INCOME: &str = "income";
pub const FIELD_CREDIT_RATING: &str = "creditRating";
pub const FIELD_DEBT_TO_INCOME: &str = "debtToIncomeRatio";
pub const FIELD_EMPLOYMENT_LENGTH: &str = "employmentLength";
pub const FIELD_NUM_ACCOUNTS: &str = "numAccounts";
pub const FIELD_LATE_PAYMENTS: &str = "latePayments";
pub const FIELD_LOAN_AMOUNT: &str = "loanAmount";
pub const FIELD_INTEREST_RATE: &str = "interestRate";
pub const FIELD_SAVINGS_BALANCE: &str = "savingsBalance";

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("invalid JSON body: {0}")]
    Json(#[from] serde_json::Error),

    #[error("request body must be a JSON object")]
    NotAnObject,

    #[error("field `{field}` must be numeric, got {found}")]
    NotNumeric { field: &'static str, found: String },
}

/// Reads a profile from a JSON body. Absent fields take their defaults;
/// present numeric fields must coerce to a number.
pub fn parse_profile(body: &[u8]) -> Result<FinancialProfile, ProfileError> {
    let value: Value = serde_json::from_slice(body)?;
    profile_from_value(&value)
}

pub fn profile_from_value(value: &Value) -> Result<FinancialProfile, ProfileError> {
    let fields = object_fields(value)?;
    Ok(FinancialProfile {
        age: number_field(fields, FIELD_AGE)?,
        income: number_field(fields, FIELD_INCOME)?,
        credit_rating: rating_field(fields),
        debt_to_income_ratio: number_field(fields, FIELD_DEBT_TO_INCOME)?,
        employment_length: number_field(fields, FIELD_EMPLOYMENT_LENGTH)?,
        num_accounts: number_field(fields, FIELD_NUM_ACCOUNTS)?,
        late_payments: number_field(fields, FIELD_LATE_PAYMENTS)?,
        loan_amount: number_field(fields, FIELD_LOAN_AMOUNT)?,
        interest_rate: number_field(fields, FIELD_INTEREST_RATE)?,
        savings_balance: number_field(fields, FIELD_SAVINGS_BALANCE)?,
    })
}

/// Reads the `income`/`loanAmount` pair used by the affordability helper.
pub fn parse_debt_service(body: &[u8]) -> Result<DebtService, ProfileError> {
    let value: Value = serde_json::from_slice(body)?;
    let fields = object_fields(&value)?;
    Ok(DebtService::estimate(
        number_field(fields, FIELD_INCOME)?,
        number_field(fields, FIELD_LOAN_AMOUNT)?,
    ))
}

fn object_fields(value: &Value) -> Result<&Map<String, Value>, ProfileError> {
    match value {
        Value::Object(fields) => Ok(fields),
        _ => Err(ProfileError::NotAnObject),
    }
}

fn number_field(fields: &Map<String, Value>, field: &'static str) -> Result<f64, ProfileError> {
    let Some(value) = fields.get(field) else {
        return Ok(0.0);
    };
    coerce_number(value).ok_or_else(|| ProfileError::NotNumeric {
        field,
        found: describe_value(value),
    })
}

fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

// Missing means "Average"; a present value outside the table is unlisted.
fn rating_field(fields: &Map<String, Value>) -> Option<CreditRating> {
    match fields.get(FIELD_CREDIT_RATING) {
        None => Some(CreditRating::Average),
        Some(Value::String(raw)) => CreditRating::parse(raw),
        Some(_) => None,
    }
}

fn describe_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Array(_) => "an array".to_string(),
        Value::Object(_) => "an object".to_string(),
        Value::String(s) => {
            let shown = s.chars().take(32).collect::<String>();
            format!("string {shown:?}")
        }
        other => other.to_string(),
    }
}

/// Body of a successful `/api/predict` call.
#[derive(Debug, Clone, Serialize)]
pub struct AssessmentResponse {
    #[serde(flatten)]
    pub assessment: RiskAssessment,
    pub breakdown: Vec<Contribution>,
}

impl AssessmentResponse {
    pub fn for_profile(profile: &FinancialProfile) -> Self {
        let breakdown = breakdown(profile);
        Self {
            assessment: classify(breakdown.score()),
            breakdown: breakdown.contributions,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
