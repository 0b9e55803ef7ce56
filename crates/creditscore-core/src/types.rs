//! Core types for creditscore

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Attribute names accepted on an applicant record, in form order
pub mod fields {
    pub const AGE: &str = "Age";
    pub const OCCUPATION: &str = "Occupation";
    pub const ANNUAL_INCOME: &str = "Annual_Income";
    pub const NUM_BANK_ACCOUNTS: &str = "Num_Bank_Accounts";
    pub const NUM_CREDIT_CARD: &str = "Num_Credit_Card";
    pub const INTEREST_RATE: &str = "Interest_Rate";
    pub const NUM_OF_LOAN: &str = "Num_of_Loan";
    pub const DELAY_FROM_DUE_DATE: &str = "Delay_from_due_date";
    pub const NUM_OF_DELAYED_PAYMENT: &str = "Num_of_Delayed_Payment";
    pub const CHANGED_CREDIT_LIMIT: &str = "Changed_Credit_Limit";
    pub const NUM_CREDIT_INQUIRIES: &str = "Num_Credit_Inquiries";
    pub const CREDIT_MIX: &str = "Credit_Mix";
    pub const OUTSTANDING_DEBT: &str = "Outstanding_Debt";
    pub const CREDIT_UTILIZATION_RATIO: &str = "Credit_Utilization_Ratio";
    pub const PAYMENT_OF_MIN_AMOUNT: &str = "Payment_of_Min_Amount";
    pub const TOTAL_EMI_PER_MONTH: &str = "Total_EMI_per_month";
    pub const AMOUNT_INVESTED_MONTHLY: &str = "Amount_invested_monthly";
    pub const PAYMENT_BEHAVIOUR: &str = "Payment_Behaviour";
    pub const MONTHLY_BALANCE: &str = "Monthly_Balance";
    pub const CREDIT_HISTORY_AGE_MONTHS: &str = "Credit_History_Age_Months";

    /// Every applicant attribute
    pub const ALL: [&str; 20] = [
        AGE,
        OCCUPATION,
        ANNUAL_INCOME,
        NUM_BANK_ACCOUNTS,
        NUM_CREDIT_CARD,
        INTEREST_RATE,
        NUM_OF_LOAN,
        DELAY_FROM_DUE_DATE,
        NUM_OF_DELAYED_PAYMENT,
        CHANGED_CREDIT_LIMIT,
        NUM_CREDIT_INQUIRIES,
        CREDIT_MIX,
        OUTSTANDING_DEBT,
        CREDIT_UTILIZATION_RATIO,
        PAYMENT_OF_MIN_AMOUNT,
        TOTAL_EMI_PER_MONTH,
        AMOUNT_INVESTED_MONTHLY,
        PAYMENT_BEHAVIOUR,
        MONTHLY_BALANCE,
        CREDIT_HISTORY_AGE_MONTHS,
    ];

    /// Attributes carried as category strings
    pub const CATEGORICAL: [&str; 4] =
        [OCCUPATION, CREDIT_MIX, PAYMENT_OF_MIN_AMOUNT, PAYMENT_BEHAVIOUR];
}

/// A single raw attribute value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Number(f64),
    Category(String),
}

impl AttributeValue {
    /// The numeric value, if this is a number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Category(_) => None,
        }
    }

    /// The category string, if this is a category
    pub fn as_category(&self) -> Option<&str> {
        match self {
            Self::Number(_) => None,
            Self::Category(c) => Some(c),
        }
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<u32> for AttributeValue {
    fn from(value: u32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::Category(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        Self::Category(value)
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Category(c) => f.write_str(c),
        }
    }
}

/// One applicant's raw input, keyed by attribute name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeRecord {
    values: BTreeMap<String, AttributeValue>,
}

impl AttributeRecord {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a value, replacing any previous value for the attribute
    pub fn with(mut self, name: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    /// Add a numeric value
    pub fn with_number(self, name: impl Into<String>, value: f64) -> Self {
        self.with(name, AttributeValue::Number(value))
    }

    /// Add a category value
    pub fn with_category(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.with(name, AttributeValue::Category(value.into()))
    }

    /// Look up an attribute
    pub fn get(&self, name: &str) -> Option<&AttributeValue> {
        self.values.get(name)
    }

    /// Check whether an attribute is present
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Iterate attributes in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of attributes
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the record has no attributes
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for AttributeRecord
where
    K: Into<String>,
    V: Into<AttributeValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// Typed applicant input using the exact training-time attribute names
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicantProfile {
    #[serde(rename = "Age")]
    pub age: u32,
    #[serde(rename = "Occupation")]
    pub occupation: String,
    #[serde(rename = "Annual_Income")]
    pub annual_income: f64,
    #[serde(rename = "Num_Bank_Accounts")]
    pub num_bank_accounts: u32,
    #[serde(rename = "Num_Credit_Card")]
    pub num_credit_card: u32,
    #[serde(rename = "Interest_Rate")]
    pub interest_rate: f64,
    #[serde(rename = "Num_of_Loan")]
    pub num_of_loan: u32,
    #[serde(rename = "Delay_from_due_date")]
    pub delay_from_due_date: u32,
    #[serde(rename = "Num_of_Delayed_Payment")]
    pub num_of_delayed_payment: u32,
    #[serde(rename = "Changed_Credit_Limit")]
    pub changed_credit_limit: f64,
    #[serde(rename = "Num_Credit_Inquiries")]
    pub num_credit_inquiries: u32,
    #[serde(rename = "Credit_Mix")]
    pub credit_mix: String,
    #[serde(rename = "Outstanding_Debt")]
    pub outstanding_debt: f64,
    #[serde(rename = "Credit_Utilization_Ratio")]
    pub credit_utilization_ratio: f64,
    #[serde(rename = "Payment_of_Min_Amount")]
    pub payment_of_min_amount: String,
    #[serde(rename = "Total_EMI_per_month")]
    pub total_emi_per_month: f64,
    #[serde(rename = "Amount_invested_monthly")]
    pub amount_invested_monthly: f64,
    #[serde(rename = "Payment_Behaviour")]
    pub payment_behaviour: String,
    #[serde(rename = "Monthly_Balance")]
    pub monthly_balance: f64,
    #[serde(rename = "Credit_History_Age_Months")]
    pub credit_history_age_months: u32,
}

impl ApplicantProfile {
    /// Flatten into an attribute record
    pub fn to_record(&self) -> AttributeRecord {
        AttributeRecord::new()
            .with(fields::AGE, self.age)
            .with(fields::OCCUPATION, self.occupation.as_str())
            .with(fields::ANNUAL_INCOME, self.annual_income)
            .with(fields::NUM_BANK_ACCOUNTS, self.num_bank_accounts)
            .with(fields::NUM_CREDIT_CARD, self.num_credit_card)
            .with(fields::INTEREST_RATE, self.interest_rate)
            .with(fields::NUM_OF_LOAN, self.num_of_loan)
            .with(fields::DELAY_FROM_DUE_DATE, self.delay_from_due_date)
            .with(fields::NUM_OF_DELAYED_PAYMENT, self.num_of_delayed_payment)
            .with(fields::CHANGED_CREDIT_LIMIT, self.changed_credit_limit)
            .with(fields::NUM_CREDIT_INQUIRIES, self.num_credit_inquiries)
            .with(fields::CREDIT_MIX, self.credit_mix.as_str())
            .with(fields::OUTSTANDING_DEBT, self.outstanding_debt)
            .with(fields::CREDIT_UTILIZATION_RATIO, self.credit_utilization_ratio)
            .with(fields::PAYMENT_OF_MIN_AMOUNT, self.payment_of_min_amount.as_str())
            .with(fields::TOTAL_EMI_PER_MONTH, self.total_emi_per_month)
            .with(fields::AMOUNT_INVESTED_MONTHLY, self.amount_invested_monthly)
            .with(fields::PAYMENT_BEHAVIOUR, self.payment_behaviour.as_str())
            .with(fields::MONTHLY_BALANCE, self.monthly_balance)
            .with(fields::CREDIT_HISTORY_AGE_MONTHS, self.credit_history_age_months)
    }
}

impl From<&ApplicantProfile> for AttributeRecord {
    fn from(profile: &ApplicantProfile) -> Self {
        profile.to_record()
    }
}

/// Human-facing credit category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CreditCategory {
    Poor,
    Good,
    Standard,
}

impl CreditCategory {
    /// All categories
    pub const ALL: [CreditCategory; 3] = [Self::Poor, Self::Good, Self::Standard];

    /// Advisory message shown alongside the category
    pub fn advisory_message(&self) -> &'static str {
        match self {
            Self::Poor => "Poor Loan Status: Do Not Grant Loan Access",
            Self::Good => "Good Loan Status: Grant Loan But Consider the Other Factors with Caution",
            Self::Standard => "Standard Loan Status: Grant Loan",
        }
    }

    /// Lending decision implied by the category
    pub fn decision(&self) -> LoanDecision {
        match self {
            Self::Poor => LoanDecision::Deny,
            Self::Good => LoanDecision::ApproveWithCaution,
            Self::Standard => LoanDecision::Approve,
        }
    }

    /// Category name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Poor => "Poor",
            Self::Good => "Good",
            Self::Standard => "Standard",
        }
    }
}

impl fmt::Display for CreditCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lending decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanDecision {
    Deny,
    ApproveWithCaution,
    Approve,
}

impl LoanDecision {
    /// Whether credit may be granted
    pub fn grants_loan(&self) -> bool {
        !matches!(self, Self::Deny)
    }
}

/// Result of scoring one applicant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionOutcome {
    /// Raw class label produced by the classifier
    pub raw_label: i64,

    /// Category derived from the label
    pub category: CreditCategory,

    /// Advisory message for the category
    pub advisory_message: String,

    /// Lending decision for the category
    pub decision: LoanDecision,

    /// Name of the model that produced the label
    pub model: String,
}

impl PredictionOutcome {
    /// Create an outcome from a label and its category
    pub fn new(raw_label: i64, category: CreditCategory, model: impl Into<String>) -> Self {
        Self {
            raw_label,
            category,
            advisory_message: category.advisory_message().to_string(),
            decision: category.decision(),
            model: model.into(),
        }
    }
}
