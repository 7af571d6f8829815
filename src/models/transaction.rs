//! Transaction model
//!
//! A transaction is an immutable record of one income or expense event. It
//! has no setters: editing means building a new value that carries the same
//! id and swapping it in.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::TransactionId;
use super::money::Money;

/// Date format used for input and storage
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    /// Money coming in
    Income,
    /// Money going out
    Expense,
}

impl TransactionType {
    /// Canonical name, as persisted
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "INCOME",
            Self::Expense => "EXPENSE",
        }
    }

    /// Strict lookup by canonical name (case-insensitive), as read from storage
    pub fn from_name(name: &str) -> Option<Self> {
        [Self::Income, Self::Expense]
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(name.trim()))
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = TransactionValidationError;

    /// Accepts the canonical names in any case, plus the short forms used at
    /// the console: `1`/`in` for income and `2`/`out` for expense.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "INCOME" | "IN" | "1" => Ok(Self::Income),
            "EXPENSE" | "OUT" | "2" => Ok(Self::Expense),
            _ => Err(TransactionValidationError::UnknownType(s.to_string())),
        }
    }
}

/// A financial transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    id: TransactionId,
    date: NaiveDate,
    description: String,
    amount: Money,
    #[serde(rename = "type")]
    kind: TransactionType,
    category: String,
}

impl Transaction {
    /// Create a brand new transaction with a freshly generated id
    pub fn new(
        date: NaiveDate,
        description: impl Into<String>,
        amount: Money,
        kind: TransactionType,
        category: impl Into<String>,
    ) -> Self {
        Self::with_id(TransactionId::new(), date, description, amount, kind, category)
    }

    /// Rebuild a transaction with a known id (from storage, or as the
    /// replacement value of an edit). A blank id gets a generated one.
    pub fn with_id(
        id: impl Into<TransactionId>,
        date: NaiveDate,
        description: impl Into<String>,
        amount: Money,
        kind: TransactionType,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            date,
            description: description.into(),
            amount,
            kind,
            category: category.into(),
        }
    }

    /// Build a transaction from validated input
    pub fn from_input(input: TransactionInput) -> Self {
        Self::new(
            input.date,
            input.description,
            input.amount,
            input.kind,
            input.category,
        )
    }

    /// Build the replacement value for `id` from validated input
    pub fn replacement(id: TransactionId, input: TransactionInput) -> Self {
        Self::with_id(
            id,
            input.date,
            input.description,
            input.amount,
            input.kind,
            input.category,
        )
    }

    pub fn id(&self) -> &TransactionId {
        &self.id
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn kind(&self) -> TransactionType {
        self.kind
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    /// The fields of this transaction, as input for an edit
    pub fn to_input(&self) -> TransactionInput {
        TransactionInput {
            date: self.date,
            description: self.description.clone(),
            amount: self.amount,
            kind: self.kind,
            category: self.category.clone(),
        }
    }

    /// Check the boundary rules against a stored value
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        validate_fields(&self.description, self.amount, &self.category)
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.date.format(DATE_FORMAT),
            self.description,
            self.kind,
            self.amount
        )
    }
}

/// The complete set of user-supplied fields of a transaction
///
/// Updates always carry every field. Front ends that let the user keep the
/// current value of a field resolve that with [`TransactionPatch`] first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionInput {
    pub date: NaiveDate,
    pub description: String,
    pub amount: Money,
    pub kind: TransactionType,
    pub category: String,
}

impl TransactionInput {
    /// Parse raw text fields into an input, reporting the first bad field
    pub fn parse(
        date: &str,
        description: &str,
        amount: &str,
        kind: &str,
        category: &str,
    ) -> Result<Self, TransactionValidationError> {
        let input = Self {
            date: parse_date(date)?,
            description: description.trim().to_string(),
            amount: Money::parse(amount)
                .map_err(|_| TransactionValidationError::InvalidAmount(amount.to_string()))?,
            kind: kind.parse()?,
            category: category.trim().to_string(),
        };
        input.validate()?;
        Ok(input)
    }

    /// Validate the input
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        validate_fields(&self.description, self.amount, &self.category)
    }
}

/// A partial edit: `None` keeps the current value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionPatch {
    pub date: Option<NaiveDate>,
    pub description: Option<String>,
    pub amount: Option<Money>,
    pub kind: Option<TransactionType>,
    pub category: Option<String>,
}

impl TransactionPatch {
    /// Check if the patch changes nothing
    pub fn is_empty(&self) -> bool {
        self.date.is_none()
            && self.description.is_none()
            && self.amount.is_none()
            && self.kind.is_none()
            && self.category.is_none()
    }

    /// Resolve the patch against the current value into a full input
    pub fn apply_to(self, current: &Transaction) -> TransactionInput {
        let mut input = current.to_input();
        if let Some(date) = self.date {
            input.date = date;
        }
        if let Some(description) = self.description {
            input.description = description.trim().to_string();
        }
        if let Some(amount) = self.amount {
            input.amount = amount;
        }
        if let Some(kind) = self.kind {
            input.kind = kind;
        }
        if let Some(category) = self.category {
            input.category = category.trim().to_string();
        }
        input
    }
}

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(s: &str) -> Result<NaiveDate, TransactionValidationError> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map_err(|_| TransactionValidationError::InvalidDate(s.to_string()))
}

fn validate_fields(
    description: &str,
    amount: Money,
    category: &str,
) -> Result<(), TransactionValidationError> {
    if description.trim().is_empty() {
        return Err(TransactionValidationError::EmptyField("description"));
    }
    if category.trim().is_empty() {
        return Err(TransactionValidationError::EmptyField("category"));
    }
    if amount.is_negative() {
        return Err(TransactionValidationError::NegativeAmount(amount));
    }
    if amount.exceeds_limit() {
        return Err(TransactionValidationError::AmountTooLarge(amount));
    }
    Ok(())
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    EmptyField(&'static str),
    NegativeAmount(Money),
    AmountTooLarge(Money),
    InvalidAmount(String),
    InvalidDate(String),
    UnknownType(String),
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyField(field) => write!(f, "The {} cannot be empty", field),
            Self::NegativeAmount(amount) => {
                write!(f, "Amount cannot be negative: {}", amount.to_plain_string())
            }
            Self::AmountTooLarge(amount) => {
                write!(f, "Amount is too large: {}", amount.to_plain_string())
            }
            Self::InvalidAmount(s) => {
                write!(f, "Invalid amount '{}'. Use a number like 50.75", s)
            }
            Self::InvalidDate(s) => write!(f, "Invalid date '{}'. Use YYYY-MM-DD", s),
            Self::UnknownType(s) => {
                write!(f, "Unknown transaction type '{}'. Use INCOME or EXPENSE", s)
            }
        }
    }
}

impl std::error::Error for TransactionValidationError {}

impl From<TransactionValidationError> for crate::error::TallyError {
    fn from(err: TransactionValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}
