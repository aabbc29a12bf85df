use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// Recurrence of a budget or transaction, using the backend's spelling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Frequency {
    Daily,
    Weekly,
    #[serde(rename = "Bi-Weekly")]
    BiWeekly,
    #[serde(rename = "Four-Weekly")]
    FourWeekly,
    Monthly,
    Annually,
}

impl Frequency {
    pub const ALL: [Self; 6] = [
        Self::Daily,
        Self::Weekly,
        Self::BiWeekly,
        Self::FourWeekly,
        Self::Monthly,
        Self::Annually,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "Daily",
            Self::Weekly => "Weekly",
            Self::BiWeekly => "Bi-Weekly",
            Self::FourWeekly => "Four-Weekly",
            Self::Monthly => "Monthly",
            Self::Annually => "Annually",
        }
    }

    /// Parses user input case-insensitively (`monthly`, `Bi-Weekly`, ...).
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|frequency| frequency.as_str().eq_ignore_ascii_case(value))
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A budget as listed by `/api/budgets/load`. Amounts are in pounds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BudgetItem {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    pub category: String,
    pub frequency: Frequency,
    pub amount: f64,
    #[serde(default)]
    pub spent: f64,
    #[serde(default)]
    pub remaining: f64,
}

/// Budget fields as entered in the add form.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewBudget {
    pub category: String,
    pub frequency: Frequency,
    pub amount: f64,
    pub spent: f64,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BudgetError {
    #[error("Category is required")]
    MissingCategory,
    #[error("Amount must be a non-negative number")]
    InvalidAmount,
    #[error("Spent must be a non-negative number")]
    InvalidSpent,
}

impl NewBudget {
    /// Checks the client-side rules: a category and non-negative, finite amounts.
    ///
    /// # Errors
    /// Returns the first rule the form breaks.
    pub fn validate(&self) -> Result<(), BudgetError> {
        if self.category.trim().is_empty() {
            return Err(BudgetError::MissingCategory);
        }
        if !is_non_negative(self.amount) {
            return Err(BudgetError::InvalidAmount);
        }
        if !is_non_negative(self.spent) {
            return Err(BudgetError::InvalidSpent);
        }
        Ok(())
    }

    /// Builds the local list entry for this form, before the backend assigns a user.
    #[must_use]
    pub fn into_item(self, id: String) -> BudgetItem {
        BudgetItem {
            id,
            user_id: None,
            remaining: self.amount - self.spent,
            category: self.category.trim().to_string(),
            frequency: self.frequency,
            amount: self.amount,
            spent: self.spent,
        }
    }
}

fn is_non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}
