// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

pub type GroupId = i64;
pub type ExpenseId = i64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_by: Option<String>,
    // Server-computed, only present on list responses
    #[serde(default)]
    pub total_amount: Option<Decimal>,
    #[serde(default)]
    pub expense_count: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,
    pub group_id: GroupId,
    pub description: String,
    pub amount: Decimal,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_by: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GroupList {
    #[serde(default)]
    pub groups: Vec<Group>,
    #[serde(default)]
    pub count: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExpenseList {
    #[serde(default)]
    pub expenses: Vec<Expense>,
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub total_amount: Option<Decimal>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Deleted {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Health {
    pub status: String,
    #[serde(default)]
    pub service: Option<String>,
}

/// Body of `POST /api/groups`. Only constructible from validated input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewGroup {
    name: String,
    description: Option<String>,
}

impl NewGroup {
    /// Trims both fields; a blank description is sent as `null`.
    pub fn from_input(name: &str, description: &str) -> Result<Self, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::GroupNameRequired);
        }
        let description = description.trim();
        Ok(Self {
            name: name.to_string(),
            description: (!description.is_empty()).then(|| description.to_string()),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// Body of `POST /api/expenses/{groupId}`. The amount goes out as a JSON number.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewExpense {
    description: String,
    #[serde(with = "rust_decimal::serde::float")]
    amount: Decimal,
}

impl NewExpense {
    pub fn from_input(description: &str, amount: &str) -> Result<Self, ValidationError> {
        let description = description.trim();
        if description.is_empty() {
            return Err(ValidationError::ExpenseDescriptionRequired);
        }
        let amount = amount.trim();
        // Decimal's parser accepts digit separators; plain numbers only here.
        if amount.contains('_') {
            return Err(ValidationError::InvalidAmount);
        }
        let amount = amount
            .parse::<Decimal>()
            .map_err(|_| ValidationError::InvalidAmount)?;
        if amount <= Decimal::ZERO {
            return Err(ValidationError::InvalidAmount);
        }
        Ok(Self {
            description: description.to_string(),
            amount,
        })
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_group_trims_and_nulls_blank_description() {
        let g = NewGroup::from_input(" Trip ", "   ").unwrap();
        assert_eq!(g.name(), "Trip");
        assert_eq!(g.description(), None);
        let body = serde_json::to_value(&g).unwrap();
        assert_eq!(body, serde_json::json!({"name": "Trip", "description": null}));

        let g = NewGroup::from_input("Flat", "  rent and bills ").unwrap();
        assert_eq!(g.description(), Some("rent and bills"));
    }

    #[test]
    fn new_group_rejects_blank_name() {
        assert_eq!(
            NewGroup::from_input("  \t", "desc"),
            Err(ValidationError::GroupNameRequired)
        );
    }

    #[test]
    fn new_expense_rules() {
        assert_eq!(
            NewExpense::from_input("   ", "10"),
            Err(ValidationError::ExpenseDescriptionRequired)
        );
        for bad in ["", "0", "-3", "abc", "0.00", "1,5", "1_000", "_5"] {
            assert_eq!(
                NewExpense::from_input("Taxi", bad),
                Err(ValidationError::InvalidAmount),
                "amount {bad:?} should be rejected"
            );
        }
        let e = NewExpense::from_input(" Taxi ", " 12.50 ").unwrap();
        assert_eq!(e.description(), "Taxi");
        assert_eq!(e.amount(), Decimal::new(1250, 2));
    }

    #[test]
    fn new_expense_amount_is_a_json_number() {
        let e = NewExpense::from_input("Taxi", "12.5").unwrap();
        let body = serde_json::to_value(&e).unwrap();
        assert_eq!(body["amount"], serde_json::json!(12.5));
        assert_eq!(body["description"], "Taxi");
    }

    #[test]
    fn group_list_accepts_server_payload() {
        let raw = r#"{
            "groups": [{
                "id": 7, "name": "Trip", "description": null,
                "created_at": "2025-03-01T10:00:00.123456+00:00",
                "updated_at": "2025-03-01T10:00:00+00:00",
                "created_by": "u-1", "expense_count": 2, "total_amount": 30.5
            }],
            "count": 1
        }"#;
        let list: GroupList = serde_json::from_str(raw).unwrap();
        assert_eq!(list.groups.len(), 1);
        assert_eq!(list.groups[0].total_amount, Some(Decimal::new(305, 1)));
        assert_eq!(list.groups[0].expense_count, Some(2));

        let empty: GroupList = serde_json::from_str("{}").unwrap();
        assert!(empty.groups.is_empty());
    }
}
