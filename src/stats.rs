// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, TimeZone};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::models::{Expense, Group};

/// Cents, with halves rounded away from zero.
fn round_cents(d: Decimal) -> Decimal {
    d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Figures shown on the group detail page. Never sent to the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpenseStats {
    pub total: Decimal,
    pub count: usize,
    pub average: Decimal,
    pub today: usize,
}

impl ExpenseStats {
    /// "Today" is the calendar day of `now` in `now`'s own time zone.
    pub fn compute<Tz: TimeZone>(expenses: &[Expense], now: &DateTime<Tz>) -> Self {
        let total: Decimal = expenses.iter().map(|e| e.amount).sum();
        let count = expenses.len();
        let average = if count > 0 {
            round_cents(total / Decimal::from(count))
        } else {
            Decimal::ZERO
        };
        let tz = now.timezone();
        let day = now.date_naive();
        let today = expenses
            .iter()
            .filter(|e| e.created_at.with_timezone(&tz).date_naive() == day)
            .count();
        Self {
            total,
            count,
            average,
            today,
        }
    }
}

/// Cross-group summary from the server-computed per-group fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupSummary {
    pub groups: usize,
    pub expenses: u64,
    pub total: Decimal,
}

impl GroupSummary {
    pub fn compute(groups: &[Group]) -> Self {
        Self {
            groups: groups.len(),
            expenses: groups.iter().filter_map(|g| g.expense_count).sum(),
            total: groups.iter().filter_map(|g| g.total_amount).sum(),
        }
    }
}

pub fn fmt_amount(d: Decimal) -> String {
    format!("{:.2}", round_cents(d))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    fn expense(id: i64, amount: &str, created: &str) -> Expense {
        Expense {
            id,
            group_id: 1,
            description: format!("e{id}"),
            amount: amount.parse().unwrap(),
            created_at: created.parse().unwrap(),
            updated_at: None,
            created_by: None,
        }
    }

    #[test]
    fn average_of_none_one_and_two() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();

        let s = ExpenseStats::compute(&[], &now);
        assert_eq!(fmt_amount(s.average), "0.00");
        assert_eq!(fmt_amount(s.total), "0.00");
        assert_eq!(s.count, 0);

        let one = [expense(1, "10.00", "2025-05-01T00:00:00Z")];
        assert_eq!(fmt_amount(ExpenseStats::compute(&one, &now).average), "10.00");

        let two = [
            expense(1, "10.00", "2025-05-01T00:00:00Z"),
            expense(2, "20.00", "2025-05-02T00:00:00Z"),
        ];
        let s = ExpenseStats::compute(&two, &now);
        assert_eq!(fmt_amount(s.total), "30.00");
        assert_eq!(fmt_amount(s.average), "15.00");
        assert_eq!(s.count, 2);
    }

    #[test]
    fn today_uses_the_callers_calendar_day() {
        let items = [
            expense(1, "1", "2025-06-01T08:00:00Z"),
            expense(2, "1", "2025-06-01T23:30:00Z"),
            expense(3, "1", "2025-05-31T23:59:59Z"),
        ];
        let utc_noon = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        assert_eq!(ExpenseStats::compute(&items, &utc_noon).today, 2);

        // UTC+02:00: 23:30Z on the 1st is already the 2nd locally.
        let plus2 = FixedOffset::east_opt(2 * 3600).unwrap();
        let local_noon = plus2.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        assert_eq!(ExpenseStats::compute(&items, &local_noon).today, 2);
        let next_day = plus2.with_ymd_and_hms(2025, 6, 2, 9, 0, 0).unwrap();
        assert_eq!(ExpenseStats::compute(&items, &next_day).today, 1);
    }

    #[test]
    fn average_rounds_to_cents() {
        let now = Utc::now();
        let items = [
            expense(1, "10", "2025-01-01T00:00:00Z"),
            expense(2, "10", "2025-01-01T00:00:00Z"),
            expense(3, "10.01", "2025-01-01T00:00:00Z"),
        ];
        assert_eq!(fmt_amount(ExpenseStats::compute(&items, &now).average), "10.00");
    }

    #[test]
    fn half_cents_round_up() {
        let now = Utc::now();
        let items = [
            expense(1, "0.10", "2025-01-01T00:00:00Z"),
            expense(2, "0.15", "2025-01-01T00:00:00Z"),
        ];
        assert_eq!(fmt_amount(ExpenseStats::compute(&items, &now).average), "0.13");
        assert_eq!(fmt_amount("2.345".parse().unwrap()), "2.35");
        assert_eq!(fmt_amount("-2.345".parse().unwrap()), "-2.35");
    }
}
