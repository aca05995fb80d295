// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, Local, TimeZone};

use super::failure;
use crate::context::AppContext;
use crate::models::{Expense, ExpenseId, Group, GroupId, NewExpense};
use crate::router::Route;
use crate::stats::ExpenseStats;
use crate::store::{Banner, RecordStore};

#[derive(Debug, Clone, Default)]
pub struct ExpenseForm {
    pub description: String,
    pub amount: String,
}

pub enum DetailMount {
    Ready(GroupDetailPage),
    /// The group could not be resolved.
    Redirect(Route),
}

/// One group with its expenses.
pub struct GroupDetailPage {
    ctx: AppContext,
    group: Group,
    expenses: RecordStore<Expense>,
    banner: Banner,
    form: ExpenseForm,
}

impl GroupDetailPage {
    /// `raw_id` is the path segment; anything that does not name one of the
    /// user's groups sends the user back to the dashboard.
    pub fn mount(ctx: AppContext, raw_id: &str) -> DetailMount {
        let Ok(id) = raw_id.trim().parse::<GroupId>() else {
            tracing::warn!(raw_id, "group id is not numeric");
            return DetailMount::Redirect(Route::Dashboard);
        };
        let group = match ctx.api.list_groups() {
            Ok(groups) => groups.into_iter().find(|g| g.id == id),
            Err(e) => {
                tracing::error!(error = %e, "error fetching group");
                None
            }
        };
        let Some(group) = group else {
            tracing::warn!(group_id = id, "group not found");
            return DetailMount::Redirect(Route::Dashboard);
        };
        let mut page = Self {
            ctx,
            group,
            expenses: RecordStore::new(),
            banner: Banner::default(),
            form: ExpenseForm::default(),
        };
        page.fetch_expenses();
        DetailMount::Ready(page)
    }

    pub fn fetch_expenses(&mut self) {
        tracing::info!(group_id = self.group.id, "loading expenses");
        match self.ctx.api.list_expenses(self.group.id) {
            Ok(expenses) => self.expenses.replace(expenses),
            Err(e) => self.banner.set_error(failure("loading expenses", &e)),
        }
    }

    pub fn form_mut(&mut self) -> &mut ExpenseForm {
        &mut self.form
    }

    pub fn add_expense(&mut self) -> Option<&Expense> {
        self.banner.clear();
        let new = match NewExpense::from_input(&self.form.description, &self.form.amount) {
            Ok(n) => n,
            Err(e) => {
                self.banner.set_error(e.to_string());
                return None;
            }
        };
        match self.ctx.api.create_expense(self.group.id, &new) {
            Ok(expense) => {
                self.banner.set_success(format!(
                    "Expense \"{}\" added successfully!",
                    expense.description
                ));
                self.form = ExpenseForm::default();
                self.expenses.prepend(expense);
                self.expenses.items().first()
            }
            Err(e) => {
                self.banner.set_error(failure("adding expense", &e));
                None
            }
        }
    }

    pub fn delete_expense<F>(&mut self, id: ExpenseId, confirm: F) -> bool
    where
        F: FnOnce(&str) -> bool,
    {
        let Some(description) = self.expenses.get(id).map(|e| e.description.clone()) else {
            self.banner
                .set_error(failure("deleting expense", &format!("expense {id} not found")));
            return false;
        };
        if !confirm(&format!("Are you sure you want to delete \"{description}\"?")) {
            return false;
        }
        match self.ctx.api.delete_expense(id) {
            Ok(_) => {
                self.expenses.remove(id);
                self.banner
                    .set_success(format!("Expense \"{description}\" deleted successfully!"));
                true
            }
            Err(e) => {
                self.banner.set_error(failure("deleting expense", &e));
                false
            }
        }
    }

    pub fn stats(&self) -> ExpenseStats {
        self.stats_at(&Local::now())
    }

    pub fn stats_at<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> ExpenseStats {
        ExpenseStats::compute(self.expenses.items(), now)
    }

    pub fn back(&self) -> Route {
        Route::Dashboard
    }

    pub fn group(&self) -> &Group {
        &self.group
    }

    pub fn expenses(&self) -> &[Expense] {
        self.expenses.items()
    }

    pub fn banner(&self) -> &Banner {
        &self.banner
    }
}
