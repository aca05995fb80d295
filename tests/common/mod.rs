// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

#![allow(dead_code)]

use chrono::{DateTime, Utc};
use exptrack::api::ExpenseApi;
use exptrack::context::AppContext;
use exptrack::error::{ApiError, AuthError};
use exptrack::models::{Deleted, Expense, ExpenseId, Group, GroupId, Health, NewExpense, NewGroup};
use exptrack::session::{
    AuthEvent, Credentials, Listener, Listeners, Session, SessionProvider, SignUp, Subscription,
    User,
};
use rust_decimal::Decimal;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

pub fn ts(s: &str) -> DateTime<Utc> {
    s.parse().unwrap()
}

pub fn group(id: GroupId, name: &str) -> Group {
    Group {
        id,
        name: name.into(),
        description: None,
        created_at: ts("2025-01-01T00:00:00Z"),
        updated_at: None,
        created_by: Some("u-1".into()),
        total_amount: None,
        expense_count: None,
    }
}

pub fn expense(id: ExpenseId, group_id: GroupId, description: &str, amount: &str) -> Expense {
    Expense {
        id,
        group_id,
        description: description.into(),
        amount: amount.parse().unwrap(),
        created_at: ts("2025-01-02T10:00:00Z"),
        updated_at: None,
        created_by: Some("u-1".into()),
    }
}

pub fn user(id: &str) -> User {
    User {
        id: id.into(),
        email: Some(format!("{id}@example.test")),
        email_confirmed_at: None,
    }
}

/// In-memory stand-in for the expenses API that records every call.
#[derive(Default)]
pub struct FakeApi {
    pub groups: Mutex<Vec<Group>>,
    pub expenses: Mutex<Vec<Expense>>,
    pub calls: Mutex<Vec<String>>,
    pub failing: Mutex<HashSet<&'static str>>,
    pub sent_groups: Mutex<Vec<NewGroup>>,
    pub sent_expenses: Mutex<Vec<NewExpense>>,
    next_id: Mutex<i64>,
}

impl FakeApi {
    pub fn with(groups: Vec<Group>, expenses: Vec<Expense>) -> Arc<Self> {
        let api = Self::default();
        *api.groups.lock().unwrap() = groups;
        *api.expenses.lock().unwrap() = expenses;
        *api.next_id.lock().unwrap() = 100;
        Arc::new(api)
    }

    pub fn fail(&self, op: &'static str) {
        self.failing.lock().unwrap().insert(op);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, op: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| *c == op).count()
    }

    fn enter(&self, op: &'static str) -> Result<(), ApiError> {
        self.calls.lock().unwrap().push(op.to_string());
        if self.failing.lock().unwrap().contains(op) {
            return Err(ApiError::Status {
                status: 500,
                message: "boom".into(),
            });
        }
        Ok(())
    }

    fn next(&self) -> i64 {
        let mut n = self.next_id.lock().unwrap();
        *n += 1;
        *n
    }
}

impl ExpenseApi for FakeApi {
    fn create_group(&self, new: &NewGroup) -> Result<Group, ApiError> {
        self.enter("create_group")?;
        self.sent_groups.lock().unwrap().push(new.clone());
        let mut g = group(self.next(), new.name());
        g.description = new.description().map(str::to_string);
        self.groups.lock().unwrap().insert(0, g.clone());
        Ok(g)
    }

    fn list_groups(&self) -> Result<Vec<Group>, ApiError> {
        self.enter("list_groups")?;
        Ok(self.groups.lock().unwrap().clone())
    }

    fn list_expenses(&self, group_id: GroupId) -> Result<Vec<Expense>, ApiError> {
        self.enter("list_expenses")?;
        Ok(self
            .expenses
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.group_id == group_id)
            .cloned()
            .collect())
    }

    fn create_expense(&self, group_id: GroupId, new: &NewExpense) -> Result<Expense, ApiError> {
        self.enter("create_expense")?;
        self.sent_expenses.lock().unwrap().push(new.clone());
        let e = Expense {
            amount: new.amount(),
            ..expense(self.next(), group_id, new.description(), "1")
        };
        self.expenses.lock().unwrap().insert(0, e.clone());
        Ok(e)
    }

    fn delete_group(&self, group_id: GroupId) -> Result<Deleted, ApiError> {
        self.enter("delete_group")?;
        let mut groups = self.groups.lock().unwrap();
        let before = groups.len();
        groups.retain(|g| g.id != group_id);
        if groups.len() == before {
            return Err(ApiError::Status {
                status: 404,
                message: "Group not found or access denied".into(),
            });
        }
        Ok(Deleted {
            message: Some("Group deleted successfully".into()),
        })
    }

    fn delete_expense(&self, expense_id: ExpenseId) -> Result<Deleted, ApiError> {
        self.enter("delete_expense")?;
        let mut expenses = self.expenses.lock().unwrap();
        let before = expenses.len();
        expenses.retain(|e| e.id != expense_id);
        if expenses.len() == before {
            return Err(ApiError::Status {
                status: 404,
                message: "Expense not found or access denied".into(),
            });
        }
        Ok(Deleted {
            message: Some("Expense deleted successfully".into()),
        })
    }

    fn health(&self) -> Result<Health, ApiError> {
        self.enter("health")?;
        Ok(Health {
            status: "healthy".into(),
            service: Some("ExpenseTracker API".into()),
        })
    }
}

/// In-memory session provider: password `secret1` signs anyone in.
pub struct FakeSession {
    pub current: Mutex<Option<Session>>,
    pub listeners: Arc<Listeners>,
    pub auto_confirm: bool,
    pub broken: bool,
}

impl FakeSession {
    pub fn signed_out() -> Arc<Self> {
        Arc::new(Self {
            current: Mutex::new(None),
            listeners: Listeners::new(),
            auto_confirm: true,
            broken: false,
        })
    }

    pub fn signed_in(user_id: &str) -> Arc<Self> {
        let s = Self::signed_out();
        *s.current.lock().unwrap() = Some(session_for(user(user_id)));
        s
    }

    pub fn with(auto_confirm: bool, broken: bool) -> Arc<Self> {
        Arc::new(Self {
            current: Mutex::new(None),
            listeners: Listeners::new(),
            auto_confirm,
            broken,
        })
    }
}

pub fn session_for(user: User) -> Session {
    Session {
        access_token: format!("token-{}", user.id),
        refresh_token: None,
        expires_at: None,
        user,
    }
}

impl SessionProvider for FakeSession {
    fn current_session(&self) -> Result<Option<Session>, AuthError> {
        if self.broken {
            return Err(AuthError::Storage("unreadable".into()));
        }
        Ok(self.current.lock().unwrap().clone())
    }

    fn subscribe(&self, listener: Box<Listener>) -> Subscription {
        self.listeners.subscribe(listener)
    }

    fn sign_in(&self, c: &Credentials) -> Result<Session, AuthError> {
        if c.password != "secret1" {
            return Err(AuthError::Rejected("Invalid login credentials".into()));
        }
        let s = session_for(User {
            id: c.email.clone(),
            email: Some(c.email.clone()),
            email_confirmed_at: None,
        });
        *self.current.lock().unwrap() = Some(s.clone());
        self.listeners.notify(AuthEvent::SignedIn, Some(&s));
        Ok(s)
    }

    fn sign_up(&self, c: &Credentials) -> Result<SignUp, AuthError> {
        let u = User {
            id: c.email.clone(),
            email: Some(c.email.clone()),
            email_confirmed_at: None,
        };
        if !self.auto_confirm {
            return Ok(SignUp::ConfirmationPending(u));
        }
        let s = session_for(u);
        *self.current.lock().unwrap() = Some(s.clone());
        self.listeners.notify(AuthEvent::SignedIn, Some(&s));
        Ok(SignUp::Session(s))
    }

    fn sign_out(&self) -> Result<(), AuthError> {
        *self.current.lock().unwrap() = None;
        self.listeners.notify(AuthEvent::SignedOut, None);
        Ok(())
    }
}

pub fn context(session: Arc<FakeSession>, api: Arc<FakeApi>) -> AppContext {
    AppContext::new(session, api)
}

pub fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}
