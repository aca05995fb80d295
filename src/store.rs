// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Page-local state: cached record lists and the message banner.

use std::time::{Duration, Instant};

use crate::models::{Expense, ExpenseId, Group, GroupId};

pub const SUCCESS_TTL: Duration = Duration::from_secs(3);

pub trait Record {
    type Id: Copy + PartialEq;
    fn id(&self) -> Self::Id;
}

impl Record for Group {
    type Id = GroupId;
    fn id(&self) -> GroupId {
        self.id
    }
}

impl Record for Expense {
    type Id = ExpenseId;
    fn id(&self) -> ExpenseId {
        self.id
    }
}

/// Cache of the last server result. Newest records sit at the front.
#[derive(Debug, Clone)]
pub struct RecordStore<T> {
    items: Vec<T>,
}

impl<T> Default for RecordStore<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Record> RecordStore<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: T::Id) -> Option<&T> {
        self.items.iter().find(|r| r.id() == id)
    }

    pub fn replace(&mut self, items: Vec<T>) {
        self.items = items;
    }

    pub fn prepend(&mut self, item: T) {
        self.items.insert(0, item);
    }

    pub fn remove(&mut self, id: T::Id) -> Option<T> {
        let pos = self.items.iter().position(|r| r.id() == id)?;
        Some(self.items.remove(pos))
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

/// One success line (expires) and one error line (sticky until cleared).
#[derive(Debug, Clone, Default)]
pub struct Banner {
    success: Option<(String, Instant)>,
    error: Option<String>,
}

impl Banner {
    pub fn clear(&mut self) {
        self.success = None;
        self.error = None;
    }

    pub fn set_success(&mut self, text: impl Into<String>) {
        self.set_success_at(text, Instant::now());
    }

    pub fn set_success_at(&mut self, text: impl Into<String>, now: Instant) {
        self.success = Some((text.into(), now + SUCCESS_TTL));
    }

    pub fn set_error(&mut self, text: impl Into<String>) {
        self.error = Some(text.into());
    }

    pub fn success(&self) -> Option<&str> {
        self.success_at(Instant::now())
    }

    pub fn success_at(&self, now: Instant) -> Option<&str> {
        match &self.success {
            Some((text, until)) if now < *until => Some(text.as_str()),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
