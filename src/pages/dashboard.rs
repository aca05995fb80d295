// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::sync::{Arc, Mutex, PoisonError};

use super::failure;
use crate::context::AppContext;
use crate::error::ApiError;
use crate::models::{Group, GroupId, NewGroup};
use crate::router::Route;
use crate::session::{Subscription, User};
use crate::stats::GroupSummary;
use crate::store::{Banner, RecordStore};

#[derive(Debug, Clone, Default)]
pub struct GroupForm {
    pub name: String,
    pub description: String,
}

/// The group list.
pub struct DashboardPage {
    ctx: AppContext,
    user: Option<User>,
    groups: RecordStore<Group>,
    banner: Banner,
    form: GroupForm,
    /// Latest identity reported by the session, not yet applied.
    pending: Arc<Mutex<Option<Option<User>>>>,
    _subscription: Subscription,
}

impl DashboardPage {
    pub fn mount(ctx: AppContext, user: User) -> Self {
        let pending = Arc::new(Mutex::new(None));
        let slot = Arc::clone(&pending);
        let subscription = ctx.session.subscribe(Box::new(move |_, s| {
            let mut next = slot.lock().unwrap_or_else(PoisonError::into_inner);
            *next = Some(s.map(|s| s.user.clone()));
        }));
        let mut page = Self {
            ctx,
            user: None,
            groups: RecordStore::new(),
            banner: Banner::default(),
            form: GroupForm::default(),
            pending,
            _subscription: subscription,
        };
        page.on_identity_change(Some(user));
        page
    }

    /// Applies an identity change reported by the session since the last call.
    pub fn sync_identity(&mut self) -> bool {
        let next = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        match next {
            Some(user) => {
                self.on_identity_change(user);
                true
            }
            None => false,
        }
    }

    /// Refetches when the signed-in identity is a different one.
    pub fn on_identity_change(&mut self, user: Option<User>) {
        let same = self.user.as_ref().map(|u| &u.id) == user.as_ref().map(|u| &u.id);
        if same {
            return;
        }
        self.user = user;
        if self.user.is_some() {
            self.fetch_groups();
        } else {
            self.groups.clear();
        }
    }

    pub fn fetch_groups(&mut self) {
        tracing::info!("loading groups");
        match self.ctx.api.list_groups() {
            Ok(groups) => self.groups.replace(groups),
            Err(e) => {
                self.banner.set_error(failure("loading groups", &e));
                // Keep the page usable.
                self.groups.clear();
            }
        }
    }

    pub fn form_mut(&mut self) -> &mut GroupForm {
        &mut self.form
    }

    pub fn create_group(&mut self) -> Option<&Group> {
        self.banner.clear();
        self.sync_identity();
        if self.user.is_none() {
            self.banner
                .set_error(failure("creating group", &ApiError::AuthMissing));
            return None;
        }
        let new = match NewGroup::from_input(&self.form.name, &self.form.description) {
            Ok(n) => n,
            Err(e) => {
                self.banner.set_error(e.to_string());
                return None;
            }
        };
        match self.ctx.api.create_group(&new) {
            Ok(group) => {
                self.banner
                    .set_success(format!("Group \"{}\" created successfully!", group.name));
                self.form = GroupForm::default();
                self.groups.prepend(group);
                self.groups.items().first()
            }
            Err(e) => {
                self.banner.set_error(failure("creating group", &e));
                self.sync_identity();
                None
            }
        }
    }

    /// Removes the group locally only once the server has deleted it.
    pub fn delete_group<F>(&mut self, id: GroupId, confirm: F) -> bool
    where
        F: FnOnce(&str) -> bool,
    {
        self.sync_identity();
        let Some(name) = self.groups.get(id).map(|g| g.name.clone()) else {
            self.banner
                .set_error(failure("deleting group", &format!("group {id} not found")));
            return false;
        };
        if !confirm(&format!("Are you sure you want to delete the group \"{name}\"?")) {
            return false;
        }
        match self.ctx.api.delete_group(id) {
            Ok(_) => {
                self.groups.remove(id);
                self.banner
                    .set_success(format!("Group \"{name}\" deleted successfully!"));
                true
            }
            Err(e) => {
                self.banner.set_error(failure("deleting group", &e));
                self.sync_identity();
                false
            }
        }
    }

    pub fn open_group(&self, id: GroupId) -> Route {
        Route::group(id)
    }

    pub fn sign_out(&mut self) -> Route {
        if let Err(e) = self.ctx.session.sign_out() {
            tracing::error!(error = %e, "error signing out");
        }
        self.sync_identity();
        self.on_identity_change(None);
        Route::SignIn
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn groups(&self) -> &[Group] {
        self.groups.items()
    }

    pub fn summary(&self) -> GroupSummary {
        GroupSummary::compute(self.groups.items())
    }

    pub fn banner(&self) -> &Banner {
        &self.banner
    }
}
