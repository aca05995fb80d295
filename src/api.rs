// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use reqwest::Method;
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;

use crate::error::ApiError;
use crate::models::{
    Deleted, Expense, ExpenseId, ExpenseList, Group, GroupId, GroupList, Health, NewExpense,
    NewGroup,
};
use crate::session::SessionProvider;

/// Operations of the remote expenses API. Pages only see this trait.
pub trait ExpenseApi: Send + Sync {
    fn create_group(&self, group: &NewGroup) -> Result<Group, ApiError>;
    fn list_groups(&self) -> Result<Vec<Group>, ApiError>;
    fn list_expenses(&self, group_id: GroupId) -> Result<Vec<Expense>, ApiError>;
    fn create_expense(&self, group_id: GroupId, expense: &NewExpense) -> Result<Expense, ApiError>;
    fn delete_group(&self, group_id: GroupId) -> Result<Deleted, ApiError>;
    fn delete_expense(&self, expense_id: ExpenseId) -> Result<Deleted, ApiError>;
    fn health(&self) -> Result<Health, ApiError>;
}

pub struct ApiClient {
    http: Client,
    base_url: String,
    session: Arc<dyn SessionProvider>,
}

impl ApiClient {
    pub fn new(http: Client, base_url: impl Into<String>, session: Arc<dyn SessionProvider>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn bearer_token(&self) -> Result<String, ApiError> {
        match self.session.access_token() {
            Ok(Some(token)) if !token.is_empty() => Ok(token),
            Ok(_) => Err(ApiError::AuthMissing),
            Err(e) => {
                tracing::warn!(error = %e, "could not read session");
                Err(ApiError::AuthMissing)
            }
        }
    }

    fn request<T, B>(&self, method: Method, endpoint: &str, body: Option<&B>) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let token = self.bearer_token()?;
        let url = format!("{}{}", self.base_url, endpoint);
        tracing::debug!(%method, %url, "api request");

        let mut req = self
            .http
            .request(method, &url)
            .header(CONTENT_TYPE, "application/json")
            .bearer_auth(token);
        if let Some(b) = body {
            req = req.json(b);
        }
        let result = req.send().map_err(ApiError::from).and_then(read_json);
        if let Err(e) = &result {
            tracing::warn!(endpoint, error = %e, "api request failed");
        }
        result
    }
}

fn read_json<T: DeserializeOwned>(resp: reqwest::blocking::Response) -> Result<T, ApiError> {
    let status = resp.status();
    let text = resp.text()?;
    if !status.is_success() {
        return Err(ApiError::from_status(status.as_u16(), &text));
    }
    Ok(serde_json::from_str(&text)?)
}

fn check_group(g: Group) -> Result<Group, ApiError> {
    if g.name.trim().is_empty() {
        return Err(ApiError::InvalidResponse(format!("group {} has no name", g.id)));
    }
    Ok(g)
}

fn check_expense(e: Expense) -> Result<Expense, ApiError> {
    if e.description.trim().is_empty() {
        return Err(ApiError::InvalidResponse(format!("expense {} has no description", e.id)));
    }
    Ok(e)
}

impl ExpenseApi for ApiClient {
    fn create_group(&self, group: &NewGroup) -> Result<Group, ApiError> {
        let created: Group = self.request(Method::POST, "/api/groups", Some(group))?;
        check_group(created)
    }

    fn list_groups(&self) -> Result<Vec<Group>, ApiError> {
        let list: GroupList = self.request::<_, ()>(Method::GET, "/api/groups", None)?;
        list.groups.into_iter().map(check_group).collect()
    }

    fn list_expenses(&self, group_id: GroupId) -> Result<Vec<Expense>, ApiError> {
        let list: ExpenseList =
            self.request::<_, ()>(Method::GET, &format!("/api/expenses/{group_id}"), None)?;
        list.expenses.into_iter().map(check_expense).collect()
    }

    fn create_expense(&self, group_id: GroupId, expense: &NewExpense) -> Result<Expense, ApiError> {
        let created: Expense =
            self.request(Method::POST, &format!("/api/expenses/{group_id}"), Some(expense))?;
        check_expense(created)
    }

    fn delete_group(&self, group_id: GroupId) -> Result<Deleted, ApiError> {
        self.request::<_, ()>(Method::DELETE, &format!("/api/groups/{group_id}"), None)
    }

    fn delete_expense(&self, expense_id: ExpenseId) -> Result<Deleted, ApiError> {
        self.request::<_, ()>(Method::DELETE, &format!("/api/expenses/{expense_id}"), None)
    }

    fn health(&self) -> Result<Health, ApiError> {
        // Liveness is public; no token is attached.
        let url = format!("{}/health", self.base_url);
        tracing::debug!(%url, "health check");
        self.http.get(&url).send().map_err(ApiError::from).and_then(read_json)
    }
}
