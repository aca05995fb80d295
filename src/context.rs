// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;

use crate::api::{ApiClient, ExpenseApi};
use crate::config::Config;
use crate::session::{GoTrue, SessionProvider};
use crate::utils::http_client;

/// Everything a page needs, handed over at construction.
#[derive(Clone)]
pub struct AppContext {
    pub session: Arc<dyn SessionProvider>,
    pub api: Arc<dyn ExpenseApi>,
}

impl AppContext {
    pub fn new(session: Arc<dyn SessionProvider>, api: Arc<dyn ExpenseApi>) -> Self {
        Self { session, api }
    }

    pub fn from_config(cfg: &Config) -> Result<Self> {
        let http = http_client(Duration::from_secs(cfg.timeout_secs))?;
        let session: Arc<dyn SessionProvider> = Arc::new(GoTrue::new(cfg, http.clone()));
        let api = Arc::new(ApiClient::new(http, cfg.api_url.clone(), Arc::clone(&session)));
        Ok(Self { session, api })
    }
}
