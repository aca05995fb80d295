// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod models;
pub mod pages;
pub mod router;
pub mod session;
pub mod stats;
pub mod storage;
pub mod store;
pub mod utils;
