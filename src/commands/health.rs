// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::context::AppContext;

pub fn handle(ctx: &AppContext) -> Result<()> {
    match ctx.api.health() {
        Ok(h) => match h.service {
            Some(service) => println!("{service}: {}", h.status),
            None => println!("{}", h.status),
        },
        Err(e) => eprintln!("× Health check failed: {e}"),
    }
    Ok(())
}
