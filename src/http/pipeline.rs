// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;

use async_trait::async_trait;
use log::warn;

use crate::error::Result;

use super::{Request, Response};

/// A stage in the adapter's request pipeline.
#[async_trait]
pub(crate) trait Interceptor: Send + Sync {
    /// Whether this stage attaches credentials to outgoing requests. Such
    /// stages are skipped when the adapter is configured not to send
    /// credentials.
    fn injects_credentials(&self) -> bool {
        false
    }

    async fn before(&self, _req: &mut Request) -> Result<()> {
        Ok(())
    }

    async fn after(&self, _res: &Response) -> Result<()> {
        Ok(())
    }
}

#[derive(Default)]
pub(crate) struct Pipeline {
    stages: Vec<Arc<dyn Interceptor>>,
}

impl Pipeline {
    pub(crate) fn push(&mut self, interceptor: Arc<dyn Interceptor>) {
        self.stages.push(interceptor);
    }

    pub(crate) async fn before(&self, req: &mut Request, include_credentials: bool) {
        for stage in &self.stages {
            if stage.injects_credentials() && !include_credentials {
                continue;
            }
            if let Err(e) = stage.before(req).await {
                warn!(
                    "Sending {} {} without a pre-request step that failed: {}",
                    req.method(),
                    req.url(),
                    e
                );
            }
        }
    }

    pub(crate) async fn after(&self, res: &Response) {
        for stage in &self.stages {
            if let Err(e) = stage.after(res).await {
                warn!(
                    "A post-response step failed for a {} response: {}",
                    res.status(),
                    e
                );
            }
        }
    }
}
