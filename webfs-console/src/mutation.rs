// Copyright 2025 OPPO.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::context::{ConsoleContext, Control};
use crate::Navigator;
use bytes::Bytes;
use futures::future::join_all;
use log::info;
use std::future::Future;
use std::sync::Arc;
use webfs_client::Gateway;
use webfs_common::error::{DisplayMessage, FsError};
use webfs_common::fs::Path;
use webfs_common::state::{OctalPermission, PosixPermission};
use webfs_common::FsResult;

/// A file picked for upload.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub name: String,
    pub data: Bytes,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome {
    Applied,
    // Nothing to send, e.g. owner and group did not change.
    Unchanged,
    Failed(DisplayMessage),
    // Some uploads failed, the names that did are listed with their message.
    Partial {
        succeeded: Vec<String>,
        failed: Vec<(String, DisplayMessage)>,
    },
}

/// Runs user initiated changes.
///
/// Each action disables its control, issues the gateway call and on success
/// reloads the current directory. The control is enabled again whatever the
/// outcome. Nothing is applied to the local state before the gateway confirms.
pub struct MutationOrchestrator<G> {
    ctx: ConsoleContext<G>,
    navigator: Arc<Navigator<G>>,
}

impl<G: Gateway> MutationOrchestrator<G> {
    pub fn new(ctx: ConsoleContext<G>, navigator: Arc<Navigator<G>>) -> Self {
        Self { ctx, navigator }
    }

    async fn run<T>(
        &self,
        control: Control,
        refresh_on_failure: bool,
        action: impl Future<Output = FsResult<T>>,
    ) -> MutationOutcome {
        let _guard = self.ctx.disable(control);
        match action.await {
            Ok(_) => {
                self.navigator.refresh().await;
                MutationOutcome::Applied
            }
            Err(e) => {
                let msg = self.ctx.report(&e);
                if refresh_on_failure {
                    self.navigator.refresh().await;
                }
                MutationOutcome::Failed(msg)
            }
        }
    }

    fn fail(&self, e: FsError) -> MutationOutcome {
        MutationOutcome::Failed(self.ctx.report(&e))
    }

    /// Create `name` under `parent`. The permission falls back to the configured
    /// directory permission, then to the gateway default.
    pub async fn mkdir(
        &self,
        parent: &Path,
        name: &str,
        permission: Option<OctalPermission>,
    ) -> MutationOutcome {
        let path = match parent.join(name.trim()) {
            Ok(v) => v,
            Err(e) => return self.fail(e),
        };
        let permission = permission.or(self.ctx.conf.dir_permission);
        info!("mkdir {}, permission {:?}", path, permission);

        let gateway = &self.ctx.gateway;
        self.run(Control::Mkdir, false, gateway.mkdirs(&path, permission))
            .await
    }

    /// One CREATE per file, all in flight together. A failed file does not stop
    /// the others; the listing is reloaded once if any file made it.
    pub async fn upload(&self, target_dir: &Path, files: Vec<UploadFile>) -> MutationOutcome {
        if files.is_empty() {
            return MutationOutcome::Unchanged;
        }
        let _guard = self.ctx.disable(Control::Upload);

        let mut targets = Vec::with_capacity(files.len());
        for file in files {
            match target_dir.join(&file.name) {
                Ok(path) => targets.push((file, path)),
                Err(e) => return self.fail(e),
            }
        }

        let gateway = &self.ctx.gateway;
        let calls = targets
            .iter()
            .map(|(file, path)| gateway.create(path, file.data.clone(), false));
        let results = join_all(calls).await;

        let mut succeeded = vec![];
        let mut failed = vec![];
        for ((file, _), res) in targets.into_iter().zip(results) {
            match res {
                Ok(_) => succeeded.push(file.name),
                Err(e) => failed.push((file.name, self.ctx.report(&e))),
            }
        }
        info!(
            "upload to {}: {} succeeded, {} failed",
            target_dir,
            succeeded.len(),
            failed.len()
        );

        if !succeeded.is_empty() {
            self.navigator.refresh().await;
        }

        if failed.is_empty() {
            MutationOutcome::Applied
        } else if succeeded.is_empty() && failed.len() == 1 {
            let (_, msg) = failed.remove(0);
            MutationOutcome::Failed(msg)
        } else {
            MutationOutcome::Partial { succeeded, failed }
        }
    }

    pub async fn chmod(&self, path: &Path, bits: OctalPermission) -> MutationOutcome {
        info!("chmod {} {}", path, bits);
        let gateway = &self.ctx.gateway;
        self.run(Control::Chmod, false, gateway.set_permission(path, bits))
            .await
    }

    // Flags in the order [sticky, ur, uw, ux, gr, gw, gx, or, ow, ox].
    pub async fn chmod_flags(
        &self,
        path: &Path,
        flags: [bool; PosixPermission::FLAG_NUM],
    ) -> MutationOutcome {
        self.chmod(path, PosixPermission::encode(flags)).await
    }

    /// The listing is reloaded even when the change is refused, so an owner
    /// edited in place goes back to what the gateway holds.
    pub async fn chown(&self, path: &Path, owner: &str, group: &str) -> MutationOutcome {
        let (owner, group) = (owner.trim(), group.trim());
        if owner.is_empty() && group.is_empty() {
            return self.fail(FsError::common("owner and group are both empty"));
        }

        info!("chown {} {}:{}", path, owner, group);
        let gateway = &self.ctx.gateway;
        let action = gateway.set_owner(path, Some(owner), Some(group));
        self.run(Control::Chown, true, action).await
    }

    pub async fn set_replication(&self, path: &Path, replication: u16) -> MutationOutcome {
        if replication == 0 {
            return self.fail(FsError::common("replication must be greater than 0"));
        }

        info!("setrep {} {}", path, replication);
        let gateway = &self.ctx.gateway;
        let action = async {
            if gateway.set_replication(path, replication).await? {
                Ok(())
            } else {
                Err(FsError::common(format!(
                    "replication of {} was not changed, it is not a file",
                    path
                )))
            }
        };
        self.run(Control::SetReplication, false, action).await
    }
}
