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

use crate::context::{ConsoleContext, Renderer, Surface};
use crate::{MutationOrchestrator, MutationOutcome, NavOutcome, NavigationState, Navigator, UploadFile};
use std::sync::Arc;
use webfs_client::Gateway;
use webfs_common::conf::ExplorerConf;
use webfs_common::error::DisplayMessage;
use webfs_common::fs::Path;
use webfs_common::state::{FileStatus, FileType, OctalPermission, PosixPermission};

/// Entry points of the console, one per user action.
///
/// Each call receives the full target of the action; nothing is read from
/// shared variables when it fires. Errors never escape: they end up in the
/// alert slot and in the returned outcome.
pub struct Console<G> {
    ctx: ConsoleContext<G>,
    navigator: Arc<Navigator<G>>,
    mutations: MutationOrchestrator<G>,
}

impl<G: Gateway> Console<G> {
    pub fn new(
        gateway: Arc<G>,
        renderer: Arc<dyn Renderer>,
        surface: Arc<dyn Surface>,
        conf: ExplorerConf,
    ) -> Self {
        let ctx = ConsoleContext::new(gateway, renderer, surface, conf);
        let navigator = Arc::new(Navigator::new(ctx.clone()));
        let mutations = MutationOrchestrator::new(ctx.clone(), navigator.clone());
        Self {
            ctx,
            navigator,
            mutations,
        }
    }

    pub fn context(&self) -> &ConsoleContext<G> {
        &self.ctx
    }

    pub fn navigator(&self) -> &Navigator<G> {
        &self.navigator
    }

    pub fn state(&self) -> NavigationState {
        self.navigator.state()
    }

    pub fn listing(&self) -> Vec<FileStatus> {
        self.navigator.listing()
    }

    pub fn alert(&self) -> Option<DisplayMessage> {
        self.ctx.alert.get()
    }

    /// First navigation: the address fragment if there is one, else the home dir.
    pub async fn start(&self, hash: Option<&str>) -> NavOutcome {
        let hash = hash.map(|x| x.trim_start_matches('#')).unwrap_or("");
        if hash.is_empty() {
            let home = self.ctx.conf.home_dir.clone();
            self.navigator.navigate(&home).await
        } else {
            self.navigator.navigate(hash).await
        }
    }

    pub async fn navigate(&self, path: &str) -> NavOutcome {
        self.navigator.navigate(path).await
    }

    pub async fn refresh(&self) -> NavOutcome {
        self.navigator.refresh().await
    }

    pub async fn on_hash_change(&self, hash: &str) -> NavOutcome {
        self.navigator.on_hash_change(hash).await
    }

    pub async fn select_entry(&self, name: &str, file_type: FileType) -> NavOutcome {
        self.navigator.select_entry(name, file_type).await
    }

    pub async fn preview_tail(&self, path: &str, file_length: u64) -> NavOutcome {
        self.navigator.preview_tail(path, file_length).await
    }

    fn parse(&self, path: &str) -> Result<Path, MutationOutcome> {
        Path::new(path).map_err(|e| MutationOutcome::Failed(self.ctx.report(&e)))
    }

    pub async fn submit_mkdir(&self, parent: &str, name: &str) -> MutationOutcome {
        match self.parse(parent) {
            Ok(parent) => self.mutations.mkdir(&parent, name, None).await,
            Err(o) => o,
        }
    }

    pub async fn submit_mkdir_with_permission(
        &self,
        parent: &str,
        name: &str,
        permission: OctalPermission,
    ) -> MutationOutcome {
        match self.parse(parent) {
            Ok(parent) => self.mutations.mkdir(&parent, name, Some(permission)).await,
            Err(o) => o,
        }
    }

    pub async fn submit_upload(&self, target_dir: &str, files: Vec<UploadFile>) -> MutationOutcome {
        match self.parse(target_dir) {
            Ok(dir) => self.mutations.upload(&dir, files).await,
            Err(o) => o,
        }
    }

    pub async fn submit_chmod(&self, path: &str, bits: OctalPermission) -> MutationOutcome {
        match self.parse(path) {
            Ok(path) => self.mutations.chmod(&path, bits).await,
            Err(o) => o,
        }
    }

    pub async fn submit_chmod_flags(
        &self,
        path: &str,
        flags: [bool; PosixPermission::FLAG_NUM],
    ) -> MutationOutcome {
        match self.parse(path) {
            Ok(path) => self.mutations.chmod_flags(&path, flags).await,
            Err(o) => o,
        }
    }

    /// Skipped when the listing shows the entry with the same owner and group.
    pub async fn submit_chown(&self, path: &str, owner: &str, group: &str) -> MutationOutcome {
        let path = match self.parse(path) {
            Ok(v) => v,
            Err(o) => return o,
        };

        if let Some(entry) = self.navigator.find_entry(&path) {
            if entry.owner == owner.trim() && entry.group == group.trim() {
                return MutationOutcome::Unchanged;
            }
        }
        self.mutations.chown(&path, owner, group).await
    }

    pub async fn submit_set_replication(&self, path: &str, replication: u16) -> MutationOutcome {
        match self.parse(path) {
            Ok(path) => self.mutations.set_replication(&path, replication).await,
            Err(o) => o,
        }
    }
}
