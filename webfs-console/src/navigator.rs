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

use crate::context::{ConsoleContext, Control, View};
use crate::projection::{project_file, project_listing, project_preview, PreviewWindow};
use log::{debug, info};
use std::collections::VecDeque;
use webfs_client::Gateway;
use webfs_common::error::DisplayMessage;
use webfs_common::fs::Path;
use webfs_common::state::{FileStatus, FileType};
use webfs_common::FsResult;
use webfs_util::sync::{ArcMutex, AtomicCounter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavPhase {
    Idle,
    Loading,
    Loaded,
    Failed,
}

/// The file whose details are currently open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub path: Path,
    pub name: String,
    pub file_type: FileType,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationState {
    pub current_dir: Path,
    pub selected: Option<Selection>,
    pub phase: NavPhase,
}

impl Default for NavigationState {
    fn default() -> Self {
        Self {
            current_dir: Path::root(),
            selected: None,
            phase: NavPhase::Idle,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavOutcome {
    // The listing of this directory was committed.
    Committed(Path),
    // File details of this path are shown.
    Selected(Path),
    // A tail preview of this path is shown.
    Previewed(Path),
    // A newer request settled first, this answer was dropped.
    Superseded(Path),
    Unchanged,
    Failed(DisplayMessage),
}

impl NavOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, NavOutcome::Failed(_))
    }
}

struct NavInner {
    state: NavigationState,
    // Highest sequence number whose response was applied, success or error.
    settled_seq: u64,
    // Hashes set by the navigator itself whose change event has not come back yet.
    published: VecDeque<String>,
    // What the address shows, as last set by the navigator or reported by a hash event.
    last_address: Option<String>,
    listing: Vec<FileStatus>,
}

/// Owns the current directory and is the only writer of `NavigationState`.
///
/// Every listing request takes a number from a monotonic counter. A response
/// is applied only if no request with a higher number has settled already, so
/// overlapping navigations always end on the most recently issued one that
/// answered. The state lock is never held across an await.
pub struct Navigator<G> {
    ctx: ConsoleContext<G>,
    inner: ArcMutex<NavInner>,
    seq: AtomicCounter,
}

impl<G: Gateway> Navigator<G> {
    const MAX_PUBLISHED: usize = 16;

    pub fn new(ctx: ConsoleContext<G>) -> Self {
        let inner = NavInner {
            state: NavigationState::default(),
            settled_seq: 0,
            published: VecDeque::new(),
            last_address: None,
            listing: vec![],
        };
        Self {
            ctx,
            inner: ArcMutex::new(inner),
            seq: AtomicCounter::new(0),
        }
    }

    pub fn state(&self) -> NavigationState {
        self.inner.lock().state.clone()
    }

    pub fn current_dir(&self) -> Path {
        self.inner.lock().state.current_dir.clone()
    }

    // Entries of the last committed listing.
    pub fn listing(&self) -> Vec<FileStatus> {
        self.inner.lock().listing.clone()
    }

    pub fn find_entry(&self, path: &Path) -> Option<FileStatus> {
        let inner = self.inner.lock();
        if path.parent().as_ref() != Some(&inner.state.current_dir) {
            return None;
        }
        inner
            .listing
            .iter()
            .find(|x| x.name == path.name())
            .cloned()
    }

    fn parse(&self, target: &str) -> Result<Path, DisplayMessage> {
        Path::new(target).map_err(|e| self.ctx.report(&e))
    }

    /// List `target` and make it the current directory. An empty target is the
    /// root. Navigating to the directory already loaded is a no-op.
    pub async fn navigate(&self, target: &str) -> NavOutcome {
        match self.parse(target) {
            Ok(path) => self.navigate_path(path).await,
            Err(msg) => NavOutcome::Failed(msg),
        }
    }

    pub async fn navigate_path(&self, target: Path) -> NavOutcome {
        {
            let mut inner = self.inner.lock();
            if inner.state.current_dir == target && inner.state.phase == NavPhase::Loaded {
                debug!("{} is already loaded", target);
                return NavOutcome::Unchanged;
            }
            inner.state.phase = NavPhase::Loading;
        }
        self.load(target).await
    }

    // Reload the current directory, used after mutations.
    pub async fn refresh(&self) -> NavOutcome {
        let dir = {
            let mut inner = self.inner.lock();
            inner.state.phase = NavPhase::Loading;
            inner.state.current_dir.clone()
        };
        self.load(dir).await
    }

    async fn load(&self, target: Path) -> NavOutcome {
        let seq = self.seq.next();
        debug!("list {}, seq {}", target, seq);
        let res = self.ctx.gateway.list_status(&target).await;

        let mut inner = self.inner.lock();
        if seq < inner.settled_seq {
            info!(
                "discard listing of {}, seq {} is older than {}",
                target, seq, inner.settled_seq
            );
            return NavOutcome::Superseded(target);
        }
        inner.settled_seq = seq;
        let latest = seq == self.seq.get();

        match res {
            Ok(entries) => {
                info!("commit {}, {} entries", target, entries.len());
                let view = project_listing(&target, &entries);
                inner.state.current_dir = target.clone();
                inner.state.selected = None;
                inner.state.phase = if latest {
                    NavPhase::Loaded
                } else {
                    NavPhase::Loading
                };
                inner.listing = entries;

                // An unchanged address fires no change event, so there is no echo to wait for.
                if inner.last_address.as_deref() != Some(target.path()) {
                    if inner.published.len() >= Self::MAX_PUBLISHED {
                        inner.published.pop_front();
                    }
                    inner.published.push_back(target.to_string());
                    inner.last_address = Some(target.to_string());
                    self.ctx.surface.set_address(target.path());
                }

                // Still under the lock so views land in commit order.
                if let Err(e) = self.ctx.show(View::Explorer, &view) {
                    return NavOutcome::Failed(self.ctx.report(&e));
                }
                NavOutcome::Committed(target)
            }

            Err(e) => {
                inner.state.phase = if latest {
                    NavPhase::Failed
                } else {
                    NavPhase::Loading
                };
                NavOutcome::Failed(self.ctx.report(&e))
            }
        }
    }

    /// Address fragment changed. Echoes of our own updates and the directory
    /// already shown are ignored.
    pub async fn on_hash_change(&self, hash: &str) -> NavOutcome {
        self.ctx.hide_alert();
        let hash = hash.strip_prefix('#').unwrap_or(hash);
        let target = match self.parse(hash) {
            Ok(v) => v,
            Err(msg) => return NavOutcome::Failed(msg),
        };

        {
            let mut inner = self.inner.lock();
            inner.last_address = Some(target.to_string());
            if let Some(pos) = inner.published.iter().position(|x| x == target.path()) {
                inner.published.drain(..=pos);
                debug!("ignore echo of {}", target);
                return NavOutcome::Unchanged;
            }
            if inner.state.current_dir == target && inner.state.phase != NavPhase::Idle {
                return NavOutcome::Unchanged;
            }
        }
        self.navigate_path(target).await
    }

    /// A row of the listing was clicked: enter a directory, or show the block
    /// locations and permissions of a file.
    pub async fn select_entry(&self, name: &str, file_type: FileType) -> NavOutcome {
        let dir = self.current_dir();
        let path = match dir.join(name) {
            Ok(v) => v,
            Err(e) => return NavOutcome::Failed(self.ctx.report(&e)),
        };

        if file_type.is_dir() {
            return self.navigate_path(path).await;
        }

        let gateway = &self.ctx.gateway;
        let (located, status) = futures::join!(
            gateway.get_block_locations(&path),
            gateway.get_file_status(&path)
        );
        let res = located.and_then(|l| status.map(|s| (l, s)));
        let (located, status) = match res {
            Ok(v) => v,
            Err(e) => return NavOutcome::Failed(self.ctx.report(&e)),
        };

        let view = project_file(&path, &status, &located, self.ctx.conf.tail_chunk_size);
        {
            let mut inner = self.inner.lock();
            if inner.state.current_dir != dir {
                debug!("directory changed while loading {}", path);
                return NavOutcome::Superseded(path);
            }
            inner.state.selected = Some(Selection {
                path: path.clone(),
                name: name.to_string(),
                file_type,
            });
        }

        match self.ctx.show(View::FileInfo, &view) {
            Ok(_) => NavOutcome::Selected(path),
            Err(e) => NavOutcome::Failed(self.ctx.report(&e)),
        }
    }

    /// Fetch the last bytes of a file, at most `tail_chunk_size` of them.
    pub async fn preview_tail(&self, path: &str, file_length: u64) -> NavOutcome {
        let path = match self.parse(path) {
            Ok(v) => v,
            Err(msg) => return NavOutcome::Failed(msg),
        };
        let window = PreviewWindow::tail(file_length, self.ctx.conf.tail_chunk_size);

        let _guard = self.ctx.disable(Control::Preview);
        match self.fetch_preview(&path, window).await {
            Ok(_) => NavOutcome::Previewed(path),
            Err(e) => NavOutcome::Failed(self.ctx.report(&e)),
        }
    }

    async fn fetch_preview(&self, path: &Path, window: PreviewWindow) -> FsResult<()> {
        let mut data = self
            .ctx
            .gateway
            .open(path, window.offset, Some(window.len()))
            .await?;
        // The file may have grown since its length was read.
        if data.len() as u64 > window.len() {
            debug!("preview of {} returned {} bytes, keep {}", path, data.len(), window.len());
            data.truncate(window.len() as usize);
        }
        let view = project_preview(path, window, &data);
        self.ctx.show(View::FilePreview, &view)
    }
}
