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

use bytes::Bytes;
use serde_json::{json, Value};
use std::collections::{HashMap, VecDeque};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Notify;
use webfs_client::{Gateway, GatewayReply, GatewayRequest};
use webfs_common::error::FsError;
use webfs_common::fs::OpKind;
use webfs_common::state::{FileStatus, LocatedBlocks, RemoteException};
use webfs_common::FsResult;
use webfs_util::sync::ArcMutex;

pub type ReplyFn = Arc<dyn Fn(&GatewayRequest) -> FsResult<GatewayReply> + Send + Sync>;

type Key = (OpKind, String);

#[derive(Default)]
struct MockInner {
    replies: HashMap<Key, VecDeque<ReplyFn>>,
    gates: HashMap<Key, Arc<Notify>>,
    calls: Vec<GatewayRequest>,
}

/// In-process gateway with scripted answers.
///
/// Answers are queued per (operation, path); the last one keeps answering once
/// the queue is down to it. A gate holds the next call on its key until it is
/// opened, which lets a test decide the order in which responses arrive.
/// Unscripted reads answer 404 FileNotFoundException, unscripted writes succeed.
#[derive(Default)]
pub struct MockGateway {
    inner: ArcMutex<MockInner>,
}

impl MockGateway {
    pub const URL_PREFIX: &'static str = "http://mock/webhdfs/v1";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn url(op: OpKind, path: &str) -> String {
        format!("{}{}?op={}", Self::URL_PREFIX, path, op)
    }

    pub fn on<F>(&self, op: OpKind, path: &str, f: F) -> &Self
    where
        F: Fn(&GatewayRequest) -> FsResult<GatewayReply> + Send + Sync + 'static,
    {
        let key = (op, path.to_string());
        let mut inner = self.inner.lock();
        inner.replies.entry(key).or_default().push_back(Arc::new(f));
        self
    }

    pub fn reply_json(&self, op: OpKind, path: &str, value: Value) -> &Self {
        let url = Self::url(op, path);
        self.on(op, path, move |_| Ok(GatewayReply::json(&url, &value)))
    }

    pub fn reply_body(&self, op: OpKind, path: &str, body: impl Into<Bytes>) -> &Self {
        let url = Self::url(op, path);
        let body = body.into();
        self.on(op, path, move |_| Ok(GatewayReply::new(&url, 200, body.clone())))
    }

    pub fn listing(&self, path: &str, entries: Vec<FileStatus>) -> &Self {
        let value = json!({ "FileStatuses": { "FileStatus": entries } });
        self.reply_json(OpKind::ListStatus, path, value)
    }

    pub fn file_status(&self, path: &str, status: FileStatus) -> &Self {
        self.reply_json(OpKind::GetFileStatus, path, json!({ "FileStatus": status }))
    }

    pub fn block_locations(&self, path: &str, blocks: LocatedBlocks) -> &Self {
        self.reply_json(OpKind::GetBlockLocations, path, json!({ "LocatedBlocks": blocks }))
    }

    // HTTP error without a RemoteException body.
    pub fn fail_status(&self, op: OpKind, path: &str, status: u16, reason: &str) -> &Self {
        let url = Self::url(op, path);
        let reason = reason.to_string();
        self.on(op, path, move |_| {
            Err(FsError::transport(&url, Some(status), reason.as_str()))
        })
    }

    pub fn fail_remote(
        &self,
        op: OpKind,
        path: &str,
        status: u16,
        exception: &str,
        message: &str,
    ) -> &Self {
        let url = Self::url(op, path);
        let remote = RemoteException {
            exception: exception.to_string(),
            java_class_name: format!("org.apache.hadoop.security.{}", exception),
            message: message.to_string(),
        };
        self.on(op, path, move |_| {
            Err(FsError::gateway(&url, status, remote.clone()))
        })
    }

    // The request never got an answer.
    pub fn fail_network(&self, op: OpKind, path: &str, cause: &str) -> &Self {
        let url = Self::url(op, path);
        let cause = cause.to_string();
        self.on(op, path, move |_| Err(FsError::transport(&url, None, cause.as_str())))
    }

    /// Hold the next call on (op, path) until the returned gate is notified.
    pub fn gate(&self, op: OpKind, path: &str) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        let mut inner = self.inner.lock();
        inner.gates.insert((op, path.to_string()), gate.clone());
        gate
    }

    pub fn calls(&self) -> Vec<GatewayRequest> {
        self.inner.lock().calls.clone()
    }

    pub fn calls_of(&self, op: OpKind) -> Vec<GatewayRequest> {
        self.calls().into_iter().filter(|x| x.op == op).collect()
    }

    pub fn call_paths(&self, op: OpKind) -> Vec<String> {
        self.calls_of(op)
            .iter()
            .map(|x| x.path.path().to_string())
            .collect()
    }

    pub fn clear_calls(&self) {
        self.inner.lock().calls.clear();
    }

    fn default_reply(req: &GatewayRequest) -> FsResult<GatewayReply> {
        let url = Self::url(req.op, req.path.path());
        match req.op {
            OpKind::Mkdirs | OpKind::SetReplication => {
                Ok(GatewayReply::json(url, &json!({ "boolean": true })))
            }
            OpKind::Create | OpKind::SetPermission | OpKind::SetOwner => {
                Ok(GatewayReply::new(url, 200, Bytes::new()))
            }
            _ => {
                let remote = RemoteException {
                    exception: "FileNotFoundException".to_string(),
                    java_class_name: "java.io.FileNotFoundException".to_string(),
                    message: format!("File {} does not exist.", req.path),
                };
                Err(FsError::gateway(url, 404, remote))
            }
        }
    }
}

impl Gateway for MockGateway {
    fn call(&self, req: GatewayRequest) -> impl Future<Output = FsResult<GatewayReply>> + Send {
        async move {
            let key = (req.op, req.path.path().to_string());
            let gate = {
                let mut inner = self.inner.lock();
                inner.calls.push(req.clone());
                inner.gates.remove(&key)
            };
            if let Some(gate) = gate {
                gate.notified().await;
            }

            let reply = {
                let mut inner = self.inner.lock();
                match inner.replies.get_mut(&key) {
                    Some(queue) if queue.len() > 1 => queue.pop_front(),
                    Some(queue) => queue.front().cloned(),
                    None => None,
                }
            };

            match reply {
                Some(f) => f(&req),
                None => Self::default_reply(&req),
            }
        }
    }
}
