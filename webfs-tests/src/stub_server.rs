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

use axum::body::Bytes;
use axum::extract::{Path as UrlPath, Query, State};
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::any;
use axum::{Json, Router};
use log::{error, info};
use serde_json::{json, Value};
use std::collections::{BTreeMap, HashMap};
use std::net::SocketAddr;
use webfs_common::conf::GatewayConf;
use webfs_common::fs::{OpKind, Path};
use webfs_common::state::{FileStatus, FileType, OctalPermission};
use webfs_util::sync::ArcMutex;
use webfs_util::CommonResult;

struct Node {
    status: FileStatus,
    data: Bytes,
}

#[derive(Default)]
struct Namespace {
    nodes: BTreeMap<String, Node>,
    // Paths answering 403 with an empty body.
    forbidden: Vec<String>,
    // Query strings of every request, in arrival order.
    requests: Vec<(Method, String, HashMap<String, String>)>,
}

type SharedNamespace = ArcMutex<Namespace>;

/// A small WebHDFS namenode kept in memory, served by axum on a random port.
pub struct StubServer {
    addr: SocketAddr,
    ns: SharedNamespace,
}

impl StubServer {
    const PREFIX: &'static str = "/webhdfs/v1";

    pub async fn start() -> CommonResult<Self> {
        let ns = SharedNamespace::default();
        ns.lock().nodes.insert("/".to_string(), Self::node("", FileType::Directory, Bytes::new()));

        let app = Router::new()
            .route("/webhdfs/v1", any(handle_root))
            .route("/webhdfs/v1/", any(handle_root))
            .route("/webhdfs/v1/*path", any(handle_path))
            .with_state(ns.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                error!("stub server error: {}", e);
            }
        });
        info!("stub server start successfully, bind address: {}", addr);

        Ok(Self { addr, ns })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn gateway_conf(&self, user_name: &str) -> CommonResult<GatewayConf> {
        let mut conf = GatewayConf {
            address: format!("http://{}", self.addr),
            user_name: user_name.to_string(),
            ..Default::default()
        };
        conf.init()?;
        Ok(conf)
    }

    fn node(name: &str, file_type: FileType, data: Bytes) -> Node {
        let permission = match file_type {
            FileType::Directory => OctalPermission::DIR_DEFAULT,
            _ => OctalPermission::FILE_DEFAULT,
        };
        let status = FileStatus {
            name: name.to_string(),
            file_type,
            permission,
            owner: "hdfs".to_string(),
            group: "supergroup".to_string(),
            replication: if file_type.is_dir() { 0 } else { 3 },
            length: data.len() as u64,
            block_size: if file_type.is_dir() { 0 } else { 134217728 },
            modification_time: 1_700_000_000_000,
            ..Default::default()
        };
        Node { status, data }
    }

    pub fn put_dir(&self, path: &str) {
        let path = Self::key(path);
        let name = Path::from_str(&path).map(|p| p.name().to_string()).unwrap_or_default();
        self.ns
            .lock()
            .nodes
            .insert(path, Self::node(&name, FileType::Directory, Bytes::new()));
    }

    pub fn put_file(&self, path: &str, data: impl Into<Bytes>) {
        let path = Self::key(path);
        let name = Path::from_str(&path).map(|p| p.name().to_string()).unwrap_or_default();
        self.ns
            .lock()
            .nodes
            .insert(path, Self::node(&name, FileType::File, data.into()));
    }

    pub fn forbid(&self, path: &str) {
        self.ns.lock().forbidden.push(Self::key(path));
    }

    pub fn status(&self, path: &str) -> Option<FileStatus> {
        self.ns.lock().nodes.get(&Self::key(path)).map(|n| n.status.clone())
    }

    pub fn data(&self, path: &str) -> Option<Bytes> {
        self.ns.lock().nodes.get(&Self::key(path)).map(|n| n.data.clone())
    }

    pub fn requests(&self) -> Vec<(Method, String, HashMap<String, String>)> {
        self.ns.lock().requests.clone()
    }

    fn key(path: &str) -> String {
        match Path::from_str(path) {
            Ok(p) => p.path().to_string(),
            Err(_) => path.to_string(),
        }
    }
}

async fn handle_root(
    State(ns): State<SharedNamespace>,
    method: Method,
    Query(params): Query<HashMap<String, String>>,
    body: Bytes,
) -> Response {
    handle(ns, method, "/".to_string(), params, body)
}

async fn handle_path(
    State(ns): State<SharedNamespace>,
    method: Method,
    UrlPath(path): UrlPath<String>,
    Query(params): Query<HashMap<String, String>>,
    body: Bytes,
) -> Response {
    handle(ns, method, StubServer::key(&format!("/{}", path)), params, body)
}

fn remote(status: StatusCode, exception: &str, message: String) -> Response {
    let body = json!({
        "RemoteException": {
            "exception": exception,
            "javaClassName": format!("java.io.{}", exception),
            "message": message,
        }
    });
    (status, Json(body)).into_response()
}

fn not_found(path: &str) -> Response {
    remote(
        StatusCode::NOT_FOUND,
        "FileNotFoundException",
        format!("File {} does not exist.", path),
    )
}

fn boolean(v: bool) -> Response {
    Json(json!({ "boolean": v })).into_response()
}

fn handle(
    ns: SharedNamespace,
    method: Method,
    path: String,
    params: HashMap<String, String>,
    body: Bytes,
) -> Response {
    let mut ns = ns.lock();
    ns.requests.push((method.clone(), path.clone(), params.clone()));

    if ns.forbidden.contains(&path) {
        return StatusCode::FORBIDDEN.into_response();
    }

    let op = match params.get("op").and_then(|x| OpKind::from_name(x)) {
        Some(op) => op,
        None => {
            return remote(
                StatusCode::BAD_REQUEST,
                "IllegalArgumentException",
                format!("Invalid value for webhdfs parameter \"op\": {:?}", params.get("op")),
            )
        }
    };
    if op.method().as_str() != method.as_str() {
        return remote(
            StatusCode::BAD_REQUEST,
            "IllegalArgumentException",
            format!("{} is not a {} operation", op, method),
        );
    }

    match op {
        OpKind::GetFileStatus => match ns.nodes.get(&path) {
            Some(node) => {
                let mut status = node.status.clone();
                status.name = String::new();
                Json(json!({ "FileStatus": status })).into_response()
            }
            None => not_found(&path),
        },

        OpKind::ListStatus => {
            let node = match ns.nodes.get(&path) {
                Some(v) => v,
                None => return not_found(&path),
            };
            if !node.status.is_dir() {
                return Json(json!({ "FileStatuses": { "FileStatus": [node.status] } }))
                    .into_response();
            }
            let children: Vec<&FileStatus> = ns
                .nodes
                .iter()
                .filter(|(k, _)| {
                    Path::from_str(k.as_str())
                        .ok()
                        .and_then(|p| p.parent())
                        .map(|p| p.path() == path)
                        .unwrap_or(false)
                })
                .map(|(_, v)| &v.status)
                .collect();
            Json(json!({ "FileStatuses": { "FileStatus": children } })).into_response()
        }

        OpKind::GetBlockLocations => match ns.nodes.get(&path) {
            Some(node) if !node.status.is_dir() => {
                let len = node.data.len() as u64;
                let blocks: Vec<Value> = if len == 0 {
                    vec![]
                } else {
                    vec![json!({
                        "startOffset": 0,
                        "block": {"blockId": 1073741825, "blockPoolId": "BP-1", "generationStamp": 1001, "numBytes": len},
                        "locations": [{"hostName": "dn1", "ipAddr": "10.0.0.1", "xferPort": 9866, "infoPort": 9864}],
                        "isCorrupt": false
                    })]
                };
                Json(json!({
                    "LocatedBlocks": {
                        "fileLength": len,
                        "locatedBlocks": blocks,
                        "isUnderConstruction": false,
                        "isLastBlockComplete": true
                    }
                }))
                .into_response()
            }
            Some(_) => remote(
                StatusCode::BAD_REQUEST,
                "FileNotFoundException",
                format!("Path is not a file: {}", path),
            ),
            None => not_found(&path),
        },

        OpKind::Open => {
            let node = match ns.nodes.get(&path) {
                Some(v) if !v.status.is_dir() => v,
                _ => return not_found(&path),
            };
            let offset = params
                .get("offset")
                .and_then(|x| x.parse::<usize>().ok())
                .unwrap_or(0)
                .min(node.data.len());
            let end = match params.get("length").and_then(|x| x.parse::<usize>().ok()) {
                Some(len) => offset.saturating_add(len).min(node.data.len()),
                None => node.data.len(),
            };
            (StatusCode::OK, node.data.slice(offset..end)).into_response()
        }

        OpKind::Mkdirs => {
            let target = match Path::from_str(&path) {
                Ok(v) => v,
                Err(e) => return remote(StatusCode::BAD_REQUEST, "InvalidPathException", e.to_string()),
            };
            for p in target.ancestors() {
                if let Some(node) = ns.nodes.get(p.path()) {
                    if !node.status.is_dir() {
                        return remote(
                            StatusCode::FORBIDDEN,
                            "ParentNotDirectoryException",
                            format!("{} (is not a directory)", p),
                        );
                    }
                    continue;
                }
                let mut node = StubServer::node(p.name(), FileType::Directory, Bytes::new());
                if let Some(perm) = params.get("permission") {
                    if let Ok(v) = OctalPermission::from_str(perm) {
                        node.status.permission = v;
                    }
                }
                ns.nodes.insert(p.path().to_string(), node);
            }
            boolean(true)
        }

        OpKind::Create => {
            let overwrite = params.get("overwrite").map(|x| x == "true").unwrap_or(false);
            if ns.nodes.contains_key(&path) && !overwrite {
                return remote(
                    StatusCode::FORBIDDEN,
                    "FileAlreadyExistsException",
                    format!("{} for client 127.0.0.1 already exists", path),
                );
            }
            let name = Path::from_str(&path).map(|p| p.name().to_string()).unwrap_or_default();
            ns.nodes.insert(path, StubServer::node(&name, FileType::File, body));
            StatusCode::CREATED.into_response()
        }

        OpKind::SetPermission => {
            let perm = params
                .get("permission")
                .and_then(|x| OctalPermission::from_str(x).ok());
            match (ns.nodes.get_mut(&path), perm) {
                (Some(node), Some(perm)) => {
                    node.status.permission = perm;
                    StatusCode::OK.into_response()
                }
                (None, _) => not_found(&path),
                (_, None) => remote(
                    StatusCode::BAD_REQUEST,
                    "IllegalArgumentException",
                    format!("Invalid value for webhdfs parameter \"permission\": {:?}", params.get("permission")),
                ),
            }
        }

        OpKind::SetOwner => {
            let user = params.get("user.name").cloned().unwrap_or_default();
            let node = match ns.nodes.get_mut(&path) {
                Some(v) => v,
                None => return not_found(&path),
            };
            if user != "hdfs" {
                return remote(
                    StatusCode::FORBIDDEN,
                    "AccessControlException",
                    format!("Permission denied. user={} is not the owner of inode={}", user, path),
                );
            }
            if let Some(owner) = params.get("owner") {
                node.status.owner = owner.clone();
            }
            if let Some(group) = params.get("group") {
                node.status.group = group.clone();
            }
            StatusCode::OK.into_response()
        }

        OpKind::SetReplication => {
            let replication = params
                .get("replication")
                .and_then(|x| x.parse::<u16>().ok())
                .unwrap_or(0);
            match ns.nodes.get_mut(&path) {
                Some(node) if node.status.is_dir() => boolean(false),
                Some(node) => {
                    node.status.replication = replication;
                    boolean(true)
                }
                None => not_found(&path),
            }
        }
    }
}
