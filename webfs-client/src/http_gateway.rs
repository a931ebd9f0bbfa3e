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

use crate::{Gateway, GatewayReply, GatewayRequest};
use bytes::Bytes;
use log::{debug, warn};
use reqwest::Client;
use std::future::Future;
use webfs_common::conf::GatewayConf;
use webfs_common::error::FsError;
use webfs_common::fs::HttpMethod;
use webfs_common::state::GatewayEnvelope;
use webfs_common::FsResult;

/// Gateway backed by a reqwest client.
///
/// Redirects are followed, which is how WebHDFS hands a CREATE or OPEN over
/// to a datanode. The request timeout, if configured, covers the whole
/// exchange and surfaces as a `Transport` error without a status.
#[derive(Clone)]
pub struct HttpGateway {
    conf: GatewayConf,
    client: Client,
}

impl HttpGateway {
    pub fn new(conf: GatewayConf) -> FsResult<Self> {
        let mut builder = Client::builder().connect_timeout(conf.conn_timeout());
        if let Some(timeout) = conf.request_timeout() {
            builder = builder.timeout(timeout);
        }

        let client = match builder.build() {
            Ok(client) => client,
            Err(e) => return Err(FsError::common(format!("Failed to create HTTP client: {}", e))),
        };

        Ok(Self { conf, client })
    }

    pub fn conf(&self) -> &GatewayConf {
        &self.conf
    }

    async fn send(&self, req: GatewayRequest) -> FsResult<GatewayReply> {
        let url = req.build_url(&self.conf)?;
        let url_str = url.to_string();
        let method = req.method();

        let builder = match method {
            HttpMethod::Get => self.client.get(url),
            HttpMethod::Put => self
                .client
                .put(url)
                .body(req.body.unwrap_or_else(Bytes::new)),
        };

        let response = match builder.send().await {
            Ok(resp) => resp,
            Err(e) => {
                let cause = if e.is_timeout() {
                    format!("request timed out after {}ms", self.conf.request_timeout_ms)
                } else {
                    e.to_string()
                };
                warn!("{} {} failed: {}", method, url_str, cause);
                return Err(FsError::transport(url_str, None, cause));
            }
        };

        let status = response.status();
        let body = match response.bytes().await {
            Ok(v) => v,
            Err(e) => {
                warn!("{} {} failed to read body: {}", method, url_str, e);
                return Err(FsError::transport(url_str, Some(status.as_u16()), e.to_string()));
            }
        };
        debug!("{} {} -> {}, {} bytes", method, url_str, status, body.len());

        if status.is_success() {
            return Ok(GatewayReply::new(url_str, status.as_u16(), body));
        }

        match GatewayEnvelope::remote_exception(&body) {
            Some(e) => Err(FsError::gateway(url_str, status.as_u16(), e)),
            None => {
                let reason = status.canonical_reason().unwrap_or("Unknown status");
                Err(FsError::transport(url_str, Some(status.as_u16()), reason))
            }
        }
    }
}

impl Gateway for HttpGateway {
    fn call(&self, req: GatewayRequest) -> impl Future<Output = FsResult<GatewayReply>> + Send {
        self.send(req)
    }
}
