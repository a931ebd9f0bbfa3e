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
use serde::de::DeserializeOwned;
use webfs_common::error::FsError;
use webfs_common::fs::OpKind;
use webfs_common::state::GatewayEnvelope;
use webfs_common::FsResult;

/// A 2xx answer of the gateway.
#[derive(Debug, Clone)]
pub struct GatewayReply {
    pub url: String,
    pub status: u16,
    pub body: Bytes,
}

impl GatewayReply {
    pub fn new(url: impl Into<String>, status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            url: url.into(),
            status,
            body: body.into(),
        }
    }

    pub fn json(url: impl Into<String>, value: &serde_json::Value) -> Self {
        Self::new(url, 200, value.to_string())
    }

    pub fn envelope(&self) -> FsResult<GatewayEnvelope> {
        GatewayEnvelope::parse(&self.body)
    }

    // Decode the success payload of `op`, a RemoteException becomes a gateway error.
    pub fn payload<T: DeserializeOwned>(&self, op: OpKind) -> FsResult<T> {
        let key = match op.response_key() {
            Some(v) => v,
            None => {
                return Err(FsError::abnormal_data(format!(
                    "{} has no json payload",
                    op
                )))
            }
        };

        match self.envelope()? {
            GatewayEnvelope::Remote(e) => Err(FsError::gateway(&self.url, self.status, e)),
            env => env.into_payload(key),
        }
    }

    // For operations without a payload: only a RemoteException body is an error.
    pub fn check(&self) -> FsResult<()> {
        match GatewayEnvelope::remote_exception(&self.body) {
            Some(e) => Err(FsError::gateway(&self.url, self.status, e)),
            None => Ok(()),
        }
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }
}
