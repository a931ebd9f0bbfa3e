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

use crate::error::FsError;
use crate::FsResult;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RemoteException {
    pub exception: String,
    pub java_class_name: String,
    pub message: String,
}

/// A decoded gateway JSON body: `{ <Key>: payload }` or
/// `{ "RemoteException": {...} }`, never both.
#[derive(Debug, Clone, PartialEq)]
pub enum GatewayEnvelope {
    Payload(Map<String, Value>),
    Remote(RemoteException),
}

impl GatewayEnvelope {
    pub const REMOTE_EXCEPTION: &'static str = "RemoteException";

    pub fn parse(body: &[u8]) -> FsResult<Self> {
        let value: Value = serde_json::from_slice(body)?;
        let mut map = match value {
            Value::Object(map) => map,
            v => {
                return Err(FsError::abnormal_data(format!(
                    "gateway response is not a JSON object: {}",
                    v
                )))
            }
        };

        match map.remove(Self::REMOTE_EXCEPTION) {
            None => Ok(GatewayEnvelope::Payload(map)),
            Some(_) if !map.is_empty() => Err(FsError::abnormal_data(
                "gateway response carries both a payload and a RemoteException",
            )),
            Some(v) => Ok(GatewayEnvelope::Remote(serde_json::from_value(v)?)),
        }
    }

    // The RemoteException of an error body, None for anything else.
    pub fn remote_exception(body: &[u8]) -> Option<RemoteException> {
        match Self::parse(body) {
            Ok(GatewayEnvelope::Remote(e)) => Some(e),
            _ => None,
        }
    }

    pub fn into_payload<T: DeserializeOwned>(self, key: &str) -> FsResult<T> {
        match self {
            GatewayEnvelope::Payload(mut map) => match map.remove(key) {
                Some(v) => Ok(serde_json::from_value(v)?),
                None => Err(FsError::abnormal_data(format!(
                    "gateway response has no {} field",
                    key
                ))),
            },

            GatewayEnvelope::Remote(e) => Err(FsError::abnormal_data(format!(
                "expected {}, got RemoteException {}: {}",
                key, e.exception, e.message
            ))),
        }
    }
}
