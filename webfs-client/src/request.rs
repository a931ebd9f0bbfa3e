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
use reqwest::Url;
use webfs_common::conf::GatewayConf;
use webfs_common::error::FsError;
use webfs_common::fs::{HttpMethod, OpKind, Path};
use webfs_common::FsResult;

/// One gateway operation on one path.
#[derive(Debug, Clone)]
pub struct GatewayRequest {
    pub op: OpKind,
    pub path: Path,
    pub params: Vec<(String, String)>,
    pub body: Option<Bytes>,
}

impl GatewayRequest {
    pub const PARAM_OP: &'static str = "op";

    pub const PARAM_USER_NAME: &'static str = "user.name";

    pub fn new(op: OpKind, path: &Path) -> Self {
        Self {
            op,
            path: path.clone(),
            params: vec![],
            body: None,
        }
    }

    pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.push((key.into(), value.to_string()));
        self
    }

    pub fn opt_param<T: ToString>(self, key: impl Into<String>, value: Option<T>) -> Self {
        match value {
            Some(v) => self.param(key, v),
            None => self,
        }
    }

    pub fn with_body(mut self, body: Bytes) -> Self {
        self.body = Some(body);
        self
    }

    pub fn get_param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn method(&self) -> HttpMethod {
        self.op.method()
    }

    // <address><prefix><path>?op=<OP>[&user.name=<u>]&<k>=<v>...
    pub fn build_url(&self, conf: &GatewayConf) -> FsResult<Url> {
        let base = conf.base_url();
        let mut url = Url::parse(&base)
            .map_err(|e| FsError::common(format!("invalid gateway url {}: {}", base, e)))?;

        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                FsError::common(format!("gateway url {} cannot carry a path", base))
            })?;
            segments.pop_if_empty();
            if self.path.is_root() {
                segments.push("");
            } else {
                segments.extend(self.path.components());
            }
        }

        {
            let mut query = url.query_pairs_mut();
            query.append_pair(Self::PARAM_OP, self.op.as_str());
            if let Some(user) = conf.user_name() {
                query.append_pair(Self::PARAM_USER_NAME, user);
            }
            for (k, v) in &self.params {
                query.append_pair(k, v);
            }
        }

        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use crate::GatewayRequest;
    use webfs_common::conf::GatewayConf;
    use webfs_common::fs::{HttpMethod, OpKind, Path};
    use webfs_common::FsResult;

    fn conf(user: &str) -> GatewayConf {
        let mut conf = GatewayConf {
            address: "http://nn:9870/".to_string(),
            user_name: user.to_string(),
            ..Default::default()
        };
        conf.init().unwrap();
        conf
    }

    #[test]
    fn list_url() -> FsResult<()> {
        let req = GatewayRequest::new(OpKind::ListStatus, &Path::new("/user/alice")?);
        let url = req.build_url(&conf(""))?;
        assert_eq!(
            url.as_str(),
            "http://nn:9870/webhdfs/v1/user/alice?op=LISTSTATUS"
        );
        assert_eq!(req.method(), HttpMethod::Get);

        let req = GatewayRequest::new(OpKind::ListStatus, &Path::root());
        let url = req.build_url(&conf(""))?;
        assert_eq!(url.as_str(), "http://nn:9870/webhdfs/v1/?op=LISTSTATUS");
        Ok(())
    }

    #[test]
    fn params_and_user() -> FsResult<()> {
        let req = GatewayRequest::new(OpKind::SetOwner, &Path::new("/a b/c#1")?)
            .param("owner", "bob")
            .opt_param::<&str>("group", None);
        let url = req.build_url(&conf("alice"))?;
        assert_eq!(
            url.as_str(),
            "http://nn:9870/webhdfs/v1/a%20b/c%231?op=SETOWNER&user.name=alice&owner=bob"
        );
        assert_eq!(req.method(), HttpMethod::Put);
        assert_eq!(req.get_param("owner"), Some("bob"));
        assert_eq!(req.get_param("group"), None);
        Ok(())
    }
}
