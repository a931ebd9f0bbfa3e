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

use crate::{GatewayReply, GatewayRequest};
use bytes::Bytes;
use std::future::Future;
use webfs_common::fs::{OpKind, Path};
use webfs_common::state::{FileStatus, FileStatuses, LocatedBlocks, OctalPermission};
use webfs_common::FsResult;

/// A WebHDFS style gateway.
///
/// `call` issues exactly one request and never retries. It resolves to `Ok`
/// only for a 2xx answer; everything else is a `Transport` or `Gateway`
/// error. The typed helpers decode the success envelope of each operation.
pub trait Gateway: Send + Sync {
    fn call(&self, req: GatewayRequest) -> impl Future<Output = FsResult<GatewayReply>> + Send;

    fn get_file_status(&self, path: &Path) -> impl Future<Output = FsResult<FileStatus>> + Send {
        async move {
            let reply = self
                .call(GatewayRequest::new(OpKind::GetFileStatus, path))
                .await?;
            reply.payload(OpKind::GetFileStatus)
        }
    }

    fn list_status(&self, path: &Path) -> impl Future<Output = FsResult<Vec<FileStatus>>> + Send {
        async move {
            let reply = self
                .call(GatewayRequest::new(OpKind::ListStatus, path))
                .await?;
            let list: FileStatuses = reply.payload(OpKind::ListStatus)?;
            Ok(list.file_status)
        }
    }

    fn get_block_locations(
        &self,
        path: &Path,
    ) -> impl Future<Output = FsResult<LocatedBlocks>> + Send {
        async move {
            let reply = self
                .call(GatewayRequest::new(OpKind::GetBlockLocations, path))
                .await?;
            reply.payload(OpKind::GetBlockLocations)
        }
    }

    // Read `length` bytes from `offset`. None means the start of the file and
    // the rest of the file respectively.
    fn open(
        &self,
        path: &Path,
        offset: Option<u64>,
        length: Option<u64>,
    ) -> impl Future<Output = FsResult<Bytes>> + Send {
        async move {
            let req = GatewayRequest::new(OpKind::Open, path)
                .opt_param("offset", offset)
                .opt_param("length", length);
            let reply = self.call(req).await?;
            Ok(reply.body)
        }
    }

    fn mkdirs(
        &self,
        path: &Path,
        permission: Option<OctalPermission>,
    ) -> impl Future<Output = FsResult<bool>> + Send {
        async move {
            let req = GatewayRequest::new(OpKind::Mkdirs, path).opt_param("permission", permission);
            let reply = self.call(req).await?;
            reply.payload(OpKind::Mkdirs)
        }
    }

    fn create(
        &self,
        path: &Path,
        data: Bytes,
        overwrite: bool,
    ) -> impl Future<Output = FsResult<()>> + Send {
        async move {
            let req = GatewayRequest::new(OpKind::Create, path)
                .param("overwrite", overwrite)
                .with_body(data);
            let reply = self.call(req).await?;
            reply.check()
        }
    }

    fn set_permission(
        &self,
        path: &Path,
        permission: OctalPermission,
    ) -> impl Future<Output = FsResult<()>> + Send {
        async move {
            let req = GatewayRequest::new(OpKind::SetPermission, path).param("permission", permission);
            let reply = self.call(req).await?;
            reply.check()
        }
    }

    fn set_owner(
        &self,
        path: &Path,
        owner: Option<&str>,
        group: Option<&str>,
    ) -> impl Future<Output = FsResult<()>> + Send {
        async move {
            let req = GatewayRequest::new(OpKind::SetOwner, path)
                .opt_param("owner", owner.filter(|x| !x.is_empty()))
                .opt_param("group", group.filter(|x| !x.is_empty()));
            let reply = self.call(req).await?;
            reply.check()
        }
    }

    fn set_replication(
        &self,
        path: &Path,
        replication: u16,
    ) -> impl Future<Output = FsResult<bool>> + Send {
        async move {
            let req =
                GatewayRequest::new(OpKind::SetReplication, path).param("replication", replication);
            let reply = self.call(req).await?;
            reply.payload(OpKind::SetReplication)
        }
    }
}
