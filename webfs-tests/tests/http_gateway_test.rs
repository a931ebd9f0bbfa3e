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
use std::sync::Arc;
use webfs_client::{Gateway, HttpGateway};
use webfs_common::conf::{ExplorerConf, GatewayConf};
use webfs_common::error::{ErrorClassifier, ErrorKind};
use webfs_common::fs::Path;
use webfs_common::state::{FileType, OctalPermission};
use webfs_console::context::View;
use webfs_console::{Console, MutationOutcome, NavOutcome, UploadFile};
use webfs_tests::{JsonRenderer, RecordingSurface, StubServer, Testing};
use webfs_util::error::ErrorExt;
use webfs_util::CommonResult;

#[test]
fn list_and_status() -> CommonResult<()> {
    let rt = Testing::multi_runtime()?;
    rt.block_on(async {
        let stub = StubServer::start().await?;
        stub.put_dir("/user");
        stub.put_file("/user/a b.txt", "hello");
        stub.put_file("/user/c#1", "x");
        let gw = HttpGateway::new(stub.gateway_conf("hdfs")?)?;

        let root = gw.list_status(&Path::root()).await?;
        assert_eq!(root.len(), 1);
        assert_eq!(root[0].name, "user");
        assert_eq!(root[0].file_type, FileType::Directory);

        let list = gw.list_status(&Path::from_str("/user")?).await?;
        let names: Vec<&str> = list.iter().map(|x| x.name.as_str()).collect();
        assert_eq!(names, vec!["a b.txt", "c#1"]);

        let status = gw.get_file_status(&Path::from_str("/user/a b.txt")?).await?;
        assert_eq!(status.length, 5);
        assert_eq!(status.name, "");

        let (method, path, params) = stub.requests().pop().unwrap();
        assert_eq!(method.as_str(), "GET");
        assert_eq!(path, "/user/a b.txt");
        assert_eq!(params.get("op").map(|x| x.as_str()), Some("GETFILESTATUS"));
        assert_eq!(params.get("user.name").map(|x| x.as_str()), Some("hdfs"));
        CommonResult::Ok(())
    })
}

#[test]
fn open_and_blocks() -> CommonResult<()> {
    let rt = Testing::multi_runtime()?;
    rt.block_on(async {
        let stub = StubServer::start().await?;
        stub.put_file("/a.log", "0123456789");
        let gw = HttpGateway::new(stub.gateway_conf("")?)?;
        let path = Path::from_str("/a.log")?;

        assert_eq!(gw.open(&path, None, None).await?, Bytes::from("0123456789"));
        assert_eq!(gw.open(&path, Some(6), None).await?, Bytes::from("6789"));
        assert_eq!(gw.open(&path, Some(2), Some(3)).await?, Bytes::from("234"));
        assert_eq!(gw.open(&path, Some(8), Some(5)).await?, Bytes::from("89"));

        let blocks = gw.get_block_locations(&path).await?;
        assert_eq!(blocks.file_length, 10);
        assert_eq!(blocks.block_num(), 1);
        assert_eq!(blocks.located_blocks[0].hosts(), vec!["dn1"]);
        blocks.check_contiguous()?;

        let (_, _, params) = stub.requests().remove(1);
        assert_eq!(params.get("offset").map(|x| x.as_str()), Some("6"));
        assert!(params.get("user.name").is_none());
        CommonResult::Ok(())
    })
}

#[test]
fn error_classification() -> CommonResult<()> {
    let rt = Testing::multi_runtime()?;
    rt.block_on(async {
        let stub = StubServer::start().await?;
        stub.put_dir("/secret");
        stub.forbid("/secret");
        let gw = HttpGateway::new(stub.gateway_conf("")?)?;

        let err = gw
            .list_status(&Path::from_str("/nope")?)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Gateway);
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.remote().unwrap().exception, "FileNotFoundException");
        let msg = ErrorClassifier::classify_error(&err);
        assert_eq!(msg.text, "File /nope does not exist.");
        assert!(!err.should_retry());

        let err = gw
            .list_status(&Path::from_str("/secret")?)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert_eq!(err.status(), Some(403));
        let url = err.url().unwrap().to_string();
        assert!(url.ends_with("/webhdfs/v1/secret?op=LISTSTATUS"));
        let msg = ErrorClassifier::classify_error(&err);
        assert_eq!(
            msg.text,
            format!("Permission denied when trying to open {}: Forbidden", url)
        );
        CommonResult::Ok(())
    })
}

#[test]
fn unreachable_gateway() -> CommonResult<()> {
    let rt = Testing::multi_runtime()?;
    let mut conf = GatewayConf {
        address: "http://127.0.0.1:1".to_string(),
        conn_timeout_ms: 2000,
        ..Default::default()
    };
    conf.init()?;
    let gw = HttpGateway::new(conf)?;

    let err = rt.block_on(gw.list_status(&Path::root())).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
    assert_eq!(err.status(), None);
    assert!(err.should_retry());

    let msg = ErrorClassifier::classify_error(&err);
    assert!(msg
        .text
        .starts_with("Failed to retrieve data from http://127.0.0.1:1/webhdfs/v1/?op=LISTSTATUS: "));
    Ok(())
}

#[test]
fn write_operations() -> CommonResult<()> {
    let rt = Testing::multi_runtime()?;
    rt.block_on(async {
        let stub = StubServer::start().await?;
        let gw = HttpGateway::new(stub.gateway_conf("hdfs")?)?;
        let dir = Path::from_str("/a/b")?;
        let file = dir.join("f.txt")?;

        assert!(gw.mkdirs(&dir, Some(OctalPermission::new(700)?)).await?);
        assert_eq!(stub.status("/a/b").unwrap().permission.value(), 700);
        assert!(stub.status("/a").unwrap().is_dir());

        gw.create(&file, Bytes::from("data"), false).await?;
        assert_eq!(stub.data("/a/b/f.txt").unwrap(), Bytes::from("data"));

        let err = gw.create(&file, Bytes::from("new"), false).await.unwrap_err();
        assert_eq!(err.status(), Some(403));
        assert!(err.to_string().contains("already exists"));
        gw.create(&file, Bytes::from("new"), true).await?;
        assert_eq!(stub.data("/a/b/f.txt").unwrap(), Bytes::from("new"));

        gw.set_permission(&file, OctalPermission::new(600)?).await?;
        gw.set_owner(&file, Some("alice"), Some("")).await?;
        assert!(gw.set_replication(&file, 2).await?);
        assert!(!gw.set_replication(&dir, 2).await?);

        let status = stub.status("/a/b/f.txt").unwrap();
        assert_eq!(status.permission.value(), 600);
        assert_eq!(status.owner, "alice");
        assert_eq!(status.group, "supergroup");
        assert_eq!(status.replication, 2);

        let (method, _, params) = stub.requests().pop().unwrap();
        assert_eq!(method.as_str(), "PUT");
        assert_eq!(params.get("replication").map(|x| x.as_str()), Some("2"));
        CommonResult::Ok(())
    })
}

#[test]
fn set_owner_denied() -> CommonResult<()> {
    let rt = Testing::multi_runtime()?;
    rt.block_on(async {
        let stub = StubServer::start().await?;
        stub.put_file("/a.txt", "a");
        let gw = HttpGateway::new(stub.gateway_conf("dr.who")?)?;

        let err = gw
            .set_owner(&Path::from_str("/a.txt")?, Some("alice"), None)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Gateway);
        let msg = ErrorClassifier::classify_error(&err);
        assert!(msg.text.starts_with("Permission denied. user=dr.who"));
        assert_eq!(msg.status, Some(403));
        CommonResult::Ok(())
    })
}

#[test]
fn console_over_http() -> CommonResult<()> {
    let rt = Testing::multi_runtime()?;
    rt.block_on(async {
        let stub = StubServer::start().await?;
        stub.put_dir("/user");
        let gw = Arc::new(HttpGateway::new(stub.gateway_conf("hdfs")?)?);
        let surface = Arc::new(RecordingSurface::new());
        let console = Console::new(
            gw,
            Arc::new(JsonRenderer::new()),
            surface.clone(),
            ExplorerConf::default(),
        );

        assert_eq!(
            console.start(Some("#/user")).await,
            NavOutcome::Committed(Path::from_str("/user")?)
        );
        let files = vec![UploadFile::new("x.txt", "0123456789")];
        assert_eq!(
            console.submit_upload("/user", files).await,
            MutationOutcome::Applied
        );
        assert_eq!(console.listing()[0].name, "x.txt");

        assert_eq!(
            console.select_entry("x.txt", FileType::File).await,
            NavOutcome::Selected(Path::from_str("/user/x.txt")?)
        );
        let view = surface.last_view(View::FileInfo).unwrap();
        assert_eq!(view["size"], "10B");
        assert_eq!(view["blocks"]["menu"][0]["hosts"][0], "dn1");

        console.preview_tail("/user/x.txt", 10).await;
        let view = surface.last_view(View::FilePreview).unwrap();
        assert_eq!(view["text"], "0123456789");

        assert_eq!(
            console.submit_chown("/user/x.txt", "alice", "").await,
            MutationOutcome::Applied
        );
        assert_eq!(stub.status("/user/x.txt").unwrap().owner, "alice");
        assert_eq!(console.listing()[0].owner, "alice");

        assert_eq!(
            console.submit_mkdir("/user", "logs").await,
            MutationOutcome::Applied
        );
        assert_eq!(console.listing().len(), 2);
        assert!(surface.alerts().is_empty());
        CommonResult::Ok(())
    })
}
