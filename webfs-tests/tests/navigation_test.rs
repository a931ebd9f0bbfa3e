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

use std::sync::Arc;
use webfs_common::conf::ExplorerConf;
use webfs_common::error::{DisplayMessage, ErrorClassifier};
use webfs_common::fs::{OpKind, Path};
use webfs_common::state::FileType;
use webfs_console::context::{Control, View};
use webfs_console::{NavOutcome, NavPhase};
use webfs_tests::{JsonRenderer, Testing};
use webfs_util::CommonResult;

fn path(s: &str) -> Path {
    Path::from_str(s).unwrap()
}

#[test]
fn start_at_home() -> CommonResult<()> {
    let rt = Testing::runtime()?;
    let t = Testing::console();
    t.gateway
        .listing("/", vec![Testing::dir("user"), Testing::file("a.txt", 10)]);

    let res = rt.block_on(t.console.start(None));
    assert_eq!(res, NavOutcome::Committed(Path::root()));

    let state = t.console.state();
    assert_eq!(state.phase, NavPhase::Loaded);
    assert!(state.current_dir.is_root());
    assert_eq!(t.console.listing().len(), 2);
    assert_eq!(t.surface.addresses(), vec!["/"]);

    let view = t.surface.last_view(View::Explorer).unwrap();
    assert_eq!(view["dir"], "/");
    assert_eq!(view["rows"].as_array().unwrap().len(), 2);
    assert_eq!(view["rows"][0]["path"], "/user");
    Ok(())
}

#[test]
fn start_from_hash_or_conf() -> CommonResult<()> {
    let rt = Testing::runtime()?;
    let conf = ExplorerConf {
        home_dir: "/user/alice".to_string(),
        ..Default::default()
    };
    let t = Testing::console_with(conf, Arc::new(JsonRenderer::new()));
    t.gateway.listing("/user/alice", vec![]);
    t.gateway.listing("/tmp", vec![]);

    let res = rt.block_on(t.console.start(Some("")));
    assert_eq!(res, NavOutcome::Committed(path("/user/alice")));

    let res = rt.block_on(t.console.start(Some("#/tmp")));
    assert_eq!(res, NavOutcome::Committed(path("/tmp")));
    Ok(())
}

#[test]
fn navigate_is_idempotent() -> CommonResult<()> {
    let rt = Testing::runtime()?;
    let t = Testing::console();
    t.gateway.listing("/user", vec![Testing::dir("alice")]);

    rt.block_on(async {
        assert_eq!(
            t.console.navigate("/user").await,
            NavOutcome::Committed(path("/user"))
        );
        assert_eq!(t.console.navigate("/user/").await, NavOutcome::Unchanged);
        assert_eq!(t.gateway.calls_of(OpKind::ListStatus).len(), 1);

        assert_eq!(
            t.console.refresh().await,
            NavOutcome::Committed(path("/user"))
        );
        assert_eq!(t.gateway.calls_of(OpKind::ListStatus).len(), 2);
    });
    Ok(())
}

#[test]
fn hash_echo_is_ignored() -> CommonResult<()> {
    let rt = Testing::runtime()?;
    let t = Testing::console();
    t.gateway.listing("/a", vec![]);
    t.gateway.listing("/b", vec![]);
    t.gateway.listing("/c", vec![]);

    rt.block_on(async {
        t.console.navigate("/a").await;
        t.console.navigate("/b").await;

        // Both updates come back late, in order.
        assert_eq!(t.console.on_hash_change("#/a").await, NavOutcome::Unchanged);
        assert_eq!(t.console.on_hash_change("#/b").await, NavOutcome::Unchanged);
        assert_eq!(t.console.state().current_dir, path("/b"));
        assert_eq!(t.gateway.call_paths(OpKind::ListStatus), vec!["/a", "/b"]);

        // A fragment typed by the user.
        assert_eq!(
            t.console.on_hash_change("#/c").await,
            NavOutcome::Committed(path("/c"))
        );
        assert_eq!(t.console.on_hash_change("#/c").await, NavOutcome::Unchanged);
        assert_eq!(t.console.on_hash_change("/c").await, NavOutcome::Unchanged);
    });
    Ok(())
}

#[test]
fn back_and_forward_through_history() -> CommonResult<()> {
    let rt = Testing::runtime()?;
    let t = Testing::console();
    t.gateway.listing("/a", vec![]);
    t.gateway.listing("/b", vec![]);

    rt.block_on(async {
        // Fragments typed by the user, the address already shows them.
        assert_eq!(
            t.console.on_hash_change("#/a").await,
            NavOutcome::Committed(path("/a"))
        );
        assert_eq!(
            t.console.on_hash_change("#/b").await,
            NavOutcome::Committed(path("/b"))
        );
        assert!(t.surface.addresses().is_empty());

        // Back, then forward.
        assert_eq!(
            t.console.on_hash_change("#/a").await,
            NavOutcome::Committed(path("/a"))
        );
        assert_eq!(t.console.state().current_dir, path("/a"));
        assert_eq!(
            t.console.on_hash_change("#/b").await,
            NavOutcome::Committed(path("/b"))
        );
    });
    assert_eq!(
        t.gateway.call_paths(OpKind::ListStatus),
        vec!["/a", "/b", "/a", "/b"]
    );
    Ok(())
}

#[test]
fn refresh_publishes_no_address() -> CommonResult<()> {
    let rt = Testing::runtime()?;
    let t = Testing::console();
    t.gateway.listing("/a", vec![]);
    t.gateway.listing("/b", vec![]);

    rt.block_on(async {
        t.console.navigate("/a").await;
        assert_eq!(t.console.on_hash_change("#/a").await, NavOutcome::Unchanged);

        // The address stays /a, no change event follows.
        assert_eq!(t.console.refresh().await, NavOutcome::Committed(path("/a")));

        t.console.navigate("/b").await;
        assert_eq!(t.console.on_hash_change("#/b").await, NavOutcome::Unchanged);

        // Back button.
        assert_eq!(
            t.console.on_hash_change("#/a").await,
            NavOutcome::Committed(path("/a"))
        );
    });
    assert_eq!(t.surface.addresses(), vec!["/a", "/b"]);
    assert_eq!(t.console.state().current_dir, path("/a"));
    Ok(())
}

#[test]
fn failure_keeps_directory() -> CommonResult<()> {
    let rt = Testing::runtime()?;
    let t = Testing::console();
    t.gateway.listing("/user", vec![]);
    t.gateway
        .fail_status(OpKind::ListStatus, "/gone", 404, "Not Found");

    rt.block_on(async {
        t.console.navigate("/user").await;
        let res = t.console.navigate("/missing").await;
        let expect = DisplayMessage::new("File /missing does not exist.", Some(404));
        assert_eq!(res, NavOutcome::Failed(expect.clone()));
        assert_eq!(t.console.alert(), Some(expect));

        let state = t.console.state();
        assert_eq!(state.current_dir, path("/user"));
        assert_eq!(state.phase, NavPhase::Failed);
        assert_eq!(t.surface.addresses(), vec!["/user"]);

        let res = t.console.navigate("/gone").await;
        assert_eq!(
            res,
            NavOutcome::Failed(DisplayMessage::new(ErrorClassifier::NOT_FOUND, Some(404)))
        );

        // The current directory loads again after a failure.
        assert_eq!(
            t.console.navigate("/user").await,
            NavOutcome::Committed(path("/user"))
        );
    });
    assert_eq!(t.surface.alerts().len(), 2);
    Ok(())
}

#[test]
fn hash_change_hides_alert() -> CommonResult<()> {
    let rt = Testing::runtime()?;
    let t = Testing::console();
    t.gateway.listing("/ok", vec![]);

    rt.block_on(async {
        assert!(t.console.navigate("/missing").await.is_failed());
        assert!(t.console.alert().is_some());
        t.console.on_hash_change("#/ok").await;
    });
    assert!(t.console.alert().is_none());
    Ok(())
}

#[test]
fn invalid_path_is_reported() -> CommonResult<()> {
    let rt = Testing::runtime()?;
    let t = Testing::console();
    let res = rt.block_on(t.console.navigate("/a/../b"));
    assert!(res.is_failed());
    assert!(t.gateway.calls().is_empty());
    Ok(())
}

#[test]
fn latest_navigation_wins() -> CommonResult<()> {
    let rt = Testing::runtime()?;
    let t = Testing::console();
    t.gateway.listing("/a", vec![Testing::file("a.txt", 1)]);
    t.gateway.listing("/b", vec![Testing::file("b.txt", 1)]);
    let gate = t.gateway.gate(OpKind::ListStatus, "/a");

    let (a, b, _) = rt.block_on(async {
        futures::join!(t.console.navigate("/a"), t.console.navigate("/b"), async {
            gate.notify_one()
        })
    });
    assert_eq!(a, NavOutcome::Superseded(path("/a")));
    assert_eq!(b, NavOutcome::Committed(path("/b")));

    let state = t.console.state();
    assert_eq!(state.current_dir, path("/b"));
    assert_eq!(state.phase, NavPhase::Loaded);
    assert_eq!(t.console.listing()[0].name, "b.txt");
    assert_eq!(t.surface.addresses(), vec!["/b"]);
    assert_eq!(t.surface.views(View::Explorer).len(), 1);
    Ok(())
}

#[test]
fn stale_failure_is_dropped() -> CommonResult<()> {
    let rt = Testing::runtime()?;
    let t = Testing::console();
    t.gateway.listing("/b", vec![]);
    let gate = t.gateway.gate(OpKind::ListStatus, "/missing");

    let (a, b, _) = rt.block_on(async {
        futures::join!(
            t.console.navigate("/missing"),
            t.console.navigate("/b"),
            async { gate.notify_one() }
        )
    });
    assert_eq!(a, NavOutcome::Superseded(path("/missing")));
    assert_eq!(b, NavOutcome::Committed(path("/b")));
    assert!(t.surface.alerts().is_empty());
    assert_eq!(t.console.state().phase, NavPhase::Loaded);
    Ok(())
}

#[test]
fn responses_in_issue_order() -> CommonResult<()> {
    let rt = Testing::runtime()?;
    let t = Testing::console();
    t.gateway.listing("/a", vec![]);
    t.gateway.listing("/b", vec![]);
    let gate_a = t.gateway.gate(OpKind::ListStatus, "/a");
    let gate_b = t.gateway.gate(OpKind::ListStatus, "/b");

    let (a, b, _) = rt.block_on(async {
        futures::join!(t.console.navigate("/a"), t.console.navigate("/b"), async {
            gate_a.notify_one();
            tokio::task::yield_now().await;
            gate_b.notify_one();
        })
    });
    assert_eq!(a, NavOutcome::Committed(path("/a")));
    assert_eq!(b, NavOutcome::Committed(path("/b")));
    assert_eq!(t.surface.addresses(), vec!["/a", "/b"]);

    let state = t.console.state();
    assert_eq!(state.current_dir, path("/b"));
    assert_eq!(state.phase, NavPhase::Loaded);
    Ok(())
}

#[test]
fn select_file_shows_details() -> CommonResult<()> {
    let rt = Testing::runtime()?;
    let t = Testing::console();
    let file = Testing::file("a.txt", 100000);
    t.gateway.listing("/data", vec![file.clone()]);
    t.gateway.file_status("/data/a.txt", file);
    t.gateway
        .block_locations("/data/a.txt", Testing::blocks(100000, 65536));

    let res = rt.block_on(async {
        t.console.navigate("/data").await;
        t.console.select_entry("a.txt", FileType::File).await
    });
    assert_eq!(res, NavOutcome::Selected(path("/data/a.txt")));

    let selected = t.console.state().selected.unwrap();
    assert_eq!(selected.name, "a.txt");
    assert_eq!(selected.path, path("/data/a.txt"));

    let view = t.surface.last_view(View::FileInfo).unwrap();
    assert_eq!(view["title"], "File information - a.txt");
    assert_eq!(view["download_path"], "/data/a.txt?op=OPEN");
    assert_eq!(view["permission"], "-rw-r--r--");
    assert_eq!(view["blocks"]["menu"][0]["label"], "Block 0");
    assert_eq!(view["blocks"]["menu"][1]["length"], 100000 - 65536);
    assert_eq!(view["blocks"]["preview"]["start"], 67232);
    assert_eq!(view["blocks"]["preview"]["offset"], 67232);
    Ok(())
}

#[test]
fn select_dir_enters_it() -> CommonResult<()> {
    let rt = Testing::runtime()?;
    let t = Testing::console();
    t.gateway.listing("/", vec![Testing::dir("user")]);
    t.gateway.listing("/user", vec![]);

    let res = rt.block_on(async {
        t.console.start(None).await;
        t.console.select_entry("user", FileType::Directory).await
    });
    assert_eq!(res, NavOutcome::Committed(path("/user")));
    assert!(t.gateway.calls_of(OpKind::GetBlockLocations).is_empty());
    Ok(())
}

#[test]
fn select_dropped_after_navigation() -> CommonResult<()> {
    let rt = Testing::runtime()?;
    let t = Testing::console();
    t.gateway.listing("/", vec![Testing::file("a.txt", 10)]);
    t.gateway.listing("/user", vec![]);
    t.gateway.file_status("/a.txt", Testing::file("a.txt", 10));
    t.gateway.block_locations("/a.txt", Testing::blocks(10, 65536));

    rt.block_on(t.console.start(None));
    let gate = t.gateway.gate(OpKind::GetBlockLocations, "/a.txt");
    let (select, nav, _) = rt.block_on(async {
        futures::join!(
            t.console.select_entry("a.txt", FileType::File),
            t.console.navigate("/user"),
            async { gate.notify_one() }
        )
    });
    assert_eq!(select, NavOutcome::Superseded(path("/a.txt")));
    assert_eq!(nav, NavOutcome::Committed(path("/user")));
    assert!(t.console.state().selected.is_none());
    assert!(t.surface.views(View::FileInfo).is_empty());
    Ok(())
}

#[test]
fn select_failure_is_reported() -> CommonResult<()> {
    let rt = Testing::runtime()?;
    let t = Testing::console();
    t.gateway.listing("/", vec![Testing::file("a.txt", 10)]);
    t.gateway.file_status("/a.txt", Testing::file("a.txt", 10));
    t.gateway.fail_remote(
        OpKind::GetBlockLocations,
        "/a.txt",
        403,
        "AccessControlException",
        "Permission denied: user=dr.who, access=READ",
    );

    let res = rt.block_on(async {
        t.console.start(None).await;
        t.console.select_entry("a.txt", FileType::File).await
    });
    assert_eq!(
        res,
        NavOutcome::Failed(DisplayMessage::new(
            "Permission denied: user=dr.who, access=READ",
            Some(403)
        ))
    );
    assert!(t.console.state().selected.is_none());
    Ok(())
}

#[test]
fn preview_reads_the_tail() -> CommonResult<()> {
    let rt = Testing::runtime()?;
    let t = Testing::console();
    t.gateway
        .reply_body(OpKind::Open, "/big.log", vec![b'x'; 32768]);
    t.gateway.reply_body(OpKind::Open, "/small.log", "hello");

    rt.block_on(async {
        let res = t.console.preview_tail("/big.log", 100000).await;
        assert_eq!(res, NavOutcome::Previewed(path("/big.log")));

        let res = t.console.preview_tail("/small.log", 5).await;
        assert_eq!(res, NavOutcome::Previewed(path("/small.log")));
    });

    let calls = t.gateway.calls_of(OpKind::Open);
    assert_eq!(calls[0].get_param("offset"), Some("67232"));
    assert_eq!(calls[0].get_param("length"), Some("32768"));
    assert_eq!(calls[1].get_param("offset"), None);
    assert_eq!(calls[1].get_param("length"), Some("5"));

    let view = t.surface.last_view(View::FilePreview).unwrap();
    assert_eq!(view["text"], "hello");
    assert_eq!(view["window"]["start"], 0);
    assert_eq!(t.surface.toggles(Control::Preview), vec![false, true, false, true]);
    Ok(())
}

#[test]
fn preview_of_growing_file() -> CommonResult<()> {
    let rt = Testing::runtime()?;
    let t = Testing::console();
    // 200 bytes were appended after the length was read.
    let mut body = vec![b'a'; 1000];
    body.extend(vec![b'b'; 200]);
    t.gateway.reply_body(OpKind::Open, "/app.log", body);

    let res = rt.block_on(t.console.preview_tail("/app.log", 1000));
    assert_eq!(res, NavOutcome::Previewed(path("/app.log")));
    assert!(t.console.alert().is_none());

    let calls = t.gateway.calls_of(OpKind::Open);
    assert_eq!(calls[0].get_param("offset"), None);
    assert_eq!(calls[0].get_param("length"), Some("1000"));

    let view = t.surface.last_view(View::FilePreview).unwrap();
    assert_eq!(view["bytes"], 1000);
    assert_eq!(view["text"], "a".repeat(1000));
    assert!(t.surface.is_enabled(Control::Preview));
    Ok(())
}
