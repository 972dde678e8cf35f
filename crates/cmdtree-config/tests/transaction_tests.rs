// Dweve cmdtree - Hierarchical Command Tree Shell
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! End-to-end configuration sessions over the shared router schema.

use cmdtree_config::{
    ConfigOutcome, ConfigPersistence, ConfigSession, JsonFileStore, MemoryPersistence,
    ScriptReport,
};
use cmdtree_core::{CommandOutput, TreeNode};
use cmdtree_test::fixtures::{committed_router, config_schema};
use cmdtree_test::RecordingRunner;
use serde_json::json;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

/// The fixture schema with every `script` rewritten into `dir`, and the
/// scripts created there.
fn schema_with_scripts(dir: &Path) -> TreeNode {
    fn rewrite(node: &mut TreeNode, dir: &Path) {
        if let Some(script) = node.meta().script.clone() {
            let path = dir.join(script);
            fs::write(&path, "#!/bin/sh\nexit 0\n").unwrap();
            node.meta_mut().script = Some(path.display().to_string());
        }
        if let Some(children) = node.children_mut() {
            for child in children.values_mut() {
                rewrite(child, dir);
            }
        }
    }
    let mut schema = config_schema();
    rewrite(&mut schema, dir);
    schema
}

#[test]
fn test_set_address_then_commit_runs_script_once() {
    let dir = tempdir().unwrap();
    let schema = schema_with_scripts(dir.path());
    let committed_path = dir.path().join("committed_config.json");
    let mut session = ConfigSession::new(schema, JsonFileStore::new(&committed_path)).unwrap();
    let runner = RecordingRunner::new();

    assert_eq!(
        session.process_line("set interfaces eth0 address 10.0.0.1/24", &runner),
        ConfigOutcome::Applied
    );
    assert_eq!(
        session.process_line("show candidate", &runner),
        ConfigOutcome::Show(json!({
            "add": {"interfaces": {"eth0": {"address": ["10.0.0.1/24"]}}},
            "delete": {}
        }))
    );

    let outcome = session.process_line("commit", &runner);
    let ConfigOutcome::Committed { location, plan, reports } = outcome else {
        panic!("expected a commit, got {outcome:?}");
    };
    assert_eq!(location, committed_path.display().to_string());
    assert_eq!(
        plan.lines.iter().map(ToString::to_string).collect::<Vec<_>>(),
        vec!["+ interfaces eth0 address 10.0.0.1/24"]
    );
    assert_eq!(reports.len(), 1);
    assert!(reports[0].succeeded());
    assert_eq!(runner.scripts(), vec![dir.path().join("apply_addr.sh")]);

    let saved: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&committed_path).unwrap()).unwrap();
    assert_eq!(saved, json!({"interfaces": {"eth0": {"address": ["10.0.0.1/24"]}}}));
}

#[test]
fn test_scripts_run_in_diff_order_once_each() {
    let dir = tempdir().unwrap();
    let schema = schema_with_scripts(dir.path());
    let mut session = ConfigSession::new(schema, MemoryPersistence::default()).unwrap();
    let runner = RecordingRunner::new();

    for line in [
        "set system host-name r2",
        "set system name-server 192.0.2.53",
        "set protocols static route 0.0.0.0/0 next-hop 192.0.2.254",
        "set protocols static route 10.0.0.0/8 blackhole",
    ] {
        assert_eq!(session.process_line(line, &runner), ConfigOutcome::Applied, "{line}");
    }
    session.process_line("commit", &runner);

    assert_eq!(
        runner.scripts(),
        vec![
            dir.path().join("apply_static.sh"),
            dir.path().join("apply_system.sh"),
        ]
    );
}

#[test]
fn test_failing_script_does_not_stop_the_rest() {
    let dir = tempdir().unwrap();
    let schema = schema_with_scripts(dir.path());
    let static_script = dir.path().join("apply_static.sh").display().to_string();
    let runner = RecordingRunner::new().with_output(
        static_script.clone(),
        CommandOutput {
            status: Some(2),
            stdout: String::new(),
            stderr: "no route\n".to_string(),
        },
    );
    let mut session = ConfigSession::new(schema, MemoryPersistence::default()).unwrap();

    session.process_line("set protocols static route 10.0.0.0/8 blackhole", &runner);
    session.process_line("set system host-name r2", &runner);
    let ConfigOutcome::Committed { reports, .. } = session.process_line("commit", &runner) else {
        panic!("expected a commit");
    };

    assert_eq!(reports.len(), 2);
    assert_eq!(
        reports[0].summary(),
        Some(format!("{static_script} exited with code 2"))
    );
    assert!(reports[1].succeeded());
}

#[test]
fn test_missing_script_is_reported() {
    let mut session = ConfigSession::new(config_schema(), MemoryPersistence::default()).unwrap();
    let runner = RecordingRunner::new();
    session.process_line("set system host-name r2", &runner);

    let ConfigOutcome::Committed { reports, .. } = session.process_line("commit", &runner) else {
        panic!("expected a commit");
    };
    assert_eq!(
        reports,
        vec![ScriptReport::NotFound {
            script: "apply_system.sh".to_string()
        }]
    );
    assert_eq!(
        reports[0].summary().as_deref(),
        Some("Script not found: apply_system.sh")
    );
    assert!(runner.scripts().is_empty());
}

#[test]
fn test_validators_guard_set_lines() {
    let mut session = ConfigSession::new(config_schema(), MemoryPersistence::default()).unwrap();
    let runner = RecordingRunner::new();

    let outcome = session.process_line("set protocols static route 10.0.0.1/8 blackhole", &runner);
    assert_eq!(
        outcome,
        ConfigOutcome::Rejected {
            line: "set protocols static route 10.0.0.1/8 blackhole".to_string(),
            message: "Must be a valid IPv4 network".to_string(),
        }
    );
    let outcome = session.process_line("set system name-server dns.example", &runner);
    assert!(matches!(outcome, ConfigOutcome::Rejected { .. }));
    assert!(!session.store().is_dirty());
}

#[test]
fn test_delete_committed_list_element_then_commit() {
    let mut session =
        ConfigSession::new(config_schema(), MemoryPersistence::new(committed_router())).unwrap();
    let runner = RecordingRunner::new();

    assert_eq!(
        session.process_line("delete system name-server 192.0.2.53", &runner),
        ConfigOutcome::Applied
    );
    assert_eq!(
        session.process_line("compare", &runner),
        ConfigOutcome::Compare(vec![cmdtree_config::DiffLine {
            sign: cmdtree_config::Sign::Remove,
            path: vec![
                "system".into(),
                "name-server".into(),
                "192.0.2.53".into()
            ],
        }])
    );
    assert_eq!(
        session.process_line("show candidate", &runner),
        ConfigOutcome::Show(json!({
            "add": {"system": {"name-server": ["198.51.100.53"]}},
            "delete": {"system": {"name-server": ["192.0.2.53"]}}
        }))
    );

    session.process_line("commit", &runner);
    assert_eq!(
        session.process_line("show system name-server", &runner),
        ConfigOutcome::Show(json!(["198.51.100.53"]))
    );
}

#[test]
fn test_discard_restores_deleted_entries() {
    let mut session =
        ConfigSession::new(config_schema(), MemoryPersistence::new(committed_router())).unwrap();
    let runner = RecordingRunner::new();

    session.process_line("delete interfaces eth0", &runner);
    assert!(session
        .tree()
        .child("delete")
        .and_then(|d| d.child("interfaces"))
        .and_then(|i| i.child("eth0"))
        .is_none());

    assert_eq!(session.process_line("discard", &runner), ConfigOutcome::Discarded);
    assert_eq!(session.process_line("compare", &runner), ConfigOutcome::Compare(vec![]));
    assert!(session
        .tree()
        .child("delete")
        .and_then(|d| d.child("interfaces"))
        .and_then(|i| i.child("eth0"))
        .is_some());
}

#[test]
fn test_committed_document_survives_a_new_session() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("committed_config.json");
    let runner = RecordingRunner::new();
    {
        let mut session = ConfigSession::new(config_schema(), JsonFileStore::new(&path)).unwrap();
        session.process_line("set interfaces eth1 disable", &runner);
        session.process_line("commit", &runner);
    }

    let store = JsonFileStore::new(&path);
    assert_eq!(
        cmdtree_config::value::map_to_json(&store.load().unwrap()),
        json!({"interfaces": {"eth1": {"disable": true}}})
    );
    let session = ConfigSession::new(config_schema(), store).unwrap();
    assert!(session
        .tree()
        .child("show")
        .and_then(|s| s.child("interfaces"))
        .is_some());
}
