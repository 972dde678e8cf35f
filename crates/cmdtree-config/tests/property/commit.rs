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

//! Committing an unchanged store is a no-op.

use cmdtree_config::{ConfigOutcome, ConfigSession, MemoryPersistence};
use cmdtree_test::fixtures::{committed_router, config_schema};
use cmdtree_test::RecordingRunner;
use proptest::prelude::*;

fn host() -> impl Strategy<Value = String> {
    (0u8..=255, 0u8..=255, 1u8..=254).prop_map(|(b, c, d)| format!("10.{b}.{c}.{d}"))
}

fn set_line() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z]{1,8}".prop_map(|name| format!("set system host-name {name}")),
        host().prop_map(|ip| format!("set system name-server {ip}")),
        (0u8..4, host()).prop_map(|(n, ip)| format!("set interfaces eth{n} address {ip}/24")),
        (0u8..4).prop_map(|n| format!("set interfaces eth{n} disable")),
        host().prop_map(|ip| format!("set protocols static route 0.0.0.0/0 next-hop {ip}")),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_second_commit_changes_nothing(
        lines in prop::collection::vec(set_line(), 1..8),
        start_committed in any::<bool>(),
    ) {
        let committed = if start_committed { committed_router() } else { Default::default() };
        let mut session =
            ConfigSession::new(config_schema(), MemoryPersistence::new(committed)).unwrap();
        let runner = RecordingRunner::new();

        for line in &lines {
            prop_assert_eq!(session.process_line(line, &runner), ConfigOutcome::Applied);
        }
        let first = session.process_line("commit", &runner);
        let committed_first = matches!(first, ConfigOutcome::Committed { .. });
        prop_assert!(committed_first, "first commit returned {:?}", first);
        let after_first = session.store().committed().clone();

        let second = session.process_line("commit", &runner);
        let ConfigOutcome::Committed { plan, reports, .. } = second else {
            panic!("expected a commit, got {second:?}");
        };
        prop_assert!(plan.lines.is_empty());
        prop_assert!(reports.is_empty());
        prop_assert_eq!(session.store().committed(), &after_first);
        prop_assert_eq!(session.persistence().document(), &after_first);
        prop_assert!(!session.store().is_dirty());
    }

    #[test]
    fn prop_multi_values_are_not_duplicated(ip in host(), repeats in 1usize..4) {
        let mut session =
            ConfigSession::new(config_schema(), MemoryPersistence::default()).unwrap();
        let runner = RecordingRunner::new();
        for _ in 0..repeats {
            session.process_line(&format!("set system name-server {ip}"), &runner);
        }
        session.process_line("commit", &runner);
        prop_assert_eq!(
            session.process_line("show system name-server", &runner),
            ConfigOutcome::Show(serde_json::json!([ip]))
        );
    }
}
