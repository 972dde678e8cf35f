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

//! Sample trees shaped like a small router.

use cmdtree_core::TreeNode;

/// An operational tree: `show ...` commands plus `ping`.
///
/// `show ip route` is a tag node with a `summary` leaf (offered before a
/// prefix is typed) and a nested `test` tag node (offered after).
pub const OP_TREE_JSON: &str = r#"{
  "show": {
    "description": "Show system information",
    "ip": {
      "description": "Show IP information",
      "route": {
        "type": "tagNode",
        "description": "Show IP routing table",
        "command": "ip route show",
        "tagCommand": "ip route get {route}",
        "values": [["<x.x.x.x/24>", "Show routes for a prefix"], "ipv4addr"],
        "summary": {
          "type": "leafNode",
          "description": "Show routing table summary",
          "command": "ip route show summary"
        },
        "test": {
          "type": "tagNode",
          "description": "Test a route lookup",
          "tagCommand": "ip route get {route} from {test}"
        }
      },
      "bgp": {
        "description": "Show BGP information",
        "summary": {
          "type": "leafNode",
          "description": "Show BGP summary",
          "command": "vtysh -c 'show bgp summary'"
        }
      }
    },
    "interfaces": {
      "type": "leafNode",
      "description": "Show network interfaces",
      "command": "ip -brief link"
    },
    "version": {
      "type": "leafNode",
      "description": "Show software version",
      "command": "uname -a"
    }
  },
  "ping": {
    "type": "tagNode",
    "description": "Send ICMP echo requests",
    "values": ["ipv4addr"],
    "tagCommand": "ping -c 3 {ping}"
  }
}"#;

/// A configuration schema with interfaces, system parameters and static
/// routes. Each top-level area declares a commit script.
pub const CONFIG_SCHEMA_JSON: &str = r#"{
  "interfaces": {
    "type": "tagNode",
    "description": "Network interface",
    "values": [["<ifname>", "Interface name"]],
    "address": {
      "type": "tagNode",
      "description": "IP address with prefix length",
      "valueMode": "scalar",
      "multi": true,
      "validator": "ipv4_interface",
      "script": "apply_addr.sh",
      "values": [["<x.x.x.x/x>", "IPv4 address and prefix length"]]
    },
    "alias": {
      "type": "tagNode",
      "description": "Interface alias",
      "valueMode": "scalar"
    },
    "disable": {
      "type": "leafNode",
      "description": "Administratively disable the interface"
    }
  },
  "system": {
    "description": "System parameters",
    "script": "apply_system.sh",
    "host-name": {
      "type": "tagNode",
      "description": "System host name",
      "valueMode": "scalar"
    },
    "name-server": {
      "type": "tagNode",
      "description": "DNS server",
      "valueMode": "scalar",
      "multi": true,
      "validator": "ipv4_address"
    }
  },
  "protocols": {
    "description": "Routing protocols",
    "static": {
      "description": "Static routes",
      "script": "apply_static.sh",
      "route": {
        "type": "tagNode",
        "description": "Static route",
        "validator": "ipv4_network",
        "next-hop": {
          "type": "tagNode",
          "description": "Next-hop router",
          "valueMode": "scalar",
          "multi": true,
          "validator": "ipv4_address"
        },
        "blackhole": {
          "type": "leafNode",
          "description": "Discard matching traffic"
        }
      }
    }
  }
}"#;

fn parse(name: &str, json: &str) -> TreeNode {
    TreeNode::from_json_str(json).unwrap_or_else(|e| panic!("fixture {name} is invalid: {e}"))
}

/// [`OP_TREE_JSON`], parsed.
pub fn op_tree() -> TreeNode {
    parse("op_tree", OP_TREE_JSON)
}

/// [`CONFIG_SCHEMA_JSON`], parsed.
pub fn config_schema() -> TreeNode {
    parse("config_schema", CONFIG_SCHEMA_JSON)
}

/// A tree with `n` levels of single-child tag nodes, each with one leaf.
///
/// Used to exercise deep walks in benchmarks.
pub fn deep_tag_chain(n: usize) -> TreeNode {
    let mut node = TreeNode::leaf().with_command("true");
    for level in (0..n).rev() {
        node = TreeNode::tag()
            .with_tag_command(format!("echo {{level{level}}}"))
            .with_child(format!("level{}", level + 1), node)
            .with_child("done", TreeNode::leaf());
    }
    TreeNode::container().with_child("level0", node)
}
