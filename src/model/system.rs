/*
 * SPDX-FileCopyrightText: Copyright (c) 2023 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
 * SPDX-License-Identifier: MIT
 *
 * Permission is hereby granted, free of charge, to any person obtaining a
 * copy of this software and associated documentation files (the "Software"),
 * to deal in the Software without restriction, including without limitation
 * the rights to use, copy, modify, merge, publish, distribute, sublicense,
 * and/or sell copies of the Software, and to permit persons to whom the
 * Software is furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in
 * all copies or substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
 * FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL
 * THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
 * LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING
 * FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER
 * DEALINGS IN THE SOFTWARE.
 */
use std::{collections::HashMap, fmt};

use serde::{Deserialize, Serialize};

use super::ODataId;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
pub enum SystemPowerControl {
    On,
    ForceOff,
    GracefulShutdown,
    GracefulRestart,
    ForceRestart,
    PowerCycle,
}

impl fmt::Display for SystemPowerControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Body of a ComputerSystem.Reset POST. ResetType is a plain string so that
/// values outside SystemPowerControl can be sent.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct ResetRequest {
    pub reset_type: String,
}

impl From<SystemPowerControl> for ResetRequest {
    fn from(action: SystemPowerControl) -> Self {
        ResetRequest {
            reset_type: action.to_string(),
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct Systems {
    #[serde(default)]
    pub members: Vec<ODataId>,
}

#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct ComputerSystem {
    pub id: Option<String>,
    pub name: Option<String>,
    pub actions: Option<SystemActions>,
}

impl ComputerSystem {
    /// The ComputerSystem.Reset descriptor. An empty object counts as absent.
    pub fn reset_action(&self) -> Option<&ResetAction> {
        self.actions
            .as_ref()
            .and_then(|a| a.computer_system_reset.as_ref())
            .filter(|r| !r.is_empty())
    }
}

#[derive(Debug, Default, Serialize, Deserialize, Clone)]
pub struct SystemActions {
    #[serde(rename = "#ComputerSystem.Reset")]
    pub computer_system_reset: Option<ResetAction>,
}

#[derive(Debug, Default, Serialize, Deserialize, Clone)]
pub struct ResetAction {
    pub target: Option<String>,
    #[serde(rename = "ResetType@Redfish.AllowableValues", default)]
    pub allowable_values: Vec<String>,
    #[serde(flatten)]
    pub other: HashMap<String, serde_json::Value>,
}

impl ResetAction {
    pub fn is_empty(&self) -> bool {
        self.target.is_none() && self.allowable_values.is_empty() && self.other.is_empty()
    }

    pub fn allows(&self, action: SystemPowerControl) -> bool {
        let action = action.to_string();
        self.allowable_values.iter().any(|v| *v == action)
    }
}

#[cfg(test)]
mod test {
    use super::SystemPowerControl;

    #[test]
    fn test_systems_parser() {
        let data = include_str!("testdata/systems.json");
        let result: super::Systems = serde_json::from_str(data).unwrap();
        assert_eq!(result.members.len(), 1);
        assert_eq!(result.members[0].odata_id, "/redfish/v1/Systems/host0");
    }

    #[test]
    fn test_systems_without_members() {
        let result: super::Systems =
            serde_json::from_str(r#"{"Name": "Computer System Collection"}"#).unwrap();
        assert!(result.members.is_empty());
    }

    #[test]
    fn test_system_reset_action() {
        let data = include_str!("testdata/system.json");
        let result: super::ComputerSystem = serde_json::from_str(data).unwrap();
        let reset = result.reset_action().unwrap();
        assert_eq!(
            reset.target.as_deref(),
            Some("/redfish/v1/Systems/host0/Actions/ComputerSystem.Reset")
        );
        assert_eq!(reset.allowable_values.len(), 4);
        assert!(reset.allows(SystemPowerControl::ForceRestart));
        assert!(!reset.allows(SystemPowerControl::GracefulShutdown));
    }

    #[test]
    fn test_system_without_reset_action() {
        let result: super::ComputerSystem =
            serde_json::from_str(r#"{"Id": "1", "Actions": {}}"#).unwrap();
        assert!(result.reset_action().is_none());

        let result: super::ComputerSystem = serde_json::from_str(
            r##"{"Id": "1", "Actions": {"#ComputerSystem.Reset": {}}}"##,
        )
        .unwrap();
        assert!(result.reset_action().is_none());
    }

    #[test]
    fn test_reset_action_with_only_title() {
        let result: super::ComputerSystem = serde_json::from_str(
            r##"{"Actions": {"#ComputerSystem.Reset": {"title": "Reset"}}}"##,
        )
        .unwrap();
        let reset = result.reset_action().unwrap();
        assert!(reset.target.is_none());
        assert!(!reset.allows(SystemPowerControl::ForceRestart));
    }

    #[test]
    fn test_reset_request_body() {
        let body = serde_json::to_string(&super::ResetRequest::from(
            SystemPowerControl::ForceRestart,
        ))
        .unwrap();
        assert_eq!(body, r#"{"ResetType":"ForceRestart"}"#);
    }
}
