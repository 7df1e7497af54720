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
use serde::{Deserialize, Serialize};

use super::ODataId;

/// https://redfish.dmtf.org/schemas/v1/ServiceRoot.v1_16_0.json
/// Only the properties needed to find the systems collection.
#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct ServiceRoot {
    pub redfish_version: Option<String>,
    pub product: Option<String>,
    pub vendor: Option<String>,
    pub systems: Option<ODataId>,
}

#[cfg(test)]
mod test {
    #[test]
    fn test_service_root_parser() {
        let data = include_str!("testdata/service_root.json");
        let result: super::ServiceRoot = serde_json::from_str(data).unwrap();
        assert_eq!(result.redfish_version.as_deref(), Some("1.6.0"));
        assert_eq!(result.systems.unwrap().odata_id, "/redfish/v1/Systems");
    }

    #[test]
    fn test_service_root_without_systems() {
        let result: super::ServiceRoot = serde_json::from_str("{}").unwrap();
        assert!(result.redfish_version.is_none());
        assert!(result.systems.is_none());
    }

    #[test]
    fn test_service_root_systems_without_id() {
        let result: super::ServiceRoot =
            serde_json::from_str(r#"{"RedfishVersion": "1.6.0", "Systems": {}}"#).unwrap();
        assert_eq!(result.systems.unwrap().odata_id, "");
    }
}
