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

use crate::RedfishError;

pub mod error;
pub mod service_root;
pub mod system;
pub mod task;

pub use error::ErrorResult;
pub use service_root::ServiceRoot;
pub use system::{ComputerSystem, ResetAction, SystemPowerControl, Systems};
pub use task::Task;

#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ODataId {
    #[serde(rename = "@odata.id", default)]
    pub odata_id: String,
}

impl From<String> for ODataId {
    fn from(item: String) -> Self {
        ODataId { odata_id: item }
    }
}

impl From<&str> for ODataId {
    fn from(item: &str) -> Self {
        ODataId {
            odata_id: item.to_string(),
        }
    }
}

impl ODataId {
    // Gets last portion of the ID, not including uri path
    pub fn odata_id_get(&self) -> Result<&str, RedfishError> {
        self.odata_id
            .trim_end_matches('/')
            .split('/')
            .next_back()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| RedfishError::GenericError {
                error: format!("odata_id have invalid format: {}", self.odata_id),
            })
    }
}

#[cfg(test)]
mod test {
    use super::ODataId;

    #[test]
    fn test_odata_id_get() {
        assert_eq!(ODataId::from("/Systems/1").odata_id_get().unwrap(), "1");
        assert_eq!(
            ODataId::from("/redfish/v1/Systems/System.Embedded.1/")
                .odata_id_get()
                .unwrap(),
            "System.Embedded.1"
        );
        assert_eq!(ODataId::from("host0").odata_id_get().unwrap(), "host0");
        assert!(ODataId::from("/").odata_id_get().is_err());
        assert!(ODataId::from("").odata_id_get().is_err());
    }

    #[test]
    fn test_odata_id_missing() {
        let result: ODataId = serde_json::from_str("{}").unwrap();
        assert!(result.odata_id.is_empty());
        assert!(result.odata_id_get().is_err());
    }
}
