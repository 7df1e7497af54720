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

/// Redfish error response: {"error": {"code": ..., "message": ..., "@Message.ExtendedInfo": [...]}}
#[derive(Debug, Default, Serialize, Deserialize, Clone)]
pub struct ErrorResult {
    pub error: Option<ErrorBody>,
}

#[derive(Debug, Default, Serialize, Deserialize, Clone)]
pub struct ErrorBody {
    pub code: Option<String>,
    pub message: Option<String>,
    #[serde(rename = "@Message.ExtendedInfo", default)]
    pub extended_info: Vec<ExtendedInfo>,
}

#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct ExtendedInfo {
    pub message_id: Option<String>,
    pub message: Option<String>,
    pub resolution: Option<String>,
    pub severity: Option<String>,
    #[serde(default)]
    pub message_args: Vec<String>,
}

#[cfg(test)]
mod test {
    #[test]
    fn test_error_parser() {
        let data = include_str!("testdata/error_value_not_in_list.json");
        let result: super::ErrorResult = serde_json::from_str(data).unwrap();
        let error = result.error.unwrap();
        assert_eq!(
            error.code.as_deref(),
            Some("Base.1.11.0.PropertyValueNotInList")
        );
        assert_eq!(error.extended_info.len(), 1);
        assert_eq!(error.extended_info[0].message_args, ["InvalidType", "ResetType"]);
    }

    #[test]
    fn test_minimal_error() {
        let result: super::ErrorResult =
            serde_json::from_str(r#"{"error": {"message": "Invalid ResetType"}}"#).unwrap();
        assert_eq!(
            result.error.unwrap().message.as_deref(),
            Some("Invalid ResetType")
        );
    }
}
