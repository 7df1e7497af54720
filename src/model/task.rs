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

/// https://redfish.dmtf.org/schemas/v1/Task.v1_6_0.json
/// What a server returns for an accepted reset.
#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct Task {
    pub id: Option<String>,
    pub task_state: Option<String>,
    pub task_status: Option<String>,
    #[serde(default)]
    pub messages: Vec<TaskMessage>,
}

#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct TaskMessage {
    pub message: Option<String>,
    pub message_id: Option<String>,
    pub severity: Option<String>,
}

#[cfg(test)]
mod test {
    #[test]
    fn test_task_parser() {
        let data = include_str!("testdata/task.json");
        let result: super::Task = serde_json::from_str(data).unwrap();
        assert_eq!(result.task_state.as_deref(), Some("Completed"));
        assert_eq!(result.task_status.as_deref(), Some("OK"));
        assert_eq!(result.messages.len(), 1);
        assert_eq!(
            result.messages[0].message.as_deref(),
            Some("The request completed successfully.")
        );
    }
}
