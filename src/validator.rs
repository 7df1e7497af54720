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
use std::io::Write;

use reqwest::StatusCode;
use tracing::{debug, error, info, warn};

use crate::model::system::ResetRequest;
use crate::model::{ComputerSystem, ErrorResult, ServiceRoot, SystemPowerControl, Systems, Task};
use crate::network::RedfishHttpClient;
use crate::report::{Reporter, Summary};
use crate::RedfishError;

const RESET_ACTION_PATH: &str = "Actions/ComputerSystem.Reset";
const INVALID_RESET_TYPE: &str = "InvalidType";

/// Walks service root -> systems -> first system and exercises its
/// ComputerSystem.Reset action, writing one line per check.
///
/// Each discovery step gates the next: a non-200 answer or missing data is
/// reported and ends the chain, but is not an error. Only faults (network,
/// login, undecodable 200 bodies) come back as `Err`.
pub struct Validator<W: Write> {
    client: RedfishHttpClient,
    report: Reporter<W>,
    strict: bool,
}

impl<W: Write> Validator<W> {
    pub fn new(client: RedfishHttpClient, report: Reporter<W>) -> Self {
        Validator {
            client,
            report,
            strict: false,
        }
    }

    /// In strict mode any failed check makes the exit code non-zero.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn into_reporter(self) -> Reporter<W> {
        self.report
    }

    /// Runs the sequence and maps the outcome to a process exit code.
    pub fn execute(&mut self) -> i32 {
        let msg = match self.run() {
            Ok(summary) if self.strict && !summary.all_passed() => {
                format!("❌ {} check(s) failed", summary.failed)
            }
            Ok(_) => return 0,
            Err(e @ RedfishError::AuthenticationFailed { .. }) => e.to_string(),
            Err(e) => format!("❌ Validation failed with error: {e}"),
        };
        if let Err(e) = self.report.line(&msg) {
            error!("{msg} ({e})");
        }
        1
    }

    pub fn run(&mut self) -> Result<Summary, RedfishError> {
        self.report.banner()?;
        if self.check_service_root()? {
            self.check_systems()?;
            self.report.complete()?;
        }
        Ok(self.report.summary())
    }

    fn check_service_root(&mut self) -> Result<bool, RedfishError> {
        self.report.section(1, "Testing Service Root...")?;
        let response = self.client.get("/")?;
        if response.status != StatusCode::OK {
            self.report.fail(&format!(
                "Service Root failed: {}",
                response.status_code()
            ))?;
            return Ok(false);
        }
        let root: ServiceRoot = response.json()?;
        info!(
            "Service root version {:?} product {:?}",
            root.redfish_version, root.product
        );
        self.report.pass(&format!(
            "Service Root: {}",
            root.redfish_version.as_deref().unwrap_or("Unknown")
        ))?;
        self.report.pass(&format!(
            "Systems URI: {}",
            root.systems
                .as_ref()
                .map(|s| s.odata_id.as_str())
                .filter(|id| !id.is_empty())
                .unwrap_or("Not found")
        ))?;
        Ok(true)
    }

    fn check_systems(&mut self) -> Result<(), RedfishError> {
        self.report.section(2, "Testing Systems Collection...")?;
        let response = self.client.get("/Systems")?;
        if response.status != StatusCode::OK {
            self.report.fail(&format!(
                "Systems Collection failed: {}",
                response.status_code()
            ))?;
            return Ok(());
        }
        let systems: Systems = response.json()?;
        self.report.pass(&format!(
            "Systems Collection: {} systems found",
            systems.members.len()
        ))?;

        let Some(first) = systems.members.first() else {
            self.report.fail("No systems found in collection")?;
            return Ok(());
        };
        let system_id = match first.odata_id_get() {
            Ok(id) => id.to_string(),
            Err(e) => {
                warn!("{e}");
                self.report
                    .fail(&format!("Invalid system reference: {}", first.odata_id))?;
                return Ok(());
            }
        };
        self.report
            .pass(&format!("First System ID: {system_id}"))?;
        self.check_system(&system_id)
    }

    fn check_system(&mut self, system_id: &str) -> Result<(), RedfishError> {
        self.report.section(
            3,
            &format!("Testing Individual System ({system_id})..."),
        )?;
        let response = self.client.get(&format!("/Systems/{system_id}"))?;
        if response.status != StatusCode::OK {
            self.report.fail(&format!(
                "Individual system failed: {}",
                response.status_code()
            ))?;
            return Ok(());
        }
        let system: ComputerSystem = response.json()?;
        let Some(reset) = system.reset_action() else {
            self.report.fail("ComputerSystem.Reset action not found")?;
            return Ok(());
        };
        self.report.pass("ComputerSystem.Reset action found")?;
        self.report.pass(&format!(
            "Target URI: {}",
            reset.target.as_deref().unwrap_or("Not found")
        ))?;
        self.report.pass(&format!(
            "Allowed Reset Types: {}",
            reset.allowable_values.join(", ")
        ))?;

        let reset_uri = format!("/Systems/{system_id}/{RESET_ACTION_PATH}");
        if reset.allows(SystemPowerControl::ForceRestart) {
            self.check_reset(&reset_uri)?;
        } else {
            info!("{} not allowed, skipping reset", SystemPowerControl::ForceRestart);
        }

        self.report.section(5, "Testing Error Handling...")?;
        self.check_invalid_reset_type(&reset_uri)?;
        self.check_disallowed_method(&reset_uri)
    }

    fn check_reset(&mut self, reset_uri: &str) -> Result<(), RedfishError> {
        self.report
            .section(4, "Testing ComputerSystem.Reset Action...")?;
        let response = self.client.post(
            reset_uri,
            ResetRequest::from(SystemPowerControl::ForceRestart),
        )?;
        if response.status != StatusCode::OK {
            self.report.fail(&format!(
                "Reset action failed: {}",
                response.status_code()
            ))?;
            return Ok(());
        }
        let task: Task = response.json()?;
        debug!("Reset task {:?}", task.id);
        self.report.pass("Reset action successful")?;
        self.report.pass(&format!(
            "Task State: {}",
            task.task_state.as_deref().unwrap_or("Unknown")
        ))?;
        self.report.pass(&format!(
            "Task Status: {}",
            task.task_status.as_deref().unwrap_or("Unknown")
        ))?;
        for msg in &task.messages {
            self.report.pass(&format!(
                "Message: {}",
                msg.message.as_deref().unwrap_or("No message")
            ))?;
        }
        Ok(())
    }

    fn check_invalid_reset_type(&mut self, reset_uri: &str) -> Result<(), RedfishError> {
        let response = self.client.post(
            reset_uri,
            ResetRequest {
                reset_type: INVALID_RESET_TYPE.to_string(),
            },
        )?;
        if response.status != StatusCode::BAD_REQUEST {
            self.report.fail(&format!(
                "Invalid reset type not properly handled: {}",
                response.status_code()
            ))?;
            return Ok(());
        }
        self.report
            .pass("Invalid reset type properly rejected (400)")?;
        match response.json::<ErrorResult>() {
            Ok(ErrorResult { error: Some(error) }) => {
                for info in &error.extended_info {
                    debug!(
                        "{} {}",
                        info.message_id.as_deref().unwrap_or_default(),
                        info.resolution.as_deref().unwrap_or_default()
                    );
                }
                self.report.pass(&format!(
                    "Error message: {}",
                    error.message.as_deref().unwrap_or("No message")
                ))?;
            }
            Ok(ErrorResult { error: None }) => debug!("400 without an error object"),
            Err(e) => warn!("{e}"),
        }
        Ok(())
    }

    fn check_disallowed_method(&mut self, reset_uri: &str) -> Result<(), RedfishError> {
        let response = self.client.get(reset_uri)?;
        if response.status == StatusCode::METHOD_NOT_ALLOWED {
            self.report.pass("GET method properly rejected (405)")?;
        } else {
            self.report.fail(&format!(
                "GET method not properly handled: {}",
                response.status_code()
            ))?;
        }
        Ok(())
    }
}
