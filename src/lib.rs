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
//! Checks that a Redfish service implements ComputerSystem.Reset correctly.
//!
//! The validator logs in, walks service root -> Systems -> first system,
//! then POSTs a valid and an invalid ResetType and tries a GET on the
//! action, expecting 200, 400 and 405. Progress goes to a [`Reporter`] as
//! human readable lines.

pub mod model;
mod error;
mod network;
mod report;
mod validator;

pub use error::RedfishError;
pub use model::SystemPowerControl;
pub use network::{
    CredentialPolicy, Endpoint, RedfishClientBuilder, RedfishHttpClient, RedfishResponse,
    DEFAULT_AUTH_URL, DEFAULT_BASE_URL, DEFAULT_USERNAME,
};
pub use report::{Reporter, Summary};
pub use validator::Validator;
