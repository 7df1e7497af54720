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

/* Redfish ComputerSystem.Reset validator
 *
 * USAGE: ./validate-redfish -B http://localhost:8182/api/redfish/v1 -U standalone -P ThePassword
 * Every option can also come from the environment, see --help.
 * Run with `-v` for request/response logging on stderr.
 * Exit code is 0 once the sequence ran, 1 if login failed or the run broke off.
 */

use std::{env, time::Duration};

use anyhow::{anyhow, Context};
use redfish_validator::{
    CredentialPolicy, Endpoint, RedfishHttpClient, Reporter, Validator, DEFAULT_AUTH_URL,
    DEFAULT_BASE_URL, DEFAULT_USERNAME,
};
use secrecy::SecretString;
use tracing::info;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::fmt::Layer;
use tracing_subscriber::prelude::*;

const ENV_BASE_URL: &str = "REDFISH_BASE_URL";
const ENV_AUTH_URL: &str = "REDFISH_AUTH_URL";
const ENV_USERNAME: &str = "REDFISH_USERNAME";
const ENV_PASSWORD: &str = "REDFISH_PASSWORD";
const ENV_TIMEOUT: &str = "REDFISH_TIMEOUT";

fn main() {
    let code = match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{e:#}");
            1
        }
    };
    std::process::exit(code);
}

fn run() -> Result<i32, anyhow::Error> {
    let args: Vec<String> = env::args().collect();
    let mut opts = getopts::Options::new();

    opts.optflag("h", "help", "Print this help");
    opts.optflag("v", "verbose", "Log at DEBUG level. Default is INFO");
    opts.optopt(
        "B",
        "base-url",
        &format!("Redfish root URL. Env {ENV_BASE_URL}. Default {DEFAULT_BASE_URL}"),
        "URL",
    );
    opts.optopt(
        "A",
        "auth-url",
        &format!("Login URL. Env {ENV_AUTH_URL}. Default {DEFAULT_AUTH_URL}"),
        "URL",
    );
    opts.optopt(
        "U",
        "username",
        &format!("Login username. Env {ENV_USERNAME}. Default {DEFAULT_USERNAME}"),
        "USER",
    );
    opts.optopt(
        "P",
        "password",
        &format!("Required. Login password. Env {ENV_PASSWORD}"),
        "PASS",
    );
    opts.optopt(
        "t",
        "timeout",
        &format!("Per request timeout in seconds. Env {ENV_TIMEOUT}"),
        "SECS",
    );
    opts.optflag(
        "r",
        "reuse-token",
        "Log in once and reuse the token. Default is a fresh login per request",
    );
    opts.optflag("s", "strict", "Exit 1 if any check failed");
    opts.optflag(
        "",
        "reject-invalid-certs",
        "Do not accept self signed TLS certificates",
    );

    let args_given = opts.parse(&args[1..]).context("Invalid arguments")?;
    if args_given.opt_present("h") {
        eprintln!("{}", opts.usage("validate-redfish [options]"));
        return Ok(0);
    }

    let log_level = if args_given.opt_present("v") {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    let env_filter = EnvFilter::builder()
        .with_default_directive(log_level.into())
        .from_env_lossy()
        .add_directive("hyper=warn".parse()?)
        .add_directive("reqwest=warn".parse()?)
        .add_directive("rustls=warn".parse()?);
    tracing_subscriber::registry()
        .with(
            Layer::default()
                .compact()
                .with_writer(std::io::stderr),
        )
        .with(env_filter)
        .init();

    let password = option_or_env(&args_given, "P", ENV_PASSWORD).ok_or_else(|| {
        anyhow!("A password is required, pass -P or set {ENV_PASSWORD}")
    })?;
    let endpoint = Endpoint {
        base_url: option_or_env(&args_given, "B", ENV_BASE_URL)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        auth_url: option_or_env(&args_given, "A", ENV_AUTH_URL)
            .unwrap_or_else(|| DEFAULT_AUTH_URL.to_string()),
        user: option_or_env(&args_given, "U", ENV_USERNAME)
            .unwrap_or_else(|| DEFAULT_USERNAME.to_string()),
        password: SecretString::from(password),
    };

    info!(
        "Validating {} as {} (login at {})",
        endpoint.base_url, endpoint.user, endpoint.auth_url
    );

    let mut builder = RedfishHttpClient::builder();
    if let Some(secs) = option_or_env(&args_given, "t", ENV_TIMEOUT) {
        let secs: u64 = secs
            .parse()
            .with_context(|| format!("Invalid timeout '{secs}'"))?;
        builder = builder.timeout(Duration::from_secs(secs));
    }
    if args_given.opt_present("r") {
        builder = builder.credential_policy(CredentialPolicy::Reuse);
    }
    if args_given.opt_present("reject-invalid-certs") {
        builder = builder.reject_invalid_certs();
    }
    let client = builder.build(endpoint)?;

    let mut validator = Validator::new(client, Reporter::new(std::io::stdout().lock()))
        .strict(args_given.opt_present("s"));
    Ok(validator.execute())
}

fn option_or_env(args_given: &getopts::Matches, opt: &str, var: &str) -> Option<String> {
    args_given
        .opt_str(opt)
        .or_else(|| env::var(var).ok())
        .filter(|v| !v.is_empty())
}
