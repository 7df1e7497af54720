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

const RULE_WIDTH: usize = 60;

/// Counts of the check lines written so far
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub passed: usize,
    pub failed: usize,
}

impl Summary {
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }
}

/// Plain text progress report for humans. Not meant to be parsed.
pub struct Reporter<W: Write> {
    out: W,
    summary: Summary,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W) -> Self {
        Reporter {
            out,
            summary: Summary::default(),
        }
    }

    pub fn banner(&mut self) -> std::io::Result<()> {
        writeln!(
            self.out,
            "🔍 Redfish Service Validation for ComputerSystem.Reset"
        )?;
        self.rule()
    }

    /// Numbered section header, preceded by a blank line
    pub fn section(&mut self, number: u8, title: &str) -> std::io::Result<()> {
        writeln!(self.out, "\n{number}. {title}")
    }

    pub fn pass(&mut self, msg: &str) -> std::io::Result<()> {
        self.summary.passed += 1;
        writeln!(self.out, "   ✅ {msg}")
    }

    pub fn fail(&mut self, msg: &str) -> std::io::Result<()> {
        self.summary.failed += 1;
        writeln!(self.out, "   ❌ {msg}")
    }

    pub fn complete(&mut self) -> std::io::Result<()> {
        writeln!(self.out, "\n🎉 Redfish Validation Complete!")?;
        self.rule()
    }

    /// Unindented line outside any section, for run-level outcomes
    pub fn line(&mut self, msg: &str) -> std::io::Result<()> {
        writeln!(self.out, "{msg}")?;
        self.out.flush()
    }

    pub fn summary(&self) -> Summary {
        self.summary
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn rule(&mut self) -> std::io::Result<()> {
        writeln!(self.out, "{}", "=".repeat(RULE_WIDTH))
    }
}

#[cfg(test)]
mod test {
    use super::{Reporter, Summary};

    #[test]
    fn test_report_layout() {
        let mut report = Reporter::new(Vec::new());
        report.banner().unwrap();
        report.section(1, "Testing Service Root...").unwrap();
        report.pass("Service Root: 1.6.0").unwrap();
        report.fail("Systems Collection failed: 500").unwrap();
        report.complete().unwrap();
        assert_eq!(
            report.summary(),
            Summary {
                passed: 1,
                failed: 1
            }
        );

        let out = String::from_utf8(report.into_inner()).unwrap();
        let rule = "=".repeat(60);
        let expected = format!(
            "🔍 Redfish Service Validation for ComputerSystem.Reset\n{rule}\n\
             \n1. Testing Service Root...\n   ✅ Service Root: 1.6.0\n\
             \x20  ❌ Systems Collection failed: 500\n\
             \n🎉 Redfish Validation Complete!\n{rule}\n"
        );
        assert_eq!(out, expected);
    }
}
