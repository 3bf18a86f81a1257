// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: hashwalk
// File: main.rs
// Author: hashwalk maintainers

use std::process::ExitCode;

use hashwalk::hw::app;

fn main() -> ExitCode {
	app::run()
}
