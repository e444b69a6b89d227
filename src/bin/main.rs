// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: terminux
// File: main.rs
// Author: Volker Schwaberow <volker@schwaberow.de>
// Copyright (c) 2022 Volker Schwaberow

use terminux::tmx::app;

fn main() {
	match app::run() {
		Ok(code) => std::process::exit(code),
		Err(err) => {
			eprintln!("error: {}", err);
			std::process::exit(err.exit_code());
		}
	}
}
