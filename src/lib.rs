// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: terminux
// File: lib.rs
// Author: Volker Schwaberow <volker@schwaberow.de>
// Copyright (c) 2022 Volker Schwaberow

pub mod tmx {
	pub mod app;
	pub mod console;
	pub mod interpreter;
	pub mod recall;
	pub mod registry;
}

pub use tmx::interpreter::{
	InterpreterConfig, InterpreterMode, Terminux, Transition,
};
pub use tmx::registry::{CommandRegistry, Output};
