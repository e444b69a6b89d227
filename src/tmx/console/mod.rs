// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: terminux

pub mod color;
pub mod completion;
pub mod render;
pub mod script;
pub mod session;

use crate::tmx::interpreter::InterpreterConfig;
use color::ColorMode;
use session::ConsoleSession;
use std::fmt::{self, Display};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleMode {
	Interactive,
	Script,
}

/// Options provided when launching the terminal host.
#[derive(Debug, Clone)]
pub struct ConsoleOptions {
	pub script_path: Option<PathBuf>,
	pub tty_mode: ConsoleMode,
	pub color_mode: ColorMode,
	pub interpreter: InterpreterConfig,
}

impl ConsoleOptions {
	pub fn interactive() -> Self {
		Self {
			script_path: None,
			tty_mode: ConsoleMode::Interactive,
			color_mode: ColorMode::Auto,
			interpreter: InterpreterConfig::default(),
		}
	}

	pub fn from_script(path: PathBuf) -> Self {
		Self {
			script_path: Some(path),
			tty_mode: ConsoleMode::Script,
			..Self::interactive()
		}
	}
}

/// Error wrapper for terminal host failures.
#[derive(Debug)]
pub enum ConsoleError {
	Io(std::io::Error),
	MissingScript(PathBuf),
	Message(String),
}

impl Display for ConsoleError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Io(err) => write!(f, "{}", err),
			Self::MissingScript(path) => {
				write!(f, "cannot open script {}", path.display())
			}
			Self::Message(msg) => write!(f, "{}", msg),
		}
	}
}

impl std::error::Error for ConsoleError {}

impl From<std::io::Error> for ConsoleError {
	fn from(value: std::io::Error) -> Self {
		Self::Io(value)
	}
}

impl ConsoleError {
	pub fn exit_code(&self) -> i32 {
		match self {
			ConsoleError::MissingScript(_) => 66,
			ConsoleError::Io(_) | ConsoleError::Message(_) => 70,
		}
	}
}

/// Entry point invoked by the `terminux` binary.
pub fn run_console(
	options: ConsoleOptions,
) -> Result<i32, ConsoleError> {
	let mut session = ConsoleSession::new(options);
	session.run()
}
