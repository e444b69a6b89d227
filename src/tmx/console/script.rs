// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: terminux
// File: script.rs
// Author: Volker Schwaberow <volker@schwaberow.de>
// Copyright (c) 2022 Volker Schwaberow

use super::session::ConsoleSession;
use super::ConsoleError;
use std::borrow::Cow;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Replays a file through the interpreter, one submitted line per row.
///
/// Lines starting with `#` are comments unless a password is expected,
/// in which case every row is the challenge response.
pub fn run_script(
	session: &mut ConsoleSession,
	path: &Path,
) -> Result<i32, ConsoleError> {
	let file = File::open(path).map_err(|err| match err.kind() {
		io::ErrorKind::NotFound => {
			ConsoleError::MissingScript(path.to_path_buf())
		}
		_ => ConsoleError::from(err),
	})?;
	let mut reader = BufReader::new(file);

	let initial = session.initial_batch()?;
	session.draw(&initial)?;
	let mut raw = Vec::new();
	loop {
		raw.clear();
		if reader.read_until(b'\n', &mut raw)? == 0 {
			break;
		}
		let line = decode_row(&raw);
		if !session.is_password_mode()? && line.trim_start().starts_with('#')
		{
			continue;
		}
		let batch = session.submit(line.as_ref())?;
		session.draw(&batch)?;
	}

	if session.is_password_mode()? {
		session.warn_stderr("script ended while a sudo password was pending");
	}
	Ok(0)
}

/// Strips the row terminator; invalid UTF-8 becomes U+FFFD.
fn decode_row(raw: &[u8]) -> Cow<'_, str> {
	let row = raw.strip_suffix(b"\n").unwrap_or(raw);
	let row = row.strip_suffix(b"\r").unwrap_or(row);
	String::from_utf8_lossy(row)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn rows_lose_their_terminators() {
		assert_eq!(decode_row(b"whoami\r\n"), "whoami");
		assert_eq!(decode_row(b"ls -la"), "ls -la");
		assert_eq!(decode_row(b"\n"), "");
	}

	#[test]
	fn invalid_utf8_is_replaced_not_rejected() {
		assert_eq!(decode_row(b"who\xffami\n"), "who\u{FFFD}ami");
	}
}
