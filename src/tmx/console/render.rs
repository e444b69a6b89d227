// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: terminux
// File: render.rs
// Author: Volker Schwaberow <volker@schwaberow.de>
// Copyright (c) 2022 Volker Schwaberow

use super::color::ConsoleLineRole;
use crate::tmx::interpreter::{Terminux, Transition};
use crate::tmx::registry::PASSWORD_PROMPT;

/// Lines to draw after one transition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderBatch {
	pub clear_screen: bool,
	pub lines: Vec<(ConsoleLineRole, String)>,
	/// Prompt to show on the masked password reader instead of a line.
	pub password_prompt: Option<String>,
}

/// Tracks how much of the transcript the host has already drawn.
#[derive(Debug, Clone)]
pub struct TranscriptRenderer {
	drawn: usize,
	echo_on_screen: bool,
}

impl TranscriptRenderer {
	/// `echo_on_screen` is set when the line editor already left the
	/// typed command on screen.
	pub fn new(echo_on_screen: bool) -> Self {
		Self {
			drawn: 0,
			echo_on_screen,
		}
	}

	/// Everything present before the first submission.
	pub fn initial(&mut self, term: &Terminux) -> RenderBatch {
		let lines = term
			.transcript()
			.iter()
			.map(|line| (ConsoleLineRole::Banner, line.clone()))
			.collect();
		self.drawn = term.transcript().len();
		RenderBatch {
			lines,
			..RenderBatch::default()
		}
	}

	pub fn after(
		&mut self,
		term: &Terminux,
		transition: Transition,
	) -> RenderBatch {
		let transcript = term.transcript();
		if transition == Transition::Cleared {
			self.drawn = transcript.len();
			return RenderBatch {
				clear_screen: true,
				..RenderBatch::default()
			};
		}

		let fresh = transcript.get(self.drawn..).unwrap_or_default();
		self.drawn = transcript.len();
		let mut batch = RenderBatch::default();
		let last = fresh.len().saturating_sub(1);
		for (idx, line) in fresh.iter().enumerate() {
			let is_echo = idx == 0
				&& transition != Transition::ChallengeResolved;
			if is_echo && self.echo_on_screen {
				continue;
			}
			let role = if is_echo {
				ConsoleLineRole::Prompt
			} else if line == PASSWORD_PROMPT {
				ConsoleLineRole::Info
			} else if transition == Transition::NotFound && idx == last
			{
				ConsoleLineRole::Warning
			} else {
				ConsoleLineRole::Output
			};
			if role == ConsoleLineRole::Info
				&& transition == Transition::ChallengeArmed
				&& self.echo_on_screen
			{
				batch.password_prompt = Some(line.clone());
				continue;
			}
			batch.lines.push((role, line.clone()));
		}
		batch
	}
}
