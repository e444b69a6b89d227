// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: terminux
// File: interpreter.rs
// Author: Volker Schwaberow <volker@schwaberow.de>
// Copyright (c) 2022 Volker Schwaberow

use super::recall::{RecallStack, DEFAULT_MAX_RECALL};
use super::registry::{
	normalize, privileged_key, CommandRegistry, Output, SUDO_PREFIX,
};
use strum::Display;
use tracing::{debug, trace};

/// Banner seeded into a fresh transcript.
pub const DEFAULT_BANNER: &str =
	"Welcome to Terminux! Type \"help\" to see available commands.";

/// Prompt symbol used for echo lines.
pub const DEFAULT_PROMPT: &str = "$";

/// Shown when a challenge names an entry the registry no longer holds.
const CHALLENGE_FAILED: &str = "Sorry, try again.";

/// Session settings fixed at creation.
#[derive(Debug, Clone)]
pub struct InterpreterConfig {
	pub banner: Option<String>,
	pub prompt: String,
	pub max_recall: usize,
}

impl Default for InterpreterConfig {
	fn default() -> Self {
		Self {
			banner: Some(DEFAULT_BANNER.to_string()),
			prompt: DEFAULT_PROMPT.to_string(),
			max_recall: DEFAULT_MAX_RECALL,
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum InterpreterMode {
	Normal,
	AwaitingPassword,
}

/// Which rule handled a submitted line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum Transition {
	Blank,
	Printed,
	Cleared,
	NotFound,
	ChallengeArmed,
	ChallengeResolved,
}

/// A pending `sudo` password prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Challenge {
	pub target_key: String,
}

/// One simulated shell session: transcript, input buffer, recall and
/// the sudo challenge.
#[derive(Debug, Clone)]
pub struct Terminux {
	registry: CommandRegistry,
	prompt: String,
	transcript: Vec<String>,
	pending_input: String,
	recall: RecallStack,
	challenge: Option<Challenge>,
}

impl Default for Terminux {
	fn default() -> Self {
		Self::new(InterpreterConfig::default())
	}
}

impl Terminux {
	pub fn new(config: InterpreterConfig) -> Self {
		Self {
			registry: CommandRegistry,
			prompt: config.prompt,
			transcript: config.banner.into_iter().collect(),
			pending_input: String::new(),
			recall: RecallStack::with_capacity(config.max_recall),
			challenge: None,
		}
	}

	/// Commits one line of input and updates the transcript.
	pub fn submit_line(&mut self, text: &str) -> Transition {
		self.pending_input.clear();

		if let Some(challenge) = self.challenge.take() {
			return self.resolve_challenge(challenge);
		}

		let command = text.trim();
		if command.is_empty() {
			self.transcript.push(self.echo(""));
			debug!(transition = %Transition::Blank, "blank line");
			return Transition::Blank;
		}
		self.recall.push(command);

		let key = normalize(command);
		let transition = if key.starts_with(SUDO_PREFIX) {
			self.run_privileged(command, &key)
		} else {
			self.run_command(command, &key)
		};
		debug!(
			command = %key,
			transition = %transition,
			mode = %self.mode(),
			"line submitted"
		);
		transition
	}

	fn run_command(&mut self, command: &str, key: &str) -> Transition {
		match self.registry.lookup(key) {
			Output::ClearScreen => {
				self.transcript.clear();
				Transition::Cleared
			}
			Output::Lines(lines) => {
				self.transcript.push(self.echo(command));
				self.transcript
					.extend(lines.iter().map(|line| line.to_string()));
				Transition::Printed
			}
			Output::NotFound => {
				self.transcript.push(self.echo(command));
				self.transcript
					.push(format!("Command not found: {}", command));
				Transition::NotFound
			}
		}
	}

	fn run_privileged(&mut self, command: &str, key: &str) -> Transition {
		self.transcript.push(self.echo(command));
		match self.registry.lookup_privileged(key) {
			Output::Lines(lines) if !lines.is_empty() => {
				self.transcript.push(lines[0].to_string());
				let rest = &key[SUDO_PREFIX.len()..];
				self.challenge = Some(Challenge {
					target_key: privileged_key(rest),
				});
				Transition::ChallengeArmed
			}
			_ => {
				let rest = key[SUDO_PREFIX.len()..].trim();
				self.transcript
					.push(format!("sudo: {}: command not found", rest));
				Transition::NotFound
			}
		}
	}

	fn resolve_challenge(&mut self, challenge: Challenge) -> Transition {
		match self.registry.lookup_privileged(&challenge.target_key) {
			Output::Lines(lines) => {
				self.transcript.extend(
					lines.iter().skip(1).map(|line| line.to_string()),
				);
			}
			_ => self.transcript.push(CHALLENGE_FAILED.to_string()),
		}
		debug!(
			command = %challenge.target_key,
			"challenge resolved"
		);
		Transition::ChallengeResolved
	}

	fn echo(&self, command: &str) -> String {
		format!("{} {}", self.prompt, command)
	}

	/// Replaces the uncommitted input buffer.
	pub fn update_pending_input(&mut self, text: &str) {
		self.pending_input.clear();
		self.pending_input.push_str(text);
	}

	/// Loads the next older command into the input buffer.
	///
	/// Recall is inert while a password is expected.
	pub fn recall_previous(&mut self) {
		if self.is_password_mode() {
			return;
		}
		if let Some(entry) = self.recall.older() {
			self.pending_input = entry.to_string();
		}
		trace!(
			cursor = ?self.recall.cursor(),
			depth = self.recall.len(),
			"recall previous"
		);
	}

	/// Loads the next newer command, or clears the buffer once browsing
	/// ends.
	pub fn recall_next(&mut self) {
		if self.is_password_mode() {
			return;
		}
		if let Some(entry) = self.recall.newer() {
			self.pending_input = entry.to_string();
		}
		trace!(
			cursor = ?self.recall.cursor(),
			depth = self.recall.len(),
			"recall next"
		);
	}

	pub fn transcript(&self) -> &[String] {
		&self.transcript
	}

	pub fn pending_input(&self) -> &str {
		&self.pending_input
	}

	/// The input buffer as a password field should draw it.
	pub fn masked_pending_input(&self) -> String {
		if self.is_password_mode() {
			"*".repeat(self.pending_input.chars().count())
		} else {
			self.pending_input.clone()
		}
	}

	pub fn is_password_mode(&self) -> bool {
		self.challenge.is_some()
	}

	pub fn mode(&self) -> InterpreterMode {
		if self.is_password_mode() {
			InterpreterMode::AwaitingPassword
		} else {
			InterpreterMode::Normal
		}
	}

	pub fn challenge(&self) -> Option<&Challenge> {
		self.challenge.as_ref()
	}

	pub fn recall(&self) -> &RecallStack {
		&self.recall
	}

	pub fn registry(&self) -> &CommandRegistry {
		&self.registry
	}
}
