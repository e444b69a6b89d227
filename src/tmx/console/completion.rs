// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: terminux
// File: completion.rs
// Author: Volker Schwaberow <volker@schwaberow.de>
// Copyright (c) 2022 Volker Schwaberow

use crate::tmx::registry::CommandRegistry;
use rustyline::completion::Pair;

/// Suggests registry commands for the text left of the cursor.
///
/// Keys are whole command lines, so the candidate always replaces the
/// buffer from its first column.
#[derive(Debug, Clone, Default)]
pub struct CompletionEngine {
	registry: CommandRegistry,
}

impl CompletionEngine {
	pub fn suggest(&self, buffer: &str, cursor: usize) -> Vec<&'static str> {
		let cursor = cursor.min(buffer.len());
		let Some(typed) = buffer.get(..cursor) else {
			return Vec::new();
		};
		let prefix = typed.trim_start().to_lowercase();
		let mut matches: Vec<&'static str> = self
			.registry
			.commands()
			.filter(|command| command.starts_with(&prefix))
			.collect();
		matches.sort_unstable();
		matches
	}

	pub fn pairs(&self, buffer: &str, cursor: usize) -> Vec<Pair> {
		self.suggest(buffer, cursor)
			.into_iter()
			.map(|command| Pair {
				display: command.to_string(),
				replacement: command.to_string(),
			})
			.collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn prefix_matches_whole_command_keys() {
		let engine = CompletionEngine::default();
		assert_eq!(
			engine.suggest("cat ", 4),
			vec![
				"cat exploit.sh",
				"cat kernel_log.txt",
				"cat passwords.txt",
				"cat secret.txt",
			]
		);
	}

	#[test]
	fn privileged_commands_are_offered_after_sudo() {
		let engine = CompletionEngine::default();
		assert_eq!(
			engine.suggest("SUDO ", 5),
			vec!["sudo cat secret.txt", "sudo reboot"]
		);
	}

	#[test]
	fn only_text_before_cursor_counts() {
		let engine = CompletionEngine::default();
		assert_eq!(engine.suggest("whoXXX", 3), vec!["whoami"]);
		assert!(engine.suggest("zzz", 3).is_empty());
	}
}
