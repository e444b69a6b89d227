// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: terminux
// File: recall.rs
// Author: Volker Schwaberow <volker@schwaberow.de>
// Copyright (c) 2022 Volker Schwaberow

use std::collections::VecDeque;

/// Maximum number of commands retained for recall.
pub const DEFAULT_MAX_RECALL: usize = 1000;

/// Previously submitted commands, most recent first, plus a browse cursor.
#[derive(Debug, Clone)]
pub struct RecallStack {
	entries: VecDeque<String>,
	cursor: Option<usize>,
	capacity: usize,
}

impl Default for RecallStack {
	fn default() -> Self {
		Self::with_capacity(DEFAULT_MAX_RECALL)
	}
}

impl RecallStack {
	pub fn with_capacity(capacity: usize) -> Self {
		Self {
			entries: VecDeque::new(),
			cursor: None,
			capacity: capacity.max(1),
		}
	}

	/// Records a submitted command and stops browsing.
	pub fn push(&mut self, command: &str) {
		let command = command.trim();
		if command.is_empty() {
			return;
		}
		self.entries.push_front(command.to_string());
		if self.entries.len() > self.capacity {
			self.entries.pop_back();
		}
		self.cursor = None;
	}

	/// Steps towards older commands. Returns the entry now selected, if
	/// the cursor moved.
	pub fn older(&mut self) -> Option<&str> {
		let next = self.cursor.map_or(0, |idx| idx + 1);
		if next >= self.entries.len() {
			return None;
		}
		self.cursor = Some(next);
		self.entries.get(next).map(String::as_str)
	}

	/// Steps towards newer commands. `Some("")` means browsing ended.
	pub fn newer(&mut self) -> Option<&str> {
		match self.cursor? {
			0 => {
				self.cursor = None;
				Some("")
			}
			idx => {
				self.cursor = Some(idx - 1);
				self.entries.get(idx - 1).map(String::as_str)
			}
		}
	}

	pub fn cursor(&self) -> Option<usize> {
		self.cursor
	}

	pub fn entries(&self) -> impl Iterator<Item = &str> {
		self.entries.iter().map(String::as_str)
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn stack(commands: &[&str]) -> RecallStack {
		let mut stack = RecallStack::default();
		for command in commands {
			stack.push(command);
		}
		stack
	}

	#[test]
	fn previous_walks_towards_older_entries() {
		let mut stack = stack(&["whoami", "ls"]);
		assert_eq!(stack.older(), Some("ls"));
		assert_eq!(stack.older(), Some("whoami"));
		assert_eq!(stack.older(), None);
		assert_eq!(stack.cursor(), Some(1));
	}

	#[test]
	fn next_returns_to_blank_input() {
		let mut stack = stack(&["whoami", "ls"]);
		stack.older();
		stack.older();
		assert_eq!(stack.newer(), Some("ls"));
		assert_eq!(stack.newer(), Some(""));
		assert_eq!(stack.cursor(), None);
		assert_eq!(stack.newer(), None);
	}

	#[test]
	fn empty_stack_never_moves_cursor() {
		let mut stack = RecallStack::default();
		assert_eq!(stack.older(), None);
		assert_eq!(stack.cursor(), None);
	}

	#[test]
	fn push_resets_cursor_and_skips_blank() {
		let mut stack = stack(&["ls"]);
		stack.older();
		stack.push("   ");
		assert_eq!(stack.cursor(), Some(0));
		stack.push("  whoami ");
		assert_eq!(stack.cursor(), None);
		assert_eq!(
			stack.entries().collect::<Vec<_>>(),
			vec!["whoami", "ls"]
		);
	}

	#[test]
	fn capacity_evicts_oldest() {
		let mut stack = RecallStack::with_capacity(2);
		stack.push("a");
		stack.push("b");
		stack.push("c");
		assert_eq!(stack.entries().collect::<Vec<_>>(), vec!["c", "b"]);
		assert_eq!(stack.len(), 2);
	}
}
