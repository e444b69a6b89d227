// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: terminux
// File: terminal_session.rs
// Author: Volker Schwaberow <volker@schwaberow.de>
// Copyright (c) 2022 Volker Schwaberow

use terminux::tmx::registry::PASSWORD_PROMPT;
use terminux::{
	CommandRegistry, InterpreterConfig, InterpreterMode, Output,
	Terminux, Transition,
};

fn quiet_session() -> Terminux {
	Terminux::new(InterpreterConfig {
		banner: None,
		..InterpreterConfig::default()
	})
}

#[test]
fn registered_commands_append_echo_and_output() {
	let mut term = Terminux::default();
	let before = term.transcript().len();
	term.submit_line("uname -a");
	let Output::Lines(lines) = CommandRegistry.lookup("uname -a") else {
		panic!("uname -a must be registered");
	};
	let appended = &term.transcript()[before..];
	assert_eq!(appended[0], "$ uname -a");
	assert_eq!(&appended[1..], lines);
	assert!(!term.is_password_mode());
}

#[test]
fn empty_line_appends_bare_prompt() {
	let mut term = Terminux::default();
	let before = term.transcript().len();
	term.submit_line("");
	assert_eq!(term.transcript().len(), before + 1);
	assert_eq!(term.transcript().last().map(String::as_str), Some("$ "));
}

#[test]
fn clear_resets_transcript() {
	let mut term = Terminux::default();
	term.submit_line("ps aux");
	term.submit_line("clear");
	assert!(term.transcript().is_empty());
}

#[test]
fn sudo_challenge_round_trip() {
	let mut term = quiet_session();
	term.submit_line("sudo cat secret.txt");
	assert!(term.is_password_mode());
	assert_eq!(term.mode(), InterpreterMode::AwaitingPassword);
	assert_eq!(
		term.transcript(),
		["$ sudo cat secret.txt", PASSWORD_PROMPT]
	);

	term.submit_line("");
	assert!(!term.is_password_mode());
	assert_eq!(
		&term.transcript()[2..],
		[
			"Congratulations, agent.",
			"Your mission, should you choose to accept it, is to secure the network.",
			"This message will self-destruct in five seconds.",
			"5... 4... 3... 2... 1... *poof*",
		]
	);
}

#[test]
fn password_line_is_never_looked_up() {
	let mut term = quiet_session();
	term.submit_line("sudo reboot");
	assert_eq!(term.submit_line("clear"), Transition::ChallengeResolved);
	assert!(!term.transcript().is_empty());
	assert!(!term.transcript().iter().any(|line| line == "$ clear"));
}

#[test]
fn unknown_sudo_command_stays_normal() {
	let mut term = quiet_session();
	term.submit_line("sudo rm -rf /");
	assert!(!term.is_password_mode());
	assert_eq!(
		term.transcript().last().map(String::as_str),
		Some("sudo: rm -rf /: command not found")
	);
}

#[test]
fn unknown_command_keeps_original_text() {
	let mut term = quiet_session();
	term.submit_line("Bogus --Flag");
	assert_eq!(
		term.transcript().last().map(String::as_str),
		Some("Command not found: Bogus --Flag")
	);
}

#[test]
fn recall_walks_history_both_ways() {
	let mut term = quiet_session();
	term.submit_line("whoami");
	term.submit_line("ls");

	term.recall_previous();
	assert_eq!(term.pending_input(), "ls");
	term.recall_previous();
	assert_eq!(term.pending_input(), "whoami");
	term.recall_previous();
	assert_eq!(term.pending_input(), "whoami");
	term.recall_next();
	assert_eq!(term.pending_input(), "ls");
	term.recall_next();
	assert_eq!(term.pending_input(), "");
}

#[test]
fn recall_navigation_never_reorders_entries() {
	let mut term = quiet_session();
	for command in ["help", "", "ifconfig", "nope"] {
		term.submit_line(command);
	}
	let snapshot: Vec<String> =
		term.recall().entries().map(str::to_string).collect();
	assert_eq!(snapshot, vec!["nope", "ifconfig", "help"]);

	let transcript_len = term.transcript().len();
	for _ in 0..5 {
		term.recall_previous();
	}
	for _ in 0..2 {
		term.recall_next();
	}
	let after: Vec<String> =
		term.recall().entries().map(str::to_string).collect();
	assert_eq!(after, snapshot);
	assert_eq!(term.transcript().len(), transcript_len);
	assert_eq!(term.pending_input(), "nope");
}

#[test]
fn typing_updates_pending_input_without_touching_transcript() {
	let mut term = Terminux::default();
	let before = term.transcript().to_vec();
	term.update_pending_input("nmap loc");
	assert_eq!(term.pending_input(), "nmap loc");
	assert_eq!(term.masked_pending_input(), "nmap loc");
	assert_eq!(term.transcript(), before.as_slice());
}

#[test]
fn sudo_not_found_reports_normalized_remainder() {
	let mut term = quiet_session();
	term.submit_line("SUDO RM");
	assert_eq!(
		term.transcript(),
		["$ SUDO RM", "sudo: rm: command not found"]
	);
	assert!(!term.is_password_mode());
}

#[test]
fn bare_sudo_prints_usage() {
	let mut term = quiet_session();
	term.submit_line("sudo   ");
	assert_eq!(
		term.transcript(),
		["$ sudo", "usage: sudo [-h | -K | -k | -V]"]
	);
	assert!(!term.is_password_mode());
}

#[test]
fn sudo_with_unprivileged_command_is_not_found() {
	let mut term = quiet_session();
	assert_eq!(term.submit_line("sudo ls"), Transition::NotFound);
	assert_eq!(
		term.transcript(),
		["$ sudo ls", "sudo: ls: command not found"]
	);
	assert_eq!(term.recall().len(), 1);
}
