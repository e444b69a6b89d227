// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: terminux
// File: session.rs
// Author: Volker Schwaberow <volker@schwaberow.de>
// Copyright (c) 2022 Volker Schwaberow

use super::color::{ColorState, ConsoleLineRole, PlatformCapabilityProfile};
use super::completion::CompletionEngine;
use super::render::{RenderBatch, TranscriptRenderer};
use super::script;
use super::{ConsoleError, ConsoleMode, ConsoleOptions};
use crate::tmx::interpreter::{Terminux, Transition};
use colored::control;
use dialoguer::Password;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::{
	ValidationContext, ValidationResult, Validator,
};
use rustyline::{
	Cmd, CompletionType, ConditionalEventHandler, Config, Context,
	Editor, Event, EventContext, EventHandler, Helper, KeyCode,
	KeyEvent, Modifiers, Movement, RepeatCount,
};
use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, warn};

const CLEAR_SCREEN: &str = "\x1B[2J\x1B[1;1H";

/// Hosts one interpreter on the real terminal (interactive or scripted).
pub struct ConsoleSession {
	options: ConsoleOptions,
	terminal: Arc<Mutex<Terminux>>,
	renderer: TranscriptRenderer,
	color: ColorState,
}

impl ConsoleSession {
	pub fn new(options: ConsoleOptions) -> Self {
		let capability =
			PlatformCapabilityProfile::detect(options.tty_mode);
		let color = ColorState::new(options.color_mode, capability);
		control::set_override(color.should_emit());
		debug!(mode = %color.mode, reason = %color.reason, "color decided");
		let terminal = Terminux::new(options.interpreter.clone());
		let renderer = TranscriptRenderer::new(matches!(
			options.tty_mode,
			ConsoleMode::Interactive
		));
		Self {
			options,
			terminal: Arc::new(Mutex::new(terminal)),
			renderer,
			color,
		}
	}

	pub fn run(&mut self) -> Result<i32, ConsoleError> {
		match self.options.tty_mode {
			ConsoleMode::Interactive => self.run_interactive(),
			ConsoleMode::Script => self.run_scripted(),
		}
	}

	fn run_scripted(&mut self) -> Result<i32, ConsoleError> {
		let Some(path) = self.options.script_path.clone() else {
			return Err(ConsoleError::Message(
				"script path required for --script".into(),
			));
		};
		script::run_script(self, &path)
	}

	fn run_interactive(&mut self) -> Result<i32, ConsoleError> {
		let config = Config::builder()
			.completion_type(CompletionType::List)
			.auto_add_history(false)
			.build();
		let mut editor =
			Editor::<TerminalHelper, DefaultHistory>::with_config(
				config,
			)
			.map_err(|err| ConsoleError::Message(err.to_string()))?;
		editor.set_helper(Some(TerminalHelper::default()));
		editor.bind_sequence(
			KeyEvent(KeyCode::Up, Modifiers::NONE),
			EventHandler::Conditional(Box::new(RecallHandler {
				terminal: Arc::clone(&self.terminal),
				direction: RecallDirection::Older,
			})),
		);
		editor.bind_sequence(
			KeyEvent(KeyCode::Down, Modifiers::NONE),
			EventHandler::Conditional(Box::new(RecallHandler {
				terminal: Arc::clone(&self.terminal),
				direction: RecallDirection::Newer,
			})),
		);

		let initial = self.initial_batch()?;
		self.draw(&initial)?;
		let mut password_prompt: Option<String> = None;
		loop {
			let line = match password_prompt.take() {
				Some(prompt) => self.read_password(&prompt)?,
				None => {
					let prompt = self.render_prompt();
					match editor.readline(&prompt) {
						Ok(line) => line,
						Err(ReadlineError::Interrupted) => {
							self.emit(ConsoleLineRole::Warning, "^C");
							continue;
						}
						Err(ReadlineError::Eof) => {
							println!();
							return Ok(0);
						}
						Err(err) => {
							return Err(ConsoleError::Message(
								err.to_string(),
							));
						}
					}
				}
			};
			let batch = self.submit(&line)?;
			password_prompt = batch.password_prompt.clone();
			self.draw(&batch)?;
		}
	}

	/// Feeds one committed line to the interpreter and returns what to draw.
	pub(crate) fn submit(
		&mut self,
		line: &str,
	) -> Result<RenderBatch, ConsoleError> {
		let terminal = Arc::clone(&self.terminal);
		let mut term = terminal.lock().map_err(poisoned)?;
		let transition: Transition = term.submit_line(line);
		Ok(self.renderer.after(&term, transition))
	}

	pub(crate) fn initial_batch(
		&mut self,
	) -> Result<RenderBatch, ConsoleError> {
		let terminal = Arc::clone(&self.terminal);
		let term = terminal.lock().map_err(poisoned)?;
		Ok(self.renderer.initial(&term))
	}

	pub(crate) fn is_password_mode(&self) -> Result<bool, ConsoleError> {
		Ok(self.lock()?.is_password_mode())
	}

	fn lock(&self) -> Result<MutexGuard<'_, Terminux>, ConsoleError> {
		self.terminal.lock().map_err(poisoned)
	}

	fn read_password(&self, prompt: &str) -> Result<String, ConsoleError> {
		let label = prompt.trim_end().trim_end_matches(':');
		Password::new()
			.with_prompt(self.color.format(ConsoleLineRole::Info, label))
			.allow_empty_password(true)
			.interact()
			.map_err(|err| ConsoleError::Message(err.to_string()))
	}

	fn render_prompt(&self) -> String {
		let base = format!("{} ", self.options.interpreter.prompt);
		self.color.format(ConsoleLineRole::Prompt, &base)
	}

	pub(crate) fn draw(&self, batch: &RenderBatch) -> io::Result<()> {
		let stdout = io::stdout();
		let mut out = stdout.lock();
		if batch.clear_screen && self.color.capability.can_clear_screen() {
			write!(out, "{}", CLEAR_SCREEN)?;
		}
		for (role, line) in &batch.lines {
			writeln!(out, "{}", self.color.format(*role, line))?;
		}
		out.flush()
	}

	pub(crate) fn emit(&self, role: ConsoleLineRole, message: &str) {
		println!("{}", self.color.format(role, message));
	}

	pub(crate) fn warn_stderr(&self, message: &str) {
		warn!("{}", message);
		eprintln!(
			"{}",
			self.color.format(ConsoleLineRole::Warning, message)
		);
	}
}

fn poisoned<T>(_: std::sync::PoisonError<T>) -> ConsoleError {
	ConsoleError::Message("terminal state poisoned".into())
}

#[derive(Debug, Clone, Copy)]
enum RecallDirection {
	Older,
	Newer,
}

/// Routes Up/Down to the interpreter's recall stack.
struct RecallHandler {
	terminal: Arc<Mutex<Terminux>>,
	direction: RecallDirection,
}

impl ConditionalEventHandler for RecallHandler {
	fn handle(
		&self,
		_: &Event,
		_: RepeatCount,
		_: bool,
		ctx: &EventContext,
	) -> Option<Cmd> {
		let mut term = self.terminal.lock().ok()?;
		term.update_pending_input(ctx.line());
		match self.direction {
			RecallDirection::Older => term.recall_previous(),
			RecallDirection::Newer => term.recall_next(),
		}
		Some(Cmd::Replace(
			Movement::WholeBuffer,
			Some(term.pending_input().to_string()),
		))
	}
}

#[derive(Default)]
struct TerminalHelper {
	engine: CompletionEngine,
}

impl Helper for TerminalHelper {}

impl Completer for TerminalHelper {
	type Candidate = Pair;

	fn complete(
		&self,
		line: &str,
		pos: usize,
		_: &Context<'_>,
	) -> Result<(usize, Vec<Pair>), ReadlineError> {
		Ok((0, self.engine.pairs(line, pos)))
	}
}

impl Hinter for TerminalHelper {
	type Hint = String;

	fn hint(
		&self,
		_: &str,
		_: usize,
		_: &Context<'_>,
	) -> Option<Self::Hint> {
		None
	}
}

impl Highlighter for TerminalHelper {}

impl Validator for TerminalHelper {
	fn validate(
		&self,
		_: &mut ValidationContext<'_>,
	) -> Result<ValidationResult, ReadlineError> {
		Ok(ValidationResult::Valid(None))
	}
}
