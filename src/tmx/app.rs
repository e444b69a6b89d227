// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: terminux
// File: app.rs
// Author: Volker Schwaberow <volker@schwaberow.de>
// Copyright (c) 2022 Volker Schwaberow

use crate::tmx::console::color::ColorMode;
use crate::tmx::console::{
	run_console, ConsoleError, ConsoleMode, ConsoleOptions,
};
use crate::tmx::interpreter::InterpreterConfig;
use crate::tmx::registry::CommandRegistry;
use clap::{crate_name, Arg, ArgAction, ArgMatches};
use clap_complete::{generate, Generator, Shell};
use std::path::PathBuf;
use strum::IntoEnumIterator;
use tracing::debug;
use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable holding the `tracing` filter directive.
pub const LOG_ENV: &str = "TERMINUX_LOG";

const HELP_TEMPLATE: &str = "{before-help}{name} {version}
Written by {author-with-newline}{about-with-newline}
Commands are matched literally (e.g. `ls -la`, `cat secret.txt`);
`sudo <cmd>` asks for a password, and any password works.
{usage-heading} {usage}

{all-args}{after-help}
";

pub fn build_cli() -> clap::Command {
	let color_modes = ColorMode::iter()
		.map(|mode| mode.to_string())
		.collect::<Vec<_>>()
		.join(", ");
	clap::Command::new(crate_name!())
		.version(clap::crate_version!())
		.author(clap::crate_authors!())
		.about(clap::crate_description!())
		.help_template(HELP_TEMPLATE)
		.arg(
			Arg::new("script")
				.long("script")
				.value_name("PATH")
				.value_parser(clap::value_parser!(PathBuf))
				.help("Replay a file of commands instead of reading the keyboard"),
		)
		.arg(
			Arg::new("color")
				.long("color")
				.value_name("MODE")
				.value_parser(clap::value_parser!(ColorMode))
				.default_value("auto")
				.help(format!("Color output ({})", color_modes)),
		)
		.arg(
			Arg::new("banner")
				.long("banner")
				.value_name("TEXT")
				.conflicts_with("no-banner")
				.help("Replace the welcome banner"),
		)
		.arg(
			Arg::new("no-banner")
				.long("no-banner")
				.action(ArgAction::SetTrue)
				.help("Start with an empty transcript"),
		)
		.subcommand(
			clap::Command::new("commands")
				.about("List every command the terminal understands"),
		)
		.subcommand(
			clap::Command::new("completions")
				.about("Generate shell completions")
				.arg(
					Arg::new("SHELL")
						.required(true)
						.value_parser(clap::value_parser!(Shell)),
				),
		)
}

fn init_logging() {
	let filter = EnvFilter::try_from_env(LOG_ENV)
		.unwrap_or_else(|_| EnvFilter::new("warn"));
	let _ = fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.try_init();
}

fn console_options(matches: &ArgMatches) -> ConsoleOptions {
	let mut options = match matches.get_one::<PathBuf>("script") {
		Some(path) => ConsoleOptions::from_script(path.clone()),
		None => ConsoleOptions::interactive(),
	};
	if let Some(mode) = matches.get_one::<ColorMode>("color") {
		options.color_mode = *mode;
	}
	let banner = if matches.get_flag("no-banner") {
		None
	} else {
		matches
			.get_one::<String>("banner")
			.cloned()
			.or(options.interpreter.banner.take())
	};
	options.interpreter = InterpreterConfig {
		banner,
		..options.interpreter
	};
	options
}

/// Parses the command line and runs the requested mode.
pub fn run() -> Result<i32, ConsoleError> {
	init_logging();
	let matches = build_cli().get_matches();

	match matches.subcommand() {
		Some(("commands", _)) => {
			for command in CommandRegistry.commands() {
				println!("{}", command);
			}
			Ok(0)
		}
		Some(("completions", s)) => {
			if let Some(shell) = s.get_one::<Shell>("SHELL") {
				let mut capp = build_cli();
				print_completions(*shell, &mut capp);
			}
			Ok(0)
		}
		_ => {
			let options = console_options(&matches);
			let interactive =
				options.tty_mode == ConsoleMode::Interactive;
			debug!(
				script = ?options.script_path,
				interactive,
				"starting terminal"
			);
			run_console(options)
		}
	}
}

fn print_completions<G: Generator>(gen: G, cmd: &mut clap::Command) {
	generate(
		gen,
		cmd,
		cmd.get_name().to_string(),
		&mut std::io::stdout(),
	);
}
