// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: terminux
// File: color.rs
// Author: Volker Schwaberow <volker@schwaberow.de>
// Copyright (c) 2022 Volker Schwaberow

use colored::{Color, Colorize};
use std::env;
use std::fmt;
use std::io::{self, IsTerminal};
use strum::EnumIter;

use super::ConsoleMode;

/// User-facing color preference selected via `--color`.
#[derive(
	Debug, Clone, Copy, PartialEq, Eq, Default, EnumIter, clap::ValueEnum,
)]
pub enum ColorMode {
	#[default]
	Auto,
	Always,
	Never,
	HighContrast,
}

impl fmt::Display for ColorMode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			ColorMode::Auto => "auto",
			ColorMode::Always => "always",
			ColorMode::Never => "never",
			ColorMode::HighContrast => "high-contrast",
		})
	}
}

/// Represents a single palette entry with a truecolor + ANSI fallback.
#[derive(Debug, Clone, Copy)]
pub struct PaletteColor {
	rgb: (u8, u8, u8),
	fallback: Color,
}

impl PaletteColor {
	pub const fn new(rgb: (u8, u8, u8), fallback: Color) -> Self {
		Self { rgb, fallback }
	}

	pub fn resolve(self, supports_truecolor: bool) -> Color {
		if supports_truecolor {
			Color::TrueColor {
				r: self.rgb.0,
				g: self.rgb.1,
				b: self.rgb.2,
			}
		} else {
			self.fallback
		}
	}
}

/// Palette for terminal-owned lines.
#[derive(Debug, Clone, Copy)]
pub struct TerminalTheme {
	pub prompt: PaletteColor,
	pub banner: PaletteColor,
	pub warning: PaletteColor,
	pub info: PaletteColor,
}

pub const DEFAULT_THEME: TerminalTheme = TerminalTheme {
	prompt: PaletteColor::new((74, 222, 128), Color::Green),
	banner: PaletteColor::new((46, 204, 113), Color::BrightGreen),
	warning: PaletteColor::new((242, 201, 76), Color::Yellow),
	info: PaletteColor::new((86, 204, 242), Color::Cyan),
};

pub const HIGH_CONTRAST_THEME: TerminalTheme = TerminalTheme {
	prompt: PaletteColor::new((255, 255, 255), Color::White),
	banner: PaletteColor::new((0, 255, 0), Color::BrightGreen),
	warning: PaletteColor::new((255, 215, 0), Color::BrightYellow),
	info: PaletteColor::new((173, 216, 230), Color::BrightBlue),
};

/// Describes the environment where the terminal is running.
#[derive(Debug, Clone, Copy)]
pub struct PlatformCapabilityProfile {
	pub supports_ansi: bool,
	pub supports_truecolor: bool,
	pub script_mode: bool,
	pub no_color_env: bool,
}

impl PlatformCapabilityProfile {
	pub fn detect(mode: ConsoleMode) -> Self {
		let script_mode = matches!(mode, ConsoleMode::Script);
		let stdout_is_tty = io::stdout().is_terminal();
		let term = env::var("TERM").unwrap_or_default();
		let dumb_terminal = term.eq_ignore_ascii_case("dumb");
		let supports_ansi = stdout_is_tty && !script_mode && !dumb_terminal;
		Self {
			supports_ansi,
			supports_truecolor: detect_truecolor_hint() && supports_ansi,
			script_mode,
			no_color_env: env::var_os("NO_COLOR").is_some(),
		}
	}

	/// Screen clears follow the terminal, not the palette decision.
	pub fn can_clear_screen(&self) -> bool {
		self.supports_ansi && !self.script_mode
	}
}

fn detect_truecolor_hint() -> bool {
	if let Ok(value) = env::var("COLORTERM") {
		let lower = value.to_ascii_lowercase();
		if lower.contains("truecolor") || lower.contains("24bit") {
			return true;
		}
	}
	if let Ok(term) = env::var("TERM") {
		let lower = term.to_ascii_lowercase();
		return lower.contains("24bit")
			|| lower.contains("truecolor")
			|| lower.contains("256color");
	}
	false
}

/// Logical buckets for rendered lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleLineRole {
	Prompt,
	Banner,
	Warning,
	Info,
	Output,
}

impl ConsoleLineRole {
	/// Scripted command output is printed verbatim.
	pub fn is_styled(self) -> bool {
		!matches!(self, ConsoleLineRole::Output)
	}
}

/// Tracks the current palette/mode decision for the session.
#[derive(Debug, Clone)]
pub struct ColorState {
	pub mode: ColorMode,
	palette: &'static TerminalTheme,
	enabled: bool,
	pub reason: String,
	pub capability: PlatformCapabilityProfile,
}

impl ColorState {
	pub fn new(
		mode: ColorMode,
		capability: PlatformCapabilityProfile,
	) -> Self {
		let palette = match mode {
			ColorMode::HighContrast => &HIGH_CONTRAST_THEME,
			_ => &DEFAULT_THEME,
		};
		let (enabled, reason) = match mode {
			ColorMode::Never => (false, "disabled via --color=never"),
			ColorMode::Always | ColorMode::HighContrast => {
				(true, "forced color via override")
			}
			ColorMode::Auto if capability.no_color_env => {
				(false, "disabled via NO_COLOR")
			}
			ColorMode::Auto if capability.script_mode => {
				(false, "script mode defaults to monochrome")
			}
			ColorMode::Auto if !capability.supports_ansi => {
				(false, "terminal lacks ANSI capability")
			}
			ColorMode::Auto => (true, "auto (ANSI capable)"),
		};

		Self {
			mode,
			palette,
			enabled,
			reason: reason.to_string(),
			capability,
		}
	}

	pub fn should_emit(&self) -> bool {
		self.enabled
	}

	pub fn allows_coloring(&self, role: ConsoleLineRole) -> bool {
		self.enabled && role.is_styled()
	}

	pub fn color_for(&self, role: ConsoleLineRole) -> Option<PaletteColor> {
		match role {
			ConsoleLineRole::Prompt => Some(self.palette.prompt),
			ConsoleLineRole::Banner => Some(self.palette.banner),
			ConsoleLineRole::Warning => Some(self.palette.warning),
			ConsoleLineRole::Info => Some(self.palette.info),
			ConsoleLineRole::Output => None,
		}
	}

	pub fn format(
		&self,
		role: ConsoleLineRole,
		message: &str,
	) -> String {
		if !self.allows_coloring(role) {
			return message.to_string();
		}
		match self.color_for(role) {
			Some(color) => message
				.color(color.resolve(self.capability.supports_truecolor))
				.to_string(),
			None => message.to_string(),
		}
	}
}
