// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: terminux
// File: registry.rs
// Author: Volker Schwaberow <volker@schwaberow.de>
// Copyright (c) 2022 Volker Schwaberow

/// Literal prompt that opens every privileged entry.
pub const PASSWORD_PROMPT: &str = "[sudo] password for guest:";

/// Prefix routing a command to the privileged table.
pub const SUDO_PREFIX: &str = "sudo ";

/// Scripted response for a registry key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
	Lines(&'static [&'static str]),
	ClearScreen,
	NotFound,
}

enum Entry {
	Lines(&'static [&'static str]),
	Clear,
}

const COMMANDS: &[(&str, Entry)] = &[
	(
		"help",
		Entry::Lines(&[
			"Terminux v1.1 - CourseCampus Shell",
			"Available commands:",
			"  help          - Show this help message",
			"  ls [-la]      - List files in the current directory",
			"  cat <file>    - Display content of a file",
			"  uname -a      - Print system information",
			"  ifconfig      - Display network configuration",
			"  ps aux        - List running processes",
			"  nmap localhost- Scan for open ports",
			"  sudo <cmd>    - Execute a command as superuser",
			"  clear         - Clear the terminal screen",
			"  whoami        - Display current user",
		]),
	),
	(
		"ls",
		Entry::Lines(&[
			"secret.txt  passwords.txt  exploit.sh  kernel_log.txt",
		]),
	),
	(
		"ls -la",
		Entry::Lines(&[
			"total 16",
			"drwxr-xr-x 2 guest guest 4096 Jul 21 10:30 .",
			"drwxr-xr-x 4 root  root  4096 Jul 21 10:28 ..",
			"-rwx--x--x 1 guest guest  134 Jul 21 10:29 exploit.sh",
			"-rw-r--r-- 1 root  root   111 Jul 21 10:29 kernel_log.txt",
			"-rw------- 1 guest guest   42 Jul 21 10:29 passwords.txt",
			"-rw-r----- 1 root  guest  150 Jul 21 10:28 secret.txt",
		]),
	),
	(
		"cat secret.txt",
		Entry::Lines(&["Access Denied. Try: sudo cat secret.txt"]),
	),
	(
		"cat passwords.txt",
		Entry::Lines(&[
			"root:x:0:0:root:/root:/bin/bash",
			"guest:x:1000:1000:Guest:/home/guest:/bin/bash",
			"# Hmm, maybe not the actual passwords. Good.",
		]),
	),
	(
		"cat exploit.sh",
		Entry::Lines(&[
			"#!/bin/bash",
			"echo \"Hacking in progress...\"",
			"for i in {1..100}; do",
			"  echo -ne \"Progress: [$i%]\\r\"",
			"  sleep 0.05",
			"done",
			"echo \"\\nJust kidding! Stay safe online!\"",
		]),
	),
	(
		"cat kernel_log.txt",
		Entry::Lines(&[
			"[ 0.000000] Linux version 5.15.0-41-generic (buildd@lgw01-amd64-039) ...",
			"[ 0.000001] Command line: BOOT_IMAGE=/boot/vmlinuz-5.15.0-41-generic root=UUID=... ro quiet splash",
			"[ 0.000002] Kernel command line: BOOT_IMAGE=...",
			"[ 1.234567] usb 1-1: new high-speed USB device number 2 using xhci_hcd",
			"[ 2.345678] audit: type=1400 apparmor=\"DENIED\" operation=\"open\" profile=\"/usr/sbin/sshd\" ...",
		]),
	),
	("whoami", Entry::Lines(&["guest"])),
	("clear", Entry::Clear),
	(
		"uname -a",
		Entry::Lines(&[
			"Linux terminux 5.15.0-41-generic #44-Ubuntu SMP Wed Jun 22 14:20:53 UTC 2022 x86_64 x86_64 x86_64 GNU/Linux",
		]),
	),
	(
		"ifconfig",
		Entry::Lines(&[
			"eth0: flags=4163<UP,BROADCAST,RUNNING,MULTICAST>  mtu 1500",
			"        inet 172.17.0.2  netmask 255.255.0.0  broadcast 172.17.255.255",
			"        ether 02:42:ac:11:00:02  txqueuelen 0  (Ethernet)",
			"lo: flags=73<UP,LOOPBACK,RUNNING>  mtu 65536",
			"        inet 127.0.0.1  netmask 255.0.0.0",
			"        loop  txqueuelen 1000  (Local Loopback)",
		]),
	),
	(
		"ps aux",
		Entry::Lines(&[
			"USER         PID %CPU %MEM    VSZ   RSS TTY      STAT START   TIME COMMAND",
			"root           1  0.0  0.1  16856  9380 ?        Ss   10:28   0:01 /sbin/init",
			"root         345  0.0  0.0   2432   780 ?        S    10:28   0:00 /usr/sbin/acpid",
			"root         512  0.0  0.2 263884 12180 ?        Ssl  10:28   0:05 /usr/sbin/sshd -D",
			"guest       1234  0.1  0.5 123456 45678 pts/0    Ss   10:30   0:01 /bin/bash",
			"guest       1250  0.0  0.1  12345  1234 pts/0    R+   10:32   0:00 ps aux",
		]),
	),
	(
		"nmap localhost",
		Entry::Lines(&[
			"Starting Nmap 7.80 ( https://nmap.org ) at 2024-07-21 10:33 UTC",
			"Nmap scan report for localhost (127.0.0.1)",
			"Host is up (0.00012s latency).",
			"Not shown: 998 closed ports",
			"PORT   STATE SERVICE",
			"22/tcp open  ssh",
			"80/tcp open  http",
			"Nmap done: 1 IP address (1 host up) scanned in 0.08 seconds",
		]),
	),
	("sudo", Entry::Lines(&["usage: sudo [-h | -K | -k | -V]"])),
];

const PRIVILEGED: &[(&str, &[&str])] = &[
	(
		"sudo cat secret.txt",
		&[
			PASSWORD_PROMPT,
			"Congratulations, agent.",
			"Your mission, should you choose to accept it, is to secure the network.",
			"This message will self-destruct in five seconds.",
			"5... 4... 3... 2... 1... *poof*",
		],
	),
	(
		"sudo reboot",
		&[
			PASSWORD_PROMPT,
			"Broadcast message from root@terminux (somewhere) (Sun Jul 21 10:40:00 2024):",
			"",
			"The system is going down for reboot NOW!",
			"Connection to terminux closed by remote host.",
			"Connection to terminux closed.",
		],
	),
];

/// Trims and lower-cases raw input into a registry key.
pub fn normalize(command: &str) -> String {
	command.trim().to_lowercase()
}

/// Static lookup over the scripted command catalog.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandRegistry;

impl CommandRegistry {
	/// Resolves a command against the unprivileged table.
	pub fn lookup(&self, command: &str) -> Output {
		let key = normalize(command);
		COMMANDS
			.iter()
			.find(|(name, _)| *name == key)
			.map(|(_, entry)| match entry {
				Entry::Lines(lines) => Output::Lines(*lines),
				Entry::Clear => Output::ClearScreen,
			})
			.unwrap_or(Output::NotFound)
	}

	/// Resolves a `sudo <command>` line against the privileged table.
	///
	/// The returned lines include the leading password prompt.
	pub fn lookup_privileged(&self, command: &str) -> Output {
		let key = normalize(command);
		let Some(rest) = key.strip_prefix(SUDO_PREFIX) else {
			return Output::NotFound;
		};
		let key = privileged_key(rest);
		PRIVILEGED
			.iter()
			.find(|(name, _)| *name == key)
			.map(|(_, lines)| Output::Lines(*lines))
			.unwrap_or(Output::NotFound)
	}

	/// Every key from both tables, in declaration order.
	pub fn commands(&self) -> impl Iterator<Item = &'static str> {
		COMMANDS
			.iter()
			.map(|(name, _)| *name)
			.chain(PRIVILEGED.iter().map(|(name, _)| *name))
	}
}

/// Builds the privileged key for the text following `sudo `.
pub fn privileged_key(rest: &str) -> String {
	format!("{}{}", SUDO_PREFIX, rest.trim())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn lookup_is_case_insensitive_and_trimmed() {
		let registry = CommandRegistry;
		assert_eq!(
			registry.lookup("  WhoAmI "),
			Output::Lines(&["guest"])
		);
	}

	#[test]
	fn keys_with_arguments_are_distinct() {
		let registry = CommandRegistry;
		let Output::Lines(short) = registry.lookup("ls") else {
			panic!("ls must be registered");
		};
		let Output::Lines(long) = registry.lookup("ls -la") else {
			panic!("ls -la must be registered");
		};
		assert_eq!(short.len(), 1);
		assert_eq!(long.len(), 7);
		assert_eq!(registry.lookup("ls -l"), Output::NotFound);
	}

	#[test]
	fn clear_is_a_tagged_action() {
		assert_eq!(CommandRegistry.lookup("CLEAR"), Output::ClearScreen);
	}

	#[test]
	fn privileged_entries_open_with_prompt() {
		let registry = CommandRegistry;
		for (name, _) in PRIVILEGED {
			match registry.lookup_privileged(name) {
				Output::Lines(lines) => {
					assert_eq!(lines[0], PASSWORD_PROMPT)
				}
				other => panic!("{name}: unexpected {other:?}"),
			}
		}
	}

	#[test]
	fn privileged_table_is_only_reachable_through_sudo() {
		let registry = CommandRegistry;
		assert_eq!(registry.lookup("sudo reboot"), Output::NotFound);
		assert_eq!(registry.lookup_privileged("reboot"), Output::NotFound);
		assert!(matches!(
			registry.lookup_privileged("sudo   Reboot"),
			Output::Lines(_)
		));
	}

	#[test]
	fn commands_lists_both_tables() {
		let names: Vec<_> = CommandRegistry.commands().collect();
		assert_eq!(names.first(), Some(&"help"));
		assert!(names.contains(&"clear"));
		assert_eq!(names.last(), Some(&"sudo reboot"));
		assert_eq!(names.len(), COMMANDS.len() + PRIVILEGED.len());
	}
}
