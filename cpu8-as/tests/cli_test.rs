//
// Copyright (C) 2023 Ariel Abreu
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//

use assert_cmd::prelude::*; // Add methods on commands
use predicates::prelude::*; // Used for writing assertions
use std::fs;
use std::process::Command; // Run programs
use tempfile::tempdir;

const PROGRAM: &str = "\
; add the constant 5 to RAM cell 3
str 37 3
add a3, 5
sao
sor r1
jmp 0
";

#[test]
fn assemble_to_default_binary() -> Result<(), Box<dyn std::error::Error>> {
	let dir = tempdir()?;
	let source = dir.path().join("prog.asm");
	fs::write(&source, PROGRAM)?;

	let mut cmd = Command::cargo_bin("cpu8-as")?;
	cmd.arg("assemble").arg(&source).assert().success();

	let image = fs::read(dir.path().join("prog.asm.bin"))?;
	assert_eq!(image.len(), 512);
	assert_eq!(
		&image[..11],
		&[0x05, 0x06, 0x07, 0x05, 0x07, 0x48, 0x36, 0x25, 0x27, 0x88, 0x15]
	);
	assert_eq!(&image[256..259], &[0x04, 37, 3]);
	Ok(())
}

#[test]
fn assemble_table_to_stdout() -> Result<(), Box<dyn std::error::Error>> {
	let dir = tempdir()?;
	let source = dir.path().join("prog.asm");
	fs::write(&source, "nop\njmp 10\n")?;

	let expected = "\
|----Instruction----|    |--------Data-------|
|  0 192            |    |  0  10            |
";
	let mut cmd = Command::cargo_bin("cpu8-as")?;
	cmd.arg("assemble")
		.arg(&source)
		.arg("-f")
		.arg("table")
		.assert()
		.success()
		.stdout(predicate::eq(expected));
	Ok(())
}

#[test]
fn assemble_reports_line_of_first_error() -> Result<(), Box<dyn std::error::Error>> {
	let dir = tempdir()?;
	let source = dir.path().join("bad.asm");
	fs::write(&source, "nop\nfoo r1\nadd r1 r2\n")?;

	let mut cmd = Command::cargo_bin("cpu8-as")?;
	cmd.arg("assemble")
		.arg(&source)
		.assert()
		.failure()
		.stderr(predicate::str::contains("line 2: unknown instruction \"foo\""))
		.stderr(predicate::str::contains("line 3").not());
	assert!(!dir.path().join("bad.asm.bin").exists());
	Ok(())
}

#[test]
fn check_lists_every_error() -> Result<(), Box<dyn std::error::Error>> {
	let dir = tempdir()?;
	let source = dir.path().join("bad.asm");
	fs::write(&source, "nop\nfoo r1\nadd r1 r2\nsor r8\n")?;

	let mut cmd = Command::cargo_bin("cpu8-as")?;
	cmd.arg("check")
		.arg(&source)
		.assert()
		.failure()
		.stderr(predicate::str::contains("line 2"))
		.stderr(predicate::str::contains("line 3"))
		.stderr(predicate::str::contains("register 8 out of range (0-7)"));
	Ok(())
}

#[test]
fn validate_accepts_assembled_json() -> Result<(), Box<dyn std::error::Error>> {
	let dir = tempdir()?;
	let source = dir.path().join("prog.asm");
	let image = dir.path().join("prog.json");
	fs::write(&source, PROGRAM)?;

	Command::cargo_bin("cpu8-as")?
		.arg("assemble")
		.arg(&source)
		.arg("-o")
		.arg(&image)
		.assert()
		.success();

	Command::cargo_bin("cpu8-as")?
		.arg("validate")
		.arg(&image)
		.assert()
		.success()
		.stdout(predicate::str::contains("ROM OK"));
	Ok(())
}

#[test]
fn validate_rejects_reserved_opcode() -> Result<(), Box<dyn std::error::Error>> {
	let dir = tempdir()?;
	let image = dir.path().join("broken.rom");
	fs::write(&image, "0x00 0x08 0x09 0xFF\n0x00 0x00 0x00 0xFE\n")?;

	let mut cmd = Command::cargo_bin("cpu8-as")?;
	cmd.arg("validate")
		.arg(&image)
		.assert()
		.failure()
		.stderr(predicate::str::contains("invalid opcode 0x09 at position 2"));
	Ok(())
}

#[test]
fn render_table_as_markers() -> Result<(), Box<dyn std::error::Error>> {
	let dir = tempdir()?;
	let image = dir.path().join("rom.txt");
	fs::write(
		&image,
		"|----Instruction----|    |--------Data-------|\n|  8 136  21        |    |  0   0   0        |\n",
	)?;

	let mut cmd = Command::cargo_bin("cpu8-as")?;
	cmd.arg("render")
		.arg(&image)
		.arg("-f")
		.arg("markers")
		.assert()
		.success()
		.stdout(predicate::eq("0x08 0x88 0x15 0xFF\n0x00 0x00 0x00 0xFE\n"));
	Ok(())
}

#[test]
fn render_needs_known_extension() -> Result<(), Box<dyn std::error::Error>> {
	let dir = tempdir()?;
	let image = dir.path().join("rom.dat");
	fs::write(&image, "C0\n0A\n")?;

	Command::cargo_bin("cpu8-as")?
		.arg("render")
		.arg(&image)
		.assert()
		.failure()
		.stderr(predicate::str::contains("cannot infer the image format"));

	Command::cargo_bin("cpu8-as")?
		.arg("render")
		.arg(&image)
		.arg("--from")
		.arg("hex")
		.arg("-f")
		.arg("listing")
		.assert()
		.success()
		.stdout(predicate::str::contains("C0  0A    jmp"));
	Ok(())
}
