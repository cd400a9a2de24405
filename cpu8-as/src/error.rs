//
// Copyright (C) 2023 Ariel Abreu
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//

use std::fmt::Display;

use cpu8_isa::ValidationError;
use thiserror::Error;

use crate::operand::OperandKind;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
	#[error("syntax error: {0}")]
	Syntax(String),
	#[error("unknown instruction \"{0}\"")]
	UnknownInstruction(String),
	#[error("\"{mnemonic}\" expects {expected} operand(s), got {got}")]
	ArityMismatch {
		mnemonic: String,
		expected: usize,
		got: usize,
	},
	#[error("invalid operand \"{0}\"")]
	InvalidOperand(String),
	#[error("{kind} {value} out of range (0-{bound})")]
	OperandOutOfRange {
		kind: OperandKind,
		value: i64,
		bound: u8,
	},
	#[error("\"{0}\" does not accept RAM address operands")]
	AddressNotSupported(String),
	#[error("\"{mnemonic}\" has no encoding for operands ({shape})")]
	UnsupportedOperandShape { mnemonic: String, shape: String },
	#[error("internal error: operand slot {0} has no ALU input register")]
	InvalidSlot(usize),
	#[error("program needs {0} instruction bytes, the ROM holds 256")]
	RomOverflow(usize),
	#[error(transparent)]
	Validation(#[from] ValidationError),
}

/// An error attributed to the source line it occurred on, if any.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub struct AssemblyError {
	pub line: Option<usize>,
	pub kind: ErrorKind,
}

impl ErrorKind {
	pub fn at(self, line: usize) -> AssemblyError {
		AssemblyError {
			line: Some(line),
			kind: self,
		}
	}
}

impl From<ErrorKind> for AssemblyError {
	fn from(kind: ErrorKind) -> Self {
		Self { line: None, kind }
	}
}

impl Display for AssemblyError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self.line {
			Some(line) => write!(f, "line {}: {}", line, self.kind),
			None => write!(f, "{}", self.kind),
		}
	}
}
