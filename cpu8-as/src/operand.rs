//
// Copyright (C) 2023 Ariel Abreu
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//

use std::{fmt::Display, num::IntErrorKind};

use log::trace;

use crate::error::ErrorKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperandKind {
	Register,
	Address,
	Immediate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
	/// A number within 0-7 that identifies the register.
	Register(u8),
	/// A RAM cell, which has to be fetched before the ALU can use it.
	RamAddress(u8),
	Immediate(u8),
}

impl OperandKind {
	pub const fn bound(&self) -> u8 {
		match self {
			Self::Register => 7,
			Self::Address | Self::Immediate => u8::MAX,
		}
	}
}

impl Display for OperandKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(
			f,
			"{}",
			match self {
				Self::Register => "register",
				Self::Address => "address",
				Self::Immediate => "immediate",
			}
		)
	}
}

impl Operand {
	pub fn kind(&self) -> OperandKind {
		match self {
			Self::Register(_) => OperandKind::Register,
			Self::RamAddress(_) => OperandKind::Address,
			Self::Immediate(_) => OperandKind::Immediate,
		}
	}
}

impl Display for Operand {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Register(reg) => write!(f, "r{}", reg),
			Self::RamAddress(addr) => write!(f, "a{}", addr),
			Self::Immediate(imm) => write!(f, "{}", imm),
		}
	}
}

/// Parses a decimal payload, saturating values that don't fit an `i64`.
fn parse_decimal(token: &str, digits: &str) -> Result<i64, ErrorKind> {
	match digits.parse::<i64>() {
		Ok(value) => Ok(value),
		Err(e) => match e.kind() {
			IntErrorKind::PosOverflow => Ok(i64::MAX),
			IntErrorKind::NegOverflow => Ok(i64::MIN),
			_ => Err(ErrorKind::InvalidOperand(token.to_owned())),
		},
	}
}

fn check_range(kind: OperandKind, value: i64) -> Result<u8, ErrorKind> {
	match u8::try_from(value) {
		Ok(byte) if byte <= kind.bound() => Ok(byte),
		_ => Err(ErrorKind::OperandOutOfRange {
			kind,
			value,
			bound: kind.bound(),
		}),
	}
}

/// Classifies a single source token as a register, RAM address or immediate.
pub fn classify(token: &str) -> Result<Operand, ErrorKind> {
	let lowered = token.to_ascii_lowercase();

	let (kind, digits) = match lowered.as_bytes().first() {
		Some(b'r') => (OperandKind::Register, &lowered[1..]),
		Some(b'a') => (OperandKind::Address, &lowered[1..]),
		_ => (OperandKind::Immediate, lowered.as_str()),
	};

	// prefixed payloads are plain digit strings, no sign allowed
	if kind != OperandKind::Immediate
		&& (digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()))
	{
		return Err(ErrorKind::InvalidOperand(token.to_owned()));
	}

	let value = check_range(kind, parse_decimal(token, digits)?)?;
	let operand = match kind {
		OperandKind::Register => Operand::Register(value),
		OperandKind::Address => Operand::RamAddress(value),
		OperandKind::Immediate => Operand::Immediate(value),
	};

	trace!("classified \"{}\" as {:?}", token, operand);

	Ok(operand)
}

#[cfg(test)]
mod test {
	use super::*;

	fn out_of_range(kind: OperandKind, value: i64) -> Result<Operand, ErrorKind> {
		Err(ErrorKind::OperandOutOfRange {
			kind,
			value,
			bound: kind.bound(),
		})
	}

	#[test]
	fn registers() {
		assert_eq!(classify("r0"), Ok(Operand::Register(0)));
		assert_eq!(classify("r7"), Ok(Operand::Register(7)));
		assert_eq!(classify("R5"), Ok(Operand::Register(5)));
		assert_eq!(classify("r007"), Ok(Operand::Register(7)));
		assert_eq!(classify("r8"), out_of_range(OperandKind::Register, 8));
		assert_eq!(classify("r300"), out_of_range(OperandKind::Register, 300));
	}

	#[test]
	fn addresses() {
		assert_eq!(classify("a0"), Ok(Operand::RamAddress(0)));
		assert_eq!(classify("a255"), Ok(Operand::RamAddress(255)));
		assert_eq!(classify("a256"), out_of_range(OperandKind::Address, 256));
	}

	#[test]
	fn immediates() {
		assert_eq!(classify("0"), Ok(Operand::Immediate(0)));
		assert_eq!(classify("255"), Ok(Operand::Immediate(255)));
		assert_eq!(classify("+12"), Ok(Operand::Immediate(12)));
		assert_eq!(classify("256"), out_of_range(OperandKind::Immediate, 256));
		assert_eq!(classify("-1"), out_of_range(OperandKind::Immediate, -1));
		assert_eq!(
			classify("99999999999999999999999"),
			out_of_range(OperandKind::Immediate, i64::MAX)
		);
	}

	#[test]
	fn malformed_tokens() {
		for token in ["r", "a", "rx", "r1x", "r-1", "a+3", "0x10", "five", "1.5", ""] {
			assert_eq!(classify(token), Err(ErrorKind::InvalidOperand(token.to_owned())), "{}", token);
		}
	}

	#[test]
	fn display_round_trips_through_classify() {
		for operand in [Operand::Register(3), Operand::RamAddress(200), Operand::Immediate(42)] {
			assert_eq!(classify(&operand.to_string()), Ok(operand));
		}
	}
}
