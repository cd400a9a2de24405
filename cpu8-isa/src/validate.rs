//
// Copyright (C) 2023 Ariel Abreu
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//

use lazy_static::lazy_static;
use thiserror::Error;

use crate::{opcode, rom::RomImage, table};

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
	#[error("invalid opcode {value:#04x} at position {position}")]
	InvalidOpcode { position: usize, value: u8 },
}

lazy_static! {
	/// Every opcode emitted by some instruction variant.
	static ref DEFINED: [bool; 256] = {
		let mut defined = [false; 256];
		for opcode in table::instructions().flat_map(|spec| spec.opcodes()) {
			defined[opcode as usize] = true;
		}
		defined
	};
}

/// Whether `opcode` may appear in the instruction stream of a valid image.
///
/// Besides the opcodes of the instruction table, the stream end markers
/// are tolerated since the machine reads but ignores them.
pub fn is_valid_opcode(opcode: u8) -> bool {
	DEFINED[opcode as usize]
		|| opcode == opcode::END_OF_DATA
		|| opcode == opcode::END_OF_INSTRUCTIONS
}

/// Iterates over every `(position, value)` pair holding a reserved opcode.
pub fn invalid_opcodes(image: &RomImage) -> impl Iterator<Item = (usize, u8)> + '_ {
	image
		.instructions()
		.iter()
		.copied()
		.enumerate()
		.filter(|&(_, value)| !is_valid_opcode(value))
}

/// Checks the instruction stream of an image, reporting the first reserved opcode.
pub fn validate(image: &RomImage) -> Result<(), ValidationError> {
	match invalid_opcodes(image).next() {
		Some((position, value)) => Err(ValidationError::InvalidOpcode { position, value }),
		None => Ok(()),
	}
}
