//
// Copyright (C) 2023 Ariel Abreu
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//

//! Fetching RAM operands.
//!
//! There is no opcode moving a RAM cell straight into an ALU input register.
//! The cell is selected through the RAM address register, copied into the
//! output register and from there stored into the input register of its slot.

use cpu8_isa::{opcode, InstructionSpec};

use crate::{error::ErrorKind, fragment::EncodedFragment};

/// Returns the `sor` opcode that routes the output register into the ALU
/// input register of `slot`.
pub(crate) fn route_opcode(slot: usize) -> Result<u8, ErrorKind> {
	match opcode::ALU_INPUT_REGISTERS.get(slot) {
		Some(register) => Ok(opcode::STORE_OUTPUT_HIGH + (register - opcode::ALU_SELECTOR_REGISTER)),
		None => Err(ErrorKind::InvalidSlot(slot)),
	}
}

/// Emits the preamble loading RAM cell `address` into the ALU input register of `slot`.
pub fn resolve(address: u8, slot: usize, spec: &InstructionSpec) -> Result<EncodedFragment, ErrorKind> {
	if !spec.is_alu() {
		return Err(ErrorKind::AddressNotSupported(spec.name.to_owned()));
	}

	let route = route_opcode(slot)?;

	Ok(EncodedFragment::from([
		(opcode::RAM_MODE, opcode::RAM_MODE_LATCH),
		(opcode::RAM_ADDRESS, address),
		(opcode::RAM_TO_OUTPUT, 0),
		(route, 0),
	]))
}

#[cfg(test)]
mod test {
	use super::*;
	use cpu8_isa::lookup;

	#[test]
	fn preamble_per_slot() {
		let add = lookup("add").unwrap();

		let first = resolve(3, 0, add).unwrap();
		assert_eq!(first.instructions(), &[0x05, 0x07, 0x48, 0x36]);
		assert_eq!(first.data(), &[0x00, 0x03, 0x00, 0x00]);

		let second = resolve(200, 1, add).unwrap();
		assert_eq!(second.instructions(), &[0x05, 0x07, 0x48, 0x37]);
		assert_eq!(second.data(), &[0x00, 200, 0x00, 0x00]);
	}

	#[test]
	fn unary_operations_use_the_first_slot() {
		let not = lookup("not").unwrap();
		assert_eq!(resolve(9, 0, not).unwrap().instructions()[3], 0x36);
	}

	#[test]
	fn only_alu_operations_take_addresses() {
		for name in ["str", "stra", "jmp", "sor", "lrg"] {
			let spec = lookup(name).unwrap();
			assert_eq!(
				resolve(1, 0, spec),
				Err(ErrorKind::AddressNotSupported(name.to_owned()))
			);
		}
	}

	#[test]
	fn bad_slot_is_an_internal_error() {
		let add = lookup("add").unwrap();
		assert_eq!(resolve(1, 2, add), Err(ErrorKind::InvalidSlot(2)));
	}
}
