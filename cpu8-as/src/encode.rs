//
// Copyright (C) 2023 Ariel Abreu
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//

use std::iter::repeat;

use cpu8_isa::{
	opcode::{self, RegisterGroup},
	InstructionSpec, Operation,
};

use crate::{error::ErrorKind, fragment::EncodedFragment, operand::Operand, resolve::resolve};

/// One operand of a source line, together with the preamble resolving it.
///
/// A slot holds a preamble exactly when its operand is a RAM address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperandSlot {
	index: usize,
	operand: Operand,
	preamble: Option<EncodedFragment>,
}

impl OperandSlot {
	pub fn new(index: usize, operand: Operand, spec: &InstructionSpec) -> Result<Self, ErrorKind> {
		if index >= spec.operand_count || index >= opcode::ALU_INPUT_REGISTERS.len() {
			return Err(ErrorKind::InvalidSlot(index));
		}

		let preamble = match operand {
			Operand::RamAddress(address) => Some(resolve(address, index, spec)?),
			_ => None,
		};

		Ok(Self {
			index,
			operand,
			preamble,
		})
	}

	pub fn index(&self) -> usize {
		self.index
	}

	pub fn operand(&self) -> Operand {
		self.operand
	}

	pub fn preamble(&self) -> Option<&EncodedFragment> {
		self.preamble.as_ref()
	}

	/// Whether the ALU input register of this slot already holds the value,
	/// so the primary instruction must not load it again.
	fn is_preloaded(&self) -> bool {
		match self.operand {
			Operand::RamAddress(_) => true,
			Operand::Register(reg) => opcode::ALU_INPUT_REGISTERS.get(self.index) == Some(&reg),
			Operand::Immediate(_) => false,
		}
	}
}

pub fn check_arity(spec: &InstructionSpec, got: usize) -> Result<(), ErrorKind> {
	if spec.operand_count == got {
		Ok(())
	} else {
		Err(ErrorKind::ArityMismatch {
			mnemonic: spec.name.to_owned(),
			expected: spec.operand_count,
			got,
		})
	}
}

/// Picks the opcode variant for an operation applied to concrete operands.
fn select_variant(operation: Operation, operands: &[Operand]) -> Option<usize> {
	use Operand::*;

	match (operation, operands) {
		(Operation::Nop, [])
		| (Operation::ClearOutput, [])
		| (Operation::RamOutput, [])
		| (Operation::AluOutput, [])
		| (Operation::JumpRegister, [])
		| (Operation::StoreAlu, [Immediate(_)])
		| (Operation::StoreRam, [Immediate(_), Immediate(_)])
		| (Operation::Jump, [Immediate(_)]) => Some(0),

		(Operation::Jump, [Register(0)]) => Some(1),

		(Operation::StoreOutput, [Register(reg)]) => match opcode::group_offset(*reg)? {
			(RegisterGroup::Low, offset) => Some(offset as usize),
			(RegisterGroup::High, offset) => Some(3 + offset as usize),
		},

		(Operation::LoadRegister, [Register(reg), Immediate(_)]) => match opcode::group_offset(*reg)? {
			(RegisterGroup::High, offset) => Some(offset as usize),
			(RegisterGroup::Low, _) => None,
		},

		(Operation::Alu(_), operands)
			if operands.iter().enumerate().all(|(slot, operand)| match operand {
				Immediate(_) | RamAddress(_) => true,
				Register(reg) => opcode::ALU_INPUT_REGISTERS.get(slot) == Some(reg),
			}) =>
		{
			Some(0)
		},

		_ => None,
	}
}

fn describe_shape(operands: &[Operand]) -> String {
	if operands.is_empty() {
		return "none".to_owned();
	}

	operands
		.iter()
		.map(|operand| operand.kind().to_string())
		.collect::<Vec<_>>()
		.join(", ")
}

/// Encodes one instruction, preambles included.
pub fn encode(spec: &InstructionSpec, slots: &[OperandSlot]) -> Result<EncodedFragment, ErrorKind> {
	check_arity(spec, slots.len())?;

	// slots must arrive in operand order
	if let Some((_, slot)) = slots
		.iter()
		.enumerate()
		.find(|(position, slot)| slot.index != *position)
	{
		return Err(ErrorKind::InvalidSlot(slot.index));
	}

	let operands: Vec<Operand> = slots.iter().map(OperandSlot::operand).collect();
	let variant = select_variant(spec.operation, &operands).ok_or_else(|| {
		ErrorKind::UnsupportedOperandShape {
			mnemonic: spec.name.to_owned(),
			shape: describe_shape(&operands),
		}
	})?;
	let opcodes = spec.opcode_variants[variant];

	let mut fragment = EncodedFragment::new();

	if spec.is_alu() {
		// the first opcode loads the function selector, one more per operand slot
		for preamble in slots.iter().filter_map(OperandSlot::preamble) {
			fragment.extend(preamble);
		}

		fragment.push(opcodes[0], spec.data_template[0]);

		for slot in slots.iter().filter(|slot| !slot.is_preloaded()) {
			if let Operand::Immediate(value) = slot.operand {
				let load = opcodes
					.get(1 + slot.index)
					.ok_or(ErrorKind::InvalidSlot(slot.index))?;
				fragment.push(*load, value);
			}
		}
	} else {
		let immediates = operands.iter().filter_map(|operand| match operand {
			Operand::Immediate(value) => Some(*value),
			_ => None,
		});
		let data = spec
			.data_template
			.iter()
			.copied()
			.chain(immediates)
			.chain(repeat(0));

		for (&op, data) in opcodes.iter().zip(data) {
			fragment.push(op, data);
		}
	}

	Ok(fragment)
}
