//
// Copyright (C) 2023 Ariel Abreu
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//

use std::{collections::HashMap, fmt::Display};

use lazy_static::lazy_static;
use num_enum::{IntoPrimitive, TryFromPrimitive};

/// ALU function selectors, as loaded into r5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum AluFunction {
	Pass = 0,
	Sub = 1,
	Add = 2,
	Mul = 3,
	And = 4,
	Xor = 5,
	Or = 6,
	Not = 7,
}

/// What an instruction does, independent of the concrete operands.
///
/// The encoder dispatches on this together with the operand shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
	Nop,
	ClearOutput,
	StoreRam,
	StoreAlu,
	LoadRegister,
	Alu(AluFunction),
	StoreOutput,
	RamOutput,
	AluOutput,
	Jump,
	JumpRegister,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstructionSpec {
	pub name: &'static str,
	pub operation: Operation,
	pub operand_count: usize,
	/// One opcode sequence per accepted operand shape.
	pub opcode_variants: &'static [&'static [u8]],
	/// Data bytes preceding the operand-derived ones.
	pub data_template: &'static [u8],
}

impl AluFunction {
	pub const fn is_unary(&self) -> bool {
		matches!(self, Self::Pass | Self::Not)
	}

	pub const fn name(&self) -> &'static str {
		match self {
			Self::Pass => "pass",
			Self::Sub => "sub",
			Self::Add => "add",
			Self::Mul => "mul",
			Self::And => "and",
			Self::Xor => "xor",
			Self::Or => "or",
			Self::Not => "not",
		}
	}
}

impl Display for AluFunction {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.name())
	}
}

impl InstructionSpec {
	pub fn is_alu(&self) -> bool {
		matches!(self.operation, Operation::Alu(_))
	}

	/// Iterates over every opcode byte this instruction can emit.
	pub fn opcodes(&self) -> impl Iterator<Item = u8> + '_ {
		self.opcode_variants
			.iter()
			.flat_map(|variant| variant.iter().copied())
	}
}

macro_rules! instructions {
	($($name:ident / $count:literal : $operation:expr => $([$($op:literal),+])|+ $(, data [$($data:expr),*])? ;)*) => {
		vec![$(
			InstructionSpec {
				name: stringify!($name),
				operation: $operation,
				operand_count: $count,
				opcode_variants: &[$(&[$($op),+]),+],
				data_template: &[$($($data),*)?],
			},
		)*]
	};
}

lazy_static! {
	static ref TABLE: HashMap<&'static str, InstructionSpec> = {
		use AluFunction::*;
		use Operation::*;

		let specs = instructions! {
			nop  / 0 : Nop          => [0x00];
			zor  / 0 : ClearOutput  => [0x08] | [0x18];
			str  / 2 : StoreRam     => [0x05, 0x06, 0x07], data [0x04];
			stra / 1 : StoreAlu     => [0x26];
			lrg  / 2 : LoadRegister => [0x25] | [0x26] | [0x27];

			pass / 1 : Alu(Pass) => [0x25, 0x26],       data [Pass as u8];
			sub  / 2 : Alu(Sub)  => [0x25, 0x26, 0x27], data [Sub as u8];
			add  / 2 : Alu(Add)  => [0x25, 0x26, 0x27], data [Add as u8];
			mul  / 2 : Alu(Mul)  => [0x25, 0x26, 0x27], data [Mul as u8];
			and  / 2 : Alu(And)  => [0x25, 0x26, 0x27], data [And as u8];
			xor  / 2 : Alu(Xor)  => [0x25, 0x26, 0x27], data [Xor as u8];
			or   / 2 : Alu(Or)   => [0x25, 0x26, 0x27], data [Or as u8];
			not  / 1 : Alu(Not)  => [0x25, 0x26],       data [Not as u8];

			sor  / 1 : StoreOutput  => [0x15] | [0x16] | [0x17] | [0x35] | [0x36] | [0x37];
			smo  / 0 : RamOutput    => [0x48];
			sao  / 0 : AluOutput    => [0x88];
			jmp  / 1 : Jump         => [0xc0] | [0xd0];
			jmpr / 0 : JumpRegister => [0xd0];
		};

		specs.into_iter().map(|spec| (spec.name, spec)).collect()
	};
}

/// Looks up an instruction by mnemonic, ignoring case and surrounding whitespace.
pub fn lookup(mnemonic: &str) -> Option<&'static InstructionSpec> {
	TABLE.get(mnemonic.trim().to_ascii_lowercase().as_str())
}

/// Iterates over the whole instruction table, in no particular order.
pub fn instructions() -> impl Iterator<Item = &'static InstructionSpec> {
	TABLE.values()
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn lookup_ignores_case_and_whitespace() {
		let add = lookup("  ADD ").unwrap();
		assert_eq!(add.name, "add");
		assert_eq!(add.operation, Operation::Alu(AluFunction::Add));
		assert_eq!(add.operand_count, 2);
		assert_eq!(add.data_template, &[0x02]);
		assert!(lookup("foo").is_none());
		assert!(lookup("").is_none());
	}

	#[test]
	fn alu_operations_share_the_load_sequence() {
		for spec in instructions().filter(|spec| spec.is_alu()) {
			let Operation::Alu(function) = spec.operation else {
				unreachable!()
			};
			assert_eq!(spec.data_template, &[u8::from(function)]);
			assert_eq!(spec.opcode_variants.len(), 1);
			if function.is_unary() {
				assert_eq!(spec.operand_count, 1);
				assert_eq!(spec.opcode_variants[0], &[0x25, 0x26]);
			} else {
				assert_eq!(spec.operand_count, 2);
				assert_eq!(spec.opcode_variants[0], &[0x25, 0x26, 0x27]);
			}
		}
	}

	#[test]
	fn data_templates_fit_their_variants() {
		for spec in instructions() {
			for variant in spec.opcode_variants {
				assert!(spec.data_template.len() <= variant.len(), "{}", spec.name);
			}
		}
	}

	#[test]
	fn alu_function_selectors() {
		assert_eq!(AluFunction::try_from(0x01).ok(), Some(AluFunction::Sub));
		assert_eq!(AluFunction::try_from(0x07).ok(), Some(AluFunction::Not));
		assert!(AluFunction::try_from(0x08).is_err());
		assert_eq!(AluFunction::Xor.to_string(), "xor");
	}
}
