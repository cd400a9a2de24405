//
// Copyright (C) 2023 Ariel Abreu
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//

//! Opcode byte values of the cpu8 machine.
//!
//! Register naming: r0 holds indirect jump targets, r1-r3 are the low
//! writable group, r5-r7 the high group. Within the high group the ALU
//! reads its function selector from r5 and its operands from r6 (A) and r7 (B).

pub const NOP: u8 = 0x00;

pub const RAM_MODE: u8 = 0x05;
pub const RAM_DATA: u8 = 0x06;
pub const RAM_ADDRESS: u8 = 0x07;

pub const CLEAR_OUTPUT: u8 = 0x08;
pub const CLEAR_OUTPUT_ALT: u8 = 0x18;

/// `sor r1`; r2 and r3 follow.
pub const STORE_OUTPUT_LOW: u8 = 0x15;
/// `lrg r5`; r6 and r7 follow.
pub const LOAD_HIGH: u8 = 0x25;
/// `sor r5`; r6 and r7 follow.
pub const STORE_OUTPUT_HIGH: u8 = 0x35;

pub const RAM_TO_OUTPUT: u8 = 0x48;
pub const ALU_TO_OUTPUT: u8 = 0x88;

pub const JUMP: u8 = 0xc0;
pub const JUMP_R0: u8 = 0xd0;

pub const END_OF_DATA: u8 = 0xfe;
pub const END_OF_INSTRUCTIONS: u8 = 0xff;

/// Data byte written to [`RAM_MODE`] by `str`.
pub const RAM_MODE_WRITE: u8 = 0x04;
/// Data byte written to [`RAM_MODE`] when only the address register is latched.
pub const RAM_MODE_LATCH: u8 = 0x00;

/// The register holding the ALU function selector.
pub const ALU_SELECTOR_REGISTER: u8 = 5;
/// The ALU input registers, indexed by operand slot.
pub const ALU_INPUT_REGISTERS: [u8; 2] = [6, 7];

/// Returns the register group index of a writable register, i.e. its
/// offset from the first register of its group.
pub fn group_offset(register: u8) -> Option<(RegisterGroup, u8)> {
	match register {
		1..=3 => Some((RegisterGroup::Low, register - 1)),
		5..=7 => Some((RegisterGroup::High, register - 5)),
		_ => None,
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterGroup {
	Low,
	High,
}

/// Human readable description of an opcode, `None` for reserved values.
pub fn describe(opcode: u8) -> Option<&'static str> {
	Some(match opcode {
		NOP => "nop",
		RAM_MODE => "ram mode",
		RAM_DATA => "ram data",
		RAM_ADDRESS => "ram address",
		CLEAR_OUTPUT | CLEAR_OUTPUT_ALT => "zor",
		0x15 => "sor r1",
		0x16 => "sor r2",
		0x17 => "sor r3",
		0x25 => "load r5",
		0x26 => "load r6",
		0x27 => "load r7",
		0x35 => "sor r5",
		0x36 => "sor r6",
		0x37 => "sor r7",
		RAM_TO_OUTPUT => "smo",
		ALU_TO_OUTPUT => "sao",
		JUMP => "jmp",
		JUMP_R0 => "jmp r0",
		END_OF_DATA | END_OF_INSTRUCTIONS => "end marker",
		_ => return None,
	})
}
