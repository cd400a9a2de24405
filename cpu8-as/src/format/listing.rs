//
// Copyright (C) 2023 Ariel Abreu
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//

use std::fmt::Write;

use cpu8_isa::{opcode, AluFunction, RomImage};

fn annotate(instruction: u8, data: u8) -> String {
	match opcode::describe(instruction) {
		Some(description) if instruction == opcode::LOAD_HIGH => match AluFunction::try_from(data) {
			Ok(function) => format!("{} ({})", description, function),
			Err(_) => format!("{} (unknown alu function)", description),
		},
		Some(description) => description.to_owned(),
		None => "reserved".to_owned(),
	}
}

pub fn render(image: &RomImage) -> String {
	let (instructions, data) = image.used();

	let mut out = String::from("pos  op  data\n");
	for (position, (&instruction, &byte)) in instructions.iter().zip(data).enumerate() {
		let _ = writeln!(
			out,
			"{:>3}  {:02X}  {:02X}    {}",
			position,
			instruction,
			byte,
			annotate(instruction, byte)
		);
	}
	out
}
