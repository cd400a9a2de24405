//
// Copyright (C) 2023 Ariel Abreu
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//

use cpu8_isa::{opcode, RomImage};

use super::{fit_streams, FormatError};

fn stream_line(bytes: &[u8], end: u8) -> String {
	bytes
		.iter()
		.chain(std::iter::once(&end))
		.map(|byte| format!("0x{:02X}", byte))
		.collect::<Vec<_>>()
		.join(" ")
}

pub fn render(image: &RomImage) -> String {
	let (instructions, data) = image.used();
	format!(
		"{}\n{}\n",
		stream_line(instructions, opcode::END_OF_INSTRUCTIONS),
		stream_line(data, opcode::END_OF_DATA)
	)
}

fn parse_stream(text: &str, line: usize, end: u8) -> Result<Vec<u8>, FormatError> {
	let mut bytes = text
		.split_whitespace()
		.map(|token| {
			let digits = token
				.strip_prefix("0x")
				.or_else(|| token.strip_prefix("0X"))
				.unwrap_or(token);
			u8::from_str_radix(digits, 16).map_err(|_| FormatError::BadNumber {
				line,
				token: token.to_owned(),
			})
		})
		.collect::<Result<Vec<_>, _>>()?;

	if bytes.last() == Some(&end) {
		bytes.pop();
	}

	Ok(bytes)
}

pub fn load(text: &str) -> Result<RomImage, FormatError> {
	let mut lines = text
		.lines()
		.enumerate()
		.filter(|(_, line)| !line.trim().is_empty());

	let (index, instr_line) = lines.next().ok_or(FormatError::MissingStream("instruction"))?;
	let instructions = parse_stream(instr_line, index + 1, opcode::END_OF_INSTRUCTIONS)?;

	let (index, data_line) = lines.next().ok_or(FormatError::MissingStream("data"))?;
	let data = parse_stream(data_line, index + 1, opcode::END_OF_DATA)?;

	Ok(fit_streams(&instructions, &data))
}
