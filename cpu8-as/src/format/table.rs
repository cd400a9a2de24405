//
// Copyright (C) 2023 Ariel Abreu
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//

//! Side-by-side decimal table:
//!
//! ```text
//! |----Instruction----|    |--------Data-------|
//! |  5   6   7   5   7|    |  4   9   4   0   4|
//! | 72  54  37  39    |    |  0   0   2   1    |
//! ```

use std::fmt::Write;

use cpu8_isa::RomImage;

use super::{fit_streams, FormatError};

const HEADER: &str = "|----Instruction----|    |--------Data-------|";
const FIELDS_PER_ROW: usize = 5;
const ROW_WIDTH: usize = FIELDS_PER_ROW * 4 - 1;

fn row(bytes: &[u8]) -> String {
	let fields = bytes
		.iter()
		.map(|byte| format!("{:>3}", byte))
		.collect::<Vec<_>>()
		.join(" ");
	format!("|{:<width$}|", fields, width = ROW_WIDTH)
}

pub fn render(image: &RomImage) -> String {
	let (instructions, data) = image.used();

	let mut out = String::new();
	out.push_str(HEADER);
	out.push('\n');

	for (instr_row, data_row) in instructions
		.chunks(FIELDS_PER_ROW)
		.zip(data.chunks(FIELDS_PER_ROW))
	{
		// infallible for String
		let _ = writeln!(out, "{}    {}", row(instr_row), row(data_row));
	}

	out
}

fn parse_fields(part: &str, line: usize, into: &mut Vec<u8>) -> Result<(), FormatError> {
	for token in part.split_whitespace() {
		let byte = token.parse::<u8>().map_err(|_| FormatError::BadNumber {
			line,
			token: token.to_owned(),
		})?;
		into.push(byte);
	}
	Ok(())
}

pub fn load(text: &str) -> Result<RomImage, FormatError> {
	let mut instructions = Vec::new();
	let mut data = Vec::new();

	for (index, line) in text.lines().enumerate() {
		// header rows like "----Instruction----" carry no digits at all
		if !line.bytes().any(|b| b.is_ascii_digit()) {
			continue;
		}

		let mut parts = line.split('|').map(str::trim).filter(|part| !part.is_empty());
		if let (Some(instr_part), Some(data_part)) = (parts.next(), parts.next()) {
			parse_fields(instr_part, index + 1, &mut instructions)?;
			parse_fields(data_part, index + 1, &mut data)?;
		}
	}

	Ok(fit_streams(&instructions, &data))
}

#[cfg(test)]
mod test {
	use super::*;

	const SAMPLE: &str = "\
|----Instruction----|    |--------Data-------|
|  8  37  38  39   5|    |  0   0   0   0   0|
|  6   7   7  72  51|    |  0   0   0   0   0|
|  7  72  50  37 136|    |  1   0   0   5   0|
| 51  37 136  38  37|    |  0   7   0   1   4|
|136  51  38  37 136|    |  0   0   1   3   0|
| 51  38  37 136 208|    |  0  20   2   0   0|
|  0   0            |    |  0   0            |
";

	#[test]
	fn renders_boxed_rows() {
		let image = RomImage::from_streams(&[8, 37, 38, 39, 5, 6, 136], &[0, 0, 0, 0, 0, 0, 20]);
		assert_eq!(
			render(&image),
			"\
|----Instruction----|    |--------Data-------|
|  8  37  38  39   5|    |  0   0   0   0   0|
|  6 136            |    |  0  20            |
"
		);
	}

	#[test]
	fn empty_image_is_just_the_header() {
		assert_eq!(render(&RomImage::from_streams(&[], &[])), format!("{}\n", HEADER));
	}

	#[test]
	fn loads_reference_table() {
		let image = load(SAMPLE).unwrap();
		assert_eq!(image.len(), 32);
		assert_eq!(&image.instructions()[..6], &[8, 37, 38, 39, 5, 6]);
		assert_eq!(image.instructions()[29], 208);
		assert_eq!(image.data()[26], 20);
		assert_eq!(render(&image), SAMPLE);
	}

	#[test]
	fn rejects_oversized_fields() {
		assert!(matches!(
			load("|  8 300|    |  0   0|"),
			Err(FormatError::BadNumber { line: 1, .. })
		));
	}

	#[test]
	fn rejects_stray_text_in_rows() {
		let text = format!("{}\n|  8  x  5|    |  0   0   0|\n", HEADER);
		match load(&text) {
			Err(FormatError::BadNumber { line, token }) => {
				assert_eq!(line, 2);
				assert_eq!(token, "x");
			},
			other => panic!("expected a bad number, got {:?}", other.map(|image| image.len())),
		}
	}
}
