//
// Copyright (C) 2023 Ariel Abreu
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//

use cpu8_isa::{RomImage, ROM_SIZE};
use positioned_io::WriteAt;

use super::{fit_streams, FormatError};

pub const IMAGE_SIZE: usize = ROM_SIZE * 2;

/// Writes the instruction stream at offset 0 and the data stream right after it.
pub fn write_to<W: WriteAt>(out: &mut W, image: &RomImage) -> std::io::Result<()> {
	out.write_all_at(0, image.instructions())?;
	out.write_all_at(ROM_SIZE as u64, image.data())?;
	out.flush()
}

pub fn render(image: &RomImage) -> Vec<u8> {
	let mut bytes = Vec::with_capacity(IMAGE_SIZE);
	bytes.extend_from_slice(image.instructions());
	bytes.extend_from_slice(image.data());
	bytes
}

pub fn load(bytes: &[u8]) -> Result<RomImage, FormatError> {
	if bytes.len() != IMAGE_SIZE {
		return Err(FormatError::BinarySize {
			expected: IMAGE_SIZE,
			got: bytes.len(),
		});
	}

	let (instructions, data) = bytes.split_at(ROM_SIZE);
	Ok(fit_streams(instructions, data).trimmed())
}
