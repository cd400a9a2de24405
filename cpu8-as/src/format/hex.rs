//
// Copyright (C) 2023 Ariel Abreu
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//

use cpu8_isa::RomImage;

use super::{fit_streams, FormatError};

pub fn render(image: &RomImage) -> String {
	let (instructions, data) = image.used();
	format!("{}\n{}\n", ::hex::encode_upper(instructions), ::hex::encode_upper(data))
}

pub fn load(text: &str) -> Result<RomImage, FormatError> {
	let mut lines = text.lines().map(str::trim).filter(|line| !line.is_empty());

	// an empty program renders as two blank lines
	let instructions = match lines.next() {
		Some(line) => ::hex::decode(line)?,
		None => Vec::new(),
	};
	let data = match lines.next() {
		Some(line) => ::hex::decode(line)?,
		None if instructions.is_empty() => Vec::new(),
		None => return Err(FormatError::MissingStream("data")),
	};

	Ok(fit_streams(&instructions, &data))
}
