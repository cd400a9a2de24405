//
// Copyright (C) 2023 Ariel Abreu
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//

use cpu8_isa::RomImage;
use serde::{Deserialize, Serialize};

use super::{fit_streams, FormatError};

#[derive(Serialize, Deserialize)]
struct JsonImage {
	instructions: Vec<u8>,
	data: Vec<u8>,
}

/// Always writes both full streams.
pub fn render(image: &RomImage) -> Result<String, FormatError> {
	let json = JsonImage {
		instructions: image.instructions().to_vec(),
		data: image.data().to_vec(),
	};
	Ok(serde_json::to_string(&json)? + "\n")
}

pub fn load(text: &str) -> Result<RomImage, FormatError> {
	let json: JsonImage = serde_json::from_str(text)?;
	Ok(fit_streams(&json.instructions, &json.data).trimmed())
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn compact_full_streams() {
		let image = RomImage::from_streams(&[0xc0], &[0x0a]);
		let text = render(&image).unwrap();
		assert!(text.starts_with("{\"instructions\":[192,0,0,"));
		assert!(text.contains("],\"data\":[10,0,"));
		assert_eq!(text.matches(',').count(), 2 * 255 + 1);
	}

	#[test]
	fn recovers_program_length() {
		let image = load(r#"{"instructions":[136,21],"data":[0,0]}"#).unwrap();
		assert_eq!(image.len(), 2);
		assert_eq!(image.used().0, &[136, 21]);
	}

	#[test]
	fn rejects_missing_and_oversized_fields() {
		assert!(matches!(load(r#"{"instructions":[0]}"#), Err(FormatError::Json(_))));
		assert!(matches!(load(r#"{"instructions":[256],"data":[0]}"#), Err(FormatError::Json(_))));
	}
}
