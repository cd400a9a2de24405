//
// Copyright (C) 2023 Ariel Abreu
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//

/// Number of entries in each of the two ROM streams.
pub const ROM_SIZE: usize = 256;

/// A complete ROM image: two index-aligned streams of exactly [`ROM_SIZE`] bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RomImage {
	instructions: [u8; ROM_SIZE],
	data: [u8; ROM_SIZE],
	/// Number of meaningful positions; everything after it is zero padding.
	len: usize,
}

impl RomImage {
	/// Builds an image from raw streams, zero-padding or truncating each to [`ROM_SIZE`].
	pub fn from_streams(instructions: &[u8], data: &[u8]) -> Self {
		let mut image = Self {
			instructions: [0; ROM_SIZE],
			data: [0; ROM_SIZE],
			len: instructions.len().max(data.len()).min(ROM_SIZE),
		};

		for (dest, src) in image.instructions.iter_mut().zip(instructions) {
			*dest = *src;
		}
		for (dest, src) in image.data.iter_mut().zip(data) {
			*dest = *src;
		}

		image
	}

	pub fn instructions(&self) -> &[u8; ROM_SIZE] {
		&self.instructions
	}

	pub fn data(&self) -> &[u8; ROM_SIZE] {
		&self.data
	}

	pub fn len(&self) -> usize {
		self.len
	}

	pub fn is_empty(&self) -> bool {
		self.len == 0
	}

	/// The meaningful prefix of both streams.
	pub fn used(&self) -> (&[u8], &[u8]) {
		(&self.instructions[..self.len], &self.data[..self.len])
	}

	/// Drops trailing positions where both streams are zero.
	///
	/// Loaders of formats that always carry full streams use this to recover
	/// the program length.
	pub fn trimmed(mut self) -> Self {
		while self.len > 0 && self.instructions[self.len - 1] == 0 && self.data[self.len - 1] == 0 {
			self.len -= 1;
		}
		self
	}
}
