//
// Copyright (C) 2023 Ariel Abreu
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//

/// Instruction and data bytes contributed by one source line.
///
/// Both streams only ever grow together, so position `i` of `instructions`
/// always pairs with position `i` of `data`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncodedFragment {
	instructions: Vec<u8>,
	data: Vec<u8>,
}

impl EncodedFragment {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn push(&mut self, opcode: u8, data: u8) {
		self.instructions.push(opcode);
		self.data.push(data);
	}

	pub fn extend(&mut self, other: &EncodedFragment) {
		self.instructions.extend_from_slice(&other.instructions);
		self.data.extend_from_slice(&other.data);
	}

	pub fn instructions(&self) -> &[u8] {
		&self.instructions
	}

	pub fn data(&self) -> &[u8] {
		&self.data
	}

	pub fn len(&self) -> usize {
		self.instructions.len()
	}

	pub fn is_empty(&self) -> bool {
		self.instructions.is_empty()
	}
}

impl<const N: usize> From<[(u8, u8); N]> for EncodedFragment {
	fn from(pairs: [(u8, u8); N]) -> Self {
		let mut fragment = Self::new();
		for (opcode, data) in pairs {
			fragment.push(opcode, data);
		}
		fragment
	}
}
