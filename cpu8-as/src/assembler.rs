//
// Copyright (C) 2023 Ariel Abreu
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//

use cpu8_isa::{lookup, validate, RomImage, ROM_SIZE};
use log::{debug, info};
use pest::Parser;

use crate::{
	encode::{check_arity, encode, OperandSlot},
	error::{AssemblyError, ErrorKind},
	fragment::EncodedFragment,
	operand::classify,
};

#[derive(Parser)]
#[grammar = "grammar.pest"]
struct LineParser;

/// Splits one source line into its mnemonic and operand tokens.
///
/// Returns `None` for lines holding nothing but whitespace and comments.
fn tokenize(text: &str) -> Result<Option<(String, Vec<String>)>, ErrorKind> {
	let pairs = LineParser::parse(Rule::line, text)
		.map_err(|e| ErrorKind::Syntax(e.variant.message().into_owned()))?;

	let tokens: Vec<String> = match pairs.flatten().find(|pair| pair.as_rule() == Rule::instr) {
		Some(instr) => instr.into_inner().map(|pair| unescape(pair.as_str())).collect(),
		None => return Ok(None),
	};

	Ok(tokens
		.split_first()
		.map(|(mnemonic, operands)| (mnemonic.clone(), operands.to_vec())))
}

fn unescape(token: &str) -> String {
	let mut result = String::with_capacity(token.len());
	let mut chars = token.chars();
	while let Some(c) = chars.next() {
		if c == '\\' {
			if let Some(escaped) = chars.next() {
				result.push(escaped);
				continue;
			}
		}
		result.push(c);
	}
	result
}

/// Encodes a single tokenized line.
fn encode_tokens(mnemonic: &str, operands: &[String]) -> Result<EncodedFragment, ErrorKind> {
	let spec = lookup(mnemonic).ok_or_else(|| ErrorKind::UnknownInstruction(mnemonic.to_owned()))?;

	check_arity(spec, operands.len())?;

	let classified = operands
		.iter()
		.map(|token| classify(token))
		.collect::<Result<Vec<_>, _>>()?;

	let slots = classified
		.into_iter()
		.enumerate()
		.map(|(index, operand)| OperandSlot::new(index, operand, spec))
		.collect::<Result<Vec<_>, _>>()?;

	encode(spec, &slots)
}

/// Line-by-line driver that accumulates the two ROM streams.
#[derive(Debug, Default)]
pub struct Assembler {
	line: usize,
	instructions: Vec<u8>,
	data: Vec<u8>,
}

impl Assembler {
	pub fn new() -> Self {
		Self::default()
	}

	/// Number of lines fed so far.
	pub fn line(&self) -> usize {
		self.line
	}

	/// Number of instruction bytes emitted so far.
	pub fn len(&self) -> usize {
		self.instructions.len()
	}

	pub fn is_empty(&self) -> bool {
		self.instructions.is_empty()
	}

	/// Assembles one line of source. A failed line appends nothing.
	pub fn add_line(&mut self, text: &str) -> Result<(), AssemblyError> {
		self.line += 1;
		let line = self.line;

		let (mnemonic, operands) = match tokenize(text).map_err(|kind| kind.at(line))? {
			Some(tokens) => tokens,
			None => return Ok(()),
		};

		let fragment = encode_tokens(&mnemonic, &operands).map_err(|kind| kind.at(line))?;

		let total = self.instructions.len() + fragment.len();
		if total > ROM_SIZE {
			return Err(ErrorKind::RomOverflow(total).at(line));
		}

		debug!(
			"line {}: {} {:?} -> {:02x?} / {:02x?}",
			line,
			mnemonic,
			operands,
			fragment.instructions(),
			fragment.data()
		);

		self.instructions.extend_from_slice(fragment.instructions());
		self.data.extend_from_slice(fragment.data());

		Ok(())
	}

	/// Pads both streams to full ROM size and validates the result.
	pub fn finish(self) -> Result<RomImage, AssemblyError> {
		let image = RomImage::from_streams(&self.instructions, &self.data);

		validate(&image).map_err(ErrorKind::from)?;

		info!("assembled {} lines into {} ROM positions", self.line, image.len());

		Ok(image)
	}
}

/// Assembles a whole source text, stopping at the first error.
pub fn assemble(source: &str) -> Result<RomImage, AssemblyError> {
	let mut assembler = Assembler::new();
	for text in source.lines() {
		assembler.add_line(text)?;
	}
	assembler.finish()
}

/// Scans a whole source text and reports every error instead of stopping at the first.
pub fn diagnose(source: &str) -> Vec<AssemblyError> {
	let mut assembler = Assembler::new();
	let mut errors: Vec<AssemblyError> = source
		.lines()
		.filter_map(|text| assembler.add_line(text).err())
		.collect();

	if errors.is_empty() {
		if let Err(err) = assembler.finish() {
			errors.push(err);
		}
	}

	errors
}
