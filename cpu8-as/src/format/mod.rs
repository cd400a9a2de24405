//
// Copyright (C) 2023 Ariel Abreu
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//

//! On-disk and on-screen representations of a ROM image.

use std::{fmt::Display, path::Path};

use clap::ValueEnum;
use cpu8_isa::{RomImage, ROM_SIZE};
use log::warn;
use thiserror::Error;

pub mod bin;
pub mod hex;
pub mod json;
pub mod listing;
pub mod markers;
pub mod table;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
	/// Two boxed columns of decimal bytes
	Table,
	/// `0x..` bytes, one line per stream, closed by an end marker
	Markers,
	/// One line of hex digits per stream
	Hex,
	/// `{"instructions": [...], "data": [...]}`
	Json,
	/// 256 instruction bytes followed by 256 data bytes
	Bin,
	/// Annotated listing, one row per position (output only)
	Listing,
}

#[derive(Error, Debug)]
pub enum FormatError {
	#[error(transparent)]
	Io(#[from] std::io::Error),
	#[error("image is not valid UTF-8: {0}")]
	Utf8(#[from] std::str::Utf8Error),
	#[error("bad JSON image: {0}")]
	Json(#[from] serde_json::Error),
	#[error("bad hex image: {0}")]
	Hex(#[from] ::hex::FromHexError),
	#[error("line {line}: bad byte \"{token}\"")]
	BadNumber { line: usize, token: String },
	#[error("binary image must be {expected} bytes, got {got}")]
	BinarySize { expected: usize, got: usize },
	#[error("image has no {0} stream")]
	MissingStream(&'static str),
	#[error("{0} images cannot be loaded")]
	NotLoadable(Format),
	#[error("cannot infer the image format of \"{0}\"")]
	UnknownExtension(String),
}

impl Format {
	/// Infers the format from a file extension.
	pub fn from_path(path: &Path) -> Option<Self> {
		let extension = path.extension()?.to_str()?.to_ascii_lowercase();
		match extension.as_str() {
			"bin" => Some(Self::Bin),
			"json" => Some(Self::Json),
			"hex" => Some(Self::Hex),
			"txt" | "tbl" => Some(Self::Table),
			"rom" => Some(Self::Markers),
			"lst" => Some(Self::Listing),
			_ => None,
		}
	}

	pub fn is_binary(&self) -> bool {
		*self == Self::Bin
	}
}

impl Display for Format {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(
			f,
			"{}",
			match self {
				Self::Table => "table",
				Self::Markers => "markers",
				Self::Hex => "hex",
				Self::Json => "json",
				Self::Bin => "bin",
				Self::Listing => "listing",
			}
		)
	}
}

pub fn render(image: &RomImage, format: Format) -> Result<Vec<u8>, FormatError> {
	Ok(match format {
		Format::Table => table::render(image).into_bytes(),
		Format::Markers => markers::render(image).into_bytes(),
		Format::Hex => hex::render(image).into_bytes(),
		Format::Json => json::render(image)?.into_bytes(),
		Format::Bin => bin::render(image),
		Format::Listing => listing::render(image).into_bytes(),
	})
}

pub fn load(bytes: &[u8], format: Format) -> Result<RomImage, FormatError> {
	if format == Format::Bin {
		return bin::load(bytes);
	}

	let text = std::str::from_utf8(bytes)?;
	match format {
		Format::Table => table::load(text),
		Format::Markers => markers::load(text),
		Format::Hex => hex::load(text),
		Format::Json => json::load(text),
		Format::Bin | Format::Listing => Err(FormatError::NotLoadable(format)),
	}
}

/// Builds an image from loaded streams, warning about anything past the ROM end.
pub(crate) fn fit_streams(instructions: &[u8], data: &[u8]) -> RomImage {
	if instructions.len() > ROM_SIZE || data.len() > ROM_SIZE {
		warn!(
			"truncating image streams of {} / {} bytes to {}",
			instructions.len(),
			data.len(),
			ROM_SIZE
		);
	}
	RomImage::from_streams(instructions, data)
}
