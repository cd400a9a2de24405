//
// Copyright (C) 2022 Ariel Abreu
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//

use std::{
	ffi::OsString,
	fmt::Display,
	fs,
	io::Write,
	path::{Path, PathBuf},
	process::exit,
};

use clap::{Parser as ClapParser, Subcommand};
use colored::Colorize;
use cpu8_as::{
	assemble, diagnose,
	format::{self, bin, Format, FormatError},
};
use cpu8_isa::{validate::invalid_opcodes, RomImage, ValidationError};
use log::info;

#[derive(ClapParser)]
#[command(author, version, about, long_about = None)]
struct Args {
	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand)]
enum Command {
	/// Assemble a source file into a ROM image
	Assemble {
		source: PathBuf,

		/// Where to write the image; binary images default to `<SOURCE>.bin`,
		/// text formats to stdout
		#[arg(short, long)]
		output: Option<PathBuf>,

		/// Output format, inferred from the output extension when omitted
		#[arg(short, long, value_enum)]
		format: Option<Format>,
	},
	/// Report every error in a source file without writing an image
	Check { source: PathBuf },
	/// Check an existing image for reserved opcodes
	Validate {
		image: PathBuf,

		/// Image format, inferred from the extension when omitted
		#[arg(long, value_enum)]
		from: Option<Format>,
	},
	/// Convert an existing image to another format
	Render {
		image: PathBuf,

		/// Image format, inferred from the extension when omitted
		#[arg(long, value_enum)]
		from: Option<Format>,

		#[arg(short, long, value_enum, default_value_t = Format::Table)]
		format: Format,

		#[arg(short, long)]
		output: Option<PathBuf>,
	},
}

fn fail(message: impl Display) -> ! {
	eprintln!("{} {}", "error:".red().bold(), message);
	exit(1);
}

fn read_source(path: &Path) -> String {
	match fs::read_to_string(path) {
		Ok(x) => x,
		Err(e) => fail(format_args!("failed to read \"{}\": {}", path.display(), e)),
	}
}

fn load_image(path: &Path, from: Option<Format>) -> RomImage {
	let format = match from.or_else(|| Format::from_path(path)) {
		Some(format) => format,
		None => fail(FormatError::UnknownExtension(path.display().to_string())),
	};

	let bytes = match fs::read(path) {
		Ok(bytes) => bytes,
		Err(e) => fail(format_args!("failed to read \"{}\": {}", path.display(), e)),
	};

	match format::load(&bytes, format) {
		Ok(image) => image,
		Err(e) => fail(format_args!("failed to load \"{}\": {}", path.display(), e)),
	}
}

/// `prog.asm` becomes `prog.asm.bin`.
fn default_output_path(source: &Path) -> PathBuf {
	source.with_extension(match source.extension() {
		Some(extension) => {
			let mut tmp = extension.to_owned();
			tmp.push(".bin");
			tmp
		},
		None => OsString::from("bin"),
	})
}

fn write_image(image: &RomImage, format: Format, output: Option<&Path>) {
	let result = match output {
		Some(path) if format.is_binary() => fs::File::create(path)
			.and_then(|mut file| bin::write_to(&mut file, image))
			.map_err(FormatError::from),
		Some(path) => format::render(image, format)
			.and_then(|bytes| fs::write(path, bytes).map_err(FormatError::from)),
		None => format::render(image, format)
			.and_then(|bytes| std::io::stdout().write_all(&bytes).map_err(FormatError::from)),
	};

	if let Err(e) = result {
		fail(format_args!("failed to write image: {}", e));
	}

	if let Some(path) = output {
		info!("wrote {} image to \"{}\"", format, path.display());
	}
}

fn main() {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

	let cli = Args::parse();

	match cli.command {
		Command::Assemble {
			source,
			output,
			format,
		} => {
			let input = read_source(&source);

			let image = match assemble(&input) {
				Ok(image) => image,
				Err(err) => fail(format_args!("{}: {}", source.display(), err)),
			};

			let format = format
				.or_else(|| output.as_deref().and_then(Format::from_path))
				.unwrap_or(Format::Bin);

			let output = match output {
				Some(path) => Some(path),
				None if format.is_binary() => Some(default_output_path(&source)),
				None => None,
			};

			write_image(&image, format, output.as_deref());
		},
		Command::Check { source } => {
			let input = read_source(&source);
			let errors = diagnose(&input);

			for err in &errors {
				eprintln!("{} {}: {}", "error:".red().bold(), source.display(), err);
			}

			if !errors.is_empty() {
				exit(1);
			}

			println!("{}: OK", source.display());
		},
		Command::Validate { image: path, from } => {
			let image = load_image(&path, from);
			let mut failed = false;

			for (position, value) in invalid_opcodes(&image) {
				eprintln!(
					"{} {}",
					"error:".red().bold(),
					ValidationError::InvalidOpcode { position, value }
				);
				failed = true;
			}

			if failed {
				exit(1);
			}

			println!("ROM OK");
		},
		Command::Render {
			image: path,
			from,
			format,
			output,
		} => {
			let image = load_image(&path, from);
			write_image(&image, format, output.as_deref());
		},
	}
}
