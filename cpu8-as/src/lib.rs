//
// Copyright (C) 2023 Ariel Abreu
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//

//! Assembler for the cpu8 machine.
//!
//! Source is line oriented: a mnemonic followed by whitespace- or
//! comma-separated operands, with `;` starting a comment. Operands are
//! registers (`r0`-`r7`), RAM cells (`a0`-`a255`) or decimal immediates
//! (`0`-`255`). Each line becomes a run of positions in the two parallel
//! ROM streams.

extern crate pest;
#[macro_use]
extern crate pest_derive;

pub mod assembler;
pub mod encode;
pub mod error;
pub mod format;
pub mod fragment;
pub mod operand;
pub mod resolve;

pub use assembler::{assemble, diagnose, Assembler};
pub use error::{AssemblyError, ErrorKind};
pub use format::{Format, FormatError};
pub use fragment::EncodedFragment;
pub use operand::{classify, Operand, OperandKind};
