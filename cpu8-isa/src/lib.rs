//
// Copyright (C) 2023 Ariel Abreu
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//

//! Instruction set of the cpu8 machine: the instruction table, the opcode
//! space and the fixed-size ROM image format, along with a validator for
//! images coming from the assembler or from disk.

pub mod opcode;
pub mod rom;
pub mod table;
pub mod validate;

pub use rom::{RomImage, ROM_SIZE};
pub use table::{lookup, AluFunction, InstructionSpec, Operation};
pub use validate::{validate, ValidationError};
