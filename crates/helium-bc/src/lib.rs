//! helium-bc - Bytecode instruction encoding and the `Program` model.
//!
//! This crate defines the shapes the compiler emits into and the VM
//! executor (out of scope here) would consume: a packed 32-bit
//! [`Instruction`], the closed [`Opcode`] set, the [`Value`] constant
//! pool sum type, and [`Program`], the per-compilation-unit container of
//! code, constants, and name tables.

pub mod instruction;
pub mod opcode;
pub mod program;
pub mod value;

pub use instruction::Instruction;
pub use opcode::Opcode;
pub use program::Program;
pub use value::{new_program_ref, ConstTag, NativeCallback, NativeHandle, ProgramRef, Value};
