//! `Program`: one compilation unit, the top-level script or a single
//! function body.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use rustc_hash::FxHashMap;

use crate::instruction::Instruction;
use crate::value::{ConstTag, NativeHandle, ProgramRef, Value};

/// `spec.md` §3's `Program` shape. Exclusively owns `code`, `constants`,
/// and its three name tables; holds a non-owning `parent` back-reference
/// used only for name resolution during compilation (`spec.md` §5, §9).
#[derive(Debug)]
pub struct Program {
    pub code: Vec<Instruction>,
    pub constants: Vec<Value>,
    pub argc: u16,
    pub parent: Option<ProgramRef>,
    pub native: Option<NativeHandle>,
    /// name → local stack slot, insertion order preserved.
    pub symbol_table: IndexMap<String, u16>,
    /// `(type tag, literal text)` → constant pool index, for dedup.
    pub constant_table: FxHashMap<(ConstTag, String), u16>,
    /// name → closed slot, insertion order preserved.
    pub closure_table: IndexMap<String, u16>,
    /// source line → first instruction index emitted on that line.
    /// `BTreeMap` keeps it ordered by line, which is what makes
    /// invariant 6 (monotonicity) trivial to check.
    pub line_addresses: BTreeMap<u32, usize>,
}

impl Program {
    pub fn new(argc: u16, parent: Option<ProgramRef>) -> Self {
        Self {
            code: Vec::new(),
            constants: Vec::new(),
            argc,
            parent,
            native: None,
            symbol_table: IndexMap::new(),
            constant_table: FxHashMap::default(),
            closure_table: IndexMap::new(),
            line_addresses: BTreeMap::new(),
        }
    }

    pub fn top_level() -> Self {
        Self::new(0, None)
    }

    /// Index the next instruction will land at.
    pub fn next_index(&self) -> usize {
        self.code.len()
    }

    /// Append an instruction; indices never shift once assigned.
    pub fn emit(&mut self, instr: Instruction) -> usize {
        let index = self.next_index();
        self.code.push(instr);
        index
    }

    /// Overwrite an already-emitted instruction; used to patch a
    /// forward jump's placeholder operand once its target is known.
    pub fn patch(&mut self, index: usize, instr: Instruction) {
        self.code[index] = instr;
    }

    /// Record `line`'s first instruction index, if this is the first
    /// instruction seen on that line.
    pub fn record_line(&mut self, line: u32) {
        let index = self.next_index();
        self.line_addresses.entry(line).or_insert(index);
    }

    pub fn push_constant(&mut self, value: Value) -> u16 {
        let index = self.constants.len() as u16;
        self.constants.push(value);
        index
    }

    pub fn declare_local(&mut self, name: impl Into<String>) -> u16 {
        let slot = self.symbol_table.len() as u16;
        self.symbol_table.insert(name.into(), slot);
        slot
    }

    pub fn declare_closed(&mut self, name: impl Into<String>) -> u16 {
        let slot = self.closure_table.len() as u16;
        self.closure_table.insert(name.into(), slot);
        slot
    }
}
