//! `register_constant`: the constant pool's insertion-with-dedup path.

use helium_bc::{ConstTag, ProgramRef, Value};
use helium_util::Position;

use crate::error::CompileError;

/// Returns the existing constant-pool index for `(tag, text)` if one was
/// already inserted, otherwise parses `text` into a [`Value`] of the kind
/// `tag` names and appends it. `pos` is only used to locate a diagnostic
/// if `text` turns out to be a lexically valid but out-of-range literal
/// (e.g. an integer literal wider than `i64`).
pub fn register_constant(program: &ProgramRef, tag: ConstTag, text: &str, pos: &Position) -> Result<u16, CompileError> {
    let key = (tag, text.to_string());
    if let Some(&index) = program.borrow().constant_table.get(&key) {
        return Ok(index);
    }

    let value = match tag {
        ConstTag::Int => Value::Int64(text.parse().map_err(|_| CompileError::InvalidNumericLiteral {
            text: text.to_string(),
            pos: pos.clone(),
        })?),
        ConstTag::Float => Value::Float64(text.parse().expect("lexer only emits well-formed float literals")),
        ConstTag::Bool => Value::Bool(text == "true"),
        ConstTag::Str => Value::String(text.to_string()),
        ConstTag::Null => Value::Null,
    };

    let index = program.borrow_mut().push_constant(value);
    program.borrow_mut().constant_table.insert(key, index);
    Ok(index)
}
