//! AST → instruction lowering: the walk-and-emit shape, grounded on
//! `faxc-sem::analysis`'s AST walk, restructured around this spec's flat
//! bytecode target instead of a typed HIR.

use std::rc::Rc;

use helium_ast::{AstKind, AstNode};
use helium_bc::{new_program_ref, ConstTag, Instruction, Opcode, Program, ProgramRef, Value};
use helium_util::{Position, SourceMap, SourceReadError};

use crate::constants::register_constant;
use crate::error::CompileError;
use crate::scope::{register_unique_variable_local, register_variable, ScopeClass};

/// Entry point: lower a `Block` AST node's statements into `program`.
/// `source_map` is threaded through the whole walk so a nested
/// `include`, however deep inside function bodies or control flow,
/// reads and registers its file through the same registry the caller
/// will use to render a final diagnostic.
pub fn compile(program: &ProgramRef, block: &AstNode, source_map: &mut SourceMap) -> Result<(), CompileError> {
    compile_block(program, block, source_map)
}

fn compile_block(program: &ProgramRef, block: &AstNode, source_map: &mut SourceMap) -> Result<(), CompileError> {
    for stmt in &block.children {
        compile_statement(program, stmt, source_map)?;
    }
    Ok(())
}

fn compile_statement(program: &ProgramRef, node: &AstNode, source_map: &mut SourceMap) -> Result<(), CompileError> {
    program.borrow_mut().record_line(node.pos.line);
    match node.kind {
        AstKind::Assign => compile_assign(program, node, source_map),
        AstKind::Put => compile_put(program, node, source_map),
        AstKind::Call => compile_call(program, node, source_map),
        AstKind::Loop => compile_loop(program, node, source_map),
        AstKind::Branches => compile_branches(program, node, source_map),
        AstKind::Return => compile_return(program, node, source_map),
        AstKind::Include => compile_include(program, node, source_map),
        other => unreachable!("parser never produces {other:?} at statement position"),
    }
}

/// Lower an expression so it leaves exactly one value on the stack.
fn compile_expression(program: &ProgramRef, node: &AstNode, source_map: &mut SourceMap) -> Result<(), CompileError> {
    match node.kind {
        AstKind::Integer => push_constant(program, ConstTag::Int, &node.value, &node.pos),
        AstKind::Float => push_constant(program, ConstTag::Float, &node.value, &node.pos),
        AstKind::Bool => push_constant(program, ConstTag::Bool, &node.value, &node.pos),
        AstKind::String => push_constant(program, ConstTag::Str, &node.value, &node.pos),
        AstKind::Null => push_constant(program, ConstTag::Null, "", &node.pos),
        AstKind::Reference => compile_load(program, node),
        AstKind::Get => compile_get(program, node, source_map),
        AstKind::UnaryExpr => compile_unary(program, node, source_map),
        AstKind::BinaryExpr => compile_binary(program, node, source_map),
        AstKind::Call => compile_call(program, node, source_map),
        AstKind::Function => compile_function(program, node, source_map),
        AstKind::Table => compile_table(program, node, source_map),
        other => unreachable!("parser never produces {other:?} in expression position"),
    }
}

fn push_constant(program: &ProgramRef, tag: ConstTag, text: &str, pos: &Position) -> Result<(), CompileError> {
    let index = register_constant(program, tag, text, pos)?;
    program.borrow_mut().emit(Instruction::with_u16(Opcode::Pushk, index));
    Ok(())
}

fn undefined(name: &str, pos: &Position) -> CompileError {
    CompileError::UndefinedSymbol { name: name.to_string(), pos: pos.clone() }
}

fn load_opcode(class: ScopeClass) -> Opcode {
    match class {
        ScopeClass::Local => Opcode::Loadl,
        ScopeClass::Closed => Opcode::Loadc,
        ScopeClass::Global => Opcode::Loadg,
    }
}

fn store_opcode(class: ScopeClass) -> Opcode {
    match class {
        ScopeClass::Local => Opcode::Storl,
        ScopeClass::Closed => Opcode::Storc,
        ScopeClass::Global => Opcode::Storg,
    }
}

fn compile_load(program: &ProgramRef, node: &AstNode) -> Result<(), CompileError> {
    let (slot, class) = register_variable(program, &node.value).ok_or_else(|| undefined(&node.value, &node.pos))?;
    program.borrow_mut().emit(Instruction::with_u16(load_opcode(class), slot));
    Ok(())
}

fn compile_assign(program: &ProgramRef, node: &AstNode, source_map: &mut SourceMap) -> Result<(), CompileError> {
    compile_expression(program, &node.children[0], source_map)?;
    let (slot, class) = register_variable(program, &node.value).ok_or_else(|| undefined(&node.value, &node.pos))?;
    program.borrow_mut().emit(Instruction::with_u16(store_opcode(class), slot));
    Ok(())
}

/// `^` and unary `~` have no dedicated opcode in the closed `Opcode`
/// enumeration; see `DESIGN.md` for why they alias `!=`/`NOT` here
/// rather than growing the opcode set. `&`/`&&` and `|`/`||` share AND/OR
/// for the same reason: the set provides one opcode per family, not per
/// glyph.
fn binary_opcode(glyph: &str) -> Opcode {
    match glyph {
        "+" => Opcode::Add,
        "-" => Opcode::Sub,
        "*" => Opcode::Mul,
        "/" => Opcode::Div,
        "%" => Opcode::Mod,
        "<" => Opcode::Lt,
        ">" => Opcode::Gt,
        "<=" => Opcode::Le,
        ">=" => Opcode::Ge,
        "==" => Opcode::Eq,
        "!=" | "^" => Opcode::Ne,
        "&" | "&&" => Opcode::And,
        "|" | "||" => Opcode::Or,
        other => unreachable!("parser only produces precedence-table glyphs, got {other:?}"),
    }
}

fn compile_binary(program: &ProgramRef, node: &AstNode, source_map: &mut SourceMap) -> Result<(), CompileError> {
    compile_expression(program, &node.children[0], source_map)?;
    compile_expression(program, &node.children[1], source_map)?;
    program.borrow_mut().emit(Instruction::bare(binary_opcode(&node.value)));
    Ok(())
}

fn compile_unary(program: &ProgramRef, node: &AstNode, source_map: &mut SourceMap) -> Result<(), CompileError> {
    compile_expression(program, &node.children[0], source_map)?;
    match node.value.as_str() {
        "-" => {
            program.borrow_mut().emit(Instruction::bare(Opcode::Neg));
        }
        "!" | "~" => {
            program.borrow_mut().emit(Instruction::bare(Opcode::Not));
        }
        "+" => {}
        other => unreachable!("parser only produces unary glyphs -+!~, got {other:?}"),
    }
    Ok(())
}

fn compile_get(program: &ProgramRef, node: &AstNode, source_map: &mut SourceMap) -> Result<(), CompileError> {
    let (slot, class) = register_variable(program, &node.value).ok_or_else(|| undefined(&node.value, &node.pos))?;
    program.borrow_mut().emit(Instruction::with_u16(load_opcode(class), slot));
    compile_expression(program, &node.children[0], source_map)?;
    program.borrow_mut().emit(Instruction::bare(Opcode::Tget));
    Ok(())
}

fn compile_put(program: &ProgramRef, node: &AstNode, source_map: &mut SourceMap) -> Result<(), CompileError> {
    let (slot, class) = register_variable(program, &node.value).ok_or_else(|| undefined(&node.value, &node.pos))?;
    program.borrow_mut().emit(Instruction::with_u16(load_opcode(class), slot));
    compile_expression(program, &node.children[0], source_map)?;
    compile_expression(program, &node.children[1], source_map)?;
    program.borrow_mut().emit(Instruction::bare(Opcode::Tput));
    Ok(())
}

/// After `TNEW`, each `TPUT` consumes `(table, key, value)` and re-pushes
/// `table`. The "duplicate top-of-stack" convention `spec.md` §9
/// resolves needs no extra bookkeeping beyond that stack effect.
fn compile_table(program: &ProgramRef, node: &AstNode, source_map: &mut SourceMap) -> Result<(), CompileError> {
    program.borrow_mut().emit(Instruction::bare(Opcode::Tnew));
    for pair in &node.children {
        compile_expression(program, &pair.children[0], source_map)?;
        compile_expression(program, &pair.children[1], source_map)?;
        program.borrow_mut().emit(Instruction::bare(Opcode::Tput));
    }
    Ok(())
}

/// `Call(target, args...)`: compile the callee, then each argument
/// left-to-right, then `CALL n`. Used identically whether `Call` sits at
/// statement or expression position (`spec.md` §9's open-question
/// resolution: first child is always the callee).
fn compile_call(program: &ProgramRef, node: &AstNode, source_map: &mut SourceMap) -> Result<(), CompileError> {
    compile_expression(program, &node.children[0], source_map)?;
    let argc = node.children.len() - 1;
    for arg in &node.children[1..] {
        compile_expression(program, arg, source_map)?;
    }
    program.borrow_mut().emit(Instruction::with_u16(Opcode::Call, argc as u16));
    Ok(())
}

fn compile_return(program: &ProgramRef, node: &AstNode, source_map: &mut SourceMap) -> Result<(), CompileError> {
    compile_expression(program, &node.children[0], source_map)?;
    program.borrow_mut().emit(Instruction::bare(Opcode::Ret));
    Ok(())
}

fn compile_loop(program: &ProgramRef, node: &AstNode, source_map: &mut SourceMap) -> Result<(), CompileError> {
    let start = program.borrow().next_index();
    compile_expression(program, &node.children[0], source_map)?;
    let jif_at = program.borrow_mut().emit(Instruction::with_i16(Opcode::Jif, 0));
    compile_block(program, &node.children[1], source_map)?;
    program.borrow_mut().emit(Instruction::with_i16(Opcode::Jmp, start as i16));
    let end = program.borrow().next_index();
    program.borrow_mut().patch(jif_at, Instruction::with_i16(Opcode::Jif, end as i16));
    Ok(())
}

fn compile_branches(program: &ProgramRef, node: &AstNode, source_map: &mut SourceMap) -> Result<(), CompileError> {
    let mut end_jumps = Vec::new();
    compile_branch_arm(program, node, &mut end_jumps, source_map)?;
    let end = program.borrow().next_index();
    for jmp_at in end_jumps {
        program.borrow_mut().patch(jmp_at, Instruction::with_i16(Opcode::Jmp, end as i16));
    }
    Ok(())
}

fn compile_branch_arm(
    program: &ProgramRef,
    node: &AstNode,
    end_jumps: &mut Vec<usize>,
    source_map: &mut SourceMap,
) -> Result<(), CompileError> {
    if node.value == "alt" {
        return compile_block(program, &node.children[0], source_map);
    }

    compile_expression(program, &node.children[0], source_map)?;
    let jif_at = program.borrow_mut().emit(Instruction::with_i16(Opcode::Jif, 0));
    compile_block(program, &node.children[1], source_map)?;
    let jmp_at = program.borrow_mut().emit(Instruction::with_i16(Opcode::Jmp, 0));
    end_jumps.push(jmp_at);

    let next = program.borrow().next_index();
    program.borrow_mut().patch(jif_at, Instruction::with_i16(Opcode::Jif, next as i16));

    if let Some(next_arm) = node.children.get(2) {
        compile_branch_arm(program, next_arm, end_jumps, source_map)?;
    }
    Ok(())
}

fn compile_function(program: &ProgramRef, node: &AstNode, source_map: &mut SourceMap) -> Result<(), CompileError> {
    let params = &node.children[0];
    let body = &node.children[1];

    let child = new_program_ref(Program::new(params.children.len() as u16, Some(Rc::clone(program))));
    for param in &params.children {
        register_unique_variable_local(&child, &param.value, param.pos.clone())?;
    }

    compile_block(&child, body, source_map)?;

    let closed_count = child.borrow().closure_table.len() as u16;
    // `spec.md` §5/§9: the parent back-reference exists only for name
    // resolution during compilation of this unit; sever it now.
    child.borrow_mut().parent = None;

    let const_index = program.borrow_mut().push_constant(Value::Program(child));
    program.borrow_mut().emit(Instruction::with_u16(Opcode::Pushk, const_index));
    program.borrow_mut().emit(Instruction::with_u16(Opcode::Close, closed_count));
    Ok(())
}

fn compile_include(program: &ProgramRef, node: &AstNode, source_map: &mut SourceMap) -> Result<(), CompileError> {
    let path = node.value.clone();
    let text = source_map
        .load(&path)
        .map_err(|source| CompileError::IncludeReadFailure {
            path: path.clone(),
            pos: node.pos.clone(),
            source: SourceReadError { path: path.clone(), source },
        })?
        .text
        .clone();

    let tokens = helium_lex::lexify(&text, path.clone())?;
    let included = helium_par::parse(tokens)?;
    compile_block(program, &included, source_map)
}
