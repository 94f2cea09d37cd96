//! helium-compile - Ties lexing, parsing, and bytecode lowering into the
//! single `source → Program` pipeline the driver and CLI call.

mod constants;
mod error;
mod lower;
mod scope;

pub use constants::register_constant;
pub use error::CompileError;
pub use lower::compile;
pub use scope::{register_unique_variable_local, register_variable, ScopeClass};

use helium_bc::{new_program_ref, Program, ProgramRef};
use helium_util::SourceMap;

/// Compile source text already registered under `origin` in `source_map`.
/// The returned top-level [`Program`] has no parent and is ready to hand
/// to a VM or to inspect for `--emit-ast`/`--emit-tokens`-style tooling.
pub fn compile_source(source_map: &mut SourceMap, origin: &str, text: &str) -> Result<ProgramRef, CompileError> {
    source_map.insert(origin, text);
    let tokens = helium_lex::lexify(text, origin)?;
    let block = helium_par::parse(tokens)?;

    let top = new_program_ref(Program::top_level());
    compile(&top, &block, source_map)?;
    Ok(top)
}

/// Read `path` from disk, register it in `source_map`, and compile it.
/// This is the entry point `include` itself re-enters internally, and
/// the one a CLI driver calls for the top-level script.
pub fn compile_file(source_map: &mut SourceMap, path: &str) -> Result<ProgramRef, CompileError> {
    let text = source_map
        .load(path)
        .map_err(|source| CompileError::IncludeReadFailure {
            path: path.to_string(),
            pos: helium_util::Position::start(path),
            source: helium_util::SourceReadError { path: path.to_string(), source },
        })?
        .text
        .clone();
    compile_source(source_map, path, &text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use helium_bc::Opcode;

    #[test]
    fn top_level_assignment_compiles_to_pushk_storl() {
        // spec.md S1: a fresh top-level name is declared local, not global.
        // GLOBAL only applies when a *nested* function reaches back into
        // the top-level symbol table.
        let mut source_map = SourceMap::new();
        let program = compile_source(&mut source_map, "t.he", "x <- 1").unwrap();
        let program = program.borrow();
        assert_eq!(program.code[0].opcode(), Opcode::Pushk);
        assert_eq!(program.code[1].opcode(), Opcode::Storl);
    }

    #[test]
    fn nested_function_reaching_top_level_name_uses_global() {
        let mut source_map = SourceMap::new();
        let program =
            compile_source(&mut source_map, "t.he", "x <- 1\nf <- $() { return x }").unwrap();
        let f_program = match &program.borrow().constants[1] {
            helium_bc::Value::Program(p) => p.clone(),
            other => panic!("expected a nested Program constant, got {other:?}"),
        };
        let f_program = f_program.borrow();
        assert_eq!(f_program.code[0].opcode(), Opcode::Loadg);
    }

    #[test]
    fn undefined_symbol_in_nested_function_reports_name() {
        let mut source_map = SourceMap::new();
        let err = compile_source(&mut source_map, "t.he", "f <- $() { x <- ghost }").unwrap_err();
        assert!(matches!(err, CompileError::UndefinedSymbol { .. }));
    }

    #[test]
    fn missing_include_target_surfaces_io_error() {
        let mut source_map = SourceMap::new();
        let err = compile_source(&mut source_map, "t.he", "include \"does-not-exist.he\"").unwrap_err();
        assert!(matches!(err, CompileError::IncludeReadFailure { .. }));
    }
}
