//! Name resolution: `register_variable` and `register_unique_variable_local`.
//!
//! Grounded on `faxc-sem`'s rib-walking `ScopeTree::resolve`, generalized
//! from arbitrary block ribs to three scope classes keyed directly off a
//! `Program`'s own `parent` chain. There is no separate rib stack because
//! every scope boundary here is a function boundary.

use helium_bc::ProgramRef;

use crate::error::CompileError;

/// Which table a resolved name lives in, and therefore which load/store
/// opcode family to emit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScopeClass {
    Local,
    Closed,
    Global,
}

/// `spec.md` §4.F's four-case resolution, in order:
/// 1. Local in the current program.
/// 2. Local in some ancestor *other than the root* → captured into the
///    current program's `closure_table`.
/// 3. Local in the root program (covers both an ordinary top-level
///    binding and a `create_native`-registered name) → `Global`, read
///    directly by slot rather than threaded through a closure.
/// 4. Unresolved, but the current program *is* the top level → implicit
///    declaration.
///
/// Returns `None` when none of the above apply (case 5: undefined).
///
/// Case 2 and case 3 only make sense as distinct cases if the root is
/// excluded from the ancestor walk in case 2; otherwise case 3 could
/// never fire, since the root is always among a program's ancestors.
/// The root's own bindings are therefore never captured into a
/// `closure_table`; only a genuine enclosing *function*'s locals are.
pub fn register_variable(program: &ProgramRef, name: &str) -> Option<(u16, ScopeClass)> {
    if let Some(&slot) = program.borrow().symbol_table.get(name) {
        return Some((slot, ScopeClass::Local));
    }

    if let Some(&slot) = program.borrow().closure_table.get(name) {
        return Some((slot, ScopeClass::Closed));
    }

    let has_parent = program.borrow().parent.is_some();
    let root = root_of(program);
    let is_root = std::rc::Rc::ptr_eq(&root, program);

    if has_parent && resolves_local_in_proper_ancestor(program, &root, name) {
        let slot = program.borrow_mut().declare_closed(name.to_string());
        return Some((slot, ScopeClass::Closed));
    }

    if !is_root {
        if let Some(&slot) = root.borrow().symbol_table.get(name) {
            return Some((slot, ScopeClass::Global));
        }
    }

    if !has_parent {
        let slot = program.borrow_mut().declare_local(name.to_string());
        return Some((slot, ScopeClass::Local));
    }

    None
}

/// Used for formal parameters and other explicit declarations, which
/// must not silently shadow an existing binding in the same scope.
pub fn register_unique_variable_local(
    program: &ProgramRef,
    name: &str,
    pos: helium_util::Position,
) -> Result<u16, CompileError> {
    if program.borrow().symbol_table.contains_key(name) {
        return Err(CompileError::DuplicateInScope { name: name.to_string(), pos });
    }
    Ok(program.borrow_mut().declare_local(name.to_string()))
}

/// Walks `program`'s ancestor chain, stopping before (not at) `root`.
/// The root is handled separately as the `Global` case.
fn resolves_local_in_proper_ancestor(program: &ProgramRef, root: &ProgramRef, name: &str) -> bool {
    let mut cursor = program.borrow().parent.clone();
    while let Some(ancestor) = cursor {
        if std::rc::Rc::ptr_eq(&ancestor, root) {
            return false;
        }
        if ancestor.borrow().symbol_table.contains_key(name) {
            return true;
        }
        cursor = ancestor.borrow().parent.clone();
    }
    false
}

fn root_of(program: &ProgramRef) -> ProgramRef {
    let mut cursor = program.clone();
    loop {
        let parent = cursor.borrow().parent.clone();
        match parent {
            Some(p) => cursor = p,
            None => return cursor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use helium_bc::{new_program_ref, Program};

    #[test]
    fn first_assignment_at_top_level_implicitly_declares() {
        let top = new_program_ref(Program::top_level());
        let (slot, class) = register_variable(&top, "x").unwrap();
        assert_eq!(slot, 0);
        assert_eq!(class, ScopeClass::Local);
    }

    #[test]
    fn function_directly_under_top_level_resolves_top_level_name_as_global() {
        let top = new_program_ref(Program::top_level());
        top.borrow_mut().declare_local("x");
        let f = new_program_ref(Program::new(0, Some(top.clone())));
        let (slot, class) = register_variable(&f, "x").unwrap();
        assert_eq!(slot, 0);
        assert_eq!(class, ScopeClass::Global);
    }

    #[test]
    fn function_nested_two_deep_closes_over_the_intermediate_functions_local() {
        let top = new_program_ref(Program::top_level());
        let outer = new_program_ref(Program::new(1, Some(top)));
        outer.borrow_mut().declare_local("x");
        let inner = new_program_ref(Program::new(0, Some(outer)));
        let (slot, class) = register_variable(&inner, "x").unwrap();
        assert_eq!(slot, 0);
        assert_eq!(class, ScopeClass::Closed);
    }

    #[test]
    fn undefined_name_in_a_function_body_fails() {
        let top = new_program_ref(Program::top_level());
        let inner = new_program_ref(Program::new(0, Some(top)));
        assert!(register_variable(&inner, "ghost").is_none());
    }

    #[test]
    fn duplicate_param_name_errors() {
        let top = new_program_ref(Program::top_level());
        let pos = helium_util::Position::start("t.he");
        register_unique_variable_local(&top, "x", pos.clone()).unwrap();
        let err = register_unique_variable_local(&top, "x", pos).unwrap_err();
        assert!(matches!(err, CompileError::DuplicateInScope { .. }));
    }
}
