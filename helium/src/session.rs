//! `Session`: one compiler invocation's state, grounded on the teacher's
//! `faxc_drv::Session` (read source → run pipeline → report) cut down to
//! this spec's single real stage sequence, with the teacher's
//! emit-and-return-early shape kept for `--emit-tokens`/`--emit-ast`.

use std::path::PathBuf;

use helium_bc::{new_program_ref, Program, ProgramRef};
use helium_util::{Handler, SourceMap, SourceReadError};

use crate::error::HeliumError;

pub struct Session {
    pub path: PathBuf,
    pub emit_tokens: bool,
    pub emit_ast: bool,
    pub source_map: SourceMap,
    /// Single-shot diagnostic sink: the pipeline aborts on the first error
    /// (`spec.md` §7), so at most one diagnostic is ever emitted here.
    pub handler: Handler,
}

impl Session {
    pub fn new(path: PathBuf, emit_tokens: bool, emit_ast: bool) -> Self {
        Self {
            path,
            emit_tokens,
            emit_ast,
            source_map: SourceMap::new(),
            handler: Handler::new(),
        }
    }

    /// Run the full pipeline, or stop early for an `--emit-*` debug dump.
    /// Returns the compiled top-level [`Program`] unless a dump flag cut
    /// the run short. Any error is also recorded in `self.handler` as a
    /// renderable diagnostic, if it carries a source position.
    pub fn run(&mut self) -> Result<Option<ProgramRef>, HeliumError> {
        self.run_pipeline().map_err(|err| {
            if let Some(diagnostic) = err.diagnostic() {
                self.handler.emit(diagnostic);
            }
            err
        })
    }

    fn run_pipeline(&mut self) -> Result<Option<ProgramRef>, HeliumError> {
        let origin = self.path.to_string_lossy().into_owned();

        tracing::info!(path = %origin, "reading source file");
        let text = self
            .source_map
            .load(&origin)
            .map_err(|source| SourceReadError { path: origin.clone(), source })?
            .text
            .clone();

        tracing::debug!("lexing");
        let tokens = helium_lex::lexify(&text, origin.clone())?;
        if self.emit_tokens {
            for token in &tokens {
                println!("{:#?}", token);
            }
            return Ok(None);
        }

        tracing::debug!(count = tokens.len(), "lexed, parsing");
        let ast = helium_par::parse(tokens)?;
        if self.emit_ast {
            println!("{:#?}", ast);
            return Ok(None);
        }

        tracing::debug!("parsed, compiling");
        let top = new_program_ref(Program::top_level());
        helium_compile::compile(&top, &ast, &mut self.source_map)?;
        tracing::info!(instructions = top.borrow().code.len(), "compiled");
        Ok(Some(top))
    }
}
