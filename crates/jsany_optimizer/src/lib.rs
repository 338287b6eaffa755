//! jsany_optimizer: The stage between parsing and code generation.
//!
//! Holds the finished statement list and exposes the `optimize` hook and the
//! `transpile` entry point. No rewrite pass is implemented yet, so the tree
//! reaches the generator unchanged.

use jsany_ast::Statement;
use jsany_emitter::{CodeGenerator, GenerateResult};

bitflags::bitflags! {
    /// Optimizations that may be requested for a program.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct OptimizationFlags: u32 {
        const NONE           = 0;
        const TYPE_DEDUCTION = 1 << 0;
    }
}

impl OptimizationFlags {
    /// Resolve a configuration name such as `"typeDeduction"`.
    pub fn from_option_name(name: &str) -> Option<Self> {
        match name {
            "typeDeduction" => Some(Self::TYPE_DEDUCTION),
            _ => None,
        }
    }
}

pub struct Optimizer<'s, 'a> {
    statements: &'s [Statement<'a>],
    applied: OptimizationFlags,
}

impl<'s, 'a> Optimizer<'s, 'a> {
    pub fn new(statements: &'s [Statement<'a>]) -> Self {
        Self {
            statements,
            applied: OptimizationFlags::NONE,
        }
    }

    /// Run the requested passes. Flags are recorded; the tree is not rewritten.
    pub fn optimize(&mut self, flags: OptimizationFlags) {
        self.applied |= flags;
    }

    /// Flags passed to `optimize` so far.
    pub fn applied(&self) -> OptimizationFlags {
        self.applied
    }

    pub fn statements(&self) -> &'s [Statement<'a>] {
        self.statements
    }

    /// Generate output for the held statements in the generator's mode.
    pub fn transpile(&self, generator: &mut CodeGenerator) -> GenerateResult<String> {
        generator.generate(self.statements)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsany_core::CompilerArena;
    use jsany_emitter::{EmitMode, GeneratorOptions};
    use jsany_parser::parse;
    use jsany_scanner::tokenize;

    #[test]
    fn test_flag_names() {
        assert_eq!(
            OptimizationFlags::from_option_name("typeDeduction"),
            Some(OptimizationFlags::TYPE_DEDUCTION)
        );
        assert_eq!(OptimizationFlags::from_option_name("inline"), None);
        assert_eq!(OptimizationFlags::TYPE_DEDUCTION.bits(), 0x1);
    }

    #[test]
    fn test_optimize_leaves_tree_unchanged() {
        let arena = CompilerArena::new();
        let tokens = tokenize("var a = 1;\na += 2;");
        let program = parse(&arena, &tokens).unwrap();
        let mut optimizer = Optimizer::new(program.statements);
        optimizer.optimize(OptimizationFlags::TYPE_DEDUCTION);
        assert_eq!(optimizer.applied(), OptimizationFlags::TYPE_DEDUCTION);
        assert_eq!(optimizer.statements(), program.statements);
    }

    #[test]
    fn test_transpile_matches_direct_generation() {
        let arena = CompilerArena::new();
        let tokens = tokenize("x = [1, 2];");
        let program = parse(&arena, &tokens).unwrap();
        let options = GeneratorOptions {
            emit_mode: EmitMode::Statements,
            ..GeneratorOptions::default()
        };

        let mut optimizer = Optimizer::new(program.statements);
        optimizer.optimize(OptimizationFlags::TYPE_DEDUCTION);
        let optimized = optimizer.transpile(&mut CodeGenerator::new(options.clone())).unwrap();
        let direct = CodeGenerator::new(options).generate(program.statements).unwrap();
        assert_eq!(optimized, direct);
    }
}
