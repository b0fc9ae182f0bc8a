//! Procedure Language Compiler - Code Generation
//! 
//! This crate holds the final phase of compilation: the target
//! machine's register and instruction model and the rendering of an
//! instruction stream as assembly text.

pub mod asm;
pub mod emit;

pub use asm::{AsmInst, Reg, SCRATCH_BASE};
pub use emit::{emit_instructions, write_instructions};

/// Main entry point for text generation
pub fn generate_assembly(instructions: &[AsmInst]) -> String {
    emit_instructions(instructions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_code_generation() {
        let instructions = vec![
            AsmInst::Li(Reg::X(3), 42),
            AsmInst::Store(Reg::X(3), Reg::Sp, 0),
            AsmInst::Halt,
        ];

        let asm = generate_assembly(&instructions);
        assert!(asm.contains("li x3 42"));
        assert!(asm.contains("sw x3 x1 0"));
        assert!(asm.contains("ehlt"));
    }
}
