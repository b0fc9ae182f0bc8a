//! Whole-program translation tests

mod call_tests;

use crate::{translate_program, CodegenOptions};
use plc_codegen::{AsmInst, Reg};
use plc_frontend::Frontend;

/// Parse and translate `source` with default options
pub(crate) fn compile(source: &str) -> Vec<AsmInst> {
    let root = Frontend::parse_source(source).expect("test program should parse");
    translate_program(&root, &CodegenOptions::default())
}

/// The instructions of procedure `name`, label excluded
pub(crate) fn procedure_body(code: &[AsmInst], name: &str) -> Vec<AsmInst> {
    let label = AsmInst::Label(format!("p_{}", name));
    let start = code
        .iter()
        .position(|inst| *inst == label)
        .unwrap_or_else(|| panic!("no procedure {}", name));
    code[start + 1..]
        .iter()
        .take_while(|inst| !matches!(inst, AsmInst::Label(l) if is_section_label(l)))
        .cloned()
        .collect()
}

fn is_section_label(label: &str) -> bool {
    label.starts_with("p_") || label.starts_with("g_") || label == "l_stack_begin"
}

/// Immediates of every frame-relative address computation
pub(crate) fn frame_offsets(code: &[AsmInst]) -> Vec<i32> {
    code.iter()
        .filter_map(|inst| match inst {
            AsmInst::AddI(Reg::X(_), Reg::Sp, imm) => Some(*imm),
            _ => None,
        })
        .collect()
}

/// Net movement of the stack register
pub(crate) fn stack_movement(code: &[AsmInst]) -> i32 {
    code.iter()
        .map(|inst| match inst {
            AsmInst::AddI(Reg::Sp, Reg::Sp, imm) => *imm,
            _ => 0,
        })
        .sum()
}
