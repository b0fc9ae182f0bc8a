//! Assembly text emission
//!
//! One instruction per line. Labels start at column 0, everything else
//! is indented by a tab.

use crate::asm::AsmInst;
use plc_common::CompilerError;
use std::io::Write;

/// Render a complete instruction stream as assembly text
pub fn emit_instructions(instructions: &[AsmInst]) -> String {
    let mut text = String::new();
    for inst in instructions {
        if !inst.is_label() {
            text.push('\t');
        }
        text.push_str(&inst.to_string());
        text.push('\n');
    }
    text
}

/// Stream the assembly text to `out`
pub fn write_instructions<W: Write + ?Sized>(out: &mut W, instructions: &[AsmInst]) -> Result<(), CompilerError> {
    out.write_all(emit_instructions(instructions).as_bytes())?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asm::Reg;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_labels_are_not_indented() {
        let text = emit_instructions(&[
            AsmInst::Label("p_main".to_string()),
            AsmInst::Li(Reg::X(3), 7),
            AsmInst::Write(Reg::X(3)),
            AsmInst::Ret,
        ]);
        assert_eq!(text, "p_main:\n\tli x3 7\n\tewrite x3\n\tjalr x0 x2\n");
    }

    #[test]
    fn test_write_to_buffer() {
        let mut buffer = Vec::new();
        write_instructions(&mut buffer, &[AsmInst::Halt]).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "\tehlt\n");
    }
}
