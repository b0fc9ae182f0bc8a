//! Calling convention
//!
//! - The frame register `x1` doubles as the stack pointer; the stack
//!   grows upward and `x1` points at the first free word.
//! - Caller: push the link register, push the arguments last to first,
//!   call, drop the arguments, pop the link register.
//! - Callee: advance `x1` over the local frame on entry, retract it
//!   before returning through the link register.
//! - `read` and `write` are intrinsics and never touch the stack.

use crate::context::{procedure_label, word_immediate, TranslateContext};
use crate::expr::{translate_address, translate_value};
use log::{debug, trace, warn};
use plc_codegen::{AsmInst, Reg};
use plc_frontend::ProcCall;

pub const READ_INTRINSIC: &str = "read";
pub const WRITE_INTRINSIC: &str = "write";

/// Push `reg` onto the stack
pub fn push(ctx: &mut TranslateContext, reg: Reg) {
    ctx.emit(AsmInst::Store(reg, Reg::Sp, 0));
    ctx.emit(AsmInst::AddI(Reg::Sp, Reg::Sp, 1));
    ctx.stack_depth += 1;
}

/// Pop the top of the stack into `reg`
pub fn pop(ctx: &mut TranslateContext, reg: Reg) {
    ctx.emit(AsmInst::AddI(Reg::Sp, Reg::Sp, -1));
    ctx.emit(AsmInst::Load(reg, Reg::Sp, 0));
    ctx.stack_depth -= 1;
}

/// Allocate the local frame
pub fn emit_prologue(ctx: &mut TranslateContext, frame_size: u32) {
    if frame_size > 0 {
        ctx.emit(AsmInst::AddI(Reg::Sp, Reg::Sp, word_immediate(frame_size)));
    }
}

/// Release the local frame and return to the caller
pub fn emit_epilogue(ctx: &mut TranslateContext, frame_size: u32) {
    if frame_size > 0 {
        ctx.emit(AsmInst::AddI(Reg::Sp, Reg::Sp, -word_immediate(frame_size)));
    }
    ctx.emit(AsmInst::Ret);
}

pub fn is_intrinsic(call: &ProcCall) -> bool {
    (call.name == READ_INTRINSIC || call.name == WRITE_INTRINSIC) && !call.args.is_empty()
}

/// Translate a call statement
pub fn translate_call<'a>(ctx: &mut TranslateContext<'a>, call: &'a ProcCall) {
    if is_intrinsic(call) {
        translate_intrinsic(ctx, call);
        return;
    }

    let arg_count = call.args.len();
    debug!("call {} with {} argument(s)", call.name, arg_count);
    ctx.annotate(|| format!("call {} ({} args)", call.name, arg_count));

    push(ctx, Reg::Link);

    let outer_pending = ctx.pending_args;
    ctx.pending_args = 0;

    // Last argument first, so the first argument ends up on top
    for arg in call.args.iter().rev() {
        ctx.reset_cursor();
        translate_value(ctx, arg);
        let value = ctx.cursor();
        push(ctx, value);
        ctx.pending_args += 1;
    }

    ctx.emit(AsmInst::Call(procedure_label(&call.name)));

    let pushed = ctx.pending_args;
    if pushed > 0 {
        ctx.emit(AsmInst::AddI(Reg::Sp, Reg::Sp, -word_immediate(pushed)));
        ctx.stack_depth -= pushed;
    }

    pop(ctx, Reg::Link);
    ctx.pending_args = outer_pending;
}

fn translate_intrinsic<'a>(ctx: &mut TranslateContext<'a>, call: &'a ProcCall) {
    let arg = &call.args[0];
    if call.args.len() > 1 {
        warn!("{}: ignoring {} extra argument(s)", call.name, call.args.len() - 1);
    }

    ctx.reset_cursor();
    let target = ctx.cursor();
    if call.name == READ_INTRINSIC {
        trace!("intrinsic read");
        translate_address(ctx, arg);
        let value = ctx.advance_cursor();
        ctx.emit(AsmInst::Read(value));
        ctx.emit(AsmInst::Store(value, target, 0));
        ctx.retreat_cursor();
    } else {
        trace!("intrinsic write");
        translate_value(ctx, arg);
        ctx.emit(AsmInst::Write(target));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CodegenOptions;
    use plc_frontend::{BinaryOp, DeclVar, Node};
    use pretty_assertions::assert_eq;

    fn lower_call(call: &ProcCall, vars: &[DeclVar]) -> Vec<AsmInst> {
        let options = CodegenOptions::default();
        let mut ctx = TranslateContext::new(&options);
        ctx.enter_procedure(vars, &[]);
        translate_call(&mut ctx, call);
        assert_eq!(ctx.stack_depth, 0);
        assert_eq!(ctx.pending_args, 0);
        ctx.finish().0
    }

    fn as_call(node: Node) -> ProcCall {
        match node {
            Node::ProcCall(call) => call,
            other => panic!("Expected call, got {:?}", other),
        }
    }

    #[test]
    fn test_arguments_pushed_last_first() {
        let call = as_call(Node::call("f", vec![Node::constant(10), Node::constant(20)]));
        assert_eq!(
            lower_call(&call, &[]),
            vec![
                AsmInst::Store(Reg::Link, Reg::Sp, 0),
                AsmInst::AddI(Reg::Sp, Reg::Sp, 1),
                AsmInst::Li(Reg::X(3), 20),
                AsmInst::Store(Reg::X(3), Reg::Sp, 0),
                AsmInst::AddI(Reg::Sp, Reg::Sp, 1),
                AsmInst::Li(Reg::X(3), 10),
                AsmInst::Store(Reg::X(3), Reg::Sp, 0),
                AsmInst::AddI(Reg::Sp, Reg::Sp, 1),
                AsmInst::Call("p_f".to_string()),
                AsmInst::AddI(Reg::Sp, Reg::Sp, -2),
                AsmInst::AddI(Reg::Sp, Reg::Sp, -1),
                AsmInst::Load(Reg::Link, Reg::Sp, 0),
            ]
        );
    }

    #[test]
    fn test_local_offsets_compensate_for_pushes() {
        let vars = vec![DeclVar::new("x", 1)];
        let call = as_call(Node::call("f", vec![Node::refname("x"), Node::refname("x")]));
        let code = lower_call(&call, &vars);
        let offsets: Vec<i32> = code
            .iter()
            .filter_map(|inst| match inst {
                AsmInst::AddI(Reg::X(3), Reg::Sp, imm) => Some(*imm),
                _ => None,
            })
            .collect();
        // link saved, then one argument already pushed
        assert_eq!(offsets, vec![-2, -3]);
    }

    #[test]
    fn test_nested_call_drops_its_own_arguments() {
        // f(g(1), 2)
        let call = as_call(Node::call(
            "f",
            vec![Node::call("g", vec![Node::constant(1)]), Node::constant(2)],
        ));
        let code = lower_call(&call, &[]);
        let trace: Vec<&AsmInst> = code
            .iter()
            .filter(|inst| match inst {
                AsmInst::Call(_) => true,
                AsmInst::AddI(Reg::Sp, Reg::Sp, imm) => *imm < 0,
                _ => false,
            })
            .collect();
        assert_eq!(
            trace,
            vec![
                &AsmInst::Call("p_g".to_string()),
                &AsmInst::AddI(Reg::Sp, Reg::Sp, -1),
                &AsmInst::AddI(Reg::Sp, Reg::Sp, -1),
                &AsmInst::Call("p_f".to_string()),
                &AsmInst::AddI(Reg::Sp, Reg::Sp, -2),
                &AsmInst::AddI(Reg::Sp, Reg::Sp, -1),
            ]
        );
    }

    #[test]
    fn test_write_is_intrinsic() {
        let call = as_call(Node::call(
            "write",
            vec![Node::binop(BinaryOp::Add, Node::constant(1), Node::constant(2))],
        ));
        let code = lower_call(&call, &[]);
        assert!(!code.iter().any(|i| matches!(i, AsmInst::Store(..) | AsmInst::Call(_))));
        assert_eq!(code.last(), Some(&AsmInst::Write(Reg::X(3))));
    }

    #[test]
    fn test_read_stores_through_address() {
        let vars = vec![DeclVar::new("x", 1)];
        let call = as_call(Node::call("read", vec![Node::refname("x")]));
        assert_eq!(
            lower_call(&call, &vars),
            vec![
                AsmInst::AddI(Reg::X(3), Reg::Sp, -1),
                AsmInst::Read(Reg::X(4)),
                AsmInst::Store(Reg::X(4), Reg::X(3), 0),
            ]
        );
    }

    #[test]
    fn test_intrinsic_translates_only_first_argument() {
        let call = as_call(Node::call("write", vec![Node::constant(1), Node::constant(2)]));
        assert_eq!(
            lower_call(&call, &[]),
            vec![AsmInst::Li(Reg::X(3), 1), AsmInst::Write(Reg::X(3))]
        );
    }

    #[test]
    fn test_intrinsic_name_without_arguments_is_a_call() {
        let call = as_call(Node::call("write", vec![]));
        let code = lower_call(&call, &[]);
        assert!(code.contains(&AsmInst::Call("p_write".to_string())));
    }

    #[test]
    fn test_prologue_and_epilogue() {
        let options = CodegenOptions::default();
        let mut ctx = TranslateContext::new(&options);
        emit_prologue(&mut ctx, 3);
        emit_epilogue(&mut ctx, 3);
        emit_prologue(&mut ctx, 0);
        emit_epilogue(&mut ctx, 0);
        assert_eq!(
            ctx.finish().0,
            vec![
                AsmInst::AddI(Reg::Sp, Reg::Sp, 3),
                AsmInst::AddI(Reg::Sp, Reg::Sp, -3),
                AsmInst::Ret,
                AsmInst::Ret,
            ]
        );
    }
}
