//! Statement translation and node dispatch

use crate::calling_convention::{pop, push, translate_call};
use crate::context::TranslateContext;
use crate::control_flow::{translate_if, translate_while};
use crate::expr::{translate_address, translate_value};
use log::{trace, warn};
use plc_codegen::{AsmInst, Reg, SCRATCH_BASE};
use plc_frontend::Node;

/// Translate `node` for its effect
pub fn translate_statement<'a>(ctx: &mut TranslateContext<'a>, node: &'a Node) {
    match node {
        Node::OpList(ops) => {
            for op in ops {
                translate_statement(ctx, op);
            }
        }

        Node::Assign { lvalue, expr } => translate_assign(ctx, lvalue, expr),

        Node::If {
            cond,
            if_true,
            if_false,
        } => translate_if(ctx, cond, if_true, if_false.as_deref()),

        Node::While { cond, body } => translate_while(ctx, cond, body),

        Node::ProcCall(call) => translate_call(ctx, call),

        // Declarations outside a procedure header are static storage
        Node::VarList(decls) => {
            for decl in decls {
                ctx.reserve_global(decl);
            }
        }
        Node::DeclVar(decl) => ctx.reserve_global(decl),

        Node::Global(items) => {
            for item in items {
                translate_statement(ctx, item);
            }
        }

        Node::ProcHeader(_) => {}

        Node::Procedure(proc) => {
            warn!("procedure '{}' nested in a statement is not translated", proc.header.name);
        }

        Node::Binop { .. } | Node::Unop { .. } | Node::Constant(_) | Node::Refname(_) => {
            ctx.reset_cursor();
            translate_value(ctx, node);
        }
    }
}

/// Store `expr` at the address of `lvalue`
fn translate_assign<'a>(ctx: &mut TranslateContext<'a>, lvalue: &'a Node, expr: &'a Node) {
    ctx.reset_cursor();
    let address = ctx.cursor();
    translate_address(ctx, lvalue);
    let value = ctx.advance_cursor();
    translate_value(ctx, expr);
    ctx.retreat_cursor();
    ctx.emit(AsmInst::Store(value, address, 0));
}

/// Translate a statement where a value is expected, yielding 0
///
/// Statements start again from the base scratch register, so the live
/// registers below the cursor are parked on the stack meanwhile.
pub fn translate_in_value_position<'a>(ctx: &mut TranslateContext<'a>, node: &'a Node) {
    let cursor = ctx.cursor_index();
    trace!("statement in value position, saving x{}..x{}", SCRATCH_BASE, cursor);

    for index in SCRATCH_BASE..cursor {
        push(ctx, Reg::X(index));
    }

    translate_statement(ctx, node);

    for index in (SCRATCH_BASE..cursor).rev() {
        pop(ctx, Reg::X(index));
    }

    ctx.set_cursor(cursor);
    ctx.emit(AsmInst::Li(ctx.cursor(), 0));
}
