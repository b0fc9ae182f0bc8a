//! Expression translation
//!
//! Every expression is translated in one of two modes. Value mode leaves
//! the result in the cursor register; address mode leaves the address of
//! an lvalue there. Binary operators evaluate the left operand into the
//! cursor register and the right one into the register above it, then
//! combine in place, so register pressure equals nesting depth.

use crate::context::TranslateContext;
use crate::resolver::emit_address;
use crate::stmt;
use log::trace;
use plc_codegen::{AsmInst, Reg};
use plc_frontend::{BinaryOp, Node, UnaryOp};

/// Evaluate `node` into the cursor register
pub fn translate_value<'a>(ctx: &mut TranslateContext<'a>, node: &'a Node) {
    let dest = ctx.cursor();
    match node {
        Node::Constant(value) => ctx.emit(AsmInst::Li(dest, *value)),

        Node::Refname(name) => {
            let address = emit_address(ctx, name, dest);
            // Arrays decay to their base address
            if !address.is_array() {
                ctx.emit(AsmInst::Load(dest, dest, 0));
            }
        }

        Node::Binop { op, left, right } => translate_binop(ctx, *op, left, right),

        Node::Unop { op, arg } => translate_unop(ctx, *op, arg),

        _ => stmt::translate_in_value_position(ctx, node),
    }
}

/// Evaluate the address `node` designates into the cursor register
pub fn translate_address<'a>(ctx: &mut TranslateContext<'a>, node: &'a Node) {
    match node {
        Node::Refname(name) => {
            let dest = ctx.cursor();
            emit_address(ctx, name, dest);
        }
        Node::Unop {
            op: UnaryOp::Dereference,
            arg,
        } => translate_value(ctx, arg),
        other => {
            trace!("non-lvalue used as an address, evaluating its value");
            translate_value(ctx, other)
        }
    }
}

fn translate_binop<'a>(ctx: &mut TranslateContext<'a>, op: BinaryOp, left: &'a Node, right: &'a Node) {
    let rd = ctx.cursor();
    translate_value(ctx, left);
    let rt = ctx.advance_cursor();
    translate_value(ctx, right);
    ctx.retreat_cursor();

    let inst = match op {
        BinaryOp::Add => AsmInst::Add(rd, rd, rt),
        BinaryOp::Sub => AsmInst::Sub(rd, rd, rt),
        BinaryOp::Mul => AsmInst::Mul(rd, rd, rt),
        BinaryOp::Div => AsmInst::Div(rd, rd, rt),
        BinaryOp::Mod => AsmInst::Rem(rd, rd, rt),
        BinaryOp::Equal => AsmInst::Seq(rd, rd, rt),
        BinaryOp::NotEqual => AsmInst::Sne(rd, rd, rt),
        BinaryOp::Less => AsmInst::Slt(rd, rd, rt),
        // a > b is b < a
        BinaryOp::Greater => AsmInst::Slt(rd, rt, rd),
        BinaryOp::And => AsmInst::And(rd, rd, rt),
        BinaryOp::Or => AsmInst::Or(rd, rd, rt),
        BinaryOp::Xor => AsmInst::Xor(rd, rd, rt),
    };
    ctx.emit(inst);
}

fn translate_unop<'a>(ctx: &mut TranslateContext<'a>, op: UnaryOp, arg: &'a Node) {
    let rd = ctx.cursor();
    translate_value(ctx, arg);
    match op {
        UnaryOp::Plus => {}
        UnaryOp::Minus => ctx.emit(AsmInst::Sub(rd, Reg::Zero, rd)),
        UnaryOp::Not => ctx.emit(AsmInst::Not(rd, rd)),
        UnaryOp::Dereference => ctx.emit(AsmInst::Load(rd, rd, 0)),
    }
}
