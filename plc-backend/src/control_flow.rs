//! Control flow lowering
//!
//! `if` and `while` draw their label ids from the one counter in the
//! context, so every label is unique across the compilation unit.

use crate::context::TranslateContext;
use crate::expr::translate_value;
use crate::stmt::translate_statement;
use log::trace;
use plc_codegen::AsmInst;
use plc_frontend::Node;

pub fn if_false_label(id: u32) -> String {
    format!("if_{}_false", id)
}

pub fn if_end_label(id: u32) -> String {
    format!("if_{}_end", id)
}

pub fn while_begin_label(id: u32) -> String {
    format!("while_{}_begin", id)
}

pub fn while_end_label(id: u32) -> String {
    format!("while_{}_end", id)
}

/// Lower `if cond then if_true [else if_false] end`
///
/// The end label is emitted even without an else branch.
pub fn translate_if<'a>(
    ctx: &mut TranslateContext<'a>,
    cond: &'a Node,
    if_true: &'a Node,
    if_false: Option<&'a Node>,
) {
    ctx.reset_cursor();
    translate_value(ctx, cond);
    let cond_reg = ctx.cursor();

    let id = ctx.next_label_id();
    trace!("if {}: else branch {}", id, if_false.is_some());

    ctx.emit(AsmInst::Beqz(cond_reg, if_false_label(id)));
    translate_statement(ctx, if_true);
    if if_false.is_some() {
        ctx.emit(AsmInst::Jump(if_end_label(id)));
    }

    ctx.emit(AsmInst::Label(if_false_label(id)));
    if let Some(else_branch) = if_false {
        translate_statement(ctx, else_branch);
    }
    ctx.emit(AsmInst::Label(if_end_label(id)));
}

/// Lower `while cond do body end`
pub fn translate_while<'a>(ctx: &mut TranslateContext<'a>, cond: &'a Node, body: &'a Node) {
    let id = ctx.next_label_id();
    trace!("while {}", id);

    ctx.emit(AsmInst::Label(while_begin_label(id)));
    ctx.reset_cursor();
    translate_value(ctx, cond);
    let cond_reg = ctx.cursor();
    ctx.emit(AsmInst::Beqz(cond_reg, while_end_label(id)));

    translate_statement(ctx, body);

    ctx.emit(AsmInst::Jump(while_begin_label(id)));
    ctx.emit(AsmInst::Label(while_end_label(id)));
}
