//! Whole-program layout
//!
//! ```text
//!     li x1 l_stack_begin
//!     jal x2 p_<entry>
//!     ehlt
//! p_<name>:            every procedure, in source order
//!     ...
//! g_<name>:            every global, in source order
//!     data 0 <size>
//! l_stack_begin:       the stack grows upward from here
//! ```

use crate::calling_convention::{emit_epilogue, emit_prologue};
use crate::context::{procedure_label, TranslateContext, STACK_BEGIN_LABEL};
use crate::stmt::translate_statement;
use crate::CodegenOptions;
use log::{debug, info, warn};
use plc_codegen::{AsmInst, Reg};
use plc_frontend::{Node, Procedure};

/// Translate a whole program rooted at `root`
pub fn translate_program(root: &Node, options: &CodegenOptions) -> Vec<AsmInst> {
    let mut ctx = TranslateContext::new(options);

    collect_globals(&mut ctx, root);
    if !defines_procedure(root, &options.entry) {
        warn!("entry procedure '{}' is not defined", options.entry);
    }

    ctx.emit(AsmInst::La(Reg::Sp, STACK_BEGIN_LABEL.to_string()));
    ctx.emit(AsmInst::Call(procedure_label(&options.entry)));
    ctx.emit(AsmInst::Halt);

    translate_item(&mut ctx, root);

    let (mut code, data) = ctx.finish();
    debug!("{} code lines, {} data lines", code.len(), data.len());
    code.extend(data);
    code.push(AsmInst::Label(STACK_BEGIN_LABEL.to_string()));
    code
}

fn translate_item<'a>(ctx: &mut TranslateContext<'a>, item: &'a Node) {
    match item {
        Node::Global(items) => {
            for item in items {
                translate_item(ctx, item);
            }
        }
        Node::Procedure(proc) => translate_procedure(ctx, proc),
        other => {
            // Top-level statements only see globals
            ctx.enter_procedure(&[], &[]);
            translate_statement(ctx, other);
        }
    }
}

pub fn translate_procedure<'a>(ctx: &mut TranslateContext<'a>, proc: &'a Procedure) {
    let frame_size = proc.frame_size();
    info!(
        "translating procedure {} ({} locals, {} args, frame {} words)",
        proc.header.name,
        proc.vars.len(),
        proc.header.args.len(),
        frame_size
    );
    if proc.frame_extent().is_none() {
        warn!("frame of procedure {} does not fit an immediate offset", proc.header.name);
    }

    ctx.emit(AsmInst::Label(procedure_label(&proc.header.name)));
    ctx.annotate(|| format!("frame {} words, {} args", frame_size, proc.header.args.len()));
    ctx.enter_procedure(&proc.vars, &proc.header.args);

    emit_prologue(ctx, frame_size);
    translate_statement(ctx, &proc.code);
    emit_epilogue(ctx, frame_size);
}

/// Record the size of every top-level declaration before any code is
/// translated, so references ahead of a declaration still see arrays
fn collect_globals(ctx: &mut TranslateContext, node: &Node) {
    match node {
        Node::Global(items) => {
            for item in items {
                collect_globals(ctx, item);
            }
        }
        Node::VarList(decls) => {
            for decl in decls {
                ctx.record_global_size(decl);
            }
        }
        Node::DeclVar(decl) => ctx.record_global_size(decl),
        _ => {}
    }
}

fn defines_procedure(node: &Node, name: &str) -> bool {
    match node {
        Node::Global(items) => items.iter().any(|item| defines_procedure(item, name)),
        Node::Procedure(proc) => proc.header.name == name,
        _ => false,
    }
}
