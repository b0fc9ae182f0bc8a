//! Address resolution
//!
//! Names resolve to a local slot, an argument slot or a global label, in
//! that order. Frame slots are measured downward from the frame top.
//!
//! The running shift is not reset between the local and the argument
//! list. Arguments therefore sit below the whole local frame, which is
//! where the caller's pushes leave them once the callee has advanced the
//! frame register by the local frame size.

use crate::context::{global_label, word_immediate, TranslateContext};
use log::trace;
use plc_codegen::{AsmInst, Reg};

/// Where a named value lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Address {
    /// Local declaration `shift` words below the frame top
    Local { shift: u32, size: u32 },
    /// Formal parameter `shift` words below the frame top
    Argument { shift: u32 },
    /// Static data label; also used for names nothing declares
    Global { label: String, size: Option<u32> },
}

impl Address {
    /// Whether the name denotes storage of more than one word
    pub fn is_array(&self) -> bool {
        match self {
            Address::Local { size, .. } => *size > 1,
            Address::Argument { .. } => false,
            Address::Global { size, .. } => size.is_some_and(|s| s > 1),
        }
    }
}

/// Resolve `name` against the current procedure, falling back to a global
pub fn resolve(ctx: &TranslateContext, name: &str) -> Address {
    let mut shift: u32 = 0;

    for decl in ctx.proc_vars {
        shift = shift.saturating_add(decl.size);
        if decl.name == name {
            return Address::Local {
                shift,
                size: decl.size,
            };
        }
    }

    for arg in ctx.proc_args {
        shift = shift.saturating_add(1);
        if arg == name {
            return Address::Argument { shift };
        }
    }

    Address::Global {
        label: global_label(name),
        size: ctx.global_size(name),
    }
}

/// Load the address of `name` into `dest`
pub fn emit_address(ctx: &mut TranslateContext, name: &str, dest: Reg) -> Address {
    let address = resolve(ctx, name);
    match &address {
        Address::Local { shift, .. } | Address::Argument { shift } => {
            // Pushes made since the prologue moved the frame register up
            let offset = word_immediate(shift.saturating_add(ctx.stack_depth));
            trace!("resolve {}: frame slot -{} (depth {})", name, shift, ctx.stack_depth);
            ctx.emit(AsmInst::AddI(dest, Reg::Sp, -offset));
        }
        Address::Global { label, .. } => {
            trace!("resolve {}: label {}", name, label);
            ctx.emit(AsmInst::La(dest, label.clone()));
        }
    }
    address
}
