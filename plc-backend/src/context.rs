//! Translation context
//!
//! The single mutable record threaded through the whole traversal. It
//! owns the instruction stream being built, the scratch-register cursor,
//! the global label counter and the bookkeeping of the calling
//! convention. The procedure scope fields borrow straight from the tree.

use crate::CodegenOptions;
use plc_codegen::{AsmInst, Reg, SCRATCH_BASE};
use plc_common::LabelId;
use plc_frontend::DeclVar;
use std::collections::HashMap;

pub struct TranslateContext<'a> {
    pub(crate) options: &'a CodegenOptions,

    /// Register the next expression result lands in
    cursor: u32,

    /// Shared by `if` and `while`, never reset
    next_label: LabelId,

    /// Arguments pushed by the innermost call sequence in progress
    pub(crate) pending_args: u32,

    /// Words pushed above the frame top since the prologue
    pub(crate) stack_depth: u32,

    /// Locals of the procedure being translated
    pub(crate) proc_vars: &'a [DeclVar],

    /// Formal parameters of the procedure being translated
    pub(crate) proc_args: &'a [String],

    /// Sizes of every global declaration, by name
    global_sizes: HashMap<String, u32>,

    /// Static data section, emitted after the procedures
    data: Vec<AsmInst>,

    instructions: Vec<AsmInst>,
}

impl<'a> TranslateContext<'a> {
    pub fn new(options: &'a CodegenOptions) -> Self {
        Self {
            options,
            cursor: SCRATCH_BASE,
            next_label: 0,
            pending_args: 0,
            stack_depth: 0,
            proc_vars: &[],
            proc_args: &[],
            global_sizes: HashMap::new(),
            data: Vec::new(),
            instructions: Vec::new(),
        }
    }

    pub fn emit(&mut self, inst: AsmInst) {
        self.instructions.push(inst);
    }

    /// Emit a `;` comment line when annotations are enabled
    pub fn annotate(&mut self, text: impl FnOnce() -> String) {
        if self.options.annotate {
            self.instructions.push(AsmInst::Comment(text()));
        }
    }

    // ===== Scratch registers =====

    pub fn cursor(&self) -> Reg {
        Reg::X(self.cursor)
    }

    pub fn cursor_index(&self) -> u32 {
        self.cursor
    }

    pub fn set_cursor(&mut self, index: u32) {
        self.cursor = index;
    }

    pub fn reset_cursor(&mut self) {
        self.cursor = SCRATCH_BASE;
    }

    /// Move to the next scratch register, returning it
    pub fn advance_cursor(&mut self) -> Reg {
        self.cursor += 1;
        self.cursor()
    }

    pub fn retreat_cursor(&mut self) {
        self.cursor -= 1;
    }

    // ===== Labels =====

    pub fn next_label_id(&mut self) -> LabelId {
        let id = self.next_label;
        self.next_label += 1;
        id
    }

    // ===== Procedure scope =====

    /// Point the scope at a new procedure; the previous one is forgotten
    pub fn enter_procedure(&mut self, vars: &'a [DeclVar], args: &'a [String]) {
        self.proc_vars = vars;
        self.proc_args = args;
        self.stack_depth = 0;
        self.pending_args = 0;
        self.reset_cursor();
    }

    // ===== Globals =====

    pub fn record_global_size(&mut self, decl: &DeclVar) {
        self.global_sizes.insert(decl.name.clone(), decl.size);
    }

    pub fn global_size(&self, name: &str) -> Option<u32> {
        self.global_sizes.get(name).copied()
    }

    /// Reserve zeroed storage for a global in the data section
    pub fn reserve_global(&mut self, decl: &DeclVar) {
        self.data.push(AsmInst::Label(global_label(&decl.name)));
        self.data.push(AsmInst::Data(decl.size));
    }

    /// Hand back the code and data sections
    pub fn finish(self) -> (Vec<AsmInst>, Vec<AsmInst>) {
        (self.instructions, self.data)
    }
}

pub fn procedure_label(name: &str) -> String {
    format!("p_{}", name)
}

pub fn global_label(name: &str) -> String {
    format!("g_{}", name)
}

pub const STACK_BEGIN_LABEL: &str = "l_stack_begin";

/// Word count as an `addi` immediate; frontend trees never exceed `i32::MAX`
pub fn word_immediate(words: u32) -> i32 {
    i32::try_from(words).unwrap_or(i32::MAX)
}
