//! Procedure Language Compiler Driver
//!
//! Reads a program (source text or a JSON syntax tree), then prints the
//! tree or emits assembly for the target machine.

use clap::{ArgAction, Parser, ValueEnum};
use log::{debug, info};
use plc_backend::{translate_program, CodegenOptions};
use plc_codegen::write_instructions;
use plc_common::CompilerError;
use plc_frontend::{print_tree, Frontend, Node};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Emit {
    /// Assembly text
    Asm,
    /// Indented syntax tree dump
    Tree,
    /// Syntax tree as JSON
    Json,
}

#[derive(Parser)]
#[command(name = "plc")]
#[command(about = "Procedure Language Compiler")]
#[command(version = "0.1.0")]
struct Cli {
    /// Input file (stdin when omitted)
    input: Option<PathBuf>,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// What to produce
    #[arg(long, value_enum, default_value = "asm")]
    emit: Emit,

    /// Procedure called at program start
    #[arg(long, default_value = "main")]
    entry: String,

    /// Comment frame sizes and call sites in the assembly
    #[arg(long)]
    annotate: bool,

    /// Input is a JSON syntax tree instead of source text
    #[arg(long)]
    from_json: bool,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(&cli) {
        match &cli.input {
            Some(path) => eprintln!("{}: {}", path.display(), e),
            None => eprintln!("{}", e),
        }
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let default_filter = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();
}

fn run(cli: &Cli) -> Result<(), CompilerError> {
    let input = read_input(cli.input.as_deref())?;

    // Nothing is translated unless the whole tree was built
    let root = if cli.from_json {
        Frontend::tree_from_json(&input)?
    } else {
        Frontend::parse_source(&input)?
    };
    debug!("syntax tree built");

    let mut out = open_output(cli.output.as_deref())?;
    match cli.emit {
        Emit::Tree => write_text(&mut out, &print_tree(&root)),
        Emit::Json => write_text(&mut out, &format!("{}\n", Frontend::tree_to_json(&root)?)),
        Emit::Asm => emit_assembly(&mut out, &root, cli),
    }
}

fn emit_assembly(out: &mut dyn Write, root: &Node, cli: &Cli) -> Result<(), CompilerError> {
    let options = CodegenOptions {
        entry: cli.entry.clone(),
        annotate: cli.annotate,
    };
    let instructions = translate_program(root, &options);
    info!("emitting {} instructions", instructions.len());
    write_instructions(out, &instructions)
}

fn read_input(path: Option<&Path>) -> Result<String, CompilerError> {
    match path {
        Some(path) => Ok(fs::read_to_string(path)?),
        None => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>, CompilerError> {
    match path {
        Some(path) => Ok(Box::new(io::BufWriter::new(fs::File::create(path)?))),
        None => Ok(Box::new(io::stdout().lock())),
    }
}

fn write_text(out: &mut dyn Write, text: &str) -> Result<(), CompilerError> {
    out.write_all(text.as_bytes())?;
    out.flush()?;
    Ok(())
}
