use std::{
    io::{stdin, stdout, Write},
    path::PathBuf,
};

use clap::Parser;

use interpreter::{Grammar, Interpreter};

#[derive(clap::Parser)]
#[command(about = "Evaluate Gox expressions from a file or an interactive prompt")]
struct Args {
    /// Source file to evaluate. Starts a prompt when omitted.
    file: Option<PathBuf>,

    /// Print the parsed expression tree before its value.
    #[arg(long)]
    print_tree: bool,

    /// Allow several operators of the same precedence, folded to the left.
    #[arg(long)]
    chain_operators: bool,

    /// Allow any expression inside parentheses.
    #[arg(long)]
    group_expressions: bool,
}

impl Args {
    fn interpreter(&self) -> Interpreter {
        Interpreter::new()
            .with_grammar(Grammar {
                chain_operators: self.chain_operators,
                group_expressions: self.group_expressions,
            })
            .with_tree_output(self.print_tree)
    }
}

fn run_file(path: PathBuf, interpreter: &Interpreter) -> anyhow::Result<()> {
    let source = std::fs::read_to_string(&path)?;
    log::debug!("Read {} bytes from {}", source.len(), path.display());
    interpreter.run_source(&source, &mut stdout())?;
    Ok(())
}

fn run_prompt(interpreter: &Interpreter) -> anyhow::Result<()> {
    loop {
        print!("> ");
        stdout().flush()?;
        let mut line = String::new();
        if stdin().read_line(&mut line)? == 0 {
            println!();
            return Ok(());
        }
        let Some(source) = prompt_source(&line) else {
            continue;
        };
        if let Err(e) = interpreter.run_source(source, &mut stdout()) {
            println!("{}", e);
        }
    }
}

/// The source typed at the prompt, without its line terminator. Blank lines
/// yield nothing.
fn prompt_source(line: &str) -> Option<&str> {
    if line.trim().is_empty() {
        return None;
    }
    Some(line.trim_end_matches(['\r', '\n']))
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let interpreter = args.interpreter();

    match args.file {
        Some(file) => run_file(file, &interpreter),
        None => run_prompt(&interpreter),
    }
}
