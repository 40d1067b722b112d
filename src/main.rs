use std::io::{self, BufRead, Write};
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use sexpc::{Compiler, printer};

/// Compile Lisp-style s-expressions into C-style call expressions.
#[derive(Parser)]
#[command(name = "sexpc", version, about)]
struct Cli {
  /// Source to compile. Prompts for one line on stdin when omitted.
  expr: Option<String>,

  /// Print the token stream to stderr
  #[arg(long)]
  tokens: bool,

  /// Print the source AST to stderr
  #[arg(long)]
  ast: bool,

  /// Print the transformed tree to stderr
  #[arg(long)]
  tree: bool,

  /// Increase log verbosity (-v debug, -vv trace)
  #[arg(short, long, action = clap::ArgAction::Count)]
  verbose: u8,
}

fn init_tracing(verbose: u8) {
  let default = match verbose {
    0 => "warn",
    1 => "debug",
    _ => "trace",
  };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(io::stderr)
    .init();
}

/// Show the prompt and read a single line from stdin.
fn prompt_line() -> io::Result<String> {
  let mut stdout = io::stdout();
  write!(stdout, "Enter expression: ")?;
  stdout.flush()?;

  let mut line = String::new();
  io::stdin().lock().read_line(&mut line)?;
  Ok(line)
}

fn main() {
  let cli = Cli::parse();
  init_tracing(cli.verbose);

  let input = match cli.expr {
    Some(expr) => expr,
    None => match prompt_line() {
      Ok(line) => line,
      Err(err) => {
        eprintln!("error: failed to read input: {err}");
        process::exit(1);
      }
    },
  };

  let compilation = match Compiler::default().run(&input) {
    Ok(compilation) => compilation,
    Err(err) => {
      eprintln!("error: {err}");
      process::exit(1);
    }
  };

  if cli.tokens {
    for token in &compilation.tokens {
      eprintln!("{:<12} {}", token.kind, token.text);
    }
  }
  if cli.ast {
    eprintln!("{:#?}", compilation.program);
  }
  if cli.tree {
    eprint!("{}", printer::render_tree(&compilation.target));
  }

  println!("{}", compilation.output);
}
