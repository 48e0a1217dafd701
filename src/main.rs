use anyhow::Context;
use clap::{ArgAction, Parser, ValueEnum};
use clap_stdin::FileOrStdin;
use tracing::Level;

use zarac::analyzer::ShadowPolicy;
use zarac::{compile, Options};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Emit {
    Tokens,
    Ast,
    Symbols,
    Tac,
}

/// Compile a program to three-address code
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Source file, or "-" to read from stdin
    input: FileOrStdin,

    /// What to print, in the order given
    #[arg(long, value_enum, default_values_t = vec![Emit::Tac])]
    emit: Vec<Emit>,

    /// Reject declarations that shadow a name from an enclosing block
    #[arg(long)]
    no_shadowing: bool,

    /// Log more (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let user_input = args.input.contents().context("reading input")?;
    let options = Options {
        shadowing: if args.no_shadowing {
            ShadowPolicy::Deny
        } else {
            ShadowPolicy::Allow
        },
    };
    let compilation = compile(&user_input, &options).context("compilation failed")?;

    for emit in args.emit {
        match emit {
            Emit::Tokens => {
                for token in &compilation.tokens {
                    println!("{token}");
                }
            }
            Emit::Ast => println!("{:#?}", compilation.program),
            Emit::Symbols => {
                for symbol in compilation.symbol_table.global().symbols() {
                    println!("{symbol}");
                }
            }
            Emit::Tac => {
                for instruction in &compilation.instructions {
                    println!("{instruction}");
                }
            }
        }
    }

    Ok(())
}
