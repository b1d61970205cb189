#[macro_use]
mod stream;
mod hamming;

use colored::*;
use std::io::Write;
use tracing::{debug, trace};
use tracing_subscriber::EnvFilter;

type R<A> = Result<A, Box<dyn std::error::Error>>;

const TERMS: usize = 20;
const SEPARATOR: &str = ", ";

fn wrap_main(action: fn(args: &mut dyn Iterator<Item = String>, stdout: &mut dyn Write) -> R<()>) {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
    let mut stdout = std::io::stdout();
    let result = action(&mut std::env::args(), &mut stdout);
    std::process::exit(exit_code(result, &mut std::io::stderr()));
}

fn exit_code(result: R<()>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(()) => 0,
        Err(error) => {
            let _ = writeln!(stderr, "{}", render_error(&*error));
            1
        }
    }
}

fn main() {
    wrap_main(run);
}

fn run(_args: &mut dyn Iterator<Item = String>, stdout: &mut dyn Write) -> R<()> {
    debug!(terms = TERMS, "generating hamming numbers");
    hamming::hamming().take(TERMS).try_for_each(|term| -> R<()> {
        trace!(term, "writing term");
        write!(stdout, "{}{}", term, SEPARATOR)?;
        Ok(())
    })?;
    writeln!(stdout)?;
    stdout.flush()?;
    Ok(())
}

fn render_error(error: &dyn std::error::Error) -> String {
    format!("error: {}", error).red().bold().to_string()
}
