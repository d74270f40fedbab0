use std::env;
use std::fs;
use std::path::PathBuf;
use std::process;

use lisplet::{Session, Value, parse};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

fn repl() -> rustyline::Result<()> {
    let session = Session::new();
    let mut editor = DefaultEditor::new()?;

    let history = history_path();
    if let Some(path) = &history {
        let _ = editor.load_history(path);
    }

    println!("lisplet");
    println!("Type expressions to evaluate, exit or quit to leave");
    println!();

    loop {
        match editor.readline("> ") {
            Ok(line) => {
                let input = line.trim();
                if input.is_empty() {
                    continue;
                }
                if input == "exit" || input == "quit" {
                    break;
                }

                let _ = editor.add_history_entry(input);
                run_line(&session, input);
            }
            // Ctrl-C drops the current line, Ctrl-D ends the session
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("input error: {err}");
                break;
            }
        }
    }

    if let Some(path) = &history {
        let _ = editor.save_history(path);
    }
    Ok(())
}

fn history_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".lisplet_history"))
}

/// Evaluate every expression on one input line, printing each result.
/// Errors are reported and end the line, never the session; definitions
/// completed earlier on the line stay in effect.
fn run_line(session: &Session, input: &str) {
    match parse(input) {
        Ok(expressions) => {
            for expression in &expressions {
                match session.eval(expression) {
                    Ok(Value::Unspecified) => {}
                    Ok(value) => println!("{value}"),
                    Err(err) => {
                        eprintln!("error: {err}");
                        break;
                    }
                }
            }
        }
        Err(err) => eprintln!("parse error: {err}"),
    }
}

fn run_file(path: &str) -> Result<(), String> {
    let source =
        fs::read_to_string(path).map_err(|err| format!("failed to read '{path}': {err}"))?;

    let session = Session::new();
    let results = session.run(&source).map_err(|err| err.to_string())?;

    // Print the final value, the way the REPL would
    if let Some(value) = results.last() {
        if !matches!(value, Value::Unspecified) {
            println!("{value}");
        }
    }

    Ok(())
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  lisplet              Start the interactive REPL");
    eprintln!("  lisplet <file>       Evaluate a file of expressions");
    eprintln!("  lisplet --help       Show this help message");
}

fn main() {
    let args: Vec<String> = env::args().collect();

    match args.len() {
        1 => {
            if let Err(err) = repl() {
                eprintln!("repl error: {err}");
                process::exit(1);
            }
        }
        2 => {
            let arg = &args[1];
            if arg == "--help" || arg == "-h" {
                print_usage();
            } else if let Err(err) = run_file(arg) {
                eprintln!("{err}");
                process::exit(1);
            }
        }
        _ => {
            eprintln!("Error: too many arguments");
            print_usage();
            process::exit(1);
        }
    }
}
