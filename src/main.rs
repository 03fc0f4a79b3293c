use std::env;
use std::fs;
use std::path::Path;

use colored::*;
use log::LevelFilter;

use arbor::prelude::*;


fn main() -> Result<(), String> {
    env_logger::Builder::from_default_env()
        .filter_module("rustyline", LevelFilter::Warn)
        .init();

    let args: Vec<String> = env::args().collect();
    return match args.len() {
        1 => interactive_repl(),
        2 => file_repl(&args[1]),
        n => {
            usage(&args);
            Err(format!("Wrong argument count: {}, expected 0 or 1", n - 1))
        }
    };
}

fn usage(args: &Vec<String>) {
    println!(
        "usage: {} [SRC_FILE]",
        Path::new(&args[0]).file_name().unwrap().to_string_lossy()
    );
    println!();
}

// One persistent root environment across lines; definitions survive.
fn eval_line(line: &str, env: &mut Environment) {
    let tree = parse(line);
    let mut current = tree.as_deref();
    while let Some(cell) = current {
        match evaluate(cell, env) {
            Ok(val) => println!("-> {}", val),
            Err(err) => println!("{}", format!("{}", err).red()),
        }
        current = cell.next();
    }
}

#[cfg(feature = "cli")]
fn interactive_repl() -> Result<(), String> {
    use rustyline::error::ReadlineError;
    use rustyline::Editor;

    let mut editor = Editor::<()>::new();
    let mut env = Environment::root();
    loop {
        match editor.readline("> ") {
            Ok(line) => {
                editor.add_history_entry(line.as_str());
                eval_line(&line, &mut env);
                println!();
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => return Ok(()),
            Err(err) => return Err(format!("{}", err)),
        }
    }
}

#[cfg(not(feature = "cli"))]
fn interactive_repl() -> Result<(), String> {
    use std::io::{self, BufRead, Write};

    let stdin = io::stdin();
    let mut env = Environment::root();
    loop {
        print!("> ");
        if let Err(err) = io::stdout().flush() {
            return Err(format!("{}", err));
        }

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => return Ok(()),
            Ok(_) => {
                eval_line(&line, &mut env);
                println!();
            }
            Err(err) => return Err(format!("{}", err)),
        }
    }
}

fn file_repl(path: &str) -> Result<(), String> {
    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(err) => return Err(format!("{}", err)),
    };

    let tree = parse(&source);
    let mut env = Environment::root();
    let mut current = tree.as_deref();
    while let Some(cell) = current {
        println!("> {}", cell);
        match evaluate(cell, &mut env) {
            Ok(val) => println!("-> {}", val),
            Err(err) => println!("{}", format!("{}", err).red()),
        }
        println!();
        current = cell.next();
    }

    Ok(())
}
