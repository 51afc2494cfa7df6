use std::{env, fs, process::exit};

use malph::{tokenize, Analyzer};

const DEMO_SRC: &str = r#"
    i;int=0
    War{ i < 3 }( imp i ; ++ i ; )
    Fun Malph[]( imp i ; )
"#;

fn main() {
    tracing_subscriber::fmt().with_target(false).init();

    let source = match env::args().nth(1) {
        Some(path) => match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(err) => {
                eprintln!("{path}: {err}");
                exit(1);
            }
        },
        None => DEMO_SRC.to_string(),
    };

    let mut analyzer = Analyzer::new();
    let report = analyzer.run(&source);

    if report.success {
        println!("Syntax Analysis Complete: No Errors");
    } else {
        for diagnostic in &report.diagnostics {
            println!("{diagnostic}");
        }
    }
    for warning in &report.warnings {
        println!("{warning}");
    }

    println!("Token List:");
    for token in tokenize(&source) {
        println!("({:?}, {})", token.kind, token.value);
    }

    for record in analyzer.take_output_log() {
        println!("{record}");
    }

    for (name, entry) in analyzer.snapshot_symbols() {
        let value = entry
            .value
            .map_or_else(|| "None".to_string(), |value| value.to_string());
        println!("{name} ({}): {value}", entry.ty);
    }

    if !report.success {
        exit(1);
    }
}
