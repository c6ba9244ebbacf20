use std::io::{self, BufRead};

use math_core::{extract_delta, validate_sequence};

// CLI mínima:
//   math-cli validate <step>... | validate --stdin
//   math-cli delta <prev> <curr>
fn main() {
    env_logger::init();
    let args: Vec<String> = std::env::args().collect();
    match args.get(1).map(String::as_str) {
        Some("validate") => run_validate(&args[2..]),
        Some("delta") => run_delta(&args[2..]),
        _ => {
            eprintln!("Uso: math-cli validate <step>... | validate --stdin");
            eprintln!("     math-cli delta <prev> <curr>");
            std::process::exit(2);
        }
    }
}

fn run_validate(args: &[String]) {
    let steps: Vec<String> = if args.first().map(String::as_str) == Some("--stdin") {
        // one step per line
        match io::stdin().lock().lines().collect() {
            Ok(lines) => lines,
            Err(e) => {
                eprintln!("[math-cli validate] stdin error: {e}");
                std::process::exit(5);
            }
        }
    } else {
        args.to_vec()
    };
    if steps.is_empty() {
        eprintln!("[math-cli validate] no steps given");
        std::process::exit(2);
    }
    let report = validate_sequence(&steps);
    match serde_json::to_string_pretty(&report) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("[math-cli validate] serialization error: {e}");
            std::process::exit(5);
        }
    }
    if report.first_error_index.is_some() {
        std::process::exit(1);
    }
}

fn run_delta(args: &[String]) {
    let (Some(prev), Some(curr)) = (args.first(), args.get(1)) else {
        eprintln!("Uso: math-cli delta <prev> <curr>");
        std::process::exit(2);
    };
    let result = extract_delta(prev, curr);
    match serde_json::to_string_pretty(&result) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("[math-cli delta] serialization error: {e}");
            std::process::exit(5);
        }
    }
}
