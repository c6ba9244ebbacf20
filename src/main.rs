//! Demo ejecutable: valida una resolución cuadrática completa y
//! muestra el delta entre dos snapshots de página.

use mathsteps_rust::{extract_delta, validate_sequence};

fn main() {
    env_logger::init();

    let steps: Vec<String> = [
        "x^2+5x+6=0",
        "(x+2)(x+3)=0",
        "x+2=0 or x+3=0",
        "x=2 or x=3",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();

    println!("== validate_sequence ==");
    let report = validate_sequence(&steps);
    match serde_json::to_string_pretty(&report) {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("serialization error: {e}"),
    }
    if let Some(k) = report.first_error_index {
        println!("first error at step {k}");
    }

    println!("== extract_delta ==");
    let prev = "x^2+5x+6=0\n(x+2)(x+3)=0";
    let curr = "x^2+5x+6=0\n(x+2)(x+3)=0\nx+2=0 or x+3=0";
    let delta = extract_delta(prev, curr);
    match serde_json::to_string_pretty(&delta) {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("serialization error: {e}"),
    }
}
