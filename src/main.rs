//! # Cadre CLI
//!
//! Usage:
//!   cadre input.json -o frames.json
//!   echo '{ ... }' | cadre
//!   cadre --example > scene.json

use std::env;
use std::fs;
use std::io::{self, Read};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().collect();

    // Handle --example flag
    if args.iter().any(|a| a == "--example") {
        print!("{}", example_scene_json());
        return;
    }

    // Read input
    let input = if args.len() > 1 && !args[1].starts_with('-') {
        fs::read_to_string(&args[1]).expect("Failed to read input file")
    } else {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .expect("Failed to read stdin");
        buf
    };

    // Parse output path
    let output_path = args.windows(2).find(|w| w[0] == "-o").map(|w| w[1].clone());

    // Lay out
    match cadre::solve_json(&input) {
        Ok(report) => {
            let json =
                serde_json::to_string_pretty(&report).expect("report serializes to JSON");
            match output_path {
                Some(path) => {
                    fs::write(&path, &json).expect("Failed to write report");
                    eprintln!("✓ Written {} bytes to {}", json.len(), path);
                }
                None => println!("{}", json),
            }
        }
        Err(e) => {
            eprintln!("✗ {}", e);
            std::process::exit(1);
        }
    }
}

fn example_scene_json() -> &'static str {
    r##"{
  "kind": { "type": "Relative" },
  "name": "root",
  "width": { "Fixed": 375.0 },
  "height": { "Fixed": 667.0 },
  "margins": { "outer": 10 },
  "children": [
    {
      "kind": { "type": "Leaf" },
      "name": "center",
      "width": { "Fixed": 100.0 },
      "height": { "Fixed": 100.0 },
      "margins": { "outer": 10 },
      "constraints": { "gravity": "Center" }
    },
    {
      "kind": { "type": "Leaf" },
      "name": "above",
      "width": { "Fixed": 100.0 },
      "height": { "Fixed": 100.0 },
      "margins": { "outer": 10 },
      "constraints": { "toTopOf": "center" }
    },
    {
      "kind": { "type": "Leaf" },
      "name": "left",
      "width": { "Fixed": 100.0 },
      "height": { "Fixed": 100.0 },
      "margins": { "outer": 10 },
      "constraints": { "toLeftOf": "center" }
    },
    {
      "kind": { "type": "Leaf" },
      "name": "below",
      "width": { "Fixed": 100.0 },
      "height": { "Fixed": 100.0 },
      "margins": { "outer": 10 },
      "constraints": { "toBottomOf": "center" }
    },
    {
      "kind": { "type": "Leaf" },
      "name": "right",
      "width": { "Fixed": 100.0 },
      "height": { "Fixed": 100.0 },
      "margins": { "outer": 10 },
      "constraints": { "toRightOf": "center" }
    }
  ]
}"##
}
