//! # Payload Validator
//!
//! A command-line utility for checking a JSON document against one component
//! schema of an OpenAPI contract.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --bin payload-validator openapi.json Pet pet.json
//! cargo run --bin payload-validator openapi.json Pet pet.json --response
//! ```
//!
//! The components file is either a whole OpenAPI document in JSON form or a
//! bare object mapping component names to schemas. Documents are validated as
//! requests unless `--response` is given.
//!
//! ## Output Examples
//!
//! ```text
//! Validating pet.json against Pet (request)
//! ✓ Document is valid
//! ```
//!
//! ```text
//! Validating pet.json against Pet (request)
//! ❌ Document is invalid:
//!   body: required property 'name' is missing
//!   body[age]: value -1 is less than minimum 0
//! ```
//!
//! ## Exit Codes
//!
//! - `0`: Document is valid
//! - `1`: Document is invalid
//! - `2`: Usage error, unreadable input or broken schema

use openapi_payload_validator::{ComponentTable, ValidationContext, Validator};
use serde_json::{Value, json};
use std::env;
use std::fs;
use std::path::Path;
use std::process;

fn main() {
    let args: Vec<String> = env::args().collect();
    let positional: Vec<&String> = args.iter().skip(1).filter(|a| !a.starts_with("--")).collect();
    let response = args.iter().any(|a| a == "--response");

    if positional.len() != 3 {
        eprintln!(
            "Usage: {} <components.json> <schema-name> <document.json> [--response]",
            args[0]
        );
        eprintln!();
        eprintln!("Examples:");
        eprintln!("  {} openapi.json Pet pet.json", args[0]);
        eprintln!("  {} openapi.json Pet pet.json --response", args[0]);
        process::exit(2);
    }

    let components_path = Path::new(positional[0]);
    let schema_name = positional[1];
    let document_path = Path::new(positional[2]);

    let components = match load_components(components_path) {
        Ok(components) => components,
        Err(e) => {
            eprintln!("❌ Failed to load components: {}", e);
            process::exit(2);
        }
    };

    if components.get(schema_name).is_none() {
        eprintln!("❌ Unknown schema '{}'", schema_name);
        eprintln!("Available schemas:");
        let mut names = components.names();
        names.sort_unstable();
        for name in names {
            eprintln!("  - {}", name);
        }
        process::exit(2);
    }

    let document = match fs::read_to_string(document_path) {
        Ok(document) => document,
        Err(e) => {
            eprintln!("❌ Failed to read {}: {}", document_path.display(), e);
            process::exit(2);
        }
    };

    let mut context = if response {
        ValidationContext::response()
    } else {
        ValidationContext::request()
    };
    println!(
        "Validating {} against {} ({})",
        document_path.display(),
        schema_name,
        context.kind()
    );

    let validator = Validator::new(&components);
    let schema = json!({ "$ref": schema_name });
    match validator.validate(&document, &schema, "body", &mut context) {
        Ok(report) if report.is_valid() => {
            println!("✓ Document is valid");
        }
        Ok(report) => {
            println!("❌ Document is invalid:");
            for message in report.messages() {
                println!("  {}", message);
            }
            process::exit(1);
        }
        Err(e) => {
            eprintln!("❌ Schema error: {}", e);
            process::exit(2);
        }
    }
}

fn load_components(path: &Path) -> Result<ComponentTable, Box<dyn std::error::Error>> {
    let content = fs::read_to_string(path)?;
    let document: Value = serde_json::from_str(&content)?;
    Ok(ComponentTable::from_document(&document)?)
}
