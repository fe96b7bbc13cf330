//! Generate error code documentation from the source of truth (the error enum).
//!
//! This binary reads the error codes, descriptions, details, and help text
//! directly from the `GenerateError` implementation via its `code()`,
//! `description()`, `details()`, and `help()` methods.
//!
//! Run with:
//! ```bash
//! cargo run --bin generate_error_docs > docs/ERROR_CODES.md
//! ```

use wordgrid::errors::GenerateError;

/// Macro to generate error documentation for any error type
/// with `code()`, `description()`, `details()`, `help()`, and `display_detailed()` methods
macro_rules! generate_error_docs {
    ($errors:expr) => {
        for error in $errors {
            let code = error.code();
            let description = error.description();
            let details = error.details();
            let help = error.help();

            println!("### {}: {}\n", code, description);
            println!("**Details:** {}\n", details);

            if let Some(help_text) = help {
                println!("**How to fix:**");
                println!("```");
                println!("{}", help_text);
                println!("```\n");
            }

            println!("**Example error message:**");
            println!("```");
            println!("{}", error);
            println!("```\n");

            println!("**Detailed format:**");
            println!("```");
            println!("{}", error.display_detailed());
            println!("```\n");

            println!("---\n");
        }
    };
}

/// Helper to create all `GenerateError` variants for documentation,
/// with representative field values
fn all_generate_error_variants() -> Vec<GenerateError> {
    vec![
        GenerateError::InvalidDimensions { width: 0, height: 5 },
        GenerateError::NoLetters,
        GenerateError::WordTooLong {
            word: "BRACHIOSAURUS".to_string(),
            len: 13,
            grid_max: 10,
        },
        GenerateError::SingleLetterSaturation {
            letter: 'A',
            required: 1,
            cells: 4,
        },
        GenerateError::BudgetExhausted { max_iterations: 50_000 },
        GenerateError::Infeasible {
            width: 2,
            height: 1,
            iterations: 6,
        },
    ]
}

fn main() {
    println!("# Error Code Reference\n");
    println!("**⚠️ This document is auto-generated from the source code. Do not edit manually.**\n");

    println!("## Table of Contents\n");
    println!("- [Generation Errors (G001–G006)](#generation-errors)");
    println!("- [How to Use Error Codes](#how-to-use-error-codes)\n");

    generate_generation_error_docs();

    println!("\n## How to Use Error Codes\n");
    println!("When you see an error like:\n");
    println!("```");
    println!("Error: no letters to fill the grid: words and letters are both empty (G002)");
    println!("Provide at least one word, or at least one filler letter for a wordless grid");
    println!("```\n");
    println!("1. Note the error code (e.g., `G002`)");
    println!("2. Look it up in this document for detailed explanation");
    println!("3. Follow the suggested resolution steps\n");

    println!("## Error Display Formats\n");
    println!("Errors are displayed in two formats:\n");
    println!("### Simple Format");
    println!("```");
    println!("Error: <message>");
    println!("```\n");
    println!("### Detailed Format (via `display_detailed()`)");
    println!("```");
    println!("<message> (<code>)");
    println!("<help text if available>");
    println!("```\n");
}

fn generate_generation_error_docs() {
    println!("## Generation Errors\n");
    println!("Errors from puzzle generation. They cover input validation, capacity checks, and search outcomes.\n");
    generate_error_docs!(all_generate_error_variants());
}
