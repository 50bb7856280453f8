//! Print the error code reference, read straight from the error enums.
//!
//! Run with:
//! ```bash
//! cargo run --bin generate_error_docs > docs/ERROR_CODES.md
//! ```

use letters::errors::LoadError;
use letters::LettersError;

/// Emit one section per error value using its `code()`, `description()`,
/// `details()`, `help()` and `display_detailed()` methods.
macro_rules! generate_error_docs {
    ($errors:expr) => {
        for error in $errors {
            println!("### {}: {}\n", error.code(), error.description());
            println!("**Details:** {}\n", error.details());

            if let Some(help_text) = error.help() {
                println!("**How to fix:**");
                println!("```");
                println!("{help_text}");
                println!("```\n");
            }

            println!("**Example error message:**");
            println!("```");
            println!("{error}");
            println!("```\n");

            println!("**Detailed format:**");
            println!("```");
            println!("{}", error.display_detailed());
            println!("```\n");

            println!("---\n");
        }
    };
}

fn all_load_error_variants() -> Vec<LoadError> {
    vec![
        LoadError::Io {
            path: "data/sowpods.txt".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "No such file or directory"),
        },
        LoadError::MalformedLadders {
            origin: "data/4-ladders.json".to_string(),
            source: serde::de::Error::custom("EOF while parsing a list at line 1 column 15"),
        },
        LoadError::InvalidPair { pair: "camewill".to_string() },
        LoadError::ShortChain { pair: "came-will".to_string(), len: 1 },
    ]
}

fn all_letters_error_variants() -> Vec<LettersError> {
    vec![
        LettersError::NotLoaded { what: "ladders" },
        LettersError::NoMatch { query: "conundrums of length 12".to_string() },
        LettersError::Load(LoadError::InvalidPair { pair: "camewill".to_string() }),
    ]
}

fn main() {
    println!("# Error Code Reference\n");
    println!("**This document is generated from the source code. Do not edit it by hand.**\n");

    println!("## Table of Contents\n");
    println!("- [Query Errors (Q001–Q003)](#query-errors)");
    println!("- [Load Errors (L001–L004)](#load-errors)\n");

    println!("## Query Errors\n");
    println!("Errors returned by queries. Lookups that find nothing return empty results, not errors.\n");
    generate_error_docs!(all_letters_error_variants());

    println!("## Load Errors\n");
    println!("Errors raised while reading word lists and ladder files.\n");
    generate_error_docs!(all_load_error_variants());

    println!("## Error Display Formats\n");
    println!("The CLI prints the detailed format:\n");
    println!("```");
    println!("Error: <message> (<code>)");
    println!("<help text if available>");
    println!("```\n");
}
