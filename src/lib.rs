// Reusable library API: visible to both CLI and WASM builds
pub mod config;
pub mod corpus;
pub mod engine;
pub mod errors;
pub mod ladder;
pub mod letter_key;
pub mod rarity;
pub mod sub_anagrams;
pub mod word_list;

pub mod log;

// Compile the wasm glue only when targeting wasm32.
#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use engine::{Letters, LettersError};
