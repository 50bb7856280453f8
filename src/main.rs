use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use letters::config::QueryConfig;
use letters::corpus::load_corpus;
use letters::errors::LoadError;
use letters::ladder::LadderSearch;
use letters::word_list::{FrequencyList, WordList};
use letters::{Letters, LettersError};

/// Anagram, conundrum and word-ladder queries
#[derive(Parser, Debug)]
#[command(author, version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_HASH"), ")"), about, long_about = None)]
struct Cli {
    /// Plain word list, one word per line
    #[arg(
        short,
        long,
        global = true,
        default_value = concat!(env!("CARGO_MANIFEST_DIR"), "/data/sowpods.txt")
    )]
    words: PathBuf,

    /// Frequency list, `word frequency` per line
    #[arg(
        short,
        long,
        global = true,
        default_value = concat!(env!("CARGO_MANIFEST_DIR"), "/data/common.frequency.csv")
    )]
    frequencies: PathBuf,

    /// Only rank the first N words of the frequency list
    #[arg(long, global = true)]
    frequency_limit: Option<usize>,

    /// Ladder JSON file, or a directory of `*ladders.json` files
    #[arg(short, long, global = true)]
    ladders: Option<PathBuf>,

    /// Seed for random picks (random-conundrum, random-ladder)
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Is the word in the dictionary?
    Validate { word: String },
    /// Exact anagrams of a word
    Anagrams { word: String },
    /// Words spelled from a subset of the word's letters, grouped by length
    SubAnagrams {
        word: String,
        /// Keep only the longest group
        #[arg(long)]
        best_only: bool,
    },
    /// Words of a length with no anagram partner
    Conundrums { length: usize },
    /// One random conundrum of a length
    RandomConundrum { length: usize },
    /// Every dictionary word of a length
    Words { length: usize },
    /// All ladders between the two words of a pair, e.g. `came-will`
    Ladder { pair: String },
    /// Easy ladders for a word length
    Ladders { length: usize },
    /// Ladders for a word length in one difficulty class
    LaddersByClass { class: u32, length: usize },
    /// Filtered and ranked ladder listing
    Search {
        /// Word length (repeatable)
        #[arg(long = "length")]
        lengths: Vec<usize>,
        /// Difficulty class (repeatable)
        #[arg(long = "difficulty")]
        difficulty_classes: Vec<u32>,
        /// Substring the pair must contain
        #[arg(long = "filter")]
        substring: Option<String>,
        #[arg(long)]
        page_size: Option<usize>,
    },
    /// One random ladder for a word length in a difficulty class
    RandomLadder { class: u32, length: usize },
    /// Rarity score of every word of a length
    Scores { length: usize },
}

impl Command {
    fn needs_dictionary(&self) -> bool {
        matches!(
            self,
            Command::Validate { .. }
                | Command::Anagrams { .. }
                | Command::SubAnagrams { .. }
                | Command::Conundrums { .. }
                | Command::RandomConundrum { .. }
                | Command::Words { .. }
        )
    }

    fn needs_ladders(&self) -> bool {
        matches!(
            self,
            Command::Ladder { .. }
                | Command::Ladders { .. }
                | Command::LaddersByClass { .. }
                | Command::Search { .. }
                | Command::RandomLadder { .. }
        )
    }

    fn needs_scores(&self) -> bool {
        self.needs_ladders() || matches!(self, Command::Scores { .. })
    }
}

/// Entry point of the letters CLI.
///
/// Delegates to [`try_main`] and prints any error (in detail when it is one of
/// ours) before exiting with a failure code.
fn main() -> ExitCode {
    letters::log::init_logger(letters::log::debug_requested());

    if let Err(e) = try_main() {
        if let Some(letters_err) = e.downcast_ref::<LettersError>() {
            eprintln!("Error: {}", letters_err.display_detailed());
        } else if let Some(load_err) = e.downcast_ref::<LoadError>() {
            eprintln!("Error: {}", load_err.display_detailed());
        } else {
            eprintln!("Error: {e}");
        }
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Load only the data the subcommand needs, run it, and print the result as
/// JSON on stdout. Timings go to stderr.
fn try_main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let command = &cli.command;

    let t_load = Instant::now();
    let mut letters = Letters::new(QueryConfig::default());

    if command.needs_dictionary() {
        let word_list = WordList::load_from_path(&cli.words)?;
        letters = letters.with_dictionary(load_corpus("sowpods", &word_list, None));
    }
    if command.needs_scores() {
        let mut frequencies = FrequencyList::load_from_path(&cli.frequencies)?;
        if let Some(limit) = cli.frequency_limit {
            frequencies = frequencies.truncated(limit);
        }
        let common = load_corpus("common", &WordList::default(), Some(&frequencies));
        letters = letters.with_frequency_corpus(common);
    }
    if command.needs_ladders() {
        if let Some(path) = &cli.ladders {
            letters = letters.with_ladders_from_path(path)?;
        }
    }
    let load_secs = t_load.elapsed().as_secs_f64();

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let t_query = Instant::now();
    match command {
        Command::Validate { word } => print_json(&letters.validate(word)?)?,
        Command::Anagrams { word } => print_json(&letters.anagrams(word)?)?,
        Command::SubAnagrams { word, best_only } => print_json(&letters.sub_anagrams(word, *best_only)?)?,
        Command::Conundrums { length } => print_json(&letters.conundrums(*length)?)?,
        Command::RandomConundrum { length } => print_json(&letters.random_conundrum(*length, &mut rng)?)?,
        Command::Words { length } => print_json(&letters.words(*length)?)?,
        Command::Ladder { pair } => print_json(&letters.ladder(pair)?)?,
        Command::Ladders { length } => print_json(&letters.ladders(*length)?)?,
        Command::LaddersByClass { class, length } => {
            print_json(&letters.ladders_by_difficulty_class(*length, &[*class])?)?;
        }
        Command::Search { lengths, difficulty_classes, substring, page_size } => {
            let search = LadderSearch {
                lengths: lengths.clone(),
                difficulty_classes: difficulty_classes.clone(),
                substring: substring.clone(),
                page_size: *page_size,
            };
            print_json(&letters.search_ladders(&search)?)?;
        }
        Command::RandomLadder { class, length } => print_json(&letters.random_ladder(*class, *length, &mut rng)?)?,
        Command::Scores { length } => print_json(&letters.word_scores(*length)?)?,
    }

    eprintln!(
        "Loaded in {:.3}s; answered in {:.3}s.",
        load_secs,
        t_query.elapsed().as_secs_f64()
    );
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
