use clap::Parser;
use spellcheck::{SpellCheckerConfig, SpellCorrector};

/// One-shot spelling correction over a frequency dictionary.
#[derive(Parser, Debug)]
#[command(name = "symspell-cli", about = "Symmetric-delete spelling correction and compound segmentation")]
struct Args {
    /// Path to a frequency dictionary (whitespace-separated "word count" lines).
    #[arg(long)]
    dictionary: String,

    /// Language prefix used to key the dictionary and lookups.
    #[arg(long, default_value = "en")]
    language: String,

    /// Maximum edit distance to consider.
    #[arg(long, default_value_t = 2)]
    max_distance: u32,

    /// Correct the input as a single phrase (space-insertion/omission repair)
    /// instead of word-by-word.
    #[arg(long)]
    compound: bool,

    /// Word or phrase to correct.
    input: String,
}

fn main() {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let config = SpellCheckerConfig {
        edit_distance_max: args.max_distance,
        enable_compound_check: args.compound,
        ..SpellCheckerConfig::default()
    };

    let mut corrector =
        match SpellCorrector::from_frequency_file(args.dictionary, args.language, 0, 1, config) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("error loading dictionary: {e}");
                std::process::exit(1);
            }
        };

    if args.compound {
        let result = corrector.suggest_compound_correction(&args.input);
        println!("{}", result.term);
    } else {
        for word in args.input.split_whitespace() {
            match corrector.suggest_single_word_corrections(word) {
                spellcheck::SuggestedCorrection::NoSuggestions => println!("{word}"),
                spellcheck::SuggestedCorrection::Suggestions(list) => {
                    if let Some(best) = list.first() {
                        println!("{}", best.term);
                    } else {
                        println!("{word}");
                    }
                }
            }
        }
    }
}
