use spellcheck::{SpellCheckerConfig, SpellCorrector, SuggestedCorrection};
use std::{
    env,
    io::{self, Write},
    path::Path,
};

fn main() -> io::Result<()> {
    tracing_subscriber::fmt::init();

    let dict_path = env::args().nth(1).unwrap_or_else(|| "words_100k.txt".into());

    if !Path::new(&dict_path).exists() {
        eprintln!("Dictionary file not found: {}", dict_path);
        std::process::exit(1);
    }

    let config = SpellCheckerConfig {
        edit_distance_max: 2,
        enable_compound_check: true,
        ..SpellCheckerConfig::default()
    };

    let mut corrector = SpellCorrector::from_word_list_file(&dict_path, "en", config)
        .unwrap_or_else(|e| {
            eprintln!("failed to load dictionary: {e}");
            std::process::exit(1);
        });

    println!(
        "SymSpell REPL - dictionary: {}\ntype text, :q to quit, :c to toggle compound mode",
        dict_path
    );
    let mut compound = true;
    let mut input = String::new();
    loop {
        print!("> ");
        io::stdout().flush()?;
        input.clear();
        if io::stdin().read_line(&mut input)? == 0 {
            break; // EOF
        }
        let trimmed = input.trim();
        if trimmed == ":q" {
            break;
        }
        if trimmed == ":c" {
            compound = !compound;
            println!("compound mode: {}", compound);
            continue;
        }
        if trimmed.is_empty() {
            continue;
        }

        if compound {
            let result = corrector.suggest_compound_correction(trimmed);
            println!("  {}  ->  {} (distance {})", trimmed, result.term, result.distance);
        } else {
            for token in trimmed.split_whitespace() {
                let word = token.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase();
                if word.is_empty() {
                    continue;
                }
                match corrector.suggest_single_word_corrections(&word) {
                    SuggestedCorrection::NoSuggestions => {}
                    SuggestedCorrection::Suggestions(list) => {
                        let suggestions: Vec<_> = list.into_iter().map(|s| s.term).collect();
                        println!("  {}  ->  {}", word, suggestions.join(", "));
                    }
                }
            }
        }
    }
    Ok(())
}
