use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use lookup_engine::settings::{self, Settings};
use lookup_engine::{LookupEngine, LookupError};

use super::die;

/// Builds an engine from a word list (one entry per line).
pub fn load_engine(vocab_file: &Path, settings: Settings) -> Result<LookupEngine, LookupError> {
    let file = File::open(vocab_file)?;
    let mut engine = LookupEngine::with_settings(settings);
    let added = engine.load_vocabulary(BufReader::new(file))?;
    tracing::debug!(path = %vocab_file.display(), added, "index built");
    Ok(engine)
}

fn open(vocab_file: &str) -> LookupEngine {
    die!(
        load_engine(Path::new(vocab_file), settings::settings().clone()),
        "Error loading {vocab_file}: {}"
    )
}

pub fn match_prefix(vocab_file: &str, prefix: &str) {
    let engine = open(vocab_file);
    let mut words = engine.match_prefix(prefix);
    words.sort();
    for word in &words {
        println!("{word}");
    }
    eprintln!("{} match(es) in {} word(s)", words.len(), engine.len());
}

pub fn complete(vocab_file: &str, tokens: &[String]) {
    let engine = open(vocab_file);
    let mut completions = die!(engine.complete(tokens), "Error: {}");
    completions.sort();
    for completion in &completions {
        println!("{completion}");
    }
}

pub fn rank(metric: Option<&str>, x: &str, y: &str) {
    let engine = LookupEngine::new();
    let metric = metric.unwrap_or_else(|| engine.default_metric().name());
    let rank = die!(engine.rank(metric, x.as_bytes(), y.as_bytes()), "Error: {}");
    println!("{metric}\t{rank:.6}");
}

pub fn suggest(vocab_file: &str, query: &str, metric: Option<&str>, limit: Option<usize>, json: bool) {
    let mut settings = settings::settings().clone();
    if let Some(limit) = limit {
        if limit == 0 {
            eprintln!("Error: --limit must be positive");
            std::process::exit(1);
        }
        settings.suggest.max_results = limit;
    }
    let engine = die!(
        load_engine(Path::new(vocab_file), settings),
        "Error loading {vocab_file}: {}"
    );
    let metric = metric.unwrap_or_else(|| engine.default_metric().name());
    let suggestions = die!(engine.suggest_with(metric, query), "Error: {}");

    if json {
        let out = die!(serde_json::to_string_pretty(&suggestions), "Error: {}");
        println!("{out}");
        return;
    }
    for s in &suggestions {
        match s.rank {
            Some(rank) => println!("{}\t{rank:.4}", s.word),
            None => println!("{}\tprefix", s.word),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn vocab_file(lines: &[&str]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        for line in lines {
            writeln!(file, "{line}").unwrap();
        }
        file
    }

    #[test]
    fn load_engine_from_word_list() {
        let file = vocab_file(&["give diamond", "give dirt", "", "kick"]);
        let engine = load_engine(file.path(), settings::settings().clone()).unwrap();
        assert_eq!(engine.len(), 3);
        let mut words = engine.complete(&["give", "di"]).unwrap();
        words.sort();
        assert_eq!(words, vec!["diamond", "dirt"]);
    }

    #[test]
    fn load_engine_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_engine(&dir.path().join("missing.txt"), settings::settings().clone())
            .err()
            .unwrap();
        assert!(matches!(err, LookupError::Io(_)));
    }

    #[test]
    fn suggestions_serialize_to_json() {
        let file = vocab_file(&["survival", "spectator"]);
        let engine = load_engine(file.path(), settings::settings().clone()).unwrap();
        let suggestions = engine.suggest("survivl").unwrap();
        let json = serde_json::to_value(&suggestions).unwrap();
        assert_eq!(json[0]["word"], "survival");
        assert!(json[0]["rank"].as_f64().unwrap() < 0.0);
    }
}
