use nyaya::assistant::{build_grounding_context, Assistant, NO_MATCH_MESSAGE};
use nyaya::cli::{Cli, Commands, ConfigAction};
use nyaya::config::Config;
use nyaya::corpus::CorpusIndex;
use nyaya::error::{NyayaError, Result};
use nyaya::query::FeatureExtractor;
use nyaya::retrieval::{SearchOutcome, Selector};
use std::path::PathBuf;
use std::sync::Arc;

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse_args();

    // Initialize logging
    init_logging(cli.verbose);

    match cli.command {
        Commands::Features { query, json } => {
            let config = load_config(cli.config)?;
            cmd_features(&config, &query, json)?;
        }
        Commands::Search { query, limit, json } => {
            let config = load_config(cli.config)?;
            cmd_search(config, cli.corpus, &query, limit, json)?;
        }
        Commands::Context { query } => {
            let config = load_config(cli.config)?;
            cmd_context(config, cli.corpus, &query)?;
        }
        Commands::Ask { question } => {
            let config = load_config(cli.config)?;
            cmd_ask(config, cli.corpus, &question)?;
        }
        Commands::Stats => {
            let config = load_config(cli.config)?;
            cmd_stats(&config, cli.corpus)?;
        }
        Commands::Config { action } => {
            cmd_config(cli.config, action)?;
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default = if verbose { "nyaya=debug" } else { "nyaya=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_features(config: &Config, query: &str, json: bool) -> Result<()> {
    let extractor = FeatureExtractor::from_config(&config.patterns)?;
    let features = extractor.extract(query);

    if json {
        println!("{}", to_json(&features)?);
        return Ok(());
    }

    println!("Query:     {}", features.query);
    println!("Intent:    {}", features.intent);
    println!(
        "Law:       {}",
        features.law.map(|l| l.to_string()).unwrap_or_else(|| "-".to_string())
    );
    if let Some(secondary) = features.secondary_law {
        println!("Compared:  {}", secondary);
    }
    println!("Section:   {}", features.section.as_deref().unwrap_or("-"));
    println!("Era:       {:?}", features.preferred_era);
    println!("Keywords:  {}", features.keywords.join(", "));

    Ok(())
}

fn cmd_search(
    mut config: Config,
    corpus_dir: Option<PathBuf>,
    query: &str,
    limit: Option<usize>,
    json: bool,
) -> Result<()> {
    if let Some(limit) = limit {
        config.ranking.standard_limit = limit;
        config.ranking.comparison_limit = limit;
    }
    let (extractor, selector) = load_engine(&config, corpus_dir)?;

    let features = extractor.extract(query);
    let outcome = selector.search_outcome(&features);

    if json {
        let value = serde_json::json!({
            "features": features,
            "exact_match_failed": outcome.exact_match_failed(),
            "results": outcome.sections(),
        });
        println!("{}", to_json(&value)?);
        return Ok(());
    }

    match outcome {
        SearchOutcome::Found(sections) => {
            for (rank, section) in sections.iter().enumerate() {
                println!(
                    "{:>2}. {} {} - {}",
                    rank + 1,
                    section.law_type(),
                    section.section_number(),
                    section.section.section_title
                );
                println!(
                    "    score {} | {} confidence | {} match{}",
                    section.relevance_score,
                    section.confidence_level,
                    section.match_type,
                    if section.keyword_matches.is_empty() {
                        String::new()
                    } else {
                        format!(" | keywords: {}", section.keyword_matches.join(", "))
                    }
                );
            }
        }
        SearchOutcome::SectionNotFound { law, section } => {
            println!("Section {} not found in {}", section, law.full_name());
        }
        SearchOutcome::NoMatch => {
            println!("{}", NO_MATCH_MESSAGE);
        }
    }

    Ok(())
}

fn cmd_context(config: Config, corpus_dir: Option<PathBuf>, query: &str) -> Result<()> {
    let (extractor, selector) = load_engine(&config, corpus_dir)?;

    let features = extractor.extract(query);
    let sections = selector.search(&features);
    if sections.is_empty() {
        println!("{}", NO_MATCH_MESSAGE);
        return Ok(());
    }

    println!("{}", build_grounding_context(query, &sections, &[]).render_prompt());
    Ok(())
}

fn cmd_ask(config: Config, corpus_dir: Option<PathBuf>, question: &str) -> Result<()> {
    let (extractor, selector) = load_engine(&config, corpus_dir)?;

    if config.assistant.enabled {
        tracing::info!(
            model = %config.assistant.model,
            "no remote backend is linked into the CLI, answering offline"
        );
    }

    let assistant = Assistant::offline(selector, extractor)
        .with_history(
            config.assistant.history_window,
            config.assistant.prompt_history_turns,
        )
        .with_temperature(config.assistant.temperature)
        .with_model(config.assistant.model.clone());

    let rt = tokio::runtime::Runtime::new().map_err(|e| NyayaError::Io {
        source: e,
        context: "Failed to create tokio runtime".to_string(),
    })?;
    let answer = rt.block_on(assistant.answer(question, &[]));

    println!("{}", answer);
    Ok(())
}

fn cmd_stats(config: &Config, corpus_dir: Option<PathBuf>) -> Result<()> {
    let dir = resolve_corpus_dir(config, corpus_dir)?;
    let corpus = CorpusIndex::load_dir(&dir)?;
    let stats = corpus.stats();

    println!("Corpus: {}", dir.display());
    println!("========");
    for (law, count) in &stats.per_law {
        println!("  {:<5} {:>5}  {}", law.code(), count, law.full_name());
    }
    println!("\nTotal sections: {}", stats.total);
    if stats.skipped_records > 0 || stats.duplicate_sections > 0 {
        println!(
            "Skipped records: {} | duplicate sections: {}",
            stats.skipped_records, stats.duplicate_sections
        );
    }

    Ok(())
}

fn cmd_config(config_path: Option<PathBuf>, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let config = load_config(config_path)?;
            let content = toml::to_string_pretty(&config)?;
            println!("{}", content);
        }
        ConfigAction::Validate { file } => {
            let path = match file.or(config_path) {
                Some(path) => path,
                None => Config::default_path()?,
            };
            let config = Config::load(&path)?;
            println!("✓ Configuration is valid");
            println!("  Schema version: {}", config.meta.schema_version);
        }
        ConfigAction::Init { force } => {
            let path = match config_path {
                Some(path) => path,
                None => Config::default_path()?,
            };

            if path.exists() && !force {
                println!("Configuration file already exists at: {}", path.display());
                println!("Use --force to overwrite");
                return Ok(());
            }

            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| NyayaError::Io {
                    source: e,
                    context: format!("Failed to create config directory: {:?}", parent),
                })?;
            }

            Config::default().save(&path)?;
            println!("✓ Configuration initialized at: {}", path.display());
        }
    }

    Ok(())
}

fn load_config(config_path: Option<PathBuf>) -> Result<Config> {
    match config_path {
        Some(path) => Config::load(&path),
        None => Config::load_or_default(&Config::default_path()?),
    }
}

fn resolve_corpus_dir(config: &Config, corpus_dir: Option<PathBuf>) -> Result<PathBuf> {
    match corpus_dir {
        Some(dir) => Ok(dir),
        None => config.corpus_dir(),
    }
}

fn load_engine(config: &Config, corpus_dir: Option<PathBuf>) -> Result<(FeatureExtractor, Selector)> {
    let extractor = FeatureExtractor::from_config(&config.patterns)?;

    let dir = resolve_corpus_dir(config, corpus_dir)?;
    let corpus = CorpusIndex::load_dir(&dir)?;
    tracing::info!(sections = corpus.len(), dir = %dir.display(), "corpus loaded");

    let selector = Selector::new(
        Arc::new(corpus),
        config.ranking.clone(),
        config.scoring.clone(),
    );
    Ok((extractor, selector))
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| NyayaError::Json {
        source: e,
        context: "Failed to serialize output".to_string(),
    })
}
