//! CLI command definitions and handlers

use clap::Subcommand;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

use crate::core::config::TranslatorConfig;
use crate::core::errors::TranslationError;
use crate::core::lexicon::LexiconStore;
use crate::core::ngram::NGramModel;
use crate::core::pipeline::TranslationPipeline;
use crate::core::tokenizer::WhitespaceTokenizer;
use crate::storage::{JsonlBackend, LexiconBackend, MemoryBackend};

/// Built-in demo sentences used when none are given
const SAMPLE_SENTENCES: &[&str] = &[
    "the sun rises, the mist fades.",
    "words travel far, meaning stays!",
    "do you hear the river?",
];

/// Commands for the constructed-language translator
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Translate sentences into the constructed language
    Translate {
        /// Sentences to translate (built-in samples if omitted)
        sentences: Vec<String>,

        /// Training corpus file (default from configuration)
        #[arg(long)]
        corpus: Option<PathBuf>,

        /// Lexicon file (default from configuration)
        #[arg(long)]
        lexicon: Option<PathBuf>,

        /// Keep the lexicon in memory only, nothing is persisted
        #[arg(long)]
        ephemeral: bool,
    },

    /// Translate plain-text files line by line
    Batch {
        /// Input file or directory (required)
        #[arg(short, long)]
        input: PathBuf,

        /// Output directory
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Recursively translate subdirectories
        #[arg(short, long)]
        recursive: bool,

        /// Training corpus file (default from configuration)
        #[arg(long)]
        corpus: Option<PathBuf>,

        /// Lexicon file (default from configuration)
        #[arg(long)]
        lexicon: Option<PathBuf>,
    },

    /// Print generated vocabulary samples without translating
    Sample {
        /// Number of words to generate
        #[arg(short, long, default_value_t = 20)]
        count: usize,

        /// Minimum word length
        #[arg(long, default_value_t = 4)]
        min_len: usize,

        /// Maximum word length
        #[arg(long, default_value_t = 8)]
        max_len: usize,

        /// Training corpus file (default from configuration)
        #[arg(long)]
        corpus: Option<PathBuf>,
    },
}

/// Train a model from the configured corpus. A missing corpus file is a
/// warning, not a failure; the model then stays untrained and generation
/// fails downstream only if a new word is actually needed.
fn train_model(config: &TranslatorConfig, corpus: Option<PathBuf>) -> anyhow::Result<NGramModel> {
    let mut model = NGramModel::new(config.ngram_order)?;
    let path = corpus.unwrap_or_else(|| PathBuf::from(&config.corpus_path));

    match model.train_from_file(&path) {
        Ok(words) => info!("Trained on {} words from {}", words, path.display()),
        Err(TranslationError::CorpusNotFound { path }) => {
            warn!("Corpus file {} not found; model remains untrained", path);
        }
        Err(e) => return Err(e.into()),
    }

    Ok(model)
}

/// Assemble the pipeline and its lexicon store from configuration
async fn build_pipeline(
    config: &TranslatorConfig,
    corpus: Option<PathBuf>,
    lexicon: Option<PathBuf>,
    ephemeral: bool,
) -> anyhow::Result<(TranslationPipeline, LexiconStore)> {
    let model = Arc::new(train_model(config, corpus)?);

    let backend: Arc<dyn LexiconBackend> = if ephemeral {
        Arc::new(MemoryBackend::new())
    } else {
        let path = lexicon.unwrap_or_else(|| PathBuf::from(&config.lexicon_path));
        Arc::new(JsonlBackend::open(&path).await?)
    };

    let store = LexiconStore::new(backend, model, config.max_generate_retries);
    let pipeline =
        TranslationPipeline::new(Arc::new(WhitespaceTokenizer), store.clone(), config);

    Ok((pipeline, store))
}

/// Handle sentence translation command
pub async fn handle_translate(
    config: &TranslatorConfig,
    sentences: Vec<String>,
    corpus: Option<PathBuf>,
    lexicon: Option<PathBuf>,
    ephemeral: bool,
) -> anyhow::Result<()> {
    let (pipeline, store) = build_pipeline(config, corpus, lexicon, ephemeral).await?;

    let sentences = if sentences.is_empty() {
        SAMPLE_SENTENCES.iter().map(|s| s.to_string()).collect()
    } else {
        sentences
    };

    for sentence in &sentences {
        let translated = pipeline.translate_sentence(sentence).await?;
        println!("Original:    {}", sentence);
        println!("Translation: {}", translated);
        println!();
    }

    println!(
        "✅ Translated {} sentences ({} lexicon entries)",
        sentences.len(),
        store.len().await?
    );

    Ok(())
}

/// Handle batch file translation command
pub async fn handle_batch(
    config: &TranslatorConfig,
    input: PathBuf,
    output: Option<PathBuf>,
    recursive: bool,
    corpus: Option<PathBuf>,
    lexicon: Option<PathBuf>,
) -> anyhow::Result<()> {
    use crate::processors::text::TextProcessor;
    use indicatif::{ProgressBar, ProgressStyle};
    use std::time::Instant;

    let start_time = Instant::now();

    let output = output.unwrap_or_else(|| {
        if input.is_dir() {
            input.join("translated")
        } else {
            input
                .parent()
                .map(|p| p.join("translated"))
                .unwrap_or_else(|| PathBuf::from("translated"))
        }
    });

    info!("Starting batch translation");
    info!("Input: {}", input.display());
    info!("Output: {}", output.display());
    info!("Recursive: {}", recursive);

    let (pipeline, store) = build_pipeline(config, corpus, lexicon, false).await?;
    let processor = TextProcessor::new(pipeline);

    let files = if input.is_dir() {
        if recursive {
            processor.find_files_recursive(&input)?
        } else {
            processor.find_files(&input)?
        }
    } else {
        vec![input]
    };

    if files.is_empty() {
        anyhow::bail!("No text files found");
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")
        .unwrap()
        .progress_chars("=>-"));

    let mut processed = 0;
    let mut failed = 0;

    for file_path in files {
        pb.set_message(format!("Processing: {}", file_path.display()));

        match processor.translate_file(&file_path, &output).await {
            Ok(_) => {
                processed += 1;
                pb.inc(1);
            }
            Err(e) => {
                failed += 1;
                pb.set_message(format!("Failed: {} - {}", file_path.display(), e));
                eprintln!("Error processing {}: {}", file_path.display(), e);
            }
        }
    }

    pb.finish_with_message("Completed");

    let duration = start_time.elapsed();
    info!(
        "Completed: {} processed, {} failed in {:?}",
        processed, failed, duration
    );

    println!("\n✅ Batch translation completed!");
    println!("   Processed: {}", processed);
    println!("   Failed: {}", failed);
    println!("   Lexicon entries: {}", store.len().await?);
    println!("   Time: {:?}", duration);

    Ok(())
}

/// Handle vocabulary sampling command
pub async fn handle_sample(
    config: &TranslatorConfig,
    count: usize,
    min_len: usize,
    max_len: usize,
    corpus: Option<PathBuf>,
) -> anyhow::Result<()> {
    use rand::Rng;

    if min_len == 0 || max_len < min_len {
        anyhow::bail!("Invalid length range: {}..={}", min_len, max_len);
    }

    let model = train_model(config, corpus)?;
    if !model.is_trained() {
        anyhow::bail!("Cannot sample vocabulary from an untrained model");
    }

    let mut rng = rand::rng();
    for _ in 0..count {
        let length = rng.random_range(min_len..=max_len);
        println!("{}", model.generate(length)?);
    }

    Ok(())
}
