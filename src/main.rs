//! Command-line host for the Voxtral speech-to-text provider.
//!
//! Stands in for a home-automation host: manages configured entries and
//! streams raw PCM from a file or stdin into the provider.

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use futures_util::stream;
use tokio::io::{AsyncRead, AsyncReadExt};

use voxtral_stt::{
    audio::AudioMetadata,
    config::{is_supported_language, ConfigEntry, EntryStore, SUPPORTED_LANGUAGES},
    setup::{SetupFlow, SetupInput, SetupOutcome},
    stt::{AudioStream, MistralSpeechToText, SpeechToText},
};

/// Bytes read from the input per chunk handed to the provider.
const CHUNK_SIZE: usize = 4096;

// ---------------------------------------------------------------------------
// CLI
// ---------------------------------------------------------------------------

/// Mistral Voxtral speech-to-text bridge
#[derive(Parser, Debug)]
#[command(name = "voxtral-stt")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Entries file (defaults to the platform config directory)
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate credentials and add a new entry
    Setup {
        /// Mistral API key
        #[arg(long = "api-key", env = "MISTRAL_API_KEY")]
        api_key: String,

        /// Base URL of the API
        #[arg(long = "url")]
        url: Option<String>,

        /// Transcription model
        #[arg(long)]
        model: Option<String>,
    },

    /// List configured entries
    Entries,

    /// Remove (unload) an entry
    Remove {
        /// Entry id
        entry_id: String,
    },

    /// Print the supported language codes
    Languages,

    /// Transcribe raw little-endian PCM audio
    Transcribe {
        /// Input file, or `-` for stdin
        #[arg(short, long, value_name = "FILE")]
        input: String,

        /// Entry id (defaults to the only configured entry)
        #[arg(short, long)]
        entry: Option<String>,

        #[arg(long, default_value_t = 16_000)]
        sample_rate: u32,

        #[arg(long, default_value_t = 16)]
        bit_depth: u16,

        #[arg(long, default_value_t = 1)]
        channels: u16,

        /// Spoken language (ISO-639-1)
        #[arg(short, long)]
        language: Option<String>,
    },
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

struct Entries {
    path: Option<PathBuf>,
    store: EntryStore,
}

impl Entries {
    fn open(path: Option<PathBuf>) -> anyhow::Result<Self> {
        let store = match &path {
            Some(p) => EntryStore::load_from(p)?,
            None => EntryStore::load()?,
        };
        Ok(Self { path, store })
    }

    fn save(&self) -> anyhow::Result<()> {
        match &self.path {
            Some(p) => self.store.save_to(p),
            None => self.store.save(),
        }
    }

    fn select(&self, entry_id: Option<&str>) -> anyhow::Result<&ConfigEntry> {
        match entry_id {
            Some(id) => self
                .store
                .get(id)
                .with_context(|| format!("no entry with id '{id}'")),
            None => match self.store.entries() {
                [only] => Ok(only),
                [] => bail!("no entries configured; run `voxtral-stt setup` first"),
                _ => bail!("several entries configured; pass --entry"),
            },
        }
    }
}

/// Expose an async reader as a stream of fixed-size chunks.
fn chunked<R>(reader: R) -> AudioStream
where
    R: AsyncRead + Unpin + Send + 'static,
{
    Box::pin(stream::unfold(Some(reader), |state| async move {
        let mut reader = state?;
        let mut chunk = vec![0u8; CHUNK_SIZE];
        match reader.read(&mut chunk).await {
            Ok(0) => None,
            Ok(n) => {
                chunk.truncate(n);
                Some((chunk, Some(reader)))
            }
            Err(e) => {
                log::error!("Failed to read audio input: {e}");
                None
            }
        }
    }))
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

async fn setup(mut entries: Entries, input: SetupInput) -> anyhow::Result<()> {
    match SetupFlow::mistral().submit(&mut entries.store, input).await {
        SetupOutcome::Created(entry) => {
            entries.save()?;
            println!("{}", entry.entry_id);
            Ok(())
        }
        SetupOutcome::AlreadyConfigured => bail!("already_configured"),
        SetupOutcome::Invalid(e) => bail!("{}: {e}", e.key()),
    }
}

async fn transcribe(
    entry: &ConfigEntry,
    input: &str,
    metadata: AudioMetadata,
) -> anyhow::Result<()> {
    let provider = MistralSpeechToText::from_entry(entry)?;
    if !provider.supports(&metadata) {
        log::warn!("Audio format is outside the advertised capabilities; sending anyway");
    }

    let audio = if input == "-" {
        chunked(tokio::io::stdin())
    } else {
        let file = tokio::fs::File::open(input)
            .await
            .with_context(|| format!("cannot open {input}"))?;
        chunked(file)
    };

    let result = provider.process_audio_stream(metadata, audio).await;
    if !result.is_success() {
        bail!("transcription failed");
    }
    println!("{}", result.text);
    Ok(())
}

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut entries = Entries::open(cli.config)?;

    match cli.command {
        Commands::Setup { api_key, url, model } => {
            setup(
                entries,
                SetupInput {
                    api_key,
                    base_url: url,
                    model,
                },
            )
            .await
        }
        Commands::Entries => {
            for entry in entries.store.entries() {
                println!(
                    "{}\t{}\t{}\t{}",
                    entry.entry_id,
                    entry.title,
                    entry.data.api_root(),
                    entry.effective_model()
                );
            }
            Ok(())
        }
        Commands::Remove { entry_id } => {
            if entries.store.remove(&entry_id).is_none() {
                bail!("no entry with id '{entry_id}'");
            }
            entries.save()?;
            log::info!("Removed entry {entry_id}");
            Ok(())
        }
        Commands::Languages => {
            for code in SUPPORTED_LANGUAGES {
                println!("{code}");
            }
            Ok(())
        }
        Commands::Transcribe {
            input,
            entry,
            sample_rate,
            bit_depth,
            channels,
            language,
        } => {
            if let Some(lang) = language.as_deref() {
                if !is_supported_language(lang) {
                    log::warn!("Language '{lang}' is not in the supported list");
                }
            }
            let metadata = AudioMetadata {
                sample_rate,
                bit_depth,
                channel_count: channels,
                language,
            };
            let entry = entries.select(entry.as_deref())?.clone();
            transcribe(&entry, &input, metadata).await
        }
    }
}
