//! wordcard CLI: study vocabulary decks from the terminal.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};

mod commands;

#[derive(Parser)]
#[command(name = "wordcard", version, about = "Vocabulary flashcard trainer")]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Multichoice,
    Cloze,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Html,
    Markdown,
}

#[derive(clap::Args)]
pub struct StudyArgs {
    /// Deck JSON file
    #[arg(long)]
    deck: PathBuf,

    /// Shuffle questions (starts a new run)
    #[arg(long)]
    random: bool,

    /// Study only starred words
    #[arg(long)]
    starred: bool,

    /// Seed for question generation
    #[arg(long)]
    seed: Option<u64>,

    /// Feedback window in milliseconds (overrides config)
    #[arg(long)]
    feedback_ms: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create starter config and a sample deck
    Init,

    /// Import a bulk word list into a deck
    Import {
        /// Text file with one entry per word
        #[arg(long)]
        input: PathBuf,

        /// Deck JSON to write
        #[arg(long)]
        output: PathBuf,

        /// Deck title (defaults to the input file name)
        #[arg(long)]
        title: Option<String>,

        /// Separator between entries; `\n` and `\t` escapes are understood
        #[arg(long)]
        word_delimiter: Option<String>,

        /// Separator between a word and its definition
        #[arg(long)]
        pair_delimiter: Option<String>,

        /// Speech locale for the vocabulary
        #[arg(long)]
        vocabulary_sound: Option<String>,

        /// Speech locale for the definitions
        #[arg(long)]
        definition_sound: Option<String>,

        /// Insert before this position of the existing deck (default: append)
        #[arg(long)]
        insert_at: Option<usize>,

        /// Existing deck to insert into
        #[arg(long)]
        into: Option<PathBuf>,
    },

    /// Check decks against the word-set form rules
    Validate {
        /// Deck JSON file or directory of decks
        #[arg(long)]
        deck: PathBuf,
    },

    /// Multiple-choice quiz
    Quiz(StudyArgs),

    /// Fill-in-the-blank quiz
    Cloze(StudyArgs),

    /// Print flashcards in study order
    Cards {
        /// Deck JSON file
        #[arg(long)]
        deck: PathBuf,

        /// Only starred words
        #[arg(long)]
        starred: bool,

        /// Auto-play the cards with timed flips
        #[arg(long)]
        play: bool,
    },

    /// Download a deck from the API
    Fetch {
        /// Word set id
        #[arg(long)]
        id: String,

        /// Deck JSON to write
        #[arg(long)]
        output: PathBuf,
    },

    /// Search public word sets
    Search {
        /// Title to search for
        #[arg(long)]
        query: String,

        /// Number of results to skip
        #[arg(long, default_value = "0")]
        offset: usize,
    },

    /// Render saved grade sheets for a deck
    Report {
        /// Deck JSON file
        #[arg(long)]
        deck: PathBuf,

        #[arg(long, value_enum, default_value = "multichoice")]
        mode: ModeArg,

        #[arg(long, value_enum, default_value = "html")]
        format: FormatArg,

        /// Report file to write
        #[arg(long)]
        output: PathBuf,
    },

    /// Discard saved progress for a deck
    Reset {
        /// Deck JSON file
        #[arg(long)]
        deck: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("wordcard=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.config;

    let result = match cli.command {
        Commands::Init => commands::init::execute(),
        Commands::Import {
            input,
            output,
            title,
            word_delimiter,
            pair_delimiter,
            vocabulary_sound,
            definition_sound,
            insert_at,
            into,
        } => commands::import::execute(commands::import::ImportArgs {
            input,
            output,
            title,
            word_delimiter,
            pair_delimiter,
            vocabulary_sound,
            definition_sound,
            insert_at,
            into,
            config,
        }),
        Commands::Validate { deck } => commands::validate::execute(deck),
        Commands::Quiz(args) => commands::quiz::execute(args, config).await,
        Commands::Cloze(args) => commands::cloze::execute(args, config).await,
        Commands::Cards {
            deck,
            starred,
            play,
        } => commands::cards::execute(deck, starred, play, config).await,
        Commands::Fetch { id, output } => commands::fetch::execute(id, output, config).await,
        Commands::Search { query, offset } => {
            commands::search::execute(query, offset, config).await
        }
        Commands::Report {
            deck,
            mode,
            format,
            output,
        } => commands::report::execute(deck, mode, format, output, config),
        Commands::Reset { deck } => commands::reset::execute(deck, config),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
