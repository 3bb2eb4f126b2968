use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use report_editor_config::Config;
use report_editor_engine::{
    AnalysisImporter, AnalysisReport, Block, BlockStore, BlockType, DocumentId,
    DocumentSerializer, EditorSession, FilePersistence, Persistence, SaveOutcome, SavedDocument,
    dispatch_save, parse_blocks,
};
use std::path::{Path, PathBuf};
use std::sync::{Arc, mpsc};

#[derive(Parser, Debug)]
#[command(name = "report-editor")]
#[command(about = "Block editor tools for video analysis reports", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Parse a markdown-ish text file and print its block outline
    Parse {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Import an analysis report and print the resulting document
    Import {
        #[arg(value_name = "REPORT")]
        report: PathBuf,
    },

    /// Import an analysis report and save it as a document
    Save {
        #[arg(value_name = "REPORT")]
        report: PathBuf,

        /// Directory to write to (default: documents_path from config)
        #[arg(short, long)]
        out_dir: Option<PathBuf>,
    },

    /// Print the sections of a saved document
    Show {
        #[arg(value_name = "DOCUMENT_ID")]
        id: DocumentId,

        /// Directory to read from (default: documents_path from config)
        #[arg(short, long)]
        dir: Option<PathBuf>,
    },

    /// Write a default config file if none exists
    InitConfig,
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Warn)
        .init();

    let cli = Cli::parse();
    let config = Config::load_or_default()?;
    log::info!("Config path: {}", Config::config_path().display());

    match cli.command {
        Commands::Parse { file } => {
            let text = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let store = BlockStore::from_blocks(parse_blocks(&text));
            print_outline(&store);
        }
        Commands::Import { report } => {
            let session = import_session(&config, &report)?;
            print_outline(session.store());
        }
        Commands::Save { report, out_dir } => {
            let session = import_session(&config, &report)?;
            let root = out_dir.unwrap_or_else(|| config.documents_path.clone());
            let persistence = FilePersistence::new(root);
            let id = session.store().document_id();
            let payload =
                session.save_payload(&DocumentSerializer::new(config.serialize_options()));
            let path = persistence.path_for(id);

            let (tx, rx) = mpsc::channel();
            let persistence: Arc<dyn Persistence> = Arc::new(persistence);
            let handle = dispatch_save(persistence, id, payload, tx);
            let outcome = rx.recv().context("Save thread exited without reporting")?;
            if handle.join().is_err() {
                bail!("Save thread panicked");
            }

            println!("{}", outcome.message());
            match outcome {
                SaveOutcome::Saved => println!("{}", path.display()),
                SaveOutcome::Failed(_) => std::process::exit(1),
            }
        }
        Commands::Show { id, dir } => {
            let root = dir.unwrap_or_else(|| config.documents_path.clone());
            let document = FilePersistence::new(root)
                .load(id)
                .with_context(|| format!("Failed to load document {id}"))?;
            for line in saved_lines(&document) {
                println!("{line}");
            }
        }
        Commands::InitConfig => {
            let config_path = Config::config_path();
            if Config::load_from_path(&config_path)?.is_some() {
                println!("Config already exists at {}", config_path.display());
            } else {
                Config::default().save_to_path(&config_path)?;
                println!("Created {}", config_path.display());
            }
        }
    }

    Ok(())
}

fn import_session(config: &Config, path: &Path) -> Result<EditorSession> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let report = AnalysisReport::from_json(&json)
        .with_context(|| format!("Failed to import {}", path.display()))?;

    let mut session = EditorSession::new();
    session.import_report(&AnalysisImporter::new(config.import_options()), &report);
    Ok(session)
}

fn print_outline(store: &BlockStore) {
    for block in store.blocks() {
        println!("{}", outline_line(store, block));
    }
}

fn saved_lines(document: &SavedDocument) -> Vec<String> {
    document
        .sections
        .iter()
        .map(|section| format!("[{}] {}", section.kind, section.content))
        .collect()
}

fn outline_line(store: &BlockStore, block: &Block) -> String {
    let text = block.content().to_markup();
    match block.kind() {
        BlockType::Heading1 => format!("# {text}"),
        BlockType::Heading2 => format!("## {text}"),
        BlockType::Heading3 => format!("### {text}"),
        BlockType::Bullet => format!("- {text}"),
        BlockType::Numbered => {
            let n = store.numbered_ordinal(block.id()).unwrap_or(1);
            format!("{n}. {text}")
        }
        BlockType::Checkbox => {
            let mark = if block.checked() == Some(true) { 'x' } else { ' ' };
            format!("- [{mark}] {text}")
        }
        BlockType::Quote => format!("> {text}"),
        BlockType::Code => format!("```{text}```"),
        BlockType::MediaEmbed => match block.media_source().and_then(|s| s.embed_url()) {
            Some(embed) => format!("[video] {embed}"),
            None => format!("[video] {text}"),
        },
        BlockType::Paragraph => text,
    }
}
