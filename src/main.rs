use clap::{Parser, Subcommand};
use keynotes::layout::{Layout, LayoutRegistry, DEFAULT_LAYOUT_NAME};
use keynotes::store::{FileStore, Persister};
use std::path::Path;
use std::process;

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Directory holding the persisted session snapshot.
    #[arg(global = true, short, long, default_value = "keynotes-store")]
    store: String,

    /// Board to use when the snapshot does not name one.
    #[arg(global = true, short, long, default_value = DEFAULT_LAYOUT_NAME)]
    layout: String,

    /// Extra board definition (JSON), registered under its file stem.
    #[arg(global = true, long)]
    board_file: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render the current layer, or the all-layer overview.
    Show(cmd::show::ShowArgs),
    /// Write a note for one key on one layer.
    Set(cmd::edit::SetArgs),
    /// Reset one key's note on one layer.
    Clear(cmd::edit::ClearArgs),
    /// Switch the current modifier layer.
    Layer(cmd::edit::LayerArgs),
    /// Wipe every note of the current profile.
    Reset(cmd::edit::ResetArgs),
    /// List boards or switch the current profile's board.
    Board(cmd::board::BoardArgs),
    /// Manage profiles.
    Profile(cmd::profile::ProfileArgs),
    /// Write the session to a portable JSON document.
    Export(cmd::transfer::ExportArgs),
    /// Replace the session from an exported document.
    Import(cmd::transfer::ImportArgs),
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let mut registry = LayoutRegistry::builtin();
    if let Some(path) = &cli.board_file {
        let layout = Layout::load_from_file(path).unwrap_or_else(|e| {
            eprintln!("❌ Failed to load board file '{}': {}", path, e);
            process::exit(1);
        });
        let stem = Path::new(path)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("custom");
        registry.register(stem, layout);
    }

    let mut persister = Persister::new(FileStore::new(&cli.store));
    let mut state = persister.load(&registry, &cli.layout);
    // The autosave any UI fires right after its first render; the one-shot
    // suppression in Persister swallows it so a bare load never rewrites
    // the snapshot.
    persister.save(&state);

    let outcome = match cli.command {
        Commands::Show(args) => cmd::show::run(args, &state, &registry),
        Commands::Set(args) => cmd::edit::run_set(args, &mut state, &registry),
        Commands::Clear(args) => cmd::edit::run_clear(args, &mut state),
        Commands::Layer(args) => cmd::edit::run_layer(args, &mut state),
        Commands::Reset(args) => cmd::edit::run_reset(args, &mut state, &registry),
        Commands::Board(args) => cmd::board::run(args, &mut state, &registry),
        Commands::Profile(args) => cmd::profile::run(args, &mut state, &registry),
        Commands::Export(args) => cmd::transfer::run_export(args, &state),
        Commands::Import(args) => cmd::transfer::run_import(args, &mut state, &registry, &cli.layout),
    };

    match outcome {
        Ok(changed) => {
            if changed {
                persister.save(&state);
            }
        }
        Err(e) => {
            eprintln!("❌ {}", e);
            process::exit(1);
        }
    }
}
