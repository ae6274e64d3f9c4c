use clap::Args;
use keynotes::document::{export_document, import_document};
use keynotes::layout::LayoutRegistry;
use keynotes::session::SessionState;
use keynotes::KnResult;
use std::fs;
use std::path::PathBuf;

#[derive(Args, Debug, Clone)]
pub struct ExportArgs {
    /// Write to this file instead of stdout.
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

pub fn run_export(args: ExportArgs, state: &SessionState) -> KnResult<bool> {
    let doc = export_document(state)?;
    match args.out {
        Some(path) => {
            fs::write(&path, &doc)?;
            println!("✅ Exported session to {}.", path.display());
        }
        None => println!("{}", doc),
    }
    Ok(false)
}

#[derive(Args, Debug, Clone)]
pub struct ImportArgs {
    /// An exported session document (or a legacy single-profile one).
    pub file: PathBuf,
}

pub fn run_import(
    args: ImportArgs,
    state: &mut SessionState,
    registry: &LayoutRegistry,
    default_layout_name: &str,
) -> KnResult<bool> {
    let raw = fs::read_to_string(&args.file)?;
    // The session is only replaced once the document fully parses; a
    // malformed file leaves the current state untouched.
    *state = import_document(&raw, registry, default_layout_name)?;
    println!(
        "✅ Imported {} profile(s); current: '{}'.",
        state.profiles.len(),
        state.current_profile().name
    );
    Ok(true)
}
