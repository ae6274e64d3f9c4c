use clap::Args;
use keynotes::layer::Layer;
use keynotes::layout::LayoutRegistry;
use keynotes::model::{Note, NoteStatus};
use keynotes::session::{status_after_edit, SessionState};
use keynotes::KnResult;

#[derive(Args, Debug, Clone)]
pub struct SetArgs {
    /// Stable key id, e.g. KeyA or NumpadEnter.
    pub key_id: String,

    /// Note text; the first line is the label shown in the grid.
    pub text: String,

    /// Target layer; defaults to the session's current layer.
    #[arg(long, value_enum)]
    pub layer: Option<Layer>,

    /// Explicit status. Omitted: a free note with new non-blank text
    /// becomes "used", anything else keeps its status.
    #[arg(long, value_enum)]
    pub status: Option<NoteStatus>,
}

pub fn run_set(args: SetArgs, state: &mut SessionState, registry: &LayoutRegistry) -> KnResult<bool> {
    let layer = args.layer.unwrap_or(state.current_layer);

    let (label, prior) = {
        let profile = state.current_profile();
        let layout = registry.resolve_or_default(&profile.layout_name);
        if layout.label_for(&args.key_id).is_none() {
            eprintln!(
                "⚠️  '{}' is not on board '{}'; the note will only show after a board switch.",
                args.key_id, profile.layout_name
            );
        }
        let label = layout
            .label_for(&args.key_id)
            .unwrap_or(&args.key_id)
            .to_string();
        let prior = profile
            .key_data
            .note(&args.key_id, layer)
            .cloned()
            .unwrap_or_default();
        (label, prior)
    };

    let status = args
        .status
        .unwrap_or_else(|| status_after_edit(&prior, &args.text));
    state.set_note(&args.key_id, layer, Note::new(&args.text, status), &label);

    println!("✅ {} [{}] = \"{}\" ({})", args.key_id, layer.label(), args.text, status);
    Ok(true)
}

#[derive(Args, Debug, Clone)]
pub struct ClearArgs {
    pub key_id: String,

    /// Target layer; defaults to the session's current layer.
    #[arg(long, value_enum)]
    pub layer: Option<Layer>,
}

pub fn run_clear(args: ClearArgs, state: &mut SessionState) -> KnResult<bool> {
    let layer = args.layer.unwrap_or(state.current_layer);
    state.clear_note(&args.key_id, layer);
    println!("✅ Cleared {} [{}]", args.key_id, layer.label());
    Ok(true)
}

#[derive(Args, Debug, Clone)]
pub struct LayerArgs {
    #[arg(value_enum)]
    pub layer: Layer,
}

pub fn run_layer(args: LayerArgs, state: &mut SessionState) -> KnResult<bool> {
    state.set_layer(args.layer);
    println!("✅ Current layer: {}", args.layer.label());
    Ok(true)
}

#[derive(Args, Debug, Clone)]
pub struct ResetArgs {
    /// Confirm wiping every note of the current profile.
    #[arg(long)]
    pub yes: bool,
}

pub fn run_reset(args: ResetArgs, state: &mut SessionState, registry: &LayoutRegistry) -> KnResult<bool> {
    if !args.yes {
        eprintln!("⚠️  This wipes every note of the current profile. Re-run with --yes.");
        return Ok(false);
    }
    let layout = registry
        .resolve_or_default(&state.current_profile().layout_name)
        .clone();
    state.reset_profile(&layout);
    println!("✅ Profile '{}' reset.", state.current_profile().name);
    Ok(true)
}
