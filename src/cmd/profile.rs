use crate::reports;
use clap::{Args, Subcommand};
use keynotes::layout::LayoutRegistry;
use keynotes::session::SessionState;
use keynotes::KnResult;

#[derive(Args, Debug, Clone)]
pub struct ProfileArgs {
    #[command(subcommand)]
    pub action: ProfileAction,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ProfileAction {
    /// List all profiles.
    List,
    /// Create a profile on the current board and make it current.
    New { name: String },
    /// Rename the current profile; its id is unchanged.
    Rename { name: String },
    /// Delete the current profile. The last profile cannot be deleted.
    Delete {
        /// Confirm the deletion.
        #[arg(long)]
        yes: bool,
    },
    /// Switch to a profile by id.
    Use { id: String },
}

pub fn run(args: ProfileArgs, state: &mut SessionState, registry: &LayoutRegistry) -> KnResult<bool> {
    match args.action {
        ProfileAction::List => {
            reports::print_profiles(state);
            Ok(false)
        }
        ProfileAction::New { name } => {
            let layout_name = state.current_profile().layout_name.clone();
            let layout = registry.resolve_or_default(&layout_name).clone();
            let id = state.create_profile(&name, &layout_name, &layout);
            println!("✅ Created profile '{}' (id: {}).", name.trim(), id);
            Ok(true)
        }
        ProfileAction::Rename { name } => {
            state.rename_profile(&name);
            println!("✅ Profile renamed to '{}'.", state.current_profile().name);
            Ok(true)
        }
        ProfileAction::Delete { yes } => {
            let doomed = state.current_profile().name.clone();
            if !yes {
                eprintln!("⚠️  This deletes profile '{}'. Re-run with --yes.", doomed);
                return Ok(false);
            }
            state.delete_profile()?;
            println!(
                "✅ Deleted '{}'. Current profile: '{}'.",
                doomed,
                state.current_profile().name
            );
            Ok(true)
        }
        ProfileAction::Use { id } => match state.switch_profile(&id) {
            Some(layout_name) => {
                println!(
                    "✅ Current profile: '{}' (board '{}').",
                    state.current_profile().name,
                    layout_name
                );
                Ok(true)
            }
            None => {
                eprintln!("⚠️  No profile with id '{}'.", id);
                Ok(false)
            }
        },
    }
}
