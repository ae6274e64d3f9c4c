use crate::reports;
use clap::{Args, Subcommand};
use keynotes::layout::LayoutRegistry;
use keynotes::session::SessionState;
use keynotes::KnResult;

#[derive(Args, Debug, Clone)]
pub struct BoardArgs {
    #[command(subcommand)]
    pub action: BoardAction,
}

#[derive(Subcommand, Debug, Clone)]
pub enum BoardAction {
    /// List the known boards.
    List,
    /// Switch the current profile to another board. Notes stay attached to
    /// matching key ids; notes on keys the new board lacks are dropped.
    Use {
        name: String,
        /// Confirm dropping notes for keys absent from the new board.
        #[arg(long)]
        yes: bool,
    },
}

pub fn run(args: BoardArgs, state: &mut SessionState, registry: &LayoutRegistry) -> KnResult<bool> {
    match args.action {
        BoardAction::List => {
            reports::print_boards(registry, &state.current_profile().layout_name);
            Ok(false)
        }
        BoardAction::Use { name, yes } => {
            let layout = registry.require(&name)?.clone();
            if name == state.current_profile().layout_name {
                println!("Board '{}' is already active.", name);
                return Ok(false);
            }
            if !yes {
                eprintln!(
                    "⚠️  Switching boards drops notes on keys '{}' does not have. Re-run with --yes.",
                    name
                );
                return Ok(false);
            }
            state.change_layout(&name, &layout);
            println!("✅ Profile '{}' now uses board '{}'.", state.current_profile().name, name);
            Ok(true)
        }
    }
}
