use crate::reports;
use clap::Args;
use keynotes::layout::LayoutRegistry;
use keynotes::session::SessionState;
use keynotes::KnResult;

#[derive(Args, Debug, Clone)]
pub struct ShowArgs {
    /// One overview table with a column per layer instead of the board grid.
    #[arg(long)]
    pub all_layers: bool,
}

pub fn run(args: ShowArgs, state: &SessionState, registry: &LayoutRegistry) -> KnResult<bool> {
    let profile = state.current_profile();
    let layout = registry.resolve_or_default(&profile.layout_name);

    println!(
        "\nProfile: {}  |  Board: {}  |  Layer: {}",
        profile.name,
        profile.layout_name,
        state.current_layer.label()
    );

    if args.all_layers {
        reports::print_layer_overview(layout, &profile.key_data);
    } else {
        reports::print_layer_grid(layout, &profile.key_data, state.current_layer);
    }
    Ok(false)
}
