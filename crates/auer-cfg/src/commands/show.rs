use auer_core::Pbx;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

/// Fetch the overview and render it with the selected layout and format.
pub async fn handle(pbx: &Pbx, global: &GlobalOpts) -> Result<(), CliError> {
    let overview = pbx.overview().await?;
    let painter = output::Painter::new(output::should_color(global.color));
    let layout = output::layout_for(global.layout);

    let rendered = output::render_overview(global.output, layout.as_ref(), &overview, painter)?;
    output::print_output(&rendered, global.quiet);
    Ok(())
}
