use std::process::ExitCode;

use sbc_layout::debug;
use sbc_layout_render::RenderSettings;

fn main() -> ExitCode {
    // Routes log::info!() etc. from the library crates to the debug log file.
    debug::init_log_bridge();

    log::info!("Starting sbc-layout");

    match sbc_layout::render_board(RenderSettings::default()) {
        Ok(output) => {
            log::info!(
                "Board layout written ({}x{} px)",
                output.width,
                output.height
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            sbc_layout::debug_error!("MAIN", "Render failed: {e:#}");
            eprintln!("sbc-layout: error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
