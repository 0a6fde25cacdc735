mod analysis;
mod conditions;
mod layout;
mod report;

use analysis::run_analysis;
use conditions::apply_portal_conditions;
use framex::Structure;
use layout::{build_portal_frame, PortalDimensions};
use report::render_summary;
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    // Logging is off unless RUST_LOG asks for it, e.g. RUST_LOG=debug.
    env_logger::init();

    // A model file written by `Structure::to_json` takes precedence over the
    // built-in demonstration frame.
    let mut structure = match std::env::args().nth(1) {
        Some(path) => Structure::from_json(&std::fs::read_to_string(path)?)?,
        None => {
            // Two columns and a beam rigidly joined at the corners. A portal frame
            // resists sideways load through bending at its corners.
            // See: https://en.wikipedia.org/wiki/Portal_frame
            let (mut structure, layout) = build_portal_frame(PortalDimensions::default())?;

            // A hinge and a roller give exactly three reaction unknowns, so the
            // reactions follow from the equations of statics alone.
            apply_portal_conditions(&mut structure, &layout)?;
            structure
        }
    };

    // Solve for the reactions, propagate them through the members and sample
    // each member's internal-force diagrams.
    let summary = run_analysis(&mut structure)?;

    // Render a human-friendly report and print it for the CLI user.
    let report = render_summary(&summary);
    println!("{report}");

    Ok(())
}
