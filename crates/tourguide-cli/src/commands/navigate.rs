//! Navigate command implementation

use crate::cli::NavigateArgs;
use crate::output::OutputWriter;
use crate::output_types::NavigateOutput;
use anyhow::{anyhow, Result};
use tourguide_core::config::LayeredConfig;
use tourguide_core::models::DestinationCatalog;
use tourguide_geo::NavigationFix;

pub fn execute(args: NavigateArgs, config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let catalog = DestinationCatalog::builtin();
    let destination = catalog.get(&args.to).ok_or_else(|| {
        anyhow!(
            "Unknown destination '{}'. Available: {}",
            args.to,
            catalog.ids().join(", ")
        )
    })?;

    let from = args.from.unwrap_or_else(|| config.home_coordinates());
    let fix = NavigationFix::compute(from, destination);
    let instruction = fix.instruction(&config.language.value);

    if output.is_json() {
        output.result(NavigateOutput {
            destination_id: fix.destination_id.clone(),
            destination: fix.destination_name.clone(),
            from: from.as_pair(),
            distance_km: fix.distance_km,
            bearing_degrees: fix.bearing_degrees,
            direction: fix.direction.to_string(),
            instruction,
        })?;
    } else {
        output.section(format!("Navigation to {}", fix.destination_name));
        output.kv("From", from);
        output.kv("Distance", format!("{:.1} km", fix.distance_km));
        output.kv("Bearing", format!("{:.0}° ({})", fix.bearing_degrees, fix.direction));
        output.kv("Instructions", instruction);
    }

    Ok(())
}
