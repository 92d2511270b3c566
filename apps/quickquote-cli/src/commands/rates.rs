//! `quickquote rates`

use crate::context::Context;
use crate::error::CliResult;
use crate::output::print_one;

pub fn run(ctx: &Context) -> CliResult<()> {
    print_one(ctx.json, &ctx.rates, |rates| {
        let mut lines = vec!["Projects (labor / material per sq ft)".to_string()];
        for (name, project) in rates.projects() {
            lines.push(format!(
                "  {name}: {} / {}",
                project.labor_per_area, project.material_per_area
            ));
        }

        lines.push("Quality tiers".to_string());
        for (tier, multiplier) in rates.quality_tiers() {
            lines.push(format!("  {tier}: x{multiplier}"));
        }

        lines.push("Locations".to_string());
        for (name, entry) in rates.locations() {
            lines.push(format!(
                "  {name}: x{} ({})",
                entry.multiplier(),
                entry.currency_code()
            ));
        }
        lines.join("\n")
    })
}
