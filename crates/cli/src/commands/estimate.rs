use clap::Args;

use panelquote_core::catalog::StaticCatalog;
use panelquote_core::domain::panel::{
    BusbarMaterial, IpRating, PanelConfiguration, PanelSelection, PanelSize, PanelType,
};
use panelquote_core::engine::Estimator;

use crate::commands::CommandResult;

/// Offline estimation against the built-in reference catalog. Useful on
/// machines with no database at hand; prices are identical to a freshly
/// seeded catalog.
#[derive(Debug, Args)]
pub struct EstimateArgs {
    #[arg(long = "panel-type", help = "Panel type (MCC|PCC|LT|VFD|APFC|PLC)")]
    pub panel_type: String,
    #[arg(long = "feeders", default_value_t = 4, help = "Number of outgoing feeders")]
    pub feeders: u32,
    #[arg(long = "motors", default_value_t = 1, help = "Number of motors")]
    pub motors: u32,
    #[arg(long = "size", default_value = "800x800x300", help = "Nominal enclosure size")]
    pub size: String,
    #[arg(long = "busbar", default_value = "copper", help = "Busbar material (copper|aluminum)")]
    pub busbar: String,
    #[arg(long = "brand", default_value = "schneider", help = "Preferred brand label")]
    pub brand: String,
    #[arg(long = "ip", default_value = "IP55", help = "Enclosure IP rating")]
    pub ip: String,
}

pub fn run(args: EstimateArgs) -> CommandResult {
    let config = match build_config(&args) {
        Ok(config) => config,
        Err(message) => {
            return CommandResult::failure("estimate", "invalid_configuration", message, 2);
        }
    };

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(error) => {
            return CommandResult::failure(
                "estimate",
                "runtime_init",
                format!("failed to initialize async runtime: {error}"),
                3,
            );
        }
    };

    let estimator = Estimator::new(StaticCatalog);
    match runtime.block_on(estimator.estimate(&config)) {
        Ok(estimation) => {
            let output = serde_json::to_string_pretty(&estimation)
                .unwrap_or_else(|error| format!("{{\"error\":\"{error}\"}}"));
            CommandResult { exit_code: 0, output }
        }
        Err(error) => {
            CommandResult::failure("estimate", "estimation_failed", error.to_string(), 4)
        }
    }
}

fn build_config(args: &EstimateArgs) -> Result<PanelConfiguration, String> {
    let panel_type =
        args.panel_type.parse::<PanelType>().map_err(|error| error.to_string())?;

    Ok(PanelConfiguration {
        selection: PanelSelection::Standard(panel_type),
        feeder_count: args.feeders,
        motor_count: args.motors,
        panel_size: PanelSize::parse_lossy(&args.size),
        busbar: args.busbar.parse::<BusbarMaterial>().map_err(|error| error.to_string())?,
        brand_preference: args.brand.clone(),
        ip_rating: args.ip.parse::<IpRating>().map_err(|error| error.to_string())?,
    })
}

#[cfg(test)]
mod tests {
    use super::{build_config, run, EstimateArgs};

    fn args(panel_type: &str) -> EstimateArgs {
        EstimateArgs {
            panel_type: panel_type.to_string(),
            feeders: 4,
            motors: 1,
            size: "800x800x300".to_string(),
            busbar: "copper".to_string(),
            brand: "schneider".to_string(),
            ip: "IP55".to_string(),
        }
    }

    #[test]
    fn offline_estimate_emits_bom_and_breakdown_json() {
        let result = run(args("MCC"));
        assert_eq!(result.exit_code, 0);

        let value: serde_json::Value =
            serde_json::from_str(&result.output).expect("estimation json");
        assert_eq!(value["bomItems"].as_array().expect("bomItems").len(), 13);
        assert!(value["costBreakdown"]["finalAmount"].is_string());
    }

    #[test]
    fn unknown_panel_type_fails_with_configuration_error() {
        let result = run(args("DB"));
        assert_eq!(result.exit_code, 2);
        assert!(result.output.contains("invalid_configuration"));
    }

    #[test]
    fn unknown_size_falls_back_to_default_tier() {
        let config =
            build_config(&EstimateArgs { size: "901x901x301".to_string(), ..args("LT") })
                .expect("config");
        assert_eq!(config.panel_size.label(), "800x800x300");
    }
}
