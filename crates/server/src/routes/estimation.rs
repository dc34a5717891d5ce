use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use panelquote_core::domain::bom::BomLineItem;
use panelquote_core::domain::costing::CostBreakdown;
use panelquote_core::domain::panel::{
    BusbarMaterial, CustomComponent, IpRating, PanelConfiguration, PanelLevel, PanelSelection,
    PanelSize, PanelType,
};
use panelquote_core::errors::EstimationError;

use crate::state::AppState;

use super::ApiError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimationRequest {
    pub panel_type: String,
    #[serde(default)]
    pub feeder_count: Option<i64>,
    #[serde(default)]
    pub motor_count: Option<i64>,
    #[serde(default)]
    pub panel_size: Option<String>,
    #[serde(default)]
    pub busbar_type: Option<String>,
    #[serde(default)]
    pub brand_preference: Option<String>,
    #[serde(default)]
    pub ip_rating: Option<String>,
    #[serde(default)]
    pub panel_levels: Vec<PanelLevelRequest>,
    #[serde(default)]
    pub custom_components: Vec<CustomComponent>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelLevelRequest {
    pub level_type: String,
    #[serde(default)]
    pub feeder_count: Option<i64>,
    #[serde(default)]
    pub motor_count: Option<i64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimationResponse {
    pub success: bool,
    pub bom_items: Vec<BomLineItem>,
    pub cost_breakdown: CostBreakdown,
}

fn count_field(name: &str, value: Option<i64>, default: u32) -> Result<u32, EstimationError> {
    let Some(value) = value else {
        return Ok(default);
    };
    u32::try_from(value)
        .map_err(|_| EstimationError::Validation(format!("{name} must not be negative")))
}

impl EstimationRequest {
    /// Maps the wire request onto the engine's closed configuration,
    /// applying the documented request defaults (4 feeders, 1 motor,
    /// 800 tier, copper, schneider, IP55).
    pub fn into_config(self) -> Result<PanelConfiguration, EstimationError> {
        let selection = match self.panel_type.trim().to_ascii_lowercase().as_str() {
            "multi" => PanelSelection::MultiLevel(
                self.panel_levels
                    .into_iter()
                    .map(|level| {
                        Ok(PanelLevel {
                            level_type: level.level_type.parse::<PanelType>()?,
                            feeder_count: count_field(
                                "panelLevels.feederCount",
                                level.feeder_count,
                                0,
                            )?,
                            motor_count: count_field(
                                "panelLevels.motorCount",
                                level.motor_count,
                                0,
                            )?,
                        })
                    })
                    .collect::<Result<Vec<_>, EstimationError>>()?,
            ),
            "custom" => PanelSelection::Custom(self.custom_components),
            other => PanelSelection::Standard(other.parse::<PanelType>()?),
        };

        Ok(PanelConfiguration {
            selection,
            feeder_count: count_field("feederCount", self.feeder_count, 4)?,
            motor_count: count_field("motorCount", self.motor_count, 1)?,
            panel_size: self
                .panel_size
                .as_deref()
                .map(PanelSize::parse_lossy)
                .unwrap_or_default(),
            busbar: self
                .busbar_type
                .as_deref()
                .map(str::parse::<BusbarMaterial>)
                .transpose()?
                .unwrap_or_default(),
            brand_preference: self
                .brand_preference
                .filter(|brand| !brand.trim().is_empty())
                .unwrap_or_else(|| "schneider".to_string()),
            ip_rating: self
                .ip_rating
                .as_deref()
                .map(str::parse::<IpRating>)
                .transpose()?
                .unwrap_or_default(),
        })
    }
}

pub async fn generate(
    State(state): State<AppState>,
    Json(request): Json<EstimationRequest>,
) -> Result<Json<EstimationResponse>, ApiError> {
    let config = request.into_config()?;
    let estimation = state.estimator.estimate(&config).await?;

    Ok(Json(EstimationResponse {
        success: true,
        bom_items: estimation.bom_items,
        cost_breakdown: estimation.cost_breakdown,
    }))
}

#[cfg(test)]
mod tests {
    use panelquote_core::domain::panel::{PanelSelection, PanelSize, PanelType};

    use super::EstimationRequest;

    fn bare_request(panel_type: &str) -> EstimationRequest {
        EstimationRequest {
            panel_type: panel_type.to_string(),
            feeder_count: None,
            motor_count: None,
            panel_size: None,
            busbar_type: None,
            brand_preference: None,
            ip_rating: None,
            panel_levels: Vec::new(),
            custom_components: Vec::new(),
        }
    }

    #[test]
    fn defaults_fill_in_the_documented_request_parameters() {
        let config = bare_request("MCC").into_config().expect("config");

        assert_eq!(config.selection, PanelSelection::Standard(PanelType::Mcc));
        assert_eq!(config.feeder_count, 4);
        assert_eq!(config.motor_count, 1);
        assert_eq!(config.panel_size, PanelSize::Size800);
        assert_eq!(config.brand_preference, "schneider");
    }

    #[test]
    fn negative_counts_are_rejected_before_estimation() {
        let request =
            EstimationRequest { feeder_count: Some(-1), ..bare_request("MCC") };
        let error = request.into_config().expect_err("negative count must fail");
        assert!(error.to_string().contains("feederCount"));
    }

    #[test]
    fn unknown_panel_type_is_rejected_without_a_silent_default() {
        assert!(bare_request("DB").into_config().is_err());
    }

    #[test]
    fn unknown_panel_size_falls_back_to_default_tier() {
        let request = EstimationRequest {
            panel_size: Some("900x900x300".to_string()),
            ..bare_request("LT")
        };
        let config = request.into_config().expect("config");
        assert_eq!(config.panel_size, PanelSize::Size800);
    }
}
