use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct LogoRequest {
    pub brand_name: Option<String>,
    pub tagline: Option<String>,
    pub industry: Option<String>,
    pub personality: Option<String>, // style key, see BRAND_PERSONALITIES
    pub color_vibe: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct StyleRequest {
    pub occasion: Option<String>,
    pub weather: Option<String>,
    pub style_vibe: Option<String>,
    pub custom_preferences: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ColorizeRequest {
    pub image: Option<String>, // data URL or remote URL
    pub style: Option<String>,
    pub custom_instructions: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct SwapRequest {
    pub image: Option<String>,
    pub product_description: Option<String>,
    pub background_style: Option<String>,
    pub custom_prompt: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct PrimaryColor {
    #[serde(default)]
    pub hex: String,
    #[serde(default)]
    pub meaning: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SecondaryColor {
    #[serde(default)]
    pub hex: String,
    #[serde(default)]
    pub label: String,
}

/// Brand strategist answer; returned to the client as-is.
#[skip_serializing_none]
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct LogoAnalysis {
    pub dalle_prompt: String,
    pub primary_color: Option<PrimaryColor>,
    pub secondary_colors: Vec<SecondaryColor>,
    pub rationale: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct OutfitAnalysis {
    pub outfit_description: String,
    pub items: Vec<String>,
    pub rationale: String,
    pub palette: Vec<String>,
}

/// Stylist answer. The generation prompt stays server-side.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct StylistAnswer {
    #[serde(flatten)]
    pub outfit: OutfitAnalysis,
    pub dalle_prompt: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct LogoResponse {
    pub image_url: String,
    pub analysis: LogoAnalysis,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct StyleResponse {
    pub image_url: String,
    pub analysis: OutfitAnalysis,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ColorizeResponse {
    pub image_url: String,
    pub analysis: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SwapResponse {
    pub image_url: String,
    pub description: String,
}

#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub configured: bool,
    pub started_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn stylist_answer_keeps_prompt_out_of_the_analysis() {
        let raw = r#"{
            "outfitDescription": "Ivory linen suit",
            "items": ["linen blazer", "loafers"],
            "rationale": "Breathable for heat",
            "palette": ["ivory", "sage"],
            "dallePrompt": "A mood board of an ivory linen suit"
        }"#;
        let answer: StylistAnswer = serde_json::from_str(raw).unwrap();
        assert_eq!(answer.dalle_prompt, "A mood board of an ivory linen suit");
        assert_eq!(answer.outfit.items, vec!["linen blazer", "loafers"]);

        let shown = serde_json::to_value(&answer.outfit).unwrap();
        assert!(shown.get("dallePrompt").is_none());
        assert_eq!(shown["outfitDescription"], "Ivory linen suit");
    }

    #[test]
    fn logo_analysis_tolerates_missing_fields() {
        let analysis: LogoAnalysis = serde_json::from_str(r#"{"dallePrompt": "A fox mark"}"#).unwrap();
        assert_eq!(analysis.dalle_prompt, "A fox mark");
        assert!(analysis.secondary_colors.is_empty());

        let shown = serde_json::to_value(&analysis).unwrap();
        assert!(shown.get("primaryColor").is_none());
    }

    #[test]
    fn requests_use_camel_case_keys() {
        let req: SwapRequest =
            serde_json::from_str(r#"{"productDescription": "a watch", "backgroundStyle": "Soft Silk"}"#).unwrap();
        assert_eq!(req.product_description.as_deref(), Some("a watch"));
        assert_eq!(req.background_style.as_deref(), Some("Soft Silk"));
        assert_eq!(req.image, None);
    }
}
