use axum::{
    extract::{DefaultBodyLimit, State},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::{
    config::Config,
    error::{AppError, JsonBody},
    models::{
        ColorizeRequest, ColorizeResponse, HealthResponse, LogoAnalysis, LogoRequest, LogoResponse, StyleRequest,
        StyleResponse, StylistAnswer, SwapRequest, SwapResponse,
    },
    pipeline::{analyze_structured, present, request_image, resolve_description, within_budget, Services},
    prompts::{self, LogoBrief, OutfitBrief},
    services::{ImageRequest, Quality},
    styles::{StyleCatalog, BACKDROP_STYLES, BLUEPRINT_STYLES, BRAND_PERSONALITIES, OUTFIT_VIBES},
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// `None` when no API key was configured.
    pub services: Option<Services>,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(config: Config, services: Option<Services>) -> Self {
        Self { config: Arc::new(config), services, started_at: Utc::now() }
    }

    fn services(&self) -> Result<&Services, AppError> {
        self.services.as_ref().ok_or(AppError::NotConfigured)
    }
}

pub fn router(state: AppState) -> Router {
    // data URLs are base64, plus room for the rest of the JSON body
    let body_limit = state.config.limits.max_image_bytes / 3 * 4 + 64 * 1024;

    Router::new()
        .route("/api/generate", post(generate_logo))
        .route("/api/style", post(style_outfit))
        .route("/api/colorize", post(colorize_blueprint))
        .route("/api/swap", post(swap_background))
        .route("/api/styles", get(list_styles))
        .route("/api/health", get(health))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

/// Prefers the generation prompt the analysis wrote, falling back to its prose.
fn generation_seed<'a>(prompt: &'a str, fallback: &'a str) -> Result<&'a str, AppError> {
    [prompt, fallback]
        .into_iter()
        .map(str::trim)
        .find(|s| !s.is_empty())
        .ok_or_else(|| AppError::EmptyResult("The analysis did not include a usable image prompt".into()))
}

pub async fn generate_logo(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<LogoRequest>,
) -> Result<Json<LogoResponse>, AppError> {
    let config = &state.config;
    within_budget("logo", config.request_timeout, async {
        let (Some(brand_name), Some(industry), Some(personality)) =
            (present(&body.brand_name), present(&body.industry), present(&body.personality))
        else {
            return Err(AppError::Validation("Missing required fields".into()));
        };
        let limits = &config.limits;
        limits.text("brandName", &body.brand_name)?;
        limits.text("industry", &body.industry)?;
        limits.text("personality", &body.personality)?;
        let tagline = limits.text("tagline", &body.tagline)?;
        let color_vibe = limits.text("colorVibe", &body.color_vibe)?;

        let services = state.services()?;
        let (personality, personality_phrase) = BRAND_PERSONALITIES.resolve(Some(personality));
        let brief = LogoBrief { brand_name, tagline, industry, personality, personality_phrase, color_vibe };
        tracing::info!("🏷️ Designing logo for brand: {}", brand_name);

        let analysis: LogoAnalysis = analyze_structured(
            services,
            &config.models.strategist,
            prompts::BRAND_STRATEGIST,
            &prompts::logo_analysis_request(&brief),
        )
        .await?;

        let prompt = prompts::logo_prompt(generation_seed(&analysis.dalle_prompt, &analysis.rationale)?, &brief);
        let request = ImageRequest::square(&config.models.image, prompt, Quality::Standard);
        let image_url = request_image(services, request, "No image was generated").await?;

        Ok(Json(LogoResponse { image_url, analysis }))
    })
    .await
}

pub async fn style_outfit(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<StyleRequest>,
) -> Result<Json<StyleResponse>, AppError> {
    let config = &state.config;
    within_budget("style", config.request_timeout, async {
        let (Some(occasion), Some(weather)) = (present(&body.occasion), present(&body.weather)) else {
            return Err(AppError::Validation("Missing occasion or weather".into()));
        };
        let limits = &config.limits;
        limits.text("occasion", &body.occasion)?;
        limits.text("weather", &body.weather)?;
        let vibe = limits.text("styleVibe", &body.style_vibe)?;
        let preferences = limits.text("customPreferences", &body.custom_preferences)?;

        let services = state.services()?;
        let (vibe, vibe_phrase) = OUTFIT_VIBES.resolve(vibe);
        let brief = OutfitBrief { occasion, weather, vibe, vibe_phrase, preferences };
        tracing::info!("👗 Styling outfit for {} in {} weather", occasion, weather);

        let answer: StylistAnswer = analyze_structured(
            services,
            &config.models.vision,
            prompts::FASHION_STYLIST,
            &prompts::outfit_analysis_request(&brief),
        )
        .await?;

        let seed = generation_seed(&answer.dalle_prompt, &answer.outfit.outfit_description)?;
        let prompt = prompts::moodboard_prompt(seed, &brief);
        let request = ImageRequest::square(&config.models.image, prompt, Quality::Hd);
        let image_url = request_image(services, request, "No style board was generated").await?;

        Ok(Json(StyleResponse { image_url, analysis: answer.outfit }))
    })
    .await
}

pub async fn colorize_blueprint(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<ColorizeRequest>,
) -> Result<Json<ColorizeResponse>, AppError> {
    let config = &state.config;
    within_budget("colorize", config.request_timeout, async {
        let limits = &config.limits;
        let image = limits
            .image(&body.image)?
            .ok_or_else(|| AppError::Validation("Missing blueprint image".into()))?;
        let custom = limits.text("customInstructions", &body.custom_instructions)?;

        let services = state.services()?;
        tracing::info!("📐 Analyzing blueprint layout...");
        let analysis =
            resolve_description(services, &config.models.vision, None, Some(image), prompts::BLUEPRINT_ANALYSIS)
                .await?;

        let style = BLUEPRINT_STYLES.lookup(present(&body.style));
        let prompt = prompts::blueprint_prompt(&analysis, style, custom);
        let request = ImageRequest::square(&config.models.image, prompt, Quality::Hd);
        let image_url = request_image(services, request, "No colored blueprint was generated").await?;

        Ok(Json(ColorizeResponse { image_url, analysis }))
    })
    .await
}

pub async fn swap_background(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<SwapRequest>,
) -> Result<Json<SwapResponse>, AppError> {
    let config = &state.config;
    within_budget("swap", config.request_timeout, async {
        let limits = &config.limits;
        let text = limits.text("productDescription", &body.product_description)?;
        let image = match text {
            Some(_) => None,
            None => limits.image(&body.image)?,
        };
        if text.is_none() && image.is_none() {
            return Err(AppError::Validation("Missing product information".into()));
        }
        let custom = limits.text("customPrompt", &body.custom_prompt)?;

        let services = state.services()?;
        let description =
            resolve_description(services, &config.models.vision, text, image, prompts::PRODUCT_DESCRIPTION).await?;

        let style = BACKDROP_STYLES.lookup(present(&body.background_style));
        let prompt = prompts::backdrop_prompt(&description, style, custom);
        let request = ImageRequest::square(&config.models.image, prompt, Quality::Standard);
        let image_url = request_image(services, request, "No image was generated").await?;

        Ok(Json(SwapResponse { image_url, description }))
    })
    .await
}

pub async fn list_styles() -> Json<StyleCatalog> {
    Json(StyleCatalog::current())
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok", configured: state.services.is_some(), started_at: state.started_at })
}
