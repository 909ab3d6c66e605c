//! Fixed instructions sent to the description service and the templates that
//! turn a resolved description into an image prompt.

pub const BLUEPRINT_ANALYSIS: &str = "Analyze this architectural blueprint. Describe the detailed layout, \
specific rooms, and dimensions indicated. Focus on providing a description for a 2D colored floor plan. \
Identify areas for wood flooring, tiling, grass, or specific wall colors.";

pub const PRODUCT_DESCRIPTION: &str = "Describe the main product in this image in detail. Focus on its shape, \
color, materials, and unique features. Keep it to one paragraph.";

pub const BRAND_STRATEGIST: &str = r##"You are a professional brand strategist and logo designer.
Your task is to analyze a brand and create:
1. A detailed, professional logo generation prompt for DALL-E 3.
2. A color psychology analysis including primary and secondary colors.
3. Hex codes for the palette.

Return your response in strict JSON format:
{
  "dallePrompt": "...",
  "primaryColor": { "hex": "#...", "meaning": "..." },
  "secondaryColors": [ { "hex": "#...", "label": "..." } ],
  "rationale": "..."
}"##;

pub const FASHION_STYLIST: &str = r##"You are a high-end celebrity fashion stylist.
Your task is to:
1. Recommend a complete outfit for a specific occasion and weather.
2. Include main clothing items, shoes, and accessories (watch, jewelry, bag).
3. Explain the style rationale (why this works for the weather/occasion).
4. Describe the color palette.

Return your response in strict JSON format:
{
  "outfitDescription": "...",
  "items": ["list of key items"],
  "rationale": "...",
  "palette": ["list of colors"],
  "dallePrompt": "A professional high-fashion mood board containing..."
}"##;

const LOGO_CONSTRAINTS: &str = "Clean, minimalist, professional logo design. Vector style, high resolution. \
Flat design or subtle gradients. Isolated on a WHITE background. No realistic photos, no complex backgrounds. \
Focus on scalability and modern branding.";

const MOODBOARD_CONSTRAINTS: &str = "High-end fashion mood board style. Professional studio lighting. \
Aesthetic arrangement of clothing items and accessories. Clean, elegant composition. \
No people, just the flatlay or mannequin arrangement. 8k resolution, Vogue aesthetic.";

const BLUEPRINT_CONSTRAINTS: &str = "This must be a TOP-DOWN 2D plan view only. No 3D perspectives, no isometric views. \
Use professional architectural markers and realistic texture overlays for flooring and furniture. \
Flat 2D vector-style with realistic shading. 8k resolution, crisp lines.";

const BACKDROP_CONSTRAINTS: &str = "The lighting is cinematic and perfectly showcases the product's details. \
High resolution, 8k, sharp focus, clean composition. Commercial photography style.";

pub struct LogoBrief<'a> {
    pub brand_name: &'a str,
    pub tagline: Option<&'a str>,
    pub industry: &'a str,
    pub personality: &'a str,
    pub personality_phrase: &'a str,
    pub color_vibe: Option<&'a str>,
}

pub struct OutfitBrief<'a> {
    pub occasion: &'a str,
    pub weather: &'a str,
    pub vibe: &'a str,
    pub vibe_phrase: &'a str,
    pub preferences: Option<&'a str>,
}

fn sentence(text: Option<&str>) -> String {
    match text.map(str::trim).filter(|t| !t.is_empty()) {
        Some(t) if t.ends_with(['.', '!', '?']) => format!(" {t}"),
        Some(t) => format!(" {t}."),
        None => String::new(),
    }
}

pub fn logo_analysis_request(brief: &LogoBrief) -> String {
    format!(
        "Brand Name: {}\nTagline: {}\nIndustry: {}\nPersonality: {} ({})\nPreferred Vibe: {}\n\nRequirements for DALL-E prompt:\n{}",
        brief.brand_name,
        brief.tagline.unwrap_or("None"),
        brief.industry,
        brief.personality,
        brief.personality_phrase,
        brief.color_vibe.unwrap_or("Default for personality"),
        LOGO_CONSTRAINTS,
    )
}

pub fn logo_prompt(generation_prompt: &str, brief: &LogoBrief) -> String {
    format!(
        "{} Logo for \"{}\", a {} brand. Visual personality: {}.{} {}",
        generation_prompt.trim(),
        brief.brand_name,
        brief.industry,
        brief.personality_phrase,
        sentence(brief.color_vibe.map(|v| format!("Color vibe: {v}")).as_deref()),
        LOGO_CONSTRAINTS,
    )
}

pub fn outfit_analysis_request(brief: &OutfitBrief) -> String {
    format!(
        "Occasion: {}\nWeather: {}\nVibe: {} ({})\nExtra Preferences: {}\n\nRequirements for DALL-E prompt:\n{}",
        brief.occasion,
        brief.weather,
        brief.vibe,
        brief.vibe_phrase,
        brief.preferences.unwrap_or("None"),
        MOODBOARD_CONSTRAINTS,
    )
}

pub fn moodboard_prompt(generation_prompt: &str, brief: &OutfitBrief) -> String {
    format!(
        "{} Outfit for a {} occasion in {} weather, styled in the {} look: {}.{} {}",
        generation_prompt.trim(),
        brief.occasion,
        brief.weather,
        brief.vibe,
        brief.vibe_phrase,
        sentence(brief.preferences),
        MOODBOARD_CONSTRAINTS,
    )
}

pub fn blueprint_prompt(layout: &str, style_phrase: &str, custom: Option<&str>) -> String {
    format!(
        "A high-quality 2D colored architectural floor plan based on this layout: {}. The rendering style is {}.{} {}",
        layout.trim(),
        style_phrase,
        sentence(custom),
        BLUEPRINT_CONSTRAINTS,
    )
}

pub fn backdrop_prompt(product: &str, style_phrase: &str, custom: Option<&str>) -> String {
    format!(
        "A high-end, professional commercial product photograph of {}. The product is placed in a {}.{} {}",
        product.trim(),
        style_phrase,
        sentence(custom),
        BACKDROP_CONSTRAINTS,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn analyst_instructions_keep_their_json_templates_intact() {
        assert!(BRAND_STRATEGIST.contains(r##""primaryColor": { "hex": "#...", "meaning": "..." }"##));
        assert!(BRAND_STRATEGIST.ends_with("\"rationale\": \"...\"\n}"));
        assert!(FASHION_STYLIST.contains("\"palette\": [\"list of colors\"]"));
        assert!(FASHION_STYLIST.ends_with('}'));
    }

    #[test]
    fn optional_text_becomes_a_sentence_or_nothing() {
        assert_eq!(sentence(None), "");
        assert_eq!(sentence(Some("   ")), "");
        assert_eq!(sentence(Some("add a rooftop garden")), " add a rooftop garden.");
        assert_eq!(sentence(Some("Keep it warm!")), " Keep it warm!");
    }

    #[test]
    fn blueprint_prompt_always_demands_top_down_view() {
        let prompt = blueprint_prompt("two bedrooms, one kitchen", "bamboo flooring", None);
        assert!(prompt.starts_with("A high-quality 2D colored architectural floor plan based on this layout: two bedrooms"));
        assert!(prompt.contains("The rendering style is bamboo flooring."));
        assert!(prompt.ends_with(BLUEPRINT_CONSTRAINTS));
    }

    #[test]
    fn backdrop_prompt_carries_custom_instructions_verbatim() {
        let prompt = backdrop_prompt("a steel watch", "luxe marble", Some("Add a sprig of lavender"));
        assert!(prompt.contains("photograph of a steel watch."));
        assert!(prompt.contains("placed in a luxe marble. Add a sprig of lavender. The lighting"));
    }

    #[test]
    fn moodboard_prompt_names_occasion_weather_and_vibe() {
        let brief = OutfitBrief {
            occasion: "wedding",
            weather: "sunny",
            vibe: "elegant",
            vibe_phrase: "tailored silhouettes",
            preferences: None,
        };
        let prompt = moodboard_prompt("A flatlay of a linen suit.", &brief);
        assert!(prompt.contains("wedding"));
        assert!(prompt.contains("sunny"));
        assert!(prompt.contains("styled in the elegant look: tailored silhouettes."));
        assert!(prompt.ends_with(MOODBOARD_CONSTRAINTS));

        let request = outfit_analysis_request(&brief);
        assert!(request.contains("Extra Preferences: None"));
    }

    #[test]
    fn logo_request_marks_absent_optionals() {
        let brief = LogoBrief {
            brand_name: "Fernwood",
            tagline: None,
            industry: "coffee",
            personality: "Organic",
            personality_phrase: "soft curves",
            color_vibe: None,
        };
        let request = logo_analysis_request(&brief);
        assert!(request.contains("Tagline: None"));
        assert!(request.contains("Preferred Vibe: Default for personality"));

        let prompt = logo_prompt("A fern leaf monogram.", &brief);
        assert!(prompt.contains("Logo for \"Fernwood\", a coffee brand. Visual personality: soft curves."));
        assert!(prompt.ends_with(LOGO_CONSTRAINTS));
    }
}
