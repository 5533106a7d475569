use crate::models::{GenerationInputs, ToolType};

pub const SYSTEM_INSTRUCTION: &str =
    "You are a world-class marketing strategist. Output purely valid JSON.";

const DEFAULT_REFINEMENT: &str = "Apply subtle improvements.";
const DEFAULT_LOGO_STYLE: &str = "Minimalist";
const DEFAULT_LOGO_COLORS: &str = "Black and White";
const DEFAULT_LOGO_ICONS: &str = "Abstract geometric shapes";
const DEFAULT_STYLE_PRESET: &str = "Photorealistic";

fn or_default<'a>(value: Option<&'a str>, default: &'a str) -> &'a str {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(default)
}

pub fn text_prompt(tool: &ToolType, inputs: &GenerationInputs) -> String {
    let mut prompt = format!(
        "Generate content for tool: {}.\n\
         Business: {} ({}).\n\
         Audience: {}.\n\
         Tone: {}.\n\
         Details: {}.",
        tool,
        inputs.business_name,
        inputs.niche,
        inputs.audience,
        inputs.tone,
        inputs.offer_details
    );

    if let Some(sample) = inputs
        .writing_sample
        .as_deref()
        .map(str::trim)
        .filter(|sample| !sample.is_empty())
    {
        prompt.push_str(&format!("\nWriting sample (match this voice):\n{}", sample));
    }

    prompt
}

/// Appended to the text prompt when refining. The whole prior object goes in
/// and the whole updated object is asked for, never a diff.
pub fn text_refinement(instruction: &str, previous_json: &str) -> String {
    format!(
        "\n\nREFINE TASK: {}.\n\nORIGINAL JSON:\n{}\n\nReturn the FULL updated JSON object.",
        instruction, previous_json
    )
}

pub fn logo_prompt(inputs: &GenerationInputs) -> String {
    format!(
        "Create a professional, vector-style logo for \"{}\".\n\
         Industry: {}.\n\
         Style: {}.\n\
         Colors: {}.\n\
         Symbols: {}.\n\
         Requirements: High contrast, clean lines, white background, no photorealism, \
         no text other than the brand name.",
        inputs.business_name,
        inputs.niche,
        or_default(inputs.logo_style.as_deref(), DEFAULT_LOGO_STYLE),
        or_default(inputs.logo_colors.as_deref(), DEFAULT_LOGO_COLORS),
        or_default(inputs.logo_icons.as_deref(), DEFAULT_LOGO_ICONS),
    )
}

pub fn brand_image_prompt(inputs: &GenerationInputs) -> String {
    format!(
        "Generate a high-quality brand image for \"{}\".\n\
         Context: {}.\n\
         Style: {}.\n\
         Mood: {}.",
        inputs.business_name,
        inputs.offer_details,
        or_default(inputs.style_preset.as_deref(), DEFAULT_STYLE_PRESET),
        inputs.tone,
    )
}

pub fn image_refinement_prompt(inputs: &GenerationInputs) -> String {
    format!(
        "REFINE THIS IMAGE: {}.\n\
         CONTEXT: {} - {}.\n\
         REQUIREMENT: Maintain high quality and brand consistency.",
        or_default(inputs.refinement(), DEFAULT_REFINEMENT),
        inputs.business_name,
        inputs.niche,
    )
}
