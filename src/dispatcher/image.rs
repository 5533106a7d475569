use crate::{
    dispatcher::prompts,
    error::{AdcraftError, Result},
    media::{self, EncodedImage},
    models::{AspectRatio, GenerationInputs, ImageAsset, ToolType},
    provider::{ContentPart, ContentRequest, ContentResponse, ResponseFormat},
};

/// Image model request plus the prior image to fall back on.
pub(super) struct ImagePlan {
    pub request: ContentRequest,
    pub fallback_image: Option<String>,
}

pub(super) fn plan(
    model: &str,
    tool: &ToolType,
    inputs: &GenerationInputs,
    previous: Option<&ImageAsset>,
) -> Result<ImagePlan> {
    let prior_image = previous
        .and_then(|asset| asset.image.as_deref())
        .filter(|image| !image.trim().is_empty());

    let parts = match prior_image {
        Some(image) => {
            let encoded = EncodedImage::parse(image)?;
            log::debug!("Refining prior {} image", encoded.mime_type);
            vec![
                ContentPart::InlineImage {
                    mime_type: encoded.mime_type,
                    data: encoded.data,
                },
                ContentPart::Text(prompts::image_refinement_prompt(inputs)),
            ]
        }
        None => {
            let prompt = match tool {
                ToolType::LogoGenerator => prompts::logo_prompt(inputs),
                _ => prompts::brand_image_prompt(inputs),
            };
            vec![ContentPart::Text(prompt)]
        }
    };

    let aspect_ratio = match tool {
        ToolType::LogoGenerator => AspectRatio::Square,
        _ => inputs.aspect_ratio.unwrap_or_default(),
    };

    Ok(ImagePlan {
        request: ContentRequest {
            model: model.to_string(),
            parts,
            system_instruction: None,
            format: ResponseFormat::Image { aspect_ratio },
        },
        fallback_image: prior_image.map(str::to_string),
    })
}

/// Fold the model's parts into an [`ImageAsset`]. The last inline image wins
/// and text parts become the description. Without a new image the prior one
/// is returned untouched.
pub(super) fn collect(response: ContentResponse, fallback_image: Option<String>) -> Result<ImageAsset> {
    let mut image = None;
    let mut description = String::new();

    for part in response.parts {
        match part {
            ContentPart::InlineImage { mime_type, data } if !data.is_empty() => {
                image = Some(media::to_data_uri(&mime_type, &data));
            }
            ContentPart::InlineImage { .. } => {}
            ContentPart::Text(text) => description.push_str(&text),
        }
    }

    if image.is_none() && fallback_image.is_some() {
        log::warn!("⚠️  Model returned no new image, keeping the prior one");
    }

    let asset = ImageAsset {
        image: image.or(fallback_image),
        description,
    };

    if asset.is_empty() {
        return Err(AdcraftError::EmptyResponse(
            "No content generated. Please try again.".into(),
        ));
    }

    Ok(asset)
}
