use serde_json::Value;

use crate::{
    dispatcher::prompts,
    error::{AdcraftError, Result},
    models::{GenerationInputs, GenerationOutput, ToolType},
    provider::{ContentPart, ContentRequest, ContentResponse, ResponseFormat},
    schema::SchemaKind,
};

pub(super) fn plan(
    model: &str,
    tool: &ToolType,
    inputs: &GenerationInputs,
    previous: Option<Value>,
) -> Result<ContentRequest> {
    let schema = SchemaKind::for_tool(tool);
    let mut prompt = prompts::text_prompt(tool, inputs);

    match (inputs.refinement(), previous) {
        (Some(instruction), Some(previous)) => {
            // The prior object has to be a valid instance of this tool's
            // schema before it can be refined.
            let previous = GenerationOutput::from_value(tool, previous)?;
            let previous_json = serde_json::to_string(&previous)
                .map_err(|e| AdcraftError::Serialization(e.to_string()))?;
            prompt.push_str(&prompts::text_refinement(instruction, &previous_json));
        }
        (None, Some(_)) => {
            log::warn!("⚠️  Prior result supplied without a refinement prompt, generating fresh");
        }
        _ => {}
    }

    Ok(ContentRequest {
        model: model.to_string(),
        parts: vec![ContentPart::Text(prompt)],
        system_instruction: Some(prompts::SYSTEM_INSTRUCTION.to_string()),
        format: ResponseFormat::Json {
            schema: schema.response_schema(),
        },
    })
}

pub(super) fn parse(tool: &ToolType, response: ContentResponse) -> Result<GenerationOutput> {
    let text = response.text();
    let text = text.trim();
    if text.is_empty() {
        return Err(AdcraftError::EmptyResponse("Empty response from AI".into()));
    }

    let value: Value =
        serde_json::from_str(text).map_err(|e| AdcraftError::MalformedOutput(e.to_string()))?;

    GenerationOutput::from_value(tool, value)
}
