//! Server-side generation pipeline.
//!
//! One request in, exactly one model invocation, one schema-checked output
//! back. Nothing is kept between calls; refinement is the same path with a
//! prior result attached.

mod image;
pub mod prompts;
mod text;

use serde_json::Value;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    config::GeminiConfig,
    error::{AdcraftError, Result},
    identity::{CallerIdentity, IdentityVerifier, PresenceCheck},
    logger,
    models::{GenerateRequest, GenerationOutput, ImageAsset, TaskKind, ToolType},
    provider::{ContentRequest, ContentResponse, ModelProvider},
};

/// Which model variant serves each task kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSelection {
    pub text_model: String,
    pub image_model: String,
}

impl ModelSelection {
    pub fn new(text_model: impl Into<String>, image_model: impl Into<String>) -> Self {
        Self {
            text_model: text_model.into(),
            image_model: image_model.into(),
        }
    }

    pub fn for_task(&self, task: TaskKind) -> &str {
        match task {
            TaskKind::Text => &self.text_model,
            TaskKind::Image => &self.image_model,
        }
    }
}

impl From<&GeminiConfig> for ModelSelection {
    fn from(config: &GeminiConfig) -> Self {
        ModelSelection::new(config.text_model.clone(), config.image_model.clone())
    }
}

#[derive(Clone)]
pub struct GenerationDispatcher {
    provider: Arc<dyn ModelProvider>,
    identity: Arc<dyn IdentityVerifier>,
    models: ModelSelection,
}

impl GenerationDispatcher {
    /// Dispatcher gated by [`PresenceCheck`].
    pub fn new(provider: Arc<dyn ModelProvider>, models: ModelSelection) -> Self {
        Self {
            provider,
            identity: Arc::new(PresenceCheck),
            models,
        }
    }

    pub fn with_identity(mut self, identity: Arc<dyn IdentityVerifier>) -> Self {
        self.identity = identity;
        self
    }

    pub fn models(&self) -> &ModelSelection {
        &self.models
    }

    pub async fn dispatch(&self, request: GenerateRequest) -> Result<GenerationOutput> {
        let request_id = Uuid::new_v4();
        let caller = self
            .authorize(&request_id, request.tool_type.as_str(), request.uid.as_deref())
            .await?;
        self.generate(request_id, caller, request).await
    }

    /// Entry point for an undecoded `/generate` body. The caller is checked
    /// before any other field is read, so a body without a uid is
    /// `Unauthorized` whatever else it carries.
    pub async fn dispatch_json(&self, body: Value) -> Result<GenerationOutput> {
        let request_id = Uuid::new_v4();
        let caller = self
            .authorize(
                &request_id,
                body.get("toolType").and_then(Value::as_str).unwrap_or("unknown"),
                body.get("uid").and_then(Value::as_str),
            )
            .await?;

        let request: GenerateRequest = serde_json::from_value(body).map_err(|e| {
            log::warn!("[req:{}] undecodable request body: {}", request_id, e);
            AdcraftError::InvalidRequest(format!("Malformed request body: {}", e))
        })?;
        self.generate(request_id, caller, request).await
    }

    async fn authorize(
        &self,
        request_id: &Uuid,
        tool: &str,
        uid: Option<&str>,
    ) -> Result<CallerIdentity> {
        self.identity.verify(uid).await.map_err(|e| {
            log::warn!("[req:{}] rejected {} request: {}", request_id, tool, e);
            e
        })
    }

    async fn generate(
        &self,
        request_id: Uuid,
        caller: CallerIdentity,
        request: GenerateRequest,
    ) -> Result<GenerationOutput> {
        let GenerateRequest {
            tool_type: tool,
            inputs,
            previous_result,
            ..
        } = request;

        let task = tool.task_kind();
        let model = self.models.for_task(task);
        if !tool.is_known() {
            log::warn!(
                "[req:{}] unrecognized tool '{}', using the generic schema",
                request_id,
                tool
            );
        }
        log::info!(
            "[req:{}] {} task for {} (uid {}, refining: {})",
            request_id,
            match task {
                TaskKind::Text => "text",
                TaskKind::Image => "image",
            },
            tool,
            caller.uid,
            previous_result.is_some()
        );

        let output = match task {
            TaskKind::Image => {
                let previous = previous_result
                    .map(|value| GenerationOutput::from_value(&tool, value))
                    .transpose()?;
                let previous: Option<&ImageAsset> =
                    previous.as_ref().and_then(GenerationOutput::as_image);

                let plan = image::plan(model, &tool, &inputs, previous)?;
                let response = self.invoke(&request_id, &tool, plan.request).await?;
                GenerationOutput::Image(image::collect(response, plan.fallback_image)?)
            }
            TaskKind::Text => {
                let content_request = text::plan(model, &tool, &inputs, previous_result)?;
                let response = self.invoke(&request_id, &tool, content_request).await?;
                text::parse(&tool, response)?
            }
        };

        log::info!("[req:{}] ✅ {} generation complete", request_id, tool);
        Ok(output)
    }

    async fn invoke(
        &self,
        request_id: &Uuid,
        tool: &ToolType,
        request: ContentRequest,
    ) -> Result<ContentResponse> {
        let _timer = logger::timer(&format!("req:{} {} via {}", request_id, tool, request.model));
        self.provider.generate_content(request).await.map_err(|e| {
            log::error!("[req:{}] {} invocation failed: {}", request_id, self.provider.name(), e);
            e
        })
    }
}

impl std::fmt::Debug for GenerationDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationDispatcher")
            .field("provider", &self.provider.name())
            .field("models", &self.models)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GenerationInputs;
    use crate::provider::ContentPart;
    use crate::test_support::{json_reply, ScriptedProvider};
    use async_trait::async_trait;
    use serde_json::json;

    fn dispatcher(provider: Arc<ScriptedProvider>) -> GenerationDispatcher {
        GenerationDispatcher::new(provider, ModelSelection::new("text-model", "image-model"))
    }

    #[tokio::test]
    async fn test_missing_uid_never_reaches_provider() {
        let provider = ScriptedProvider::new(vec![]);
        let request = GenerateRequest::new(ToolType::LandingPage, GenerationInputs::new("Acme"));

        let err = dispatcher(provider.clone()).dispatch(request).await.unwrap_err();
        assert!(matches!(err, AdcraftError::Unauthorized));
        assert_eq!(err.status_code(), 401);
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_text_task_uses_text_model() {
        let provider = ScriptedProvider::new(vec![json_reply(json!({
            "headline": "Brew bold", "content": "Cold brew at your door.", "cta": "Subscribe"
        }))]);
        let request = GenerateRequest::new(ToolType::FacebookAds, GenerationInputs::new("Acme"))
            .with_uid("user-1");

        let output = dispatcher(provider.clone()).dispatch(request).await.unwrap();
        assert_eq!(output.schema(), Some(crate::schema::SchemaKind::Generic));

        let seen = provider.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].model, "text-model");
    }

    #[tokio::test]
    async fn test_image_task_uses_image_model() {
        let provider = ScriptedProvider::new(vec![ContentResponse::new(vec![
            ContentPart::InlineImage {
                mime_type: "image/png".into(),
                data: "iVBORw0KGgo=".into(),
            },
        ])]);
        let request = GenerateRequest::new(ToolType::LogoGenerator, GenerationInputs::new("Acme"))
            .with_uid("user-1");

        let output = dispatcher(provider.clone()).dispatch(request).await.unwrap();
        assert_eq!(
            output.as_image().unwrap().image.as_deref(),
            Some("data:image/png;base64,iVBORw0KGgo=")
        );
        assert_eq!(provider.seen.lock().unwrap()[0].model, "image-model");
    }

    #[tokio::test]
    async fn test_unknown_tool_served_with_generic_schema() {
        let provider = ScriptedProvider::new(vec![json_reply(json!({
            "headline": "Hi", "content": "Body", "cta": "Go"
        }))]);
        let request = GenerateRequest::new(
            ToolType::Other("press_release".into()),
            GenerationInputs::new("Acme"),
        )
        .with_uid("user-1");

        let output = dispatcher(provider).dispatch(request).await.unwrap();
        assert!(matches!(output, GenerationOutput::Generic(_)));
    }

    #[tokio::test]
    async fn test_provider_error_propagates() {
        struct Failing;

        #[async_trait]
        impl ModelProvider for Failing {
            async fn generate_content(&self, _request: ContentRequest) -> Result<ContentResponse> {
                Err(AdcraftError::Provider {
                    status: 503,
                    message: "overloaded".into(),
                })
            }

            fn name(&self) -> &str {
                "failing"
            }
        }

        let dispatcher = GenerationDispatcher::new(
            Arc::new(Failing),
            ModelSelection::new("text-model", "image-model"),
        );
        let request = GenerateRequest::new(ToolType::Newsletter, GenerationInputs::new("Acme"))
            .with_uid("user-1");

        let err = dispatcher.dispatch(request).await.unwrap_err();
        assert_eq!(err.status_code(), 500);
        assert!(err.to_string().contains("overloaded"));
    }

    #[tokio::test]
    async fn test_raw_body_checks_uid_before_decoding() {
        let provider = ScriptedProvider::new(vec![]);
        let dispatcher = dispatcher(provider.clone());

        for body in [
            json!({ "toolType": "image_generator", "inputs": { "businessName": "Acme", "aspectRatio": "2:1" } }),
            json!({ "toolType": "landing_page", "inputs": { "businessName": null } }),
            json!({ "inputs": "not an object", "uid": "" }),
        ] {
            let err = dispatcher.dispatch_json(body).await.unwrap_err();
            assert!(matches!(err, AdcraftError::Unauthorized));
        }
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_raw_body_decode_failure_after_uid() {
        let provider = ScriptedProvider::new(vec![]);
        let body = json!({
            "toolType": "image_generator",
            "uid": "user-1",
            "inputs": { "businessName": "Acme", "aspectRatio": "2:1" }
        });

        let err = dispatcher(provider.clone()).dispatch_json(body).await.unwrap_err();
        assert!(matches!(err, AdcraftError::InvalidRequest(_)));
        assert_eq!(err.status_code(), 500);
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_raw_body_success() {
        let provider = ScriptedProvider::new(vec![json_reply(json!({
            "headline": "Hi", "content": "Body", "cta": "Go"
        }))]);
        let body = json!({
            "toolType": "newsletter",
            "uid": "user-1",
            "inputs": { "businessName": "Acme", "offerDetails": "Cold brew" }
        });

        let output = dispatcher(provider).dispatch_json(body).await.unwrap();
        assert!(matches!(output, GenerationOutput::Generic(_)));
    }
}
