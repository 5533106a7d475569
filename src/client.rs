//! Request composer: the calling side of `POST /generate`.

use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

use crate::{
    config::ClientConfig,
    error::{AdcraftError, Result},
    models::{
        ErrorResponse, GenerateRequest, GenerationInputs, GenerationOutput, RawGenerateResponse,
        ToolType,
    },
};

const GENERATION_TIMEOUT_MESSAGE: &str =
    "Request timed out. The model is taking too long to respond.";
const REFINEMENT_TIMEOUT_MESSAGE: &str = "Refinement timed out.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CallKind {
    Generation,
    Refinement,
}

#[derive(Clone)]
pub struct GenerationClient {
    client: Client,
    endpoint: String,
    timeout: Duration,
    uid: String,
}

impl GenerationClient {
    /// `uid` is forwarded as the caller identity on every request.
    pub fn new(config: ClientConfig, uid: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: config.endpoint,
            timeout: config.timeout,
            uid: uid.into(),
        }
    }

    /// Build from a config that carries its own uid.
    pub fn from_config(config: ClientConfig) -> Result<Self> {
        let uid = config
            .uid
            .clone()
            .filter(|uid| !uid.trim().is_empty())
            .ok_or_else(|| AdcraftError::Config("A caller uid is required".into()))?;
        Ok(Self::new(config, uid))
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub async fn generate(
        &self,
        tool: ToolType,
        inputs: GenerationInputs,
    ) -> Result<GenerationOutput> {
        validate_inputs(&tool, &inputs)?;

        let mut inputs = inputs;
        inputs.refinement_prompt = None;

        let request = GenerateRequest::new(tool, inputs).with_uid(self.uid.clone());
        self.send(request, CallKind::Generation).await
    }

    /// Ask for a modified version of `previous`. The instruction and the prior
    /// result always travel together.
    pub async fn refine(
        &self,
        tool: ToolType,
        previous: &GenerationOutput,
        instruction: &str,
        inputs: GenerationInputs,
    ) -> Result<GenerationOutput> {
        let instruction = instruction.trim();
        if instruction.is_empty() {
            return Err(AdcraftError::InvalidRequest(
                "a refinement instruction is required".into(),
            ));
        }
        validate_inputs(&tool, &inputs)?;
        if previous.as_image().is_some() != tool.is_image_task() {
            return Err(AdcraftError::InvalidRequest(format!(
                "prior result does not belong to {}",
                tool
            )));
        }

        let mut inputs = inputs;
        inputs.refinement_prompt = Some(instruction.to_string());

        let request = GenerateRequest::new(tool, inputs)
            .with_uid(self.uid.clone())
            .with_previous_result(previous.to_value()?);
        self.send(request, CallKind::Refinement).await
    }

    async fn send(&self, request: GenerateRequest, kind: CallKind) -> Result<GenerationOutput> {
        let tool = request.tool_type.clone();

        // Dropping the future on timeout aborts the in-flight HTTP exchange.
        let exchange = self.exchange(&request, kind);
        let output = match tokio::time::timeout(self.timeout, exchange).await {
            Ok(result) => result?,
            Err(_) => {
                log::error!("{} call for {} timed out after {:?}", label(kind), tool, self.timeout);
                let message = match kind {
                    CallKind::Generation => GENERATION_TIMEOUT_MESSAGE,
                    CallKind::Refinement => REFINEMENT_TIMEOUT_MESSAGE,
                };
                return Err(AdcraftError::Timeout(message.to_string()));
            }
        };

        GenerationOutput::from_value(&tool, output).map_err(|e| {
            log::error!("{} response for {} failed to decode: {}", label(kind), tool, e);
            AdcraftError::Failed(e.to_string())
        })
    }

    async fn exchange(&self, request: &GenerateRequest, kind: CallKind) -> Result<Value> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                log::error!("{} service error: {}", label(kind), e);
                AdcraftError::Failed(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let fallback = match kind {
                CallKind::Generation => format!(
                    "Generation failed: {}",
                    status.canonical_reason().unwrap_or(status.as_str())
                ),
                CallKind::Refinement => "Refinement failed".to_string(),
            };
            let message = response
                .json::<ErrorResponse>()
                .await
                .ok()
                .map(|body| body.error)
                .filter(|error| !error.is_empty())
                .unwrap_or(fallback);
            log::error!("{} service error ({}): {}", label(kind), status.as_u16(), message);
            return Err(AdcraftError::Failed(message));
        }

        let body: RawGenerateResponse = response
            .json()
            .await
            .map_err(|e| AdcraftError::Failed(e.to_string()))?;
        Ok(body.output)
    }
}

fn label(kind: CallKind) -> &'static str {
    match kind {
        CallKind::Generation => "Generation",
        CallKind::Refinement => "Refinement",
    }
}

/// Required fields per tool: a business name and an offer brief always, plus
/// style and colors for the logo tool.
pub fn validate_inputs(tool: &ToolType, inputs: &GenerationInputs) -> Result<()> {
    fn present(value: Option<&str>) -> bool {
        value.map_or(false, |value| !value.trim().is_empty())
    }

    if !tool.is_known() {
        return Err(AdcraftError::InvalidRequest(format!("unknown tool: {}", tool)));
    }
    if !present(Some(&inputs.business_name)) {
        return Err(AdcraftError::InvalidRequest("businessName is required".into()));
    }
    if !present(Some(&inputs.offer_details)) {
        return Err(AdcraftError::InvalidRequest("offerDetails is required".into()));
    }

    if *tool == ToolType::LogoGenerator {
        if !present(inputs.logo_style.as_deref()) {
            return Err(AdcraftError::InvalidRequest("logoStyle is required".into()));
        }
        if !present(inputs.logo_colors.as_deref()) {
            return Err(AdcraftError::InvalidRequest("logoColors is required".into()));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{serve_once, serve_silent};
    use serde_json::json;

    fn acme() -> GenerationInputs {
        GenerationInputs::new("Acme")
            .with_brand("Coffee", "Commuters")
            .with_tone("Bold")
            .with_offer("Cold brew subscription")
    }

    fn client(base_url: &str, timeout: Duration) -> GenerationClient {
        let config = ClientConfig::new()
            .with_endpoint(format!("{}/generate", base_url))
            .with_timeout(timeout);
        GenerationClient::new(config, "user-1")
    }

    #[test]
    fn test_validate_inputs() {
        assert!(validate_inputs(&ToolType::LandingPage, &acme()).is_ok());
        assert!(validate_inputs(&ToolType::LandingPage, &GenerationInputs::new("Acme")).is_err());
        assert!(validate_inputs(&ToolType::LandingPage, &acme().with_brand("", "")).is_ok());
        assert!(validate_inputs(&ToolType::Other("x".into()), &acme()).is_err());

        let logo = acme().with_logo("minimalist", "Navy & Gold", None);
        assert!(validate_inputs(&ToolType::LogoGenerator, &logo).is_ok());
        assert!(validate_inputs(&ToolType::LogoGenerator, &acme()).is_err());
    }

    #[test]
    fn test_logo_still_needs_offer_brief() {
        let logo = GenerationInputs::new("Acme").with_logo("minimalist", "Navy & Gold", None);
        let err = validate_inputs(&ToolType::LogoGenerator, &logo).unwrap_err();
        assert_eq!(err.to_string(), "Invalid request: offerDetails is required");

        // Logo fields only matter for the logo tool.
        assert!(validate_inputs(&ToolType::ImageGenerator, &acme()).is_ok());
    }

    #[test]
    fn test_from_config_requires_uid() {
        assert!(GenerationClient::from_config(ClientConfig::new()).is_err());
        let client = GenerationClient::from_config(ClientConfig::new().with_uid("u")).unwrap();
        assert_eq!(client.timeout(), Duration::from_secs(60));
    }

    #[tokio::test]
    async fn test_generate_posts_payload_and_decodes() {
        let body = json!({ "output": {
            "heroHeadline": "Cold brew, zero effort",
            "problemDescription": "Commutes start slow.",
            "solutionDescription": "Weekly cold brew at your door.",
            "ctaText": "Start my subscription"
        }});
        let (base_url, request) = serve_once(200, body.to_string()).await;

        let output = client(&base_url, Duration::from_secs(5))
            .generate(ToolType::LandingPage, acme())
            .await
            .unwrap();
        assert!(matches!(output, GenerationOutput::LandingPage(_)));

        let raw = request.await.unwrap();
        assert!(raw.starts_with("POST /generate"));
        assert!(raw.contains("\"toolType\":\"landing_page\""));
        assert!(raw.contains("\"uid\":\"user-1\""));
        assert!(!raw.contains("previousResult"));
    }

    #[tokio::test]
    async fn test_refine_sends_prior_result_and_instruction() {
        let body = json!({ "output": { "headline": "New", "content": "Body", "cta": "Go" } });
        let (base_url, request) = serve_once(200, body.to_string()).await;
        let previous = GenerationOutput::from_value(
            &ToolType::Newsletter,
            json!({ "headline": "Old", "content": "Body", "cta": "Go" }),
        )
        .unwrap();

        client(&base_url, Duration::from_secs(5))
            .refine(ToolType::Newsletter, &previous, "Punchier headline", acme())
            .await
            .unwrap();

        let raw = request.await.unwrap();
        assert!(raw.contains("\"refinementPrompt\":\"Punchier headline\""));
        assert!(raw.contains("\"previousResult\":{"));
    }

    #[tokio::test]
    async fn test_refine_requires_instruction() {
        let previous = GenerationOutput::from_value(
            &ToolType::Newsletter,
            json!({ "headline": "Old", "content": "Body", "cta": "Go" }),
        )
        .unwrap();
        let err = client("http://127.0.0.1:9", Duration::from_secs(1))
            .refine(ToolType::Newsletter, &previous, "  ", acme())
            .await
            .unwrap_err();
        assert!(matches!(err, AdcraftError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn test_server_error_message_is_surfaced() {
        let body = json!({ "error": "Empty response from AI" });
        let (base_url, _request) = serve_once(500, body.to_string()).await;

        let err = client(&base_url, Duration::from_secs(5))
            .generate(ToolType::GoogleAds, acme())
            .await
            .unwrap_err();
        match err {
            AdcraftError::Failed(message) => assert_eq!(message, "Empty response from AI"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_error_without_body_uses_status() {
        let (base_url, _request) = serve_once(502, "not json".to_string()).await;

        let err = client(&base_url, Duration::from_secs(5))
            .generate(ToolType::GoogleAds, acme())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Generation failed: Bad Gateway");
    }

    #[tokio::test]
    async fn test_transport_failure_uses_same_channel() {
        // Bind and drop to get a port nothing listens on.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client(&format!("http://{}", addr), Duration::from_secs(5))
            .generate(ToolType::GoogleAds, acme())
            .await
            .unwrap_err();
        assert!(matches!(err, AdcraftError::Failed(_)));
    }

    #[tokio::test]
    async fn test_timeout_cancels_the_request() {
        let (base_url, closed) = serve_silent().await;

        let err = client(&base_url, Duration::from_millis(200))
            .generate(ToolType::GoogleAds, acme())
            .await
            .unwrap_err();
        match &err {
            AdcraftError::Timeout(message) => assert_eq!(message, GENERATION_TIMEOUT_MESSAGE),
            other => panic!("unexpected error: {:?}", other),
        }

        // The server side sees the connection go away.
        tokio::time::timeout(Duration::from_secs(5), closed)
            .await
            .expect("connection was not closed after the timeout")
            .unwrap();
    }

    #[tokio::test]
    async fn test_refinement_timeout_message() {
        let (base_url, _closed) = serve_silent().await;
        let previous = GenerationOutput::from_value(
            &ToolType::Followup,
            json!({ "headline": "Old", "content": "Body", "cta": "Go" }),
        )
        .unwrap();

        let err = client(&base_url, Duration::from_millis(200))
            .refine(ToolType::Followup, &previous, "Shorter", acme())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), REFINEMENT_TIMEOUT_MESSAGE);
    }
}
