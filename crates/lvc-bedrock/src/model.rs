use aws_sdk_bedrockruntime::error::DisplayErrorContext;
use aws_sdk_bedrockruntime::types::{
    ContentBlock, ConversationRole, InferenceConfiguration, Message, SystemContentBlock,
};
use lvc_core::provider::BoxFuture;
use tracing::info;

use crate::error::BedrockError;

/// A generative model that completes one prompt. No conversation state.
pub trait ReportModel: Send + Sync {
    /// Identifier recorded on generated reports.
    fn model_id(&self) -> &str;

    fn complete<'a>(
        &'a self,
        system_prompt: &'a str,
        prompt: &'a str,
    ) -> BoxFuture<'a, Result<String, BedrockError>>;
}

/// [`ReportModel`] backed by the Bedrock Converse API.
#[derive(Debug, Clone)]
pub struct BedrockReportModel {
    client: aws_sdk_bedrockruntime::Client,
    model_id: String,
    max_tokens: i32,
}

impl BedrockReportModel {
    /// `model_id` must be an inference profile ID (e.g.
    /// `us.anthropic.claude-sonnet-4-20250514-v1:0`); bare foundation model
    /// IDs are rejected by Converse for on-demand throughput.
    pub fn new(config: &aws_config::SdkConfig, model_id: impl Into<String>, max_tokens: i32) -> Self {
        Self::with_client(aws_sdk_bedrockruntime::Client::new(config), model_id, max_tokens)
    }

    pub fn with_client(
        client: aws_sdk_bedrockruntime::Client,
        model_id: impl Into<String>,
        max_tokens: i32,
    ) -> Self {
        Self {
            client,
            model_id: model_id.into(),
            max_tokens,
        }
    }
}

impl ReportModel for BedrockReportModel {
    fn model_id(&self) -> &str {
        &self.model_id
    }

    fn complete<'a>(
        &'a self,
        system_prompt: &'a str,
        prompt: &'a str,
    ) -> BoxFuture<'a, Result<String, BedrockError>> {
        Box::pin(async move {
            let message = Message::builder()
                .role(ConversationRole::User)
                .content(ContentBlock::Text(prompt.to_string()))
                .build()
                .map_err(|e| BedrockError::Invocation(e.to_string()))?;

            let response = self
                .client
                .converse()
                .model_id(&self.model_id)
                .system(SystemContentBlock::Text(system_prompt.to_string()))
                .messages(message)
                .inference_config(
                    InferenceConfiguration::builder()
                        .max_tokens(self.max_tokens)
                        .build(),
                )
                .send()
                .await
                .map_err(|e| BedrockError::Invocation(DisplayErrorContext(&e).to_string()))?;

            if let Some(usage) = response.usage() {
                info!(
                    model_id = %self.model_id,
                    input_tokens = usage.input_tokens,
                    output_tokens = usage.output_tokens,
                    stop_reason = %response.stop_reason().as_str(),
                    "model call complete"
                );
            }

            let output_message = response
                .output()
                .and_then(|o| o.as_message().ok())
                .ok_or_else(|| BedrockError::ResponseParse("no message in response".to_string()))?;

            let text = output_message
                .content()
                .iter()
                .filter_map(|block| {
                    if let ContentBlock::Text(t) = block {
                        Some(t.as_str())
                    } else {
                        None
                    }
                })
                .collect::<Vec<_>>()
                .join("");

            if text.trim().is_empty() {
                return Err(BedrockError::EmptyResponse);
            }

            Ok(text)
        })
    }
}
