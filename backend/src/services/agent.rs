//! Farm assistant service
//!
//! Each request carries its own conversation, language and sensor readings.
//! The service assembles a system prompt from them, forwards everything to
//! the language model and returns the reply. It keeps no memory.

use serde::{Deserialize, Serialize};
use shared::{
    farm_context_block, validate_conversation, ChatMessage, ChatRole, Language, NpkLevels,
    SensorReading,
};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::external::LlmClient;

/// Assistant request
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub session_id: Option<Uuid>,
    #[serde(default)]
    pub language: Language,
    pub messages: Vec<ChatMessage>,
    #[serde(default)]
    pub sensor_data: Vec<SensorReading>,
}

/// Assistant reply
#[derive(Debug, Clone, Serialize)]
pub struct ChatReply {
    pub session_id: Uuid,
    pub text: String,
}

/// Farm assistant service
#[derive(Clone)]
pub struct AgentService {
    llm: Option<LlmClient>,
}

impl AgentService {
    pub fn new(llm: Option<LlmClient>) -> Self {
        Self { llm }
    }

    pub fn is_configured(&self) -> bool {
        self.llm.is_some()
    }

    pub async fn chat(&self, request: ChatRequest) -> AppResult<ChatReply> {
        validate_conversation(&request.messages).map_err(|message| AppError::Validation {
            field: "messages".to_string(),
            message: message.to_string(),
            message_ur: "پیغام درست نہیں".to_string(),
        })?;

        let llm = self
            .llm
            .as_ref()
            .ok_or_else(|| AppError::Configuration("Language model API key not set".to_string()))?;

        let session_id = request.session_id.unwrap_or_else(Uuid::new_v4);
        let messages = build_conversation(&request);

        tracing::info!(
            session = %session_id,
            language = request.language.code(),
            turns = request.messages.len(),
            readings = request.sensor_data.len(),
            "Assistant request"
        );

        let text = llm.complete(&messages).await?;

        Ok(ChatReply { session_id, text })
    }
}

/// System prompt followed by the caller's conversation. Caller-supplied
/// system messages are dropped so the persona cannot be replaced.
pub fn build_conversation(request: &ChatRequest) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(request.messages.len() + 1);
    messages.push(ChatMessage::system(system_prompt(
        request.language,
        &request.sensor_data,
    )));
    messages.extend(
        request
            .messages
            .iter()
            .filter(|m| m.role != ChatRole::System)
            .cloned(),
    );
    messages
}

pub fn system_prompt(language: Language, readings: &[SensorReading]) -> String {
    let soil_health = NpkLevels::from_readings(readings).classify();
    let context = farm_context_block(readings, &soil_health.to_string())
        .map(|block| format!("\n{}\n", block))
        .unwrap_or_default();

    format!(
        "You are Mali Agent, an AI assistant specializing in agriculture and soil science.
Respond in {language} language.

You have access to real-time sensor data from the farm, which you should reference when answering questions about current conditions.

Focus on providing practical farming advice, crop management techniques, soil health recommendations,
pest control strategies, and sustainable agricultural practices. Consider the local context of farming in Pakistan.
{context}
When discussing soil nutrients:
- Nitrogen (N): Essential for leaf growth and green vegetation
- Phosphorus (P): Important for root development and flowering
- Potassium (K): Helps with overall plant health and disease resistance

For excessive nutrient levels:
- Excessive Nitrogen: Reduce nitrogen fertilizers, plant cover crops that use nitrogen, avoid over-irrigation
- Excessive Phosphorus: Stop phosphorus fertilization, plant cover crops, prevent soil erosion
- Excessive Potassium: Avoid potassium fertilizers, leach soil with irrigation if needed

Be helpful, practical, and provide actionable advice based on the sensor data.
Format your responses in plain text without any markdown or HTML formatting.",
        language = language.display_name(),
        context = context,
    )
}
