//! Conversation state and prompt assembly.

use serde::Deserialize;

/// Default system prompt for the pricing assistant.
pub const SYSTEM_PROMPT: &str = "\
You are an AI assistant specialized in insurance pricing and actuarial analysis.
You help users understand:
- Insurance product pricing methodologies
- Actuarial concepts and calculations
- Risk assessment and underwriting
- Data analysis and statistical modeling
- Regulatory compliance in insurance
- Product feature analysis and pricing strategies

You should provide clear, accurate explanations, help interpret pricing data
and trends, explain complex statistical concepts in accessible terms, and
always recommend consulting with qualified actuaries for critical decisions.
Keep responses concise but comprehensive, and use examples when helpful.";

/// Who said a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Assistant,
}

/// One message in the conversation.
#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

/// Dashboard state the caller can attach to a chat turn.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContextData {
    /// Brochures uploaded so far.
    #[serde(default)]
    pub uploaded_files: Vec<String>,

    /// Short description of available analysis results.
    #[serde(default)]
    pub analysis_results: Option<String>,

    /// Which step of the workflow the user is on.
    #[serde(default)]
    pub current_step: Option<String>,
}

impl ContextData {
    fn is_empty(&self) -> bool {
        self.uploaded_files.is_empty()
            && self.analysis_results.is_none()
            && self.current_step.is_none()
    }
}

/// Bounded conversation history.
#[derive(Debug)]
pub struct ChatSession {
    history: Vec<ChatMessage>,
    limit: usize,
}

impl ChatSession {
    pub fn new(limit: usize) -> Self {
        Self {
            history: Vec::new(),
            limit,
        }
    }

    pub fn push_user(&mut self, content: &str) {
        self.push(ChatRole::User, content);
    }

    pub fn push_assistant(&mut self, content: &str) {
        self.push(ChatRole::Assistant, content);
    }

    fn push(&mut self, role: ChatRole, content: &str) {
        self.history.push(ChatMessage {
            role,
            content: content.to_string(),
        });
        // Keep only the newest messages to bound prompt context.
        if self.history.len() > self.limit {
            let excess = self.history.len() - self.limit;
            self.history.drain(..excess);
        }
    }

    pub fn reset(&mut self) {
        self.history.clear();
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Full prompt for one turn: system prompt, the user question, and any
    /// dashboard context the caller attached.
    pub fn build_prompt(
        &self,
        system_prompt: &str,
        message: &str,
        context: Option<&ContextData>,
    ) -> String {
        let mut prompt = format!("{system_prompt}\n\nUser question: {message}");

        if let Some(context) = context.filter(|c| !c.is_empty()) {
            prompt.push_str("\n\nCurrent context:\n");
            if !context.uploaded_files.is_empty() {
                prompt.push_str(&format!(
                    "Uploaded files: {}\n",
                    context.uploaded_files.join(", ")
                ));
            }
            if let Some(results) = &context.analysis_results {
                prompt.push_str(&format!("Analysis results available: {results}\n"));
            }
            if let Some(step) = &context.current_step {
                prompt.push_str(&format!("Current analysis step: {step}\n"));
            }
        }

        prompt
    }

    /// Short description of the conversation so far.
    pub fn summary(&self) -> String {
        if self.history.is_empty() {
            return "No conversation history available.".to_string();
        }
        let user_messages: Vec<&str> = self
            .history
            .iter()
            .filter(|m| m.role == ChatRole::User)
            .map(|m| m.content.as_str())
            .collect();
        let topics = user_messages
            .iter()
            .take(3)
            .copied()
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "Conversation has {} user messages covering topics like: {}",
            user_messages.len(),
            topics
        )
    }
}
