//! Subcommands that run without opening a window.

use std::io::Write;

use omnichat_ai::{AiClient, ChatHistory, GeminiClient, Message};
use omnichat_common::OmniError;
use omnichat_config::OmniChatConfig;
use omnichat_layout::ModelTab;

use crate::cli::ConfigAction;
use crate::convert::gemini_client_config;

/// Send `prompt` to Gemini, continuing the newest API chat session, and
/// stream the answer to stdout.
pub fn ask(config: &OmniChatConfig, prompt: &str) -> Result<(), OmniError> {
    if !config.gemini.has_api_key() {
        return Err(OmniError::Ai(
            "no Gemini API key configured; run `omnichat config set-api-key <key>`".into(),
        ));
    }
    let client = GeminiClient::new(gemini_client_config(&config.gemini))
        .map_err(|e| OmniError::Ai(e.to_string()))?;

    let path = ChatHistory::default_path()
        .ok_or_else(|| OmniError::Other("could not determine data directory".into()))?;
    let mut history = ChatHistory::load(path);
    let mut messages = history
        .resume_latest(ModelTab::GeminiApi.slug())
        .map_err(|e| OmniError::Ai(e.to_string()))?
        .messages
        .clone();
    messages.push(Message::user(prompt));

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    tracing::debug!(history = messages.len(), model = %client.model(), "asking Gemini");
    let response = runtime
        .block_on(client.send_message_streaming(
            &messages,
            Box::new(|chunk| {
                let mut stdout = std::io::stdout().lock();
                let _ = stdout.write_all(chunk.as_bytes());
                let _ = stdout.flush();
            }),
        ))
        .map_err(|e| OmniError::Ai(e.to_string()))?;
    println!();

    messages.push(Message::assistant(response.content));
    history
        .update_current_messages(messages)
        .map_err(|e| OmniError::Ai(e.to_string()))?;
    tracing::debug!(
        input_tokens = response.usage.input_tokens,
        output_tokens = response.usage.output_tokens,
        "response stored"
    );
    Ok(())
}

pub fn config(mut config: OmniChatConfig, action: ConfigAction) -> Result<(), OmniError> {
    match action {
        ConfigAction::SetApiKey { key } => {
            config.gemini.api_key = key.trim().to_string();
            omnichat_config::save_config(&config)?;
            println!("Gemini API key saved.");
        }
        ConfigAction::Show => println!("{}", omnichat_config::config_to_json(&config)),
    }
    Ok(())
}
