//! Config sections mapped onto the runtime types of the library crates.

use std::time::Duration;

use omnichat_config::{EmbeddingConfig, GeminiConfig, LayoutConfig, ModelsConfig};
use omnichat_layout::LayoutEngine;
use omnichat_webview::{EmbedOptions, ModelUrls};

pub fn embed_options(embedding: &EmbeddingConfig, models: &ModelsConfig) -> EmbedOptions {
    EmbedOptions {
        fallback_timeout: millis(embedding.fallback_timeout_ms),
        poll_interval: millis(embedding.poll_interval_ms),
        settle_delay: millis(embedding.settle_delay_ms),
        activation_delay: millis(embedding.activation_delay_ms),
        label_prefix: embedding.label_prefix.clone(),
        urls: ModelUrls {
            chatgpt: models.chatgpt_url.clone(),
            claude: models.claude_url.clone(),
            gemini: models.gemini_url.clone(),
        },
    }
}

pub fn layout_engine(layout: &LayoutConfig) -> LayoutEngine {
    LayoutEngine {
        header_height: f64::from(layout.header_height),
        content_inset_top: f64::from(layout.content_inset_top),
        gap: f64::from(layout.gap),
        compare_breakpoint: f64::from(layout.compare_breakpoint),
    }
}

pub fn gemini_client_config(gemini: &GeminiConfig) -> omnichat_ai::GeminiConfig {
    omnichat_ai::GeminiConfig::new(&gemini.api_key)
        .with_model(&gemini.model)
        .with_sampling(omnichat_ai::Sampling {
            max_output_tokens: gemini.max_tokens,
            temperature: gemini.temperature,
            top_p: gemini.top_p,
            top_k: gemini.top_k,
        })
}

fn millis(ms: u32) -> Duration {
    Duration::from_millis(u64::from(ms))
}

#[cfg(test)]
mod tests {
    use super::*;
    use omnichat_config::OmniChatConfig;

    #[test]
    fn default_config_matches_library_defaults() {
        let config = OmniChatConfig::default();
        let options = embed_options(&config.embedding, &config.models);
        let defaults = EmbedOptions::default();

        assert_eq!(options.fallback_timeout, defaults.fallback_timeout);
        assert_eq!(options.poll_interval, defaults.poll_interval);
        assert_eq!(options.settle_delay, defaults.settle_delay);
        assert_eq!(options.activation_delay, defaults.activation_delay);
        assert_eq!(options.label_prefix, defaults.label_prefix);
        assert_eq!(options.urls, defaults.urls);
        assert_eq!(layout_engine(&config.layout), LayoutEngine::default());
    }

    #[test]
    fn embedding_overrides_carry_through() {
        let embedding = EmbeddingConfig {
            fallback_timeout_ms: 500,
            label_prefix: "x-".into(),
            ..Default::default()
        };
        let options = embed_options(&embedding, &ModelsConfig::default());
        assert_eq!(options.fallback_timeout, Duration::from_millis(500));
        assert_eq!(options.label_prefix, "x-");
    }

    #[test]
    fn gemini_settings_carry_through() {
        let gemini = GeminiConfig {
            api_key: " key ".into(),
            model: "gemini-1.5-pro".into(),
            top_k: 8,
            ..Default::default()
        };
        let client = gemini_client_config(&gemini);
        assert_eq!(client.api_key, "key");
        assert_eq!(client.model, "gemini-1.5-pro");
        assert_eq!(client.sampling.top_k, 8);
        assert_eq!(client.sampling.max_output_tokens, 4096);
    }
}
