//! Full configuration validation.
//!
//! Each section has its own validator; [`validate`] collects every error
//! into a single `ConfigError`, and [`sanitize`] resets the sections that
//! fail back to their defaults.

mod helpers;


use omnichat_common::ConfigError;

use crate::schema::{
    EmbeddingConfig, GeminiConfig, LayoutConfig, LoggingConfig, ModelsConfig, OmniChatConfig,
    WindowConfig,
};
use helpers::{validate_range, validate_range_f64, validate_url};

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &OmniChatConfig) -> Result<(), ConfigError> {
    let mut errors = Vec::new();
    validate_embedding(&mut errors, &config.embedding);
    validate_models(&mut errors, &config.models);
    validate_gemini(&mut errors, &config.gemini);
    validate_window(&mut errors, &config.window);
    validate_layout(&mut errors, &config.layout);
    validate_logging(&mut errors, &config.logging);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

/// Reset every invalid section to its default. Returns the problems found.
pub fn sanitize(config: &mut OmniChatConfig) -> Vec<String> {
    let mut problems = Vec::new();
    reset_if_invalid(&mut problems, &mut config.embedding, validate_embedding);
    reset_if_invalid(&mut problems, &mut config.models, validate_models);
    reset_if_invalid(&mut problems, &mut config.gemini, validate_gemini);
    reset_if_invalid(&mut problems, &mut config.window, validate_window);
    reset_if_invalid(&mut problems, &mut config.layout, validate_layout);
    reset_if_invalid(&mut problems, &mut config.logging, validate_logging);
    problems
}

fn reset_if_invalid<T: Default>(
    problems: &mut Vec<String>,
    section: &mut T,
    check: fn(&mut Vec<String>, &T),
) {
    let mut errors = Vec::new();
    check(&mut errors, section);
    if !errors.is_empty() {
        *section = T::default();
        problems.extend(errors);
    }
}

fn validate_embedding(errors: &mut Vec<String>, c: &EmbeddingConfig) {
    validate_range(errors, "embedding.fallback_timeout_ms", c.fallback_timeout_ms, 250, 30_000);
    validate_range(errors, "embedding.poll_interval_ms", c.poll_interval_ms, 16, 5_000);
    validate_range(errors, "embedding.settle_delay_ms", c.settle_delay_ms, 0, 2_000);
    validate_range(errors, "embedding.activation_delay_ms", c.activation_delay_ms, 0, 2_000);
    if c.label_prefix.trim().is_empty() {
        errors.push("embedding.label_prefix must not be empty".into());
    }
}

fn validate_models(errors: &mut Vec<String>, c: &ModelsConfig) {
    validate_url(errors, "models.chatgpt_url", &c.chatgpt_url);
    validate_url(errors, "models.claude_url", &c.claude_url);
    validate_url(errors, "models.gemini_url", &c.gemini_url);
}

fn validate_gemini(errors: &mut Vec<String>, c: &GeminiConfig) {
    if c.model.trim().is_empty() {
        errors.push("gemini.model must not be empty".into());
    }
    validate_range_f64(errors, "gemini.temperature", c.temperature, 0.0, 2.0);
    validate_range_f64(errors, "gemini.top_p", c.top_p, 0.0, 1.0);
    validate_range(errors, "gemini.top_k", c.top_k, 1, 100);
    validate_range(errors, "gemini.max_tokens", c.max_tokens, 1, 65_536);
}

fn validate_window(errors: &mut Vec<String>, c: &WindowConfig) {
    validate_range(errors, "window.width", c.width, 400, 7_680);
    validate_range(errors, "window.height", c.height, 300, 4_320);
}

fn validate_layout(errors: &mut Vec<String>, c: &LayoutConfig) {
    validate_range(errors, "layout.header_height", c.header_height, 0, 200);
    validate_range(errors, "layout.content_inset_top", c.content_inset_top, 0, 200);
    validate_range(errors, "layout.gap", c.gap, 0, 100);
    validate_range(errors, "layout.compare_breakpoint", c.compare_breakpoint, 0, 4_000);
}

fn validate_logging(errors: &mut Vec<String>, c: &LoggingConfig) {
    if c.level.trim().is_empty() {
        errors.push("logging.level must not be empty".into());
    }
}
