//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# OmniChat Configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[embedding]
# fallback_timeout_ms = 2000   # 250-30000, assume ready after this long
# poll_interval_ms = 100       # 16-5000, backstop geometry polling
# settle_delay_ms = 50         # 0-2000, delay before the first geometry push
# activation_delay_ms = 100    # 0-2000, delay before creating a surface
# label_prefix = "emb-"

[models]
# chatgpt_url = "https://chatgpt.com"
# claude_url = "https://claude.ai"
# gemini_url = "https://gemini.google.com"

[gemini]
# api_key = ""                 # set with: omnichat config set-api-key <key>
# model = "gemini-2.0-flash"
# temperature = 0.7            # 0.0-2.0
# top_p = 0.95                 # 0.0-1.0
# top_k = 40                   # 1-100
# max_tokens = 4096            # 1-65536

[window]
# title = "OmniChat"
# width = 1280
# height = 800

[layout]
# header_height = 48
# content_inset_top = 32
# gap = 12
# compare_breakpoint = 768     # narrower windows stack compare slots

[logging]
# level = "omnichat=info"      # RUST_LOG overrides this
"##
    .to_string()
}
