use clap::{Parser, Subcommand};

/// OmniChat - ChatGPT, Claude and Gemini side by side in one window.
#[derive(Parser, Debug)]
#[command(name = "omnichat", version, about)]
pub struct Args {
    /// Log level override (e.g. "omnichat=debug").
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Ask Gemini directly, continuing the latest API chat.
    Ask {
        /// The prompt. Multiple words are joined with spaces.
        #[arg(required = true)]
        prompt: Vec<String>,
    },
    /// Inspect or change the configuration.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Store the Gemini API key in config.toml.
    SetApiKey { key: String },
    /// Print the effective configuration (API key masked).
    Show,
}

pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_launches_gui() {
        let args = Args::try_parse_from(["omnichat"]).unwrap();
        assert!(args.command.is_none());
        assert!(args.log_level.is_none());
    }

    #[test]
    fn ask_joins_words() {
        let args = Args::try_parse_from(["omnichat", "ask", "what", "is", "rust"]).unwrap();
        match args.command {
            Some(Command::Ask { prompt }) => assert_eq!(prompt.join(" "), "what is rust"),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn ask_requires_a_prompt() {
        assert!(Args::try_parse_from(["omnichat", "ask"]).is_err());
    }

    #[test]
    fn config_set_api_key() {
        let args =
            Args::try_parse_from(["omnichat", "--log-level", "debug", "config", "set-api-key", "k"])
                .unwrap();
        assert_eq!(args.log_level.as_deref(), Some("debug"));
        assert!(matches!(
            args.command,
            Some(Command::Config {
                action: ConfigAction::SetApiKey { ref key }
            }) if key == "k"
        ));
    }
}
