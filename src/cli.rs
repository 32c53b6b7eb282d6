use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "outline-quiz")]
#[command(author, version, about = "Telegram bot that quizzes you on your Outline documents", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Run the webhook server (default)
    Serve {
        /// Port to listen on, overrides PORT
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Build one question and print the formatted message without sending it
    Preview {
        /// Document id; a random document of the collection when omitted
        #[arg(short, long)]
        document: Option<String>,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand() {
        let cli = Cli::try_parse_from(["outline-quiz"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_serve_with_port() {
        let cli = Cli::try_parse_from(["outline-quiz", "serve", "--port", "9000"]).unwrap();
        assert_eq!(cli.command, Some(Commands::Serve { port: Some(9000) }));
    }

    #[test]
    fn test_preview_with_document() {
        let cli = Cli::try_parse_from(["outline-quiz", "preview", "-d", "doc-1"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Commands::Preview {
                document: Some("doc-1".to_string())
            })
        );
    }

    #[test]
    fn test_invalid_port_rejected() {
        assert!(Cli::try_parse_from(["outline-quiz", "serve", "--port", "http"]).is_err());
    }
}
