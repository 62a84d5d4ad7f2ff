//! Subcommand definitions.

use clap::Subcommand;

/// Available subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Print the device dictionary as JSON
    Device,

    /// Print the app dictionary as JSON
    App,

    /// Print the MD5 digest of a string
    Hash {
        /// String to hash
        input: String,
    },

    /// Send the open payload to the API
    Open {
        /// URL prefix of the API, e.g. https://api.example.com/v1
        #[arg(long = "url-prefix", env = "LOOPY_URL_PREFIX")]
        url_prefix: Option<String>,

        /// Application key sent with the request
        #[arg(long = "api-key", env = "LOOPY_API_KEY")]
        api_key: Option<String>,

        /// Retry attempts for 5xx and network errors
        #[arg(long, default_value_t = 0)]
        retries: u8,

        /// Print the payload instead of sending it
        #[arg(long = "dry-run")]
        dry_run: bool,
    },

    /// Issue a new advertising identifier
    ResetAdId,
}

#[cfg(test)]
mod tests {
    use crate::parser::Cli;
    use clap::Parser;

    use super::*;

    #[test]
    fn test_hash_command() {
        let cli = Cli::try_parse_from(["loopy", "hash", "hello"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Hash { input }) if input == "hello"));
    }

    #[test]
    fn test_open_command() {
        let cli = Cli::try_parse_from([
            "loopy",
            "open",
            "--url-prefix",
            "http://localhost:8080/v1",
            "--retries",
            "2",
            "--dry-run",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Open {
                url_prefix,
                retries,
                dry_run,
                ..
            }) => {
                assert_eq!(url_prefix.as_deref(), Some("http://localhost:8080/v1"));
                assert_eq!(retries, 2);
                assert!(dry_run);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_reset_ad_id_command() {
        let cli = Cli::try_parse_from(["loopy", "reset-ad-id"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::ResetAdId)));
    }
}
