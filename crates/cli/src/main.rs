mod commands;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "devtools-web")]
#[command(version, about = "Crawl documents and theme config for the devtools site", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write a site.toml with the default route list
    Init {
        /// Directory to write site.toml into
        path: PathBuf,

        /// Deployed site origin (defaults to the production origin)
        #[arg(long)]
        url: Option<String>,
    },

    /// Validate site configuration and check routes against built pages
    Validate {
        /// Path to site.toml (defaults to ./site.toml, then built-in routes)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Built site directory to compare the route list against
        #[arg(long)]
        pages: Option<PathBuf>,
    },

    /// Prerender robots.txt, sitemap.xml and theme config
    Build {
        /// Path to site.toml (defaults to ./site.toml, then built-in routes)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output directory for generated files
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Serve robots.txt and sitemap.xml over HTTP
    Serve {
        /// Path to site.toml (defaults to ./site.toml, then built-in routes)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Address to bind
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to serve on
        #[arg(short, long, default_value = "8080")]
        port: u16,

        /// Serve other paths from this directory
        #[arg(long = "static")]
        static_dir: Option<PathBuf>,

        /// Re-render when site.toml changes
        #[arg(long)]
        watch: bool,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Init { path, url } => commands::init::run(path, url).await,
        Command::Validate { config, pages } => commands::validate::run(config, pages).await,
        Command::Build { config, output } => commands::build::run(config, output).await,
        Command::Serve {
            config,
            host,
            port,
            static_dir,
            watch,
        } => {
            commands::serve::run(commands::serve::ServeOptions {
                config,
                host,
                port,
                static_dir,
                watch,
            })
            .await
        }
        Command::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "devtools-web", &mut io::stdout());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_serve_defaults() {
        let cli = Cli::parse_from(["devtools-web", "serve"]);
        match cli.command {
            Command::Serve {
                config,
                host,
                port,
                static_dir,
                watch,
            } => {
                assert!(config.is_none());
                assert_eq!(host, "127.0.0.1");
                assert_eq!(port, 8080);
                assert!(static_dir.is_none());
                assert!(!watch);
            }
            _ => panic!("expected serve"),
        }
    }
}
