use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod context;

#[derive(Parser)]
#[command(name = "imgforge")]
#[command(about = "imgforge - passcode-gated AI image generation studio", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Unlock the studio with the configured passcode
    Login,
    /// Lock the studio again
    Logout,
    /// Generate a new image from a text prompt
    Generate {
        /// Text prompt describing the image
        prompt: String,
        /// Output size: auto, 1024x1024, 1536x1024 or 1024x1536
        /// (anything else falls back to auto)
        #[arg(long, default_value = "auto")]
        size: String,
        /// Quality: auto, high, medium or low (anything else falls back to auto)
        #[arg(long, default_value = "auto")]
        quality: String,
        /// Background: auto, transparent or opaque
        #[arg(long, default_value = "auto")]
        background: String,
        /// Content moderation: auto or low
        #[arg(long, default_value = "auto")]
        moderation: String,
        /// Output format: png, jpeg or webp
        #[arg(long, default_value = "png")]
        format: String,
        /// Compression level 1-100 (jpeg/webp only)
        #[arg(long)]
        compression: Option<u8>,
    },
    /// Modify a previously generated image with an edit prompt
    Modify {
        /// Id of the image to modify (prefix match accepted)
        id: String,
        /// Text describing the requested change
        prompt: String,
        /// Output size (same values as generate)
        #[arg(long, default_value = "auto")]
        size: String,
        /// Quality (same values as generate)
        #[arg(long, default_value = "auto")]
        quality: String,
        /// Optional mask image file (png with transparent regions)
        #[arg(long)]
        mask: Option<std::path::PathBuf>,
    },
    /// List the stored image gallery
    List,
    /// Show one image's details and modification history
    Show {
        /// Id of the image (prefix match accepted)
        id: String,
    },
    /// Write an image's content to a file
    Export {
        /// Id of the image (prefix match accepted)
        id: String,
        /// Destination file; defaults to a name derived from the prompt
        path: Option<std::path::PathBuf>,
        /// Export the original image instead of the latest modification
        #[arg(long)]
        original: bool,
    },
    /// Delete one image from the gallery
    Delete {
        /// Id of the image (prefix match accepted)
        id: String,
    },
    /// Delete the entire gallery
    Clear,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Login => commands::auth::login(),
        Commands::Logout => commands::auth::logout(),
        Commands::Generate {
            prompt,
            size,
            quality,
            background,
            moderation,
            format,
            compression,
        } => {
            commands::generate::run(
                &prompt,
                &size,
                &quality,
                &background,
                &moderation,
                &format,
                compression,
            )
            .await
        }
        Commands::Modify {
            id,
            prompt,
            size,
            quality,
            mask,
        } => commands::modify::run(&id, &prompt, &size, &quality, mask.as_deref()).await,
        Commands::List => commands::history::list(),
        Commands::Show { id } => commands::history::show(&id),
        Commands::Export {
            id,
            path,
            original,
        } => commands::history::export(&id, path.as_deref(), original),
        Commands::Delete { id } => commands::history::delete(&id),
        Commands::Clear => commands::history::clear(),
    }
}
