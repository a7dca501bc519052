use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use media_compress::compression::{menu, output_path};
use media_compress::{
    create_router, AppState, CompressError, CompressionCommand, CompressionMethod, CompressionOutcome,
    CompressionSession, Config, DirectoryLibrary, FfmpegTool, MediaKind, MediaTool,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "media-compress", version, about = "Compress images, video, and audio with ffmpeg")]
struct Args {
    /// Config file (extension optional)
    #[arg(short, long, default_value = "config/media-compress")]
    config: String,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compress a file and save the result
    Compress {
        path: PathBuf,

        #[arg(short, long)]
        method: CompressionMethod,

        /// Expected media kind (inferred from the extension otherwise)
        #[arg(short, long)]
        kind: Option<MediaKind>,
    },
    /// Print the ffmpeg command without running it
    Command {
        path: PathBuf,

        #[arg(short, long)]
        method: CompressionMethod,
    },
    /// List the compression methods offered for a media kind
    Menu { kind: MediaKind },
    /// Check that ffmpeg can be executed
    Check,
    /// Serve the HTTP control API
    Serve,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    let cfg = Config::load(&args.config)?;
    info!("Loaded config: {}", cfg.service.name);

    match args.command {
        Command::Compress { path, method, kind } => compress(&cfg, path, method, kind).await,
        Command::Command { path, method } => {
            let kind = MediaKind::from_path(&path)
                .with_context(|| format!("Unsupported media file: {}", path.display()))?;
            let output = output_path(cfg.cache_dir(), kind, method)?;
            let command = CompressionCommand::build(kind, method, &path, output)?;
            println!(
                "{} {}",
                cfg.ffmpeg_binary().display(),
                command.display()
            );
            Ok(())
        }
        Command::Menu { kind } => {
            for method in menu(kind, cfg.compression.menu) {
                println!("{:<16} {}", method.slug(), method.label());
            }
            Ok(())
        }
        Command::Check => {
            let tool = FfmpegTool::new(cfg.ffmpeg_binary());
            let version = tool.version().await?;
            println!("{}", version);
            Ok(())
        }
        Command::Serve => serve(cfg).await,
    }
}

fn build_session(cfg: &Config) -> CompressionSession {
    CompressionSession::new(
        cfg.session_config(),
        Arc::new(FfmpegTool::new(cfg.ffmpeg_binary())),
        Arc::new(DirectoryLibrary::new(cfg.library_dir())),
    )
}

async fn compress(
    cfg: &Config,
    path: PathBuf,
    method: CompressionMethod,
    kind: Option<MediaKind>,
) -> Result<()> {
    let session = build_session(cfg);

    let outcome: Result<CompressionOutcome, CompressError> = async {
        session.pick(&path, kind).await?;
        session.choose_method(method).await?;
        session.compress_now().await
    }
    .await;

    match outcome {
        Ok(CompressionOutcome::Saved { asset, report }) => {
            println!("Media saved to {} ({})", asset.path.display(), asset.collection);
            println!(
                "{} -> {} bytes ({:.1}%)",
                report.input_bytes,
                report.output_bytes,
                report.ratio * 100.0
            );
            Ok(())
        }
        Ok(CompressionOutcome::Recordings { recordings, .. }) => {
            for recording in recordings {
                println!("{}: {}", recording.name, recording.path.display());
            }
            Ok(())
        }
        Err(e) => {
            error!("{}", e);
            Err(e.into())
        }
    }
}

async fn serve(cfg: Config) -> Result<()> {
    let state = AppState::new(build_session(&cfg));
    let app = create_router(state);

    let addr = format!("{}:{}", cfg.service.http.bind, cfg.service.http.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("HTTP server listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
