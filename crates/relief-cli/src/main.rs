//! Command-line driver for the video preview controller.
//!
//! Picks a local file, generates a video from a prompt, and optionally saves
//! whatever ends up displayed.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context};
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use relief_client::{GeneratorConfig, HttpVideoGenerator};
use relief_player::{load_local_file, GenerateStatus, GenerationOutcome, VideoSourceController};

const HELP: &str = "\
relief - generate and preview short ambience videos

USAGE:
  relief [OPTIONS]

OPTIONS:
  --pick FILE         Display a local video file first
  --prompt TEXT       Generate a video from TEXT
  --regenerate        Generate again with the same prompt
  --out PATH          Save the displayed video (file or directory)
  -h, --help          Print help

ENVIRONMENT:
  RELIEF_GENERATE_URL       Generation endpoint
  RELIEF_GENERATE_TIMEOUT   Request timeout in seconds
  LOG_FORMAT=json           JSON logs
";

#[derive(Debug, Default, PartialEq)]
struct CliArgs {
    pick: Option<PathBuf>,
    prompt: Option<String>,
    regenerate: bool,
    out: Option<PathBuf>,
}

fn parse_args(mut args: pico_args::Arguments) -> anyhow::Result<Option<CliArgs>> {
    if args.contains(["-h", "--help"]) {
        return Ok(None);
    }

    let parsed = CliArgs {
        pick: args.opt_value_from_str("--pick")?,
        prompt: args.opt_value_from_str("--prompt")?,
        regenerate: args.contains("--regenerate"),
        out: args.opt_value_from_str("--out")?,
    };

    let rest = args.finish();
    if !rest.is_empty() {
        bail!("unexpected arguments: {:?}", rest);
    }
    if parsed.regenerate && parsed.prompt.is_none() {
        bail!("--regenerate needs --prompt");
    }
    Ok(Some(parsed))
}

fn init_tracing() {
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("relief=info,relief_client=info,relief_player=info"));

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_target(true)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }
}

/// Settle the in-flight request and report it. Returns `false` on a notice.
async fn report_generation(ctrl: &mut VideoSourceController, status: GenerateStatus) -> bool {
    if let GenerateStatus::Ignored(reason) = status {
        warn!("Generation not started: {:?}", reason);
        return true;
    }

    match ctrl.settle().await {
        Some(GenerationOutcome::Ready(source)) => {
            info!("Generated video ready at {:?}", source.url());
            true
        }
        Some(GenerationOutcome::Failed(notice)) => {
            error!("{} ({:?})", notice, notice);
            false
        }
        Some(GenerationOutcome::Cancelled) | None => true,
    }
}

async fn run(args: CliArgs) -> anyhow::Result<bool> {
    let config = GeneratorConfig::from_env();
    info!("Generation endpoint: {}", config.endpoint);

    let generator = HttpVideoGenerator::new(config).context("invalid generator config")?;
    let mut ctrl = VideoSourceController::new(Arc::new(generator));
    let mut ok = true;

    if let Some(path) = &args.pick {
        let blob = load_local_file(path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?;
        ctrl.pick_local(Some(blob));
    }

    if let Some(prompt) = &args.prompt {
        let status = ctrl.generate(prompt);
        ok &= report_generation(&mut ctrl, status).await;

        if args.regenerate {
            let status = ctrl.regenerate();
            ok &= report_generation(&mut ctrl, status).await;
        }
    }

    if let Some(out) = &args.out {
        match ctrl.download(out).await {
            Ok(path) => println!("{}", path.display()),
            Err(e) => {
                error!("Download failed: {}", e);
                ok = false;
            }
        }
    }

    info!(phase = %ctrl.phase(), "Final source: {:?}", ctrl.current_source());
    ctrl.dispose();
    Ok(ok)
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let args = match parse_args(pico_args::Arguments::from_env()) {
        Ok(Some(args)) => args,
        Ok(None) => {
            print!("{}", HELP);
            return;
        }
        Err(e) => {
            eprintln!("error: {}\n\n{}", e, HELP);
            std::process::exit(2);
        }
    };

    init_tracing();

    match run(args).await {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            error!("{:#}", e);
            std::process::exit(1);
        }
    }
}
