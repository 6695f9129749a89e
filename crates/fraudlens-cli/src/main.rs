mod display;
mod session;

use std::process::ExitCode;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use fraudlens_ai::{Analyzer, DEFAULT_BASE_URL, DEFAULT_MODEL, GeminiClient, GeminiConfig};
use fraudlens_core::{Field, FormState, Preset, PredictionStatus};
use tracing::Level;

use display::Style;

#[derive(Parser)]
#[command(
    name = "fraudlens",
    version,
    about = "Ask two AI personas whether a card transaction looks fraudulent"
)]
struct Cli {
    /// Gemini API key.
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true, global = true)]
    api_key: Option<String>,

    /// Gemini model name.
    #[arg(long, env = "GEMINI_MODEL", default_value = DEFAULT_MODEL, global = true)]
    model: String,

    /// Base URL of the Generative Language API.
    #[arg(long, env = "GEMINI_BASE_URL", default_value = DEFAULT_BASE_URL, global = true)]
    base_url: String,

    /// Per-request timeout in seconds (default: wait indefinitely).
    #[arg(long, env = "FRAUDLENS_TIMEOUT", global = true)]
    timeout_secs: Option<u64>,

    /// Disable coloured output.
    #[arg(long, global = true)]
    no_color: bool,

    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Analyze one transaction and print both verdicts.
    Check(CheckArgs),
    /// Interactive form session.
    Form,
    /// List the example transactions.
    Presets,
}

#[derive(Args)]
struct CheckArgs {
    /// Start from an example transaction (normal | fraud).
    #[arg(long)]
    preset: Option<Preset>,

    #[arg(long, allow_hyphen_values = true)]
    v10: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    v12: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    v14: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    v17: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    amount: Option<String>,

    /// Print the result as JSON.
    #[arg(long)]
    json: bool,
}

impl CheckArgs {
    fn overrides(&self) -> impl Iterator<Item = (Field, &str)> {
        [
            (Field::V10, &self.v10),
            (Field::V12, &self.v12),
            (Field::V14, &self.v14),
            (Field::V17, &self.v17),
            (Field::Amount, &self.amount),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.as_deref().map(|v| (field, v)))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
    tracing::info!("fraudlens v{}", env!("CARGO_PKG_VERSION"));

    // The client is built before any command runs: no key, no app.
    let config = GeminiConfig::new(cli.api_key.clone())?
        .with_model(cli.model.clone())
        .with_base_url(cli.base_url.clone())
        .with_timeout(cli.timeout_secs.map(Duration::from_secs));
    let client = GeminiClient::new(config)?;
    tracing::info!(model = client.model(), "gemini client ready");
    let analyzer = Analyzer::new(client);

    let style = Style::detect(cli.no_color);

    match &cli.command {
        Command::Check(args) => run_check(&analyzer, args, style).await,
        Command::Form => {
            session::run(&analyzer, style).await?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Presets => {
            print!("{}", display::render_presets());
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn run_check(
    analyzer: &Analyzer<GeminiClient>,
    args: &CheckArgs,
    style: Style,
) -> anyhow::Result<ExitCode> {
    let mut form = FormState::new();
    if let Some(preset) = args.preset {
        form.load_preset(preset);
    }
    for (field, value) in args.overrides() {
        form.update(field, value);
    }

    let submission = form.begin_submit()?;
    if !args.json {
        eprint!("{}", display::render_status(form.status(), style));
    }

    match analyzer.analyze(&submission.request).await {
        Ok(verdict) => form.complete_success(submission.ticket, verdict),
        Err(e) => form.complete_error(submission.ticket, e.to_string()),
    };

    if args.json {
        println!("{}", check_json(analyzer.generator().model(), &form)?);
    } else {
        println!();
        print!("{}", display::render_form(form.fields(), style));
        println!();
        print!("{}", display::render_status(form.status(), style));
    }

    Ok(match form.status() {
        PredictionStatus::Success(_) => ExitCode::SUCCESS,
        _ => ExitCode::FAILURE,
    })
}

fn check_json(model: &str, form: &FormState) -> anyhow::Result<String> {
    let mut doc = serde_json::json!({
        "analyzedAt": chrono::Utc::now().to_rfc3339(),
        "model": model,
        "request": form.fields(),
        "status": form.status().name(),
    });
    match form.status() {
        PredictionStatus::Success(combined) => doc["result"] = serde_json::to_value(combined)?,
        PredictionStatus::Error(message) => doc["error"] = message.clone().into(),
        _ => {}
    }
    Ok(serde_json::to_string_pretty(&doc)?)
}
