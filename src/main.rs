use clap::Parser;
use colored::*;
use flux_playground::{
    logger::{self, LogLevel, LoggerConfig},
    playground::{render, ViewState},
    AspectRatio, PlaygroundClient, PlaygroundConfig, PlaygroundError, TaskStatus,
};
use futures::StreamExt;
use std::io::Write;
use std::process::ExitCode;
use std::time::Duration;

const FRAME_INTERVAL: Duration = Duration::from_millis(300);

#[derive(Parser, Debug)]
#[command(name = "flux-playground", version, about = "Generate an image and wait for it")]
struct Cli {
    /// Text prompt describing the image.
    #[arg(short, long, required_unless_present = "list_models")]
    prompt: Option<String>,

    /// Model id or display name (defaults to the first catalog entry).
    #[arg(short, long)]
    model: Option<String>,

    /// Aspect ratio, one of 1:1, 16:9, 9:16, 3:2, 2:3.
    #[arg(short, long, default_value = "1:1")]
    ratio: String,

    /// Keep the generated image out of the public gallery.
    #[arg(long)]
    private: bool,

    #[arg(long)]
    locale: Option<String>,

    /// Overrides FLUX_BASE_URL.
    #[arg(long)]
    base_url: Option<String>,

    /// Overrides FLUX_API_TOKEN.
    #[arg(long)]
    token: Option<String>,

    /// Print the selectable models and aspect ratios, then exit.
    #[arg(long)]
    list_models: bool,

    /// Print the settled task as JSON instead of a summary.
    #[arg(long)]
    json: bool,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e.to_string().red().bold());
            ExitCode::FAILURE
        }
    }
}

fn draw_frame(tick: &mut usize) {
    eprint!("\r{}", render(&ViewState::Busy, *tick).cyan());
    let _ = std::io::stderr().flush();
    *tick += 1;
}

/// Every failure is returned, `main` prints it once.
async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let dotenv_loaded = dotenv::dotenv().is_ok();
    let cli = Cli::parse();

    logger::init_with_config(LoggerConfig::new().with_level(LogLevel::Warn.lowered(cli.verbose)))?;
    if !dotenv_loaded {
        log::debug!("No .env file found, using process environment");
    }

    let mut config = PlaygroundConfig::from_env();
    if let Some(base_url) = cli.base_url.clone() {
        config = config.with_base_url(base_url);
    }
    if let Some(token) = cli.token.clone() {
        config = config.with_token(token);
    }
    if let Some(locale) = cli.locale.clone() {
        config = config.with_locale(locale);
    }
    logger::log_config_info(&config);

    let client = PlaygroundClient::new(config)?;

    if cli.list_models {
        for model in client.models() {
            println!("{}  {}  {}", model.id.bold(), model.name, model.description.dimmed());
        }
        let ratios: Vec<&str> = AspectRatio::ALL.iter().map(|r| r.as_str()).collect();
        println!("ratios: {}", ratios.join(", "));
        return Ok(());
    }

    let mut session = client.playground();
    session.set_prompt(cli.prompt.clone().unwrap_or_default());
    session.set_aspect_ratio(cli.ratio.parse::<AspectRatio>()?);
    session.set_public(!cli.private);
    if let Some(model) = &cli.model {
        session.set_model(model)?;
    }

    let _timer = logger::timer("Generation");

    let submitter = client.submitter().clone();
    let mut frames = tokio::time::interval(FRAME_INTERVAL);
    let mut tick = 0usize;

    let notice = {
        let submit = session.submit();
        tokio::pin!(submit);
        loop {
            tokio::select! {
                notice = &mut submit => break notice,
                _ = frames.tick() => {
                    if submitter.is_in_flight() {
                        draw_frame(&mut tick);
                    }
                }
            }
        }
    };
    if let Some(notice) = notice {
        if tick > 0 {
            eprintln!();
        }
        return Err(notice.message.into());
    }
    log::info!("Task {} submitted", session.flux_id());

    let mut stream = session.watch();
    loop {
        tokio::select! {
            observation = stream.next() => match observation {
                Some(observation) => session.observe(observation),
                None => break,
            },
            _ = frames.tick() => {
                if session.view() == ViewState::Busy {
                    draw_frame(&mut tick);
                }
            }
        }
    }
    eprintln!();

    let task = match session.task() {
        Some(task) if task.task_status.is_terminal() => task.clone(),
        _ => {
            let notice = PlaygroundError::ResponseError("task did not settle".into()).notice();
            return Err(notice.message.into());
        }
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&task)?);
    } else {
        println!("{}", render(&session.view(), 0));
    }

    match task.task_status {
        TaskStatus::Succeeded => Ok(()),
        status => Err(PlaygroundError::TaskFailed {
            id: task.id,
            status: status.to_string(),
        }
        .into()),
    }
}
