use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use quickthumb::api::ThumbApi;
use quickthumb::callback::{self, CallbackFlow, CallbackStep};
use quickthumb::generate::{self, AspectRatio, FormError, GenerateForm, ImageAttachment};
use quickthumb::pricing::{self, TIERS};
use quickthumb::{ApiError, ClientConfig, ConfigError, HttpApi, Route, SessionContext, login};
use serde::Serialize;
use serde_json::json;
use tracing_subscriber::EnvFilter;


#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("invalid input: {0}")]
    Form(#[from] FormError),
    #[error("not signed in; run `quickthumb callback` or pass --session-token")]
    NotSignedIn,
    #[error("no session_id found in `{0}`")]
    NoSessionMarker(String),
    #[error("cannot tell the image type of {0}; use .png, .jpg, .webp or .gif")]
    UnknownImageType(String),
    #[error("unknown pricing tier `{0}`")]
    UnknownTier(String),
    #[error("{path}: {source}")]
    Io { path: String, source: std::io::Error },
    #[error("image download failed: {0}")]
    Download(#[from] reqwest::Error),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "quickthumb", about = "QuickThumb API command line client")]
struct Cli {
    /// Backend base URL. Defaults to `QUICKTHUMB_API_URL`.
    #[arg(long)]
    api_url: Option<String>,

    #[arg(long, env = "QUICKTHUMB_SESSION_TOKEN", hide_env_values = true)]
    session_token: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check that the backend is reachable.
    Ping,
    /// Print the identity-provider login URL.
    LoginUrl {
        /// Callback URL to hand to the provider. Defaults to `<app_url>/auth/callback`.
        #[arg(long)]
        redirect: Option<String>,
    },
    /// Exchange the `session_id` from a callback URL for a session token.
    Callback {
        /// Full callback URL or bare fragment (`session_id=...`).
        url: String,
    },
    /// Show the signed-in user.
    Me,
    Logout,
    Generate {
        #[arg(long)]
        description: String,
        #[arg(long)]
        style: Option<String>,
        #[arg(long, value_parser = parse_aspect_ratio)]
        aspect_ratio: Option<AspectRatio>,
        /// Reference image; repeat for more.
        #[arg(long = "image")]
        images: Vec<PathBuf>,
        /// Write the generated image here.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// List past generations.
    History,
    /// List pricing tiers.
    Pricing,
    /// Start a checkout and print the payment URL.
    Checkout {
        #[arg(long, default_value = "credits_50")]
        pack: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let dotenv = dotenvy::dotenv();
    init_tracing();
    if let Err(err) = dotenv
        && !err.not_found()
    {
        tracing::warn!(error = %err, "failed to load .env");
    }

    let cli = Cli::parse();
    let config = resolve_config(ClientConfig::from_env()?, cli.api_url.as_deref());

    let mut api = HttpApi::new(&config)?;
    if let Some(token) = cli.session_token {
        api = api.with_session_token(token);
    }
    run(&config, &api, cli.command).await
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();
}

fn resolve_config(mut config: ClientConfig, api_url: Option<&str>) -> ClientConfig {
    if let Some(url) = api_url {
        config.api_url = url.trim_end_matches('/').to_owned();
    }
    config
}

fn parse_aspect_ratio(raw: &str) -> Result<AspectRatio, String> {
    AspectRatio::from_label(raw).ok_or_else(|| {
        let allowed: Vec<&str> = AspectRatio::ALL.iter().map(|r| r.label()).collect();
        format!("expected one of {}", allowed.join(", "))
    })
}

fn login_url_for(config: &ClientConfig, redirect: Option<&str>) -> Result<String, CliError> {
    let url = match redirect {
        Some(callback) => login::login_url(&config.auth_url, callback),
        None => config.login_url(),
    };
    Ok(url.map_err(ApiError::from)?.into())
}

async fn run(config: &ClientConfig, api: &HttpApi, command: Command) -> Result<(), CliError> {
    match command {
        Command::LoginUrl { redirect } => {
            println!("{}", login_url_for(config, redirect.as_deref())?);
            Ok(())
        }
        Command::Pricing => print_json(&TIERS),
        Command::Ping => {
            api.health().await?;
            print_json(&json!({ "status": "ok", "api_url": api.base_url() }))
        }
        Command::Callback { url } => run_callback(api, &url).await,
        Command::Me => {
            let user = api.current_user().await?.ok_or(CliError::NotSignedIn)?;
            print_json(&user)
        }
        Command::Logout => {
            let mut session = SessionContext::default();
            session.logout(api).await?;
            print_json(&json!({ "ok": true }))
        }
        Command::Generate { description, style, aspect_ratio, images, out } => {
            let form = build_form(description, style, aspect_ratio, &images)?;
            run_generate(api, &form, out.as_deref()).await
        }
        Command::History => print_json(&api.thumbnails().await?),
        Command::Checkout { pack } => {
            let tier = pricing::find_tier(&pack).ok_or(CliError::UnknownTier(pack))?;
            let url = pricing::start_checkout(api, tier).await?;
            print_json(&json!({ "url": url.as_str() }))
        }
    }
}

async fn run_callback(api: &HttpApi, input: &str) -> Result<(), CliError> {
    let mut flow = CallbackFlow::default();
    let mut session = SessionContext::default();

    let CallbackStep::Exchange(session_id) = flow.begin(callback::fragment_of(input)) else {
        return Err(CliError::NoSessionMarker(input.to_owned()));
    };
    let data = api.exchange_session(session_id).await?;
    let route = flow.complete(Ok(data), &mut session);

    print_json(&json!({
        "user": session.user(),
        "session_token": api.session_token(),
        "next": route.unwrap_or(Route::Home).path(),
    }))
}

fn build_form(
    description: String,
    style: Option<String>,
    aspect_ratio: Option<AspectRatio>,
    images: &[PathBuf],
) -> Result<GenerateForm, CliError> {
    let mut form = GenerateForm { description, style, aspect_ratio, images: Vec::new() };
    for path in images {
        form.attach(read_image(path)?)?;
    }
    Ok(form)
}

fn read_image(path: &Path) -> Result<ImageAttachment, CliError> {
    let display = path.display().to_string();
    let mime = generate::mime_for_path(&display).ok_or_else(|| CliError::UnknownImageType(display.clone()))?;
    let bytes = fs::read(path).map_err(|source| CliError::Io { path: display.clone(), source })?;
    let name = path.file_name().map_or_else(|| display.clone(), |n| n.to_string_lossy().into_owned());
    Ok(ImageAttachment::new(name, mime, bytes)?)
}

async fn run_generate(api: &HttpApi, form: &GenerateForm, out: Option<&Path>) -> Result<(), CliError> {
    let request = form.to_request()?;
    let response = api.generate(&request).await?;

    if let Some(path) = out {
        let bytes = image_bytes(&response.image).await?;
        fs::write(path, &bytes).map_err(|source| CliError::Io { path: path.display().to_string(), source })?;
        tracing::info!(path = %path.display(), bytes = bytes.len(), "image written");
    }

    let image = if out.is_some() { None } else { Some(response.image.as_str()) };
    print_json(&json!({
        "credits": response.credits,
        "out": out.map(|p| p.display().to_string()),
        "image": image,
    }))
}

/// Generated images come back as data URLs or as links to a CDN.
async fn image_bytes(image: &str) -> Result<Vec<u8>, CliError> {
    if image.starts_with("data:") {
        return Ok(generate::decode_data_url(image)?.bytes);
    }
    let response = reqwest::get(image).await?.error_for_status()?;
    Ok(response.bytes().await?.to_vec())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
