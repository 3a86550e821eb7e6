use std::{env, fs, path::PathBuf, process::Command};

use clap::Parser;
use cli::{Args, Commands};
use folio_config::{
    config::{self, generate_default_config, get_config, Config, CONFIG_PATH},
    error::ConfigError,
};
use folio_core::{
    error::{ErrorContext, FolioError},
    FolioResult,
};
use folio_github::{http_client::configure_http_client, FetchError};
use logging::setup_logging;
use tracing::{debug, warn};
use ureq::{
    http::{HeaderMap, HeaderName, HeaderValue},
    Proxy,
};
use utils::COLOR;

mod cli;
mod events;
mod logging;
mod page;
mod utils;

/// Parses `Name: value` pairs given with `--header`.
fn parse_headers(headers: &[String]) -> FolioResult<HeaderMap> {
    let mut map = HeaderMap::new();
    for header in headers {
        let invalid = || FolioError::Custom(format!("Invalid request header '{header}'"));
        let (key, value) = header.split_once(':').ok_or_else(invalid)?;
        let key: HeaderName = key.trim().parse().map_err(|_| invalid())?;
        let value: HeaderValue = value.trim().parse().map_err(|_| invalid())?;
        map.append(key, value);
    }
    Ok(map)
}

fn setup_http_client(args: &Args, config: &Config) -> FolioResult<()> {
    let proxy = args
        .proxy
        .as_deref()
        .map(Proxy::new)
        .transpose()
        .map_err(FetchError::from)?;
    let headers = args.header.as_deref().map(parse_headers).transpose()?;
    let user_agent = args.user_agent.clone();
    let timeout = config.request_timeout()?;

    configure_http_client(|cfg| {
        if proxy.is_some() {
            cfg.proxy = proxy;
        }
        if user_agent.is_some() {
            cfg.user_agent = user_agent;
        }
        if headers.is_some() {
            cfg.headers = headers;
        }
        cfg.timeout = Some(timeout);
    });
    Ok(())
}

fn set_config_path(path: &str) -> FolioResult<()> {
    let path = PathBuf::from(path);
    let path = if path.is_absolute() {
        path
    } else {
        env::current_dir()
            .with_context(|| "retrieving current directory".into())?
            .join(path)
    };
    debug!("using config file {}", path.display());
    *CONFIG_PATH.write().unwrap() = path;
    Ok(())
}

fn show_config(edit: Option<Option<String>>) -> FolioResult<()> {
    let config_path = CONFIG_PATH.read().unwrap().clone();

    if let Some(editor) = edit {
        let editor = editor
            .or_else(|| env::var("EDITOR").ok())
            .unwrap_or_else(|| "vi".to_string());
        Command::new(&editor)
            .arg(&config_path)
            .status()
            .with_context(|| format!("executing command {} {}", editor, config_path.display()))?;
        return Ok(());
    }

    if let Err(err) = fs::metadata(&config_path) {
        if err.kind() == std::io::ErrorKind::NotFound {
            warn!(
                "Config file {} not found, showing built-in profile",
                config_path.display()
            );
        }
    }

    let content = toml::to_string_pretty(&get_config()).map_err(ConfigError::from)?;
    print!("{content}");
    Ok(())
}

async fn handle_cli() -> FolioResult<()> {
    let args = Args::parse();

    setup_logging(&args);

    if args.no_color {
        let mut color = COLOR.write().unwrap();
        *color = false;
    }

    if let Some(ref c) = args.config {
        set_config_path(c)?;
    }

    match args.command {
        Commands::DefConfig => {
            generate_default_config()?;
        }
        ref command => {
            config::init()?;
            let config = get_config();
            setup_http_client(&args, &config)?;

            match command {
                Commands::Build {
                    output,
                } => page::build_page(&config, output.as_deref()).await?,
                Commands::Repos => page::list_repos(&config, args.json).await?,
                Commands::Config {
                    edit,
                } => show_config(edit.clone())?,
                Commands::DefConfig => unreachable!(),
            }
        }
    }

    Ok(())
}

/// Exit code for errors that must not wait for the runtime to shut down.
///
/// After an interrupt the blocking fetch may still be in flight, and dropping
/// the runtime would wait for it until the request times out.
fn immediate_exit_code(err: &FolioError) -> Option<i32> {
    match err {
        FolioError::Interrupted => Some(130),
        _ => None,
    }
}

#[tokio::main]
async fn main() -> miette::Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .build(),
        )
    }))
    .ok();

    if let Err(err) = handle_cli().await {
        if let Some(code) = immediate_exit_code(&err) {
            eprintln!("{:?}", miette::Report::new(err));
            std::process::exit(code);
        }
        return Err(err.into());
    }
    Ok(())
}
