//! Handlers behind each CLI subcommand.

use anyhow::{Context, Result, bail};
use dialoguer::Confirm;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Write;
use std::time::Duration;

use crate::cli::{App, Command, ConfigCmd, ImagesCmd, KeysCmd};
use crate::client::Client;
use crate::config::{self, ConfigStore};
use crate::models::{ApiKey, Image};
use crate::util::validate_api_url;

/// Per-invocation values that take precedence over the stored config.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub api_url: Option<String>,
    pub api_key: Option<String>,
}

pub fn run(app: App, out: &mut impl Write) -> Result<()> {
    let overrides = Overrides {
        api_url: app.api_url,
        api_key: app.api_key,
    };

    match app.command {
        Command::Config(cmd) => {
            reject_overrides(&overrides)?;
            run_config(cmd, out)
        }
        Command::Images(cmd) => run_images(cmd, &overrides, out),
        Command::Keys(cmd) => run_keys(cmd, &overrides, out),
    }
}

/// `config` reads and writes the stored file; per-invocation overrides would be ignored.
fn reject_overrides(overrides: &Overrides) -> Result<()> {
    if overrides.api_url.is_some() || overrides.api_key.is_some() {
        bail!(
            "--api-url/--api-key only apply to images and keys commands; use 'config set' to change stored values"
        );
    }
    Ok(())
}

fn run_config(cmd: ConfigCmd, out: &mut impl Write) -> Result<()> {
    let store = ConfigStore::open_default()?;
    match cmd {
        ConfigCmd::Set { key, value } => {
            store.set(&key, &value).context("could not set")?;
            writeln!(out, "New {key} has been set")?;
        }
        ConfigCmd::Get { key } => {
            let value = store.get(&key).context("could not get")?;
            writeln!(out, "{value}")?;
        }
        ConfigCmd::List => {
            let cfg = store.load().context("could not load config file")?;
            for (key, value) in cfg.fields() {
                writeln!(out, "{}: {}", key.json_key(), value)?;
            }
        }
        ConfigCmd::Path => {
            writeln!(out, "{}", store.path().display())?;
        }
    }
    Ok(())
}

fn run_images(cmd: ImagesCmd, overrides: &Overrides, out: &mut impl Write) -> Result<()> {
    let client = client_for(overrides)?;
    match cmd {
        ImagesCmd::List => {
            let images = with_spinner("Fetching images...", || client.list_images())
                .context("could not retrieve images")?;
            write_images(out, &images)?;
        }
        ImagesCmd::Get { id } => {
            let image = with_spinner("Fetching image...", || client.get_image(id))
                .context("could not retrieve image data")?;
            writeln!(out, "{}", format_image(&image))?;
        }
        ImagesCmd::Search { species, user_id } => {
            let images = with_spinner("Searching images...", || {
                client.search_images(species.as_deref().unwrap_or(""), user_id.unwrap_or(0))
            })
            .context("could not search images")?;
            write_images(out, &images)?;
        }
    }
    Ok(())
}

fn run_keys(cmd: KeysCmd, overrides: &Overrides, out: &mut impl Write) -> Result<()> {
    let client = client_for(overrides)?;
    match cmd {
        KeysCmd::List => {
            require_api_key(&client)?;
            let keys = with_spinner("Fetching API keys...", || client.list_keys())
                .context("could not get api keys")?;
            if keys.is_empty() {
                writeln!(out, "No API keys found")?;
            }
            for key in &keys {
                writeln!(out, "{}", format_key_row(key))?;
            }
        }
        KeysCmd::Generate { name } => {
            let key = with_spinner("Generating API key...", || client.generate_key(&name))
                .context("could not generate api key")?;
            writeln!(out, "API key {:?} generated.", key.name)?;
            writeln!(out, "Key: {}", key.key)?;
            writeln!(
                out,
                "Save this key now, you won't be able to see it again. It expires {}.",
                key.expires_at
            )?;
            writeln!(out, "To use it: naturedopes-cli config set api-key <key>")?;
        }
        KeysCmd::Revoke { yes } => {
            if !client.has_api_key() {
                bail!("no API key configured. Use 'config set api-key <key>' first");
            }
            if !yes && !confirm_revoke()? {
                writeln!(out, "Revoke cancelled")?;
                return Ok(());
            }
            with_spinner("Revoking API key...", || client.revoke_key())
                .context("could not revoke api key")?;
            writeln!(out, "Your API key has been successfully revoked")?;
        }
    }
    Ok(())
}

fn client_for(overrides: &Overrides) -> Result<Client> {
    let mut cfg = config::load().context("could not load config file")?;
    if let Some(url) = &overrides.api_url {
        validate_api_url(url)?;
        cfg.api_url = url.clone();
    }
    if let Some(key) = &overrides.api_key {
        cfg.api_key = key.clone();
    }
    tracing::debug!(api_url = %cfg.api_url, "using api");
    Client::from_config(&cfg).context("could not create API client")
}

fn require_api_key(client: &Client) -> Result<()> {
    if client.has_api_key() {
        return Ok(());
    }
    bail!(
        "no API key configured.\nTo get started, generate an API key:\n  naturedopes-cli keys generate <name>"
    )
}

fn confirm_revoke() -> Result<bool> {
    Confirm::new()
        .with_prompt("Are you sure you want to revoke your API key? This cannot be undone.")
        .default(false)
        .interact()
        .context("could not read confirmation (pass --yes to skip the prompt)")
}

/// Runs `f` with a stderr spinner; the spinner stays hidden off a terminal.
fn with_spinner<R>(message: &'static str, f: impl FnOnce() -> R) -> R {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    let result = f();
    spinner.finish_and_clear();
    result
}

fn write_images(out: &mut impl Write, images: &[Image]) -> Result<()> {
    if images.is_empty() {
        writeln!(out, "No images found")?;
    }
    for image in images {
        writeln!(out, "{}", format_image(image))?;
    }
    Ok(())
}

fn format_image(image: &Image) -> String {
    format!(
        "id: {}, name: {}, gps_long: {:.6}, gps_lat: {:.6}, image_path: {}, user_id: {}",
        image.id, image.species_name, image.gps_long, image.gps_lat, image.image_path, image.user_id
    )
}

fn format_key_row(key: &ApiKey) -> String {
    format!(
        "id: {}, name: {}, key: {}, created: {}, expires: {}, last used: {}, revoked: {}",
        key.id,
        key.name,
        key.masked_key(),
        key.created_at,
        key.expires_at,
        key.last_used.as_deref().unwrap_or("never"),
        key.revoked
    )
}
