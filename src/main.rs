//! Stream Profiles - settings inspector
//!
//! Prints what a settings profile resolves to.
//!
//! Usage: `stream-profiles [host-id]` (no argument inspects the global profile)

use anyhow::Result;
use log::info;
use std::sync::Arc;

use stream_profiles::app::{FileStore, ProfileKey, SettingsResolver};
use stream_profiles::display::FixedDisplay;
use stream_profiles::events::EventBus;
use stream_profiles::utils;

fn main() -> Result<()> {
    // Initialize logging
    utils::init_logging()?;

    info!("Stream Profiles v{}", env!("CARGO_PKG_VERSION"));

    let profile = std::env::args()
        .nth(1)
        .map(ProfileKey::host)
        .unwrap_or_else(ProfileKey::global);

    let store = Arc::new(FileStore::open_default()?);
    info!("Settings store: {}", store.path().display());
    info!("Log file: {}", utils::get_log_file_path().display());

    let resolver = SettingsResolver::new(store.clone(), Arc::new(FixedDisplay::headless()), EventBus::new());

    let stored = resolver.stored_profiles();
    info!("{} stored profiles", stored.len());

    let resolved = resolver.resolve(&profile);
    println!("{}", serde_json::to_string_pretty(&resolved.to_settings())?);

    println!("Profile:       {}", profile);
    println!("Codec:         {}", resolved.codec.as_str());
    println!("Frame pacing:  {}", resolved.frame_pacing.display_name());
    println!(
        "Audio:         {} ({} channels)",
        resolved.audio_configuration.display_name(),
        resolved.audio_configuration.channel_count()
    );
    println!("Window:        {}", resolved.display_mode.display_name());
    println!("Controller:    {}", resolved.controller_driver.as_str());
    println!("Upscaling:     {}", resolved.upscaling_mode.display_name());

    match resolver.stream_config(&profile) {
        Some(config) => println!("{:#?}", config),
        None => println!("No settings stored for {}, defaults shown above", profile),
    }

    Ok(())
}
