use shared::{WheelConfig, WheelVariant};
use web_sys::window;

/// localStorage key holding an optional JSON override of the wheel setup.
pub const WHEEL_CONFIG_KEY: &str = "roleta_config";

pub fn get_api_base_url() -> String {
    // Build-time override for setups where the API lives on another host
    if let Some(url) = option_env!("ROLETA_API_URL") {
        return url.trim_end_matches('/').to_string();
    }

    if let Some(window) = window() {
        if let Ok(location) = window.location().host() {
            // Keep the port number (if any) from the current location
            let protocol = window.location().protocol().unwrap_or_else(|_| "http:".to_string());
            return format!("{}//{}", protocol, location);
        }
    }

    // Default to 127.0.0.1 for development
    "http://127.0.0.1:3000".to_string()
}

/// Wheel setup for `variant`, honoring a stored override when it parses.
pub fn wheel_config(variant: WheelVariant) -> WheelConfig {
    let stored = window()
        .and_then(|w| w.local_storage().ok().flatten())
        .and_then(|s| s.get_item(WHEEL_CONFIG_KEY).ok().flatten());

    let mut config = match stored.as_deref().map(WheelConfig::from_json) {
        Some(Ok(config)) => config,
        Some(Err(e)) => {
            log::warn!("Ignoring stored wheel config: {}", e);
            WheelConfig::default()
        }
        None => WheelConfig::default(),
    };
    config.variant = variant;
    config
}
