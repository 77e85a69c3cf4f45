//! Build script for chiptan-cli
//!
//! Validates the embedded chiptan.toml at compile time so a broken default
//! never ships.

use std::fs;
use std::path::Path;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

fn main() {
    println!("cargo:rerun-if-changed=chiptan.toml");
    println!("cargo:rerun-if-changed=build.rs");

    let config_path = Path::new("chiptan.toml");

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => fail("Failed to read chiptan.toml", &[e.to_string()]),
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => fail(
            "Invalid TOML syntax in chiptan.toml",
            &e.to_string().lines().map(str::to_string).collect::<Vec<_>>(),
        ),
    };

    let errors = validate(&config);
    if !errors.is_empty() {
        fail("Invalid values in chiptan.toml", &errors);
    }
}

/// Check known sections; returns one message per problem
fn validate(config: &toml::Value) -> Vec<String> {
    let mut errors = Vec::new();

    if let Some(flicker) = config.get("flicker") {
        match flicker.get("tick_ms") {
            Some(toml::Value::Integer(ms)) if !(10..=1000).contains(ms) => {
                errors.push("[flicker] tick_ms must be 10-1000".to_string());
            }
            Some(toml::Value::Integer(_)) | None => {}
            Some(_) => errors.push("[flicker] tick_ms must be an integer".to_string()),
        }
    }

    if let Some(display) = config.get("display") {
        for key in ["colors", "show_qr"] {
            if let Some(value) = display.get(key) {
                if !value.is_bool() {
                    errors.push(format!("[display] {} must be true or false", key));
                }
            }
        }
    }

    if let Some(logging) = config.get("logging") {
        if let Some(level) = logging.get("level") {
            match level.as_str() {
                Some(level) if LOG_LEVELS.contains(&level) => {}
                _ => errors.push(format!(
                    "[logging] level must be one of: {}",
                    LOG_LEVELS.join(", ")
                )),
            }
        }
    }

    errors
}

/// Abort the build with a boxed error message
fn fail(title: &str, lines: &[String]) -> ! {
    let body = lines
        .iter()
        .map(|line| {
            let truncated = if line.chars().count() > 64 {
                format!("{}...", line.chars().take(61).collect::<String>())
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n");

    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title, body
    );
}
