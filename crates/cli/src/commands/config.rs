use anyhow::Result;

use partdesk_core::config::AppConfig;

pub fn run(config: &AppConfig) -> Result<String> {
    let api_key = if config.llm.api_key.is_some() { "<redacted>" } else { "<unset>" };

    let lines = vec![
        "effective config (source precedence: flags > env > file > default):".to_string(),
        format!("llm.base_url = {}", config.llm.base_url),
        format!("llm.model = {}", config.llm.model),
        format!("llm.timeout_secs = {}", config.llm.timeout_secs),
        format!("llm.api_key = {api_key}"),
        format!(
            "cart.cart_id = {}",
            config.cart.cart_id.as_deref().unwrap_or("<generated per session>")
        ),
        format!("logging.level = {}", config.logging.level),
        format!("logging.format = {:?}", config.logging.format),
    ];

    Ok(lines.join("\n"))
}
