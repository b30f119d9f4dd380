use anyhow::Result;

use partdesk_agent::build_router;
use partdesk_core::config::AppConfig;

pub async fn run(config: &AppConfig, text: &str) -> Result<String> {
    let mut router = build_router(config)?;
    let result = router.process_query(text).await;
    Ok(serde_json::to_string_pretty(&result)?)
}

#[cfg(test)]
mod tests {
    use partdesk_core::config::AppConfig;

    #[tokio::test]
    async fn query_output_is_a_dispatch_result_payload() {
        let output = super::run(&AppConfig::default(), "I need a water filter for my refrigerator")
            .await
            .expect("query");

        let value: serde_json::Value = serde_json::from_str(&output).expect("json");
        assert_eq!(value["tool_name"], "product_lookup_tool");
        assert!(value["result"].is_string());
        assert!(value.get("follow_up").is_some());
    }
}
