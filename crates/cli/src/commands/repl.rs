use std::io::Write as _;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};

use partdesk_agent::build_router;
use partdesk_core::config::AppConfig;

/// Interactive session: one router, so follow-up turns resolve against
/// the conversation context. `exit` or EOF ends the session.
pub async fn run(config: &AppConfig) -> Result<String> {
    let mut router = build_router(config)?;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("partdesk interactive session; type 'exit' to quit");
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "exit" || line == "quit" {
            break;
        }

        let result = router.process_query(line).await;
        println!("[{}]", result.tool_name);
        println!("{}", result.result);
        if let Some(follow_up) = result.follow_up {
            println!("-> {follow_up}");
        }
    }

    Ok(String::new())
}
