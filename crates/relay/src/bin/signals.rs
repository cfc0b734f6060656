//! Query surface over the signal store: the N most recent accepted records,
//! the total count, or a full history wipe.
//!
//! Usage: signals recent [N] | signals count | signals clear

use std::env;

use anyhow::bail;
use dotenvy::dotenv;

use storage::db;
use storage::repositories::SignalsRepository;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let db_path = env::var("DATABASE_PATH").unwrap_or_else(|_| "signal_relay.db".to_string());
    let pool = db::connect(&db_path).await?;

    let args: Vec<String> = env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("recent") => {
            let limit = match args.get(1) {
                Some(n) => n.parse::<i64>()?,
                None => 10,
            };
            let signals = SignalsRepository::recent(&pool, limit).await?;
            if signals.is_empty() {
                println!("No signals stored.");
            }
            for signal in signals {
                println!(
                    "#{} [{}] {} (channel {})",
                    signal.id,
                    signal.created_at.format("%Y-%m-%d %H:%M:%S"),
                    signal.symbol,
                    signal.source_channel
                );
                println!("{}\n", signal.formatted_text);
            }
        }
        Some("count") => {
            println!("{}", SignalsRepository::count(&pool).await?);
        }
        Some("clear") => {
            let removed = SignalsRepository::clear(&pool).await?;
            println!("Removed {removed} signal(s).");
        }
        _ => bail!("usage: signals recent [N] | signals count | signals clear"),
    }

    Ok(())
}
