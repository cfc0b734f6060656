use std::str::FromStr;

use chrono::{DateTime, Utc};
use common::models::{Direction, ParsedSignal, Signal};
use sqlx::{Row, SqlitePool, sqlite::SqliteRow};

pub struct SignalsRepository;

impl SignalsRepository {
    pub async fn insert(pool: &SqlitePool, signal: &ParsedSignal) -> Result<i64, sqlx::Error> {
        let take_profits = serde_json::to_string(&signal.take_profits)
            .map_err(|e| sqlx::Error::Encode(Box::new(e)))?;

        let id = sqlx::query_scalar::<_, i64>(
            r#"
                INSERT INTO signals (
                    symbol, direction, entry, stop_loss, take_profits, risk_reward,
                    formatted_text, source_channel, original_text, created_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                RETURNING id
            "#,
        )
        .bind(&signal.symbol)
        .bind(signal.direction.as_str())
        .bind(&signal.entry)
        .bind(&signal.stop_loss)
        .bind(take_profits)
        .bind(&signal.risk_reward)
        .bind(&signal.formatted_text)
        .bind(&signal.source_channel)
        .bind(&signal.original_text)
        .bind(signal.created_at)
        .fetch_one(pool)
        .await?;

        Ok(id)
    }

    /// The `limit` most recent accepted signals, newest first.
    pub async fn recent(pool: &SqlitePool, limit: i64) -> Result<Vec<Signal>, sqlx::Error> {
        let rows = sqlx::query(
            r#"
                SELECT id, symbol, direction, entry, stop_loss, take_profits, risk_reward,
                       formatted_text, source_channel, original_text, created_at
                FROM signals
                ORDER BY created_at DESC, id DESC
                LIMIT ?
            "#,
        )
        .bind(limit)
        .fetch_all(pool)
        .await?;

        rows.iter().map(Self::from_row).collect()
    }

    pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM signals")
            .fetch_one(pool)
            .await
    }

    /// Drop the whole signal history.
    pub async fn clear(pool: &SqlitePool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM signals").execute(pool).await?;
        Ok(result.rows_affected())
    }

    fn from_row(row: &SqliteRow) -> Result<Signal, sqlx::Error> {
        let direction: String = row.try_get("direction")?;
        let direction = Direction::from_str(&direction).map_err(|e| sqlx::Error::ColumnDecode {
            index: "direction".to_string(),
            source: Box::new(e),
        })?;

        let take_profits: String = row.try_get("take_profits")?;
        let take_profits: Vec<String> =
            serde_json::from_str(&take_profits).map_err(|e| sqlx::Error::ColumnDecode {
                index: "take_profits".to_string(),
                source: Box::new(e),
            })?;

        Ok(Signal {
            id: row.try_get("id")?,
            symbol: row.try_get("symbol")?,
            direction,
            entry: row.try_get("entry")?,
            stop_loss: row.try_get("stop_loss")?,
            take_profits,
            risk_reward: row.try_get("risk_reward")?,
            formatted_text: row.try_get("formatted_text")?,
            source_channel: row.try_get("source_channel")?,
            original_text: row.try_get("original_text")?,
            created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    fn sample(symbol: &str, entry: &str) -> ParsedSignal {
        ParsedSignal {
            symbol: symbol.to_string(),
            direction: Direction::Sell,
            entry: entry.to_string(),
            stop_loss: Some("1.2400".to_string()),
            take_profits: vec!["1.2300".to_string(), "1.2250".to_string()],
            risk_reward: Some("1:3".to_string()),
            formatted_text: "formatted".to_string(),
            source_channel: "-1001234".to_string(),
            original_text: "original".to_string(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn insert_and_read_back_round_trips() {
        let pool = db::connect_in_memory().await.unwrap();

        let id = SignalsRepository::insert(&pool, &sample("EURUSD", "1.2345"))
            .await
            .unwrap();
        assert!(id > 0);

        let rows = SignalsRepository::recent(&pool, 10).await.unwrap();
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.symbol, "EURUSD");
        assert_eq!(row.direction, Direction::Sell);
        assert_eq!(row.entry, "1.2345");
        assert_eq!(row.stop_loss.as_deref(), Some("1.2400"));
        assert_eq!(
            row.take_profits,
            vec!["1.2300".to_string(), "1.2250".to_string()]
        );
        assert_eq!(row.risk_reward.as_deref(), Some("1:3"));
    }

    #[tokio::test]
    async fn recent_returns_newest_first_and_honors_limit() {
        let pool = db::connect_in_memory().await.unwrap();

        for i in 0..5 {
            let mut signal = sample("EURUSD", &format!("1.23{i}0"));
            signal.created_at = Utc::now() + chrono::Duration::seconds(i);
            SignalsRepository::insert(&pool, &signal).await.unwrap();
        }

        let rows = SignalsRepository::recent(&pool, 3).await.unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].entry, "1.2340");
        assert_eq!(rows[2].entry, "1.2320");
    }

    #[tokio::test]
    async fn count_and_clear() {
        let pool = db::connect_in_memory().await.unwrap();

        SignalsRepository::insert(&pool, &sample("GOLD", "3373.33"))
            .await
            .unwrap();
        SignalsRepository::insert(&pool, &sample("EURUSD", "1.2345"))
            .await
            .unwrap();
        assert_eq!(SignalsRepository::count(&pool).await.unwrap(), 2);

        let removed = SignalsRepository::clear(&pool).await.unwrap();
        assert_eq!(removed, 2);
        assert_eq!(SignalsRepository::count(&pool).await.unwrap(), 0);
    }
}
