use chrono::Utc;
use common::models::RelayConfig;
use sqlx::{Row, SqlitePool};

/// Persisted channel configuration, a single row keyed by id 1. Kept in the
/// database so a restart picks up the last configured channels without
/// re-reading the environment.
pub struct ConfigRepository;

impl ConfigRepository {
    pub async fn get(pool: &SqlitePool) -> Result<Option<RelayConfig>, sqlx::Error> {
        let row = sqlx::query("SELECT from_channels, to_channel FROM bot_config WHERE id = 1")
            .fetch_optional(pool)
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let from_channels: String = row.try_get("from_channels")?;
        let from_channels: Vec<String> =
            serde_json::from_str(&from_channels).map_err(|e| sqlx::Error::ColumnDecode {
                index: "from_channels".to_string(),
                source: Box::new(e),
            })?;

        Ok(Some(RelayConfig {
            from_channels,
            to_channel: row.try_get("to_channel")?,
        }))
    }

    pub async fn upsert(pool: &SqlitePool, config: &RelayConfig) -> Result<(), sqlx::Error> {
        let from_channels = serde_json::to_string(&config.from_channels)
            .map_err(|e| sqlx::Error::Encode(Box::new(e)))?;

        sqlx::query(
            r#"
                INSERT INTO bot_config (id, from_channels, to_channel, updated_at)
                VALUES (1, ?, ?, ?)
                ON CONFLICT(id) DO UPDATE SET
                    from_channels = excluded.from_channels,
                    to_channel = excluded.to_channel,
                    updated_at = excluded.updated_at
            "#,
        )
        .bind(from_channels)
        .bind(&config.to_channel)
        .bind(Utc::now())
        .execute(pool)
        .await?;

        Ok(())
    }
}
