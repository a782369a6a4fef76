//! MySQL implementation of the bulk loader.

use crate::error::MySQLPopulatorError;
use crate::load::{
    artist_ids_sql, load_data_sql, truncate_sql, PLAYLISTS_SQL, READ_BACK_CHUNK_SIZE,
    SONG_IDS_SQL,
};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use listen80_populate::files::table_file;
use listen80_populate::BulkLoader;
use listen80_types::{ExistingPlaylist, Table};
use mysql_async::{prelude::*, Opts, OptsBuilder, Params, Pool, TxOpts, Value, WhiteListFsHandler};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

/// Bulk loader backed by a MySQL connection pool.
pub struct MySQLLoader {
    pool: Pool,
}

impl MySQLLoader {
    /// Connect and verify the connection.
    ///
    /// Local infile reads are allowed only for the table files in `tmp_dir`.
    pub async fn connect(
        connection_string: &str,
        tmp_dir: &Path,
    ) -> Result<Self, MySQLPopulatorError> {
        let allowed = Table::ALL.map(|table| table_file(tmp_dir, table));
        let opts = OptsBuilder::from_opts(Opts::from_url(connection_string)?)
            .local_infile_handler(Some(WhiteListFsHandler::new(allowed)));
        let pool = Pool::new(opts);

        let mut conn = pool.get_conn().await?;
        conn.query_drop("SELECT 1").await?;
        drop(conn);

        info!("Connected to MySQL");
        Ok(Self { pool })
    }

    /// Close all pooled connections.
    pub async fn disconnect(self) -> Result<(), MySQLPopulatorError> {
        self.pool.disconnect().await?;
        Ok(())
    }
}

#[async_trait]
impl BulkLoader for MySQLLoader {
    type Error = MySQLPopulatorError;

    async fn truncate(&mut self, tables: &[Table]) -> Result<(), Self::Error> {
        let mut conn = self.pool.get_conn().await?;
        for table in tables {
            conn.query_drop(truncate_sql(*table)).await?;
            debug!("Truncated {}", table);
        }
        Ok(())
    }

    async fn load_file(&mut self, table: Table, path: &Path) -> Result<u64, Self::Error> {
        let sql = load_data_sql(table, path)?;
        let mut conn = self.pool.get_conn().await?;

        let mut tx = conn.start_transaction(TxOpts::default()).await?;
        let result = tx.query_iter(sql).await?;
        let affected = result.affected_rows();
        result.drop_result().await?;
        tx.commit().await?;

        Ok(affected)
    }

    async fn artist_ids(&mut self, ulids: &[String]) -> Result<HashMap<String, u64>, Self::Error> {
        let mut conn = self.pool.get_conn().await?;
        let mut ids = HashMap::with_capacity(ulids.len());

        for chunk in ulids.chunks(READ_BACK_CHUNK_SIZE) {
            let params: Vec<Value> = chunk.iter().map(|u| Value::from(u.as_str())).collect();
            let rows: Vec<(u64, String)> = conn
                .exec(artist_ids_sql(chunk.len()), Params::Positional(params))
                .await?;
            ids.extend(rows.into_iter().map(|(id, ulid)| (ulid, id)));
        }
        Ok(ids)
    }

    async fn playlists(&mut self) -> Result<Vec<ExistingPlaylist>, Self::Error> {
        let mut conn = self.pool.get_conn().await?;
        let rows: Vec<(u64, Value)> = conn.query(PLAYLISTS_SQL).await?;

        rows.into_iter()
            .map(|(id, created_at)| {
                Ok(ExistingPlaylist {
                    id,
                    created_at: datetime_from_value(created_at)?,
                })
            })
            .collect()
    }

    async fn song_ids(&mut self) -> Result<Vec<u64>, Self::Error> {
        let mut conn = self.pool.get_conn().await?;
        Ok(conn.query(SONG_IDS_SQL).await?)
    }
}

/// Text-protocol DATETIME/TIMESTAMP layout; the fraction is optional.
const TEXT_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Convert a DATETIME/TIMESTAMP value to UTC.
fn datetime_from_value(value: Value) -> Result<DateTime<Utc>, MySQLPopulatorError> {
    let unexpected = |value: &Value| MySQLPopulatorError::UnexpectedValue {
        table: "playlist",
        column: "created_at",
        value: format!("{value:?}"),
    };

    match value {
        Value::Date(year, month, day, hour, minute, second, micros) => {
            NaiveDate::from_ymd_opt(year.into(), month.into(), day.into())
                .and_then(|d| {
                    d.and_hms_micro_opt(hour.into(), minute.into(), second.into(), micros)
                })
                .map(|dt| dt.and_utc())
                .ok_or_else(|| unexpected(&value))
        }
        Value::Bytes(ref bytes) => std::str::from_utf8(bytes)
            .ok()
            .and_then(|s| chrono::NaiveDateTime::parse_from_str(s, TEXT_DATETIME_FORMAT).ok())
            .map(|dt| dt.and_utc())
            .ok_or_else(|| unexpected(&value)),
        other => Err(unexpected(&other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use listen80_types::format_timestamp;

    #[test]
    fn test_datetime_from_binary_value() {
        let dt = datetime_from_value(Value::Date(2024, 3, 4, 5, 6, 7, 0)).unwrap();
        assert_eq!(format_timestamp(&dt), "2024-03-04 05:06:07");
    }

    #[test]
    fn test_datetime_from_text_value() {
        let dt = datetime_from_value(Value::Bytes(b"2024-03-04 05:06:07".to_vec())).unwrap();
        assert_eq!(format_timestamp(&dt), "2024-03-04 05:06:07");
    }

    #[test]
    fn test_datetime_from_fractional_text_value() {
        let dt = datetime_from_value(Value::Bytes(b"2024-03-04 05:06:07.000".to_vec())).unwrap();
        assert_eq!(format_timestamp(&dt), "2024-03-04 05:06:07");

        let dt = datetime_from_value(Value::Bytes(b"2024-03-04 05:06:07.250".to_vec())).unwrap();
        assert_eq!(dt.timestamp_subsec_millis(), 250);
    }

    #[test]
    fn test_datetime_rejects_other_values() {
        assert!(matches!(
            datetime_from_value(Value::Int(1)),
            Err(MySQLPopulatorError::UnexpectedValue { .. })
        ));
        assert!(datetime_from_value(Value::Date(2024, 13, 1, 0, 0, 0, 0)).is_err());
        assert!(datetime_from_value(Value::Bytes(b"2024-03-04".to_vec())).is_err());
    }
}
