use std::path::Path;

use kpi_core::{Game, KpiDefinition, KpiEvent, KpiKind};
use rusqlite::{Connection, OptionalExtension, params};

pub const MIGRATION_0001: &str = include_str!("../migrations/0001_init.sql");

pub const MIGRATIONS: &[(&str, &str)] = &[("0001_init", MIGRATION_0001)];

#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("unknown kpi kind: {0}")]
    UnknownKind(String),
}

pub type Result<T> = std::result::Result<T, DbError>;

pub struct Db {
    conn: Connection,
}

impl Db {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        conn.pragma_update(None, "temp_store", "MEMORY")?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        Ok(Self { conn })
    }

    pub fn migrate(&mut self) -> Result<()> {
        let tx = self.conn.transaction()?;
        for (_name, sql) in MIGRATIONS {
            tx.execute_batch(sql)?;
        }
        tx.commit()?;
        Ok(())
    }

    pub fn insert_game(&mut self, game: &Game) -> Result<()> {
        self.conn.execute(
            r#"
            INSERT INTO game (game_id, home_team, away_team, kickoff_iso, status, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                game.game_id,
                game.home_team,
                game.away_team,
                game.kickoff_iso,
                game.status,
                game.created_at,
            ],
        )?;
        Ok(())
    }

    pub fn get_game(&self, game_id: &str) -> Result<Option<Game>> {
        let game = self
            .conn
            .query_row(
                r#"
                SELECT game_id, home_team, away_team, kickoff_iso, status, created_at
                FROM game WHERE game_id = ?1
                "#,
                params![game_id],
                |row| {
                    Ok(Game {
                        game_id: row.get(0)?,
                        home_team: row.get(1)?,
                        away_team: row.get(2)?,
                        kickoff_iso: row.get(3)?,
                        status: row.get(4)?,
                        created_at: row.get(5)?,
                    })
                },
            )
            .optional()?;
        Ok(game)
    }

    pub fn insert_definitions(&mut self, definitions: &[KpiDefinition]) -> Result<usize> {
        let tx = self.conn.transaction()?;
        let mut inserted = 0usize;
        {
            let mut stmt = tx.prepare(
                r#"
                INSERT OR IGNORE INTO kpi_definition (game_id, kpi_id, label, kind)
                VALUES (?1, ?2, ?3, ?4)
                "#,
            )?;
            for def in definitions {
                let rows = stmt.execute(params![
                    def.game_id,
                    def.kpi_id,
                    def.label,
                    def.kind.as_str(),
                ])?;
                if rows > 0 {
                    inserted += 1;
                }
            }
        }
        tx.commit()?;
        Ok(inserted)
    }

    /// Definitions in seeding order (rowid order, since the catalog is
    /// written once in a batch).
    pub fn list_definitions(&self, game_id: &str) -> Result<Vec<KpiDefinition>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT game_id, kpi_id, label, kind
            FROM kpi_definition WHERE game_id = ?1
            ORDER BY rowid
            "#,
        )?;
        let rows = stmt.query_map(params![game_id], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
            ))
        })?;
        let mut definitions = Vec::new();
        for row in rows {
            let (game_id, kpi_id, label, kind) = row?;
            let kind = KpiKind::parse(&kind).ok_or(DbError::UnknownKind(kind))?;
            definitions.push(KpiDefinition {
                game_id,
                kpi_id,
                label,
                kind,
            });
        }
        Ok(definitions)
    }

    pub fn insert_event(&mut self, event: &KpiEvent) -> Result<()> {
        self.conn.execute(
            r#"
            INSERT INTO kpi_event (game_id, kpi_id, ts, delta, toggle_value)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                event.game_id,
                event.kpi_id,
                event.timestamp,
                event.delta,
                event.toggle_value.map(i64::from),
            ],
        )?;
        Ok(())
    }

    /// Full event history for one game, ascending by timestamp with the
    /// insertion rowid as tie-breaker. This ordering is the contract the
    /// toggle aggregation depends on.
    pub fn list_events(&self, game_id: &str) -> Result<Vec<KpiEvent>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT game_id, kpi_id, ts, delta, toggle_value
            FROM kpi_event WHERE game_id = ?1
            ORDER BY ts, id
            "#,
        )?;
        let rows = stmt.query_map(params![game_id], |row| {
            let toggle_value: Option<i64> = row.get(4)?;
            Ok(KpiEvent {
                game_id: row.get(0)?,
                kpi_id: row.get(1)?,
                timestamp: row.get(2)?,
                delta: row.get(3)?,
                toggle_value: toggle_value.map(|value| value != 0),
            })
        })?;
        let mut events = Vec::new();
        for event in rows {
            events.push(event?);
        }
        Ok(events)
    }
}
