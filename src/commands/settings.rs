use crate::auth::AccessGate;
use crate::db::Database;
use crate::error::Result;
use crate::models::{Settings, UpdateSettingsInput};
use super::lock_conn;

pub fn get_settings(db: &Database) -> Result<Settings> {
    let conn = lock_conn(db)?;

    let settings = conn.query_row(
        "SELECT id, currency, access_password_hash IS NOT NULL, created_at, updated_at FROM settings WHERE id = 1",
        [],
        |row| {
            Ok(Settings {
                id: row.get(0)?,
                currency: row.get(1)?,
                password_protected: row.get::<_, i32>(2)? == 1,
                created_at: row.get(3)?,
                updated_at: row.get(4)?,
            })
        },
    )?;

    Ok(settings)
}

pub fn update_settings(db: &Database, settings: UpdateSettingsInput) -> Result<Settings> {
    {
        let conn = lock_conn(db)?;

        let mut updates = Vec::new();
        let mut values: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(val) = settings.currency {
            updates.push("currency = ?");
            values.push(Box::new(val));
        }

        updates.push("updated_at = strftime('%s', 'now')");

        let query = format!("UPDATE settings SET {} WHERE id = 1", updates.join(", "));
        let params: Vec<&dyn rusqlite::ToSql> = values.iter().map(|v| v.as_ref()).collect();

        conn.execute(&query, params.as_slice())?;
    }

    get_settings(db)
}

fn load_password_hash(db: &Database) -> Result<Option<String>> {
    let conn = lock_conn(db)?;
    let hash = conn.query_row(
        "SELECT access_password_hash FROM settings WHERE id = 1",
        [],
        |row| row.get::<_, Option<String>>(0),
    )?;
    Ok(hash)
}

fn store_password_hash(db: &Database, hash: Option<String>) -> Result<()> {
    let conn = lock_conn(db)?;
    conn.execute(
        "UPDATE settings SET access_password_hash = ?, updated_at = strftime('%s', 'now') WHERE id = 1",
        [hash],
    )?;
    Ok(())
}

/// Check the access password without touching any trades.
pub fn verify_access(db: &Database, password: &str) -> Result<()> {
    let stored = load_password_hash(db)?;
    AccessGate::verify(stored.as_deref(), password)
}

/// Set or change the access password. Changing requires the current one.
pub fn set_access_password(db: &Database, current: Option<&str>, new_password: &str) -> Result<()> {
    let stored = load_password_hash(db)?;
    if stored.is_some() {
        AccessGate::verify(stored.as_deref(), current.unwrap_or_default())?;
    }

    let hash = AccessGate::hash_password(new_password)?;
    store_password_hash(db, Some(hash))?;
    log::info!("Access password updated");
    Ok(())
}

pub fn clear_access_password(db: &Database, current: &str) -> Result<()> {
    let stored = load_password_hash(db)?;
    AccessGate::verify(stored.as_deref(), current)?;
    store_password_hash(db, None)?;
    log::info!("Access password removed");
    Ok(())
}
