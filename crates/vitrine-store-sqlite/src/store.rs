//! [`SqliteStore`] — the SQLite implementation of [`SiteStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use uuid::Uuid;
use vitrine_core::{
  contact::{Contact, ContactStatus, NewContact},
  portfolio::{Education, Experience, Portfolio, Skill},
  store::SiteStore,
};

use crate::{
  Error, Result,
  encode::{
    RawContact, RawPortfolio, encode_dt, encode_status, encode_uuid,
    portfolio_columns,
  },
  schema::SCHEMA,
};

// ─── Row helpers ─────────────────────────────────────────────────────────────

fn contact_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawContact> {
  Ok(RawContact {
    contact_id: row.get(0)?,
    full_name:  row.get(1)?,
    email:      row.get(2)?,
    phone:      row.get(3)?,
    subject:    row.get(4)?,
    message:    row.get(5)?,
    status:     row.get(6)?,
    created_at: row.get(7)?,
  })
}

fn portfolio_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawPortfolio> {
  Ok(RawPortfolio {
    name:          row.get(0)?,
    title:         row.get(1)?,
    bio:           row.get(2)?,
    email:         row.get(3)?,
    phone:         row.get(4)?,
    location:      row.get(5)?,
    profile_image: row.get(6)?,
    skills:        row.get(7)?,
    experience:    row.get(8)?,
    education:     row.get(9)?,
    social_links:  row.get(10)?,
    updated_at:    row.get(11)?,
  })
}

/// Wrap a non-database error for transport out of a connection closure.
fn other(
  e: impl std::error::Error + Send + Sync + 'static,
) -> tokio_rusqlite::Error {
  tokio_rusqlite::Error::Other(Box::new(e))
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A vitrine site store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted. All
/// calls execute sequentially on the connection's dedicated thread, so
/// a multi-statement closure is atomic with respect to other requests.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Shared implementation of the three list-append operations. The
  /// select, append and update happen inside one connection call, so
  /// concurrent appends serialise instead of losing entries.
  async fn append_to_list<T>(
    &self,
    column: &'static str,
    entry: T,
  ) -> Result<Option<Vec<T>>>
  where
    T: serde::Serialize + serde::de::DeserializeOwned + Send + 'static,
  {
    let now_str = encode_dt(Utc::now());

    let updated = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let stored: Option<String> = tx
          .query_row(
            &format!("SELECT {column} FROM portfolio WHERE portfolio_id = 1"),
            [],
            |row| row.get(0),
          )
          .optional()?;

        let Some(stored) = stored else {
          return Ok(None);
        };

        let mut entries: Vec<T> =
          serde_json::from_str(&stored).map_err(other)?;
        entries.push(entry);
        let encoded = serde_json::to_string(&entries).map_err(other)?;

        tx.execute(
          &format!(
            "UPDATE portfolio SET {column} = ?1, updated_at = ?2
             WHERE portfolio_id = 1"
          ),
          rusqlite::params![encoded, now_str],
        )?;
        tx.commit()?;

        Ok(Some(entries))
      })
      .await?;

    Ok(updated)
  }
}

// ─── SiteStore impl ──────────────────────────────────────────────────────────

impl SiteStore for SqliteStore {
  type Error = Error;

  // ── Contacts ──────────────────────────────────────────────────────────────

  async fn add_contact(&self, input: NewContact) -> Result<Contact> {
    let contact = Contact {
      contact_id: Uuid::new_v4(),
      full_name:  input.full_name,
      email:      input.email,
      phone:      input.phone,
      subject:    input.subject,
      message:    input.message,
      status:     ContactStatus::New,
      created_at: Utc::now(),
    };

    let id_str     = encode_uuid(contact.contact_id);
    let at_str     = encode_dt(contact.created_at);
    let status_str = encode_status(contact.status).to_owned();
    let full_name  = contact.full_name.clone();
    let email      = contact.email.clone();
    let phone      = contact.phone.clone();
    let subject    = contact.subject.clone();
    let message    = contact.message.clone();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO contacts (
             contact_id, full_name, email, phone, subject, message,
             status, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
          rusqlite::params![
            id_str, full_name, email, phone, subject, message, status_str,
            at_str,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(contact)
  }

  async fn get_contact(&self, id: Uuid) -> Result<Option<Contact>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawContact> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT contact_id, full_name, email, phone, subject, message,
                      status, created_at
               FROM contacts WHERE contact_id = ?1",
              rusqlite::params![id_str],
              contact_from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawContact::into_contact).transpose()
  }

  async fn list_contacts(&self) -> Result<Vec<Contact>> {
    let raws: Vec<RawContact> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT contact_id, full_name, email, phone, subject, message,
                  status, created_at
           FROM contacts ORDER BY created_at DESC",
        )?;
        let rows = stmt
          .query_map([], contact_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawContact::into_contact).collect()
  }

  async fn set_contact_status(
    &self,
    id: Uuid,
    status: ContactStatus,
  ) -> Result<Option<Contact>> {
    let id_str     = encode_uuid(id);
    let status_str = encode_status(status).to_owned();

    let raw: Option<RawContact> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let changed = tx.execute(
          "UPDATE contacts SET status = ?2 WHERE contact_id = ?1",
          rusqlite::params![id_str, status_str],
        )?;
        if changed == 0 {
          return Ok(None);
        }

        let raw = tx.query_row(
          "SELECT contact_id, full_name, email, phone, subject, message,
                  status, created_at
           FROM contacts WHERE contact_id = ?1",
          rusqlite::params![id_str],
          contact_from_row,
        )?;
        tx.commit()?;

        Ok(Some(raw))
      })
      .await?;

    raw.map(RawContact::into_contact).transpose()
  }

  async fn delete_contact(&self, id: Uuid) -> Result<bool> {
    let id_str = encode_uuid(id);

    let deleted = self
      .conn
      .call(move |conn| {
        let n = conn.execute(
          "DELETE FROM contacts WHERE contact_id = ?1",
          rusqlite::params![id_str],
        )?;
        Ok(n > 0)
      })
      .await?;

    Ok(deleted)
  }

  // ── Portfolio singleton ───────────────────────────────────────────────────

  async fn get_portfolio(&self) -> Result<Option<Portfolio>> {
    let raw: Option<RawPortfolio> = self
      .conn
      .call(|conn| {
        Ok(
          conn
            .query_row(
              "SELECT name, title, bio, email, phone, location, profile_image,
                      skills, experience, education, social_links, updated_at
               FROM portfolio WHERE portfolio_id = 1",
              [],
              portfolio_from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawPortfolio::into_portfolio).transpose()
  }

  async fn get_or_create_portfolio(
    &self,
    default: Portfolio,
  ) -> Result<Portfolio> {
    let cols = portfolio_columns(&default)?;

    let raw: RawPortfolio = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        // The fixed row id makes the insert a no-op when the document
        // already exists; the read then returns whichever document won.
        tx.execute(
          "INSERT INTO portfolio (
             portfolio_id, name, title, bio, email, phone, location,
             profile_image, skills, experience, education, social_links,
             updated_at
           ) VALUES (1, ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
           ON CONFLICT(portfolio_id) DO NOTHING",
          rusqlite::params![
            cols.name,
            cols.title,
            cols.bio,
            cols.email,
            cols.phone,
            cols.location,
            cols.profile_image,
            cols.skills,
            cols.experience,
            cols.education,
            cols.social_links,
            cols.updated_at,
          ],
        )?;

        let raw = tx.query_row(
          "SELECT name, title, bio, email, phone, location, profile_image,
                  skills, experience, education, social_links, updated_at
           FROM portfolio WHERE portfolio_id = 1",
          [],
          portfolio_from_row,
        )?;
        tx.commit()?;

        Ok(raw)
      })
      .await?;

    raw.into_portfolio()
  }

  async fn save_portfolio(&self, portfolio: Portfolio) -> Result<Portfolio> {
    let mut portfolio = portfolio;
    portfolio.updated_at = Utc::now();

    let cols = portfolio_columns(&portfolio)?;

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO portfolio (
             portfolio_id, name, title, bio, email, phone, location,
             profile_image, skills, experience, education, social_links,
             updated_at
           ) VALUES (1, ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
           ON CONFLICT(portfolio_id) DO UPDATE SET
             name          = excluded.name,
             title         = excluded.title,
             bio           = excluded.bio,
             email         = excluded.email,
             phone         = excluded.phone,
             location      = excluded.location,
             profile_image = excluded.profile_image,
             skills        = excluded.skills,
             experience    = excluded.experience,
             education     = excluded.education,
             social_links  = excluded.social_links,
             updated_at    = excluded.updated_at",
          rusqlite::params![
            cols.name,
            cols.title,
            cols.bio,
            cols.email,
            cols.phone,
            cols.location,
            cols.profile_image,
            cols.skills,
            cols.experience,
            cols.education,
            cols.social_links,
            cols.updated_at,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(portfolio)
  }

  async fn append_skill(&self, skill: Skill) -> Result<Option<Vec<Skill>>> {
    self.append_to_list("skills", skill).await
  }

  async fn append_experience(
    &self,
    entry: Experience,
  ) -> Result<Option<Vec<Experience>>> {
    self.append_to_list("experience", entry).await
  }

  async fn append_education(
    &self,
    entry: Education,
  ) -> Result<Option<Vec<Education>>> {
    self.append_to_list("education", entry).await
  }
}
