//! The `SiteStore` trait — the storage seam for contacts and the
//! portfolio singleton.
//!
//! The trait is implemented by storage backends (e.g.
//! `vitrine-store-sqlite`). The handler layer depends on this
//! abstraction, not on any concrete backend.

use std::future::Future;

use uuid::Uuid;

use crate::{
  contact::{Contact, ContactStatus, NewContact},
  portfolio::{Education, Experience, Portfolio, Skill},
};

/// Abstraction over the document store backing the site.
///
/// Contacts are plain records keyed by UUID. The portfolio is a
/// singleton: implementations must guarantee that at most one document
/// exists, and that get-or-create and the list-append operations are
/// atomic — two concurrent first-time fetches must not create two
/// documents.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait SiteStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Contacts ──────────────────────────────────────────────────────────

  /// Persist a validated submission. The store assigns the UUID, the
  /// creation timestamp, and the initial `new` status.
  fn add_contact(
    &self,
    input: NewContact,
  ) -> impl Future<Output = Result<Contact, Self::Error>> + Send + '_;

  /// Retrieve a contact by UUID. Returns `None` if not found.
  fn get_contact(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Contact>, Self::Error>> + Send + '_;

  /// List all contacts, newest first.
  fn list_contacts(
    &self,
  ) -> impl Future<Output = Result<Vec<Contact>, Self::Error>> + Send + '_;

  /// Set a contact's status and return the updated record, or `None`
  /// if the id does not exist. The stored record is untouched in the
  /// `None` case.
  fn set_contact_status(
    &self,
    id: Uuid,
    status: ContactStatus,
  ) -> impl Future<Output = Result<Option<Contact>, Self::Error>> + Send + '_;

  /// Delete a contact. Returns `false` if the id does not exist.
  fn delete_contact(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Portfolio singleton ───────────────────────────────────────────────

  /// Retrieve the singleton without creating it.
  fn get_portfolio(
    &self,
  ) -> impl Future<Output = Result<Option<Portfolio>, Self::Error>> + Send + '_;

  /// Return the singleton, atomically creating it from `default` if it
  /// does not exist yet.
  fn get_or_create_portfolio(
    &self,
    default: Portfolio,
  ) -> impl Future<Output = Result<Portfolio, Self::Error>> + Send + '_;

  /// Replace the singleton wholesale (creating it if absent) and stamp
  /// its `updated_at`. Returns the stored document.
  fn save_portfolio(
    &self,
    portfolio: Portfolio,
  ) -> impl Future<Output = Result<Portfolio, Self::Error>> + Send + '_;

  /// Append to the skill list and return the full list, or `None` if
  /// no portfolio exists. The read-modify-write is atomic.
  fn append_skill(
    &self,
    skill: Skill,
  ) -> impl Future<Output = Result<Option<Vec<Skill>>, Self::Error>> + Send + '_;

  /// As [`SiteStore::append_skill`], for the experience list.
  fn append_experience(
    &self,
    entry: Experience,
  ) -> impl Future<Output = Result<Option<Vec<Experience>>, Self::Error>> + Send + '_;

  /// As [`SiteStore::append_skill`], for the education list.
  fn append_education(
    &self,
    entry: Education,
  ) -> impl Future<Output = Result<Option<Vec<Education>>, Self::Error>> + Send + '_;
}
