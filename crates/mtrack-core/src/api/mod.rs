//! Remote API interface.
//!
//! The `TrackerApi` trait is the seam between the CLI and the REST backend.
//! Every authenticated call takes the [`Session`] explicitly; nothing in this
//! crate looks up the signed-in user on its own.
//!
//! There is no caching and no retry. After a mutation the caller re-fetches
//! whole collections, so what it shows is as fresh as the last successful
//! fetch, and concurrent edits resolve as last-write-wins on the server.

mod http;

pub use http::{ApiConfig, HttpApi, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};

use crate::error::{Result, TrackerError};
use crate::model::{
    Machine, NewMachine, NewRepair, PriceUpdate, RecordId, Repair, RepairType, RepairTypeCatalog,
    Session, UserDetails, UserProfile,
};

/// Operations offered by the maintenance tracker backend.
pub trait TrackerApi {
    /// Exchange credentials for a session (`POST token/`).
    fn login(&self, username: &str, password: &str) -> Result<Session>;

    /// Create an account (`POST register/`).
    fn register(&self, username: &str, password: &str) -> Result<()>;

    fn user_profile(&self, session: &Session) -> Result<UserProfile>;

    fn user_details(&self, session: &Session) -> Result<UserDetails>;

    fn list_machines(&self, session: &Session) -> Result<Vec<Machine>>;

    /// Upload a new machine as a multipart form.
    fn create_machine(&self, session: &Session, machine: &NewMachine) -> Result<Machine>;

    fn list_repairs(&self, session: &Session) -> Result<Vec<Repair>>;

    /// Repairs of one machine (`GET repairs/?machine_id=<id>`).
    fn list_repairs_for_machine(&self, session: &Session, machine: &RecordId)
        -> Result<Vec<Repair>>;

    fn get_repair(&self, session: &Session, id: &RecordId) -> Result<Repair>;

    fn create_repair(&self, session: &Session, repair: &NewRepair) -> Result<Repair>;

    /// Replace the repair with `update` (`PUT repairs/<id>/`).
    ///
    /// No version check is made; the last write wins.
    fn update_repair_price(
        &self,
        session: &Session,
        id: &RecordId,
        update: &PriceUpdate,
    ) -> Result<Repair>;

    fn delete_repair(&self, session: &Session, id: &RecordId) -> Result<()>;

    fn list_repair_types(&self, session: &Session) -> Result<Vec<RepairType>>;
}

/// Collections the report views are computed from.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub machines: Vec<Machine>,
    pub repairs: Vec<Repair>,
    pub repair_types: Vec<RepairType>,
}

impl Snapshot {
    pub fn catalog(&self) -> RepairTypeCatalog {
        RepairTypeCatalog::new(&self.repair_types)
    }
}

/// Fetch machines, repairs and repair types, filling in missing type names.
pub fn fetch_snapshot<A: TrackerApi + ?Sized>(api: &A, session: &Session) -> Result<Snapshot> {
    let machines = api.list_machines(session)?;
    let mut repairs = api.list_repairs(session)?;
    let repair_types = api.list_repair_types(session)?;
    RepairTypeCatalog::new(&repair_types).resolve_names(&mut repairs);

    tracing::info!(
        machines = machines.len(),
        repairs = repairs.len(),
        repair_types = repair_types.len(),
        "fetched snapshot"
    );
    Ok(Snapshot {
        machines,
        repairs,
        repair_types,
    })
}

/// Fetch one machine and its repairs for the detail view.
///
/// The machine comes from the full machine list, so an unknown id is
/// reported as `NotFound`.
pub fn fetch_machine_detail<A: TrackerApi + ?Sized>(
    api: &A,
    session: &Session,
    machine: &RecordId,
) -> Result<Snapshot> {
    let machines: Vec<Machine> = api
        .list_machines(session)?
        .into_iter()
        .filter(|m| &m.id == machine)
        .collect();
    if machines.is_empty() {
        return Err(TrackerError::NotFound(format!("machine {}", machine)));
    }
    let mut repairs = api.list_repairs_for_machine(session, machine)?;
    let repair_types = api.list_repair_types(session)?;
    RepairTypeCatalog::new(&repair_types).resolve_names(&mut repairs);

    Ok(Snapshot {
        machines,
        repairs,
        repair_types,
    })
}
