pub mod add;
pub mod delete;
pub mod edit_price;
pub mod show;
pub mod types;

pub use add::handle_add;
pub use delete::handle_delete;
pub use edit_price::handle_edit_price;
pub use show::handle_show;
pub use types::handle_types;

use mtrack_core::model::{RecordId, Repair, RepairTypeCatalog, Session};
use mtrack_core::{HttpApi, TrackerApi};

use crate::app::is_read_only_role;
use crate::errors::CliError;

/// Refuse price edits and deletes for the read-only role.
fn require_write_access(api: &HttpApi, session: &Session) -> anyhow::Result<()> {
    let profile = api.user_profile(session)?;
    if is_read_only_role(profile.role.as_deref()) {
        let role = profile.role.unwrap_or_default();
        return Err(CliError::auth_failed_with_hint(
            format!("The '{}' role can view repairs but not change them", role.trim()),
            "Hint: Sign in with a technician account to edit or delete repairs.",
        )
        .into());
    }
    Ok(())
}

/// Fetch one repair and fill in its type name from the catalog.
fn fetch_repair(api: &HttpApi, session: &Session, id: &RecordId) -> anyhow::Result<Repair> {
    let mut repair = api.get_repair(session, id)?;
    if repair.repair_type_name.is_none() && repair.repair_type.is_some() {
        let types = api.list_repair_types(session)?;
        RepairTypeCatalog::new(&types).resolve_names(std::slice::from_mut(&mut repair));
    }
    Ok(repair)
}
