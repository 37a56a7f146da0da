//! Domain model shared by the engine, the API client and the CLI.
//!
//! Everything here mirrors the JSON the remote API produces. Deserialization
//! is forgiving: identifiers may be numbers or strings, prices may be
//! numbers, strings or null, text fields accept any scalar, and timestamps
//! are kept verbatim and parsed only when a caller asks for them.

mod id;
mod payloads;
mod price;
mod types;

pub use id::RecordId;
pub use payloads::{NewMachine, NewRepair, PriceUpdate, RepairKind, DEFAULT_MACHINE_DESCRIPTION};
pub use price::Price;
pub use types::{
    Machine, Repair, RepairType, RepairTypeCatalog, Session, TokenResponse, UserDetails,
    UserProfile,
};
