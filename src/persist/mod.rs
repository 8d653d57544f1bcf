//! Persistence: backups of original values and boot-time drop-ins.
pub mod backup;
pub mod dropin;
pub mod reload;

pub use backup::{BackupRecord, BackupStore, RestoreOutcome, restore};
pub use dropin::DropIns;
pub use reload::{Reloader, SystemReloader};
