//! Repository implementations

mod account;
mod admin;
mod archive;
mod complaint;
mod transaction;

pub use account::AccountRepo;
pub use admin::AdminRepo;
pub use archive::ArchiveRepo;
pub use complaint::ComplaintRepo;
pub use transaction::TransactionRepo;
