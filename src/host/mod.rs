//! Collaborators supplied by the host application

mod messenger;
mod transaction;

pub use messenger::{Messenger, TracingMessenger};
pub use transaction::{JournalTransactions, Relocation, Transaction, TransactionFactory};
