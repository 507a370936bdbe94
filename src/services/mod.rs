// Stock transaction engine
pub mod documents;
pub mod history;
pub mod ledger;
pub mod movements;
