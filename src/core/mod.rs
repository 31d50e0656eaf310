pub mod balance;
pub mod expense;
pub mod ledger;
pub mod participant;
pub mod transaction;
