mod client;

pub use client::{HttpLedger, LedgerClient};
