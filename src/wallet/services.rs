/// Memo attached to account-creation transactions.
pub const CREATE_ACCOUNT_MEMO: &str = "account created";

/// Starting balance for a newly created on-chain account. The grant is paid
/// once per device; a device that already bound a wallet gets nothing.
pub fn starting_balance(device_seen: bool, grant: i64) -> i64 {
    if device_seen {
        0
    } else {
        grant
    }
}
