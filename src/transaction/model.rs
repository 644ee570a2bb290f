use serde::{Deserialize, Serialize};
use serde_json::Number;

/// A value transfer waiting for (or recorded in) a block.
///
/// Fields are taken as given: the ledger does not check that `amount` is
/// positive or that the parties are non-empty. Callers that need such a
/// policy must enforce it before queueing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub sender: String,
    pub recipient: String,
    /// Kept as a JSON number so integer and float amounts hash exactly as received.
    pub amount: Number,
}

impl Transaction {
    pub fn new(sender: impl Into<String>, recipient: impl Into<String>, amount: Number) -> Self {
        Self {
            sender: sender.into(),
            recipient: recipient.into(),
            amount,
        }
    }
}
