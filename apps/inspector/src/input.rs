//! Player input mapping. Keyboard and pointer feed the same guarded decision path.

use serde::Serialize;

use crate::domain::ledger::Choice;

/// Where a decision came from. Logged only; both channels obey the same guards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InputChannel {
    Pointer,
    Keyboard,
}

/// `v`/`V` stamps VALID, `i`/`I` stamps INVALID. Everything else is ignored.
pub fn choice_for_key(key: char) -> Option<Choice> {
    match key {
        'v' | 'V' => Some(Choice::Valid),
        'i' | 'I' => Some(Choice::Invalid),
        _ => None,
    }
}
