// Thu Feb 5 2026 - Alex

use crate::ledger::UserId;
use parking_lot::RwLock;
use std::collections::HashMap;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CommandToken(Uuid);

// Latest-intent token per user. Minting replaces the current token, which
// makes every in-flight operation started under an older token stale.
// Cancellation is purely cooperative: workers poll is_current and abort.
pub struct CommandRegistry {
    current: RwLock<HashMap<UserId, CommandToken>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self {
            current: RwLock::new(HashMap::new()),
        }
    }

    pub fn mint(&self, user: UserId) -> CommandToken {
        let token = CommandToken(Uuid::new_v4());
        self.current.write().insert(user, token);
        token
    }

    pub fn is_current(&self, user: UserId, token: CommandToken) -> bool {
        self.current.read().get(&user) == Some(&token)
    }

    pub fn current(&self, user: UserId) -> Option<CommandToken> {
        self.current.read().get(&user).copied()
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}
