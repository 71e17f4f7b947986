use std::collections::HashSet;

use crate::domain::value_objects::UserId;

/// Who is issuing a command, and from which guild
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub user_id: UserId,
    pub guild_id: Option<u64>,
}

impl Actor {
    pub fn new(user_id: impl Into<UserId>, guild_id: Option<u64>) -> Self {
        Self {
            user_id: user_id.into(),
            guild_id,
        }
    }
}

/// Admin and guild allow-listing rules
#[derive(Debug, Clone, Default)]
pub struct AccessPolicy {
    admin_user_ids: HashSet<u64>,
    config_guild_id: Option<u64>,
    allowed_guild_ids: HashSet<u64>,
}

impl AccessPolicy {
    pub fn new(
        admin_user_ids: HashSet<u64>,
        config_guild_id: Option<u64>,
        allowed_guild_ids: HashSet<u64>,
    ) -> Self {
        Self {
            admin_user_ids,
            config_guild_id,
            allowed_guild_ids,
        }
    }

    /// An empty admin list admits everyone; a config guild pins admin commands to it
    pub fn is_admin(&self, actor: &Actor) -> bool {
        if !self.admin_user_ids.is_empty() && !self.admin_user_ids.contains(&actor.user_id.as_u64())
        {
            return false;
        }
        if let Some(config_guild) = self.config_guild_id {
            if actor.guild_id != Some(config_guild) {
                return false;
            }
        }
        true
    }

    /// An empty allow-list admits every guild
    pub fn is_guild_allowed(&self, guild_id: u64) -> bool {
        self.allowed_guild_ids.is_empty() || self.allowed_guild_ids.contains(&guild_id)
    }

    /// Guilds the command set should be registered in, sorted
    pub fn allowed_guilds(&self) -> Vec<u64> {
        let mut guilds: Vec<u64> = self.allowed_guild_ids.iter().copied().collect();
        guilds.sort_unstable();
        guilds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(admins: &[u64], config_guild: Option<u64>, guilds: &[u64]) -> AccessPolicy {
        AccessPolicy::new(
            admins.iter().copied().collect(),
            config_guild,
            guilds.iter().copied().collect(),
        )
    }

    #[test]
    fn test_open_policy_admits_everyone() {
        let open = policy(&[], None, &[]);
        assert!(open.is_admin(&Actor::new(5, None)));
        assert!(open.is_guild_allowed(123));
    }

    #[test]
    fn test_admin_list_restricts_users() {
        let p = policy(&[1, 2], None, &[]);
        assert!(p.is_admin(&Actor::new(1, Some(9))));
        assert!(!p.is_admin(&Actor::new(3, Some(9))));
    }

    #[test]
    fn test_config_guild_pins_admin_commands() {
        let p = policy(&[1], Some(77), &[]);
        assert!(p.is_admin(&Actor::new(1, Some(77))));
        assert!(!p.is_admin(&Actor::new(1, Some(78))));
        assert!(!p.is_admin(&Actor::new(1, None)));
    }

    #[test]
    fn test_guild_allow_list() {
        let p = policy(&[], None, &[30, 10]);
        assert!(p.is_guild_allowed(10));
        assert!(!p.is_guild_allowed(20));
        assert_eq!(p.allowed_guilds(), vec![10, 30]);
    }
}
