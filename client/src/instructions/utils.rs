use anchor_lang::AccountDeserialize;
use anyhow::Result;
use solana_sdk::{account::Account, pubkey::Pubkey};
use stake_ledger::states::{
    PriorityPool, GLOBAL_CONFIG_SEED, LEDGER_STATE_SEED, POOL_MEMBERSHIP_SEED,
    PRIORITY_POOL_SEED, USER_STAKE_INFO_SEED,
};

pub fn deserialize_anchor_account<T: AccountDeserialize>(account: &Account) -> Result<T> {
    let mut data: &[u8] = &account.data;
    T::try_deserialize(&mut data).map_err(Into::into)
}

pub fn get_global_config_address(program_id: &Pubkey) -> Pubkey {
    let (global_config, _bump) =
        Pubkey::find_program_address(&[GLOBAL_CONFIG_SEED.as_bytes()], program_id);
    global_config
}

pub fn get_authority_address(program_id: &Pubkey) -> Pubkey {
    let (authority, _bump) =
        Pubkey::find_program_address(&[stake_ledger::AUTH_SEED.as_bytes()], program_id);
    authority
}

pub fn get_ledger_state_address(program_id: &Pubkey) -> Pubkey {
    let (ledger_state, _bump) =
        Pubkey::find_program_address(&[LEDGER_STATE_SEED.as_bytes()], program_id);
    ledger_state
}

pub fn get_priority_pool_address(program_id: &Pubkey) -> Pubkey {
    let (priority_pool, _bump) =
        Pubkey::find_program_address(&[PRIORITY_POOL_SEED.as_bytes()], program_id);
    priority_pool
}

pub fn get_stake_vault_address(program_id: &Pubkey) -> Pubkey {
    let (stake_vault, _bump) =
        Pubkey::find_program_address(&[stake_ledger::STAKE_VAULT_SEED.as_bytes()], program_id);
    stake_vault
}

pub fn get_reward_vault_address(program_id: &Pubkey) -> Pubkey {
    let (reward_vault, _bump) =
        Pubkey::find_program_address(&[stake_ledger::REWARD_VAULT_SEED.as_bytes()], program_id);
    reward_vault
}

pub fn get_pool_vault_address(program_id: &Pubkey) -> Pubkey {
    let (pool_vault, _bump) =
        Pubkey::find_program_address(&[stake_ledger::POOL_VAULT_SEED.as_bytes()], program_id);
    pool_vault
}

pub fn get_user_stake_info_address(user: &Pubkey, program_id: &Pubkey) -> Pubkey {
    let (user_stake_info, _bump) = Pubkey::find_program_address(
        &[USER_STAKE_INFO_SEED.as_bytes(), user.as_ref()],
        program_id,
    );
    user_stake_info
}

pub fn get_pool_membership_address(identity: &Pubkey, program_id: &Pubkey) -> Pubkey {
    let (pool_membership, _bump) = Pubkey::find_program_address(
        &[POOL_MEMBERSHIP_SEED.as_bytes(), identity.as_ref()],
        program_id,
    );
    pool_membership
}

/// Identity whose entry `leave_pool` will move into the leaver's slot, if any.
///
/// That is the last entry of the pool, unless the leaver is the last entry.
pub fn moved_identity(pool: &PriorityPool, leaver: &Pubkey) -> Option<Pubkey> {
    pool.entries
        .last()
        .map(|entry| entry.identity)
        .filter(|identity| identity != leaver)
}

#[cfg(test)]
mod tests {
    use super::*;
    use stake_ledger::states::PoolEntry;

    fn pool_of(identities: &[Pubkey]) -> PriorityPool {
        PriorityPool {
            bump: 0,
            entries: identities
                .iter()
                .map(|identity| PoolEntry {
                    identity: *identity,
                    amount: 1,
                    name: String::new(),
                    tag: String::new(),
                    joined_at: 0,
                })
                .collect(),
        }
    }

    #[test]
    fn moved_identity_is_last_entry_other_than_leaver() {
        let (x, y, z) = (Pubkey::new_unique(), Pubkey::new_unique(), Pubkey::new_unique());
        let pool = pool_of(&[x, y, z]);
        assert_eq!(moved_identity(&pool, &y), Some(z));
        assert_eq!(moved_identity(&pool, &z), None);
        assert_eq!(moved_identity(&pool_of(&[]), &x), None);
    }

    #[test]
    fn membership_addresses_are_per_identity() {
        let program_id = stake_ledger::id();
        let (x, y) = (Pubkey::new_unique(), Pubkey::new_unique());
        assert_ne!(
            get_pool_membership_address(&x, &program_id),
            get_pool_membership_address(&y, &program_id)
        );
        assert_eq!(
            get_pool_membership_address(&x, &program_id),
            get_pool_membership_address(&x, &program_id)
        );
    }
}
