use anchor_client::{Client, Cluster, Program};
use anchor_lang::prelude::AccountMeta;
use anyhow::Result;
use solana_sdk::{instruction::Instruction, pubkey::Pubkey, signature::Keypair, system_program};
use spl_associated_token_account::get_associated_token_address;
use std::rc::Rc;

use stake_ledger::accounts as ledger_accounts;
use stake_ledger::instruction as ledger_instructions;

use crate::instructions::utils::{
    get_authority_address, get_global_config_address, get_ledger_state_address,
    get_pool_membership_address, get_pool_vault_address, get_priority_pool_address,
    get_reward_vault_address, get_stake_vault_address, get_user_stake_info_address,
};

use super::super::{read_keypair_file, ClientConfig};

fn program_for(config: &ClientConfig) -> Result<Program<Rc<Keypair>>> {
    program_signed_by(config, &config.payer_path)
}

/// Admin instructions are paid for and signed by the admin keypair.
fn admin_program_for(config: &ClientConfig) -> Result<Program<Rc<Keypair>>> {
    program_signed_by(config, &config.admin_path)
}

fn program_signed_by(config: &ClientConfig, keypair_path: &str) -> Result<Program<Rc<Keypair>>> {
    let payer = read_keypair_file(keypair_path)?;
    let url = Cluster::Custom(config.http_url.clone(), config.ws_url.clone());
    let client = Client::new(url, Rc::new(payer));
    Ok(client.program(config.stake_ledger_program)?)
}

pub fn initialise_configs_instr(
    config: &ClientConfig,
    admin: Pubkey,
    premium_threshold: u64,
    staking_enabled: bool,
    pool_enabled: bool,
) -> Result<Vec<Instruction>> {
    let program = admin_program_for(config)?;

    let instructions = program
        .request()
        .accounts(ledger_accounts::InitialiseConfigs {
            owner: program.payer(),
            authority: get_authority_address(&program.id()),
            global_config: get_global_config_address(&program.id()),
            ledger_state: get_ledger_state_address(&program.id()),
            priority_pool: get_priority_pool_address(&program.id()),
            stake_mint: config.stake_mint,
            stake_vault: get_stake_vault_address(&program.id()),
            reward_vault: get_reward_vault_address(&program.id()),
            pool_vault: get_pool_vault_address(&program.id()),
            token_program: spl_token::id(),
            system_program: system_program::id(),
        })
        .args(ledger_instructions::InitialiseConfigs {
            admin,
            premium_threshold,
            staking_enabled,
            pool_enabled,
        })
        .instructions()?;
    Ok(instructions)
}

pub fn update_config_instr(
    config: &ClientConfig,
    param: u8,
    value: u64,
    new_admin: Option<Pubkey>,
) -> Result<Vec<Instruction>> {
    let program = admin_program_for(config)?;

    let mut ixs = program
        .request()
        .accounts(ledger_accounts::UpdateConfig {
            owner: program.payer(),
            global_config: get_global_config_address(&program.id()),
            system_program: system_program::id(),
        })
        .args(ledger_instructions::UpdateConfig { param, value })
        .instructions()?;

    if let Some(admin) = new_admin {
        ixs[0].accounts.push(AccountMeta::new_readonly(admin, false));
    }
    Ok(ixs)
}

pub fn open_stake_instr(
    config: &ClientConfig,
    amount: u64,
    lock_period: u8,
) -> Result<Vec<Instruction>> {
    let program = program_for(config)?;
    let owner = program.payer();

    let instructions = program
        .request()
        .accounts(ledger_accounts::OpenStake {
            owner,
            global_config: get_global_config_address(&program.id()),
            ledger_state: get_ledger_state_address(&program.id()),
            user_stake_info: get_user_stake_info_address(&owner, &program.id()),
            stake_mint: config.stake_mint,
            owner_token: get_associated_token_address(&owner, &config.stake_mint),
            stake_vault: get_stake_vault_address(&program.id()),
            token_program: spl_token::id(),
            system_program: system_program::id(),
        })
        .args(ledger_instructions::OpenStake {
            amount,
            lock_period,
        })
        .instructions()?;
    Ok(instructions)
}

pub fn close_stake_instr(config: &ClientConfig, position_index: u32) -> Result<Vec<Instruction>> {
    let program = program_for(config)?;
    let owner = program.payer();

    let instructions = program
        .request()
        .accounts(ledger_accounts::CloseStake {
            owner,
            global_config: get_global_config_address(&program.id()),
            ledger_state: get_ledger_state_address(&program.id()),
            user_stake_info: get_user_stake_info_address(&owner, &program.id()),
            authority: get_authority_address(&program.id()),
            stake_mint: config.stake_mint,
            owner_token: get_associated_token_address(&owner, &config.stake_mint),
            stake_vault: get_stake_vault_address(&program.id()),
            reward_vault: get_reward_vault_address(&program.id()),
            token_program: spl_token::id(),
            associated_token_program: spl_associated_token_account::id(),
            system_program: system_program::id(),
        })
        .args(ledger_instructions::CloseStake { position_index })
        .instructions()?;
    Ok(instructions)
}

/// Claims every open position, or only `position_index` when given.
pub fn claim_instr(config: &ClientConfig, position_index: Option<u32>) -> Result<Vec<Instruction>> {
    let program = program_for(config)?;
    let owner = program.payer();

    let request = program.request().accounts(ledger_accounts::ClaimRewards {
        owner,
        global_config: get_global_config_address(&program.id()),
        ledger_state: get_ledger_state_address(&program.id()),
        user_stake_info: get_user_stake_info_address(&owner, &program.id()),
        authority: get_authority_address(&program.id()),
        stake_mint: config.stake_mint,
        owner_token: get_associated_token_address(&owner, &config.stake_mint),
        reward_vault: get_reward_vault_address(&program.id()),
        token_program: spl_token::id(),
        associated_token_program: spl_associated_token_account::id(),
        system_program: system_program::id(),
    });
    let instructions = match position_index {
        Some(position_index) => request
            .args(ledger_instructions::ClaimPosition { position_index })
            .instructions()?,
        None => request
            .args(ledger_instructions::ClaimRewards {})
            .instructions()?,
    };
    Ok(instructions)
}

pub fn deposit_revenue_instr(config: &ClientConfig, amount: u64) -> Result<Vec<Instruction>> {
    let program = program_for(config)?;
    let depositor = program.payer();

    let instructions = program
        .request()
        .accounts(ledger_accounts::DepositRevenue {
            depositor,
            global_config: get_global_config_address(&program.id()),
            ledger_state: get_ledger_state_address(&program.id()),
            stake_mint: config.stake_mint,
            depositor_token: get_associated_token_address(&depositor, &config.stake_mint),
            reward_vault: get_reward_vault_address(&program.id()),
            token_program: spl_token::id(),
        })
        .args(ledger_instructions::DepositRevenue { amount })
        .instructions()?;
    Ok(instructions)
}

pub fn join_pool_instr(
    config: &ClientConfig,
    amount: u64,
    name: String,
    tag: String,
) -> Result<Vec<Instruction>> {
    let program = program_for(config)?;
    let identity = program.payer();

    let instructions = program
        .request()
        .accounts(ledger_accounts::JoinPool {
            identity,
            global_config: get_global_config_address(&program.id()),
            priority_pool: get_priority_pool_address(&program.id()),
            pool_membership: get_pool_membership_address(&identity, &program.id()),
            stake_mint: config.stake_mint,
            identity_token: get_associated_token_address(&identity, &config.stake_mint),
            pool_vault: get_pool_vault_address(&program.id()),
            token_program: spl_token::id(),
            system_program: system_program::id(),
        })
        .args(ledger_instructions::JoinPool { amount, name, tag })
        .instructions()?;
    Ok(instructions)
}

pub fn increase_pool_entry_instr(config: &ClientConfig, extra: u64) -> Result<Vec<Instruction>> {
    let program = program_for(config)?;
    let identity = program.payer();

    let instructions = program
        .request()
        .accounts(ledger_accounts::IncreasePoolEntry {
            identity,
            global_config: get_global_config_address(&program.id()),
            priority_pool: get_priority_pool_address(&program.id()),
            pool_membership: get_pool_membership_address(&identity, &program.id()),
            stake_mint: config.stake_mint,
            identity_token: get_associated_token_address(&identity, &config.stake_mint),
            pool_vault: get_pool_vault_address(&program.id()),
            token_program: spl_token::id(),
        })
        .args(ledger_instructions::IncreasePoolEntry { extra })
        .instructions()?;
    Ok(instructions)
}

/// `moved` is the identity of the pool's last entry when it is not the
/// payer's own; see `utils::moved_identity`.
pub fn leave_pool_instr(config: &ClientConfig, moved: Option<Pubkey>) -> Result<Vec<Instruction>> {
    let program = program_for(config)?;
    let identity = program.payer();

    let instructions = program
        .request()
        .accounts(ledger_accounts::LeavePool {
            identity,
            global_config: get_global_config_address(&program.id()),
            priority_pool: get_priority_pool_address(&program.id()),
            pool_membership: get_pool_membership_address(&identity, &program.id()),
            moved_membership: moved
                .map(|moved| get_pool_membership_address(&moved, &program.id())),
            authority: get_authority_address(&program.id()),
            stake_mint: config.stake_mint,
            identity_token: get_associated_token_address(&identity, &config.stake_mint),
            pool_vault: get_pool_vault_address(&program.id()),
            token_program: spl_token::id(),
            associated_token_program: spl_associated_token_account::id(),
            system_program: system_program::id(),
        })
        .args(ledger_instructions::LeavePool {})
        .instructions()?;
    Ok(instructions)
}
