use anyhow::{format_err, Result};
use clap::Parser;
use configparser::ini::Ini;
use solana_client::rpc_client::RpcClient;
use solana_sdk::{
    instruction::Instruction,
    pubkey::Pubkey,
    signature::{Keypair, Signer},
    transaction::Transaction,
};
use stake_ledger::states::{LedgerState, PriorityPool, UserStakeInfo};
use std::str::FromStr;

mod instructions;
mod views;
use instructions::ledger_instructions::*;
use instructions::rpc::*;
use instructions::utils::*;
use views::*;

#[derive(Clone, Debug, PartialEq)]
pub struct ClientConfig {
    http_url: String,
    ws_url: String,
    payer_path: String,
    admin_path: String,
    stake_ledger_program: Pubkey,
    stake_mint: Pubkey,
}

fn required(config: &Ini, key: &str) -> Result<String> {
    config
        .get("Global", key)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| format_err!("{} must not be empty", key))
}

fn load_cfg(client_config: &str) -> Result<ClientConfig> {
    let mut config = Ini::new();
    config.load(client_config).map_err(|e| format_err!(e))?;

    let stake_ledger_program = Pubkey::from_str(&required(&config, "stake_ledger_program")?)?;
    let stake_mint = Pubkey::from_str(&required(&config, "stake_mint")?)?;
    Ok(ClientConfig {
        http_url: required(&config, "http_url")?,
        ws_url: required(&config, "ws_url")?,
        payer_path: required(&config, "payer_path")?,
        admin_path: required(&config, "admin_path")?,
        stake_ledger_program,
        stake_mint,
    })
}

fn read_keypair_file(s: &str) -> Result<Keypair> {
    solana_sdk::signature::read_keypair_file(s)
        .map_err(|_| format_err!("failed to read keypair from {}", s))
}

#[derive(Debug, Parser)]
pub struct Opts {
    #[clap(subcommand)]
    pub command: StakeLedgerCommands,
}

#[derive(Debug, Parser)]
pub enum StakeLedgerCommands {
    InitConfig {
        #[arg(long)]
        admin: Pubkey,
        #[arg(long)]
        premium_threshold: u64,
        #[arg(long)]
        staking_enabled: bool,
        #[arg(long)]
        pool_enabled: bool,
    },
    /// 0 = admin (pass --admin), 1 = staking_enabled, 2 = pool_enabled
    UpdateConfig {
        #[arg(long)]
        param: u8,
        #[arg(long, default_value_t = 0)]
        value: u64,
        #[arg(long)]
        admin: Option<Pubkey>,
    },
    /// Lock classes: 0 none, 1 = 30d, 2 = 90d, 3 = 180d, 4 = 365d
    Stake {
        #[arg(long)]
        amount: u64,
        #[arg(long, default_value_t = 0)]
        lock_period: u8,
    },
    Unstake {
        #[arg(long)]
        position: u32,
    },
    Claim {},
    ClaimPosition {
        #[arg(long)]
        position: u32,
    },
    DepositRevenue {
        #[arg(long)]
        amount: u64,
    },
    JoinPool {
        #[arg(long)]
        amount: u64,
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        tag: String,
    },
    IncreasePool {
        #[arg(long)]
        extra: u64,
    },
    LeavePool {},
    ShowStakes {
        #[arg(long)]
        owner: Option<Pubkey>,
        #[arg(long)]
        json: bool,
    },
    ShowPool {
        #[arg(long)]
        ranked: bool,
        #[arg(long)]
        json: bool,
    },
    ShowStats {
        #[arg(long)]
        json: bool,
    },
}

fn send(rpc_client: &RpcClient, payer: &Keypair, instructions: Vec<Instruction>) -> Result<()> {
    let signers = vec![payer];
    let recent_hash = rpc_client.get_latest_blockhash()?;
    let txn = Transaction::new_signed_with_payer(
        &instructions,
        Some(&payer.pubkey()),
        &signers,
        recent_hash,
    );
    let signature = send_txn(rpc_client, &txn, true)?;
    println!("{}", signature);
    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> Result<()> {
    let client_config = "client_config.ini";
    let config = load_cfg(client_config)?;
    let payer = read_keypair_file(&config.payer_path)?;
    let rpc_client = RpcClient::new(config.http_url.to_string());
    let program_id = config.stake_ledger_program;

    let opts = Opts::parse();
    match opts.command {
        StakeLedgerCommands::InitConfig {
            admin: config_admin,
            premium_threshold,
            staking_enabled,
            pool_enabled,
        } => {
            let ixs = initialise_configs_instr(
                &config,
                config_admin,
                premium_threshold,
                staking_enabled,
                pool_enabled,
            )?;
            send(&rpc_client, &read_keypair_file(&config.admin_path)?, ixs)?;
        }
        StakeLedgerCommands::UpdateConfig {
            param,
            value,
            admin: new_admin,
        } => {
            let ixs = update_config_instr(&config, param, value, new_admin)?;
            send(&rpc_client, &read_keypair_file(&config.admin_path)?, ixs)?;
        }
        StakeLedgerCommands::Stake {
            amount,
            lock_period,
        } => {
            let ixs = open_stake_instr(&config, amount, lock_period)?;
            send(&rpc_client, &payer, ixs)?;
        }
        StakeLedgerCommands::Unstake { position } => {
            let ixs = close_stake_instr(&config, position)?;
            send(&rpc_client, &payer, ixs)?;
        }
        StakeLedgerCommands::Claim {} => {
            let ixs = claim_instr(&config, None)?;
            send(&rpc_client, &payer, ixs)?;
        }
        StakeLedgerCommands::ClaimPosition { position } => {
            let ixs = claim_instr(&config, Some(position))?;
            send(&rpc_client, &payer, ixs)?;
        }
        StakeLedgerCommands::DepositRevenue { amount } => {
            let ixs = deposit_revenue_instr(&config, amount)?;
            send(&rpc_client, &payer, ixs)?;
        }
        StakeLedgerCommands::JoinPool { amount, name, tag } => {
            let ixs = join_pool_instr(&config, amount, name, tag)?;
            send(&rpc_client, &payer, ixs)?;
        }
        StakeLedgerCommands::IncreasePool { extra } => {
            let ixs = increase_pool_entry_instr(&config, extra)?;
            send(&rpc_client, &payer, ixs)?;
        }
        StakeLedgerCommands::LeavePool {} => {
            let pool: PriorityPool =
                require_anchor_account(&rpc_client, &get_priority_pool_address(&program_id))?;
            let moved = moved_identity(&pool, &payer.pubkey());
            let ixs = leave_pool_instr(&config, moved)?;
            send(&rpc_client, &payer, ixs)?;
        }
        StakeLedgerCommands::ShowStakes { owner, json } => {
            let owner = owner.unwrap_or_else(|| payer.pubkey());
            let ledger: LedgerState =
                require_anchor_account(&rpc_client, &get_ledger_state_address(&program_id))?;
            let account: UserStakeInfo = fetch_anchor_account(
                &rpc_client,
                &get_user_stake_info_address(&owner, &program_id),
            )?
            .unwrap_or_default();
            let report = StakesReport::build(&owner, &ledger, &account)?;
            if json {
                print_json(&report)?;
            } else {
                report.print();
            }
        }
        StakeLedgerCommands::ShowPool { ranked, json } => {
            let pool: PriorityPool =
                require_anchor_account(&rpc_client, &get_priority_pool_address(&program_id))?;
            let entries = pool_report(&pool, ranked);
            if json {
                print_json(&entries)?;
            } else {
                print_pool(&entries, ranked);
            }
        }
        StakeLedgerCommands::ShowStats { json } => {
            let ledger: LedgerState =
                require_anchor_account(&rpc_client, &get_ledger_state_address(&program_id))?;
            let pool: PriorityPool =
                require_anchor_account(&rpc_client, &get_priority_pool_address(&program_id))?;
            let report = StatsReport::build(&ledger, &pool);
            if json {
                print_json(&report)?;
            } else {
                report.print();
            }
        }
    }
    Ok(())
}
