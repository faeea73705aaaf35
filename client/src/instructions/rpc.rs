use anchor_lang::AccountDeserialize;
use anyhow::{format_err, Result};
use solana_client::{rpc_client::RpcClient, rpc_config::RpcSendTransactionConfig};
use solana_sdk::{
    commitment_config::CommitmentConfig, pubkey::Pubkey, signature::Signature,
    transaction::Transaction,
};

use super::utils::deserialize_anchor_account;

pub fn send_txn(client: &RpcClient, txn: &Transaction, wait_confirm: bool) -> Result<Signature> {
    Ok(client.send_and_confirm_transaction_with_spinner_and_config(
        txn,
        if wait_confirm {
            CommitmentConfig::confirmed()
        } else {
            CommitmentConfig::processed()
        },
        RpcSendTransactionConfig {
            skip_preflight: true,
            ..RpcSendTransactionConfig::default()
        },
    )?)
}

/// Fetches and decodes an Anchor account, `None` if it does not exist.
pub fn fetch_anchor_account<T: AccountDeserialize>(
    client: &RpcClient,
    address: &Pubkey,
) -> Result<Option<T>> {
    let account = client
        .get_account_with_commitment(address, CommitmentConfig::confirmed())?
        .value;
    account
        .map(|account| deserialize_anchor_account::<T>(&account))
        .transpose()
}

/// Like `fetch_anchor_account`, but a missing account is an error.
pub fn require_anchor_account<T: AccountDeserialize>(
    client: &RpcClient,
    address: &Pubkey,
) -> Result<T> {
    fetch_anchor_account(client, address)?
        .ok_or_else(|| format_err!("account {} not found", address))
}
