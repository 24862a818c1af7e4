//! In-memory chain client for tests. Records every call.

use alloy::primitives::{Address, Bytes, TxHash, U256};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use super::rpc_client::ChainClient;
use crate::exchanges::types::{Confirmation, ContractCall};
use crate::shared::errors::ChainError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainEvent {
    NativeBalance,
    TokenBalance(Address),
    Nonce(u64),
    Read(Address),
    Submit(&'static str, u64),
    Confirm(&'static str),
}

#[derive(Default)]
struct State {
    native: U256,
    tokens: HashMap<Address, U256>,
    nonce: u64,
    read_response: Option<Bytes>,
    fail_submit: HashSet<&'static str>,
    fail_confirm: HashSet<&'static str>,
    fail_balances: bool,
    pending: HashMap<TxHash, &'static str>,
    submissions: Vec<ContractCall>,
    events: Vec<ChainEvent>,
}

pub struct ScriptedChainClient {
    address: Address,
    state: Mutex<State>,
}

impl ScriptedChainClient {
    pub fn new(native: U256) -> Self {
        Self {
            address: Address::with_last_byte(0xaa),
            state: Mutex::new(State {
                native,
                ..State::default()
            }),
        }
    }

    pub fn with_token(self, token: Address, balance: U256) -> Self {
        self.state.lock().unwrap().tokens.insert(token, balance);
        self
    }

    pub fn with_read_response(self, data: Bytes) -> Self {
        self.state.lock().unwrap().read_response = Some(data);
        self
    }

    /// Every `submit` of a call with this label fails
    pub fn failing_submit(self, label: &'static str) -> Self {
        self.state.lock().unwrap().fail_submit.insert(label);
        self
    }

    /// Every receipt of a call with this label is reverted
    pub fn reverting(self, label: &'static str) -> Self {
        self.state.lock().unwrap().fail_confirm.insert(label);
        self
    }

    pub fn failing_balances(self) -> Self {
        self.state.lock().unwrap().fail_balances = true;
        self
    }

    pub fn set_token_balance(&self, token: Address, balance: U256) {
        self.state.lock().unwrap().tokens.insert(token, balance);
    }

    pub fn events(&self) -> Vec<ChainEvent> {
        self.state.lock().unwrap().events.clone()
    }

    pub fn submissions(&self) -> Vec<ContractCall> {
        self.state.lock().unwrap().submissions.clone()
    }

    pub fn submitted_labels(&self) -> Vec<&'static str> {
        self.submissions().iter().map(|c| c.label).collect()
    }
}

#[async_trait]
impl ChainClient for ScriptedChainClient {
    fn address(&self) -> Address {
        self.address
    }

    async fn native_balance(&self) -> Result<U256, ChainError> {
        let mut state = self.state.lock().unwrap();
        state.events.push(ChainEvent::NativeBalance);
        if state.fail_balances {
            return Err(ChainError::Rpc("get balance", "scripted failure".to_string()));
        }
        Ok(state.native)
    }

    async fn token_balance(&self, token: Address) -> Result<U256, ChainError> {
        let mut state = self.state.lock().unwrap();
        state.events.push(ChainEvent::TokenBalance(token));
        Ok(state.tokens.get(&token).copied().unwrap_or_default())
    }

    async fn pending_nonce(&self) -> Result<u64, ChainError> {
        let mut state = self.state.lock().unwrap();
        let nonce = state.nonce;
        state.events.push(ChainEvent::Nonce(nonce));
        Ok(nonce)
    }

    async fn read(&self, to: Address, _data: Bytes) -> Result<Bytes, ChainError> {
        let mut state = self.state.lock().unwrap();
        state.events.push(ChainEvent::Read(to));
        state
            .read_response
            .clone()
            .ok_or_else(|| ChainError::Rpc("eth_call", "no scripted response".to_string()))
    }

    async fn submit(&self, call: &ContractCall, nonce: u64) -> Result<TxHash, ChainError> {
        let mut state = self.state.lock().unwrap();
        state.events.push(ChainEvent::Submit(call.label, nonce));
        if state.fail_submit.contains(call.label) {
            return Err(ChainError::Rpc("send transaction", "scripted rejection".to_string()));
        }
        state.submissions.push(call.clone());
        state.nonce += 1;
        let tx_hash = TxHash::with_last_byte(state.submissions.len() as u8);
        state.pending.insert(tx_hash, call.label);
        Ok(tx_hash)
    }

    async fn confirm(&self, tx_hash: TxHash) -> Result<Confirmation, ChainError> {
        let mut state = self.state.lock().unwrap();
        let label = state.pending.remove(&tx_hash).unwrap_or("unknown");
        state.events.push(ChainEvent::Confirm(label));
        if state.fail_confirm.contains(label) {
            return Err(ChainError::Reverted(tx_hash.to_string()));
        }
        Ok(Confirmation {
            tx_hash,
            block_number: Some(1_000 + state.submissions.len() as u64),
            gas_used: Some(21_000),
        })
    }
}
