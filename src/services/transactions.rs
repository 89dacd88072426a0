//! Transaction building, sending and follow-ups.

use alloy::{
    consensus::Transaction as _,
    dyn_abi::JsonAbiExt,
    primitives::{Address, Bytes, B256, U256},
    rpc::types::{TransactionReceipt, TransactionRequest},
    sol_types::SolCall,
};
use rust_decimal::Decimal;
use std::{collections::HashMap, sync::Arc, time::Duration};
use tracing::{debug, info, warn};

use crate::{
    error::{AppError, Result},
    ethereum::{contracts::IERC20, EthereumClient, WalletManager, DEFAULT_RECEIPT_TIMEOUT},
    explorer::{result_list, ExplorerClient, InternalTxQuery, ListParams},
    types::{
        Amount, CoinTx, CommonValues, RawContract, RawTxHistory, Tx, TxArgs, TxHistory, TxOptions,
        Unit,
    },
};

use super::{require_account, require_explorer, WalletService};

/// Minimum gas price bump for a replacement transaction.
const CANCEL_GAS_PRICE_FACTOR: Decimal = Decimal::from_parts(111, 0, 0, false, 2);

/// Default gas price multiplier when speeding up.
const SPEED_UP_GAS_PRICE_FACTOR: Decimal = Decimal::from_parts(15, 0, 0, false, 1);

/// Service for signing, sending and inspecting transactions.
#[derive(Clone)]
pub struct TransactionService {
    client: Arc<EthereumClient>,
    account: Option<WalletManager>,
    wallet: WalletService,
    explorer: Option<ExplorerClient>,
}

impl TransactionService {
    /// Create a new transaction service. `explorer` is only used when it has a key.
    pub fn new(
        client: Arc<EthereumClient>,
        account: Option<WalletManager>,
        wallet: WalletService,
        explorer: Option<ExplorerClient>,
    ) -> Self {
        let explorer = explorer.filter(ExplorerClient::has_key);
        Self { client, account, wallet, explorer }
    }

    /// Current network gas price.
    pub async fn current_gas_price(&self) -> Result<Unit> {
        let gas_price = self.client.get_gas_price().await?;
        Ok(Unit::from_wei(U256::from(gas_price)))
    }

    /// Gas limit estimate for `params`.
    pub async fn estimate_gas(&self, params: &TransactionRequest) -> Result<u64> {
        self.client.estimate_gas(params).await
    }

    /// Decode calldata against a contract ABI.
    ///
    /// The calldata is `input_data` when given, else the input of the
    /// transaction `tx_hash`. Returns the function signature and named
    /// arguments.
    pub async fn decode_input_data(
        &self,
        contract: &RawContract,
        input_data: Option<Bytes>,
        tx_hash: Option<B256>,
    ) -> Result<(String, TxArgs)> {
        let input = match (input_data, tx_hash) {
            (Some(input), _) => input,
            (None, Some(hash)) => self.client.get_transaction(hash).await?.input().clone(),
            (None, None) => {
                return Err(AppError::Transaction(
                    "Specify input data or a transaction hash".into(),
                ))
            }
        };

        decode_calldata(contract, &input)
    }

    /// Fill in chain ID, nonce, sender, gas price and gas limit where missing.
    ///
    /// A zero gas price or gas limit counts as missing.
    pub async fn auto_add_params(
        &self,
        mut params: TransactionRequest,
    ) -> Result<TransactionRequest> {
        let account = require_account(&self.account)?;

        if params.chain_id.is_none() {
            params.chain_id = Some(self.client.chain_id().await?);
        }
        if params.nonce.is_none() {
            params.nonce = Some(self.wallet.nonce(None).await?);
        }
        if params.from.is_none() {
            params.from = Some(account.address());
        }
        if params.gas_price.unwrap_or_default() == 0 {
            params.gas_price = Some(self.client.get_gas_price().await?);
        }
        if params.gas.unwrap_or_default() == 0 {
            params.gas = None;
            params.gas = Some(self.estimate_gas(&params).await?);
        }

        Ok(params)
    }

    /// Sign complete parameters with the imported account.
    pub async fn sign(&self, params: TransactionRequest) -> Result<Bytes> {
        require_account(&self.account)?.sign_transaction(params).await
    }

    /// Complete, sign and broadcast a transaction.
    pub async fn sign_and_send(&self, params: TransactionRequest) -> Result<Tx> {
        let params = self.auto_add_params(params).await?;
        let hash = self.broadcast(params.clone()).await?;
        Tx::new(Some(hash), Some(params))
    }

    async fn broadcast(&self, params: TransactionRequest) -> Result<B256> {
        let raw = self.sign(params).await?;
        self.client.send_raw_transaction(&raw).await
    }

    /// Unparsed explorer history of `address` (the imported account by default).
    pub async fn raw_history(&self, address: Option<Address>) -> Result<RawTxHistory> {
        let explorer = require_explorer(&self.explorer)?;
        let address = self.resolve(address)?;
        let account = explorer.account();
        let list = ListParams::default();

        debug!(address = %address, "Fetching transaction history");
        Ok(RawTxHistory {
            address,
            coin: result_list(&account.txlist(address, list).await?),
            internal: result_list(
                &account.txlistinternal(InternalTxQuery::Address(address), list).await?,
            ),
            erc20: result_list(&account.tokentx(address, None, list).await?),
            erc721: result_list(&account.tokennfttx(address, None, list).await?),
        })
    }

    /// Normal, internal, ERC-20 and ERC-721 history of `address`, split into
    /// incoming and outgoing transactions.
    pub async fn history(&self, address: Option<Address>) -> Result<TxHistory> {
        let raw = self.raw_history(address).await?;
        TxHistory::try_from(&raw)
    }

    /// Successful transactions from `address` to `contract` whose function
    /// name contains `function_name`.
    pub async fn find_txs(
        &self,
        contract: Address,
        function_name: &str,
        address: Option<Address>,
    ) -> Result<HashMap<B256, CoinTx>> {
        let explorer = require_explorer(&self.explorer)?;
        let address = self.resolve(address)?;

        let response = explorer.account().txlist(address, ListParams::default()).await?;
        let mut txs = HashMap::new();
        for value in result_list(&response) {
            let tx: CoinTx = serde_json::from_value(value)
                .map_err(|e| AppError::Parse(format!("Invalid transaction record: {}", e)))?;
            if !tx.is_error && tx.to == Some(contract) && tx.function_name.contains(function_name) {
                txs.insert(tx.hash, tx);
            }
        }

        debug!(contract = %contract, found = txs.len(), "Matched contract transactions");
        Ok(txs)
    }

    /// Amount of `token` that `spender` may spend for `owner`
    /// (the imported account by default).
    pub async fn approved_amount(
        &self,
        token: Address,
        spender: Address,
        owner: Option<Address>,
    ) -> Result<U256> {
        let owner = self.resolve(owner)?;
        let contract = IERC20::new(token, self.client.provider().clone());
        Ok(contract.allowance(owner, spender).call().await?)
    }

    /// Wait for a receipt, 120 seconds by default.
    pub async fn wait_for_receipt(
        &self,
        hash: B256,
        timeout: Option<Duration>,
    ) -> Result<TransactionReceipt> {
        self.client.wait_for_receipt(hash, timeout.unwrap_or(DEFAULT_RECEIPT_TIMEOUT)).await
    }

    /// Send the coin (`token` is `None`) or an ERC-20 token.
    ///
    /// The amount is capped at the balance; without an amount the whole
    /// balance is sent. For coin transfers the value is further reduced so
    /// that value and gas cost fit the balance.
    pub async fn send(
        &self,
        token: Option<Address>,
        recipient: Address,
        amount: Option<Amount>,
        options: TxOptions,
    ) -> Result<Tx> {
        let account = require_account(&self.account)?;

        let decimals = match token {
            Some(token) => {
                IERC20::new(token, self.client.provider().clone()).decimals().call().await?
            }
            None => 18,
        };
        let requested = match amount {
            Some(amount) => amount.to_wei(decimals)?,
            None => U256::MAX,
        };

        let gas_price = self.gas_price(&options).await?;
        let nonce = match options.nonce {
            Some(nonce) => nonce,
            None => self.wallet.nonce(None).await?,
        };

        let (balance, amount, mut params) = match token {
            Some(token) => {
                let balance = self.wallet.token_balance(token, None).await?.wei();
                let amount = requested.min(balance);
                let data = IERC20::transferCall { to: recipient, amount }.abi_encode();
                let params = TransactionRequest::default()
                    .from(account.address())
                    .to(token)
                    .input(Bytes::from(data).into());
                (balance, amount, params)
            }
            None => {
                let balance = self.wallet.coin_balance(None).await?.wei();
                let amount = requested.min(balance);
                let params = TransactionRequest::default()
                    .from(account.address())
                    .to(recipient)
                    .value(amount);
                (balance, amount, params)
            }
        };

        if amount.is_zero() {
            return Err(AppError::InsufficientBalance);
        }

        params.nonce = Some(nonce);
        params.gas_price = Some(gas_price);
        let gas = match options.gas_limit {
            Some(gas) => gas,
            None => {
                // A value equal to the balance leaves nothing for gas and fails estimation.
                let mut estimate = params.clone();
                if token.is_none() {
                    estimate.value = Some(U256::ZERO);
                }
                self.estimate_gas(&estimate).await?
            }
        };
        params.gas = Some(gas);

        if token.is_none() {
            let fee = U256::from(gas_price).saturating_mul(U256::from(gas));
            let available = balance.saturating_sub(fee);
            if available.is_zero() {
                return Err(AppError::InsufficientBalance);
            }
            params.value = Some(amount.min(available));
        }

        info!(
            token = ?token,
            recipient = %recipient,
            amount = %params.value.unwrap_or(amount),
            nonce = nonce,
            dry_run = options.dry_run,
            "Sending"
        );

        if options.dry_run {
            return Ok(Tx::from_params(params));
        }
        self.sign_and_send(params).await
    }

    /// Allow `spender` to spend `token`; an unlimited allowance without `amount`.
    pub async fn approve(
        &self,
        token: Address,
        spender: Address,
        amount: Option<Amount>,
        options: TxOptions,
    ) -> Result<Tx> {
        let account = require_account(&self.account)?;
        let amount = self.approval_amount(token, amount).await?;

        let gas_price = self.gas_price(&options).await?;
        let nonce = match options.nonce {
            Some(nonce) => nonce,
            None => self.wallet.nonce(None).await?,
        };

        let data = IERC20::approveCall { spender, amount }.abi_encode();
        let mut params = TransactionRequest::default()
            .from(account.address())
            .to(token)
            .input(Bytes::from(data).into())
            .nonce(nonce);
        params.chain_id = Some(self.client.chain_id().await?);
        params.gas_price = Some(gas_price);
        params.gas = Some(match options.gas_limit {
            Some(gas) => gas,
            None => self.estimate_gas(&params).await?,
        });

        info!(token = %token, spender = %spender, amount = %amount, nonce = nonce, "Approving");

        if options.dry_run {
            return Ok(Tx::from_params(params));
        }
        self.sign_and_send(params).await
    }

    /// Approve `spender` only when its allowance is below `amount`
    /// (unlimited without `amount`).
    ///
    /// Returns `None` and sends nothing when the allowance already covers it.
    pub async fn approve_if_needed(
        &self,
        token: Address,
        spender: Address,
        amount: Option<Amount>,
        options: TxOptions,
    ) -> Result<Option<Tx>> {
        let required = self.approval_amount(token, amount).await?;
        let allowance = self.approved_amount(token, spender, None).await?;
        if allowance >= required {
            debug!(token = %token, spender = %spender, allowance = %allowance, "Already approved");
            return Ok(None);
        }
        self.approve(token, spender, Some(Amount::Wei(required)), options).await.map(Some)
    }

    async fn approval_amount(&self, token: Address, amount: Option<Amount>) -> Result<U256> {
        match amount {
            None => Ok(CommonValues::INFINITY),
            Some(amount @ Amount::Wei(_)) => amount.to_wei(0),
            Some(amount) => {
                let contract = IERC20::new(token, self.client.provider().clone());
                amount.to_wei(contract.decimals().call().await?)
            }
        }
    }

    /// Load the parameters of a sent transaction into `tx`.
    pub async fn parse_params<'a>(&self, tx: &'a mut Tx) -> Result<&'a TransactionRequest> {
        let hash = tx
            .hash
            .ok_or_else(|| AppError::Transaction("Transaction has not been sent".into()))?;
        let sent = self.client.get_transaction(hash).await?;

        let mut params = TransactionRequest::default()
            .from(sent.inner.signer())
            .nonce(sent.nonce())
            .value(sent.value())
            .input(sent.input().clone().into())
            .gas_limit(sent.gas_limit());
        if let Some(to) = sent.to() {
            params = params.to(to);
        }
        params.chain_id = Some(self.client.chain_id().await?);
        params.gas_price = Some(sent.gas_price().unwrap_or_else(|| sent.max_fee_per_gas()));

        Ok(tx.params.insert(params))
    }

    /// Decode the calldata of `tx` into its function identifier and arguments.
    ///
    /// Parameters are fetched first when `tx` has no calldata. Calldata that
    /// does not match the ABI leaves both fields empty.
    pub async fn decode_tx_input(&self, tx: &mut Tx, contract: &RawContract) -> Result<()> {
        let input = tx.params.as_ref().and_then(|p| p.input.input().cloned());
        let input = match input {
            Some(input) if !input.is_empty() => input,
            _ => self.parse_params(tx).await?.input.input().cloned().unwrap_or_default(),
        };

        match decode_calldata(contract, &input) {
            Ok((identifier, args)) => {
                tx.function_identifier = Some(identifier);
                tx.input_data = Some(args);
            }
            Err(e) => warn!(contract = %contract.address, error = %e, "Failed to decode calldata"),
        }
        Ok(())
    }

    /// Wait for the receipt of `tx` and store it.
    pub async fn wait_tx_receipt<'a>(
        &self,
        tx: &'a mut Tx,
        timeout: Option<Duration>,
    ) -> Result<&'a TransactionReceipt> {
        let hash = tx
            .hash
            .ok_or_else(|| AppError::Transaction("Transaction has not been sent".into()))?;
        let receipt = self.wait_for_receipt(hash, timeout).await?;
        Ok(tx.receipt.insert(receipt))
    }

    /// Replace `tx` with a zero-value transfer to self under the same nonce.
    ///
    /// The gas price is at least 1.11 times the previous one. Returns `false`
    /// when `tx` has no known nonce.
    pub async fn cancel(
        &self,
        tx: &mut Tx,
        gas_price: Option<Unit>,
        gas_limit: Option<u64>,
    ) -> Result<bool> {
        let account = require_account(&self.account)?;
        let Some(params) = tx.params.as_ref() else {
            return Ok(false);
        };
        let Some(nonce) = params.nonce else {
            return Ok(false);
        };

        let previous = Unit::from_wei(U256::from(params.gas_price.unwrap_or_default()));
        let minimum = previous.scale(CANCEL_GAS_PRICE_FACTOR)?;
        let gas_price = match gas_price {
            Some(gas_price) => gas_price,
            None => self.current_gas_price().await?,
        }
        .max(minimum);

        let mut replacement = TransactionRequest::default()
            .from(account.address())
            .to(account.address())
            .value(U256::ZERO)
            .nonce(nonce);
        replacement.chain_id = Some(self.client.chain_id().await?);
        replacement.gas_price = Some(to_u128(gas_price)?);

        info!(nonce = nonce, gas_price = %gas_price, "Cancelling transaction");
        self.replace(tx, replacement, gas_limit).await
    }

    /// Resend `tx` with a higher gas price, 1.5 times the network price by default.
    ///
    /// Returns `false` when `tx` has no known nonce.
    pub async fn speed_up(
        &self,
        tx: &mut Tx,
        gas_price: Option<Unit>,
        gas_limit: Option<u64>,
    ) -> Result<bool> {
        require_account(&self.account)?;
        let Some(params) = tx.params.as_ref().filter(|p| p.nonce.is_some()) else {
            return Ok(false);
        };
        let mut replacement = params.clone();

        let gas_price = match gas_price {
            Some(gas_price) => gas_price,
            None => self.current_gas_price().await?.scale(SPEED_UP_GAS_PRICE_FACTOR)?,
        };
        replacement.gas_price = Some(to_u128(gas_price)?);
        replacement.max_fee_per_gas = None;
        replacement.max_priority_fee_per_gas = None;

        info!(nonce = ?replacement.nonce, gas_price = %gas_price, "Speeding up transaction");
        self.replace(tx, replacement, gas_limit).await
    }

    async fn replace(
        &self,
        tx: &mut Tx,
        mut replacement: TransactionRequest,
        gas_limit: Option<u64>,
    ) -> Result<bool> {
        replacement.gas = Some(match gas_limit {
            Some(gas) => gas,
            None => self.estimate_gas(&replacement).await?,
        });

        let hash = self.broadcast(replacement.clone()).await?;
        tx.hash = Some(hash);
        tx.params = Some(replacement);
        tx.receipt = None;
        Ok(true)
    }

    /// Gas price to use, enforcing the caller's ceiling when asked.
    async fn gas_price(&self, options: &TxOptions) -> Result<u128> {
        let current = self.current_gas_price().await?;
        let gas_price = options.gas_price.unwrap_or(current);

        if options.check_gas_price && current > gas_price {
            return Err(AppError::GasPriceTooHigh {
                current: current.wei().to_string(),
                limit: gas_price.wei().to_string(),
            });
        }
        to_u128(gas_price)
    }

    fn resolve(&self, address: Option<Address>) -> Result<Address> {
        match address {
            Some(address) => Ok(address),
            None => Ok(require_account(&self.account)?.address()),
        }
    }
}

/// Match calldata to an ABI function by selector and decode its arguments.
pub fn decode_calldata(contract: &RawContract, input: &[u8]) -> Result<(String, TxArgs)> {
    if input.len() < 4 {
        return Err(AppError::Transaction("Calldata is shorter than a selector".into()));
    }
    let (selector, data) = input.split_at(4);

    let function = contract
        .abi
        .functions()
        .find(|f| f.selector().as_slice() == selector)
        .ok_or_else(|| {
            AppError::Contract(format!(
                "No function with selector 0x{} in the ABI of {}",
                alloy::hex::encode(selector),
                contract.address
            ))
        })?;

    let values = function.abi_decode_input(data)?;
    let args = function.inputs.iter().map(|p| p.name.clone()).zip(values).collect();
    Ok((function.signature(), args))
}

fn to_u128(unit: Unit) -> Result<u128> {
    unit.wei().try_into().map_err(|_| {
        AppError::NumericOverflow(format!("Gas price {} wei exceeds u128", unit.wei()))
    })
}
