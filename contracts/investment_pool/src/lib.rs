#![no_std]

mod auth;
mod distribution;
mod error;
mod events;
mod storage;

use error::Error;
use events::*;
use storage::{Contribution, PoolConfig, PoolState, PoolStatus, PAGE_SIZE, PERMILLE};

use soroban_sdk::{contract, contractimpl, token, vec, Address, Env, IntoVal, Symbol, Val, Vec};

#[contract]
pub struct InvestmentPool;

#[contractimpl]
impl InvestmentPool {
    // ============================================
    // INITIALIZATION
    // ============================================

    /// Initialize the pool
    ///
    /// The investment address and pool token may be left unbound here and
    /// bound later with `set_investment_address` / `set_token_address`,
    /// for pools created before their crowdsale exists. A cap, limit or
    /// the service account set to zero/`None` means "no limit"/"unset".
    ///
    /// # Errors
    /// - `AlreadyInitialized`: Contract already initialized
    /// - `InvalidTimeOrdering`: start >= end, or end not in the future
    /// - `InvalidConfig`: negative cap/limit, soft cap above hard cap,
    ///   min above max, or reward rate >= 1000
    pub fn initialize(
        env: Env,
        owner: Address,
        funding_token: Address,
        investment_address: Option<Address>,
        pool_token: Option<Address>,
        service_account: Option<Address>,
        start_time: u64,
        end_time: u64,
        soft_cap: i128,
        hard_cap: i128,
        min_contribution: i128,
        max_contribution: i128,
        reward_permille: u32,
        whitelist_enabled: bool,
        public_finalize: bool,
    ) -> Result<(), Error> {
        if storage::has_config(&env) {
            return Err(Error::AlreadyInitialized);
        }

        owner.require_auth();

        if start_time >= end_time || end_time <= env.ledger().timestamp() {
            return Err(Error::InvalidTimeOrdering);
        }
        if reward_permille as i128 >= PERMILLE {
            return Err(Error::InvalidConfig);
        }
        if soft_cap < 0 || hard_cap < 0 || min_contribution < 0 || max_contribution < 0 {
            return Err(Error::InvalidConfig);
        }
        if soft_cap > 0 && hard_cap > 0 && soft_cap > hard_cap {
            return Err(Error::InvalidConfig);
        }
        if min_contribution > 0 && max_contribution > 0 && min_contribution > max_contribution {
            return Err(Error::InvalidConfig);
        }

        storage::save_config(
            &env,
            &PoolConfig {
                owner,
                funding_token,
                service_account,
                soft_cap,
                hard_cap,
                min_contribution,
                max_contribution,
                reward_permille,
                whitelist_enabled,
                public_finalize,
            },
        );
        storage::save_state(
            &env,
            &PoolState {
                status: PoolStatus::Open,
                start_time,
                end_time,
                investment_address,
                pool_token,
                total_raised: 0,
                total_withdrawn: 0,
                reward_withdrawn: 0,
                contributor_count: 0,
            },
        );

        Ok(())
    }

    // ============================================
    // TIME WINDOW & BINDING
    // ============================================

    /// Move the start of the contribution window
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `WrongPhase`: Pool already cancelled or finalized
    /// - `InvalidTimeOrdering`: Window already started, or new start not
    ///   before the end time
    pub fn set_start_time(env: Env, new_start: u64) -> Result<(), Error> {
        let (config, mut state) = Self::load(&env)?;
        auth::require_owner(&config);
        Self::require_open(&state)?;

        let now = env.ledger().timestamp();
        if now >= state.start_time || new_start >= state.end_time {
            return Err(Error::InvalidTimeOrdering);
        }

        state.start_time = new_start;
        storage::save_state(&env, &state);

        env.events().publish(
            (Symbol::new(&env, "times_updated"),),
            TimesUpdatedEvent {
                start_time: state.start_time,
                end_time: state.end_time,
            },
        );

        Ok(())
    }

    /// Move the end of the contribution window
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `WrongPhase`: Pool already cancelled or finalized
    /// - `InvalidTimeOrdering`: Window already ended, or new end not in
    ///   the future past the start time
    pub fn set_end_time(env: Env, new_end: u64) -> Result<(), Error> {
        let (config, mut state) = Self::load(&env)?;
        auth::require_owner(&config);
        Self::require_open(&state)?;

        let now = env.ledger().timestamp();
        if now >= state.end_time || new_end <= now || new_end <= state.start_time {
            return Err(Error::InvalidTimeOrdering);
        }

        state.end_time = new_end;
        storage::save_state(&env, &state);

        env.events().publish(
            (Symbol::new(&env, "times_updated"),),
            TimesUpdatedEvent {
                start_time: state.start_time,
                end_time: state.end_time,
            },
        );

        Ok(())
    }

    /// Move both window boundaries in one call
    ///
    /// The start may only change while the window has not started yet;
    /// the end may only change while it has not passed.
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `WrongPhase`: Pool already cancelled or finalized
    /// - `InvalidTimeOrdering`: A passed boundary was edited, start >= end,
    ///   or the new end is not in the future
    pub fn set_times(env: Env, new_start: u64, new_end: u64) -> Result<(), Error> {
        let (config, mut state) = Self::load(&env)?;
        auth::require_owner(&config);
        Self::require_open(&state)?;

        let now = env.ledger().timestamp();
        if now >= state.end_time {
            return Err(Error::InvalidTimeOrdering);
        }
        if new_start != state.start_time && now >= state.start_time {
            return Err(Error::InvalidTimeOrdering);
        }
        if new_start >= new_end || new_end <= now {
            return Err(Error::InvalidTimeOrdering);
        }

        state.start_time = new_start;
        state.end_time = new_end;
        storage::save_state(&env, &state);

        env.events().publish(
            (Symbol::new(&env, "times_updated"),),
            TimesUpdatedEvent {
                start_time: new_start,
                end_time: new_end,
            },
        );

        Ok(())
    }

    /// Bind the crowdsale the raise will be forwarded to
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `WrongPhase`: Pool already cancelled or finalized
    /// - `AlreadyBound`: Investment address was already set
    pub fn set_investment_address(env: Env, investment_address: Address) -> Result<(), Error> {
        let (config, mut state) = Self::load(&env)?;
        auth::require_owner(&config);
        Self::require_open(&state)?;

        if state.investment_address.is_some() {
            return Err(Error::AlreadyBound);
        }

        state.investment_address = Some(investment_address.clone());
        storage::save_state(&env, &state);

        env.events().publish(
            (Symbol::new(&env, "investment_set"),),
            InvestmentAddressSetEvent { investment_address },
        );

        Ok(())
    }

    /// Bind the token the crowdsale pays out
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `WrongPhase`: Pool already cancelled or finalized
    /// - `AlreadyBound`: Pool token was already set
    pub fn set_token_address(env: Env, pool_token: Address) -> Result<(), Error> {
        let (config, mut state) = Self::load(&env)?;
        auth::require_owner(&config);
        Self::require_open(&state)?;

        if state.pool_token.is_some() {
            return Err(Error::AlreadyBound);
        }

        state.pool_token = Some(pool_token.clone());
        storage::save_state(&env, &state);

        env.events().publish(
            (Symbol::new(&env, "token_set"),),
            TokenAddressSetEvent { pool_token },
        );

        Ok(())
    }

    // ============================================
    // WHITELIST
    // ============================================

    /// Approve a single account for contribution
    pub fn add_to_whitelist(env: Env, account: Address) -> Result<(), Error> {
        let (config, _) = Self::load(&env)?;
        auth::require_owner(&config);

        storage::set_whitelisted(&env, &account);

        env.events().publish(
            (Symbol::new(&env, "whitelist_added"),),
            WhitelistAddedEvent { count: 1 },
        );

        Ok(())
    }

    /// Approve a batch of accounts; each entry is an O(1) insert
    pub fn add_many_to_whitelist(env: Env, accounts: Vec<Address>) -> Result<(), Error> {
        let (config, _) = Self::load(&env)?;
        auth::require_owner(&config);

        for account in accounts.iter() {
            storage::set_whitelisted(&env, &account);
        }

        env.events().publish(
            (Symbol::new(&env, "whitelist_added"),),
            WhitelistAddedEvent {
                count: accounts.len(),
            },
        );

        Ok(())
    }

    /// Remove a single account from the whitelist
    pub fn remove_from_whitelist(env: Env, account: Address) -> Result<(), Error> {
        let (config, _) = Self::load(&env)?;
        auth::require_owner(&config);

        storage::remove_whitelisted(&env, &account);

        env.events().publish(
            (Symbol::new(&env, "whitelist_removed"),),
            WhitelistRemovedEvent { count: 1 },
        );

        Ok(())
    }

    /// Remove a batch of accounts from the whitelist
    pub fn remove_many_from_whitelist(env: Env, accounts: Vec<Address>) -> Result<(), Error> {
        let (config, _) = Self::load(&env)?;
        auth::require_owner(&config);

        for account in accounts.iter() {
            storage::remove_whitelisted(&env, &account);
        }

        env.events().publish(
            (Symbol::new(&env, "whitelist_removed"),),
            WhitelistRemovedEvent {
                count: accounts.len(),
            },
        );

        Ok(())
    }

    // ============================================
    // CONTRIBUTION
    // ============================================

    /// Contribute settlement tokens to the pool
    ///
    /// Rejects as a whole on any failing check; a contribution is never
    /// partially accepted or truncated to fit a cap.
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `WrongPhase`: Pool already cancelled or finalized
    /// - `WindowNotOpen` / `WindowClosed`: Outside [start, end)
    /// - `TargetOrAssetUnbound`: Crowdsale or pool token not bound yet
    /// - `NotWhitelisted`: Whitelist enabled and sender absent
    /// - `InvalidAmount`: Amount not positive
    /// - `BelowMinimum`: Below the per-account minimum
    /// - `AboveMaximum`: Account total would exceed its maximum
    /// - `CapExceeded`: Pool total would exceed the hard cap
    pub fn contribute(env: Env, contributor: Address, amount: i128) -> Result<(), Error> {
        contributor.require_auth();

        let (config, mut state) = Self::load(&env)?;
        Self::require_open(&state)?;

        let now = env.ledger().timestamp();
        if now < state.start_time {
            return Err(Error::WindowNotOpen);
        }
        if now >= state.end_time {
            return Err(Error::WindowClosed);
        }

        if state.investment_address.is_none() || state.pool_token.is_none() {
            return Err(Error::TargetOrAssetUnbound);
        }

        if config.whitelist_enabled && !storage::is_whitelisted(&env, &contributor) {
            return Err(Error::NotWhitelisted);
        }

        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }
        if config.min_contribution > 0 && amount < config.min_contribution {
            return Err(Error::BelowMinimum);
        }

        let existing = storage::get_contribution(&env, &contributor);
        let mut record = existing.clone().unwrap_or(Contribution {
            amount: 0,
            withdrawn: 0,
            refunded: false,
        });

        let new_account_total = record
            .amount
            .checked_add(amount)
            .ok_or(Error::InvalidAmount)?;
        if config.max_contribution > 0 && new_account_total > config.max_contribution {
            return Err(Error::AboveMaximum);
        }

        let new_total_raised = state
            .total_raised
            .checked_add(amount)
            .ok_or(Error::InvalidAmount)?;
        if config.hard_cap > 0 && new_total_raised > config.hard_cap {
            return Err(Error::CapExceeded);
        }

        // Escrow the contribution in the pool
        token::Client::new(&env, &config.funding_token).transfer(
            &contributor,
            &env.current_contract_address(),
            &amount,
        );

        // First-time contributors join the paged payout index
        if existing.is_none() {
            storage::push_contributor(&env, state.contributor_count, &contributor);
            state.contributor_count += 1;
        }

        record.amount = new_account_total;
        storage::save_contribution(&env, &contributor, &record);

        state.total_raised = new_total_raised;
        storage::save_state(&env, &state);

        env.events().publish(
            (Symbol::new(&env, "contributed"), contributor.clone()),
            ContributedEvent {
                contributor,
                amount,
                total_raised: new_total_raised,
            },
        );

        Ok(())
    }

    // ============================================
    // LIFECYCLE
    // ============================================

    /// Forward the escrowed raise to the crowdsale and close the pool
    ///
    /// Legal once the window ended with the soft cap met, or as soon as
    /// the hard cap is reached. Only the owner may call unless the pool
    /// was configured with public finalization.
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `WrongPhase`: Not open, or the gating conditions do not hold
    /// - `Unauthorized`: Caller may not finalize this pool
    /// - `TargetOrAssetUnbound`: Crowdsale or pool token not bound
    pub fn finalize(env: Env, caller: Address) -> Result<(), Error> {
        caller.require_auth();

        let (config, mut state) = Self::load(&env)?;
        Self::require_open(&state)?;

        if !auth::may_finalize(&config, &caller) {
            return Err(Error::Unauthorized);
        }

        let now = env.ledger().timestamp();
        let window_done = now >= state.end_time && state.total_raised >= config.soft_cap;
        let hard_cap_reached = config.hard_cap > 0 && state.total_raised >= config.hard_cap;
        if !window_done && !hard_cap_reached {
            return Err(Error::WrongPhase);
        }

        let target = state
            .investment_address
            .clone()
            .ok_or(Error::TargetOrAssetUnbound)?;
        if state.pool_token.is_none() {
            return Err(Error::TargetOrAssetUnbound);
        }

        state.status = PoolStatus::Finalized;
        storage::save_state(&env, &state);

        let client = token::Client::new(&env, &config.funding_token);
        let escrowed = client.balance(&env.current_contract_address());
        if escrowed > 0 {
            client.transfer(&env.current_contract_address(), &target, &escrowed);
        }
        env.invoke_contract::<()>(
            &target,
            &Symbol::new(&env, "invest"),
            vec![
                &env,
                env.current_contract_address().into_val(&env),
                escrowed.into_val(&env),
            ],
        );

        env.events().publish(
            (Symbol::new(&env, "finalized"),),
            FinalizedEvent {
                total_raised: state.total_raised,
                forwarded: escrowed,
            },
        );

        Ok(())
    }

    /// Abandon the raise and enable refunds
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `WrongPhase`: Pool already cancelled or finalized
    pub fn cancel(env: Env) -> Result<(), Error> {
        let (config, mut state) = Self::load(&env)?;
        auth::require_owner(&config);
        Self::require_open(&state)?;

        state.status = PoolStatus::Cancelled;
        storage::save_state(&env, &state);

        env.events().publish(
            (Symbol::new(&env, "cancelled"),),
            CancelledEvent {
                total_raised: state.total_raised,
            },
        );

        Ok(())
    }

    // ============================================
    // REFUND
    // ============================================

    /// Pay a contributor back exactly what they put in
    ///
    /// Available while cancelled, while open past the end time with the
    /// soft cap missed, or after finalization whenever the crowdsale has
    /// returned settlement tokens to the pool.
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `WrongPhase`: Pool is not in a refundable condition
    /// - `NotEligible`: Caller never contributed
    /// - `AlreadyRefunded`: Contribution was already paid back
    pub fn claim_refund(env: Env, contributor: Address) -> Result<(), Error> {
        contributor.require_auth();

        let (config, state) = Self::load(&env)?;
        let client = token::Client::new(&env, &config.funding_token);

        let now = env.ledger().timestamp();
        let refundable = match state.status {
            PoolStatus::Cancelled => true,
            PoolStatus::Open => {
                now >= state.end_time && state.total_raised < config.soft_cap
            }
            PoolStatus::Finalized => client.balance(&env.current_contract_address()) > 0,
        };
        if !refundable {
            return Err(Error::WrongPhase);
        }

        let mut record =
            storage::get_contribution(&env, &contributor).ok_or(Error::NotEligible)?;
        if record.refunded {
            return Err(Error::AlreadyRefunded);
        }
        if record.amount <= 0 {
            return Err(Error::NotEligible);
        }

        record.refunded = true;
        storage::save_contribution(&env, &contributor, &record);

        client.transfer(&env.current_contract_address(), &contributor, &record.amount);

        env.events().publish(
            (Symbol::new(&env, "refunded"), contributor.clone()),
            RefundedEvent {
                contributor,
                amount: record.amount,
            },
        );

        Ok(())
    }

    // ============================================
    // WITHDRAWAL
    // ============================================

    /// Pay out a contributor's share of the pool tokens received so far
    ///
    /// Safe to call repeatedly: each call pays the entitlement accrued
    /// since the previous one, and pays zero once nothing new arrived.
    /// Returns the amount paid.
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `WrongPhase`: Pool not finalized
    /// - `NotEligible`: Caller never contributed, or was refunded
    /// - `NothingToWithdraw`: No pool tokens have accrued yet
    pub fn withdraw(env: Env, contributor: Address) -> Result<i128, Error> {
        contributor.require_auth();

        let (config, mut state) = Self::load(&env)?;
        if state.status != PoolStatus::Finalized {
            return Err(Error::WrongPhase);
        }

        let mut record =
            storage::get_contribution(&env, &contributor).ok_or(Error::NotEligible)?;
        if record.refunded || record.amount <= 0 {
            return Err(Error::NotEligible);
        }

        let pool_token = state.pool_token.clone().ok_or(Error::TargetOrAssetUnbound)?;
        let client = token::Client::new(&env, &pool_token);

        let (cumulative, reward) = Self::accrued(&env, &config, &state, &client)?;
        let paid = Self::pay_entitlement(
            &env,
            &client,
            &mut state,
            &contributor,
            &mut record,
            cumulative - reward,
        )?;

        if paid == 0 && record.withdrawn == 0 {
            return Err(Error::NothingToWithdraw);
        }

        if paid > 0 {
            env.events().publish(
                (Symbol::new(&env, "withdrawn"), contributor.clone()),
                WithdrawnEvent {
                    contributor,
                    amount: paid,
                },
            );
        }

        Ok(paid)
    }

    /// Pay the operator the reward accrued so far
    ///
    /// Runs the same incremental bookkeeping as investor withdrawal, so
    /// the reward also tracks tranches as they arrive. Returns the
    /// amount paid.
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `WrongPhase`: Pool not finalized
    /// - `NothingToWithdraw`: No pool tokens have accrued yet
    pub fn withdraw_reward(env: Env) -> Result<i128, Error> {
        let (config, mut state) = Self::load(&env)?;
        auth::require_owner(&config);

        if state.status != PoolStatus::Finalized {
            return Err(Error::WrongPhase);
        }

        let pool_token = state.pool_token.clone().ok_or(Error::TargetOrAssetUnbound)?;
        let client = token::Client::new(&env, &pool_token);

        let (_, reward) = Self::accrued(&env, &config, &state, &client)?;
        let payout = reward - state.reward_withdrawn;
        if payout <= 0 {
            if state.reward_withdrawn == 0 {
                return Err(Error::NothingToWithdraw);
            }
            return Ok(0);
        }

        state.reward_withdrawn = reward;
        state.total_withdrawn = state
            .total_withdrawn
            .checked_add(payout)
            .ok_or(Error::InvalidAmount)?;
        storage::save_state(&env, &state);

        client.transfer(&env.current_contract_address(), &config.owner, &payout);

        env.events().publish(
            (Symbol::new(&env, "reward_withdrawn"),),
            RewardWithdrawnEvent {
                owner: config.owner,
                amount: payout,
            },
        );

        Ok(payout)
    }

    // ============================================
    // PAGED DISTRIBUTION
    // ============================================

    /// Push-pay one fixed-size page of the contributor list
    ///
    /// Applies the same incremental entitlement as `withdraw` to every
    /// account in the page; accounts with nothing new accrued are
    /// skipped, not failed. Returns the total amount paid.
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `WrongPhase`: Pool not finalized
    /// - `PageOutOfRange`: Page starts past the end of the list
    pub fn distribute_page(env: Env, page_index: u32) -> Result<i128, Error> {
        let (config, mut state) = Self::load(&env)?;
        auth::require_owner(&config);

        if state.status != PoolStatus::Finalized {
            return Err(Error::WrongPhase);
        }

        let count = state.contributor_count;
        let page_start = page_index
            .checked_mul(PAGE_SIZE)
            .ok_or(Error::PageOutOfRange)?;
        if page_start >= count {
            return Err(Error::PageOutOfRange);
        }
        let page_end = (page_start + PAGE_SIZE).min(count);

        let pool_token = state.pool_token.clone().ok_or(Error::TargetOrAssetUnbound)?;
        let client = token::Client::new(&env, &pool_token);

        // Constant across the loop: payouts move value from the live
        // balance into total_withdrawn in equal measure
        let (cumulative, reward) = Self::accrued(&env, &config, &state, &client)?;
        let distributable = cumulative - reward;

        let mut accounts_paid = 0u32;
        let mut amount_paid = 0i128;
        for index in page_start..page_end {
            let Some(account) = storage::contributor_at(&env, index) else {
                continue;
            };
            let Some(mut record) = storage::get_contribution(&env, &account) else {
                continue;
            };
            if record.refunded || record.amount <= 0 {
                continue;
            }

            let paid = Self::pay_entitlement(
                &env,
                &client,
                &mut state,
                &account,
                &mut record,
                distributable,
            )?;
            if paid > 0 {
                accounts_paid += 1;
                amount_paid += paid;
            }
        }

        env.events().publish(
            (Symbol::new(&env, "page_distributed"), page_index),
            PageDistributedEvent {
                page_index,
                accounts_paid,
                amount_paid,
            },
        );

        Ok(amount_paid)
    }

    // ============================================
    // CALL FORWARDING
    // ============================================

    /// Relay a call to the crowdsale after finalization
    ///
    /// Lets the owner (or the configured service account) trigger
    /// maintenance on the crowdsale, such as releasing vested tokens or
    /// claiming its refund, optionally attaching settlement tokens. The
    /// crowdsale gains no standing capability against the pool.
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `Unauthorized`: Caller is neither owner nor service account
    /// - `WrongPhase`: Pool not finalized
    /// - `InvalidAmount`: Negative attached value
    /// - `UnderlyingCallFailed`: The crowdsale rejected the call
    pub fn execute_after_finalize(
        env: Env,
        caller: Address,
        function: Symbol,
        args: Vec<Val>,
        value: i128,
    ) -> Result<(), Error> {
        caller.require_auth();

        let (config, state) = Self::load(&env)?;
        if !auth::may_forward_calls(&config, &caller) {
            return Err(Error::Unauthorized);
        }

        if state.status != PoolStatus::Finalized {
            return Err(Error::WrongPhase);
        }

        let target = state
            .investment_address
            .clone()
            .ok_or(Error::TargetOrAssetUnbound)?;

        if value < 0 {
            return Err(Error::InvalidAmount);
        }
        if value > 0 {
            token::Client::new(&env, &config.funding_token).transfer(
                &env.current_contract_address(),
                &target,
                &value,
            );
        }

        if env
            .try_invoke_contract::<Val, soroban_sdk::Error>(&target, &function, args)
            .is_err()
        {
            return Err(Error::UnderlyingCallFailed);
        }

        env.events().publish(
            (Symbol::new(&env, "call_forwarded"),),
            CallForwardedEvent { function, value },
        );

        Ok(())
    }

    // ============================================
    // VIEW FUNCTIONS
    // ============================================

    /// Amount still credited to an account (zero once refunded)
    pub fn contribution_of(env: Env, account: Address) -> i128 {
        match storage::get_contribution(&env, &account) {
            Some(record) if !record.refunded => record.amount,
            _ => 0,
        }
    }

    /// Pool tokens already paid to an account
    pub fn withdrawn_of(env: Env, account: Address) -> i128 {
        storage::get_contribution(&env, &account)
            .map(|record| record.withdrawn)
            .unwrap_or(0)
    }

    pub fn total_raised(env: Env) -> Result<i128, Error> {
        Ok(Self::load(&env)?.1.total_raised)
    }

    pub fn status(env: Env) -> Result<PoolStatus, Error> {
        Ok(Self::load(&env)?.1.status)
    }

    pub fn has_started(env: Env) -> Result<bool, Error> {
        let (_, state) = Self::load(&env)?;
        Ok(env.ledger().timestamp() >= state.start_time)
    }

    pub fn has_ended(env: Env) -> Result<bool, Error> {
        let (_, state) = Self::load(&env)?;
        Ok(env.ledger().timestamp() >= state.end_time)
    }

    pub fn soft_cap_reached(env: Env) -> Result<bool, Error> {
        let (config, state) = Self::load(&env)?;
        Ok(state.total_raised >= config.soft_cap)
    }

    pub fn hard_cap_reached(env: Env) -> Result<bool, Error> {
        let (config, state) = Self::load(&env)?;
        Ok(config.hard_cap > 0 && state.total_raised >= config.hard_cap)
    }

    pub fn start_time(env: Env) -> Result<u64, Error> {
        Ok(Self::load(&env)?.1.start_time)
    }

    pub fn end_time(env: Env) -> Result<u64, Error> {
        Ok(Self::load(&env)?.1.end_time)
    }

    pub fn investment_address(env: Env) -> Result<Option<Address>, Error> {
        Ok(Self::load(&env)?.1.investment_address)
    }

    pub fn token_address(env: Env) -> Result<Option<Address>, Error> {
        Ok(Self::load(&env)?.1.pool_token)
    }

    pub fn is_whitelisted(env: Env, account: Address) -> bool {
        storage::is_whitelisted(&env, &account)
    }

    pub fn contributor_count(env: Env) -> Result<u32, Error> {
        Ok(Self::load(&env)?.1.contributor_count)
    }

    pub fn get_config(env: Env) -> Result<PoolConfig, Error> {
        storage::get_config(&env).ok_or(Error::NotInitialized)
    }

    // ============================================
    // INTERNAL HELPERS
    // ============================================

    fn load(env: &Env) -> Result<(PoolConfig, PoolState), Error> {
        let config = storage::get_config(env).ok_or(Error::NotInitialized)?;
        let state = storage::get_state(env).ok_or(Error::NotInitialized)?;
        Ok((config, state))
    }

    fn require_open(state: &PoolState) -> Result<(), Error> {
        if state.status != PoolStatus::Open {
            return Err(Error::WrongPhase);
        }
        Ok(())
    }

    /// Cumulative pool tokens ever received and the operator reward on them.
    fn accrued(
        env: &Env,
        config: &PoolConfig,
        state: &PoolState,
        client: &token::Client,
    ) -> Result<(i128, i128), Error> {
        let live = client.balance(&env.current_contract_address());
        let cumulative = distribution::cumulative_received(live, state.total_withdrawn)
            .ok_or(Error::InvalidAmount)?;
        let reward = distribution::reward_share(cumulative, config.reward_permille)
            .ok_or(Error::InvalidAmount)?;
        Ok((cumulative, reward))
    }

    /// Pay one account whatever entitlement accrued since its last payout.
    ///
    /// Ledger state is written before the outward transfer so a
    /// re-entrant call observes the already-updated bookkeeping.
    fn pay_entitlement(
        env: &Env,
        client: &token::Client,
        state: &mut PoolState,
        account: &Address,
        record: &mut Contribution,
        distributable: i128,
    ) -> Result<i128, Error> {
        let entitled = distribution::entitlement(record.amount, state.total_raised, distributable)
            .ok_or(Error::InvalidAmount)?;
        let payout = entitled - record.withdrawn;
        if payout <= 0 {
            return Ok(0);
        }

        record.withdrawn = entitled;
        storage::save_contribution(env, account, record);

        state.total_withdrawn = state
            .total_withdrawn
            .checked_add(payout)
            .ok_or(Error::InvalidAmount)?;
        storage::save_state(env, state);

        client.transfer(&env.current_contract_address(), account, &payout);

        Ok(payout)
    }
}
