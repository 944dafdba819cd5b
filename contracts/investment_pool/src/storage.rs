use soroban_sdk::{contracttype, Address, Env};

// Constants
/// Contributor index slice covered by one distribute_page call.
pub const PAGE_SIZE: u32 = 100;
/// Denominator of the operator reward rate.
pub const PERMILLE: i128 = 1000;

/// Approximate ledgers per day (~5 seconds per ledger).
const DAY_IN_LEDGERS: u32 = 17_280;

const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;

const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const PERSISTENT_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PoolStatus {
    /// Accepting contributions inside the time window
    Open = 0,
    /// Terminal: raise abandoned by the owner, refunds enabled
    Cancelled = 1,
    /// Terminal: raise forwarded to the crowdsale, withdrawals enabled
    Finalized = 2,
}

/// Immutable pool parameters, written once at initialize.
#[contracttype]
#[derive(Clone, Debug)]
pub struct PoolConfig {
    /// Pool operator; collects the reward share
    pub owner: Address,
    /// Settlement asset contributions are denominated in
    pub funding_token: Address,
    /// Optional account also allowed to relay post-finalize calls
    pub service_account: Option<Address>,
    /// Minimum raise for the pool to succeed (0 = none)
    pub soft_cap: i128,
    /// Maximum raise accepted (0 = none)
    pub hard_cap: i128,
    /// Minimum single contribution (0 = none)
    pub min_contribution: i128,
    /// Maximum cumulative contribution per account (0 = none)
    pub max_contribution: i128,
    /// Operator reward as parts per thousand of distributed tokens
    pub reward_permille: u32,
    /// Require whitelist membership to contribute
    pub whitelist_enabled: bool,
    /// Allow any account to finalize once the gating conditions hold
    pub public_finalize: bool,
}

/// Mutable pool state. Lifecycle operations read and write this entry
/// instead of the full config.
#[contracttype]
#[derive(Clone, Debug)]
pub struct PoolState {
    pub status: PoolStatus,
    pub start_time: u64,
    pub end_time: u64,
    /// Crowdsale the raise is forwarded to; bound at most once
    pub investment_address: Option<Address>,
    /// Token the crowdsale pays out; bound at most once
    pub pool_token: Option<Address>,
    pub total_raised: i128,
    /// Pool tokens already paid out, investors and operator together
    pub total_withdrawn: i128,
    /// Portion of total_withdrawn that went to the owner
    pub reward_withdrawn: i128,
    pub contributor_count: u32,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct Contribution {
    /// Settlement units invested; only grows while the window is open
    pub amount: i128,
    /// Pool tokens already paid to this account
    pub withdrawn: i128,
    pub refunded: bool,
}

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Config,
    State,
    Contribution(Address),
    /// Ordered index of first-time contributors, sliced by distribute_page
    Contributor(u32),
    Whitelisted(Address),
}

// ── Instance storage ─────────────────────────────────────────────────

fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

pub fn has_config(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

pub fn save_config(env: &Env, config: &PoolConfig) {
    env.storage().instance().set(&DataKey::Config, config);
    bump_instance(env);
}

pub fn get_config(env: &Env) -> Option<PoolConfig> {
    let config = env.storage().instance().get(&DataKey::Config);
    if config.is_some() {
        bump_instance(env);
    }
    config
}

pub fn save_state(env: &Env, state: &PoolState) {
    env.storage().instance().set(&DataKey::State, state);
}

pub fn get_state(env: &Env) -> Option<PoolState> {
    env.storage().instance().get(&DataKey::State)
}

// ── Persistent storage ───────────────────────────────────────────────

fn bump_persistent(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

pub fn get_contribution(env: &Env, account: &Address) -> Option<Contribution> {
    let key = DataKey::Contribution(account.clone());
    let record: Option<Contribution> = env.storage().persistent().get(&key);
    if record.is_some() {
        bump_persistent(env, &key);
    }
    record
}

pub fn save_contribution(env: &Env, account: &Address, record: &Contribution) {
    let key = DataKey::Contribution(account.clone());
    env.storage().persistent().set(&key, record);
    bump_persistent(env, &key);
}

pub fn contributor_at(env: &Env, index: u32) -> Option<Address> {
    let key = DataKey::Contributor(index);
    let account: Option<Address> = env.storage().persistent().get(&key);
    if account.is_some() {
        bump_persistent(env, &key);
    }
    account
}

pub fn push_contributor(env: &Env, index: u32, account: &Address) {
    let key = DataKey::Contributor(index);
    env.storage().persistent().set(&key, account);
    bump_persistent(env, &key);
}

pub fn is_whitelisted(env: &Env, account: &Address) -> bool {
    env.storage()
        .persistent()
        .get::<DataKey, bool>(&DataKey::Whitelisted(account.clone()))
        .unwrap_or(false)
}

pub fn set_whitelisted(env: &Env, account: &Address) {
    let key = DataKey::Whitelisted(account.clone());
    env.storage().persistent().set(&key, &true);
    bump_persistent(env, &key);
}

pub fn remove_whitelisted(env: &Env, account: &Address) {
    env.storage()
        .persistent()
        .remove(&DataKey::Whitelisted(account.clone()));
}
