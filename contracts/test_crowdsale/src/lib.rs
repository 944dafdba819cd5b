#![no_std]

use soroban_sdk::{
    contract, contracterror, contractimpl, contracttype, token, Address, Env, Symbol,
};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    /// Returned by `reject`, unconditionally
    Rejected = 3,
}

#[contracttype]
pub enum DataKey {
    Owner,
    FundingToken,
    TotalInvested,
}

/// Crowdsale stand-in for exercising pools in tests.
///
/// Records investments forwarded to it and can send its settlement
/// balance back on request, which is enough to drive a pool through
/// finalization, vested token tranches and the post-raise refund path.
#[contract]
pub struct TestCrowdsale;

#[contractimpl]
impl TestCrowdsale {
    pub fn initialize(env: Env, owner: Address, funding_token: Address) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Owner) {
            return Err(Error::AlreadyInitialized);
        }

        env.storage().instance().set(&DataKey::Owner, &owner);
        env.storage()
            .instance()
            .set(&DataKey::FundingToken, &funding_token);
        env.storage().instance().set(&DataKey::TotalInvested, &0i128);

        Ok(())
    }

    /// Record an investment forwarded by a pool
    pub fn invest(env: Env, from: Address, amount: i128) -> Result<(), Error> {
        if !env.storage().instance().has(&DataKey::Owner) {
            return Err(Error::NotInitialized);
        }

        let total: i128 = env
            .storage()
            .instance()
            .get(&DataKey::TotalInvested)
            .unwrap_or(0);
        env.storage()
            .instance()
            .set(&DataKey::TotalInvested, &(total + amount));

        env.events()
            .publish((Symbol::new(&env, "invested"), from), amount);

        Ok(())
    }

    /// Send the crowdsale's whole settlement balance back to `to`
    pub fn refund_pool(env: Env, to: Address) -> Result<(), Error> {
        let funding_token: Address = env
            .storage()
            .instance()
            .get(&DataKey::FundingToken)
            .ok_or(Error::NotInitialized)?;

        let client = token::Client::new(&env, &funding_token);
        let balance = client.balance(&env.current_contract_address());
        if balance > 0 {
            client.transfer(&env.current_contract_address(), &to, &balance);
        }

        Ok(())
    }

    /// Always rejects; exercises failure propagation in callers
    pub fn reject(_env: Env) -> Result<(), Error> {
        Err(Error::Rejected)
    }

    pub fn total_invested(env: Env) -> i128 {
        env.storage()
            .instance()
            .get(&DataKey::TotalInvested)
            .unwrap_or(0)
    }
}
