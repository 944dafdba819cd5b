use soroban_sdk::{contracttype, Address, Symbol};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ContributedEvent {
    pub contributor: Address,
    pub amount: i128,
    pub total_raised: i128,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct TimesUpdatedEvent {
    pub start_time: u64,
    pub end_time: u64,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct InvestmentAddressSetEvent {
    pub investment_address: Address,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct TokenAddressSetEvent {
    pub pool_token: Address,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct WhitelistAddedEvent {
    pub count: u32,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct WhitelistRemovedEvent {
    pub count: u32,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct FinalizedEvent {
    pub total_raised: i128,
    pub forwarded: i128,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct CancelledEvent {
    pub total_raised: i128,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct RefundedEvent {
    pub contributor: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct WithdrawnEvent {
    pub contributor: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct RewardWithdrawnEvent {
    pub owner: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct PageDistributedEvent {
    pub page_index: u32,
    pub accounts_paid: u32,
    pub amount_paid: i128,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct CallForwardedEvent {
    pub function: Symbol,
    pub value: i128,
}
