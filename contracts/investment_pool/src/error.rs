use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    // ============================================
    // INITIALIZATION ERRORS (1-9)
    // ============================================
    /// Contract already initialized
    AlreadyInitialized = 1,
    /// Contract not initialized
    NotInitialized = 2,
    /// Caps, limits or reward rate out of range
    InvalidConfig = 3,

    // ============================================
    // AUTHORIZATION ERRORS (10-19)
    // ============================================
    /// Caller not authorized (not owner/service account)
    Unauthorized = 10,

    // ============================================
    // PHASE / TIME WINDOW ERRORS (20-29)
    // ============================================
    /// Operation invalid for the current pool status
    WrongPhase = 20,
    /// Contribution window has not started yet
    WindowNotOpen = 21,
    /// Contribution window has ended
    WindowClosed = 22,
    /// Start/end edit violates ordering or a boundary already passed
    InvalidTimeOrdering = 23,
    /// Investment address or pool token already bound
    AlreadyBound = 24,
    /// Investment address and pool token must both be bound first
    TargetOrAssetUnbound = 25,

    // ============================================
    // CONTRIBUTION ERRORS (30-39)
    // ============================================
    /// Amount must be positive
    InvalidAmount = 30,
    /// Sender not on the whitelist
    NotWhitelisted = 31,
    /// Contribution below the per-account minimum
    BelowMinimum = 32,
    /// Contribution would exceed the per-account maximum
    AboveMaximum = 33,
    /// Contribution would exceed the hard cap
    CapExceeded = 34,

    // ============================================
    // REFUND / WITHDRAWAL ERRORS (40-49)
    // ============================================
    /// Account has no contribution to refund or withdraw against
    NotEligible = 40,
    /// Contribution already refunded
    AlreadyRefunded = 41,
    /// No pool tokens have accrued yet
    NothingToWithdraw = 42,

    // ============================================
    // DISTRIBUTION ERRORS (50-59)
    // ============================================
    /// Page index past the end of the contributor list
    PageOutOfRange = 50,

    // ============================================
    // CALL FORWARDING ERRORS (60-69)
    // ============================================
    /// Relayed call was rejected by the crowdsale
    UnderlyingCallFailed = 60,
}
