use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum PairError {
    AlreadyInitialized = 100,
    NotInitialized = 101,
    InsufficientLiquidity = 102,
    InsufficientInputAmount = 103,
    InvalidOutputAmount = 104,
    InvariantViolated = 105,
    Locked = 106,
    InvalidRecipient = 107,
    IdenticalAssets = 108,
    Overflow = 109,
    InsufficientLiquidityMinted = 110,
    InsufficientLiquidityBurned = 111,
}
