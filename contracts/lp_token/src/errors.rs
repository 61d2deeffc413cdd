use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ShareTokenError {
    AlreadyInitialized = 200,
    NotInitialized = 201,
    InsufficientBalance = 202,
    InsufficientAllowance = 203,
    NegativeAmount = 204,
    Overflow = 205,
    PermitExpired = 206,
    InvalidSignature = 207,
}
