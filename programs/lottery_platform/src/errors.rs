use anchor_lang::prelude::*;

#[error_code]
pub enum ErrorCode {
    #[msg("Ticket price must be greater than zero")]
    InvalidTicketPrice,
    #[msg("Winning percentage must be between 0 and 100")]
    InvalidWinningPercentage,
    #[msg("Invalid token decimals")]
    InvalidDecimals,
    #[msg("Invalid lottery game name length")]
    InvalidGameNameLength,
    #[msg("Invalid country length")]
    InvalidCountryLength,
    #[msg("Invalid operator length")]
    InvalidOperatorLength,
    #[msg("Invalid value date length")]
    InvalidValueDateLength,
    #[msg("Invalid full names length")]
    InvalidFullNamesLength,
    #[msg("Invalid amount")]
    InvalidAmount,
    #[msg("Amount is not a multiple of the ticket price")]
    AmountNotMultipleOfPrice,
    #[msg("Registry is already initialized")]
    RegistryAlreadyInitialized,
    #[msg("A lottery game already exists for this owner")]
    GameAlreadyExists,
    #[msg("Participant is already registered")]
    ParticipantAlreadyRegistered,
    #[msg("Lottery game is not open")]
    GameNotOpen,
    #[msg("Winner has already been selected")]
    WinnerAlreadySelected,
    #[msg("Winner has not been selected yet")]
    WinnerNotSelected,
    #[msg("No tickets have been sold")]
    NoParticipants,
    #[msg("Too many participants for this game")]
    MaxParticipantsReached,
    #[msg("Unauthorized")]
    Unauthorized,
    #[msg("Invalid admin address")]
    InvalidAdmin,
    #[msg("Nothing to withdraw")]
    NothingToWithdraw,
    #[msg("Nothing to sweep")]
    NothingToSweep,
    #[msg("Insufficient funds")]
    InsufficientFunds,
    #[msg("Insufficient vault balance")]
    InsufficientVaultBalance,
    #[msg("Invalid vault account")]
    InvalidVault,
    #[msg("Invalid token account")]
    InvalidTokenAccount,
    #[msg("Slot hashes sysvar is malformed or empty")]
    InvalidSlotHashes,
    #[msg("Math overflow")]
    MathOverflow,
}
