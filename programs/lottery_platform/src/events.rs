use anchor_lang::prelude::*;

#[event]
pub struct RegistryInitialized {
    pub admin: Pubkey,
}

#[event]
pub struct AdminTransferred {
    pub old_admin: Pubkey,
    pub new_admin: Pubkey,
}

#[event]
pub struct GameRegistered {
    pub game: Pubkey,
    pub owner: Pubkey,
    pub mint: Pubkey,
    pub deposit: Pubkey,
    pub treasury_vault: Pubkey,
    pub ticket_price: u64,
    pub winning_percentage: u8,
    pub game_count: u64,
}

#[event]
pub struct ParticipantRegistered {
    pub participant: Pubkey,
    pub owner: Pubkey,
}

#[event]
pub struct TicketsPurchased {
    pub game: Pubkey,
    pub buyer: Pubkey,
    pub amount: u64,
    pub tickets: u64,
    pub tickets_sold_after: u64,
    pub amount_collected_after: u64,
}

#[event]
pub struct GameWinnerSelected {
    pub game: Pubkey,
    pub winner: Pubkey,
    pub winning_ticket: u64,
    pub tickets_sold: u64,
    pub prize_pool: u64,
    pub retention: u64,
}

#[event]
pub struct WinningsWithdrawn {
    pub game: Pubkey,
    pub winner: Pubkey,
    pub amount: u64,
    pub remaining_winnings: u64,
}

#[event]
pub struct ProceedsSwept {
    pub game: Pubkey,
    pub owner: Pubkey,
    pub amount: u64,
}
