use anchor_lang::prelude::*;
use bytemuck::{Pod, Zeroable};
use crate::constants::{MAX_COUNTRY_LEN, MAX_GAME_NAME_LEN, MAX_GAME_PARTICIPANTS, MAX_OPERATOR_LEN, MAX_VALUE_DATE_LEN};
use crate::errors::ErrorCode;
use crate::utils::{
    bit_add, bit_find_prefix, checked_add_u64, checked_sub_u64, compute_prize_split,
    pick_winning_ticket, tickets_for_amount,
};

/// Wrapper for the stake-table key array — bytemuck doesn't impl Pod for arbitrary array sizes.
#[derive(Copy, Clone)]
#[repr(C)]
pub struct StakeKeys {
    pub data: [[u8; 32]; MAX_GAME_PARTICIPANTS],
}

unsafe impl Pod for StakeKeys {}
unsafe impl Zeroable for StakeKeys {}

/// Wrapper for the per-stake ticket Fenwick tree — bytemuck doesn't impl Pod for arbitrary array sizes.
#[derive(Copy, Clone)]
#[repr(C)]
pub struct TicketTree {
    pub data: [u64; MAX_GAME_PARTICIPANTS + 1],
}

unsafe impl Pod for TicketTree {}
unsafe impl Zeroable for TicketTree {}

#[cfg(feature = "idl-build")]
impl anchor_lang::IdlBuild for StakeKeys {
    fn create_type() -> Option<anchor_lang::idl::types::IdlTypeDef> {
        use anchor_lang::idl::types::*;
        Some(IdlTypeDef {
            name: "StakeKeys".to_string(),
            docs: vec![],
            serialization: IdlSerialization::Bytemuck,
            repr: Some(IdlRepr::C(IdlReprModifier { packed: false, align: None })),
            generics: vec![],
            ty: IdlTypeDefTy::Struct {
                fields: Some(IdlDefinedFields::Named(vec![IdlField {
                    name: "data".to_string(),
                    docs: vec![],
                    ty: IdlType::Array(
                        Box::new(IdlType::Array(Box::new(IdlType::U8), IdlArrayLen::Value(32))),
                        IdlArrayLen::Value(MAX_GAME_PARTICIPANTS),
                    ),
                }])),
            },
        })
    }
    fn insert_types(types: &mut std::collections::BTreeMap<String, anchor_lang::idl::types::IdlTypeDef>) {
        if let Some(ty) = Self::create_type() {
            types.insert("StakeKeys".to_string(), ty);
        }
    }
    fn get_full_path() -> String {
        "StakeKeys".to_string()
    }
}

#[cfg(feature = "idl-build")]
impl anchor_lang::IdlBuild for TicketTree {
    fn create_type() -> Option<anchor_lang::idl::types::IdlTypeDef> {
        use anchor_lang::idl::types::*;
        Some(IdlTypeDef {
            name: "TicketTree".to_string(),
            docs: vec![],
            serialization: IdlSerialization::Bytemuck,
            repr: Some(IdlRepr::C(IdlReprModifier { packed: false, align: None })),
            generics: vec![],
            ty: IdlTypeDefTy::Struct {
                fields: Some(IdlDefinedFields::Named(vec![IdlField {
                    name: "data".to_string(),
                    docs: vec![],
                    ty: IdlType::Array(
                        Box::new(IdlType::U64),
                        IdlArrayLen::Value(MAX_GAME_PARTICIPANTS + 1),
                    ),
                }])),
            },
        })
    }
    fn insert_types(types: &mut std::collections::BTreeMap<String, anchor_lang::idl::types::IdlTypeDef>) {
        if let Some(ty) = Self::create_type() {
            types.insert("TicketTree".to_string(), ty);
        }
    }
    fn get_full_path() -> String {
        "TicketTree".to_string()
    }
}

#[repr(u8)]
pub enum GameStatus {
    Open = 0,
    WinnerSelected = 1,
    Closed = 2,
}

/// Platform-wide singleton tracking the admin identity and how many games
/// have ever been registered.
#[account]
#[derive(Default)]
pub struct GameRegistry {
    pub admin: Pubkey,
    pub game_count: u64,
    pub bump: u8,
    pub reserved: [u8; 7],
}

impl GameRegistry {
    pub const SPACE: usize = 8 + 32 + 8 + 1 + 7;

    /// Claim the next game slot. Not independently invocable — called by game
    /// registration only.
    pub fn register_game_slot(&mut self) -> Result<u64> {
        self.game_count = checked_add_u64(self.game_count, 1)?;
        Ok(self.game_count)
    }
}

#[derive(Debug)]
pub struct PurchaseReceipt {
    pub tickets: u64,
    pub stake_index: u16,
}

#[derive(Debug)]
pub struct Settlement {
    pub winner: [u8; 32],
    pub winning_ticket: u64,
    pub prize_pool: u64,
    pub retention: u64,
}

/// Lottery game account — zero-copy to keep the stake table off the stack.
/// All instructions must use `AccountLoader<'info, LotteryGame>` and call
/// `.load()` / `.load_mut()`.
#[account(zero_copy)]
#[repr(C)]
pub struct LotteryGame {
    pub ticket_price: u64,
    pub tickets_sold: u64,
    pub amount_collected: u64,
    pub prize_pool: u64,
    pub winning_ticket: u64,

    pub ticket_tree: TicketTree,

    pub owner: [u8; 32],
    pub mint: [u8; 32],
    pub deposit: [u8; 32],
    pub winner: [u8; 32],

    pub stake_keys: StakeKeys,

    pub participants_count: u16,
    pub status: u8,
    pub bump: u8,
    pub decimals: u8,
    pub winning_percentage: u8,
    pub name_len: u8,
    pub country_len: u8,
    pub operator_len: u8,
    pub value_date_len: u8,

    pub name: [u8; MAX_GAME_NAME_LEN],
    pub country: [u8; MAX_COUNTRY_LEN],
    pub operator: [u8; MAX_OPERATOR_LEN],
    pub value_date: [u8; MAX_VALUE_DATE_LEN],
    pub reserved: [u8; 5],
}

fn copy_str(buf: &mut [u8], value: &str) -> u8 {
    let bytes = value.as_bytes();
    let len = bytes.len().min(buf.len());
    buf[..len].copy_from_slice(&bytes[..len]);
    len as u8
}

impl LotteryGame {
    pub const SPACE: usize = 8 + core::mem::size_of::<LotteryGame>();

    pub fn owner_pubkey(&self) -> Pubkey {
        Pubkey::new_from_array(self.owner)
    }

    pub fn winner_pubkey(&self) -> Pubkey {
        Pubkey::new_from_array(self.winner)
    }

    pub fn mint_pubkey(&self) -> Pubkey {
        Pubkey::new_from_array(self.mint)
    }

    pub fn deposit_pubkey(&self) -> Pubkey {
        Pubkey::new_from_array(self.deposit)
    }

    pub fn name(&self) -> &str {
        core::str::from_utf8(&self.name[..self.name_len as usize]).unwrap_or("")
    }

    pub fn country(&self) -> &str {
        core::str::from_utf8(&self.country[..self.country_len as usize]).unwrap_or("")
    }

    pub fn operator(&self) -> &str {
        core::str::from_utf8(&self.operator[..self.operator_len as usize]).unwrap_or("")
    }

    pub fn value_date(&self) -> &str {
        core::str::from_utf8(&self.value_date[..self.value_date_len as usize]).unwrap_or("")
    }

    /// Store the immutable profile strings. Lengths are validated by the
    /// registration handler before this is called; anything longer is cut at
    /// the buffer boundary.
    pub fn set_profile(&mut self, name: &str, country: &str, operator: &str, value_date: &str) {
        self.name_len = copy_str(&mut self.name, name);
        self.country_len = copy_str(&mut self.country, country);
        self.operator_len = copy_str(&mut self.operator, operator);
        self.value_date_len = copy_str(&mut self.value_date, value_date);
    }

    fn stake_index_of(&self, buyer: &[u8; 32]) -> Option<u16> {
        (0..self.participants_count as usize)
            .find(|&i| self.stake_keys.data[i] == *buyer)
            .map(|i| (i + 1) as u16)
    }

    /// Record a ticket purchase: upsert the buyer's stake entry, grow the
    /// Fenwick tree, and advance the sales counters. Fails while the game is
    /// not open.
    pub fn record_purchase(&mut self, buyer: [u8; 32], amount: u64) -> Result<PurchaseReceipt> {
        require!(self.status == GameStatus::Open as u8, ErrorCode::GameNotOpen);
        let tickets = tickets_for_amount(amount, self.ticket_price)?;

        let stake_index = match self.stake_index_of(&buyer) {
            Some(index) => index,
            None => {
                let next = self
                    .participants_count
                    .checked_add(1)
                    .ok_or(ErrorCode::MathOverflow)?;
                require!(
                    (next as usize) <= MAX_GAME_PARTICIPANTS,
                    ErrorCode::MaxParticipantsReached
                );
                self.stake_keys.data[(next - 1) as usize] = buyer;
                self.participants_count = next;
                next
            }
        };

        bit_add(&mut self.ticket_tree.data, stake_index as usize, tickets)?;
        self.tickets_sold = checked_add_u64(self.tickets_sold, tickets)?;
        self.amount_collected = checked_add_u64(self.amount_collected, amount)?;

        Ok(PurchaseReceipt {
            tickets,
            stake_index,
        })
    }

    /// Settle the game: map the draw seed to a winning ticket, resolve its
    /// holder through the Fenwick tree, split the pot, and transition
    /// `Open -> WinnerSelected`. Selection weight is proportional to tickets
    /// held. At most one settlement per game.
    pub fn settle(&mut self, seed: [u8; 32]) -> Result<Settlement> {
        require!(
            self.status == GameStatus::Open as u8,
            ErrorCode::WinnerAlreadySelected
        );
        require!(self.tickets_sold > 0, ErrorCode::NoParticipants);

        let winning_ticket = pick_winning_ticket(&seed, self.tickets_sold);
        let winner_idx = bit_find_prefix(&self.ticket_tree.data, winning_ticket)?;
        let winner = self.stake_keys.data[winner_idx - 1];
        let split = compute_prize_split(self.amount_collected, self.winning_percentage)?;

        self.winner = winner;
        self.winning_ticket = winning_ticket;
        self.prize_pool = split.prize_pool;
        self.status = GameStatus::WinnerSelected as u8;

        Ok(Settlement {
            winner,
            winning_ticket,
            prize_pool: split.prize_pool,
            retention: split.retention,
        })
    }
}

/// Escrow deposit record for one game. The vault authority PDA is derived
/// from this account's own address, so the bumps live here.
#[account]
#[derive(Default)]
pub struct DepositBase {
    pub game: Pubkey,
    pub auth_bump: u8,
    pub vault_bump: u8,
    /// Mirror of the vault token balance, authoritative from winner
    /// selection onward.
    pub collected_balance: u64,
    /// Unwithdrawn winnings still owed from the vault.
    pub outstanding_liability: u64,
    pub reserved: [u8; 14],
}

impl DepositBase {
    pub const SPACE: usize = 8 + 32 + 1 + 1 + 8 + 8 + 14;

    pub fn record_settlement(&mut self, collected_balance: u64, liability: u64) {
        self.collected_balance = collected_balance;
        self.outstanding_liability = liability;
    }

    pub fn apply_withdrawal(&mut self, amount: u64) -> Result<()> {
        self.outstanding_liability = checked_sub_u64(self.outstanding_liability, amount)?;
        self.collected_balance = checked_sub_u64(self.collected_balance, amount)?;
        Ok(())
    }

    /// Platform share left in the vault after the outstanding winnings.
    pub fn retention(&self) -> u64 {
        self.collected_balance
            .saturating_sub(self.outstanding_liability)
    }

    pub fn apply_sweep(&mut self, amount: u64) -> Result<()> {
        self.collected_balance = checked_sub_u64(self.collected_balance, amount)?;
        Ok(())
    }
}

#[account]
#[derive(Default)]
pub struct Participant {
    pub owner: Pubkey,
    pub full_names: String,
    pub country: String,
    pub tickets_bought: u64,
    pub pending_winnings: u64,
    pub has_withdrawn: bool,
    pub bump: u8,
    pub reserved: [u8; 16],
}

impl Participant {
    pub const SPACE: usize = 8 + 32 + (4 + crate::constants::MAX_FULL_NAMES_LEN) + (4 + MAX_COUNTRY_LEN) + 8 + 8 + 1 + 1 + 16;

    pub fn note_purchase(&mut self, tickets: u64) -> Result<()> {
        self.tickets_bought = checked_add_u64(self.tickets_bought, tickets)?;
        Ok(())
    }

    /// Credit the recorded award into `pending_winnings` on the winner's
    /// first withdrawal touch. The winner is unknown when the draw commits,
    /// so the participant record cannot be written then; `has_withdrawn`
    /// guards against crediting the same award twice.
    pub fn materialize_winnings(&mut self, winner: &[u8; 32], prize_pool: u64) {
        if !self.has_withdrawn
            && self.pending_winnings == 0
            && self.owner.to_bytes() == *winner
        {
            self.pending_winnings = prize_pool;
        }
    }

    pub fn apply_withdrawal(&mut self, amount: u64) -> Result<()> {
        require!(self.pending_winnings > 0, ErrorCode::NothingToWithdraw);
        require!(amount <= self.pending_winnings, ErrorCode::InvalidAmount);
        self.pending_winnings = checked_sub_u64(self.pending_winnings, amount)?;
        if self.pending_winnings == 0 {
            self.has_withdrawn = true;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytemuck::Zeroable;

    fn open_game(ticket_price: u64, winning_percentage: u8) -> LotteryGame {
        let mut game = LotteryGame::zeroed();
        game.ticket_price = ticket_price;
        game.winning_percentage = winning_percentage;
        game
    }

    fn seed_for_ticket(ticket: u64) -> [u8; 32] {
        // pick_winning_ticket takes the low 16 bytes little-endian, mod total, plus one
        let mut seed = [0u8; 32];
        seed[..16].copy_from_slice(&((ticket - 1) as u128).to_le_bytes());
        seed
    }

    #[test]
    fn purchase_keeps_amount_collected_consistent() {
        let mut game = open_game(10, 90);
        game.record_purchase([1u8; 32], 30).unwrap();
        game.record_purchase([2u8; 32], 10).unwrap();

        assert_eq!(game.tickets_sold, 4);
        assert_eq!(game.amount_collected, 40);
        assert_eq!(game.amount_collected, game.tickets_sold * game.ticket_price);
        assert_eq!(game.participants_count, 2);
    }

    #[test]
    fn repeat_buyer_reuses_stake_entry() {
        let mut game = open_game(5, 50);
        let first = game.record_purchase([1u8; 32], 5).unwrap();
        let second = game.record_purchase([1u8; 32], 15).unwrap();

        assert_eq!(first.stake_index, second.stake_index);
        assert_eq!(game.participants_count, 1);
        assert_eq!(game.tickets_sold, 4);
    }

    #[test]
    fn purchase_rejects_bad_amounts() {
        let mut game = open_game(10, 50);
        assert_eq!(
            game.record_purchase([1u8; 32], 0).unwrap_err(),
            ErrorCode::InvalidAmount.into()
        );
        assert_eq!(
            game.record_purchase([1u8; 32], 15).unwrap_err(),
            ErrorCode::AmountNotMultipleOfPrice.into()
        );
        assert_eq!(game.tickets_sold, 0);
        assert_eq!(game.amount_collected, 0);
    }

    #[test]
    fn purchase_after_settlement_changes_nothing() {
        let mut game = open_game(1, 90);
        game.record_purchase([1u8; 32], 1).unwrap();
        game.settle(seed_for_ticket(1)).unwrap();

        assert_eq!(
            game.record_purchase([2u8; 32], 1).unwrap_err(),
            ErrorCode::GameNotOpen.into()
        );
        assert_eq!(game.tickets_sold, 1);
        assert_eq!(game.amount_collected, 1);
        assert_eq!(game.participants_count, 1);
    }

    #[test]
    fn settlement_requires_ticket_sales() {
        let mut game = open_game(1, 90);
        assert_eq!(
            game.settle([0u8; 32]).unwrap_err(),
            ErrorCode::NoParticipants.into()
        );
    }

    #[test]
    fn settlement_commits_exactly_once() {
        let mut game = open_game(1, 90);
        game.record_purchase([1u8; 32], 2).unwrap();
        game.settle(seed_for_ticket(1)).unwrap();

        assert_eq!(
            game.settle(seed_for_ticket(2)).unwrap_err(),
            ErrorCode::WinnerAlreadySelected.into()
        );
    }

    #[test]
    fn two_single_ticket_buyers_split_ninety_percent_pot() {
        // ticket price 1, two buyers with one ticket each, 90% winning share:
        // prize pool floors to 1 and the other unit stays as retention.
        let mut game = open_game(1, 90);
        game.record_purchase([1u8; 32], 1).unwrap();
        game.record_purchase([2u8; 32], 1).unwrap();

        let settlement = game.settle(seed_for_ticket(1)).unwrap();
        assert_eq!(settlement.prize_pool, 1);
        assert_eq!(settlement.retention, 1);
        assert_eq!(settlement.winner, [1u8; 32]);
        assert_eq!(game.status, GameStatus::WinnerSelected as u8);
        assert_eq!(game.prize_pool, 1);
    }

    #[test]
    fn selection_weight_follows_ticket_count() {
        // one ticket for the first buyer, three for the second: every ticket
        // index must resolve to its holder
        for ticket in 1..=4u64 {
            let mut probe = open_game(1, 100);
            probe.record_purchase([1u8; 32], 1).unwrap();
            probe.record_purchase([2u8; 32], 3).unwrap();
            let settlement = probe.settle(seed_for_ticket(ticket)).unwrap();
            let expected = if ticket == 1 { [1u8; 32] } else { [2u8; 32] };
            assert_eq!(settlement.winner, expected, "ticket {ticket}");
        }
    }

    #[test]
    fn stake_table_is_bounded() {
        let mut game = open_game(1, 10);
        for i in 0..MAX_GAME_PARTICIPANTS {
            let mut buyer = [0u8; 32];
            buyer[..8].copy_from_slice(&(i as u64 + 1).to_le_bytes());
            game.record_purchase(buyer, 1).unwrap();
        }
        assert_eq!(
            game.record_purchase([0xEE; 32], 1).unwrap_err(),
            ErrorCode::MaxParticipantsReached.into()
        );
    }

    #[test]
    fn winnings_credit_exactly_once() {
        let winner_key = Pubkey::new_unique();
        let mut winner = Participant {
            owner: winner_key,
            ..Participant::default()
        };
        let mut loser = Participant {
            owner: Pubkey::new_unique(),
            ..Participant::default()
        };
        let winner_bytes = winner_key.to_bytes();

        loser.materialize_winnings(&winner_bytes, 5);
        assert_eq!(loser.pending_winnings, 0);
        assert_eq!(
            loser.apply_withdrawal(1).unwrap_err(),
            ErrorCode::NothingToWithdraw.into()
        );

        winner.materialize_winnings(&winner_bytes, 5);
        assert_eq!(winner.pending_winnings, 5);
        assert_eq!(
            winner.apply_withdrawal(6).unwrap_err(),
            ErrorCode::InvalidAmount.into()
        );

        winner.apply_withdrawal(2).unwrap();
        assert_eq!(winner.pending_winnings, 3);
        assert!(!winner.has_withdrawn);

        winner.apply_withdrawal(3).unwrap();
        assert!(winner.has_withdrawn);

        // a fully drawn-down award never re-credits
        winner.materialize_winnings(&winner_bytes, 5);
        assert_eq!(winner.pending_winnings, 0);
        assert_eq!(
            winner.apply_withdrawal(1).unwrap_err(),
            ErrorCode::NothingToWithdraw.into()
        );
    }

    #[test]
    fn deposit_tracks_liability_and_retention() {
        let mut deposit = DepositBase::default();
        deposit.record_settlement(10, 9);
        assert_eq!(deposit.retention(), 1);

        deposit.apply_withdrawal(4).unwrap();
        assert_eq!(deposit.outstanding_liability, 5);
        assert_eq!(deposit.collected_balance, 6);
        assert_eq!(deposit.retention(), 1);

        deposit.apply_withdrawal(5).unwrap();
        assert_eq!(deposit.outstanding_liability, 0);
        assert_eq!(deposit.retention(), 1);

        deposit.apply_sweep(1).unwrap();
        assert_eq!(deposit.collected_balance, 0);
        assert_eq!(
            deposit.apply_withdrawal(1).unwrap_err(),
            ErrorCode::MathOverflow.into()
        );
    }

    #[test]
    fn registry_slots_are_monotonic() {
        let mut registry = GameRegistry::default();
        assert_eq!(registry.register_game_slot().unwrap(), 1);
        assert_eq!(registry.register_game_slot().unwrap(), 2);
        assert_eq!(registry.game_count, 2);
    }

    #[test]
    fn profile_strings_are_stored_and_read_back() {
        let mut game = LotteryGame::zeroed();
        game.set_profile("mega-draw", "KE", "Acme Gaming Ltd", "2026-01-01");
        assert_eq!(game.name(), "mega-draw");
        assert_eq!(game.country(), "KE");
        assert_eq!(game.operator(), "Acme Gaming Ltd");
        assert_eq!(game.value_date(), "2026-01-01");
    }
}
