pub const SEED_GAME_CONFIGS: &[u8] = b"lottery-game-configs";
pub const SEED_LOTTERY_GAME: &[u8] = b"lottery-game";
pub const SEED_VAULT_AUTH: &[u8] = b"auth";
pub const SEED_TREASURY_VAULT: &[u8] = b"treasury-vault";
pub const SEED_PARTICIPANT: &[u8] = b"participant";

/// Capacity of the per-game stake table. Bounds the game account size and the
/// number of distinct buyers a single game can hold.
pub const MAX_GAME_PARTICIPANTS: usize = 100;

pub const PERCENT_DENOMINATOR: u64 = 100;
pub const MAX_WINNING_PERCENTAGE: u8 = 100;
pub const MAX_TOKEN_DECIMALS: u8 = 18;

pub const MAX_GAME_NAME_LEN: usize = 20;
pub const MAX_OPERATOR_LEN: usize = 30;
pub const MAX_VALUE_DATE_LEN: usize = 20;
pub const MAX_FULL_NAMES_LEN: usize = 50;
pub const MIN_COUNTRY_LEN: usize = 2;
pub const MAX_COUNTRY_LEN: usize = 3;

/// SlotHashes sysvar layout: u64 entry count, then (u64 slot, 32-byte hash)
/// pairs, newest first.
pub const SLOT_HASH_ENTRY_LEN: usize = 40;
/// Number of recent slot-hash entries folded into the draw seed.
pub const DRAW_SEED_SLOT_COUNT: usize = 3;
