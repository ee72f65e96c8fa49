use anchor_lang::prelude::*;
use crate::constants::{
    DRAW_SEED_SLOT_COUNT, MAX_WINNING_PERCENTAGE, PERCENT_DENOMINATOR, SLOT_HASH_ENTRY_LEN,
};
use crate::errors::ErrorCode;

#[derive(Debug)]
pub struct PrizeSplit {
    pub prize_pool: u64,
    pub retention: u64,
}

pub fn checked_add_u64(a: u64, b: u64) -> Result<u64> {
    a.checked_add(b).ok_or(ErrorCode::MathOverflow.into())
}

pub fn checked_sub_u64(a: u64, b: u64) -> Result<u64> {
    a.checked_sub(b).ok_or(ErrorCode::MathOverflow.into())
}

/// Number of tickets `amount` buys at `ticket_price`. The amount must be a
/// positive multiple of the price; one call may buy several tickets.
pub fn tickets_for_amount(amount: u64, ticket_price: u64) -> Result<u64> {
    require!(ticket_price > 0, ErrorCode::InvalidTicketPrice);
    require!(amount > 0, ErrorCode::InvalidAmount);
    require!(amount % ticket_price == 0, ErrorCode::AmountNotMultipleOfPrice);
    Ok(amount / ticket_price)
}

/// Split the collected pot into the winner's prize and the platform retention.
/// Integer arithmetic with truncation; the truncated remainder stays on the
/// retention side.
pub fn compute_prize_split(amount_collected: u64, winning_percentage: u8) -> Result<PrizeSplit> {
    require!(
        winning_percentage <= MAX_WINNING_PERCENTAGE,
        ErrorCode::InvalidWinningPercentage
    );

    let prize_pool = ((amount_collected as u128)
        .checked_mul(winning_percentage as u128)
        .ok_or(ErrorCode::MathOverflow)?)
    .checked_div(PERCENT_DENOMINATOR as u128)
    .ok_or(ErrorCode::MathOverflow)? as u64;

    let retention = amount_collected
        .checked_sub(prize_pool)
        .ok_or(ErrorCode::MathOverflow)?;

    Ok(PrizeSplit {
        prize_pool,
        retention,
    })
}

/// Add `delta` tickets for the stake at 1-based index `i` in the Fenwick tree.
pub fn bit_add(bit: &mut [u64], mut i: usize, delta: u64) -> Result<()> {
    let n = bit.len() - 1; // 1-indexed
    while i <= n {
        bit[i] = bit[i].checked_add(delta).ok_or(ErrorCode::MathOverflow)?;
        i += i & (!i + 1); // i += lowbit(i)
    }
    Ok(())
}

/// Smallest 1-based index whose prefix ticket sum reaches `target`.
pub fn bit_find_prefix(bit: &[u64], target: u64) -> Result<usize> {
    let n = bit.len() - 1;
    let mut bit_mask = 1usize;
    while bit_mask <= n {
        bit_mask <<= 1;
    }
    let mut idx = 0usize;
    let mut cur = 0u64;
    let mut step = bit_mask;
    while step > 0 {
        let next = idx + step;
        if next <= n {
            let cand = cur.checked_add(bit[next]).ok_or(ErrorCode::MathOverflow)?;
            if cand < target {
                idx = next;
                cur = cand;
            }
        }
        step >>= 1;
    }
    Ok(idx + 1)
}

/// Fold the most recent SlotHashes entries through blake3 together with the
/// game key and sales counter. The sysvar holds recent ledger hashes, so the
/// digest is outside participant control; the raw sysvar bytes are
/// `u64 count | (u64 slot, [u8; 32] hash) * count`, newest first.
pub fn draw_seed(slot_hashes_data: &[u8], game_key: &Pubkey, tickets_sold: u64) -> Result<[u8; 32]> {
    let count_bytes = slot_hashes_data
        .get(..8)
        .ok_or(ErrorCode::InvalidSlotHashes)?;
    let count = u64::from_le_bytes(
        count_bytes
            .try_into()
            .map_err(|_| ErrorCode::InvalidSlotHashes)?,
    ) as usize;
    require!(count > 0, ErrorCode::InvalidSlotHashes);

    let take = DRAW_SEED_SLOT_COUNT.min(count);
    let needed = 8 + take * SLOT_HASH_ENTRY_LEN;
    require!(slot_hashes_data.len() >= needed, ErrorCode::InvalidSlotHashes);

    let mut hasher = blake3::Hasher::new();
    hasher.update(game_key.as_ref());
    hasher.update(&tickets_sold.to_le_bytes());
    for entry in 0..take {
        let off = 8 + entry * SLOT_HASH_ENTRY_LEN;
        hasher.update(&slot_hashes_data[off..off + SLOT_HASH_ENTRY_LEN]);
    }

    Ok(*hasher.finalize().as_bytes())
}

/// Map a draw seed to a winning ticket number in `1..=total_tickets`.
pub fn pick_winning_ticket(seed: &[u8; 32], total_tickets: u64) -> u64 {
    let mut bytes16 = [0u8; 16];
    bytes16.copy_from_slice(&seed[..16]);
    let r = u128::from_le_bytes(bytes16);
    (r % total_tickets as u128) as u64 + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sysvar_bytes(entries: &[(u64, [u8; 32])]) -> Vec<u8> {
        let mut data = Vec::new();
        data.extend_from_slice(&(entries.len() as u64).to_le_bytes());
        for (slot, hash) in entries {
            data.extend_from_slice(&slot.to_le_bytes());
            data.extend_from_slice(hash);
        }
        data
    }

    #[test]
    fn splits_two_unit_pot_at_ninety_percent() {
        let split = compute_prize_split(2, 90).unwrap();
        assert_eq!(split.prize_pool, 1);
        assert_eq!(split.retention, 1);
    }

    #[test]
    fn prize_split_truncates_toward_retention() {
        let split = compute_prize_split(3, 50).unwrap();
        assert_eq!(split.prize_pool, 1);
        assert_eq!(split.retention, 2);
    }

    #[test]
    fn prize_split_honors_percentage_bounds() {
        let all = compute_prize_split(1_000, 100).unwrap();
        assert_eq!(all.prize_pool, 1_000);
        assert_eq!(all.retention, 0);

        let none = compute_prize_split(1_000, 0).unwrap();
        assert_eq!(none.prize_pool, 0);
        assert_eq!(none.retention, 1_000);

        assert_eq!(
            compute_prize_split(1_000, 101).unwrap_err(),
            ErrorCode::InvalidWinningPercentage.into()
        );
    }

    #[test]
    fn ticket_count_requires_positive_multiple() {
        assert_eq!(tickets_for_amount(30, 10).unwrap(), 3);
        assert_eq!(
            tickets_for_amount(0, 10).unwrap_err(),
            ErrorCode::InvalidAmount.into()
        );
        assert_eq!(
            tickets_for_amount(25, 10).unwrap_err(),
            ErrorCode::AmountNotMultipleOfPrice.into()
        );
    }

    #[test]
    fn fenwick_prefix_maps_tickets_to_stakes() {
        let mut bit = vec![0u64; 9];
        bit_add(&mut bit, 1, 5).unwrap();
        bit_add(&mut bit, 2, 10).unwrap();
        bit_add(&mut bit, 3, 7).unwrap();

        assert_eq!(bit_find_prefix(&bit, 1).unwrap(), 1);
        assert_eq!(bit_find_prefix(&bit, 5).unwrap(), 1);
        assert_eq!(bit_find_prefix(&bit, 6).unwrap(), 2);
        assert_eq!(bit_find_prefix(&bit, 15).unwrap(), 2);
        assert_eq!(bit_find_prefix(&bit, 16).unwrap(), 3);
        assert_eq!(bit_find_prefix(&bit, 22).unwrap(), 3);
    }

    #[test]
    fn draw_seed_is_deterministic_per_game() {
        let data = sysvar_bytes(&[(900, [7u8; 32]), (899, [8u8; 32]), (898, [9u8; 32])]);
        let game_a = Pubkey::new_unique();
        let game_b = Pubkey::new_unique();

        let seed_a = draw_seed(&data, &game_a, 42).unwrap();
        assert_eq!(seed_a, draw_seed(&data, &game_a, 42).unwrap());
        assert_ne!(seed_a, draw_seed(&data, &game_b, 42).unwrap());
        assert_ne!(seed_a, draw_seed(&data, &game_a, 43).unwrap());
    }

    #[test]
    fn draw_seed_rejects_malformed_sysvar() {
        let game = Pubkey::new_unique();
        assert_eq!(
            draw_seed(&[], &game, 1).unwrap_err(),
            ErrorCode::InvalidSlotHashes.into()
        );
        assert_eq!(
            draw_seed(&sysvar_bytes(&[]), &game, 1).unwrap_err(),
            ErrorCode::InvalidSlotHashes.into()
        );
        // count claims more entries than the data carries
        let mut truncated = sysvar_bytes(&[(900, [7u8; 32])]);
        truncated[0] = 3;
        assert_eq!(
            draw_seed(&truncated, &game, 1).unwrap_err(),
            ErrorCode::InvalidSlotHashes.into()
        );
    }

    #[test]
    fn winning_ticket_stays_in_range() {
        let mut seed = [0u8; 32];
        assert_eq!(pick_winning_ticket(&seed, 10), 1);
        seed[0] = 9;
        assert_eq!(pick_winning_ticket(&seed, 10), 10);
        seed[0] = 10;
        assert_eq!(pick_winning_ticket(&seed, 10), 1);
        for byte in 0..=u8::MAX {
            seed[0] = byte;
            let ticket = pick_winning_ticket(&seed, 7);
            assert!((1..=7).contains(&ticket));
        }
    }
}
