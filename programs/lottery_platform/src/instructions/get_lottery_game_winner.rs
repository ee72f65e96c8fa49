use anchor_lang::prelude::*;
use anchor_lang::solana_program::sysvar::slot_hashes;
use crate::{
    constants::*,
    errors::ErrorCode,
    events::GameWinnerSelected,
    instructions::register_lottery_game::LotteryOperator,
    state::{DepositBase, LotteryGame},
    utils::draw_seed,
};

#[derive(AnchorSerialize, AnchorDeserialize, Clone)]
pub struct GetLotteryGameWinnerArgs {
    pub operator: LotteryOperator,
    pub country: String,
    pub lottery_game_name: String,
}

impl GetLotteryGameWinnerArgs {
    pub fn validate(&self) -> Result<()> {
        let operator_len = self.operator.operator.as_bytes().len();
        require!(
            operator_len > 0 && operator_len <= MAX_OPERATOR_LEN,
            ErrorCode::InvalidOperatorLength
        );

        let country_len = self.country.as_bytes().len();
        require!(
            (MIN_COUNTRY_LEN..=MAX_COUNTRY_LEN).contains(&country_len),
            ErrorCode::InvalidCountryLength
        );

        let name_len = self.lottery_game_name.as_bytes().len();
        require!(
            name_len > 0 && name_len <= MAX_GAME_NAME_LEN,
            ErrorCode::InvalidGameNameLength
        );

        Ok(())
    }
}

#[derive(Accounts)]
pub struct GetLotteryGameWinner<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

    #[account(mut)]
    pub lottery_game: AccountLoader<'info, LotteryGame>,

    #[account(mut)]
    pub deposit_account: Account<'info, DepositBase>,

    /// CHECK: the SlotHashes sysvar, pinned by address; its raw bytes feed
    /// the draw seed.
    #[account(address = slot_hashes::ID @ ErrorCode::InvalidSlotHashes)]
    pub slot_hashes: UncheckedAccount<'info>,
}

pub fn handler(ctx: Context<GetLotteryGameWinner>, args: GetLotteryGameWinnerArgs) -> Result<()> {
    args.validate()?;

    let game_key = ctx.accounts.lottery_game.key();
    let mut game = ctx.accounts.lottery_game.load_mut()?;

    require!(
        game.owner == ctx.accounts.owner.key().to_bytes(),
        ErrorCode::Unauthorized
    );
    require!(
        game.deposit == ctx.accounts.deposit_account.key().to_bytes(),
        ErrorCode::InvalidVault
    );

    let seed = {
        let data = ctx.accounts.slot_hashes.try_borrow_data()?;
        draw_seed(&data, &game_key, game.tickets_sold)?
    };

    let settlement = game.settle(seed)?;

    let deposit = &mut ctx.accounts.deposit_account;
    deposit.record_settlement(game.amount_collected, settlement.prize_pool);

    msg!("Winning ticket: {}", settlement.winning_ticket);

    emit!(GameWinnerSelected {
        game: game_key,
        winner: Pubkey::new_from_array(settlement.winner),
        winning_ticket: settlement.winning_ticket,
        tickets_sold: game.tickets_sold,
        prize_pool: settlement.prize_pool,
        retention: settlement.retention,
    });

    Ok(())
}
