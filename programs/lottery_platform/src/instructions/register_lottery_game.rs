use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};
use crate::{
    constants::*,
    errors::ErrorCode,
    events::GameRegistered,
    state::{DepositBase, GameRegistry, LotteryGame},
};

/// Single-variant operator record: the company running the game.
#[derive(AnchorSerialize, AnchorDeserialize, Clone)]
pub struct LotteryOperator {
    pub operator: String,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone)]
pub struct RegisterLotteryGameArgs {
    pub operator: LotteryOperator,
    pub country: String,
    pub lottery_game_name: String,
    pub winning_percentage: u8,
    /// Price of one ticket, in the mint's smallest unit.
    pub unit_cost_of_lottery_ticket: u64,
    pub decimals: u8,
    pub value_date: String,
}

impl RegisterLotteryGameArgs {
    pub fn validate(&self) -> Result<()> {
        require!(
            self.unit_cost_of_lottery_ticket > 0,
            ErrorCode::InvalidTicketPrice
        );
        require!(
            self.winning_percentage <= MAX_WINNING_PERCENTAGE,
            ErrorCode::InvalidWinningPercentage
        );
        require!(self.decimals <= MAX_TOKEN_DECIMALS, ErrorCode::InvalidDecimals);

        let name_len = self.lottery_game_name.as_bytes().len();
        require!(
            name_len > 0 && name_len <= MAX_GAME_NAME_LEN,
            ErrorCode::InvalidGameNameLength
        );

        let country_len = self.country.as_bytes().len();
        require!(
            (MIN_COUNTRY_LEN..=MAX_COUNTRY_LEN).contains(&country_len),
            ErrorCode::InvalidCountryLength
        );

        let operator_len = self.operator.operator.as_bytes().len();
        require!(
            operator_len > 0 && operator_len <= MAX_OPERATOR_LEN,
            ErrorCode::InvalidOperatorLength
        );

        let value_date_len = self.value_date.as_bytes().len();
        require!(
            value_date_len > 0 && value_date_len <= MAX_VALUE_DATE_LEN,
            ErrorCode::InvalidValueDateLength
        );

        Ok(())
    }
}

#[derive(Accounts)]
pub struct RegisterLotteryGame<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

    #[account(
        mut,
        seeds = [SEED_GAME_CONFIGS],
        bump = registry.bump,
    )]
    pub registry: Account<'info, GameRegistry>,

    #[account(
        init_if_needed,
        payer = owner,
        space = LotteryGame::SPACE,
        seeds = [SEED_LOTTERY_GAME, owner.key().as_ref()],
        bump
    )]
    pub lottery_game: AccountLoader<'info, LotteryGame>,

    /// Escrow deposit record — a client keypair account that signs its own
    /// creation; the vault authority derives from its address.
    #[account(init, payer = owner, space = DepositBase::SPACE)]
    pub deposit_account: Account<'info, DepositBase>,

    /// CHECK: escrow authority PDA; holds no data, only ever signs vault
    /// transfers with these seeds.
    #[account(seeds = [SEED_VAULT_AUTH, deposit_account.key().as_ref()], bump)]
    pub pda_auth: UncheckedAccount<'info>,

    #[account(
        init,
        payer = owner,
        seeds = [SEED_TREASURY_VAULT, pda_auth.key().as_ref()],
        bump,
        token::mint = mint,
        token::authority = pda_auth,
    )]
    pub treasury_vault: Account<'info, TokenAccount>,

    /// The token the game sells tickets in and pays winnings with.
    pub mint: Account<'info, Mint>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<RegisterLotteryGame>, args: RegisterLotteryGameArgs) -> Result<()> {
    args.validate()?;

    let game_key = ctx.accounts.lottery_game.key();

    // load_init fails once the discriminator is set, i.e. on a second
    // registration against the same owner-derived address.
    let mut game = ctx
        .accounts
        .lottery_game
        .load_init()
        .map_err(|_| error!(ErrorCode::GameAlreadyExists))?;

    game.owner = ctx.accounts.owner.key().to_bytes();
    game.mint = ctx.accounts.mint.key().to_bytes();
    game.deposit = ctx.accounts.deposit_account.key().to_bytes();
    game.ticket_price = args.unit_cost_of_lottery_ticket;
    game.winning_percentage = args.winning_percentage;
    game.decimals = args.decimals;
    game.bump = ctx.bumps.lottery_game;
    game.set_profile(
        &args.lottery_game_name,
        &args.country,
        &args.operator.operator,
        &args.value_date,
    );
    // status = Open, counters and stake table zeroed by account creation
    drop(game);

    let deposit = &mut ctx.accounts.deposit_account;
    deposit.game = game_key;
    deposit.auth_bump = ctx.bumps.pda_auth;
    deposit.vault_bump = ctx.bumps.treasury_vault;

    let game_count = ctx.accounts.registry.register_game_slot()?;

    emit!(GameRegistered {
        game: game_key,
        owner: ctx.accounts.owner.key(),
        mint: ctx.accounts.mint.key(),
        deposit: ctx.accounts.deposit_account.key(),
        treasury_vault: ctx.accounts.treasury_vault.key(),
        ticket_price: args.unit_cost_of_lottery_ticket,
        winning_percentage: args.winning_percentage,
        game_count,
    });

    Ok(())
}
