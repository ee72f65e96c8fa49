use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};
use crate::{
    constants::*,
    errors::ErrorCode,
    events::ProceedsSwept,
    state::{DepositBase, GameStatus, LotteryGame},
};

/// Owner-only sweep of the platform retention — whatever the vault still
/// holds beyond the outstanding winnings — once the winner has been selected.
#[derive(Accounts)]
pub struct SweepProceeds<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

    pub lottery_game: AccountLoader<'info, LotteryGame>,

    #[account(mut)]
    pub deposit_account: Account<'info, DepositBase>,

    /// CHECK: escrow authority PDA; holds no data, signs the vault transfer.
    #[account(seeds = [SEED_VAULT_AUTH, deposit_account.key().as_ref()], bump = deposit_account.auth_bump)]
    pub pda_auth: UncheckedAccount<'info>,

    #[account(
        mut,
        seeds = [SEED_TREASURY_VAULT, pda_auth.key().as_ref()],
        bump = deposit_account.vault_bump,
    )]
    pub treasury_vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = recipient_tokens.owner == owner.key() @ ErrorCode::InvalidTokenAccount,
    )]
    pub recipient_tokens: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn handler(ctx: Context<SweepProceeds>) -> Result<()> {
    let game_key = ctx.accounts.lottery_game.key();
    let game = ctx.accounts.lottery_game.load()?;

    require!(
        game.owner == ctx.accounts.owner.key().to_bytes(),
        ErrorCode::Unauthorized
    );
    require!(
        game.deposit == ctx.accounts.deposit_account.key().to_bytes(),
        ErrorCode::InvalidVault
    );
    require!(
        ctx.accounts.treasury_vault.mint.to_bytes() == game.mint,
        ErrorCode::InvalidVault
    );
    require!(
        ctx.accounts.recipient_tokens.mint.to_bytes() == game.mint,
        ErrorCode::InvalidTokenAccount
    );
    require!(
        game.status != GameStatus::Open as u8,
        ErrorCode::WinnerNotSelected
    );
    drop(game);

    let deposit = &mut ctx.accounts.deposit_account;
    let amount = deposit.retention();
    require!(amount > 0, ErrorCode::NothingToSweep);
    require!(
        ctx.accounts.treasury_vault.amount >= amount,
        ErrorCode::InsufficientVaultBalance
    );

    deposit.apply_sweep(amount)?;
    let auth_bump = deposit.auth_bump;

    let deposit_key = ctx.accounts.deposit_account.key();
    let signer_seeds: &[&[u8]] = &[SEED_VAULT_AUTH, deposit_key.as_ref(), &[auth_bump]];

    token::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.treasury_vault.to_account_info(),
                to: ctx.accounts.recipient_tokens.to_account_info(),
                authority: ctx.accounts.pda_auth.to_account_info(),
            },
            &[signer_seeds],
        ),
        amount,
    )?;

    emit!(ProceedsSwept {
        game: game_key,
        owner: ctx.accounts.owner.key(),
        amount,
    });

    Ok(())
}
