use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};
use crate::{
    constants::*,
    errors::ErrorCode,
    events::WinningsWithdrawn,
    state::{DepositBase, GameStatus, LotteryGame, Participant},
};

#[derive(AnchorSerialize, AnchorDeserialize, Clone)]
pub struct WithdrawLotteryGameWinningsArgs {
    /// Amount to withdraw, in the mint's smallest unit. Partial withdrawals
    /// are allowed up to the pending winnings.
    pub amount: u64,
}

#[derive(Accounts)]
pub struct WithdrawLotteryGameWinnings<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

    #[account(mut)]
    pub lottery_game: AccountLoader<'info, LotteryGame>,

    #[account(
        mut,
        seeds = [SEED_PARTICIPANT, owner.key().as_ref()],
        bump = participant.bump,
    )]
    pub participant: Account<'info, Participant>,

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

pub fn handler(
    ctx: Context<WithdrawLotteryGameWinnings>,
    args: WithdrawLotteryGameWinningsArgs,
) -> Result<()> {
    let amount = args.amount;
    require!(amount > 0, ErrorCode::InvalidAmount);

    let game_key = ctx.accounts.lottery_game.key();
    let mut game = ctx.accounts.lottery_game.load_mut()?;

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

    let participant = &mut ctx.accounts.participant;
    participant.materialize_winnings(&game.winner, game.prize_pool);
    participant.apply_withdrawal(amount)?;

    require!(
        ctx.accounts.treasury_vault.amount >= amount,
        ErrorCode::InsufficientVaultBalance
    );

    let deposit = &mut ctx.accounts.deposit_account;
    deposit.apply_withdrawal(amount)?;
    if deposit.outstanding_liability == 0 {
        game.status = GameStatus::Closed as u8;
    }

    let remaining_winnings = participant.pending_winnings;
    let auth_bump = deposit.auth_bump;

    // Drop RefMut before CPI
    drop(game);

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

    emit!(WinningsWithdrawn {
        game: game_key,
        winner: ctx.accounts.owner.key(),
        amount,
        remaining_winnings,
    });

    Ok(())
}
