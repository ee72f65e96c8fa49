use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};
use crate::errors::ErrorCode;

#[derive(AnchorSerialize, AnchorDeserialize, Clone)]
pub struct TransferTokenArgs {
    /// Amount to move, in the mint's smallest unit.
    pub amount: u64,
}

/// Token-ledger pass-through: moves tokens between two holding accounts with
/// the signer as authority.
#[derive(Accounts)]
pub struct TransferToken<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

    #[account(
        mut,
        constraint = from_account.owner == owner.key() @ ErrorCode::InvalidTokenAccount,
    )]
    pub from_account: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = to_account.mint == from_account.mint @ ErrorCode::InvalidTokenAccount,
    )]
    pub to_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn handler(ctx: Context<TransferToken>, args: TransferTokenArgs) -> Result<()> {
    require!(args.amount > 0, ErrorCode::InvalidAmount);
    require!(
        ctx.accounts.from_account.amount >= args.amount,
        ErrorCode::InsufficientFunds
    );

    token::transfer(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.from_account.to_account_info(),
                to: ctx.accounts.to_account.to_account_info(),
                authority: ctx.accounts.owner.to_account_info(),
            },
        ),
        args.amount,
    )?;

    Ok(())
}
