use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};
use crate::{
    constants::*,
    errors::ErrorCode,
    events::TicketsPurchased,
    state::{DepositBase, LotteryGame, Participant},
};

#[derive(AnchorSerialize, AnchorDeserialize, Clone)]
pub struct BuyLotteryTicketArgs {
    /// Payment in the mint's smallest unit; must be a positive multiple of
    /// the ticket price. One call may buy several tickets.
    pub amount: u64,
}

#[derive(Accounts)]
pub struct BuyLotteryTicket<'info> {
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

    /// Read-only during sales; its balance mirror is written at settlement.
    pub deposit_account: Account<'info, DepositBase>,

    /// CHECK: escrow authority PDA; holds no data, verified by seeds.
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
        constraint = sender_tokens.owner == owner.key() @ ErrorCode::InvalidTokenAccount,
    )]
    pub sender_tokens: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn handler(ctx: Context<BuyLotteryTicket>, args: BuyLotteryTicketArgs) -> Result<()> {
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
        ctx.accounts.sender_tokens.mint.to_bytes() == game.mint,
        ErrorCode::InvalidTokenAccount
    );

    let amount = args.amount;
    let receipt = game.record_purchase(ctx.accounts.owner.key().to_bytes(), amount)?;

    require!(
        ctx.accounts.sender_tokens.amount >= amount,
        ErrorCode::InsufficientFunds
    );

    ctx.accounts.participant.note_purchase(receipt.tickets)?;

    let tickets_sold_after = game.tickets_sold;
    let amount_collected_after = game.amount_collected;

    // Drop RefMut before CPI
    drop(game);

    token::transfer(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.sender_tokens.to_account_info(),
                to: ctx.accounts.treasury_vault.to_account_info(),
                authority: ctx.accounts.owner.to_account_info(),
            },
        ),
        amount,
    )?;

    emit!(TicketsPurchased {
        game: game_key,
        buyer: ctx.accounts.owner.key(),
        amount,
        tickets: receipt.tickets,
        tickets_sold_after,
        amount_collected_after,
    });

    Ok(())
}
