use anchor_lang::prelude::*;

use crate::{
    constants::*,
    errors::ErrorCode,
    events::AdminTransferred,
    state::GameRegistry,
};

#[derive(Accounts)]
pub struct TransferAdmin<'info> {
    #[account(mut)]
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [SEED_GAME_CONFIGS],
        bump = registry.bump,
        constraint = registry.admin == admin.key() @ ErrorCode::Unauthorized,
    )]
    pub registry: Account<'info, GameRegistry>,
}

pub fn handler(ctx: Context<TransferAdmin>, new_admin: Pubkey) -> Result<()> {
    let registry = &mut ctx.accounts.registry;

    require!(new_admin != Pubkey::default(), ErrorCode::InvalidAdmin);
    require!(new_admin != registry.admin, ErrorCode::InvalidAdmin);

    let old_admin = registry.admin;
    registry.admin = new_admin;

    emit!(AdminTransferred {
        old_admin,
        new_admin,
    });

    Ok(())
}
