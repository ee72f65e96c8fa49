use anchor_lang::prelude::*;
use crate::{constants::*, errors::ErrorCode, events::RegistryInitialized, state::GameRegistry};

#[derive(Accounts)]
pub struct InitRegistry<'info> {
    #[account(mut)]
    pub admin: Signer<'info>,

    #[account(
        init_if_needed,
        payer = admin,
        space = GameRegistry::SPACE,
        seeds = [SEED_GAME_CONFIGS],
        bump
    )]
    pub registry: Account<'info, GameRegistry>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<InitRegistry>) -> Result<()> {
    let registry = &mut ctx.accounts.registry;

    // A fresh account is zeroed; an admin already set means a second init.
    require!(
        registry.admin == Pubkey::default(),
        ErrorCode::RegistryAlreadyInitialized
    );

    registry.admin = ctx.accounts.admin.key();
    registry.game_count = 0;
    registry.bump = ctx.bumps.registry;

    emit!(RegistryInitialized {
        admin: registry.admin,
    });

    Ok(())
}
