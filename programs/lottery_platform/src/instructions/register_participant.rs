use anchor_lang::prelude::*;
use crate::{constants::*, errors::ErrorCode, events::ParticipantRegistered, state::Participant};

#[derive(AnchorSerialize, AnchorDeserialize, Clone)]
pub struct RegisterParticipantArgs {
    /// Full names, i.e. first name, middle name, surname.
    pub full_names: String,
    pub country: String,
}

impl RegisterParticipantArgs {
    pub fn validate(&self) -> Result<()> {
        let full_names_len = self.full_names.as_bytes().len();
        require!(
            full_names_len > 0 && full_names_len <= MAX_FULL_NAMES_LEN,
            ErrorCode::InvalidFullNamesLength
        );

        let country_len = self.country.as_bytes().len();
        require!(
            (MIN_COUNTRY_LEN..=MAX_COUNTRY_LEN).contains(&country_len),
            ErrorCode::InvalidCountryLength
        );

        Ok(())
    }
}

#[derive(Accounts)]
pub struct RegisterParticipant<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

    #[account(
        init_if_needed,
        payer = owner,
        space = Participant::SPACE,
        seeds = [SEED_PARTICIPANT, owner.key().as_ref()],
        bump
    )]
    pub participant: Account<'info, Participant>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<RegisterParticipant>, args: RegisterParticipantArgs) -> Result<()> {
    args.validate()?;

    let participant = &mut ctx.accounts.participant;

    // A fresh account is zeroed; an owner already set means a repeat
    // registration, and the first record stays as it was.
    require!(
        participant.owner == Pubkey::default(),
        ErrorCode::ParticipantAlreadyRegistered
    );

    participant.owner = ctx.accounts.owner.key();
    participant.full_names = args.full_names;
    participant.country = args.country;
    participant.bump = ctx.bumps.participant;

    emit!(ParticipantRegistered {
        participant: participant.key(),
        owner: participant.owner,
    });

    Ok(())
}
