use anchor_lang::prelude::*;

pub mod constants;
pub mod errors;
pub mod events;
pub mod state;
pub mod utils;
pub mod instructions;

use instructions::*;

declare_id!("AA7crqzoJE15cTM8aQGrPP7FLHsCc8i2YcFkQNNwhShA");

#[program]
pub mod lottery_platform {
    use super::*;

    // admin instructions
    pub fn init(ctx: Context<InitRegistry>) -> Result<()> {
        init_registry::handler(ctx)
    }

    pub fn transfer_admin(ctx: Context<TransferAdmin>, new_admin: Pubkey) -> Result<()> {
        transfer_admin::handler(ctx, new_admin)
    }

    pub fn register_lottery_game(
        ctx: Context<RegisterLotteryGame>,
        args: RegisterLotteryGameArgs,
    ) -> Result<()> {
        register_lottery_game::handler(ctx, args)
    }

    // public instructions
    pub fn register_participant(
        ctx: Context<RegisterParticipant>,
        args: RegisterParticipantArgs,
    ) -> Result<()> {
        register_participant::handler(ctx, args)
    }

    pub fn create_token(ctx: Context<CreateToken>, args: CreateTokenArgs) -> Result<()> {
        create_token::handler(ctx, args)
    }

    pub fn transfer_token(ctx: Context<TransferToken>, args: TransferTokenArgs) -> Result<()> {
        transfer_token::handler(ctx, args)
    }

    pub fn buy_lottery_ticket(
        ctx: Context<BuyLotteryTicket>,
        args: BuyLotteryTicketArgs,
    ) -> Result<()> {
        buy_lottery_ticket::handler(ctx, args)
    }

    pub fn get_lottery_game_winner(
        ctx: Context<GetLotteryGameWinner>,
        args: GetLotteryGameWinnerArgs,
    ) -> Result<()> {
        get_lottery_game_winner::handler(ctx, args)
    }

    pub fn withdraw_lottery_game_winnings(
        ctx: Context<WithdrawLotteryGameWinnings>,
        args: WithdrawLotteryGameWinningsArgs,
    ) -> Result<()> {
        withdraw_lottery_game_winnings::handler(ctx, args)
    }

    pub fn sweep_proceeds(ctx: Context<SweepProceeds>) -> Result<()> {
        sweep_proceeds::handler(ctx)
    }
}
