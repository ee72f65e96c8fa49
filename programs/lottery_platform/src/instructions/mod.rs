pub mod buy_lottery_ticket;
pub mod create_token;
pub mod get_lottery_game_winner;
pub mod init_registry;
pub mod register_lottery_game;
pub mod register_participant;
pub mod sweep_proceeds;
pub mod transfer_admin;
pub mod transfer_token;
pub mod withdraw_lottery_game_winnings;

pub use buy_lottery_ticket::*;
pub use create_token::*;
pub use get_lottery_game_winner::*;
pub use init_registry::*;
pub use register_lottery_game::*;
pub use register_participant::*;
pub use sweep_proceeds::*;
pub use transfer_admin::*;
pub use transfer_token::*;
pub use withdraw_lottery_game_winnings::*;
