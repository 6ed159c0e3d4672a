use anchor_lang::prelude::*;
use instructions::*;

pub mod constants;
pub mod error;
pub mod instructions;
pub mod ledger;
pub mod settlement;
pub mod state;
pub mod utils;

declare_id!("5K41WbZAU8pYCxNib3SL4Ukk88kMrXrjbb7eNYDufrsA");

#[program]
pub mod powerball_lottery {
    use super::*;

    pub fn initialize(
        ctx: Context<Initialize>,
        management_fee_percentage: u8,
        next_pool_prize_percentage: u8,
        min_time_between_participation: i64,
    ) -> Result<()> {
        instructions::initialize::initialize(
            ctx,
            management_fee_percentage,
            next_pool_prize_percentage,
            min_time_between_participation,
        )
    }

    pub fn update_settings(
        ctx: Context<UpdateSettings>,
        management_fee_percentage: u8,
        next_pool_prize_percentage: u8,
        min_time_between_participation: i64,
    ) -> Result<()> {
        instructions::update_settings::update_settings(
            ctx,
            management_fee_percentage,
            next_pool_prize_percentage,
            min_time_between_participation,
        )
    }

    pub fn transfer_operator(ctx: Context<TransferOperator>, new_operator: Pubkey) -> Result<()> {
        instructions::transfer_operator::transfer_operator(ctx, new_operator)
    }

    pub fn add_package(ctx: Context<AddPackage>, combinations: u32, price: u64) -> Result<()> {
        instructions::add_package::add_package(ctx, combinations, price)
    }

    pub fn update_package(
        ctx: Context<UpdatePackage>,
        package_id: u64,
        combinations: u32,
        price: u64,
    ) -> Result<()> {
        instructions::update_package::update_package(ctx, package_id, combinations, price)
    }

    pub fn remove_package(ctx: Context<RemovePackage>, package_id: u64) -> Result<()> {
        instructions::remove_package::remove_package(ctx, package_id)
    }

    pub fn register_participant(ctx: Context<RegisterParticipant>) -> Result<()> {
        instructions::register_participant::register_participant(ctx)
    }

    pub fn participate(
        ctx: Context<Participate>,
        package_id: u64,
        main_numbers_list: Vec<Vec<u32>>,
        powerball_numbers: Vec<u32>,
    ) -> Result<()> {
        instructions::participate::participate(
            ctx,
            package_id,
            main_numbers_list,
            powerball_numbers,
        )
    }

    pub fn select_winner(
        ctx: Context<SelectWinner>,
        winning_numbers: Vec<u32>,
        powerball_number: u32,
    ) -> Result<()> {
        instructions::select_winner::select_winner(ctx, winning_numbers, powerball_number)
    }

    pub fn tally_batch(ctx: Context<TallyBatch>) -> Result<()> {
        instructions::tally_batch::tally_batch(ctx)
    }

    pub fn pay_batch<'info>(ctx: Context<'_, '_, 'info, 'info, PayBatch<'info>>) -> Result<()> {
        instructions::pay_batch::pay_batch(ctx)
    }

    pub fn cancel_draw(ctx: Context<CancelDraw>) -> Result<()> {
        instructions::cancel_draw::cancel_draw(ctx)
    }
}
