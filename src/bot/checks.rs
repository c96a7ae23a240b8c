//! Permission checks run by poise before a command body.
//!
//! A denied check returns `Err(Forbidden)`, which the framework's error handler turns
//! into a reply naming the caller and their role.

use crate::{
    auth::{ADMIN_ONLY, ANY_ROLE, AUCTION_STAFF, Principal, Role},
    bot::BotData,
    errors::{Error, Result},
};

fn authorize(ctx: &poise::Context<'_, BotData, Error>, allowed: &[Role]) -> Result<Principal> {
    ctx.data()
        .staff
        .authorize(&ctx.author().id.to_string(), &ctx.author().name, allowed)
}

/// Tournament, team and roster administration.
pub async fn is_admin(ctx: poise::Context<'_, BotData, Error>) -> Result<bool> {
    authorize(&ctx, ADMIN_ONLY).map(|_| true)
}

/// Running the auction.
pub async fn is_auction_staff(ctx: poise::Context<'_, BotData, Error>) -> Result<bool> {
    authorize(&ctx, AUCTION_STAFF).map(|_| true)
}

/// Read-only views.
pub async fn is_known_user(ctx: poise::Context<'_, BotData, Error>) -> Result<bool> {
    authorize(&ctx, ANY_ROLE).map(|_| true)
}

/// The principal behind the current command, for auditing.
///
/// Only call this from commands guarded by one of the checks above.
pub fn actor(ctx: &poise::Context<'_, BotData, Error>) -> Result<Principal> {
    ctx.data()
        .staff
        .resolve(&ctx.author().id.to_string(), &ctx.author().name)
        .ok_or_else(|| Error::Forbidden {
            username: ctx.author().name.clone(),
            role: "unknown".to_string(),
        })
}
