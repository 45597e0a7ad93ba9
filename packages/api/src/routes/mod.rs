pub mod challenges;
pub mod health;
pub mod sessions;
