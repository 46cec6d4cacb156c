// Rules engine + profile-driven alpha-beta bot
pub mod board;
pub mod search;
pub mod selfplay;
