//! Framework-free model behind the task
//! board's card: draft editing, save
//! bookkeeping, due-date proximity and
//! display mappings.

pub mod board;
pub mod card;
pub mod config;
pub mod datetime;
pub mod display;

pub use board::{
  BoardAction,
  BoardState
};
pub use card::{
  Draft,
  SaveOutcome,
  SaveRequest,
  SaveTicket,
  TaskCardState
};
pub use config::BoardConfig;
pub use datetime::{
  DueLabel,
  DueTone
};
