mod board;
mod board_column;
mod delete_modal;
mod task_card;

pub use board::TaskBoard;
pub use board_column::BoardColumn;
pub use delete_modal::DeleteModal;
pub use task_card::TaskCard;
