use taskboard_shared::{
  TaskRank,
  TaskStatus
};

#[must_use]
pub fn rank_color(rank: &TaskRank) -> &'static str {
  match rank {
    | TaskRank::High => "red",
    | TaskRank::Medium => "orange",
    | TaskRank::Low => "green",
    | TaskRank::Other(_) => "black"
  }
}

/// Option text in the rank picker.
#[must_use]
pub fn rank_label(rank: &TaskRank) -> &str {
  match rank {
    | TaskRank::High => "High",
    | TaskRank::Medium => "Medium",
    | TaskRank::Low => "Low",
    | TaskRank::Other(raw) => raw
  }
}

/// Upper-cased rank shown in read mode.
#[must_use]
pub fn rank_badge(rank: &TaskRank) -> String {
  rank.as_str().to_uppercase()
}

/// Unknown statuses are shown as stored.
#[must_use]
pub fn status_text(
  status: &TaskStatus
) -> &str {
  match status {
    | TaskStatus::Todo => "To Do",
    | TaskStatus::InProgress => {
      "In Progress"
    }
    | TaskStatus::Done => "Done",
    | TaskStatus::Other(raw) => raw
  }
}
