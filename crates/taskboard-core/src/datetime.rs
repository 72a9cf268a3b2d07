use chrono::{
  DateTime,
  Local,
  NaiveDate,
  Utc
};
use chrono_tz::Tz;
use taskboard_shared::TaskStatus;

/// Labels are only produced up to this
/// many days ahead.
const PROXIMITY_WINDOW_DAYS: i64 = 3;

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum DueTone {
  Warning,
  Error
}

impl DueTone {
  pub fn css_class(self) -> &'static str {
    match self {
      | DueTone::Warning => "chip warning",
      | DueTone::Error => "chip error"
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DueLabel {
  pub text: String,
  pub tone: DueTone
}

/// Today's calendar date in `zone`, or in
/// the host's local zone when none is
/// configured.
#[must_use]
pub fn today(zone: Option<Tz>) -> NaiveDate {
  match zone {
    | Some(tz) => {
      to_zone_date(Utc::now(), tz)
    }
    | None => Local::now().date_naive()
  }
}

#[must_use]
pub fn to_zone_date(
  dt: DateTime<Utc>,
  tz: Tz
) -> NaiveDate {
  dt.with_timezone(&tz).date_naive()
}

pub(crate) fn parse_timezone(
  raw: &str,
  source: &str
) -> Option<Tz> {
  let trimmed = raw.trim();
  if trimmed.is_empty() {
    tracing::warn!(
      source,
      "timezone source was empty"
    );
    return None;
  }

  match trimmed.parse::<Tz>() {
    | Ok(tz) => {
      tracing::info!(
        source,
        timezone = %trimmed,
        "configured board timezone"
      );
      Some(tz)
    }
    | Err(err) => {
      tracing::error!(
        source,
        timezone = %trimmed,
        error = %err,
        "failed to parse timezone id"
      );
      None
    }
  }
}

/// Reads the date part of a due date.
/// Full timestamps are truncated to their
/// leading `YYYY-MM-DD`.
#[must_use]
pub fn parse_due_date(
  raw: &str
) -> Option<NaiveDate> {
  let trimmed = raw.trim();
  NaiveDate::parse_from_str(
    trimmed, "%Y-%m-%d"
  )
  .ok()
  .or_else(|| {
    trimmed.get(..10).and_then(|head| {
      NaiveDate::parse_from_str(
        head, "%Y-%m-%d"
      )
      .ok()
    })
  })
}

/// `"07 October"` for read mode. Values
/// that are not dates are shown as given.
#[must_use]
pub fn format_due_date(raw: &str) -> String {
  match parse_due_date(raw) {
    | Some(date) => {
      date.format("%d %B").to_string()
    }
    | None => raw.to_string()
  }
}

#[must_use]
pub fn days_until(
  due: NaiveDate,
  today: NaiveDate
) -> i64 {
  (due - today).num_days()
}

/// Proximity text for a signed day
/// difference, `None` past the window.
#[must_use]
pub fn proximity_message(
  days: i64
) -> Option<String> {
  match days {
    | d if d < 0 => {
      Some(format!("Past {} day(s)", d.abs()))
    }
    | 0 => Some("Today".to_string()),
    | 1 => Some("Tomorrow".to_string()),
    | d if d <= PROXIMITY_WINDOW_DAYS => {
      Some(format!("Last {d} day(s)"))
    }
    | _ => None
  }
}

#[must_use]
pub fn tone_for(text: &str) -> DueTone {
  if text.contains("Past") {
    DueTone::Error
  } else {
    DueTone::Warning
  }
}

/// The chip shown next to the due date.
/// Finished tasks never get one.
#[must_use]
pub fn due_label(
  raw_due: &str,
  status: &TaskStatus,
  today: NaiveDate
) -> Option<DueLabel> {
  if *status == TaskStatus::Done {
    return None;
  }
  let due = parse_due_date(raw_due)?;
  let text = proximity_message(
    days_until(due, today)
  )?;
  let tone = tone_for(&text);
  Some(DueLabel {
    text,
    tone
  })
}

#[cfg(test)]
mod tests {
  use chrono::{
    Duration,
    TimeZone,
    Utc
  };

  use super::*;

  fn day(
    y: i32,
    m: u32,
    d: u32
  ) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d)
      .expect("valid date")
  }

  #[test]
  fn proximity_table() {
    assert_eq!(
      proximity_message(-5).as_deref(),
      Some("Past 5 day(s)")
    );
    assert_eq!(
      proximity_message(-1).as_deref(),
      Some("Past 1 day(s)")
    );
    assert_eq!(
      proximity_message(0).as_deref(),
      Some("Today")
    );
    assert_eq!(
      proximity_message(1).as_deref(),
      Some("Tomorrow")
    );
    assert_eq!(
      proximity_message(2).as_deref(),
      Some("Last 2 day(s)")
    );
    assert_eq!(
      proximity_message(3).as_deref(),
      Some("Last 3 day(s)")
    );
    assert_eq!(proximity_message(4), None);
    assert_eq!(proximity_message(400), None);
  }

  #[test]
  fn tomorrow_is_a_warning() {
    let today = day(2026, 10, 16);
    let label = due_label(
      "2026-10-17",
      &TaskStatus::Todo,
      today
    )
    .expect("label");
    assert_eq!(label.text, "Tomorrow");
    assert_eq!(label.tone, DueTone::Warning);
  }

  #[test]
  fn overdue_is_an_error() {
    let today = day(2026, 10, 16);
    let label = due_label(
      "2026-10-11",
      &TaskStatus::InProgress,
      today
    )
    .expect("label");
    assert_eq!(label.text, "Past 5 day(s)");
    assert_eq!(label.tone, DueTone::Error);
  }

  #[test]
  fn done_tasks_have_no_label() {
    let today = day(2026, 10, 16);
    let due = today - Duration::days(5);
    assert_eq!(
      due_label(
        &due.format("%Y-%m-%d").to_string(),
        &TaskStatus::Done,
        today
      ),
      None
    );
  }

  #[test]
  fn unknown_status_still_gets_a_label() {
    let today = day(2026, 10, 16);
    assert!(
      due_label(
        "2026-10-16",
        &TaskStatus::from("blocked"),
        today
      )
      .is_some()
    );
  }

  #[test]
  fn unparsable_due_date_has_no_label() {
    let today = day(2026, 10, 16);
    assert_eq!(
      due_label("", &TaskStatus::Todo, today),
      None
    );
    assert_eq!(
      due_label(
        "next week",
        &TaskStatus::Todo,
        today
      ),
      None
    );
  }

  #[test]
  fn difference_crosses_month_and_year() {
    assert_eq!(
      days_until(
        day(2027, 1, 2),
        day(2026, 12, 30)
      ),
      3
    );
  }

  #[test]
  fn timestamps_are_truncated_to_the_day() {
    assert_eq!(
      parse_due_date(
        "2026-03-04T23:59:00.000Z"
      ),
      Some(day(2026, 3, 4))
    );
  }

  #[test]
  fn formats_day_and_full_month() {
    assert_eq!(
      format_due_date("2026-10-07"),
      "07 October"
    );
    assert_eq!(
      format_due_date("soon"),
      "soon"
    );
  }

  #[test]
  fn zone_date_follows_the_offset() {
    let late_utc = Utc
      .with_ymd_and_hms(
        2026, 2, 17, 3, 0, 0
      )
      .single()
      .expect("valid now");
    assert_eq!(
      to_zone_date(
        late_utc,
        chrono_tz::America::Mexico_City
      ),
      day(2026, 2, 16)
    );
  }

  #[test]
  fn rejects_unknown_timezone() {
    assert!(
      parse_timezone("Mars/Olympus", "test")
        .is_none()
    );
    assert!(
      parse_timezone(" Europe/Paris ", "test")
        .is_some()
    );
  }
}
