use catalog::EventId;
use foundation::time::CalendarDate;
use serde::{Deserialize, Serialize};

/// User or environment input delivered by the presentation shell.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Intent {
    DatePicked { date: CalendarDate },
    MarkerClicked { event: EventId },
    PreviousIncident,
    NextIncident,
    CloseCard,
    Escape,
    TogglePanel,
    Resized { width: u32, height: u32 },
}

impl Intent {
    pub fn kind(&self) -> &'static str {
        match self {
            Intent::DatePicked { .. } => "date_picked",
            Intent::MarkerClicked { .. } => "marker_clicked",
            Intent::PreviousIncident => "previous_incident",
            Intent::NextIncident => "next_incident",
            Intent::CloseCard => "close_card",
            Intent::Escape => "escape",
            Intent::TogglePanel => "toggle_panel",
            Intent::Resized { .. } => "resized",
        }
    }
}

/// Whether an intent changed the selection.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Changed,
    Unchanged,
}

impl Outcome {
    pub fn from_changed(changed: bool) -> Self {
        if changed {
            Outcome::Changed
        } else {
            Outcome::Unchanged
        }
    }

    pub fn is_changed(self) -> bool {
        self == Outcome::Changed
    }
}

#[cfg(test)]
mod tests {
    use super::Intent;
    use catalog::EventId;
    use foundation::time::CalendarDate;

    #[test]
    fn intents_are_tagged_json() {
        let pick = Intent::DatePicked {
            date: CalendarDate::from_ymd(1919, 6, 28).expect("date"),
        };
        let json = serde_json::to_string(&pick).expect("json");
        assert_eq!(json, r#"{"type":"date_picked","date":"1919-06-28"}"#);

        let click: Intent =
            serde_json::from_str(r#"{"type":"marker_clicked","event":3}"#).expect("intent");
        assert_eq!(click, Intent::MarkerClicked { event: EventId(3) });

        let esc: Intent = serde_json::from_str(r#"{"type":"escape"}"#).expect("intent");
        assert_eq!(esc.kind(), "escape");
    }
}
