use juggle_core::model::{
    JugglingProp, MAX_SESSION_MINUTES, Module, ModuleId, PracticeMetrics, PracticeSession,
    PracticeSessionDraft,
};
use services::PracticeStats;

use crate::vm::time_fmt::{format_date, format_streak};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionRowVm {
    pub id: String,
    pub date_label: String,
    pub module_name: String,
    pub duration_label: String,
    pub rating_label: String,
    pub prop_label: Option<&'static str>,
    pub streak_label: Option<String>,
    pub notes: String,
}

/// Rows newest first; module names come from `modules`.
#[must_use]
pub fn map_session_rows(sessions: &[PracticeSession], modules: &[Module]) -> Vec<SessionRowVm> {
    let mut sorted: Vec<&PracticeSession> = sessions.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted
        .into_iter()
        .map(|session| {
            let module = modules.iter().find(|m| m.id() == &session.module_id);
            session_row(session, module)
        })
        .collect()
}

fn session_row(session: &PracticeSession, module: Option<&Module>) -> SessionRowVm {
    SessionRowVm {
        id: session.id.as_str().to_string(),
        date_label: format_date(session.date),
        module_name: module.map_or_else(
            || session.module_id.as_str().to_string(),
            |m| m.name().to_string(),
        ),
        duration_label: format!("{} min", session.duration_minutes),
        rating_label: stars(session.rating.value()),
        prop_label: session.prop.map(JugglingProp::label),
        streak_label: session
            .metrics
            .longest_streak_secs
            .map(|secs| format!("Longest streak {}", format_streak(secs))),
        notes: session.notes.clone(),
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionDetailVm {
    pub row: SessionRowVm,
    pub module_id: String,
    /// Only the metrics that were recorded, as label/value pairs.
    pub metrics: Vec<(&'static str, String)>,
}

#[must_use]
pub fn map_session_detail(session: &PracticeSession, module: Option<&Module>) -> SessionDetailVm {
    let m = &session.metrics;
    let metrics = [
        ("Catches", m.catches.map(|v| v.to_string())),
        ("Drops", m.drops.map(|v| v.to_string())),
        ("Longest streak", m.longest_streak_secs.map(format_streak)),
        ("Consistency", m.consistency.map(|c| format!("{:.0}%", c * 100.0))),
    ]
    .into_iter()
    .filter_map(|(label, value)| value.map(|value| (label, value)))
    .collect();

    SessionDetailVm {
        row: session_row(session, module),
        module_id: session.module_id.as_str().to_string(),
        metrics,
    }
}

#[must_use]
pub fn stars(rating: u8) -> String {
    let filled = usize::from(rating.min(5));
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PracticeStatsVm {
    pub sessions_label: String,
    pub total_minutes_label: String,
    pub average_label: String,
    pub streak_label: String,
    pub catches_label: String,
    pub rating_label: String,
}

impl From<&PracticeStats> for PracticeStatsVm {
    fn from(stats: &PracticeStats) -> Self {
        Self {
            sessions_label: stats.session_count.to_string(),
            total_minutes_label: format!("{} min", stats.total_minutes),
            average_label: format!("{} min", stats.average_minutes),
            streak_label: stats
                .longest_streak_secs
                .map_or_else(|| "-".to_string(), format_streak),
            catches_label: stats.total_catches.to_string(),
            rating_label: stats
                .average_rating
                .map_or_else(|| "-".to_string(), |r| format!("{r:.1} / 5")),
        }
    }
}

/// Raw field values of the record-session form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PracticeForm {
    pub module_id: String,
    pub duration: String,
    pub rating: String,
    pub prop: String,
    pub notes: String,
    pub catches: String,
    pub drops: String,
    pub longest_streak: String,
}

impl PracticeForm {
    #[must_use]
    pub fn for_module(module_id: &str) -> Self {
        Self {
            module_id: module_id.to_string(),
            duration: "15".into(),
            rating: "3".into(),
            prop: String::new(),
            notes: String::new(),
            catches: String::new(),
            drops: String::new(),
            longest_streak: String::new(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PracticeFormErrors {
    pub module: Option<&'static str>,
    pub duration: Option<&'static str>,
    pub rating: Option<&'static str>,
    pub metrics: Option<&'static str>,
}

impl PracticeFormErrors {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Parse the form into a draft. Empty metric fields are left unset.
///
/// # Errors
///
/// Returns the per-field messages when any field is invalid.
pub fn validate_practice_form(form: &PracticeForm) -> Result<PracticeSessionDraft, PracticeFormErrors> {
    let mut errors = PracticeFormErrors::default();

    if form.module_id.trim().is_empty() {
        errors.module = Some("Choose a module.");
    }
    let duration = match form.duration.trim().parse::<u32>() {
        Ok(minutes) if minutes > MAX_SESSION_MINUTES => {
            errors.duration = Some("A session can last at most 24 hours.");
            0
        }
        Ok(minutes) if minutes > 0 => minutes,
        _ => {
            errors.duration = Some("Duration must be a whole number of minutes.");
            0
        }
    };
    let rating = match form.rating.trim().parse::<u8>() {
        Ok(rating) if (1..=5).contains(&rating) => rating,
        _ => {
            errors.rating = Some("Rating must be between 1 and 5.");
            0
        }
    };

    let metrics = match (
        parse_optional(&form.catches),
        parse_optional(&form.drops),
        parse_optional(&form.longest_streak),
    ) {
        (Ok(catches), Ok(drops), Ok(longest_streak_secs)) => PracticeMetrics {
            drops,
            longest_streak_secs,
            catches,
            consistency: None,
        },
        _ => {
            errors.metrics = Some("Metrics must be whole numbers.");
            PracticeMetrics::default()
        }
    };

    if !errors.is_empty() {
        return Err(errors);
    }

    let mut draft = PracticeSessionDraft::new(ModuleId::new(form.module_id.trim()), duration, rating)
        .with_notes(form.notes.clone())
        .with_metrics(metrics);
    if let Ok(prop) = form.prop.parse::<JugglingProp>() {
        draft = draft.with_prop(prop);
    }
    Ok(draft)
}

fn parse_optional(raw: &str) -> Result<Option<u32>, std::num::ParseIntError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        Ok(None)
    } else {
        trimmed.parse().map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use juggle_core::model::SessionId;
    use juggle_core::time::fixed_now;

    #[test]
    fn valid_form_builds_draft() {
        let form = PracticeForm {
            prop: "rings".into(),
            notes: "flat spins".into(),
            catches: "40".into(),
            longest_streak: "30".into(),
            ..PracticeForm::for_module("module-2")
        };
        let draft = validate_practice_form(&form).unwrap();
        assert_eq!(draft.module_id.as_str(), "module-2");
        assert_eq!(draft.duration_minutes, 15);
        assert_eq!(draft.rating, 3);
        assert_eq!(draft.prop, Some(JugglingProp::Rings));
        assert_eq!(draft.metrics.catches, Some(40));
        assert_eq!(draft.metrics.drops, None);
        assert_eq!(draft.metrics.longest_streak_secs, Some(30));
    }

    #[test]
    fn invalid_fields_are_reported_together() {
        let form = PracticeForm {
            duration: "0".into(),
            rating: "6".into(),
            drops: "many".into(),
            ..PracticeForm::for_module("")
        };
        let errors = validate_practice_form(&form).unwrap_err();
        assert!(errors.module.is_some());
        assert!(errors.duration.is_some());
        assert!(errors.rating.is_some());
        assert!(errors.metrics.is_some());
    }

    #[test]
    fn overlong_duration_is_rejected() {
        let form = PracticeForm {
            duration: "3000000000".into(),
            ..PracticeForm::for_module("module-2")
        };
        let errors = validate_practice_form(&form).unwrap_err();
        assert_eq!(errors.duration, Some("A session can last at most 24 hours."));
    }

    #[test]
    fn session_detail_lists_recorded_metrics_only() {
        let session = PracticeSessionDraft::new(ModuleId::new("module-9"), 25, 4)
            .with_metrics(PracticeMetrics {
                catches: Some(120),
                longest_streak_secs: Some(75),
                ..PracticeMetrics::default()
            })
            .validate(SessionId::new("session-7"), fixed_now())
            .unwrap();
        let vm = map_session_detail(&session, None);
        assert_eq!(vm.row.module_name, "module-9");
        assert_eq!(vm.row.duration_label, "25 min");
        assert_eq!(
            vm.metrics,
            vec![("Catches", "120".to_string()), ("Longest streak", "1m 15s".to_string())]
        );
    }

    #[test]
    fn stars_render_out_of_five() {
        assert_eq!(stars(4), "★★★★☆");
        assert_eq!(stars(1), "★☆☆☆☆");
    }

    #[test]
    fn stats_without_sessions_show_dashes() {
        let vm = PracticeStatsVm::from(&PracticeStats::default());
        assert_eq!(vm.sessions_label, "0");
        assert_eq!(vm.streak_label, "-");
        assert_eq!(vm.rating_label, "-");
    }
}
