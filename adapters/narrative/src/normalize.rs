use serde_json::{Map, Value};
use startup_survivor_core::{ChoiceIntent, MonthDraft, OptionDraft, OptionId, Risk, Tag};

use crate::NarrativeError;

/// Longest delay seed phrase kept from narrative output, in characters.
pub const MAX_SEED_PHRASE_CHARS: usize = 60;

const STEP_TRIM: &[char] = &[' ', '-', '•', '\t'];

/// Maps free text onto a [`Tag`], accepting English names and Turkish aliases.
#[must_use]
pub fn normalize_tag(text: &str, default: Tag) -> Tag {
    let lowered = text.trim().to_lowercase();
    if let Some(tag) = Tag::from_name(&lowered) {
        return tag;
    }
    match lowered.as_str() {
        "büyüme" => Tag::Growth,
        "verimlilik" => Tag::Efficiency,
        "güvenilirlik" => Tag::Reliability,
        "uyum" => Tag::Compliance,
        "yatırım" => Tag::Fundraising,
        "insan" => Tag::People,
        "ürün" => Tag::Product,
        "satış" => Tag::Sales,
        "pazarlama" => Tag::Marketing,
        "güvenlik" => Tag::Security,
        _ => default,
    }
}

/// Maps free text onto a [`Risk`]; anything unrecognised is medium.
#[must_use]
pub fn normalize_risk(text: &str) -> Risk {
    let lowered = text.trim().to_lowercase();
    if let Some(risk) = Risk::from_name(&lowered) {
        return risk;
    }
    match lowered.as_str() {
        "düşük" => Risk::Low,
        "yüksek" => Risk::High,
        _ => Risk::Med,
    }
}

/// Turns a string (one step per line, bullets stripped) or an array into steps.
#[must_use]
pub fn normalize_steps(value: &Value) -> Vec<String> {
    match value {
        Value::Null => Vec::new(),
        Value::String(text) => text
            .lines()
            .map(|line| line.trim_matches(STEP_TRIM))
            .filter(|line| !line.is_empty())
            .map(str::to_owned)
            .collect(),
        Value::Array(items) => items
            .iter()
            .map(scalar_text)
            .filter(|item| !item.is_empty())
            .collect(),
        other => {
            let text = scalar_text(other);
            if text.is_empty() {
                Vec::new()
            } else {
                vec![text]
            }
        }
    }
}

/// Parses narrative output for `month_id` into a draft.
///
/// Accepts the list shape (`options`, first three used) and the legacy shape
/// with `A` and `B` objects. Structural checks are left to bundle building.
///
/// # Errors
///
/// Fails when the value is not an object or the list shape has fewer than two
/// usable options.
pub fn draft_from_value(value: &Value, month_id: u32) -> Result<MonthDraft, NarrativeError> {
    let object = value.as_object().ok_or(NarrativeError::NotAnObject)?;
    match object.get("options") {
        Some(Value::Array(raw)) => draft_from_list(object, raw, month_id),
        _ => Ok(draft_from_legacy(object, month_id)),
    }
}

/// Parses the interpretation of a player's own plan.
///
/// # Errors
///
/// Fails when the value is not an object.
pub fn intent_from_value(value: &Value) -> Result<ChoiceIntent, NarrativeError> {
    let object = value.as_object().ok_or(NarrativeError::NotAnObject)?;
    Ok(ChoiceIntent {
        title: text_or(object, &["title"], "Player's plan"),
        tag: normalize_tag(&text(object, &["tag"]), Tag::Product),
        risk: normalize_risk(&text(object, &["risk"])),
        steps: normalize_steps(object.get("steps").unwrap_or(&Value::Null)),
        delayed_seed: seed_phrase(object),
        result: text(object, &["result"]),
    })
}

fn draft_from_list(
    object: &Map<String, Value>,
    raw: &[Value],
    month_id: u32,
) -> Result<MonthDraft, NarrativeError> {
    let options: Vec<OptionDraft> = raw
        .iter()
        .take(OptionId::DRAFT_IDS.len())
        .zip(OptionId::DRAFT_IDS)
        .filter_map(|(entry, default_id)| entry.as_object().map(|obj| parse_option(obj, default_id)))
        .collect();

    if options.len() < 2 {
        return Err(NarrativeError::TooFewOptions {
            found: options.len(),
        });
    }

    Ok(MonthDraft {
        month_id,
        month_title: text_or(object, &["month_title"], &format!("Month {month_id}")),
        situation: text(object, &["situation", "durum_analizi"]),
        crisis_title: text_or(object, &["crisis_title", "kriz_title"], "Crisis"),
        crisis: text(object, &["crisis", "kriz"]),
        options,
        note: text(object, &["note"]),
        cliffhanger: text(object, &["cliffhanger"]),
        lesson: text(object, &["lesson"]),
        alternatives: normalize_steps(object.get("alternatives").unwrap_or(&Value::Null)),
    })
}

fn draft_from_legacy(object: &Map<String, Value>, month_id: u32) -> MonthDraft {
    let empty = Map::new();
    let a = object.get("A").and_then(Value::as_object).unwrap_or(&empty);
    let b = object.get("B").and_then(Value::as_object).unwrap_or(&empty);

    let crisis = text(object, &["crisis", "kriz"]);
    let headline = legacy_crisis_headline(&crisis).unwrap_or_else(|| "Critical Turn".to_owned());

    tracing::debug!(month_id, "legacy A/B draft upgraded");

    MonthDraft {
        month_id,
        month_title: text_or(
            object,
            &["month_title"],
            &format!("Month {month_id}: Decision Month"),
        ),
        situation: text(object, &["situation", "durum_analizi"]),
        crisis_title: text_or(object, &["crisis_title", "kriz_title"], &headline),
        crisis,
        options: vec![parse_option(a, OptionId::A), parse_option(b, OptionId::B)],
        note: text(object, &["note"]),
        cliffhanger: text(object, &["cliffhanger"]),
        lesson: text(object, &["lesson"]),
        alternatives: normalize_steps(object.get("alternatives").unwrap_or(&Value::Null)),
    }
}

/// First line of a crisis written as `CRISIS: headline` (or the Turkish `KRİZ:`).
fn legacy_crisis_headline(crisis: &str) -> Option<String> {
    let first = crisis.lines().next()?;
    ["CRISIS:", "KRİZ:"]
        .iter()
        .find_map(|marker| first.find(marker).map(|at| &first[at + marker.len()..]))
        .map(str::trim)
        .filter(|headline| !headline.is_empty())
        .map(str::to_owned)
}

fn parse_option(object: &Map<String, Value>, default_id: OptionId) -> OptionDraft {
    let id = match OptionId::parse(&text(object, &["id"])) {
        Some(id) if OptionId::DRAFT_IDS.contains(&id) => id,
        _ => default_id,
    };
    OptionDraft {
        id,
        title: text_or(object, &["title", "label"], &format!("Option {id}")),
        tag: normalize_tag(&text(object, &["tag", "focus"]), Tag::Growth),
        risk: normalize_risk(&text(object, &["risk"])),
        steps: normalize_steps(object.get("steps").unwrap_or(&Value::Null)),
        delayed_seed: seed_phrase(object),
        result: text(object, &["result"]),
    }
}

fn seed_phrase(object: &Map<String, Value>) -> String {
    text(object, &["delayed_seed"])
        .chars()
        .take(MAX_SEED_PHRASE_CHARS)
        .collect()
}

/// Trimmed text of the first key holding a non-blank value.
fn text(object: &Map<String, Value>, keys: &[&str]) -> String {
    keys.iter()
        .filter_map(|key| object.get(*key))
        .map(scalar_text)
        .find(|value| !value.is_empty())
        .unwrap_or_default()
}

fn text_or(object: &Map<String, Value>, keys: &[&str], fallback: &str) -> String {
    let value = text(object, keys);
    if value.is_empty() {
        fallback.trim().to_owned()
    } else {
        value
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.trim().to_owned(),
        other => other.to_string(),
    }
}
