//! One pure builder per column type.
//!
//! Each builder reads the fields relevant to its type and returns the JSON
//! shape monday.com expects, or `None` when there is nothing to set.

use std::str::FromStr;
use std::sync::LazyLock;

use jiff::civil::Date;
use regex::Regex;
use serde_json::{Map, Value, json};

use super::{FileLink, UserColumnInput};
use crate::{Error, Result};

/// `HH:MM` with optional `:SS`; anything after (fractions, zone) is ignored.
static TIME_OF_DAY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,2}):(\d{2})(?::(\d{2}))?").expect("time-of-day pattern is valid")
});

/// Returns the trimmed string when it is not blank.
fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn or_empty(value: Option<&String>) -> String {
    value.cloned().unwrap_or_default()
}

/// Returns the part of an ISO-like timestamp before the `T`.
fn date_part(value: &str) -> &str {
    value.split_once('T').map_or(value, |(date, _)| date)
}

pub(super) fn passthrough(input: &UserColumnInput) -> Result<Option<Value>> {
    Ok(input.column_value.clone().filter(|v| !v.is_null()))
}

pub(super) fn object_value(input: &UserColumnInput) -> Result<Option<Value>> {
    let Some(text) = non_blank(input.object_value.as_deref()) else {
        return Ok(None);
    };

    let value = serde_json::from_str(text).map_err(|err| {
        Error::invalid_input()
            .with_message(format!(
                "column '{}' expects a JSON object value",
                input.column_id
            ))
            .with_context(text.to_owned())
            .with_source(err)
    })?;

    Ok(Some(value))
}

pub(super) fn item_ids(input: &UserColumnInput) -> Result<Option<Value>> {
    Ok(input
        .board_relation_value
        .as_ref()
        .map(|list| json!({ "item_ids": list.ids() })))
}

pub(super) fn people(input: &UserColumnInput) -> Result<Option<Value>> {
    if input.people_value.is_none() && input.teams_value.is_none() {
        return Ok(None);
    }

    let mut persons_and_teams = Vec::new();
    let lists = [
        ("person", input.people_value.as_ref()),
        ("team", input.teams_value.as_ref()),
    ];

    for (kind, list) in lists {
        for id in list.map(|l| l.ids()).unwrap_or_default() {
            let id: i64 = id.parse().map_err(|_| {
                Error::invalid_input().with_message(format!(
                    "column '{}' has a non-numeric {kind} id '{id}'",
                    input.column_id
                ))
            })?;
            persons_and_teams.push(json!({ "id": id, "kind": kind }));
        }
    }

    Ok(Some(json!({ "personsAndTeams": persons_and_teams })))
}

pub(super) fn timeline(input: &UserColumnInput) -> Result<Option<Value>> {
    let from = input.timeline_from.as_deref().map(date_part).unwrap_or("");
    let to = input.timeline_to.as_deref().map(date_part).unwrap_or("");

    Ok(Some(json!({ "from": from, "to": to })))
}

pub(super) fn checkbox(input: &UserColumnInput) -> Result<Option<Value>> {
    Ok(Some(json!({ "checked": input.checkbox_value.unwrap_or(false) })))
}

pub(super) fn hour(input: &UserColumnInput) -> Result<Option<Value>> {
    let Some(text) = non_blank(input.hour_value.as_deref()) else {
        return Ok(None);
    };

    let (hour, minute) = text.split_once(':').unwrap_or((text, "00"));
    let parse = |part: &str, max: u32| {
        part.trim()
            .parse::<u32>()
            .ok()
            .filter(|value| *value <= max)
            .ok_or_else(|| {
                Error::invalid_input().with_message(format!(
                    "column '{}' expects an HH:MM hour, got '{text}'",
                    input.column_id
                ))
            })
    };

    Ok(Some(json!({ "hour": parse(hour, 23)?, "minute": parse(minute, 59)? })))
}

pub(super) fn status(input: &UserColumnInput) -> Result<Option<Value>> {
    Ok(non_blank(input.status_label.as_deref()).map(|label| json!({ "label": label })))
}

pub(super) fn location(input: &UserColumnInput) -> Result<Option<Value>> {
    Ok(Some(json!({
        "lat": or_empty(input.latitude.as_ref()),
        "lng": or_empty(input.longitude.as_ref()),
        "address": or_empty(input.address.as_ref()),
    })))
}

pub(super) fn dropdown(input: &UserColumnInput) -> Result<Option<Value>> {
    let labels: Vec<&str> = input
        .dropdown_value
        .as_deref()
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .collect();

    if labels.is_empty() {
        return Ok(None);
    }

    Ok(Some(json!({ "labels": labels })))
}

pub(super) fn date(input: &UserColumnInput) -> Result<Option<Value>> {
    let Some(text) = non_blank(input.date_value.as_deref()) else {
        return Ok(None);
    };

    // The date segment is taken as written so the user's local date never shifts.
    let (date, rest) = text
        .split_once(['T', ' '])
        .map_or((text, ""), |(date, rest)| (date, rest));

    Date::from_str(date).map_err(|err| {
        Error::invalid_input()
            .with_message(format!(
                "column '{}' expects a date, got '{text}'",
                input.column_id
            ))
            .with_source(err)
    })?;

    let mut value = Map::new();
    value.insert("date".to_owned(), json!(date));

    if let Some(caps) = TIME_OF_DAY.captures(rest.trim_start()) {
        let seconds = caps.get(3).map_or("00", |m| m.as_str());
        let time = format!("{:0>2}:{}:{seconds}", &caps[1], &caps[2]);
        value.insert("time".to_owned(), json!(time));
    }

    Ok(Some(Value::Object(value)))
}

pub(super) fn email(input: &UserColumnInput) -> Result<Option<Value>> {
    Ok(Some(json!({
        "text": or_empty(input.email_text.as_ref()),
        "email": or_empty(input.email_value.as_ref()),
    })))
}

pub(super) fn link(input: &UserColumnInput) -> Result<Option<Value>> {
    Ok(Some(json!({
        "text": or_empty(input.link_text.as_ref()),
        "url": or_empty(input.link_url.as_ref()),
    })))
}

pub(super) fn phone(input: &UserColumnInput) -> Result<Option<Value>> {
    let Some(number) = non_blank(input.phone_value.as_deref()) else {
        return Ok(None);
    };

    let mut country = input
        .country_code
        .as_deref()
        .unwrap_or_default()
        .split_whitespace();
    let dial_code = country.next().unwrap_or_default();
    let short_name = country.next().unwrap_or_default();

    let combined = format!("{dial_code}{number}");
    let digits: String = combined.chars().filter(char::is_ascii_digit).collect();
    let phone = if combined.starts_with('+') {
        format!("+{digits}")
    } else {
        digits
    };

    Ok(Some(json!({ "phone": phone, "countryShortName": short_name })))
}

pub(super) fn file(input: &UserColumnInput) -> Result<Option<Value>> {
    let links = if input.file_links.is_empty() {
        match &input.column_value {
            Some(Value::String(joined)) => split_file_links(joined),
            _ => Vec::new(),
        }
    } else {
        input.file_links.clone()
    };

    if links.is_empty() {
        return Ok(None);
    }

    let files: Vec<Value> = links
        .into_iter()
        .map(|link| {
            json!({
                "fileType": "LINK",
                "linkToFile": link.link_to_file,
                "name": link.name,
            })
        })
        .collect();

    Ok(Some(json!({ "files": files })))
}

/// Parses `"<url> <name>, <url> <name>"`; a missing name falls back to the url.
fn split_file_links(joined: &str) -> Vec<FileLink> {
    joined
        .split(',')
        .map(str::trim)
        .filter(|chunk| !chunk.is_empty())
        .map(|chunk| {
            let (link, name) = chunk
                .split_once(char::is_whitespace)
                .map_or((chunk, ""), |(link, name)| (link, name.trim()));
            let name = if name.is_empty() { link } else { name };
            FileLink {
                link_to_file: link.to_owned(),
                name: name.to_owned(),
            }
        })
        .collect()
}
