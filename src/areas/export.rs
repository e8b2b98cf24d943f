use crate::artifacts::history::History;
use crate::artifacts::history::revision::{Action, Kind, Revision, Update};
use crate::artifacts::history::revision_path::RevisionPath;
use anyhow::Context;
use chrono::{DateTime, Utc};
use derive_new::new;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::io::BufRead;
use std::path::Path;

/// The log export file produced by `svn log --xml --verbose`.
#[derive(Debug, Clone, new)]
pub struct LogExport {
    path: Box<Path>,
}

impl LogExport {
    /// Parses the export into a [`History`]. Any structural violation
    /// (missing required fields, unparseable numbers, dates, kinds or
    /// actions, duplicate revision numbers) is fatal.
    pub fn load(&self) -> anyhow::Result<History> {
        let file = std::fs::File::open(&self.path)
            .with_context(|| format!("failed to open the log export {}", self.path.display()))?;
        let revisions = parse_log(std::io::BufReader::new(file))
            .with_context(|| format!("failed to parse the log export {}", self.path.display()))?;

        History::new(revisions)
    }
}

struct PendingRevision {
    number: u64,
    author: Option<String>,
    date: Option<DateTime<Utc>>,
    message: Option<String>,
    updates: Vec<Update>,
}

struct PendingUpdate {
    kind: Kind,
    action: Action,
    copy_path: Option<String>,
    copy_revision: Option<u64>,
    text_modified: bool,
}

/// Parses the `<log><logentry .../></log>` structure into revisions, in
/// document order.
pub fn parse_log(input: impl BufRead) -> anyhow::Result<Vec<Revision>> {
    let mut reader = Reader::from_reader(input);
    reader.config_mut().trim_text(true);

    let mut revisions = Vec::new();
    let mut entry: Option<PendingRevision> = None;
    let mut update: Option<PendingUpdate> = None;
    let mut text = String::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(element) => match element.name().as_ref() {
                b"logentry" => {
                    let raw = required_attribute(&element, "revision")?;
                    let number = raw
                        .parse::<u64>()
                        .with_context(|| format!("unparseable revision number '{raw}'"))?;
                    entry = Some(PendingRevision {
                        number,
                        author: None,
                        date: None,
                        message: None,
                        updates: Vec::new(),
                    });
                }
                b"path" => {
                    update = Some(parse_update_attributes(&element)?);
                    text.clear();
                }
                b"author" | b"date" | b"msg" => text.clear(),
                _ => {}
            },
            Event::Text(element) => text.push_str(&element.unescape()?),
            Event::CData(element) => text.push_str(std::str::from_utf8(&element.into_inner())?),
            Event::End(element) => match element.name().as_ref() {
                b"logentry" => {
                    let pending = entry
                        .take()
                        .context("mismatched </logentry> in the log export")?;
                    let date = pending
                        .date
                        .with_context(|| format!("revision {} has no date", pending.number))?;
                    revisions.push(Revision::new(
                        pending.number,
                        pending.author,
                        date,
                        pending.message,
                        pending.updates,
                    ));
                }
                b"path" => {
                    let pending = update.take().context("mismatched </path> in the log export")?;
                    let revision = entry
                        .as_mut()
                        .context("<path> outside of a <logentry> in the log export")?;
                    // both halves of the copy address or none at all
                    let copy_source = match (pending.copy_path, pending.copy_revision) {
                        (Some(path), Some(number)) => Some(RevisionPath::new(path, number)),
                        _ => None,
                    };
                    revision.updates.push(Update::new(
                        pending.kind,
                        pending.action,
                        std::mem::take(&mut text),
                        copy_source,
                        pending.text_modified,
                    ));
                }
                b"author" => {
                    if let Some(revision) = entry.as_mut() {
                        revision.author = Some(std::mem::take(&mut text));
                    }
                }
                b"date" => {
                    if let Some(revision) = entry.as_mut() {
                        let raw = std::mem::take(&mut text);
                        let date = DateTime::parse_from_rfc3339(&raw).with_context(|| {
                            format!("unparseable date '{raw}' on revision {}", revision.number)
                        })?;
                        revision.date = Some(date.with_timezone(&Utc));
                    }
                }
                b"msg" => {
                    if let Some(revision) = entry.as_mut() {
                        let message = std::mem::take(&mut text);
                        if !message.is_empty() {
                            revision.message = Some(message);
                        }
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }

        buf.clear();
    }

    Ok(revisions)
}

fn parse_update_attributes(element: &BytesStart<'_>) -> anyhow::Result<PendingUpdate> {
    let kind = Kind::try_from(required_attribute(element, "kind")?.as_str())?;
    let action = Action::try_from(required_attribute(element, "action")?.as_str())?;
    let copy_path = optional_attribute(element, "copyfrom-path")?;
    let copy_revision = match optional_attribute(element, "copyfrom-rev")? {
        Some(raw) => Some(
            raw.parse::<u64>()
                .with_context(|| format!("unparseable copyfrom-rev '{raw}'"))?,
        ),
        None => None,
    };
    let text_modified =
        optional_attribute(element, "text-mods")?.is_some_and(|value| value == "true");

    Ok(PendingUpdate {
        kind,
        action,
        copy_path,
        copy_revision,
        text_modified,
    })
}

fn required_attribute(element: &BytesStart<'_>, name: &str) -> anyhow::Result<String> {
    optional_attribute(element, name)?.with_context(|| {
        format!(
            "<{}> has no '{}' attribute",
            String::from_utf8_lossy(element.name().as_ref()),
            name
        )
    })
}

fn optional_attribute(element: &BytesStart<'_>, name: &str) -> anyhow::Result<Option<String>> {
    Ok(element
        .try_get_attribute(name)?
        .map(|attribute| attribute.unescape_value())
        .transpose()?
        .map(|value| value.into_owned()))
}
