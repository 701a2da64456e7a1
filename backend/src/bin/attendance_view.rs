//! Render the attendance view of a stored schedule snapshot as JSON.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::env;
use std::io::{self, Read, Write};
use std::path::Path;
use std::sync::Arc;

use cap_std::{ambient_authority, fs::Dir};
use ortho_config::OrthoConfig;
use schedule_backend::config::{AttendanceViewSettings, ParticipantOrder};
use schedule_backend::domain::{CandidateTally, ScheduleViewService};
use schedule_backend::domain::ports::{
    ScheduleSnapshot, ScheduleView, ScheduleViewQuery, ScheduleViewRequest,
};
use schedule_backend::outbound::InMemoryScheduleRepository;
use schedule_backend::telemetry::init_tracing;
use serde::Serialize;
use tokio::runtime::Builder;
use tracing::info;

/// JSON document written to stdout.
#[derive(Debug, Serialize)]
struct RenderedView {
    #[serde(flatten)]
    view: ScheduleView,
    #[serde(skip_serializing_if = "Option::is_none")]
    tally: Option<Vec<CandidateTally>>,
}

fn main() -> io::Result<()> {
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|error| io::Error::other(format!("create Tokio runtime: {error}")))?;
    runtime.block_on(async_main())
}

async fn async_main() -> io::Result<()> {
    let settings =
        AttendanceViewSettings::load_from_iter(env::args_os()).map_err(io::Error::other)?;
    init_tracing(settings.log_format().map_err(invalid_input)?);

    let snapshot = read_snapshot(settings.snapshot_path().map_err(invalid_input)?)?;
    let rendered = render(&settings, snapshot).await?;
    let json = serde_json::to_string_pretty(&rendered)
        .map_err(|error| io::Error::other(format!("serialise view: {error}")))?;
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{json}")
}

fn invalid_input(error: impl std::error::Error + Send + Sync + 'static) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, error)
}

async fn render(
    settings: &AttendanceViewSettings,
    snapshot: ScheduleSnapshot,
) -> io::Result<RenderedView> {
    let viewer = settings.viewer().map_err(invalid_input)?;
    let order = settings.participant_order().map_err(invalid_input)?;
    let schedule_id = settings
        .schedule_id()
        .map_err(invalid_input)?
        .unwrap_or(snapshot.schedule.id);

    let repo = Arc::new(InMemoryScheduleRepository::new());
    repo.insert_snapshot(snapshot)
        .map_err(|error| io::Error::other(format!("seed repository: {error}")))?;
    let query = ScheduleViewService::new(repo);

    let mut view = query
        .view_schedule(ScheduleViewRequest {
            schedule_id,
            viewer,
        })
        .await
        .map_err(|error| io::Error::other(format!("view schedule: {error}")))?;
    if order == ParticipantOrder::DisplayName {
        view.attendance.sort_participants_by_display_name();
    }
    let viewer_key = view
        .attendance
        .viewer()
        .map_or_else(String::new, |entry| entry.participant.key().to_string());
    info!(
        %schedule_id,
        viewer = %viewer_key,
        participants = view.attendance.participants().len(),
        candidates = view.candidates.len(),
        %order,
        "attendance view rendered"
    );
    let tally = settings.include_tally.then(|| view.attendance.tally());
    Ok(RenderedView { view, tally })
}

fn read_snapshot(path: &Path) -> io::Result<ScheduleSnapshot> {
    let parent = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidInput, "snapshot path must be a file")
        })?;
    let directory = Dir::open_ambient_dir(parent, ambient_authority()).map_err(|error| {
        io::Error::other(format!(
            "open snapshot directory '{}': {error}",
            parent.display()
        ))
    })?;
    let mut file = directory.open(Path::new(file_name)).map_err(|error| {
        io::Error::other(format!("open snapshot '{}': {error}", path.display()))
    })?;
    let mut raw = String::new();
    file.read_to_string(&mut raw).map_err(|error| {
        io::Error::other(format!("read snapshot '{}': {error}", path.display()))
    })?;
    serde_json::from_str(&raw).map_err(|error| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("parse snapshot '{}': {error}", path.display()),
        )
    })
}
