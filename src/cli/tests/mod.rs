//! Unit tests for CLI module
//!
//! Tests argument parsing, command output and the terminal surface.
//! No stdin or config files involved.

use std::{
    io::{self, Write},
    sync::{Arc, Mutex},
};

use chrono::NaiveDate;
use clap::Parser;

use crate::{
    cli::{
        Cli, ClockArgs, commands,
        terminal::{REGION, START_ELEMENT, TerminalHost, render_line},
    },
    config::{ClockConfig, ConfigOverrides},
    render::{FaceFrame, FaceLayout, SurfaceHost},
};

#[derive(Clone, Default)]
struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl SharedBuf {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn frame_and_layout(overrides: ConfigOverrides) -> (FaceLayout, FaceFrame) {
    let mut config = ClockConfig::default();
    config.apply(overrides);
    let style = config.effective_style(None);
    let instant = NaiveDate::from_ymd_opt(2024, 12, 24)
        .unwrap()
        .and_hms_opt(18, 30, 5)
        .unwrap();

    (FaceLayout::from_style(&style), FaceFrame::at(&instant, &style))
}

#[test]
fn flags_become_overrides() {
    let cli = Cli::try_parse_from([
        "clockface",
        "time",
        "--digital",
        "--seconds",
        "--offset",
        "-90",
        "--skin-name",
        "night",
    ])
    .unwrap();

    let overrides = cli.clock_args().overrides();

    assert_eq!(overrides.show_digital_block, Some(true));
    assert_eq!(overrides.show_seconds_text, Some(true));
    assert_eq!(overrides.use_offset, Some(true));
    assert_eq!(overrides.offset_minutes, Some(-90));
    assert_eq!(overrides.active_skin.as_deref(), Some("night"));
    assert_eq!(overrides.show_second_hand, None);
    assert!(!cli.is_long_running());
}

#[test]
fn unset_flags_leave_options_alone() {
    assert_eq!(ClockArgs::default().overrides(), ConfigOverrides::default());
}

#[test]
fn run_is_long_running() {
    let cli = Cli::try_parse_from(["clockface", "run", "--frozen"]).unwrap();

    assert!(cli.is_long_running());
    assert_eq!(cli.clock_args().overrides().frozen, Some(true));
}

#[test]
fn resolve_prints_effective_style() {
    let json = commands::resolve(
        ConfigOverrides::default().with_skin(
            "wide",
            crate::config::Skin {
                width: Some("300px".to_string()),
                ..Default::default()
            },
        ),
        Some("wide"),
    )
    .unwrap();

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["skin"], "wide");
    assert_eq!(value["width"], "300px");
    assert_eq!(value["height"], "150px");
}

#[test]
fn schema_lists_options() {
    let json = commands::schema().unwrap();

    assert!(json.contains("show_digital_block"));
    assert!(json.contains("start_trigger_element_id"));
}

#[test]
fn time_reports_offset_mode() {
    let output = commands::time(ConfigOverrides {
        use_offset: Some(true),
        offset_minutes: Some(60),
        ..Default::default()
    });

    assert!(output.contains("UTC+60 min"));
}

#[test]
fn line_shows_digital_block_with_seconds() {
    let (layout, frame) = frame_and_layout(ConfigOverrides {
        show_digital_block: Some(true),
        show_seconds_text: Some(true),
        ..Default::default()
    });

    let line = render_line(&layout, &frame);

    assert!(line.starts_with("[default] 18:30:05"));
    assert!(line.contains("day 24"));
    assert!(line.contains("(24.12. - 18:30)"));
    assert!(line.contains(" s "));
}

#[test]
fn line_hides_what_layout_hides() {
    let (layout, frame) = frame_and_layout(ConfigOverrides {
        show_second_hand: Some(false),
        show_day: Some(false),
        show_time_as_tooltip: Some(false),
        ..Default::default()
    });

    let line = render_line(&layout, &frame);

    assert!(!line.contains("18:30"));
    assert!(!line.contains(" s "));
    assert!(!line.contains("day"));
    assert!(!line.contains('('));
}

#[test]
fn terminal_host_prints_frames_after_layout() {
    let buf = SharedBuf::default();
    let writer = buf.clone();
    let host = TerminalHost::with_writer(move || Box::new(writer.clone()));
    let (layout, frame) = frame_and_layout(ConfigOverrides::default());

    assert!(host.surface("elsewhere").is_none());
    let mut surface = host.surface(REGION).unwrap();
    surface.paint(&frame);
    assert!(buf.contents().is_empty());

    surface.layout(&layout);
    surface.paint(&frame);
    assert_eq!(buf.contents().lines().count(), 1);
}

#[tokio::test]
async fn terminal_host_clicks_known_elements_only() {
    let host = TerminalHost::stdout();

    assert!(host.clicks("reset").is_none());
    let mut start = host.clicks(START_ELEMENT).unwrap();

    assert_eq!(host.click(START_ELEMENT), 1);
    assert_eq!(start.recv().await, Some(()));
    assert_eq!(host.click("reset"), 0);
}
