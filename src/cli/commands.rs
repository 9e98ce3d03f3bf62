use std::sync::Arc;

use schemars::schema_for;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, instrument};

use crate::{
    config::{ClockConfig, ConfigOverrides},
    core::ClockError,
    time_source::TimeSource,
    widget::ClockWidget,
};

use super::{
    CommandResult,
    formatting::{format_description, format_error, format_header},
    terminal::{REGION, START_ELEMENT, STOP_ELEMENT, TerminalHost},
};

/// Paints the clock until stdin says `quit` or closes.
#[instrument(skip_all)]
pub async fn run(overrides: ConfigOverrides) -> CommandResult {
    let host = Arc::new(TerminalHost::stdout());
    let overrides = overrides.merge(ConfigOverrides {
        start_trigger_element_id: Some(START_ELEMENT.to_string()),
        stop_trigger_element_id: Some(STOP_ELEMENT.to_string()),
        ..Default::default()
    });

    let widget = ClockWidget::mount(host.clone(), Some(REGION), Some(overrides));
    info!(running = widget.is_running(), "terminal clock ready");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match line.trim() {
            "" => {}
            "quit" | "q" => break,
            element @ (START_ELEMENT | STOP_ELEMENT) => {
                host.click(element);
            }
            other => eprintln!(
                "{}",
                format_error(&format!("unknown input '{other}', expected start, stop or quit"))
            ),
        }
    }

    drop(widget);
    Ok(String::new())
}

/// The instant and label the clock would show right now.
pub fn time(overrides: ConfigOverrides) -> String {
    let mut config = ClockConfig::default();
    config.apply(overrides);

    let instant = TimeSource::default().current_instant(&config);
    let mode = if config.use_offset {
        format!("UTC{:+} min", config.offset_minutes)
    } else {
        "local".to_string()
    };

    format!(
        "{} {}\n{}",
        format_header(&crate::render::time_label(&instant)),
        mode,
        format_description(&instant.format("%Y-%m-%d %H:%M:%S").to_string())
    )
}

/// The options `skin` resolves to, as pretty JSON.
pub fn resolve(overrides: ConfigOverrides, skin: Option<&str>) -> CommandResult {
    let mut config = ClockConfig::default();
    config.apply(overrides);

    let style = config.effective_style(skin);
    let json = serde_json::to_string_pretty(&style)
        .map_err(|e| ClockError::serialization("resolved style", e))?;
    Ok(json)
}

/// JSON schema of the options accepted in the `[clock]` table.
pub fn schema() -> CommandResult {
    let schema = schema_for!(ConfigOverrides);
    let json = serde_json::to_string_pretty(&schema)
        .map_err(|e| ClockError::serialization("schema", e))?;
    Ok(json)
}
