//! UI rendering for the terminal interface.
//!
//! Geometry is computed once per frame through `Areas::compute` and shared
//! with the runtime so mouse clicks can be mapped back onto the progress and
//! volume gauges.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Gauge, List, ListItem, Padding, Paragraph, Wrap},
};
use std::time::Duration;

use crate::app::{App, PlaybackState};

/// Per-widget rectangles for one frame, used for drawing and hit-testing.
#[derive(Copy, Clone, Debug)]
pub struct Areas {
    pub header: Rect,
    pub status: Rect,
    pub progress: Rect,
    pub volume: Rect,
    pub list: Rect,
    pub footer: Rect,
}

impl Areas {
    pub fn compute(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(4),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(1),
                Constraint::Length(3),
            ])
            .split(area);

        Self {
            header: chunks[0],
            status: chunks[1],
            progress: chunks[2],
            volume: chunks[3],
            list: chunks[4],
            footer: chunks[5],
        }
    }
}

/// Map a click column inside a bordered gauge to a `[0, 1]` fraction.
///
/// Returns `None` when the column misses the gauge interior.
pub fn gauge_fraction(area: Rect, column: u16) -> Option<f64> {
    if area.width <= 2 {
        return None;
    }
    let inner_x = area.x + 1;
    let inner_w = area.width - 2;
    if column < inner_x || column >= inner_x + inner_w {
        return None;
    }
    if inner_w == 1 {
        return Some(1.0);
    }
    Some(f64::from(column - inner_x) / f64::from(inner_w - 1))
}

/// Format a `Duration` as `MM:SS`.
pub fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

fn controls_text(seek_seconds: u64) -> String {
    [
        "[j/k] up/down".to_string(),
        "[enter] play selected".to_string(),
        "[p] play".to_string(),
        "[space] pause/resume".to_string(),
        "[x] stop".to_string(),
        format!("[h/l] seek -/+{}s", seek_seconds),
        "[n] next".to_string(),
        "[s] shuffle".to_string(),
        "[-/+] volume".to_string(),
        "[click] seek / set volume".to_string(),
        "[q] quit".to_string(),
    ]
    .join(" | ")
}

/// Render the entire UI into the provided `frame` using `app` state.
pub fn draw(frame: &mut Frame, app: &App, display: &[usize], seek_seconds: u64) {
    let areas = Areas::compute(frame.area());

    // Header
    let header = Paragraph::new("MP3 Player")
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" minim ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, areas.header);

    // Snapshot of shared playback info for this frame.
    let (now_index, elapsed) = match app.playback_handle.as_ref().and_then(|h| h.lock().ok()) {
        Some(info) => (info.index, info.elapsed),
        None => (None, Duration::ZERO),
    };

    // Status box
    let status = {
        let mut parts: Vec<String> = Vec::new();

        let state = match app.playback {
            PlaybackState::Stopped => "Stopped",
            PlaybackState::Playing => "Playing",
            PlaybackState::Paused => "Paused",
        };
        parts.push(format!("Status: {}", state));

        if let Some(idx) = now_index {
            if let Some(track) = app.tracks.get(idx) {
                match track.duration {
                    Some(total) => parts.push(format!(
                        "Song: {} [{} / {}]",
                        track.display,
                        format_mmss(elapsed),
                        format_mmss(total)
                    )),
                    None => parts.push(format!(
                        "Song: {} [{}]",
                        track.display,
                        format_mmss(elapsed)
                    )),
                }
            }
        }

        parts.push(format!(
            "Shuffle: {}",
            if app.shuffle { "ON" } else { "OFF" }
        ));

        if let Some(src) = &app.source {
            parts.push(format!("Source: {}", src));
        }

        if let Some(msg) = &app.status_message {
            parts.push(format!("⚠ {}", msg));
        }

        parts.join(" • ")
    };

    let status_par = Paragraph::new(status)
        .block(
            Block::bordered()
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                })
                .title(" status "),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(status_par, areas.status);

    // Progress gauge: elapsed over track duration, clickable to seek.
    {
        let (ratio, label) = match now_index.and_then(|i| app.tracks.get(i)) {
            Some(track) => match track.duration {
                Some(total) if !total.is_zero() => {
                    let r = (elapsed.as_secs_f64() / total.as_secs_f64()).clamp(0.0, 1.0);
                    (r, format!("{} / {}", format_mmss(elapsed), format_mmss(total)))
                }
                _ => (0.0, format_mmss(elapsed)),
            },
            None => (0.0, "--:-- / --:--".to_string()),
        };

        let progress = Gauge::default()
            .block(Block::default().borders(Borders::ALL).title(" progress "))
            .gauge_style(Style::default().fg(Color::Cyan))
            .ratio(ratio)
            .label(label);
        frame.render_widget(progress, areas.progress);
    }

    // Volume gauge, clickable to set.
    {
        let ratio = f64::from(app.volume_percent) / 100.0;
        let volume = Gauge::default()
            .block(Block::default().borders(Borders::ALL).title(" volume "))
            .gauge_style(Style::default().fg(Color::Green))
            .ratio(ratio)
            .label(format!("{}%", app.volume_percent));
        frame.render_widget(volume, areas.volume);
    }

    // Track list: window around the selection so long playlists stay centered.
    {
        let total = display.len();
        let list_height = areas.list.height.saturating_sub(2) as usize;
        let sel_pos = display.iter().position(|&i| i == app.selected).unwrap_or(0);
        let (start, end, selected_pos_in_visible) = if total <= list_height || list_height == 0 {
            (0, total, sel_pos)
        } else {
            let half = list_height / 2;
            let mut start = if sel_pos > half { sel_pos - half } else { 0 };
            if start + list_height > total {
                start = total - list_height;
            }
            (start, start + list_height, sel_pos - start)
        };

        let visible_items: Vec<ListItem> = display[start..end]
            .iter()
            .map(|&i| {
                let title = &app.tracks[i].display;
                if now_index == Some(i) {
                    ListItem::new(format!("▶ {}", title))
                        .style(Style::default().add_modifier(Modifier::BOLD))
                } else {
                    ListItem::new(format!("  {}", title))
                }
            })
            .collect();

        let list = List::new(visible_items)
            .block(Block::default().borders(Borders::ALL).title(" tracks "))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        let mut state = ratatui::widgets::ListState::default();
        if total > 0 {
            state.select(Some(selected_pos_in_visible));
        }
        frame.render_stateful_widget(list, areas.list, &mut state);
    }

    let footer = Paragraph::new(controls_text(seek_seconds))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(footer, areas.footer);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_mmss_pads_minutes_and_seconds() {
        assert_eq!(format_mmss(Duration::ZERO), "00:00");
        assert_eq!(format_mmss(Duration::from_secs(65)), "01:05");
        assert_eq!(format_mmss(Duration::from_secs(600)), "10:00");
    }

    #[test]
    fn areas_tile_the_frame_vertically() {
        let areas = Areas::compute(Rect::new(0, 0, 80, 30));
        assert_eq!(areas.header.y, 0);
        assert_eq!(areas.status.y, areas.header.y + areas.header.height);
        assert_eq!(areas.progress.y, areas.status.y + areas.status.height);
        assert_eq!(areas.volume.y, areas.progress.y + areas.progress.height);
        assert_eq!(areas.list.y, areas.volume.y + areas.volume.height);
        assert_eq!(areas.footer.y, areas.list.y + areas.list.height);
        assert_eq!(areas.footer.y + areas.footer.height, 30);
    }

    #[test]
    fn gauge_fraction_maps_interior_columns() {
        // Borders at columns 0 and 11; interior spans 1..=10.
        let area = Rect::new(0, 0, 12, 3);
        assert_eq!(gauge_fraction(area, 0), None);
        assert_eq!(gauge_fraction(area, 11), None);
        assert_eq!(gauge_fraction(area, 1), Some(0.0));
        assert_eq!(gauge_fraction(area, 10), Some(1.0));

        let mid = gauge_fraction(area, 5).unwrap();
        assert!(mid > 0.4 && mid < 0.5);
    }

    #[test]
    fn gauge_fraction_rejects_degenerate_areas() {
        assert_eq!(gauge_fraction(Rect::new(0, 0, 2, 3), 1), None);
        assert_eq!(gauge_fraction(Rect::new(0, 0, 0, 0), 0), None);
    }
}
