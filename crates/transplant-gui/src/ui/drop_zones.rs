use std::path::PathBuf;

use csav_transplant::{DropDecision, SlotKind};
use eframe::egui;

use crate::{DropHover, TransplantApp};

const ZONE_MIN_HEIGHT: f32 = 120.0;

pub(crate) fn drop_zones_section(app: &mut TransplantApp, ui: &mut egui::Ui) {
    app.drop_zones.clear();
    ui.columns(2, |columns| {
        for (column, kind) in columns.iter_mut().zip(SlotKind::ALL) {
            let rect = drop_zone(app, column, kind);
            app.drop_zones.push((kind, rect));
        }
    });
}

fn drop_zone(app: &mut TransplantApp, ui: &mut egui::Ui, kind: SlotKind) -> egui::Rect {
    let stroke = zone_stroke(ui, app.drop_hover, kind);
    egui::Frame::group(ui.style())
        .stroke(stroke)
        .show(ui, |ui| {
            ui.set_min_height(ZONE_MIN_HEIGHT);
            ui.set_width(ui.available_width());
            ui.vertical_centered(|ui| {
                let slot = app.workflow.pair().slot(kind);
                ui.add_space(16.0);
                ui.strong(slot.kind().heading());
                ui.add_space(8.0);

                let label = ui.label(slot.display_label());
                if let Some(path) = slot.path() {
                    label.on_hover_text(path.display().to_string());
                }

                ui.add_space(8.0);
                if ui
                    .button("Browse…")
                    .on_hover_text("Pick a .csav save instead of dragging one here.")
                    .clicked()
                {
                    app.browse_slot(kind);
                }
            });
        })
        .response
        .rect
}

fn zone_stroke(ui: &egui::Ui, hover: Option<DropHover>, kind: SlotKind) -> egui::Stroke {
    match hover {
        Some(DropHover {
            slot: Some(target),
            decision,
        }) if target == kind => {
            let color = match decision {
                DropDecision::Accept => egui::Color32::LIGHT_GREEN,
                DropDecision::Reject => egui::Color32::LIGHT_RED,
            };
            egui::Stroke::new(2.0, color)
        }
        _ => ui.visuals().widgets.noninteractive.bg_stroke,
    }
}

/// Reads the OS drag state for this frame: updates hover feedback and hands
/// a completed drop to the slot under the pointer.
pub(crate) fn track_file_drag(app: &mut TransplantApp, ctx: &egui::Context) {
    let (hovered, dropped, pointer) = ctx.input(|i| {
        let hovered = (!i.raw.hovered_files.is_empty()).then(|| {
            i.raw
                .hovered_files
                .iter()
                .map(|file| file.path.clone())
                .collect::<Option<Vec<PathBuf>>>()
        });
        let dropped = (!i.raw.dropped_files.is_empty()).then(|| {
            i.raw
                .dropped_files
                .iter()
                .map(|file| file.path.clone())
                .collect::<Option<Vec<PathBuf>>>()
        });
        let pointer = i.pointer.hover_pos().or_else(|| i.pointer.interact_pos());
        (hovered, dropped, pointer)
    });

    let fallback = app.workflow.pair().first_empty();
    let target = target_slot(&app.drop_zones, pointer, fallback);

    app.drop_hover = hovered.map(|paths| {
        let decision = match (&paths, target) {
            (Some(paths), Some(_)) => app.workflow.hover_decision(paths.as_slice()),
            _ => DropDecision::Reject,
        };
        DropHover {
            slot: target,
            decision,
        }
    });

    if let Some(hover) = app.drop_hover {
        ctx.set_cursor_icon(match hover.decision {
            DropDecision::Accept => egui::CursorIcon::Copy,
            DropDecision::Reject => egui::CursorIcon::NoDrop,
        });
    }

    if let Some(dropped) = dropped {
        app.drop_hover = None;
        match (dropped, target) {
            (Some(paths), Some(slot)) => app.handle_drop(slot, &paths),
            _ => tracing::debug!("ignoring drop outside the save slots"),
        }
    }
}

/// The slot whose zone contains `pointer`. Without a pointer position the
/// `fallback` slot is used.
pub(crate) fn target_slot(
    zones: &[(SlotKind, egui::Rect)],
    pointer: Option<egui::Pos2>,
    fallback: Option<SlotKind>,
) -> Option<SlotKind> {
    match pointer {
        Some(pos) => zones
            .iter()
            .find(|(_, rect)| rect.contains(pos))
            .map(|(kind, _)| *kind),
        None => fallback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::app_with_converter;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    fn zones() -> Vec<(SlotKind, egui::Rect)> {
        vec![
            (
                SlotKind::Source,
                egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(100.0, 100.0)),
            ),
            (
                SlotKind::Destination,
                egui::Rect::from_min_size(egui::pos2(120.0, 0.0), egui::vec2(100.0, 100.0)),
            ),
        ]
    }

    #[test]
    fn pointer_picks_the_zone_it_is_over() {
        let zones = zones();
        assert_eq!(
            target_slot(&zones, Some(egui::pos2(50.0, 50.0)), None),
            Some(SlotKind::Source)
        );
        assert_eq!(
            target_slot(&zones, Some(egui::pos2(150.0, 10.0)), Some(SlotKind::Source)),
            Some(SlotKind::Destination)
        );
    }

    #[test]
    fn pointer_between_zones_targets_nothing() {
        assert_eq!(
            target_slot(&zones(), Some(egui::pos2(110.0, 50.0)), Some(SlotKind::Source)),
            None
        );
    }

    #[test]
    fn missing_pointer_uses_fallback() {
        assert_eq!(
            target_slot(&zones(), None, Some(SlotKind::Destination)),
            Some(SlotKind::Destination)
        );
        assert_eq!(target_slot(&zones(), None, None), None);
    }

    fn file(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, name).expect("write file");
        path
    }

    fn hovering(path: &Path, pointer: egui::Pos2) -> egui::RawInput {
        egui::RawInput {
            hovered_files: vec![egui::HoveredFile {
                path: Some(path.to_path_buf()),
                ..Default::default()
            }],
            events: vec![egui::Event::PointerMoved(pointer)],
            ..Default::default()
        }
    }

    fn dropping(path: &Path, pointer: Option<egui::Pos2>) -> egui::RawInput {
        egui::RawInput {
            dropped_files: vec![egui::DroppedFile {
                path: Some(path.to_path_buf()),
                ..Default::default()
            }],
            events: pointer.map(egui::Event::PointerMoved).into_iter().collect(),
            ..Default::default()
        }
    }

    fn run_frame(app: &mut TransplantApp, input: egui::RawInput) -> egui::CursorIcon {
        let ctx = egui::Context::default();
        let output = ctx.run(input, |ctx| track_file_drag(app, ctx));
        output.platform_output.cursor_icon
    }

    #[test]
    fn hovering_shows_copy_or_no_drop_cursor() {
        let dir = tempdir().expect("temp dir");
        let txt = file(dir.path(), "a.txt");
        let save = file(dir.path(), "a.csav");
        let mut app = app_with_converter(dir.path().join("davst"));
        app.drop_zones = zones();

        let cursor = run_frame(&mut app, hovering(&txt, egui::pos2(50.0, 50.0)));
        assert_eq!(cursor, egui::CursorIcon::NoDrop);
        assert_eq!(
            app.drop_hover,
            Some(DropHover {
                slot: Some(SlotKind::Source),
                decision: DropDecision::Reject,
            })
        );

        let cursor = run_frame(&mut app, hovering(&save, egui::pos2(50.0, 50.0)));
        assert_eq!(cursor, egui::CursorIcon::Copy);
        assert_eq!(
            app.drop_hover,
            Some(DropHover {
                slot: Some(SlotKind::Source),
                decision: DropDecision::Accept,
            })
        );
    }

    #[test]
    fn hovering_between_zones_is_rejected() {
        let dir = tempdir().expect("temp dir");
        let save = file(dir.path(), "a.csav");
        let mut app = app_with_converter(dir.path().join("davst"));
        app.drop_zones = zones();

        let cursor = run_frame(&mut app, hovering(&save, egui::pos2(110.0, 50.0)));
        assert_eq!(cursor, egui::CursorIcon::NoDrop);
        assert_eq!(app.drop_hover.map(|hover| hover.slot), Some(None));
    }

    #[test]
    fn drop_goes_to_the_zone_under_the_pointer() {
        let dir = tempdir().expect("temp dir");
        let save = file(dir.path(), "a.csav");
        let mut app = app_with_converter(dir.path().join("davst"));
        app.drop_zones = zones();

        run_frame(&mut app, dropping(&save, Some(egui::pos2(150.0, 50.0))));

        assert!(app.drop_hover.is_none());
        assert!(app.workflow.pair().source().is_empty());
        assert_eq!(app.workflow.pair().destination().path(), Some(save.as_path()));
        assert_eq!(app.status, "Destination save selected.");
    }

    #[test]
    fn drop_without_pointer_fills_the_first_empty_slot() {
        let dir = tempdir().expect("temp dir");
        let save = file(dir.path(), "a.csav");
        let mut app = app_with_converter(dir.path().join("davst"));
        app.drop_zones = zones();

        run_frame(&mut app, dropping(&save, None));

        assert_eq!(app.workflow.pair().source().path(), Some(save.as_path()));
        assert!(app.workflow.pair().destination().is_empty());
    }

    #[test]
    fn rejected_drop_leaves_slots_untouched() {
        let dir = tempdir().expect("temp dir");
        let txt = file(dir.path(), "a.txt");
        let mut app = app_with_converter(dir.path().join("davst"));
        app.drop_zones = zones();

        run_frame(&mut app, dropping(&txt, Some(egui::pos2(50.0, 50.0))));

        assert!(app.workflow.pair().source().is_empty());
        assert!(app.error_message.is_none());
    }
}
