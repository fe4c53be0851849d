//! Command panel UI using egui.

use egui::{Align2, Color32, Context, Vec2};
use shapeforge_core::shapes::ColorParseError;
use shapeforge_core::{GizmoMode, Rgb, ShapeId, ShapeKind, ShapeRegistry};
use shapeforge_render::GridStyle;

use shapeforge_widgets::{
    colors_match, hint, panel_frame, section_label, separator, sizing, theme, ActionButton,
    ColorSwatch, ListRow, ToggleButton, QUICK_COLORS,
};

/// One row of the scene list.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeEntry {
    pub id: ShapeId,
    pub label: String,
    pub color: Color32,
    pub selected: bool,
}

/// Properties of the selected shape for the properties section.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedShapeProps {
    pub id: ShapeId,
    pub label: String,
    pub color: Rgb,
}

/// A read-only view of the editor, rebuilt every frame.
#[derive(Debug, Clone, Default)]
pub struct PanelProps {
    pub shapes: Vec<ShapeEntry>,
    pub selected: Option<SelectedShapeProps>,
    pub gizmo_mode: GizmoMode,
    pub scene_mounted: bool,
}

impl PanelProps {
    /// Build the panel view from the registry. Labels are numbered per kind
    /// in insertion order ("Cube 1", "Cube 2", "Sphere 1").
    pub fn from_registry(registry: &ShapeRegistry, gizmo_mode: GizmoMode, scene_mounted: bool) -> Self {
        let mut counts = [0usize; ShapeKind::ALL.len()];
        let mut selected = None;

        let shapes = registry
            .shapes()
            .iter()
            .map(|shape| {
                let slot = ShapeKind::ALL
                    .iter()
                    .position(|kind| *kind == shape.kind())
                    .unwrap_or(0);
                counts[slot] += 1;
                let label = format!("{} {}", shape.kind().display_name(), counts[slot]);
                let is_selected = registry.selected() == Some(shape.id());
                if is_selected {
                    selected = Some(SelectedShapeProps {
                        id: shape.id(),
                        label: label.clone(),
                        color: shape.metadata.color,
                    });
                }
                ShapeEntry {
                    id: shape.id(),
                    label,
                    color: rgb_to_color32(shape.metadata.color),
                    selected: is_selected,
                }
            })
            .collect();

        Self {
            shapes,
            selected,
            gizmo_mode,
            scene_mounted,
        }
    }
}

/// UI state that outlives a single frame.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Message shown in the toast until dismissed.
    pub notice: Option<String>,
    pub grid_style: GridStyle,
    /// Text of the hex color field while it has focus.
    pub hex_draft: Option<String>,
}

impl UiState {
    /// Show a message in the toast, replacing any previous one.
    pub fn notify(&mut self, message: impl Into<String>) {
        self.notice = Some(message.into());
    }
}

/// Actions that can be triggered by the UI.
#[derive(Debug, Clone, PartialEq)]
pub enum UiAction {
    /// Create a new shape of this kind.
    AddShape(ShapeKind),
    /// Recolor the selected shape.
    SetColor(Rgb),
    SetGizmoMode(GizmoMode),
    RemoveSelected,
    /// Select a shape from the scene list.
    SelectShape(ShapeId),
    ExportGlb,
    CycleGrid,
    ResetView,
    DismissNotice,
}

pub fn rgb_to_color32(color: Rgb) -> Color32 {
    Color32::from_rgb(color.r, color.g, color.b)
}

pub fn color32_to_rgb(color: Color32) -> Rgb {
    Rgb::new(color.r(), color.g(), color.b())
}

/// Render all UI and return any triggered action.
pub fn render_ui(ctx: &Context, ui_state: &mut UiState, props: &PanelProps) -> Option<UiAction> {
    let sidebar_action = render_sidebar(ctx, ui_state, props);
    let toast_action = render_toast(ctx, ui_state);
    sidebar_action.or(toast_action)
}

fn render_sidebar(ctx: &Context, ui_state: &mut UiState, props: &PanelProps) -> Option<UiAction> {
    let mut action = None;
    let margin = 12.0;

    egui::Area::new(egui::Id::new("sidebar"))
        .anchor(Align2::LEFT_TOP, Vec2::new(margin, margin))
        .interactable(true)
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            panel_frame().show(ui, |ui| {
                ui.set_width(sizing::SIDEBAR_WIDTH - 20.0);
                ui.spacing_mut().item_spacing = Vec2::new(0.0, 6.0);

                ui.label(
                    egui::RichText::new("ShapeForge")
                        .size(14.0)
                        .strong()
                        .color(theme::TEXT),
                );
                ui.add_space(4.0);

                if let Some(a) = shapes_section(ui, props) {
                    action = Some(a);
                }
                separator(ui);
                if let Some(a) = properties_section(ui, ui_state, props) {
                    action = Some(a);
                }
                separator(ui);
                if let Some(a) = scene_section(ui, props) {
                    action = Some(a);
                }
                separator(ui);
                if let Some(a) = view_section(ui, ui_state) {
                    action = Some(a);
                }
                separator(ui);
                section_label(ui, "Export");
                if ActionButton::new("Export GLB")
                    .primary()
                    .enabled(props.scene_mounted)
                    .tooltip("Download the scene as scene.glb")
                    .show(ui)
                {
                    action = Some(UiAction::ExportGlb);
                }
            });
        });

    action
}

fn shapes_section(ui: &mut egui::Ui, props: &PanelProps) -> Option<UiAction> {
    let mut action = None;
    section_label(ui, "Shapes");
    for kind in ShapeKind::ALL {
        let label = format!("Add {}", kind.display_name());
        if ActionButton::new(&label).enabled(props.scene_mounted).show(ui) {
            action = Some(UiAction::AddShape(kind));
        }
    }
    action
}

/// Parse the hex color field. `Ok(None)` means the color is unchanged.
fn parse_hex_input(draft: &str, current: Rgb) -> Result<Option<Rgb>, ColorParseError> {
    let color = draft.parse::<Rgb>()?;
    Ok((color != current).then_some(color))
}

fn properties_section(ui: &mut egui::Ui, ui_state: &mut UiState, props: &PanelProps) -> Option<UiAction> {
    let mut action = None;
    section_label(ui, "Properties");

    let Some(selected) = &props.selected else {
        hint(ui, "Select a shape to edit it");
        // Keep the controls visible but inert so the layout does not jump
        ui.add_enabled_ui(false, |ui| {
            let mut placeholder = [255u8, 255, 255];
            ui.horizontal(|ui| {
                egui::color_picker::color_edit_button_srgb(ui, &mut placeholder);
            });
        });
        return None;
    };

    ui.label(egui::RichText::new(&selected.label).size(12.0).color(theme::TEXT));

    // Color
    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing = Vec2::new(6.0, 0.0);
        let mut srgb = [selected.color.r, selected.color.g, selected.color.b];
        if egui::color_picker::color_edit_button_srgb(ui, &mut srgb).changed() {
            action = Some(UiAction::SetColor(Rgb::new(srgb[0], srgb[1], srgb[2])));
        }
        let mut text = ui_state
            .hex_draft
            .take()
            .unwrap_or_else(|| selected.color.to_hex());
        let response = ui.add(
            egui::TextEdit::singleline(&mut text)
                .id(egui::Id::new("hex_input"))
                .desired_width(72.0)
                .font(egui::TextStyle::Monospace)
                .text_color(theme::TEXT_MUTED),
        );
        if response.lost_focus() {
            match parse_hex_input(&text, selected.color) {
                Ok(Some(color)) => action = Some(UiAction::SetColor(color)),
                Ok(None) => {}
                Err(e) => ui_state.notify(e.to_string()),
            }
        } else if response.has_focus() {
            ui_state.hex_draft = Some(text);
        }
    });

    let current = rgb_to_color32(selected.color);
    ui.horizontal_wrapped(|ui| {
        ui.spacing_mut().item_spacing = Vec2::new(4.0, 4.0);
        for (name, color) in QUICK_COLORS {
            let (clicked, _) = ColorSwatch::new(*color, name)
                .selected(colors_match(*color, current))
                .show(ui);
            if clicked {
                action = Some(UiAction::SetColor(color32_to_rgb(*color)));
            }
        }
    });

    ui.add_space(4.0);
    ui.label(egui::RichText::new("Gizmo").size(11.0).color(theme::TEXT_MUTED));
    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing = Vec2::new(4.0, 0.0);
        for mode in GizmoMode::ALL {
            let is_current = props.gizmo_mode == mode;
            if ToggleButton::new(mode.name(), is_current).min_width(58.0).show(ui) && !is_current {
                action = Some(UiAction::SetGizmoMode(mode));
            }
        }
    });

    ui.add_space(4.0);
    if ActionButton::new("Remove").danger().show(ui) {
        action = Some(UiAction::RemoveSelected);
    }

    action
}

fn scene_section(ui: &mut egui::Ui, props: &PanelProps) -> Option<UiAction> {
    let mut action = None;
    section_label(ui, "Scene");

    if props.shapes.is_empty() {
        hint(ui, "No shapes yet");
        return None;
    }

    egui::ScrollArea::vertical()
        .max_height(180.0)
        .auto_shrink([false, true])
        .show(ui, |ui| {
            ui.spacing_mut().item_spacing = Vec2::new(0.0, 2.0);
            for entry in &props.shapes {
                if ListRow::new(&entry.label, entry.color, entry.selected).show(ui) && !entry.selected {
                    action = Some(UiAction::SelectShape(entry.id));
                }
            }
        });

    action
}

fn view_section(ui: &mut egui::Ui, ui_state: &UiState) -> Option<UiAction> {
    let mut action = None;
    section_label(ui, "View");
    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing = Vec2::new(4.0, 0.0);
        let grid_label = format!("Grid: {}", ui_state.grid_style.name());
        if ToggleButton::new(&grid_label, false).show(ui) {
            action = Some(UiAction::CycleGrid);
        }
        if ToggleButton::new("Reset view", false).show(ui) {
            action = Some(UiAction::ResetView);
        }
    });
    action
}

fn render_toast(ctx: &Context, ui_state: &UiState) -> Option<UiAction> {
    let message = ui_state.notice.as_deref()?;
    let mut action = None;

    egui::Area::new(egui::Id::new("toast"))
        .anchor(Align2::CENTER_BOTTOM, Vec2::new(0.0, -16.0))
        .interactable(true)
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            panel_frame().show(ui, |ui| {
                ui.set_max_width(360.0);
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new(message).size(12.0).color(theme::TEXT));
                    ui.add_space(8.0);
                    if ToggleButton::new("Dismiss", false).show(ui) {
                        action = Some(UiAction::DismissNotice);
                    }
                });
            });
        });

    action
}
