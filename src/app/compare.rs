use eframe::egui::{
    self, Align2, Color32, CursorIcon, FontId, Sense, Stroke, TextureHandle,
};

const MAX_VIEW_HEIGHT: f32 = 420.0;
const HANDLE_RADIUS: f32 = 12.0;

/// Draws the processed image with the original clipped over its left side,
/// split at `position` percent. The whole area doubles as the range input:
/// clicking or dragging anywhere moves the split to the pointer. Returns
/// the new position when the user moved it.
pub fn comparison_slider(
    ui: &mut egui::Ui,
    before: Option<&TextureHandle>,
    after: &TextureHandle,
    position: u8,
) -> Option<u8> {
    let tex_size = after.size_vec2();
    let max_w = ui.available_width();
    let scale = (max_w / tex_size.x).min(MAX_VIEW_HEIGHT / tex_size.y);
    let display = tex_size * scale;

    let (rect, response) = ui.allocate_exact_size(display, Sense::click_and_drag());
    let painter = ui.painter_at(rect);
    let full_uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));

    painter.image(after.id(), rect, full_uv, Color32::WHITE);

    let Some(before) = before else {
        // No decoded original to compare against; show the result alone.
        return None;
    };

    let split_x = rect.left() + rect.width() * (position as f32 / 100.0);
    let reveal = egui::Rect::from_min_max(rect.min, egui::pos2(split_x, rect.bottom()));
    painter
        .with_clip_rect(reveal)
        .image(before.id(), rect, full_uv, Color32::WHITE);

    painter.line_segment(
        [
            egui::pos2(split_x, rect.top()),
            egui::pos2(split_x, rect.bottom()),
        ],
        Stroke::new(2.0, Color32::WHITE),
    );
    let handle = egui::pos2(split_x, rect.center().y);
    painter.circle_filled(handle, HANDLE_RADIUS, Color32::from_black_alpha(140));
    painter.circle_stroke(handle, HANDLE_RADIUS, Stroke::new(2.0, Color32::WHITE));
    painter.text(
        handle,
        Align2::CENTER_CENTER,
        "◀ ▶",
        FontId::proportional(9.0),
        Color32::WHITE,
    );

    draw_tag(
        &painter,
        egui::pos2(rect.left() + 10.0, rect.top() + 10.0),
        Align2::LEFT_TOP,
        "Before",
    );
    draw_tag(
        &painter,
        egui::pos2(rect.right() - 10.0, rect.top() + 10.0),
        Align2::RIGHT_TOP,
        "AI Result",
    );

    let response = response.on_hover_cursor(CursorIcon::ResizeHorizontal);
    if response.clicked() || response.dragged() {
        if let Some(pointer) = response.interact_pointer_pos() {
            let ratio = ((pointer.x - rect.left()) / rect.width()).clamp(0.0, 1.0);
            let moved = (ratio * 100.0).round() as u8;
            if moved != position {
                return Some(moved);
            }
        }
    }

    None
}

fn draw_tag(painter: &egui::Painter, pos: egui::Pos2, anchor: Align2, text: &str) {
    let font = FontId::proportional(10.0);
    painter.text(
        pos + egui::vec2(1.0, 1.0),
        anchor,
        text,
        font.clone(),
        Color32::BLACK,
    );
    painter.text(pos, anchor, text, font, Color32::WHITE);
}
