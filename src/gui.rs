use egui::Context;
use egui_wgpu::Renderer;
use egui_winit::State;
use galaxy_core::{
    Color, GalaxyParameters, BRANCHES_RANGE, COUNT_RANGE, POINT_SIZE_RANGE, RADIUS_RANGE,
    RANDOMNESS_POWER_RANGE, RANDOMNESS_RANGE, TIME_SEED_RANGE,
};
use galaxy_simulation::FrameUpdate;
use wgpu::{Device, TextureFormat};
use winit::{event::WindowEvent, window::Window};

pub struct UiState {
    pub fps: f32,
    pub frame_time: f32,
    /// Parameters as edited in the panel, applied on regeneration
    pub params: GalaxyParameters,
    pub regenerate_requested: bool,
    pub last_update: Option<FrameUpdate>,
    pub elapsed: f32,
    /// Text of the hex fields next to the color pickers
    pub inside_hex: String,
    pub outside_hex: String,
    /// A picker changed while the pointer was still held
    pub color_edit_pending: bool,
}

impl Default for UiState {
    fn default() -> Self {
        let params = GalaxyParameters::default();
        Self {
            fps: 0.0,
            frame_time: 0.0,
            params,
            regenerate_requested: false,
            last_update: None,
            elapsed: 0.0,
            inside_hex: params.inside_color.to_hex(),
            outside_hex: params.outside_color.to_hex(),
            color_edit_pending: false,
        }
    }
}

pub struct Gui {
    context: Context,
    state: State,
    renderer: Renderer,
}

impl Gui {
    pub fn new(device: &Device, output_color_format: TextureFormat, window: &Window) -> Self {
        let context = Context::default();
        let id = context.viewport_id();

        let state = State::new(
            context.clone(),
            id,
            window,
            Some(window.scale_factor() as f32),
            None,
            Some(device.limits().max_texture_dimension_2d as usize),
        );

        let renderer = Renderer::new(
            device,
            output_color_format,
            egui_wgpu::RendererOptions {
                msaa_samples: 1,
                depth_stencil_format: None,
                dithering: false,
                ..Default::default()
            },
        );

        Self {
            context,
            state,
            renderer,
        }
    }

    pub fn handle_event(&mut self, window: &Window, event: &WindowEvent) -> bool {
        let response = self.state.on_window_event(window, event);
        response.consumed
    }

    /// Record the UI pass; returns extra command buffers to submit before `encoder`
    pub fn render(
        &mut self,
        device: &Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        window: &Window,
        view: &wgpu::TextureView,
        ui_state: &mut UiState,
    ) -> Vec<wgpu::CommandBuffer> {
        let raw_input = self.state.take_egui_input(window);

        let full_output = self.context.run(raw_input, |ctx| {
            Self::ui(ctx, ui_state);
        });

        self.state
            .handle_platform_output(window, full_output.platform_output);

        let clipped_primitives = self
            .context
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        let size = window.inner_size();
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [size.width, size.height],
            pixels_per_point: window.scale_factor() as f32,
        };

        for (id, image_delta) in &full_output.textures_delta.set {
            self.renderer
                .update_texture(device, queue, *id, image_delta);
        }

        let command_buffers = self.renderer.update_buffers(
            device,
            queue,
            encoder,
            &clipped_primitives,
            &screen_descriptor,
        );

        {
            let mut render_pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Egui Render Pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                        depth_slice: None,
                    })],
                    depth_stencil_attachment: None,
                    timestamp_writes: None,
                    occlusion_query_set: None,
                })
                .forget_lifetime();

            self.renderer
                .render(&mut render_pass, &clipped_primitives, &screen_descriptor);
        }

        for id in &full_output.textures_delta.free {
            self.renderer.free_texture(id);
        }

        command_buffers
    }

    fn ui(ctx: &Context, state: &mut UiState) {
        // Diagnostics Panel (Top Left)
        egui::Window::new("Diagnostics")
            .anchor(egui::Align2::LEFT_TOP, [10.0, 10.0])
            .resizable(false)
            .collapsible(true)
            .show(ctx, |ui| {
                ui.label(format!("FPS: {:.1}", state.fps));
                ui.label(format!("Frame Time: {:.2} ms", state.frame_time));
                ui.label(format!("Elapsed: {:.2} s", state.elapsed));

                if let Some(update) = &state.last_update {
                    ui.separator();
                    for (name, transform) in ["Upper", "Lower"].iter().zip(update.galaxies) {
                        ui.label(format!(
                            "{name}: y {:.2}, scale {:.2}",
                            transform.position.y, transform.scale.x
                        ));
                    }
                    ui.label(if update.colliding {
                        "Phase: colliding"
                    } else {
                        "Phase: separated"
                    });
                }
            });

        // Galaxy Controls (Top Right)
        egui::Window::new("Galaxy")
            .anchor(egui::Align2::RIGHT_TOP, [-10.0, 10.0])
            .resizable(false)
            .collapsible(true)
            .show(ctx, |ui| {
                let params = &mut state.params;
                let mut finished = false;

                finished |= edit_finished(
                    ui.add(
                        egui::Slider::new(&mut params.count, COUNT_RANGE.range.clone())
                            .step_by(COUNT_RANGE.step as f64)
                            .logarithmic(true)
                            .text("Count"),
                    ),
                );
                finished |= edit_finished(
                    ui.add(
                        egui::Slider::new(&mut params.radius, RADIUS_RANGE.range.clone())
                            .step_by(RADIUS_RANGE.step as f64)
                            .text("Radius"),
                    ),
                );
                finished |= edit_finished(
                    ui.add(
                        egui::Slider::new(&mut params.branches, BRANCHES_RANGE.range.clone())
                            .step_by(BRANCHES_RANGE.step as f64)
                            .text("Branches"),
                    ),
                );
                finished |= edit_finished(
                    ui.add(
                        egui::Slider::new(&mut params.randomness, RANDOMNESS_RANGE.range.clone())
                            .step_by(RANDOMNESS_RANGE.step as f64)
                            .text("Randomness"),
                    ),
                );
                finished |= edit_finished(
                    ui.add(
                        egui::Slider::new(
                            &mut params.randomness_power,
                            RANDOMNESS_POWER_RANGE.range.clone(),
                        )
                        .step_by(RANDOMNESS_POWER_RANGE.step as f64)
                        .text("Randomness Power"),
                    ),
                );

                ui.separator();
                finished |= color_row(
                    ui,
                    "Inside Color",
                    &mut params.inside_color,
                    &mut state.inside_hex,
                    &mut state.color_edit_pending,
                );
                finished |= color_row(
                    ui,
                    "Outside Color",
                    &mut params.outside_color,
                    &mut state.outside_hex,
                    &mut state.color_edit_pending,
                );

                ui.separator();
                ui.heading("Shading");
                finished |= edit_finished(
                    ui.add(
                        egui::Slider::new(&mut params.time_seed, TIME_SEED_RANGE.range.clone())
                            .step_by(TIME_SEED_RANGE.step as f64)
                            .clamping(egui::SliderClamping::Edits)
                            .text("Time Seed"),
                    ),
                );
                finished |= edit_finished(
                    ui.add(
                        egui::Slider::new(&mut params.point_size, POINT_SIZE_RANGE.range.clone())
                            .step_by(POINT_SIZE_RANGE.step as f64)
                            .text("Point Size"),
                    ),
                );

                ui.separator();
                if ui.button("Regenerate").clicked() {
                    finished = true;
                }

                if finished {
                    state.regenerate_requested = true;
                }
            });
    }
}

/// True once an edit is complete: a drag was released, or the value changed
/// without dragging (typed or clicked)
fn edit_finished(response: egui::Response) -> bool {
    response.drag_stopped() || (response.changed() && !response.dragged())
}

/// Swatch picker plus an editable `#rrggbb` field for one gradient endpoint
fn color_row(
    ui: &mut egui::Ui,
    label: &str,
    color: &mut Color,
    hex: &mut String,
    pending: &mut bool,
) -> bool {
    ui.horizontal(|ui| {
        // 8-bit sRGB so the swatch shows the same bytes as the hex text
        let mut rgb = color.to_rgb8();
        let response = ui.color_edit_button_srgb(&mut rgb);
        if response.changed() {
            *color = Color::from_rgb8(rgb[0], rgb[1], rgb[2]);
            *hex = color.to_hex();
        }
        let picked =
            picker_edit_finished(response.changed(), ui.ctx().is_using_pointer(), pending);

        ui.label(label);
        let text = ui.add(egui::TextEdit::singleline(hex).desired_width(64.0));
        let typed = text.lost_focus() && apply_hex(color, hex);

        picked || typed
    })
    .inner
}

/// The picker popup reports a change on every drag frame; hold the edit
/// until the pointer is released
fn picker_edit_finished(changed: bool, pointer_in_use: bool, pending: &mut bool) -> bool {
    if changed {
        *pending = true;
    }
    if *pending && !pointer_in_use {
        *pending = false;
        return true;
    }
    false
}

/// Parse the hex field into `color`. Invalid text is logged and reset to the
/// current color. Returns whether the color changed.
fn apply_hex(color: &mut Color, hex: &mut String) -> bool {
    match Color::from_hex(hex.trim()) {
        Ok(parsed) => {
            let changed = parsed != *color;
            *color = parsed;
            *hex = parsed.to_hex();
            changed
        }
        Err(e) => {
            log::warn!("Ignoring color '{}': {}", hex, e);
            *hex = color.to_hex();
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_picker_drag_regenerates_once_on_release() {
        let mut pending = false;

        // Dragging inside the popup
        assert!(!picker_edit_finished(true, true, &mut pending));
        assert!(!picker_edit_finished(true, true, &mut pending));
        assert!(!picker_edit_finished(false, true, &mut pending));

        // Released
        assert!(picker_edit_finished(false, false, &mut pending));
        assert!(!picker_edit_finished(false, false, &mut pending));
    }

    #[test]
    fn test_picker_change_without_pointer_finishes_immediately() {
        let mut pending = false;
        assert!(picker_edit_finished(true, false, &mut pending));
        assert!(!pending);
        assert!(!picker_edit_finished(false, false, &mut pending));
    }

    #[test]
    fn test_apply_hex_valid() {
        let mut color = Color::BLACK;
        let mut hex = " 1B3984 ".to_string();

        assert!(apply_hex(&mut color, &mut hex));
        assert_eq!(color, Color::from_rgb8(0x1b, 0x39, 0x84));
        assert_eq!(hex, "#1b3984");

        // Same color again is not an edit
        assert!(!apply_hex(&mut color, &mut hex));
    }

    #[test]
    fn test_apply_hex_invalid_keeps_color() {
        let mut color = Color::from_rgb8(0xff, 0x60, 0x30);
        let mut hex = "#zz6030".to_string();

        assert!(!apply_hex(&mut color, &mut hex));
        assert_eq!(color, Color::from_rgb8(0xff, 0x60, 0x30));
        assert_eq!(hex, "#ff6030");

        hex = "#fff".to_string();
        assert!(!apply_hex(&mut color, &mut hex));
        assert_eq!(hex, "#ff6030");
    }
}
