use rand::Rng;
use ripple_engine::core::{App, AppControl, FrameCtx};
use ripple_engine::coords::Sizes;
use ripple_engine::draw::{DrawList, ZIndex};
use ripple_engine::input::Key;
use ripple_engine::paint::Color;
use ripple_engine::panel::{Panel, PanelStyle};
use ripple_engine::render::{PlaneRenderer, RectRenderer, TextRenderer};
use ripple_engine::text::{FontId, FontSystem};
use winit::window::WindowId;

use crate::bindings::scene_params;
use crate::config::DemoConfig;
use crate::context::SceneContext;

const PANEL_Z: ZIndex = ZIndex(100);

/// The demo: one displaced plane, orbit camera and the debug panel.
pub struct DemoApp {
    scene: SceneContext,
    panel: Panel<SceneContext>,

    plane_renderer: PlaneRenderer,
    rect_renderer: RectRenderer,
    text_renderer: TextRenderer,
    fonts: FontSystem,
    overlay: DrawList,

    clear_color: Color,
}

impl DemoApp {
    pub fn new<R: Rng + ?Sized>(config: &DemoConfig, rng: &mut R) -> Self {
        let (w, h) = config.window_size;
        let sizes = Sizes::new(w as f32, h as f32, 1.0);

        let style = PanelStyle {
            width: config.panel_width,
            ..PanelStyle::default()
        };

        let mut fonts = FontSystem::new();
        let mut panel = Panel::new(scene_params(), style);
        panel.set_font(load_label_font(config, &mut fonts));

        Self {
            scene: SceneContext::new(config, sizes, rng),
            panel,
            plane_renderer: PlaneRenderer::new(),
            rect_renderer: RectRenderer::new(),
            text_renderer: TextRenderer::new(),
            fonts,
            overlay: DrawList::new(),
            clear_color: config.clear_color,
        }
    }
}

impl App for DemoApp {
    fn on_resize(&mut self, _window_id: WindowId, sizes: Sizes) {
        self.scene.handle_resize(sizes);
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if ctx.input_frame.key_pressed(Key::Escape) {
            log::info!("escape pressed, exiting");
            return AppControl::Exit;
        }

        let viewport = ctx.sizes.viewport();

        self.panel
            .handle_input(&mut self.scene, ctx.input, ctx.input_frame, viewport);
        if !self.panel.captures_pointer() {
            self.scene
                .controls
                .handle_input(ctx.input, ctx.input_frame, viewport.height);
        }

        self.scene.update(ctx.time.elapsed);

        self.overlay.clear();
        self.panel
            .draw(&self.scene, &mut self.overlay, viewport, PANEL_Z);

        let scene = &self.scene;
        let plane_renderer = &mut self.plane_renderer;
        let rect_renderer = &mut self.rect_renderer;
        let text_renderer = &mut self.text_renderer;
        let fonts = &self.fonts;
        let overlay = &mut self.overlay;

        ctx.render(self.clear_color, |rctx, target| {
            plane_renderer.render(rctx, target, &scene.plane, &scene.camera);
            rect_renderer.render(rctx, target, overlay);
            text_renderer.render(rctx, target, overlay, fonts);
        })
    }
}

/// Loads the first usable label font. Without one the panel still works but
/// draws no labels.
fn load_label_font(config: &DemoConfig, fonts: &mut FontSystem) -> Option<FontId> {
    let Some((path, bytes)) = config.read_font() else {
        log::warn!("no label font found; set RIPPLE_FONT to a .ttf file to label the panel");
        return None;
    };
    match fonts.load_font(&bytes) {
        Ok(id) => {
            log::info!("panel font {}", path.display());
            Some(id)
        }
        Err(e) => {
            log::warn!("{}: {e}", path.display());
            None
        }
    }
}
