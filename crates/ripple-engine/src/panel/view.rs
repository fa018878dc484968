use crate::coords::{Rect, Vec2, Viewport};
use crate::draw::{DrawList, ZIndex};
use crate::input::{InputFrame, InputState, Key, MouseButton};
use crate::paint::Color;
use crate::text::FontId;

use super::{ParamError, ParamKind, ParamTable};

/// Panel geometry and colors, in logical pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelStyle {
    pub width: f32,
    pub row_height: f32,
    pub row_gap: f32,
    pub padding: f32,
    /// Distance from the top-right corner of the viewport.
    pub margin: f32,

    /// Label size in logical pixels.
    pub text_size: f32,
    /// Start of the value readout, as a fraction of the row width.
    pub value_column: f32,

    pub background: Color,
    pub row: Color,
    pub row_selected: Color,
    pub slider_fill: Color,
    pub toggle_on: Color,
    pub toggle_off: Color,
    pub action: Color,
    pub text: Color,
}

impl Default for PanelStyle {
    fn default() -> Self {
        Self {
            width: 245.0,
            row_height: 22.0,
            row_gap: 4.0,
            padding: 6.0,
            margin: 0.0,

            text_size: 12.0,
            value_column: 0.62,

            background: Color::from_straight(0.12, 0.12, 0.12, 0.92),
            row: Color::from_straight(0.2, 0.2, 0.2, 1.0),
            row_selected: Color::from_straight(0.3, 0.3, 0.3, 1.0),
            slider_fill: Color::from_hex(0x2cc9ff),
            toggle_on: Color::from_hex(0x2cc9ff),
            toggle_off: Color::from_straight(0.4, 0.4, 0.4, 1.0),
            action: Color::from_straight(0.55, 0.55, 0.55, 1.0),
            text: Color::from_straight(0.92, 0.92, 0.92, 1.0),
        }
    }
}

/// Debug parameter panel: lays out a [`ParamTable`] as rows, drives it from
/// keyboard and pointer input, and draws it as flat rectangles labelled with
/// each row's name and current value.
///
/// Keys: Up/Down (or Tab / Shift+Tab) select a row, Left/Right nudge a slider
/// by one step (ten with Shift), Space/Enter flip a toggle or fire an action,
/// `H` hides or shows the panel.
///
/// A primary-button press that lands on the panel captures the pointer until
/// release; callers skip camera controls while [`captures_pointer`] is set.
///
/// Labels are drawn only once a font is set with [`set_font`].
///
/// [`captures_pointer`]: Self::captures_pointer
/// [`set_font`]: Self::set_font
pub struct Panel<S> {
    table: ParamTable<S>,
    style: PanelStyle,
    font: Option<FontId>,

    selected: usize,
    hidden: bool,

    captured: bool,
    dragging: Option<usize>,
}

impl<S> Panel<S> {
    pub fn new(table: ParamTable<S>, style: PanelStyle) -> Self {
        Self {
            table,
            style,
            font: None,
            selected: 0,
            hidden: false,
            captured: false,
            dragging: None,
        }
    }

    #[inline]
    pub fn table(&self) -> &ParamTable<S> {
        &self.table
    }

    #[inline]
    pub fn style(&self) -> &PanelStyle {
        &self.style
    }

    pub fn set_font(&mut self, font: Option<FontId>) {
        self.font = font;
    }

    #[inline]
    pub fn selected(&self) -> Option<&str> {
        (self.selected < self.table.len()).then(|| self.table.name_at(self.selected))
    }

    #[inline]
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
        if hidden {
            self.captured = false;
            self.dragging = None;
        }
    }

    /// Whether the pointer is currently owned by the panel.
    #[inline]
    pub fn captures_pointer(&self) -> bool {
        self.captured
    }

    /// Outer panel rectangle, anchored to the top-right corner.
    pub fn bounds(&self, viewport: Viewport) -> Rect {
        let s = &self.style;
        let rows = self.table.len() as f32;
        let height = 2.0 * s.padding + rows * s.row_height + (rows - 1.0).max(0.0) * s.row_gap;
        Rect::new(viewport.width - s.width - s.margin, s.margin, s.width, height)
    }

    /// Rectangle of row `index`.
    pub fn row_rect(&self, viewport: Viewport, index: usize) -> Rect {
        let s = &self.style;
        let b = self.bounds(viewport);
        Rect::new(
            b.origin.x + s.padding,
            b.origin.y + s.padding + index as f32 * (s.row_height + s.row_gap),
            s.width - 2.0 * s.padding,
            s.row_height,
        )
    }

    /// Row under `p`, if any.
    pub fn row_at(&self, viewport: Viewport, p: Vec2) -> Option<usize> {
        (0..self.table.len()).find(|&i| self.row_rect(viewport, i).contains(p))
    }

    /// Applies this frame's input to the panel and, through the table, to `state`.
    pub fn handle_input(
        &mut self,
        state: &mut S,
        input: &InputState,
        frame: &InputFrame,
        viewport: Viewport,
    ) {
        if frame.key_pressed(Key::Char('h')) {
            self.set_hidden(!self.hidden);
            log::debug!("panel {}", if self.hidden { "hidden" } else { "shown" });
        }
        if self.hidden || self.table.is_empty() {
            return;
        }

        self.handle_keys(state, input, frame);
        self.handle_pointer(state, input, frame, viewport);
    }

    fn handle_keys(&mut self, state: &mut S, input: &InputState, frame: &InputFrame) {
        let n = self.table.len();
        let shift = input.modifiers.shift;

        if frame.keys_repeated.contains(&Key::ArrowDown) || (frame.key_pressed(Key::Tab) && !shift) {
            self.selected = (self.selected + 1) % n;
        }
        if frame.keys_repeated.contains(&Key::ArrowUp) || (frame.key_pressed(Key::Tab) && shift) {
            self.selected = (self.selected + n - 1) % n;
        }
        self.selected = self.selected.min(n - 1);

        let name = self.table.name_at(self.selected).to_string();
        let result = match self.table.kind_at(self.selected) {
            ParamKind::Slider { .. } => {
                let factor = if shift { 10 } else { 1 };
                let mut steps = 0;
                if frame.keys_repeated.contains(&Key::ArrowRight) {
                    steps += factor;
                }
                if frame.keys_repeated.contains(&Key::ArrowLeft) {
                    steps -= factor;
                }
                if steps != 0 {
                    self.table.nudge(state, &name, steps).map(drop)
                } else {
                    Ok(())
                }
            }
            ParamKind::Toggle => {
                if activated(frame) {
                    self.table.toggle_flag(state, &name).map(drop)
                } else {
                    Ok(())
                }
            }
            ParamKind::Action => {
                if activated(frame) {
                    self.table.trigger(state, &name)
                } else {
                    Ok(())
                }
            }
        };
        report(result);
    }

    fn handle_pointer(
        &mut self,
        state: &mut S,
        input: &InputState,
        frame: &InputFrame,
        viewport: Viewport,
    ) {
        let pointer = input.pointer_pos.map(Vec2::from);

        if frame.buttons_pressed.contains(&MouseButton::Left) {
            if let Some(p) = pointer.filter(|&p| self.bounds(viewport).contains(p)) {
                self.captured = true;
                if let Some(index) = self.row_at(viewport, p) {
                    self.selected = index;
                    self.press_row(state, viewport, index, p);
                }
            }
        } else if let (Some(index), Some(p)) = (self.dragging, pointer) {
            if input.button_down(MouseButton::Left) && frame.pointer_delta != Vec2::zero() {
                self.drag_slider(state, viewport, index, p);
            }
        }

        if frame.buttons_released.contains(&MouseButton::Left) || !input.button_down(MouseButton::Left) {
            self.captured = false;
            self.dragging = None;
        }
    }

    fn press_row(&mut self, state: &mut S, viewport: Viewport, index: usize, p: Vec2) {
        let name = self.table.name_at(index).to_string();
        let result = match self.table.kind_at(index) {
            ParamKind::Slider { .. } => {
                self.dragging = Some(index);
                self.drag_slider(state, viewport, index, p);
                Ok(())
            }
            ParamKind::Toggle => self.table.toggle_flag(state, &name).map(drop),
            ParamKind::Action => self.table.trigger(state, &name),
        };
        report(result);
    }

    fn drag_slider(&mut self, state: &mut S, viewport: Viewport, index: usize, p: Vec2) {
        let t = self.row_rect(viewport, index).fraction_x(p.x);
        let name = self.table.name_at(index).to_string();
        report(self.table.set_normalized(state, &name, t).map(drop));
    }

    /// Records the panel into `list` above everything at lower `z`.
    pub fn draw(&self, state: &S, list: &mut DrawList, viewport: Viewport, z: ZIndex) {
        if self.hidden || self.table.is_empty() {
            return;
        }

        let s = &self.style;
        let bounds = self.bounds(viewport);

        list.push_clip(bounds);
        list.push_rect(z, bounds, s.background);

        for index in 0..self.table.len() {
            let row = self.row_rect(viewport, index);
            let name = self.table.name_at(index);
            let bg = if index == self.selected { s.row_selected } else { s.row };
            list.push_rect(z, row, bg);

            match self.table.kind_at(index) {
                ParamKind::Slider { .. } => {
                    let t = self.table.normalized(state, name).unwrap_or(0.0);
                    list.push_rect(z, row.with_width(row.size.x * t), s.slider_fill);
                }
                ParamKind::Toggle => {
                    let on = self.table.flag(state, name).unwrap_or(false);
                    let side = row.size.y - 8.0;
                    let knob = Rect::new(row.max().x - side - 4.0, row.origin.y + 4.0, side, side);
                    list.push_rect(z, knob, if on { s.toggle_on } else { s.toggle_off });
                }
                ParamKind::Action => {
                    list.push_rect(z, row.inset(4.0).with_width(4.0), s.action);
                }
            }

            if let Some(font) = self.font {
                self.draw_labels(state, list, font, index, row, z);
            }
        }

        list.pop_clip();
    }

    /// Name on the left of the row, value readout from `value_column` on.
    fn draw_labels(
        &self,
        state: &S,
        list: &mut DrawList,
        font: FontId,
        index: usize,
        row: Rect,
        z: ZIndex,
    ) {
        let s = &self.style;
        let name = self.table.name_at(index);
        let y = row.origin.y + ((row.size.y - s.text_size) * 0.5).max(0.0);
        let inset = if self.table.kind_at(index) == ParamKind::Action { 14.0 } else { 6.0 };

        list.push_text(z, name, font, s.text_size, s.text, Vec2::new(row.origin.x + inset, y));

        let value = match self.table.kind_at(index) {
            ParamKind::Slider { step, .. } => self
                .table
                .value(state, name)
                .ok()
                .map(|v| format_value(v, step)),
            ParamKind::Toggle => self
                .table
                .flag(state, name)
                .ok()
                .map(|on| String::from(if on { "on" } else { "off" })),
            ParamKind::Action => None,
        };
        if let Some(value) = value {
            let x = row.origin.x + row.size.x * s.value_column;
            list.push_text(z, value, font, s.text_size, s.text, Vec2::new(x, y));
        }
    }
}

/// Formats a slider value with as many decimals as its step needs.
fn format_value(value: f32, step: f32) -> String {
    let decimals = if step.is_finite() && step > 0.0 {
        (-step.log10() - 1e-4).ceil().clamp(0.0, 4.0) as usize
    } else {
        2
    };
    format!("{value:.decimals$}")
}

fn activated(frame: &InputFrame) -> bool {
    frame.key_pressed(Key::Space) || frame.key_pressed(Key::Enter)
}

fn report(result: Result<(), ParamError>) {
    if let Err(e) = result {
        log::warn!("panel: {e}");
    }
}
