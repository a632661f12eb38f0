//! Control panel layout, pointer/keyboard input and panel geometry.
//!
//! Coordinates are window-normalized: (0, 0) is the top-left corner and
//! (1, 1) the bottom-right, so the layout survives resizes unchanged.

use glam::Vec2;
use std::time::Instant;
use winit::keyboard::KeyCode;

use crate::control::ControlSystem;
use crate::oscillator::OscillatorControl;
use crate::params::Slider;

/// Horizontal margin around every control
const MARGIN_X: f32 = 0.08;
/// Vertical gap between rows, as a fraction of the row pitch
const ROW_GAP: f32 = 0.25;

const BACKGROUND: [f32; 4] = [0.08, 0.08, 0.10, 1.0];
const BUTTON_IDLE: [f32; 4] = [0.22, 0.22, 0.26, 1.0];
const SOUND_ON: [f32; 4] = [0.20, 0.70, 0.35, 1.0];
const RECORD_ON: [f32; 4] = [0.85, 0.20, 0.20, 1.0];
const PLAY_ON: [f32; 4] = [0.20, 0.50, 0.90, 1.0];
const DEMO: [f32; 4] = [0.30, 0.30, 0.45, 1.0];
const DELETE_ARMED: [f32; 4] = [0.55, 0.25, 0.20, 1.0];
const TRACK: [f32; 4] = [0.16, 0.16, 0.19, 1.0];
const TRACK_FILL: [f32; 4] = [0.95, 0.60, 0.15, 1.0];
const KNOB: [f32; 4] = [0.95, 0.95, 0.95, 1.0];

/// Interactive elements, top to bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Sound,
    Slider(Slider),
    Record,
    Play,
    LoadDemo,
    Delete,
}

impl Control {
    pub const ALL: [Control; 7] = [
        Control::Sound,
        Control::Slider(Slider::Amplitude),
        Control::Slider(Slider::Frequency),
        Control::Record,
        Control::Play,
        Control::LoadDemo,
        Control::Delete,
    ];
}

/// What the user asked for
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UiAction {
    ToggleSound,
    SetSlider(Slider, f64),
    NudgeSlider(Slider, i32),
    ToggleRecording,
    TogglePlayback,
    LoadDemo,
    DeleteRecording,
}

impl UiAction {
    /// Apply the action to the panel state
    pub fn apply<O: OscillatorControl>(self, system: &mut ControlSystem<O>, now: Instant) {
        match self {
            UiAction::ToggleSound => system.toggle_sound(),
            UiAction::SetSlider(slider, fraction) => system.set_slider_fraction(slider, fraction),
            UiAction::NudgeSlider(slider, steps) => system.nudge_slider(slider, steps),
            UiAction::ToggleRecording => system.toggle_recording(now),
            UiAction::TogglePlayback => system.toggle_playback(now),
            UiAction::LoadDemo => system.load_demo(),
            UiAction::DeleteRecording => system.delete_recording(),
        }
    }
}

/// Keyboard shortcuts
pub fn action_for_key(key: KeyCode) -> Option<UiAction> {
    let action = match key {
        KeyCode::Space => UiAction::ToggleSound,
        KeyCode::KeyR => UiAction::ToggleRecording,
        KeyCode::KeyP => UiAction::TogglePlayback,
        KeyCode::KeyL => UiAction::LoadDemo,
        KeyCode::Delete | KeyCode::Backspace => UiAction::DeleteRecording,
        KeyCode::ArrowUp => UiAction::NudgeSlider(Slider::Amplitude, 1),
        KeyCode::ArrowDown => UiAction::NudgeSlider(Slider::Amplitude, -1),
        KeyCode::ArrowRight => UiAction::NudgeSlider(Slider::Frequency, 1),
        KeyCode::ArrowLeft => UiAction::NudgeSlider(Slider::Frequency, -1),
        _ => return None,
    };
    Some(action)
}

/// Axis-aligned rectangle in normalized window coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Shrink by `amount` on every side
    pub fn inset(&self, amount: Vec2) -> Self {
        Self::new(self.min + amount, self.max - amount)
    }

    /// Left part of the rectangle covering `fraction` of its width
    pub fn left_fraction(&self, fraction: f32) -> Self {
        let x = self.min.x + self.size().x * fraction.clamp(0.0, 1.0);
        Self::new(self.min, Vec2::new(x, self.max.y))
    }
}

/// Solid coloured rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quad {
    pub rect: Rect,
    pub color: [f32; 4],
}

/// Snapshot of the state the panel draws
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelView {
    pub sound: bool,
    pub recording: bool,
    pub playing: bool,
    pub amplitude_fraction: f32,
    pub frequency_fraction: f32,
    pub has_recording: bool,
}

impl PanelView {
    pub fn of<O: OscillatorControl>(system: &ControlSystem<O>) -> Self {
        Self {
            sound: system.sound(),
            recording: system.is_recording(),
            playing: system.is_playing(),
            amplitude_fraction: system.slider_fraction(Slider::Amplitude) as f32,
            frequency_fraction: system.slider_fraction(Slider::Frequency) as f32,
            has_recording: !system.recorded().is_empty(),
        }
    }

    fn slider_fraction(&self, slider: Slider) -> f32 {
        match slider {
            Slider::Amplitude => self.amplitude_fraction,
            Slider::Frequency => self.frequency_fraction,
        }
    }
}

/// Panel layout plus pointer drag state
#[derive(Debug, Clone)]
pub struct Panel {
    controls: Vec<(Control, Rect)>,
    dragging: Option<Slider>,
}

impl Default for Panel {
    fn default() -> Self {
        Self::new()
    }
}

impl Panel {
    /// Stack every control in its own row
    pub fn new() -> Self {
        let pitch = 1.0 / Control::ALL.len() as f32;
        let gap = pitch * ROW_GAP;
        let controls = Control::ALL
            .iter()
            .enumerate()
            .map(|(row, &control)| {
                let top = row as f32 * pitch + gap / 2.0;
                let bottom = (row + 1) as f32 * pitch - gap / 2.0;
                let rect = Rect::new(Vec2::new(MARGIN_X, top), Vec2::new(1.0 - MARGIN_X, bottom));
                (control, rect)
            })
            .collect();

        Self {
            controls,
            dragging: None,
        }
    }

    pub fn rect(&self, control: Control) -> Option<Rect> {
        self.controls
            .iter()
            .find(|(c, _)| *c == control)
            .map(|(_, rect)| *rect)
    }

    pub fn hit_test(&self, point: Vec2) -> Option<Control> {
        self.controls
            .iter()
            .find(|(_, rect)| rect.contains(point))
            .map(|(control, _)| *control)
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging.is_some()
    }

    /// Left button pressed at `point`
    pub fn pointer_pressed(&mut self, point: Vec2) -> Option<UiAction> {
        let action = match self.hit_test(point)? {
            Control::Sound => UiAction::ToggleSound,
            Control::Slider(slider) => {
                self.dragging = Some(slider);
                return self.slider_action(slider, point);
            }
            Control::Record => UiAction::ToggleRecording,
            Control::Play => UiAction::TogglePlayback,
            Control::LoadDemo => UiAction::LoadDemo,
            Control::Delete => UiAction::DeleteRecording,
        };
        Some(action)
    }

    /// Pointer moved; only meaningful while a slider is held
    pub fn pointer_moved(&mut self, point: Vec2) -> Option<UiAction> {
        let slider = self.dragging?;
        self.slider_action(slider, point)
    }

    pub fn pointer_released(&mut self) {
        self.dragging = None;
    }

    fn slider_action(&self, slider: Slider, point: Vec2) -> Option<UiAction> {
        let track = self.rect(Control::Slider(slider))?;
        let width = track.size().x;
        if width <= 0.0 {
            return None;
        }
        let fraction = ((point.x - track.min.x) / width).clamp(0.0, 1.0);
        Some(UiAction::SetSlider(slider, f64::from(fraction)))
    }

    /// Geometry of the whole panel, back to front
    pub fn quads(&self, view: &PanelView) -> Vec<Quad> {
        let mut quads = vec![Quad {
            rect: Rect::new(Vec2::ZERO, Vec2::ONE),
            color: BACKGROUND,
        }];

        for &(control, rect) in &self.controls {
            match control {
                Control::Slider(slider) => {
                    let fraction = view.slider_fraction(slider);
                    let track = rect.inset(Vec2::new(0.0, rect.size().y * 0.3));
                    quads.push(Quad {
                        rect: track,
                        color: TRACK,
                    });
                    quads.push(Quad {
                        rect: track.left_fraction(fraction),
                        color: TRACK_FILL,
                    });

                    let knob_x = track.min.x + track.size().x * fraction;
                    let half_width = 0.012;
                    quads.push(Quad {
                        rect: Rect::new(
                            Vec2::new(knob_x - half_width, rect.min.y),
                            Vec2::new(knob_x + half_width, rect.max.y),
                        ),
                        color: KNOB,
                    });
                }
                _ => quads.push(Quad {
                    rect,
                    color: button_color(control, view),
                }),
            }
        }

        quads
    }
}

fn button_color(control: Control, view: &PanelView) -> [f32; 4] {
    match control {
        Control::Sound if view.sound => SOUND_ON,
        Control::Record if view.recording => RECORD_ON,
        Control::Play if view.playing => PLAY_ON,
        Control::LoadDemo => DEMO,
        Control::Delete if view.has_recording => DELETE_ARMED,
        _ => BUTTON_IDLE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oscillator::fake::FakeOscillator;
    use crate::params::ControlParams;

    fn center(panel: &Panel, control: Control) -> Vec2 {
        let rect = panel.rect(control).unwrap();
        (rect.min + rect.max) / 2.0
    }

    fn idle_view() -> PanelView {
        PanelView {
            sound: false,
            recording: false,
            playing: false,
            amplitude_fraction: 0.0,
            frequency_fraction: 0.0,
            has_recording: false,
        }
    }

    #[test]
    fn test_rows_do_not_overlap() {
        let panel = Panel::new();
        for pair in Control::ALL.windows(2) {
            let upper = panel.rect(pair[0]).unwrap();
            let lower = panel.rect(pair[1]).unwrap();
            assert!(upper.max.y < lower.min.y);
        }
    }

    #[test]
    fn test_hit_test_finds_each_control() {
        let panel = Panel::new();
        for control in Control::ALL {
            assert_eq!(panel.hit_test(center(&panel, control)), Some(control));
        }
        assert_eq!(panel.hit_test(Vec2::new(0.01, 0.5)), None);
    }

    #[test]
    fn test_button_press_maps_to_action() {
        let mut panel = Panel::new();
        let record = center(&panel, Control::Record);
        let delete = center(&panel, Control::Delete);

        assert_eq!(panel.pointer_pressed(record), Some(UiAction::ToggleRecording));
        assert_eq!(panel.pointer_pressed(delete), Some(UiAction::DeleteRecording));
        assert!(!panel.is_dragging());
    }

    #[test]
    fn test_slider_drag_tracks_pointer() {
        let mut panel = Panel::new();
        let slider = Control::Slider(Slider::Frequency);
        let rect = panel.rect(slider).unwrap();
        let y = center(&panel, slider).y;

        let action = panel.pointer_pressed(Vec2::new(rect.min.x, y));
        assert_eq!(action, Some(UiAction::SetSlider(Slider::Frequency, 0.0)));
        assert!(panel.is_dragging());

        // Dragging past the track clamps, even outside the row
        let action = panel.pointer_moved(Vec2::new(2.0, 0.0));
        assert_eq!(action, Some(UiAction::SetSlider(Slider::Frequency, 1.0)));

        panel.pointer_released();
        assert_eq!(panel.pointer_moved(Vec2::new(0.5, y)), None);
    }

    #[test]
    fn test_quads_light_active_toggles() {
        let panel = Panel::new();
        let view = PanelView {
            sound: true,
            recording: true,
            ..idle_view()
        };
        let quads = panel.quads(&view);

        let color_at = |control| {
            let rect = panel.rect(control).unwrap();
            quads.iter().find(|q| q.rect == rect).unwrap().color
        };
        assert_eq!(color_at(Control::Sound), SOUND_ON);
        assert_eq!(color_at(Control::Record), RECORD_ON);
        assert_eq!(color_at(Control::Play), BUTTON_IDLE);
        assert_eq!(color_at(Control::Delete), BUTTON_IDLE);
    }

    #[test]
    fn test_slider_fill_follows_value() {
        let panel = Panel::new();
        let view = PanelView {
            amplitude_fraction: 0.5,
            ..idle_view()
        };
        let quads = panel.quads(&view);

        let fill = quads.iter().find(|q| q.color == TRACK_FILL).unwrap();
        let track = panel.rect(Control::Slider(Slider::Amplitude)).unwrap();
        let expected = track.min.x + track.size().x * 0.5;
        assert!((fill.rect.max.x - expected).abs() < 1e-6);
    }

    #[test]
    fn test_keyboard_shortcuts() {
        assert_eq!(action_for_key(KeyCode::Space), Some(UiAction::ToggleSound));
        assert_eq!(action_for_key(KeyCode::Backspace), Some(UiAction::DeleteRecording));
        assert_eq!(
            action_for_key(KeyCode::ArrowLeft),
            Some(UiAction::NudgeSlider(Slider::Frequency, -1))
        );
        assert_eq!(action_for_key(KeyCode::KeyQ), None);
    }

    #[test]
    fn test_actions_drive_control_system() {
        let mut system = ControlSystem::new(FakeOscillator::default(), ControlParams::default());
        let now = Instant::now();

        UiAction::SetSlider(Slider::Amplitude, 0.4).apply(&mut system, now);
        assert_eq!(system.amplitude(), 2.0);

        UiAction::TogglePlayback.apply(&mut system, now);
        UiAction::ToggleRecording.apply(&mut system, now);
        assert!(system.is_recording() && !system.is_playing());

        UiAction::LoadDemo.apply(&mut system, now);
        let view = PanelView::of(&system);
        assert!(view.has_recording);
        assert!(view.recording);
        assert!((view.amplitude_fraction - 0.4).abs() < 1e-6);
    }
}
