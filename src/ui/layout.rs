//! HUD layout
//!
//! Button rectangles and text positions are a pure function of the snapshot,
//! the viewport and text metrics, so the renderer and the pointer hit-tester
//! always agree without a draw having happened first.

use glam::IVec2;

use crate::sim::Snapshot;

/// Measures rendered text. Pixels for a windowed renderer, cells for a terminal.
pub trait TextMetrics {
    fn text_size(&self, text: &str) -> IVec2;
}

/// Axis-aligned screen rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub origin: IVec2,
    pub size: IVec2,
}

impl Rect {
    pub fn new(origin: IVec2, size: IVec2) -> Self {
        Self { origin, size }
    }

    /// Left/top edges inclusive, right/bottom exclusive
    pub fn contains(&self, point: IVec2) -> bool {
        point.cmpge(self.origin).all() && point.cmplt(self.origin + self.size).all()
    }
}

/// What a click on a HUD button asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonAction {
    Pause,
    Restart,
}

/// A line of text at a screen position (top-left of the text box)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    pub text: String,
    pub pos: IVec2,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub action: ButtonAction,
    pub rect: Rect,
    pub label: Label,
}

/// Spacing knobs, in the renderer's screen units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutStyle {
    /// Extra width/height a button adds around its label
    pub button_padding: IVec2,
    /// Gap between the HUD and the viewport edges
    pub margin: IVec2,
    /// Vertical distance between game-over lines
    pub line_spacing: i32,
}

impl LayoutStyle {
    /// Pixel spacing for a windowed front end that measures text in pixels
    pub const WINDOW: Self = Self {
        button_padding: IVec2::new(40, 20),
        margin: IVec2::new(10, 10),
        line_spacing: 60,
    };

    /// Cell spacing for the terminal renderer
    pub const TERMINAL: Self = Self {
        button_padding: IVec2::new(4, 2),
        margin: IVec2::new(1, 0),
        line_spacing: 2,
    };
}

/// Everything the HUD shows for one frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HudLayout {
    pub score: Label,
    /// Shown while the game is not over
    pub pause_button: Option<Button>,
    /// Shown only once the game is over
    pub restart_button: Option<Button>,
    /// "Game Over!" and final score lines
    pub banner: Vec<Label>,
}

impl HudLayout {
    /// Button under the pointer, if any
    pub fn hit_test(&self, pointer: IVec2) -> Option<ButtonAction> {
        [&self.restart_button, &self.pause_button]
            .into_iter()
            .flatten()
            .find(|button| button.rect.contains(pointer))
            .map(|button| button.action)
    }
}

pub fn layout(
    snapshot: &Snapshot<'_>,
    viewport: IVec2,
    metrics: &impl TextMetrics,
    style: &LayoutStyle,
) -> HudLayout {
    let score = Label {
        text: format!("Score: {}", snapshot.score),
        pos: style.margin,
    };

    if !snapshot.game_over {
        let text = if snapshot.paused { "Resume" } else { "Pause" };
        let size = metrics.text_size(text) + style.button_padding;
        let origin = IVec2::new(viewport.x - size.x - style.margin.x, style.margin.y);
        let pause_button = button(ButtonAction::Pause, text, Rect::new(origin, size), metrics, style);

        return HudLayout {
            score,
            pause_button: Some(pause_button),
            restart_button: None,
            banner: Vec::new(),
        };
    }

    let center = viewport / 2;
    let banner = [
        ("Game Over!".to_string(), center.y - style.line_spacing),
        (format!("Final score: {}", snapshot.score), center.y),
    ]
    .into_iter()
    .map(|(text, y)| {
        let width = metrics.text_size(&text).x;
        Label {
            pos: IVec2::new(center.x - width / 2, y),
            text,
        }
    })
    .collect();

    let text = "Restart";
    let size = metrics.text_size(text) + style.button_padding;
    let origin = IVec2::new(center.x - size.x / 2, center.y + style.line_spacing);
    let restart_button = button(ButtonAction::Restart, text, Rect::new(origin, size), metrics, style);

    HudLayout {
        score,
        pause_button: None,
        restart_button: Some(restart_button),
        banner,
    }
}

/// Lay out the HUD and report which button, if any, sits under `pointer`
pub fn hit_test(
    snapshot: &Snapshot<'_>,
    viewport: IVec2,
    metrics: &impl TextMetrics,
    style: &LayoutStyle,
    pointer: IVec2,
) -> Option<ButtonAction> {
    layout(snapshot, viewport, metrics, style).hit_test(pointer)
}

/// Button with its label centered in `rect`
fn button(
    action: ButtonAction,
    text: &str,
    rect: Rect,
    metrics: &impl TextMetrics,
    style: &LayoutStyle,
) -> Button {
    let text_size = metrics.text_size(text);
    let pos = IVec2::new(
        rect.origin.x + (rect.size.x - text_size.x) / 2,
        rect.origin.y + style.button_padding.y / 2,
    );
    Button {
        action,
        rect,
        label: Label {
            text: text.to_string(),
            pos,
        },
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;

    /// Fixed-width font: 18 px per char, 36 px tall
    struct Mono;

    impl TextMetrics for Mono {
        fn text_size(&self, text: &str) -> IVec2 {
            IVec2::new(text.chars().count() as i32 * 18, 36)
        }
    }

    const VIEWPORT: IVec2 = IVec2::new(1200, 1200);

    fn snapshot(snake: &VecDeque<IVec2>, paused: bool, game_over: bool) -> Snapshot<'_> {
        Snapshot {
            tile_count: 30,
            snake,
            food: &[],
            walls: &[],
            score: 40,
            paused,
            game_over,
            regen_pending: false,
        }
    }

    #[test]
    fn test_rect_contains_edges() {
        let rect = Rect::new(IVec2::new(10, 10), IVec2::new(5, 5));
        assert!(rect.contains(IVec2::new(10, 10)));
        assert!(rect.contains(IVec2::new(14, 14)));
        assert!(!rect.contains(IVec2::new(15, 12)));
        assert!(!rect.contains(IVec2::new(9, 12)));
    }

    #[test]
    fn test_pause_button_top_right() {
        let snake = VecDeque::from([IVec2::new(10, 10)]);
        let hud = layout(&snapshot(&snake, false, false), VIEWPORT, &Mono, &LayoutStyle::WINDOW);

        let pause = hud.pause_button.expect("pause button while playing");
        // "Pause" = 90 px + 40 padding, 36 + 20 tall
        assert_eq!(pause.rect, Rect::new(IVec2::new(1200 - 130 - 10, 10), IVec2::new(130, 56)));
        assert_eq!(pause.label.text, "Pause");
        assert_eq!(pause.label.pos, IVec2::new(1060 + 20, 20));
        assert!(hud.restart_button.is_none());
        assert!(hud.banner.is_empty());
        assert_eq!(hud.score.text, "Score: 40");
    }

    #[test]
    fn test_paused_label() {
        let snake = VecDeque::from([IVec2::new(10, 10)]);
        let hud = layout(&snapshot(&snake, true, false), VIEWPORT, &Mono, &LayoutStyle::WINDOW);
        assert_eq!(hud.pause_button.unwrap().label.text, "Resume");
    }

    #[test]
    fn test_game_over_layout() {
        let snake = VecDeque::from([IVec2::new(10, 10)]);
        let hud = layout(&snapshot(&snake, false, true), VIEWPORT, &Mono, &LayoutStyle::WINDOW);

        assert!(hud.pause_button.is_none());
        let restart = hud.restart_button.expect("restart button when over");
        // "Restart" = 126 px + 40 padding, centered, 60 px below center
        assert_eq!(restart.rect, Rect::new(IVec2::new(600 - 83, 660), IVec2::new(166, 56)));
        assert_eq!(hud.banner[0].text, "Game Over!");
        assert_eq!(hud.banner[0].pos.y, 540);
        assert_eq!(hud.banner[1].text, "Final score: 40");
        assert_eq!(hud.banner[1].pos.y, 600);
    }

    #[test]
    fn test_hit_test_by_phase() {
        let snake = VecDeque::from([IVec2::new(10, 10)]);
        let pause_point = IVec2::new(1100, 30);
        let restart_point = IVec2::new(600, 680);

        let playing = snapshot(&snake, false, false);
        assert_eq!(
            hit_test(&playing, VIEWPORT, &Mono, &LayoutStyle::WINDOW, pause_point),
            Some(ButtonAction::Pause)
        );
        assert_eq!(hit_test(&playing, VIEWPORT, &Mono, &LayoutStyle::WINDOW, restart_point), None);

        let over = snapshot(&snake, false, true);
        assert_eq!(hit_test(&over, VIEWPORT, &Mono, &LayoutStyle::WINDOW, pause_point), None);
        assert_eq!(
            hit_test(&over, VIEWPORT, &Mono, &LayoutStyle::WINDOW, restart_point),
            Some(ButtonAction::Restart)
        );
        assert_eq!(hit_test(&over, VIEWPORT, &Mono, &LayoutStyle::WINDOW, IVec2::ZERO), None);
    }
}
